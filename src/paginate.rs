/// Rows per table page.
pub const PAGE_SIZE: usize = 15;

/// Slice out 1-indexed page `page_number`. Page 0 or a page past the end
/// yields an empty slice rather than an error.
pub fn page<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items; zero when there are none.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Clamp a requested page into `1..=page_count`, using page 1 for an empty set.
pub fn clamp_page(requested: usize, len: usize, page_size: usize) -> usize {
    requested.clamp(1, page_count(len, page_size).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_partition_items() {
        let items: Vec<usize> = (0..32).collect();
        assert_eq!(page(&items, 1, PAGE_SIZE), &items[0..15]);
        assert_eq!(page(&items, 2, PAGE_SIZE), &items[15..30]);
        assert_eq!(page(&items, 3, PAGE_SIZE), &items[30..32]);
        assert!(page(&items, 4, PAGE_SIZE).is_empty());
        assert!(page(&items, 0, PAGE_SIZE).is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 15), 0);
        assert_eq!(page_count(15, 15), 1);
        assert_eq!(page_count(16, 15), 2);
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(5, 16, 15), 2);
        assert_eq!(clamp_page(0, 16, 15), 1);
        assert_eq!(clamp_page(3, 0, 15), 1);
    }
}
