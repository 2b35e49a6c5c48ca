// Entry point and high-level CLI flow.
//
// One-shot mode loads the feed, applies the flags and prints the dashboard
// (optionally exporting CSV/JSON). `--interactive` keeps a menu loop where
// every choice produces a new dashboard state and re-renders it.
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use report_tracker::config::{init_logging, optional_date, Cli};
use report_tracker::dashboard::{DashboardState, DashboardView};
use report_tracker::loader;
use report_tracker::output;
use report_tracker::status::SystemClock;
use report_tracker::types::{DepartmentFilter, FilterCriteria};
use report_tracker::util::format_int;

/// Read a single line of input after printing `prompt`.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn handle_load(state: DashboardState, path: &Path) -> (DashboardState, Option<DashboardView>) {
    let result = loader::load_feed(path).map(|(reports, load)| {
        println!(
            "Loaded {} reports ({} skipped as malformed).\n",
            format_int(load.accepted),
            format_int(load.skipped)
        );
        reports
    });
    state.with_load_result(result)
}

fn show(state: &DashboardState, failed: &Option<DashboardView>, mail_to: Option<&str>) {
    let view = match failed {
        Some(v) => v.clone(),
        None => state.render(),
    };
    println!("{}", output::render_dashboard(&view, mail_to));
}

fn handle_exports(state: &DashboardState, cli: &Cli) {
    if let Some(path) = &cli.export_csv {
        match output::write_csv(path, &state.range_rows()) {
            Ok(()) => println!("(Filtered table exported to {})", path.display()),
            Err(e) => eprintln!("Write error: {}", e),
        }
    }
    if let Some(path) = &cli.export_json {
        let view = state.render();
        match output::write_json(path, &output::DashboardExport::from(&view)) {
            Ok(()) => println!("(KPIs and calendar exported to {})", path.display()),
            Err(e) => eprintln!("Write error: {}", e),
        }
    }
}

fn interactive(mut state: DashboardState, mut failed: Option<DashboardView>, cli: &Cli) {
    loop {
        println!(
            "Reference date {} | theme {} | {} reports loaded\n",
            state.reference_date(),
            state.theme(),
            format_int(state.reports().len())
        );
        show(&state, &failed, cli.mail_to.as_deref());
        println!("[1] Reload feed");
        println!("[2] Set search");
        println!("[3] Set department");
        println!("[4] Set date range");
        println!("[5] Next page");
        println!("[6] Previous page");
        println!("[7] Show calendar");
        println!("[0] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                let (next, f) = handle_load(state, &cli.feed);
                state = next;
                failed = f;
            }
            "2" => {
                let term = read_line("Search: ");
                let criteria = state.criteria().clone().with_search(term);
                state = state.with_criteria(criteria);
            }
            "3" => {
                println!("Departments: all, {}", state.render().departments.join(", "));
                let dept = read_line("Department: ");
                let criteria = state.criteria().clone().with_department(DepartmentFilter::parse(&dept));
                state = state.with_criteria(criteria);
            }
            "4" => {
                let start = read_line("Start (YYYY-MM-DD, blank for none): ");
                let end = read_line("End (YYYY-MM-DD, blank for none): ");
                match (optional_date("start", Some(&start)), optional_date("end", Some(&end))) {
                    (Ok(s), Ok(e)) => {
                        let criteria = state.criteria().clone().with_range(s, e);
                        state = state.with_criteria(criteria);
                    }
                    (Err(e), _) | (_, Err(e)) => println!("{}\n", e),
                }
            }
            "5" => state = state.next_page(),
            "6" => state = state.previous_page(),
            "7" => println!("{}\n", output::render_calendar(&state.render().events)),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-7.\n"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let criteria: FilterCriteria = match cli.criteria() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    let today = match cli.reference_date(&SystemClock) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    log::debug!("reference date {}", today);

    let state = DashboardState::new(Vec::new(), today)
        .with_theme(cli.theme())
        .with_criteria(criteria);
    let (state, failed) = handle_load(state, &cli.feed);
    let state = state.with_page(cli.page);

    if cli.interactive {
        interactive(state, failed, &cli);
        return ExitCode::SUCCESS;
    }

    show(&state, &failed, cli.mail_to.as_deref());
    if cli.calendar && failed.is_none() {
        println!("{}", output::render_calendar(&state.render().events));
    }
    if failed.is_none() {
        handle_exports(&state, &cli);
    }
    ExitCode::SUCCESS
}
