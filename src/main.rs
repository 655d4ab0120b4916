// Entry point and interactive console flow.
//
// - Option [1] loads the inspection file, or reloads it if already loaded.
// - Option [2] picks "Overall Analysis" or a consultant and prints the
//   dashboard for that selection, optionally exporting it.
// - Option [3] exits.
mod aggregate;
mod config;
mod dataset;
mod error;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use config::Config;
use dataset::{Dataset, Snapshot};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::Selection;

/// Owned application state: the dataset (once loaded) and the config it
/// was loaded with.
struct App {
    config: Config,
    dataset: Option<Dataset>,
}

/// Read one trimmed line after printing `prompt`. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Ask a Y/N question until answered. End of input counts as `N`.
fn prompt_yes_no(question: &str) -> bool {
    loop {
        let Some(resp) = read_line(question) else {
            return false;
        };
        match resp.to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_load_summary(snapshot: &Snapshot) {
    println!(
        "Loaded {} ({} rows read, {} loaded) at {}",
        snapshot.source.display(),
        util::format_int(snapshot.report.total_rows),
        util::format_int(snapshot.report.loaded_rows),
        snapshot.loaded_at.format("%Y-%m-%d %H:%M:%S")
    );
    if snapshot.report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped due to missing fields or invalid amounts.",
            util::format_int(snapshot.report.skipped_rows)
        );
    }
    println!();
}

/// Handle option [1]: first load, or reload of the same file.
///
/// A failed reload is reported and the data already in memory stays in use.
fn handle_load(app: &mut App) {
    match app.dataset.as_mut() {
        Some(dataset) => match dataset.reload() {
            Ok(snapshot) => {
                println!("Data reloaded!");
                print_load_summary(&snapshot);
            }
            Err(e) => {
                eprintln!("Failed to reload {}: {}", dataset.path().display(), e);
                eprintln!("Continuing with the previously loaded data.\n");
            }
        },
        None => match Dataset::open(&app.config.data.path) {
            Ok(dataset) => {
                print_load_summary(&dataset.snapshot());
                app.dataset = Some(dataset);
            }
            Err(e) => {
                tracing::error!(error = %e, "initial load failed");
                eprintln!("Failed to load file: {}\n", e);
            }
        },
    }
}

/// Shown under the consultant list. Must match `parse_selection`.
const SELECTION_HINT: &str = "Enter an option number or an exact consultant name \
(empty for Overall Analysis). Numbers within the list always pick that option; \
a consultant whose name is such a number is chosen by its option number.";

/// Resolve the picker input: an option number, an exact name, or empty for
/// the overall view. In-range numbers are always option numbers.
fn parse_selection(input: &str, options: &[String]) -> Selection {
    if input.is_empty() {
        return Selection::Overall;
    }
    if let Ok(n) = input.parse::<usize>() {
        if let Some(name) = n.checked_sub(1).and_then(|i| options.get(i)) {
            return Selection::from_input(name);
        }
    }
    Selection::from_input(input)
}

/// Handle option [2]: choose a selection, print its dashboard, offer export.
fn handle_view(app: &App) {
    let Some(dataset) = app.dataset.as_ref() else {
        println!("Error: No data loaded. Please load the file first (option 1).\n");
        return;
    };
    let snapshot = dataset.snapshot();

    let options = reports::consultant_options(&snapshot.records);
    println!("Select a Consultant:");
    for (i, name) in options.iter().enumerate() {
        println!("[{}] {}", i + 1, name);
    }
    println!("{}", SELECTION_HINT);
    let Some(input) = read_line("Enter choice: ") else {
        return;
    };
    let selection = parse_selection(&input, &options);
    println!();

    let view = reports::build_dashboard(&snapshot.records, &selection);
    output::print_dashboard(&view);

    if prompt_yes_no("Export this view (Y/N): ") {
        match output::export_view(Path::new(&app.config.export.dir), &view) {
            Ok(files) => {
                for f in files {
                    println!("Saved {}", f.display());
                }
                println!();
            }
            Err(e) => eprintln!("Export failed: {:#}\n", e),
        }
    }
}

fn init_tracing(config: &Config) {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let (config, config_path) = config::load_config()?;
    init_tracing(&config);
    match config_path {
        Some(p) => tracing::info!("Loaded config from: {}", p.display()),
        None => tracing::info!("Using default embedded configuration"),
    }

    let mut app = App {
        config,
        dataset: None,
    };
    handle_load(&mut app);

    loop {
        println!("Consultant Revenue Dashboard:");
        println!("[1] Load / Reload the file");
        println!("[2] View Analysis");
        println!("[3] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&mut app),
            "2" => {
                println!();
                handle_view(&app);
            }
            "3" => break,
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
    println!("Exiting the program.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["Overall Analysis".into(), "Kemi".into(), "Ade".into()]
    }

    #[test]
    fn selection_by_number_name_or_default() {
        assert_eq!(parse_selection("", &options()), Selection::Overall);
        assert_eq!(parse_selection("1", &options()), Selection::Overall);
        assert_eq!(parse_selection("3", &options()), Selection::Consultant("Ade".into()));
        assert_eq!(parse_selection("Kemi", &options()), Selection::Consultant("Kemi".into()));
        assert_eq!(parse_selection("Overall Analysis", &options()), Selection::Overall);
    }

    #[test]
    fn numeric_consultant_name_is_reached_by_its_option_number() {
        let opts: Vec<String> = vec!["Overall Analysis".into(), "2".into(), "Kemi".into()];
        assert_eq!(parse_selection("2", &opts), Selection::Consultant("2".into()));
        let opts: Vec<String> = vec!["Overall Analysis".into(), "Kemi".into(), "1".into()];
        assert_eq!(parse_selection("1", &opts), Selection::Overall);
        assert_eq!(parse_selection("3", &opts), Selection::Consultant("1".into()));
        assert!(SELECTION_HINT.contains("option number"));
        assert!(SELECTION_HINT.contains("empty for Overall Analysis"));
    }

    #[test]
    fn out_of_range_number_is_taken_as_a_name() {
        assert_eq!(parse_selection("0", &options()), Selection::Consultant("0".into()));
        assert_eq!(parse_selection("9", &options()), Selection::Consultant("9".into()));
    }
}
