// AppInventory - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running the report-to-spreadsheet pipeline
//
// Exit status: 1 when the input report is missing, empty or unreadable.
// Any other failure is logged and reported, and the process exits 0.

use appinventory::app::cli::{build_options, Cli};
use appinventory::app::pipeline;
use appinventory::platform::config::{self, PlatformPaths};
use appinventory::util::error::AppInventoryError;
use appinventory::util::{constants, logging};

use clap::Parser;

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "AppInventory starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    let options = build_options(&cli, app_config, chrono::Local::now().date_naive());

    match pipeline::run(&options) {
        Ok(report) => {
            println!("Data exported successfully to {}", report.output.display());
        }
        Err(AppInventoryError::Input(e)) => {
            tracing::error!(error = %e, "Input validation failed");
            eprintln!("Warning: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {e}");
        }
    }
}
