// AppInventory - app/cli.rs
//
// Command-line surface and the merge of flags over config.toml.

use crate::app::pipeline::PipelineOptions;
use crate::core::export::ExportOptions;
use crate::core::model::{ExportFormat, UsageThresholds};
use crate::platform::config::AppConfig;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// AppInventory - macOS application inventory exporter.
///
/// Reads a System Information "Applications" text report and writes the
/// applications installed under /Applications or ~/Applications to a
/// spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "appinventory", version, about)]
pub struct Cli {
    /// System Information text report (default: Installed_Applications.txt).
    pub input: Option<PathBuf>,

    /// Output file (default: Installed_Applications.xlsx).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted.
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<ExportFormat>,

    /// Label written to the OS column.
    #[arg(long = "os-label")]
    pub os_label: Option<String>,

    /// Configuration file (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

/// Merge CLI flags over validated config values.
///
/// Priority: CLI flag > config.toml > built-in default. An explicit
/// `--format` without `--output` rewrites the configured output's
/// extension to match.
pub fn build_options(cli: &Cli, app_config: AppConfig, today: NaiveDate) -> PipelineOptions {
    let input = cli.input.clone().unwrap_or(app_config.input_file);

    let mut output = cli.output.clone().unwrap_or(app_config.output_file);
    if let (Some(format), None) = (cli.format, &cli.output) {
        output.set_extension(format.extension());
    }
    let format = cli
        .format
        .or_else(|| ExportFormat::from_path(&output))
        .unwrap_or_default();

    PipelineOptions {
        input,
        output,
        format,
        export: ExportOptions {
            sheet_name: app_config.sheet_name,
            os_label: cli.os_label.clone().unwrap_or(app_config.os_label),
        },
        thresholds: UsageThresholds {
            frequently_max_days: app_config.frequently_max_days,
            occasionally_max_days: app_config.occasionally_max_days,
        },
        today,
    }
}
