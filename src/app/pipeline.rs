// AppInventory - app/pipeline.rs
//
// Report-to-spreadsheet pipeline:
//   validate input -> parse -> sort by name -> renumber -> export
//
// Input validation runs before anything else, so a missing or empty
// report never creates or touches the output file.

use crate::core::collate::CollationKey;
use crate::core::export::{self, ExportOptions};
use crate::core::model::{ApplicationRecord, ExportFormat, UsageThresholds};
use crate::core::parser::{self, ParseConfig};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Instant;

/// Everything one pipeline run needs. Built by the CLI from config.toml
/// and flags; tests build it directly.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub export: ExportOptions,
    pub thresholds: UsageThresholds,
    /// Reference date for usage classification.
    pub today: NaiveDate,
}

impl PipelineOptions {
    /// Defaults for everything except the paths and date.
    ///
    /// The format is inferred from the output extension, falling back to XLSX.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let output = output.into();
        Self {
            input: input.into(),
            format: ExportFormat::from_path(&output).unwrap_or_default(),
            output,
            export: ExportOptions::default(),
            thresholds: UsageThresholds::default(),
            today,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub output: PathBuf,
    pub format: ExportFormat,
    pub records_written: usize,
    pub blocks_seen: usize,
    pub blocks_discarded: usize,
    pub warnings: usize,
}

/// Sort records by name in collation order and reassign `id` as the
/// 1-based position.
pub fn sort_and_renumber(records: &mut [ApplicationRecord]) {
    records.sort_by_cached_key(|r| CollationKey::new(&r.name));
    for (idx, record) in records.iter_mut().enumerate() {
        record.id = idx + 1;
    }
}

/// Run the full pipeline.
///
/// Returns `AppInventoryError::Input` if the report is missing, empty or
/// unreadable; any other error comes from the export step.
pub fn run(options: &PipelineOptions) -> Result<PipelineReport> {
    let start = Instant::now();

    let size = fs::validate_input(&options.input)?;
    tracing::info!(
        input = %options.input.display(),
        bytes = size,
        "Reading application report"
    );

    let content = fs::read_file_lossy(&options.input)?;

    let parse_config = ParseConfig {
        today: options.today,
        thresholds: options.thresholds,
        max_warnings: constants::MAX_PARSE_WARNINGS,
    };
    let mut result = parser::parse_report(&content, &parse_config);

    for warning in &result.warnings {
        tracing::warn!(input = %options.input.display(), "{warning}");
    }

    sort_and_renumber(&mut result.records);

    let written = export::export_to_path(
        &result.records,
        &options.output,
        options.format,
        &options.export,
    )?;

    let report = PipelineReport {
        output: options.output.clone(),
        format: options.format,
        records_written: written,
        blocks_seen: result.blocks_seen,
        blocks_discarded: result.blocks_discarded,
        warnings: result.warnings.len(),
    };

    tracing::info!(
        output = %report.output.display(),
        format = report.format.extension(),
        records = report.records_written,
        discarded = report.blocks_discarded,
        warnings = report.warnings,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Export complete"
    );

    Ok(report)
}
