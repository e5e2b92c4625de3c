// AppInventory - core/parser.rs
//
// Record builder: turns the line sequence of a System Information
// application report into `ApplicationRecord`s.
// Core layer: accepts the report as a string, never touches the filesystem.
//
// A report is a flat sequence of blocks:
//
//   Safari:
//     Version: 17.4
//     Obtained from: Apple
//     Last Modified: 3/1/24, 09:12
//     Signed by: Software Signing, Apple Code Signing Certification Authority
//     Location: /Applications/Safari.app
//
// A block opens on a line ending in ':' (and not mentioning "Version"),
// collects recognised field lines, and closes when the next block opens
// or input ends. Closed blocks are kept only if their location passes
// `is_under_applications_dir`.

use crate::core::classify::{classify_license, classify_usage};
use crate::core::extract::{extract_labeled_value, extract_signing_identity, extract_timestamp};
use crate::core::location::is_under_applications_dir;
use crate::core::model::{ApplicationRecord, UsageThresholds};
use crate::util::constants;
use crate::util::error::ParseError;
use chrono::NaiveDate;

/// Configuration for parsing operations.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Reference date for usage classification.
    pub today: NaiveDate,
    pub thresholds: UsageThresholds,
    pub max_warnings: usize,
}

impl ParseConfig {
    /// Default limits, classifying usage relative to `today`.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            today,
            thresholds: UsageThresholds::default(),
            max_warnings: constants::MAX_PARSE_WARNINGS,
        }
    }
}

/// Result of parsing one report.
#[derive(Debug)]
pub struct ParseResult {
    /// Records that passed the location filter, in report order.
    pub records: Vec<ApplicationRecord>,
    /// Non-fatal problems (capped at `ParseConfig::max_warnings`).
    pub warnings: Vec<ParseError>,
    /// Total lines processed, blank lines included.
    pub lines_processed: u64,
    /// Number of blocks opened.
    pub blocks_seen: usize,
    /// Blocks dropped by the location filter.
    pub blocks_discarded: usize,
}

// =============================================================================
// Line classification
// =============================================================================

/// Field lines the builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Version,
    SignedBy,
    LastModified,
    ObtainedFrom,
    Location,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Version,
        Field::SignedBy,
        Field::LastModified,
        Field::ObtainedFrom,
        Field::Location,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Version => "Version",
            Field::SignedBy => "Signed by",
            Field::LastModified => "Last Modified",
            Field::ObtainedFrom => "Obtained from",
            Field::Location => "Location",
        }
    }

    /// True if `line` begins with `"<label>:"`.
    fn starts(self, line: &str) -> bool {
        line.strip_prefix(self.label())
            .is_some_and(|rest| rest.starts_with(':'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// Block header; carries the name without its trailing colon.
    Header(&'a str),
    Field(Field),
    Other,
}

/// Classify one trimmed, non-empty line.
///
/// Header detection runs first, so an empty field such as `Location:`
/// opens a block.
fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(name) = line.strip_suffix(':') {
        if !line.contains(Field::Version.label()) {
            return LineKind::Header(name);
        }
    }
    Field::ALL
        .into_iter()
        .find(|field| field.starts(line))
        .map_or(LineKind::Other, LineKind::Field)
}

// =============================================================================
// Record builder
// =============================================================================

/// Accumulator state: at most one record is open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderState {
    NoCurrent,
    Accumulating(ApplicationRecord),
}

/// Line-at-a-time record builder.
///
/// Feed trimmed, non-empty lines with `feed_line`, then call `finish`.
pub struct RecordBuilder<'c> {
    config: &'c ParseConfig,
    state: BuilderState,
    records: Vec<ApplicationRecord>,
    warnings: Vec<ParseError>,
    blocks_seen: usize,
    blocks_discarded: usize,
}

impl<'c> RecordBuilder<'c> {
    pub fn new(config: &'c ParseConfig) -> Self {
        Self {
            config,
            state: BuilderState::NoCurrent,
            records: Vec::new(),
            warnings: Vec::new(),
            blocks_seen: 0,
            blocks_discarded: 0,
        }
    }

    /// Current accumulator state.
    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    /// Process one trimmed, non-empty line. `line_number` is 1-based and
    /// only used for warnings.
    pub fn feed_line(&mut self, line_number: u64, line: &str) {
        match classify_line(line) {
            LineKind::Header(name) => self.open_block(name),
            LineKind::Field(field) => self.apply_field(line_number, field, line),
            LineKind::Other => {}
        }
    }

    /// Close the open record, if any. Keeps it only when its location is
    /// under an Applications directory. Leaves the builder in `NoCurrent`.
    pub fn finalize_current(&mut self) {
        let BuilderState::Accumulating(record) =
            std::mem::replace(&mut self.state, BuilderState::NoCurrent)
        else {
            return;
        };

        let keep = record
            .location
            .as_deref()
            .is_some_and(is_under_applications_dir);

        if keep {
            self.records.push(record);
        } else {
            tracing::debug!(
                name = %record.name,
                location = record.location.as_deref().unwrap_or("<none>"),
                "Discarding application outside Applications directories"
            );
            self.blocks_discarded += 1;
        }
    }

    /// Close the last block and return everything collected.
    pub fn finish(mut self) -> ParseResult {
        self.finalize_current();
        ParseResult {
            records: self.records,
            warnings: self.warnings,
            lines_processed: 0,
            blocks_seen: self.blocks_seen,
            blocks_discarded: self.blocks_discarded,
        }
    }

    fn open_block(&mut self, name: &str) {
        self.finalize_current();
        self.blocks_seen += 1;
        let provisional_id = self.records.len() + 1;
        self.state = BuilderState::Accumulating(ApplicationRecord::new(provisional_id, name));
    }

    fn apply_field(&mut self, line_number: u64, field: Field, line: &str) {
        let BuilderState::Accumulating(record) = &mut self.state else {
            push_capped(
                &mut self.warnings,
                self.config.max_warnings,
                ParseError::OrphanField {
                    line_number,
                    label: field.label(),
                },
            );
            return;
        };

        let value = extract_labeled_value(line, field.label()).unwrap_or_default();

        match field {
            Field::Version => {
                let version = if value.is_empty() {
                    constants::VERSION_PLACEHOLDER
                } else {
                    value
                };
                record.version = Some(version.to_string());
            }
            Field::SignedBy => {
                record.vendor =
                    Some(extract_signing_identity(value).unwrap_or_else(|| value.to_string()));
            }
            Field::LastModified => {
                let Some(timestamp) = extract_timestamp(line) else {
                    push_capped(
                        &mut self.warnings,
                        self.config.max_warnings,
                        ParseError::UnparseableTimestamp {
                            line_number,
                            raw: value.to_string(),
                        },
                    );
                    return;
                };
                match classify_usage(&timestamp, self.config.today, &self.config.thresholds) {
                    Some(used) => record.used = Some(used),
                    None => push_capped(
                        &mut self.warnings,
                        self.config.max_warnings,
                        ParseError::InvalidDate {
                            line_number,
                            raw: timestamp,
                        },
                    ),
                }
            }
            Field::ObtainedFrom => {
                record.license_type = Some(classify_license(value));
            }
            Field::Location => {
                record.location = Some(value.to_string());
            }
        }
    }
}

fn push_capped(warnings: &mut Vec<ParseError>, cap: usize, warning: ParseError) {
    if warnings.len() < cap {
        warnings.push(warning);
    }
}

/// Parse a full report.
///
/// Lines are trimmed and blank lines skipped before they reach the
/// builder. Never fails: malformed lines become warnings.
pub fn parse_report(content: &str, config: &ParseConfig) -> ParseResult {
    let mut builder = RecordBuilder::new(config);
    let mut lines_processed: u64 = 0;

    for (line_idx, raw_line) in content.lines().enumerate() {
        lines_processed += 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        builder.feed_line((line_idx as u64) + 1, line);
    }

    let mut result = builder.finish();
    result.lines_processed = lines_processed;

    tracing::debug!(
        lines = result.lines_processed,
        blocks = result.blocks_seen,
        kept = result.records.len(),
        discarded = result.blocks_discarded,
        warnings = result.warnings.len(),
        "Report parsed"
    );

    result
}
