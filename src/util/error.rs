// AppInventory - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all AppInventory operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum AppInventoryError {
    /// The input report is missing, empty or unreadable.
    ///
    /// This is the only category the CLI treats as fatal (non-zero exit).
    Input(InputError),

    /// Writing the output file failed.
    Export(ExportError),
}

impl fmt::Display for AppInventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for AppInventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors raised while validating or reading the input report.
#[derive(Debug)]
pub enum InputError {
    /// The report file does not exist.
    NotFound { path: PathBuf },

    /// The report file exists but has zero length.
    Empty { path: PathBuf },

    /// The path exists but is not a regular file.
    NotAFile { path: PathBuf },

    /// I/O error while inspecting or reading the report.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(
                f,
                "The file '{}' does not exist. Please generate it first.",
                path.display()
            ),
            Self::Empty { path } => write!(
                f,
                "The file '{}' is empty. Please ensure it contains valid data.",
                path.display()
            ),
            Self::NotAFile { path } => {
                write!(f, "'{}' is not a regular file", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for AppInventoryError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Non-fatal problems found while building records from a report.
///
/// The parser never aborts on these; they are collected into the parse
/// result so the pipeline can log them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A field line appeared before any application header.
    OrphanField { line_number: u64, label: &'static str },

    /// A `Last Modified:` line did not contain a `M/D/YY, HH:MM` timestamp.
    UnparseableTimestamp { line_number: u64, raw: String },

    /// The timestamp matched the pattern but is not a real calendar date.
    InvalidDate { line_number: u64, raw: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrphanField { line_number, label } => write!(
                f,
                "line {line_number}: '{label}' appears before any application header; skipped"
            ),
            Self::UnparseableTimestamp { line_number, raw } => write!(
                f,
                "line {line_number}: no 'M/D/YY, HH:MM' timestamp in '{raw}'"
            ),
            Self::InvalidDate { line_number, raw } => {
                write!(f, "line {line_number}: '{raw}' is not a valid date")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// Workbook construction or save failed.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "XLSX export error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for AppInventoryError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading config.toml.
///
/// Never fatal: the loader reports these as warnings and falls back to
/// defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for AppInventory results.
pub type Result<T> = std::result::Result<T, AppInventoryError>;
