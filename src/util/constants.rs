// AppInventory - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "AppInventory";

/// Application identifier used for config directories.
pub const APP_ID: &str = "AppInventory";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Report defaults
// =============================================================================

/// Input report read when no path is given on the CLI or in config.toml.
pub const DEFAULT_INPUT_FILE: &str = "Installed_Applications.txt";

/// Spreadsheet written when no path is given on the CLI or in config.toml.
pub const DEFAULT_OUTPUT_FILE: &str = "Installed_Applications.xlsx";

/// Worksheet name in the exported workbook.
pub const DEFAULT_SHEET_NAME: &str = "Applications";

/// Excel's hard limit on worksheet name length.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Platform label written to the OS column of every row.
pub const DEFAULT_OS_LABEL: &str = "macOS";

/// Placeholder version when a `Version:` line carries no value.
pub const VERSION_PLACEHOLDER: &str = "N/A";

/// Column headers of the exported sheet, in output order.
pub const COLUMN_HEADERS: [&str; 7] = [
    "ID",
    "Name",
    "Version",
    "Vendor",
    "Used",
    "License Type",
    "OS",
];

// =============================================================================
// Classification
// =============================================================================

/// Records modified within this many days are "Frequently" used.
pub const DEFAULT_FREQUENTLY_MAX_DAYS: i64 = 60;

/// Records modified within this many days (and beyond the frequent bound)
/// are "Occasionally" used. Anything older is "Rarely".
pub const DEFAULT_OCCASIONALLY_MAX_DAYS: i64 = 120;

/// Hard upper bound on configurable day thresholds (ten years).
pub const MAX_THRESHOLD_DAYS: i64 = 3_650;

/// Two-digit report years are offset by this century.
pub const REPORT_CENTURY: i32 = 2000;

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum number of parse warnings kept per report before suppression.
pub const MAX_PARSE_WARNINGS: usize = 1_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug nor config.toml set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Files
// =============================================================================

/// Configuration file name (stored in the platform config directory).
pub const CONFIG_FILE_NAME: &str = "config.toml";
