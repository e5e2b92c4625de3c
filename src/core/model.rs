// AppInventory - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use serde::Serialize;
use std::path::Path;

// =============================================================================
// Application record (normalised output of parsing)
// =============================================================================

/// One application block from the System Information report.
///
/// Every optional field is `None` when the corresponding line never
/// appeared in the block; the exporter renders those as empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRecord {
    /// Position in the output. Provisional while parsing; reassigned
    /// to the 1-based sorted position by the pipeline.
    pub id: usize,

    /// Block header text without its trailing colon.
    pub name: String,

    /// Value of the `Version:` line, `N/A` if that line was empty.
    pub version: Option<String>,

    /// Signing identity `Name (TEAMID)`, or the raw `Signed by:` text
    /// when no recognised identity is present.
    pub vendor: Option<String>,

    /// Usage bucket derived from the `Last Modified:` timestamp.
    pub used: Option<UsageCategory>,

    /// License bucket derived from the `Obtained from:` text.
    pub license_type: Option<LicenseType>,

    /// Install path. Only used to decide retention; never exported.
    #[serde(skip)]
    pub location: Option<String>,
}

impl ApplicationRecord {
    /// Open a new record for the block headed by `name`.
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            version: None,
            vendor: None,
            used: None,
            license_type: None,
            location: None,
        }
    }
}

// =============================================================================
// Usage category
// =============================================================================

/// How recently an application bundle was modified, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UsageCategory {
    Frequently,
    Occasionally,
    Rarely,
}

impl UsageCategory {
    /// Label written to the Used column.
    pub fn label(&self) -> &'static str {
        match self {
            UsageCategory::Frequently => "Frequently",
            UsageCategory::Occasionally => "Occasionally",
            UsageCategory::Rarely => "Rarely",
        }
    }
}

impl std::fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Day-count bounds for the usage buckets. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageThresholds {
    pub frequently_max_days: i64,
    pub occasionally_max_days: i64,
}

impl Default for UsageThresholds {
    fn default() -> Self {
        Self {
            frequently_max_days: constants::DEFAULT_FREQUENTLY_MAX_DAYS,
            occasionally_max_days: constants::DEFAULT_OCCASIONALLY_MAX_DAYS,
        }
    }
}

impl UsageThresholds {
    /// Bucket a whole-day age. Negative ages (future timestamps) are
    /// always `Frequently`.
    pub fn categorize(&self, days: i64) -> UsageCategory {
        if days <= self.frequently_max_days {
            UsageCategory::Frequently
        } else if days <= self.occasionally_max_days {
            UsageCategory::Occasionally
        } else {
            UsageCategory::Rarely
        }
    }
}

// =============================================================================
// License type
// =============================================================================

/// License bucket inferred from the `Obtained from:` text.
///
/// `Unknown` is distinct from the field being absent: the line was
/// present but matched no keyword. It renders as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LicenseType {
    Freeware,
    Paid,
    #[serde(rename = "Open Source")]
    OpenSource,
    #[serde(rename = "")]
    Unknown,
}

impl LicenseType {
    /// Label written to the License Type column.
    pub fn label(&self) -> &'static str {
        match self {
            LicenseType::Freeware => "Freeware",
            LicenseType::Paid => "Paid",
            LicenseType::OpenSource => "Open Source",
            LicenseType::Unknown => "",
        }
    }
}

impl std::fmt::Display for LicenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Export format
// =============================================================================

/// Output file formats supported by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    #[value(alias = "excel")]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from an output path's extension.
    ///
    /// Returns `None` for missing or unrecognised extensions so callers
    /// can fall back to the default.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| <Self as clap::ValueEnum>::from_str(ext, true).ok())
    }

    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_thresholds_are_inclusive() {
        let t = UsageThresholds::default();
        assert_eq!(t.categorize(60), UsageCategory::Frequently);
        assert_eq!(t.categorize(61), UsageCategory::Occasionally);
        assert_eq!(t.categorize(120), UsageCategory::Occasionally);
        assert_eq!(t.categorize(121), UsageCategory::Rarely);
    }

    #[test]
    fn test_future_age_is_frequent() {
        assert_eq!(
            UsageThresholds::default().categorize(-30),
            UsageCategory::Frequently
        );
    }

    #[test]
    fn test_unknown_license_label_is_empty() {
        assert_eq!(LicenseType::Unknown.label(), "");
        assert_eq!(LicenseType::OpenSource.to_string(), "Open Source");
    }

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_path(&PathBuf::from("out.xlsx")),
            Some(ExportFormat::Xlsx)
        );
        assert_eq!(ExportFormat::from_path(&PathBuf::from("out")), None);
        assert_eq!(ExportFormat::from_path(&PathBuf::from("out.txt")), None);
    }

    #[test]
    fn test_export_format_value_names_match_extensions() {
        use clap::ValueEnum;

        for format in ExportFormat::value_variants() {
            let value = format.to_possible_value().unwrap();
            assert_eq!(value.get_name(), format.extension());
            assert_eq!(ExportFormat::from_str(format.extension(), true), Ok(*format));
        }
        assert_eq!(
            ExportFormat::from_str("excel", true),
            Ok(ExportFormat::Xlsx)
        );
        assert!(ExportFormat::from_str("pdf", true).is_err());
    }
}
