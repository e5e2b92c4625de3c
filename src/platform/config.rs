// AppInventory - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for AppInventory configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/appinventory/ or
    /// ~/Library/Application Support/AppInventory/)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[report]` section.
    pub report: ReportSection,
    /// `[classification]` section.
    pub classification: ClassificationSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[report]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// System Information text export to read.
    pub input_file: Option<String>,
    /// Spreadsheet to write.
    pub output_file: Option<String>,
    /// Label for the OS column.
    pub os_label: Option<String>,
    /// Worksheet name.
    pub sheet_name: Option<String>,
}

/// `[classification]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ClassificationSection {
    /// Upper bound (days) of the "Frequently" bucket.
    pub frequently_max_days: Option<i64>,
    /// Upper bound (days) of the "Occasionally" bucket.
    pub occasionally_max_days: Option<i64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Report --
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub os_label: String,
    pub sheet_name: String,

    // -- Classification --
    pub frequently_max_days: i64,
    pub occasionally_max_days: i64,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(constants::DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
            os_label: constants::DEFAULT_OS_LABEL.to_string(),
            sheet_name: constants::DEFAULT_SHEET_NAME.to_string(),
            frequently_max_days: constants::DEFAULT_FREQUENTLY_MAX_DAYS,
            occasionally_max_days: constants::DEFAULT_OCCASIONALLY_MAX_DAYS,
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
///
/// Called before logging is initialised, so problems are only returned,
/// never logged here.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        return (AppConfig::default(), Vec::new());
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content, config_path),
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            (AppConfig::default(), vec![format!("{err}. Using defaults.")])
        }
    }
}

/// Validate config.toml content. `origin` is only used in messages.
pub fn parse_config(content: &str, origin: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: origin.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Report: paths --
    if let Some(ref input) = raw.report.input_file {
        if input.trim().is_empty() {
            warnings.push("[report] input_file is empty. Using default.".to_string());
        } else {
            config.input_file = PathBuf::from(input);
        }
    }
    if let Some(ref output) = raw.report.output_file {
        if output.trim().is_empty() {
            warnings.push("[report] output_file is empty. Using default.".to_string());
        } else {
            config.output_file = PathBuf::from(output);
        }
    }

    // -- Report: os_label --
    if let Some(ref label) = raw.report.os_label {
        if label.trim().is_empty() {
            warnings.push(format!(
                "[report] os_label is empty. Using default ({}).",
                constants::DEFAULT_OS_LABEL
            ));
        } else {
            config.os_label = label.clone();
        }
    }

    // -- Report: sheet_name --
    if let Some(ref name) = raw.report.sheet_name {
        match validate_sheet_name(name) {
            Ok(()) => config.sheet_name = name.clone(),
            Err(reason) => warnings.push(format!(
                "[report] sheet_name = \"{name}\" {reason}. Using default ({}).",
                constants::DEFAULT_SHEET_NAME
            )),
        }
    }

    // -- Classification: frequently_max_days --
    if let Some(days) = raw.classification.frequently_max_days {
        if (0..=constants::MAX_THRESHOLD_DAYS).contains(&days) {
            config.frequently_max_days = days;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "classification.frequently_max_days".to_string(),
                value: days.to_string(),
                expected: format!("0-{}", constants::MAX_THRESHOLD_DAYS),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_FREQUENTLY_MAX_DAYS
            ));
        }
    }

    // -- Classification: occasionally_max_days --
    if let Some(days) = raw.classification.occasionally_max_days {
        if (config.frequently_max_days..=constants::MAX_THRESHOLD_DAYS).contains(&days) {
            config.occasionally_max_days = days;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "classification.occasionally_max_days".to_string(),
                value: days.to_string(),
                expected: format!(
                    "{}-{}",
                    config.frequently_max_days,
                    constants::MAX_THRESHOLD_DAYS
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_OCCASIONALLY_MAX_DAYS
            ));
        }
    }

    // The default occasional bound may now sit below a raised frequent bound.
    if config.occasionally_max_days < config.frequently_max_days {
        warnings.push(format!(
            "[classification] occasionally_max_days ({}) is below frequently_max_days ({}). \
             Raising it to match.",
            config.occasionally_max_days, config.frequently_max_days,
        ));
        config.occasionally_max_days = config.frequently_max_days;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Excel worksheet naming rules.
fn validate_sheet_name(name: &str) -> Result<(), String> {
    const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

    let len = name.chars().count();
    if len == 0 || len > constants::MAX_SHEET_NAME_LEN {
        return Err(format!(
            "must be 1-{} characters",
            constants::MAX_SHEET_NAME_LEN
        ));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN.contains(c)) {
        return Err(format!("contains forbidden character '{c}'"));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err("must not start or end with an apostrophe".to_string());
    }
    Ok(())
}
