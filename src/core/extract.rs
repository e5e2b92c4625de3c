// AppInventory - core/extract.rs
//
// Field extraction from single report lines. Stateless; every function
// takes one line (or value) and returns the captured text, if any.

use regex::Regex;
use std::sync::OnceLock;

/// Signing kinds whose `Kind: Name (TEAMID)` form identifies a vendor.
const SIGNING_KINDS: [&str; 2] = ["Developer ID Application", "Apple Development"];

/// Return the trimmed text following `"<label>:"` on `line`.
///
/// The rest of the line after the colon is the value. Returns `None`
/// when the line does not contain the label immediately followed by a
/// colon.
pub fn extract_labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.match_indices(label)
        .find_map(|(start, _)| line[start + label.len()..].strip_prefix(':'))
        .map(str::trim)
}

/// Find a `Developer ID Application: Name (TEAMID)` or
/// `Apple Development: Name (TEAMID)` identity inside signing text.
///
/// Returns `"Name (TEAMID)"` with the name trimmed.
pub fn extract_signing_identity(text: &str) -> Option<String> {
    static IDENTITY: OnceLock<Regex> = OnceLock::new();
    let re = IDENTITY.get_or_init(|| {
        let kinds = SIGNING_KINDS
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?:{kinds}):\s*([^()]+)\s*\(([A-Z0-9]+)\)"))
            .expect("extract_signing_identity: invalid regex")
    });

    let caps = re.captures(text)?;
    Some(format!("{} ({})", caps[1].trim(), &caps[2]))
}

/// Capture the `M/D/YY, HH:MM` timestamp from a `Last Modified:` line.
///
/// Returns `"<date>, <time>"` normalised to a single space after the comma.
pub fn extract_timestamp(line: &str) -> Option<String> {
    static TIMESTAMP: OnceLock<Regex> = OnceLock::new();
    let re = TIMESTAMP.get_or_init(|| {
        Regex::new(r"Last Modified:\s*([0-9]{1,2}/[0-9]{1,2}/[0-9]{2}),\s*([0-9]{2}:[0-9]{2})")
            .expect("extract_timestamp: invalid regex")
    });

    let caps = re.captures(line)?;
    Some(format!("{}, {}", &caps[1], &caps[2]))
}
