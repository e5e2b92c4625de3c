// AppInventory - core/classify.rs
//
// Pure classifiers mapping extracted values to categorical labels.

use crate::core::model::{LicenseType, UsageCategory, UsageThresholds};
use crate::util::constants;
use chrono::NaiveDate;

/// Keyword groups for license classification, checked in order.
/// The first group with any keyword contained in the text wins.
const LICENSE_KEYWORDS: [(LicenseType, &[&str]); 3] = [
    (LicenseType::Freeware, &["free", "freeware"]),
    (LicenseType::Paid, &["paid", "purchase"]),
    (LicenseType::OpenSource, &["open source", "source"]),
];

/// Parse the date half of a `M/D/YY, HH:MM` timestamp.
///
/// Two-digit years are read as 20YY. Returns `None` if the date part is
/// malformed or not a real calendar date (e.g. `2/30/24`).
pub fn parse_report_date(timestamp: &str) -> Option<NaiveDate> {
    let date_part = timestamp.split(',').next()?.trim();
    let mut fields = date_part.split('/');
    let month: u32 = fields.next()?.parse().ok()?;
    let day: u32 = fields.next()?.parse().ok()?;
    let year: i32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || !(0..100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(constants::REPORT_CENTURY + year, month, day)
}

/// Whole days elapsed between `date` and `today`. Negative for future dates.
pub fn days_since(date: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(date).num_days()
}

/// Classify a `M/D/YY, HH:MM` timestamp into a usage bucket relative to
/// `today`.
///
/// Returns `None` when the date cannot be parsed; the caller decides
/// whether that is worth reporting.
pub fn classify_usage(
    timestamp: &str,
    today: NaiveDate,
    thresholds: &UsageThresholds,
) -> Option<UsageCategory> {
    let modified = parse_report_date(timestamp)?;
    Some(thresholds.categorize(days_since(modified, today)))
}

/// Classify `Obtained from:` text into a license bucket.
///
/// Matching is a case-insensitive substring test. Text matching no
/// keyword yields `LicenseType::Unknown`, never an absent value.
pub fn classify_license(obtained_from: &str) -> LicenseType {
    let lower = obtained_from.to_lowercase();
    LICENSE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(license, _)| *license)
        .unwrap_or(LicenseType::Unknown)
}
