// AppInventory - core/export.rs
//
// Spreadsheet, CSV and JSON export of application records.
// Core layer: CSV and JSON write to any Write trait object; XLSX builds
// an in-memory workbook that the caller saves.
//
// All formats share one column schema:
//   ID, Name, Version, Vendor, Used, License Type, OS

use crate::core::model::{ApplicationRecord, ExportFormat, LicenseType, UsageCategory};
use crate::util::constants;
use crate::util::error::ExportError;
use rust_xlsxwriter::{RowNum, Workbook, XlsxError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sheet-level settings shared by all formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Worksheet name (XLSX only).
    pub sheet_name: String,
    /// Constant written to the OS column of every row.
    pub os_label: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: constants::DEFAULT_SHEET_NAME.to_string(),
            os_label: constants::DEFAULT_OS_LABEL.to_string(),
        }
    }
}

/// One output row. Field renames match `COLUMN_HEADERS`.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "ID")]
    id: usize,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Version")]
    version: Option<&'a str>,
    #[serde(rename = "Vendor")]
    vendor: Option<&'a str>,
    #[serde(rename = "Used")]
    used: Option<UsageCategory>,
    #[serde(rename = "License Type")]
    license_type: Option<LicenseType>,
    #[serde(rename = "OS")]
    os: &'a str,
}

impl<'a> ExportRow<'a> {
    fn new(record: &'a ApplicationRecord, os_label: &'a str) -> Self {
        Self {
            id: record.id,
            name: &record.name,
            version: record.version.as_deref(),
            vendor: record.vendor.as_deref(),
            used: record.used,
            license_type: record.license_type,
            os: os_label,
        }
    }

    /// Text cells after the numeric ID column, in header order.
    fn text_cells(&self) -> [Option<&'a str>; 6] {
        [
            Some(self.name),
            self.version,
            self.vendor,
            self.used.map(|u| u.label()),
            self.license_type.map(|l| l.label()),
            Some(self.os),
        ]
    }
}

/// Build the workbook: one sheet, header row, one row per record.
///
/// Missing values are left as empty cells.
pub fn build_workbook(
    records: &[ApplicationRecord],
    options: &ExportOptions,
) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(options.sheet_name.as_str())?;

    for (col, header) in constants::COLUMN_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row_num = RowNum::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        let row = ExportRow::new(record, &options.os_label);

        worksheet.write_number(row_num, 0, row.id as f64)?;
        for (offset, cell) in row.text_cells().into_iter().enumerate() {
            if let Some(text) = cell.filter(|t| !t.is_empty()) {
                worksheet.write_string(row_num, (offset + 1) as u16, text)?;
            }
        }
    }

    Ok(workbook)
}

/// Export records to an `.xlsx` file at `path`.
pub fn export_xlsx(
    records: &[ApplicationRecord],
    path: &Path,
    options: &ExportOptions,
) -> Result<usize, ExportError> {
    let to_export_error = |source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = build_workbook(records, options).map_err(to_export_error)?;
    workbook.save(path).map_err(to_export_error)?;
    Ok(records.len())
}

/// Export records to CSV format.
///
/// The header row is always written, even for an empty record list.
pub fn export_csv<W: Write>(
    records: &[ApplicationRecord],
    writer: W,
    options: &ExportOptions,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(constants::COLUMN_HEADERS)
        .map_err(csv_error)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .serialize(ExportRow::new(record, &options.os_label))
            .map_err(csv_error)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON format (array of objects keyed by column header).
pub fn export_json<W: Write>(
    records: &[ApplicationRecord],
    writer: W,
    options: &ExportOptions,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let rows: Vec<ExportRow<'_>> = records
        .iter()
        .map(|r| ExportRow::new(r, &options.os_label))
        .collect();

    serde_json::to_writer_pretty(writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}

/// Write records to `path` in the given format, creating or truncating
/// the file.
pub fn export_to_path(
    records: &[ApplicationRecord],
    path: &Path,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Xlsx => export_xlsx(records, path, options),
        ExportFormat::Csv => write_file(path, |w| export_csv(records, w, options, path)),
        ExportFormat::Json => write_file(path, |w| export_json(records, w, options, path)),
    }
}

/// Create `path`, hand a buffered writer to `write`, then flush.
fn write_file<F>(path: &Path, write: F) -> Result<usize, ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<usize, ExportError>,
{
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let count = write(&mut writer)?;
    writer.flush().map_err(io_error)?;
    Ok(count)
}
