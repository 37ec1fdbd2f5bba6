//! Participant list export
//!
//! Serializes the visible participant list to a spreadsheet or a printable
//! document. Both formats share the same five columns:
//!
//! | Nome | Localização | Contacto | Negócio | Data de Registro |
//!
//! Records without a business get the placeholder dash and dates are written
//! as dd/mm/yyyy.

mod pdf;
mod xlsx;

pub use pdf::{to_pdf, DOCUMENT_TITLE};
pub use xlsx::{to_xlsx, SHEET_NAME};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::attendee::AttendeeRecord;

/// Names written into the exported files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Worksheet name in the spreadsheet
    pub sheet_name: String,
    /// Heading of the printable document
    pub document_title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
            document_title: DOCUMENT_TITLE.to_string(),
        }
    }
}

/// Column headers, in output order
pub const COLUMNS: [&str; 5] = ["Nome", "Localização", "Contacto", "Negócio", "Data de Registro"];

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Document error: {0}")]
    Document(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Default download name
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "participantes-mcb.xlsx",
            ExportFormat::Pdf => "participantes-mcb.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Xlsx => write!(f, "xlsx"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// The cells written for one record, in [`COLUMNS`] order
pub fn row(record: &AttendeeRecord) -> [String; 5] {
    [
        record.name.clone(),
        record.location.clone(),
        record.contact.clone(),
        record.business_label().to_string(),
        record.date_label(),
    ]
}

/// All rows for `records`, keeping their order
pub fn rows(records: &[AttendeeRecord]) -> Vec<[String; 5]> {
    records.iter().map(row).collect()
}

/// Render `records` in `format`
///
/// `exported_on` only appears in the document header.
pub fn render(
    format: ExportFormat,
    records: &[AttendeeRecord],
    options: &ExportOptions,
    exported_on: chrono::NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => to_xlsx(records, options),
        ExportFormat::Pdf => to_pdf(records, options, exported_on),
    }
}

/// Render `records` and write them to `path`
#[cfg(feature = "native")]
pub fn write_file(
    format: ExportFormat,
    records: &[AttendeeRecord],
    options: &ExportOptions,
    exported_on: chrono::NaiveDate,
    path: &std::path::Path,
) -> Result<usize, ExportError> {
    let bytes = render(format, records, options, exported_on)?;
    std::fs::write(path, &bytes)?;

    tracing::info!(
        format = %format,
        path = %path.display(),
        rows = records.len(),
        bytes = bytes.len(),
        "Exported participants"
    );

    Ok(bytes.len())
}
