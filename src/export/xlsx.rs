//! Spreadsheet output

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::{rows, ExportError, ExportOptions, COLUMNS};
use crate::attendee::AttendeeRecord;

/// Default name of the single worksheet
pub const SHEET_NAME: &str = "Participantes";

const COLUMN_WIDTHS: [f64; 5] = [28.0, 20.0, 14.0, 24.0, 18.0];

/// Write `records` to an XLSX workbook with one header row
pub fn to_xlsx(records: &[AttendeeRecord], options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(&options.sheet_name)?;

    let header = Format::new().set_bold();
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
        worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }

    for (i, cells) in rows(records).iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in cells.iter().enumerate() {
            worksheet.write_string(row, col as u16, value)?;
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;

    tracing::debug!(rows = records.len(), bytes = buffer.len(), "Built spreadsheet");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let records = vec![
            AttendeeRecord::new("1", "Ana", "Muhala", "841234567", "2025-01-01"),
            AttendeeRecord::new("2", "Bia", "Central", "849876543", "2025-01-02").business("Padaria"),
        ];

        let bytes = to_xlsx(&records, &ExportOptions::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_list_still_has_header() {
        let bytes = to_xlsx(&[], &ExportOptions::default()).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let options = ExportOptions {
            sheet_name: "Participantes/2025".to_string(),
            ..ExportOptions::default()
        };
        assert!(matches!(
            to_xlsx(&[], &options),
            Err(ExportError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_sheet_contents() {
        let records = vec![
            AttendeeRecord::new("1", "Ana", "Muhala", "841234567", "2025-01-01T10:00:00Z"),
            AttendeeRecord::new("2", "Bia", "Central", "849876543", "2025-01-02").business("Padaria"),
        ];

        let bytes = to_xlsx(&records, &ExportOptions::default()).unwrap();

        let workbook = part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Participantes""#));

        let strings = part(&bytes, "xl/sharedStrings.xml");
        for title in COLUMNS {
            assert!(strings.contains(&format!("<t>{}</t>", title)), "missing header {}", title);
        }
        assert!(strings.contains("<t>-</t>"));
        assert!(strings.contains("<t>Padaria</t>"));
        assert!(strings.contains("<t>01/01/2025</t>"));

        // header plus one row per record
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), 3);
    }
}
