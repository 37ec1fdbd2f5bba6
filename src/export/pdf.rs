//! Printable document output
//!
//! A4 portrait pages. The first page carries the title and export date; the
//! table header is repeated at the top of every page.

use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};

use super::{rows, ExportError, ExportOptions, COLUMNS};
use crate::attendee::{format_date_pt, AttendeeRecord};

/// Default document heading
pub const DOCUMENT_TITLE: &str = "Lista de Participantes - MCB";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 15.0;

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 10.0;
const CELL_SIZE: f32 = 9.0;

/// Distance from the top edge, in mm, where the table starts on page one
const TABLE_TOP: f32 = 30.0;
/// Same, on continuation pages
const CONTINUATION_TOP: f32 = 15.0;
const ROW_HEIGHT: f32 = 7.0;

/// Column widths in mm, summing to the printable width
const COLUMN_WIDTHS: [f32; 5] = [45.0, 35.0, 28.0, 40.0, 34.0];

/// Approximate Helvetica advance at `CELL_SIZE`, in mm per character
const CHAR_WIDTH: f32 = 1.75;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Write `records` as a paginated table
pub fn to_pdf(
    records: &[AttendeeRecord],
    options: &ExportOptions,
    exported_on: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    let title = options.document_title.as_str();
    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(document)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(document)?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    layer.use_text(title, TITLE_SIZE, Mm(MARGIN_LEFT), from_top(15.0), &fonts.bold);
    layer.use_text(
        format!("Exportado em: {}", format_date_pt(exported_on)),
        SUBTITLE_SIZE,
        Mm(MARGIN_LEFT),
        from_top(22.0),
        &fonts.regular,
    );

    let mut cursor = draw_header(&layer, &fonts, TABLE_TOP);
    let mut pages = 1;

    for cells in rows(records) {
        if cursor + ROW_HEIGHT > PAGE_HEIGHT - MARGIN_BOTTOM {
            let (page, next) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(next);
            cursor = draw_header(&layer, &fonts, CONTINUATION_TOP);
            pages += 1;
        }

        draw_row(&layer, &fonts.regular, &cells, cursor);
        cursor += ROW_HEIGHT;
    }

    let bytes = doc.save_to_bytes().map_err(document)?;

    tracing::debug!(rows = records.len(), pages, bytes = bytes.len(), "Built document");
    Ok(bytes)
}

fn document(e: printpdf::Error) -> ExportError {
    ExportError::Document(e.to_string())
}

/// Convert a distance from the top edge into a PDF y coordinate
fn from_top(mm: f32) -> Mm {
    Mm(PAGE_HEIGHT - mm)
}

/// Draw the header row at `top` and return where the first data row goes
fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, top: f32) -> f32 {
    let titles = COLUMNS.map(String::from);
    draw_row(layer, &fonts.bold, &titles, top);

    let rule = from_top(top + ROW_HEIGHT - 1.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_LEFT), rule), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN_LEFT), rule), false),
        ],
        is_closed: false,
    });

    top + ROW_HEIGHT
}

fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String; 5], top: f32) {
    let baseline = from_top(top + ROW_HEIGHT - 2.5);
    let mut x = MARGIN_LEFT;

    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        layer.use_text(fit_cell(cell, width), CELL_SIZE, Mm(x), baseline, font);
        x += width;
    }
}

/// Shorten `text` so it stays inside a column `width` mm wide
fn fit_cell(text: &str, width: f32) -> String {
    let budget = ((width - 2.0) / CHAR_WIDTH).floor().max(4.0) as usize;

    if text.chars().count() <= budget {
        text.to_string()
    } else {
        let kept: String = text.chars().take(budget - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Data rows that fit on the first page and on each later one
    fn rows_per_page() -> (usize, usize) {
        let usable =
            |top: f32| ((PAGE_HEIGHT - MARGIN_BOTTOM - top - ROW_HEIGHT) / ROW_HEIGHT) as usize;
        (usable(TABLE_TOP), usable(CONTINUATION_TOP))
    }

    /// Text runs drawn on each page, in drawing order
    fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
        use printpdf::lopdf::{Document, Object};

        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page| {
                doc.get_and_decode_page_content(page)
                    .unwrap()
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(String::from_utf8_lossy(bytes).into_owned())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    fn exported_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn records(n: usize) -> Vec<AttendeeRecord> {
        (0..n)
            .map(|i| AttendeeRecord::new(i.to_string(), format!("Pessoa {}", i), "Muhala", "84", "2025-01-01"))
            .collect()
    }

    #[test]
    fn test_document_header() {
        let bytes = to_pdf(&records(3), &ExportOptions::default(), exported_on()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_document_text() {
        let records = vec![
            AttendeeRecord::new("1", "Ana", "Muhala", "841234567", "2025-01-01T10:00:00Z"),
            AttendeeRecord::new("2", "Bia", "Central", "849876543", "2025-01-02").business("Padaria"),
        ];

        let bytes = to_pdf(&records, &ExportOptions::default(), exported_on()).unwrap();
        let pages = page_texts(&bytes);
        assert_eq!(pages.len(), 1);

        let texts = &pages[0];
        assert_eq!(texts[0], "Lista de Participantes - MCB");
        assert_eq!(texts[1], "Exportado em: 04/03/2025");
        assert_eq!(texts[2], "Nome");
        assert!(texts.contains(&"-".to_string()));
        assert!(texts.contains(&"Padaria".to_string()));
        assert!(texts.contains(&"01/01/2025".to_string()));
    }

    #[test]
    fn test_header_repeats_on_each_page() {
        let (first, rest) = rows_per_page();
        let bytes = to_pdf(&records(first + rest + 1), &ExportOptions::default(), exported_on()).unwrap();
        let pages = page_texts(&bytes);

        assert_eq!(pages.len(), 3);
        for texts in &pages[1..] {
            assert_eq!(texts[0], "Nome");
        }
        assert!(!pages[1].contains(&"Lista de Participantes - MCB".to_string()));
    }

    #[test]
    fn test_empty_list_renders() {
        let bytes = to_pdf(&[], &ExportOptions::default(), exported_on()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_list_paginates() {
        let (first, rest) = rows_per_page();
        assert!(first > 0 && rest > first);

        let single = to_pdf(&records(first), &ExportOptions::default(), exported_on()).unwrap();
        let multi = to_pdf(&records(first + rest + 1), &ExportOptions::default(), exported_on()).unwrap();
        assert!(multi.len() > single.len());
    }

    #[test]
    fn test_fit_cell() {
        assert_eq!(fit_cell("Ana", 45.0), "Ana");

        let long = "Associação dos Vendedores do Mercado Central";
        let fitted = fit_cell(long, 28.0);
        assert!(fitted.ends_with("..."));
        assert!(fitted.chars().count() <= ((28.0 - 2.0) / CHAR_WIDTH) as usize);
    }
}
