use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::DocumentBackend;
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// Spreadsheets: every non-empty sheet becomes a `##` section holding the
/// used range as a pipe table, first row as the header.
pub struct XlsxBackend;

impl DocumentBackend for XlsxBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Xlsx
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ConvertError::Parse(format!("spreadsheet open failed: {e}")))?;

        let mut out = String::new();
        for sheet in workbook.sheet_names().to_vec() {
            let range = match workbook.worksheet_range(&sheet) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("skipping sheet {sheet:?}: {e}");
                    continue;
                }
            };
            if range.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("## {sheet}\n\n"));
            let width = range.width();
            for (i, row) in range.rows().enumerate() {
                out.push('|');
                for cell in row {
                    out.push_str(&format!(" {} |", cell_text(cell)));
                }
                out.push('\n');
                if i == 0 {
                    out.push_str(&format!("|{}\n", "---|".repeat(width)));
                }
            }
        }
        Ok(Document::from_markdown(
            out.trim_end().to_string(),
            InputFormat::Xlsx,
        ))
    }
}

fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };
    text.replace('|', "\\|")
}
