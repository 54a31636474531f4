use std::fs;
use std::path::Path;

use super::{decode_bytes, DocumentBackend};
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// Delimiter candidates tried against the first line.
const DELIMITERS: [char; 5] = [',', ';', '\t', '|', ':'];

/// CSV input: the whole file becomes one markdown pipe table, first
/// record as the header row. The delimiter is sniffed from the first line.
pub struct CsvBackend;

impl CsvBackend {
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Document, ConvertError> {
        let text = decode_bytes(data);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(sniff_delimiter(&text) as u8)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ConvertError::Parse(format!("CSV: {e}")))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Document::from_markdown(render_table(&rows), InputFormat::Csv))
    }
}

impl DocumentBackend for CsvBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let data = fs::read(path)?;
        self.parse_bytes(&data)
    }
}

/// Count candidate delimiters in the first line; the most frequent wins,
/// comma on ties and when nothing matches.
fn sniff_delimiter(text: &str) -> char {
    let first_line = text.lines().next().unwrap_or("");
    let mut best = (',', 0);
    for candidate in DELIMITERS {
        let count = first_line.matches(candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

fn render_table(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut out = String::new();
    push_row(&mut out, header, width);
    out.push_str(&format!("|{}\n", "---|".repeat(width)));
    for row in body {
        push_row(&mut out, row, width);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], width: usize) {
    out.push('|');
    for i in 0..width {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        out.push_str(&format!(" {} |", cell.trim().replace('|', "\\|")));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_separated_becomes_a_pipe_table() {
        let doc = CsvBackend.parse_bytes(b"a,b\n1,2\n").unwrap();
        assert_eq!(doc.markdown, "| a | b |\n|---|---|\n| 1 | 2 |\n");
    }

    #[test]
    fn semicolon_delimiter_is_sniffed() {
        let doc = CsvBackend.parse_bytes(b"x;y\n3;4\n").unwrap();
        assert_eq!(doc.markdown, "| x | y |\n|---|---|\n| 3 | 4 |\n");
    }

    #[test]
    fn comma_wins_delimiter_ties() {
        assert_eq!(sniff_delimiter("a,b:c,d:e"), ',');
        assert_eq!(sniff_delimiter("plain header line"), ',');
        assert_eq!(sniff_delimiter("col1\tcol2\tcol3"), '\t');
    }

    #[test]
    fn ragged_rows_are_padded_to_the_widest() {
        let doc = CsvBackend.parse_bytes(b"a,b,c\n1,2\n").unwrap();
        assert_eq!(doc.markdown, "| a | b | c |\n|---|---|---|\n| 1 | 2 |  |\n");
    }

    #[test]
    fn quoted_fields_keep_their_delimiters() {
        let doc = CsvBackend.parse_bytes(b"\"a,x\",b\n").unwrap();
        assert_eq!(doc.markdown, "| a,x | b |\n|---|---|\n");
    }

    #[test]
    fn empty_input_yields_an_empty_document() {
        let doc = CsvBackend.parse_bytes(b"").unwrap();
        assert!(doc.markdown.is_empty());
    }
}
