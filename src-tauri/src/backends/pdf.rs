use std::path::Path;

use lopdf::{Dictionary, Object};

use super::DocumentBackend;
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// PDF: text layer via `pdf-extract`, page count and Info-dictionary
/// metadata via `lopdf`. Metadata extraction is best effort; a document
/// with a broken Info dictionary still converts.
pub struct PdfBackend;

impl DocumentBackend for PdfBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Pdf
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| ConvertError::Parse(format!("PDF text extraction failed: {e}")))?;

        let mut doc = Document::from_markdown(text.trim().to_string(), InputFormat::Pdf);
        match lopdf::Document::load(path) {
            Ok(pdf) => {
                doc.metadata.num_pages = Some(pdf.get_pages().len());
                let (title, author) = info_strings(&pdf);
                doc.metadata.title = title;
                doc.metadata.author = author;
            }
            Err(e) => {
                tracing::warn!("PDF metadata unavailable for {}: {e}", path.display());
            }
        }
        Ok(doc)
    }
}

fn info_strings(pdf: &lopdf::Document) -> (Option<String>, Option<String>) {
    match info_dict(pdf) {
        Some(info) => (info_string(info, b"Title"), info_string(info, b"Author")),
        None => (None, None),
    }
}

fn info_dict(pdf: &lopdf::Document) -> Option<&Dictionary> {
    let info = pdf.trailer.get(b"Info").ok()?;
    let reference = info.as_reference().ok()?;
    match pdf.get_object(reference).ok()? {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Read a string entry from the Info dictionary. PDF strings are raw
/// bytes: try UTF-8 first, fall back to a Latin-1 view.
fn info_string(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            let text = match std::str::from_utf8(bytes) {
                Ok(s) => s.to_string(),
                Err(_) => bytes.iter().map(|&b| b as char).collect(),
            };
            Some(text.trim().to_string()).filter(|t| !t.is_empty())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn garbage_input_fails_with_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\nthis is not a real pdf body").unwrap();

        let err = PdfBackend.parse_file(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }

    #[test]
    fn info_strings_survive_latin1_bytes() {
        let mut dict = Dictionary::new();
        dict.set(
            "Title",
            Object::String(vec![0x52, 0xE9, 0x73, 0x75, 0x6D, 0xE9], lopdf::StringFormat::Literal),
        );
        assert_eq!(info_string(&dict, b"Title"), Some("Résumé".to_string()));
        assert_eq!(info_string(&dict, b"Author"), None);
    }
}
