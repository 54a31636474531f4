use std::path::Path;

use super::DocumentBackend;
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// DOCX: paragraph text via `docx-lite`. Formatting beyond paragraph
/// breaks is not recovered.
pub struct DocxBackend;

impl DocumentBackend for DocxBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let text = docx_lite::extract_text(path)
            .map_err(|e| ConvertError::Parse(format!("DOCX extraction failed: {e}")))?;
        Ok(Document::from_markdown(
            text.trim().to_string(),
            InputFormat::Docx,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn non_zip_input_fails_with_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        fs::write(&path, b"definitely not a zip archive").unwrap();

        let err = DocxBackend.parse_file(&path).unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }
}
