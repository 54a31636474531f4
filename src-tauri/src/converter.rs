use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::backends::{
    CsvBackend, DocumentBackend, DocxBackend, HtmlBackend, MarkdownBackend, PdfBackend,
    TextBackend, XlsxBackend,
};
use crate::document::ConversionResult;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// Leading bytes read for signature sniffing when the extension is
/// missing or unknown.
const SNIFF_LEN: usize = 8192;

/// Dispatches a source file to the backend for its format.
#[derive(Debug, Default)]
pub struct DocumentConverter;

impl DocumentConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert the file at `path`, blocking until done.
    pub fn convert(&self, path: &Path) -> Result<ConversionResult, ConvertError> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(ConvertError::UnsupportedFormat(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let format = detect_format(path)?;
        let start = Instant::now();
        let mut document = match format {
            InputFormat::Pdf => PdfBackend.parse_file(path)?,
            InputFormat::Docx => DocxBackend.parse_file(path)?,
            InputFormat::Xlsx => XlsxBackend.parse_file(path)?,
            InputFormat::Html => HtmlBackend.parse_file(path)?,
            InputFormat::Md => MarkdownBackend.parse_file(path)?,
            InputFormat::Csv => CsvBackend.parse_file(path)?,
            InputFormat::Txt => TextBackend.parse_file(path)?,
        };
        document.metadata.modified = meta.modified().ok().map(Into::into);

        if document.is_empty() {
            tracing::warn!("no text recovered from {}", path.display());
        }
        tracing::info!(
            format = %format,
            chars = document.metadata.num_characters,
            "converted {}",
            path.display()
        );

        Ok(ConversionResult {
            document,
            latency: start.elapsed(),
        })
    }
}

/// Extension mapping first; unknown or missing extensions fall back to a
/// signature sniff over the leading bytes.
pub(crate) fn detect_format(path: &Path) -> Result<InputFormat, ConvertError> {
    if let Some(format) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(InputFormat::from_extension)
    {
        return Ok(format);
    }

    let mut head = vec![0u8; SNIFF_LEN];
    let mut file = fs::File::open(path)?;
    let n = file.read(&mut head)?;
    head.truncate(n);

    InputFormat::from_signature(&head)
        .ok_or_else(|| ConvertError::UnsupportedFormat(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DocumentConverter::new()
            .convert(Path::new("/definitely/not/here.md"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Io(_)));
    }

    #[test]
    fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentConverter::new().convert(dir.path()).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
    }

    #[test]
    fn unknown_extension_without_signature_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.xyz");
        fs::write(&path, "hello").unwrap();

        let err = DocumentConverter::new().convert(&path).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
    }

    #[test]
    fn extensionless_pdf_is_detected_by_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        fs::write(&path, b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n").unwrap();

        assert_eq!(detect_format(&path).unwrap(), InputFormat::Pdf);
    }

    #[test]
    fn an_empty_source_converts_to_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "").unwrap();

        let result = DocumentConverter::new().convert(&path).unwrap();
        assert!(result.document.is_empty());
        assert_eq!(result.document.markdown, "");
    }

    #[test]
    fn markdown_file_converts_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.md");
        fs::write(&path, "# Title\n\nBody text.").unwrap();

        let result = DocumentConverter::new().convert(&path).unwrap();
        assert_eq!(result.document.format, InputFormat::Md);
        assert_eq!(result.document.markdown, "# Title\n\nBody text.");
        assert_eq!(result.document.metadata.title.as_deref(), Some("Title"));
        assert_eq!(result.document.metadata.num_characters, 19);
        assert!(result.document.metadata.modified.is_some());
    }
}
