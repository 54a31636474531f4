use std::path::Path;

use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

mod csv;
mod docx;
mod html;
mod markdown;
mod pdf;
mod text;
mod xlsx;

pub use self::csv::CsvBackend;
pub use self::docx::DocxBackend;
pub use self::html::HtmlBackend;
pub use self::markdown::MarkdownBackend;
pub use self::pdf::PdfBackend;
pub use self::text::TextBackend;
pub use self::xlsx::XlsxBackend;

/// A format-specific parser producing the normalized document model.
pub trait DocumentBackend {
    /// The input format this backend handles.
    fn format(&self) -> InputFormat;

    /// Parse the file at `path` into a document.
    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError>;
}

/// Decode raw bytes to a string: UTF-8 fast path, otherwise detect the
/// encoding and convert. Never fails; undecodable sequences become U+FFFD.
pub(crate) fn decode_bytes(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(data, true);
            let encoding = detector.guess(None, true);
            let (text, _, _) = encoding.decode(data);
            text.into_owned()
        }
    }
}
