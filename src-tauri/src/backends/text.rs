use std::fs;
use std::path::Path;

use super::{decode_bytes, DocumentBackend};
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// Plain text: the markdown rendition is the decoded text, verbatim.
pub struct TextBackend;

impl TextBackend {
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Document, ConvertError> {
        Ok(Document::from_markdown(decode_bytes(data), InputFormat::Txt))
    }
}

impl DocumentBackend for TextBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Txt
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let data = fs::read(path)?;
        self.parse_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_text_passes_through_verbatim() {
        let doc = TextBackend.parse_bytes("héllo\nwörld\n".as_bytes()).unwrap();
        assert_eq!(doc.markdown, "héllo\nwörld\n");
        assert_eq!(doc.metadata.num_characters, 12);
        assert_eq!(doc.format, InputFormat::Txt);
    }

    #[test]
    fn non_utf8_bytes_are_decoded() {
        // "café" with a Latin-1 encoded é
        let doc = TextBackend.parse_bytes(&[0x63, 0x61, 0x66, 0xE9]).unwrap();
        assert_eq!(doc.markdown, "café");
    }
}
