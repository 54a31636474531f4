use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use super::{decode_bytes, DocumentBackend};
use crate::document::Document;
use crate::error::ConvertError;
use crate::format::InputFormat;

/// Markdown input: the body passes through untouched; the first level-1
/// heading becomes the document title.
pub struct MarkdownBackend;

impl MarkdownBackend {
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Document, ConvertError> {
        let text = decode_bytes(data);
        let title = first_heading(&text);
        let mut doc = Document::from_markdown(text, InputFormat::Md);
        doc.metadata.title = title;
        Ok(doc)
    }
}

impl DocumentBackend for MarkdownBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Md
    }

    fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let data = fs::read(path)?;
        self.parse_bytes(&data)
    }
}

/// Text of the first H1 in the document, if any.
fn first_heading(markdown: &str) -> Option<String> {
    let mut inside = false;
    let mut title = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => inside = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return Some(title.trim().to_string()).filter(|t| !t.is_empty());
            }
            Event::Text(t) | Event::Code(t) if inside => title.push_str(&t),
            _ => {}
        }
    }
    None
}
