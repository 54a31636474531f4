use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::format::InputFormat;

/// A converted document, normalized to markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Markdown rendition of the source content.
    pub markdown: String,
    /// Format the source file was parsed as.
    pub format: InputFormat,
    pub metadata: DocumentMetadata,
}

/// Descriptive metadata recovered from the source file. Fields a backend
/// cannot recover stay `None` and are omitted from serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<usize>,
    pub num_characters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// Counting stats derived from a document's markdown body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub num_characters: usize,
    pub num_lines: usize,
    pub word_count: usize,
    pub num_pages: Option<usize>,
}

impl Document {
    /// Build a document from markdown produced by a backend.
    pub fn from_markdown(markdown: impl Into<String>, format: InputFormat) -> Self {
        let markdown = markdown.into();
        let num_characters = markdown.chars().count();
        Self {
            markdown,
            format,
            metadata: DocumentMetadata {
                num_characters,
                ..DocumentMetadata::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markdown.trim().is_empty()
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            num_characters: self.metadata.num_characters,
            num_lines: self.markdown.lines().count(),
            word_count: self.markdown.split_whitespace().count(),
            num_pages: self.metadata.num_pages,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub document: Document,
    /// Wall-clock time the conversion took.
    pub latency: Duration,
}

impl ConversionResult {
    /// The markdown rendition, exactly as the backend produced it.
    pub fn export_to_markdown(&self) -> &str {
        &self.document.markdown
    }

    /// Pretty-printed JSON of the whole document.
    pub fn export_to_json(&self) -> Result<String, ConvertError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}
