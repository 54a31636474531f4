use std::fmt;

use serde::{Deserialize, Serialize};

/// Input formats the converter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    Pdf,
    Docx,
    Xlsx,
    Html,
    Md,
    Csv,
    Txt,
}

impl InputFormat {
    pub const ALL: [InputFormat; 7] = [
        InputFormat::Pdf,
        InputFormat::Docx,
        InputFormat::Xlsx,
        InputFormat::Html,
        InputFormat::Md,
        InputFormat::Csv,
        InputFormat::Txt,
    ];

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(InputFormat::Pdf),
            "docx" => Some(InputFormat::Docx),
            "xlsx" | "xlsm" => Some(InputFormat::Xlsx),
            "html" | "htm" => Some(InputFormat::Html),
            "md" | "markdown" => Some(InputFormat::Md),
            "csv" => Some(InputFormat::Csv),
            "txt" | "text" => Some(InputFormat::Txt),
            _ => None,
        }
    }

    /// Identify a format from leading file bytes. Only the binary formats
    /// (PDF and the zip-based Office documents) carry a usable signature;
    /// plain-text formats always come back `None`.
    pub fn from_signature(data: &[u8]) -> Option<Self> {
        match infer::get(data)?.extension() {
            "pdf" => Some(InputFormat::Pdf),
            "docx" => Some(InputFormat::Docx),
            "xlsx" => Some(InputFormat::Xlsx),
            _ => None,
        }
    }

    /// Extensions associated with this format, primary first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            InputFormat::Pdf => &["pdf"],
            InputFormat::Docx => &["docx"],
            InputFormat::Xlsx => &["xlsx", "xlsm"],
            InputFormat::Html => &["html", "htm"],
            InputFormat::Md => &["md", "markdown"],
            InputFormat::Csv => &["csv"],
            InputFormat::Txt => &["txt", "text"],
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Pdf => "PDF",
            InputFormat::Docx => "DOCX",
            InputFormat::Xlsx => "XLSX",
            InputFormat::Html => "HTML",
            InputFormat::Md => "Markdown",
            InputFormat::Csv => "CSV",
            InputFormat::Txt => "Text",
        };
        write!(f, "{name}")
    }
}

/// Output formats offered by the UI. Serialized names match the radio
/// button values sent by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "Markdown"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}
