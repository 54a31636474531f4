use serde::{Deserialize, Serialize};

use crate::format::{InputFormat, OutputFormat};

/// Lifecycle of the current conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionPhase {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Status reported to the frontend, both polled and pushed as
/// `conversion-status` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStatus {
    pub phase: ConversionPhase,
    /// 0 or 100; the indicator is two-valued.
    pub progress: u8,
    pub message: String,
    pub error: Option<String>,
}

impl ConversionStatus {
    pub fn ready() -> Self {
        Self {
            phase: ConversionPhase::Idle,
            progress: 0,
            message: "Ready to convert".to_string(),
            error: None,
        }
    }

    pub fn running() -> Self {
        Self {
            phase: ConversionPhase::Running,
            progress: 0,
            message: "Starting conversion...".to_string(),
            error: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            phase: ConversionPhase::Completed,
            progress: 100,
            message: "Conversion completed".to_string(),
            error: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            phase: ConversionPhase::Failed,
            progress: 0,
            message: "Conversion error".to_string(),
            error: Some(detail.into()),
        }
    }
}

impl Default for ConversionStatus {
    fn default() -> Self {
        Self::ready()
    }
}

/// Returned by `select_source` so the frontend can display the selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: String,
    pub file_name: String,
    pub size_bytes: u64,
    /// Detected from the extension; `None` defers detection to the
    /// signature sniff at conversion time.
    pub format: Option<InputFormat>,
}

/// A finished conversion as the frontend renders it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionView {
    /// Converted text for the main pane, in the requested output format.
    pub text: String,
    /// Pretty-printed JSON summary for the metadata pane.
    pub summary: String,
    pub format: OutputFormat,
    pub source_name: String,
}

/// Schema of the metadata pane. Unknown fields are omitted, not null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSummary {
    pub filename: String,
    pub format: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<usize>,
    pub num_characters: usize,
    pub word_count: usize,
    pub num_lines: usize,
    pub duration_ms: u64,
}

/// One supported input format, for the picker filter and header line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    pub name: String,
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_constructors_follow_the_phase_table() {
        let ready = ConversionStatus::ready();
        assert_eq!(ready.message, "Ready to convert");
        assert_eq!(ready.progress, 0);

        let running = ConversionStatus::running();
        assert_eq!(running.message, "Starting conversion...");
        assert_eq!(running.progress, 0);

        let done = ConversionStatus::completed();
        assert_eq!(done.message, "Conversion completed");
        assert_eq!(done.progress, 100);

        let failed = ConversionStatus::failed("boom");
        assert_eq!(failed.message, "Conversion error");
        assert_eq!(failed.progress, 0);
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn phases_serialize_lowercase_for_the_frontend() {
        assert_eq!(
            serde_json::to_string(&ConversionPhase::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&ConversionPhase::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn summary_omits_unknown_fields() {
        let summary = ResultSummary {
            filename: "a.txt".to_string(),
            format: "Text".to_string(),
            size_bytes: 5,
            title: None,
            author: None,
            num_pages: None,
            num_characters: 5,
            word_count: 1,
            num_lines: 1,
            duration_ms: 0,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("title").is_none());
        assert!(value.get("num_pages").is_none());
        assert_eq!(value["filename"], "a.txt");
    }
}
