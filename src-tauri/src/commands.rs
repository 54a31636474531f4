use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tauri::{Emitter, Manager};

use crate::converter::DocumentConverter;
use crate::document::ConversionResult;
use crate::export;
use crate::format::{InputFormat, OutputFormat};
use crate::types::{ConversionStatus, ConversionView, FormatInfo, ResultSummary, SourceInfo};
use crate::{AppMutex, AppState};

// ─── Tauri commands ────────────────────────────────────────────────────────────

/// Record the document to convert. Validates that the path names an
/// existing regular file; state is untouched on failure.
#[tauri::command]
pub async fn select_source(
    path: String,
    state: tauri::State<'_, AppMutex>,
) -> Result<SourceInfo, String> {
    let source = PathBuf::from(&path);
    let meta = std::fs::metadata(&source).map_err(|e| format!("File not found: {e}"))?;
    if !meta.is_file() {
        return Err(format!("Not a file: {path}"));
    }

    let info = SourceInfo {
        file_name: file_name_of(&source),
        size_bytes: meta.len(),
        format: source
            .extension()
            .and_then(|e| e.to_str())
            .and_then(InputFormat::from_extension),
        path,
    };

    state.lock().await.source_path = Some(source);
    Ok(info)
}

/// Record the output format for the next conversion.
#[tauri::command]
pub async fn set_output_format(
    format: OutputFormat,
    state: tauri::State<'_, AppMutex>,
) -> Result<(), String> {
    state.lock().await.output_format = format;
    Ok(())
}

/// Current conversion status — polled by the frontend on load.
#[tauri::command]
pub async fn get_status(state: tauri::State<'_, AppMutex>) -> Result<ConversionStatus, String> {
    Ok(state.lock().await.status.clone())
}

/// The last finished conversion, if any. Lets a reloaded frontend restore
/// its panes without reconverting.
#[tauri::command]
pub async fn get_result(
    state: tauri::State<'_, AppMutex>,
) -> Result<Option<ConversionView>, String> {
    Ok(state.lock().await.last_result.clone())
}

/// Kick off a conversion of the selected source. Fails fast when no
/// source is selected or a conversion is already running; afterwards
/// progress arrives via `conversion-status` / `conversion-result` events.
#[tauri::command]
pub async fn start_conversion(
    state: tauri::State<'_, AppMutex>,
    app: tauri::AppHandle,
) -> Result<(), String> {
    let (path, format, converter) = {
        let mut s = state.lock().await;
        let request = begin_conversion(&mut s)?;
        let _ = app.emit("conversion-status", &s.status);
        request
    };

    tauri::async_runtime::spawn(async move {
        run_conversion(app, path, format, converter).await;
    });
    Ok(())
}

/// Save the displayed result. `contents` is the pane text (possibly
/// edited by the user) and `format` is the output selected at save time,
/// not the one the conversion ran with; markdown saves verbatim, JSON is
/// revalidated and pretty-printed. All-or-nothing on disk.
#[tauri::command]
pub async fn save_result(path: String, contents: String, format: OutputFormat) -> Result<(), String> {
    let target = PathBuf::from(&path);
    export::save_converted(&target, &contents, format).map_err(|e| e.to_string())?;
    tracing::info!("saved {} result to {}", format, target.display());
    Ok(())
}

/// Open a saved file with the platform handler.
/// Works on Linux (xdg-open), Windows (ShellExecute), macOS (open).
#[tauri::command]
pub async fn open_saved_file(path: String) -> Result<(), String> {
    open::that_detached(path).map_err(|e| e.to_string())
}

/// Formats the converter accepts, for the header line and picker filters.
#[tauri::command]
pub async fn supported_formats() -> Vec<FormatInfo> {
    InputFormat::ALL
        .iter()
        .map(|f| FormatInfo {
            name: f.to_string(),
            extensions: f.extensions().iter().map(|e| e.to_string()).collect(),
        })
        .collect()
}

// ─── Internal helpers ──────────────────────────────────────────────────────────

/// Guard checks for `start_conversion`, split out so the policies are
/// testable without a Tauri runtime. On success the busy flag and running
/// status are set and the conversion request is captured in the same lock
/// scope; a selection made while the worker runs only affects the next
/// conversion.
fn begin_conversion(
    state: &mut AppState,
) -> Result<(PathBuf, OutputFormat, Arc<DocumentConverter>), String> {
    let Some(path) = state.source_path.clone() else {
        return Err("Please select a file.".to_string());
    };
    if state.is_converting {
        return Err("A conversion is already running.".to_string());
    }
    state.is_converting = true;
    state.status = ConversionStatus::running();
    Ok((path, state.output_format, Arc::clone(&state.converter)))
}

/// Convert the captured source on a blocking worker and publish the
/// outcome. Emits `conversion-status` transitions and, on success, a
/// `conversion-result` event carrying the rendered panes.
pub async fn run_conversion(
    app: tauri::AppHandle,
    path: PathBuf,
    format: OutputFormat,
    converter: Arc<DocumentConverter>,
) {
    let task_path = path.clone();
    let outcome = tokio::task::spawn_blocking(move || converter.convert(&task_path)).await;

    let (status, view) = match outcome {
        Ok(Ok(result)) => match build_view(&result, &path, format) {
            Ok(view) => (ConversionStatus::completed(), Some(view)),
            Err(e) => {
                tracing::error!("failed to render result: {e:#}");
                (ConversionStatus::failed(format!("{e:#}")), None)
            }
        },
        Ok(Err(e)) => {
            tracing::error!("conversion of {} failed: {e}", path.display());
            (ConversionStatus::failed(e.to_string()), None)
        }
        Err(e) => {
            // A parser panic lands here; report it instead of dying.
            tracing::error!("conversion task aborted: {e}");
            (
                ConversionStatus::failed(format!("conversion task aborted: {e}")),
                None,
            )
        }
    };

    finish(&app, status, view).await;
}

/// Store the outcome, clear the busy flag and notify the frontend.
/// On failure the previous result is left in place, so the panes keep
/// whatever they showed before.
async fn finish(app: &tauri::AppHandle, status: ConversionStatus, view: Option<ConversionView>) {
    let state = app.state::<AppMutex>();
    let mut s = state.lock().await;
    s.is_converting = false;
    s.status = status;
    let _ = app.emit("conversion-status", &s.status);
    if let Some(view) = view {
        s.last_result = Some(view.clone());
        let _ = app.emit("conversion-result", &view);
    }
}

/// Render a finished conversion into the two panes.
fn build_view(
    result: &ConversionResult,
    path: &Path,
    format: OutputFormat,
) -> anyhow::Result<ConversionView> {
    let text = match format {
        OutputFormat::Markdown => result.export_to_markdown().to_string(),
        OutputFormat::Json => result.export_to_json().context("JSON export failed")?,
    };

    let stats = result.document.stats();
    let summary = ResultSummary {
        filename: file_name_of(path),
        format: result.document.format.to_string(),
        size_bytes: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        title: result.document.metadata.title.clone(),
        author: result.document.metadata.author.clone(),
        num_pages: result.document.metadata.num_pages,
        num_characters: stats.num_characters,
        word_count: stats.word_count,
        num_lines: stats.num_lines,
        duration_ms: result.latency.as_millis() as u64,
    };
    let summary = serde_json::to_string_pretty(&summary).context("summary serialization failed")?;

    Ok(ConversionView {
        text,
        summary,
        format,
        source_name: file_name_of(path),
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
