pub mod backends;
pub mod commands;
pub mod converter;
pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::converter::DocumentConverter;
use crate::format::OutputFormat;
use crate::types::{ConversionStatus, ConversionView};

/// All runtime state shared across Tauri commands.
pub struct AppState {
    /// Document selected for conversion, if any.
    pub source_path: Option<PathBuf>,
    /// Output format for the next conversion. Saving takes its format
    /// from the frontend at save time.
    pub output_format: OutputFormat,
    /// Format dispatcher.
    /// Wrapped in Arc so it can be cloned out of the mutex onto the
    /// blocking worker without holding the lock during a conversion.
    pub converter: Arc<DocumentConverter>,
    /// Status reported to the frontend.
    pub status: ConversionStatus,
    /// Most recent successful conversion, kept so a reloaded frontend
    /// can restore its panes.
    pub last_result: Option<ConversionView>,
    /// True while a conversion is running. Prevents concurrent conversions.
    pub is_converting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_path: None,
            output_format: OutputFormat::Markdown,
            converter: Arc::new(DocumentConverter::new()),
            status: ConversionStatus::ready(),
            last_result: None,
            is_converting: false,
        }
    }
}

/// Type alias used in Tauri command signatures and background tasks.
pub type AppMutex = Mutex<AppState>;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Full logging in dev; WARN and above in release builds.
    #[cfg(debug_assertions)]
    tracing_subscriber::fmt::init();
    #[cfg(not(debug_assertions))]
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppMutex::new(AppState::default()))
        .invoke_handler(tauri::generate_handler![
            commands::select_source,
            commands::set_output_format,
            commands::start_conversion,
            commands::get_status,
            commands::get_result,
            commands::save_result,
            commands::open_saved_file,
            commands::supported_formats,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
