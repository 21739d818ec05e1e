mod commands;

use std::sync::Arc;

use tauri::Manager;
use tracing::info;

use commands::drafts;
use loam_store::{DraftStore, DEFAULT_STORE_NAME};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loam=debug".into()),
        )
        .init();

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            drafts::fetch_drafts,
            drafts::save_drafts,
            drafts::delete_draft,
        ])
        .setup(|app| {
            // One store for the whole process, opened before the webview
            // can issue its first bridge call.
            let dir = app.path().app_data_dir()?;
            let store =
                tauri::async_runtime::block_on(DraftStore::open(&dir, DEFAULT_STORE_NAME))?;
            app.manage(Arc::new(store));
            info!("Draft store ready under {}", dir.display());

            #[cfg(debug_assertions)]
            if let Some(window) = app.get_webview_window("main") {
                window.open_devtools();
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running Loam");
}
