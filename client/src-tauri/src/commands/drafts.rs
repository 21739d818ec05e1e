use std::sync::Arc;

use tauri::State;
use tracing::warn;

use loam_store::DraftStore;
use loam_types::Draft;

/// The full saved collection, newest first.
#[tauri::command]
pub async fn fetch_drafts(store: State<'_, Arc<DraftStore>>) -> Result<Vec<Draft>, String> {
    store.read_all().await.map_err(|e| {
        warn!("fetch_drafts failed: {}", e);
        e.to_string()
    })
}

/// Replace the persisted collection wholesale with what the UI holds.
#[tauri::command]
pub async fn save_drafts(
    drafts: Vec<Draft>,
    store: State<'_, Arc<DraftStore>>,
) -> Result<bool, String> {
    store.replace_all(&drafts).await.map_err(|e| {
        warn!("save_drafts failed: {}", e);
        e.to_string()
    })?;
    Ok(true)
}

/// Delete one draft by id; returns the post-delete collection so the UI
/// can resynchronize in place.
#[tauri::command]
pub async fn delete_draft(
    id: i64,
    store: State<'_, Arc<DraftStore>>,
) -> Result<Vec<Draft>, String> {
    store.delete_by_id(id).await.map_err(|e| {
        warn!("delete_draft failed: {}", e);
        e.to_string()
    })
}
