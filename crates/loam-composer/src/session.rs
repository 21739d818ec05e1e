use std::path::Path;

use chrono::Local;
use tracing::{debug, info};

use loam_store::{DraftStore, StoreError};
use loam_types::{next_id, Draft};

use crate::Composer;

/// Where the UI currently is: the draft list or one opened draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail(i64),
}

/// Coarse composer state derived from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Idle,
    Editing,
}

/// One editing session over a draft store.
///
/// Owns the store and keeps an in-memory mirror of the saved collection;
/// every mutation goes to the store first and the mirror is updated only
/// once the write succeeded, so a store failure leaves both the mirror
/// and the composer untouched for a retry.
pub struct Session {
    store: DraftStore,
    drafts: Vec<Draft>,
    composer: Composer,
    view: View,
}

impl Session {
    /// Read the full collection once at startup.
    pub async fn load(store: DraftStore) -> Result<Self, StoreError> {
        let drafts = store.read_all().await?;
        info!("Loaded {} saved draft(s)", drafts.len());
        Ok(Self {
            store,
            drafts,
            composer: Composer::new(),
            view: View::List,
        })
    }

    /// Saved collection, newest first.
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn state(&self) -> ComposerState {
        if self.composer.is_empty() {
            ComposerState::Idle
        } else {
            ComposerState::Editing
        }
    }

    /// The draft open in the detail view, if any.
    pub fn opened(&self) -> Option<&Draft> {
        match self.view {
            View::Detail(id) => self.drafts.iter().find(|d| d.id == id),
            View::List => None,
        }
    }

    /// Import a picked file into the store's media area and stage it on
    /// the composer, tagged with the active tab's kind. Returns false
    /// without touching disk when the attachment cap is already reached.
    pub async fn attach(&mut self, source: &Path) -> Result<bool, StoreError> {
        if !self.composer.can_stage() {
            debug!("Attachment cap reached, ignoring {}", source.display());
            return Ok(false);
        }
        let attachment = self
            .store
            .import_media(source, self.composer.active_tab())
            .await?;
        Ok(self.composer.stage(attachment))
    }

    /// Remove a staged attachment and its imported blob.
    pub async fn remove_attachment(&mut self, id: i64) {
        if let Some(attachment) = self.composer.unstage(id) {
            self.store.remove_media(&attachment).await;
        }
    }

    /// Discard the in-progress draft: composer resets, staged blobs are
    /// cleaned up, the saved collection is untouched.
    pub async fn discard(&mut self) {
        for attachment in self.composer.clear() {
            self.store.remove_media(&attachment).await;
        }
    }

    /// Commit the composer as a new draft: assign a fresh id and creation
    /// time, prepend to the collection, persist the whole collection,
    /// then reset the composer. A guarded-off save (empty or over-limit)
    /// returns `Ok(None)` and writes nothing.
    pub async fn save(&mut self) -> Result<Option<Draft>, StoreError> {
        if !self.composer.can_save() {
            debug!("Save ignored: composer empty or over limit");
            return Ok(None);
        }

        let draft = Draft {
            id: next_id(),
            text: self.composer.text().to_string(),
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            media: self.composer.staged().to_vec(),
        };

        let mut next = Vec::with_capacity(self.drafts.len() + 1);
        next.push(draft.clone());
        next.extend(self.drafts.iter().cloned());
        self.store.replace_all(&next).await?;

        self.drafts = next;
        // Blobs now belong to the saved draft; reset without removing them.
        self.composer.clear();
        info!("Saved draft {}", draft.id);
        Ok(Some(draft))
    }

    /// Delete a saved draft from the store and the mirror, clean up its
    /// media blobs, and fall back to the list if it was open in the
    /// detail view. Deleting an id that is already gone is a no-op.
    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let removed = self.drafts.iter().find(|d| d.id == id).cloned();

        // The store returns the post-delete collection; mirror that
        // rather than filtering locally, so the two cannot diverge.
        self.drafts = self.store.delete_by_id(id).await?;

        if let Some(draft) = removed {
            for attachment in &draft.media {
                self.store.remove_media(attachment).await;
            }
            info!("Deleted draft {}", id);
        }

        if self.view == View::Detail(id) {
            self.view = View::List;
        }
        Ok(())
    }

    /// Open a saved draft in the detail view. Unknown ids are refused.
    pub fn open(&mut self, id: i64) -> bool {
        if self.drafts.iter().any(|d| d.id == id) {
            self.view = View::Detail(id);
            true
        } else {
            false
        }
    }

    /// Back to the list view.
    pub fn back(&mut self) {
        self.view = View::List;
    }
}
