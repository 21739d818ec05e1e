//! File-backed persistence for the saved-draft collection.
//!
//! Each named store is one JSON file holding the whole collection under a
//! single key, plus a `media/` directory for attachment blobs. The entire
//! collection is read and written wholesale; there is no indexing and no
//! partial update.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use loam_types::{next_id, Attachment, Draft, MediaKind};

/// Store name used by the desktop shell.
pub const DEFAULT_STORE_NAME: &str = "loam-tweets";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failed. Callers keep their last-known collection; the
    /// result is never treated as an empty store.
    #[error("draft store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// The store file exists but does not parse. Reported rather than
    /// read as empty, so the next save cannot wipe the old contents.
    #[error("draft store corrupt at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("draft collection could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk shape: one object per named store, a single field holding the
/// draft sequence.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(rename = "savedTweets", default)]
    saved_tweets: Vec<Draft>,
}

/// Durable key-value persistence for one draft collection.
///
/// Constructed once at process start and handed to whoever needs it; all
/// operations go through a single lock so overlapping save/delete calls
/// cannot interleave their read-modify-write cycles (the persisted state
/// always reflects the most recent completed action).
pub struct DraftStore {
    path: PathBuf,
    media_dir: PathBuf,
    op_lock: Mutex<()>,
}

impl DraftStore {
    /// Open (creating directories as needed) the store named `name` under
    /// `dir`. The store file itself is not created until the first write;
    /// until then reads return the empty collection.
    pub async fn open(dir: impl AsRef<Path>, name: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let media_dir = dir.join("media");
        fs::create_dir_all(&media_dir).await?;

        let path = dir.join(format!("{name}.json"));
        info!("Draft store opened at {}", path.display());
        Ok(Self {
            path,
            media_dir,
            op_lock: Mutex::new(()),
        })
    }

    /// Open the store named `name` under the platform data directory.
    pub async fn open_default(name: &str) -> Result<Self, StoreError> {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join(name), name).await
    }

    /// Path of the JSON file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted collection, verbatim. A store that has never been
    /// written reads as the empty collection.
    pub async fn read_all(&self) -> Result<Vec<Draft>, StoreError> {
        let _guard = self.op_lock.lock().await;
        Ok(self.load().await?.saved_tweets)
    }

    /// Replace the persisted collection with `drafts`. Subsequent reads
    /// return exactly this sequence until the next write.
    pub async fn replace_all(&self, drafts: &[Draft]) -> Result<(), StoreError> {
        let _guard = self.op_lock.lock().await;
        self.persist(&StoreFile {
            saved_tweets: drafts.to_vec(),
        })
        .await
    }

    /// Remove the draft with `id` and persist the filtered collection,
    /// returning it so the caller can resynchronize without a second
    /// read. Deleting an absent id is a no-op, not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<Vec<Draft>, StoreError> {
        let _guard = self.op_lock.lock().await;
        let mut file = self.load().await?;

        let before = file.saved_tweets.len();
        file.saved_tweets.retain(|d| d.id != id);
        if file.saved_tweets.len() == before {
            debug!("Delete of absent draft {} ignored", id);
            return Ok(file.saved_tweets);
        }

        self.persist(&file).await?;
        Ok(file.saved_tweets)
    }

    async fn load(&self) -> Result<StoreFile, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // No prior write: the configured default is the empty collection.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(StoreError::Unavailable(e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn persist(&self, file: &StoreFile) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(file)?;

        // Write a temp sibling, then rename over the store file, so a
        // crash mid-write never leaves a half-written collection behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    // -- Media blobs --

    /// Copy a selected media file into the store's media area and return
    /// the attachment record pointing at the copy. The copied path stays
    /// valid across restarts, unlike the transient picker reference it
    /// replaces.
    pub async fn import_media(
        &self,
        source: &Path,
        kind: MediaKind,
    ) -> Result<Attachment, StoreError> {
        let id = next_id();
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();

        let dest = self.media_dir.join(format!("{id}-{name}"));
        fs::copy(source, &dest).await?;
        debug!("Imported media blob {}", dest.display());

        Ok(Attachment {
            id,
            kind,
            url: dest.to_string_lossy().into_owned(),
            name,
        })
    }

    /// Delete an attachment's blob, best-effort. Only blobs under this
    /// store's media directory are touched; a failed removal is logged
    /// and never fails the surrounding action.
    pub async fn remove_media(&self, attachment: &Attachment) {
        let path = Path::new(&attachment.url);
        if !path.starts_with(&self.media_dir) {
            return;
        }
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!("Could not remove media blob {}: {}", path.display(), e);
            }
        }
    }
}
