use serde::{Deserialize, Serialize};

/// Hard ceiling on draft text length at save time. The composer lets the
/// text run past this transiently so the UI can show a negative counter,
/// but an over-limit draft is never persisted.
pub const MAX_TEXT_CHARS: usize = 280;

/// At most this many attachments per draft.
pub const MAX_ATTACHMENTS: usize = 4;

/// Card previews in the list view cut text at this many characters.
pub const PREVIEW_CHARS: usize = 140;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A media file referenced by a draft.
///
/// `url` points at the blob copied into the store's media area, so it
/// stays valid across restarts. `name` is the original file name, shown
/// for attachments without an inline preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub name: String,
}

/// A composed post, either pending in the composer snapshot or already
/// archived in the saved collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub text: String,
    pub date: String,
    #[serde(default)]
    pub media: Vec<Attachment>,
}

impl Draft {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// A draft with whitespace-only text and no attachments is empty and
    /// must never reach the store.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.media.is_empty()
    }

    pub fn over_limit(&self) -> bool {
        self.char_count() > MAX_TEXT_CHARS
    }

    /// Text as shown on a list card: cut at [`PREVIEW_CHARS`] with a
    /// trailing ellipsis. The full text is only shown in the detail view.
    pub fn preview(&self) -> String {
        if self.char_count() <= PREVIEW_CHARS {
            self.text.clone()
        } else {
            let head: String = self.text.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        }
    }
}
