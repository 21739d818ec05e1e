pub mod ids;
pub mod models;

pub use ids::next_id;
pub use models::{Attachment, Draft, MediaKind, MAX_ATTACHMENTS, MAX_TEXT_CHARS, PREVIEW_CHARS};
