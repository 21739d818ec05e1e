use loam_types::{Attachment, MediaKind, MAX_ATTACHMENTS, MAX_TEXT_CHARS};

/// The in-progress draft: free-form text plus up to four staged
/// attachments.
///
/// Text is never clamped while typing; `chars_remaining` goes negative
/// past the limit and the save guard refuses until the text is trimmed
/// back down.
#[derive(Debug, Clone)]
pub struct Composer {
    text: String,
    staged: Vec<Attachment>,
    active_tab: MediaKind,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            text: String::new(),
            staged: Vec::new(),
            active_tab: MediaKind::Image,
        }
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn chars_remaining(&self) -> i64 {
        MAX_TEXT_CHARS as i64 - self.text.chars().count() as i64
    }

    pub fn over_limit(&self) -> bool {
        self.chars_remaining() < 0
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.staged.is_empty()
    }

    /// Save is allowed when something is staged (text or media) and the
    /// text is within the limit.
    pub fn can_save(&self) -> bool {
        !self.is_empty() && !self.over_limit()
    }

    /// Media kind the picker is currently set to (image/video tab).
    pub fn active_tab(&self) -> MediaKind {
        self.active_tab
    }

    pub fn select_tab(&mut self, kind: MediaKind) {
        self.active_tab = kind;
    }

    pub fn staged(&self) -> &[Attachment] {
        &self.staged
    }

    pub fn can_stage(&self) -> bool {
        self.staged.len() < MAX_ATTACHMENTS
    }

    /// Stage an attachment. Returns false (and stages nothing) once the
    /// cap is reached.
    pub fn stage(&mut self, attachment: Attachment) -> bool {
        if !self.can_stage() {
            return false;
        }
        self.staged.push(attachment);
        true
    }

    /// Remove a staged attachment by id, returning it so the caller can
    /// clean up its blob. Saved drafts are unaffected.
    pub fn unstage(&mut self, id: i64) -> Option<Attachment> {
        let idx = self.staged.iter().position(|a| a.id == id)?;
        Some(self.staged.remove(idx))
    }

    /// Reset text and staged attachments, returning what was staged. The
    /// active tab survives a clear.
    pub fn clear(&mut self) -> Vec<Attachment> {
        self.text.clear();
        std::mem::take(&mut self.staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: i64) -> Attachment {
        Attachment {
            id,
            kind: MediaKind::Image,
            url: format!("/data/media/{id}-file.png"),
            name: "file.png".to_string(),
        }
    }

    #[test]
    fn exactly_280_chars_can_save_281_cannot() {
        let mut c = Composer::new();

        c.set_text("a".repeat(MAX_TEXT_CHARS));
        assert_eq!(c.chars_remaining(), 0);
        assert!(c.can_save());

        c.set_text("a".repeat(MAX_TEXT_CHARS + 1));
        assert_eq!(c.chars_remaining(), -1);
        assert!(c.over_limit());
        assert!(!c.can_save());
    }

    #[test]
    fn whitespace_only_text_cannot_save_without_media() {
        let mut c = Composer::new();
        c.set_text("   \n ");
        assert!(!c.can_save());

        // Media alone is enough.
        assert!(c.stage(attachment(1)));
        assert!(c.can_save());
    }

    #[test]
    fn fifth_attachment_is_a_no_op() {
        let mut c = Composer::new();
        for id in 1..=4 {
            assert!(c.stage(attachment(id)));
        }
        assert!(!c.can_stage());
        assert!(!c.stage(attachment(5)));
        assert_eq!(c.staged().len(), 4);
    }

    #[test]
    fn unstage_removes_by_id_only() {
        let mut c = Composer::new();
        c.stage(attachment(1));
        c.stage(attachment(2));

        assert!(c.unstage(99).is_none());
        let removed = c.unstage(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(c.staged().len(), 1);
        assert_eq!(c.staged()[0].id, 2);
    }

    #[test]
    fn clear_resets_text_and_media_but_keeps_the_tab() {
        let mut c = Composer::new();
        c.select_tab(MediaKind::Video);
        c.set_text("draft in progress");
        c.stage(attachment(1));

        let released = c.clear();
        assert_eq!(released.len(), 1);
        assert!(c.is_empty());
        assert_eq!(c.active_tab(), MediaKind::Video);
    }
}
