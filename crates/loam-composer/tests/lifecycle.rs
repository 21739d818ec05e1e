/// Integration test: run a full compose/save/delete lifecycle against a
/// real on-disk store, restart the session in between, and verify the
/// collection and media blobs survive exactly as persisted.
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use loam_composer::{Session, View};
use loam_store::DraftStore;
use loam_types::MediaKind;

#[tokio::test]
async fn drafts_and_media_survive_a_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let picked = dir.path().join("sunset.png");
    std::fs::write(&picked, b"fake png bytes")?;

    // First run: compose a draft with text and one image.
    {
        let store = DraftStore::open(dir.path(), "loam-tweets").await?;
        let mut session = Session::load(store).await?;

        session.composer_mut().set_text("golden hour over the bay");
        session.composer_mut().select_tab(MediaKind::Image);
        assert!(session.attach(&picked).await?);
        let saved = session.save().await?.expect("draft saved");
        assert_eq!(saved.media.len(), 1);
    }

    // Second run: the collection and the imported blob are still there.
    let store = DraftStore::open(dir.path(), "loam-tweets").await?;
    let mut session = Session::load(store).await?;

    assert_eq!(session.drafts().len(), 1);
    let draft = &session.drafts()[0];
    assert_eq!(draft.text, "golden hour over the bay");
    assert_eq!(draft.media[0].name, "sunset.png");
    assert_eq!(std::fs::read(&draft.media[0].url)?, b"fake png bytes");

    // Open it, delete it, and confirm everything is gone.
    let id = draft.id;
    let blob = draft.media[0].url.clone();
    assert!(session.open(id));
    session.delete(id).await?;
    assert_eq!(session.view(), View::List);
    assert!(session.drafts().is_empty());
    assert!(!Path::new(&blob).exists());

    let store = DraftStore::open(dir.path(), "loam-tweets").await?;
    assert!(store.read_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn mirror_and_store_converge_across_a_mixed_action_sequence() -> Result<()> {
    let dir = TempDir::new()?;
    let store = DraftStore::open(dir.path(), "loam-tweets").await?;
    let mut session = Session::load(store).await?;

    // Interleave saves and deletes; after every action the store must
    // hold exactly what the session believes it has.
    for round in 0..5 {
        session.composer_mut().set_text(format!("draft {round}"));
        session.save().await?;

        if round % 2 == 1 {
            let oldest = session.drafts().last().unwrap().id;
            session.delete(oldest).await?;
        }

        let check = DraftStore::open(dir.path(), "loam-tweets").await?;
        assert_eq!(check.read_all().await?, session.drafts());
    }

    assert_eq!(session.drafts().len(), 3);
    Ok(())
}
