//! Draft composition and lifecycle.
//!
//! [`Composer`] holds the in-progress draft (text, staged attachments,
//! active media tab) and enforces the content limits. [`Session`] owns
//! the store, mirrors the saved collection, and drives the save/delete/
//! view lifecycle against it.

pub mod composer;
pub mod session;

pub use composer::Composer;
pub use session::{ComposerState, Session, View};
