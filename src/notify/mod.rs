//! Stacking notification widget.
//!
//! - [`note`] - a single banner: validation, text, size, motion, fade-out
//! - [`notifier`] - owns active notes, assigns ids, restacks on every change
//! - [`layout`] - corner strategies and the geometry they work in
//! - [`render`] - draws notes onto a ratatui buffer
//! - [`error`] - the validation error type
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use notestack::notify::{NoteOptions, Notifier, NotifierConfig, Viewport};
//!
//! let now = Instant::now();
//! let mut notifier = Notifier::new(NotifierConfig::default(), Viewport::new(1280, 720));
//! notifier.success(NoteOptions::message("Saved"), now).unwrap();
//! notifier
//!     .warning(NoteOptions::message("Check this").with_caption("Note"), now)
//!     .unwrap();
//! assert_eq!(notifier.len(), 2);
//! ```

pub mod error;
pub mod layout;
pub mod note;
pub mod notifier;
pub mod render;

pub use error::{NotifyError, Violation};
pub use layout::{Corner, Position, Viewport};
pub use note::{Note, NoteId, NoteKind, NoteOptions};
pub use notifier::{Notifier, NotifierConfig, NotifierOptions};
pub use render::render_notes;
