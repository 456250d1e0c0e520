//! Browser observers owned by RAII handles.
//!
//! Each handle registers one browser listener on creation and removes it on
//! `release()` or `Drop`. Without the `hydrate` feature the handles are inert
//! so the surrounding state logic runs natively.

pub mod media;
pub mod shortcut;

pub use media::{MediaQuery, MediaState};
pub use shortcut::{KeyPress, KeyStroke, KeyboardEvent, Shortcut, ShortcutDispatcher, ShortcutListener};
