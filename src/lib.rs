//! # ui-helpers
//!
//! Reusable UI-state helpers for Leptos + WASM frontends: a list/query-state
//! manager with shareable hashes and persisted preferences, a request event
//! hub, browser observers (media queries, keyboard shortcuts), a countdown
//! timer, and component auto-registration.
//!
//! Browser bindings are gated behind the `hydrate` feature. Native builds keep
//! the same API with inert browser handles so state logic stays testable.

pub mod browser;
pub mod event_hub;
pub mod hooks;
pub mod lister;
pub mod logging;
pub mod registry;
pub mod timer;
pub mod util;
