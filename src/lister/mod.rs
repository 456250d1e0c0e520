//! List/query-state management.
//!
//! SYSTEM CONTEXT
//! ==============
//! `options` defines configuration and field vocabulary, `preferences`
//! persists a subset across sessions, `snapshot` is the applied state
//! consumers read, `notifier` detects changes, and `query_state` ties them
//! together behind one per-list handle.

pub mod notifier;
pub mod options;
pub mod preferences;
pub mod query_state;
pub mod snapshot;

pub use notifier::{ApplyCallback, ChangeNotifier, NotifierState};
pub use options::{Defaults, Field, Fields, ListerOptions, Order, ParseOrderError, StoredField, TriggerPolicy};
pub use preferences::PersistedPreferences;
pub use query_state::QueryState;
pub use snapshot::{NewParams, Params, Snapshot, SortSpec};
