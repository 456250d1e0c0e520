//! Persisted list preferences (page size, sort field, sort direction).
//!
//! SYSTEM CONTEXT
//! ==============
//! Each list instance may remember a subset of `limit`, `sort`, and `order`
//! across sessions. Entries live under `{namespace}::{field}` in a
//! [`KeyValueStore`]; an empty namespace turns persistence off.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::fmt;

use super::options::{Defaults, ListerOptions, Order, StoredField};
use crate::util::storage::KeyValueStore;

/// Namespaced reader/writer for the persisted subset of list state.
pub struct PersistedPreferences {
    namespace: String,
    stores: Vec<StoredField>,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for PersistedPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedPreferences")
            .field("namespace", &self.namespace)
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

impl PersistedPreferences {
    pub fn new(
        namespace: impl Into<String>,
        stores: Vec<StoredField>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            stores,
            store,
        }
    }

    /// Persistence needs a non-blank namespace and a usable store.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.namespace.trim().is_empty() && self.store.is_available()
    }

    /// Storage key for `field`, e.g. `users::limit`.
    #[must_use]
    pub fn key(&self, field: StoredField) -> String {
        format!("{}::{}", self.namespace, field.as_str())
    }

    fn is_stored(&self, field: StoredField) -> bool {
        self.stores.contains(&field)
    }

    fn read(&self, field: StoredField) -> Option<String> {
        if !self.is_stored(field) {
            return None;
        }
        self.store.get(&self.key(field)).filter(|v| !v.is_empty())
    }

    /// Overlay stored entries on `defaults`.
    ///
    /// Entries that fail validation against `options` keep the default.
    #[must_use]
    pub fn load(&self, options: &ListerOptions, mut defaults: Defaults) -> Defaults {
        if !self.is_enabled() {
            return defaults;
        }
        if let Some(limit) = self
            .read(StoredField::Limit)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|limit| options.is_valid_limit(*limit))
        {
            defaults.limit = limit;
        }
        if let Some(sort) = self
            .read(StoredField::Sort)
            .filter(|sort| options.is_valid_sort(sort))
        {
            defaults.sort = sort;
        }
        if let Some(order) = self
            .read(StoredField::Order)
            .and_then(|raw| raw.parse::<Order>().ok())
        {
            defaults.order = order;
        }
        defaults
    }

    /// Write the configured subset. Best-effort; never fails the caller.
    pub fn save(&self, limit: u64, sort: &str, order: Order) {
        if !self.is_enabled() {
            return;
        }
        if self.is_stored(StoredField::Limit) && limit > 0 {
            self.store.set(&self.key(StoredField::Limit), &limit.to_string());
        }
        if self.is_stored(StoredField::Sort) && !sort.is_empty() {
            self.store.set(&self.key(StoredField::Sort), sort);
        }
        if self.is_stored(StoredField::Order) {
            self.store.set(&self.key(StoredField::Order), order.as_str());
        }
    }
}
