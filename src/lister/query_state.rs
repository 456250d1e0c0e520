//! List query state: pagination, sorting, search, and filters.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `QueryState` backs one list or table. Field setters edit *pending*
//! values; [`QueryState::apply`] copies them into the [`Snapshot`] that
//! consumers read. Fields named by the trigger policy apply themselves on
//! every accepted write.
//!
//! After each public operation the canonical hash is compared with the last
//! observed one and the `on_apply` callback runs for real changes. Payloads
//! from the server ([`QueryState::parse_inbound`]) are remembered as already
//! seen and never echo back through the callback.
//!
//! ERROR HANDLING
//! ==============
//! Invalid writes are silent no-ops and malformed hashes are ignored. A list
//! view should never fail because a query parameter was out of range.

#[cfg(test)]
#[path = "query_state_test.rs"]
mod query_state_test;

use serde_json::{Map, Value};

use super::notifier::ChangeNotifier;
use super::options::{Defaults, Field, Fields, ListerOptions, Order, TriggerPolicy};
use super::preferences::PersistedPreferences;
use super::snapshot::{NewParams, Params, Snapshot};
use crate::util::codec;
use crate::util::json::{array_of, is_truthy};
use crate::util::storage::{KeyValueStore, LocalStorage};

#[derive(Debug)]
pub struct QueryState {
    options: ListerOptions,
    defaults: Defaults,
    triggers: TriggerPolicy,
    preferences: PersistedPreferences,
    notifier: ChangeNotifier,
    snapshot: Snapshot,
    page: u64,
    limit: u64,
    sort: String,
    order: Order,
    search: String,
    filters: Map<String, Value>,
}

impl QueryState {
    /// Create a list state persisting preferences to browser local storage.
    #[must_use]
    pub fn new(options: ListerOptions, namespace: impl Into<String>) -> Self {
        Self::with_store(options, namespace, LocalStorage)
    }

    /// Create a list state persisting preferences to `store`.
    #[must_use]
    pub fn with_store(
        options: ListerOptions,
        namespace: impl Into<String>,
        store: impl KeyValueStore + 'static,
    ) -> Self {
        let preferences = PersistedPreferences::new(namespace, options.stores.clone(), Box::new(store));
        let defaults = preferences.load(&options, options.defaults());
        let triggers = TriggerPolicy::new(options.triggers.as_ref());
        let snapshot = Snapshot::default();
        let notifier = ChangeNotifier::new(snapshot.params().hash());
        Self {
            page: defaults.page,
            limit: defaults.limit,
            sort: defaults.sort.clone(),
            order: defaults.order,
            search: defaults.search.clone(),
            filters: defaults.filters.clone(),
            options,
            defaults,
            triggers,
            preferences,
            notifier,
            snapshot,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ListerOptions {
        &self.options
    }

    /// Initial values after configuration and persisted preferences.
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Register the change callback. Replaces any earlier registration.
    pub fn on_apply(&mut self, callback: impl FnMut(&Params, &str) + 'static) {
        self.notifier.on_apply(Box::new(callback));
    }

    // ---------------------------------------------------------
    // Pending fields
    // ---------------------------------------------------------

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn filters(&self) -> &Map<String, Value> {
        &self.filters
    }

    /// Set the page. Zero is ignored.
    pub fn set_page(&mut self, page: u64) {
        if self.assign_page(page) {
            self.auto_apply(&[Field::Page]);
        }
        self.flush();
    }

    /// Set the page size. Zero and values outside the allow-list are ignored.
    pub fn set_limit(&mut self, limit: u64) {
        if self.assign_limit(limit) {
            self.auto_apply(&[Field::Limit]);
        }
        self.flush();
    }

    /// Sort by `sort`.
    ///
    /// Selecting the current sort field flips the order; selecting a new one
    /// resets the order to ascending. Blank or disallowed fields are ignored.
    pub fn set_sort(&mut self, sort: &str) {
        if !self.options.is_valid_sort(sort) {
            return;
        }
        if self.sort == sort {
            self.set_order(self.order.toggled());
            return;
        }
        self.sort = sort.to_owned();
        self.order = Order::Asc;
        self.auto_apply(&[Field::Sort, Field::Order]);
        self.flush();
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = order;
        self.auto_apply(&[Field::Order]);
        self.flush();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.auto_apply(&[Field::Search]);
        self.flush();
    }

    /// Empty the search and apply it regardless of the trigger policy.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.apply(Field::Search);
    }

    pub fn set_filters(&mut self, filters: Map<String, Value>) {
        self.filters = filters;
        self.auto_apply(&[Field::Filters]);
        self.flush();
    }

    /// Replace filters from an untyped value; non-objects clear them.
    pub fn set_filters_value(&mut self, filters: &Value) {
        let filters = match filters {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        self.set_filters(filters);
    }

    /// Current value of filter `key`.
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&Value> {
        self.filters.get(key)
    }

    /// Whether the array stored under `key` contains `value`.
    #[must_use]
    pub fn filter_exists(&self, key: &str, value: &Value) -> bool {
        array_of(self.filters.get(key)).contains(value)
    }

    pub fn remove_filter(&mut self, key: &str) {
        if self.filters.remove(key).is_some() {
            self.auto_apply(&[Field::Filters]);
        }
        self.flush();
    }

    /// Set filter `key` to `value`, or remove it when `value` is `None`.
    pub fn toggle_filter(&mut self, key: &str, value: Option<Value>) {
        match value {
            None => self.remove_filter(key),
            Some(value) => {
                self.filters.insert(key.to_owned(), value);
                self.auto_apply(&[Field::Filters]);
                self.flush();
            }
        }
    }

    /// Treat filter `key` as a set: add `value` if absent, remove it if present.
    ///
    /// An emptied set removes the key. Falsy values are ignored.
    pub fn toggle_filter_arr(&mut self, key: &str, value: Value) {
        if !is_truthy(&value) {
            return;
        }
        let mut items = array_of(self.filters.get(key));
        match items.iter().position(|item| *item == value) {
            Some(index) => {
                items.remove(index);
            }
            None => items.push(value),
        }
        if items.is_empty() {
            self.remove_filter(key);
        } else {
            self.filters.insert(key.to_owned(), Value::Array(items));
            self.auto_apply(&[Field::Filters]);
            self.flush();
        }
    }

    /// Remove every filter and apply regardless of the trigger policy.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.apply(Field::Filters);
    }

    // ---------------------------------------------------------
    // Apply / reset / parse
    // ---------------------------------------------------------

    /// Copy pending values of `fields` into the snapshot.
    pub fn apply(&mut self, fields: impl Into<Fields>) {
        self.apply_fields(&fields.into());
        self.flush();
    }

    /// Restore pending values of `fields` from the snapshot, falling back to
    /// defaults where the snapshot has none.
    pub fn reset(&mut self, fields: impl Into<Fields>) {
        let fields = fields.into();
        self.locked(|state| {
            let snapshot = state.snapshot.clone();
            if fields.contains(Field::Page) {
                state.assign_page(snapshot.page.unwrap_or(state.defaults.page));
            }
            if fields.contains(Field::Limit) {
                state.assign_limit(snapshot.limit.unwrap_or(state.defaults.limit));
            }
            if fields.contains(Field::Sort) {
                let sort = snapshot
                    .sort
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| state.defaults.sort.clone());
                state.assign_sort(&sort);
            }
            if fields.contains(Field::Order) {
                state.order = snapshot.order.unwrap_or(state.defaults.order);
            }
            if fields.contains(Field::Search) {
                state.search = snapshot
                    .search
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| state.defaults.search.clone());
            }
            if fields.contains(Field::Filters) {
                state.filters = snapshot
                    .filters
                    .unwrap_or_else(|| state.defaults.filters.clone());
            }
        });
        self.flush();
    }

    /// Merge a server response over the snapshot and adopt its values.
    ///
    /// The resulting hash is remembered as already seen, so this never runs
    /// the `on_apply` callback.
    pub fn parse_inbound(&mut self, raw: &Value) {
        self.locked(|state| {
            let merged = state.snapshot.merged(raw);
            state.adopt(merged);
            let hash = state.snapshot.params().hash();
            state.notifier.remember_inbound(hash);
        });
        self.flush();
    }

    /// Restore state from a hash produced by [`QueryState::hash`].
    ///
    /// Malformed hashes leave the state untouched.
    pub fn parse_hash(&mut self, hash: &str) {
        let value: Value = match codec::decode_json(hash) {
            Ok(value) => value,
            Err(e) => {
                leptos::logging::warn!("ignoring malformed list hash: {e}");
                return;
            }
        };
        self.locked(|state| state.adopt(Snapshot::from_value(&value)));
        self.flush();
    }

    // ---------------------------------------------------------
    // Derived views
    // ---------------------------------------------------------

    #[must_use]
    pub fn params(&self) -> Params {
        self.snapshot.params()
    }

    #[must_use]
    pub fn new_params(&self) -> NewParams {
        self.snapshot.new_params()
    }

    /// Owned copy of the applied snapshot.
    #[must_use]
    pub fn response(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// Shareable hash of the canonical parameters.
    #[must_use]
    pub fn hash(&self) -> String {
        self.snapshot.params().hash()
    }

    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        self.snapshot.records()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.snapshot.total()
    }

    #[must_use]
    pub fn from(&self) -> u64 {
        self.snapshot.from()
    }

    #[must_use]
    pub fn to(&self) -> u64 {
        self.snapshot.to()
    }

    #[must_use]
    pub fn pages(&self) -> u64 {
        self.snapshot.pages()
    }

    // ---------------------------------------------------------
    // Internals
    // ---------------------------------------------------------

    fn assign_page(&mut self, page: u64) -> bool {
        if page == 0 {
            return false;
        }
        self.page = page;
        true
    }

    fn assign_limit(&mut self, limit: u64) -> bool {
        if !self.options.is_valid_limit(limit) {
            return false;
        }
        self.limit = limit;
        true
    }

    fn assign_sort(&mut self, sort: &str) -> bool {
        if !self.options.is_valid_sort(sort) {
            return false;
        }
        sort.clone_into(&mut self.sort);
        true
    }

    /// Replace the snapshot and pull pending values from it. Fields the
    /// snapshot lacks keep their pending value, except filters, which reset.
    fn adopt(&mut self, snapshot: Snapshot) {
        if let Some(page) = snapshot.page {
            self.assign_page(page);
        }
        if let Some(limit) = snapshot.limit {
            self.assign_limit(limit);
        }
        if let Some(sort) = snapshot.sort.as_deref() {
            if sort != self.sort && self.assign_sort(sort) {
                self.order = Order::Asc;
            }
        }
        if let Some(order) = snapshot.order {
            self.order = order;
        }
        if let Some(search) = snapshot.search.as_deref() {
            search.clone_into(&mut self.search);
        }
        self.filters = snapshot.filters.clone().unwrap_or_default();
        self.snapshot = snapshot;
        self.apply_fields(&Fields::All);
    }

    fn apply_fields(&mut self, fields: &Fields) {
        let mut next = self.snapshot.clone();
        if fields.contains(Field::Page) {
            next.page = Some(self.page);
        }
        if fields.contains(Field::Limit) {
            next.limit = Some(self.limit);
        }
        if fields.contains(Field::Sort) {
            next.sort = Some(self.sort.clone());
        }
        if fields.contains(Field::Order) {
            next.order = Some(self.order);
        }
        if fields.contains(Field::Search) {
            next.search = Some(self.search.clone());
        }
        if fields.contains(Field::Filters) {
            next.filters = Some(self.filters.clone());
        }
        self.snapshot = next;
    }

    fn auto_apply(&mut self, fields: &[Field]) {
        if self.notifier.is_locked() {
            return;
        }
        if fields.iter().any(|f| self.triggers.must_trigger(*f)) {
            self.apply_fields(&Fields::Only(fields.to_vec()));
        }
    }

    fn locked(&mut self, f: impl FnOnce(&mut Self)) {
        self.notifier.lock();
        f(self);
        self.notifier.unlock();
    }

    /// Run change detection and persist preferences after a notification.
    fn flush(&mut self) {
        let params = self.snapshot.params();
        let hash = params.hash();
        if self.notifier.observe(&params, hash) {
            self.preferences.save(self.limit, &self.sort, self.order);
        }
    }
}
