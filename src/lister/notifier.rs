//! Change detection over the canonical parameter hash.
//!
//! DESIGN
//! ======
//! The notifier caches the last observed hash and fires the registered
//! callback once per distinct value. A hash captured while parsing inbound
//! data is remembered separately so data that came from the server does not
//! echo back as a user-driven change.
//!
//! The notifier is `Locked` while the owning state rewrites itself from a
//! snapshot, an inbound payload, or a hash. Locked means "no auto-apply";
//! observation itself runs after the operation completes.

#[cfg(test)]
#[path = "notifier_test.rs"]
mod notifier_test;

use std::fmt;

use super::snapshot::Params;

/// Callback invoked with the new canonical parameters and their hash.
pub type ApplyCallback = Box<dyn FnMut(&Params, &str)>;

/// Whether auto-propagation is currently allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotifierState {
    #[default]
    Idle,
    Locked,
}

pub struct ChangeNotifier {
    state: NotifierState,
    observed_hash: String,
    stored_hash: String,
    callback: Option<ApplyCallback>,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("state", &self.state)
            .field("observed_hash", &self.observed_hash)
            .field("stored_hash", &self.stored_hash)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl ChangeNotifier {
    /// Start observing from `initial_hash`.
    #[must_use]
    pub fn new(initial_hash: String) -> Self {
        Self {
            state: NotifierState::Idle,
            observed_hash: initial_hash,
            stored_hash: String::new(),
            callback: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> NotifierState {
        self.state
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state == NotifierState::Locked
    }

    pub fn lock(&mut self) {
        self.state = NotifierState::Locked;
    }

    pub fn unlock(&mut self) {
        self.state = NotifierState::Idle;
    }

    /// Register the change callback, replacing any previous one.
    pub fn on_apply(&mut self, callback: ApplyCallback) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Remember `hash` as already seen, so reaching it does not notify.
    pub fn remember_inbound(&mut self, hash: String) {
        self.stored_hash = hash;
    }

    #[must_use]
    pub fn observed_hash(&self) -> &str {
        &self.observed_hash
    }

    #[must_use]
    pub fn stored_hash(&self) -> &str {
        &self.stored_hash
    }

    /// Record `hash` as the current value and notify when it is new.
    ///
    /// Returns `true` when the callback ran.
    pub fn observe(&mut self, params: &Params, hash: String) -> bool {
        if hash == self.observed_hash {
            return false;
        }
        self.observed_hash = hash;
        if self.observed_hash == self.stored_hash {
            return false;
        }
        match self.callback.as_mut() {
            Some(callback) => {
                callback(params, &self.observed_hash);
                true
            }
            None => false,
        }
    }
}
