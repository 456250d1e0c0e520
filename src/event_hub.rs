//! Named success/error dispatch for request lifecycles.
//!
//! SYSTEM CONTEXT
//! ==============
//! A component owns one `EventHub` and routes request outcomes through it by
//! method name (`"save"`, `"delete"`, ...). Method-specific handlers win; the
//! default handlers catch everything else with the method name attached.
//!
//! DESIGN
//! ======
//! Handlers are `Rc` closures so one handler can be bound to several method
//! names. The hub is single-threaded and owned by its component.

#[cfg(test)]
#[path = "event_hub_test.rs"]
mod event_hub_test;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Handler bound to one or more method names.
pub type Handler<T> = Rc<dyn Fn(&T)>;
/// Fallback handler receiving the method name.
pub type MethodHandler<T> = Rc<dyn Fn(&str, &T)>;

/// One method name or a list of names sharing a handler.
pub trait MethodNames {
    fn method_names(self) -> Vec<String>;
}

impl MethodNames for &str {
    fn method_names(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl MethodNames for String {
    fn method_names(self) -> Vec<String> {
        vec![self]
    }
}

impl MethodNames for &[&str] {
    fn method_names(self) -> Vec<String> {
        self.iter().map(|m| (*m).to_owned()).collect()
    }
}

impl<const N: usize> MethodNames for [&str; N] {
    fn method_names(self) -> Vec<String> {
        self.iter().map(|m| (*m).to_owned()).collect()
    }
}

impl MethodNames for Vec<&str> {
    fn method_names(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl MethodNames for Vec<String> {
    fn method_names(self) -> Vec<String> {
        self
    }
}

/// Per-component event dispatcher.
pub struct EventHub<T = Value, E = Value> {
    passes: HashMap<String, Handler<T>>,
    fails: HashMap<String, Handler<E>>,
    on_pass_default: Option<MethodHandler<T>>,
    on_fail_default: Option<MethodHandler<E>>,
    loading: bool,
}

impl<T, E> fmt::Debug for EventHub<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut passes: Vec<&String> = self.passes.keys().collect();
        passes.sort();
        let mut fails: Vec<&String> = self.fails.keys().collect();
        fails.sort();
        f.debug_struct("EventHub")
            .field("passes", &passes)
            .field("fails", &fails)
            .field("has_default_success", &self.on_pass_default.is_some())
            .field("has_default_error", &self.on_fail_default.is_some())
            .field("loading", &self.loading)
            .finish()
    }
}

impl<T, E> Default for EventHub<T, E> {
    fn default() -> Self {
        Self {
            passes: HashMap::new(),
            fails: HashMap::new(),
            on_pass_default: None,
            on_fail_default: None,
            loading: false,
        }
    }
}

impl<T, E> EventHub<T, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with optional default handlers already installed.
    #[must_use]
    pub fn with_defaults(
        on_success: Option<impl Fn(&str, &T) + 'static>,
        on_error: Option<impl Fn(&str, &E) + 'static>,
    ) -> Self {
        let mut hub = Self::new();
        if let Some(handler) = on_success {
            hub.on_success(handler);
        }
        if let Some(handler) = on_error {
            hub.on_error(handler);
        }
        hub
    }

    /// Fallback for successes with no method handler.
    pub fn on_success(&mut self, handler: impl Fn(&str, &T) + 'static) {
        self.on_pass_default = Some(Rc::new(handler));
    }

    /// Fallback for errors with no method handler.
    pub fn on_error(&mut self, handler: impl Fn(&str, &E) + 'static) {
        self.on_fail_default = Some(Rc::new(handler));
    }

    /// Bind a success handler to one or more methods.
    pub fn on_pass(&mut self, methods: impl MethodNames, handler: impl Fn(&T) + 'static) {
        let handler: Handler<T> = Rc::new(handler);
        for method in methods.method_names() {
            self.passes.insert(method, Rc::clone(&handler));
        }
    }

    /// Bind an error handler to one or more methods.
    pub fn on_fail(&mut self, methods: impl MethodNames, handler: impl Fn(&E) + 'static) {
        let handler: Handler<E> = Rc::new(handler);
        for method in methods.method_names() {
            self.fails.insert(method, Rc::clone(&handler));
        }
    }

    /// Report success of `method`.
    pub fn pass(&self, method: &str, value: &T) {
        if let Some(handler) = self.passes.get(method) {
            handler(value);
        } else if let Some(handler) = &self.on_pass_default {
            handler(method, value);
        }
    }

    /// Report failure of `method`.
    pub fn fail(&self, method: &str, err: &E) {
        if let Some(handler) = self.fails.get(method) {
            handler(err);
        } else if let Some(handler) = &self.on_fail_default {
            handler(method, err);
        } else {
            leptos::logging::warn!("unhandled failure for method `{method}`");
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark whether a request is in flight.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
