//! Keyboard shortcut dispatch.
//!
//! DESIGN
//! ======
//! `ShortcutDispatcher` is plain state: an ordered list of shortcuts matched
//! against `KeyPress::key()`. `ShortcutListener` wires one dispatcher to the
//! document `keydown` event. Matching is exact on the `key` string
//! (`"Escape"`, `"?"`, `"k"`); modifier handling is left to callbacks.

#[cfg(test)]
#[path = "shortcut_test.rs"]
mod shortcut_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Minimal view of a keyboard event.
pub trait KeyPress {
    fn key(&self) -> String;
    fn prevent_default(&self);
    fn stop_propagation(&self);
}

#[cfg(feature = "hydrate")]
impl KeyPress for web_sys::KeyboardEvent {
    fn key(&self) -> String {
        web_sys::KeyboardEvent::key(self)
    }

    fn prevent_default(&self) {
        web_sys::Event::prevent_default(self);
    }

    fn stop_propagation(&self) {
        web_sys::Event::stop_propagation(self);
    }
}

/// Synthetic key event that records what handlers asked of it.
#[derive(Debug, Default)]
pub struct KeyStroke {
    key: String,
    prevented: Cell<bool>,
    stopped: Cell<bool>,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    #[must_use]
    pub fn is_prevented(&self) -> bool {
        self.prevented.get()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl KeyPress for KeyStroke {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

/// Event type delivered by `ShortcutListener`.
#[cfg(feature = "hydrate")]
pub type KeyboardEvent = web_sys::KeyboardEvent;
/// Event type delivered by `ShortcutListener`.
#[cfg(not(feature = "hydrate"))]
pub type KeyboardEvent = KeyStroke;

/// Keys bound to a callback.
pub struct Shortcut<E> {
    pub keys: Vec<String>,
    pub prevent: bool,
    pub stop: bool,
    pub callback: Box<dyn FnMut(&E)>,
}

impl<E> fmt::Debug for Shortcut<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("keys", &self.keys)
            .field("prevent", &self.prevent)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl<E> Shortcut<E> {
    pub fn new<K>(keys: impl IntoIterator<Item = K>, callback: impl FnMut(&E) + 'static) -> Self
    where
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            prevent: false,
            stop: false,
            callback: Box::new(callback),
        }
    }

    /// Call `prevent_default` before the callback.
    #[must_use]
    pub fn with_prevent(mut self, prevent: bool) -> Self {
        self.prevent = prevent;
        self
    }

    /// Call `stop_propagation` before the callback.
    #[must_use]
    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    fn has_keys(&self) -> bool {
        self.keys.iter().any(|key| !key.is_empty())
    }

    fn handles(&self, key: &str) -> bool {
        self.keys.iter().any(|k| !k.is_empty() && k == key)
    }
}

/// Ordered shortcut table.
pub struct ShortcutDispatcher<E> {
    shortcuts: Vec<Shortcut<E>>,
}

impl<E> Default for ShortcutDispatcher<E> {
    fn default() -> Self {
        Self { shortcuts: Vec::new() }
    }
}

impl<E> fmt::Debug for ShortcutDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.shortcuts).finish()
    }
}

impl<E: KeyPress> ShortcutDispatcher<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `shortcut`. Shortcuts without a non-empty key are dropped.
    pub fn add(&mut self, shortcut: Shortcut<E>) -> bool {
        if !shortcut.has_keys() {
            return false;
        }
        self.shortcuts.push(shortcut);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    pub fn clear(&mut self) {
        self.shortcuts.clear();
    }

    /// Run every shortcut bound to the event's key. Returns how many ran.
    pub fn dispatch(&mut self, event: &E) -> usize {
        let key = event.key();
        let mut ran = 0;
        for shortcut in self.shortcuts.iter_mut().filter(|s| s.handles(&key)) {
            if shortcut.prevent {
                event.prevent_default();
            }
            if shortcut.stop {
                event.stop_propagation();
            }
            (shortcut.callback)(event);
            ran += 1;
        }
        ran
    }
}

#[cfg(feature = "hydrate")]
struct KeydownBinding {
    document: web_sys::Document,
    closure: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

/// Document `keydown` subscription feeding a dispatcher.
pub struct ShortcutListener {
    dispatcher: Rc<RefCell<ShortcutDispatcher<KeyboardEvent>>>,
    #[cfg(feature = "hydrate")]
    binding: Option<KeydownBinding>,
}

impl fmt::Debug for ShortcutListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutListener")
            .field("shortcuts", &self.dispatcher.borrow().len())
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl ShortcutListener {
    pub fn bind(dispatcher: ShortcutDispatcher<KeyboardEvent>) -> Self {
        let dispatcher = Rc::new(RefCell::new(dispatcher));
        #[cfg(feature = "hydrate")]
        {
            let binding = bind_keydown(Rc::clone(&dispatcher));
            Self { dispatcher, binding }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self { dispatcher }
        }
    }

    /// Add a shortcut to the bound dispatcher.
    pub fn add(&self, shortcut: Shortcut<KeyboardEvent>) -> bool {
        self.dispatcher.borrow_mut().add(shortcut)
    }

    /// Feed an event through the dispatcher as if it came from the document.
    pub fn dispatch(&self, event: &KeyboardEvent) -> usize {
        match self.dispatcher.try_borrow_mut() {
            Ok(mut dispatcher) => dispatcher.dispatch(event),
            Err(_) => 0,
        }
    }

    /// Remove the `keydown` listener. Later calls do nothing.
    pub fn release(&mut self) {
        #[cfg(feature = "hydrate")]
        if let Some(binding) = self.binding.take() {
            let _ = binding
                .document
                .remove_event_listener_with_callback("keydown", binding.closure.as_ref().unchecked_ref());
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.binding.is_some()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }
}

impl Drop for ShortcutListener {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "hydrate")]
fn bind_keydown(dispatcher: Rc<RefCell<ShortcutDispatcher<KeyboardEvent>>>) -> Option<KeydownBinding> {
    let document = web_sys::window().and_then(|w| w.document())?;
    let closure = Closure::wrap(Box::new(move |ev: web_sys::KeyboardEvent| {
        // A callback that re-enters the dispatcher sees the event dropped.
        if let Ok(mut dispatcher) = dispatcher.try_borrow_mut() {
            dispatcher.dispatch(&ev);
        }
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    if document
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("could not bind keydown listener");
        return None;
    }
    Some(KeydownBinding { document, closure })
}
