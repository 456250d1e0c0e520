//! `matchMedia` observer.
//!
//! `MediaQuery::observe` evaluates a CSS media query and reports changes of
//! its match state. The state starts as matching until the browser has been
//! read, which is also what native builds report.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Last known match state of a media query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaState {
    matches: bool,
}

impl Default for MediaState {
    fn default() -> Self {
        Self { matches: true }
    }
}

impl MediaState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matches(&self) -> bool {
        self.matches
    }

    /// Store `matches`, returning whether it differed from the previous value.
    pub fn update(&mut self, matches: bool) -> bool {
        let changed = self.matches != matches;
        self.matches = matches;
        changed
    }
}

#[cfg(feature = "hydrate")]
struct MediaBinding {
    list: web_sys::MediaQueryList,
    closure: Closure<dyn FnMut()>,
}

/// Live media query subscription.
pub struct MediaQuery {
    query: String,
    state: Rc<RefCell<MediaState>>,
    #[cfg(feature = "hydrate")]
    binding: Option<MediaBinding>,
}

impl fmt::Debug for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaQuery")
            .field("query", &self.query)
            .field("matches", &self.matches())
            .finish_non_exhaustive()
    }
}

impl MediaQuery {
    /// Start observing `query`. `on_change` runs each time the match state flips.
    pub fn observe(query: impl Into<String>, on_change: impl FnMut(bool) + 'static) -> Self {
        let query = query.into();
        let state = Rc::new(RefCell::new(MediaState::new()));

        #[cfg(feature = "hydrate")]
        {
            let binding = bind(&query, Rc::clone(&state), on_change);
            Self { query, state, binding }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = on_change;
            Self { query, state }
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn matches(&self) -> bool {
        self.state.borrow().matches()
    }

    /// Remove the browser listener. Later calls do nothing.
    pub fn release(&mut self) {
        #[cfg(feature = "hydrate")]
        if let Some(binding) = self.binding.take() {
            let _ = binding
                .list
                .remove_event_listener_with_callback("change", binding.closure.as_ref().unchecked_ref());
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

impl Drop for MediaQuery {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "hydrate")]
fn bind(
    query: &str,
    state: Rc<RefCell<MediaState>>,
    mut on_change: impl FnMut(bool) + 'static,
) -> Option<MediaBinding> {
    let window = web_sys::window()?;
    let list = match window.match_media(query) {
        Ok(Some(list)) => list,
        Ok(None) => return None,
        Err(err) => {
            leptos::logging::warn!("matchMedia failed for {query}: {err:?}");
            return None;
        }
    };
    state.borrow_mut().update(list.matches());

    let list_for_cb = list.clone();
    let closure = Closure::wrap(Box::new(move || {
        let matches = list_for_cb.matches();
        let changed = state.borrow_mut().update(matches);
        if changed {
            on_change(matches);
        }
    }) as Box<dyn FnMut()>);

    if list
        .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        .is_err()
    {
        leptos::logging::warn!("could not observe media query {query}");
        return None;
    }
    Some(MediaBinding { list, closure })
}
