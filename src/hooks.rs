//! Leptos bindings for the browser observers and the countdown timer.
//!
//! Each hook keeps its RAII handle in a local `StoredValue` owned by the
//! calling component and disposes it on cleanup, which releases the browser
//! registration.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage as LocalArena;

use crate::browser::{KeyboardEvent, MediaQuery, Shortcut, ShortcutDispatcher, ShortcutListener};
use crate::timer::{Countdown, Timer};

/// Reactive match state of a CSS media query.
pub fn use_media(query: &str) -> ReadSignal<bool> {
    let matches = RwSignal::new(true);
    let media = MediaQuery::observe(query, move |now| matches.set(now));
    matches.set(media.matches());

    let handle = StoredValue::new_local(media);
    on_cleanup(move || handle.dispose());
    matches.read_only()
}

/// Document-wide keyboard shortcuts scoped to the current component.
#[derive(Clone, Copy)]
pub struct UseShortcut {
    listener: StoredValue<ShortcutListener, LocalArena>,
}

impl UseShortcut {
    /// Register a shortcut. Returns `false` when it has no key or the
    /// component is gone.
    pub fn add(&self, shortcut: Shortcut<KeyboardEvent>) -> bool {
        self.listener.try_with_value(|listener| listener.add(shortcut)).unwrap_or(false)
    }

    /// Route an event through the registered shortcuts.
    pub fn dispatch(&self, event: &KeyboardEvent) -> usize {
        self.listener.try_with_value(|listener| listener.dispatch(event)).unwrap_or(0)
    }
}

pub fn use_shortcut() -> UseShortcut {
    let listener = StoredValue::new_local(ShortcutListener::bind(ShortcutDispatcher::new()));
    on_cleanup(move || listener.dispose());
    UseShortcut { listener }
}

/// Reactive countdown.
#[derive(Clone, Copy)]
pub struct UseTimer {
    seconds: RwSignal<u64>,
    timer: StoredValue<Timer, LocalArena>,
}

impl UseTimer {
    pub fn start(&self, ms: u64) {
        if let Some(left) = self.timer.try_with_value(|timer| {
            timer.start(ms);
            timer.seconds()
        }) {
            self.seconds.set(left);
        }
    }

    pub fn stop(&self) {
        self.timer.try_with_value(Timer::stop);
        self.seconds.set(0);
    }

    #[must_use]
    pub fn seconds(&self) -> ReadSignal<u64> {
        self.seconds.read_only()
    }

    /// Formatted time left, e.g. `"01:05"`.
    #[must_use]
    pub fn display(&self) -> Signal<String> {
        let seconds = self.seconds;
        Signal::derive(move || Countdown::from_seconds(seconds.get()).display())
    }

    #[must_use]
    pub fn alive(&self) -> Signal<bool> {
        let seconds = self.seconds;
        Signal::derive(move || seconds.get() > 0)
    }
}

pub fn use_timer() -> UseTimer {
    let seconds = RwSignal::new(0_u64);
    let timer = StoredValue::new_local(Timer::new(move |left| seconds.set(left)));
    on_cleanup(move || timer.dispose());
    UseTimer { seconds, timer }
}
