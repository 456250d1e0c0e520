//! Countdown timer.
//!
//! `Countdown` is the pure clock: whole seconds remaining and their display
//! string. `Timer` drives a `Countdown` from a one-second browser interval
//! and reports every tick to a callback.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use gloo_timers::callback::{Interval, Timeout};

#[cfg(feature = "hydrate")]
const TICK_MS: u32 = 1_000;

/// Whole seconds left on a countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    seconds: u64,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Load `ms` milliseconds, rounded half up to whole seconds.
    pub fn start(&mut self, ms: u64) {
        self.seconds = ms.saturating_add(500) / 1000;
    }

    /// Take one second off. Returns whether time remains.
    pub fn tick(&mut self) -> bool {
        self.seconds = self.seconds.saturating_sub(1);
        self.is_alive()
    }

    pub fn stop(&mut self) {
        self.seconds = 0;
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.seconds > 0
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// `HH:MM:SS` with up to two leading `00:` groups dropped.
    #[must_use]
    pub fn display(&self) -> String {
        let hours = self.seconds / 3600;
        let minutes = self.seconds % 3600 / 60;
        let seconds = self.seconds % 60;
        let full = format!("{hours:02}:{minutes:02}:{seconds:02}");
        let mut text = full.as_str();
        for _ in 0..2 {
            text = text.strip_prefix("00:").unwrap_or(text);
        }
        text.to_owned()
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

struct TimerInner {
    countdown: Countdown,
    on_tick: Box<dyn FnMut(u64)>,
}

/// One-second countdown driver.
pub struct Timer {
    inner: Rc<RefCell<TimerInner>>,
    #[cfg(feature = "hydrate")]
    interval: Rc<RefCell<Option<Interval>>>,
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("seconds", &self.seconds())
            .field("running", &self.is_running())
            .finish()
    }
}

impl Timer {
    /// `on_tick` receives the seconds left after each tick.
    pub fn new(on_tick: impl FnMut(u64) + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(TimerInner {
                countdown: Countdown::new(),
                on_tick: Box::new(on_tick),
            })),
            #[cfg(feature = "hydrate")]
            interval: Rc::new(RefCell::new(None)),
        }
    }

    /// Count down from `ms`, replacing any running countdown.
    pub fn start(&self, ms: u64) {
        self.cancel();
        self.inner.borrow_mut().countdown.start(ms);
        if !self.is_alive() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            let inner = Rc::clone(&self.inner);
            let slot = Rc::clone(&self.interval);
            let interval = Interval::new(TICK_MS, move || {
                if !step(&inner) {
                    // The interval cannot be dropped from inside its own callback.
                    if let Some(finished) = slot.borrow_mut().take() {
                        Timeout::new(0, move || drop(finished)).forget();
                    }
                }
            });
            *self.interval.borrow_mut() = Some(interval);
        }
    }

    /// Zero the countdown and cancel the interval. Safe when idle.
    pub fn stop(&self) {
        self.cancel();
        self.inner.borrow_mut().countdown.stop();
    }

    /// Advance one tick by hand. Returns whether time remains.
    pub fn tick(&self) -> bool {
        let alive = step(&self.inner);
        if !alive {
            self.cancel();
        }
        alive
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.inner.borrow().countdown.seconds()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.borrow().countdown.is_alive()
    }

    #[must_use]
    pub fn display(&self) -> String {
        self.inner.borrow().countdown.display()
    }

    /// Whether a browser interval is scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.interval.borrow().is_some()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    fn cancel(&self) {
        #[cfg(feature = "hydrate")]
        {
            let previous = self.interval.borrow_mut().take();
            drop(previous);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn step(inner: &RefCell<TimerInner>) -> bool {
    let mut inner = inner.borrow_mut();
    if !inner.countdown.is_alive() {
        return false;
    }
    let alive = inner.countdown.tick();
    let seconds = inner.countdown.seconds();
    (inner.on_tick)(seconds);
    alive
}
