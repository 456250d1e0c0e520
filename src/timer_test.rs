use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn countdown(seconds: u64) -> Countdown {
    let mut countdown = Countdown::new();
    countdown.start(seconds * 1000);
    countdown
}

// =============================================================
// Countdown
// =============================================================

#[test]
fn start_rounds_half_up() {
    let mut c = Countdown::new();
    c.start(1_499);
    assert_eq!(c.seconds(), 1);
    c.start(1_500);
    assert_eq!(c.seconds(), 2);
    c.start(400);
    assert_eq!(c.seconds(), 0);
    assert!(!c.is_alive());
}

#[test]
fn tick_counts_down_to_zero_and_stays() {
    let mut c = countdown(2);
    assert!(c.tick());
    assert!(!c.tick());
    assert!(!c.tick());
    assert_eq!(c.seconds(), 0);
}

#[test]
fn stop_zeroes() {
    let mut c = countdown(30);
    c.stop();
    assert!(!c.is_alive());
}

#[test]
fn display_strips_empty_leading_groups() {
    assert_eq!(countdown(0).display(), "00");
    assert_eq!(countdown(5).display(), "05");
    assert_eq!(countdown(65).display(), "01:05");
    assert_eq!(countdown(600).display(), "10:00");
    assert_eq!(countdown(3_600).display(), "01:00:00");
    assert_eq!(countdown(3_661).display(), "01:01:01");
}

#[test]
fn display_does_not_wrap_hours() {
    assert_eq!(countdown(25 * 3_600 + 1).display(), "25:00:01");
    assert_eq!(countdown(25 * 3_600 + 1).to_string(), "25:00:01");
}

// =============================================================
// Timer (driven by hand)
// =============================================================

#[test]
fn timer_reports_each_tick() {
    let ticks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ticks);
    let timer = Timer::new(move |s| sink.borrow_mut().push(s));
    timer.start(3_000);
    assert_eq!(timer.display(), "03");

    while timer.tick() {}
    assert_eq!(*ticks.borrow(), vec![2, 1, 0]);
    assert!(!timer.is_alive());
    assert!(!timer.tick());
    assert_eq!(ticks.borrow().len(), 3);
}

#[test]
fn stop_without_start_is_safe() {
    let timer = Timer::new(|_| {});
    timer.stop();
    timer.stop();
    assert_eq!(timer.seconds(), 0);
    assert!(!timer.is_running());
}

#[test]
fn restart_replaces_remaining_time() {
    let timer = Timer::new(|_| {});
    timer.start(10_000);
    timer.tick();
    timer.start(2_000);
    assert_eq!(timer.seconds(), 2);
}

#[test]
fn start_with_zero_is_not_alive() {
    let timer = Timer::new(|_| {});
    timer.start(0);
    assert!(!timer.is_alive());
    assert!(!timer.is_running());
}
