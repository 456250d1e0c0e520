use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

// =============================================================
// ShortcutDispatcher
// =============================================================

#[test]
fn add_ignores_shortcuts_without_keys() {
    let mut dispatcher: ShortcutDispatcher<KeyStroke> = ShortcutDispatcher::new();
    assert!(!dispatcher.add(Shortcut::new(Vec::<String>::new(), |_| {})));
    assert!(!dispatcher.add(Shortcut::new([""], |_| {})));
    assert!(dispatcher.add(Shortcut::new(["", "k"], |_| {})));
    assert_eq!(dispatcher.len(), 1);
}

#[test]
fn dispatch_runs_matching_shortcuts_in_order() {
    let seen = recorder();
    let mut dispatcher = ShortcutDispatcher::new();
    let sink = Rc::clone(&seen);
    dispatcher.add(Shortcut::new(["Escape"], move |_: &KeyStroke| sink.borrow_mut().push("close".into())));
    let sink = Rc::clone(&seen);
    dispatcher.add(Shortcut::new(["?", "h"], move |_: &KeyStroke| sink.borrow_mut().push("help".into())));
    let sink = Rc::clone(&seen);
    dispatcher.add(Shortcut::new(["Escape"], move |e: &KeyStroke| sink.borrow_mut().push(format!("log:{}", e.key()))));

    assert_eq!(dispatcher.dispatch(&KeyStroke::new("Escape")), 2);
    assert_eq!(dispatcher.dispatch(&KeyStroke::new("h")), 1);
    assert_eq!(dispatcher.dispatch(&KeyStroke::new("x")), 0);
    assert_eq!(*seen.borrow(), vec!["close", "log:Escape", "help"]);
}

#[test]
fn dispatch_applies_prevent_and_stop_flags() {
    let mut dispatcher = ShortcutDispatcher::new();
    dispatcher.add(Shortcut::new(["s"], |_: &KeyStroke| {}).with_prevent(true));
    dispatcher.add(Shortcut::new(["Escape"], |_: &KeyStroke| {}).with_stop(true));

    let save = KeyStroke::new("s");
    dispatcher.dispatch(&save);
    assert!(save.is_prevented());
    assert!(!save.is_stopped());

    let escape = KeyStroke::new("Escape");
    dispatcher.dispatch(&escape);
    assert!(!escape.is_prevented());
    assert!(escape.is_stopped());
}

#[test]
fn flags_are_set_before_callback_runs() {
    let observed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);
    let mut dispatcher = ShortcutDispatcher::new();
    dispatcher.add(
        Shortcut::new(["Enter"], move |e: &KeyStroke| *sink.borrow_mut() = Some(e.is_prevented())).with_prevent(true),
    );
    dispatcher.dispatch(&KeyStroke::new("Enter"));
    assert_eq!(*observed.borrow(), Some(true));
}

#[test]
fn unmatched_events_are_left_untouched() {
    let mut dispatcher = ShortcutDispatcher::new();
    dispatcher.add(Shortcut::new(["s"], |_: &KeyStroke| {}).with_prevent(true).with_stop(true));
    let other = KeyStroke::new("a");
    dispatcher.dispatch(&other);
    assert!(!other.is_prevented());
    assert!(!other.is_stopped());
}

// =============================================================
// ShortcutListener (native)
// =============================================================

#[test]
fn listener_dispatches_synthetic_events() {
    let seen = recorder();
    let sink = Rc::clone(&seen);
    let mut listener = ShortcutListener::bind(ShortcutDispatcher::new());
    assert!(listener.add(Shortcut::new(["k"], move |e: &KeyStroke| sink.borrow_mut().push(e.key()))));
    assert_eq!(listener.dispatch(&KeyStroke::new("k")), 1);
    assert!(!listener.is_bound());
    listener.release();
    listener.release();
    assert_eq!(*seen.borrow(), vec!["k"]);
}
