use std::cell::Cell;
use std::rc::Rc;

use super::*;

// =============================================================
// MediaState
// =============================================================

#[test]
fn state_starts_matching() {
    assert!(MediaState::new().matches());
}

#[test]
fn update_reports_only_real_changes() {
    let mut state = MediaState::new();
    assert!(!state.update(true));
    assert!(state.update(false));
    assert!(!state.matches());
    assert!(!state.update(false));
    assert!(state.update(true));
}

// =============================================================
// MediaQuery (native)
// =============================================================

#[test]
fn native_observer_reports_matching_and_never_fires() {
    let fired = Rc::new(Cell::new(0));
    let sink = Rc::clone(&fired);
    let media = MediaQuery::observe("(min-width: 640px)", move |_| sink.set(sink.get() + 1));
    assert!(media.matches());
    assert_eq!(media.query(), "(min-width: 640px)");
    assert!(!media.is_bound());
    drop(media);
    assert_eq!(fired.get(), 0);
}

#[test]
fn release_can_be_called_repeatedly() {
    let mut media = MediaQuery::observe("print", |_| {});
    media.release();
    media.release();
    assert!(!media.is_bound());
}
