//! Utility helpers shared across the crate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate encoding, loose JSON coercion, and browser storage
//! from the state modules to improve reuse and testability.

pub mod codec;
pub mod json;
pub mod storage;
