//! Shared integration test helpers for par-tint.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::session_with_rules;
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#![allow(dead_code)]` suppresses
//! warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use par_tint::highlight::DEFAULT_MARKER;
use par_tint::session::Session;

/// Session writing into a `Vec<u8>` with exactly the given rules active
/// (the built-in default marker rule is removed for deterministic output).
pub fn session_with_rules(rules: &[(&str, &str)]) -> Session<Vec<u8>> {
    session_with_capacity(par_tint::INPUT_MAX, rules)
}

/// Same, with a custom buffer capacity for overflow-failsafe tests.
pub fn session_with_capacity(capacity: usize, rules: &[(&str, &str)]) -> Session<Vec<u8>> {
    let mut session = Session::with_capacity(capacity, Vec::new());
    session.unregister_rule(DEFAULT_MARKER);
    for (pattern, style) in rules {
        session.register_rule(pattern, style);
    }
    session
}
