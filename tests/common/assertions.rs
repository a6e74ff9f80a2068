//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating repo-view command output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// The full-page error shown when no repository could be loaded
pub fn no_repository() -> impl Predicate<str> {
    predicates::str::contains("✕ Error:")
        .and(predicates::str::contains("No Git repository found"))
}

pub fn has_branch(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Branch: {name}"))
}

/// A change line, e.g. `M  src/main.rs`
pub fn has_change(status: char, path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{status}  {path}"))
}

pub fn has_section(header: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{header}:"))
}
