//! Keys identifying side-effecting operations that must run once

use std::fmt;

/// Key for an operation that must not be repeated
///
/// Operations with the same name and parameters produce equal keys, so a
/// second request for the same work can be recognised and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    #[must_use]
    pub fn new(operation: &str, params: &[&str]) -> Self {
        Self(format!("{}:{}", operation, params.join(":")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
