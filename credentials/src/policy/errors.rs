use thiserror::Error;

/// A password failed one or more strength rules.
///
/// Carries every violation message, in rule order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Password does not meet requirements: {}", .errors.join("; "))]
pub struct PolicyViolation {
    errors: Vec<String>,
}

impl PolicyViolation {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Violation messages in rule order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
