use super::errors::PolicyViolation;
use super::rules::PasswordRule;
use crate::password::BCRYPT_MAX_PASSWORD_BYTES;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 128;
/// Anything longer would be truncated by bcrypt.
pub const MAX_BYTES: usize = BCRYPT_MAX_PASSWORD_BYTES;

/// Outcome of evaluating a password against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<PasswordRule>,
}

impl ValidationResult {
    /// True when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violated rules, in evaluation order.
    pub fn violations(&self) -> &[PasswordRule] {
        &self.violations
    }

    /// Human-readable violation messages, in evaluation order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Convert into a `Result`, keeping every violation on failure.
    ///
    /// # Errors
    /// * `PolicyViolation` - At least one rule was violated
    pub fn into_result(self) -> Result<(), PolicyViolation> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PolicyViolation::new(self.errors()))
        }
    }
}

/// Password strength policy.
///
/// Stateless; evaluation depends only on the candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
    max_bytes: usize,
}

impl PasswordPolicy {
    /// Create the policy with the standard 8-128 character bounds and the
    /// 72-byte bcrypt limit.
    pub fn new() -> Self {
        Self {
            min_length: MIN_LENGTH,
            max_length: MAX_LENGTH,
            max_bytes: MAX_BYTES,
        }
    }

    fn rules(&self) -> [PasswordRule; 7] {
        [
            PasswordRule::MinLength(self.min_length),
            PasswordRule::MaxLength(self.max_length),
            PasswordRule::MaxBytes(self.max_bytes),
            PasswordRule::Uppercase,
            PasswordRule::Lowercase,
            PasswordRule::Digit,
            PasswordRule::SpecialCharacter,
        ]
    }

    /// Evaluate a candidate password.
    ///
    /// An empty or whitespace-only password reports only the empty-password
    /// violation. Otherwise every rule is checked and all failures are
    /// collected.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    ///
    /// # Returns
    /// ValidationResult listing violated rules in evaluation order
    pub fn validate(&self, password: &str) -> ValidationResult {
        if !PasswordRule::NotEmpty.is_satisfied_by(password) {
            return ValidationResult {
                violations: vec![PasswordRule::NotEmpty],
            };
        }

        let violations = self
            .rules()
            .into_iter()
            .filter(|rule| !rule.is_satisfied_by(password))
            .collect();

        ValidationResult { violations }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}
