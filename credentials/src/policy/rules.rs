use std::fmt;

/// Characters accepted by the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A single password strength requirement.
///
/// The `Display` output is the user-facing violation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    NotEmpty,
    MinLength(usize),
    MaxLength(usize),
    MaxBytes(usize),
    Uppercase,
    Lowercase,
    Digit,
    SpecialCharacter,
}

impl PasswordRule {
    /// Check whether a password satisfies this rule.
    ///
    /// Lengths are counted in characters, except `MaxBytes` which counts
    /// UTF-8 bytes.
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        match self {
            PasswordRule::NotEmpty => !password.trim().is_empty(),
            PasswordRule::MinLength(min) => password.chars().count() >= *min,
            PasswordRule::MaxLength(max) => password.chars().count() <= *max,
            PasswordRule::MaxBytes(max) => password.len() <= *max,
            PasswordRule::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::Digit => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::SpecialCharacter => {
                password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
            }
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordRule::NotEmpty => write!(f, "Password cannot be empty"),
            PasswordRule::MinLength(min) => {
                write!(f, "Password must be at least {} characters long", min)
            }
            PasswordRule::MaxLength(max) => {
                write!(f, "Password cannot be longer than {} characters", max)
            }
            PasswordRule::MaxBytes(max) => {
                write!(f, "Password cannot be longer than {} bytes", max)
            }
            PasswordRule::Uppercase => {
                write!(f, "Password must contain at least one uppercase letter")
            }
            PasswordRule::Lowercase => {
                write!(f, "Password must contain at least one lowercase letter")
            }
            PasswordRule::Digit => write!(f, "Password must contain at least one number"),
            PasswordRule::SpecialCharacter => {
                write!(f, "Password must contain at least one special character")
            }
        }
    }
}
