pub mod errors;
pub mod rules;
pub mod validator;

pub use errors::PolicyViolation;
pub use rules::PasswordRule;
pub use validator::PasswordPolicy;
pub use validator::ValidationResult;
