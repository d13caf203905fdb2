//! Credential handling library
//!
//! Provides the security-sensitive core of account management:
//! - Password hashing (bcrypt by default, Argon2id optional)
//! - Password strength validation
//! - Authentication decisions over stored hashes
//!
//! Everything here is synchronous and stateless. Hashing is deliberately
//! CPU-bound and slow, so async callers should run it on a blocking pool.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::{HashAlgorithm, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Password Policy
//! ```
//! use credentials::PasswordPolicy;
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.validate("Abcdef1!").is_valid());
//!
//! let result = policy.validate("abcdefgh");
//! assert_eq!(result.errors().len(), 3);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use credentials::{AuthenticationError, Authenticator, HashAlgorithm, PasswordHasher, PasswordPolicy};
//!
//! let hasher = PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 4).unwrap();
//! let authenticator = Authenticator::new(hasher);
//!
//! // Register: check strength, then hash
//! PasswordPolicy::new().validate("Password1!").into_result().unwrap();
//! let stored_hash = hasher.hash("Password1!").unwrap();
//!
//! // Login: decide against the stored hash
//! let ok = authenticator
//!     .authenticate(Some("alice@example.com"), Some("Password1!"), Some(&stored_hash))
//!     .unwrap();
//! assert!(ok);
//!
//! let err = authenticator
//!     .authenticate(Some("alice@example.com"), Some("guess"), Some(&stored_hash))
//!     .unwrap_err();
//! assert_eq!(err, AuthenticationError::Rejected);
//! ```

pub mod authenticator;
pub mod password;
pub mod policy;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::HashAlgorithm;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use policy::PasswordPolicy;
pub use policy::PolicyViolation;
pub use policy::ValidationResult;
