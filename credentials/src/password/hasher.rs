use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use serde::Deserialize;

use super::errors::PasswordError;

/// Work factor used when no cost is configured (2^12 bcrypt rounds).
pub const DEFAULT_COST: u32 = 12;

/// Smallest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Largest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Longest password bcrypt reads in full; it ignores anything past this.
pub const BCRYPT_MAX_PASSWORD_BYTES: usize = 72;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];
const ARGON2_PREFIX: &str = "$argon2";

/// Adaptive hashing scheme used for new password hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// bcrypt, modular crypt format (`$2b$<cost>$<salt><digest>`).
    #[default]
    Bcrypt,
    /// Argon2id, PHC string format (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<digest>`).
    Argon2id,
}

impl HashAlgorithm {
    /// Identify the scheme that produced an encoded hash.
    ///
    /// Every Argon2 variant (`$argon2i$`, `$argon2d$`, `$argon2id$`) is
    /// reported as `Argon2id`; verification reads the actual variant from
    /// the PHC string.
    ///
    /// # Returns
    /// The matching algorithm, or None for unknown formats
    pub fn detect(hash: &str) -> Option<Self> {
        if BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix)) {
            Some(HashAlgorithm::Bcrypt)
        } else if hash.starts_with(ARGON2_PREFIX) {
            Some(HashAlgorithm::Argon2id)
        } else {
            None
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Bcrypt => f.write_str("bcrypt"),
            HashAlgorithm::Argon2id => f.write_str("argon2id"),
        }
    }
}

/// Password hashing implementation.
///
/// Produces self-describing hashes: the algorithm, work factor and salt are
/// encoded in the returned string, so verification needs nothing else.
/// Verification picks the scheme from the hash itself, which keeps hashes
/// written under an earlier algorithm or cost verifiable after a change.
///
/// bcrypt reads at most 72 bytes of a password, so longer passwords are
/// refused outright instead of being silently truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    algorithm: HashAlgorithm,
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher using bcrypt with cost 12
    pub fn new() -> Self {
        Self {
            algorithm: HashAlgorithm::Bcrypt,
            cost: DEFAULT_COST,
        }
    }

    /// Create a password hasher for a specific algorithm and work factor.
    ///
    /// The cost applies to bcrypt only; Argon2id uses the library's
    /// recommended parameters.
    ///
    /// # Arguments
    /// * `algorithm` - Scheme used for new hashes
    /// * `cost` - bcrypt work factor (log2 of the number of rounds)
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Cost outside the range bcrypt accepts
    pub fn with_algorithm(algorithm: HashAlgorithm, cost: u32) -> Result<Self, PasswordError> {
        if algorithm == HashAlgorithm::Bcrypt && !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidConfiguration(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }

        Ok(Self { algorithm, cost })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// bcrypt work factor. Meaningless for Argon2id, which always uses the
    /// library's default parameters.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded hash (includes algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or whitespace only
    /// * `TooLong` - bcrypt password longer than 72 bytes
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.trim().is_empty() {
            return Err(PasswordError::InvalidInput);
        }

        match self.algorithm {
            HashAlgorithm::Bcrypt => {
                if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
                    return Err(PasswordError::TooLong {
                        max_bytes: BCRYPT_MAX_PASSWORD_BYTES,
                    });
                }

                bcrypt::non_truncating_hash(password, self.cost)
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
            HashAlgorithm::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);

                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// Never fails: malformed or unrecognised hashes simply do not verify,
    /// and neither does a password longer than bcrypt can read.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match HashAlgorithm::detect(hash) {
            Some(HashAlgorithm::Bcrypt) => {
                if password.len() > BCRYPT_MAX_PASSWORD_BYTES {
                    return false;
                }

                bcrypt::non_truncating_verify(password, hash).unwrap_or_else(|e| {
                    tracing::debug!(error = %e, "bcrypt verification failed");
                    false
                })
            }
            Some(HashAlgorithm::Argon2id) => match PasswordHash::new(hash) {
                Ok(parsed_hash) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
                Err(e) => {
                    tracing::debug!(error = %e, "Malformed argon2 hash");
                    false
                }
            },
            None => {
                tracing::debug!("Unrecognised password hash format");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use argon2::Algorithm;
    use argon2::Params;
    use argon2::Version;

    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, MIN_COST).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_default_hash_is_self_describing() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("Abcdef1!").expect("Failed to hash password");

        assert!(hash.starts_with("$2b$12$"));
        assert_eq!(hash.len(), 60);
        assert!(hasher.verify("Abcdef1!", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = fast_hasher();

        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same password", &first));
        assert!(hasher.verify("same password", &second));
    }

    #[test]
    fn test_hash_rejects_empty_and_blank_passwords() {
        let hasher = fast_hasher();

        assert_eq!(hasher.hash(""), Err(PasswordError::InvalidInput));
        assert_eq!(hasher.hash("   \t\n"), Err(PasswordError::InvalidInput));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$2b$04$tooshort"));
        assert!(!hasher.verify("password", "$argon2id$garbage"));
    }

    #[test]
    fn test_bcrypt_rejects_passwords_past_72_bytes() {
        let hasher = fast_hasher();
        let prefix = format!("Aa1!{}", "x".repeat(68));
        let first = format!("{}TailOne", prefix);
        let second = format!("{}TotallyDifferentTail", prefix);

        assert_eq!(prefix.len(), BCRYPT_MAX_PASSWORD_BYTES);
        assert_eq!(
            hasher.hash(&second),
            Err(PasswordError::TooLong { max_bytes: 72 })
        );

        let prefix_hash = hasher.hash(&prefix).unwrap();
        assert!(hasher.verify(&prefix, &prefix_hash));
        assert!(!hasher.verify(&first, &prefix_hash));
        assert!(!hasher.verify(&second, &prefix_hash));
    }

    #[test]
    fn test_bcrypt_byte_limit_counts_multibyte_characters() {
        let hasher = fast_hasher();
        // 24 three-byte characters fill the 72 bytes
        let prefix = "\u{20AC}".repeat(24);

        let prefix_hash = hasher.hash(&prefix).unwrap();

        assert!(!hasher.verify(&format!("{}Aa1!", prefix), &prefix_hash));
        assert!(matches!(
            hasher.hash(&format!("{}Aa1!", prefix)),
            Err(PasswordError::TooLong { .. })
        ));
    }

    #[test]
    fn test_argon2_accepts_long_passwords() {
        let hasher = PasswordHasher::with_algorithm(HashAlgorithm::Argon2id, DEFAULT_COST).unwrap();
        let prefix = "x".repeat(80);
        let first = format!("{}TailOne", prefix);
        let second = format!("{}TotallyDifferentTail", prefix);

        let hash = hasher.hash(&second).unwrap();

        assert!(hasher.verify(&second, &hash));
        assert!(!hasher.verify(&first, &hash));
    }

    #[test]
    fn test_verify_other_argon2_variants() {
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, Params::default());
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2i
            .hash_password(b"legacy password", &salt)
            .unwrap()
            .to_string();

        assert!(hash.starts_with("$argon2i$"));
        assert_eq!(HashAlgorithm::detect(&hash), Some(HashAlgorithm::Argon2id));
        assert!(fast_hasher().verify("legacy password", &hash));
        assert!(!fast_hasher().verify("other password", &hash));
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let hasher = PasswordHasher::with_algorithm(HashAlgorithm::Argon2id, DEFAULT_COST).unwrap();

        let hash = hasher.hash("my_password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("my_password", &hash));
        assert!(!hasher.verify("other_password", &hash));
    }

    #[test]
    fn test_verify_across_algorithms_and_costs() {
        let argon2 = PasswordHasher::with_algorithm(HashAlgorithm::Argon2id, DEFAULT_COST).unwrap();
        let bcrypt_low = fast_hasher();
        let bcrypt_higher = PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 5).unwrap();

        let argon2_hash = argon2.hash("rotate me").unwrap();
        let bcrypt_hash = bcrypt_low.hash("rotate me").unwrap();

        assert!(bcrypt_higher.verify("rotate me", &argon2_hash));
        assert!(bcrypt_higher.verify("rotate me", &bcrypt_hash));
        assert!(argon2.verify("rotate me", &bcrypt_hash));
    }

    #[test]
    fn test_with_algorithm_rejects_out_of_range_cost() {
        assert!(matches!(
            PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 3),
            Err(PasswordError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            PasswordHasher::with_algorithm(HashAlgorithm::Bcrypt, 32),
            Err(PasswordError::InvalidConfiguration(_))
        ));
        assert!(PasswordHasher::with_algorithm(HashAlgorithm::Argon2id, 0).is_ok());
    }

    #[test]
    fn test_detect_algorithm() {
        assert_eq!(
            HashAlgorithm::detect("$2y$10$abcdefghijklmnopqrstuv"),
            Some(HashAlgorithm::Bcrypt)
        );
        assert_eq!(
            HashAlgorithm::detect("$argon2i$v=19$m=4096,t=3,p=1$c2FsdA$ZGlnZXN0"),
            Some(HashAlgorithm::Argon2id)
        );
        assert_eq!(HashAlgorithm::detect("5f4dcc3b5aa765d61d8327deb882cf99"), None);
    }

    #[test]
    fn test_concurrent_hash_and_verify() {
        let hasher = fast_hasher();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let password = format!("password-{}", i);
                    let hash = hasher.hash(&password).unwrap();
                    (password, hash)
                })
            })
            .collect();

        let results: Vec<(String, String)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (i, (password, hash)) in results.iter().enumerate() {
            assert!(hasher.verify(password, hash));
            let (other_password, _) = &results[(i + 1) % results.len()];
            assert!(!hasher.verify(other_password, hash));
        }
    }
}
