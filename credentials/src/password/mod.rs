pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::HashAlgorithm;
pub use hasher::PasswordHasher;
pub use hasher::BCRYPT_MAX_PASSWORD_BYTES;
pub use hasher::DEFAULT_COST;
