use crate::password::PasswordHasher;

/// Authentication decision over a stored password hash.
///
/// Stateless: each call depends only on its arguments, so one instance can
/// be shared freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
}

/// Authentication operation errors.
///
/// Both variants render to the same public message; the variant itself is
/// kept for server-side diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// Identity, password or stored hash was missing.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password does not match the stored hash.
    #[error("Invalid username or password")]
    Rejected,
}

impl AuthenticationError {
    pub const PUBLIC_MESSAGE: &'static str = "Invalid username or password";

    /// Message safe to return to the client, identical for every variant.
    pub fn public_message(&self) -> &'static str {
        Self::PUBLIC_MESSAGE
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher used to check candidate passwords
    pub fn new(password_hasher: PasswordHasher) -> Self {
        Self { password_hasher }
    }

    /// Decide whether a login attempt proves knowledge of the password.
    ///
    /// Never returns `Ok(false)`: the absence of an error is the only
    /// success signal.
    ///
    /// # Arguments
    /// * `identity` - Login key the attempt claims
    /// * `password` - Plaintext password submitted
    /// * `stored_hash` - Hash stored for the identity
    ///
    /// # Returns
    /// `true` when the password matches the stored hash
    ///
    /// # Errors
    /// * `InvalidCredentials` - An argument is missing
    /// * `Rejected` - Password does not match
    pub fn authenticate(
        &self,
        identity: Option<&str>,
        password: Option<&str>,
        stored_hash: Option<&str>,
    ) -> Result<bool, AuthenticationError> {
        let (Some(_), Some(password), Some(stored_hash)) = (identity, password, stored_hash) else {
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::Rejected);
        }

        Ok(true)
    }
}
