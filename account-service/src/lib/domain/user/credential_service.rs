use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use credentials::Authenticator;
use credentials::PasswordError;
use credentials::PasswordHasher;
use credentials::PasswordPolicy;
use credentials::ValidationResult;
use tokio::sync::OnceCell;
use tokio::sync::Semaphore;

use crate::config::PasswordConfig;
use crate::user::errors::UserError;

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Async front for the credential library.
///
/// Hashing and verification are CPU-bound, so they run on tokio's blocking
/// pool. A semaphore caps how many run at once, defaulting to the number of
/// available cores.
#[derive(Debug, Clone)]
pub struct CredentialService {
    password_hasher: PasswordHasher,
    password_policy: PasswordPolicy,
    authenticator: Authenticator,
    permits: Arc<Semaphore>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl CredentialService {
    /// Create a credential service.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher for new hashes and for verification
    /// * `max_concurrent_hashes` - Upper bound on simultaneous hash/verify calls
    pub fn new(password_hasher: PasswordHasher, max_concurrent_hashes: usize) -> Self {
        Self {
            password_hasher,
            password_policy: PasswordPolicy::new(),
            authenticator: Authenticator::new(password_hasher),
            permits: Arc::new(Semaphore::new(max_concurrent_hashes.max(1))),
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Build from the `[password]` configuration section.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Cost outside the accepted range
    pub fn from_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::with_algorithm(config.algorithm, config.cost)?;
        let max_concurrent_hashes = config
            .max_concurrent_hashes
            .unwrap_or_else(available_cores);

        Ok(Self::new(password_hasher, max_concurrent_hashes))
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    /// Evaluate a password against the strength policy.
    pub fn validate(&self, password: &str) -> ValidationResult {
        self.password_policy.validate(password)
    }

    /// Hash a password on the blocking pool.
    ///
    /// # Errors
    /// * `Password` - Empty password or hashing failure
    /// * `Unknown` - Blocking task could not run
    pub async fn hash(&self, password: String) -> Result<String, UserError> {
        let hasher = self.password_hasher;

        self.run_blocking(move || hasher.hash(&password))
            .await?
            .map_err(UserError::from)
    }

    /// Run the authentication decision on the blocking pool.
    ///
    /// # Errors
    /// * `Authentication` - Missing argument or password mismatch
    /// * `Unknown` - Blocking task could not run
    pub async fn authenticate(
        &self,
        identity: Option<String>,
        password: Option<String>,
        stored_hash: Option<String>,
    ) -> Result<bool, UserError> {
        let authenticator = self.authenticator;

        self.run_blocking(move || {
            authenticator.authenticate(
                identity.as_deref(),
                password.as_deref(),
                stored_hash.as_deref(),
            )
        })
        .await?
        .map_err(UserError::from)
    }

    /// Spend one verification on a decoy hash.
    ///
    /// Called when a login names an unknown identity, so the response takes
    /// as long as a wrong password for a known one. The decoy is hashed
    /// with the configured algorithm on first use. Nothing is verified when
    /// no password was submitted, matching the known-identity path.
    ///
    /// # Errors
    /// * `Password` - Decoy hash could not be created
    /// * `Unknown` - Blocking task could not run
    pub async fn verify_unknown_identity(&self, password: Option<String>) -> Result<(), UserError> {
        let Some(password) = password else {
            return Ok(());
        };

        let hasher = self.password_hasher;
        let decoy_hash = self
            .decoy_hash
            .get_or_try_init(|| self.hash(DECOY_PASSWORD.to_string()))
            .await?
            .clone();

        self.run_blocking(move || hasher.verify(&password, &decoy_hash))
            .await?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn decoy_hash(&self) -> Option<&str> {
        self.decoy_hash.get().map(String::as_str)
    }

    async fn run_blocking<T, F>(&self, task: F) -> Result<T, UserError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing pool closed: {}", e)))?;

        tokio::task::spawn_blocking(task)
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))
    }
}

fn available_cores() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
