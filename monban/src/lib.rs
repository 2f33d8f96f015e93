//! # Monban
//!
//! Monban (門番, "gatekeeper") is an account lifecycle library for Rust
//! applications: registration with first-account admin bootstrap, login with
//! brute-force lockout, email verification, password reset, administrative
//! unlock, and profile management, all over a storage backend you own.
//!
//! Monban sits between your HTTP handlers and your database. It owns the
//! business rules of the account state machine; routing, authorization
//! middleware, and email transport stay in your application.
//!
//! ## Storage Support
//!
//! Monban currently ships a SQLite backend; any store can be plugged in by
//! implementing [`monban_core::repositories::AccountRepository`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use monban::{LockoutConfig, Monban, Registration};
//! use monban::sqlite::SqliteRepositoryProvider;
//! use chrono::Duration;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = sqlx::SqlitePool::connect("sqlite::memory:").await?;
//!     let repositories = Arc::new(SqliteRepositoryProvider::new(pool));
//!
//!     let monban = Monban::new(repositories).with_lockout_config(
//!         LockoutConfig::default()
//!             .with_max_login_attempts(5)
//!             .with_lockout_window(Duration::hours(24)),
//!     );
//!     monban.migrate().await?;
//!
//!     let account = monban
//!         .register(Registration::new("user@example.com", "correct horse battery"))
//!         .await?;
//!     println!("registered {}", account.id);
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use monban_core::{
    repositories::{AccountRepositoryAdapter, RepositoryProvider},
    services::{
        AccountService, Notifier, PasswordService, RegistrationService, VerificationService,
    },
};

/// Re-export core types from monban_core
///
/// These types are commonly used when working with the Monban API.
pub use monban_core::{
    Account, AccountId, AccountRole, Error, LockoutConfig, ProfileUpdate, Registration,
};

pub use monban_core::services::{NoopNotifier, TracingNotifier};

/// Re-export storage backends
///
/// Available when the corresponding feature is enabled.
#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use monban_storage_sqlite::{SqliteAccountRepository, SqliteRepositoryProvider};
}

/// The main entry point, wiring every account service over a repository
/// provider.
///
/// `Monban` is cheap to clone-share behind an `Arc` and safe to use from
/// concurrent request handlers; all state lives in the storage backend.
pub struct Monban<R: RepositoryProvider> {
    repositories: Arc<R>,
    notifier: Arc<dyn Notifier>,
    lockout_config: LockoutConfig,
    accounts: AccountService<AccountRepositoryAdapter<R>>,
    registration: RegistrationService<AccountRepositoryAdapter<R>>,
    passwords: PasswordService<AccountRepositoryAdapter<R>>,
    verification: VerificationService<AccountRepositoryAdapter<R>>,
}

impl<R: RepositoryProvider> Monban<R> {
    /// Create a new Monban instance with the default lockout configuration
    /// and a [`TracingNotifier`] that logs verification emails instead of
    /// sending them.
    pub fn new(repositories: Arc<R>) -> Self {
        Self::with_config(
            repositories,
            Arc::new(TracingNotifier),
            LockoutConfig::default(),
        )
    }

    /// Create a new Monban instance with an explicit notifier and lockout
    /// configuration.
    pub fn with_config(
        repositories: Arc<R>,
        notifier: Arc<dyn Notifier>,
        lockout_config: LockoutConfig,
    ) -> Self {
        let repository = Arc::new(AccountRepositoryAdapter::new(repositories.clone()));

        Self {
            accounts: AccountService::new(repository.clone()),
            registration: RegistrationService::new(repository.clone(), notifier.clone()),
            passwords: PasswordService::new(repository.clone(), lockout_config.clone()),
            verification: VerificationService::new(repository),
            repositories,
            notifier,
            lockout_config,
        }
    }

    /// Replace the notifier used for verification emails
    pub fn with_notifier(self, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(self.repositories, notifier, self.lockout_config)
    }

    /// Replace the lockout configuration
    pub fn with_lockout_config(self, lockout_config: LockoutConfig) -> Self {
        Self::with_config(self.repositories, self.notifier, lockout_config)
    }

    /// Run storage migrations
    pub async fn migrate(&self) -> Result<(), Error> {
        self.repositories.migrate().await
    }

    /// Check that the storage backend is reachable
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Register a new account.
    ///
    /// The first account ever created becomes the admin with a pre-verified
    /// email; later accounts start anonymous with a pending verification
    /// token, delivered through the configured notifier.
    pub async fn register(&self, registration: Registration) -> Result<Account, Error> {
        self.registration.register(registration).await
    }

    /// Authenticate with email and password, enforcing the lockout policy.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, Error> {
        self.passwords.authenticate(email, password).await
    }

    /// Verify an account's email with its single-use token.
    pub async fn verify_email(
        &self,
        account_id: &AccountId,
        token: &str,
    ) -> Result<Account, Error> {
        self.verification.verify_email(account_id, token).await
    }

    /// Replace an account's password, clearing any lockout.
    pub async fn reset_password(
        &self,
        account_id: &AccountId,
        new_password: &str,
    ) -> Result<Account, Error> {
        self.passwords.reset_password(account_id, new_password).await
    }

    /// Administratively unlock an account.
    pub async fn unlock_account(&self, account_id: &AccountId) -> Result<Account, Error> {
        self.passwords.unlock_account(account_id).await
    }

    /// Apply a partial profile update.
    pub async fn update_profile(
        &self,
        account_id: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        self.accounts.update_profile(account_id, update).await
    }

    /// Set an account's professional status, refreshing its status stamp.
    pub async fn set_professional_status(
        &self,
        account_id: &AccountId,
        is_professional: bool,
    ) -> Result<Account, Error> {
        self.accounts
            .set_professional_status(account_id, is_professional)
            .await
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>, Error> {
        self.accounts.get_account(account_id).await
    }

    /// Get an account by email
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.accounts.get_account_by_email(email).await
    }

    /// Get an account by nickname
    pub async fn get_account_by_nickname(
        &self,
        nickname: &str,
    ) -> Result<Option<Account>, Error> {
        self.accounts.get_account_by_nickname(nickname).await
    }

    /// Delete an account. Returns whether a record was removed.
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<bool, Error> {
        self.accounts.delete_account(account_id).await
    }

    /// List accounts ordered by creation time
    pub async fn list_accounts(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error> {
        self.accounts.list_accounts(offset, limit).await
    }

    /// Total number of accounts
    pub async fn count_accounts(&self) -> Result<i64, Error> {
        self.accounts.count_accounts().await
    }

    /// Whether the account behind an email is currently locked
    pub async fn is_account_locked(&self, email: &str) -> Result<bool, Error> {
        self.accounts.is_account_locked(email).await
    }
}
