//! Repository traits for the data access layer
//!
//! This module defines the repository interfaces that services use to interact
//! with storage. Storage backends implement [`AccountRepository`] plus the
//! provider traits; services stay generic over the implementation.
//!
//! Each mutating call is atomic per record. Concurrent read-modify-commit
//! sequences against the same account are last-write-wins unless the backend
//! provides row-level locking.

pub mod adapter;

pub use adapter::AccountRepositoryAdapter;

use async_trait::async_trait;

use crate::{Account, AccountId, Error, account::NewAccount};

/// Repository for account data access
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account. The backend stamps `created_at`/`updated_at`
    /// and enforces the email/nickname uniqueness constraints.
    async fn create(&self, account: NewAccount) -> Result<Account, Error>;

    /// Find an account by ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    /// Find an account by nickname
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, Error>;

    /// Commit a full account snapshot, replacing the stored record.
    ///
    /// Returns the committed snapshot with a fresh `updated_at`.
    async fn update(&self, account: &Account) -> Result<Account, Error>;

    /// Delete an account by ID. Returns whether a record was removed.
    async fn delete(&self, id: &AccountId) -> Result<bool, Error>;

    /// Total number of accounts in the store
    async fn count(&self) -> Result<i64, Error>;

    /// List accounts ordered by creation time
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error>;
}

/// Provider trait for account repository access.
pub trait AccountRepositoryProvider: Send + Sync + 'static {
    /// The account repository implementation type
    type AccountRepo: AccountRepository;

    /// Get the account repository
    fn account(&self) -> &Self::AccountRepo;
}

/// Provider trait that storage implementations must implement, combining
/// repository access with lifecycle methods.
///
/// # Implementing a Custom Storage Backend
///
/// ```rust,ignore
/// use monban_core::repositories::*;
///
/// struct MyStorage { /* ... */ }
///
/// impl AccountRepositoryProvider for MyStorage {
///     type AccountRepo = MyAccountRepository;
///     fn account(&self) -> &Self::AccountRepo { &self.account_repo }
/// }
///
/// #[async_trait]
/// impl RepositoryProvider for MyStorage {
///     async fn migrate(&self) -> Result<(), Error> { /* ... */ }
///     async fn health_check(&self) -> Result<(), Error> { /* ... */ }
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: AccountRepositoryProvider {
    /// Run migrations for all repositories
    async fn migrate(&self) -> Result<(), Error>;

    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
