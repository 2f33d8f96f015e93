//! SQLite storage backend for monban
//!
//! Persists accounts in a single `accounts` table with UNIQUE constraints on
//! `email` and `nickname`; those constraints, not the services' pre-checks,
//! are what guarantee uniqueness under concurrent writes. Timestamps are
//! stored as unix seconds and roles as their stable TEXT representation.

mod migrations;
pub mod repositories;

pub use repositories::SqliteAccountRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;

use migrations::{CreateAccountsTable, SqliteMigrationManager};
use monban_core::{
    Account, AccountId, Error,
    error::StorageError,
    repositories::{AccountRepositoryProvider, RepositoryProvider},
};
use monban_migration::{Migration, MigrationManager};

/// Row representation of an account in SQLite.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SqliteAccount {
    id: String,
    email: String,
    nickname: String,
    hashed_password: String,
    role: String,
    email_verified: bool,
    verification_token: Option<String>,
    is_locked: bool,
    failed_login_attempts: i64,
    last_login_at: Option<i64>,
    is_professional: bool,
    professional_status_updated_at: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    profile_picture_url: Option<String>,
    linkedin_profile_url: Option<String>,
    github_profile_url: Option<String>,
    created_at: i64,
    updated_at: i64,
}

fn timestamp_to_datetime(secs: i64) -> Result<chrono::DateTime<chrono::Utc>, Error> {
    chrono::DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        Error::Storage(StorageError::Database(format!(
            "Invalid timestamp in accounts row: {secs}"
        )))
    })
}

impl TryFrom<SqliteAccount> for Account {
    type Error = Error;

    fn try_from(row: SqliteAccount) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse()
            .map_err(|e: monban_core::error::ValidationError| {
                Error::Storage(StorageError::Database(e.to_string()))
            })?;

        let failed_login_attempts = u32::try_from(row.failed_login_attempts).map_err(|_| {
            Error::Storage(StorageError::Database(format!(
                "Invalid failed_login_attempts in accounts row: {}",
                row.failed_login_attempts
            )))
        })?;

        Ok(Account {
            id: AccountId::from(row.id),
            email: row.email,
            nickname: row.nickname,
            hashed_password: row.hashed_password,
            role,
            email_verified: row.email_verified,
            verification_token: row.verification_token,
            is_locked: row.is_locked,
            failed_login_attempts,
            last_login_at: row.last_login_at.map(timestamp_to_datetime).transpose()?,
            is_professional: row.is_professional,
            professional_status_updated_at: row
                .professional_status_updated_at
                .map(timestamp_to_datetime)
                .transpose()?,
            first_name: row.first_name,
            last_name: row.last_name,
            bio: row.bio,
            profile_picture_url: row.profile_picture_url,
            linkedin_profile_url: row.linkedin_profile_url,
            github_profile_url: row.github_profile_url,
            created_at: timestamp_to_datetime(row.created_at)?,
            updated_at: timestamp_to_datetime(row.updated_at)?,
        })
    }
}

/// Repository provider backed by a SQLite connection pool.
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    account: SqliteAccountRepository,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            account: SqliteAccountRepository::new(pool.clone()),
            pool,
        }
    }
}

impl AccountRepositoryProvider for SqliteRepositoryProvider {
    type AccountRepo = SqliteAccountRepository;

    fn account(&self) -> &Self::AccountRepo {
        &self.account
    }
}

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        let manager = SqliteMigrationManager::new(self.pool.clone());
        manager
            .initialize()
            .await
            .map_err(|e| Error::Storage(StorageError::Migration(e.to_string())))?;

        let migrations: Vec<Box<dyn Migration<sqlx::Sqlite>>> = vec![Box::new(CreateAccountsTable)];
        manager
            .up(&migrations)
            .await
            .map_err(|e| Error::Storage(StorageError::Migration(e.to_string())))?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Connection(e.to_string())))?;

        Ok(())
    }
}
