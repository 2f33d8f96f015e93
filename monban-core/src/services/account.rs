//! Account lookups and profile management

use crate::{
    Account, AccountId, Error,
    account::ProfileUpdate,
    error::AuthError,
    repositories::AccountRepository,
    services::password::hash_password,
    validation::validate_profile_update,
};
use chrono::Utc;
use std::sync::Arc;

/// Service for account management operations
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new AccountService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &AccountId) -> Result<Option<Account>, Error> {
        self.repository.find_by_id(account_id).await
    }

    /// Get an account by email
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.repository.find_by_email(email).await
    }

    /// Get an account by nickname
    pub async fn get_account_by_nickname(&self, nickname: &str) -> Result<Option<Account>, Error> {
        self.repository.find_by_nickname(nickname).await
    }

    /// Apply a partial profile update.
    ///
    /// All-or-nothing: validation covers every supplied field before the
    /// snapshot is touched, so an invalid URL in one field leaves the whole
    /// record unchanged. A supplied password is hashed before storage.
    pub async fn update_profile(
        &self,
        account_id: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, Error> {
        validate_profile_update(&update)?;

        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(Error::Auth(AuthError::AccountNotFound))?;

        let mut next = account.clone();
        if let Some(first_name) = update.first_name {
            next.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            next.last_name = Some(last_name);
        }
        if let Some(bio) = update.bio {
            next.bio = Some(bio);
        }
        if let Some(url) = update.profile_picture_url {
            next.profile_picture_url = Some(url);
        }
        if let Some(url) = update.linkedin_profile_url {
            next.linkedin_profile_url = Some(url);
        }
        if let Some(url) = update.github_profile_url {
            next.github_profile_url = Some(url);
        }
        if let Some(password) = update.password {
            next.hashed_password = hash_password(&password)?;
        }

        let updated = self.repository.update(&next).await?;
        tracing::info!(account_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    /// Set an account's professional status.
    ///
    /// The status stamp refreshes on every call, including when the incoming
    /// value equals the current one.
    pub async fn set_professional_status(
        &self,
        account_id: &AccountId,
        is_professional: bool,
    ) -> Result<Account, Error> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(Error::Auth(AuthError::AccountNotFound))?;

        let mut next = account.clone();
        next.is_professional = is_professional;
        next.professional_status_updated_at = Some(Utc::now());

        let updated = self.repository.update(&next).await?;
        tracing::info!(
            account_id = %updated.id,
            is_professional,
            "Professional status updated"
        );
        Ok(updated)
    }

    /// Delete an account. Returns whether a record was removed.
    pub async fn delete_account(&self, account_id: &AccountId) -> Result<bool, Error> {
        let deleted = self.repository.delete(account_id).await?;
        if deleted {
            tracing::info!(account_id = %account_id, "Account deleted");
        }
        Ok(deleted)
    }

    /// List accounts ordered by creation time
    pub async fn list_accounts(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error> {
        self.repository.list(offset, limit).await
    }

    /// Total number of accounts
    pub async fn count_accounts(&self) -> Result<i64, Error> {
        self.repository.count().await
    }

    /// Whether the account behind an email is currently locked.
    ///
    /// Unknown emails report unlocked rather than an error, so this helper
    /// cannot be used to probe which addresses are registered.
    pub async fn is_account_locked(&self, email: &str) -> Result<bool, Error> {
        Ok(self
            .repository
            .find_by_email(email)
            .await?
            .is_some_and(|account| account.is_locked))
    }
}
