//! In-memory fakes shared by the service unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    Account, AccountId, Error,
    account::NewAccount,
    error::StorageError,
    repositories::AccountRepository,
    services::Notifier,
};

/// In-memory account repository with the same observable behavior as a real
/// backend: uniqueness constraints, `updated_at` stamping, insertion order.
#[derive(Default)]
pub(crate) struct MemoryAccountRepository {
    pub(crate) accounts: Arc<Mutex<Vec<Account>>>,
}

impl MemoryAccountRepository {
    /// Insert an account snapshot directly, bypassing the create contract.
    pub(crate) async fn seed(&self, account: Account) {
        self.accounts.lock().await.push(account);
    }

    pub(crate) async fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts
            .lock()
            .await
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, Error> {
        let mut accounts = self.accounts.lock().await;

        if accounts.iter().any(|a| a.email == new_account.email) {
            return Err(Error::Storage(StorageError::Constraint(
                "accounts.email".to_string(),
            )));
        }
        if accounts.iter().any(|a| a.nickname == new_account.nickname) {
            return Err(Error::Storage(StorageError::Constraint(
                "accounts.nickname".to_string(),
            )));
        }

        let now = Utc::now();
        let account = Account {
            id: new_account.id,
            email: new_account.email,
            nickname: new_account.nickname,
            hashed_password: new_account.hashed_password,
            role: new_account.role,
            email_verified: new_account.email_verified,
            verification_token: new_account.verification_token,
            is_locked: false,
            failed_login_attempts: 0,
            last_login_at: None,
            is_professional: false,
            professional_status_updated_at: None,
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            bio: new_account.bio,
            profile_picture_url: new_account.profile_picture_url,
            linkedin_profile_url: new_account.linkedin_profile_url,
            github_profile_url: new_account.github_profile_url,
            created_at: now,
            updated_at: now,
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, Error> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|a| a.nickname == nickname)
            .cloned())
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let mut accounts = self.accounts.lock().await;
        let slot = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or(Error::Storage(StorageError::NotFound))?;

        let mut committed = account.clone();
        committed.updated_at = Utc::now();
        *slot = committed.clone();
        Ok(committed)
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, Error> {
        let mut accounts = self.accounts.lock().await;
        let before = accounts.len();
        accounts.retain(|a| &a.id != id);
        Ok(accounts.len() < before)
    }

    async fn count(&self) -> Result<i64, Error> {
        Ok(self.accounts.lock().await.len() as i64)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Notifier that records every send so tests can assert on delivery.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub(crate) sent: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_verification_email(&self, account: &Account) -> Result<(), Error> {
        self.sent
            .lock()
            .await
            .push((account.email.clone(), account.verification_token.clone()));
        Ok(())
    }
}

/// Notifier whose sends always fail, for exercising the fire-and-forget path.
#[derive(Default)]
pub(crate) struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_verification_email(&self, _account: &Account) -> Result<(), Error> {
        Err(Error::Storage(StorageError::Connection(
            "smtp unreachable".to_string(),
        )))
    }
}

/// Build a verified, unlocked account with the given email and password hash.
pub(crate) fn verified_account(email: &str, nickname: &str, hashed_password: String) -> Account {
    let mut account = Account::builder()
        .email(email.to_string())
        .nickname(nickname.to_string())
        .hashed_password(hashed_password)
        .role(crate::AccountRole::Authenticated)
        .email_verified(true)
        .build()
        .unwrap();
    account.verification_token = None;
    account
}
