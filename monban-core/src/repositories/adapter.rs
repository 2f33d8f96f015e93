use crate::{
    Account, AccountId, Error,
    account::NewAccount,
    repositories::{AccountRepository, AccountRepositoryProvider, RepositoryProvider},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Adapter that wraps a [`RepositoryProvider`] and implements the individual
/// repository traits, so services can be constructed from a shared provider.
pub struct AccountRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AccountRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AccountRepository for AccountRepositoryAdapter<R> {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        self.provider.account().create(account).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_email(email).await
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_nickname(nickname).await
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        self.provider.account().update(account).await
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, Error> {
        self.provider.account().delete(id).await
    }

    async fn count(&self) -> Result<i64, Error> {
        self.provider.account().count().await
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, Error> {
        self.provider.account().list(offset, limit).await
    }
}
