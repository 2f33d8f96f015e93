//! Email verification
//!
//! A verification token is single-use: consuming it sets `email_verified`,
//! clears the token, and promotes the account to the authenticated tier in
//! one committed snapshot. A failed comparison mutates nothing, so a token
//! can never be burned by a bad guess.

use crate::{
    Account, AccountId, AccountRole, Error,
    error::AuthError,
    repositories::AccountRepository,
};
use std::sync::Arc;

/// Service for email verification operations
pub struct VerificationService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> VerificationService<R> {
    /// Create a new VerificationService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Verify an account's email with the supplied token.
    ///
    /// The comparison is exact. Once consumed the stored token is `None`, so
    /// replaying the same token fails with [`AuthError::InvalidToken`].
    pub async fn verify_email(
        &self,
        account_id: &AccountId,
        token: &str,
    ) -> Result<Account, Error> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(Error::Auth(AuthError::AccountNotFound))?;

        match account.verification_token.as_deref() {
            Some(expected) if expected == token => {
                let mut next = account.clone();
                next.email_verified = true;
                next.verification_token = None;
                next.role = AccountRole::Authenticated;

                let updated = self.repository.update(&next).await?;
                tracing::info!(account_id = %updated.id, "Email verified");
                Ok(updated)
            }
            _ => {
                tracing::warn!(account_id = %account.id, "Email verification with invalid token");
                Err(Error::Auth(AuthError::InvalidToken))
            }
        }
    }
}
