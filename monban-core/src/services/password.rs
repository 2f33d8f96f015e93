//! Password authentication with brute-force lockout
//!
//! [`PasswordService::authenticate`] is the login state machine: every
//! attempt against an existing account commits its outcome (counter, lock
//! state, attempt stamp) before returning, so the next attempt always
//! observes the updated state. Only the unknown-email case is read-only.

use crate::{
    Account, AccountId, Error, LockoutConfig,
    error::AuthError,
    lockout::LockoutPolicy,
    repositories::AccountRepository,
    validation::validate_password,
};
use chrono::Utc;
use std::sync::Arc;

/// Hash a plaintext password using argon2
pub(crate) fn hash_password(password: &str) -> Result<String, Error> {
    use password_auth::generate_hash;
    Ok(generate_hash(password))
}

/// Verify a plaintext password against a stored hash
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    password_auth::verify_password(password, hash).is_ok()
}

/// Service for password authentication operations
pub struct PasswordService<R: AccountRepository> {
    repository: Arc<R>,
    policy: LockoutPolicy,
}

impl<R: AccountRepository> PasswordService<R> {
    /// Create a new PasswordService with the given repository and lockout
    /// configuration
    pub fn new(repository: Arc<R>, config: LockoutConfig) -> Self {
        Self {
            repository,
            policy: LockoutPolicy::new(config),
        }
    }

    /// Authenticate an account with email and password.
    ///
    /// Outcomes are deliberately coarse: an unknown email and a wrong
    /// password both yield [`AuthError::InvalidCredentials`], so a caller
    /// cannot probe which addresses are registered. Unverified and locked
    /// accounts get their own variants because the UX must tell those apart.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, Error> {
        let Some(account) = self.repository.find_by_email(email).await? else {
            tracing::warn!("Login attempt with unknown email");
            return Err(Error::Auth(AuthError::InvalidCredentials));
        };

        if !account.email_verified {
            tracing::warn!(account_id = %account.id, "Login attempt with unverified email");
            return Err(Error::Auth(AuthError::EmailNotVerified));
        }

        let now = Utc::now();

        let account = if account.is_locked {
            if self.policy.auto_unlock_due(&account, now) {
                tracing::info!(account_id = %account.id, "Lockout window expired, auto-unlocking");
                self.policy.clear_lock(&account)
            } else {
                // Still locked: stamp the attempt so the window keeps sliding
                let rejected = self.policy.record_rejected_attempt(&account, now);
                self.repository.update(&rejected).await?;
                tracing::warn!(account_id = %account.id, "Login attempt on locked account");
                return Err(Error::Auth(AuthError::AccountLocked));
            }
        } else {
            account
        };

        if verify_password(password, &account.hashed_password) {
            let updated = self
                .repository
                .update(&self.policy.record_success(&account, now))
                .await?;
            tracing::info!(account_id = %updated.id, "Successful login");
            Ok(updated)
        } else {
            let updated = self
                .repository
                .update(&self.policy.record_failure(&account, now))
                .await?;
            if updated.is_locked {
                tracing::warn!(
                    account_id = %updated.id,
                    failed_attempts = updated.failed_login_attempts,
                    "Account locked after repeated failed logins"
                );
            } else {
                tracing::warn!(
                    account_id = %updated.id,
                    failed_attempts = updated.failed_login_attempts,
                    "Failed login attempt"
                );
            }
            Err(Error::Auth(AuthError::InvalidCredentials))
        }
    }

    /// Replace an account's password.
    ///
    /// Always clears the lock and resets the failed-attempt counter,
    /// regardless of prior lock state.
    pub async fn reset_password(
        &self,
        account_id: &AccountId,
        new_password: &str,
    ) -> Result<Account, Error> {
        validate_password(new_password)?;

        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(Error::Auth(AuthError::AccountNotFound))?;

        let mut next = self.policy.clear_lock(&account);
        next.hashed_password = hash_password(new_password)?;

        let updated = self.repository.update(&next).await?;
        tracing::info!(account_id = %updated.id, "Password reset");
        Ok(updated)
    }

    /// Administrative unlock.
    ///
    /// Fails with [`AuthError::AccountNotLocked`] when there is nothing to
    /// do, so callers can distinguish a no-op from a mutation.
    pub async fn unlock_account(&self, account_id: &AccountId) -> Result<Account, Error> {
        let account = self
            .repository
            .find_by_id(account_id)
            .await?
            .ok_or(Error::Auth(AuthError::AccountNotFound))?;

        if !account.is_locked {
            return Err(Error::Auth(AuthError::AccountNotLocked));
        }

        let updated = self.repository.update(&self.policy.clear_lock(&account)).await?;
        tracing::info!(account_id = %updated.id, "Account unlocked by administrator");
        Ok(updated)
    }
}
