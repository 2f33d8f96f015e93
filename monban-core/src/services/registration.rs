//! Account registration
//!
//! Registration validates the raw payload, hashes the password, generates a
//! collision-free nickname, and decides the initial role: the first account
//! ever created is bootstrapped as admin with a pre-verified email, everyone
//! after that starts anonymous with a pending verification token.

use crate::{
    Account, AccountRole, Error,
    account::{NewAccount, Registration},
    error::AuthError,
    id::generate_verification_token,
    nickname::generate_nickname,
    repositories::AccountRepository,
    services::Notifier,
    services::password::hash_password,
    validation::validate_registration,
};
use std::sync::Arc;

/// Upper bound on nickname regeneration before giving up.
///
/// The nickname space holds millions of combinations, so hitting this bound
/// means something is pathologically wrong (a drained store of collisions or
/// a broken RNG), not bad luck.
const NICKNAME_MAX_ATTEMPTS: u32 = 100;

/// Service for account registration
pub struct RegistrationService<R: AccountRepository> {
    repository: Arc<R>,
    notifier: Arc<dyn Notifier>,
}

impl<R: AccountRepository> RegistrationService<R> {
    /// Create a new RegistrationService with the given repository and
    /// notifier
    pub fn new(repository: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Register a new account.
    ///
    /// The duplicate-email pre-check here is a UX courtesy; the store's
    /// unique constraint is what actually guarantees uniqueness under
    /// concurrent registration. Likewise the first-account admin bootstrap
    /// reads a count that can race with a concurrent insert: the first
    /// committed account wins admin, and this design accepts that ordering.
    pub async fn register(&self, registration: Registration) -> Result<Account, Error> {
        validate_registration(&registration)?;

        if self
            .repository
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            tracing::warn!("Registration attempt with an already registered email");
            return Err(Error::Auth(AuthError::DuplicateEmail));
        }

        let hashed_password = hash_password(&registration.password)?;
        let nickname = self.generate_unique_nickname().await?;

        let mut builder = NewAccount::builder()
            .email(registration.email)
            .nickname(nickname)
            .hashed_password(hashed_password)
            .first_name(registration.first_name)
            .last_name(registration.last_name)
            .bio(registration.bio)
            .profile_picture_url(registration.profile_picture_url)
            .linkedin_profile_url(registration.linkedin_profile_url)
            .github_profile_url(registration.github_profile_url);

        let is_first_account = self.repository.count().await? == 0;
        if is_first_account {
            builder = builder.role(AccountRole::Admin).email_verified(true);
        } else {
            builder = builder
                .role(AccountRole::Anonymous)
                .verification_token(Some(generate_verification_token()));
        }

        let account = self.repository.create(builder.build()?).await?;

        if account.has_verification_token() {
            // Best effort: a failed send must not roll back the registration
            if let Err(e) = self.notifier.send_verification_email(&account).await {
                tracing::warn!(
                    account_id = %account.id,
                    error = %e,
                    "Failed to send verification email"
                );
            }
        }

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            "Account registered"
        );
        Ok(account)
    }

    async fn generate_unique_nickname(&self) -> Result<String, Error> {
        for _ in 0..NICKNAME_MAX_ATTEMPTS {
            let candidate = generate_nickname();
            if self
                .repository
                .find_by_nickname(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }

        tracing::error!(
            attempts = NICKNAME_MAX_ATTEMPTS,
            "Nickname generation kept colliding, giving up"
        );
        Err(Error::Auth(AuthError::NicknameExhausted))
    }
}
