//! Account state and input payloads
//!
//! This module contains the core account struct and related functionality.
//!
//! An account is the persisted representation of a user's authentication and
//! profile state. Every operation in the [`crate::services`] module loads an
//! account snapshot, computes a new immutable snapshot, and commits it back
//! through the repository, so each state transition is auditable in isolation.
//!
//! | Field                            | Type               | Description                                            |
//! | -------------------------------- | ------------------ | ------------------------------------------------------ |
//! | `id`                             | `AccountId`        | The unique identifier for the account.                 |
//! | `email`                          | `String`           | Unique email address.                                  |
//! | `nickname`                       | `String`           | Unique generated handle.                               |
//! | `hashed_password`                | `String`           | Opaque output of the credential hasher.                |
//! | `role`                           | `AccountRole`      | Admin, Authenticated, or Anonymous.                    |
//! | `email_verified`                 | `bool`             | Whether the email address has been proven.             |
//! | `verification_token`             | `Option<String>`   | Present only while the email is unverified.            |
//! | `is_locked`                      | `bool`             | Whether logins are currently suspended.                |
//! | `failed_login_attempts`          | `u32`              | Consecutive failed login counter.                      |
//! | `last_login_at`                  | `Option<DateTime>` | Stamp of the most recent login attempt.                |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
};

/// A unique, stable identifier for a specific account
///
/// This value should be treated as opaque; it is not a UUID even if the random
/// part may look like one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acct"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this ID has the correct format for an account ID
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "acct")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role an account holds. Exactly one value is active at a time.
///
/// The first account ever created is bootstrapped as `Admin`. Everyone else
/// starts as `Anonymous` and is promoted to `Authenticated` when their email
/// is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    Admin,
    Authenticated,
    Anonymous,
}

impl AccountRole {
    /// Stable storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "ADMIN",
            AccountRole::Authenticated => "AUTHENTICATED",
            AccountRole::Anonymous => "ANONYMOUS",
        }
    }
}

impl FromStr for AccountRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(AccountRole::Admin),
            "AUTHENTICATED" => Ok(AccountRole::Authenticated),
            "ANONYMOUS" => Ok(AccountRole::Anonymous),
            other => Err(ValidationError::InvalidField(format!(
                "Unknown account role: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Representation of an account in monban.
///
/// This is the snapshot returned by every service operation. Snapshots are
/// immutable from the services' point of view: transitions clone, modify, and
/// commit a new snapshot rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The unique identifier for the account.
    pub id: AccountId,

    /// Unique email address. Case policy is fixed at validation time.
    pub email: String,

    /// Unique generated handle, regenerated on collision at registration.
    pub nickname: String,

    /// Opaque credential hash. Never equals the plaintext.
    #[serde(skip_serializing, default)]
    pub hashed_password: String,

    /// The active role.
    pub role: AccountRole,

    /// Whether the email address has been verified.
    pub email_verified: bool,

    /// Single-use email verification token; present only while unverified.
    #[serde(skip_serializing, default)]
    pub verification_token: Option<String>,

    /// Whether logins are currently suspended.
    pub is_locked: bool,

    /// Consecutive failed login attempts since the last reset.
    pub failed_login_attempts: u32,

    /// Stamp of the most recent login attempt, successful or not.
    pub last_login_at: Option<DateTime<Utc>>,

    /// Whether the account holds professional status.
    pub is_professional: bool,

    /// Stamp of the most recent professional status update.
    pub professional_status_updated_at: Option<DateTime<Utc>>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,

    /// The created at timestamp.
    pub created_at: DateTime<Utc>,

    /// The updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    /// True while the account still holds an unconsumed verification token.
    pub fn has_verification_token(&self) -> bool {
        self.verification_token.is_some()
    }
}

#[derive(Default)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    email: Option<String>,
    nickname: Option<String>,
    hashed_password: Option<String>,
    role: Option<AccountRole>,
    email_verified: bool,
    verification_token: Option<String>,
    is_locked: bool,
    failed_login_attempts: u32,
    last_login_at: Option<DateTime<Utc>>,
    is_professional: bool,
    professional_status_updated_at: Option<DateTime<Utc>>,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    profile_picture_url: Option<String>,
    linkedin_profile_url: Option<String>,
    github_profile_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn nickname(mut self, nickname: String) -> Self {
        self.nickname = Some(nickname);
        self
    }

    pub fn hashed_password(mut self, hashed_password: String) -> Self {
        self.hashed_password = Some(hashed_password);
        self
    }

    pub fn role(mut self, role: AccountRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn verification_token(mut self, verification_token: Option<String>) -> Self {
        self.verification_token = verification_token;
        self
    }

    pub fn is_locked(mut self, is_locked: bool) -> Self {
        self.is_locked = is_locked;
        self
    }

    pub fn failed_login_attempts(mut self, failed_login_attempts: u32) -> Self {
        self.failed_login_attempts = failed_login_attempts;
        self
    }

    pub fn last_login_at(mut self, last_login_at: Option<DateTime<Utc>>) -> Self {
        self.last_login_at = last_login_at;
        self
    }

    pub fn is_professional(mut self, is_professional: bool) -> Self {
        self.is_professional = is_professional;
        self
    }

    pub fn professional_status_updated_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.professional_status_updated_at = at;
        self
    }

    pub fn first_name(mut self, first_name: Option<String>) -> Self {
        self.first_name = first_name;
        self
    }

    pub fn last_name(mut self, last_name: Option<String>) -> Self {
        self.last_name = last_name;
        self
    }

    pub fn bio(mut self, bio: Option<String>) -> Self {
        self.bio = bio;
        self
    }

    pub fn profile_picture_url(mut self, url: Option<String>) -> Self {
        self.profile_picture_url = url;
        self
    }

    pub fn linkedin_profile_url(mut self, url: Option<String>) -> Self {
        self.linkedin_profile_url = url;
        self
    }

    pub fn github_profile_url(mut self, url: Option<String>) -> Self {
        self.github_profile_url = url;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> Result<Account, Error> {
        let now = Utc::now();
        Ok(Account {
            id: self.id.unwrap_or_default(),
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            nickname: self.nickname.ok_or(ValidationError::MissingField(
                "Nickname is required".to_string(),
            ))?,
            hashed_password: self.hashed_password.ok_or(ValidationError::MissingField(
                "Password hash is required".to_string(),
            ))?,
            role: self.role.unwrap_or(AccountRole::Anonymous),
            email_verified: self.email_verified,
            verification_token: self.verification_token,
            is_locked: self.is_locked,
            failed_login_attempts: self.failed_login_attempts,
            last_login_at: self.last_login_at,
            is_professional: self.is_professional,
            professional_status_updated_at: self.professional_status_updated_at,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            profile_picture_url: self.profile_picture_url,
            linkedin_profile_url: self.linkedin_profile_url,
            github_profile_url: self.github_profile_url,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// The insert payload for a new account.
///
/// Produced by the registration flow once validation, hashing, nickname
/// generation, and role assignment have all happened; the repository persists
/// it verbatim and stamps `created_at`/`updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub id: AccountId,
    pub email: String,
    pub nickname: String,
    pub hashed_password: String,
    pub role: AccountRole,
    pub email_verified: bool,
    pub verification_token: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

impl NewAccount {
    pub fn builder() -> NewAccountBuilder {
        NewAccountBuilder::default()
    }
}

#[derive(Default)]
pub struct NewAccountBuilder {
    id: Option<AccountId>,
    email: Option<String>,
    nickname: Option<String>,
    hashed_password: Option<String>,
    role: Option<AccountRole>,
    email_verified: bool,
    verification_token: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    profile_picture_url: Option<String>,
    linkedin_profile_url: Option<String>,
    github_profile_url: Option<String>,
}

impl NewAccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn nickname(mut self, nickname: String) -> Self {
        self.nickname = Some(nickname);
        self
    }

    pub fn hashed_password(mut self, hashed_password: String) -> Self {
        self.hashed_password = Some(hashed_password);
        self
    }

    pub fn role(mut self, role: AccountRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn verification_token(mut self, verification_token: Option<String>) -> Self {
        self.verification_token = verification_token;
        self
    }

    pub fn first_name(mut self, first_name: Option<String>) -> Self {
        self.first_name = first_name;
        self
    }

    pub fn last_name(mut self, last_name: Option<String>) -> Self {
        self.last_name = last_name;
        self
    }

    pub fn bio(mut self, bio: Option<String>) -> Self {
        self.bio = bio;
        self
    }

    pub fn profile_picture_url(mut self, url: Option<String>) -> Self {
        self.profile_picture_url = url;
        self
    }

    pub fn linkedin_profile_url(mut self, url: Option<String>) -> Self {
        self.linkedin_profile_url = url;
        self
    }

    pub fn github_profile_url(mut self, url: Option<String>) -> Self {
        self.github_profile_url = url;
        self
    }

    pub fn build(self) -> Result<NewAccount, Error> {
        Ok(NewAccount {
            id: self.id.unwrap_or_default(),
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            nickname: self.nickname.ok_or(ValidationError::MissingField(
                "Nickname is required".to_string(),
            ))?,
            hashed_password: self.hashed_password.ok_or(ValidationError::MissingField(
                "Password hash is required".to_string(),
            ))?,
            role: self.role.unwrap_or(AccountRole::Anonymous),
            email_verified: self.email_verified,
            verification_token: self.verification_token,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            profile_picture_url: self.profile_picture_url,
            linkedin_profile_url: self.linkedin_profile_url,
            github_profile_url: self.github_profile_url,
        })
    }
}

/// Raw registration input, as received from the outer HTTP layer.
///
/// The plaintext password lives only as long as this value; registration
/// hashes it immediately and never persists it.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
}

impl Registration {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            bio: None,
            profile_picture_url: None,
            linkedin_profile_url: None,
            github_profile_url: None,
        }
    }
}

/// Partial profile update: only supplied fields change, unset fields are
/// untouched.
///
/// A supplied `password` is routed through the credential hasher before
/// storage; the other fields are persisted as given once validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.profile_picture_url.is_none()
            && self.linkedin_profile_url.is_none()
            && self.github_profile_url.is_none()
            && self.password.is_none()
    }
}
