use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account locked")]
    AccountLocked,

    #[error("Account not locked")]
    AccountNotLocked,

    #[error("Invalid verification token")]
    InvalidToken,

    #[error("Account not found")]
    AccountNotFound,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Could not generate a unique nickname")]
    NicknameExhausted,

    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl Error {
    /// True for failures that callers may surface to an end user as an
    /// authentication outcome rather than a server fault.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// True when the failure reveals nothing about whether the account exists.
    ///
    /// Login failures collapse "no such email" and "wrong password" into this
    /// single variant to prevent user enumeration.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, Error::Auth(AuthError::InvalidCredentials))
    }
}
