//! Centralized validation for registration and profile input
//!
//! A single source of truth for field rules, so the services reject malformed
//! input before any record is touched. Aggregate validators
//! ([`validate_registration`], [`validate_profile_update`]) check only the
//! fields a payload supplies.

use crate::account::{ProfileUpdate, Registration};
use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Lazy-loaded email validation regex
///
/// Validates email addresses according to a practical subset of RFC 5322.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid email regex pattern")
});

const MAX_BIO_LENGTH: usize = 500;

/// Validates an email address.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::MissingField(
            "Email is required".to_string(),
        ));
    }

    if email.len() > 254 {
        return Err(ValidationError::InvalidEmail(
            "Email is too long".to_string(),
        ));
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(format!(
            "Invalid email format: {email}"
        )))
    }
}

/// Validates a password according to security requirements.
///
/// Minimum 8 characters, maximum 128, not empty or whitespace only. Strength
/// rules apply to the plaintext before hashing; the hash itself is opaque.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField(
            "Password is required".to_string(),
        ));
    }

    if password.trim().is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password cannot be only whitespace".to_string(),
        ));
    }

    if password.len() < 8 {
        return Err(ValidationError::InvalidPassword(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 128 {
        return Err(ValidationError::InvalidPassword(
            "Password must be no more than 128 characters long".to_string(),
        ));
    }

    Ok(())
}

/// Validates an optional name field (first or last name).
pub fn validate_name(name: Option<&str>) -> Result<(), ValidationError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidName(
                "Name cannot be empty or whitespace only".to_string(),
            ));
        }

        if name.len() > 100 {
            return Err(ValidationError::InvalidName(
                "Name must be no more than 100 characters long".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates an optional bio.
pub fn validate_bio(bio: Option<&str>) -> Result<(), ValidationError> {
    if let Some(bio) = bio
        && bio.len() > MAX_BIO_LENGTH
    {
        return Err(ValidationError::InvalidField(format!(
            "Bio must be no more than {MAX_BIO_LENGTH} characters long"
        )));
    }

    Ok(())
}

/// Validates an optional profile URL field.
///
/// Accepts absolute http(s) URLs with a host; everything else is rejected.
pub fn validate_url(field: &str, value: Option<&str>) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };

    let parsed = Url::parse(value)
        .map_err(|_| ValidationError::InvalidUrl(format!("{field} must be a valid URL")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl(format!(
            "{field} must be an absolute http(s) URL"
        )));
    }

    Ok(())
}

/// Validates a complete registration payload before any record is created.
pub fn validate_registration(registration: &Registration) -> Result<(), ValidationError> {
    validate_email(&registration.email)?;
    validate_password(&registration.password)?;
    validate_name(registration.first_name.as_deref())?;
    validate_name(registration.last_name.as_deref())?;
    validate_bio(registration.bio.as_deref())?;
    validate_url(
        "profile_picture_url",
        registration.profile_picture_url.as_deref(),
    )?;
    validate_url(
        "linkedin_profile_url",
        registration.linkedin_profile_url.as_deref(),
    )?;
    validate_url(
        "github_profile_url",
        registration.github_profile_url.as_deref(),
    )?;

    Ok(())
}

/// Validates the supplied fields of a partial profile update.
///
/// Unset fields are not inspected; a failure here means nothing was persisted.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<(), ValidationError> {
    if let Some(password) = update.password.as_deref() {
        validate_password(password)?;
    }
    validate_name(update.first_name.as_deref())?;
    validate_name(update.last_name.as_deref())?;
    validate_bio(update.bio.as_deref())?;
    validate_url("profile_picture_url", update.profile_picture_url.as_deref())?;
    validate_url(
        "linkedin_profile_url",
        update.linkedin_profile_url.as_deref(),
    )?;
    validate_url("github_profile_url", update.github_profile_url.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("test.email+tag@domain.co.uk").is_ok());
        assert!(validate_email("user123@test-domain.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());

        let long_email = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long_email).is_err());
    }

    #[test]
    fn test_validate_password_valid() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("a_very_secure_password_with_symbols!@#").is_ok());
        assert!(validate_password("12345678").is_ok()); // Minimum length
    }

    #[test]
    fn test_validate_password_invalid() {
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err()); // Whitespace only
        assert!(validate_password("short").is_err()); // Too short
        assert!(validate_password(&"a".repeat(129)).is_err()); // Too long
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name(None).is_ok());
        assert!(validate_name(Some("John Doe")).is_ok());
        assert!(validate_name(Some("José María García-López")).is_ok());
        assert!(validate_name(Some("")).is_err());
        assert!(validate_name(Some("   ")).is_err());
        assert!(validate_name(Some(&"a".repeat(101))).is_err());
    }

    #[test]
    fn test_validate_bio() {
        assert!(validate_bio(None).is_ok());
        assert!(validate_bio(Some("A short bio.")).is_ok());
        assert!(validate_bio(Some(&"b".repeat(501))).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("github_profile_url", None).is_ok());
        assert!(validate_url("github_profile_url", Some("https://github.com/octocat")).is_ok());
        assert!(validate_url("github_profile_url", Some("http://example.com")).is_ok());

        assert!(validate_url("github_profile_url", Some("not-a-url")).is_err());
        assert!(validate_url("github_profile_url", Some("ftp://example.com/x")).is_err());
        assert!(validate_url("github_profile_url", Some("data:text/plain,hi")).is_err());
    }

    #[test]
    fn test_validate_registration() {
        let mut registration =
            crate::account::Registration::new("user@example.com", "securepass123");
        assert!(validate_registration(&registration).is_ok());

        registration.linkedin_profile_url = Some("invalid-url".to_string());
        assert!(validate_registration(&registration).is_err());
    }

    #[test]
    fn test_validate_profile_update() {
        let mut update = crate::account::ProfileUpdate {
            first_name: Some("Updated".to_string()),
            bio: Some("New bio".to_string()),
            ..Default::default()
        };
        assert!(validate_profile_update(&update).is_ok());

        update.password = Some("weak".to_string());
        assert!(validate_profile_update(&update).is_err());
    }
}
