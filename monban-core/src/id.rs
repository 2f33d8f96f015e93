//! Opaque identifier and token generation
//!
//! Accounts and verification tokens are identified by prefixed, URL-safe
//! strings with at least 96 bits of entropy, e.g. `acct_4fY3kPbQx1GdZR8w`.
//! The prefix makes the kind of a value obvious in logs without revealing
//! anything about it.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Number of random bytes behind every generated id (96 bits).
const ID_ENTROPY_BYTES: usize = 12;

/// Number of random bytes behind a verification token (192 bits).
///
/// Tokens are bearer credentials, so they carry more entropy than ids.
const TOKEN_ENTROPY_BYTES: usize = 24;

/// Generate a prefixed id of the form `{prefix}_{random}`.
///
/// The random part is base64 URL-safe encoded without padding.
pub fn generate_prefixed_id(prefix: &str) -> String {
    let mut bytes = [0u8; ID_ENTROPY_BYTES];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Generate an email verification token.
///
/// Single-use: the token is stored on the account row while the email is
/// unverified and cleared atomically when verification succeeds.
pub fn generate_verification_token() -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("vrf_{encoded}")
}

/// Validate that a prefixed id has the expected prefix and enough entropy.
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    let Some(random_part) = id
        .strip_prefix(expected_prefix)
        .and_then(|rest| rest.strip_prefix('_'))
    else {
        return false;
    };

    match BASE64_URL_SAFE_NO_PAD.decode(random_part) {
        Ok(decoded) => decoded.len() >= ID_ENTROPY_BYTES,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_prefixed_id() {
        let id = generate_prefixed_id("acct");
        assert!(id.starts_with("acct_"));
        assert!(validate_prefixed_id(&id, "acct"));

        // Ensure uniqueness
        let id2 = generate_prefixed_id("acct");
        assert_ne!(id, id2);
    }

    #[test]
    fn test_generate_verification_token() {
        let token = generate_verification_token();
        assert!(token.starts_with("vrf_"));

        let random_part = &token["vrf_".len()..];
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(random_part).unwrap();
        assert_eq!(decoded.len(), TOKEN_ENTROPY_BYTES);

        assert_ne!(token, generate_verification_token());
    }

    #[test]
    fn test_validate_prefixed_id() {
        let id = generate_prefixed_id("acct");
        assert!(validate_prefixed_id(&id, "acct"));
        assert!(!validate_prefixed_id(&id, "vrf"));

        // Test invalid formats
        assert!(!validate_prefixed_id("acct", "acct"));
        assert!(!validate_prefixed_id("acct_", "acct"));
        assert!(!validate_prefixed_id("acct_invalid!", "acct"));
        assert!(!validate_prefixed_id("acct_dGVzdA", "acct")); // too short
    }

    #[test]
    fn test_id_is_url_safe() {
        let id = generate_prefixed_id("acct");
        assert!(
            id.chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        );
    }
}
