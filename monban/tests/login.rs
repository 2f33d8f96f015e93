use std::sync::Arc;

use monban::{Account, Error, LockoutConfig, Monban, Registration};
use monban_core::error::AuthError;

#[cfg(feature = "sqlite")]
use monban::sqlite::SqliteRepositoryProvider;

const MAX_ATTEMPTS: u32 = 3;

#[cfg(feature = "sqlite")]
async fn setup() -> Monban<SqliteRepositoryProvider> {
    let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
    let repositories = SqliteRepositoryProvider::new(pool);

    let monban = Monban::new(Arc::new(repositories))
        .with_lockout_config(LockoutConfig::default().with_max_login_attempts(MAX_ATTEMPTS));
    monban.migrate().await.unwrap();
    monban
}

/// Register and verify an account so it can log in.
#[cfg(feature = "sqlite")]
async fn register_verified(
    monban: &Monban<SqliteRepositoryProvider>,
    email: &str,
    password: &str,
) -> Account {
    // Burn the admin bootstrap on a throwaway account once
    if monban.count_accounts().await.unwrap() == 0 {
        monban
            .register(Registration::new("admin@example.com", "admin-password1"))
            .await
            .unwrap();
    }

    let account = monban
        .register(Registration::new(email, password))
        .await
        .unwrap();
    let token = account.verification_token.clone().unwrap();
    monban.verify_email(&account.id, &token).await.unwrap()
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_login_lifecycle() {
    let monban = setup().await;
    let account = register_verified(&monban, "user@example.com", "password123").await;

    // Successful login stamps the attempt and resets the counter
    let logged_in = monban.login("user@example.com", "password123").await.unwrap();
    assert_eq!(logged_in.id, account.id);
    assert!(logged_in.last_login_at.is_some());
    assert_eq!(logged_in.failed_login_attempts, 0);

    // Unknown email and wrong password are indistinguishable
    let unknown = monban.login("ghost@example.com", "password123").await;
    let wrong = monban.login("user@example.com", "wrong-password").await;
    assert!(matches!(
        unknown.unwrap_err(),
        Error::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        wrong.unwrap_err(),
        Error::Auth(AuthError::InvalidCredentials)
    ));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_unverified_account_cannot_login() {
    let monban = setup().await;

    monban
        .register(Registration::new("admin@example.com", "admin-password1"))
        .await
        .unwrap();
    monban
        .register(Registration::new("user@example.com", "password123"))
        .await
        .unwrap();

    let result = monban.login("user@example.com", "password123").await;
    assert!(matches!(
        result.unwrap_err(),
        Error::Auth(AuthError::EmailNotVerified)
    ));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let monban = setup().await;
    register_verified(&monban, "user@example.com", "password123").await;

    for _ in 0..MAX_ATTEMPTS {
        let result = monban.login("user@example.com", "wrong-password").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Auth(AuthError::InvalidCredentials)
        ));
    }

    assert!(monban.is_account_locked("user@example.com").await.unwrap());

    // Locked means locked, even with the correct password
    let result = monban.login("user@example.com", "password123").await;
    assert!(matches!(
        result.unwrap_err(),
        Error::Auth(AuthError::AccountLocked)
    ));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_admin_unlock_restores_login() {
    let monban = setup().await;
    let account = register_verified(&monban, "user@example.com", "password123").await;

    for _ in 0..MAX_ATTEMPTS {
        monban
            .login("user@example.com", "wrong-password")
            .await
            .unwrap_err();
    }
    assert!(monban.is_account_locked("user@example.com").await.unwrap());

    let unlocked = monban.unlock_account(&account.id).await.unwrap();
    assert!(!unlocked.is_locked);
    assert_eq!(unlocked.failed_login_attempts, 0);

    assert!(monban.login("user@example.com", "password123").await.is_ok());

    // Unlocking an unlocked account is a distinct no-op failure
    let result = monban.unlock_account(&account.id).await;
    assert!(matches!(
        result.unwrap_err(),
        Error::Auth(AuthError::AccountNotLocked)
    ));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_password_reset_clears_lockout() {
    let monban = setup().await;
    let account = register_verified(&monban, "user@example.com", "password123").await;

    for _ in 0..MAX_ATTEMPTS {
        monban
            .login("user@example.com", "wrong-password")
            .await
            .unwrap_err();
    }
    assert!(monban.is_account_locked("user@example.com").await.unwrap());

    let updated = monban
        .reset_password(&account.id, "fresh-password99")
        .await
        .unwrap();
    assert!(!updated.is_locked);
    assert_eq!(updated.failed_login_attempts, 0);

    // Only the new password works after the reset
    assert!(
        monban
            .login("user@example.com", "fresh-password99")
            .await
            .is_ok()
    );
    assert!(
        monban
            .login("user@example.com", "password123")
            .await
            .is_err()
    );
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_verification_token_is_single_use() {
    let monban = setup().await;

    monban
        .register(Registration::new("admin@example.com", "admin-password1"))
        .await
        .unwrap();
    let account = monban
        .register(Registration::new("user@example.com", "password123"))
        .await
        .unwrap();
    let token = account.verification_token.clone().unwrap();

    let verified = monban.verify_email(&account.id, &token).await.unwrap();
    assert!(verified.email_verified);
    assert!(verified.verification_token.is_none());

    // Replaying the consumed token fails without changing anything
    let result = monban.verify_email(&account.id, &token).await;
    assert!(matches!(
        result.unwrap_err(),
        Error::Auth(AuthError::InvalidToken)
    ));

    let stored = monban.get_account(&account.id).await.unwrap().unwrap();
    assert!(stored.email_verified);
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_wrong_verification_token_mutates_nothing() {
    let monban = setup().await;

    monban
        .register(Registration::new("admin@example.com", "admin-password1"))
        .await
        .unwrap();
    let account = monban
        .register(Registration::new("user@example.com", "password123"))
        .await
        .unwrap();

    let result = monban.verify_email(&account.id, "vrf_bogus").await;
    assert!(matches!(
        result.unwrap_err(),
        Error::Auth(AuthError::InvalidToken)
    ));

    let stored = monban.get_account(&account.id).await.unwrap().unwrap();
    assert!(!stored.email_verified);
    assert_eq!(stored.verification_token, account.verification_token);
}
