//! Outbound notification boundary
//!
//! Email delivery is a collaborator, not a concern of this crate. Services
//! call [`Notifier`] fire-and-forget: a failed send is logged and never rolls
//! back the account mutation that triggered it.

use async_trait::async_trait;

use crate::{Account, Error};

/// Sink for account-related notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the verification email for a freshly registered account.
    ///
    /// The account carries its `verification_token` at this point; the
    /// implementation is expected to embed it in a verification link.
    async fn send_verification_email(&self, account: &Account) -> Result<(), Error>;
}

/// Notifier that logs the would-be email instead of sending it.
///
/// Useful in development and as a safe default until a real transport is
/// wired in by the application.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_verification_email(&self, account: &Account) -> Result<(), Error> {
        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "Verification email queued"
        );
        Ok(())
    }
}

/// Notifier that drops everything silently. For tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_verification_email(&self, _account: &Account) -> Result<(), Error> {
        Ok(())
    }
}
