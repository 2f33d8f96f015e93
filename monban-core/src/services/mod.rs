//! Service layer for business logic
//!
//! This module contains the concrete service implementations that drive
//! account state transitions: registration, authentication with lockout,
//! email verification, password reset, and profile management.

pub mod account;
pub mod notifier;
pub mod password;
pub mod registration;
pub mod verification;

pub use account::AccountService;
pub use notifier::{Notifier, NoopNotifier, TracingNotifier};
pub use password::PasswordService;
pub use registration::RegistrationService;
pub use verification::VerificationService;

#[cfg(test)]
pub(crate) mod test_support;
