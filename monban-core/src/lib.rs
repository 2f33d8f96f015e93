//! Core functionality for the monban project
//!
//! This module contains the account lifecycle and authentication logic for the
//! monban ecosystem: registration with first-account admin bootstrap, login with
//! brute-force lockout, email verification, password reset, administrative
//! unlock, and profile updates.
//!
//! The crate is storage-agnostic. Persistence is abstracted behind the
//! [`repositories::AccountRepository`] trait and outbound notifications behind
//! the [`services::Notifier`] trait; concrete backends live in sibling crates.
//!
//! See [`Account`] for the core account struct and the [`services`] module for
//! the operations that drive its state transitions.

pub mod account;
pub mod config;
pub mod error;
pub mod id;
pub mod lockout;
pub mod nickname;
pub mod repositories;
pub mod services;
pub mod validation;

pub use account::{Account, AccountId, AccountRole, NewAccount, ProfileUpdate, Registration};
pub use config::LockoutConfig;
pub use error::Error;
pub use lockout::LockoutPolicy;
pub use repositories::RepositoryProvider;
