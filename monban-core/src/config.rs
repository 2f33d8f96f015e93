//! Lockout configuration
//!
//! Configuration is injected at service construction rather than read from
//! ambient process state, so two services in one process can run different
//! policies (tests rely on this).

use chrono::Duration;

/// Configuration for brute-force lockout behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutConfig {
    /// Number of consecutive failed logins that locks the account.
    pub max_login_attempts: u32,

    /// How long a lock holds after the last login attempt before it
    /// auto-expires.
    pub lockout_window: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 5,
            lockout_window: Duration::hours(24),
        }
    }
}

impl LockoutConfig {
    pub fn with_max_login_attempts(mut self, max_login_attempts: u32) -> Self {
        self.max_login_attempts = max_login_attempts;
        self
    }

    pub fn with_lockout_window(mut self, lockout_window: Duration) -> Self {
        self.lockout_window = lockout_window;
        self
    }
}
