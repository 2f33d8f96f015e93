//! Brute-force lockout policy
//!
//! The lockout state machine is expressed as pure transition functions over
//! immutable account snapshots: callers load a snapshot, apply a transition,
//! and commit the result. Nothing here touches storage or the clock, which
//! keeps every transition testable in isolation.
//!
//! Lockout state lives on the account row itself (`is_locked`,
//! `failed_login_attempts`, `last_login_at`) rather than in a separate
//! attempt log.

use chrono::{DateTime, Utc};

use crate::{Account, LockoutConfig};

/// Computes lockout transitions for login attempts.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    config: LockoutConfig,
}

impl LockoutPolicy {
    pub fn new(config: LockoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// The anchor for the lockout window: the last login attempt, or account
    /// creation if no attempt was ever recorded.
    fn last_attempt_at(account: &Account) -> DateTime<Utc> {
        account.last_login_at.unwrap_or(account.created_at)
    }

    /// Whether a locked account's lockout window has expired.
    pub fn auto_unlock_due(&self, account: &Account, now: DateTime<Utc>) -> bool {
        account.is_locked && now - Self::last_attempt_at(account) > self.config.lockout_window
    }

    /// Transition for a failed credential check.
    ///
    /// Increments the counter, stamps the attempt, and locks the account once
    /// the counter reaches the configured maximum.
    pub fn record_failure(&self, account: &Account, now: DateTime<Utc>) -> Account {
        let mut next = account.clone();
        next.failed_login_attempts = account.failed_login_attempts.saturating_add(1);
        next.last_login_at = Some(now);
        if next.failed_login_attempts >= self.config.max_login_attempts {
            next.is_locked = true;
        }
        next
    }

    /// Transition for a successful login: counter resets, attempt stamped.
    pub fn record_success(&self, account: &Account, now: DateTime<Utc>) -> Account {
        let mut next = account.clone();
        next.failed_login_attempts = 0;
        next.last_login_at = Some(now);
        next
    }

    /// Transition for an attempt against a still-locked account.
    ///
    /// Only the attempt stamp changes; this is what keeps the lockout window
    /// sliding while an attacker keeps hammering a locked account.
    pub fn record_rejected_attempt(&self, account: &Account, now: DateTime<Utc>) -> Account {
        let mut next = account.clone();
        next.last_login_at = Some(now);
        next
    }

    /// Transition for an unlock, manual or automatic: lock cleared, counter
    /// reset.
    pub fn clear_lock(&self, account: &Account) -> Account {
        let mut next = account.clone();
        next.is_locked = false;
        next.failed_login_attempts = 0;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn policy() -> LockoutPolicy {
        LockoutPolicy::new(LockoutConfig::default().with_max_login_attempts(3))
    }

    fn account() -> Account {
        Account::builder()
            .email("test@example.com".to_string())
            .nickname("quiet-otter-0001".to_string())
            .hashed_password("$argon2id$stub".to_string())
            .build()
            .unwrap()
    }

    #[test]
    fn test_failures_accumulate_and_lock() {
        let policy = policy();
        let now = Utc::now();

        let account = account();
        let account = policy.record_failure(&account, now);
        assert_eq!(account.failed_login_attempts, 1);
        assert!(!account.is_locked);
        assert_eq!(account.last_login_at, Some(now));

        let account = policy.record_failure(&account, now);
        assert!(!account.is_locked);

        // Third failure reaches the maximum
        let account = policy.record_failure(&account, now);
        assert_eq!(account.failed_login_attempts, 3);
        assert!(account.is_locked);
    }

    #[test]
    fn test_success_resets_counter() {
        let policy = policy();
        let now = Utc::now();

        let account = policy.record_failure(&account(), now);
        let account = policy.record_failure(&account, now);
        let account = policy.record_success(&account, now);

        assert_eq!(account.failed_login_attempts, 0);
        assert_eq!(account.last_login_at, Some(now));
    }

    #[test]
    fn test_auto_unlock_uses_last_attempt() {
        let policy = policy();
        let now = Utc::now();

        let mut locked = account();
        locked.is_locked = true;
        locked.last_login_at = Some(now - Duration::hours(25));
        assert!(policy.auto_unlock_due(&locked, now));

        locked.last_login_at = Some(now - Duration::hours(23));
        assert!(!policy.auto_unlock_due(&locked, now));
    }

    #[test]
    fn test_auto_unlock_falls_back_to_created_at() {
        let policy = policy();
        let now = Utc::now();

        let mut locked = Account::builder()
            .email("test@example.com".to_string())
            .nickname("quiet-otter-0002".to_string())
            .hashed_password("$argon2id$stub".to_string())
            .created_at(now - Duration::hours(30))
            .build()
            .unwrap();
        locked.is_locked = true;
        assert!(locked.last_login_at.is_none());

        assert!(policy.auto_unlock_due(&locked, now));
    }

    #[test]
    fn test_auto_unlock_requires_lock() {
        let policy = policy();
        let now = Utc::now();

        let mut unlocked = account();
        unlocked.last_login_at = Some(now - Duration::days(7));
        assert!(!policy.auto_unlock_due(&unlocked, now));
    }

    #[test]
    fn test_rejected_attempt_slides_window() {
        let policy = policy();
        let now = Utc::now();

        let mut locked = account();
        locked.is_locked = true;
        locked.failed_login_attempts = 3;
        locked.last_login_at = Some(now - Duration::hours(23));

        let locked = policy.record_rejected_attempt(&locked, now);
        assert_eq!(locked.last_login_at, Some(now));
        assert!(locked.is_locked);
        assert_eq!(locked.failed_login_attempts, 3);
        assert!(!policy.auto_unlock_due(&locked, now + Duration::hours(23)));
    }

    #[test]
    fn test_clear_lock() {
        let policy = policy();
        let now = Utc::now();

        let locked = {
            let mut a = account();
            a.is_locked = true;
            a.failed_login_attempts = 3;
            a.last_login_at = Some(now);
            a
        };

        let cleared = policy.clear_lock(&locked);
        assert!(!cleared.is_locked);
        assert_eq!(cleared.failed_login_attempts, 0);
        // The attempt stamp is preserved; only the lock state resets
        assert_eq!(cleared.last_login_at, Some(now));
    }
}
