//! Cooperative cancellation for long-running solves.
//!
//! A [`CancelToken`] is cheap to clone and can be shared with another thread
//! that decides to abort the run. An optional deadline turns it into a
//! timeout. Solvers poll [`CancelToken::is_cancelled`] between stages and on
//! every iteration; nothing is interrupted preemptively.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that is never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// A clone sharing this token's flag that also expires `timeout` from
    /// now. The earlier of the two deadlines wins.
    pub fn expiring_after(&self, timeout: Duration) -> Self {
        let deadline = match (self.deadline, Instant::now().checked_add(timeout)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            flag: Arc::clone(&self.flag),
            deadline,
        }
    }

    /// Request cancellation. Visible to every clone.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_live() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.deadline().is_none());
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn zero_timeout_expires_immediately() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        assert!(token.is_cancelled());
    }

    #[test]
    fn expiring_clone_shares_flag() {
        let token = CancelToken::new();
        let timed = token.expiring_after(Duration::from_secs(3600));
        assert!(timed.deadline().is_some());
        assert!(!timed.is_cancelled());
        token.cancel();
        assert!(timed.is_cancelled());

        let expired = CancelToken::new().expiring_after(Duration::ZERO);
        assert!(expired.is_cancelled());
    }

    #[test]
    fn long_timeout_is_live() {
        let token = CancelToken::with_timeout(Duration::from_secs(3600));
        assert!(!token.is_cancelled());
    }
}
