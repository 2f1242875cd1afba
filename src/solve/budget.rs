//! Per-call wall-clock budget for cooperative cancellation

use std::time::{Duration, Instant};

/// Wall-clock budget threaded into each solver call. Solvers poll
/// [`Budget::expired`] at search-node granularity and return a timed-out
/// result cooperatively; nothing is interrupted preemptively.
#[derive(Debug, Clone, Copy, Default)]
pub struct Budget {
    deadline: Option<Instant>,
}

impl Budget {
    /// A budget that never expires.
    pub fn unlimited() -> Self {
        Self { deadline: None }
    }

    /// A budget expiring `limit` from now.
    pub fn with_timeout(limit: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + limit),
        }
    }

    pub fn expired(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Time left before expiry, or `None` for an unlimited budget.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_budget_never_expires() {
        let budget = Budget::unlimited();
        assert!(!budget.expired());
        assert!(budget.remaining().is_none());
    }

    #[test]
    fn test_zero_budget_expires_immediately() {
        let budget = Budget::with_timeout(Duration::ZERO);
        assert!(budget.expired());
    }

    #[test]
    fn test_generous_budget_is_live() {
        let budget = Budget::with_timeout(Duration::from_secs(3600));
        assert!(!budget.expired());
        assert!(budget.remaining().unwrap() > Duration::from_secs(3500));
    }
}
