// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded retry-with-delay planning.
//!
//! The host player renders its control bar some time after the video element
//! itself exists, on a timeline that is not otherwise observable. The
//! backend waits for it by polling on a fixed cadence with a hard attempt
//! budget; this module holds that plan as data so the pacing is testable
//! without a browser.
//!
//! The plan bounds total wall-clock waiting at `interval_ms × budget`.
//! Exhausting the budget is fatal to startup — the caller surfaces
//! [`HostError::NotFound`](crate::backend::HostError) rather than retrying
//! further.

/// A fixed-interval poll with a hard attempt budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PollPlan {
    /// Delay between attempts, in milliseconds.
    pub interval_ms: u32,
    /// Maximum number of lookup attempts.
    pub budget: u32,
}

/// What to do after a failed lookup attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PollStep {
    /// Schedule another lookup after `delay_ms`.
    Retry {
        /// Milliseconds to wait before the next attempt.
        delay_ms: u32,
    },
    /// The budget is exhausted; fail startup.
    GiveUp,
}

impl PollPlan {
    /// Creates a plan with the given cadence and budget.
    ///
    /// # Panics
    ///
    /// Panics if `budget` is zero.
    #[must_use]
    pub const fn new(interval_ms: u32, budget: u32) -> Self {
        assert!(budget > 0, "poll budget must be at least one attempt");
        Self {
            interval_ms,
            budget,
        }
    }

    /// The controls-container plan: 200 ms between attempts, 10 attempts,
    /// about two seconds of waiting in total.
    #[must_use]
    pub const fn controls() -> Self {
        Self::new(200, 10)
    }

    /// Upper bound on total waiting, in milliseconds.
    #[must_use]
    pub const fn total_ms(self) -> u64 {
        self.interval_ms as u64 * self.budget as u64
    }

    /// Decides the next step after `attempts_made` failed lookups.
    #[must_use]
    pub const fn step(self, attempts_made: u32) -> PollStep {
        if attempts_made < self.budget {
            PollStep::Retry {
                delay_ms: self.interval_ms,
            }
        } else {
            PollStep::GiveUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_plan_is_ten_attempts_at_200ms() {
        let plan = PollPlan::controls();
        assert_eq!(plan.interval_ms, 200);
        assert_eq!(plan.budget, 10);
        assert_eq!(plan.total_ms(), 2_000);
    }

    #[test]
    fn retries_exactly_budget_times_then_gives_up() {
        let plan = PollPlan::controls();
        let mut attempts = 0_u32;
        loop {
            attempts += 1;
            match plan.step(attempts) {
                PollStep::Retry { delay_ms } => assert_eq!(delay_ms, 200),
                PollStep::GiveUp => break,
            }
        }
        assert_eq!(attempts, 10);
    }

    #[test]
    fn single_attempt_budget_never_retries() {
        let plan = PollPlan::new(50, 1);
        assert_eq!(plan.step(1), PollStep::GiveUp);
    }

    #[test]
    #[should_panic(expected = "at least one attempt")]
    fn zero_budget_is_rejected() {
        let _ = PollPlan::new(200, 0);
    }
}
