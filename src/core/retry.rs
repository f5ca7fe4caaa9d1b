//! Retry policy for forwarding a country to the REST sink.
//!
//! The forward loop is driven by a small state machine:
//!
//! ```text
//! Attempting(n) --403--------------------------> Skipped
//! Attempting(n) --500, wait base * 2^n----------> Attempting(n + 1)
//!                                                 or Exhausted when n + 1 == max_attempts
//! Attempting(n) --2xx--------------------------> Success
//! Attempting(n) --any other status-------------> Rejected(status)
//! ```
//!
//! Transport failures never enter the machine; the caller fails immediately.

use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardState {
    /// About to send attempt `n` (zero based).
    Attempting(u32),
    Success,
    /// 403 from the sink; permanent, not retried.
    Skipped,
    /// Every attempt answered 500.
    Exhausted,
    Rejected(StatusCode),
}

impl ForwardState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ForwardState::Attempting(_))
    }
}

/// One transition: an optional wait followed by the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub delay: Option<Duration>,
    pub next: ForwardState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn start(&self) -> ForwardState {
        ForwardState::Attempting(0)
    }

    /// Wait before leaving attempt `attempt` after a 500: `base * 2^attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    pub fn advance(&self, attempt: u32, status: StatusCode) -> Step {
        match status {
            StatusCode::FORBIDDEN => Step {
                delay: None,
                next: ForwardState::Skipped,
            },
            StatusCode::INTERNAL_SERVER_ERROR => {
                let next_attempt = attempt + 1;
                let next = if next_attempt >= self.max_attempts {
                    ForwardState::Exhausted
                } else {
                    ForwardState::Attempting(next_attempt)
                };
                // the wait also happens after the final 500
                Step {
                    delay: Some(self.backoff_delay(attempt)),
                    next,
                }
            }
            status if status.is_success() => Step {
                delay: None,
                next: ForwardState::Success,
            },
            status => Step {
                delay: None,
                next: ForwardState::Rejected(status),
            },
        }
    }
}
