//! Soft turn limits: maximum duration and inactivity.
//!
//! Both limits are evaluated on the ~1s engine tick, not continuously, which
//! leaves up to a second of slack. Both are suppressed while the queue holds
//! a single entry — a lone participant keeps playing indefinitely.

/// Which limit expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnExpiry {
    MaxDuration,
    Inactivity,
}

pub struct TurnGovernor {
    max_turn_ms: Option<u64>,
    inactivity_timeout_ms: Option<u64>,
    /// Reset whenever the active participant performs a qualifying input.
    inactivity_since: u64,
}

impl TurnGovernor {
    pub fn new(max_turn_ms: Option<u64>, inactivity_timeout_ms: Option<u64>) -> Self {
        Self {
            max_turn_ms,
            inactivity_timeout_ms,
            inactivity_since: 0,
        }
    }

    /// Called when the local participant's turn starts.
    pub fn turn_started(&mut self, now_ms: u64) {
        self.inactivity_since = now_ms;
    }

    /// Called on every qualifying input event.
    pub fn record_activity(&mut self, now_ms: u64) {
        self.inactivity_since = now_ms;
    }

    /// Evaluates both limits for the local, active participant.
    pub fn check(&self, now_ms: u64, active_since: u64, queued: usize) -> Option<TurnExpiry> {
        if queued <= 1 {
            return None;
        }
        if let Some(max) = self.max_turn_ms {
            if now_ms.saturating_sub(active_since) >= max {
                return Some(TurnExpiry::MaxDuration);
            }
        }
        if let Some(idle) = self.inactivity_timeout_ms {
            if now_ms.saturating_sub(self.inactivity_since) >= idle {
                return Some(TurnExpiry::Inactivity);
            }
        }
        None
    }
}
