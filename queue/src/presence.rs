//! Grace-window reconciliation of departed participants.
//!
//! A departure notice is recorded, not acted on: a participant can drop and
//! rejoin within seconds during a network blip, and removing their entry
//! immediately would lose their place in line. Removal of a genuinely
//! departed participant's entry is origin-agnostic — any client may perform
//! it, since the owner is no longer present to clean up after itself.

use std::collections::HashMap;

pub struct PresenceReconciler {
    grace_ms: u64,
    /// participant id -> timestamp the departure notice arrived
    departures: HashMap<String, u64>,
}

impl PresenceReconciler {
    pub fn new(grace_ms: u64) -> Self {
        Self {
            grace_ms,
            departures: HashMap::new(),
        }
    }

    /// Records a "participant left the scene" notice. A repeated notice for
    /// the same participant restarts the window.
    pub fn note_departure(&mut self, participant_id: impl Into<String>, now_ms: u64) {
        self.departures.insert(participant_id.into(), now_ms);
    }

    /// Number of notices still inside their grace window.
    pub fn pending(&self) -> usize {
        self.departures.len()
    }

    /// Returns the participants whose grace window has elapsed and who are
    /// still absent from the identity set. Elapsed notices are cleared either
    /// way: a participant that reappeared gets a fresh notice if they drop
    /// again.
    pub fn reconcile<F>(&mut self, now_ms: u64, is_connected: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut due: Vec<String> = self
            .departures
            .iter()
            .filter(|(_, &noticed_at)| now_ms.saturating_sub(noticed_at) >= self.grace_ms)
            .map(|(id, _)| id.clone())
            .collect();
        due.sort();

        for participant_id in &due {
            self.departures.remove(participant_id);
        }

        due.into_iter().filter(|id| !is_connected(id)).collect()
    }
}
