//! The replicated queue record and its entity handle.

use serde::{Deserialize, Serialize};

/// Opaque handle for a record in the replicated entity store.
///
/// Handles are allocated by the store implementation. A replicated store must
/// hand out handles that cannot collide across clients; the simulation does
/// this by reserving a numeric range per client.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Entity(pub u32);

/// One participant's place in line at the mini-game station.
///
/// At most one live entry exists per participant. The entry is created by the
/// participant's own client, lives through at most one activation, and is
/// removed rather than recycled; a returning participant gets a fresh entry
/// with a new `joined_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Stable identifier of the owning participant.
    pub participant_id: String,
    /// Millisecond timestamp taken once at creation; the primary ordering key.
    pub joined_at: u64,
    /// True while this entry holds the turn. At most one live entry should
    /// have this set; a replication race can transiently produce two.
    pub active: bool,
    /// Millisecond timestamp of the moment `active` flipped true.
    pub active_since: u64,
}

impl QueueEntry {
    /// Creates a waiting entry. Activation happens later, through election.
    pub fn new(participant_id: impl Into<String>, joined_at: u64) -> Self {
        Self {
            participant_id: participant_id.into(),
            joined_at,
            active: false,
            active_since: 0,
        }
    }
}
