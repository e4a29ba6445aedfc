//! Capability traits the host engine provides to the queue.
//!
//! The engine takes these as constructor parameters instead of reaching into
//! a global service locator. Each trait is cut down to exactly the calls the
//! queue makes, so a test double is a couple dozen lines.

use crate::entry::{Entity, QueueEntry};
use crate::math::Vec3;

/// The replicated entity store: the only shared resource in the design.
///
/// Replication is eventually consistent, at-least-once, last-write-wins per
/// record, with no ordering guarantee. The queue compensates by computing
/// order as a pure function of the records and by writing only records the
/// local participant owns.
pub trait EntityStore {
    /// Whether the network session is established. Creating replicated
    /// records before this returns true would desync them, so joins are
    /// parked until it flips.
    fn session_ready(&self) -> bool;

    /// Allocates a fresh entity handle.
    fn spawn(&mut self) -> Entity;

    /// Creates a record under the given handle. Local-only until
    /// [`mark_replicated`](EntityStore::mark_replicated) is called.
    fn create(&mut self, entity: Entity, entry: QueueEntry);

    /// Registers the record for network propagation. Must be called exactly
    /// once per newly created queue record.
    fn mark_replicated(&mut self, entity: Entity);

    /// Reads one record.
    fn get(&self, entity: Entity) -> Option<QueueEntry>;

    /// Overwrites one record. Propagated if the record is replicated.
    fn set(&mut self, entity: Entity, entry: QueueEntry);

    /// Deletes one record. Propagated if the record is replicated.
    fn remove(&mut self, entity: Entity);

    /// Snapshot of all live records. Iteration order must be deterministic
    /// for a given snapshot.
    fn entries(&self) -> Vec<(Entity, QueueEntry)>;
}

/// Identity lookups and departure notices.
pub trait IdentityProvider {
    /// The local viewer's stable id, or `None` while identity resolution is
    /// still in flight. Callers must tolerate the transient absence.
    fn local_participant(&self) -> Option<String>;

    /// Display name for a connected participant.
    fn display_name(&self, participant_id: &str) -> Option<String>;

    /// Whether the participant is present in the replicated identity set.
    fn is_connected(&self, participant_id: &str) -> bool;

    /// Drains pending "participant left the scene" notices. Polled once per
    /// engine tick.
    fn poll_departures(&mut self) -> Vec<String>;
}

/// Wall-clock timestamp source, loosely synchronized across clients. No
/// attempt is made to correct for skew.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// The local player's avatar, consumed only by the game-area enforcer.
pub trait Avatar {
    fn position(&self) -> Vec3;
    fn teleport(&mut self, to: Vec3);
}
