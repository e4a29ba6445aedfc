//! Wire format for replicated record updates.

use queue::entry::{Entity, QueueEntry};
use serde::{Deserialize, Serialize};

/// One replicated mutation. Updates are at-least-once and unordered; the
/// receiving store applies them last-write-wins per entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SyncPacket {
    Upsert { entity: Entity, entry: QueueEntry },
    Remove { entity: Entity },
}

impl SyncPacket {
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
