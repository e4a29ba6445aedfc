//! Per-client replicated store backed by the simulated transport.

use crate::net::SimNet;
use crate::packet::SyncPacket;
use log::warn;
use queue::entry::{Entity, QueueEntry};
use queue::host::EntityStore;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

/// Low bits of an entity handle hold a per-client counter; the client id
/// lives above them. Handles allocated on different clients never collide.
const CLIENT_RANGE_BITS: u32 = 16;

pub struct SimStore {
    client_id: u32,
    net: Rc<RefCell<SimNet>>,
    next: u32,
    /// When the simulated network session handshake completes.
    ready_at_ms: u64,
    records: BTreeMap<Entity, QueueEntry>,
    replicated: HashSet<Entity>,
}

impl SimStore {
    pub fn new(client_id: u32, net: Rc<RefCell<SimNet>>, ready_at_ms: u64) -> Self {
        Self {
            client_id,
            net,
            next: 0,
            ready_at_ms,
            records: BTreeMap::new(),
            replicated: HashSet::new(),
        }
    }

    /// Applies a remote mutation without re-posting it.
    pub fn apply_remote(&mut self, packet: &SyncPacket) {
        match packet {
            SyncPacket::Upsert { entity, entry } => {
                self.records.insert(*entity, entry.clone());
                self.replicated.insert(*entity);
            }
            SyncPacket::Remove { entity } => {
                self.records.remove(entity);
                self.replicated.remove(entity);
            }
        }
    }

    /// Replaces the replicated record set with a peer's snapshot. Replicated
    /// records absent from the snapshot were removed while this client was
    /// not listening and are dropped; local-only records are kept. Used when
    /// a client rejoins after missing traffic.
    pub fn resync(&mut self, snapshot: Vec<(Entity, QueueEntry)>) {
        let keep: HashSet<Entity> = snapshot.iter().map(|(entity, _)| *entity).collect();
        let stale: Vec<Entity> = self
            .replicated
            .iter()
            .filter(|entity| !keep.contains(entity))
            .copied()
            .collect();
        for entity in stale {
            self.records.remove(&entity);
            self.replicated.remove(&entity);
        }
        for (entity, entry) in snapshot {
            self.records.insert(entity, entry);
            self.replicated.insert(entity);
        }
    }

    /// Snapshot of the replicated records, used to seed a late joiner.
    pub fn replicated_records(&self) -> Vec<(Entity, QueueEntry)> {
        self.records
            .iter()
            .filter(|(entity, _)| self.replicated.contains(entity))
            .map(|(entity, entry)| (*entity, entry.clone()))
            .collect()
    }

    fn post(&self, packet: SyncPacket) {
        match packet.encode() {
            Ok(payload) => self.net.borrow_mut().post(self.client_id, payload),
            Err(err) => warn!("dropping unencodable sync packet: {}", err),
        }
    }
}

impl EntityStore for SimStore {
    fn session_ready(&self) -> bool {
        self.net.borrow().now_ms >= self.ready_at_ms
    }

    fn spawn(&mut self) -> Entity {
        let entity = Entity((self.client_id << CLIENT_RANGE_BITS) | self.next);
        self.next += 1;
        entity
    }

    fn create(&mut self, entity: Entity, entry: QueueEntry) {
        self.records.insert(entity, entry);
    }

    fn mark_replicated(&mut self, entity: Entity) {
        self.replicated.insert(entity);
        if let Some(entry) = self.records.get(&entity) {
            self.post(SyncPacket::Upsert {
                entity,
                entry: entry.clone(),
            });
        }
    }

    fn get(&self, entity: Entity) -> Option<QueueEntry> {
        self.records.get(&entity).cloned()
    }

    fn set(&mut self, entity: Entity, entry: QueueEntry) {
        self.records.insert(entity, entry.clone());
        if self.replicated.contains(&entity) {
            self.post(SyncPacket::Upsert { entity, entry });
        }
    }

    fn remove(&mut self, entity: Entity) {
        self.records.remove(&entity);
        if self.replicated.remove(&entity) {
            self.post(SyncPacket::Remove { entity });
        }
    }

    fn entries(&self) -> Vec<(Entity, QueueEntry)> {
        self.records
            .iter()
            .map(|(entity, entry)| (*entity, entry.clone()))
            .collect()
    }
}
