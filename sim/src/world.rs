//! Multi-client world driver.
//!
//! Owns a set of simulated clients that share one transport and steps them in
//! lockstep. Each client runs its own engine instance against its own copy of
//! the replicated records, so tests can assert that independently ticking
//! clients converge on the same queue.

use crate::clock::SimClock;
use crate::identity::SimIdentity;
use crate::net::SimNet;
use crate::packet::SyncPacket;
use crate::store::SimStore;
use log::warn;
use queue::area::{AreaAction, AreaEnforcer};
use queue::config::{ConfigError, QueueConfig};
use queue::engine::QueueEngine;
use queue::host::Avatar;
use queue::math::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

pub struct SimOptions {
    pub latency_ms: u64,
    pub jitter_ms: u64,
    pub seed: u64,
    /// Delay before a new client's identity handshake completes.
    pub identity_delay_ms: u64,
    /// Delay before a new client's network session is established.
    pub session_ready_delay_ms: u64,
    pub config: QueueConfig,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            latency_ms: 100,
            jitter_ms: 0,
            seed: 7,
            identity_delay_ms: 0,
            session_ready_delay_ms: 0,
            config: QueueConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct SimAvatar {
    position: Vec3,
}

impl Avatar for SimAvatar {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn teleport(&mut self, to: Vec3) {
        self.position = to;
    }
}

pub type SimEngine = QueueEngine<SimStore, SimIdentity, SimClock>;

pub struct SimClient {
    pub participant_id: String,
    pub display_name: String,
    pub client_id: u32,
    pub connected: bool,
    pub engine: SimEngine,
    pub avatar: SimAvatar,
    pub enforcer: Option<AreaEnforcer>,
}

pub struct SimWorld {
    net: Rc<RefCell<SimNet>>,
    clients: Vec<SimClient>,
    opts: SimOptions,
    next_client_id: u32,
}

impl SimWorld {
    pub fn new(opts: SimOptions) -> Self {
        Self {
            net: Rc::new(RefCell::new(SimNet::new(
                opts.latency_ms,
                opts.jitter_ms,
                opts.seed,
            ))),
            clients: Vec::new(),
            opts,
            next_client_id: 0,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.net.borrow().now_ms
    }

    pub fn participant_count(&self) -> usize {
        self.clients.len()
    }

    pub fn client(&self, ix: usize) -> &SimClient {
        &self.clients[ix]
    }

    pub fn client_mut(&mut self, ix: usize) -> &mut SimClient {
        &mut self.clients[ix]
    }

    /// Spawns a new client into the world and returns its index. The client
    /// starts with a snapshot of the records already replicated to connected
    /// peers, which is what a late joiner receives on session establishment.
    pub fn add_participant(&mut self, display_name: &str) -> Result<usize, ConfigError> {
        let client_id = self.next_client_id;
        self.next_client_id += 1;
        let participant_id = format!("0x{:040x}", u64::from(client_id) + 1);

        let now = self.now_ms();
        self.net.borrow_mut().register(&participant_id, display_name);

        let mut store = SimStore::new(
            client_id,
            Rc::clone(&self.net),
            now + self.opts.session_ready_delay_ms,
        );
        for peer in self.clients.iter().filter(|c| c.connected) {
            for (entity, entry) in peer.engine.store().replicated_records() {
                store.apply_remote(&SyncPacket::Upsert { entity, entry });
            }
        }

        let identity = SimIdentity::new(
            client_id,
            participant_id.clone(),
            now + self.opts.identity_delay_ms,
            Rc::clone(&self.net),
        );
        let engine = QueueEngine::new(
            store,
            identity,
            SimClock::new(Rc::clone(&self.net)),
            self.opts.config.clone(),
        )?;

        self.clients.push(SimClient {
            participant_id,
            display_name: display_name.to_string(),
            client_id,
            connected: true,
            engine,
            avatar: SimAvatar::default(),
            enforcer: AreaEnforcer::from_config(&self.opts.config),
        });
        Ok(self.clients.len() - 1)
    }

    /// Drops a client from the scene. Remaining clients receive a departure
    /// notice and take over cleanup of its records after the grace window.
    pub fn disconnect(&mut self, ix: usize) {
        let participant_id = self.clients[ix].participant_id.clone();
        self.clients[ix].connected = false;

        let mut net = self.net.borrow_mut();
        net.unregister(&participant_id);
        for peer in self.clients.iter().filter(|c| c.connected) {
            net.notify_departure(peer.client_id, &participant_id);
        }
    }

    /// Brings a dropped client back within (or after) the grace window. The
    /// client missed every packet delivered while it was away, so its store
    /// is resynced from a connected peer's snapshot before replication
    /// resumes; mutations and removals from the blip are applied, records the
    /// peers no longer hold are dropped.
    pub fn reconnect(&mut self, ix: usize) {
        let snapshot = self
            .clients
            .iter()
            .filter(|c| c.connected)
            .map(|c| c.engine.store().replicated_records())
            .next();

        let client = &mut self.clients[ix];
        client.connected = true;
        self.net
            .borrow_mut()
            .register(&client.participant_id, &client.display_name);
        if let Some(snapshot) = snapshot {
            client.engine.store_mut().resync(snapshot);
        }
    }

    /// Advances the world by one step: moves the clock, delivers due packets
    /// to every other connected client, ticks each engine, and applies any
    /// play-area action to the local avatar.
    pub fn step(&mut self, dt_ms: u64) {
        {
            let mut net = self.net.borrow_mut();
            net.now_ms += dt_ms;
        }

        let due = self.net.borrow_mut().drain_due();
        for in_flight in due {
            let packet = match SyncPacket::decode(&in_flight.payload) {
                Ok(packet) => packet,
                Err(err) => {
                    warn!("dropping undecodable packet: {}", err);
                    continue;
                }
            };
            for client in self
                .clients
                .iter_mut()
                .filter(|c| c.connected && c.client_id != in_flight.from_client)
            {
                client.engine.store_mut().apply_remote(&packet);
            }
        }

        let dt = dt_ms as f32 / 1000.0;
        let now = self.now_ms();
        for client in self.clients.iter_mut().filter(|c| c.connected) {
            client.engine.tick(dt);
            if let Some(enforcer) = client.enforcer.as_mut() {
                let local_active = client.engine.is_local_participant_active();
                match enforcer.tick(dt, client.avatar.position(), local_active, now) {
                    Some(AreaAction::TeleportOut(to)) => client.avatar.teleport(to),
                    Some(AreaAction::EndTurn) => client.engine.advance_turn(true),
                    None => {}
                }
            }
        }
    }

    /// Steps the world repeatedly until `total_ms` of simulated time passes.
    pub fn run_for(&mut self, total_ms: u64, step_ms: u64) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            self.step(step_ms);
            elapsed += step_ms;
        }
    }
}
