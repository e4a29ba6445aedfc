//! The simulated transport and shared world state.
//!
//! One `SimNet` is shared by every simulated client through `Rc<RefCell<_>>`.
//! It owns the simulation clock, the in-flight packet queue, the connected
//! roster, and the per-client departure-notice mailboxes. Packets are delayed
//! by a configurable base latency plus seeded random jitter, so reorderings
//! are reproducible run to run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub struct InFlight {
    pub from_client: u32,
    pub deliver_at: u64,
    pub payload: Vec<u8>,
}

pub struct SimNet {
    pub now_ms: u64,
    latency_ms: u64,
    jitter_ms: u64,
    rng: StdRng,
    in_flight: Vec<InFlight>,
    /// participant id -> display name, for every connected participant
    roster: HashMap<String, String>,
    /// client id -> departure notices not yet polled by that client
    departures: HashMap<u32, Vec<String>>,
}

impl SimNet {
    pub fn new(latency_ms: u64, jitter_ms: u64, seed: u64) -> Self {
        Self {
            now_ms: 0,
            latency_ms,
            jitter_ms,
            rng: StdRng::seed_from_u64(seed),
            in_flight: Vec::new(),
            roster: HashMap::new(),
            departures: HashMap::new(),
        }
    }

    /// Queues a payload for delivery to every other client.
    pub fn post(&mut self, from_client: u32, payload: Vec<u8>) {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            self.rng.gen_range(0..=self.jitter_ms)
        };
        self.in_flight.push(InFlight {
            from_client,
            deliver_at: self.now_ms + self.latency_ms + jitter,
            payload,
        });
    }

    /// Removes and returns every packet whose delivery time has arrived.
    pub fn drain_due(&mut self) -> Vec<InFlight> {
        let now = self.now_ms;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|packet| packet.deliver_at <= now);
        self.in_flight = pending;
        due
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn register(&mut self, participant_id: &str, display_name: &str) {
        self.roster
            .insert(participant_id.to_string(), display_name.to_string());
    }

    pub fn unregister(&mut self, participant_id: &str) {
        self.roster.remove(participant_id);
    }

    pub fn is_connected(&self, participant_id: &str) -> bool {
        self.roster.contains_key(participant_id)
    }

    pub fn display_name(&self, participant_id: &str) -> Option<String> {
        self.roster.get(participant_id).cloned()
    }

    /// Delivers a "participant left" notice to one client's mailbox.
    pub fn notify_departure(&mut self, to_client: u32, participant_id: &str) {
        self.departures
            .entry(to_client)
            .or_default()
            .push(participant_id.to_string());
    }

    pub fn take_departures(&mut self, client_id: u32) -> Vec<String> {
        self.departures.remove(&client_id).unwrap_or_default()
    }
}
