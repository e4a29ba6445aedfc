//! Simulated identity service.

use crate::net::SimNet;
use queue::host::IdentityProvider;
use std::cell::RefCell;
use std::rc::Rc;

/// One client's view of identity. Resolution of the local id is delayed to
/// model the handshake that real clients go through on scene load.
pub struct SimIdentity {
    client_id: u32,
    participant_id: String,
    resolves_at_ms: u64,
    net: Rc<RefCell<SimNet>>,
}

impl SimIdentity {
    pub fn new(
        client_id: u32,
        participant_id: String,
        resolves_at_ms: u64,
        net: Rc<RefCell<SimNet>>,
    ) -> Self {
        Self {
            client_id,
            participant_id,
            resolves_at_ms,
            net,
        }
    }
}

impl IdentityProvider for SimIdentity {
    fn local_participant(&self) -> Option<String> {
        if self.net.borrow().now_ms >= self.resolves_at_ms {
            Some(self.participant_id.clone())
        } else {
            None
        }
    }

    fn display_name(&self, participant_id: &str) -> Option<String> {
        self.net.borrow().display_name(participant_id)
    }

    fn is_connected(&self, participant_id: &str) -> bool {
        self.net.borrow().is_connected(participant_id)
    }

    fn poll_departures(&mut self) -> Vec<String> {
        self.net.borrow_mut().take_departures(self.client_id)
    }
}
