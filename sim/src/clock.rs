//! Simulated clock.
//!
//! Every client reads the same underlying counter, which models loosely
//! synchronized wall clocks without modelling skew. Skew tolerance comes from
//! latency and jitter in the transport instead.

use crate::net::SimNet;
use queue::host::Clock;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct SimClock {
    net: Rc<RefCell<SimNet>>,
}

impl SimClock {
    pub fn new(net: Rc<RefCell<SimNet>>) -> Self {
        Self { net }
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.net.borrow().now_ms
    }
}
