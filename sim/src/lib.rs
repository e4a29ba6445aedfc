//! Deterministic multi-client simulation of the replicated turn queue.
//!
//! Real deployments run one queue engine per client over an eventually
//! consistent replication layer. This crate reproduces that topology inside a
//! single thread: a shared [`net::SimNet`] carries serialized record updates
//! between per-client [`store::SimStore`]s with configurable latency and
//! seeded jitter, and [`world::SimWorld`] steps every client in lockstep.
//!
//! # Example
//!
//! ```
//! use sim::world::{SimOptions, SimWorld};
//!
//! let mut world = SimWorld::new(SimOptions::default());
//! let ada = world.add_participant("Ada").unwrap();
//! let brin = world.add_participant("Brin").unwrap();
//!
//! world.client_mut(ada).engine.join();
//! world.client_mut(brin).engine.join();
//! world.run_for(5_000, 100);
//!
//! assert_eq!(world.client(ada).engine.ordered_queue().len(), 2);
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one seeded generator in the transport, so a
//! given `SimOptions` produces the same packet schedule, the same
//! reorderings, and the same final queue on every run.

pub mod clock;
pub mod identity;
pub mod net;
pub mod packet;
pub mod store;
pub mod world;
