//! # Mini-Game Turn Queue
//!
//! This library coordinates turn-taking at a single-player mini-game station
//! shared by many concurrent visitors of a multiplayer 3D scene. Visitors
//! queue for a turn, play, and hand the station over; every connected client
//! runs its own copy of this logic and independently reaches the same
//! conclusion about who currently holds the turn.
//!
//! ## Core Responsibilities
//!
//! ### Queue Ordering and Election
//! A replicated `QueueEntry` record represents each participant's place in
//! line. Queue order is a pure function of the replicated records, so every
//! client that sees the same snapshot computes the same order and the same
//! active participant. There is no server and no coordinator.
//!
//! ### Self-Authority
//! The one rule that keeps the protocol convergent: a client only ever writes
//! the turn-state fields of records it owns. Electing yourself, starting your
//! turn, and ending it are all writes to your own record. The only exception
//! is the removal of records left behind by disconnected participants, which
//! any client may perform because the owner is no longer around to do it.
//!
//! ### Failure Recovery
//! Disconnected participants are cleaned up after a grace window, stuck or
//! idle active players are force-advanced by soft timeouts, and an optional
//! play-area enforcer keeps spectators out of the field and forfeits the turn
//! of an active player who walks away.
//!
//! ## Module Organization
//!
//! - [`entry`] — the replicated `QueueEntry` component and entity handle
//! - [`host`] — capability traits the host engine must provide (store,
//!   identity, clock, avatar)
//! - [`engine`] — the queue engine: join/leave, ordering, election, turn
//!   change notification, per-tick orchestration
//! - [`presence`] — grace-window reconciliation of departed participants
//! - [`governor`] — max turn duration and inactivity timeouts
//! - [`area`] — optional play-area containment
//! - [`config`] — configuration surface and fail-fast validation
//! - [`math`] — the small amount of vector math the area checks need
//!
//! ## Concurrency Model
//!
//! There is no shared-memory concurrency anywhere in this crate. Each client
//! is a single-threaded cooperative scheduler driven by a fixed-step scene
//! tick; all engine logic runs synchronously inside tick callbacks and never
//! blocks. Distributed concurrency across clients is absorbed by the
//! replicated store, which is eventually consistent with last-write-wins
//! fields and no ordering guarantees.

pub mod area;
pub mod config;
pub mod engine;
pub mod entry;
pub mod governor;
pub mod host;
pub mod math;
pub mod presence;
