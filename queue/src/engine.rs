//! The queue engine: ordering, election, and per-tick orchestration.
//!
//! One `QueueEngine` instance runs on every connected client. Each instance
//! only ever writes records owned by its own participant (plus the
//! origin-agnostic cleanup of departed participants' records), and derives
//! everything else — queue order, the active participant, turn changes — as
//! a pure function of the replicated snapshot. That discipline is what makes
//! independently ticking clients converge without a coordinator.

use crate::config::{ConfigError, QueueConfig};
use crate::entry::{Entity, QueueEntry};
use crate::governor::{TurnExpiry, TurnGovernor};
use crate::host::{Clock, EntityStore, IdentityProvider};
use crate::presence::PresenceReconciler;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Single-slot turn-change callback. Setting a new one replaces the old one;
/// the host scene is expected to register exactly one handler.
pub type TurnListener = Box<dyn FnMut(Option<&QueueEntry>)>;

pub struct QueueEngine<S, I, C> {
    store: S,
    identity: I,
    clock: C,
    presence: PresenceReconciler,
    governor: TurnGovernor,
    listener: Option<TurnListener>,
    /// Memoized identity lookup; the id is stable for the process lifetime.
    cached_local_id: Option<String>,
    /// Set when a join was requested before the network session was ready.
    pending_join: bool,
    /// Last participant a turn-change notification fired for on this client.
    last_known_active: Option<String>,
    /// Accumulated frame time; heavy work runs once per second of it.
    timer: f32,
}

impl<S, I, C> QueueEngine<S, I, C>
where
    S: EntityStore,
    I: IdentityProvider,
    C: Clock,
{
    /// Wires the engine to its collaborators. Fails fast on a rejected
    /// configuration — that is a host-scene programming error, not a runtime
    /// condition.
    pub fn new(store: S, identity: I, clock: C, config: QueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            presence: PresenceReconciler::new(config.departure_grace_ms),
            governor: TurnGovernor::new(config.max_turn_ms, config.inactivity_timeout_ms),
            store,
            identity,
            clock,
            listener: None,
            cached_local_id: None,
            pending_join: false,
            last_known_active: None,
            timer: 0.0,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Registers the turn-change callback, replacing any previous one.
    pub fn set_turn_listener(&mut self, listener: TurnListener) {
        self.listener = Some(listener);
    }

    /// The local participant's stable id, once identity has resolved.
    pub fn local_participant_id(&self) -> Option<String> {
        self.cached_local_id
            .clone()
            .or_else(|| self.identity.local_participant())
    }

    /// Display name lookup for UI collaborators.
    pub fn display_name(&self, participant_id: &str) -> Option<String> {
        self.identity.display_name(participant_id)
    }

    /// Whether a join request is parked waiting for the session.
    pub fn pending_join(&self) -> bool {
        self.pending_join
    }

    /// Puts the local participant in line. Idempotent: repeated calls while
    /// already queued or already pending are no-ops. If identity or the
    /// network session is not ready yet, the request parks and is retried on
    /// each tick.
    pub fn join(&mut self) {
        let Some(local_id) = self.local_participant_id() else {
            debug!("join requested before identity resolved, deferring");
            self.pending_join = true;
            return;
        };
        if self.is_queued(&local_id) {
            self.pending_join = false;
            return;
        }
        if !self.store.session_ready() {
            debug!("network session not ready, join parked for {}", local_id);
            self.pending_join = true;
            return;
        }

        let now = self.clock.now_ms();
        let entity = self.store.spawn();
        self.store.create(entity, QueueEntry::new(local_id.clone(), now));
        self.store.mark_replicated(entity);
        self.pending_join = false;
        info!("{} joined the queue at {}", local_id, now);
    }

    /// Leaves the queue, ending the turn if the local participant holds it.
    /// A finished participant is removed entirely — rejoining starts a fresh
    /// entry at the back of the line. Also abandons any parked join.
    pub fn leave(&mut self) {
        self.pending_join = false;
        let Some(local_id) = self.local_participant_id() else {
            return;
        };
        if self.is_local_participant_active() {
            self.advance_turn(false);
        } else {
            self.remove_participant(&local_id);
            self.emit_if_changed();
        }
    }

    /// All live entries sorted ascending by `joined_at`, ties broken by
    /// participant id. Pure read; every client computes the same order from
    /// the same replicated snapshot.
    pub fn ordered_queue(&self) -> Vec<QueueEntry> {
        self.ordered_records()
            .into_iter()
            .map(|(_, entry)| entry)
            .collect()
    }

    /// The entry currently holding the turn, if any.
    pub fn active_entry(&self) -> Option<QueueEntry> {
        self.active_record().map(|(_, entry)| entry)
    }

    /// True iff the front of the queue is active and owned by the local
    /// participant. During the brief window between a queue mutation and the
    /// next election the front can be inactive; callers must tolerate that.
    pub fn is_local_participant_active(&self) -> bool {
        let Some(local_id) = self.local_participant_id() else {
            return false;
        };
        match self.ordered_records().first() {
            Some((_, front)) => front.active && front.participant_id == local_id,
            None => false,
        }
    }

    /// The turn-election step. Unless forced, only the active participant's
    /// own client may advance. The departing active entry is removed outright
    /// (it does not go to the back of the line), and only the owner of the
    /// new front entry writes the activation onto its own record — every
    /// other client merely observes the replicated result.
    pub fn advance_turn(&mut self, force: bool) {
        let Some(local_id) = self.local_participant_id() else {
            return;
        };
        if !force {
            match self.active_record() {
                Some((_, entry)) if entry.participant_id == local_id => {}
                _ => return,
            }
        }

        for (entity, entry) in self.store.entries() {
            if entry.active {
                debug!("removing finished entry for {}", entry.participant_id);
                self.store.remove(entity);
            }
        }

        if let Some((entity, mut entry)) = self.ordered_records().into_iter().next() {
            if entry.participant_id == local_id {
                let now = self.clock.now_ms();
                entry.active = true;
                entry.active_since = now;
                self.store.set(entity, entry);
                self.governor.turn_started(now);
                info!("{} now holds the turn", local_id);
            }
        }

        self.emit_if_changed();
    }

    /// Reports a qualifying input from the active participant, resetting the
    /// inactivity window.
    pub fn record_activity(&mut self) {
        let now = self.clock.now_ms();
        self.governor.record_activity(now);
    }

    /// Per-frame system. Accumulates frame time and runs the heavy work —
    /// pending-join retry, presence reconciliation, election bootstrap,
    /// change notification, turn limits — roughly once per second.
    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer < 1.0 {
            return;
        }
        self.timer = 0.0;

        let now = self.clock.now_ms();

        if self.cached_local_id.is_none() {
            self.cached_local_id = self.identity.local_participant();
        }

        if self.pending_join {
            self.join();
        }

        for participant_id in self.identity.poll_departures() {
            debug!("departure notice for {}", participant_id);
            self.presence.note_departure(participant_id, now);
        }
        let identity = &self.identity;
        let stale = self.presence.reconcile(now, |id| identity.is_connected(id));
        for participant_id in stale {
            info!("removing disconnected participant {} from the queue", participant_id);
            self.remove_participant(&participant_id);
        }

        let active_count = self
            .store
            .entries()
            .iter()
            .filter(|(_, entry)| entry.active)
            .count();
        if active_count > 1 {
            warn!(
                "observed {} active entries; queue order decides until the next advance",
                active_count
            );
        }

        // Election bootstrap: nobody holds the turn, the front of the line
        // elects itself. Everyone else just waits for the replicated result.
        if active_count == 0 {
            if let Some(local_id) = self.local_participant_id() {
                if let Some((_, front)) = self.ordered_records().into_iter().next() {
                    if front.participant_id == local_id {
                        self.advance_turn(true);
                    }
                }
            }
        }

        self.emit_if_changed();

        if self.is_local_participant_active() {
            let queued = self.ordered_records().len();
            if let Some(entry) = self.active_entry() {
                if let Some(expiry) = self.governor.check(now, entry.active_since, queued) {
                    match expiry {
                        TurnExpiry::MaxDuration => {
                            info!("turn duration limit reached for {}", entry.participant_id)
                        }
                        TurnExpiry::Inactivity => {
                            info!("inactivity limit reached for {}", entry.participant_id)
                        }
                    }
                    self.advance_turn(false);
                }
            }
        }
    }

    /// Dedupes by participant (keeping the record with the smallest
    /// `(joined_at, entity)` pair) and sorts by `(joined_at, participant_id)`.
    /// Deterministic for a given snapshot on every client.
    fn ordered_records(&self) -> Vec<(Entity, QueueEntry)> {
        let mut best: HashMap<String, (Entity, QueueEntry)> = HashMap::new();
        for (entity, entry) in self.store.entries() {
            match best.get(&entry.participant_id) {
                Some((held_entity, held))
                    if (held.joined_at, held_entity.0) <= (entry.joined_at, entity.0) => {}
                _ => {
                    best.insert(entry.participant_id.clone(), (entity, entry));
                }
            }
        }
        let mut queue: Vec<(Entity, QueueEntry)> = best.into_values().collect();
        queue.sort_by(|(_, a), (_, b)| {
            (a.joined_at, a.participant_id.as_str()).cmp(&(b.joined_at, b.participant_id.as_str()))
        });
        queue
    }

    /// First active record in queue order.
    fn active_record(&self) -> Option<(Entity, QueueEntry)> {
        self.ordered_records()
            .into_iter()
            .find(|(_, entry)| entry.active)
    }

    fn is_queued(&self, participant_id: &str) -> bool {
        self.store
            .entries()
            .iter()
            .any(|(_, entry)| entry.participant_id == participant_id)
    }

    fn remove_participant(&mut self, participant_id: &str) {
        for (entity, entry) in self.store.entries() {
            if entry.participant_id == participant_id {
                self.store.remove(entity);
            }
        }
    }

    /// Fires the turn-change callback once per observed transition. A gap
    /// between removal and the next election is not a transition; only a
    /// drained queue is reported as an explicit "none".
    fn emit_if_changed(&mut self) {
        match self.active_record() {
            Some((_, entry)) => {
                if self.last_known_active.as_deref() != Some(entry.participant_id.as_str()) {
                    self.last_known_active = Some(entry.participant_id.clone());
                    if let Some(listener) = self.listener.as_mut() {
                        listener(Some(&entry));
                    }
                }
            }
            None => {
                if self.last_known_active.is_some() && self.ordered_records().is_empty() {
                    self.last_known_active = None;
                    if let Some(listener) = self.listener.as_mut() {
                        listener(None);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashSet};
    use std::rc::Rc;

    /// Single-client in-memory store. Multi-client replication is covered by
    /// the simulation crate and the workspace integration tests.
    #[derive(Default)]
    struct MemStore {
        ready: bool,
        next: u32,
        records: BTreeMap<Entity, QueueEntry>,
        replicated: HashSet<Entity>,
    }

    impl EntityStore for MemStore {
        fn session_ready(&self) -> bool {
            self.ready
        }
        fn spawn(&mut self) -> Entity {
            let entity = Entity(self.next);
            self.next += 1;
            entity
        }
        fn create(&mut self, entity: Entity, entry: QueueEntry) {
            self.records.insert(entity, entry);
        }
        fn mark_replicated(&mut self, entity: Entity) {
            self.replicated.insert(entity);
        }
        fn get(&self, entity: Entity) -> Option<QueueEntry> {
            self.records.get(&entity).cloned()
        }
        fn set(&mut self, entity: Entity, entry: QueueEntry) {
            self.records.insert(entity, entry);
        }
        fn remove(&mut self, entity: Entity) {
            self.records.remove(&entity);
            self.replicated.remove(&entity);
        }
        fn entries(&self) -> Vec<(Entity, QueueEntry)> {
            self.records
                .iter()
                .map(|(entity, entry)| (*entity, entry.clone()))
                .collect()
        }
    }

    #[derive(Default)]
    struct IdentityState {
        local: Option<String>,
        connected: HashSet<String>,
        departures: Vec<String>,
    }

    #[derive(Clone, Default)]
    struct TestIdentity(Rc<RefCell<IdentityState>>);

    impl TestIdentity {
        fn resolved(local: &str) -> Self {
            let identity = TestIdentity::default();
            identity.0.borrow_mut().local = Some(local.to_string());
            identity.connect(local);
            identity
        }
        fn connect(&self, id: &str) {
            self.0.borrow_mut().connected.insert(id.to_string());
        }
        fn depart(&self, id: &str) {
            let mut state = self.0.borrow_mut();
            state.connected.remove(id);
            state.departures.push(id.to_string());
        }
    }

    impl IdentityProvider for TestIdentity {
        fn local_participant(&self) -> Option<String> {
            self.0.borrow().local.clone()
        }
        fn display_name(&self, participant_id: &str) -> Option<String> {
            self.0
                .borrow()
                .connected
                .get(participant_id)
                .map(|id| format!("name-of-{}", id))
        }
        fn is_connected(&self, participant_id: &str) -> bool {
            self.0.borrow().connected.contains(participant_id)
        }
        fn poll_departures(&mut self) -> Vec<String> {
            std::mem::take(&mut self.0.borrow_mut().departures)
        }
    }

    #[derive(Clone, Default)]
    struct TestClock(Rc<std::cell::Cell<u64>>);

    impl TestClock {
        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for TestClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }

    type TestEngine = QueueEngine<MemStore, TestIdentity, TestClock>;

    fn engine_with(config: QueueConfig) -> (TestEngine, TestIdentity, TestClock) {
        let identity = TestIdentity::resolved("0xlocal");
        let clock = TestClock::default();
        clock.advance(1000);
        let store = MemStore {
            ready: true,
            ..MemStore::default()
        };
        let engine =
            QueueEngine::new(store, identity.clone(), clock.clone(), config).unwrap();
        (engine, identity, clock)
    }

    fn engine() -> (TestEngine, TestIdentity, TestClock) {
        engine_with(QueueConfig::default())
    }

    /// Plants a record owned by another participant, as replication would.
    fn plant_remote(engine: &mut TestEngine, id: &str, joined_at: u64, active: bool) -> Entity {
        let entity = Entity(0xF000 + engine.store().entries().len() as u32);
        let mut entry = QueueEntry::new(id, joined_at);
        entry.active = active;
        if active {
            entry.active_since = joined_at;
        }
        engine.store_mut().create(entity, entry);
        entity
    }

    fn capture_listener(engine: &mut TestEngine) -> Rc<RefCell<Vec<Option<String>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        engine.set_turn_listener(Box::new(move |entry| {
            sink.borrow_mut()
                .push(entry.map(|e| e.participant_id.clone()));
        }));
        log
    }

    #[test]
    fn test_join_creates_single_entry() {
        let (mut engine, _, _) = engine();
        engine.join();
        engine.join();

        let queue = engine.ordered_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].participant_id, "0xlocal");
        assert!(!queue[0].active);
        assert!(!engine.pending_join());
    }

    #[test]
    fn test_join_parks_until_session_ready() {
        let identity = TestIdentity::resolved("0xlocal");
        let clock = TestClock::default();
        let store = MemStore::default();
        let mut engine =
            QueueEngine::new(store, identity, clock.clone(), QueueConfig::default()).unwrap();

        engine.join();
        assert!(engine.pending_join());
        assert!(engine.ordered_queue().is_empty());

        engine.store_mut().ready = true;
        clock.advance(1000);
        engine.tick(1.0);

        assert!(!engine.pending_join());
        assert_eq!(engine.ordered_queue().len(), 1);
    }

    #[test]
    fn test_join_parks_until_identity_resolves() {
        let identity = TestIdentity::default();
        let clock = TestClock::default();
        let store = MemStore {
            ready: true,
            ..MemStore::default()
        };
        let mut engine = QueueEngine::new(
            store,
            identity.clone(),
            clock.clone(),
            QueueConfig::default(),
        )
        .unwrap();

        engine.join();
        assert!(engine.pending_join());

        identity.0.borrow_mut().local = Some("0xlocal".to_string());
        identity.connect("0xlocal");
        engine.tick(1.0);

        assert_eq!(engine.ordered_queue().len(), 1);
    }

    #[test]
    fn test_leave_abandons_parked_join() {
        let identity = TestIdentity::resolved("0xlocal");
        let clock = TestClock::default();
        let store = MemStore::default();
        let mut engine =
            QueueEngine::new(store, identity, clock, QueueConfig::default()).unwrap();

        engine.join();
        assert!(engine.pending_join());
        engine.leave();
        assert!(!engine.pending_join());

        engine.store_mut().ready = true;
        engine.tick(1.0);
        assert!(engine.ordered_queue().is_empty());
    }

    #[test]
    fn test_ordering_by_joined_at_with_id_tiebreak() {
        let (mut engine, _, _) = engine();
        plant_remote(&mut engine, "0xccc", 300, false);
        plant_remote(&mut engine, "0xaaa", 100, false);
        plant_remote(&mut engine, "0xbbb", 100, false);

        let ids: Vec<String> = engine
            .ordered_queue()
            .into_iter()
            .map(|e| e.participant_id)
            .collect();
        assert_eq!(ids, vec!["0xaaa", "0xbbb", "0xccc"]);
    }

    #[test]
    fn test_duplicate_entries_deduped_deterministically() {
        let (mut engine, _, _) = engine();
        plant_remote(&mut engine, "0xaaa", 200, false);
        plant_remote(&mut engine, "0xaaa", 100, false);

        let queue = engine.ordered_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].joined_at, 100);
    }

    #[test]
    fn test_election_bootstrap_elects_front_owner_only() {
        let (mut engine, _, clock) = engine();
        engine.join();
        plant_remote(&mut engine, "0xother", 5000, false);

        clock.advance(1000);
        engine.tick(1.0);

        let entry = engine.active_entry().unwrap();
        assert_eq!(entry.participant_id, "0xlocal");
        assert!(engine.is_local_participant_active());
    }

    #[test]
    fn test_bootstrap_no_op_when_front_is_remote() {
        let (mut engine, _, clock) = engine();
        plant_remote(&mut engine, "0xother", 100, false);
        engine.join();

        clock.advance(1000);
        engine.tick(1.0);

        // The local client never writes to the remote front entry.
        assert!(engine.active_entry().is_none());
        assert!(!engine.is_local_participant_active());
    }

    #[test]
    fn test_advance_turn_refused_for_non_active_client() {
        let (mut engine, _, _) = engine();
        plant_remote(&mut engine, "0xother", 100, true);
        engine.join();

        engine.advance_turn(false);

        // The remote active entry is untouched.
        let entry = engine.active_entry().unwrap();
        assert_eq!(entry.participant_id, "0xother");
        assert_eq!(engine.ordered_queue().len(), 2);
    }

    #[test]
    fn test_end_turn_removes_entry_outright() {
        let (mut engine, _, clock) = engine();
        engine.join();
        clock.advance(1000);
        engine.tick(1.0);
        assert!(engine.is_local_participant_active());

        plant_remote(&mut engine, "0xother", clock.now_ms(), false);
        engine.leave();

        // Removed, not requeued at the back.
        let queue = engine.ordered_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].participant_id, "0xother");
    }

    #[test]
    fn test_listener_fires_once_per_transition() {
        let (mut engine, _, clock) = engine();
        let log = capture_listener(&mut engine);

        engine.join();
        clock.advance(1000);
        engine.tick(1.0);
        clock.advance(1000);
        engine.tick(1.0);
        clock.advance(1000);
        engine.tick(1.0);

        assert_eq!(&*log.borrow(), &[Some("0xlocal".to_string())]);
    }

    #[test]
    fn test_listener_reports_drained_queue_once() {
        let (mut engine, _, clock) = engine();
        let log = capture_listener(&mut engine);

        engine.join();
        clock.advance(1000);
        engine.tick(1.0);
        engine.leave();
        clock.advance(1000);
        engine.tick(1.0);

        assert_eq!(
            &*log.borrow(),
            &[Some("0xlocal".to_string()), None]
        );
    }

    #[test]
    fn test_listener_observes_remote_activation() {
        let (mut engine, _, clock) = engine();
        let log = capture_listener(&mut engine);

        plant_remote(&mut engine, "0xother", 100, true);
        clock.advance(1000);
        engine.tick(1.0);

        assert_eq!(&*log.borrow(), &[Some("0xother".to_string())]);
    }

    #[test]
    fn test_max_duration_advances_turn() {
        let (mut engine, _, clock) = engine_with(QueueConfig {
            max_turn_ms: Some(60_000),
            ..QueueConfig::default()
        });
        engine.join();
        clock.advance(1000);
        engine.tick(1.0);
        assert!(engine.is_local_participant_active());
        plant_remote(&mut engine, "0xother", clock.now_ms(), false);

        clock.advance(60_001);
        engine.tick(1.0);

        // Local entry removed; the remote front will elect itself elsewhere.
        assert!(!engine.is_local_participant_active());
        let queue = engine.ordered_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].participant_id, "0xother");
    }

    #[test]
    fn test_lone_participant_keeps_playing() {
        let (mut engine, _, clock) = engine_with(QueueConfig {
            max_turn_ms: Some(5_000),
            inactivity_timeout_ms: Some(5_000),
            ..QueueConfig::default()
        });
        engine.join();
        clock.advance(1000);
        engine.tick(1.0);

        clock.advance(600_000);
        engine.tick(1.0);

        assert!(engine.is_local_participant_active());
    }

    #[test]
    fn test_activity_defers_inactivity_expiry() {
        let (mut engine, _, clock) = engine_with(QueueConfig {
            inactivity_timeout_ms: Some(3_000),
            ..QueueConfig::default()
        });
        engine.join();
        clock.advance(1000);
        engine.tick(1.0);
        plant_remote(&mut engine, "0xother", clock.now_ms(), false);

        for _ in 0..5 {
            clock.advance(2_000);
            engine.record_activity();
            engine.tick(1.0);
            assert!(engine.is_local_participant_active());
        }

        clock.advance(3_000);
        engine.tick(1.0);
        assert!(!engine.is_local_participant_active());
    }

    #[test]
    fn test_departed_participant_removed_after_grace() {
        let (mut engine, identity, clock) = engine();
        plant_remote(&mut engine, "0xgone", 100, true);
        identity.connect("0xgone");
        clock.advance(1000);
        engine.tick(1.0);

        identity.depart("0xgone");
        clock.advance(1000);
        engine.tick(1.0);
        // Inside the grace window: still queued.
        assert_eq!(engine.ordered_queue().len(), 1);

        clock.advance(2000);
        engine.tick(1.0);
        assert!(engine.ordered_queue().is_empty());
    }

    #[test]
    fn test_rejoining_participant_survives_grace() {
        let (mut engine, identity, clock) = engine();
        plant_remote(&mut engine, "0xblip", 100, false);
        identity.connect("0xblip");
        clock.advance(1000);
        engine.tick(1.0);

        identity.depart("0xblip");
        clock.advance(1000);
        engine.tick(1.0);
        identity.connect("0xblip");

        clock.advance(3000);
        engine.tick(1.0);
        assert_eq!(engine.ordered_queue().len(), 1);
    }

    #[test]
    fn test_tick_gate_accumulates_frame_time() {
        let (mut engine, _, clock) = engine();
        engine.join();
        clock.advance(1000);

        engine.tick(0.3);
        engine.tick(0.3);
        assert!(engine.active_entry().is_none());

        engine.tick(0.5);
        assert!(engine.active_entry().is_some());
    }

    #[test]
    fn test_rejected_config_fails_construction() {
        let identity = TestIdentity::resolved("0xlocal");
        let result = QueueEngine::new(
            MemStore::default(),
            identity,
            TestClock::default(),
            QueueConfig {
                max_turn_ms: Some(0),
                ..QueueConfig::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_display_name_passthrough() {
        let (engine, _, _) = engine();
        assert_eq!(
            engine.display_name("0xlocal").as_deref(),
            Some("name-of-0xlocal")
        );
        assert_eq!(engine.display_name("0xunknown"), None);
    }
}
