//! The wizard store: single source of truth for the draft and step.
//!
//! Wraps the pure transition function with the impure world: the two
//! transition timers, write-through persistence into a `KvStore`, and watch
//! channels the presentation layer can observe instead of polling.
//!
//! # Concurrency
//!
//! One `tokio::sync::Mutex` serializes event processing, so the memory
//! mutation and its mirror write happen atomically with respect to other
//! events. Timer callbacks re-enter through the same path. A store handle is
//! cheap to clone; clones share the same state. Independent stores (e.g. in
//! tests) never share anything.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::kv::{KvStore, DRAFT_KEY, STEP_KEY, SUBMITTED_KEY};
use super::state::{Direction, WizardState};
use super::transition::{transition, TransitionResult};
use crate::draft::{ApplicationDraft, Field, Step};

/// The two delays of a step transition: the exit animation plays during
/// `swap_delay`, then the step content swaps, then the entry animation plays
/// during `settle_delay`.
#[derive(Debug, Clone, Copy)]
pub struct TransitionTiming {
    pub swap_delay: Duration,
    pub settle_delay: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            swap_delay: Duration::from_millis(200),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// What the presentation layer needs to render the wizard chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub step: Step,
    pub is_transitioning: bool,
    pub direction: Direction,
}

impl WizardSnapshot {
    fn of(state: &WizardState) -> Self {
        Self {
            step: state.step,
            is_transitioning: state.is_transitioning(),
            direction: state.direction,
        }
    }
}

struct Shared {
    state: Mutex<WizardState>,
    /// Set once `initialize()` has read the mirrors. Until then, state
    /// changes are not written through, so an empty default cannot clobber a
    /// not-yet-read mirror.
    ready: AtomicBool,
    kv: Arc<dyn KvStore>,
    timing: TransitionTiming,
    snapshot_tx: watch::Sender<WizardSnapshot>,
    scroll_tx: watch::Sender<u64>,
}

/// Handle to a wizard store. Clones share the same store instance.
#[derive(Clone)]
pub struct WizardStore {
    shared: Arc<Shared>,
}

impl WizardStore {
    pub fn new(kv: Arc<dyn KvStore>, timing: TransitionTiming) -> Self {
        let initial = WizardState::new();
        let (snapshot_tx, _) = watch::channel(WizardSnapshot::of(&initial));
        let (scroll_tx, _) = watch::channel(0u64);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(initial),
                ready: AtomicBool::new(false),
                kv,
                timing,
                snapshot_tx,
                scroll_tx,
            }),
        }
    }

    pub fn with_default_timing(kv: Arc<dyn KvStore>) -> Self {
        Self::new(kv, TransitionTiming::default())
    }

    /// Rehydrate from the persistence mirror. Run exactly once by whoever
    /// composes the store, before any other operation.
    ///
    /// If the submitted flag is present, both mirrors and the flag are
    /// erased and the in-memory draft stays at its empty default, so a
    /// just-submitted session cannot resurrect stale data. A mirror that
    /// fails to parse counts as "no saved draft".
    pub async fn initialize(&self) -> Result<()> {
        if self.shared.ready.load(Ordering::SeqCst) {
            warn!("wizard store already initialized; ignoring");
            return Ok(());
        }

        if self.shared.kv.get(SUBMITTED_KEY)?.is_some() {
            info!("previous session completed submission; clearing saved draft");
            self.shared.kv.remove(DRAFT_KEY)?;
            self.shared.kv.remove(STEP_KEY)?;
            self.shared.kv.remove(SUBMITTED_KEY)?;
            self.shared.ready.store(true, Ordering::SeqCst);
            return Ok(());
        }

        let mut guard = self.shared.state.lock().await;
        if let Some(raw) = self.shared.kv.get(DRAFT_KEY)? {
            match serde_json::from_str::<ApplicationDraft>(&raw) {
                Ok(draft) => guard.draft = draft,
                Err(e) => warn!("discarding unreadable draft mirror: {e}"),
            }
        }
        if let Some(raw) = self.shared.kv.get(STEP_KEY)? {
            match Step::from_mirror(&raw) {
                Some(step) => guard.step = step,
                None => warn!("discarding unreadable step mirror {raw:?}"),
            }
        }
        let snapshot = WizardSnapshot::of(&guard);
        drop(guard);

        self.shared.snapshot_tx.send_replace(snapshot);
        self.shared.ready.store(true, Ordering::SeqCst);
        info!(step = %snapshot.step, "wizard store ready");
        Ok(())
    }

    // =========================================================================
    // Public operations
    // =========================================================================

    /// Write a single field immediately ("on field exit" auto-save).
    /// A value identical to the current one is a no-op and is not
    /// re-persisted.
    pub async fn update_field(&self, field: Field, value: impl Into<String>) {
        self.process(Event::FieldChanged {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Shallow-merge the given fields into the draft (step confirmation).
    pub async fn update_fields(&self, patch: Vec<(Field, String)>) {
        self.process(Event::FieldsMerged { patch }).await;
    }

    /// Request moving one step forward. Returns immediately; the step swaps
    /// and settles asynchronously on the transition timers.
    pub async fn advance(&self) {
        self.process(Event::AdvanceRequested).await;
    }

    /// Request moving one step backward.
    pub async fn retreat(&self) {
        self.process(Event::RetreatRequested).await;
    }

    /// Request a specific step. The target is clamped to the valid range;
    /// requesting the current step does nothing at all.
    pub async fn jump_to_step(&self, target: i64) {
        self.process(Event::JumpRequested { target }).await;
    }

    /// Reset the draft to defaults, the step to the first one, and erase
    /// both persisted mirrors.
    pub async fn reset_draft(&self) {
        self.process(Event::ResetRequested).await;
    }

    /// Record that the application was submitted. The next session's
    /// `initialize()` consumes the flag and starts from an empty draft.
    pub fn mark_submitted(&self) {
        if let Err(e) = self.shared.kv.set(SUBMITTED_KEY, "1") {
            error!("Failed to record submitted flag: {e:#}");
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub async fn draft(&self) -> ApplicationDraft {
        self.shared.state.lock().await.draft.clone()
    }

    pub async fn current_step(&self) -> Step {
        self.shared.state.lock().await.step
    }

    pub async fn is_transitioning(&self) -> bool {
        self.shared.state.lock().await.is_transitioning()
    }

    pub async fn direction(&self) -> Direction {
        self.shared.state.lock().await.direction
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> WizardSnapshot {
        *self.shared.snapshot_tx.borrow()
    }

    /// Observe step/transition changes without polling.
    pub fn subscribe(&self) -> watch::Receiver<WizardSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Counter bumped every time the wizard asks for a scroll to top.
    pub fn scroll_requests(&self) -> watch::Receiver<u64> {
        self.shared.scroll_tx.subscribe()
    }

    /// Wait until no transition is in flight.
    pub async fn settled(&self) {
        let mut rx = self.subscribe();
        loop {
            if !rx.borrow_and_update().is_transitioning {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    // =========================================================================
    // Event processing
    // =========================================================================

    async fn process(&self, event: Event) {
        let effects = {
            let mut guard = self.shared.state.lock().await;
            debug!("processing wizard event {}", event.log_summary());

            let TransitionResult { state, effects } = transition(guard.clone(), event);

            let clears_mirrors = effects.iter().any(|e| matches!(e, Effect::ClearMirrors));
            let dirty = state.draft != guard.draft || state.step != guard.step;
            *guard = state.clone();

            if dirty && !clears_mirrors && self.shared.ready.load(Ordering::SeqCst) {
                self.persist(&state);
            }
            self.shared
                .snapshot_tx
                .send_replace(WizardSnapshot::of(&state));

            effects
        };

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::RequestScrollToTop => {
                self.shared.scroll_tx.send_modify(|n| *n += 1);
            }
            Effect::ScheduleSwap { seq } => {
                self.schedule(self.shared.timing.swap_delay, Event::SwapTimerFired { seq });
            }
            Effect::ScheduleSettle { seq } => {
                self.schedule(
                    self.shared.timing.settle_delay,
                    Event::SettleTimerFired { seq },
                );
            }
            Effect::ClearMirrors => self.clear_mirrors(),
            Effect::Log { level, message } => match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
            },
        }
    }

    fn schedule(&self, delay: Duration, event: Event) {
        let store = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.process(event).await;
        });
    }

    /// Rewrite both mirrors in full. Persistence failures are logged and
    /// swallowed; the in-memory draft stays authoritative for the session.
    fn persist(&self, state: &WizardState) {
        match serde_json::to_string(&state.draft) {
            Ok(json) => {
                if let Err(e) = self.shared.kv.set(DRAFT_KEY, &json) {
                    error!("Failed to persist draft mirror: {e:#}");
                }
            }
            Err(e) => error!("Failed to serialize draft mirror: {e:#}"),
        }
        if let Err(e) = self.shared.kv.set(STEP_KEY, &state.step.to_mirror()) {
            error!("Failed to persist step mirror: {e:#}");
        }
    }

    fn clear_mirrors(&self) {
        if let Err(e) = self.shared.kv.remove(DRAFT_KEY) {
            error!("Failed to erase draft mirror: {e:#}");
        }
        if let Err(e) = self.shared.kv.remove(STEP_KEY) {
            error!("Failed to erase step mirror: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::kv::MemoryKv;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicUsize;

    fn fast_timing() -> TransitionTiming {
        TransitionTiming {
            swap_delay: Duration::from_millis(5),
            settle_delay: Duration::from_millis(2),
        }
    }

    fn test_store() -> (WizardStore, Arc<MemoryKv>) {
        let kv = Arc::new(MemoryKv::new());
        let store = WizardStore::new(kv.clone(), fast_timing());
        (store, kv)
    }

    async fn ready_store() -> (WizardStore, Arc<MemoryKv>) {
        let (store, kv) = test_store();
        store.initialize().await.expect("initialize should succeed");
        (store, kv)
    }

    /// Wraps a `KvStore` and counts writes per key.
    struct CountingKv {
        inner: MemoryKv,
        writes: AtomicUsize,
    }

    impl CountingKv {
        fn new() -> Self {
            Self {
                inner: MemoryKv::new(),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl KvStore for CountingKv {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == DRAFT_KEY {
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
            self.inner.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn test_fresh_session_starts_empty_on_first_step() {
        let (store, _) = ready_store().await;
        assert_eq!(store.current_step().await, Step::FIRST);
        assert!(store.draft().await.is_empty());
        assert!(!store.is_transitioning().await);
    }

    #[tokio::test]
    async fn test_advance_settles_on_next_step() {
        let (store, _) = ready_store().await;

        store.advance().await;
        assert!(
            store.is_transitioning().await,
            "transition flag must be up right after the request"
        );
        store.settled().await;

        assert_eq!(store.current_step().await.number(), 2);
        assert!(!store.is_transitioning().await);
    }

    #[tokio::test]
    async fn test_step_bounds_hold_at_both_ends() {
        let (store, _) = ready_store().await;

        for _ in 0..5 {
            store.advance().await;
            store.settled().await;
        }
        assert_eq!(store.current_step().await, Step::LAST);

        for _ in 0..5 {
            store.retreat().await;
            store.settled().await;
        }
        assert_eq!(store.current_step().await, Step::FIRST);
    }

    #[tokio::test]
    async fn test_boundary_advance_still_toggles_transition_flag() {
        let (store, _) = ready_store().await;
        store.jump_to_step(4).await;
        store.settled().await;

        let mut scroll = store.scroll_requests();
        let before = *scroll.borrow_and_update();

        store.advance().await;
        assert!(store.is_transitioning().await);
        store.settled().await;

        assert_eq!(store.current_step().await, Step::LAST);
        assert_eq!(
            *store.scroll_requests().borrow(),
            before + 1,
            "boundary advance still requests a scroll to top"
        );
    }

    #[tokio::test]
    async fn test_jump_to_current_step_is_a_true_noop() {
        let (store, _) = ready_store().await;
        let before = store.snapshot();

        store.jump_to_step(1).await;

        assert!(!store.is_transitioning().await);
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_jump_clamps_targets() {
        let (store, _) = ready_store().await;

        store.jump_to_step(10).await;
        store.settled().await;
        assert_eq!(store.current_step().await, Step::LAST);

        store.jump_to_step(-3).await;
        store.settled().await;
        assert_eq!(store.current_step().await, Step::FIRST);
    }

    #[tokio::test]
    async fn test_field_merge_keeps_unrelated_fields() {
        let (store, _) = ready_store().await;

        store
            .update_fields(vec![(Field::Name, "John".to_string())])
            .await;
        store
            .update_fields(vec![(Field::Email, "john@x.com".to_string())])
            .await;

        let draft = store.draft().await;
        assert_eq!(draft.name, "John");
        assert_eq!(draft.email, "john@x.com");
    }

    #[tokio::test]
    async fn test_unchanged_field_is_not_repersisted() {
        let kv = Arc::new(CountingKv::new());
        let store = WizardStore::new(kv.clone(), fast_timing());
        store.initialize().await.unwrap();

        store.update_field(Field::Name, "John Doe").await;
        let after_first = kv.writes.load(Ordering::SeqCst);
        assert_eq!(after_first, 1);

        store.update_field(Field::Name, "John Doe").await;
        assert_eq!(
            kv.writes.load(Ordering::SeqCst),
            after_first,
            "writing the same value again must not touch the mirror"
        );
    }

    #[tokio::test]
    async fn test_mirror_round_trip_into_fresh_store() {
        let (store, kv) = ready_store().await;

        store.update_field(Field::Name, "Jane").await;
        store.update_field(Field::Email, "jane@x.com").await;
        store.advance().await;
        store.settled().await;

        let reloaded = WizardStore::new(kv, fast_timing());
        reloaded.initialize().await.unwrap();

        assert_eq!(reloaded.draft().await, store.draft().await);
        assert_eq!(reloaded.current_step().await, store.current_step().await);
    }

    #[tokio::test]
    async fn test_rehydrates_persisted_draft_and_step() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DRAFT_KEY, r#"{"name": "Jane", "email": "jane@x.com"}"#)
            .unwrap();
        kv.set(STEP_KEY, "2").unwrap();

        let store = WizardStore::new(kv, fast_timing());
        store.initialize().await.unwrap();

        let draft = store.draft().await;
        assert_eq!(draft.name, "Jane");
        assert_eq!(draft.email, "jane@x.com");
        assert_eq!(store.current_step().await.number(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_mirror_falls_back_to_defaults() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DRAFT_KEY, "definitely not json").unwrap();
        kv.set(STEP_KEY, "banana").unwrap();

        let store = WizardStore::new(kv, fast_timing());
        store.initialize().await.unwrap();

        assert!(store.draft().await.is_empty());
        assert_eq!(store.current_step().await, Step::FIRST);
    }

    #[tokio::test]
    async fn test_submitted_flag_wins_over_stale_mirror() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(DRAFT_KEY, r#"{"name": "Stale"}"#).unwrap();
        kv.set(STEP_KEY, "3").unwrap();
        kv.set(SUBMITTED_KEY, "1").unwrap();

        let store = WizardStore::new(kv.clone(), fast_timing());
        store.initialize().await.unwrap();

        assert_eq!(store.draft().await.name, "");
        assert_eq!(store.current_step().await, Step::FIRST);
        assert_eq!(kv.get(SUBMITTED_KEY).unwrap(), None, "flag is consumed");
        assert_eq!(kv.get(DRAFT_KEY).unwrap(), None);
        assert_eq!(kv.get(STEP_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let (store, kv) = ready_store().await;

        store.update_field(Field::Name, "Jane").await;
        store.advance().await;
        store.settled().await;

        store.reset_draft().await;

        assert!(store.draft().await.is_empty());
        assert_eq!(store.current_step().await, Step::FIRST);
        assert_eq!(kv.get(DRAFT_KEY).unwrap(), None);
        assert_eq!(kv.get(STEP_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_mark_submitted_then_initialize_starts_fresh() {
        let (store, kv) = ready_store().await;
        store.update_field(Field::Name, "Jane").await;

        store.mark_submitted();
        assert!(kv.get(SUBMITTED_KEY).unwrap().is_some());

        let next_session = WizardStore::new(kv, fast_timing());
        next_session.initialize().await.unwrap();
        assert!(next_session.draft().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_write_through_before_initialize() {
        let (store, kv) = test_store();

        store.update_field(Field::Name, "Early").await;

        assert_eq!(
            kv.get(DRAFT_KEY).unwrap(),
            None,
            "a not-yet-ready store must not clobber an unread mirror"
        );
    }

    /// A navigation arriving while another is in flight must win
    /// deterministically: the older timers are stranded by the generation
    /// counter.
    #[tokio::test]
    async fn test_second_navigation_cancels_the_first() {
        let (store, _) = ready_store().await;
        store.jump_to_step(2).await;
        store.settled().await;

        store.advance().await;
        store.retreat().await;
        store.settled().await;

        assert_eq!(store.current_step().await, Step::FIRST);
        assert_eq!(store.direction().await, Direction::Backward);

        // Give the stranded timers time to fire; nothing may change.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.current_step().await, Step::FIRST);
        assert!(!store.is_transitioning().await);
    }

    #[tokio::test]
    async fn test_scroll_counter_increments_per_navigation() {
        let (store, _) = ready_store().await;
        let mut scroll = store.scroll_requests();
        assert_eq!(*scroll.borrow_and_update(), 0);

        store.advance().await;
        store.settled().await;
        store.retreat().await;
        store.settled().await;

        assert_eq!(*store.scroll_requests().borrow(), 2);
    }

    #[tokio::test]
    async fn test_subscribe_observes_the_swap() {
        let (store, _) = ready_store().await;
        let mut rx = store.subscribe();

        store.advance().await;
        let transitioning = *rx.borrow_and_update();
        assert!(transitioning.is_transitioning);
        assert_eq!(transitioning.step, Step::FIRST, "step swaps later");

        store.settled().await;
        assert_eq!(rx.borrow_and_update().step.number(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// For every sequence of advance/retreat calls, the settled step
        /// stays within [1, 4] and matches the saturating fold.
        #[test]
        fn settled_step_stays_in_bounds(moves in proptest::collection::vec(any::<bool>(), 0..12)) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            rt.block_on(async {
                let kv = Arc::new(MemoryKv::new());
                let store = WizardStore::new(
                    kv,
                    TransitionTiming {
                        swap_delay: Duration::from_millis(1),
                        settle_delay: Duration::from_millis(1),
                    },
                );
                store.initialize().await.unwrap();

                let mut expected: i64 = 1;
                for forward in moves {
                    if forward {
                        store.advance().await;
                        expected = (expected + 1).min(4);
                    } else {
                        store.retreat().await;
                        expected = (expected - 1).max(1);
                    }
                    store.settled().await;

                    let step = i64::from(store.current_step().await.number());
                    assert!((1..=4).contains(&step), "step {step} escaped the bounds");
                    assert_eq!(step, expected);
                }
            });
        }
    }
}
