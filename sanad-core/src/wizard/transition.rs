//! Pure state transition function.
//!
//! The transition function is the core of the wizard. It takes the current
//! state and an event, and returns the new state and a list of effects.
//! This function has NO side effects - it is pure and deterministic.

use super::effect::{Effect, LogLevel};
use super::event::Event;
use super::state::{Direction, Phase, WizardState};
use crate::draft::Step;

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub state: WizardState,
    /// Effects to execute.
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: WizardState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    pub fn no_change(state: WizardState) -> Self {
        Self {
            state,
            effects: vec![],
        }
    }
}

/// Pure state transition function.
///
/// Given the current state and an event, returns the new state and effects
/// to execute. All side effects are returned as data.
pub fn transition(state: WizardState, event: Event) -> TransitionResult {
    match event {
        Event::AdvanceRequested => {
            let target = state.step.next();
            begin_navigation(state, target, Direction::Forward)
        }

        Event::RetreatRequested => {
            let target = state.step.prev();
            begin_navigation(state, target, Direction::Backward)
        }

        Event::JumpRequested { target } => {
            let target = Step::clamp(target);
            // Jumping to the step we are already on is a true no-op: no
            // transition bookkeeping, unlike advance/retreat at a boundary.
            if target == state.step {
                return TransitionResult::no_change(state);
            }
            let direction = if target > state.step {
                Direction::Forward
            } else {
                Direction::Backward
            };
            begin_navigation(state, target, direction)
        }

        Event::FieldChanged { field, value } => {
            if state.draft.get(field) == value {
                // Unchanged value: skip the redundant mirror rewrite.
                return TransitionResult::no_change(state);
            }
            let mut state = state;
            state.draft.set(field, value);
            TransitionResult::new(state, vec![])
        }

        Event::FieldsMerged { patch } => {
            let mut state = state;
            state.draft.merge(&patch);
            TransitionResult::new(state, vec![])
        }

        Event::ResetRequested => {
            let mut fresh = WizardState::new();
            // Keep the generation counter so timers from a transition that
            // was in flight at reset time stay stranded.
            fresh.seq = state.seq;
            TransitionResult::new(fresh, vec![Effect::ClearMirrors])
        }

        Event::SwapTimerFired { seq } => match state.phase {
            Phase::Swapping {
                seq: current,
                target,
            } if current == seq => {
                let mut state = state;
                state.step = target;
                state.phase = Phase::Settling { seq };
                TransitionResult::new(state, vec![Effect::ScheduleSettle { seq }])
            }
            _ => stale_timer(state, "swap", seq),
        },

        Event::SettleTimerFired { seq } => match state.phase {
            Phase::Settling { seq: current } if current == seq => {
                let mut state = state;
                state.phase = Phase::Stable;
                TransitionResult::new(state, vec![])
            }
            _ => stale_timer(state, "settle", seq),
        },
    }
}

/// Start the two-phase transition towards `target`.
///
/// The boundary case (advance on the last step, retreat on the first) still
/// runs the full transition bookkeeping with `target == step`; only the step
/// value ends up unchanged.
fn begin_navigation(state: WizardState, target: Step, direction: Direction) -> TransitionResult {
    let mut state = state;
    state.seq += 1;
    let seq = state.seq;
    state.direction = direction;
    state.phase = Phase::Swapping { seq, target };
    TransitionResult::new(
        state,
        vec![Effect::RequestScrollToTop, Effect::ScheduleSwap { seq }],
    )
}

/// A timer from a superseded navigation fired; drop it.
fn stale_timer(state: WizardState, kind: &str, seq: u64) -> TransitionResult {
    let message = format!("ignoring stale {kind} timer (seq {seq})");
    TransitionResult::new(
        state,
        vec![Effect::Log {
            level: LogLevel::Debug,
            message,
        }],
    )
}
