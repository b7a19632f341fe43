//! State types for the wizard state machine.

use crate::draft::{ApplicationDraft, Step};

/// Direction of the most recent navigation, for the presentation layer's
/// slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Where the wizard is inside a step transition.
///
/// A navigation request passes through two timed phases before settling:
/// the exit animation plays while `Swapping` (the step value is still the
/// old one), then the step swaps and the entry animation plays while
/// `Settling`, then the machine is `Stable` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Settled on the current step.
    Stable,
    /// Exit animation playing; the step swap is pending.
    Swapping { seq: u64, target: Step },
    /// The step has swapped; entry animation playing.
    Settling { seq: u64 },
}

/// Complete wizard state: the draft plus the step/transition dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub draft: ApplicationDraft,
    pub step: Step,
    pub phase: Phase,
    pub direction: Direction,
    /// Transition generation. Each navigation bumps it; timer events carry
    /// the generation they were scheduled under, so a newer navigation
    /// strands the older timers instead of racing them.
    pub seq: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            draft: ApplicationDraft::default(),
            step: Step::FIRST,
            phase: Phase::Stable,
            direction: Direction::Forward,
            seq: 0,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        !matches!(self.phase, Phase::Stable)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
