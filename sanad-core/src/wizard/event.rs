//! Events that trigger wizard state transitions.
//!
//! Events represent things that happened - user actions from the
//! presentation layer and the firing of the two transition timers. They are
//! inputs to the pure transition function.

use crate::draft::Field;

/// All events that can trigger state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// User confirmed the current step and wants the next one.
    AdvanceRequested,

    /// User wants the previous step.
    RetreatRequested,

    /// User wants a specific step (e.g. "Edit" links on the review step).
    /// The target is clamped into the valid range.
    JumpRequested { target: i64 },

    // =========================================================================
    // Draft edits
    // =========================================================================
    /// A single field lost focus with a new value (auto-save path).
    /// Writing the value the field already holds is a no-op.
    FieldChanged { field: Field, value: String },

    /// A whole step was confirmed; shallow-merge its fields.
    FieldsMerged { patch: Vec<(Field, String)> },

    /// Clear the draft back to defaults (explicit reset, or after a
    /// confirmed submission).
    ResetRequested,

    // =========================================================================
    // Timer results
    // =========================================================================
    /// The exit-animation delay elapsed; swap the step value.
    SwapTimerFired { seq: u64 },

    /// The entry-animation delay elapsed; the transition is over.
    SettleTimerFired { seq: u64 },
}

impl Event {
    /// Short description for logging.
    pub fn log_summary(&self) -> String {
        match self {
            Event::AdvanceRequested => "AdvanceRequested".to_string(),
            Event::RetreatRequested => "RetreatRequested".to_string(),
            Event::JumpRequested { target } => format!("JumpRequested({target})"),
            Event::FieldChanged { field, .. } => format!("FieldChanged({field})"),
            Event::FieldsMerged { patch } => format!("FieldsMerged({} fields)", patch.len()),
            Event::ResetRequested => "ResetRequested".to_string(),
            Event::SwapTimerFired { seq } => format!("SwapTimerFired(seq {seq})"),
            Event::SettleTimerFired { seq } => format!("SettleTimerFired(seq {seq})"),
        }
    }
}
