//! Effects (side effects as data).
//!
//! Effects describe what should happen as a result of a state transition.
//! They are pure data - the store executes them against timers, the
//! persistence mirror and the UI signal channels. This separation enables
//! testing the transition logic without running timers.

/// All effects that can be produced by wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the presentation layer to scroll back to the top of the page.
    RequestScrollToTop,

    /// Start the exit-animation delay; fires `SwapTimerFired { seq }`.
    ScheduleSwap { seq: u64 },

    /// Start the entry-animation delay; fires `SettleTimerFired { seq }`.
    ScheduleSettle { seq: u64 },

    /// Erase both persisted mirror keys (draft and step).
    ClearMirrors,

    /// Log a message.
    Log { level: LogLevel, message: String },
}

/// Log level for logging effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}
