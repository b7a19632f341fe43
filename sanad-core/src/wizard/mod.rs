//! Explicit state machine for the application wizard.
//!
//! The design separates:
//! - **State**: what the wizard knows (`WizardState`)
//! - **Events**: what happened (`Event`)
//! - **Effects**: what to do (`Effect`)
//! - **Transition**: pure function `(State, Event) -> (State, Vec<Effect>)`
//!
//! The store executes effects (timers, persistence, UI signals) and feeds
//! timer results back in as events.

pub mod effect;
pub mod event;
pub mod kv;
pub mod state;
pub mod store;
pub mod transition;

pub use effect::*;
pub use event::*;
pub use state::*;
pub use transition::*;
