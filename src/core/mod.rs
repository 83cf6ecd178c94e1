//! Core state machine types.
//!
//! - The `State` trait and the fixed `BehaviorState` vocabulary
//! - Guard predicates and the ordered transition table
//! - Per-behavior `StateMachine` storage
//! - Transition history
//!
//! Nothing in this module runs a behavior; the engine that applies
//! transitions and fires hooks lives in [`crate::behavior`].

mod guard;
mod history;
mod machine;
mod state;
mod transition;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use machine::{BehaviorId, PendingTransition, StateMachine};
pub use state::{BehaviorState, State};
pub use transition::{Transition, TransitionTable};
