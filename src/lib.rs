//! Tickwork: a tick-driven behavior engine for autonomous agents
//!
//! A behavior is a small finite state machine with a fixed vocabulary of
//! states (`start`, `running`, `completed`, `failed`, `cancelled`) and a
//! per-instance table of guarded transitions. A driver calls `run` once per
//! tick on the root behavior; composites forward the tick to the child they
//! are working on.
//!
//! # Core Concepts
//!
//! - **Behavior**: the object-safe capability every node exposes
//! - **BehaviorLogic**: the hooks a concrete behavior implements
//! - **Guards**: predicates evaluated in table order, first match wins
//! - **Sequence**: runs sub-behaviors one after another, failing fast
//! - **Context**: owned by the driver and passed into every `run` call
//!
//! # Example
//!
//! ```rust
//! use tickwork::{Behavior, BehaviorState, Leaf, SequenceBuilder};
//!
//! #[derive(Default)]
//! struct Robot {
//!     at_ball: bool,
//!     kicked: bool,
//! }
//!
//! let approach = Leaf::builder("approach")
//!     .on_running(|robot: &mut Robot| robot.at_ball = true)
//!     .complete_when(|_, robot: &Robot| robot.at_ball, "at ball")
//!     .build()
//!     .unwrap();
//! let kick = Leaf::builder("kick")
//!     .on_running(|robot: &mut Robot| robot.kicked = true)
//!     .complete_when(|_, robot: &Robot| robot.kicked, "ball kicked")
//!     .build()
//!     .unwrap();
//!
//! let mut play = SequenceBuilder::<Robot>::named("approach and kick")
//!     .then(approach)
//!     .then(kick)
//!     .build()
//!     .unwrap();
//!
//! let mut robot = Robot::default();
//! while !play.is_done_running() {
//!     play.run(&mut robot);
//! }
//!
//! assert!(play.is_in_state(BehaviorState::Completed));
//! assert!(robot.kicked);
//! ```

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod core;
pub mod diagnostics;
pub mod leaf;
pub mod validation;

// Re-export commonly used types
pub use behavior::{Behavior, BehaviorLogic};
pub use builder::{BuildError, LeafBuilder, SequenceBuilder};
pub use composite::Sequence;
pub use crate::core::{
    BehaviorId, BehaviorState, Guard, State, StateHistory, StateMachine, StateTransition,
};
pub use diagnostics::{render_tree, BehaviorSnapshot};
pub use leaf::Leaf;
pub use validation::ConfigViolation;
