//! Builder API for assembling behaviors.
//!
//! Builders are the configuration surface of the crate: every structural
//! decision (names, continuity, transition rows, sub-behavior order) is made
//! here and validated once in `build()`.

pub mod error;
pub mod leaf;
pub mod sequence;

pub use error::BuildError;
pub use leaf::LeafBuilder;
pub use sequence::SequenceBuilder;
