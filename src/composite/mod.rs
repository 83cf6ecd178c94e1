//! Composite behaviors: behaviors whose work is coordinating other behaviors.

mod sequence;

pub use sequence::Sequence;
