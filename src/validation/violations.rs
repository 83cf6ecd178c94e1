//! Configuration violations found while validating a sequence.

use crate::core::BehaviorState;
use thiserror::Error;

/// A single reason a list of sub-behaviors cannot form a sequence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Sub-behavior {index} ('{name}') is in state '{state}', expected 'start'")]
    NotInStartState {
        index: usize,
        name: String,
        state: BehaviorState,
    },

    #[error("Continuous sub-behavior {index} ('{name}') is not last and would stall the sequence")]
    ContinuousBeforeEnd { index: usize, name: String },
}

impl ConfigViolation {
    /// Position of the offending sub-behavior.
    pub fn index(&self) -> usize {
        match self {
            Self::NotInStartState { index, .. } | Self::ContinuousBeforeEnd { index, .. } => *index,
        }
    }
}
