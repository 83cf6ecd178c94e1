//! Build errors for behaviors and sequences.

use crate::validation::ConfigViolation;
use thiserror::Error;

/// Configuration errors detected while constructing a behavior.
///
/// These signal a programming mistake in how a tree is assembled. Runtime
/// failure is never reported through this type; it is the `Failed` state.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Sequence must be given one or more sub-behaviors")]
    EmptySequence,

    #[error("Invalid sequence configuration: {} violation(s), first: {}", .violations.len(), first_violation(.violations))]
    InvalidSequence { violations: Vec<ConfigViolation> },

    #[error("Continuous behavior '{name}' cannot declare a transition into completed")]
    ContinuousCompletes { name: String },
}

impl BuildError {
    /// Violations carried by an `InvalidSequence` error, empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::InvalidSequence { violations } => violations,
            _ => &[],
        }
    }
}

fn first_violation(violations: &[ConfigViolation]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
