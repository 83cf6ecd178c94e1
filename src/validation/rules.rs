//! Construction rules for sequences using Validation.
//!
//! Every rule runs against every sub-behavior and all failures are
//! accumulated, so a single rejected build reports each bad element.

use crate::behavior::Behavior;
use crate::builder::BuildError;
use crate::core::BehaviorState;
use crate::validation::violations::ConfigViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of checking one rule against one sub-behavior.
pub type RuleCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

/// The element must be fresh: still in `Start`.
pub fn require_fresh<C>(index: usize, behavior: &dyn Behavior<C>) -> RuleCheck {
    if behavior.is_in_state(BehaviorState::Start) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NotInStartState {
            index,
            name: behavior.name().to_string(),
            state: behavior.state(),
        })
    }
}

/// Only the last element may be continuous; any earlier one would never
/// complete and the sequence would stall on it.
pub fn require_terminating<C>(index: usize, last: usize, behavior: &dyn Behavior<C>) -> RuleCheck {
    if index == last || !behavior.is_continuous() {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::ContinuousBeforeEnd {
            index,
            name: behavior.name().to_string(),
        })
    }
}

/// Run every rule against every sub-behavior, accumulating ALL violations.
pub fn validate_sequence<C>(behaviors: &[Box<dyn Behavior<C>>]) -> RuleCheck {
    let last = behaviors.len().saturating_sub(1);
    let mut checks: Vec<RuleCheck> = Vec::with_capacity(behaviors.len() * 2);

    for (index, behavior) in behaviors.iter().enumerate() {
        checks.push(require_fresh(index, behavior.as_ref()));
        checks.push(require_terminating(index, last, behavior.as_ref()));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Validate a sub-behavior list for sequence construction.
///
/// An empty list fails fast; otherwise every violation is reported.
pub fn check_sequence<C>(behaviors: &[Box<dyn Behavior<C>>]) -> Result<(), BuildError> {
    if behaviors.is_empty() {
        return Err(BuildError::EmptySequence);
    }

    match validate_sequence(behaviors) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(BuildError::InvalidSequence {
            violations: errors.iter().cloned().collect(),
        }),
    }
}
