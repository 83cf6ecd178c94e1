//! State trait and the fixed behavior state vocabulary.
//!
//! Every behavior moves through the same five states. The `State` trait
//! keeps the inspection methods pure so history and diagnostics can work
//! on any state type without knowing about behaviors.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure. States are small values that describe the
/// current position of a state machine.
///
/// # Example
///
/// ```rust
/// use tickwork::core::{BehaviorState, State};
///
/// let terminal: Vec<String> = BehaviorState::ALL
///     .into_iter()
///     .filter(|s| s.is_final())
///     .map(|s| s.name().to_string())
///     .collect();
///
/// assert_eq!(terminal, vec!["completed", "failed", "cancelled"]);
/// assert!(BehaviorState::Failed.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// The state vocabulary shared by every behavior.
///
/// A behavior is created in `Start`, enters `Running` through its entry
/// transition and ends in exactly one of the three terminal states.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    Start,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl BehaviorState {
    /// All states in lifecycle order.
    pub const ALL: [BehaviorState; 5] = [
        BehaviorState::Start,
        BehaviorState::Running,
        BehaviorState::Completed,
        BehaviorState::Failed,
        BehaviorState::Cancelled,
    ];
}

impl State for BehaviorState {
    fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(BehaviorState::Start.name(), "start");
        assert_eq!(BehaviorState::Running.name(), "running");
        assert_eq!(BehaviorState::Completed.name(), "completed");
        assert_eq!(BehaviorState::Failed.name(), "failed");
        assert_eq!(BehaviorState::Cancelled.name(), "cancelled");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!BehaviorState::Start.is_final());
        assert!(!BehaviorState::Running.is_final());
        assert!(BehaviorState::Completed.is_final());
        assert!(BehaviorState::Failed.is_final());
        assert!(BehaviorState::Cancelled.is_final());
    }

    #[test]
    fn only_failed_is_an_error() {
        let errors: Vec<_> = BehaviorState::ALL
            .iter()
            .filter(|s| s.is_error())
            .collect();
        assert_eq!(errors, vec![&BehaviorState::Failed]);
    }

    #[test]
    fn display_matches_name() {
        for state in BehaviorState::ALL {
            assert_eq!(state.to_string(), state.name());
        }
    }

    #[test]
    fn state_serializes_as_snake_case() {
        let json = serde_json::to_string(&BehaviorState::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        let back: BehaviorState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BehaviorState::Cancelled);
    }
}
