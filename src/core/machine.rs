//! Per-behavior state machine storage.
//!
//! `StateMachine` holds everything the engine needs to drive one behavior:
//! its identity, current state, continuity flag, transition table and
//! history. The hooks that give a behavior its meaning live on the
//! behavior itself (see [`crate::behavior::BehaviorLogic`]).

use super::guard::Guard;
use super::history::{StateHistory, StateTransition};
use super::state::{BehaviorState, State};
use super::transition::{Transition, TransitionTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identity of a behavior instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BehaviorId(Uuid);

impl BehaviorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BehaviorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A transition chosen by guard evaluation, detached from the table so the
/// owning behavior can be mutated while it is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransition {
    pub to: BehaviorState,
    pub description: String,
}

/// State machine owned by a single behavior `B` evaluated against context `C`.
pub struct StateMachine<B, C> {
    id: BehaviorId,
    name: String,
    state: BehaviorState,
    continuous: bool,
    transitions: TransitionTable<B, C>,
    history: StateHistory<BehaviorState>,
}

impl<B, C> StateMachine<B, C> {
    /// Create a machine in `Start` with an empty transition table.
    pub fn new(name: impl Into<String>, continuous: bool) -> Self {
        Self {
            id: BehaviorId::new(),
            name: name.into(),
            state: BehaviorState::Start,
            continuous,
            transitions: TransitionTable::new(),
            history: StateHistory::new(),
        }
    }

    /// Append a guarded transition.
    ///
    /// Rows leaving a terminal state are accepted but never evaluated,
    /// since a finished behavior does not run again.
    pub fn add_transition<F>(
        &mut self,
        from: BehaviorState,
        to: BehaviorState,
        guard: F,
        description: impl Into<String>,
    ) -> &mut Self
    where
        F: Fn(&B, &C) -> bool + Send + Sync + 'static,
    {
        self.transitions.push(Transition {
            from,
            to,
            guard: Guard::new(guard),
            description: description.into(),
        });
        self
    }

    /// Append a pre-built transition.
    pub fn push_transition(&mut self, transition: Transition<B, C>) -> &mut Self {
        self.transitions.push(transition);
        self
    }

    pub fn id(&self) -> BehaviorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn is_in_state(&self, state: BehaviorState) -> bool {
        self.state == state
    }

    /// True once the machine reached `Completed`, `Failed` or `Cancelled`.
    pub fn is_done_running(&self) -> bool {
        self.state.is_final()
    }

    pub fn transitions(&self) -> &TransitionTable<B, C> {
        &self.transitions
    }

    pub fn history(&self) -> &StateHistory<BehaviorState> {
        &self.history
    }

    /// Find the transition that would fire next, if any.
    ///
    /// Always `None` for a terminal machine.
    pub fn next_transition(&self, behavior: &B, ctx: &C) -> Option<PendingTransition> {
        if self.is_done_running() {
            return None;
        }

        self.transitions
            .first_match(self.state, behavior, ctx)
            .map(|row| PendingTransition {
                to: row.to,
                description: row.description.clone(),
            })
    }

    /// Move to `to` and record it. Returns the previous state.
    pub(crate) fn apply(&mut self, to: BehaviorState, description: String) -> BehaviorState {
        let from = self.state;
        self.history.record(StateTransition::now(from, to, description));
        self.state = to;
        from
    }
}

impl<B, C> fmt::Debug for StateMachine<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("continuous", &self.continuous)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
