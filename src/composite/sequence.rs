//! Ordered composition of behaviors.

use crate::behavior::{Behavior, BehaviorLogic};
use crate::builder::{BuildError, SequenceBuilder};
use crate::core::{BehaviorState, StateMachine};
use crate::validation::check_sequence;

/// Runs its sub-behaviors one after another.
///
/// On each tick the sequence delegates to the sub-behavior at the cursor.
/// When that sub-behavior completes, the cursor moves on at the next tick.
/// When it fails, the sequence fails at the next tick and cancels everything
/// after it. The sequence completes once the cursor passes the last element.
///
/// | from    | to        | guard                              |
/// |---------|-----------|------------------------------------|
/// | start   | running   | immediately                        |
/// | running | completed | cursor past the last sub-behavior  |
/// | running | failed    | sub-behavior at the cursor failed  |
///
/// A sequence is continuous exactly when its last sub-behavior is.
pub struct Sequence<C> {
    machine: StateMachine<Sequence<C>, C>,
    behaviors: Vec<Box<dyn Behavior<C>>>,
    current_index: usize,
}

impl<C: 'static> Sequence<C> {
    /// Build a sequence named `"sequence"`.
    ///
    /// Fails if `behaviors` is empty, if any element has already left
    /// `Start`, or if a continuous element is followed by anything.
    pub fn new(behaviors: Vec<Box<dyn Behavior<C>>>) -> Result<Self, BuildError> {
        Self::named("sequence", behaviors)
    }

    pub fn named(
        name: impl Into<String>,
        behaviors: Vec<Box<dyn Behavior<C>>>,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        if let Err(err) = check_sequence(&behaviors) {
            tracing::debug!(
                sequence = name.as_str(),
                violations = err.violations().len(),
                "sequence rejected: {err}"
            );
            return Err(err);
        }

        let continuous = behaviors.last().is_some_and(|b| b.is_continuous());
        let mut machine = StateMachine::new(name, continuous);
        machine
            .add_transition(
                BehaviorState::Start,
                BehaviorState::Running,
                |_, _| true,
                "immediately",
            )
            .add_transition(
                BehaviorState::Running,
                BehaviorState::Completed,
                |seq: &Sequence<C>, _| seq.current_index >= seq.behaviors.len(),
                "all sub-behaviors complete",
            )
            .add_transition(
                BehaviorState::Running,
                BehaviorState::Failed,
                |seq: &Sequence<C>, _| {
                    seq.behaviors
                        .get(seq.current_index)
                        .is_some_and(|b| b.is_in_state(BehaviorState::Failed))
                },
                "sub-behavior failed",
            );

        Ok(Self {
            machine,
            behaviors,
            current_index: 0,
        })
    }

    pub fn builder() -> SequenceBuilder<C> {
        SequenceBuilder::new()
    }
}

impl<C> Sequence<C> {
    /// All sub-behaviors in execution order.
    pub fn behaviors(&self) -> &[Box<dyn Behavior<C>>] {
        &self.behaviors
    }

    pub fn current_behavior_index(&self) -> usize {
        self.current_index
    }

    /// The sub-behavior the sequence is working on right now.
    ///
    /// `None` before the sequence starts running, once it is terminal, or
    /// after the cursor passed the last element.
    pub fn current_behavior(&self) -> Option<&dyn Behavior<C>> {
        if self.machine.is_done_running() || self.machine.is_in_state(BehaviorState::Start) {
            return None;
        }

        self.behaviors.get(self.current_index).map(|b| b.as_ref())
    }

    fn terminate_from(&mut self, first: usize, ctx: &mut C) {
        tracing::debug!(
            sequence = self.machine.name(),
            first,
            total = self.behaviors.len(),
            "cancelling remaining sub-behaviors"
        );
        for behavior in self.behaviors.iter_mut().skip(first) {
            behavior.terminate(ctx);
        }
    }
}

impl<C> BehaviorLogic<C> for Sequence<C> {
    fn machine(&self) -> &StateMachine<Self, C> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine<Self, C> {
        &mut self.machine
    }

    fn execute_running(&mut self, ctx: &mut C) {
        let index = self.current_index;
        let Some(current) = self.behaviors.get_mut(index) else {
            return;
        };

        if !current.is_done_running() {
            tracing::trace!(
                sequence = self.machine.name(),
                index,
                behavior = current.name(),
                "delegating tick"
            );
            current.run(ctx);
        } else if current.is_in_state(BehaviorState::Completed) {
            self.current_index += 1;
            tracing::debug!(
                sequence = self.machine.name(),
                completed = index,
                next = self.current_index,
                "sequence advanced"
            );
        }
    }

    fn on_enter(&mut self, state: BehaviorState, ctx: &mut C) {
        match state {
            BehaviorState::Failed => {
                // the failed element and everything before it stay as they are
                self.terminate_from(self.current_index + 1, ctx);
            }
            BehaviorState::Cancelled => {
                let current_finished = self
                    .behaviors
                    .get(self.current_index)
                    .is_some_and(|b| b.is_done_running());
                let first = if current_finished {
                    self.current_index + 1
                } else {
                    self.current_index
                };
                self.terminate_from(first, ctx);
            }
            BehaviorState::Start | BehaviorState::Running | BehaviorState::Completed => {}
        }
    }

    fn sub_behaviors(&self) -> &[Box<dyn Behavior<C>>] {
        &self.behaviors
    }

    fn active_index(&self) -> Option<usize> {
        self.current_behavior().map(|_| self.current_index)
    }
}

impl<C> std::fmt::Debug for Sequence<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("machine", &self.machine)
            .field("behaviors", &self.behaviors.len())
            .field("current_index", &self.current_index)
            .finish()
    }
}
