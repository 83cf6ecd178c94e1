//! Builder for closure-driven leaf behaviors.

use crate::builder::error::BuildError;
use crate::core::{BehaviorState, Guard, StateMachine, Transition};
use crate::leaf::{Leaf, RunningHook, StateHook};

/// Fluent builder for [`Leaf`].
///
/// The entry transition `Start -> Running` is always the first row of the
/// table. It is unconditional unless [`start_when`](Self::start_when) is
/// given. Other rows keep the order in which they were added.
pub struct LeafBuilder<C> {
    name: String,
    continuous: bool,
    entry: Option<Guard<Leaf<C>, C>>,
    rows: Vec<Transition<Leaf<C>, C>>,
    on_running: Option<RunningHook<C>>,
    enter_hooks: Vec<(BehaviorState, StateHook<C>)>,
    exit_hooks: Vec<(BehaviorState, StateHook<C>)>,
}

impl<C: 'static> LeafBuilder<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            continuous: false,
            entry: None,
            rows: Vec::new(),
            on_running: None,
            enter_hooks: Vec::new(),
            exit_hooks: Vec::new(),
        }
    }

    /// Mark the leaf continuous: it may only end by failing or being cancelled.
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Guard the entry transition instead of entering `Running` immediately.
    pub fn start_when<F>(mut self, guard: F) -> Self
    where
        F: Fn(&Leaf<C>, &C) -> bool + Send + Sync + 'static,
    {
        self.entry = Some(Guard::new(guard));
        self
    }

    /// Add an arbitrary guarded transition.
    pub fn transition<F>(
        mut self,
        from: BehaviorState,
        to: BehaviorState,
        guard: F,
        description: impl Into<String>,
    ) -> Self
    where
        F: Fn(&Leaf<C>, &C) -> bool + Send + Sync + 'static,
    {
        self.rows.push(Transition {
            from,
            to,
            guard: Guard::new(guard),
            description: description.into(),
        });
        self
    }

    /// Add a `Running -> Completed` transition.
    pub fn complete_when<F>(self, guard: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Leaf<C>, &C) -> bool + Send + Sync + 'static,
    {
        self.transition(
            BehaviorState::Running,
            BehaviorState::Completed,
            guard,
            description,
        )
    }

    /// Add a `Running -> Failed` transition.
    pub fn fail_when<F>(self, guard: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Leaf<C>, &C) -> bool + Send + Sync + 'static,
    {
        self.transition(
            BehaviorState::Running,
            BehaviorState::Failed,
            guard,
            description,
        )
    }

    /// Work to perform on each tick spent in `Running`.
    pub fn on_running<F>(mut self, work: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.on_running = Some(Box::new(work));
        self
    }

    pub fn on_enter<F>(mut self, state: BehaviorState, hook: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.enter_hooks.push((state, Box::new(hook)));
        self
    }

    pub fn on_exit<F>(mut self, state: BehaviorState, hook: F) -> Self
    where
        F: FnMut(&mut C) + Send + 'static,
    {
        self.exit_hooks.push((state, Box::new(hook)));
        self
    }

    /// Build the leaf.
    ///
    /// Fails if a continuous leaf declares a transition into `Completed`.
    pub fn build(self) -> Result<Leaf<C>, BuildError> {
        if self.continuous
            && self
                .rows
                .iter()
                .any(|row| row.to == BehaviorState::Completed)
        {
            return Err(BuildError::ContinuousCompletes { name: self.name });
        }

        let mut machine = StateMachine::new(self.name, self.continuous);
        machine.push_transition(Transition {
            from: BehaviorState::Start,
            to: BehaviorState::Running,
            guard: self.entry.unwrap_or_else(Guard::always),
            description: "immediately".to_string(),
        });
        for row in self.rows {
            machine.push_transition(row);
        }

        Ok(Leaf {
            machine,
            ticks_running: 0,
            on_running: self.on_running,
            enter_hooks: self.enter_hooks,
            exit_hooks: self.exit_hooks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;

    #[test]
    fn default_leaf_enters_running_immediately() {
        let mut leaf: Leaf<()> = LeafBuilder::new("idle").build().unwrap();

        leaf.run(&mut ());

        assert!(leaf.is_in_state(BehaviorState::Running));
        assert!(!leaf.is_continuous());
    }

    #[test]
    fn entry_row_comes_first() {
        let leaf: Leaf<()> = LeafBuilder::new("kick")
            .transition(
                BehaviorState::Start,
                BehaviorState::Failed,
                |_, _| true,
                "never reached",
            )
            .build()
            .unwrap();

        let rows: Vec<_> = leaf
            .machine
            .transitions()
            .rows_from(BehaviorState::Start)
            .map(|r| r.description.clone())
            .collect();
        assert_eq!(rows, vec!["immediately", "never reached"]);
    }

    #[test]
    fn continuous_leaf_cannot_complete() {
        let result: Result<Leaf<()>, _> = LeafBuilder::new("track")
            .continuous(true)
            .complete_when(|_, _| true, "found")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::ContinuousCompletes { ref name }) if name == "track"
        ));
    }

    #[test]
    fn continuous_leaf_may_fail() {
        let leaf: Leaf<()> = LeafBuilder::new("track")
            .continuous(true)
            .fail_when(|_, _| true, "lost target")
            .build()
            .unwrap();

        assert!(leaf.is_continuous());
    }
}
