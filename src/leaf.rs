//! Closure-driven leaf behavior.
//!
//! `Leaf` lets a driver describe a leaf entirely with closures: guards for
//! its transitions, work for each running tick and hooks for state entry
//! and exit. Build one with [`Leaf::builder`].

use crate::behavior::BehaviorLogic;
use crate::builder::LeafBuilder;
use crate::core::{BehaviorState, StateMachine};

/// Work performed on each running tick.
pub type RunningHook<C> = Box<dyn FnMut(&mut C) + Send>;

/// Hook attached to entering or leaving one state.
pub type StateHook<C> = Box<dyn FnMut(&mut C) + Send>;

/// A leaf behavior whose logic is supplied as closures.
pub struct Leaf<C> {
    pub(crate) machine: StateMachine<Leaf<C>, C>,
    pub(crate) ticks_running: u64,
    pub(crate) on_running: Option<RunningHook<C>>,
    pub(crate) enter_hooks: Vec<(BehaviorState, StateHook<C>)>,
    pub(crate) exit_hooks: Vec<(BehaviorState, StateHook<C>)>,
}

impl<C: 'static> Leaf<C> {
    pub fn builder(name: impl Into<String>) -> LeafBuilder<C> {
        LeafBuilder::new(name)
    }
}

impl<C> Leaf<C> {
    /// Number of ticks this leaf has spent executing in `Running`.
    ///
    /// Guards can compare against it to implement deadlines.
    pub fn ticks_running(&self) -> u64 {
        self.ticks_running
    }
}

impl<C> BehaviorLogic<C> for Leaf<C> {
    fn machine(&self) -> &StateMachine<Self, C> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine<Self, C> {
        &mut self.machine
    }

    fn execute_running(&mut self, ctx: &mut C) {
        self.ticks_running += 1;
        if let Some(work) = self.on_running.as_mut() {
            work(ctx);
        }
    }

    fn on_enter(&mut self, state: BehaviorState, ctx: &mut C) {
        for (target, hook) in self.enter_hooks.iter_mut() {
            if *target == state {
                hook(ctx);
            }
        }
    }

    fn on_exit(&mut self, state: BehaviorState, ctx: &mut C) {
        for (target, hook) in self.exit_hooks.iter_mut() {
            if *target == state {
                hook(ctx);
            }
        }
    }
}

impl<C> std::fmt::Debug for Leaf<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Leaf")
            .field("machine", &self.machine)
            .field("ticks_running", &self.ticks_running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;

    #[derive(Default)]
    struct Robot {
        kicks: u32,
        charged: bool,
        log: Vec<&'static str>,
    }

    #[test]
    fn leaf_counts_running_ticks() {
        let mut robot = Robot::default();
        let mut leaf = Leaf::builder("kick")
            .on_running(|r: &mut Robot| r.kicks += 1)
            .complete_when(|leaf: &Leaf<Robot>, _| leaf.ticks_running() >= 3, "kicked three times")
            .build()
            .unwrap();

        for _ in 0..4 {
            leaf.run(&mut robot);
        }

        assert!(leaf.is_in_state(BehaviorState::Completed));
        assert_eq!(leaf.ticks_running(), 3);
        assert_eq!(robot.kicks, 3);
    }

    #[test]
    fn leaf_waits_for_entry_guard() {
        let mut robot = Robot::default();
        let mut leaf = Leaf::builder("kick")
            .start_when(|_, r: &Robot| r.charged)
            .build()
            .unwrap();

        leaf.run(&mut robot);
        assert!(leaf.is_in_state(BehaviorState::Start));

        robot.charged = true;
        leaf.run(&mut robot);
        assert!(leaf.is_in_state(BehaviorState::Running));
    }

    #[test]
    fn leaf_fails_from_its_own_guard() {
        let mut robot = Robot::default();
        let mut leaf = Leaf::builder("approach")
            .fail_when(|leaf: &Leaf<Robot>, _| leaf.ticks_running() >= 2, "deadline passed")
            .build()
            .unwrap();

        for _ in 0..3 {
            leaf.run(&mut robot);
        }

        assert!(leaf.is_in_state(BehaviorState::Failed));
        assert_eq!(
            leaf.history().last().map(|t| t.description.as_str()),
            Some("deadline passed")
        );
    }

    #[test]
    fn completed_leaf_never_runs_again() {
        let mut robot = Robot::default();
        let mut leaf = Leaf::builder("kick")
            .on_running(|r: &mut Robot| r.kicks += 1)
            .complete_when(|leaf: &Leaf<Robot>, _| leaf.ticks_running() >= 1, "kicked")
            .transition(
                BehaviorState::Completed,
                BehaviorState::Running,
                |_, _| true,
                "restart",
            )
            .build()
            .unwrap();
        leaf.run(&mut robot);
        leaf.run(&mut robot);
        assert!(leaf.is_in_state(BehaviorState::Completed));
        let history_len = leaf.history().len();

        for _ in 0..3 {
            leaf.run(&mut robot);
        }

        assert!(leaf.is_in_state(BehaviorState::Completed));
        assert_eq!(leaf.history().len(), history_len);
        assert_eq!(leaf.ticks_running(), 1);
        assert_eq!(robot.kicks, 1);
    }

    #[test]
    fn cancellation_runs_cleanup_hook() {
        let mut robot = Robot::default();
        let mut leaf = Leaf::builder("dribble")
            .continuous(true)
            .on_exit(BehaviorState::Running, |r: &mut Robot| r.log.push("stop dribbler"))
            .on_enter(BehaviorState::Cancelled, |r: &mut Robot| r.log.push("cancelled"))
            .build()
            .unwrap();

        leaf.run(&mut robot);
        leaf.terminate(&mut robot);

        assert!(leaf.is_in_state(BehaviorState::Cancelled));
        assert_eq!(robot.log, vec!["stop dribbler", "cancelled"]);
    }
}
