//! The behavior engine.
//!
//! Two traits split the contract:
//!
//! - [`Behavior`] is the object-safe capability every node exposes to its
//!   owner: `run`, `terminate` and read-only queries. Composites store
//!   children as `Box<dyn Behavior<C>>`.
//! - [`BehaviorLogic`] is what a concrete behavior implements: access to its
//!   [`StateMachine`] plus the optional hooks. A blanket impl turns every
//!   `BehaviorLogic` into a `Behavior` by running the shared engine.
//!
//! The context `C` is owned by the driver and passed down on every call,
//! so all behaviors in a tree see the same value during a tick.

use crate::core::{BehaviorId, BehaviorState, State, StateHistory, StateMachine};

/// Capability shared by every node in a behavior tree.
pub trait Behavior<C>: Send {
    fn id(&self) -> BehaviorId;

    fn name(&self) -> &str;

    fn state(&self) -> BehaviorState;

    /// A continuous behavior never reaches `Completed` by itself.
    fn is_continuous(&self) -> bool;

    fn history(&self) -> &StateHistory<BehaviorState>;

    /// Advance one tick.
    ///
    /// Does nothing once the behavior is terminal. Otherwise applies at most
    /// one transition, then runs the behavior's work if it is `Running`.
    fn run(&mut self, ctx: &mut C);

    /// Force the behavior into `Cancelled`. No-op when already terminal.
    fn terminate(&mut self, ctx: &mut C);

    fn is_in_state(&self, state: BehaviorState) -> bool {
        self.state() == state
    }

    fn is_done_running(&self) -> bool {
        self.state().is_final()
    }

    /// Sub-behaviors, for composites. Empty for leaves.
    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        &[]
    }

    /// Index into [`children`](Behavior::children) of the active sub-behavior.
    fn current_child_index(&self) -> Option<usize> {
        None
    }

    /// One-line description, `"<name>: <state>"`.
    fn describe(&self) -> String {
        format!("{}: {}", self.name(), self.state())
    }
}

/// Hooks a concrete behavior plugs into the engine.
///
/// Only the machine accessors are required. Hooks default to doing nothing.
///
/// # Example
///
/// ```rust
/// use tickwork::{Behavior, BehaviorLogic, BehaviorState, StateMachine};
///
/// struct Countdown {
///     machine: StateMachine<Countdown, ()>,
///     remaining: u32,
/// }
///
/// impl Countdown {
///     fn new(from: u32) -> Self {
///         let mut machine: StateMachine<Countdown, ()> = StateMachine::new("countdown", false);
///         machine
///             .add_transition(BehaviorState::Start, BehaviorState::Running, |_, _| true, "immediately")
///             .add_transition(
///                 BehaviorState::Running,
///                 BehaviorState::Completed,
///                 |c: &Countdown, _| c.remaining == 0,
///                 "reached zero",
///             );
///         Self { machine, remaining: from }
///     }
/// }
///
/// impl BehaviorLogic<()> for Countdown {
///     fn machine(&self) -> &StateMachine<Self, ()> {
///         &self.machine
///     }
///
///     fn machine_mut(&mut self) -> &mut StateMachine<Self, ()> {
///         &mut self.machine
///     }
///
///     fn execute_running(&mut self, _ctx: &mut ()) {
///         self.remaining = self.remaining.saturating_sub(1);
///     }
/// }
///
/// let mut countdown = Countdown::new(2);
/// countdown.run(&mut ()); // start -> running, 2 -> 1
/// countdown.run(&mut ()); // 1 -> 0
/// countdown.run(&mut ()); // running -> completed
/// assert!(countdown.is_in_state(BehaviorState::Completed));
/// ```
pub trait BehaviorLogic<C>: Sized + Send {
    fn machine(&self) -> &StateMachine<Self, C>;

    fn machine_mut(&mut self) -> &mut StateMachine<Self, C>;

    /// Work performed on every tick spent in `Running`.
    fn execute_running(&mut self, _ctx: &mut C) {}

    /// Called right after the machine entered `state`.
    fn on_enter(&mut self, _state: BehaviorState, _ctx: &mut C) {}

    /// Called right before the machine leaves `state`.
    fn on_exit(&mut self, _state: BehaviorState, _ctx: &mut C) {}

    fn sub_behaviors(&self) -> &[Box<dyn Behavior<C>>] {
        &[]
    }

    fn active_index(&self) -> Option<usize> {
        None
    }
}

impl<C: 'static, T> Behavior<C> for T
where
    T: BehaviorLogic<C>,
{
    fn id(&self) -> BehaviorId {
        self.machine().id()
    }

    fn name(&self) -> &str {
        self.machine().name()
    }

    fn state(&self) -> BehaviorState {
        self.machine().state()
    }

    fn is_continuous(&self) -> bool {
        self.machine().is_continuous()
    }

    fn history(&self) -> &StateHistory<BehaviorState> {
        self.machine().history()
    }

    fn run(&mut self, ctx: &mut C) {
        if self.machine().is_done_running() {
            return;
        }

        if let Some(next) = self.machine().next_transition(&*self, &*ctx) {
            transition_to(self, next.to, next.description, ctx);
        }

        if self.machine().is_in_state(BehaviorState::Running) {
            tracing::trace!(behavior = self.machine().name(), "execute running");
            self.execute_running(ctx);
        }
    }

    fn terminate(&mut self, ctx: &mut C) {
        if self.machine().is_done_running() {
            return;
        }

        transition_to(
            self,
            BehaviorState::Cancelled,
            "terminated".to_string(),
            ctx,
        );
    }

    fn children(&self) -> &[Box<dyn Behavior<C>>] {
        self.sub_behaviors()
    }

    fn current_child_index(&self) -> Option<usize> {
        self.active_index()
    }
}

fn transition_to<C, T>(behavior: &mut T, to: BehaviorState, description: String, ctx: &mut C)
where
    T: BehaviorLogic<C>,
{
    let from = behavior.machine().state();
    behavior.on_exit(from, ctx);

    {
        let machine = behavior.machine();
        tracing::debug!(
            behavior = machine.name(),
            id = %machine.id(),
            %from,
            %to,
            reason = %description,
            "behavior transition"
        );
    }
    behavior.machine_mut().apply(to, description);

    behavior.on_enter(to, ctx);
}
