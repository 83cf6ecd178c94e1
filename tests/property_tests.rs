//! Property-based tests for behaviors and sequences.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated sequences.

use proptest::prelude::*;
use tickwork::core::{Guard, State, StateHistory, StateTransition};
use tickwork::{Behavior, BehaviorState, BuildError, ConfigViolation, Leaf, Sequence};

/// Every leaf appends its index to the log on each running tick.
type Log = Vec<usize>;

#[derive(Clone, Debug)]
struct Step {
    work: u64,
    fails: bool,
}

fn leaf(index: usize, step: &Step) -> Leaf<Log> {
    let work = step.work;
    let done = move |leaf: &Leaf<Log>, _: &Log| leaf.ticks_running() >= work;
    let builder = Leaf::builder(format!("step-{index}"))
        .on_running(move |log: &mut Log| log.push(index));
    let builder = if step.fails {
        builder.fail_when(done, "gave up")
    } else {
        builder.complete_when(done, "finished")
    };
    builder.build().unwrap()
}

fn sequence_of(steps: &[Step]) -> Sequence<Log> {
    let behaviors: Vec<Box<dyn Behavior<Log>>> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| Box::new(leaf(index, step)) as Box<dyn Behavior<Log>>)
        .collect();
    Sequence::new(behaviors).unwrap()
}

fn drive(seq: &mut Sequence<Log>, log: &mut Log) {
    for _ in 0..500 {
        if seq.is_done_running() {
            return;
        }
        seq.run(log);
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..5u8) -> BehaviorState {
        BehaviorState::ALL[variant as usize]
    }
}

prop_compose! {
    fn arbitrary_step()(work in 1..4u64, fails in prop::bool::weighted(0.2)) -> Step {
        Step { work, fails }
    }
}

proptest! {
    #[test]
    fn guard_is_deterministic(state in arbitrary_state()) {
        let guard = Guard::<(), BehaviorState>::new(|_, s| !s.is_final());
        let result1 = guard.check(&(), &state);
        let result2 = guard.check(&(), &state);
        prop_assert_eq!(result1, result2);
    }

    #[test]
    fn only_start_and_running_are_live(state in arbitrary_state()) {
        let live = matches!(state, BehaviorState::Start | BehaviorState::Running);
        prop_assert_eq!(state.is_final(), !live);
        prop_assert_eq!(state.is_error(), state == BehaviorState::Failed);
    }

    #[test]
    fn history_preserves_order(
        states in prop::collection::vec(arbitrary_state(), 1..10)
    ) {
        let mut history = StateHistory::new();
        for window in states.windows(2) {
            history.record(StateTransition::now(window[0], window[1], "step"));
        }

        let path = history.get_path();
        if states.len() > 1 {
            prop_assert_eq!(path.len(), states.len());
            for (recorded, expected) in path.iter().zip(states.iter()) {
                prop_assert_eq!(*recorded, expected);
            }
        } else {
            prop_assert!(path.is_empty());
        }
    }

    #[test]
    fn fresh_sequences_build_and_inherit_continuity(
        flags in prop::collection::vec(any::<bool>(), 1..8)
    ) {
        let behaviors: Vec<Box<dyn Behavior<()>>> = flags
            .iter()
            .enumerate()
            .map(|(index, continuous)| {
                Box::new(
                    Leaf::<()>::builder(format!("leaf-{index}"))
                        .continuous(*continuous)
                        .build()
                        .unwrap(),
                ) as Box<dyn Behavior<()>>
            })
            .collect();
        let last = flags.len() - 1;
        let stalling = flags[..last].iter().filter(|c| **c).count();

        match Sequence::new(behaviors) {
            Ok(seq) => {
                prop_assert_eq!(stalling, 0);
                prop_assert_eq!(seq.is_continuous(), flags[last]);
                prop_assert!(seq.is_in_state(BehaviorState::Start));
            }
            Err(BuildError::InvalidSequence { violations }) => {
                prop_assert_eq!(violations.len(), stalling);
                for violation in &violations {
                    let is_continuous_violation =
                        matches!(violation, ConfigViolation::ContinuousBeforeEnd { .. });
                    prop_assert!(is_continuous_violation);
                    prop_assert!(violation.index() < last);
                }
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn used_behavior_is_rejected(
        steps in prop::collection::vec(arbitrary_step(), 1..6),
        pick in any::<prop::sample::Index>()
    ) {
        let used = pick.index(steps.len());
        let mut log = Log::new();
        let behaviors: Vec<Box<dyn Behavior<Log>>> = steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let mut leaf = leaf(index, step);
                if index == used {
                    leaf.run(&mut log);
                }
                Box::new(leaf) as Box<dyn Behavior<Log>>
            })
            .collect();

        let err = Sequence::new(behaviors).unwrap_err();

        prop_assert_eq!(
            err.violations(),
            &[ConfigViolation::NotInStartState {
                index: used,
                name: format!("step-{used}"),
                state: BehaviorState::Running,
            }][..]
        );
    }

    #[test]
    fn sequence_runs_elements_in_order_one_at_a_time(
        steps in prop::collection::vec(arbitrary_step(), 1..6)
    ) {
        let mut seq = sequence_of(&steps);
        let mut log = Log::new();

        drive(&mut seq, &mut log);

        prop_assert!(seq.is_done_running());
        prop_assert!(log.windows(2).all(|w| w[0] <= w[1]));

        // each element does exactly its own amount of work, once
        for index in log.iter().copied().collect::<std::collections::BTreeSet<_>>() {
            let ticks = log.iter().filter(|i| **i == index).count() as u64;
            prop_assert_eq!(ticks, steps[index].work);
        }
    }

    #[test]
    fn successful_elements_complete_the_sequence(
        works in prop::collection::vec(1..4u64, 1..6)
    ) {
        let steps: Vec<Step> = works.iter().map(|w| Step { work: *w, fails: false }).collect();
        let mut seq = sequence_of(&steps);
        let mut log = Log::new();

        drive(&mut seq, &mut log);

        prop_assert!(seq.is_in_state(BehaviorState::Completed));
        prop_assert_eq!(seq.current_behavior_index(), steps.len());
        prop_assert!(seq.current_behavior().is_none());
        prop_assert!(seq
            .behaviors()
            .iter()
            .all(|b| b.is_in_state(BehaviorState::Completed)));
    }

    #[test]
    fn first_failure_cancels_the_tail(
        steps in prop::collection::vec(arbitrary_step(), 1..6)
    ) {
        let mut seq = sequence_of(&steps);
        let mut log = Log::new();

        drive(&mut seq, &mut log);

        match steps.iter().position(|s| s.fails) {
            Some(k) => {
                prop_assert!(seq.is_in_state(BehaviorState::Failed));
                prop_assert_eq!(seq.current_behavior_index(), k);
                for (index, behavior) in seq.behaviors().iter().enumerate() {
                    let expected = if index < k {
                        BehaviorState::Completed
                    } else if index == k {
                        BehaviorState::Failed
                    } else {
                        BehaviorState::Cancelled
                    };
                    prop_assert_eq!(behavior.state(), expected);
                    if index > k {
                        prop_assert!(!log.contains(&index));
                        prop_assert_eq!(
                            behavior.history().get_path(),
                            vec![&BehaviorState::Start, &BehaviorState::Cancelled]
                        );
                    }
                }
            }
            None => prop_assert!(seq.is_in_state(BehaviorState::Completed)),
        }
    }

    #[test]
    fn terminate_cancels_from_the_cursor(
        steps in prop::collection::vec(arbitrary_step(), 1..6),
        ticks in 0..25usize
    ) {
        let mut seq = sequence_of(&steps);
        let mut log = Log::new();
        for _ in 0..ticks {
            seq.run(&mut log);
        }
        let was_done = seq.is_done_running();
        let cursor = seq.current_behavior_index();
        let before: Vec<BehaviorState> = seq.behaviors().iter().map(|b| b.state()).collect();

        seq.terminate(&mut log);

        if was_done {
            let after: Vec<BehaviorState> = seq.behaviors().iter().map(|b| b.state()).collect();
            prop_assert_eq!(after, before);
            prop_assert!(!seq.is_in_state(BehaviorState::Cancelled));
        } else {
            prop_assert!(seq.is_in_state(BehaviorState::Cancelled));
            for (index, behavior) in seq.behaviors().iter().enumerate() {
                prop_assert!(behavior.is_done_running());
                if index < cursor || before[index].is_final() {
                    // finished elements are left untouched
                    prop_assert_eq!(behavior.state(), before[index]);
                } else {
                    prop_assert!(behavior.is_in_state(BehaviorState::Cancelled));
                }
            }
        }
    }
}
