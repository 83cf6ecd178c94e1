//! Kick Sequence
//!
//! This example drives a small behavior tree for a soccer robot.
//!
//! Key concepts:
//! - Leaves built from closures with guards and per-tick work
//! - A nested sequence for the shot itself
//! - A continuous last element that only ends when the driver terminates it
//! - Tree rendering and JSON snapshots for diagnostics
//!
//! Run with: RUST_LOG=tickwork=debug cargo run --example kick_sequence

use tickwork::{render_tree, Behavior, BehaviorSnapshot, BehaviorState, Leaf, SequenceBuilder};

#[derive(Debug, Default)]
struct Robot {
    position: i32,
    ball: i32,
    aimed: bool,
    kicked: bool,
    guard_ticks: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Kick Sequence ===\n");

    let approach = Leaf::builder("approach ball")
        .on_running(|robot: &mut Robot| robot.position += 1)
        .complete_when(|_, robot: &Robot| robot.position >= robot.ball, "reached ball")
        .fail_when(|leaf: &Leaf<Robot>, _| leaf.ticks_running() > 10, "ball out of reach")
        .build()
        .unwrap();

    let aim = Leaf::builder("aim")
        .on_running(|robot: &mut Robot| robot.aimed = true)
        .complete_when(|_, robot: &Robot| robot.aimed, "aimed at goal")
        .build()
        .unwrap();
    let kick = Leaf::builder("kick")
        .start_when(|_, robot: &Robot| robot.aimed)
        .on_running(|robot: &mut Robot| robot.kicked = true)
        .complete_when(|_, robot: &Robot| robot.kicked, "ball kicked")
        .build()
        .unwrap();
    let shoot = SequenceBuilder::named("shoot")
        .then(aim)
        .then(kick)
        .build()
        .unwrap();

    let guard_goal = Leaf::builder("guard goal")
        .continuous(true)
        .on_running(|robot: &mut Robot| robot.guard_ticks += 1)
        .on_exit(BehaviorState::Running, |robot: &mut Robot| {
            println!("  guard goal stopped after {} ticks", robot.guard_ticks)
        })
        .build()
        .unwrap();

    let mut play = SequenceBuilder::named("attack then defend")
        .then(approach)
        .then(shoot)
        .then(guard_goal)
        .build()
        .unwrap();

    println!("Continuous: {}\n", play.is_continuous());

    let mut robot = Robot {
        ball: 3,
        ..Robot::default()
    };

    for tick in 1..=16 {
        play.run(&mut robot);
        println!("tick {tick}:\n{}\n", render_tree(&play));
    }

    println!("Driver terminates the tree");
    play.terminate(&mut robot);
    println!("{}\n", render_tree(&play));

    match BehaviorSnapshot::capture(&play).to_json() {
        Ok(json) => println!("Snapshot:\n{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }

    println!("\nFinal robot: {robot:?}");
    println!("\n=== Example Complete ===");
}
