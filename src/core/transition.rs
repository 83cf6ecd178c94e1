//! Guarded transitions and the ordered transition table.

use super::guard::Guard;
use super::state::{BehaviorState, State};
use std::fmt::Write as _;

/// A guarded edge from one state to another.
pub struct Transition<B, C> {
    pub from: BehaviorState,
    pub to: BehaviorState,
    pub guard: Guard<B, C>,
    pub description: String,
}

impl<B, C> Transition<B, C> {
    /// Check if this transition can fire from the current state.
    pub fn can_fire(&self, current: BehaviorState, behavior: &B, ctx: &C) -> bool {
        if current != self.from {
            return false;
        }

        self.guard.check(behavior, ctx)
    }
}

/// Ordered table of guarded transitions.
///
/// Rows are kept in insertion order. For a given source state the first
/// row whose guard passes wins; later rows are not evaluated.
pub struct TransitionTable<B, C> {
    rows: Vec<Transition<B, C>>,
}

impl<B, C> Default for TransitionTable<B, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, C> TransitionTable<B, C> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a row. No reachability or cycle checks are made.
    pub fn push(&mut self, transition: Transition<B, C>) {
        self.rows.push(transition);
    }

    /// Rows whose source is `state`, in evaluation order.
    pub fn rows_from(&self, state: BehaviorState) -> impl Iterator<Item = &Transition<B, C>> {
        self.rows.iter().filter(move |row| row.from == state)
    }

    /// The first row that can fire from `current`.
    pub fn first_match(
        &self,
        current: BehaviorState,
        behavior: &B,
        ctx: &C,
    ) -> Option<&Transition<B, C>> {
        self.rows
            .iter()
            .find(|row| row.can_fire(current, behavior, ctx))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a Graphviz digraph.
    ///
    /// Every state appears as a node, even if no row touches it, so the
    /// terminal states are always visible.
    pub fn to_dot(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", escape(name));
        for state in BehaviorState::ALL {
            let shape = if state.is_final() {
                "doublecircle"
            } else {
                "circle"
            };
            let _ = writeln!(out, "    \"{}\" [shape={}];", state.name(), shape);
        }
        for row in &self.rows {
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                row.from.name(),
                row.to.name(),
                escape(&row.description)
            );
        }
        out.push('}');
        out
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
