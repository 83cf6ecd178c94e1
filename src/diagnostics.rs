//! Read-only views of a running behavior tree.
//!
//! [`render_tree`] produces the indented text view used in logs and
//! consoles. [`BehaviorSnapshot`] captures the same information as data
//! that can be serialized for external tools.

use crate::behavior::{Behavior, BehaviorLogic};
use crate::core::{BehaviorId, BehaviorState};
use serde::{Deserialize, Serialize};

/// Render the tree rooted at `root`.
///
/// Each sub-behavior goes on its own line, indented one tab per level.
/// The active sub-behavior of a composite is marked with `*`.
///
/// ```rust
/// use tickwork::{diagnostics, Behavior, Leaf, SequenceBuilder};
///
/// let mut seq = SequenceBuilder::<()>::named("plan")
///     .then(Leaf::<()>::builder("aim").build().unwrap())
///     .then(Leaf::<()>::builder("kick").build().unwrap())
///     .build()
///     .unwrap();
/// seq.run(&mut ());
///
/// assert_eq!(
///     diagnostics::render_tree(&seq),
///     "plan: running\n\t* aim: running\n\t  kick: start"
/// );
/// ```
pub fn render_tree<C>(root: &dyn Behavior<C>) -> String {
    let mut out = root.describe();
    write_children(&mut out, root, 1);
    out
}

fn write_children<C>(out: &mut String, node: &dyn Behavior<C>, depth: usize) {
    let current = node.current_child_index();
    for (index, child) in node.children().iter().enumerate() {
        out.push('\n');
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(if current == Some(index) { "* " } else { "  " });
        out.push_str(&child.describe());
        write_children(out, child.as_ref(), depth + 1);
    }
}

/// Serializable picture of one node and its sub-tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSnapshot {
    pub id: BehaviorId,
    pub name: String,
    pub state: BehaviorState,
    pub continuous: bool,
    /// Whether the parent composite is currently working on this node.
    pub current: bool,
    pub children: Vec<BehaviorSnapshot>,
}

impl BehaviorSnapshot {
    pub fn capture<C>(root: &dyn Behavior<C>) -> Self {
        Self::capture_node(root, false)
    }

    fn capture_node<C>(node: &dyn Behavior<C>, current: bool) -> Self {
        let active = node.current_child_index();
        let children = node
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| Self::capture_node(child.as_ref(), active == Some(index)))
            .collect();

        Self {
            id: node.id(),
            name: node.name().to_string(),
            state: node.state(),
            continuous: node.is_continuous(),
            current,
            children,
        }
    }

    /// Nodes on the active path, from this node down to the deepest
    /// current sub-behavior.
    pub fn active_path(&self) -> Vec<&BehaviorSnapshot> {
        let mut path = vec![self];
        let mut node = self;
        while let Some(next) = node.children.iter().find(|c| c.current) {
            path.push(next);
            node = next;
        }
        path
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Graphviz rendering of a behavior's own transition table.
pub fn transition_graph<C, B>(behavior: &B) -> String
where
    B: BehaviorLogic<C>,
{
    let machine = behavior.machine();
    machine.transitions().to_dot(machine.name())
}
