//! Source-side model of a hierarchical state machine.
//!
//! These types describe the shape an HSM engine adapter hands to
//! [`sync`](crate::mirror::sync): names, nesting, the designated start child
//! of each scope, and transition connectivity. They carry none of the
//! engine's runtime state; the mirror only reads them.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransitionKind {
    /// Taken unconditionally when evaluated.
    Plain,
    /// Taken when the named event fires. The trigger key is kept for
    /// adapters and debugging; mirroring discards it.
    Triggered(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Target state or machine name. `None` means the transition has not
    /// been wired yet; the mirror skips it silently.
    pub target: Option<String>,
    pub kind: TransitionKind,
}

impl Transition {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            kind: TransitionKind::Plain,
        }
    }

    pub fn on(trigger: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            kind: TransitionKind::Triggered(trigger.into()),
        }
    }

    pub fn unresolved() -> Self {
        Self {
            target: None,
            kind: TransitionKind::Plain,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeafState {
    pub name: String,
    pub transitions: Vec<Transition>,
}

impl LeafState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
        }
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineNode {
    pub name: String,
    /// Direct children; order only matters for the default-node fallback.
    pub children: Vec<HsmNode>,
    /// Name of the designated start child, when one is declared.
    pub start: Option<String>,
    /// The machine's own outgoing transitions, as a child of its parent
    /// scope. Ignored for the root machine.
    pub transitions: Vec<Transition>,
    /// From-any transitions declared inside this machine. Each scope owns
    /// its own set.
    pub any_transitions: Vec<Transition>,
}

impl MachineNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            start: None,
            transitions: Vec::new(),
            any_transitions: Vec::new(),
        }
    }

    pub fn start(mut self, child: impl Into<String>) -> Self {
        self.start = Some(child.into());
        self
    }

    pub fn child(mut self, child: impl Into<HsmNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn any_transition(mut self, transition: Transition) -> Self {
        self.any_transitions.push(transition);
        self
    }
}

/// A node of the hierarchy: either a leaf state or a nested machine.
/// Exactly these two cases exist, so traversals match on the variant rather
/// than dispatching through a trait object.
#[derive(Debug, Clone, Serialize)]
pub enum HsmNode {
    Leaf(LeafState),
    Machine(MachineNode),
}

impl HsmNode {
    pub fn name(&self) -> &str {
        match self {
            HsmNode::Leaf(leaf) => &leaf.name,
            HsmNode::Machine(machine) => &machine.name,
        }
    }

    /// The node's own outgoing transitions within its parent scope.
    pub fn transitions(&self) -> &[Transition] {
        match self {
            HsmNode::Leaf(leaf) => &leaf.transitions,
            HsmNode::Machine(machine) => &machine.transitions,
        }
    }
}

impl From<LeafState> for HsmNode {
    fn from(leaf: LeafState) -> Self {
        HsmNode::Leaf(leaf)
    }
}

impl From<MachineNode> for HsmNode {
    fn from(machine: MachineNode) -> Self {
        HsmNode::Machine(machine)
    }
}
