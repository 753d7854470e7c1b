#![forbid(unsafe_code)]

//! Mirror-graph container APIs used by `remora`.
//!
//! The visualization format models a tree of subgraphs, each holding named
//! nodes, nested subgraphs, one designated default node, and an independent
//! set of "any state" edges. Because node and subgraph names are unique
//! across the whole mirrored tree, this crate keeps a single flat compound
//! graph instead of an owned object tree: groups are nodes with children,
//! and per-subgraph state (default node, any-state edges) is keyed by
//! [`Scope`].

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A plain state node.
    State,
    /// A nested subgraph, addressable both as an edge target and as a
    /// [`Scope`] for membership, default-node, and any-state queries.
    Group,
}

impl NodeKind {
    pub fn is_group(self) -> bool {
        matches!(self, NodeKind::Group)
    }
}

/// One subgraph level of the mirrored tree. Nodes without a parent belong to
/// `Root`; every `Group` scope is backed by a [`NodeKind::Group`] node of the
/// same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Root,
    Group(String),
}

impl Scope {
    pub fn group(id: impl Into<String>) -> Self {
        Scope::Group(id.into())
    }
}

/// Edge origin: a concrete node, or the "any state" pseudo-source of one
/// scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeSource {
    Node(String),
    Any(Scope),
}

/// Condition flag carried by every edge.
///
/// The visualization format treats an edge without a satisfied condition as a
/// disabled/fallthrough edge, so a freshly created edge starts out with
/// `always: false` until the owner tags it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeCondition {
    pub always: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEdge {
    pub source: EdgeSource,
    pub target: String,
    pub condition: EdgeCondition,
}

impl MirrorEdge {
    pub fn new(source: EdgeSource, target: impl Into<String>) -> Self {
        Self {
            source,
            target: target.into(),
            condition: EdgeCondition::default(),
        }
    }

    pub fn from_node(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(EdgeSource::Node(source.into()), target)
    }

    pub fn from_any(scope: Scope, target: impl Into<String>) -> Self {
        Self::new(EdgeSource::Any(scope), target)
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    id: String,
    kind: NodeKind,
}

/// Flat compound graph mirroring a hierarchical state machine.
///
/// Nodes are stored in insertion order (queries iterating nodes are
/// deterministic); lookups go through a name index. Edges are a plain list:
/// the mirroring algorithm rebuilds them wholesale, so there is no per-edge
/// identity beyond `(source, target)`.
#[derive(Debug, Default)]
pub struct MirrorGraph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,

    edges: Vec<MirrorEdge>,

    parent: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,

    defaults: HashMap<Scope, String>,
}

impl MirrorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<NodeKind> {
        self.node_index.get(id).map(|&idx| self.nodes[idx].kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeKind)> {
        self.nodes.iter().map(|n| (n.id.as_str(), n.kind))
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    fn insert_node(&mut self, id: String, kind: NodeKind) {
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            kind,
        });
        self.node_index.insert(id, idx);
    }

    /// Creates a state node unless a node with this name already exists.
    /// An existing node is left unchanged, whatever its kind.
    pub fn ensure_state(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if !self.node_index.contains_key(&id) {
            self.insert_node(id, NodeKind::State);
        }
        self
    }

    /// Creates a group node unless a node with this name already exists.
    /// An existing node is left unchanged, whatever its kind.
    pub fn ensure_group(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if !self.node_index.contains_key(&id) {
            self.insert_node(id, NodeKind::Group);
        }
        self
    }

    /// Places `child` inside the subgraph backed by `parent`. Missing
    /// endpoints are created (the child as a state, the parent as a group).
    pub fn set_parent(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        let child = child.into();
        let parent = parent.into();
        self.ensure_state(child.clone());
        self.ensure_group(parent.clone());
        if let Some(prev) = self.parent.insert(child.clone(), parent.clone()) {
            if let Some(ch) = self.children.get_mut(&prev) {
                ch.retain(|c| c != &child);
            }
        }
        let entry = self.children.entry(parent).or_default();
        if !entry.iter().any(|c| c == &child) {
            entry.push(child);
        }
        self
    }

    pub fn parent(&self, child: &str) -> Option<&str> {
        self.parent.get(child).map(|s| s.as_str())
    }

    /// Direct members of a scope, in insertion order.
    pub fn children(&self, scope: &Scope) -> Vec<&str> {
        match scope {
            Scope::Root => self
                .nodes
                .iter()
                .filter(|n| !self.parent.contains_key(&n.id))
                .map(|n| n.id.as_str())
                .collect(),
            Scope::Group(id) => self
                .children
                .get(id)
                .map(|v| v.iter().map(|s| s.as_str()).collect::<Vec<_>>())
                .unwrap_or_default(),
        }
    }

    pub fn set_default(&mut self, scope: Scope, node: impl Into<String>) -> &mut Self {
        self.defaults.insert(scope, node.into());
        self
    }

    pub fn default_node(&self, scope: &Scope) -> Option<&str> {
        self.defaults.get(scope).map(|s| s.as_str())
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &MirrorEdge> {
        self.edges.iter()
    }

    pub fn add_edge(&mut self, edge: MirrorEdge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Outgoing edges of a node, in insertion order.
    pub fn out_edges(&self, node: &str) -> Vec<&MirrorEdge> {
        self.edges
            .iter()
            .filter(|e| matches!(&e.source, EdgeSource::Node(n) if n == node))
            .collect()
    }

    /// Any-state edges declared at one scope. Edges of nested scopes are not
    /// included.
    pub fn any_edges(&self, scope: &Scope) -> Vec<&MirrorEdge> {
        self.edges
            .iter()
            .filter(|e| matches!(&e.source, EdgeSource::Any(s) if s == scope))
            .collect()
    }

    /// Destroys every outgoing edge of a node. Returns the number removed.
    pub fn remove_out_edges(&mut self, node: &str) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|e| !matches!(&e.source, EdgeSource::Node(n) if n == node));
        before - self.edges.len()
    }

    /// Destroys every any-state edge of one scope. Returns the number removed.
    pub fn remove_any_edges(&mut self, scope: &Scope) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|e| !matches!(&e.source, EdgeSource::Any(s) if s == scope));
        before - self.edges.len()
    }

    /// Removes a node along with its incident edges, parent/child links, and
    /// (for groups) the scope state keyed by it.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };
        self.nodes.remove(idx);
        for i in idx..self.nodes.len() {
            let node_id = self.nodes[i].id.as_str();
            if let Some(v) = self.node_index.get_mut(node_id) {
                *v = i;
            }
        }

        self.edges.retain(|e| {
            if e.target == id {
                return false;
            }
            match &e.source {
                EdgeSource::Node(n) => n != id,
                EdgeSource::Any(Scope::Group(g)) => g != id,
                EdgeSource::Any(Scope::Root) => true,
            }
        });

        if let Some(parent) = self.parent.remove(id) {
            if let Some(ch) = self.children.get_mut(&parent) {
                ch.retain(|c| c != id);
            }
        }
        if let Some(ch) = self.children.remove(id) {
            for child in ch {
                self.parent.remove(&child);
            }
        }

        self.defaults.remove(&Scope::Group(id.to_string()));
        self.defaults.retain(|_, v| v != id);

        true
    }
}
