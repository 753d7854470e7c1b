//! Synchronizes a hierarchical state machine into a [`MirrorGraph`].
//!
//! One `sync` call walks the source hierarchy scope by scope. Each scope
//! runs a structural pass over its direct children (create-or-reuse mirror
//! entities, assign the scope's default node, recurse depth-first into
//! nested machines) and only then an edge pass over those same children, so
//! a transition may reference a sibling declared later in iteration order.
//! Edges are always destroyed and recreated; nodes and groups persist across
//! syncs and are identified purely by name.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use remora_graph::{EdgeSource, MirrorEdge, MirrorGraph, Scope};

use crate::error::{Error, Result};
use crate::hsm::{HsmNode, MachineNode, Transition};
use crate::utils::{find_first, mark_always};

/// Options for one `sync` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Remove target nodes whose name is absent from the current source
    /// hierarchy once the sync succeeds. Off by default: mirror entities
    /// normally persist even when the source shrinks.
    pub prune_orphans: bool,
}

impl SyncOptions {
    /// Sync plus the reconciliation pass that removes orphaned mirror nodes.
    pub fn pruning() -> Self {
        Self {
            prune_orphans: true,
        }
    }
}

/// Mirrors `root` into `target`, reusing existing target entities by name
/// and rebuilding every edge.
///
/// `target` may be empty or may hold the result of a prior sync. On error
/// the target is left in a re-syncable but indeterminate state (see
/// [`Error::UnknownTarget`]); calling `sync` again after fixing the source
/// is always safe.
pub fn sync(root: &MachineNode, target: &mut MirrorGraph) -> Result<()> {
    sync_with_options(root, target, SyncOptions::default())
}

pub fn sync_with_options(
    root: &MachineNode,
    target: &mut MirrorGraph,
    options: SyncOptions,
) -> Result<()> {
    if root.children.is_empty() {
        return Err(Error::EmptyMachine {
            machine: root.name.clone(),
        });
    }

    debug!(machine = %root.name, "mirroring state machine hierarchy");

    let mut pass = SyncPass {
        target,
        states: FxHashSet::default(),
        groups: FxHashSet::default(),
    };
    pass.sync_scope(root, &Scope::Root)?;

    // The root scope's own from-any set. Nested scopes have theirs attached
    // by their parent's edge pass; the root has no parent, so it is handled
    // here, after every name in the hierarchy has been registered.
    pass.target.remove_any_edges(&Scope::Root);
    for transition in &root.any_transitions {
        pass.attach_transition(EdgeSource::Any(Scope::Root), transition, &root.name)?;
    }

    if options.prune_orphans {
        pass.prune_orphans();
    }

    Ok(())
}

/// Scratch state for one sync run. The two name registries are shared across
/// every nesting level: mirror names are unique in the whole tree, and a
/// transition may target an entity mirrored anywhere in the recursion.
struct SyncPass<'a> {
    target: &'a mut MirrorGraph,
    states: FxHashSet<String>,
    groups: FxHashSet<String>,
}

impl SyncPass<'_> {
    fn sync_scope(&mut self, machine: &MachineNode, scope: &Scope) -> Result<()> {
        self.mirror_children(machine, scope)?;
        self.rebuild_edges(machine)
    }

    fn mirror_children(&mut self, machine: &MachineNode, scope: &Scope) -> Result<()> {
        let mut fallback_assigned = false;
        for child in &machine.children {
            match child {
                HsmNode::Leaf(leaf) => self.mirror_state(&leaf.name, scope),
                HsmNode::Machine(nested) => {
                    self.mirror_group(&nested.name, scope);
                    // Depth-first: the nested scope registers its own
                    // entities and rebuilds its internal edges before any
                    // sibling of this scope is visited.
                    self.sync_scope(nested, &Scope::group(&nested.name))?;
                }
            }

            let is_start = machine.start.as_deref() == Some(child.name());
            if is_start || (machine.start.is_none() && !fallback_assigned) {
                self.target.set_default(scope.clone(), child.name());
                fallback_assigned = true;
            }
        }
        Ok(())
    }

    fn mirror_state(&mut self, name: &str, scope: &Scope) {
        if self.states.contains(name) {
            return;
        }
        // The registry only knows entities seen by this run; the scan also
        // picks up same-named nodes already present in the target, whether
        // from a prior sync or created by the graph's owner.
        if find_first(self.target.nodes(), |(id, _)| *id == name).is_none() {
            trace!(state = name, "creating mirror node");
            self.target.ensure_state(name);
            if let Scope::Group(parent) = scope {
                self.target.set_parent(name, parent.as_str());
            }
        }
        self.states.insert(name.to_owned());
    }

    fn mirror_group(&mut self, name: &str, scope: &Scope) {
        if self.groups.contains(name) {
            return;
        }
        if find_first(self.target.nodes(), |(id, _)| *id == name).is_none() {
            trace!(group = name, "creating mirror subgraph");
            self.target.ensure_group(name);
            if let Scope::Group(parent) = scope {
                self.target.set_parent(name, parent.as_str());
            }
        }
        self.groups.insert(name.to_owned());
    }

    fn rebuild_edges(&mut self, machine: &MachineNode) -> Result<()> {
        for child in &machine.children {
            let name = child.name();
            self.target.remove_out_edges(name);
            for transition in child.transitions() {
                self.attach_transition(
                    EdgeSource::Node(name.to_owned()),
                    transition,
                    &machine.name,
                )?;
            }

            // A nested machine's from-any set attaches to that machine's own
            // scope, never to the scope currently being rebuilt.
            if let HsmNode::Machine(nested) = child {
                let nested_scope = Scope::group(&nested.name);
                self.target.remove_any_edges(&nested_scope);
                for transition in &nested.any_transitions {
                    self.attach_transition(
                        EdgeSource::Any(nested_scope.clone()),
                        transition,
                        &nested.name,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn attach_transition(
        &mut self,
        source: EdgeSource,
        transition: &Transition,
        scope_name: &str,
    ) -> Result<()> {
        let Some(target_name) = transition.target.as_deref() else {
            // Not wired on the source side yet; nothing to mirror.
            return Ok(());
        };
        if !self.states.contains(target_name) && !self.groups.contains(target_name) {
            return Err(Error::UnknownTarget {
                scope: scope_name.to_owned(),
                target: target_name.to_owned(),
            });
        }
        let mut edge = MirrorEdge::new(source, target_name);
        mark_always(&mut edge);
        self.target.add_edge(edge);
        Ok(())
    }

    /// Reconciliation pass: drops target nodes the current source no longer
    /// names, with their incident edges and scope state.
    fn prune_orphans(&mut self) {
        let orphans: Vec<String> = self
            .target
            .node_ids()
            .into_iter()
            .filter(|id| !self.states.contains(id) && !self.groups.contains(id))
            .collect();
        if orphans.is_empty() {
            return;
        }
        debug!(count = orphans.len(), "pruning orphaned mirror nodes");
        for id in orphans {
            self.target.remove_node(&id);
        }
    }
}
