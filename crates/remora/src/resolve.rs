//! Reports the currently active leaf state of a live machine.

use tracing::debug;

/// Upper bound on nested-machine descents. A well-formed machine bottoms out
/// long before this; the bound only guards against active-chain cycles.
pub const MAX_ACTIVE_DEPTH: usize = 100;

/// Seam to the live HSM engine: the minimal runtime view the resolver needs.
pub trait ActiveScope {
    /// The name this machine currently reports as active, independent of
    /// whether an active child object is available.
    fn reported_active_name(&self) -> String;

    /// The currently active direct child, when one is set.
    fn active_child(&self) -> Option<ActiveChild<'_>>;
}

pub enum ActiveChild<'a> {
    Leaf(&'a str),
    Machine(&'a dyn ActiveScope),
}

/// Walks active children downward from `root` and returns the name of the
/// first active leaf state.
///
/// A machine with no active child resolves to its own reported active name.
/// Hitting [`MAX_ACTIVE_DEPTH`] degrades to the deepest machine's reported
/// name instead of failing.
pub fn resolve_active_leaf_name(root: &dyn ActiveScope) -> String {
    let mut scope = root;
    let mut descents = 0usize;
    loop {
        match scope.active_child() {
            None => return scope.reported_active_name(),
            Some(ActiveChild::Leaf(name)) => return name.to_owned(),
            Some(ActiveChild::Machine(nested)) => {
                descents += 1;
                if descents >= MAX_ACTIVE_DEPTH {
                    debug!(
                        descents,
                        "active-state chain exceeded the descent bound; \
                         reporting the deepest machine's active name"
                    );
                    return nested.reported_active_name();
                }
                scope = nested;
            }
        }
    }
}
