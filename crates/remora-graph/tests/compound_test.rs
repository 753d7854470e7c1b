use remora_graph::{EdgeSource, MirrorEdge, MirrorGraph, NodeKind, Scope};

#[test]
fn ensure_node_is_idempotent_and_preserves_kind() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.ensure_state("a");
    g.ensure_group("a");

    assert_eq!(g.node_count(), 1);
    assert_eq!(g.node("a"), Some(NodeKind::State));
}

#[test]
fn parenting_moves_a_child_between_groups() {
    let mut g = MirrorGraph::new();
    g.ensure_group("g1");
    g.ensure_group("g2");
    g.ensure_state("a");

    g.set_parent("a", "g1");
    assert_eq!(g.parent("a"), Some("g1"));
    assert_eq!(g.children(&Scope::group("g1")), vec!["a"]);

    g.set_parent("a", "g2");
    assert_eq!(g.parent("a"), Some("g2"));
    assert!(g.children(&Scope::group("g1")).is_empty());
    assert_eq!(g.children(&Scope::group("g2")), vec!["a"]);
}

#[test]
fn set_parent_creates_missing_endpoints() {
    let mut g = MirrorGraph::new();
    g.set_parent("a", "g");

    assert_eq!(g.node("a"), Some(NodeKind::State));
    assert_eq!(g.node("g"), Some(NodeKind::Group));
}

#[test]
fn root_children_are_unparented_nodes_in_insertion_order() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.ensure_group("g");
    g.ensure_state("b");
    g.set_parent("b", "g");

    assert_eq!(g.children(&Scope::Root), vec!["a", "g"]);
}

#[test]
fn defaults_are_kept_per_scope() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.set_parent("b", "g");

    g.set_default(Scope::Root, "a");
    g.set_default(Scope::group("g"), "b");

    assert_eq!(g.default_node(&Scope::Root), Some("a"));
    assert_eq!(g.default_node(&Scope::group("g")), Some("b"));

    g.set_default(Scope::Root, "g");
    assert_eq!(g.default_node(&Scope::Root), Some("g"));
}

#[test]
fn out_edges_are_removed_per_source_node() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.ensure_state("b");
    g.add_edge(MirrorEdge::from_node("a", "b"));
    g.add_edge(MirrorEdge::from_node("a", "a"));
    g.add_edge(MirrorEdge::from_node("b", "a"));

    assert_eq!(g.out_edges("a").len(), 2);
    assert_eq!(g.remove_out_edges("a"), 2);
    assert_eq!(g.out_edges("a").len(), 0);
    assert_eq!(g.out_edges("b").len(), 1);
}

#[test]
fn any_edges_are_scoped() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.set_parent("b", "g");
    g.add_edge(MirrorEdge::from_any(Scope::Root, "a"));
    g.add_edge(MirrorEdge::from_any(Scope::group("g"), "a"));

    assert_eq!(g.any_edges(&Scope::Root).len(), 1);
    assert_eq!(g.any_edges(&Scope::group("g")).len(), 1);

    assert_eq!(g.remove_any_edges(&Scope::group("g")), 1);
    assert_eq!(g.any_edges(&Scope::Root).len(), 1);
    assert!(g.any_edges(&Scope::group("g")).is_empty());
}

#[test]
fn edge_condition_defaults_to_disabled() {
    let edge = MirrorEdge::from_node("a", "b");
    assert!(!edge.condition.always);
}

#[test]
fn remove_node_drops_incident_edges_links_and_scope_state() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.set_parent("b", "g");
    g.set_default(Scope::group("g"), "b");
    g.set_default(Scope::Root, "a");
    g.add_edge(MirrorEdge::from_node("a", "g"));
    g.add_edge(MirrorEdge::from_node("b", "a"));
    g.add_edge(MirrorEdge::from_any(Scope::group("g"), "a"));

    assert!(g.remove_node("g"));
    assert!(!g.has_node("g"));
    // `b` drifts to the root once its group is gone.
    assert_eq!(g.parent("b"), None);
    // Edges into the group and any-edges keyed by it are gone.
    assert_eq!(g.edge_count(), 1);
    assert!(
        g.edges()
            .all(|e| e.source == EdgeSource::Node("b".to_string()))
    );
    assert_eq!(g.default_node(&Scope::group("g")), None);
    assert_eq!(g.default_node(&Scope::Root), Some("a"));

    assert!(!g.remove_node("g"));
}

#[test]
fn remove_node_reindexes_remaining_nodes() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.ensure_state("b");
    g.ensure_state("c");

    assert!(g.remove_node("a"));
    assert_eq!(g.node("b"), Some(NodeKind::State));
    assert_eq!(g.node("c"), Some(NodeKind::State));
    assert_eq!(g.node_ids(), vec!["b", "c"]);
}

#[test]
fn removing_a_default_node_clears_the_scope_default() {
    let mut g = MirrorGraph::new();
    g.ensure_state("a");
    g.set_default(Scope::Root, "a");

    assert!(g.remove_node("a"));
    assert_eq!(g.default_node(&Scope::Root), None);
}
