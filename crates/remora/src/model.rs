//! Deterministic JSON snapshot of a mirrored graph.
//!
//! The mirror exists for visualization and debugging; this export gives
//! integrations and tests a stable shape to look at without coupling them to
//! the graph container's internals. Iteration follows node insertion order.

use remora_graph::{EdgeSource, MirrorGraph, Scope};
use serde_json::{Value, json};

pub fn graph_model(graph: &MirrorGraph) -> Value {
    let states: Vec<&str> = graph
        .nodes()
        .filter(|(_, kind)| !kind.is_group())
        .map(|(id, _)| id)
        .collect();

    let mut groups = serde_json::Map::new();
    for (id, kind) in graph.nodes() {
        if !kind.is_group() {
            continue;
        }
        let scope = Scope::group(id);
        groups.insert(
            id.to_string(),
            json!({
                "members": graph.children(&scope),
                "default": graph.default_node(&scope),
            }),
        );
    }

    let edges: Vec<Value> = graph
        .edges()
        .map(|edge| match &edge.source {
            EdgeSource::Node(node) => json!({
                "from": node,
                "to": edge.target,
                "always": edge.condition.always,
            }),
            EdgeSource::Any(scope) => {
                let scope_name = match scope {
                    Scope::Root => Value::Null,
                    Scope::Group(group) => json!(group),
                };
                json!({
                    "fromAny": scope_name,
                    "to": edge.target,
                    "always": edge.condition.always,
                })
            }
        })
        .collect();

    json!({
        "root": {
            "members": graph.children(&Scope::Root),
            "default": graph.default_node(&Scope::Root),
        },
        "states": states,
        "groups": Value::Object(groups),
        "edges": edges,
    })
}
