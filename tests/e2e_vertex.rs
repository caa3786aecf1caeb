//! End-to-end tests for detached vertices.
//!
//! Tests selection-gated property capture, single-key lookups, incident
//! edge maps by direction and label, and (id, label) identity.
//! Each test builds a live graph in MemoryGraph and detaches from it.

use std::collections::HashSet;

use graph_deflate::structure::ElementIdentity;
use graph_deflate::{
    deflated, Direction, ElementId, Error, MemoryGraph, Selection, Value, Vertex,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helper: the "daniel" vertex and a small social graph.
// ============================================================================

fn daniel(graph: &MemoryGraph) -> ElementId {
    graph.add_vertex(
        "person",
        [
            ("name", Value::from("daniel")),
            ("favoriteColor", Value::from("red")),
            ("state", Value::from("happy")),
        ],
    )
}

/// marko -knows-> vadas, marko -knows-> josh, marko -created-> lop,
/// josh -created-> lop, peter -knows-> marko.
/// Returns (graph, marko).
fn modern() -> (MemoryGraph, ElementId) {
    let graph = MemoryGraph::new();
    let marko = graph.add_vertex("person", [("name", Value::from("marko")), ("age", Value::from(29))]);
    let vadas = graph.add_vertex("person", [("name", Value::from("vadas"))]);
    let josh = graph.add_vertex("person", [("name", Value::from("josh"))]);
    let lop = graph.add_vertex("software", [("name", Value::from("lop"))]);
    let peter = graph.add_vertex("person", [("name", Value::from("peter"))]);

    graph.add_edge(&marko, &vadas, "knows", [("weight", Value::from(0.5))]).unwrap();
    graph.add_edge(&marko, &josh, "knows", [("weight", Value::from(1.0))]).unwrap();
    graph.add_edge(&marko, &lop, "created", [("weight", Value::from(0.4))]).unwrap();
    graph.add_edge(&josh, &lop, "created", [("weight", Value::from(0.4))]).unwrap();
    graph.add_edge(&peter, &marko, "knows", [("weight", Value::from(0.2))]).unwrap();

    (graph, marko)
}

fn captured(vertex: &graph_deflate::DeflatedVertex) -> Vec<(String, Value)> {
    let mut pairs: Vec<(String, Value)> = vertex
        .properties(&[])
        .map(|p| (p.key().to_string(), p.value().clone()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

// ============================================================================
// 1. Properties: all, some, none
// ============================================================================

#[test]
fn test_all_properties_with_empty_key_set() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::none().with_properties(Vec::<String>::new()));

    assert_eq!(
        captured(&detached),
        vec![
            ("favoriteColor".to_string(), Value::from("red")),
            ("name".to_string(), Value::from("daniel")),
            ("state".to_string(), Value::from("happy")),
        ]
    );
}

#[test]
fn test_all_properties_named_explicitly() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(
        &live,
        &Selection::none().with_properties(["name", "favoriteColor", "state"]),
    );
    assert_eq!(detached.properties(&[]).count(), 3);
}

#[test]
fn test_some_properties() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::none().with_properties(["name", "favoriteColor"]));

    assert_eq!(
        captured(&detached),
        vec![
            ("favoriteColor".to_string(), Value::from("red")),
            ("name".to_string(), Value::from("daniel")),
        ]
    );
    // "state" exists on the live vertex but was never captured
    assert_eq!(detached.properties(&["state"]).count(), 0);
    assert_eq!(detached.value("state").unwrap(), None);
}

#[test]
fn test_no_properties() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::none());
    assert!(detached.properties(&[]).next().is_none());
    assert_eq!(detached.keys().count(), 0);
    assert_eq!(detached.id(), &id);
    assert_eq!(detached.label(), "person");
}

#[test]
fn test_properties_read_filter() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::all());
    let names: Vec<&str> = detached.properties(&["name", "missing"]).map(|p| p.key()).collect();
    assert_eq!(names, vec!["name"]);
}

// ============================================================================
// 2. Single-key lookup
// ============================================================================

#[test]
fn test_property_lookup_absent_is_none() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::all());
    assert!(detached.property("nickname").unwrap().is_none());
    assert_eq!(detached.value("name").unwrap(), Some(&Value::from("daniel")));
}

#[test]
fn test_property_lookup_multiple_values_is_ambiguous() {
    let graph = MemoryGraph::new();
    let id = graph.add_vertex("person", [("alias", "dan"), ("alias", "danny")]);
    let live = graph.vertex(&id).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::all());
    assert_eq!(detached.properties(&["alias"]).count(), 2);

    match detached.property("alias") {
        Err(Error::AmbiguousLookup { key }) => assert_eq!(key, "alias"),
        other => panic!("expected AmbiguousLookup, got {other:?}"),
    }
}

// ============================================================================
// 3. Incident edges
// ============================================================================

#[test]
fn test_edges_not_selected_are_empty() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::none().with_properties(Vec::<String>::new()));
    assert_eq!(detached.edges(Direction::Both, &[]).count(), 0);
    assert_eq!(detached.vertices(Direction::Both, &[]).count(), 0);
    // the live vertex has them
    assert_eq!(live.edges(Direction::Both, &[]).count(), 4);
}

#[test]
fn test_out_edges_all_labels() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();

    let detached = deflated::detach_vertex(&live, &Selection::none().with_out_edges(Vec::<String>::new()));
    assert_eq!(detached.edges(Direction::Outgoing, &[]).count(), 3);
    assert_eq!(detached.edges(Direction::Outgoing, &["knows"]).count(), 2);
    assert_eq!(detached.edges(Direction::Outgoing, &["created"]).count(), 1);
    assert_eq!(detached.edges(Direction::Incoming, &[]).count(), 0);
}

#[test]
fn test_edges_restricted_at_capture() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();

    let detached = deflated::detach_vertex(
        &live,
        &Selection::none().with_out_edges(["created"]).with_in_edges(["knows"]),
    );
    let out: Vec<&str> = detached.edges(Direction::Outgoing, &[]).map(|e| e.label()).collect();
    assert_eq!(out, vec!["created"]);
    assert_eq!(detached.edges(Direction::Outgoing, &["knows"]).count(), 0);
    assert_eq!(detached.edges(Direction::Incoming, &[]).count(), 1);
}

#[test]
fn test_edges_both_is_out_then_in() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();
    let detached = deflated::detach_vertex(&live, &Selection::all());

    let both: Vec<_> = detached.edges(Direction::Both, &["knows"]).map(|e| e.id().clone()).collect();
    let mut expected: Vec<_> = detached.edges(Direction::Outgoing, &["knows"]).map(|e| e.id().clone()).collect();
    expected.extend(detached.edges(Direction::Incoming, &["knows"]).map(|e| e.id().clone()));

    assert_eq!(both, expected);
    assert_eq!(both.len(), 3);
}

#[test]
fn test_vertices_follow_edges() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();
    let detached = deflated::detach_vertex(&live, &Selection::all());

    let out: Vec<String> = detached.vertices(Direction::Outgoing, &["knows"]).map(|v| v.to_string()).collect();
    let expected: Vec<String> = detached
        .edges(Direction::Outgoing, &["knows"])
        .map(|e| e.in_vertex().to_string())
        .collect();
    assert_eq!(out, expected);

    let inc: Vec<&str> = detached.vertices(Direction::Incoming, &[]).map(|v| v.label()).collect();
    assert_eq!(inc, vec!["person"]);
}

#[test]
fn test_vertices_both_is_in_then_out() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();
    let detached = deflated::detach_vertex(&live, &Selection::all());

    let both: Vec<_> = detached.vertices(Direction::Both, &[]).cloned().collect();
    let mut expected: Vec<_> = detached.vertices(Direction::Incoming, &[]).cloned().collect();
    expected.extend(detached.vertices(Direction::Outgoing, &[]).cloned());
    assert_eq!(both, expected);
    assert_eq!(both.len(), 4);
}

#[test]
fn test_captured_edges_carry_selected_properties() {
    let (graph, marko) = modern();
    let live = graph.vertex(&marko).unwrap();

    let with_props = deflated::detach_vertex(&live, &Selection::all());
    let edge = with_props.edges(Direction::Incoming, &[]).next().unwrap();
    assert_eq!(edge.value("weight"), Some(&Value::from(0.2)));

    let without = deflated::detach_vertex(&live, &Selection::none().with_in_edges(Vec::<String>::new()));
    let edge = without.edges(Direction::Incoming, &[]).next().unwrap();
    assert_eq!(edge.value("weight"), None);
}

// ============================================================================
// 4. Identity
// ============================================================================

#[test]
fn test_hash_and_equal_ignore_selection() {
    let graph = MemoryGraph::new();
    let id = graph.add_vertex("person", [("name", "blah")]);
    let live = graph.vertex(&id).unwrap();

    let mut set = HashSet::new();
    for _ in 0..100 {
        set.insert(deflated::detach_vertex(&live, &Selection::none()));
        set.insert(deflated::detach_vertex(&live, &Selection::none().with_properties(["name"])));
        set.insert(deflated::detach_vertex(&live, &Selection::all()));
    }
    assert_eq!(set.len(), 1);
}

#[test]
fn test_identity_collapses_live_and_detached() {
    let graph = MemoryGraph::new();
    let id = graph.add_vertex("person", [("name", "blah")]);
    let live = graph.vertex(&id).unwrap();

    let bare = deflated::detach_vertex(&live, &Selection::none());
    let named = deflated::detach_vertex(&live, &Selection::none().with_properties(["name"]));
    assert_eq!(bare, named);

    let identities: HashSet<ElementIdentity> = [
        ElementIdentity::of(&bare),
        ElementIdentity::of(&named),
        ElementIdentity::of(&live),
    ]
    .into_iter()
    .collect();
    assert_eq!(identities.len(), 1);
    assert!(graph_deflate::structure::same_element(&live, &named));
}

#[test]
fn test_display() {
    let graph = MemoryGraph::new();
    let id = daniel(&graph);
    let live = graph.vertex(&id).unwrap();
    let detached = deflated::detach_vertex(&live, &Selection::none());
    assert_eq!(detached.to_string(), format!("v[{id}]"));
}
