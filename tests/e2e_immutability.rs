//! End-to-end tests for the read-only contract of detached objects.
//!
//! Every write on a detached object fails with `UnsupportedMutation` naming
//! the attempted change and leaves the object as it was. Changes made to the
//! live graph after detachment are not visible through the copy.

use graph_deflate::{
    deflated, property_map, Direction, ElementId, ElementWrite, Error, MemoryGraph, Mutation,
    PropertyMap, PropertyWrite, Selection, Value, Vertex, VertexWrite,
};
use pretty_assertions::assert_eq;

/// alice -knows{since: 2010}-> bob, alice.location carries a meta-property.
/// Returns (graph, alice, bob, knows, location).
fn setup() -> (MemoryGraph, ElementId, ElementId, ElementId, ElementId) {
    let graph = MemoryGraph::new();
    let alice = graph.add_vertex("person", [("name", "alice")]);
    let bob = graph.add_vertex("person", [("name", "bob")]);
    let knows = graph.add_edge(&alice, &bob, "knows", [("since", 2010)]).unwrap();
    let location = graph
        .add_vertex_property(&alice, "location", "paris", [("startTime", 2015)])
        .unwrap();
    (graph, alice, bob, knows, location)
}

fn unsupported<T: std::fmt::Debug>(result: graph_deflate::Result<T>) -> Mutation {
    match result {
        Err(Error::UnsupportedMutation(mutation)) => mutation,
        other => panic!("expected UnsupportedMutation, got {other:?}"),
    }
}

// ============================================================================
// 1. Writes are refused
// ============================================================================

#[test]
fn test_vertex_refuses_writes() {
    let (graph, alice, bob, _, _) = setup();
    let mut detached = deflated::detach_vertex(&graph.vertex(&alice).unwrap(), &Selection::all());
    let before = format!("{detached:?}");

    assert_eq!(unsupported(detached.set_property("name", Value::from("eve"))), Mutation::PropertyAddition);
    assert_eq!(unsupported(detached.remove()), Mutation::VertexRemoval);
    assert_eq!(
        unsupported(detached.add_edge("knows", &bob, PropertyMap::new())),
        Mutation::EdgeAddition
    );

    assert_eq!(format!("{detached:?}"), before);
    assert_eq!(detached.value("name").unwrap(), Some(&Value::from("alice")));
}

#[test]
fn test_edge_refuses_writes() {
    let (graph, _, _, knows, _) = setup();
    let mut detached = deflated::detach_edge(&graph.edge(&knows).unwrap(), &Selection::all());

    assert_eq!(unsupported(detached.set_property("since", Value::from(1999))), Mutation::PropertyAddition);
    assert_eq!(unsupported(detached.remove()), Mutation::EdgeRemoval);
    assert_eq!(detached.value("since"), Some(&Value::from(2010)));
}

#[test]
fn test_vertex_property_refuses_writes() {
    let (graph, _, _, _, location) = setup();
    let mut detached = deflated::detach_vertex_property(&graph.vertex_property(&location).unwrap(), &Selection::all());

    assert_eq!(unsupported(detached.set_property("endTime", Value::from(2020))), Mutation::PropertyAddition);
    assert_eq!(unsupported(ElementWrite::remove(&mut detached)), Mutation::PropertyRemoval);
    assert_eq!(detached.keys().collect::<Vec<_>>(), vec!["startTime"]);
}

#[test]
fn test_property_refuses_removal() {
    let (graph, _, _, knows, _) = setup();
    let edge = deflated::detach_edge(&graph.edge(&knows).unwrap(), &Selection::all());
    let mut property = edge.property("since").unwrap().clone();

    assert_eq!(unsupported(PropertyWrite::remove(&mut property)), Mutation::PropertyRemoval);
    assert_eq!(property.value(), &Value::from(2010));
}

#[test]
fn test_error_message_names_the_mutation() {
    let (graph, alice, _, _, _) = setup();
    let mut detached = deflated::detach_vertex(&graph.vertex(&alice).unwrap(), &Selection::none());
    let err = detached.remove().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported mutation: vertex removal is not supported");
}

// ============================================================================
// 2. No residual connection to the live graph
// ============================================================================

#[test]
fn test_live_changes_are_not_visible() {
    let (graph, alice, bob, knows, _) = setup();
    let detached = deflated::detach_vertex(&graph.vertex(&alice).unwrap(), &Selection::all());
    let edge = deflated::detach_edge(&graph.edge(&knows).unwrap(), &Selection::all());

    graph.set_vertex_property(&alice, "name", "alicia").unwrap();
    graph.set_edge_property(&knows, "since", 2011).unwrap();
    graph.add_edge(&bob, &alice, "knows", Vec::<(String, Value)>::new()).unwrap();

    assert_eq!(detached.value("name").unwrap(), Some(&Value::from("alice")));
    assert_eq!(detached.edges(Direction::Incoming, &[]).count(), 0);
    assert_eq!(edge.value("since"), Some(&Value::from(2010)));

    // the live view does see them
    let live = graph.vertex(&alice).unwrap();
    assert_eq!(live.edges(Direction::Incoming, &[]).count(), 1);
}

#[test]
fn test_detached_copy_outlives_source_element() {
    let (graph, alice, _, knows, _) = setup();
    let detached = deflated::detach_vertex(&graph.vertex(&alice).unwrap(), &Selection::all());

    graph.remove_vertex(&alice).unwrap();
    assert!(graph.vertex(&alice).is_none());
    assert!(graph.edge(&knows).is_none());

    assert_eq!(detached.id(), &alice);
    assert_eq!(detached.edges(Direction::Outgoing, &["knows"]).count(), 1);
}

// ============================================================================
// 3. Live views do mutate
// ============================================================================

#[test]
fn test_live_views_apply_writes() {
    let (graph, alice, bob, knows, location) = setup();

    let mut vertex = graph.vertex(&alice).unwrap();
    vertex.set_property("age", Value::from(30)).unwrap();
    let created = vertex
        .add_edge("likes", &bob, property_map([("weight", 0.9)]))
        .unwrap();
    assert_eq!(vertex.properties(&["age"]).count(), 1);
    let likes = deflated::detach_edge(&graph.edge(&created).unwrap(), &Selection::all());
    assert_eq!(likes.value("weight"), Some(&Value::from(0.9)));

    let mut meta = graph.vertex_property(&location).unwrap();
    meta.set_property("endTime", Value::from(2020)).unwrap();
    assert_eq!(graph_deflate::VertexProperty::properties(&meta, &[]).count(), 2);

    let mut edge = graph.edge(&knows).unwrap();
    edge.remove().unwrap();
    assert!(graph.edge(&knows).is_none());
}
