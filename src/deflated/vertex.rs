//! Detached vertex with optional properties and incident-edge maps.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Direction, ElementId, PropertyMap, Value};
use crate::selection::{admits, Component, Selection};
use crate::structure::{
    Edge, Element, ElementWrite, Iter, Mutation, Vertex, VertexProperty, VertexWrite,
};
use crate::{Error, Result};
use super::element::ElementBase;
use super::{DeflatedEdge, DeflatedVertexProperty, ReferenceVertex};

/// Captured edges of one direction, keyed by edge label in capture order.
type EdgeMap = IndexMap<String, Vec<DeflatedEdge>>;

/// A detached vertex.
///
/// Holds whichever of `properties`, `outE` and `inE` the selection named.
/// A component that was not selected reads as empty; it is never fetched
/// after the fact. Equality and hashing use `(id, label)` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflatedVertex {
    element: ElementBase<DeflatedVertexProperty>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    out_edges: EdgeMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    in_edges: EdgeMap,
}

impl DeflatedVertex {
    pub fn new(vertex: &dyn Vertex, selection: &Selection) -> Self {
        let element = ElementBase::capture(vertex, selection, |keys| {
            vertex
                .properties(keys)
                .map(|vp| DeflatedVertexProperty::new(vp.as_ref(), selection))
                .collect::<Vec<_>>()
        });
        let out_edges = capture_edges(vertex, Component::OutEdges, selection);
        let in_edges = capture_edges(vertex, Component::InEdges, selection);
        tracing::trace!(
            id = %element.id,
            label = %element.label,
            properties = element.property_count(),
            out_edges = out_edges.values().map(Vec::len).sum::<usize>(),
            in_edges = in_edges.values().map(Vec::len).sum::<usize>(),
            "detached vertex"
        );
        Self { element, out_edges, in_edges }
    }

    pub fn id(&self) -> &ElementId {
        &self.element.id
    }

    pub fn label(&self) -> &str {
        &self.element.label
    }

    /// Captured vertex properties restricted to `keys` (all when empty).
    pub fn properties<'a>(&'a self, keys: &'a [&str]) -> impl Iterator<Item = &'a DeflatedVertexProperty> + 'a {
        self.element.properties(keys)
    }

    /// The single captured property under `key`.
    ///
    /// `Ok(None)` when nothing was captured for `key`;
    /// `Error::AmbiguousLookup` when the key holds several values.
    pub fn property(&self, key: &str) -> Result<Option<&DeflatedVertexProperty>> {
        match self.element.properties.get(key) {
            None => Ok(None),
            Some(list) if list.len() > 1 => Err(Error::AmbiguousLookup { key: key.to_owned() }),
            Some(list) => Ok(list.first()),
        }
    }

    /// Shortcut for `property(key)` followed by its value.
    pub fn value(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.property(key)?.map(DeflatedVertexProperty::value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.element.keys()
    }

    /// Captured edges in `direction`, restricted to `labels` when non-empty.
    /// `Both` yields every outgoing edge before any incoming one.
    pub fn edges<'a>(&'a self, direction: Direction, labels: &'a [&str]) -> impl Iterator<Item = &'a DeflatedEdge> + 'a {
        let outgoing = direction.includes_outgoing().then_some(&self.out_edges);
        let incoming = direction.includes_incoming().then_some(&self.in_edges);
        outgoing
            .into_iter()
            .chain(incoming)
            .flat_map(move |map| labelled(map, labels))
    }

    /// Adjacent vertices derived from `edges`: an outgoing edge contributes
    /// its IN endpoint, an incoming edge its OUT endpoint.
    ///
    /// `Both` yields the incoming-derived vertices first, then the
    /// outgoing-derived ones, which is the reverse of `edges(Both)`.
    pub fn vertices<'a>(&'a self, direction: Direction, labels: &'a [&str]) -> impl Iterator<Item = &'a ReferenceVertex> + 'a {
        let from_incoming = direction
            .includes_incoming()
            .then(|| self.edges(Direction::Incoming, labels).map(DeflatedEdge::out_vertex));
        let from_outgoing = direction
            .includes_outgoing()
            .then(|| self.edges(Direction::Outgoing, labels).map(DeflatedEdge::in_vertex));
        from_incoming.into_iter().flatten().chain(from_outgoing.into_iter().flatten())
    }
}

/// Edges of one direction: `outE` captures outgoing edges, anything else
/// incoming ones. Edge properties follow the same selection; endpoints are
/// always reference-only.
fn capture_edges(vertex: &dyn Vertex, component: Component, selection: &Selection) -> EdgeMap {
    let direction = match component {
        Component::OutEdges => Direction::Outgoing,
        _ => Direction::Incoming,
    };
    let mut map = EdgeMap::new();
    let Some(labels) = selection.keys(component) else {
        return map;
    };
    for edge in vertex.edges(direction, &labels) {
        let label = edge.label();
        if admits(&labels, &label) {
            map.entry(label).or_default().push(DeflatedEdge::new(edge.as_ref(), selection));
        }
    }
    map
}

fn labelled<'a>(map: &'a EdgeMap, labels: &'a [&str]) -> impl Iterator<Item = &'a DeflatedEdge> + 'a {
    map.iter()
        .filter(move |(label, _)| admits(labels, label))
        .flat_map(|(_, edges)| edges.iter())
}

impl PartialEq for DeflatedVertex {
    fn eq(&self, other: &Self) -> bool {
        self.element.id == other.element.id && self.element.label == other.element.label
    }
}

impl Eq for DeflatedVertex {}

impl Hash for DeflatedVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.element.id.hash(state);
        self.element.label.hash(state);
    }
}

impl Element for DeflatedVertex {
    fn id(&self) -> ElementId {
        self.element.id.clone()
    }

    fn label(&self) -> String {
        self.element.label.clone()
    }

    fn as_vertex(&self) -> Option<&dyn Vertex> {
        Some(self)
    }
}

impl Vertex for DeflatedVertex {
    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn VertexProperty + 'a>> {
        let found: Vec<Box<dyn VertexProperty + 'a>> = self
            .element
            .properties(keys)
            .map(|vp| Box::new(vp.clone()) as Box<dyn VertexProperty + 'a>)
            .collect();
        Box::new(found.into_iter())
    }

    fn edges<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Edge + 'a>> {
        let found: Vec<Box<dyn Edge + 'a>> = DeflatedVertex::edges(self, direction, labels)
            .map(|e| Box::new(e.clone()) as Box<dyn Edge + 'a>)
            .collect();
        Box::new(found.into_iter())
    }

    fn vertices<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Vertex + 'a>> {
        let found: Vec<Box<dyn Vertex + 'a>> = DeflatedVertex::vertices(self, direction, labels)
            .map(|v| Box::new(v.clone()) as Box<dyn Vertex + 'a>)
            .collect();
        Box::new(found.into_iter())
    }
}

impl ElementWrite for DeflatedVertex {
    fn set_property(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::PropertyAddition))
    }

    fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::VertexRemoval))
    }
}

impl VertexWrite for DeflatedVertex {
    fn add_edge(&mut self, _label: &str, _in_vertex: &ElementId, _properties: PropertyMap) -> Result<ElementId> {
        Err(Error::UnsupportedMutation(Mutation::EdgeAddition))
    }
}

impl fmt::Display for DeflatedVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v[{}]", self.element.id)
    }
}
