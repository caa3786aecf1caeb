//! Detached edge with reference-only endpoints.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::{Direction, ElementId, Value};
use crate::selection::Selection;
use crate::structure::{Edge, Element, ElementWrite, Iter, Mutation, Property, Vertex};
use crate::{Error, Result};
use super::element::ElementBase;
use super::{DeflatedProperty, ReferenceVertex};

/// A detached edge.
///
/// Both endpoints are captured eagerly as `ReferenceVertex`, whatever the
/// selection asks for, so detaching an edge never walks further into the
/// graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflatedEdge {
    element: ElementBase<DeflatedProperty>,
    out_vertex: ReferenceVertex,
    in_vertex: ReferenceVertex,
}

impl DeflatedEdge {
    pub fn new(edge: &dyn Edge, selection: &Selection) -> Self {
        let element = ElementBase::capture(edge, selection, |keys| {
            edge.properties(keys)
                .map(|p| DeflatedProperty::new(p.as_ref()))
                .collect::<Vec<_>>()
        });
        let out_vertex = ReferenceVertex::new(edge.out_vertex().as_ref());
        let in_vertex = ReferenceVertex::new(edge.in_vertex().as_ref());
        tracing::trace!(
            id = %element.id,
            label = %element.label,
            properties = element.property_count(),
            "detached edge"
        );
        Self { element, out_vertex, in_vertex }
    }

    pub fn id(&self) -> &ElementId {
        &self.element.id
    }

    pub fn label(&self) -> &str {
        &self.element.label
    }

    pub fn out_vertex(&self) -> &ReferenceVertex {
        &self.out_vertex
    }

    pub fn in_vertex(&self) -> &ReferenceVertex {
        &self.in_vertex
    }

    /// OUT endpoint, IN endpoint, or both in that order.
    pub fn vertices(&self, direction: Direction) -> impl Iterator<Item = &ReferenceVertex> {
        let (first, second) = match direction {
            Direction::Outgoing => (&self.out_vertex, None),
            Direction::Incoming => (&self.in_vertex, None),
            Direction::Both => (&self.out_vertex, Some(&self.in_vertex)),
        };
        std::iter::once(first).chain(second)
    }

    /// Captured properties restricted to `keys` (all when empty).
    pub fn properties<'a>(&'a self, keys: &'a [&str]) -> impl Iterator<Item = &'a DeflatedProperty> + 'a {
        self.element.properties(keys)
    }

    /// Edge properties are single-valued; `None` when not captured.
    pub fn property(&self, key: &str) -> Option<&DeflatedProperty> {
        self.element.properties.get(key).and_then(|list| list.first())
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.property(key).map(DeflatedProperty::value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.element.keys()
    }
}

impl PartialEq for DeflatedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.element.id == other.element.id && self.element.label == other.element.label
    }
}

impl Eq for DeflatedEdge {}

impl Hash for DeflatedEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.element.id.hash(state);
        self.element.label.hash(state);
    }
}

impl Element for DeflatedEdge {
    fn id(&self) -> ElementId {
        self.element.id.clone()
    }

    fn label(&self) -> String {
        self.element.label.clone()
    }

    fn as_edge(&self) -> Option<&dyn Edge> {
        Some(self)
    }
}

impl Edge for DeflatedEdge {
    fn out_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        Box::new(self.out_vertex.clone())
    }

    fn in_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        Box::new(self.in_vertex.clone())
    }

    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn Property + 'a>> {
        let found: Vec<Box<dyn Property + 'a>> = self
            .element
            .properties(keys)
            .map(|p| Box::new(p.clone()) as Box<dyn Property + 'a>)
            .collect();
        Box::new(found.into_iter())
    }
}

impl ElementWrite for DeflatedEdge {
    fn set_property(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::PropertyAddition))
    }

    fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::EdgeRemoval))
    }
}

impl fmt::Display for DeflatedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "e[{}][{}-{}->{}]",
            self.element.id, self.out_vertex.id(), self.element.label, self.in_vertex.id()
        )
    }
}
