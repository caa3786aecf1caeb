//! Detached vertex-scoped property.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::{ElementId, Value};
use crate::selection::Selection;
use crate::structure::{
    Element, ElementWrite, Iter, Mutation, Property, Vertex, VertexProperty,
};
use crate::{Error, Result};
use super::element::{ElementBase, Keyed};
use super::{DeflatedProperty, ReferenceVertex};

/// A vertex-scoped property: an element (id + label) holding a value, a
/// reference-only owner and, when selected, meta-properties.
///
/// The owner is kept as `(id, label)`; the full owning vertex is never
/// retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflatedVertexProperty {
    element: ElementBase<DeflatedProperty>,
    value: Value,
    vertex: ReferenceVertex,
}

impl DeflatedVertexProperty {
    /// Detach `vertex_property`. Meta-properties follow the `properties`
    /// component of `selection`, with the same key filter.
    pub fn new(vertex_property: &dyn VertexProperty, selection: &Selection) -> Self {
        let element = ElementBase::capture(vertex_property, selection, |keys| {
            vertex_property
                .properties(keys)
                .map(|p| DeflatedProperty::new(p.as_ref()))
                .collect::<Vec<_>>()
        });
        let owner = vertex_property.element();
        Self {
            element,
            value: vertex_property.value(),
            vertex: ReferenceVertex::new(owner.as_ref()),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.element.id
    }

    /// The property key, which is the element label.
    pub fn key(&self) -> &str {
        &self.element.label
    }

    pub fn label(&self) -> &str {
        &self.element.label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// A detached vertex property always exists; absence is expressed by the
    /// lookup returning `None`.
    pub fn is_present(&self) -> bool {
        true
    }

    /// The owning vertex, identity only.
    pub fn element(&self) -> &ReferenceVertex {
        &self.vertex
    }

    /// Captured meta-properties restricted to `keys` (all when empty).
    pub fn properties<'a>(&'a self, keys: &'a [&str]) -> impl Iterator<Item = &'a DeflatedProperty> + 'a {
        self.element.properties(keys)
    }

    /// A single captured meta-property.
    pub fn property(&self, key: &str) -> Option<&DeflatedProperty> {
        self.element.properties.get(key).and_then(|list| list.first())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.element.keys()
    }
}

impl Keyed for DeflatedVertexProperty {
    fn key(&self) -> &str {
        &self.element.label
    }
}

/// Equal when owner id, key and value agree; the property's own id and its
/// meta-properties do not take part.
impl PartialEq for DeflatedVertexProperty {
    fn eq(&self, other: &Self) -> bool {
        self.vertex.id() == other.vertex.id()
            && self.element.label == other.element.label
            && self.value == other.value
    }
}

impl Hash for DeflatedVertexProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertex.id().hash(state);
        self.element.label.hash(state);
    }
}

impl Element for DeflatedVertexProperty {
    fn id(&self) -> ElementId {
        self.element.id.clone()
    }

    fn label(&self) -> String {
        self.element.label.clone()
    }

    fn as_vertex_property(&self) -> Option<&dyn VertexProperty> {
        Some(self)
    }
}

impl VertexProperty for DeflatedVertexProperty {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn element<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        Box::new(self.vertex.clone())
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

impl ElementWrite for DeflatedVertexProperty {
    fn set_property(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::PropertyAddition))
    }

    fn remove(&mut self) -> Result<()> {
        Err(Error::UnsupportedMutation(Mutation::PropertyRemoval))
    }
}

impl fmt::Display for DeflatedVertexProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vp[{}->{}]", self.element.label, self.value)
    }
}
