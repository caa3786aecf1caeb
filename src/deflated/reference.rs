//! Identity-only vertex: edge endpoints and vertex-property owners.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::model::{Direction, ElementId};
use crate::structure::{Edge, Element, Iter, Vertex, VertexProperty};

/// A vertex reduced to `(id, label)`. It never carries properties or
/// adjacency, which is what keeps detachment two levels deep at most.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceVertex {
    id: ElementId,
    label: String,
}

impl ReferenceVertex {
    pub fn new(vertex: &dyn Vertex) -> Self {
        Self { id: vertex.id(), label: vertex.label() }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for ReferenceVertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.label == other.label
    }
}

impl Eq for ReferenceVertex {}

impl Hash for ReferenceVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.label.hash(state);
    }
}

impl Element for ReferenceVertex {
    fn id(&self) -> ElementId {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn as_vertex(&self) -> Option<&dyn Vertex> {
        Some(self)
    }
}

impl Vertex for ReferenceVertex {
    fn properties<'a>(&'a self, _keys: &[&str]) -> Iter<'a, Box<dyn VertexProperty + 'a>> {
        Box::new(std::iter::empty())
    }

    fn edges<'a>(&'a self, _direction: Direction, _labels: &[&str]) -> Iter<'a, Box<dyn Edge + 'a>> {
        Box::new(std::iter::empty())
    }

    fn vertices<'a>(&'a self, _direction: Direction, _labels: &[&str]) -> Iter<'a, Box<dyn Vertex + 'a>> {
        Box::new(std::iter::empty())
    }
}

impl fmt::Display for ReferenceVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v[{}]", self.id)
    }
}
