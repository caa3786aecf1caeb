//! # Element Capability Contract
//!
//! The read and write halves every graph object speaks. Live graph views
//! (`storage::memory`) and detached copies (`deflated`) both implement the
//! read half, so consumers can walk either without knowing which one they
//! hold. Detached copies implement the write half only to refuse it.
//!
//! Key arguments follow one convention throughout: an empty slice means
//! "all keys" (or "all labels"), a non-empty slice restricts to those names.
//!
//! | Trait | Live | Detached |
//! |-------|------|----------|
//! | `Element` | `MemoryVertex`, `MemoryEdge`, ... | `DeflatedVertex`, `DeflatedEdge`, ... |
//! | `Path` | `MutablePath` | `DeflatedPath` |
//! | `ElementWrite` / `VertexWrite` | applies the change | `Error::UnsupportedMutation` |

pub mod path;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::Result;

pub use path::{MutablePath, PathObject, Step};

/// Boxed iterator returned by every read method of the capability traits.
pub type Iter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

// ============================================================================
// Read half
// ============================================================================

/// A graph entity with an identifier and a label.
///
/// The `as_*` probes classify the element. An element that answers `None`
/// to all three is of a kind this crate does not know how to detach.
pub trait Element {
    fn id(&self) -> ElementId;

    fn label(&self) -> String;

    fn as_vertex(&self) -> Option<&dyn Vertex> { None }

    fn as_edge(&self) -> Option<&dyn Edge> { None }

    fn as_vertex_property(&self) -> Option<&dyn VertexProperty> { None }
}

/// A plain key/value property (edge properties, meta-properties).
pub trait Property {
    fn key(&self) -> String;

    fn value(&self) -> Value;
}

/// A property scoped to a vertex. It is an element in its own right and may
/// carry meta-properties.
pub trait VertexProperty: Element {
    /// The property key, which is the element label.
    fn key(&self) -> String {
        self.label()
    }

    fn value(&self) -> Value;

    /// The owning vertex.
    fn element<'a>(&'a self) -> Box<dyn Vertex + 'a>;

    /// Meta-properties with the given keys (all when `keys` is empty).
    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn Property + 'a>>;
}

pub trait Vertex: Element {
    /// Vertex-scoped properties with the given keys (all when `keys` is empty).
    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn VertexProperty + 'a>>;

    /// Incident edges in `direction`, restricted to `labels` when non-empty.
    fn edges<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Edge + 'a>>;

    /// Adjacent vertices reached over `edges(direction, labels)`.
    fn vertices<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Vertex + 'a>>;
}

pub trait Edge: Element {
    fn out_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a>;

    fn in_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a>;

    /// Endpoints for `direction`: OUT, IN, or OUT then IN.
    fn vertices<'a>(&'a self, direction: Direction) -> Iter<'a, Box<dyn Vertex + 'a>> {
        match direction {
            Direction::Outgoing => Box::new(std::iter::once(self.out_vertex())),
            Direction::Incoming => Box::new(std::iter::once(self.in_vertex())),
            Direction::Both => Box::new([self.out_vertex(), self.in_vertex()].into_iter()),
        }
    }

    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn Property + 'a>>;
}

/// An ordered sequence of objects, each annotated with a set of labels.
pub trait Path {
    fn steps(&self) -> Iter<'_, Step<'_>>;
}

// ============================================================================
// Write half
// ============================================================================

/// The mutation a write call attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutation {
    PropertyAddition,
    PropertyRemoval,
    EdgeAddition,
    VertexRemoval,
    EdgeRemoval,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mutation::PropertyAddition => "property addition is not supported",
            Mutation::PropertyRemoval => "property removal is not supported",
            Mutation::EdgeAddition => "edge additions are not supported",
            Mutation::VertexRemoval => "vertex removal is not supported",
            Mutation::EdgeRemoval => "edge removal is not supported",
        })
    }
}

pub trait ElementWrite {
    /// Set (or, on a vertex, replace) a property.
    fn set_property(&mut self, key: &str, value: Value) -> Result<()>;

    /// Remove the element from its graph.
    fn remove(&mut self) -> Result<()>;
}

pub trait VertexWrite: ElementWrite {
    /// Add an edge from this vertex to `in_vertex`, returning the new edge id.
    fn add_edge(&mut self, label: &str, in_vertex: &ElementId, properties: PropertyMap) -> Result<ElementId>;
}

pub trait PropertyWrite {
    fn remove(&mut self) -> Result<()>;
}

// ============================================================================
// Classification
// ============================================================================

/// Borrowed view of anything that can appear in a path or be handed to the
/// factory.
#[derive(Clone, Copy)]
pub enum GraphObject<'a> {
    Element(&'a dyn Element),
    Property(&'a dyn Property),
    Path(&'a dyn Path),
    Value(&'a Value),
}

impl fmt::Debug for GraphObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphObject::Element(e) => write!(f, "Element({}[{}])", e.label(), e.id()),
            GraphObject::Property(p) => write!(f, "Property({}->{})", p.key(), p.value()),
            GraphObject::Path(p) => write!(f, "Path({} steps)", p.steps().count()),
            GraphObject::Value(v) => write!(f, "Value({v:?})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Vertex,
    Edge,
    VertexProperty,
}

impl ElementKind {
    /// Classify an element by its capability probes.
    pub fn of(element: &dyn Element) -> Option<Self> {
        if element.as_vertex().is_some() {
            Some(ElementKind::Vertex)
        } else if element.as_edge().is_some() {
            Some(ElementKind::Edge)
        } else if element.as_vertex_property().is_some() {
            Some(ElementKind::VertexProperty)
        } else {
            None
        }
    }
}

/// Identity of an element: kind, id and label, nothing captured beyond.
///
/// Two views of the same element, live or detached and with any selection,
/// share one identity, so a `HashSet<ElementIdentity>` collapses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementIdentity {
    pub kind: Option<ElementKind>,
    pub id: ElementId,
    pub label: String,
}

impl ElementIdentity {
    pub fn of(element: &dyn Element) -> Self {
        Self {
            kind: ElementKind::of(element),
            id: element.id(),
            label: element.label(),
        }
    }
}

/// Whether two elements denote the same graph entity.
pub fn same_element(a: &dyn Element, b: &dyn Element) -> bool {
    ElementIdentity::of(a) == ElementIdentity::of(b)
}
