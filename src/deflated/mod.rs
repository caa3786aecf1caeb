//! # Detached (Deflated) Graph Objects
//!
//! Immutable copies of live elements and paths that keep only what a
//! `Selection` names and hold no connection to the source graph.
//!
//! | Live object | Detached type | Captures |
//! |-------------|---------------|----------|
//! | Vertex | `DeflatedVertex` | properties, outE, inE |
//! | Edge | `DeflatedEdge` | properties; endpoints as `ReferenceVertex` |
//! | Vertex property | `DeflatedVertexProperty` | value, meta-properties, owner as `ReferenceVertex` |
//! | Property | `DeflatedProperty` | key and value |
//! | Path | `DeflatedPath` | every step, detached recursively |
//!
//! Nesting is bounded: a vertex captures its edges, an edge captures only
//! the identities of its endpoints.

mod element;
mod edge;
mod factory;
mod path;
mod property;
mod reference;
mod vertex;
mod vertex_property;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::structure::{GraphObject, PathObject};

pub use edge::DeflatedEdge;
pub use factory::{
    detach, detach_edge, detach_element, detach_path, detach_property, detach_vertex,
    detach_vertex_property,
};
pub use path::DeflatedPath;
pub use property::DeflatedProperty;
pub use reference::ReferenceVertex;
pub use vertex::DeflatedVertex;
pub use vertex_property::DeflatedVertexProperty;

/// Any detached object, as returned by `detach`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Deflated {
    Vertex(DeflatedVertex),
    Edge(DeflatedEdge),
    VertexProperty(DeflatedVertexProperty),
    Property(DeflatedProperty),
    Path(DeflatedPath),
    Value(Value),
}

impl Deflated {
    pub fn kind(&self) -> &'static str {
        match self {
            Deflated::Vertex(_) => "vertex",
            Deflated::Edge(_) => "edge",
            Deflated::VertexProperty(_) => "vertex_property",
            Deflated::Property(_) => "property",
            Deflated::Path(_) => "path",
            Deflated::Value(_) => "value",
        }
    }

    pub fn as_vertex(&self) -> Option<&DeflatedVertex> {
        match self {
            Deflated::Vertex(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&DeflatedEdge> {
        match self {
            Deflated::Edge(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_vertex_property(&self) -> Option<&DeflatedVertexProperty> {
        match self {
            Deflated::VertexProperty(vp) => Some(vp),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&DeflatedProperty> {
        match self {
            Deflated::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&DeflatedPath> {
        match self {
            Deflated::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Deflated::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow through the shared read capability, e.g. to detach again with
    /// a narrower selection.
    pub fn as_graph_object(&self) -> GraphObject<'_> {
        match self {
            Deflated::Vertex(v) => GraphObject::Element(v),
            Deflated::Edge(e) => GraphObject::Element(e),
            Deflated::VertexProperty(vp) => GraphObject::Element(vp),
            Deflated::Property(p) => GraphObject::Property(p),
            Deflated::Path(p) => GraphObject::Path(p),
            Deflated::Value(v) => GraphObject::Value(v),
        }
    }

    /// Attach to itself: the detached object stands in for the live one.
    pub fn into_path_object(self) -> PathObject<'static> {
        match self {
            Deflated::Vertex(v) => PathObject::Element(Box::new(v)),
            Deflated::Edge(e) => PathObject::Element(Box::new(e)),
            Deflated::VertexProperty(vp) => PathObject::Element(Box::new(vp)),
            Deflated::Property(p) => PathObject::Property(Box::new(p)),
            Deflated::Path(p) => PathObject::Path(Box::new(p)),
            Deflated::Value(v) => PathObject::Value(v),
        }
    }
}

impl fmt::Display for Deflated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deflated::Vertex(v) => fmt::Display::fmt(v, f),
            Deflated::Edge(e) => fmt::Display::fmt(e, f),
            Deflated::VertexProperty(vp) => fmt::Display::fmt(vp, f),
            Deflated::Property(p) => fmt::Display::fmt(p, f),
            Deflated::Path(p) => fmt::Display::fmt(p, f),
            Deflated::Value(v) => fmt::Display::fmt(v, f),
        }
    }
}
