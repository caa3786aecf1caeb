//! Detachment entry points.
//!
//! `detach` classifies any graph object by capability and routes it to the
//! matching detached type:
//!
//! ```text
//! Element ── as_vertex ──────────▶ DeflatedVertex
//!         ── as_edge ────────────▶ DeflatedEdge
//!         ── as_vertex_property ─▶ DeflatedVertexProperty
//!         ── (none) ─────────────▶ Error::UnrecognizedKind
//! Property ──────────────────────▶ DeflatedProperty
//! Path ──────────────────────────▶ DeflatedPath (steps detached recursively)
//! Value ─────────────────────────▶ unchanged
//! ```

use crate::selection::Selection;
use crate::structure::{Edge, Element, GraphObject, Path, Property, Vertex, VertexProperty};
use crate::{Error, Result};
use super::{
    Deflated, DeflatedEdge, DeflatedPath, DeflatedProperty, DeflatedVertex,
    DeflatedVertexProperty,
};

/// Detach any graph object with `selection`.
pub fn detach(object: GraphObject<'_>, selection: &Selection) -> Result<Deflated> {
    match object {
        GraphObject::Element(element) => detach_element(element, selection),
        GraphObject::Property(property) => Ok(Deflated::Property(detach_property(property))),
        GraphObject::Path(path) => Ok(Deflated::Path(detach_path(path, selection)?)),
        GraphObject::Value(value) => Ok(Deflated::Value(value.clone())),
    }
}

/// Detach an element of any known kind.
pub fn detach_element(element: &dyn Element, selection: &Selection) -> Result<Deflated> {
    if let Some(vertex) = element.as_vertex() {
        Ok(Deflated::Vertex(detach_vertex(vertex, selection)))
    } else if let Some(edge) = element.as_edge() {
        Ok(Deflated::Edge(detach_edge(edge, selection)))
    } else if let Some(vertex_property) = element.as_vertex_property() {
        Ok(Deflated::VertexProperty(detach_vertex_property(vertex_property, selection)))
    } else {
        let (id, label) = (element.id(), element.label());
        tracing::warn!(%id, %label, "cannot detach element of unknown kind");
        Err(Error::UnrecognizedKind { id, label })
    }
}

pub fn detach_vertex(vertex: &dyn Vertex, selection: &Selection) -> DeflatedVertex {
    DeflatedVertex::new(vertex, selection)
}

pub fn detach_edge(edge: &dyn Edge, selection: &Selection) -> DeflatedEdge {
    DeflatedEdge::new(edge, selection)
}

pub fn detach_vertex_property(vertex_property: &dyn VertexProperty, selection: &Selection) -> DeflatedVertexProperty {
    DeflatedVertexProperty::new(vertex_property, selection)
}

/// Scalar properties carry no nested data, so no selection applies.
pub fn detach_property(property: &dyn Property) -> DeflatedProperty {
    DeflatedProperty::new(property)
}

pub fn detach_path(path: &dyn Path, selection: &Selection) -> Result<DeflatedPath> {
    DeflatedPath::new(path, selection)
}
