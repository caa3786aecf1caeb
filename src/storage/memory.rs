//! In-memory live graph.
//!
//! This is the reference implementation of the `structure` capability
//! traits. It keeps vertices and edges in HashMaps protected by RwLock and
//! hands out lightweight views (`MemoryVertex`, `MemoryEdge`, ...) that read
//! through to the graph on every call.
//!
//! ## Limitations
//!
//! - **No transactions**: writes are applied immediately.
//! - **Per-collection locks**: multi-step mutations are NOT atomic. Safe for
//!   single-writer or read-heavy use only.
//! - **No indexes**: vertex-property lookups by id do a full scan.
//!
//! Use this graph for:
//! - Testing detachment against a real, mutable source
//! - Embedding small graphs that need `Element` / `Vertex` / `Edge` views
//! - Re-attaching detached paths (`MemoryGraph::resolve`)

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;

use crate::deflated::Deflated;
use crate::model::*;
use crate::selection::admits;
use crate::structure::{
    Edge, Element, ElementWrite, Iter, PathObject, Property, Vertex, VertexProperty, VertexWrite,
};
use crate::{Error, Result};

// ============================================================================
// MemoryGraph
// ============================================================================

/// In-memory property graph.
///
/// Cloning is cheap and yields a handle to the same graph.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    vertices: RwLock<HashMap<ElementId, VertexRecord>>,
    edges: RwLock<HashMap<ElementId, EdgeRecord>>,
    /// Shared by vertices, edges and vertex properties. Starts at 1.
    next_id: AtomicU64,
}

struct VertexRecord {
    label: String,
    /// Vertex properties in insertion order; a key may repeat.
    properties: Vec<VertexPropertyRecord>,
    out_edges: Vec<ElementId>,
    in_edges: Vec<ElementId>,
}

struct VertexPropertyRecord {
    id: ElementId,
    key: String,
    value: Value,
    meta: Vec<(String, Value)>,
}

struct EdgeRecord {
    label: String,
    out_vertex: (ElementId, String),
    in_vertex: (ElementId, String),
    properties: Vec<(String, Value)>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> ElementId {
        ElementId::Int(self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a vertex. Every pair becomes one vertex property, so a key
    /// given twice yields a multi-valued property.
    pub fn add_vertex<K, V>(&self, label: &str, properties: impl IntoIterator<Item = (K, V)>) -> ElementId
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let id = self.next_id();
        let properties = properties
            .into_iter()
            .map(|(key, value)| VertexPropertyRecord {
                id: self.next_id(),
                key: key.into(),
                value: value.into(),
                meta: Vec::new(),
            })
            .collect();
        let record = VertexRecord {
            label: label.to_owned(),
            properties,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        };
        self.inner.vertices.write().insert(id.clone(), record);
        id
    }

    /// Append a vertex property (list cardinality) with meta-properties.
    pub fn add_vertex_property<K, V>(
        &self,
        vertex: &ElementId,
        key: &str,
        value: impl Into<Value>,
        meta: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ElementId>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let id = self.next_id();
        let mut vertices = self.inner.vertices.write();
        let record = vertices.get_mut(vertex).ok_or_else(|| Error::NotFound(format!("Vertex {vertex}")))?;
        record.properties.push(VertexPropertyRecord {
            id: id.clone(),
            key: key.to_owned(),
            value: value.into(),
            meta: meta.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        });
        Ok(id)
    }

    /// Set a vertex property with single cardinality: every existing value
    /// under `key` is replaced.
    pub fn set_vertex_property(&self, vertex: &ElementId, key: &str, value: impl Into<Value>) -> Result<ElementId> {
        {
            let mut vertices = self.inner.vertices.write();
            let record = vertices.get_mut(vertex).ok_or_else(|| Error::NotFound(format!("Vertex {vertex}")))?;
            record.properties.retain(|p| p.key != key);
        }
        self.add_vertex_property(vertex, key, value, Vec::<(String, Value)>::new())
    }

    /// Set a meta-property on a vertex property (upsert).
    pub fn set_meta_property(&self, vertex_property: &ElementId, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut vertices = self.inner.vertices.write();
        let record = vertices
            .values_mut()
            .flat_map(|v| v.properties.iter_mut())
            .find(|p| &p.id == vertex_property)
            .ok_or_else(|| Error::NotFound(format!("Vertex property {vertex_property}")))?;
        let value = value.into();
        match record.meta.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => record.meta.push((key.to_owned(), value)),
        }
        Ok(())
    }

    pub fn remove_vertex_property(&self, vertex_property: &ElementId) -> Result<()> {
        let mut vertices = self.inner.vertices.write();
        for record in vertices.values_mut() {
            if let Some(pos) = record.properties.iter().position(|p| &p.id == vertex_property) {
                record.properties.remove(pos);
                return Ok(());
            }
        }
        Err(Error::NotFound(format!("Vertex property {vertex_property}")))
    }

    /// Create a directed edge `out -[label]-> in`.
    pub fn add_edge<K, V>(
        &self,
        out_vertex: &ElementId,
        in_vertex: &ElementId,
        label: &str,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Result<ElementId>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let id = self.next_id();
        let mut vertices = self.inner.vertices.write();
        let out_label = vertices
            .get(out_vertex)
            .map(|v| v.label.clone())
            .ok_or_else(|| Error::NotFound(format!("Vertex {out_vertex}")))?;
        let in_label = vertices
            .get(in_vertex)
            .map(|v| v.label.clone())
            .ok_or_else(|| Error::NotFound(format!("Vertex {in_vertex}")))?;

        let mut props: Vec<(String, Value)> = Vec::new();
        for (key, value) in properties {
            let (key, value) = (key.into(), value.into());
            match props.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => *existing = value,
                None => props.push((key, value)),
            }
        }

        if let Some(v) = vertices.get_mut(out_vertex) {
            v.out_edges.push(id.clone());
        }
        if let Some(v) = vertices.get_mut(in_vertex) {
            v.in_edges.push(id.clone());
        }
        self.inner.edges.write().insert(id.clone(), EdgeRecord {
            label: label.to_owned(),
            out_vertex: (out_vertex.clone(), out_label),
            in_vertex: (in_vertex.clone(), in_label),
            properties: props,
        });
        Ok(id)
    }

    /// Set an edge property (upsert).
    pub fn set_edge_property(&self, edge: &ElementId, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut edges = self.inner.edges.write();
        let record = edges.get_mut(edge).ok_or_else(|| Error::NotFound(format!("Edge {edge}")))?;
        let value = value.into();
        match record.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => record.properties.push((key.to_owned(), value)),
        }
        Ok(())
    }

    /// Remove a vertex together with its incident edges.
    pub fn remove_vertex(&self, id: &ElementId) -> Result<()> {
        let mut vertices = self.inner.vertices.write();
        let removed = vertices.remove(id).ok_or_else(|| Error::NotFound(format!("Vertex {id}")))?;
        let mut edges = self.inner.edges.write();
        for edge_id in removed.out_edges.iter().chain(&removed.in_edges) {
            if let Some(edge) = edges.remove(edge_id) {
                for (endpoint, _) in [&edge.out_vertex, &edge.in_vertex] {
                    if let Some(v) = vertices.get_mut(endpoint) {
                        v.out_edges.retain(|e| e != edge_id);
                        v.in_edges.retain(|e| e != edge_id);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn remove_edge(&self, id: &ElementId) -> Result<()> {
        let mut vertices = self.inner.vertices.write();
        let edge = self.inner.edges.write().remove(id).ok_or_else(|| Error::NotFound(format!("Edge {id}")))?;
        if let Some(v) = vertices.get_mut(&edge.out_vertex.0) {
            v.out_edges.retain(|e| e != id);
        }
        if let Some(v) = vertices.get_mut(&edge.in_vertex.0) {
            v.in_edges.retain(|e| e != id);
        }
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn vertex(&self, id: &ElementId) -> Option<MemoryVertex<'_>> {
        let vertices = self.inner.vertices.read();
        vertices.get(id).map(|v| MemoryVertex {
            graph: self,
            id: id.clone(),
            label: v.label.clone(),
        })
    }

    pub fn edge(&self, id: &ElementId) -> Option<MemoryEdge<'_>> {
        self.inner.edges.read().get(id).map(|e| self.edge_view(id, e))
    }

    pub fn vertex_property(&self, id: &ElementId) -> Option<MemoryVertexProperty<'_>> {
        let vertices = self.inner.vertices.read();
        vertices.iter().find_map(|(owner, v)| {
            v.properties
                .iter()
                .find(|p| &p.id == id)
                .map(|p| self.vertex_property_view(owner, &v.label, p))
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.vertices.read().len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edges.read().len()
    }

    /// Map a detached object back to its live counterpart in this graph.
    ///
    /// Vertices, edges and vertex properties are looked up by id and fail
    /// with `Error::NotFound` when gone. Detached scalar properties and values
    /// are self-contained and carried through; nested paths are re-attached
    /// step by step.
    pub fn resolve(&self, deflated: &Deflated) -> Result<PathObject<'_>> {
        match deflated {
            Deflated::Vertex(v) => self
                .vertex(v.id())
                .map(|live| PathObject::Element(Box::new(live)))
                .ok_or_else(|| Error::NotFound(format!("Vertex {}", v.id()))),
            Deflated::Edge(e) => self
                .edge(e.id())
                .map(|live| PathObject::Element(Box::new(live)))
                .ok_or_else(|| Error::NotFound(format!("Edge {}", e.id()))),
            Deflated::VertexProperty(vp) => self
                .vertex_property(vp.id())
                .map(|live| PathObject::Element(Box::new(live)))
                .ok_or_else(|| Error::NotFound(format!("Vertex property {}", vp.id()))),
            Deflated::Property(p) => Ok(PathObject::Property(Box::new(p.clone()))),
            Deflated::Path(p) => Ok(PathObject::Path(Box::new(p.attach(|step| self.resolve(step))?))),
            Deflated::Value(v) => Ok(PathObject::Value(v.clone())),
        }
    }

    fn edge_view(&self, id: &ElementId, record: &EdgeRecord) -> MemoryEdge<'_> {
        MemoryEdge {
            graph: self,
            id: id.clone(),
            label: record.label.clone(),
            out_vertex: record.out_vertex.clone(),
            in_vertex: record.in_vertex.clone(),
        }
    }

    fn vertex_property_view(&self, owner: &ElementId, owner_label: &str, record: &VertexPropertyRecord) -> MemoryVertexProperty<'_> {
        MemoryVertexProperty {
            graph: self,
            owner: (owner.clone(), owner_label.to_owned()),
            id: record.id.clone(),
            key: record.key.clone(),
            value: record.value.clone(),
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// Live vertex view.
#[derive(Clone)]
pub struct MemoryVertex<'g> {
    graph: &'g MemoryGraph,
    id: ElementId,
    label: String,
}

/// Live edge view. Endpoint labels are fixed at creation.
#[derive(Clone)]
pub struct MemoryEdge<'g> {
    graph: &'g MemoryGraph,
    id: ElementId,
    label: String,
    out_vertex: (ElementId, String),
    in_vertex: (ElementId, String),
}

/// Live vertex-property view. Key and value are read at view creation;
/// meta-properties are read through.
#[derive(Clone)]
pub struct MemoryVertexProperty<'g> {
    graph: &'g MemoryGraph,
    owner: (ElementId, String),
    id: ElementId,
    key: String,
    value: Value,
}

/// Edge property or meta-property, read at view creation.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryProperty {
    key: String,
    value: Value,
}

impl<'g> MemoryVertex<'g> {
    fn endpoint(&self, (id, label): &(ElementId, String)) -> MemoryVertex<'g> {
        MemoryVertex { graph: self.graph, id: id.clone(), label: label.clone() }
    }

    fn edge_views(&self, direction: Direction, labels: &[&str]) -> Vec<MemoryEdge<'g>> {
        let ids: Vec<ElementId> = {
            let vertices = self.graph.inner.vertices.read();
            let Some(record) = vertices.get(&self.id) else {
                return Vec::new();
            };
            let outgoing = direction.includes_outgoing().then_some(&record.out_edges);
            let incoming = direction.includes_incoming().then_some(&record.in_edges);
            outgoing.into_iter().chain(incoming).flatten().cloned().collect()
        };
        let edges = self.graph.inner.edges.read();
        ids.iter()
            .filter_map(|id| edges.get(id).map(|e| (id, e)))
            .filter(|(_, e)| admits(labels, &e.label))
            .map(|(id, e)| self.graph.edge_view(id, e))
            .collect()
    }
}

impl Element for MemoryVertex<'_> {
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

impl Vertex for MemoryVertex<'_> {
    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn VertexProperty + 'a>> {
        let vertices = self.graph.inner.vertices.read();
        let found: Vec<Box<dyn VertexProperty + 'a>> = vertices
            .get(&self.id)
            .into_iter()
            .flat_map(|v| v.properties.iter())
            .filter(|p| admits(keys, &p.key))
            .map(|p| Box::new(self.graph.vertex_property_view(&self.id, &self.label, p)) as Box<dyn VertexProperty + 'a>)
            .collect();
        Box::new(found.into_iter())
    }

    fn edges<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Edge + 'a>> {
        Box::new(
            self.edge_views(direction, labels)
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn Edge + 'a>),
        )
    }

    fn vertices<'a>(&'a self, direction: Direction, labels: &[&str]) -> Iter<'a, Box<dyn Vertex + 'a>> {
        let adjacent: Vec<Box<dyn Vertex + 'a>> = self
            .edge_views(direction, labels)
            .iter()
            .map(|e| {
                let other = if e.out_vertex.0 == self.id { &e.in_vertex } else { &e.out_vertex };
                Box::new(self.endpoint(other)) as Box<dyn Vertex + 'a>
            })
            .collect();
        Box::new(adjacent.into_iter())
    }
}

impl ElementWrite for MemoryVertex<'_> {
    /// Single cardinality: replaces every value under `key`.
    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        self.graph.set_vertex_property(&self.id, key, value).map(|_| ())
    }

    fn remove(&mut self) -> Result<()> {
        self.graph.remove_vertex(&self.id)
    }
}

impl VertexWrite for MemoryVertex<'_> {
    fn add_edge(&mut self, label: &str, in_vertex: &ElementId, properties: PropertyMap) -> Result<ElementId> {
        self.graph.add_edge(&self.id, in_vertex, label, properties)
    }
}

impl Element for MemoryEdge<'_> {
    fn id(&self) -> ElementId {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn as_edge(&self) -> Option<&dyn Edge> {
        Some(self)
    }
}

impl Edge for MemoryEdge<'_> {
    fn out_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        let (id, label) = self.out_vertex.clone();
        Box::new(MemoryVertex { graph: self.graph, id, label })
    }

    fn in_vertex<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        let (id, label) = self.in_vertex.clone();
        Box::new(MemoryVertex { graph: self.graph, id, label })
    }

    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn Property + 'a>> {
        let edges = self.graph.inner.edges.read();
        let found: Vec<Box<dyn Property + 'a>> = edges
            .get(&self.id)
            .into_iter()
            .flat_map(|e| e.properties.iter())
            .filter(|(key, _)| admits(keys, key))
            .map(|(key, value)| Box::new(MemoryProperty { key: key.clone(), value: value.clone() }) as Box<dyn Property + 'a>)
            .collect();
        Box::new(found.into_iter())
    }
}

impl ElementWrite for MemoryEdge<'_> {
    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        self.graph.set_edge_property(&self.id, key, value)
    }

    fn remove(&mut self) -> Result<()> {
        self.graph.remove_edge(&self.id)
    }
}

impl Element for MemoryVertexProperty<'_> {
    fn id(&self) -> ElementId {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.key.clone()
    }

    fn as_vertex_property(&self) -> Option<&dyn VertexProperty> {
        Some(self)
    }
}

impl VertexProperty for MemoryVertexProperty<'_> {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn element<'a>(&'a self) -> Box<dyn Vertex + 'a> {
        let (id, label) = self.owner.clone();
        Box::new(MemoryVertex { graph: self.graph, id, label })
    }

    fn properties<'a>(&'a self, keys: &[&str]) -> Iter<'a, Box<dyn Property + 'a>> {
        let vertices = self.graph.inner.vertices.read();
        let found: Vec<Box<dyn Property + 'a>> = vertices
            .get(&self.owner.0)
            .and_then(|v| v.properties.iter().find(|p| p.id == self.id))
            .into_iter()
            .flat_map(|p| p.meta.iter())
            .filter(|(key, _)| admits(keys, key))
            .map(|(key, value)| Box::new(MemoryProperty { key: key.clone(), value: value.clone() }) as Box<dyn Property + 'a>)
            .collect();
        Box::new(found.into_iter())
    }
}

impl ElementWrite for MemoryVertexProperty<'_> {
    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        self.graph.set_meta_property(&self.id, key, value)
    }

    fn remove(&mut self) -> Result<()> {
        self.graph.remove_vertex_property(&self.id)
    }
}

impl Property for MemoryProperty {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn value(&self) -> Value {
        self.value.clone()
    }
}
