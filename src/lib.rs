//! # graph-deflate: Selective Snapshots of Property Graph Elements
//!
//! Turns a live graph element (vertex, edge, vertex-scoped property) or a
//! traversal path into an immutable, self-contained copy that carries only
//! the data the caller asked for.
//!
//! ## Design Principles
//!
//! 1. **Capability traits**: live views and detached copies share the read half
//!    of `structure::Element` and friends, so downstream code reads both alike
//! 2. **Selection-gated capture**: a `Selection` names which components
//!    (`properties`, `outE`, `inE`) and which keys are copied
//! 3. **No residual connection**: edge endpoints and vertex-property owners are
//!    identity-only, nothing points back into the source graph
//! 4. **Read-only**: every write attempt fails with `Error::UnsupportedMutation`
//!
//! ## Quick Start
//!
//! ```rust
//! use graph_deflate::{MemoryGraph, Selection, Value, deflated};
//!
//! # fn main() -> graph_deflate::Result<()> {
//! let graph = MemoryGraph::new();
//! let daniel = graph.add_vertex("person", [("name", Value::from("daniel"))]);
//!
//! let live = graph.vertex(&daniel).expect("just created");
//! let snapshot = deflated::detach_vertex(&live, &Selection::none().with_properties(["name"]));
//!
//! assert_eq!(snapshot.value("name")?, Some(&Value::from("daniel")));
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | Value, ElementId, Direction | `model` | Plain data, no graph semantics |
//! | Element / Vertex / Edge / Path traits | `structure` | Shared read + write capability |
//! | `MemoryGraph` | `storage` | Reference live graph for embedding/testing |
//! | `Selection` | `selection` | Which components and keys to capture |
//! | `Deflated*` + `detach` | `deflated` | The detached variants and the factory |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod structure;
pub mod storage;
pub mod selection;
pub mod deflated;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Value, PropertyMap, property_map, ElementId, Direction};

// ============================================================================
// Re-exports: Structure
// ============================================================================

pub use structure::{
    Element, Property, VertexProperty, Vertex, Edge, Path,
    ElementWrite, VertexWrite, PropertyWrite, Mutation,
    GraphObject, PathObject, MutablePath, Step, ElementIdentity, ElementKind,
};

// ============================================================================
// Re-exports: Storage, Selection, Deflated
// ============================================================================

pub use storage::MemoryGraph;
pub use selection::{Selection, Component};
pub use deflated::{
    Deflated, DeflatedVertex, DeflatedEdge, DeflatedVertexProperty,
    DeflatedProperty, DeflatedPath, ReferenceVertex, detach,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported mutation: {0}")]
    UnsupportedMutation(Mutation),

    #[error("Ambiguous lookup: multiple properties exist for the provided key '{key}'")]
    AmbiguousLookup { key: String },

    #[error("Unrecognized element kind: {label}[{id}] is not a vertex, edge or vertex property")]
    UnrecognizedKind { id: ElementId, label: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
