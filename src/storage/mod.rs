//! # Live Graph Storage
//!
//! Live graphs are the source side of detachment: anything implementing the
//! `structure` read traits can be detached. This module ships the reference
//! implementation.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryGraph` | `memory` | In-memory, RwLock-protected, for testing/embedding |

pub mod memory;

pub use memory::{MemoryEdge, MemoryGraph, MemoryProperty, MemoryVertex, MemoryVertexProperty};
