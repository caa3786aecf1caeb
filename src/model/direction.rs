//! Edge direction relative to a vertex.

use serde::{Deserialize, Serialize};

/// Traversal direction.
///
/// `Outgoing` edges leave the vertex (the vertex is their OUT endpoint),
/// `Incoming` edges arrive at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl Direction {
    /// Whether edges leaving the vertex are covered.
    pub fn includes_outgoing(self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    /// Whether edges arriving at the vertex are covered.
    pub fn includes_incoming(self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}
