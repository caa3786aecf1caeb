//! Element identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, comparable element identifier.
///
/// Live graphs hand out either numeric or string ids; both survive
/// detachment and serialization unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    Int(u64),
    Str(String),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Int(i) => write!(f, "{i}"),
            ElementId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ElementId { fn from(v: u64) -> Self { ElementId::Int(v) } }
impl From<String> for ElementId { fn from(v: String) -> Self { ElementId::Str(v) } }
impl From<&str> for ElementId { fn from(v: &str) -> Self { ElementId::Str(v.to_owned()) } }
