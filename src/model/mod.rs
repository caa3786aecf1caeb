//! # Property Graph Model
//!
//! Plain data types shared by live graphs and detached snapshots.
//!
//! Design rule: no graph semantics here. Elements, paths and detachment live
//! in `structure` and `deflated`; this module is pure data with no I/O and no state.

pub mod id;
pub mod direction;
pub mod value;
pub mod property_map;

pub use id::ElementId;
pub use direction::Direction;
pub use value::{Value, IsoDuration};
pub use property_map::{PropertyMap, property_map};
