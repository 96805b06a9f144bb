//! Structural side of a candidate: the shared node set and the directed edges over it.
//!
//! The node set belongs to the learning problem and is shared by reference
//! (`Arc<NodeSet>`) across every candidate of a collection. Edge sets are owned
//! and normalized, so two edge sets built from the same pairs compare equal
//! regardless of insertion order.

mod edge_set;
mod node_set;

pub use edge_set::*;
pub use node_set::*;
