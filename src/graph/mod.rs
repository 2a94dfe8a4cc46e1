//! Internal search-node numbering.
//!
//! Every non-depot stop owns one node. Every vehicle owns a start node and an
//! end node, both standing for the depot.

mod index_manager;

pub use index_manager::{NodeIndex, RouteGraph};
