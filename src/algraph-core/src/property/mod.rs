//! Property-graph overlay.
//!
//! Attaches key/value metadata to vertices and labels to edges of an
//! immutable [`crate::Graph`]. The graph itself is untouched; metadata is
//! validated against the graph's canonical relation.

mod property_graph;
mod value;

pub use property_graph::{Label, PropertyGraph};
pub use value::{PropertyMap, Value};
