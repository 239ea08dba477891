//! Algraph - algebraic graphs for Rust
//!
//! Graphs are expressions over four primitives (empty, vertex, overlay,
//! connect) tagged with a kind, and are read back as vertex and edge sets
//! under a caller-supplied vertex equivalence.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Re-export core crates
pub use algraph_core as core;
pub use common_config as config;
pub use common_display as display;
pub use common_error as error;

pub use algraph_core::{Equivalence, Expr, Graph, Kind, Natural, Relation};

/// Algraph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
