//! Error types and result aliases for algraph.
//!
//! The expression core is total; these errors only surface at the
//! kind-tagged combinator boundary, in the bounded interpreter and in the
//! property-graph overlay.

mod error;

pub use error::{AlgraphError, AlgraphResult};
