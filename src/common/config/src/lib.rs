//! Configuration management for algraph.
//!
//! Provides runtime configuration for relational interpretation.

use common_error::{AlgraphResult, ensure};
use serde::{Deserialize, Serialize};

/// Global algraph configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlgraphConfig {
    /// Interpreter configuration.
    pub interpreter: InterpreterConfig,
}

impl AlgraphConfig {
    /// Parse and validate a configuration from JSON. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> AlgraphResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> AlgraphResult<()> {
        self.interpreter.validate()
    }

    /// Serialize this configuration to JSON.
    pub fn to_json(&self) -> AlgraphResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Relational interpreter configuration.
///
/// Only transitive closure is affected: it is the single pass whose cost
/// grows cubically with the vertex count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Vertex count above which a transitive closure logs a warning.
    pub closure_warn_threshold: usize,
    /// Hard cap on the vertex count a transitive closure may run over.
    pub max_closure_vertices: Option<usize>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            closure_warn_threshold: 2048,
            max_closure_vertices: None,
        }
    }
}

impl InterpreterConfig {
    /// Set the warning threshold for transitive closures.
    #[must_use]
    pub fn with_closure_warn_threshold(mut self, threshold: usize) -> Self {
        self.closure_warn_threshold = threshold;
        self
    }

    /// Refuse transitive closures over more than `max` vertices.
    #[must_use]
    pub fn with_max_closure_vertices(mut self, max: usize) -> Self {
        self.max_closure_vertices = Some(max);
        self
    }

    /// Rejects a `max_closure_vertices` of zero.
    pub fn validate(&self) -> AlgraphResult<()> {
        ensure!(
            self.max_closure_vertices != Some(0),
            InvalidParameter: "max_closure_vertices must be at least 1"
        );
        Ok(())
    }

    /// Whether a closure over `vertex_count` vertices is allowed to run.
    pub fn allows_closure(&self, vertex_count: usize) -> bool {
        self.max_closure_vertices
            .is_none_or(|max| vertex_count <= max)
    }
}
