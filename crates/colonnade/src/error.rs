//! Error types for the encode side.
//!
//! Rendering itself is total. Errors only arise when loading configuration or
//! assembling grouped headers whose shape is checked at runtime.

use thiserror::Error;

/// Errors loading a [`TableConfig`](crate::TableConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML could not be parsed into a config.
    #[error("invalid table config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors assembling a [`Cornice`](crate::Cornice).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorniceError {
    /// Sibling groups must have the same number of header levels.
    #[error("cornice depth mismatch: expected {expected} header levels, got {actual}")]
    DepthMismatch { expected: usize, actual: usize },

    /// A group needs at least one child.
    #[error("cornice group has no children")]
    EmptyGroup,
}
