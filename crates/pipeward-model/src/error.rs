//! Error types for the value model.
//!
//! The model performs no business validation — that is the job of the
//! validation engine — so the only failures here are parse failures on
//! enum-like wire strings.

use thiserror::Error;

/// Errors raised while constructing model values from wire strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A step type string did not match any known variant.
    #[error("unknown step type: {0} (expected INITIAL_PIPELINE, PIPELINE, or SINK)")]
    UnknownStepType(String),

    /// A transport type string did not match any known variant.
    #[error("unknown transport type: {0} (expected KAFKA or GRPC)")]
    UnknownTransportType(String),
}
