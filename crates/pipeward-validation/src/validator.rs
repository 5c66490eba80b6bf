//! # Validator Traits
//!
//! Each validator is a pure, stateless rule-checker for one concern. No
//! validator observes another's output — independence is a hard design
//! invariant so validators can be added, removed, or reordered (for
//! message ordering only) without behavior coupling.
//!
//! Priority is used solely for deterministic output ordering. Every
//! registered validator always runs; nothing short-circuits.

use pipeward_model::{PipelineClusterConfiguration, PipelineConfiguration};

use crate::result::{ValidationMode, ValidationResult};

/// A rule-checker over a single pipeline configuration.
///
/// The configuration is `Option` because callers may hand the engine an
/// absent document (a deleted or never-created pipeline). Most validators
/// treat `None` as valid-empty; the ones whose contract rejects null say
/// so in their docs.
pub trait ConfigValidator: Send + Sync {
    /// Short stable name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Ordering key; lower runs (and reports) earlier.
    fn priority(&self) -> u32;

    /// Check the configuration and report findings. Pure: no I/O, no
    /// shared state, no mutation of the input.
    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        mode: ValidationMode,
    ) -> ValidationResult;
}

/// A rule-checker over a whole cluster configuration, for rules that span
/// pipelines (cross-pipeline wiring, cluster-wide reference integrity).
pub trait ClusterValidator: Send + Sync {
    /// Short stable name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Ordering key; lower runs (and reports) earlier.
    fn priority(&self) -> u32;

    /// Check the cluster configuration and report findings.
    fn validate(
        &self,
        cluster: Option<&PipelineClusterConfiguration>,
        mode: ValidationMode,
    ) -> ValidationResult;
}
