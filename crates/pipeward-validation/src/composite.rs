//! # CompositeValidator — The Validation Engine
//!
//! Owns the full validator set, runs every validator in ascending
//! priority order, and merges their findings into one result. The
//! engine never short-circuits: a pipeline that fails the cheapest
//! check still gets the full report, so an operator fixes everything
//! in one round trip instead of one finding at a time.

use tracing::{debug, warn};

use pipeward_model::{PipelineClusterConfiguration, PipelineConfiguration};

use crate::result::{ValidationMode, ValidationResult};
use crate::schema::SchemaValidator;
use crate::validator::{ClusterValidator, ConfigValidator};
use crate::validators::{default_cluster_validators, default_validators};

pub struct CompositeValidator {
    validators: Vec<Box<dyn ConfigValidator>>,
    cluster_validators: Vec<Box<dyn ClusterValidator>>,
    schema: SchemaValidator,
}

impl CompositeValidator {
    /// The full production validator set, sorted by priority.
    pub fn new() -> Self {
        Self::with_validators(default_validators(), default_cluster_validators())
    }

    /// Build an engine over an explicit validator set. Used by tests to
    /// isolate a subset; the priority sort still applies.
    pub fn with_validators(
        mut validators: Vec<Box<dyn ConfigValidator>>,
        cluster_validators: Vec<Box<dyn ClusterValidator>>,
    ) -> Self {
        validators.sort_by_key(|v| v.priority());
        Self {
            validators,
            cluster_validators,
            schema: SchemaValidator,
        }
    }

    /// Names of the registered pipeline validators, in execution order.
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Validate one pipeline: every registered validator runs in priority
    /// order, then the mode-aware schema pass (its priority is above every
    /// listed validator's), and all findings merge.
    pub fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        mode: ValidationMode,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for validator in &self.validators {
            let partial = validator.validate(config, mode);
            debug!(
                validator = validator.name(),
                priority = validator.priority(),
                errors = partial.errors.len(),
                warnings = partial.warnings.len(),
                "validator pass complete"
            );
            result.merge(partial);
        }

        result.merge(self.schema.validate(config, mode));

        if !result.is_valid() {
            warn!(
                pipeline = config.map(|c| c.name.as_str()).unwrap_or("<none>"),
                %mode,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "pipeline validation failed"
            );
        }
        result
    }

    /// Validate a whole cluster document: cluster-level validators run
    /// first, then the default-pipeline reference is checked, then every
    /// member pipeline is validated with its findings prefixed by its id.
    pub fn validate_cluster(
        &self,
        cluster: Option<&PipelineClusterConfiguration>,
        mode: ValidationMode,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        for validator in &self.cluster_validators {
            result.merge(validator.validate(cluster, mode));
        }

        let Some(cluster) = cluster else {
            result.add_error("Cluster configuration cannot be null");
            return result;
        };

        if let Some(default_name) = &cluster.default_pipeline_name {
            if !cluster.pipeline_graph_config.contains_key(default_name) {
                result.add_error(format!(
                    "default pipeline '{default_name}' does not exist in the cluster"
                ));
            }
        }

        for (id, pipeline) in &cluster.pipeline_graph_config {
            let partial = self.validate(Some(pipeline), mode);
            for error in partial.errors {
                result.add_error(format!("pipeline '{id}': {error}"));
            }
            for warning in partial.warnings {
                result.add_warning(format!("pipeline '{id}': {warning}"));
            }
        }

        result
    }
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}
