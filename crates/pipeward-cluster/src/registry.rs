//! # Module Registry and Whitelist Workflow
//!
//! The registry answers one question: is a gRPC processor service
//! whitelisted for a cluster. It implements no validation rules. The
//! workflow re-runs the engine over every pipeline of a cluster after a
//! module-map change and appends its own whitelist findings, so the
//! per-pipeline report an operator sees is validation plus registry
//! state in one place.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use pipeward_model::{PipelineClusterConfiguration, ProcessorInfo};
use pipeward_validation::{CompositeValidator, ValidationMode, ValidationResult};

/// Boundary to the module registry.
pub trait ModuleRegistry: Send + Sync {
    /// Whether a gRPC processor service is whitelisted for a cluster.
    fn is_whitelisted(&self, cluster: &str, grpc_service_name: &str) -> bool;
}

/// Process-local registry keyed by cluster name.
#[derive(Debug, Default)]
pub struct InMemoryModuleRegistry {
    whitelists: RwLock<BTreeMap<String, BTreeSet<String>>>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn whitelist(&self, cluster: &str, grpc_service_name: &str) {
        self.whitelists
            .write()
            .entry(cluster.to_string())
            .or_default()
            .insert(grpc_service_name.to_string());
    }

    /// Returns whether the entry was present.
    pub fn revoke(&self, cluster: &str, grpc_service_name: &str) -> bool {
        self.whitelists
            .write()
            .get_mut(cluster)
            .is_some_and(|set| set.remove(grpc_service_name))
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn is_whitelisted(&self, cluster: &str, grpc_service_name: &str) -> bool {
        self.whitelists
            .read()
            .get(cluster)
            .is_some_and(|set| set.contains(grpc_service_name))
    }
}

// ---------------------------------------------------------------------------
// WhitelistWorkflow
// ---------------------------------------------------------------------------

pub struct WhitelistWorkflow {
    registry: Arc<dyn ModuleRegistry>,
    engine: CompositeValidator,
}

impl WhitelistWorkflow {
    pub fn new(registry: Arc<dyn ModuleRegistry>) -> Self {
        Self {
            registry,
            engine: CompositeValidator::new(),
        }
    }

    /// Re-validate every pipeline of a cluster, keyed by pipeline id.
    ///
    /// Each result is the engine's merged report plus one error per gRPC
    /// processor whose service is not whitelisted for the cluster. The
    /// whitelist findings come from this workflow; the engine stays pure.
    pub fn revalidate_cluster(
        &self,
        cluster: &PipelineClusterConfiguration,
        mode: ValidationMode,
    ) -> BTreeMap<String, ValidationResult> {
        let mut reports = BTreeMap::new();

        for (id, pipeline) in &cluster.pipeline_graph_config {
            let mut result = self.engine.validate(Some(pipeline), mode);

            for step in pipeline.steps.values() {
                let ProcessorInfo::Grpc { grpc_service_name } = &step.processor_info else {
                    continue;
                };
                if !self
                    .registry
                    .is_whitelisted(&cluster.cluster_name, grpc_service_name)
                {
                    result.add_error(format!(
                        "step '{}': gRPC service '{grpc_service_name}' is not whitelisted for cluster '{}'",
                        step.step_name, cluster.cluster_name
                    ));
                }
            }

            debug!(
                cluster = %cluster.cluster_name,
                pipeline = %id,
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "whitelist revalidation complete"
            );
            reports.insert(id.clone(), result);
        }

        reports
    }
}
