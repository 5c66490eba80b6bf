//! Cross-pipeline loop detection. Currently a stub that flags its own
//! absence so operators know routing loops between pipelines are not yet
//! being caught.

use pipeward_model::PipelineClusterConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ClusterValidator;

pub struct InterPipelineLoopValidator;

impl ClusterValidator for InterPipelineLoopValidator {
    fn name(&self) -> &'static str {
        "inter_pipeline_loop"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn validate(
        &self,
        cluster: Option<&PipelineClusterConfiguration>,
        _mode: ValidationMode,
    ) -> ValidationResult {
        let Some(cluster) = cluster else {
            return ValidationResult::new();
        };

        let mut result = ValidationResult::new();

        // TODO: build the cross-pipeline graph (edges from each Kafka output
        // topic to every pipeline consuming that topic) and run DFS with a
        // recursion-stack set, reporting each distinct cycle as an error
        // naming the pipelines involved.
        if !cluster.pipeline_graph_config.is_empty() {
            result.add_warning("Inter-pipeline loop detection is not yet implemented");
        }

        result
    }
}
