//! Loop detection within a single pipeline. Stubbed like its
//! cross-pipeline sibling: any non-trivial graph draws one warning.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

pub struct IntraPipelineLoopValidator;

impl ConfigValidator for IntraPipelineLoopValidator {
    fn name(&self) -> &'static str {
        "intra_pipeline_loop"
    }

    fn priority(&self) -> u32 {
        600
    }

    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        _mode: ValidationMode,
    ) -> ValidationResult {
        let Some(config) = config else {
            return ValidationResult::new();
        };

        let mut result = ValidationResult::new();

        // TODO: DFS with a recursion-stack set over the step graph (edges
        // are output -> targetStepName), reporting each cycle as an error
        // naming the steps involved.
        if !config.steps.is_empty() {
            result.add_warning("Intra-pipeline loop detection is not yet implemented");
        }

        result
    }
}
