//! The step-type state machine: entry steps receive from outside the
//! pipeline, mid steps relay, sinks terminate. Shape violations that
//! break the machine are errors; shapes that are merely suspicious
//! (an unreachable mid step, a pipeline with no sink) are warnings.

use pipeward_model::{PipelineConfiguration, StepType};

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

pub struct StepTypeValidator;

impl ConfigValidator for StepTypeValidator {
    fn name(&self) -> &'static str {
        "step_type"
    }

    fn priority(&self) -> u32 {
        300
    }

    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        _mode: ValidationMode,
    ) -> ValidationResult {
        let Some(config) = config else {
            return ValidationResult::new();
        };
        if config.steps.is_empty() {
            return ValidationResult::new();
        }

        let mut result = ValidationResult::new();
        let mut initial_count = 0usize;
        let mut sink_count = 0usize;

        for step in config.steps.values() {
            let name = &step.step_name;
            match step.step_type {
                StepType::InitialPipeline => {
                    initial_count += 1;
                    if !step.kafka_inputs.is_empty() {
                        result.add_error(format!(
                            "INITIAL_PIPELINE step '{name}' must not have Kafka inputs; it receives documents from outside the pipeline"
                        ));
                    }
                    if step.outputs.is_empty() {
                        result.add_error(format!(
                            "INITIAL_PIPELINE step '{name}' must have at least one output"
                        ));
                    }
                }
                StepType::Pipeline => {
                    if step.kafka_inputs.is_empty() {
                        result.add_warning(format!(
                            "PIPELINE step '{name}' has no inputs and may be unreachable"
                        ));
                    }
                    if step.outputs.is_empty() {
                        result.add_warning(format!("PIPELINE step '{name}' has no outputs"));
                    }
                }
                StepType::Sink => {
                    sink_count += 1;
                    if !step.outputs.is_empty() {
                        result.add_error(format!(
                            "step '{name}': SINK steps should not have outputs"
                        ));
                    }
                    if step.kafka_inputs.is_empty() {
                        result.add_warning(format!("SINK step '{name}' has no inputs"));
                    }
                }
            }
        }

        if initial_count == 0 {
            result.add_warning("pipeline has no INITIAL_PIPELINE step");
        } else if initial_count > 1 {
            result.add_warning(format!(
                "pipeline has {initial_count} INITIAL_PIPELINE steps; expected exactly one"
            ));
        }
        if sink_count == 0 {
            result.add_warning("pipeline has no SINK step");
        }

        result
    }
}
