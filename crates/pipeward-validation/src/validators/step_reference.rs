//! Reference integrity across the step map: step names must be unique,
//! and in-cluster gRPC references must resolve to a step.
//!
//! Dotted gRPC service names are external FQDNs and out of this
//! validator's jurisdiction; Kafka outputs are wired by topic and checked
//! by the routing and naming validators instead.

use std::collections::BTreeMap;

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

pub struct StepReferenceValidator;

impl ConfigValidator for StepReferenceValidator {
    fn name(&self) -> &'static str {
        "step_reference"
    }

    fn priority(&self) -> u32 {
        400
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

        let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for step in config.steps.values() {
            *name_counts.entry(step.step_name.as_str()).or_default() += 1;
        }
        for (name, count) in name_counts {
            if count > 1 {
                result.add_error(format!(
                    "duplicate step name '{name}' appears {count} times in the pipeline"
                ));
            }
        }

        for step in config.steps.values() {
            for (output_name, target) in &step.outputs {
                let Some(grpc) = target.transport.grpc() else {
                    continue;
                };
                if grpc.is_external() {
                    continue;
                }
                if !config.has_step(&grpc.service_name) {
                    result.add_error(format!(
                        "step '{}' output '{output_name}': gRPC target '{}' does not exist in the pipeline",
                        step.step_name, grpc.service_name
                    ));
                }
            }
        }

        result
    }
}
