//! # SchemaValidator — Mode-Aware Completeness Checks
//!
//! Logically the twelfth validator, kept apart from the priority list
//! because it alone branches on [`ValidationMode`] for structural (not
//! field-level) requirements. The same incomplete graph is acceptable
//! while an operator is still sketching it in DESIGN mode and a hard
//! error at the PRODUCTION activation gate.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

pub struct SchemaValidator;

impl SchemaValidator {
    fn check_name(config: &PipelineConfiguration, result: &mut ValidationResult) {
        // Invalid name characters are an error in both modes; a pipeline
        // cannot be renamed later without rewiring its topics.
        if !config
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            result.add_error(format!(
                "Pipeline name '{}' contains invalid characters",
                config.name
            ));
        }
    }

    fn check_backoff_bounds(config: &PipelineConfiguration, result: &mut ValidationResult) {
        // A warning in both modes, even production.
        for step in config.steps.values() {
            if let (Some(initial), Some(max)) = (step.retry_backoff_ms, step.max_retry_backoff_ms)
            {
                if initial > max {
                    result.add_warning(format!(
                        "step '{}': Initial retry backoff is greater than max retry backoff",
                        step.step_name
                    ));
                }
            }
        }
    }
}

impl ConfigValidator for SchemaValidator {
    fn name(&self) -> &'static str {
        "schema"
    }

    // Higher than every listed validator: the composite holds this
    // validator apart and always runs it after the sorted list, so the
    // declared priority matches the execution (and report) order.
    fn priority(&self) -> u32 {
        700
    }

    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        mode: ValidationMode,
    ) -> ValidationResult {
        // Null rejection is the required-fields validator's contract.
        let Some(config) = config else {
            return ValidationResult::new();
        };

        let mut result = ValidationResult::new();
        Self::check_name(config, &mut result);

        match mode {
            ValidationMode::Design => {
                if config.steps.is_empty() {
                    result.add_warning("No pipeline steps defined yet");
                } else {
                    for step in config.steps.values() {
                        if !step.is_sink() && step.outputs.is_empty() {
                            result.add_warning(format!(
                                "step '{}' has no outputs defined yet",
                                step.step_name
                            ));
                        }
                    }
                }
            }
            ValidationMode::Production => {
                if config.steps.is_empty() {
                    result.add_error("Pipeline must have at least one step");
                } else {
                    if !config.steps.values().any(|s| s.is_initial()) {
                        result.add_error(
                            "Pipeline must have at least one INITIAL_PIPELINE step as entry point",
                        );
                    }
                    for step in config.steps.values() {
                        if !step.is_sink() && step.outputs.is_empty() {
                            result.add_error(format!(
                                "step '{}' must define at least one output",
                                step.step_name
                            ));
                        }
                    }
                }
            }
        }

        Self::check_backoff_bounds(config, &mut result);
        result
    }
}
