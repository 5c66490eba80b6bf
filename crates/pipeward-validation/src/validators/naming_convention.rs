//! Platform naming conventions, enforced as errors.
//!
//! Pipeline and step names become Kafka topic segments, so dots are
//! reserved as delimiters and names are restricted to alphanumerics and
//! hyphens. Topics and consumer groups must follow the platform layout
//! exactly — this is the error-level rendition of the advisory checks in
//! the Kafka topic naming validator.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Names longer than this draw a warning.
const MAX_NAME_LENGTH: usize = 50;

pub struct NamingConventionValidator;

impl ConfigValidator for NamingConventionValidator {
    fn name(&self) -> &'static str {
        "naming_convention"
    }

    fn priority(&self) -> u32 {
        200
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

        check_name(&mut result, "pipeline name", &config.name);

        for step in config.steps.values() {
            check_name(&mut result, "step name", &step.step_name);

            for input in &step.kafka_inputs {
                for topic in &input.topics {
                    check_topic(&mut result, &config.name, &step.step_name, topic);
                }

                let group = &input.consumer_group_id;
                if !group.starts_with(&format!("{}.", config.name)) {
                    result.add_error(format!(
                        "step '{}': consumerGroupId '{group}' must be prefixed with the pipeline name",
                        step.step_name
                    ));
                }
            }

            for target in step.outputs.values() {
                if let Some(kafka) = target.transport.kafka() {
                    check_topic(&mut result, &config.name, &step.step_name, &kafka.topic);
                }
            }
        }

        result
    }
}

/// Dots are reserved as topic delimiters; everything else must be
/// alphanumeric or hyphen.
fn check_name(result: &mut ValidationResult, label: &str, value: &str) {
    if value.contains('.') {
        result.add_error(format!(
            "{label} '{value}' must not contain dots; dots are reserved as topic delimiters"
        ));
        result.add_error(format!(
            "{label} '{value}' must contain only alphanumeric characters and hyphens"
        ));
    } else if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        result.add_error(format!(
            "{label} '{value}' must contain only alphanumeric characters and hyphens"
        ));
    }

    if value.len() > MAX_NAME_LENGTH {
        result.add_warning(format!(
            "{label} '{value}' is longer than {MAX_NAME_LENGTH} characters"
        ));
    }
}

/// Topics must be exactly `{pipeline}.{step}.{direction}`.
fn check_topic(result: &mut ValidationResult, pipeline: &str, step: &str, topic: &str) {
    let parts: Vec<&str> = topic.split('.').collect();
    let conforms = parts.len() == 3
        && parts[0] == pipeline
        && !parts[1].is_empty()
        && matches!(parts[2], "input" | "output");
    if !conforms {
        result.add_error(format!(
            "step '{step}': topic '{topic}' must follow the '{{pipeline}}.{{step}}.{{direction}}' naming convention"
        ));
    }
}
