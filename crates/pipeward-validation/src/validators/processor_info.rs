//! Content-quality checks on processor bindings.
//!
//! Presence and mutual exclusion are construction-time invariants of
//! `ProcessorInfo`; this validator only judges what the names say.

use pipeward_model::{PipelineConfiguration, ProcessorInfo};

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Shortest plausible gRPC service name.
const MIN_SERVICE_NAME_LENGTH: usize = 3;
/// Service names longer than this draw a warning.
const MAX_SERVICE_NAME_LENGTH: usize = 100;

/// Bean names that say nothing about what the processor does.
const GENERIC_BEAN_NAMES: [&str; 5] = ["processor", "handler", "service", "bean", "step"];

pub struct ProcessorInfoValidator;

impl ConfigValidator for ProcessorInfoValidator {
    fn name(&self) -> &'static str {
        "processor_info"
    }

    fn priority(&self) -> u32 {
        250
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

        for step in config.steps.values() {
            let name = &step.step_name;
            match &step.processor_info {
                ProcessorInfo::Grpc { grpc_service_name } => {
                    check_grpc_service(&mut result, name, grpc_service_name);
                }
                ProcessorInfo::Internal {
                    internal_processor_bean_name,
                } => {
                    check_bean_name(&mut result, name, internal_processor_bean_name);
                }
            }
        }

        result
    }
}

fn check_grpc_service(result: &mut ValidationResult, step: &str, service: &str) {
    if service.len() < MIN_SERVICE_NAME_LENGTH {
        result.add_error(format!(
            "step '{step}': gRPC service name '{service}' is too short (minimum {MIN_SERVICE_NAME_LENGTH} characters)"
        ));
    }
    if service.len() > MAX_SERVICE_NAME_LENGTH {
        result.add_warning(format!(
            "step '{step}': gRPC service name '{service}' is unusually long"
        ));
    }
    if !service
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
    {
        result.add_error(format!(
            "step '{step}': gRPC service name '{service}' must start with a letter"
        ));
    }
    if service.to_ascii_lowercase().contains("localhost") {
        result.add_warning(format!(
            "step '{step}': gRPC service name '{service}' references localhost and will not resolve in a cluster"
        ));
    }
}

fn check_bean_name(result: &mut ValidationResult, step: &str, bean: &str) {
    if !is_valid_identifier(bean) {
        result.add_error(format!(
            "step '{step}': bean name '{bean}' is not a valid identifier"
        ));
    }
    if GENERIC_BEAN_NAMES.contains(&bean.to_ascii_lowercase().as_str()) {
        result.add_warning(format!(
            "step '{step}': bean name '{bean}' is too generic to identify a processor"
        ));
    }
}

/// Letter or underscore, then letters, digits, or underscores.
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
