//! Output wiring rules: every output must point at a real step, sinks
//! must not forward, and output names must be unambiguous.
//!
//! Rejects a null configuration, like the retry validator.

use std::collections::BTreeMap;

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

pub struct OutputRoutingValidator;

impl ConfigValidator for OutputRoutingValidator {
    fn name(&self) -> &'static str {
        "output_routing"
    }

    fn priority(&self) -> u32 {
        80
    }

    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        _mode: ValidationMode,
    ) -> ValidationResult {
        let Some(config) = config else {
            return ValidationResult::error("Pipeline configuration or steps cannot be null");
        };

        let mut result = ValidationResult::new();

        for step in config.steps.values() {
            let name = &step.step_name;

            if step.is_sink() {
                if !step.outputs.is_empty() {
                    result.add_error(format!("SINK step '{name}' must not declare outputs"));
                }
            } else if step.outputs.is_empty() {
                result.add_warning(format!("step '{name}' has no outputs and is not a SINK"));
            }

            // The map guarantees exact-name uniqueness; collisions that
            // differ only in case are still ambiguous to operators.
            let mut lowered: BTreeMap<String, usize> = BTreeMap::new();
            for output_name in step.outputs.keys() {
                *lowered.entry(output_name.to_lowercase()).or_default() += 1;
            }
            for (lowered_name, count) in lowered {
                if count > 1 {
                    result.add_error(format!(
                        "step '{name}': duplicate output name '{lowered_name}' (names are case-insensitive)"
                    ));
                }
            }

            if step.outputs.len() == 1 {
                let only = step.outputs.keys().next().expect("one output");
                if only != "default" {
                    result.add_warning(format!(
                        "step '{name}': single output is named '{only}' instead of 'default'"
                    ));
                }
            }

            for (output_name, target) in &step.outputs {
                if !config.has_step(&target.target_step_name) {
                    result.add_error(format!(
                        "step '{name}' output '{output_name}': target step '{}' does not exist in the pipeline",
                        target.target_step_name
                    ));
                }
            }
        }

        result
    }
}
