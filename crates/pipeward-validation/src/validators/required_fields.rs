//! Presence and sanity checks on the fields every step should carry.
//!
//! This is the one validator whose contract rejects a null configuration:
//! it is the engine's first line, so a missing document surfaces exactly
//! once instead of from every unit.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Unusually high retry count; anything above this draws a warning here
/// (the hard cap lives in the retry validator).
const MAX_SENSIBLE_RETRIES: u32 = 10;
/// Backoff over one minute draws a warning.
const LONG_BACKOFF_MS: u64 = 60_000;

pub struct RequiredFieldsValidator;

impl ConfigValidator for RequiredFieldsValidator {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    fn priority(&self) -> u32 {
        10
    }

    fn validate(
        &self,
        config: Option<&PipelineConfiguration>,
        _mode: ValidationMode,
    ) -> ValidationResult {
        let Some(config) = config else {
            return ValidationResult::error("Pipeline configuration cannot be null");
        };

        let mut result = ValidationResult::new();

        if config.name.trim().is_empty() {
            result.add_error("Pipeline name is required");
        }

        for (key, step) in &config.steps {
            let name = &step.step_name;

            if name.trim().is_empty() {
                result.add_error(format!("step keyed '{key}': stepName is required"));
            }

            if step
                .description
                .as_deref()
                .map_or(true, |d| d.trim().is_empty())
            {
                result.add_warning(format!("step '{name}': description is missing or blank"));
            }

            if let Some(retries) = step.max_retries {
                if retries > MAX_SENSIBLE_RETRIES {
                    result.add_warning(format!(
                        "step '{name}': maxRetries of {retries} is unusually high"
                    ));
                }
            }

            if let Some(backoff) = step.retry_backoff_ms {
                if backoff > LONG_BACKOFF_MS {
                    result.add_warning(format!(
                        "step '{name}': retryBackoffMs of {backoff} is over 1 minute"
                    ));
                }
            }

            if let (Some(initial), Some(max)) = (step.retry_backoff_ms, step.max_retry_backoff_ms)
            {
                if initial > max {
                    result.add_error(format!(
                        "step '{name}': retryBackoffMs ({initial}) is greater than maxRetryBackoffMs ({max})"
                    ));
                }
            }
        }

        result
    }
}
