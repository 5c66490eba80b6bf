//! Retry and timeout policy rules.
//!
//! Hard caps are errors; merely suspicious values are warnings. Like the
//! required-fields validator, this one rejects a null configuration.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Hard cap on retry attempts.
const MAX_RETRIES: u32 = 100;
/// Retry counts above this (but within the cap) draw a warning.
const HIGH_RETRIES: u32 = 10;
/// Hard cap on backoff and timeout: one hour.
const ONE_HOUR_MS: u64 = 3_600_000;
/// Backoff of five minutes or more draws a warning.
const LONG_BACKOFF_MS: u64 = 300_000;
/// Timeout of ten minutes or more draws a warning.
const LONG_TIMEOUT_MS: u64 = 600_000;

pub struct RetryConfigValidator;

impl ConfigValidator for RetryConfigValidator {
    fn name(&self) -> &'static str {
        "retry_config"
    }

    fn priority(&self) -> u32 {
        70
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

            if let Some(retries) = step.max_retries {
                if retries > MAX_RETRIES {
                    result.add_error(format!(
                        "step '{name}': maxRetries exceeds maximum allowed value of {MAX_RETRIES} (was {retries})"
                    ));
                } else if retries > HIGH_RETRIES {
                    result.add_warning(format!(
                        "step '{name}': maxRetries of {retries} is high; confirm this is intentional"
                    ));
                }

                if retries == 0
                    && (step.retry_backoff_ms.is_some() || step.max_retry_backoff_ms.is_some())
                {
                    result.add_warning(format!(
                        "step '{name}': retries are disabled (maxRetries is 0) but retry backoff is configured"
                    ));
                }
            }

            if let Some(backoff) = step.retry_backoff_ms {
                if backoff > ONE_HOUR_MS {
                    result.add_error(format!(
                        "step '{name}': retryBackoffMs exceeds maximum allowed value of {ONE_HOUR_MS} (was {backoff})"
                    ));
                } else if backoff >= LONG_BACKOFF_MS {
                    result.add_warning(format!(
                        "step '{name}': retryBackoffMs of {backoff} is five minutes or longer"
                    ));
                }
            }

            if let Some(timeout) = step.step_timeout_ms {
                if timeout > ONE_HOUR_MS {
                    result.add_error(format!(
                        "step '{name}': stepTimeoutMs exceeds maximum allowed value of {ONE_HOUR_MS} (was {timeout})"
                    ));
                } else if timeout >= LONG_TIMEOUT_MS {
                    result.add_warning(format!(
                        "step '{name}': stepTimeoutMs of {timeout} is ten minutes or longer"
                    ));
                }
            }

            if let (Some(initial), Some(max)) = (step.retry_backoff_ms, step.max_retry_backoff_ms)
            {
                if initial > max {
                    result.add_error(format!(
                        "step '{name}': initial retry backoff ({initial}) exceeds max retry backoff ({max})"
                    ));
                }
            }

            if let (Some(retries), Some(backoff), Some(timeout)) =
                (step.max_retries, step.retry_backoff_ms, step.step_timeout_ms)
            {
                let worst_case = u64::from(retries).saturating_mul(backoff);
                if worst_case > timeout {
                    result.add_warning(format!(
                        "step '{name}': worst-case retry time of {worst_case}ms exceeds stepTimeoutMs of {timeout}ms"
                    ));
                }
            }
        }

        result
    }
}
