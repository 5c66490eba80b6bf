//! Kafka topic and consumer-group naming rules.
//!
//! Structural rules (broker-legal characters, length, reserved names) are
//! errors; the platform's `{pipeline}.{step}.{direction}` convention is
//! advisory here and only warns. The stricter, error-level rendition of
//! the convention lives in the naming-convention validator.
//!
//! DLQ topics are never inspected: they are derived (`<topic>.dlq`) and
//! cannot be independently misnamed.

use pipeward_model::PipelineConfiguration;

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Kafka's broker-side topic length limit.
const MAX_TOPIC_LENGTH: usize = 249;
/// Subscribing one input to more than this many topics draws a warning.
const MAX_TOPICS_PER_INPUT: usize = 10;

pub struct KafkaTopicNamingValidator;

impl ConfigValidator for KafkaTopicNamingValidator {
    fn name(&self) -> &'static str {
        "kafka_topic_naming"
    }

    fn priority(&self) -> u32 {
        50
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

            for input in &step.kafka_inputs {
                for topic in &input.topics {
                    check_topic(&mut result, &config.name, name, "input", topic);
                }

                if input.topics.len() > MAX_TOPICS_PER_INPUT {
                    result.add_warning(format!(
                        "step '{name}': Kafka input subscribes to {} topics; more than {MAX_TOPICS_PER_INPUT} is hard to reason about",
                        input.topics.len()
                    ));
                }

                let group = &input.consumer_group_id;
                if !group.is_empty() && !group.starts_with(&format!("{}.", config.name)) {
                    result.add_warning(format!(
                        "step '{name}': consumerGroupId '{group}' does not follow the '{{pipeline}}.{{name}}' convention"
                    ));
                }
            }

            for (output_name, target) in &step.outputs {
                if let Some(kafka) = target.transport.kafka() {
                    let context = format!("output '{output_name}'");
                    check_topic(&mut result, &config.name, name, &context, &kafka.topic);
                }
            }
        }

        result
    }
}

/// Structural checks (errors) followed by the convention check (warning).
fn check_topic(
    result: &mut ValidationResult,
    pipeline: &str,
    step: &str,
    context: &str,
    topic: &str,
) {
    if topic.trim().is_empty() {
        result.add_error(format!("step '{step}' {context}: topic name is empty"));
        return;
    }
    if topic == "." || topic == ".." {
        result.add_error(format!(
            "step '{step}' {context}: topic '{topic}' is reserved and cannot be used"
        ));
        return;
    }
    if topic.len() > MAX_TOPIC_LENGTH {
        result.add_error(format!(
            "step '{step}' {context}: topic is {} characters long; the maximum is {MAX_TOPIC_LENGTH}",
            topic.len()
        ));
    }
    if let Some(bad) = topic
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        result.add_error(format!(
            "step '{step}' {context}: topic '{topic}' contains illegal character '{bad}'"
        ));
        return;
    }

    if !follows_convention(pipeline, topic) {
        result.add_warning(format!(
            "step '{step}' {context}: topic '{topic}' does not follow the '{{pipeline}}.{{step}}.{{direction}}' convention"
        ));
    }
}

/// `{pipeline}.{step}.{direction}` with direction `input` or `output`.
fn follows_convention(pipeline: &str, topic: &str) -> bool {
    let parts: Vec<&str> = topic.split('.').collect();
    parts.len() == 3
        && parts[0] == pipeline
        && !parts[1].is_empty()
        && matches!(parts[2], "input" | "output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::{kafka_input, pipeline, step, with_output};
    use pipeward_model::{OutputTarget, StepType};

    fn run(config: &PipelineConfiguration) -> ValidationResult {
        KafkaTopicNamingValidator.validate(Some(config), ValidationMode::Design)
    }

    #[test]
    fn null_configuration_is_valid() {
        let result = KafkaTopicNamingValidator.validate(None, ValidationMode::Production);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn conventional_wiring_produces_no_findings() {
        let parser = with_output(
            step("parser", StepType::InitialPipeline),
            "default",
            OutputTarget::kafka("chunker", "search.chunker.input"),
        );
        let mut chunker = step("chunker", StepType::Sink);
        chunker
            .kafka_inputs
            .push(kafka_input(&["search.chunker.input"], "search.chunker"));
        let config = pipeline("search", vec![parser, chunker]);

        let result = run(&config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn illegal_characters_are_an_error() {
        let s = with_output(
            step("parser", StepType::Pipeline),
            "default",
            OutputTarget::kafka("chunker", "search/chunker"),
        );
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.errors[0].contains("illegal character '/'"));
    }

    #[test]
    fn overlong_topic_is_an_error() {
        let long = "a".repeat(250);
        let s = with_output(
            step("parser", StepType::Pipeline),
            "default",
            OutputTarget::kafka("chunker", long),
        );
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.errors.iter().any(|e| e.contains("249")));
    }

    #[test]
    fn dot_and_dot_dot_are_reserved() {
        for reserved in [".", ".."] {
            let s = with_output(
                step("parser", StepType::Pipeline),
                "default",
                OutputTarget::kafka("chunker", reserved),
            );
            let config = pipeline("search", vec![s]);
            let result = run(&config);
            assert!(
                result.errors.iter().any(|e| e.contains("reserved")),
                "topic {reserved:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_topic_is_an_error() {
        let mut s = step("parser", StepType::Pipeline);
        s.kafka_inputs.push(kafka_input(&[""], "search.parser"));
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.errors[0].contains("topic name is empty"));
    }

    #[test]
    fn off_convention_topic_is_only_a_warning() {
        let s = with_output(
            step("parser", StepType::Pipeline),
            "default",
            OutputTarget::kafka("chunker", "some-shared-topic"),
        );
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.is_valid());
        assert!(result.warnings[0].contains("convention"));
    }

    #[test]
    fn off_convention_consumer_group_is_a_warning() {
        let mut s = step("parser", StepType::Pipeline);
        s.kafka_inputs
            .push(kafka_input(&["search.parser.input"], "shared-group"));
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("consumerGroupId 'shared-group'")));
    }

    #[test]
    fn too_many_topics_on_one_input_is_a_warning() {
        let topics: Vec<String> = (0..11).map(|i| format!("search.t{i}.input")).collect();
        let topic_refs: Vec<&str> = topics.iter().map(String::as_str).collect();
        let mut s = step("parser", StepType::Pipeline);
        s.kafka_inputs.push(kafka_input(&topic_refs, "search.parser"));
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("subscribes to 11 topics")));
    }

    #[test]
    fn derived_dlq_topic_draws_no_findings() {
        // Scenario: the DLQ topic is computed from the primary topic and is
        // never independently validated.
        let s = with_output(
            step("step1", StepType::InitialPipeline),
            "default",
            OutputTarget::kafka("step2", "pipeline.step2.input"),
        );
        let step2 = {
            let mut st = step("step2", StepType::Sink);
            st.kafka_inputs
                .push(kafka_input(&["pipeline.step2.input"], "pipeline.step2"));
            st
        };
        let config = pipeline("pipeline", vec![s, step2]);

        let kafka = config.steps["step1"].outputs["default"]
            .transport
            .kafka()
            .unwrap();
        assert_eq!(kafka.dlq_topic(), "pipeline.step2.input.dlq");

        let result = run(&config);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }
}
