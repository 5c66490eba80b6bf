//! # End-to-End Engine Scenarios
//!
//! Drives the [`CompositeValidator`] over whole pipeline documents the
//! way the config service does, asserting the documented operator-facing
//! behavior: which findings appear, with which exact messages, and that
//! the engine never stops at the first failure.

use std::collections::BTreeMap;

use pipeward_model::{
    KafkaInputDefinition, OutputTarget, PipelineConfiguration, PipelineStep, ProcessorInfo,
    StepType,
};
use pipeward_validation::{
    CompositeValidator, ConfigValidator, SchemaValidator, ValidationMode, ValidationResult,
};
use pipeward_validation::validators::{
    NamingConventionValidator, OutputRoutingValidator, RetryConfigValidator, StepTypeValidator,
    default_validators,
};

// ---------------------------------------------------------------------------
// fixtures
// ---------------------------------------------------------------------------

fn step(name: &str, step_type: StepType) -> PipelineStep {
    PipelineStep {
        step_name: name.to_string(),
        step_type,
        description: Some(format!("{name} step")),
        kafka_inputs: Vec::new(),
        outputs: BTreeMap::new(),
        max_retries: None,
        retry_backoff_ms: None,
        max_retry_backoff_ms: None,
        retry_backoff_multiplier: None,
        step_timeout_ms: None,
        processor_info: ProcessorInfo::Internal {
            internal_processor_bean_name: format!("{name}Impl"),
        },
    }
}

fn pipeline(name: &str, steps: Vec<PipelineStep>) -> PipelineConfiguration {
    PipelineConfiguration {
        name: name.to_string(),
        steps: steps
            .into_iter()
            .map(|s| (s.step_name.clone(), s))
            .collect(),
    }
}

fn kafka_input(topics: &[&str], group: &str) -> KafkaInputDefinition {
    KafkaInputDefinition {
        topics: topics.iter().map(|t| t.to_string()).collect(),
        consumer_group_id: group.to_string(),
        consumer_properties: BTreeMap::new(),
    }
}

fn with_output(mut step: PipelineStep, name: &str, target: OutputTarget) -> PipelineStep {
    step.outputs.insert(name.to_string(), target);
    step
}

fn well_formed(name: &str) -> PipelineConfiguration {
    let parser = with_output(
        step("parser", StepType::InitialPipeline),
        "default",
        OutputTarget::kafka("indexer", &format!("{name}.indexer.input")),
    );
    let mut indexer = step("indexer", StepType::Sink);
    indexer.kafka_inputs.push(kafka_input(
        &[&format!("{name}.indexer.input")],
        &format!("{name}.indexer"),
    ));
    pipeline(name, vec![parser, indexer])
}

// ---------------------------------------------------------------------------
// documented scenarios
// ---------------------------------------------------------------------------

// ── dotted pipeline name ──

#[test]
fn dotted_pipeline_name_draws_exactly_two_naming_errors() {
    let config = pipeline("document.processing", vec![]);
    let result =
        NamingConventionValidator.validate(Some(&config), ValidationMode::Design);
    assert_eq!(result.errors.len(), 2, "{:?}", result.errors);
    assert!(result.errors[0].contains("must not contain dots"));
    assert!(result.errors[1].contains("alphanumeric characters and hyphens"));
}

// ── retry ceiling ──

#[test]
fn retries_over_the_ceiling_is_exactly_one_retry_error() {
    let mut s = step("parser", StepType::Pipeline);
    s.max_retries = Some(150);
    let config = pipeline("search", vec![s]);
    let result = RetryConfigValidator.validate(Some(&config), ValidationMode::Production);
    assert_eq!(
        result.errors,
        vec!["step 'parser': maxRetries exceeds maximum allowed value of 100 (was 150)"]
    );
}

// ── dangling output target ──

#[test]
fn dangling_kafka_target_is_reported_by_the_routing_validator() {
    let s = with_output(
        step("parser", StepType::Pipeline),
        "default",
        OutputTarget::kafka("ghost", "search.ghost.input"),
    );
    let config = pipeline("search", vec![s]);
    let result = OutputRoutingValidator.validate(Some(&config), ValidationMode::Production);
    assert!(result.errors.iter().any(|e| {
        e.contains("step 'parser' output 'default'") && e.contains("'ghost' does not exist")
    }));
}

#[test]
fn dangling_grpc_target_is_reported_by_both_reference_checks() {
    let s = with_output(
        step("parser", StepType::Pipeline),
        "default",
        OutputTarget::grpc("ghost", "ghost"),
    );
    let config = pipeline("search", vec![s]);
    let engine = CompositeValidator::new();
    let result = engine.validate(Some(&config), ValidationMode::Design);
    let dangling: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.contains("does not exist in the pipeline"))
        .collect();
    // Routing checks targetStepName, reference checks the gRPC service.
    assert_eq!(dangling.len(), 2, "{:?}", result.errors);
}

// ── sink with outputs ──

#[test]
fn sink_with_outputs_is_one_step_type_error_and_an_inputs_warning() {
    let sink = with_output(
        step("indexer", StepType::Sink),
        "default",
        OutputTarget::kafka("indexer", "search.indexer.input"),
    );
    let config = pipeline("search", vec![sink]);
    let result = StepTypeValidator.validate(Some(&config), ValidationMode::Production);
    assert_eq!(
        result.errors,
        vec!["step 'indexer': SINK steps should not have outputs"]
    );
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("SINK step 'indexer' has no inputs")));
}

// ── mode-dependent emptiness ──

#[test]
fn empty_pipeline_errors_in_production_and_warns_in_design() {
    let config = pipeline("search", vec![]);

    let production = SchemaValidator.validate(Some(&config), ValidationMode::Production);
    assert!(!production.is_valid());
    assert_eq!(
        production.errors,
        vec!["Pipeline must have at least one step"]
    );

    let design = SchemaValidator.validate(Some(&config), ValidationMode::Design);
    assert!(design.is_valid());
    assert_eq!(design.warnings, vec!["No pipeline steps defined yet"]);
}

// ── derived DLQ topics ──

#[test]
fn derived_dlq_topics_draw_no_naming_findings() {
    let s = with_output(
        step("step1", StepType::InitialPipeline),
        "default",
        OutputTarget::kafka("step2", "pipeline.step2.input"),
    );
    let target = &s.outputs["default"];
    let kafka = target.transport.kafka().unwrap();
    assert_eq!(kafka.dlq_topic(), "pipeline.step2.input.dlq");

    let mut step2 = step("step2", StepType::Sink);
    step2
        .kafka_inputs
        .push(kafka_input(&["pipeline.step2.input"], "pipeline.step2"));
    let config = pipeline("pipeline", vec![s, step2]);

    let engine = CompositeValidator::new();
    let result = engine.validate(Some(&config), ValidationMode::Production);
    assert!(result.is_valid(), "{:?}", result.errors);
    assert!(
        !result.warnings.iter().any(|w| w.contains("dlq")),
        "DLQ topics are derived and must never be inspected: {:?}",
        result.warnings
    );
}

// ---------------------------------------------------------------------------
// engine-level contracts
// ---------------------------------------------------------------------------

#[test]
fn every_validator_tolerates_a_null_configuration() {
    for validator in default_validators() {
        let result = validator.validate(None, ValidationMode::Production);
        // Null either passes or produces a null-specific error; it must
        // never produce step-level findings or panic.
        for error in &result.errors {
            assert!(
                error.contains("null"),
                "validator {} produced a non-null finding for None: {error}",
                validator.name()
            );
        }
        assert!(result.warnings.is_empty(), "validator {}", validator.name());
    }
}

#[test]
fn engine_reports_all_findings_in_a_single_pass() {
    // One document, many independent defects. The engine must surface
    // every one of them rather than stopping at the cheapest.
    let mut bad_step = step("Bad_Step", StepType::Sink);
    bad_step.max_retries = Some(150);
    bad_step.description = None;
    let bad_step = with_output(
        bad_step,
        "default",
        OutputTarget::kafka("ghost", "wrong-topic"),
    );
    let config = pipeline("search", vec![bad_step]);

    let engine = CompositeValidator::new();
    let result = engine.validate(Some(&config), ValidationMode::Production);

    assert!(result.errors.iter().any(|e| e.contains("maxRetries exceeds")));
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("SINK steps should not have outputs")));
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("'ghost' does not exist")));
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("naming convention")));
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("description is missing or blank")));
}

#[test]
fn findings_order_is_deterministic_across_runs() {
    let mut bad_step = step("loner", StepType::Pipeline);
    bad_step.max_retries = Some(0);
    bad_step.retry_backoff_ms = Some(500);
    let config = pipeline("search", vec![bad_step]);

    let engine = CompositeValidator::new();
    let baseline = engine.validate(Some(&config), ValidationMode::Design);
    for _ in 0..5 {
        let run = engine.validate(Some(&config), ValidationMode::Design);
        assert_eq!(run, baseline);
    }
}

#[test]
fn validators_are_independent_of_registration_order() {
    let config = well_formed("search");
    let forward = CompositeValidator::new().validate(Some(&config), ValidationMode::Production);

    let mut reversed = default_validators();
    reversed.reverse();
    let engine = CompositeValidator::with_validators(reversed, Vec::new());
    let shuffled = engine.validate(Some(&config), ValidationMode::Production);

    // The priority sort restores the canonical order regardless of how
    // the set was assembled.
    assert_eq!(forward, shuffled);
}

#[test]
fn clean_document_round_trips_through_serde_and_stays_clean() {
    let config = well_formed("search");
    let json = serde_json::to_string(&config).unwrap();
    let reparsed: PipelineConfiguration = serde_json::from_str(&json).unwrap();

    let engine = CompositeValidator::new();
    let result: ValidationResult = engine.validate(Some(&reparsed), ValidationMode::Production);
    assert!(result.is_valid(), "{:?}", result.errors);
}
