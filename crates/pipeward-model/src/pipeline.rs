//! # Pipeline Graph Types
//!
//! A [`PipelineConfiguration`] is a named directed graph of
//! [`PipelineStep`]s. Each step has a type in the entry/mid/terminal state
//! machine ([`StepType`]), optional Kafka inputs, named outputs, retry and
//! timeout tuning, and a processor binding ([`ProcessorInfo`]).
//!
//! Identity of a pipeline is its name. Instances are never mutated in
//! place; an edit builds a replacement instance which is re-validated
//! before it may be persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::transport::{KafkaInputDefinition, OutputTarget};

// ---------------------------------------------------------------------------
// StepType
// ---------------------------------------------------------------------------

/// Position of a step in the pipeline state machine.
///
/// - `InitialPipeline` — entry point; receives documents from outside the
///   pipeline, so it must not declare Kafka inputs and must have outputs.
/// - `Pipeline` — mid-graph processing step.
/// - `Sink` — terminal step; consumes and never forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    #[serde(rename = "INITIAL_PIPELINE")]
    InitialPipeline,
    #[serde(rename = "PIPELINE")]
    Pipeline,
    #[serde(rename = "SINK")]
    Sink,
}

impl StepType {
    /// Wire name of the step type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialPipeline => "INITIAL_PIPELINE",
            Self::Pipeline => "PIPELINE",
            Self::Sink => "SINK",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INITIAL_PIPELINE" => Ok(Self::InitialPipeline),
            "PIPELINE" => Ok(Self::Pipeline),
            "SINK" => Ok(Self::Sink),
            other => Err(ModelError::UnknownStepType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProcessorInfo
// ---------------------------------------------------------------------------

/// The processor bound to a step: either a remote gRPC service or an
/// internal processor bean hosted by the engine itself.
///
/// Exactly one of the two is set — the union is tagged by which wire field
/// is present, so a step with both (or neither) does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessorInfo {
    /// Remote processor reached over gRPC.
    Grpc {
        #[serde(rename = "grpcServiceName")]
        grpc_service_name: String,
    },
    /// In-process processor bean.
    Internal {
        #[serde(rename = "internalProcessorBeanName")]
        internal_processor_bean_name: String,
    },
}

impl ProcessorInfo {
    /// The gRPC service name, if this is a gRPC processor.
    pub fn grpc_service_name(&self) -> Option<&str> {
        match self {
            Self::Grpc { grpc_service_name } => Some(grpc_service_name),
            Self::Internal { .. } => None,
        }
    }

    /// The internal bean name, if this is an internal processor.
    pub fn internal_bean_name(&self) -> Option<&str> {
        match self {
            Self::Internal {
                internal_processor_bean_name,
            } => Some(internal_processor_bean_name),
            Self::Grpc { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineStep
// ---------------------------------------------------------------------------

/// One node in a pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    /// Step name, unique within the pipeline.
    pub step_name: String,
    /// Position in the entry/mid/terminal state machine.
    pub step_type: StepType,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kafka inputs feeding this step, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kafka_inputs: Vec<KafkaInputDefinition>,
    /// Named outputs. By convention a single output is named `default`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, OutputTarget>,
    /// Maximum retry attempts for a failed document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Initial retry backoff in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_backoff_ms: Option<u64>,
    /// Upper bound on the retry backoff in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retry_backoff_ms: Option<u64>,
    /// Multiplier applied to the backoff after each attempt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_backoff_multiplier: Option<f64>,
    /// Per-document processing timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_timeout_ms: Option<u64>,
    /// Processor bound to this step.
    pub processor_info: ProcessorInfo,
}

impl PipelineStep {
    /// Shorthand for `step_type == StepType::Sink`.
    pub fn is_sink(&self) -> bool {
        self.step_type == StepType::Sink
    }

    /// Shorthand for `step_type == StepType::InitialPipeline`.
    pub fn is_initial(&self) -> bool {
        self.step_type == StepType::InitialPipeline
    }
}

// ---------------------------------------------------------------------------
// PipelineConfiguration
// ---------------------------------------------------------------------------

/// A named directed graph of steps. The map key is the step key used for
/// wiring; insertion order is irrelevant (the map is ordered by key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfiguration {
    /// Pipeline name; the identity of the configuration.
    pub name: String,
    /// Steps keyed by step key.
    #[serde(default)]
    pub steps: BTreeMap<String, PipelineStep>,
}

impl PipelineConfiguration {
    /// Create an empty pipeline with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: BTreeMap::new(),
        }
    }

    /// Look up a step by its map key or by its `step_name`.
    ///
    /// Output targets and internal gRPC references name steps by
    /// `step_name`, which usually matches the map key but is not required
    /// to; both are accepted when resolving references.
    pub fn resolve_step(&self, name: &str) -> Option<&PipelineStep> {
        self.steps
            .get(name)
            .or_else(|| self.steps.values().find(|s| s.step_name == name))
    }

    /// Whether a step with the given key or `step_name` exists.
    pub fn has_step(&self, name: &str) -> bool {
        self.resolve_step(name).is_some()
    }
}
