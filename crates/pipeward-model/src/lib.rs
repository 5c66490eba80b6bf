//! # pipeward-model — Pipeline Configuration Value Model
//!
//! Immutable data structures describing a pipeline graph: a named set of
//! steps wired together by Kafka topics or gRPC calls, plus the cluster
//! configuration that groups pipelines and their processing modules.
//!
//! ## Design
//!
//! - Every type is plain data with public fields, created once per
//!   configuration change and never mutated afterwards. A change produces
//!   a new instance that is re-validated from scratch.
//! - Mutually-exclusive fields ([`ProcessorInfo`]'s gRPC-vs-bean,
//!   [`OutputTarget`]'s transport-type-vs-config) are tagged unions, so
//!   illegal combinations are unrepresentable. The validation engine in
//!   `pipeward-validation` only judges content quality, never presence.
//! - Wire names are camelCase: configuration documents are authored as
//!   JSON or YAML by the control plane and its operators.
//! - Maps are `BTreeMap` so iteration order (and therefore validator
//!   output ordering) is deterministic.

pub mod cluster;
pub mod error;
pub mod pipeline;
pub mod transport;

// Re-export primary types.
pub use cluster::{PipelineClusterConfiguration, PipelineModuleConfiguration};
pub use error::ModelError;
pub use pipeline::{PipelineConfiguration, PipelineStep, ProcessorInfo, StepType};
pub use transport::{
    GrpcTransportConfig, KafkaInputDefinition, KafkaTransportConfig, OutputTarget,
    TransportConfig, TransportType,
};
