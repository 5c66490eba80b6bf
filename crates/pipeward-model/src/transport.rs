//! # Transport Wiring Types
//!
//! How documents move between steps: Kafka topics (with a derived
//! dead-letter topic) or direct gRPC calls. An [`OutputTarget`] couples a
//! target step with exactly one transport configuration, tagged by
//! `transportType` on the wire so a mismatched pair is unrepresentable.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// TransportType
// ---------------------------------------------------------------------------

/// The transport carrying documents to an output's target step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportType {
    #[serde(rename = "KAFKA")]
    Kafka,
    #[serde(rename = "GRPC")]
    Grpc,
}

impl TransportType {
    /// Wire name of the transport type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kafka => "KAFKA",
            Self::Grpc => "GRPC",
        }
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KAFKA" => Ok(Self::Kafka),
            "GRPC" => Ok(Self::Grpc),
            other => Err(ModelError::UnknownTransportType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Kafka
// ---------------------------------------------------------------------------

/// Kafka producer-side configuration for one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaTransportConfig {
    /// Destination topic.
    pub topic: String,
    /// Document field used as the partition key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key_field: Option<String>,
    /// Producer compression codec (none, gzip, snappy, lz4, zstd).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
    /// Producer batch size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i32>,
    /// Producer linger in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linger_ms: Option<i64>,
    /// Free-form producer properties passed through to the Kafka client.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub producer_properties: BTreeMap<String, String>,
}

impl KafkaTransportConfig {
    /// A transport for the given topic with no producer tuning.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            partition_key_field: None,
            compression_type: None,
            batch_size: None,
            linger_ms: None,
            producer_properties: BTreeMap::new(),
        }
    }

    /// Dead-letter topic for failed messages.
    ///
    /// Always derived from the primary topic and never independently
    /// settable, so a correctly named source topic can never produce a
    /// malformed DLQ topic.
    pub fn dlq_topic(&self) -> String {
        format!("{}.dlq", self.topic)
    }
}

/// One Kafka input feeding a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaInputDefinition {
    /// Topics to subscribe to.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Consumer group identifier.
    pub consumer_group_id: String,
    /// Free-form consumer properties passed through to the Kafka client.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub consumer_properties: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// gRPC
// ---------------------------------------------------------------------------

/// gRPC client configuration for one output.
///
/// `properties` is free-form; the keys `timeout` and `retry` are
/// interpreted as integers by the validation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcTransportConfig {
    /// Target service name: a step name for in-cluster routing, or a
    /// dotted FQDN for an external service.
    pub service_name: String,
    /// Free-form call properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl GrpcTransportConfig {
    /// A transport for the given service with no call properties.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Whether the service name is an external dotted FQDN rather than an
    /// in-cluster step reference.
    pub fn is_external(&self) -> bool {
        self.service_name.contains('.')
    }
}

// ---------------------------------------------------------------------------
// OutputTarget
// ---------------------------------------------------------------------------

/// Transport configuration tagged by `transportType`.
///
/// The wire form carries the tag plus the matching config object
/// (`kafkaTransport` or `grpcTransport`); the other is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transportType")]
pub enum TransportConfig {
    #[serde(rename = "KAFKA")]
    Kafka {
        #[serde(rename = "kafkaTransport")]
        kafka_transport: KafkaTransportConfig,
    },
    #[serde(rename = "GRPC")]
    Grpc {
        #[serde(rename = "grpcTransport")]
        grpc_transport: GrpcTransportConfig,
    },
}

impl TransportConfig {
    /// The tag for this transport.
    pub fn transport_type(&self) -> TransportType {
        match self {
            Self::Kafka { .. } => TransportType::Kafka,
            Self::Grpc { .. } => TransportType::Grpc,
        }
    }

    /// The Kafka configuration, if this is a Kafka transport.
    pub fn kafka(&self) -> Option<&KafkaTransportConfig> {
        match self {
            Self::Kafka { kafka_transport } => Some(kafka_transport),
            Self::Grpc { .. } => None,
        }
    }

    /// The gRPC configuration, if this is a gRPC transport.
    pub fn grpc(&self) -> Option<&GrpcTransportConfig> {
        match self {
            Self::Grpc { grpc_transport } => Some(grpc_transport),
            Self::Kafka { .. } => None,
        }
    }
}

/// A named output of a step: where documents go next and over what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTarget {
    /// Step receiving the documents.
    pub target_step_name: String,
    /// Transport carrying them there.
    #[serde(flatten)]
    pub transport: TransportConfig,
}

impl OutputTarget {
    /// A Kafka output to the given step over the given topic.
    pub fn kafka(target_step_name: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            target_step_name: target_step_name.into(),
            transport: TransportConfig::Kafka {
                kafka_transport: KafkaTransportConfig::new(topic),
            },
        }
    }

    /// A gRPC output to the given step via the given service.
    pub fn grpc(target_step_name: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            target_step_name: target_step_name.into(),
            transport: TransportConfig::Grpc {
                grpc_transport: GrpcTransportConfig::new(service_name),
            },
        }
    }
}
