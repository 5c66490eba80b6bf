//! # Cluster Configuration
//!
//! A cluster groups the pipelines deployed together, the processing
//! modules they may reference, and the Kafka/gRPC allow-lists the
//! operator has whitelisted for the cluster.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineConfiguration;

/// A processing module registered for use by a cluster's pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineModuleConfiguration {
    /// Display name of the module implementation.
    pub implementation_name: String,
    /// Stable identifier of the module implementation.
    pub implementation_id: String,
}

/// Configuration for one cluster: its pipeline graph, module map, and
/// transport allow-lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineClusterConfiguration {
    /// Cluster name; the identity of the configuration.
    pub cluster_name: String,
    /// Pipelines keyed by pipeline id.
    #[serde(default)]
    pub pipeline_graph_config: BTreeMap<String, PipelineConfiguration>,
    /// Modules available to this cluster, keyed by module id.
    #[serde(default)]
    pub pipeline_module_map: BTreeMap<String, PipelineModuleConfiguration>,
    /// Pipeline that receives documents when none is named explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_pipeline_name: Option<String>,
    /// Kafka topics the cluster is allowed to produce to or consume from.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub allowed_kafka_topics: BTreeSet<String>,
    /// gRPC services the cluster is allowed to call.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub allowed_grpc_services: BTreeSet<String>,
}

impl PipelineClusterConfiguration {
    /// Create an empty cluster configuration with the given name.
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            pipeline_graph_config: BTreeMap::new(),
            pipeline_module_map: BTreeMap::new(),
            default_pipeline_name: None,
            allowed_kafka_topics: BTreeSet::new(),
            allowed_grpc_services: BTreeSet::new(),
        }
    }
}
