//! # Pipeline Configuration Service
//!
//! CRUD over pipeline and cluster documents with the validation engine as
//! a gate: nothing with errors is ever persisted. The service owns the
//! key layout (`pipelines/{cluster}/{pipeline}`, `clusters/{cluster}`)
//! and the JSON encoding; every rule lives in the validation crate.

use std::sync::Arc;

use tracing::{info, warn};

use pipeward_model::{PipelineClusterConfiguration, PipelineConfiguration};
use pipeward_validation::{CompositeValidator, ValidationMode, ValidationResult};

use crate::store::{KeyValueStore, StoreError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The document failed validation and was not persisted.
    #[error("configuration is invalid: {} error(s)", .0.errors.len())]
    Invalid(ValidationResult),

    #[error("pipeline '{0}' not found")]
    NotFound(String),

    #[error("pipeline '{0}' already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct PipelineConfigService {
    store: Arc<dyn KeyValueStore>,
    engine: CompositeValidator,
}

impl PipelineConfigService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            engine: CompositeValidator::new(),
        }
    }

    fn pipeline_key(cluster: &str, pipeline: &str) -> String {
        format!("pipelines/{cluster}/{pipeline}")
    }

    fn cluster_key(cluster: &str) -> String {
        format!("clusters/{cluster}")
    }

    /// Gate a pipeline document. Warnings pass through; errors refuse.
    fn gate(
        &self,
        config: &PipelineConfiguration,
        mode: ValidationMode,
    ) -> Result<ValidationResult, ServiceError> {
        let result = self.engine.validate(Some(config), mode);
        if !result.is_valid() {
            warn!(
                pipeline = %config.name,
                errors = result.errors.len(),
                "refusing to persist invalid pipeline configuration"
            );
            return Err(ServiceError::Invalid(result));
        }
        Ok(result)
    }

    /// Create a pipeline document. Fails if the id is already taken or the
    /// document has validation errors. Returns the (possibly warning-
    /// carrying) validation result.
    pub fn create_pipeline(
        &self,
        cluster: &str,
        pipeline_id: &str,
        config: &PipelineConfiguration,
        mode: ValidationMode,
    ) -> Result<ValidationResult, ServiceError> {
        let key = Self::pipeline_key(cluster, pipeline_id);
        if self.store.get(&key)?.is_some() {
            return Err(ServiceError::AlreadyExists(pipeline_id.to_string()));
        }
        let result = self.gate(config, mode)?;
        self.store.put(&key, serde_json::to_vec(config)?)?;
        info!(cluster, pipeline = pipeline_id, "pipeline configuration created");
        Ok(result)
    }

    /// Replace an existing pipeline document, with the same validation gate.
    pub fn update_pipeline(
        &self,
        cluster: &str,
        pipeline_id: &str,
        config: &PipelineConfiguration,
        mode: ValidationMode,
    ) -> Result<ValidationResult, ServiceError> {
        let key = Self::pipeline_key(cluster, pipeline_id);
        if self.store.get(&key)?.is_none() {
            return Err(ServiceError::NotFound(pipeline_id.to_string()));
        }
        let result = self.gate(config, mode)?;
        self.store.put(&key, serde_json::to_vec(config)?)?;
        info!(cluster, pipeline = pipeline_id, "pipeline configuration updated");
        Ok(result)
    }

    pub fn get_pipeline(
        &self,
        cluster: &str,
        pipeline_id: &str,
    ) -> Result<PipelineConfiguration, ServiceError> {
        let key = Self::pipeline_key(cluster, pipeline_id);
        let bytes = self
            .store
            .get(&key)?
            .ok_or_else(|| ServiceError::NotFound(pipeline_id.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Delete a pipeline document; deleting is never gated.
    pub fn delete_pipeline(&self, cluster: &str, pipeline_id: &str) -> Result<(), ServiceError> {
        let key = Self::pipeline_key(cluster, pipeline_id);
        if !self.store.delete(&key)? {
            return Err(ServiceError::NotFound(pipeline_id.to_string()));
        }
        info!(cluster, pipeline = pipeline_id, "pipeline configuration deleted");
        Ok(())
    }

    /// Pipeline ids stored for a cluster, in lexicographic order.
    pub fn list_pipelines(&self, cluster: &str) -> Result<Vec<String>, ServiceError> {
        let prefix = format!("pipelines/{cluster}/");
        Ok(self
            .store
            .list_keys(&prefix)?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    /// Persist a whole cluster document behind the cluster-scope gate.
    pub fn put_cluster(
        &self,
        cluster: &PipelineClusterConfiguration,
        mode: ValidationMode,
    ) -> Result<ValidationResult, ServiceError> {
        let result = self.engine.validate_cluster(Some(cluster), mode);
        if !result.is_valid() {
            warn!(
                cluster = %cluster.cluster_name,
                errors = result.errors.len(),
                "refusing to persist invalid cluster configuration"
            );
            return Err(ServiceError::Invalid(result));
        }
        let key = Self::cluster_key(&cluster.cluster_name);
        self.store.put(&key, serde_json::to_vec(cluster)?)?;
        info!(cluster = %cluster.cluster_name, "cluster configuration stored");
        Ok(result)
    }

    pub fn get_cluster(&self, cluster: &str) -> Result<PipelineClusterConfiguration, ServiceError> {
        let bytes = self
            .store
            .get(&Self::cluster_key(cluster))?
            .ok_or_else(|| ServiceError::NotFound(cluster.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
