//! # Pipeward Cluster — Boundary Collaborators
//!
//! The thin shell around the pure validation engine: key/value
//! persistence for pipeline and cluster documents, and the module
//! registry that decides which gRPC processors a cluster may use.
//! Nothing here implements a validation rule; the engine gates, this
//! crate stores and asks.

pub mod registry;
pub mod service;
pub mod store;

pub use registry::{InMemoryModuleRegistry, ModuleRegistry, WhitelistWorkflow};
pub use service::{PipelineConfigService, ServiceError};
pub use store::{InMemoryStore, KeyValueStore, StoreError};
