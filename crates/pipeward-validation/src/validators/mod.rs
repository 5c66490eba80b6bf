//! # The Validator Set
//!
//! One file per rule-checker. Priorities are fixed and spaced out so new
//! validators can slot in without renumbering:
//!
//! | Validator | Priority |
//! |---|---|
//! | [`RequiredFieldsValidator`] | 10 |
//! | [`KafkaTopicNamingValidator`] | 50 |
//! | [`RetryConfigValidator`] | 70 |
//! | [`OutputRoutingValidator`] | 80 |
//! | [`InterPipelineLoopValidator`] (cluster-level) | 100 |
//! | [`NamingConventionValidator`] | 200 |
//! | [`ProcessorInfoValidator`] | 250 |
//! | [`StepTypeValidator`] | 300 |
//! | [`TransportConfigValidator`] | 350 |
//! | [`StepReferenceValidator`] | 400 |
//! | [`IntraPipelineLoopValidator`] | 600 |

mod inter_pipeline_loop;
mod intra_pipeline_loop;
mod kafka_topic_naming;
mod naming_convention;
mod output_routing;
mod processor_info;
mod required_fields;
mod retry_config;
mod step_reference;
mod step_type;
mod transport_config;

pub use inter_pipeline_loop::InterPipelineLoopValidator;
pub use intra_pipeline_loop::IntraPipelineLoopValidator;
pub use kafka_topic_naming::KafkaTopicNamingValidator;
pub use naming_convention::NamingConventionValidator;
pub use output_routing::OutputRoutingValidator;
pub use processor_info::ProcessorInfoValidator;
pub use required_fields::RequiredFieldsValidator;
pub use retry_config::RetryConfigValidator;
pub use step_reference::StepReferenceValidator;
pub use step_type::StepTypeValidator;
pub use transport_config::TransportConfigValidator;

use crate::validator::{ClusterValidator, ConfigValidator};

/// The full pipeline-level validator set, unsorted. The composite sorts
/// by priority when it is built.
pub fn default_validators() -> Vec<Box<dyn ConfigValidator>> {
    vec![
        Box::new(RequiredFieldsValidator),
        Box::new(KafkaTopicNamingValidator),
        Box::new(RetryConfigValidator),
        Box::new(OutputRoutingValidator),
        Box::new(NamingConventionValidator),
        Box::new(ProcessorInfoValidator),
        Box::new(StepTypeValidator),
        Box::new(TransportConfigValidator),
        Box::new(StepReferenceValidator),
        Box::new(IntraPipelineLoopValidator),
    ]
}

/// The cluster-level validator set.
pub fn default_cluster_validators() -> Vec<Box<dyn ClusterValidator>> {
    vec![Box::new(InterPipelineLoopValidator)]
}
