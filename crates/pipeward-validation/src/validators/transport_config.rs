//! Transport configuration content checks: legal producer tuning on the
//! Kafka side, sane call properties on the gRPC side.

use pipeward_model::{
    GrpcTransportConfig, KafkaTransportConfig, PipelineConfiguration, TransportConfig,
};

use crate::result::{ValidationMode, ValidationResult};
use crate::validator::ConfigValidator;

/// Compression codecs the platform's producers accept.
const ALLOWED_COMPRESSION: [&str; 5] = ["none", "gzip", "snappy", "lz4", "zstd"];

pub struct TransportConfigValidator;

impl ConfigValidator for TransportConfigValidator {
    fn name(&self) -> &'static str {
        "transport_config"
    }

    fn priority(&self) -> u32 {
        350
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
                if input.topics.is_empty() {
                    result.add_error(format!("step '{name}': Kafka input has no topics"));
                }
                for topic in &input.topics {
                    if topic.trim().is_empty() {
                        result.add_error(format!(
                            "step '{name}': Kafka input contains a blank topic"
                        ));
                    }
                }
            }

            for (output_name, target) in &step.outputs {
                match &target.transport {
                    TransportConfig::Kafka { kafka_transport } => {
                        check_kafka_output(&mut result, name, output_name, kafka_transport);
                    }
                    TransportConfig::Grpc { grpc_transport } => {
                        check_grpc_output(&mut result, name, output_name, grpc_transport);
                    }
                }
            }
        }

        result
    }
}

fn check_kafka_output(
    result: &mut ValidationResult,
    step: &str,
    output: &str,
    kafka: &KafkaTransportConfig,
) {
    if kafka.topic.trim().is_empty() {
        result.add_error(format!("step '{step}' output '{output}': Kafka topic is blank"));
    }
    if let Some(batch) = kafka.batch_size {
        if batch < 1 {
            result.add_error(format!(
                "step '{step}' output '{output}': batchSize must be at least 1 (was {batch})"
            ));
        }
    }
    if let Some(linger) = kafka.linger_ms {
        if linger < 0 {
            result.add_error(format!(
                "step '{step}' output '{output}': lingerMs must not be negative (was {linger})"
            ));
        }
    }
    if let Some(compression) = kafka.compression_type.as_deref() {
        if !ALLOWED_COMPRESSION.contains(&compression) {
            result.add_error(format!(
                "step '{step}' output '{output}': compressionType '{compression}' is not supported (allowed: {})",
                ALLOWED_COMPRESSION.join(", ")
            ));
        }
    }
}

fn check_grpc_output(
    result: &mut ValidationResult,
    step: &str,
    output: &str,
    grpc: &GrpcTransportConfig,
) {
    if grpc.service_name.trim().is_empty() {
        result.add_error(format!(
            "step '{step}' output '{output}': gRPC serviceName is blank"
        ));
    }

    if let Some(timeout) = grpc.properties.get("timeout") {
        if timeout.parse::<i64>().is_err() {
            result.add_error(format!(
                "step '{step}' output '{output}': gRPC property 'timeout' must be an integer (was '{timeout}')"
            ));
        }
    }

    if let Some(retry) = grpc.properties.get("retry") {
        match retry.parse::<i64>() {
            Err(_) => result.add_error(format!(
                "step '{step}' output '{output}': gRPC property 'retry' must be an integer (was '{retry}')"
            )),
            Ok(n) if n < 0 => result.add_error(format!(
                "step '{step}' output '{output}': gRPC property 'retry' must not be negative (was {n})"
            )),
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::{kafka_input, pipeline, step, with_output};
    use pipeward_model::{OutputTarget, StepType, TransportConfig};

    fn run(config: &PipelineConfiguration) -> ValidationResult {
        TransportConfigValidator.validate(Some(config), ValidationMode::Production)
    }

    fn kafka_output_with(
        f: impl FnOnce(&mut KafkaTransportConfig),
    ) -> PipelineConfiguration {
        let mut kafka = KafkaTransportConfig::new("search.indexer.input");
        f(&mut kafka);
        let s = with_output(
            step("parser", StepType::Pipeline),
            "default",
            OutputTarget {
                target_step_name: "indexer".to_string(),
                transport: TransportConfig::Kafka {
                    kafka_transport: kafka,
                },
            },
        );
        pipeline("search", vec![s, step("indexer", StepType::Sink)])
    }

    fn grpc_output_with(f: impl FnOnce(&mut GrpcTransportConfig)) -> PipelineConfiguration {
        let mut grpc = GrpcTransportConfig::new("indexer");
        f(&mut grpc);
        let s = with_output(
            step("parser", StepType::Pipeline),
            "default",
            OutputTarget {
                target_step_name: "indexer".to_string(),
                transport: TransportConfig::Grpc {
                    grpc_transport: grpc,
                },
            },
        );
        pipeline("search", vec![s, step("indexer", StepType::Sink)])
    }

    #[test]
    fn null_configuration_is_valid() {
        assert!(TransportConfigValidator
            .validate(None, ValidationMode::Production)
            .is_valid());
    }

    #[test]
    fn kafka_input_without_topics_is_an_error() {
        let mut s = step("parser", StepType::Pipeline);
        s.kafka_inputs.push(kafka_input(&[], "search.parser"));
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.errors[0].contains("Kafka input has no topics"));
    }

    #[test]
    fn blank_input_topic_is_an_error() {
        let mut s = step("parser", StepType::Pipeline);
        s.kafka_inputs.push(kafka_input(&["  "], "search.parser"));
        let config = pipeline("search", vec![s]);
        let result = run(&config);
        assert!(result.errors[0].contains("blank topic"));
    }

    #[test]
    fn blank_output_topic_is_an_error() {
        let config = kafka_output_with(|k| k.topic = String::new());
        let result = run(&config);
        assert!(result.errors[0].contains("Kafka topic is blank"));
    }

    #[test]
    fn zero_batch_size_is_an_error() {
        let config = kafka_output_with(|k| k.batch_size = Some(0));
        let result = run(&config);
        assert!(result.errors[0].contains("batchSize must be at least 1 (was 0)"));
    }

    #[test]
    fn negative_linger_is_an_error() {
        let config = kafka_output_with(|k| k.linger_ms = Some(-5));
        let result = run(&config);
        assert!(result.errors[0].contains("lingerMs must not be negative (was -5)"));
    }

    #[test]
    fn unknown_compression_codec_is_an_error() {
        let config = kafka_output_with(|k| k.compression_type = Some("brotli".to_string()));
        let result = run(&config);
        assert!(result.errors[0].contains("compressionType 'brotli' is not supported"));
    }

    #[test]
    fn every_allowed_codec_passes() {
        for codec in ALLOWED_COMPRESSION {
            let config = kafka_output_with(|k| k.compression_type = Some(codec.to_string()));
            assert!(run(&config).is_valid(), "codec {codec} should pass");
        }
    }

    #[test]
    fn blank_grpc_service_is_an_error() {
        let config = grpc_output_with(|g| g.service_name = String::new());
        let result = run(&config);
        assert!(result.errors[0].contains("gRPC serviceName is blank"));
    }

    #[test]
    fn non_integer_timeout_property_is_an_error() {
        let config = grpc_output_with(|g| {
            g.properties.insert("timeout".to_string(), "fast".to_string());
        });
        let result = run(&config);
        assert!(result.errors[0].contains("'timeout' must be an integer (was 'fast')"));
    }

    #[test]
    fn negative_retry_property_is_an_error() {
        let config = grpc_output_with(|g| {
            g.properties.insert("retry".to_string(), "-1".to_string());
        });
        let result = run(&config);
        assert!(result.errors[0].contains("'retry' must not be negative (was -1)"));
    }

    #[test]
    fn well_formed_properties_pass() {
        let config = grpc_output_with(|g| {
            g.properties.insert("timeout".to_string(), "5000".to_string());
            g.properties.insert("retry".to_string(), "3".to_string());
            g.properties
                .insert("loadBalancing".to_string(), "round_robin".to_string());
        });
        assert!(run(&config).is_valid());
    }
}
