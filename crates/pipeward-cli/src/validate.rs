//! # Validate Subcommand
//!
//! Loads a pipeline (or cluster) document from a YAML or JSON file, runs
//! the full validation engine, and prints every finding. Exit code 0
//! means no errors; warnings alone do not fail the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use pipeward_model::{PipelineClusterConfiguration, PipelineConfiguration};
use pipeward_validation::{CompositeValidator, ValidationMode, ValidationResult};

/// Arguments for the `pipeward validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the pipeline configuration file (.yaml, .yml, or .json).
    pub file: PathBuf,

    /// Validation mode: design or production.
    #[arg(long, default_value = "design")]
    pub mode: String,

    /// Treat the file as a whole cluster document instead of one pipeline.
    #[arg(long)]
    pub cluster: bool,
}

pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mode: ValidationMode = args
        .mode
        .parse()
        .with_context(|| format!("invalid --mode '{}'", args.mode))?;

    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let engine = CompositeValidator::new();
    let result = if args.cluster {
        let cluster: PipelineClusterConfiguration = parse_document(&args.file, &contents)?;
        tracing::info!(cluster = %cluster.cluster_name, %mode, "validating cluster configuration");
        engine.validate_cluster(Some(&cluster), mode)
    } else {
        let config: PipelineConfiguration = parse_document(&args.file, &contents)?;
        tracing::info!(pipeline = %config.name, %mode, "validating pipeline configuration");
        engine.validate(Some(&config), mode)
    };

    print_report(&result);
    Ok(if result.is_valid() { 0 } else { 1 })
}

/// Deserialize by extension: `.json` is JSON, everything else is YAML.
fn parse_document<T: serde::de::DeserializeOwned>(path: &Path, contents: &str) -> Result<T> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(contents)
            .with_context(|| format!("{} is not a valid JSON document", path.display()))
    } else {
        serde_yaml::from_str(contents)
            .with_context(|| format!("{} is not a valid YAML document", path.display()))
    }
}

fn print_report(result: &ValidationResult) {
    for error in &result.errors {
        println!("error: {error}");
    }
    for warning in &result.warnings {
        println!("warning: {warning}");
    }
    println!("{result}");
}
