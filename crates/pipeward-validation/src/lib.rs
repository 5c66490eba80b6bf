//! # Pipeward Validation — Rule Engine for Pipeline Configurations
//!
//! Pure validation over the [`pipeward_model`] value types. The crate
//! has three layers:
//!
//! - [`ValidationResult`] and [`ValidationMode`] — the accumulator every
//!   rule-checker speaks, and the DESIGN/PRODUCTION strictness switch.
//! - [`ConfigValidator`] and [`ClusterValidator`] — the traits a
//!   rule-checker implements, plus the eleven checkers under
//!   [`validators`] and the mode-aware [`SchemaValidator`].
//! - [`CompositeValidator`] — the engine: runs every checker in
//!   ascending priority order and merges all findings, never stopping
//!   at the first failure.
//!
//! Every validator is a pure function of its input. No I/O, no caches,
//! no ordering dependencies between validators.

pub mod composite;
pub mod result;
pub mod schema;
pub mod validator;
pub mod validators;

pub use composite::CompositeValidator;
pub use result::{ParseModeError, ValidationMode, ValidationResult};
pub use schema::SchemaValidator;
pub use validator::{ClusterValidator, ConfigValidator};
