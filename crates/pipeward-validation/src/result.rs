//! # Validation Verdicts
//!
//! [`ValidationResult`] aggregates the findings of one or more validators:
//! errors invalidate the configuration, warnings do not. Violations are
//! data, never control flow — no validator raises an error for a business
//! rule, it records one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ValidationMode
// ---------------------------------------------------------------------------

/// Strictness regime for a validation run.
///
/// `Design` is used while an operator is interactively building a
/// pipeline; `Production` is the gate before activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationMode {
    Design,
    Production,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Design => f.write_str("DESIGN"),
            Self::Production => f.write_str("PRODUCTION"),
        }
    }
}

/// Error returned when a mode string is unrecognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown validation mode: {0} (expected design or production)")]
pub struct ParseModeError(String);

impl FromStr for ValidationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "design" => Ok(Self::Design),
            "production" => Ok(Self::Production),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The outcome of running one or more validators over a configuration.
///
/// Validity is derived state: a result is valid exactly when `errors` is
/// empty. There is no stored flag to drift out of sync, and no third
/// severity beyond error and warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Findings that invalidate the configuration, in validator priority
    /// order.
    pub errors: Vec<String>,
    /// Informational findings; the configuration remains valid.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty, valid result.
    pub fn new() -> Self {
        Self::default()
    }

    /// A result carrying a single error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            warnings: Vec::new(),
        }
    }

    /// Whether the configuration passed: no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Fold another result into this one, concatenating both lists.
    ///
    /// Merge is associative, so a set of results folded left-to-right in
    /// priority order yields a deterministic ordering of findings.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() && self.warnings.is_empty() {
            f.write_str("valid")
        } else if self.is_valid() {
            write!(f, "valid with {} warning(s)", self.warnings.len())
        } else {
            write!(
                f,
                "invalid: {} error(s), {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}
