//! # pipeward-cli — Command-Line Interface
//!
//! Provides the `pipeward` binary. One subcommand for now:
//!
//! - `pipeward validate <file>` — load a pipeline or cluster document and
//!   run the full validation engine against it.
//!
//! Subcommand handlers live in their own modules and return an exit code;
//! `main.rs` owns argument parsing, tracing setup, and error rendering.

pub mod validate;
