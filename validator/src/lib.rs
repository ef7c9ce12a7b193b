//! Update validator library.
//!
//! This crate checks that every file an update archive installs is accounted
//! for by a product distribution: either the distribution already has a file
//! at the same location or the update descriptor declares it as newly added.
//! It is used by the `update-validator` CLI binary and can be driven
//! programmatically for testing or custom packaging workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Reserved names, content root and name prefix
//! - [`context`] - Per-run file sets and resource tracking
//! - [`descriptor`] - Update descriptor deserialization
//! - [`distribution`] - Distribution indexing from archives or directories
//! - [`error`] - Semantic error types
//! - [`output`] - Banner and notice formatting
//! - [`path`] - Path normalization shared by every file set
//! - [`progress`] - Progress observer hook
//! - [`reconcile`] - Reconciliation of update files against the distribution
//! - [`resources`] - Reserved resource file tracking
//! - [`scanner`] - Update archive scanning
//! - [`source`] - Archive entry sources
//! - [`validate`] - Validation run orchestration

pub mod cli;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod distribution;
pub mod error;
pub mod output;
pub mod path;
pub mod progress;
pub mod reconcile;
pub mod resources;
pub mod scanner;
pub mod source;
pub mod validate;
