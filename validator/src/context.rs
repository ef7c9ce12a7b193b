//! Per-run validation state.

use crate::config::ValidatorConfig;
use crate::path::NormalizedPath;
use crate::resources::ResourceManifest;
use std::collections::BTreeSet;

/// Everything one validation run accumulates.
///
/// A context is created at the start of a run, filled by the scanner and
/// the indexer, and read by the reconciliation engine. Nothing in it is
/// shared between runs.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Content files found under the update's content root.
    pub update_files: BTreeSet<NormalizedPath>,
    /// Files found under the distribution root.
    pub distribution_files: BTreeSet<NormalizedPath>,
    /// Paths the update descriptor declares as newly added.
    pub declared_added: BTreeSet<NormalizedPath>,
    /// Reserved resource files not yet seen in the update.
    pub resources: ResourceManifest,
}

impl RunContext {
    /// Start a run with empty file sets and a full resource manifest.
    #[must_use]
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            update_files: BTreeSet::new(),
            distribution_files: BTreeSet::new(),
            declared_added: BTreeSet::new(),
            resources: ResourceManifest::new(&config.resources),
        }
    }
}
