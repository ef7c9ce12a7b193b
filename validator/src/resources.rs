//! Tracking of reserved resource files consumed from an update.
//!
//! A [`ResourceManifest`] starts with every reserved name, loses entries as
//! the scanner meets them, and is inspected once the scan ends. Optional
//! names left behind are reported as notices; mandatory names left behind
//! fail the run.

use crate::config::ResourceNames;
use log::trace;
use std::collections::BTreeMap;

/// Whether a reserved resource file must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Absence fails validation.
    Mandatory,
    /// Absence is reported but tolerated.
    Optional,
}

/// Reserved resource names not yet seen in the update.
#[derive(Debug, Clone)]
pub struct ResourceManifest {
    pending: BTreeMap<String, Requirement>,
}

impl ResourceManifest {
    /// Populate the manifest with every reserved name.
    #[must_use]
    pub fn new(names: &ResourceNames) -> Self {
        let pending = names
            .entries()
            .into_iter()
            .map(|(name, requirement)| (name.to_owned(), requirement))
            .collect();
        Self { pending }
    }

    /// Returns true if `name` is a reserved resource name, seen or not.
    #[must_use]
    pub fn is_reserved(names: &ResourceNames, name: &str) -> bool {
        names.entries().iter().any(|(reserved, _)| *reserved == name)
    }

    /// Mark `name` as present. Unknown or already consumed names are ignored.
    ///
    /// Returns true when the call removed a pending entry.
    pub fn consume(&mut self, name: &str) -> bool {
        let removed = self.pending.remove(name).is_some();
        trace!("resource {name} consumed: {removed}");
        removed
    }

    /// Remove and return optional entries that were never consumed.
    pub fn drain_optional(&mut self) -> Vec<String> {
        let optional: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, requirement)| **requirement == Requirement::Optional)
            .map(|(name, _)| name.clone())
            .collect();
        for name in &optional {
            self.pending.remove(name);
        }
        optional
    }

    /// Names of mandatory entries that were never consumed, in sorted order.
    ///
    /// Empty after a successful scan.
    #[must_use]
    pub fn finalize(&self) -> Vec<String> {
        self.pending
            .iter()
            .filter(|(_, requirement)| **requirement == Requirement::Mandatory)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
