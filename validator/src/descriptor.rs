//! Update descriptor deserialization.
//!
//! The descriptor is a YAML document shipped inside every update. Only its
//! `file_changes.added_files` list affects validation; the remaining known
//! fields are read for diagnostics and unknown keys are ignored.

use crate::path::NormalizedPath;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Parsed update descriptor.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateDescriptor {
    /// Update sequence number, e.g. `0001`.
    pub update_number: Option<String>,
    /// Platform version the update targets.
    pub platform_version: Option<String>,
    /// Platform name the update targets.
    pub platform_name: Option<String>,
    /// Products the update applies to.
    pub applies_to: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Files touched by the update.
    pub file_changes: FileChanges,
}

/// The descriptor's `file_changes` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileChanges {
    /// Files the update introduces; they need no distribution counterpart.
    #[serde(deserialize_with = "null_as_empty")]
    pub added_files: Vec<String>,
    /// Files the update removes.
    #[serde(deserialize_with = "null_as_empty")]
    pub removed_files: Vec<String>,
    /// Files the update replaces.
    #[serde(deserialize_with = "null_as_empty")]
    pub modified_files: Vec<String>,
}

// A bare `added_files:` key is an empty list, not an error.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl UpdateDescriptor {
    /// The added-files list as normalized set keys.
    #[must_use]
    pub fn added_paths(&self) -> BTreeSet<NormalizedPath> {
        self.file_changes
            .added_files
            .iter()
            .map(|raw| NormalizedPath::new(raw))
            .collect()
    }
}

/// Parse descriptor bytes.
///
/// An empty document yields a descriptor with no added files.
///
/// # Errors
///
/// Returns the YAML error when the document is malformed or a known field
/// has the wrong shape.
///
/// # Examples
///
/// ```
/// use update_validator::descriptor::parse_descriptor;
///
/// let yaml = b"file_changes:\n  added_files:\n    - app/new.jar\n";
/// let descriptor = parse_descriptor(yaml).expect("valid descriptor");
/// assert_eq!(descriptor.file_changes.added_files, vec!["app/new.jar"]);
/// ```
pub fn parse_descriptor(bytes: &[u8]) -> Result<UpdateDescriptor, serde_yaml::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateDescriptor::default());
    }
    serde_yaml::from_slice(bytes)
}
