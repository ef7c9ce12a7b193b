//! Error types for update validation.
//!
//! Every variant is fatal: a validation run stops at the first error it
//! returns. Each variant names the offending path, name or count so the
//! message printed by the CLI is enough to locate the problem.

use crate::path::NormalizedPath;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while validating an update archive.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// An entry is not nested under the expected root folder.
    #[error("'{entry}' should be in the '{expected}' root folder{}", found_suffix(.found.as_deref()))]
    Structure {
        /// Raw path of the offending entry.
        entry: String,
        /// Root folder the entry should have been in.
        expected: String,
        /// Root folder the entry was actually found in, if it had one.
        found: Option<String>,
    },

    /// The update's base name lacks the required prefix.
    #[error("update file '{name}' does not have the '{prefix}' prefix")]
    Naming {
        /// Base name of the update archive.
        name: String,
        /// Prefix every update name must start with.
        prefix: String,
    },

    /// A non-resource entry lies outside the content root.
    #[error("'{entry}' is not a known resource file; it should be in the '{expected}/' folder")]
    Layout {
        /// Raw path of the offending entry.
        entry: String,
        /// Folder that content entries must live under.
        expected: String,
    },

    /// One or more mandatory resource files were not found.
    #[error("following resource file(s) were not found in the update: {}", .missing.join(", "))]
    MissingResource {
        /// Names of the absent mandatory resource files.
        missing: Vec<String>,
    },

    /// The number of entries read differs from the number the source declared.
    #[error("not all entries were read from {location}: read {processed} of {declared}")]
    IncompleteRead {
        /// Archive that was being read.
        location: String,
        /// Entries actually processed.
        processed: usize,
        /// Entries the archive's directory declared.
        declared: usize,
    },

    /// The update descriptor could not be parsed.
    #[error("failed to parse {name}: {source}")]
    ManifestParse {
        /// File name of the descriptor.
        name: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An update file has no distribution counterpart and is not declared added.
    #[error(
        "/{path} not found in distribution and it is not a newly added file; \
         if it is a new file, add an entry for it in {descriptor}"
    )]
    Reconciliation {
        /// Update file that could not be matched.
        path: NormalizedPath,
        /// File name of the descriptor that lists added files.
        descriptor: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read when the failure occurred.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The zip layer could not open or read an archive.
    #[error("failed to read archive {path}: {source}")]
    Archive {
        /// Archive being read.
        path: Utf8PathBuf,
        /// Underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// The update location does not have the archive extension.
    #[error("update file {path} should be a .{extension} file")]
    NotAnArchive {
        /// Supplied update location.
        path: Utf8PathBuf,
        /// Required extension, without the dot.
        extension: String,
    },

    /// A supplied location does not exist.
    #[error("{what} {path} does not exist; enter a valid location")]
    LocationNotFound {
        /// Human-readable description of the location.
        what: &'static str,
        /// Supplied location.
        path: Utf8PathBuf,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        /// Configuration file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::ValidatorConfig`].
    #[error("invalid configuration: {source}")]
    ConfigParse {
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

fn found_suffix(found: Option<&str>) -> String {
    match found {
        Some(root) => format!(", but it is in the '{root}' folder"),
        None => String::new(),
    }
}

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;
