//! Path normalization shared by the update scanner and distribution indexer.
//!
//! Archive entry names and filesystem walk results use different separator
//! conventions and carry different roots. Everything that ends up in a file
//! set goes through [`NormalizedPath`] so that an update file and a
//! distribution file describing the same installed location compare equal.

use crate::error::{Result, ValidationError};
use camino::Utf8Path;
use std::fmt;

/// A root-relative, forward-slash separated path used as a set key.
///
/// Construction is idempotent: building a `NormalizedPath` from the string
/// form of another one yields an equal value.
///
/// # Examples
///
/// ```
/// use update_validator::path::NormalizedPath;
///
/// let path = NormalizedPath::new("\\app\\lib//plugin.jar");
/// assert_eq!(path.as_str(), "app/lib/plugin.jar");
/// assert_eq!(NormalizedPath::new(path.as_str()), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Normalize a raw relative path.
    ///
    /// Backslashes become forward slashes; empty and `.` segments are
    /// dropped, which also removes leading and trailing separators.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let joined = raw
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(joined)
    }

    /// Get the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a raw entry path into its first segment and the remainder.
///
/// Returns `None` when the path has no separator, i.e. the entry sits at the
/// top level of its source with no root folder.
#[must_use]
pub fn split_root(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(['/', '\\'])
}

/// Strip `expected_root` from `raw` and normalize what remains.
///
/// # Errors
///
/// Returns [`ValidationError::Structure`] when `raw` has no root folder or
/// its root folder differs from `expected_root`.
///
/// # Examples
///
/// ```
/// use update_validator::path::normalize;
///
/// let path = normalize("upd-1/carbon.home/app/plugin.jar", "upd-1").expect("valid entry");
/// assert_eq!(path.as_str(), "carbon.home/app/plugin.jar");
/// assert!(normalize("wrong/README.txt", "upd-1").is_err());
/// ```
pub fn normalize(raw: &str, expected_root: &str) -> Result<NormalizedPath> {
    match split_root(raw) {
        Some((root, rest)) if root == expected_root => Ok(NormalizedPath::new(rest)),
        Some((root, _)) => Err(ValidationError::Structure {
            entry: raw.to_owned(),
            expected: expected_root.to_owned(),
            found: Some(root.to_owned()),
        }),
        None => Err(ValidationError::Structure {
            entry: raw.to_owned(),
            expected: expected_root.to_owned(),
            found: None,
        }),
    }
}

/// Derive an archive's base name: its file name without the final extension.
///
/// ```
/// use camino::Utf8Path;
/// use update_validator::path::package_base_name;
///
/// assert_eq!(package_base_name(Utf8Path::new("/tmp/upd-1.zip")), Some("upd-1"));
/// ```
#[must_use]
pub fn package_base_name(location: &Utf8Path) -> Option<&str> {
    location.file_stem()
}
