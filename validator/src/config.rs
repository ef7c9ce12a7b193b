//! Validator configuration.
//!
//! Reserved resource names, the content root folder and the required update
//! name prefix are data rather than control flow. [`ValidatorConfig`] carries
//! them into a validation run; the defaults describe the conventional
//! Carbon update layout and can be overridden from a TOML file.

use crate::error::{Result, ValidationError};
use crate::resources::Requirement;
use camino::Utf8Path;
use serde::Deserialize;

/// Configuration for a validation run.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Prefix every update base name must start with.
    pub name_prefix: String,
    /// Folder under the update root that holds installed product files.
    pub content_root: String,
    /// Extension, without the dot, that marks a location as an archive.
    pub archive_extension: String,
    /// Reserved top-level resource file names.
    pub resources: ResourceNames,
}

impl ValidatorConfig {
    /// Parse a configuration from TOML, filling omitted keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConfigParse`] when the TOML is malformed or
    /// contains unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use update_validator::config::ValidatorConfig;
    ///
    /// let config = ValidatorConfig::from_toml_str("content_root = \"contentroot\"\n")
    ///     .expect("valid configuration");
    /// assert_eq!(config.content_root, "contentroot");
    /// assert_eq!(config.name_prefix, "WSO2-CARBON-UPDATE");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|source| ValidationError::ConfigParse { source })
    }

    /// Load configuration from `path`, or return defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConfigRead`] if the file cannot be read and
    /// [`ValidationError::ConfigParse`] if it is not a valid configuration.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path).map_err(|source| {
            ValidationError::ConfigRead {
                path: path.to_owned(),
                source,
            }
        })?;
        Self::from_toml_str(&source)
    }

    /// Returns true when `location` carries the archive extension.
    #[must_use]
    pub fn is_archive(&self, location: &Utf8Path) -> bool {
        location
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.archive_extension))
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            name_prefix: "WSO2-CARBON-UPDATE".to_owned(),
            content_root: "carbon.home".to_owned(),
            archive_extension: "zip".to_owned(),
            resources: ResourceNames::default(),
        }
    }
}

/// File names reserved for update resources.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceNames {
    /// License file (mandatory).
    pub license: String,
    /// Readme file (mandatory).
    pub readme: String,
    /// Update descriptor listing added files (mandatory).
    pub descriptor: String,
    /// Installation instructions (optional).
    pub instructions: String,
    /// "Not a contribution" marker (optional).
    pub not_a_contribution: String,
}

impl ResourceNames {
    /// Every reserved name paired with whether it must be present.
    #[must_use]
    pub fn entries(&self) -> [(&str, Requirement); 5] {
        [
            (self.license.as_str(), Requirement::Mandatory),
            (self.readme.as_str(), Requirement::Mandatory),
            (self.descriptor.as_str(), Requirement::Mandatory),
            (self.instructions.as_str(), Requirement::Optional),
            (self.not_a_contribution.as_str(), Requirement::Optional),
        ]
    }
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self {
            license: "LICENSE.txt".to_owned(),
            readme: "README.txt".to_owned(),
            descriptor: "update-descriptor.yaml".to_owned(),
            instructions: "instructions.txt".to_owned(),
            not_a_contribution: "NOT_A_CONTRIBUTION.txt".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_describe_carbon_layout() {
        let config = ValidatorConfig::default();

        assert_eq!(config.content_root, "carbon.home");
        assert_eq!(config.resources.descriptor, "update-descriptor.yaml");
    }

    #[rstest]
    fn deserialises_resource_overrides() {
        let source = concat!(
            "name_prefix = \"upd\"\n",
            "[resources]\n",
            "readme = \"README.md\"\n",
        );

        let config = ValidatorConfig::from_toml_str(source).expect("valid configuration");

        assert_eq!(config.name_prefix, "upd");
        assert_eq!(config.resources.readme, "README.md");
        assert_eq!(config.resources.license, "LICENSE.txt");
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let outcome = ValidatorConfig::from_toml_str("unexpected = true\n");

        assert!(matches!(outcome, Err(ValidationError::ConfigParse { .. })));
    }

    #[rstest]
    fn load_without_path_returns_defaults() {
        let config = ValidatorConfig::load(None).expect("defaults");
        assert_eq!(config, ValidatorConfig::default());
    }

    #[rstest]
    fn load_reports_missing_file() {
        let outcome = ValidatorConfig::load(Some(Utf8Path::new("/nonexistent/validator.toml")));
        assert!(matches!(outcome, Err(ValidationError::ConfigRead { .. })));
    }

    #[rstest]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("validator.toml");
        std::fs::write(&path, "content_root = \"contentroot\"\n").expect("write config");
        let utf8 = Utf8Path::from_path(&path).expect("utf-8 temp path");

        let config = ValidatorConfig::load(Some(utf8)).expect("valid configuration");

        assert_eq!(config.content_root, "contentroot");
    }

    #[rstest]
    #[case::lower("upd-1.zip", true)]
    #[case::upper("upd-1.ZIP", true)]
    #[case::directory("dist", false)]
    #[case::tarball("dist.tar.gz", false)]
    fn recognises_archive_extension(#[case] location: &str, #[case] expected: bool) {
        let config = ValidatorConfig::default();
        assert_eq!(config.is_archive(Utf8Path::new(location)), expected);
    }

    #[rstest]
    fn mandatory_and_optional_split() {
        let names = ResourceNames::default();
        let mandatory: Vec<_> = names
            .entries()
            .into_iter()
            .filter(|(_, req)| *req == Requirement::Mandatory)
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            mandatory,
            vec!["LICENSE.txt", "README.txt", "update-descriptor.yaml"]
        );
    }
}
