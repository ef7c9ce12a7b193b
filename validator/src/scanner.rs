//! Update archive scanner.
//!
//! Walks every entry of an update archive once. Each entry must sit under a
//! root folder named after the update. An entry whose file name is a
//! reserved resource name is a resource wherever it sits; any other file must
//! be under the content root and becomes an update file. The descriptor's
//! added-files list is captured when the descriptor entry goes past.
//!
//! The expected archive layout is:
//! ```text
//! {update}/LICENSE.txt
//! {update}/README.txt
//! {update}/update-descriptor.yaml
//! {update}/{content_root}/path/to/installed/file
//! ```

use crate::config::ValidatorConfig;
use crate::context::RunContext;
use crate::descriptor::parse_descriptor;
use crate::error::{Result, ValidationError};
use crate::path::{NormalizedPath, normalize};
use crate::progress::{Phase, ProgressObserver};
use crate::resources::ResourceManifest;
use crate::source::{Entry, EntrySource};
use camino::Utf8PathBuf;
use log::{debug, info, trace};

/// What a completed scan learned beyond the file sets in [`RunContext`].
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Entries read from the archive, directories included.
    pub entries: usize,
    /// Optional resource files that were absent.
    pub missing_optional: Vec<String>,
}

/// Scan an update archive into `context`.
///
/// `package_name` is the update's base name; every entry must live under a
/// folder of that name, and the name must start with the configured prefix.
///
/// # Errors
///
/// - [`ValidationError::Naming`] if `package_name` lacks the required prefix.
/// - [`ValidationError::Structure`] if an entry is outside the root folder.
/// - [`ValidationError::Layout`] if a non-resource file is outside the
///   content root.
/// - [`ValidationError::ManifestParse`] if the descriptor is malformed.
/// - [`ValidationError::MissingResource`] if mandatory resources are absent.
/// - [`ValidationError::IncompleteRead`] if fewer or more entries were read
///   than the archive declared.
/// - [`ValidationError::Io`] and [`ValidationError::Archive`] on read failures.
pub fn scan_update(
    source: &mut dyn EntrySource,
    package_name: &str,
    config: &ValidatorConfig,
    context: &mut RunContext,
    observer: &mut dyn ProgressObserver,
) -> Result<ScanOutcome> {
    if !package_name.starts_with(&config.name_prefix) {
        return Err(ValidationError::Naming {
            name: package_name.to_owned(),
            prefix: config.name_prefix.clone(),
        });
    }
    debug!("update {package_name} has the {} prefix", config.name_prefix);

    let location = Utf8PathBuf::from(source.location());
    let declared = source.declared_len();
    debug!("reading {declared} entries from {location}");

    let mut outcome = ScanOutcome::default();
    let mut scanner = EntryScanner {
        package_name,
        config,
        context: &mut *context,
        location: &location,
    };
    source.for_each_entry(&mut |entry: Entry<'_>| {
        outcome.entries += 1;
        observer.entry_processed(Phase::UpdateArchive, outcome.entries, Some(declared));
        scanner.visit(entry)
    })?;
    observer.phase_finished(Phase::UpdateArchive, outcome.entries);

    outcome.missing_optional = context.resources.drain_optional();
    for name in &outcome.missing_optional {
        info!("{name} was not found in {location}");
    }

    let missing = context.resources.finalize();
    if !missing.is_empty() {
        return Err(ValidationError::MissingResource { missing });
    }

    if outcome.entries != declared {
        return Err(ValidationError::IncompleteRead {
            location: location.into_string(),
            processed: outcome.entries,
            declared,
        });
    }
    debug!(
        "read {} entries; {} update files, {} declared added",
        outcome.entries,
        context.update_files.len(),
        context.declared_added.len()
    );

    Ok(outcome)
}

struct EntryScanner<'a> {
    package_name: &'a str,
    config: &'a ValidatorConfig,
    context: &'a mut RunContext,
    location: &'a Utf8PathBuf,
}

impl EntryScanner<'_> {
    fn visit(&mut self, entry: Entry<'_>) -> Result<()> {
        trace!("checking entry {}", entry.name);
        let relative = normalize(entry.name, self.package_name)?;

        if entry.is_dir || relative.is_empty() {
            return Ok(());
        }

        let leaf = leaf_name(&relative);
        if ResourceManifest::is_reserved(&self.config.resources, leaf) {
            self.context.resources.consume(leaf);
            if leaf == self.config.resources.descriptor {
                self.read_descriptor(entry)?;
            }
            return Ok(());
        }

        let Some(content) = self.content_path(&relative) else {
            return Err(ValidationError::Layout {
                entry: entry.name.to_owned(),
                expected: format!("{}/{}", self.package_name, self.config.content_root),
            });
        };
        trace!("update file {content}");
        self.context.update_files.insert(content);
        Ok(())
    }

    /// The path below the content root, if `relative` is nested under it.
    fn content_path(&self, relative: &NormalizedPath) -> Option<NormalizedPath> {
        let (first, rest) = relative.as_str().split_once('/')?;
        (first == self.config.content_root && !rest.is_empty()).then(|| NormalizedPath::new(rest))
    }

    fn read_descriptor(&mut self, entry: Entry<'_>) -> Result<()> {
        let mut bytes = Vec::new();
        entry
            .content
            .read_to_end(&mut bytes)
            .map_err(|source| ValidationError::Io {
                path: self.location.join(entry.name),
                source,
            })?;
        let descriptor =
            parse_descriptor(&bytes).map_err(|source| ValidationError::ManifestParse {
                name: self.config.resources.descriptor.clone(),
                source,
            })?;
        debug!("descriptor: {descriptor:?}");

        self.context.declared_added.extend(descriptor.added_paths());
        Ok(())
    }
}

fn leaf_name(path: &NormalizedPath) -> &str {
    path.as_str().rsplit('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{MockProgressObserver, NoProgress};
    use crate::source::MemorySource;
    use rstest::{fixture, rstest};

    const DESCRIPTOR: &str = "file_changes:\n  added_files:\n    - app/new.jar\n";

    #[fixture]
    fn config() -> ValidatorConfig {
        ValidatorConfig {
            name_prefix: "upd".to_owned(),
            content_root: "contentroot".to_owned(),
            ..ValidatorConfig::default()
        }
    }

    fn complete_update() -> MemorySource {
        MemorySource::new("upd-1.zip")
            .with_dir("upd-1")
            .with_file("upd-1/LICENSE.txt", "license")
            .with_file("upd-1/README.txt", "readme")
            .with_file("upd-1/update-descriptor.yaml", DESCRIPTOR)
            .with_file("upd-1/instructions.txt", "steps")
            .with_file("upd-1/NOT_A_CONTRIBUTION.txt", "marker")
            .with_dir("upd-1/contentroot/app")
            .with_file("upd-1/contentroot/app/plugin.jar", "jar")
    }

    fn scan(
        mut source: MemorySource,
        package: &str,
        config: &ValidatorConfig,
    ) -> (Result<ScanOutcome>, RunContext) {
        let mut context = RunContext::new(config);
        let outcome = scan_update(&mut source, package, config, &mut context, &mut NoProgress);
        (outcome, context)
    }

    #[rstest]
    fn collects_content_files_and_added_paths(config: ValidatorConfig) {
        let (outcome, context) = scan(complete_update(), "upd-1", &config);

        let outcome = outcome.expect("scan succeeds");
        assert_eq!(outcome.entries, 8);
        assert!(outcome.missing_optional.is_empty());
        assert_eq!(
            context.update_files.iter().map(NormalizedPath::as_str).collect::<Vec<_>>(),
            vec!["app/plugin.jar"]
        );
        assert!(context.declared_added.contains(&NormalizedPath::new("app/new.jar")));
        assert!(context.resources.finalize().is_empty());
    }

    #[rstest]
    fn rejects_missing_prefix(config: ValidatorConfig) {
        let (outcome, _) = scan(complete_update(), "patch-1", &config);
        assert!(matches!(outcome, Err(ValidationError::Naming { .. })));
    }

    #[rstest]
    fn rejects_wrong_root_folder(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip").with_file("wrong/README.txt", "readme");
        let (outcome, _) = scan(source, "upd-1", &config);

        assert!(matches!(
            outcome,
            Err(ValidationError::Structure { found: Some(ref root), .. }) if root == "wrong"
        ));
    }

    #[rstest]
    fn rejects_content_outside_content_root(config: ValidatorConfig) {
        let source = complete_update().with_file("upd-1/lib/stray.jar", "jar");
        let (outcome, _) = scan(source, "upd-1", &config);

        let err = outcome.expect_err("layout violation");
        assert!(matches!(err, ValidationError::Layout { ref entry, .. } if entry == "upd-1/lib/stray.jar"));
        assert!(err.to_string().contains("upd-1/contentroot/"));
    }

    #[rstest]
    fn content_root_must_be_the_second_segment(config: ValidatorConfig) {
        let source = complete_update().with_file("upd-1/docs/contentroot/a.jar", "jar");
        let (outcome, _) = scan(source, "upd-1", &config);
        assert!(matches!(outcome, Err(ValidationError::Layout { .. })));
    }

    #[rstest]
    fn reserved_name_under_content_root_is_a_resource(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip")
            .with_file("upd-1/LICENSE.txt", "license")
            .with_file("upd-1/update-descriptor.yaml", DESCRIPTOR)
            .with_file("upd-1/contentroot/README.txt", "readme");
        let (outcome, context) = scan(source, "upd-1", &config);

        outcome.expect("scan succeeds");
        assert!(context.update_files.is_empty());
        assert!(context.resources.finalize().is_empty());
    }

    #[rstest]
    fn reserved_name_in_nested_folder_is_a_resource(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip")
            .with_file("upd-1/README.txt", "readme")
            .with_file("upd-1/update-descriptor.yaml", DESCRIPTOR)
            .with_file("upd-1/docs/LICENSE.txt", "license");
        let (outcome, context) = scan(source, "upd-1", &config);

        outcome.expect("scan succeeds");
        assert!(context.update_files.is_empty());
        assert!(context.resources.finalize().is_empty());
    }

    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("truncated entry"))
        }
    }

    struct UnreadableDescriptor;

    impl EntrySource for UnreadableDescriptor {
        fn location(&self) -> &str {
            "upd-1.zip"
        }

        fn declared_len(&self) -> usize {
            1
        }

        fn for_each_entry(
            &mut self,
            visit: &mut dyn FnMut(Entry<'_>) -> Result<()>,
        ) -> Result<()> {
            let mut reader = FailingReader;
            visit(Entry {
                name: "upd-1/update-descriptor.yaml",
                is_dir: false,
                content: &mut reader,
            })
        }
    }

    #[rstest]
    fn surfaces_descriptor_read_failures_as_io(config: ValidatorConfig) {
        let mut context = RunContext::new(&config);
        let outcome = scan_update(
            &mut UnreadableDescriptor,
            "upd-1",
            &config,
            &mut context,
            &mut NoProgress,
        );

        assert!(matches!(
            outcome,
            Err(ValidationError::Io { ref path, .. })
                if path.as_str() == "upd-1.zip/upd-1/update-descriptor.yaml"
        ));
    }

    #[rstest]
    fn lists_every_missing_mandatory_resource(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip")
            .with_file("upd-1/README.txt", "readme")
            .with_file("upd-1/contentroot/app/plugin.jar", "jar");
        let (outcome, _) = scan(source, "upd-1", &config);

        assert!(matches!(
            outcome,
            Err(ValidationError::MissingResource { ref missing })
                if missing == &["LICENSE.txt", "update-descriptor.yaml"]
        ));
    }

    #[rstest]
    fn tolerates_missing_optional_resources(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip")
            .with_file("upd-1/LICENSE.txt", "license")
            .with_file("upd-1/README.txt", "readme")
            .with_file("upd-1/update-descriptor.yaml", "");
        let (outcome, context) = scan(source, "upd-1", &config);

        let outcome = outcome.expect("scan succeeds");
        assert_eq!(
            outcome.missing_optional,
            vec!["NOT_A_CONTRIBUTION.txt", "instructions.txt"]
        );
        assert!(context.declared_added.is_empty());
    }

    #[rstest]
    fn surfaces_descriptor_parse_failures(config: ValidatorConfig) {
        let source = MemorySource::new("upd-1.zip")
            .with_file("upd-1/update-descriptor.yaml", "file_changes: [unclosed\n");
        let (outcome, _) = scan(source, "upd-1", &config);
        assert!(matches!(outcome, Err(ValidationError::ManifestParse { .. })));
    }

    #[rstest]
    fn detects_misreported_entry_count(config: ValidatorConfig) {
        let source = complete_update().with_declared_len(9);
        let (outcome, _) = scan(source, "upd-1", &config);

        assert!(matches!(
            outcome,
            Err(ValidationError::IncompleteRead { processed: 8, declared: 9, .. })
        ));
    }

    #[rstest]
    fn reports_each_entry_to_the_observer(config: ValidatorConfig) {
        let mut observer = MockProgressObserver::new();
        observer
            .expect_entry_processed()
            .withf(|phase, _, total| *phase == Phase::UpdateArchive && *total == Some(8))
            .times(8)
            .return_const(());
        observer
            .expect_phase_finished()
            .withf(|phase, processed| *phase == Phase::UpdateArchive && *processed == 8)
            .times(1)
            .return_const(());

        let mut source = complete_update();
        let mut context = RunContext::new(&config);
        scan_update(&mut source, "upd-1", &config, &mut context, &mut observer)
            .expect("scan succeeds");
    }
}
