//! Distribution indexing.
//!
//! A distribution is either an archive with a single root folder or an
//! extracted directory tree. Both produce the same keys: the path of each
//! file relative to the distribution root, normalized exactly like update
//! content paths.

use crate::config::ValidatorConfig;
use crate::context::RunContext;
use crate::error::{Result, ValidationError};
use crate::path::{NormalizedPath, normalize, package_base_name, split_root};
use crate::progress::{Phase, ProgressObserver};
use crate::source::{Entry, EntrySource};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use walkdir::WalkDir;

/// A distribution location, resolved to the way it will be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionKind {
    /// A zip archive holding the distribution under one root folder.
    Archive(Utf8PathBuf),
    /// An extracted distribution directory.
    Directory(Utf8PathBuf),
}

impl DistributionKind {
    /// Decide how `location` should be indexed and check that it exists.
    ///
    /// Locations with the archive extension must be existing files; anything
    /// else must be an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LocationNotFound`] when the location is
    /// missing or has the wrong kind.
    pub fn resolve(location: &Utf8Path, config: &ValidatorConfig) -> Result<Self> {
        if config.is_archive(location) {
            if !location.is_file() {
                return Err(ValidationError::LocationNotFound {
                    what: "distribution zip",
                    path: location.to_owned(),
                });
            }
            debug!("distribution archive {location} exists");
            return Ok(Self::Archive(location.to_owned()));
        }

        if !location.is_dir() {
            return Err(ValidationError::LocationNotFound {
                what: "distribution location",
                path: location.to_owned(),
            });
        }
        debug!("distribution directory {location} exists");
        Ok(Self::Directory(location.to_owned()))
    }
}

/// Index every file of a distribution archive into `context`.
///
/// The root folder is taken from the first entry and stripped from all of
/// them. Returns the number of entries read.
///
/// # Errors
///
/// - [`ValidationError::Structure`] if an entry has no root folder or a root
///   folder different from the first entry's.
/// - [`ValidationError::IncompleteRead`] if the number of entries read
///   differs from the number the archive declared.
/// - [`ValidationError::Io`] and [`ValidationError::Archive`] on read failures.
pub fn index_archive(
    source: &mut dyn EntrySource,
    context: &mut RunContext,
    observer: &mut dyn ProgressObserver,
) -> Result<usize> {
    let declared = source.declared_len();
    let location = source.location().to_owned();
    let fallback_root = package_base_name(Utf8Path::new(&location))
        .unwrap_or(&location)
        .to_owned();
    debug!("reading {declared} entries from {location}");

    let mut root: Option<String> = None;
    let mut processed = 0;
    source.for_each_entry(&mut |entry: Entry<'_>| {
        processed += 1;
        observer.entry_processed(Phase::DistributionArchive, processed, Some(declared));
        trace!("checking entry {}", entry.name);

        let expected = archive_root(&mut root, entry.name, &fallback_root)?;
        let relative = normalize(entry.name, expected)?;
        if !entry.is_dir && !relative.is_empty() {
            trace!("distribution file {relative}");
            context.distribution_files.insert(relative);
        }
        Ok(())
    })?;
    observer.phase_finished(Phase::DistributionArchive, processed);

    if processed != declared {
        return Err(ValidationError::IncompleteRead {
            location,
            processed,
            declared,
        });
    }
    debug!(
        "read {processed} entries; {} distribution files",
        context.distribution_files.len()
    );
    Ok(processed)
}

/// The archive's root folder, fixed by the first entry seen.
fn archive_root<'r>(
    root: &'r mut Option<String>,
    name: &str,
    fallback: &'r str,
) -> Result<&'r str> {
    if root.is_none() {
        let Some((first, _)) = split_root(name) else {
            return Err(ValidationError::Structure {
                entry: name.to_owned(),
                expected: fallback.to_owned(),
                found: None,
            });
        };
        debug!("distribution root folder is {first}");
        *root = Some(first.to_owned());
    }
    Ok(root.as_deref().unwrap_or(fallback))
}

/// Index every file below `root` into `context`.
///
/// Directories are walked but not recorded. Returns the number of walk
/// entries visited, directories included.
///
/// # Errors
///
/// Returns [`ValidationError::Io`] when the walk fails or a path below
/// `root` is not valid UTF-8.
pub fn index_directory(
    root: &Utf8Path,
    context: &mut RunContext,
    observer: &mut dyn ProgressObserver,
) -> Result<usize> {
    let mut processed = 0;
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        processed += 1;
        observer.entry_processed(Phase::DistributionDirectory, processed, None);

        if entry.file_type().is_dir() {
            continue;
        }

        let key = relative_key(root, entry.path())?;
        trace!("distribution file {key}");
        context.distribution_files.insert(key);
    }
    observer.phase_finished(Phase::DistributionDirectory, processed);

    debug!(
        "walked {processed} entries; {} distribution files",
        context.distribution_files.len()
    );
    Ok(processed)
}

/// Join the components below `root` with `/`, whatever the host separator.
fn relative_key(root: &Utf8Path, path: &std::path::Path) -> Result<NormalizedPath> {
    let invalid = |reason: &str| ValidationError::Io {
        path: root.to_owned(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{}: {reason}", path.display()),
        ),
    };
    let utf8 = Utf8Path::from_path(path).ok_or_else(|| invalid("path is not valid UTF-8"))?;
    let relative = utf8
        .strip_prefix(root)
        .map_err(|_| invalid("path is outside the distribution root"))?;
    Ok(NormalizedPath::new(
        &relative.iter().collect::<Vec<_>>().join("/"),
    ))
}

fn walk_error(root: &Utf8Path, err: walkdir::Error) -> ValidationError {
    let path = err
        .path()
        .and_then(|path| Utf8Path::from_path(path))
        .map_or_else(|| root.to_owned(), Utf8Path::to_owned);
    ValidationError::Io {
        path,
        source: err.into(),
    }
}
