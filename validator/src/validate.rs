//! Validation run orchestration.
//!
//! A run checks the supplied locations, scans the update, indexes the
//! distribution and reconciles the two. The scanner and indexer fill a fresh
//! [`RunContext`]; the run either returns a [`ValidationReport`] or stops at
//! the first error.

use crate::config::ValidatorConfig;
use crate::context::RunContext;
use crate::distribution::{DistributionKind, index_archive, index_directory};
use crate::error::{Result, ValidationError};
use crate::path::package_base_name;
use crate::progress::ProgressObserver;
use crate::reconcile::reconcile;
use crate::scanner::scan_update;
use crate::source::{EntrySource, ZipSource};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

/// Locations supplied for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    /// The update archive.
    pub update: Utf8PathBuf,
    /// The distribution archive or directory.
    pub distribution: Utf8PathBuf,
}

/// Summary of a passed validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Content files found in the update.
    pub update_files: usize,
    /// Files found in the distribution.
    pub distribution_files: usize,
    /// Paths the descriptor declares as added.
    pub declared_added: usize,
    /// Optional resource files the update does not ship.
    pub missing_optional: Vec<String>,
}

/// Where the distribution side of a run comes from.
pub enum DistributionInput<'a> {
    /// Entries of a distribution archive.
    Archive(&'a mut dyn EntrySource),
    /// Root of an extracted distribution.
    Directory(&'a Utf8Path),
}

/// Validate the update and distribution named by `request`.
///
/// # Errors
///
/// Returns [`ValidationError::NotAnArchive`] or
/// [`ValidationError::LocationNotFound`] for unusable locations, and any
/// error raised by [`validate_sources`].
pub fn validate(
    request: &ValidationRequest,
    config: &ValidatorConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<ValidationReport> {
    let update = request.update.as_path();
    debug!("update location: {update}");
    let not_an_archive = || ValidationError::NotAnArchive {
        path: update.to_owned(),
        extension: config.archive_extension.clone(),
    };
    if !config.is_archive(update) {
        return Err(not_an_archive());
    }
    if !update.is_file() {
        return Err(ValidationError::LocationNotFound {
            what: "update file",
            path: update.to_owned(),
        });
    }
    let package_name = package_base_name(update).ok_or_else(not_an_archive)?;
    debug!("update name: {package_name}");

    debug!("distribution location: {}", request.distribution);
    let distribution = DistributionKind::resolve(&request.distribution, config)?;

    let mut update_source = ZipSource::open(update)?;
    match &distribution {
        DistributionKind::Archive(path) => {
            let mut distribution_source = ZipSource::open(path)?;
            validate_sources(
                &mut update_source,
                package_name,
                DistributionInput::Archive(&mut distribution_source),
                config,
                observer,
            )
        }
        DistributionKind::Directory(path) => validate_sources(
            &mut update_source,
            package_name,
            DistributionInput::Directory(path),
            config,
            observer,
        ),
    }
}

/// Validate already opened sources.
///
/// # Errors
///
/// Returns the first error raised while scanning the update, indexing the
/// distribution or reconciling the two.
pub fn validate_sources(
    update: &mut dyn EntrySource,
    package_name: &str,
    distribution: DistributionInput<'_>,
    config: &ValidatorConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<ValidationReport> {
    let mut context = RunContext::new(config);

    let scan = scan_update(update, package_name, config, &mut context, observer)?;
    match distribution {
        DistributionInput::Archive(source) => {
            index_archive(source, &mut context, observer)?;
        }
        DistributionInput::Directory(root) => {
            index_directory(root, &mut context, observer)?;
        }
    }
    reconcile(&context, &config.resources.descriptor)?;

    Ok(ValidationReport {
        update_files: context.update_files.len(),
        distribution_files: context.distribution_files.len(),
        declared_added: context.declared_added.len(),
        missing_optional: scan.missing_optional,
    })
}
