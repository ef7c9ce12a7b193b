//! Reconciliation of update files against the distribution.
//!
//! An update file is accounted for when the distribution already has a file
//! at the same location or the descriptor declares it as newly added.

use crate::context::RunContext;
use crate::error::{Result, ValidationError};
use crate::path::NormalizedPath;
use log::{debug, trace};

/// Update files with neither a distribution counterpart nor an added-files
/// declaration, in sorted order.
pub fn unsatisfied(context: &RunContext) -> impl Iterator<Item = &NormalizedPath> {
    context.update_files.iter().filter(|path| {
        let in_distribution = context.distribution_files.contains(*path);
        let declared = context.declared_added.contains(*path);
        trace!("{path}: in distribution {in_distribution}, declared added {declared}");
        !in_distribution && !declared
    })
}

/// Check that every update file is accounted for.
///
/// Fails on the first unsatisfied path in sorted order, so repeated runs over
/// the same inputs report the same path.
///
/// # Errors
///
/// Returns [`ValidationError::MissingResource`] if mandatory resources are
/// still pending in `context`, and [`ValidationError::Reconciliation`]
/// naming the first unaccounted update file.
pub fn reconcile(context: &RunContext, descriptor_name: &str) -> Result<()> {
    let missing = context.resources.finalize();
    if !missing.is_empty() {
        return Err(ValidationError::MissingResource { missing });
    }

    let mut violations = unsatisfied(context);
    let Some(first) = violations.next() else {
        debug!(
            "all {} update files are accounted for",
            context.update_files.len()
        );
        return Ok(());
    };
    debug!("{} further unaccounted update files", violations.count());

    Err(ValidationError::Reconciliation {
        path: first.clone(),
        descriptor: descriptor_name.to_owned(),
    })
}
