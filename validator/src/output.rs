//! Output formatting for the validator CLI.
//!
//! These helpers build the banners and notices the binary prints; they do
//! no I/O themselves so the exact text can be tested.

use crate::error::ValidationError;
use crate::validate::ValidationReport;

/// Banner printed when validation passes.
pub const SUCCESS_BANNER: &str = "[INFO] Validation SUCCESSFUL";

/// Banner printed when validation fails.
pub const FAILURE_BANNER: &str = "Validation FAILED";

/// Informational notices for optional resources the update does not ship.
///
/// # Example
///
/// ```
/// use update_validator::output::optional_resource_notices;
///
/// let notices = optional_resource_notices(&["instructions.txt".to_owned()]);
/// assert_eq!(notices, vec!["[INFO] instructions.txt was not found in the update zip file."]);
/// ```
#[must_use]
pub fn optional_resource_notices(missing: &[String]) -> Vec<String> {
    missing
        .iter()
        .map(|name| format!("[INFO] {name} was not found in the update zip file."))
        .collect()
}

/// Full text printed on success: notices, a blank line, then the banner.
#[must_use]
pub fn success_message(report: &ValidationReport) -> String {
    let mut lines = optional_resource_notices(&report.missing_optional);
    lines.push(String::new());
    lines.push(SUCCESS_BANNER.to_owned());
    lines.join("\n")
}

/// Full text printed on failure: the violation, a blank line, then the banner.
#[must_use]
pub fn failure_message(err: &ValidationError) -> String {
    format!("[ERROR] {err}\n\n{FAILURE_BANNER}")
}

/// One-line summary of the sets a passed run compared.
#[must_use]
pub fn summary_line(report: &ValidationReport) -> String {
    let plural = |count: usize| if count == 1 { "file" } else { "files" };
    format!(
        "{} update {}, {} distribution {}, {} declared added",
        report.update_files,
        plural(report.update_files),
        report.distribution_files,
        plural(report.distribution_files),
        report.declared_added
    )
}
