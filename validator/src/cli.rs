//! CLI argument definitions for the update validator.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::validate::ValidationRequest;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Validate an update archive against a product distribution.
#[derive(Parser, Debug)]
#[command(name = "update-validator")]
#[command(version, about)]
#[command(long_about = concat!(
    "Validate an update archive against a product distribution.\n\n",
    "Every file the update installs must either already exist in the ",
    "distribution or be listed under file_changes.added_files in the update ",
    "descriptor. The update must also follow the expected layout: a root ",
    "folder named after the update, the mandatory resource files, and all ",
    "installed files under the content root folder.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Validate against an extracted distribution:\n",
    "    $ update-validator WSO2-CARBON-UPDATE-4.4.0-0001.zip /opt/wso2am-2.0.0\n\n",
    "  Validate against a distribution archive with debug logs:\n",
    "    $ update-validator --debug WSO2-CARBON-UPDATE-4.4.0-0001.zip wso2am-2.0.0.zip\n\n",
    "  Use a custom layout:\n",
    "    $ update-validator --config validator.toml upd-1.zip dist/",
))]
pub struct Cli {
    /// Update archive to validate.
    #[arg(value_name = "UPDATE")]
    pub update: Utf8PathBuf,

    /// Distribution archive or directory to validate against.
    #[arg(value_name = "DISTRIBUTION")]
    pub distribution: Utf8PathBuf,

    /// Enable debug logs.
    #[arg(short, long, conflicts_with = "trace")]
    pub debug: bool,

    /// Enable trace logs.
    #[arg(short, long)]
    pub trace: bool,

    /// TOML file overriding resource names, prefix and content root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,
}

impl Cli {
    /// Log level implied by the verbosity flags; warnings only by default.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Whether a progress line should be drawn.
    ///
    /// Progress is suppressed while debug or trace logs are written so the
    /// two never interleave.
    #[must_use]
    pub fn shows_progress(&self) -> bool {
        !self.debug && !self.trace
    }

    /// The locations to validate.
    #[must_use]
    pub fn request(&self) -> ValidationRequest {
        ValidationRequest {
            update: self.update.clone(),
            distribution: self.distribution.clone(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
