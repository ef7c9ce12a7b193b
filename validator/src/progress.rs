//! Progress reporting hook for long archive and directory reads.
//!
//! The scanner and indexer report each processed entry to a
//! [`ProgressObserver`]. Observers are a pure side channel: nothing they do
//! can change the outcome of a validation run.

use std::fmt;
use std::io::Write;

/// The read currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the update archive.
    UpdateArchive,
    /// Reading a distribution archive.
    DistributionArchive,
    /// Walking a distribution directory.
    DistributionDirectory,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UpdateArchive => "update zip",
            Self::DistributionArchive => "distribution zip",
            Self::DistributionDirectory => "distribution directory",
        };
        f.write_str(label)
    }
}

/// Receives progress notifications.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressObserver {
    /// Called after each entry; `total` is `None` when the source has no
    /// declared size.
    fn entry_processed(&mut self, phase: Phase, processed: usize, total: Option<usize>);

    /// Called once when `phase` has read every entry.
    fn phase_finished(&mut self, phase: Phase, processed: usize);
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn entry_processed(&mut self, _phase: Phase, _processed: usize, _total: Option<usize>) {}

    fn phase_finished(&mut self, _phase: Phase, _processed: usize) {}
}

/// Observer that redraws a single counter line on a terminal stream.
///
/// A line left open by an interrupted phase is ended when the observer is
/// dropped, so later output starts on a fresh line.
pub struct ProgressLine<W: Write> {
    out: W,
    line_open: bool,
}

impl<W: Write> ProgressLine<W> {
    /// Draw progress onto `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            line_open: false,
        }
    }

    fn draw(&mut self, line: fmt::Arguments<'_>) {
        self.line_open = true;
        if write!(self.out, "\r{line}").and_then(|()| self.out.flush()).is_err() {
            // Best-effort display; ignore write failures.
        }
    }

    fn end_line(&mut self) {
        if !self.line_open {
            return;
        }
        self.line_open = false;
        if writeln!(self.out).and_then(|()| self.out.flush()).is_err() {
            // Best-effort display; ignore write failures.
        }
    }
}

impl<W: Write> ProgressObserver for ProgressLine<W> {
    fn entry_processed(&mut self, phase: Phase, processed: usize, total: Option<usize>) {
        match total {
            Some(total) => self.draw(format_args!("Reading files from {phase}: ({processed}/{total})")),
            None => self.draw(format_args!("Reading files from {phase}: {processed}")),
        }
    }

    fn phase_finished(&mut self, _phase: Phase, _processed: usize) {
        self.end_line();
    }
}

impl<W: Write> Drop for ProgressLine<W> {
    fn drop(&mut self) {
        self.end_line();
    }
}
