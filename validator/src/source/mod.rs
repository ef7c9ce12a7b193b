//! Sequences of archive entries consumed by the scanner and indexer.
//!
//! Validation only cares about the `(path, content)` pairs an archive
//! yields and the entry count it declares up front. [`EntrySource`] hides
//! the archive format behind that shape.
//!
//! # Sub-modules
//!
//! - [`archive`] - [`ZipSource`], backed by the `zip` crate.
//! - `memory` - `MemorySource`, an in-memory source for tests (`test-support`).

pub mod archive;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use archive::ZipSource;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemorySource;

use crate::error::Result;
use std::io::Read;

/// One entry yielded by an [`EntrySource`].
pub struct Entry<'a> {
    /// Full path of the entry inside its source, as stored.
    pub name: &'a str,
    /// True for directory entries.
    pub is_dir: bool,
    /// Reader over the entry's content.
    pub content: &'a mut dyn Read,
}

/// An ordered sequence of entries with a self-declared size.
pub trait EntrySource {
    /// Human-readable location used in error messages.
    fn location(&self) -> &str;

    /// Number of entries the source's own directory claims to hold.
    fn declared_len(&self) -> usize;

    /// Feed every entry to `visit` in source order.
    ///
    /// Stops at the first error, whether raised by the source or by `visit`.
    ///
    /// # Errors
    ///
    /// Returns read failures from the underlying source and any error
    /// returned by `visit`.
    fn for_each_entry(&mut self, visit: &mut dyn FnMut(Entry<'_>) -> Result<()>) -> Result<()>;
}
