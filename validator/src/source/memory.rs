//! In-memory entry source for tests.

use super::{Entry, EntrySource};
use crate::error::Result;

/// An [`EntrySource`] over entries held in memory.
///
/// Names ending in `/` are directories. The declared length defaults to the
/// number of entries and can be overridden to simulate a misreporting
/// archive.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    location: String,
    entries: Vec<(String, Vec<u8>)>,
    declared: Option<usize>,
}

impl MemorySource {
    /// Create an empty source labelled `location`.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Append a file entry.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.entries.push((name.into(), content.into()));
        self
    }

    /// Append a directory entry; a trailing `/` is added if missing.
    #[must_use]
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        let mut name = name.into();
        if !name.ends_with('/') {
            name.push('/');
        }
        self.entries.push((name, Vec::new()));
        self
    }

    /// Override the declared entry count.
    #[must_use]
    pub fn with_declared_len(mut self, declared: usize) -> Self {
        self.declared = Some(declared);
        self
    }
}

impl EntrySource for MemorySource {
    fn location(&self) -> &str {
        &self.location
    }

    fn declared_len(&self) -> usize {
        self.declared.unwrap_or(self.entries.len())
    }

    fn for_each_entry(&mut self, visit: &mut dyn FnMut(Entry<'_>) -> Result<()>) -> Result<()> {
        for (name, content) in &self.entries {
            let mut reader: &[u8] = content;
            visit(Entry {
                name: name.as_str(),
                is_dir: name.ends_with('/'),
                content: &mut reader,
            })?;
        }
        Ok(())
    }
}
