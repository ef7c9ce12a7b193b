//! Zip archives as entry sources.

use super::{Entry, EntrySource};
use crate::error::{Result, ValidationError};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use zip::ZipArchive;

/// An [`EntrySource`] over a zip file on disk.
pub struct ZipSource {
    path: Utf8PathBuf,
    archive: ZipArchive<File>,
}

impl ZipSource {
    /// Open the zip archive at `path` and read its central directory.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Io`] if the file cannot be opened and
    /// [`ValidationError::Archive`] if it is not a readable zip archive.
    pub fn open(path: &Utf8Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ValidationError::Io {
            path: path.to_owned(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|source| ValidationError::Archive {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            path: path.to_owned(),
            archive,
        })
    }
}

impl EntrySource for ZipSource {
    fn location(&self) -> &str {
        self.path.as_str()
    }

    fn declared_len(&self) -> usize {
        self.archive.len()
    }

    fn for_each_entry(&mut self, visit: &mut dyn FnMut(Entry<'_>) -> Result<()>) -> Result<()> {
        for index in 0..self.archive.len() {
            let mut file = self
                .archive
                .by_index(index)
                .map_err(|source| ValidationError::Archive {
                    path: self.path.clone(),
                    source,
                })?;
            let name = file.name().to_owned();
            let is_dir = file.is_dir();
            visit(Entry {
                name: &name,
                is_dir,
                content: &mut file,
            })?;
        }
        Ok(())
    }
}
