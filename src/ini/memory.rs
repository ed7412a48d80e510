//! In-memory editor for testing

use super::{IniDocument, IniEditor, IniEntry};
use crate::config::IniFormat;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory INI files (not persisted)
///
/// Files are held as text and parsed on every call, the same way
/// [`super::IniFileEditor`] reads from disk, so both editors see identical
/// results for identical content.
pub struct MemoryEditor {
    files: RwLock<HashMap<PathBuf, String>>,
    format: IniFormat,
}

impl MemoryEditor {
    /// Create an editor with no files
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(IniFormat::default())
    }

    /// Create an editor that writes new lines with `format`
    #[must_use]
    pub fn with_format(format: IniFormat) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            format,
        }
    }

    /// Seed a file with content
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.to_string());
        }
        self
    }

    /// Content of a file, `None` if it was never written
    ///
    /// # Errors
    ///
    /// Returns `Error::LockPoisoned` if a writer panicked.
    pub fn contents(&self, path: &Path) -> Result<Option<String>> {
        let files = self.files.read().map_err(|_| Error::LockPoisoned)?;
        Ok(files.get(path).cloned())
    }

    fn load(&self, path: &Path) -> Result<IniDocument> {
        let files = self.files.read().map_err(|_| Error::LockPoisoned)?;
        Ok(files
            .get(path)
            .map(|content| IniDocument::parse(content))
            .unwrap_or_default())
    }

    fn store(&self, path: &Path, doc: &IniDocument) -> Result<()> {
        let mut files = self.files.write().map_err(|_| Error::LockPoisoned)?;
        files.insert(path.to_path_buf(), doc.render());
        Ok(())
    }
}

impl Default for MemoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl IniEditor for MemoryEditor {
    fn get(&self, file: &Path, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.load(file)?.get(section, key).map(str::to_string))
    }

    fn upsert(&self, file: &Path, section: &str, key: &str, value: &str) -> Result<()> {
        let mut doc = self.load(file)?;
        if doc.set(section, key, value, &self.format)? {
            self.store(file, &doc)?;
        }
        Ok(())
    }

    fn remove(&self, file: &Path, section: &str, key: &str) -> Result<bool> {
        let mut doc = self.load(file)?;
        if !doc.remove(section, key) {
            return Ok(false);
        }
        self.store(file, &doc)?;
        Ok(true)
    }

    fn list_all(&self, file: &Path) -> Result<Vec<IniEntry>> {
        Ok(self.load(file)?.entries())
    }

    fn editor_name(&self) -> &'static str {
        "memory"
    }
}
