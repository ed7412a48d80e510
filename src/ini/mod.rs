//! INI editing engine
//!
//! The provider never touches files itself; it drives an [`IniEditor`].
//! Two editors ship with the crate:
//! - [`IniFileEditor`] - edits real files with atomic write-back
//! - [`MemoryEditor`] - keeps file text in memory, for tests and dry runs

mod document;
mod file;
mod memory;

pub use document::{IniDocument, IniEntry};
pub use file::IniFileEditor;
pub use memory::MemoryEditor;

use crate::error::Result;
use std::path::Path;

/// Capability to read and edit `key = value` settings in INI files
///
/// Implementations own parsing, diffing and persistence. Errors they return
/// are passed through the provider unmodified.
pub trait IniEditor: Send + Sync {
    /// Current value of `key` in `section`, or `None` if the key is missing
    fn get(&self, file: &Path, section: &str, key: &str) -> Result<Option<String>>;

    /// Create or update `key` in `section`, creating the section if needed
    ///
    /// Fails with `Error::UnwritableSetting`, and leaves the file unchanged,
    /// when the resulting line would not read back as the same key and value.
    fn upsert(&self, file: &Path, section: &str, key: &str, value: &str) -> Result<()>;

    /// Remove every occurrence of `key` from `section`.
    /// Returns `true` if the key existed.
    fn remove(&self, file: &Path, section: &str, key: &str) -> Result<bool>;

    /// Every setting in the file, in file order. A missing file has none.
    fn list_all(&self, file: &Path) -> Result<Vec<IniEntry>>;

    /// Editor name for log output
    fn editor_name(&self) -> &'static str;
}
