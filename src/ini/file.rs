//! Editor backed by files on disk

use super::{IniDocument, IniEditor, IniEntry};
use crate::config::IniFormat;
use crate::error::{Error, Result};
use log::debug;
use std::path::Path;

/// Edits INI files in place
///
/// Every operation reads the file fresh, so edits made by other tools between
/// operations are respected. Writes go to a temp file next to the target and
/// are renamed over it, keeping the original file's permissions.
#[derive(Debug, Clone, Default)]
pub struct IniFileEditor {
    format: IniFormat,
}

impl IniFileEditor {
    /// Create an editor writing new lines with the default format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor writing new lines with a custom format
    #[must_use]
    pub fn with_format(format: IniFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub fn format(&self) -> &IniFormat {
        &self.format
    }

    /// Read and parse `path`; a missing file is an empty document
    ///
    /// # Errors
    ///
    /// Returns `Error::FileRead` for any I/O error other than not-found.
    pub fn load(&self, path: &Path) -> Result<IniDocument> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(IniDocument::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", path.display());
                Ok(IniDocument::new())
            }
            Err(e) => Err(Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Render and atomically write `doc` to `path`
    ///
    /// # Errors
    ///
    /// Returns `Error::DirectoryCreate` or `Error::FileWrite` on I/O failure.
    pub fn store(&self, path: &Path, doc: &IniDocument) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Append .tmp to preserve the original filename fully
        let file_name = path.file_name().ok_or_else(|| Error::FileWrite {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path must have a filename",
            ),
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = path.with_file_name(temp_filename);

        std::fs::write(&temp_path, doc.render()).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        if let Ok(metadata) = std::fs::metadata(path) {
            std::fs::set_permissions(&temp_path, metadata.permissions()).map_err(|e| {
                Error::FileWrite {
                    path: temp_path.clone(),
                    source: e,
                }
            })?;
        }

        std::fs::rename(&temp_path, path).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl IniEditor for IniFileEditor {
    fn get(&self, file: &Path, section: &str, key: &str) -> Result<Option<String>> {
        Ok(self.load(file)?.get(section, key).map(str::to_string))
    }

    fn upsert(&self, file: &Path, section: &str, key: &str, value: &str) -> Result<()> {
        let mut doc = self.load(file)?;
        if doc.set(section, key, value, &self.format)? {
            debug!("Setting [{section}] {key} in {}", file.display());
            self.store(file, &doc)?;
        }
        Ok(())
    }

    fn remove(&self, file: &Path, section: &str, key: &str) -> Result<bool> {
        let mut doc = self.load(file)?;
        if !doc.remove(section, key) {
            return Ok(false);
        }
        debug!("Removing [{section}] {key} from {}", file.display());
        self.store(file, &doc)?;
        Ok(true)
    }

    fn list_all(&self, file: &Path) -> Result<Vec<IniEntry>> {
        Ok(self.load(file)?.entries())
    }

    fn editor_name(&self) -> &'static str {
        "file"
    }
}
