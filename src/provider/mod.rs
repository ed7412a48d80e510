//! The `ini_setting` provider for `puppet_setting`
//!
//! The provider resolves a resource to the coordinates an [`IniEditor`] needs
//! (file, section, setting) and converges it. It performs no I/O of its own.

mod change;

pub use change::Change;

use crate::config;
use crate::error::Result;
use crate::ini::IniEditor;
use crate::resource::{Ensure, PuppetSetting, Section, SettingName};
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Maps `puppet_setting` resources onto an INI editor
///
/// # Example
///
/// ```rust
/// use puppet_setting::{Change, IniSettingProvider, MemoryEditor, PuppetSetting};
///
/// let provider = IniSettingProvider::new(MemoryEditor::new());
/// let resource = PuppetSetting::new("main/server")?.with_value("puppet.example.com");
///
/// assert_eq!(provider.section_of(&resource), "main");
/// assert_eq!(provider.setting_of(&resource), "server");
/// assert!(matches!(provider.apply(&resource)?, Change::Created { .. }));
/// assert_eq!(provider.apply(&resource)?, Change::Unchanged);
/// # Ok::<(), puppet_setting::Error>(())
/// ```
pub struct IniSettingProvider<E: IniEditor> {
    editor: E,
    target: PathBuf,
}

impl<E: IniEditor> IniSettingProvider<E> {
    /// Create a provider managing [`config::PUPPET_CONF_PATH`]
    pub fn new(editor: E) -> Self {
        Self {
            editor,
            target: config::target_file().to_path_buf(),
        }
    }

    /// Create a provider managing a different file.
    ///
    /// Meant for tests and staging roots. Each provider still manages exactly
    /// one file, which is what purge relies on.
    pub fn with_target(editor: E, target: impl Into<PathBuf>) -> Self {
        Self {
            editor,
            target: target.into(),
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Section part of the resource name (before the first `/`)
    pub fn section_of<'a>(&self, resource: &'a PuppetSetting) -> &'a str {
        resource.section_str()
    }

    /// Setting part of the resource name (after the first `/`)
    pub fn setting_of<'a>(&self, resource: &'a PuppetSetting) -> &'a str {
        resource.setting()
    }

    /// The managed file; the same for every resource
    pub fn target_file(&self) -> &Path {
        &self.target
    }

    /// Check whether the setting exists in the file
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn exists(&self, resource: &PuppetSetting) -> Result<bool> {
        Ok(self.value(resource)?.is_some())
    }

    /// Current value on disk
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn value(&self, resource: &PuppetSetting) -> Result<Option<String>> {
        self.editor.get(
            &self.target,
            self.section_of(resource),
            self.setting_of(resource),
        )
    }

    /// Write the setting with its declared value (empty if none)
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn create(&self, resource: &PuppetSetting) -> Result<()> {
        self.write(resource, resource.value().unwrap_or_default())
    }

    /// Rewrite the value of an existing setting
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn set_value(&self, resource: &PuppetSetting) -> Result<()> {
        self.write(resource, resource.value().unwrap_or_default())
    }

    /// Remove the setting. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn destroy(&self, resource: &PuppetSetting) -> Result<bool> {
        self.editor.remove(
            &self.target,
            self.section_of(resource),
            self.setting_of(resource),
        )
    }

    /// Converge the file to the resource
    ///
    /// `absent` removes the setting regardless of the declared value. A
    /// `present` resource without a value only makes sure the key exists.
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn apply(&self, resource: &PuppetSetting) -> Result<Change> {
        let change = match resource.ensure() {
            Ensure::Absent => {
                if self.destroy(resource)? {
                    Change::Removed
                } else {
                    Change::Unchanged
                }
            }
            Ensure::Present => match (self.value(resource)?, resource.value()) {
                (None, desired) => {
                    self.create(resource)?;
                    Change::Created {
                        value: desired.unwrap_or_default().to_string(),
                    }
                }
                (Some(current), Some(desired)) if current != desired => {
                    self.set_value(resource)?;
                    Change::Updated {
                        from: current,
                        to: desired.to_string(),
                    }
                }
                (Some(_), _) => Change::Unchanged,
            },
        };

        if change.is_change() {
            info!("{}[{}]: {change}", config::TYPE_NAME, resource.name());
        }
        Ok(change)
    }

    /// Every setting currently in the managed file, as `present` resources
    ///
    /// Settings outside the allowed sections, or whose key could not be a
    /// resource name, are skipped. Duplicate keys keep their first value.
    ///
    /// # Errors
    ///
    /// Returns whatever error the editor raises.
    pub fn instances(&self) -> Result<Vec<PuppetSetting>> {
        let mut seen = HashSet::new();
        let mut resources = Vec::new();

        for entry in self.editor.list_all(&self.target)? {
            let Ok(section) = Section::parse(&entry.section) else {
                debug!("Skipping [{}] {}: unmanaged section", entry.section, entry.key);
                continue;
            };
            let Ok(name) = SettingName::from_parts(section, &entry.key) else {
                debug!("Skipping [{}] {}: not a valid setting name", entry.section, entry.key);
                continue;
            };
            if seen.insert(name.clone()) {
                resources.push(PuppetSetting::from_name(name).with_value(&entry.value));
            }
        }

        Ok(resources)
    }

    fn write(&self, resource: &PuppetSetting, value: &str) -> Result<()> {
        debug!(
            "Writing {} to {} via {} editor",
            resource.name(),
            self.target.display(),
            self.editor.editor_name()
        );
        self.editor.upsert(
            &self.target,
            self.section_of(resource),
            self.setting_of(resource),
            value,
        )
    }
}
