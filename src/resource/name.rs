//! The `section/setting` namevar

use super::Section;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated identity of a `puppet_setting` resource.
///
/// The name has the form `section/setting`. It is split on the first `/` only,
/// so setting names may themselves contain `/`:
///
/// ```rust
/// use puppet_setting::{Section, SettingName};
///
/// let name: SettingName = "main/foo/bar".parse().unwrap();
/// assert_eq!(name.section(), Section::Main);
/// assert_eq!(name.section_str(), "main");
/// assert_eq!(name.setting(), "foo/bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SettingName {
    raw: String,
    section: Section,
    // byte offset of the first '/'
    delimiter: usize,
}

impl SettingName {
    /// Validate a name and build the identity
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` unless the name is an allowed section,
    /// a `/`, and a non-empty setting without whitespace.
    pub fn parse(name: &str) -> Result<Self> {
        let (section, setting) = split_name(name)?;
        let section = Section::parse(section).map_err(|_| Error::InvalidName(name.to_string()))?;
        if setting.is_empty() || setting.chars().any(is_name_whitespace) {
            return Err(Error::InvalidName(name.to_string()));
        }

        Ok(Self {
            raw: name.to_string(),
            section,
            delimiter: name.len() - setting.len() - 1,
        })
    }

    /// Build a name from its parts
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` if `setting` is empty or contains whitespace.
    pub fn from_parts(section: Section, setting: &str) -> Result<Self> {
        Self::parse(&format!("{section}/{setting}"))
    }

    /// The full `section/setting` string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Everything before the first `/`
    #[must_use]
    pub fn section_str(&self) -> &str {
        &self.raw[..self.delimiter]
    }

    /// Everything after the first `/`, embedded `/` included
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.raw[self.delimiter + 1..]
    }
}

/// Validate a resource name, returning its section and setting
///
/// # Errors
///
/// Returns `Error::InvalidName` for names not of the form
/// `<agent|main|master|user>/<setting>`.
pub fn validate(name: &str) -> Result<(Section, String)> {
    let name = SettingName::parse(name)?;
    Ok((name.section(), name.setting().to_string()))
}

fn split_name(name: &str) -> Result<(&str, &str)> {
    name.split_once('/')
        .ok_or_else(|| Error::InvalidName(name.to_string()))
}

// Whitespace as understood by the name pattern: ASCII only, vertical tab included
fn is_name_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

impl FromStr for SettingName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SettingName::parse(s)
    }
}

impl TryFrom<String> for SettingName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        SettingName::parse(&value)
    }
}

impl From<SettingName> for String {
    fn from(name: SettingName) -> Self {
        name.raw
    }
}

impl AsRef<str> for SettingName {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SettingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
