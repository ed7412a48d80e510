//! The `puppet_setting` resource type
//!
//! This module contains the schema side of the resource:
//! - `SettingName` - The validated `section/setting` namevar
//! - `Section` - The sections a resource may live in
//! - `Ensure` - Ensurable `present`/`absent` semantics
//! - `PuppetSetting` - A declared resource, ready for a provider

mod ensure;
mod name;
mod section;

pub use ensure::Ensure;
pub use name::{SettingName, validate};
pub use section::Section;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalize a setting value by stripping surrounding ASCII whitespace and NUL.
///
/// Internal whitespace is preserved, and so is non-ASCII whitespace such as
/// U+00A0 at either end.
///
/// ```rust
/// use puppet_setting::normalize;
///
/// assert_eq!(normalize("  http://x  "), "http://x");
/// assert_eq!(normalize(" a b "), "a b");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .trim_matches([' ', '\t', '\n', '\x0B', '\x0C', '\r', '\0'])
        .to_string()
}

/// A single managed setting in `puppet.conf`
///
/// # Example
///
/// ```rust
/// use puppet_setting::{Ensure, PuppetSetting};
///
/// let resource = PuppetSetting::new("main/server")?
///     .with_value("  puppet.example.com ");
///
/// assert_eq!(resource.section_str(), "main");
/// assert_eq!(resource.setting(), "server");
/// assert_eq!(resource.value(), Some("puppet.example.com"));
/// assert_eq!(resource.ensure(), Ensure::Present);
/// # Ok::<(), puppet_setting::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuppetSetting {
    name: SettingName,
    ensure: Ensure,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl PuppetSetting {
    /// Create a `present` resource with no value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidName` if `name` is not a valid `section/setting`.
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self::from_name(SettingName::parse(name)?))
    }

    /// Create a `present` resource from an already validated name
    #[must_use]
    pub fn from_name(name: SettingName) -> Self {
        Self {
            name,
            ensure: Ensure::default(),
            value: None,
        }
    }

    /// Set the desired value (normalized)
    #[must_use]
    pub fn with_value(mut self, value: impl AsRef<str>) -> Self {
        self.value = Some(normalize(value.as_ref()));
        self
    }

    /// Set the desired presence
    #[must_use]
    pub fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }

    #[must_use]
    pub fn name(&self) -> &SettingName {
        &self.name
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.name.section()
    }

    #[must_use]
    pub fn section_str(&self) -> &str {
        self.name.section_str()
    }

    #[must_use]
    pub fn setting(&self) -> &str {
        self.name.setting()
    }

    #[must_use]
    pub fn ensure(&self) -> Ensure {
        self.ensure
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.ensure == Ensure::Present
    }

    /// Desired value, already normalized
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A resource as written in configuration source, before validation
///
/// `value` accepts any scalar; numbers and booleans are stringified the way
/// the host agent does for manifest values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDeclaration {
    pub name: String,
    #[serde(default)]
    pub ensure: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl ResourceDeclaration {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl TryFrom<ResourceDeclaration> for PuppetSetting {
    type Error = Error;

    fn try_from(decl: ResourceDeclaration) -> Result<Self> {
        let mut resource = PuppetSetting::new(&decl.name)?;

        if let Some(ensure) = decl.ensure.as_deref() {
            resource = resource.with_ensure(Ensure::parse(ensure)?);
        }

        let value = match decl.value {
            None | Some(Value::Null) => return Ok(resource),
            Some(Value::String(s)) => s,
            Some(scalar @ (Value::Bool(_) | Value::Number(_))) => scalar.to_string(),
            Some(Value::Array(_) | Value::Object(_)) => {
                return Err(Error::InvalidValue {
                    name: decl.name,
                    reason: "expected a string, number or boolean".into(),
                });
            }
        };

        let resource = resource.with_value(value);
        if resource.value().is_some_and(|v| v.contains(['\n', '\r'])) {
            return Err(Error::InvalidValue {
                name: decl.name,
                reason: "value contains a line break".into(),
            });
        }

        Ok(resource)
    }
}
