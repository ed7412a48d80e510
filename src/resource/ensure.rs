//! Ensurable presence values

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a setting should exist in the managed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// The setting is created if missing and kept at the declared value
    #[default]
    Present,
    /// The setting is removed if it exists
    Absent,
}

impl Ensure {
    /// Parse an ensure value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEnsure` for anything other than `present` or `absent`.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "present" => Ok(Ensure::Present),
            "absent" => Ok(Ensure::Absent),
            other => Err(Error::InvalidEnsure(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Ensure::Present => "present",
            Ensure::Absent => "absent",
        }
    }
}

impl FromStr for Ensure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ensure::parse(s)
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
