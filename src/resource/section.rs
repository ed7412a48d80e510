//! Allowed `puppet.conf` sections

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A section of `puppet.conf` that may be managed by `puppet_setting`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Settings for the agent run
    Agent,
    /// Settings shared by every application
    Main,
    /// Settings for the server side
    Master,
    /// Settings for interactive user commands
    User,
}

impl Section {
    /// Every allowed section, in declaration order
    pub const ALL: [Section; 4] = [Section::Agent, Section::Main, Section::Master, Section::User];

    /// Parse a section name
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSection` for any name outside the allowed set.
    /// Matching is exact: `Main` or ` main` are rejected.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "agent" => Ok(Section::Agent),
            "main" => Ok(Section::Main),
            "master" => Ok(Section::Master),
            "user" => Ok(Section::User),
            other => Err(Error::InvalidSection(other.to_string())),
        }
    }

    /// The section header as written in the file
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Agent => "agent",
            Section::Main => "main",
            Section::Master => "master",
            Section::User => "user",
        }
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Section::parse(s)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
