//! Outcome of converging one resource

use serde::Serialize;
use std::fmt;

/// What applying a resource did to the managed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// The setting did not exist and was written
    Created { value: String },
    /// The setting existed with a different value
    Updated { from: String, to: String },
    /// The setting existed and was removed
    Removed,
    /// The file already matched the resource
    Unchanged,
}

impl Change {
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Created { value } => write!(f, "created with value '{value}'"),
            Change::Updated { from, to } => write!(f, "value changed '{from}' to '{to}'"),
            Change::Removed => f.write_str("removed"),
            Change::Unchanged => f.write_str("unchanged"),
        }
    }
}
