//! Declared resources and their application
//!
//! A [`Catalog`] is the set of `puppet_setting` resources declared for one
//! run. Applying it converges each resource in declaration order and, when
//! purging, removes every setting in the managed file that was not declared.

use crate::error::{Error, Result};
use crate::ini::IniEditor;
use crate::provider::{Change, IniSettingProvider};
use crate::resource::{Ensure, PuppetSetting, ResourceDeclaration, SettingName};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Resources declared for one run, unique by name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resources: Vec<PuppetSetting>,
    names: HashSet<SettingName>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw declarations
    ///
    /// # Errors
    ///
    /// Returns the first validation error, or `Error::DuplicateResource`.
    pub fn from_declarations<I>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceDeclaration>,
    {
        let mut catalog = Self::new();
        for decl in declarations {
            catalog.add(PuppetSetting::try_from(decl)?)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of declarations
    ///
    /// ```rust
    /// use puppet_setting::Catalog;
    ///
    /// let catalog = Catalog::from_json(r#"[
    ///     {"name": "main/server", "value": "puppet.example.com"},
    ///     {"name": "agent/noop", "ensure": "absent"}
    /// ]"#)?;
    /// assert_eq!(catalog.len(), 2);
    /// # Ok::<(), puppet_setting::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for malformed JSON, otherwise as
    /// [`Catalog::from_declarations`].
    pub fn from_json(json: &str) -> Result<Self> {
        let declarations: Vec<ResourceDeclaration> = serde_json::from_str(json)?;
        Self::from_declarations(declarations)
    }

    /// Add a resource
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateResource` if a resource with the same name
    /// was already added.
    pub fn add(&mut self, resource: PuppetSetting) -> Result<()> {
        if !self.names.insert(resource.name().clone()) {
            return Err(Error::DuplicateResource(resource.name().to_string()));
        }
        self.resources.push(resource);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &SettingName) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PuppetSetting> {
        self.resources.iter()
    }

    /// Apply every resource through `provider`
    ///
    /// With `purge`, settings found in the managed file but not declared are
    /// destroyed and reported as [`Change::Removed`].
    ///
    /// # Errors
    ///
    /// Stops at the first editor error and returns it unchanged.
    pub fn apply<E: IniEditor>(
        &self,
        provider: &IniSettingProvider<E>,
        purge: bool,
    ) -> Result<Report> {
        let mut report = Report::default();

        for resource in &self.resources {
            let change = provider.apply(resource)?;
            report.push(resource.name().clone(), change);
        }

        if purge {
            for existing in provider.instances()? {
                if self.contains(existing.name()) {
                    continue;
                }
                let absent = existing.with_ensure(Ensure::Absent);
                let change = provider.apply(&absent)?;
                if change.is_change() {
                    info!("Purged undeclared {}", absent.name());
                } else {
                    warn!("Undeclared {} vanished before it could be purged", absent.name());
                }
                report.push(absent.name().clone(), change);
            }
        }

        Ok(report)
    }
}

/// Per-resource outcome of applying a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub changes: Vec<ReportEntry>,
}

/// One resource and what happened to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: SettingName,
    pub change: Change,
}

impl Report {
    fn push(&mut self, name: SettingName, change: Change) {
        self.changes.push(ReportEntry { name, change });
    }

    /// Number of resources that changed the file
    #[must_use]
    pub fn changed(&self) -> usize {
        self.changes.iter().filter(|e| e.change.is_change()).count()
    }

    /// Outcome for a resource, if it was part of the run
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Change> {
        self.changes
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| &e.change)
    }
}
