//! # puppet-setting
//!
//! Manage individual `section/setting` pairs in the agent's `puppet.conf` as
//! ensurable resources.
//!
//! ## Features
//!
//! - **Resource Schema**: `section/setting` names validated against the allowed sections
//! - **Value Normalization**: Surrounding whitespace stripped before comparison or storage
//! - **Ensurable**: `present` (default) creates or updates, `absent` removes
//! - **Pluggable Editing**: The provider drives any [`IniEditor`]; file and in-memory editors included
//! - **Format Preserving**: Comments, ordering and indentation survive edits
//! - **Purge**: Remove settings from the managed file that were not declared
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use puppet_setting::{IniFileEditor, IniSettingProvider, PuppetSetting};
//!
//! # fn example() -> puppet_setting::Result<()> {
//! let provider = IniSettingProvider::new(IniFileEditor::new());
//!
//! let server = PuppetSetting::new("main/server")?.with_value("puppet.example.com");
//! let change = provider.apply(&server)?;
//! println!("{}: {change}", server.name());
//! # Ok(())
//! # }
//! ```
//!
//! ## Catalogs and Purge
//!
//! ```rust
//! use puppet_setting::{Catalog, IniSettingProvider, MemoryEditor, PUPPET_CONF_PATH};
//!
//! # fn example() -> puppet_setting::Result<()> {
//! let editor = MemoryEditor::new()
//!     .with_file(PUPPET_CONF_PATH, "[main]\nserver = old\nstale = yes\n");
//! let provider = IniSettingProvider::new(editor);
//!
//! let catalog = Catalog::from_json(r#"[{"name": "main/server", "value": "new"}]"#)?;
//! let report = catalog.apply(&provider, true)?;
//! assert_eq!(report.changed(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod catalog;
mod docs;
mod error;

pub mod config;
pub mod ini;
pub mod provider;
pub mod resource;

pub use catalog::{Catalog, Report, ReportEntry};
pub use config::{IniFormat, IniFormatBuilder, PUPPET_CONF_PATH, TYPE_NAME, target_file};
pub use docs::{DocsConfig, generate_docs};
pub use error::{Error, Result};
pub use ini::{IniDocument, IniEditor, IniEntry, IniFileEditor, MemoryEditor};
pub use provider::{Change, IniSettingProvider};
pub use resource::{
    Ensure, PuppetSetting, ResourceDeclaration, Section, SettingName, normalize, validate,
};
