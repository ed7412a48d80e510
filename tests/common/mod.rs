//! Common test utilities for puppet-setting integration tests
//!
//! Provides a temporary puppet.conf and a provider pointed at it.

#![allow(dead_code)]

use puppet_setting::{IniFileEditor, IniSettingProvider, PuppetSetting};
use std::path::PathBuf;
use tempfile::TempDir;

/// A realistic puppet.conf used as starting content
pub const SAMPLE_CONF: &str = "\
# This file can be used to override the default puppet settings.
# See the following links for more details on what settings are available:
# - https://puppet.com/docs/puppet/latest/config_important_settings.html
[main]
server = puppet.example.com
environment = production

[agent]
runinterval = 1800
";

/// Test fixture that provides a temporary directory and a file-backed provider
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub provider: IniSettingProvider<IniFileEditor>,
}

impl TestFixture {
    /// Create a fixture with no puppet.conf on disk yet
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let target = temp_dir.path().join("etc/puppetlabs/puppet/puppet.conf");
        let provider = IniSettingProvider::with_target(IniFileEditor::new(), target);

        Self { temp_dir, provider }
    }

    /// Create a fixture whose puppet.conf starts with `content`
    pub fn with_conf(content: &str) -> Self {
        let fixture = Self::new();
        fixture.write_conf(content);
        fixture
    }

    pub fn conf_path(&self) -> PathBuf {
        self.provider.target_file().to_path_buf()
    }

    pub fn write_conf(&self, content: &str) {
        let path = self.conf_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Raw puppet.conf content, `None` if the file does not exist
    pub fn read_conf(&self) -> Option<String> {
        std::fs::read_to_string(self.conf_path()).ok()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a present resource with a value
pub fn setting(name: &str, value: &str) -> PuppetSetting {
    PuppetSetting::new(name)
        .expect("valid resource name")
        .with_value(value)
}
