//! Fixed configuration for the managed file
//!
//! This module contains the policy constants for `puppet_setting`:
//! - `PUPPET_CONF_PATH` - The single file every resource is resolved against
//! - `IniFormat` - How new lines are written into that file

mod types;

pub use types::{IniFormat, IniFormatBuilder};

use std::path::Path;

/// Path to the open-source agent's main configuration file.
///
/// Hard coded so that purge can enumerate one well-known file instead of
/// inferring candidate files from the resources that happen to be declared.
pub const PUPPET_CONF_PATH: &str = "/etc/puppetlabs/puppet/puppet.conf";

/// Name under which the resource type is registered with the host agent
pub const TYPE_NAME: &str = "puppet_setting";

/// The file every `puppet_setting` resource is managed in
#[must_use]
pub fn target_file() -> &'static Path {
    Path::new(PUPPET_CONF_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_file_is_absolute() {
        assert!(target_file().is_absolute());
        assert_eq!(target_file(), Path::new("/etc/puppetlabs/puppet/puppet.conf"));
    }

    #[test]
    fn test_target_file_is_constant() {
        let first = target_file();
        for _ in 0..10 {
            assert_eq!(target_file(), first);
        }
    }
}
