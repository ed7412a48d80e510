//! Documentation generator for the `puppet_setting` type
//!
//! Generates the markdown reference operators see for the resource type.

use crate::config::{PUPPET_CONF_PATH, TYPE_NAME};
use crate::resource::Section;

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to include a usage example
    pub show_example: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_example: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn hide_example(mut self) -> Self {
        self.show_example = false;
        self
    }
}

struct Attribute {
    name: &'static str,
    kind: &'static str,
    description: &'static str,
}

const ATTRIBUTES: [Attribute; 3] = [
    Attribute {
        name: "name",
        kind: "namevar",
        description: "section/setting to manage in puppet.conf",
    },
    Attribute {
        name: "ensure",
        kind: "property",
        description: "Whether the setting should exist. Defaults to `present`.",
    },
    Attribute {
        name: "value",
        kind: "property",
        description: "The value of the puppet configuration setting. Surrounding whitespace is stripped.",
    },
];

/// Generate markdown documentation for the resource type
#[must_use]
pub fn generate_docs(config: DocsConfig) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    let title = config
        .title
        .unwrap_or_else(|| format!("`{TYPE_NAME}` Reference"));
    writeln!(output, "# {title}\n").unwrap();

    if let Some(desc) = config.description {
        writeln!(output, "{desc}\n").unwrap();
    }

    writeln!(output, "Manages individual settings in `{PUPPET_CONF_PATH}`.\n").unwrap();

    output.push_str("## Attributes\n\n");
    for attr in &ATTRIBUTES {
        writeln!(output, "### `{}` ({})\n", attr.name, attr.kind).unwrap();
        writeln!(output, "{}\n", attr.description).unwrap();

        match attr.name {
            "name" => {
                let sections: Vec<String> =
                    Section::ALL.iter().map(|s| format!("`{s}`")).collect();
                writeln!(output, "- **Sections**: {}\n", sections.join(", ")).unwrap();
            }
            "ensure" => output.push_str("- **Allowed**: `present`, `absent`\n\n"),
            _ => {}
        }
    }

    if config.show_example {
        output.push_str("## Example\n\n```puppet\n");
        writeln!(output, "{TYPE_NAME} {{ 'main/server':").unwrap();
        output.push_str("  ensure => present,\n");
        output.push_str("  value  => 'puppet.example.com',\n");
        output.push_str("}\n```\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_docs_default() {
        let docs = generate_docs(DocsConfig::new());

        assert!(docs.starts_with("# `puppet_setting` Reference"));
        assert!(docs.contains("/etc/puppetlabs/puppet/puppet.conf"));
        assert!(docs.contains("### `name` (namevar)"));
        assert!(docs.contains("`agent`, `main`, `master`, `user`"));
        assert!(docs.contains("```puppet"));
    }

    #[test]
    fn test_generate_docs_custom() {
        let docs = generate_docs(
            DocsConfig::new()
                .with_title("Agent Settings")
                .with_description("Managed by the platform team.")
                .hide_example(),
        );

        assert!(docs.starts_with("# Agent Settings\n"));
        assert!(docs.contains("Managed by the platform team."));
        assert!(!docs.contains("## Example"));
    }
}
