//! Formatting options for written INI lines

/// Controls how the INI engine renders lines it creates.
///
/// Existing lines are never reformatted; these options only apply to settings
/// and section headers added by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniFormat {
    /// Separator placed between key and value (default: `" = "`)
    pub key_val_separator: String,

    /// Indentation for settings added to a newly created section
    pub indent: String,
}

impl Default for IniFormat {
    fn default() -> Self {
        Self {
            key_val_separator: " = ".into(),
            indent: String::new(),
        }
    }
}

impl IniFormat {
    /// Create a new builder for IniFormat
    ///
    /// # Example
    /// ```rust
    /// use puppet_setting::IniFormat;
    ///
    /// let format = IniFormat::builder()
    ///     .key_val_separator("=")
    ///     .indent("    ")
    ///     .build();
    /// assert_eq!(format.render_setting("", "server", "puppet"), "server=puppet");
    /// ```
    #[must_use]
    pub fn builder() -> IniFormatBuilder {
        IniFormatBuilder::default()
    }

    /// Render a `key<sep>value` line with the given indentation
    #[must_use]
    pub fn render_setting(&self, indent: &str, key: &str, value: &str) -> String {
        format!("{indent}{key}{}{value}", self.key_val_separator)
    }
}

/// Builder for creating IniFormat with a fluent API
#[derive(Debug, Clone, Default)]
pub struct IniFormatBuilder {
    key_val_separator: Option<String>,
    indent: Option<String>,
}

impl IniFormatBuilder {
    /// Set the key/value separator
    ///
    /// The separator must contain `=`; anything else would not parse back.
    /// Invalid separators are ignored and the default is kept.
    #[must_use]
    pub fn key_val_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.contains('=') {
            self.key_val_separator = Some(separator);
        } else {
            log::warn!("Ignoring key/value separator {separator:?}: must contain '='");
        }
        self
    }

    /// Set the indentation for settings in newly created sections
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    /// Build the IniFormat
    #[must_use]
    pub fn build(self) -> IniFormat {
        let defaults = IniFormat::default();
        IniFormat {
            key_val_separator: self
                .key_val_separator
                .unwrap_or(defaults.key_val_separator),
            indent: self.indent.unwrap_or(defaults.indent),
        }
    }
}
