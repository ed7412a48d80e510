//! Format-preserving INI document
//!
//! Lines are kept as written; an edit only touches the lines it needs to.

use crate::config::IniFormat;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([^\]]*)\]\s*$").expect("valid section regex"));

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[#;]").expect("valid comment regex"));

static SETTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)([^ \t=#;\[][^=]*?)([ \t]*=[ \t]*)(.*?)[ \t\x0B\x0C\x00]*$")
        .expect("valid setting regex")
});

/// One `key = value` pair found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniEntry {
    /// Section name, empty for settings before the first header
    pub section: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank(String),
    Comment(String),
    Section {
        raw: String,
        name: String,
    },
    Setting {
        indent: String,
        key: String,
        separator: String,
        value: String,
        raw: String,
    },
    Other(String),
}

impl Line {
    fn parse(raw: &str) -> Self {
        let text = raw.trim_end_matches('\r');

        if text.trim().is_empty() {
            return Line::Blank(raw.to_string());
        }
        if COMMENT_RE.is_match(text) {
            return Line::Comment(raw.to_string());
        }
        if let Some(caps) = SECTION_RE.captures(text) {
            return Line::Section {
                raw: raw.to_string(),
                name: caps[1].trim().to_string(),
            };
        }
        if let Some(caps) = SETTING_RE.captures(text) {
            return Line::Setting {
                indent: caps[1].to_string(),
                key: caps[2].to_string(),
                separator: caps[3].to_string(),
                value: caps[4].to_string(),
                raw: raw.to_string(),
            };
        }
        Line::Other(raw.to_string())
    }

    fn setting(indent: &str, key: &str, value: &str, format: &IniFormat, eol: &str) -> Self {
        Line::Setting {
            indent: indent.to_string(),
            key: key.to_string(),
            separator: format.key_val_separator.clone(),
            value: value.to_string(),
            raw: format!("{}{eol}", format.render_setting(indent, key, value)),
        }
    }

    fn raw(&self) -> &str {
        match self {
            Line::Blank(raw) | Line::Comment(raw) | Line::Other(raw) => raw,
            Line::Section { raw, .. } | Line::Setting { raw, .. } => raw,
        }
    }
}

/// A parsed INI file that renders back exactly as read until edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    lines: Vec<Line>,
    trailing_newline: bool,
}

impl IniDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI content. Parsing never fails; unrecognized lines are kept verbatim.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        if content.is_empty() {
            return Self::new();
        }

        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);

        Self {
            lines: body.split('\n').map(Line::parse).collect(),
            trailing_newline,
        }
    }

    /// Render the document back to text
    #[must_use]
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut out = self
            .lines
            .iter()
            .map(Line::raw)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Current value of `key` in `section`, first occurrence wins
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let index = self.find_setting(section, key)?;
        match &self.lines[index] {
            Line::Setting { value, .. } => Some(value.as_str()),
            _ => None,
        }
    }

    /// Every setting in file order
    #[must_use]
    pub fn entries(&self) -> Vec<IniEntry> {
        self.with_sections()
            .filter_map(|(section, line)| match line {
                Line::Setting { key, value, .. } => Some(IniEntry {
                    section: section.to_string(),
                    key: key.clone(),
                    value: value.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Names of the sections with a header, in file order, without duplicates
    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for line in &self.lines {
            if let Line::Section { name, .. } = line {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Set `key` in `section` to `value`.
    ///
    /// Existing lines keep their indentation, separator and line ending.
    /// Missing keys are added after the last setting of the section; missing
    /// sections are appended to the end of the document.
    ///
    /// Returns `true` if the document changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnwritableSetting` when the line to write would not
    /// parse back as the same key and value. The document is left untouched.
    pub fn set(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        format: &IniFormat,
    ) -> Result<bool> {
        if let Some(index) = self.find_setting(section, key) {
            if let Line::Setting {
                indent,
                separator,
                value: current,
                raw,
                ..
            } = &self.lines[index]
            {
                if current == value {
                    return Ok(false);
                }
                let eol = if raw.ends_with('\r') { "\r" } else { "" };
                let line = Line::Setting {
                    indent: indent.clone(),
                    key: key.to_string(),
                    separator: separator.clone(),
                    value: value.to_string(),
                    raw: format!("{indent}{key}{separator}{value}{eol}"),
                };
                check_setting(section, &line, key, value)?;
                self.lines[index] = line;
            }
            return Ok(true);
        }

        let eol = self.line_ending();
        match self.insertion_point(section) {
            Some((index, indent)) => {
                let indent = indent.unwrap_or_else(|| format.indent.clone());
                let line = Line::setting(&indent, key, value, format, eol);
                check_setting(section, &line, key, value)?;
                self.lines.insert(index, line);
                if index == self.lines.len() - 1 {
                    self.trailing_newline = true;
                }
            }
            None => self.append_section(section, key, value, format)?,
        }
        Ok(true)
    }

    /// Remove every occurrence of `key` from `section`.
    ///
    /// A section left without any settings, comments or other content is
    /// removed as well. Returns `true` if the key existed.
    pub fn remove(&mut self, section: &str, key: &str) -> bool {
        let mut removed = false;
        while let Some(index) = self.find_setting(section, key) {
            self.lines.remove(index);
            if !section.is_empty() {
                self.remove_if_empty(section, index);
            }
            removed = true;
        }
        removed
    }

    // "\r" when the document uses CRLF line endings
    fn line_ending(&self) -> &'static str {
        if self.lines.iter().any(|line| line.raw().ends_with('\r')) {
            "\r"
        } else {
            ""
        }
    }

    fn with_sections(&self) -> impl Iterator<Item = (&str, &Line)> {
        let mut current = "";
        self.lines.iter().map(move |line| {
            if let Line::Section { name, .. } = line {
                current = name.as_str();
            }
            (current, line)
        })
    }

    fn find_setting(&self, section: &str, key: &str) -> Option<usize> {
        self.with_sections().position(|(current, line)| {
            current == section && matches!(line, Line::Setting { key: k, .. } if k == key)
        })
    }

    // Half-open range of the block a header at `header` opens
    fn block_end(&self, header: usize) -> usize {
        self.lines[header + 1..]
            .iter()
            .position(|line| matches!(line, Line::Section { .. }))
            .map_or(self.lines.len(), |offset| header + 1 + offset)
    }

    fn first_header(&self) -> usize {
        self.lines
            .iter()
            .position(|line| matches!(line, Line::Section { .. }))
            .unwrap_or(self.lines.len())
    }

    /// Where a new key for `section` goes, and the indentation to use.
    /// `None` when the section has no header yet.
    fn insertion_point(&self, section: &str) -> Option<(usize, Option<String>)> {
        let (start, end) = if section.is_empty() {
            (0, self.first_header())
        } else {
            let header = self.lines.iter().rposition(
                |line| matches!(line, Line::Section { name, .. } if name == section),
            )?;
            (header + 1, self.block_end(header))
        };

        let last_setting = self.lines[start..end]
            .iter()
            .rposition(|line| matches!(line, Line::Setting { .. }))
            .map(|offset| start + offset);

        match last_setting {
            Some(index) => {
                let indent = match &self.lines[index] {
                    Line::Setting { indent, .. } => Some(indent.clone()),
                    _ => None,
                };
                Some((index + 1, indent))
            }
            None => Some((start, None)),
        }
    }

    fn append_section(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        format: &IniFormat,
    ) -> Result<()> {
        let eol = self.line_ending();
        let header = Line::parse(&format!("[{section}]{eol}"));
        if !matches!(&header, Line::Section { name, .. } if name == section) {
            return Err(Error::UnwritableSetting {
                section: section.to_string(),
                key: key.to_string(),
                reason: "section name would not read back as a header".into(),
            });
        }
        let line = Line::setting(&format.indent, key, value, format, eol);
        check_setting(section, &line, key, value)?;

        if matches!(self.lines.last(), Some(line) if !matches!(line, Line::Blank(_))) {
            self.lines.push(Line::Blank(eol.to_string()));
        }
        self.lines.push(header);
        self.lines.push(line);
        self.trailing_newline = true;
        Ok(())
    }

    /// Drop the block containing `removed_at` if only blank lines remain in it
    fn remove_if_empty(&mut self, section: &str, removed_at: usize) {
        let Some(header) = self.lines[..removed_at.min(self.lines.len())]
            .iter()
            .rposition(|line| matches!(line, Line::Section { .. }))
        else {
            return;
        };
        if !matches!(&self.lines[header], Line::Section { name, .. } if name == section) {
            return;
        }

        let end = self.block_end(header);
        if !self.lines[header + 1..end]
            .iter()
            .all(|line| matches!(line, Line::Blank(_)))
        {
            return;
        }

        let mut start = header;
        if end == self.lines.len() {
            while start > 0 && matches!(self.lines[start - 1], Line::Blank(_)) {
                start -= 1;
            }
        }
        log::debug!("Removing empty section [{section}]");
        self.lines.drain(start..end);

        if self.lines.is_empty() {
            self.trailing_newline = false;
        }
    }
}

/// Make sure `line` reads back as exactly `key = value`
fn check_setting(section: &str, line: &Line, key: &str, value: &str) -> Result<()> {
    let reason = if key.contains(['\n', '\r']) || value.contains(['\n', '\r']) {
        "key or value contains a line break"
    } else {
        match Line::parse(line.raw()) {
            Line::Setting { key: k, value: v, .. } if k == key && v == value => return Ok(()),
            Line::Setting { key: k, .. } if k == key => "value would not read back unchanged",
            _ => "key would not read back as a setting",
        }
    };

    Err(Error::UnwritableSetting {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    })
}
