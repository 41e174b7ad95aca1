//! Configuration to acknowledge document preferences as well as set defaults.
//!
//! We look for the file given on the command line, then for a `vellum.toml` in the working
//! directory, then `vellum/config.toml` in the user config directory, then `config/config.toml`
//! in the working directory or up to four of its parents, and otherwise fall back to defaults. The dropdown section title lives here rather
//! than in any global so it can be handed explicitly to the view controller.

use crate::error::{Error, Result};
use facet::Facet;
use clap::ValueEnum;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "vellum.toml";

/// Directory under the user config directory holding the global config.
pub const GLOBAL_CONFIG_DIR: &str = "vellum";

/// Directory searched for in the working directory and its parents.
pub const LOCAL_CONFIG_DIR: &str = "config";

/// Config file name inside the global and local config directories.
pub const CONFIG_FILE: &str = "config.toml";

const MAX_PARENT_SEARCH_DEPTH: usize = 4;

#[derive(Facet, Clone, Debug, PartialEq)]
/// Preferences loaded from vellum.toml or falling back to defaults.
pub struct Config {
    #[facet(default = String::new())]
    /// Title of the section converted into a dropdown; empty disables the conversion.
    pub dropdown_section: String,
    #[facet(default = "sections".to_string())]
    /// Page layout, either `sections` or `panels`.
    pub layout: String,
    #[facet(default = 2)]
    /// Heading level that starts a section and gets a navigation button.
    pub section_level: usize,
    #[facet(default = 3)]
    /// Heading level that splits the dropdown section into sub-panels.
    pub subsection_level: usize,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "Select".to_string())]
    /// Dropdown label used when no dropdown title is configured.
    pub placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dropdown_section: String::new(),
            layout: Layout::Sections.to_string(),
            section_level: 2,
            subsection_level: 3,
            file_extensions: vec!["md".to_string()],
            placeholder: "Select".to_string(),
        }
    }
}

/// Which view controller drives the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
    /// Collapsible sections, one of which may become a dropdown of sub-panels.
    Sections,
    /// Flat panels addressed by identifier.
    Panels,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the first config file [`find_config`] finds.
    ///
    /// A directory given as `path` is taken to hold a `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read, or if the chosen file does
    /// not parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let found = match path {
            Some(dir) if dir.is_dir() => Some(dir.join(CONFIG_FILE)),
            Some(file) => Some(file.to_path_buf()),
            None => env::current_dir()
                .ok()
                .and_then(|cwd| find_config(&cwd, dirs::config_dir().as_deref())),
        };
        let Some(path) = found else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|message| Error::Config {
            path: path.display().to_string(),
            message,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a TOML string, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser's message if the TOML is malformed or has mistyped keys.
    pub fn from_toml(contents: &str) -> std::result::Result<Self, String> {
        facet_toml::from_str::<Self>(contents).map_err(|e| e.to_string())
    }

    #[must_use]
    /// The configured dropdown section title, if any.
    pub fn dropdown_title(&self) -> Option<&str> {
        let title = self.dropdown_section.trim();
        (!title.is_empty()).then_some(title)
    }

    #[must_use]
    /// Label for the dropdown's disabled placeholder option.
    pub fn dropdown_label(&self) -> &str {
        self.dropdown_title().unwrap_or(&self.placeholder)
    }

    /// The configured layout; unknown values fall back to sections.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::from_str(self.layout.trim(), true).unwrap_or_else(|e| {
            tracing::warn!("unknown layout '{}': {e}, using sections", self.layout);
            Layout::Sections
        })
    }
}

#[must_use]
/// First existing config file for a session started in `start`.
///
/// Order: `start/vellum.toml`, then `<global>/vellum/config.toml`, then
/// `config/config.toml` in `start` or one of its first four parents.
pub fn find_config(start: &Path, global: Option<&Path>) -> Option<PathBuf> {
    let local = start.join(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    if let Some(file) = global
        .map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILE))
        .filter(|file| file.is_file())
    {
        return Some(file);
    }

    start
        .ancestors()
        .take(MAX_PARENT_SEARCH_DEPTH + 1)
        .map(|dir| dir.join(LOCAL_CONFIG_DIR).join(CONFIG_FILE))
        .find(|file| file.is_file())
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
