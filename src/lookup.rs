//! Typed lookups over a [`Page`].
//!
//! Every query returns a `Result` with a [`LookupError`] naming what was missing. Controllers
//! resolve their bindings through these once, when they are initialised, and keep plain indices
//! afterwards so event handlers never search the page.

use crate::page::{NavControl, Page};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// A page element that was expected but not found.
pub enum LookupError {
    /// No region carries this identifier.
    #[error("no region with id '{0}'")]
    Region(String),
    /// No section has this title.
    #[error("no section titled '{0}'")]
    SectionTitle(String),
    /// The control at this position is missing or not a button.
    #[error("no button at nav position {0}")]
    Button(usize),
    /// The navigation bar has no dropdown.
    #[error("navigation has no dropdown")]
    Dropdown,
    /// The dropdown has no option at this position.
    #[error("dropdown has no option {0}")]
    DropdownOption(usize),
}

impl Page {
    /// Index of the region whose id is `prefix` followed by `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Region`] if no region carries that id.
    pub fn region_index(&self, prefix: &str, target: &str) -> Result<usize, LookupError> {
        self.sections
            .iter()
            .position(|s| s.id.strip_prefix(prefix) == Some(target))
            .ok_or_else(|| LookupError::Region(format!("{prefix}{target}")))
    }

    /// Index of the first section whose title equals `title`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::SectionTitle`] if none matches.
    pub fn section_by_title(&self, title: &str) -> Result<usize, LookupError> {
        self.sections
            .iter()
            .position(|s| s.title == title)
            .ok_or_else(|| LookupError::SectionTitle(title.to_string()))
    }

    /// Target identifier of the button at nav position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Button`] if that control is absent or not a button.
    pub fn button_target(&self, index: usize) -> Result<&str, LookupError> {
        self.nav
            .button(index)
            .map(|button| button.target.as_str())
            .ok_or(LookupError::Button(index))
    }

    /// Nav position of the dropdown.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Dropdown`] if the bar has none.
    pub fn dropdown_index(&self) -> Result<usize, LookupError> {
        self.nav
            .controls
            .iter()
            .position(|control| matches!(control, NavControl::Dropdown(_)))
            .ok_or(LookupError::Dropdown)
    }

    #[must_use]
    /// Nav positions of every button, in order.
    pub fn button_indices(&self) -> Vec<usize> {
        self.nav
            .controls
            .iter()
            .enumerate()
            .filter(|(_, control)| matches!(control, NavControl::Button(_)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Nav position of the button whose target is `target`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Region`] if no button points there.
    pub fn button_for(&self, target: &str) -> Result<usize, LookupError> {
        self.button_indices()
            .into_iter()
            .find(|&i| self.nav.button(i).is_some_and(|b| b.target == target))
            .ok_or_else(|| LookupError::Region(target.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/lookup.rs"]
mod tests;
