//! The view snapshot records where navigation ended up, so it can be printed or replayed.
//!
//! A snapshot never writes page state directly. Restoring one clicks the same button or picks
//! the same dropdown option through the controller's own handlers, so the visibility invariants
//! hold for a restored view exactly as they do for a clicked one.

use crate::error::{Error, Result};
use crate::navigation::Navigator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable summary of a page's navigation state.
pub struct ViewSnapshot {
    /// Name of the document the snapshot was taken from.
    pub document: String,
    /// Layout the document was viewed in.
    pub layout: String,
    /// Id of the visible section or panel.
    pub visible: Option<String>,
    /// Target of the active button.
    pub active_button: Option<String>,
    /// Label of the selected dropdown option.
    pub dropdown_selection: Option<String>,
    /// Active sub-panel within the visible section.
    pub active_subsection: Option<usize>,
    /// Ids of collapsed sections.
    #[serde(default)]
    pub collapsed: Vec<String>,
}

impl ViewSnapshot {
    #[must_use]
    /// Record the current navigation state of `navigator`.
    pub fn capture(navigator: &dyn Navigator, document: &str) -> Self {
        let page = navigator.page();
        let visible = page.visible();

        let active_button = page
            .nav
            .active_buttons()
            .first()
            .and_then(|&i| page.nav.button(i))
            .map(|button| button.target.clone());

        Self {
            document: document.to_string(),
            layout: navigator.layout().to_string(),
            visible: visible.map(|section| section.id.clone()),
            active_button,
            dropdown_selection: page
                .nav
                .dropdown()
                .and_then(|dropdown| dropdown.selected_option())
                .map(|option| option.label.clone()),
            active_subsection: visible.and_then(crate::page::SectionView::active_panel),
            collapsed: page
                .sections
                .iter()
                .filter(|s| s.collapsed)
                .map(|s| s.id.clone())
                .collect(),
        }
    }

    /// Replay this snapshot onto `navigator` through its event handlers.
    ///
    /// Entries that no longer match the page are skipped.
    pub fn restore(&self, navigator: &mut dyn Navigator) {
        if let Some(label) = &self.dropdown_selection {
            let option = navigator
                .page()
                .nav
                .dropdown()
                .and_then(|dropdown| dropdown.options.iter().position(|o| &o.label == label));
            match option {
                Some(option) => navigator.select(option),
                None => tracing::warn!(%label, "snapshot option not found"),
            }
        } else if let Some(target) = &self.active_button {
            match navigator.page().button_for(target) {
                Ok(control) => navigator.click(control),
                Err(e) => tracing::warn!(%e, "snapshot button not found"),
            }
        }

        let visible = navigator.page().visible().map(|section| section.id.clone());
        if visible.is_some_and(|id| self.collapsed.contains(&id)) {
            navigator.toggle_visible();
        }
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "tests/snapshot.rs"]
mod tests;
