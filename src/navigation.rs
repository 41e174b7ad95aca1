//! View controllers that keep exactly one region of a [`Page`] visible.
//!
//! Two layouts are supported. [`sections::SectionController`] drives collapsible sections and can
//! turn one of them into a dropdown of sub-panels; [`panels::PanelController`] drives flat panels
//! addressed by identifier. The terminal host talks to either through [`Navigator`].

pub mod panels;
pub mod sections;

use crate::config::{Config, Layout};
use crate::page::Page;
use crate::section::Document;
use crate::structure;

/// Handlers the host invokes in response to user input.
///
/// None of these fail: a handler aimed at something that does not exist does nothing.
pub trait Navigator {
    /// Layout this controller drives.
    fn layout(&self) -> Layout;
    /// Current page state.
    fn page(&self) -> &Page;
    /// A navigation control at `control` was clicked.
    fn click(&mut self, control: usize);
    /// Dropdown option `option` (0-based, excluding the placeholder) was chosen.
    fn select(&mut self, option: usize);
    /// The visible region's header was clicked.
    fn toggle_visible(&mut self);
    /// The dropdown gained or lost focus.
    fn focus_dropdown(&mut self, focused: bool);
    /// The viewport was scrolled by `delta` lines.
    fn scroll_by(&mut self, delta: i32);
}

#[must_use]
/// Build the page for `document` in the configured layout and initialise its controller.
pub fn initialize(document: &Document, config: &Config) -> Box<dyn Navigator> {
    match config.layout() {
        Layout::Sections => {
            let page = structure::build_section_page(document, config);
            Box::new(sections::SectionController::initialize(page, config))
        }
        Layout::Panels => {
            let page = structure::build_panel_page(document, config);
            Box::new(panels::PanelController::initialize(page))
        }
    }
}

impl Page {
    /// Give or take focus from the dropdown, if there is one.
    pub fn focus_dropdown(&mut self, focused: bool) {
        if let Some(dropdown) = self.nav.dropdown_mut() {
            dropdown.focused = focused;
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
