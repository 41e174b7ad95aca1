//! Flat panels addressed by identifier.
//!
//! Every button and dropdown option names its panel by id, and panel `id` is found as
//! `panel-<id>`. Initialisation simply clicks the first button, so the default view is reached
//! through the same path as a user click.

use super::Navigator;
use crate::config::Layout;
use crate::lookup::LookupError;
use crate::page::{OptionValue, Page, PANEL_PREFIX};

/// View controller for the flat-panels layout.
#[derive(Debug)]
pub struct PanelController {
    page: Page,
    button_targets: Vec<(usize, String)>,
    option_targets: Vec<Option<String>>,
}

impl PanelController {
    /// Resolve button and option targets, then click the first button.
    #[must_use]
    pub fn initialize(page: Page) -> Self {
        let mut controller = Self::bind(page);

        if let Some(&first) = controller.page.button_indices().first() {
            controller.click_button(first);
        } else {
            tracing::debug!("no navigation buttons, nothing shown");
        }

        controller
    }

    /// Resolve button and option targets without showing anything.
    fn bind(page: Page) -> Self {
        let button_targets: Vec<(usize, String)> = page
            .button_indices()
            .into_iter()
            .filter_map(|control| {
                let resolved = page.button_target(control).and_then(|target| {
                    page.region_index(PANEL_PREFIX, target)
                        .map(|_| target.to_string())
                });
                match resolved {
                    Ok(target) => Some((control, target)),
                    Err(e) => {
                        tracing::warn!(control, %e, "leaving button unbound");
                        None
                    }
                }
            })
            .collect();

        let option_targets: Vec<Option<String>> = page
            .nav
            .dropdown()
            .map(|dropdown| {
                dropdown
                    .options
                    .iter()
                    .map(|option| match &option.value {
                        OptionValue::Panel(id) if page.region_index(PANEL_PREFIX, id).is_ok() => {
                            Some(id.clone())
                        }
                        _ => {
                            tracing::warn!(option = %option.label, "dropdown option has no panel");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            page,
            button_targets,
            option_targets,
        }
    }

    #[must_use]
    /// Current page state.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Show panel `panel-<id>` and hide every other panel.
    ///
    /// All buttons are deactivated; marking one active is up to the caller. Unknown ids change
    /// nothing.
    pub fn show_panel(&mut self, id: &str) {
        let index = match self.page.region_index(PANEL_PREFIX, id) {
            Ok(index) => index,
            Err(e) => {
                tracing::debug!(%e, "show_panel: nothing to show");
                return;
            }
        };

        self.page.hide_all();
        self.page.sections[index].hidden = false;
        self.page.nav.deactivate_buttons();
        self.page.scroll_to_top();

        tracing::debug!(panel = %self.page.sections[index].id, "showing panel");
    }

    /// Handle a click on the button at `control`.
    ///
    /// Shows the button's panel, marks the button active, and resets the dropdown.
    pub fn click_button(&mut self, control: usize) {
        let Some(target) = self
            .button_targets
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, target)| target.clone())
        else {
            return;
        };

        self.show_panel(&target);
        self.page.nav.activate(control);
        if let Some(dropdown) = self.page.nav.dropdown_mut() {
            dropdown.reset();
        }
    }

    /// Handle the dropdown changing to `option` (0-based, excluding the placeholder).
    ///
    /// Shows the option's panel with no button active.
    pub fn on_dropdown_change(&mut self, option: usize) {
        let Some(target) = self.option_targets.get(option).cloned().flatten() else {
            tracing::debug!(e = %LookupError::DropdownOption(option), "ignoring selection");
            return;
        };

        if let Some(dropdown) = self.page.nav.dropdown_mut() {
            dropdown.selected = option + 1;
        }
        self.show_panel(&target);
        self.page.focus_dropdown(false);
    }
}

impl Navigator for PanelController {
    fn layout(&self) -> Layout {
        Layout::Panels
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn click(&mut self, control: usize) {
        self.click_button(control);
    }

    fn select(&mut self, option: usize) {
        self.on_dropdown_change(option);
    }

    fn toggle_visible(&mut self) {}

    fn focus_dropdown(&mut self, focused: bool) {
        self.page.focus_dropdown(focused);
    }

    fn scroll_by(&mut self, delta: i32) {
        self.page.scroll_by(delta);
    }
}

#[cfg(test)]
#[path = "../tests/panels.rs"]
mod tests;
