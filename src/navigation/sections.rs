//! Collapsible sections, one of which may become a dropdown of sub-panels.
//!
//! Each section has a header that toggles its collapsed state and a navigation button that shows
//! it. The section whose title matches the configured dropdown title loses its header and button:
//! its body is cut into sub-panels at subsection headings and a dropdown takes the button's place.

use super::Navigator;
use crate::config::{Config, Layout};
use crate::page::{
    Dropdown, DropdownOption, NavControl, OptionValue, Page, SectionContent, SubsectionPanel,
    SECTION_PREFIX,
};
use crate::section::Block;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A navigation button resolved to the section it shows.
pub struct Binding {
    /// Nav position of the button.
    pub control: usize,
    /// Index of the target section.
    pub section: usize,
}

/// View controller for the collapsible-sections layout.
#[derive(Debug)]
pub struct SectionController {
    page: Page,
    bindings: Vec<Binding>,
    dropdown_section: Option<usize>,
}

impl SectionController {
    /// Bind buttons, convert the dropdown section, and show the first button's section.
    ///
    /// Buttons whose target cannot be found are left unbound. If the dropdown section has no
    /// subsection headings the conversion is skipped and its button is bound like any other.
    #[must_use]
    pub fn initialize(page: Page, config: &Config) -> Self {
        let mut controller = Self {
            page,
            bindings: Vec::new(),
            dropdown_section: None,
        };

        let dropdown_target =
            config
                .dropdown_title()
                .and_then(|title| match controller.page.section_by_title(title) {
                    Ok(index) => Some(index),
                    Err(e) => {
                        tracing::debug!(%e, "no dropdown conversion");
                        None
                    }
                });

        let mut dropdown_button = None;
        for control in controller.page.button_indices() {
            let resolved = controller
                .page
                .button_target(control)
                .and_then(|target| controller.page.region_index(SECTION_PREFIX, target));
            let section = match resolved {
                Ok(section) => section,
                Err(e) => {
                    tracing::warn!(control, %e, "leaving button unbound");
                    continue;
                }
            };

            if dropdown_button.is_none() && Some(section) == dropdown_target {
                dropdown_button = Some(Binding { control, section });
            } else {
                controller.bindings.push(Binding { control, section });
            }
        }

        if let Some(binding) = dropdown_button {
            if controller.create_related_docs_dropdown(binding.section, binding.control, config) {
                controller.dropdown_section = Some(binding.section);
            } else {
                controller.bindings.push(binding);
                controller.bindings.sort_by_key(|b| b.control);
            }
        }

        if let Some(first) = controller.bindings.first().copied() {
            controller.show_section(first.section, Some(first.control));
        } else {
            tracing::debug!("no navigation buttons, nothing shown");
        }

        controller
    }

    #[must_use]
    /// Current page state.
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    /// Button bindings resolved at initialisation, in nav order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    #[must_use]
    /// Index of the section converted to dropdown-controlled panels, if any.
    pub fn dropdown_section(&self) -> Option<usize> {
        self.dropdown_section
    }

    /// Show `target`, hiding every other section.
    ///
    /// All buttons are deactivated and `source` (the button that triggered this, if any) is
    /// activated. A button-triggered call also returns the dropdown to its placeholder. The
    /// target is force-expanded and the viewport scrolled to the top.
    pub fn show_section(&mut self, target: usize, source: Option<usize>) {
        if target >= self.page.sections.len() {
            tracing::debug!(target, "show_section: no such section");
            return;
        }

        self.page.nav.deactivate_buttons();
        if let Some(control) = source {
            self.page.nav.activate(control);
            if let Some(dropdown) = self.page.nav.dropdown_mut() {
                dropdown.reset();
            }
        }

        self.page.hide_all();
        let section = &mut self.page.sections[target];
        section.hidden = false;
        section.collapsed = false;
        self.page.scroll_to_top();

        tracing::debug!(section = %self.page.sections[target].id, ?source, "showing section");
    }

    /// Flip the collapsed state of `section`, whether or not it is the one shown.
    pub fn toggle_section(&mut self, section: usize) {
        if let Some(view) = self.page.sections.get_mut(section) {
            view.collapsed = !view.collapsed;
        }
    }

    /// Activate sub-panel `index` of the dropdown-controlled section.
    ///
    /// Every sub-panel is deactivated first, so an out-of-range index leaves none active.
    pub fn show_subsection_panel(&mut self, index: usize) {
        let Some(section) = self.dropdown_section else {
            return;
        };
        let Some(SectionContent::Panels(panels)) = self
            .page
            .sections
            .get_mut(section)
            .map(|view| &mut view.content)
        else {
            return;
        };

        for panel in panels.iter_mut() {
            panel.active = false;
        }
        if let Some(panel) = panels.get_mut(index) {
            panel.active = true;
        }
    }

    /// Convert `section` into dropdown-selected sub-panels, replacing the button at `control`.
    ///
    /// Returns `false` without changing anything if the section has no headings at the
    /// configured subsection level, has already been converted, or `control` is not a button.
    pub fn create_related_docs_dropdown(
        &mut self,
        section: usize,
        control: usize,
        config: &Config,
    ) -> bool {
        let Some(view) = self.page.sections.get(section) else {
            return false;
        };
        let SectionContent::Blocks(blocks) = &view.content else {
            return false;
        };
        if self.page.nav.button(control).is_none() {
            return false;
        }

        let panels = partition_panels(blocks, config.subsection_level);
        if panels.is_empty() {
            tracing::warn!(
                section = %view.title,
                level = config.subsection_level,
                "dropdown section has no subsection headings, keeping its button"
            );
            return false;
        }

        let options = panels
            .iter()
            .enumerate()
            .map(|(i, panel)| DropdownOption {
                label: panel.title.clone(),
                value: OptionValue::SubPanel(i),
            })
            .collect();
        let count = panels.len();

        let view = &mut self.page.sections[section];
        view.dropdown_controlled = true;
        view.header_hidden = true;
        view.content = SectionContent::Panels(panels);

        self.page.nav.controls[control] = NavControl::Dropdown(Dropdown::new(
            config.dropdown_label().to_string(),
            options,
        ));

        tracing::info!(section = %self.page.sections[section].title, panels = count, "converted section to dropdown");
        true
    }

    /// Handle a click on the control at `control`.
    pub fn click_button(&mut self, control: usize) {
        if let Some(binding) = self.bindings.iter().find(|b| b.control == control).copied() {
            self.show_section(binding.section, Some(binding.control));
        }
    }

    /// Handle the dropdown changing to `option` (0-based, excluding the placeholder).
    ///
    /// No button ends up active; the dropdown section is shown with the chosen sub-panel and the
    /// dropdown loses focus.
    pub fn on_dropdown_change(&mut self, option: usize) {
        let Some(section) = self.dropdown_section else {
            return;
        };
        let Some(dropdown) = self.page.nav.dropdown_mut() else {
            return;
        };
        let Some(OptionValue::SubPanel(index)) = dropdown.options.get(option).map(|o| o.value.clone())
        else {
            return;
        };
        dropdown.selected = option + 1;

        self.page.nav.deactivate_buttons();
        self.show_section(section, None);
        self.show_subsection_panel(index);
        self.page.focus_dropdown(false);
    }
}

/// Partition `blocks` into sub-panels at each heading of exactly `level`.
///
/// Panel `k` holds heading `k` followed by every block up to the next heading at `level`;
/// blocks before the first such heading belong to no panel. The first panel starts active.
#[must_use]
pub fn partition_panels(blocks: &[Block], level: usize) -> Vec<SubsectionPanel> {
    let mut panels: Vec<SubsectionPanel> = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { level: l, title } if *l == level => panels.push(SubsectionPanel {
                title: title.clone(),
                blocks: vec![block.clone()],
                active: panels.is_empty(),
            }),
            _ => {
                if let Some(panel) = panels.last_mut() {
                    panel.blocks.push(block.clone());
                }
            }
        }
    }

    panels
}

impl Navigator for SectionController {
    fn layout(&self) -> Layout {
        Layout::Sections
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

    fn toggle_visible(&mut self) {
        if let [index] = self.page.visible_sections().as_slice() {
            if !self.page.sections[*index].header_hidden {
                self.toggle_section(*index);
            }
        }
    }

    fn focus_dropdown(&mut self, focused: bool) {
        self.page.focus_dropdown(focused);
    }

    fn scroll_by(&mut self, delta: i32) {
        self.page.scroll_by(delta);
    }
}

#[cfg(test)]
#[path = "../tests/sections.rs"]
mod tests;
