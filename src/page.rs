//! The page model the view controllers act on.
//!
//! This stands in for a rendered document: a list of sections (or flat panels) that can be
//! hidden, collapsed or split into sub-panels, and a navigation bar of buttons plus at most one
//! dropdown. Controllers own a `Page` and are the only code that changes visibility.

use crate::section::Block;
use serde::Serialize;

/// Id prefix for sections in the collapsible-sections layout.
pub const SECTION_PREFIX: &str = "section-";

/// Id prefix for panels in the flat-panels layout.
pub const PANEL_PREFIX: &str = "panel-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A sub-panel synthesised from the content between two subsection headings.
pub struct SubsectionPanel {
    /// Title of the heading that opens the panel.
    pub title: String,
    /// Cloned blocks, starting with the opening heading.
    pub blocks: Vec<Block>,
    /// Whether this panel is the one shown inside its section.
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Body of a section: either its original blocks or the panels built from them.
pub enum SectionContent {
    /// Unmodified section body.
    Blocks(Vec<Block>),
    /// Body replaced by dropdown-selected sub-panels.
    Panels(Vec<SubsectionPanel>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A section or panel region of the page.
pub struct SectionView {
    /// Stable identifier, e.g. `section-overview` or `panel-overview`.
    pub id: String,
    /// Heading text shown in the section header.
    pub title: String,
    /// Hidden sections are not rendered at all.
    pub hidden: bool,
    /// Collapsed sections render their header only.
    pub collapsed: bool,
    /// Set once the header has been replaced by dropdown navigation.
    pub header_hidden: bool,
    /// Set on the one section whose sub-navigation is a dropdown.
    pub dropdown_controlled: bool,
    /// Body content.
    pub content: SectionContent,
}

impl SectionView {
    #[must_use]
    /// A visible, expanded section holding `blocks`.
    pub fn new(id: String, title: String, blocks: Vec<Block>) -> Self {
        Self {
            id,
            title,
            hidden: false,
            collapsed: false,
            header_hidden: false,
            dropdown_controlled: false,
            content: SectionContent::Blocks(blocks),
        }
    }

    #[must_use]
    /// Index of the active sub-panel, if the body has been converted to panels.
    pub fn active_panel(&self) -> Option<usize> {
        match &self.content {
            SectionContent::Panels(panels) => panels.iter().position(|p| p.active),
            SectionContent::Blocks(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A navigation button pointing at one region by identifier.
pub struct NavButton {
    /// Text on the button.
    pub label: String,
    /// Identifier of the region this button shows (without the layout prefix).
    pub target: String,
    /// Whether this button reflects the visible region.
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// What choosing a dropdown option navigates to.
pub enum OptionValue {
    /// Sub-panel index inside the dropdown-controlled section.
    SubPanel(usize),
    /// Identifier of a flat panel.
    Panel(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One selectable dropdown entry.
pub struct DropdownOption {
    /// Text shown for the option.
    pub label: String,
    /// Navigation target of the option.
    pub value: OptionValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A selection control with a disabled placeholder followed by its options.
pub struct Dropdown {
    /// Label of the disabled placeholder option.
    pub placeholder: String,
    /// Selectable options, in order.
    pub options: Vec<DropdownOption>,
    /// Selection cursor: 0 is the placeholder, `n` is `options[n - 1]`.
    pub selected: usize,
    /// Whether the control currently holds focus.
    pub focused: bool,
}

impl Dropdown {
    #[must_use]
    /// A dropdown showing its placeholder.
    pub fn new(placeholder: String, options: Vec<DropdownOption>) -> Self {
        Self {
            placeholder,
            options,
            selected: 0,
            focused: false,
        }
    }

    #[must_use]
    /// The selected option, or `None` while the placeholder is shown.
    pub fn selected_option(&self) -> Option<&DropdownOption> {
        self.selected
            .checked_sub(1)
            .and_then(|index| self.options.get(index))
    }

    #[must_use]
    /// Text currently displayed by the control.
    pub fn label(&self) -> &str {
        self.selected_option()
            .map_or(self.placeholder.as_str(), |option| option.label.as_str())
    }

    /// Move the cursor back to the placeholder.
    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// An entry in the navigation bar.
pub enum NavControl {
    /// A button showing one region.
    Button(NavButton),
    /// The dropdown replacing a section's button.
    Dropdown(Dropdown),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Ordered navigation controls.
pub struct NavBar {
    /// Buttons and dropdowns in display order.
    pub controls: Vec<NavControl>,
}

impl NavBar {
    /// Clear the active state of every button.
    pub fn deactivate_buttons(&mut self) {
        for control in &mut self.controls {
            if let NavControl::Button(button) = control {
                button.active = false;
            }
        }
    }

    /// Mark the button at `index` active; other controls are ignored.
    pub fn activate(&mut self, index: usize) {
        if let Some(NavControl::Button(button)) = self.controls.get_mut(index) {
            button.active = true;
        }
    }

    #[must_use]
    /// The button at `index`, if that control is a button.
    pub fn button(&self, index: usize) -> Option<&NavButton> {
        match self.controls.get(index) {
            Some(NavControl::Button(button)) => Some(button),
            _ => None,
        }
    }

    #[must_use]
    /// The dropdown, if the bar has one.
    pub fn dropdown(&self) -> Option<&Dropdown> {
        self.controls.iter().find_map(|control| match control {
            NavControl::Dropdown(dropdown) => Some(dropdown),
            NavControl::Button(_) => None,
        })
    }

    /// Mutable access to the dropdown, if the bar has one.
    pub fn dropdown_mut(&mut self) -> Option<&mut Dropdown> {
        self.controls.iter_mut().find_map(|control| match control {
            NavControl::Dropdown(dropdown) => Some(dropdown),
            NavControl::Button(_) => None,
        })
    }

    #[must_use]
    /// Indices of all active buttons.
    pub fn active_buttons(&self) -> Vec<usize> {
        self.controls
            .iter()
            .enumerate()
            .filter_map(|(i, control)| match control {
                NavControl::Button(button) if button.active => Some(i),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// A whole document laid out for navigation.
pub struct Page {
    /// Document title shown above the navigation bar.
    pub title: String,
    /// Sections or panels in document order.
    pub sections: Vec<SectionView>,
    /// Navigation controls.
    pub nav: NavBar,
    /// Viewport position within the visible region, in lines.
    pub scroll_offset: u16,
}

impl Page {
    /// Hide every section.
    pub fn hide_all(&mut self) {
        for section in &mut self.sections {
            section.hidden = true;
        }
    }

    #[must_use]
    /// Indices of the sections currently shown.
    pub fn visible_sections(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    /// The single visible section, if exactly one is shown.
    pub fn visible(&self) -> Option<&SectionView> {
        match self.visible_sections().as_slice() {
            [only] => self.sections.get(*only),
            _ => None,
        }
    }

    /// Return the viewport to the top of the page.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Move the viewport by `delta` lines, stopping at the top.
    pub fn scroll_by(&mut self, delta: i32) {
        let offset = i32::from(self.scroll_offset).saturating_add(delta);
        self.scroll_offset = u16::try_from(offset.max(0)).unwrap_or(u16::MAX);
    }
}
