//! Lay out a parsed [`Document`] as a [`Page`] for either navigation layout.
//!
//! The sections layout keeps one collapsible section per document section, each with a button.
//! The panels layout pre-renders everything flat: ordinary sections become panels with buttons,
//! and the configured dropdown section is split into one panel per subsection heading.

use crate::config::Config;
use crate::navigation::sections::partition_panels;
use crate::page::{
    Dropdown, DropdownOption, NavBar, NavButton, NavControl, OptionValue, Page, SectionView,
    PANEL_PREFIX, SECTION_PREFIX,
};
use crate::section::{Block, Document, IdAllocator};

fn page_title(document: &Document) -> String {
    document
        .title
        .clone()
        .unwrap_or_else(|| document.name.clone())
}

fn button(label: &str, target: String) -> NavControl {
    NavControl::Button(NavButton {
        label: label.to_string(),
        target,
        active: false,
    })
}

#[must_use]
/// One collapsible section and one button per document section.
///
/// Buttons target the section slug; sections are identified as `section-<slug>`.
pub fn build_section_page(document: &Document, _config: &Config) -> Page {
    let mut page = Page {
        title: page_title(document),
        ..Page::default()
    };

    for section in &document.sections {
        page.sections.push(SectionView::new(
            format!("{SECTION_PREFIX}{}", section.id),
            section.title.clone(),
            section.blocks.clone(),
        ));
        page.nav.controls.push(button(&section.title, section.id.clone()));
    }

    page
}

#[must_use]
/// Flat panels, with the configured dropdown section split at its subsection headings.
///
/// Panel ids are unique across the page; the dropdown takes the nav position its section's
/// button would have had. A dropdown section with no subsection headings stays an ordinary
/// panel.
pub fn build_panel_page(document: &Document, config: &Config) -> Page {
    let mut ids = IdAllocator::default();
    let mut sections = Vec::new();
    let mut nav = NavBar::default();
    let mut dropdown_built = false;

    for section in &document.sections {
        let id = ids.allocate(&section.title);
        let is_dropdown = !dropdown_built
            && config.dropdown_title() == Some(section.title.as_str())
            && !section.headings_at(config.subsection_level).is_empty();

        if !is_dropdown {
            sections.push(flat_panel(&id, &section.title, section.blocks.clone()));
            nav.controls.push(button(&section.title, id));
            continue;
        }

        let mut options = Vec::new();
        for panel in partition_panels(&section.blocks, config.subsection_level) {
            let sub_id = ids.allocate(&panel.title);
            let body: Vec<Block> = panel.blocks.into_iter().skip(1).collect();
            sections.push(flat_panel(&sub_id, &panel.title, body));
            options.push(DropdownOption {
                label: panel.title,
                value: OptionValue::Panel(sub_id),
            });
        }
        nav.controls.push(NavControl::Dropdown(Dropdown::new(
            config.dropdown_label().to_string(),
            options,
        )));
        dropdown_built = true;
    }

    Page {
        title: page_title(document),
        sections,
        nav,
        scroll_offset: 0,
    }
}

fn flat_panel(id: &str, title: &str, blocks: Vec<Block>) -> SectionView {
    let mut view = SectionView::new(format!("{PANEL_PREFIX}{id}"), title.to_string(), blocks);
    view.header_hidden = true;
    view
}

#[cfg(test)]
#[path = "tests/structure.rs"]
mod tests;
