use super::PanelController;
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::extract_document;
use crate::navigation::Navigator;
use crate::page::{NavControl, OptionValue, Page};
use crate::structure::build_panel_page;

const GUIDE: &str = "# Guide

## Overview

Overview body.

## Related Docs

### Alpha

Alpha body.

### Beta

Beta body.

## Usage

Usage body.
";

fn page() -> Page {
    let config = Config {
        dropdown_section: "Related Docs".to_string(),
        layout: "panels".to_string(),
        ..Config::default()
    };
    let document = extract_document(GUIDE, &MarkdownFormat, 2, "guide.md").unwrap();
    build_panel_page(&document, &config)
}

fn visible_id(c: &PanelController) -> &str {
    c.page().visible().map(|s| s.id.as_str()).unwrap()
}

#[test]
fn test_initialize_clicks_first_button() {
    let c = PanelController::initialize(page());

    assert_eq!(visible_id(&c), "panel-overview");
    assert_eq!(c.page().nav.active_buttons(), vec![0]);
}

#[test]
fn test_initial_view_equals_manual_first_click() {
    let initialized = PanelController::initialize(page());

    let mut manual = PanelController::bind(page());
    manual.click_button(0);
    assert_eq!(manual.page(), initialized.page());

    let mut returned = PanelController::initialize(page());
    returned.select(1);
    returned.click(2);
    returned.click(0);
    assert_eq!(returned.page(), initialized.page(), "Clicking back restores the initial view");
}

#[test]
fn test_button_shows_its_panel() {
    let mut c = PanelController::initialize(page());

    c.click(2);

    assert_eq!(visible_id(&c), "panel-usage");
    assert_eq!(c.page().visible_sections().len(), 1);
    assert_eq!(c.page().nav.active_buttons(), vec![2]);
}

#[test]
fn test_dropdown_change_shows_option_panel() {
    let mut c = PanelController::initialize(page());
    c.focus_dropdown(true);

    c.select(1);

    assert_eq!(visible_id(&c), "panel-beta");
    assert!(c.page().nav.active_buttons().is_empty());
    let dropdown = c.page().nav.dropdown().unwrap();
    assert_eq!(dropdown.label(), "Beta");
    assert!(!dropdown.focused);
}

#[test]
fn test_button_click_resets_dropdown() {
    let mut c = PanelController::initialize(page());

    c.select(0);
    assert_eq!(visible_id(&c), "panel-alpha");
    c.click(0);

    assert_eq!(visible_id(&c), "panel-overview");
    assert_eq!(c.page().nav.dropdown().unwrap().selected, 0);
}

#[test]
fn test_show_unknown_panel_changes_nothing() {
    let mut c = PanelController::initialize(page());
    let before = c.page().clone();

    c.show_panel("nope");

    assert_eq!(c.page(), &before);
}

#[test]
fn test_unresolved_option_is_ignored() {
    let mut page = page();
    if let Some(NavControl::Dropdown(dropdown)) = page.nav.controls.get_mut(1) {
        dropdown.options[0].value = OptionValue::Panel("ghost".to_string());
    }
    let mut c = PanelController::initialize(page);

    c.select(0);

    assert_eq!(visible_id(&c), "panel-overview");
    assert_eq!(c.page().nav.dropdown().unwrap().selected, 0);
}

#[test]
fn test_toggle_visible_is_a_no_op() {
    let mut c = PanelController::initialize(page());
    let before = c.page().clone();

    c.toggle_visible();

    assert_eq!(c.page(), &before);
}

#[test]
fn test_no_buttons_shows_nothing() {
    let mut page = page();
    page.nav.controls.retain(|c| matches!(c, NavControl::Dropdown(_)));

    let mut c = PanelController::initialize(page);
    assert!(c.page().visible().is_none(), "Every panel is visible until navigation");

    c.select(0);
    assert_eq!(visible_id(&c), "panel-alpha");
}
