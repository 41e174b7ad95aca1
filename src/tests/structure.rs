use super::{build_panel_page, build_section_page};
use crate::config::Config;
use crate::formats::markdown::MarkdownFormat;
use crate::input::extract_document;
use crate::page::{NavControl, OptionValue, SectionContent};
use crate::section::{Block, Document};

const GUIDE: &str = "# Guide

## Overview

Overview body.

## Related Docs

Lead-in paragraph.

### Alpha

Alpha body.

### Beta

Beta body.

## Usage

Usage body.
";

fn document(source: &str) -> Document {
    extract_document(source, &MarkdownFormat, 2, "guide.md").unwrap()
}

fn panels_config(dropdown: &str) -> Config {
    Config {
        dropdown_section: dropdown.to_string(),
        layout: "panels".to_string(),
        ..Config::default()
    }
}

fn ids(sections: &[crate::page::SectionView]) -> Vec<&str> {
    sections.iter().map(|s| s.id.as_str()).collect()
}

#[test]
fn test_section_page_has_one_button_per_section() {
    let page = build_section_page(&document(GUIDE), &Config::default());

    assert_eq!(page.title, "Guide");
    assert_eq!(
        ids(&page.sections),
        vec!["section-overview", "section-related-docs", "section-usage"]
    );
    let targets: Vec<&str> = page
        .button_indices()
        .into_iter()
        .map(|i| page.button_target(i).unwrap())
        .collect();
    assert_eq!(targets, vec!["overview", "related-docs", "usage"]);
    assert!(page.sections.iter().all(|s| !s.header_hidden));
}

#[test]
fn test_page_title_falls_back_to_name() {
    let page = build_section_page(&document("## Only\n\nBody.\n"), &Config::default());

    assert_eq!(page.title, "guide.md");
}

#[test]
fn test_panel_page_splits_dropdown_section() {
    let page = build_panel_page(&document(GUIDE), &panels_config("Related Docs"));

    assert_eq!(
        ids(&page.sections),
        vec!["panel-overview", "panel-alpha", "panel-beta", "panel-usage"]
    );
    assert!(page.sections.iter().all(|s| s.header_hidden));

    assert_eq!(page.dropdown_index().unwrap(), 1);
    let dropdown = page.nav.dropdown().unwrap();
    assert_eq!(dropdown.placeholder, "Related Docs");
    assert_eq!(
        dropdown.options[1].value,
        OptionValue::Panel("beta".to_string())
    );
}

#[test]
fn test_subsection_panel_drops_its_heading() {
    let page = build_panel_page(&document(GUIDE), &panels_config("Related Docs"));

    assert_eq!(
        page.sections[1].content,
        SectionContent::Blocks(vec![Block::Text("Alpha body.".to_string())])
    );
    assert_eq!(page.sections[1].title, "Alpha");
}

#[test]
fn test_panel_ids_stay_unique() {
    let source = "## Notes\n\nA\n\n## Related Docs\n\n### Notes\n\nB\n\n### Notes\n\nC\n";
    let page = build_panel_page(&document(source), &panels_config("Related Docs"));

    assert_eq!(
        ids(&page.sections),
        vec!["panel-notes", "panel-notes-1", "panel-notes-2"]
    );
    let values: Vec<_> = page
        .nav
        .dropdown()
        .unwrap()
        .options
        .iter()
        .map(|o| o.value.clone())
        .collect();
    assert_eq!(
        values,
        vec![
            OptionValue::Panel("notes-1".to_string()),
            OptionValue::Panel("notes-2".to_string()),
        ]
    );
}

#[test]
fn test_panel_dropdown_without_subsections_stays_button() {
    let source = "## Overview\n\nA\n\n## Related Docs\n\nNo subsections here.\n";
    let page = build_panel_page(&document(source), &panels_config("Related Docs"));

    assert!(page.nav.dropdown().is_none());
    assert_eq!(
        ids(&page.sections),
        vec!["panel-overview", "panel-related-docs"]
    );
    assert!(matches!(page.nav.controls[1], NavControl::Button(_)));
}

#[test]
fn test_panel_page_without_dropdown() {
    let page = build_panel_page(&document(GUIDE), &panels_config(""));

    assert_eq!(page.sections.len(), 3);
    assert_eq!(page.button_indices(), vec![0, 1, 2]);
}
