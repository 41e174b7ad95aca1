use super::{AppState, FileMode, View};
use crate::config::Config;
use crate::snapshot::ViewSnapshot;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

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

fn guide_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{GUIDE}").unwrap();
    file
}

fn config() -> Config {
    Config {
        dropdown_section: "Related Docs".to_string(),
        ..Config::default()
    }
}

fn opened(file: &NamedTempFile) -> AppState {
    let mut app = AppState::new(vec![file.path().to_path_buf()], config());
    app.open_selected().unwrap();
    app
}

#[test]
fn test_file_mode_follows_file_count() {
    let single = AppState::new(vec![PathBuf::from("a.md")], config());
    assert_eq!(single.file_mode, FileMode::Single);
    assert_eq!(single.current_view, View::Page);

    let multi = AppState::new(
        vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
        config(),
    );
    assert_eq!(multi.file_mode, FileMode::Multi);
    assert_eq!(multi.current_view, View::FileList);
}

#[test]
fn test_open_focuses_active_button() {
    let file = guide_file();
    let app = opened(&file);

    assert!(app.navigator.is_some());
    assert_eq!(app.current_view, View::Page);
    assert_eq!(app.focus, 0);
    assert_eq!(
        app.document_name,
        file.path().file_name().unwrap().to_string_lossy()
    );
}

#[test]
fn test_activate_focused_button() {
    let file = guide_file();
    let mut app = opened(&file);

    app.focus_next();
    app.focus_next();
    app.focus_next();
    assert_eq!(app.focus, 2, "Focus stops at the last control");

    app.activate_focused();

    let page = app.navigator.as_ref().unwrap().page();
    assert_eq!(page.visible().unwrap().id, "section-usage");
}

#[test]
fn test_dropdown_flow() {
    let file = guide_file();
    let mut app = opened(&file);

    app.focus_next();
    app.activate_focused();
    assert_eq!(app.current_view, View::Dropdown);
    assert!(app
        .navigator
        .as_ref()
        .unwrap()
        .page()
        .nav
        .dropdown()
        .unwrap()
        .focused);

    app.dropdown_down();
    app.dropdown_down();
    assert_eq!(app.dropdown_cursor, 1, "Cursor stops at the last option");
    app.choose_dropdown();

    assert_eq!(app.current_view, View::Page);
    let page = app.navigator.as_ref().unwrap().page();
    assert_eq!(page.visible().unwrap().id, "section-related-docs");
    assert_eq!(page.nav.dropdown().unwrap().label(), "Beta");
    assert!(!page.nav.dropdown().unwrap().focused);
}

#[test]
fn test_close_dropdown_without_choosing() {
    let file = guide_file();
    let mut app = opened(&file);

    app.focus_next();
    app.activate_focused();
    app.close_dropdown();

    assert_eq!(app.current_view, View::Page);
    let page = app.navigator.as_ref().unwrap().page();
    assert_eq!(page.visible().unwrap().id, "section-overview");
    assert_eq!(page.nav.dropdown().unwrap().selected, 0);
}

#[test]
fn test_close_depends_on_file_mode() {
    let file = guide_file();
    let mut single = opened(&file);
    assert!(!single.close(), "Single-file sessions end");

    let mut multi = AppState::new(
        vec![file.path().to_path_buf(), file.path().to_path_buf()],
        config(),
    );
    multi.open_selected().unwrap();
    assert!(multi.close());
    assert_eq!(multi.current_view, View::FileList);
}

#[test]
fn test_snapshot_round_trip_through_state() {
    let file = guide_file();
    let mut app = opened(&file);
    assert!(AppState::new(vec![], config()).snapshot().is_none());

    app.focus = 2;
    app.activate_focused();
    app.toggle_header();
    let snapshot = app.snapshot().unwrap();

    let mut restored = opened(&file);
    restored.restore(&snapshot);

    assert_eq!(restored.snapshot(), Some(snapshot));
    assert_eq!(restored.focus, 2);
}

#[test]
fn test_restore_rejects_other_document() {
    let file = guide_file();
    let mut app = opened(&file);
    let snapshot = ViewSnapshot {
        document: "other.md".to_string(),
        active_button: Some("usage".to_string()),
        ..ViewSnapshot::default()
    };

    app.restore(&snapshot);

    assert!(app.message.as_deref().unwrap().contains("other.md"));
    let page = app.navigator.as_ref().unwrap().page();
    assert_eq!(page.visible().unwrap().id, "section-overview");
}

#[test]
fn test_open_missing_file_fails() {
    let mut app = AppState::new(vec![PathBuf::from("/nonexistent/vellum.md")], config());

    assert!(app.open_selected().is_err());
    assert!(app.navigator.is_none());
}

#[test]
fn test_focus_control_ignores_missing_positions() {
    let file = guide_file();
    let mut app = opened(&file);

    assert!(app.focus_control(2));
    assert_eq!(app.focus, 2);

    assert!(!app.focus_control(8), "Only three controls");
    assert_eq!(app.focus, 2, "Focus stays put");

    app.activate_focused();
    let page = app.navigator.as_ref().unwrap().page();
    assert_eq!(page.visible().unwrap().id, "section-usage");
}

#[test]
fn test_focus_control_without_document() {
    let mut app = AppState::new(vec![PathBuf::from("a.md")], config());

    assert!(!app.focus_control(0));
    assert_eq!(app.focus, 0);
}
