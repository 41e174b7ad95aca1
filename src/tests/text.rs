use super::{achievement_marker, substitute_variables_at, UNKNOWN_DATE};
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use tempfile::TempDir;

fn march_7() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap()
}

#[test]
fn test_date_variables() {
    let dir = TempDir::new().unwrap();
    let source = "Built {{currentDate}} ({{currentDateTime}}), (c) {{currentYear}}";

    let result = substitute_variables_at(source, dir.path(), march_7());

    assert_eq!(result, "Built 2025-03-07 (March 2025), (c) 2025");
}

#[test]
fn test_last_update_reads_file_date() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.md"), "notes").unwrap();
    let modified = fs::metadata(dir.path().join("notes.md"))
        .unwrap()
        .modified()
        .unwrap();
    let expected = DateTime::<Local>::from(modified).format("%Y-%m-%d").to_string();

    let result = substitute_variables_at(
        "Updated {{lastUpdate:notes.md}}, missing {{lastUpdate:gone.md}}.",
        dir.path(),
        march_7(),
    );

    assert_eq!(result, format!("Updated {expected}, missing {UNKNOWN_DATE}."));
}

#[test]
fn test_unterminated_variable_is_kept() {
    let dir = TempDir::new().unwrap();

    let result = substitute_variables_at("see {{lastUpdate:notes.md", dir.path(), march_7());

    assert_eq!(result, "see {{lastUpdate:notes.md");
}

#[test]
fn test_achievement_marker() {
    assert_eq!(
        achievement_marker("- Shipped v2 <! Team award"),
        Some(("- Shipped v2 ", "Team award"))
    );
    assert_eq!(achievement_marker("<!Solo"), Some(("", "Solo")));
    assert_eq!(achievement_marker("empty <!   "), None);
    assert_eq!(achievement_marker("<!-- a comment -->"), None);
    assert_eq!(achievement_marker("plain text"), None);
}
