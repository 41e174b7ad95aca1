//! Template variables and achievement markers in document text.
//!
//! Variables are filled in once, after includes are expanded and before headings are located:
//! `{{currentDate}}`, `{{currentYear}}`, `{{currentDateTime}}` and `{{lastUpdate:path}}`, the
//! last being the modification date of `path` relative to the document. Achievement markers
//! (`<!` followed by text) are left in the source and picked out when a line is drawn.

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

const LAST_UPDATE_PREFIX: &str = "{{lastUpdate:";
const VARIABLE_END: &str = "}}";

/// Text used when a `lastUpdate` file has no readable modification time.
pub const UNKNOWN_DATE: &str = "unknown";

#[must_use]
/// Fill in template variables using the current local time.
pub fn substitute_variables(markdown: &str, base: &Path) -> String {
    substitute_variables_at(markdown, base, Local::now())
}

#[must_use]
/// Fill in template variables as of `now`; `lastUpdate` paths resolve against `base`.
pub fn substitute_variables_at(markdown: &str, base: &Path, now: DateTime<Local>) -> String {
    let result = markdown
        .replace("{{currentDateTime}}", &now.format("%B %Y").to_string())
        .replace("{{currentDate}}", &now.format("%Y-%m-%d").to_string())
        .replace("{{currentYear}}", &now.format("%Y").to_string());

    substitute_last_update(&result, base)
}

fn substitute_last_update(markdown: &str, base: &Path) -> String {
    let mut result = String::with_capacity(markdown.len());
    let mut rest = markdown;

    while let Some(start) = rest.find(LAST_UPDATE_PREFIX) {
        let after = &rest[start + LAST_UPDATE_PREFIX.len()..];
        let Some(end) = after.find(VARIABLE_END) else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&last_update(&base.join(after[..end].trim())));
        rest = &after[end + VARIABLE_END.len()..];
    }

    result.push_str(rest);
    result
}

fn last_update(path: &Path) -> String {
    match fs::metadata(path).and_then(|metadata| metadata.modified()) {
        Ok(modified) => DateTime::<Local>::from(modified)
            .format("%Y-%m-%d")
            .to_string(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no modification time");
            UNKNOWN_DATE.to_string()
        }
    }
}

#[must_use]
/// Split a line at its achievement marker into the text before it and the marker text.
///
/// HTML comments (`<!--`) and markers with nothing after them are not achievements.
pub fn achievement_marker(line: &str) -> Option<(&str, &str)> {
    let position = line.find("<!")?;
    let (before, after) = line.split_at(position);
    if after.starts_with("<!--") {
        return None;
    }
    let marker = after[2..].trim_start();
    (!marker.is_empty()).then_some((before, marker))
}

#[cfg(test)]
#[path = "tests/text.rs"]
mod tests;
