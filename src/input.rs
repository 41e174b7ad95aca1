//! Loading documents from disk and turning them into sections.
//!
//! Discovery walks the given paths for matching files, include lines are expanded textually,
//! template variables are filled in, and then a single tree-sitter pass locates every heading.
//! Sections and their body blocks are cut from the source at those heading positions.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{Block, Document, Heading, IdAllocator, Section};
use crate::text;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Marker at the top of a file that must never be spliced in verbatim.
pub const PRIVATE_MARKER: &str = "PRIVATE_NEVER_AS_IS";

/// Prefix of a line that pulls another markdown file into the document.
pub const INCLUDE_PREFIX: &str = "Include:";

const MAX_INCLUDE_DEPTH: usize = 8;

/// Collect document files from the given paths.
///
/// Files are taken as given; directories are walked recursively for files whose extension is
/// in `extensions`. With no paths the working directory is scanned.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let paths = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(&path, extensions, &mut found)?;
            found.sort();
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path);
        } else {
            tracing::warn!(path = %path.display(), "skipping missing path");
        }
    }

    Ok(documents)
}

fn walk_dir(dir: &Path, extensions: &[String], found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, extensions, found)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e == ext))
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Read a document, expand its includes and split it into sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path, config: &Config, format: &dyn Format) -> Result<Document> {
    let markdown = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let expanded = text::substitute_variables(&process_includes(&markdown, base), base);
    if expanded.len() != markdown.len() {
        tracing::debug!(
            path = %path.display(),
            source_lines = markdown.lines().count(),
            expanded_lines = expanded.lines().count(),
            "expanded includes"
        );
    }

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let document = extract_document(&expanded, format, config.section_level, &name)?;
    tracing::info!(
        document = %document.name,
        sections = document.sections.len(),
        "loaded document"
    );
    Ok(document)
}

/// Locate every heading in `source`, in document order.
///
/// # Errors
///
/// Returns an error if the grammar or a query cannot be loaded, or parsing yields no tree.
pub fn extract_headings(source: &str, format: &dyn Format) -> Result<Vec<Heading>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("markdown source".to_string()))?;

    let heading_query = Query::new(&language, format.heading_query())?;
    let title_query = Query::new(&language, format.title_query())?;
    let mut cursor = QueryCursor::new();
    let mut title_cursor = QueryCursor::new();
    let mut matches = cursor.matches(&heading_query, tree.root_node(), source.as_bytes());

    let mut headings = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Some(level) = format.heading_level(node) else {
                continue;
            };

            let raw_title = title_cursor
                .matches(&title_query, node, source.as_bytes())
                .next()
                .and_then(|title| title.captures.first())
                .map_or("", |title| &source[title.node.byte_range()]);

            let start = node.start_byte();
            let end = source[start..]
                .find('\n')
                .map_or(source.len(), |offset| start + offset + 1);

            headings.push(Heading {
                level,
                title: format.plain_text(raw_title),
                byte_start: start,
                byte_end: end,
                line: node.start_position().row,
            });
        }
    }

    headings.sort_by_key(|h| h.byte_start);
    headings.dedup_by_key(|h| h.byte_start);
    Ok(headings)
}

/// Split `source` into sections starting at each `section_level` heading.
///
/// A section runs until the next heading at the same or a shallower level. Deeper headings
/// inside it become [`Block::Heading`] entries with the text around them as [`Block::Text`].
///
/// # Errors
///
/// Returns an error if heading extraction fails.
pub fn extract_document(
    source: &str,
    format: &dyn Format,
    section_level: usize,
    name: &str,
) -> Result<Document> {
    let headings = extract_headings(source, format)?;
    let first_section = headings
        .iter()
        .position(|h| h.level == section_level)
        .unwrap_or(headings.len());

    let title = headings[..first_section]
        .iter()
        .find(|h| h.level == 1 && section_level > 1)
        .map(|h| h.title.clone());

    let mut ids = IdAllocator::default();
    let mut sections = Vec::new();

    for (i, heading) in headings.iter().enumerate() {
        if heading.level != section_level {
            continue;
        }

        let end_index = headings[i + 1..]
            .iter()
            .position(|h| h.level <= section_level)
            .map_or(headings.len(), |offset| i + 1 + offset);
        let byte_end = headings
            .get(end_index)
            .map_or(source.len(), |h| h.byte_start);

        sections.push(Section {
            id: ids.allocate(&heading.title),
            title: heading.title.clone(),
            level: heading.level,
            line: heading.line,
            byte_start: heading.byte_end,
            byte_end,
            blocks: split_blocks(
                source,
                heading.byte_end,
                byte_end,
                &headings[i + 1..end_index],
            ),
        });
    }

    Ok(Document {
        name: name.to_string(),
        title,
        sections,
    })
}

fn split_blocks(source: &str, start: usize, end: usize, nested: &[Heading]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut cursor = start;

    for heading in nested {
        push_text(&mut blocks, &source[cursor..heading.byte_start]);
        blocks.push(Block::Heading {
            level: heading.level,
            title: heading.title.clone(),
        });
        cursor = heading.byte_end;
    }
    push_text(&mut blocks, &source[cursor.min(end)..end]);

    blocks
}

fn push_text(blocks: &mut Vec<Block>, text: &str) {
    let text = trim_blank_lines(text);
    if !text.is_empty() {
        blocks.push(Block::Text(text.to_string()));
    }
}

/// Strip whole blank lines from both ends, keeping indentation of the first real line.
fn trim_blank_lines(text: &str) -> &str {
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    text[start..].trim_end()
}

/// Expand `Include: [label](file.md)` lines relative to `base`.
///
/// The included file's first H1 is dropped and its remaining headings are shifted to sit under
/// the heading the include appears beneath.
#[must_use]
pub fn process_includes(markdown: &str, base: &Path) -> String {
    expand_includes(markdown, base, 0, false, 0)
}

fn expand_includes(
    markdown: &str,
    base: &Path,
    parent_level: usize,
    is_included: bool,
    depth: usize,
) -> String {
    let mut result = String::with_capacity(markdown.len());
    let mut current_level = parent_level;
    let mut first_h1_skipped = false;
    let mut fence: Option<char> = None;

    for line in markdown.lines() {
        let trimmed = line.trim();

        // Code is copied as-is: fenced blocks, and lines indented like an indented code block.
        if let Some(marker) = fence_marker(line) {
            match fence {
                None => fence = Some(marker),
                Some(open) if open == marker => fence = None,
                Some(_) => {}
            }
            result.push_str(line);
            result.push('\n');
            continue;
        }
        if fence.is_some() || is_indented_code(line) {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        if let Some(level) = heading_marker_level(trimmed) {
            if !is_included {
                current_level = level;
                result.push_str(line);
                result.push('\n');
                continue;
            }
            if level == 1 && !first_h1_skipped {
                first_h1_skipped = true;
                continue;
            }

            let effective = level + parent_level.max(1) - 1;
            current_level = effective;

            let unindented = line.trim_start();
            result.push_str(&line[..line.len() - unindented.len()]);
            result.push_str(&"#".repeat(effective));
            result.push_str(&unindented[level..]);
            result.push('\n');
            continue;
        }

        if let Some(target) = include_target(trimmed) {
            if depth >= MAX_INCLUDE_DEPTH {
                tracing::warn!(target, "include depth limit reached");
            } else {
                let path = base.join(target);
                match fs::read_to_string(&path) {
                    Ok(content) if content.starts_with(PRIVATE_MARKER) => {
                        tracing::debug!(target, "leaving private include unexpanded");
                    }
                    Ok(content) => {
                        let parent = path.parent().unwrap_or(base);
                        result.push_str(&expand_includes(
                            &content,
                            parent,
                            current_level,
                            true,
                            depth + 1,
                        ));
                        result.push('\n');
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(target, error = %e, "could not include file");
                        result.push_str(&format!("**Error: Could not include '{target}': {e}**\n"));
                        continue;
                    }
                }
            }
        }

        result.push_str(line);
        result.push('\n');
    }

    result
}

/// Fence character if `line` opens or closes a fenced code block.
fn fence_marker(line: &str) -> Option<char> {
    if is_indented_code(line) {
        return None;
    }
    let trimmed = line.trim_start();
    ['`', '~']
        .into_iter()
        .find(|&c| trimmed.chars().take_while(|&t| t == c).count() >= 3)
}

fn is_indented_code(line: &str) -> bool {
    line.starts_with('\t') || line.chars().take_while(|&c| c == ' ').count() >= 4
}

fn heading_marker_level(trimmed: &str) -> Option<usize> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 {
        return None;
    }
    trimmed[level..]
        .chars()
        .next()
        .is_none_or(char::is_whitespace)
        .then_some(level)
}

fn include_target(trimmed: &str) -> Option<&str> {
    if !trimmed.starts_with(INCLUDE_PREFIX) {
        return None;
    }
    let open = trimmed.find('(')?;
    let close = trimmed[open..].find(')')? + open;
    let target = &trimmed[open + 1..close];
    Path::new(target)
        .extension()
        .is_some_and(|ext| ext == "md")
        .then_some(target)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
