//! Section representation for tree-sitter parsed documents.
//!
//! A section is the run of a document between one section-level heading and the next heading
//! of the same or shallower level. Its body is kept as a flat list of sibling blocks, so that
//! later transforms can partition it at heading boundaries without reparsing.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One sibling node of a section body.
pub enum Block {
    /// A heading nested below the section heading.
    Heading {
        /// Heading depth (number of `#`).
        level: usize,
        /// Heading text without markup symbols.
        title: String,
    },
    /// Markdown text between two headings, trimmed of surrounding blank lines.
    Text(String),
}

impl Block {
    #[must_use]
    /// Level of this block if it is a heading.
    pub fn heading_level(&self) -> Option<usize> {
        match self {
            Self::Heading { level, .. } => Some(*level),
            Self::Text(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
/// Heading located by the format's query.
pub struct Heading {
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Byte offset where the heading line begins.
    pub byte_start: usize,
    /// Byte offset just past the heading line, where its content begins.
    pub byte_end: usize,
    /// Zero-based line of the heading.
    pub line: usize,
}

#[derive(Clone, Debug)]
/// Hierarchical document division with its body split into blocks.
pub struct Section {
    /// Unique slug derived from the title.
    pub id: String,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Nesting depth of the section heading.
    pub level: usize,
    /// Zero-based line of the section heading.
    pub line: usize,
    /// Byte offset where section content begins (after the heading).
    pub byte_start: usize,
    /// Byte offset where the next section begins or file ends.
    pub byte_end: usize,
    /// Sibling blocks making up the body.
    pub blocks: Vec<Block>,
}

impl Section {
    #[must_use]
    /// Headings in the body at exactly `level`.
    pub fn headings_at(&self, level: usize) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: l, title } if *l == level => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
/// Parsed document: optional title plus its sections in order.
pub struct Document {
    /// Display name, usually the file name.
    pub name: String,
    /// First level-1 heading preceding the sections, if any.
    pub title: Option<String>,
    /// Sections at the configured section level.
    pub sections: Vec<Section>,
}

#[must_use]
/// Lowercase, hyphen-separated identifier for a title.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Allocates slugs that are unique within one page.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: Vec<String>,
}

impl IdAllocator {
    /// Next free id for `title`: `slug`, then `slug-1`, `slug-2`, ...
    pub fn allocate(&mut self, title: &str) -> String {
        let mut base = slugify(title);
        if base.is_empty() {
            base = "section".to_string();
        }

        let mut id = base.clone();
        let mut counter = 1;
        while self.used.contains(&id) {
            id = format!("{base}-{counter}");
            counter += 1;
        }

        self.used.push(id.clone());
        id
    }
}
