//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar and the queries that locate headings and their
//! titles. Everything downstream (sections, blocks, pages) is built from those heading positions.

pub mod markdown;

/// Grammar and heading queries for one document syntax.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose `@heading` captures span one heading each.
    fn heading_query(&self) -> &str;
    /// Query run on a heading node whose `@title` capture holds the heading text.
    fn title_query(&self) -> &str;
    /// Nesting depth of a captured heading node.
    fn heading_level(&self, heading: tree_sitter::Node) -> Option<usize>;
    /// The heading text as a reader sees it, with inline markup removed.
    fn plain_text(&self, raw: &str) -> String {
        raw.trim().to_string()
    }
}
