//! Markdown format implementation using tree-sitter-md.
//!
//! Only ATX-style headings (# syntax) are recognised. Because the grammar does the locating,
//! lines starting with `#` inside code blocks are never mistaken for headings. Titles are
//! reparsed with the inline grammar so `## **Projects**` reads as `Projects`.

use crate::formats::Format;
use tree_sitter::{Node, Parser};

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn title_query(&self) -> &'static str {
        "(atx_heading (atx_h1_marker)? (atx_h2_marker)? (atx_h3_marker)? (atx_h4_marker)? (atx_h5_marker)? (atx_h6_marker)? (inline) @title)"
    }

    fn heading_level(&self, heading: Node) -> Option<usize> {
        let mut cursor = heading.walk();
        let level = heading.children(&mut cursor).find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse().ok())
        });
        level
    }

    fn plain_text(&self, raw: &str) -> String {
        let mut parser = Parser::new();
        let mut text = String::new();
        match parser
            .set_language(&tree_sitter_md::INLINE_LANGUAGE.into())
            .ok()
            .and_then(|()| parser.parse(raw, None))
        {
            Some(tree) => collect_text(tree.root_node(), raw, &mut text),
            None => text.push_str(raw),
        }
        strip_closing_sequence(text.trim()).to_string()
    }
}

/// Append the visible text under `node`, dropping delimiters and link destinations.
fn collect_text(node: Node, source: &str, out: &mut String) {
    match node.kind() {
        "emphasis_delimiter" | "code_span_delimiter" => return,
        "backslash_escape" => {
            out.push_str(&source[node.start_byte() + 1..node.end_byte()]);
            return;
        }
        "inline_link" | "full_reference_link" | "collapsed_reference_link" | "shortcut_link"
        | "image" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if matches!(child.kind(), "link_text" | "image_description") {
                    collect_text(child, source, out);
                }
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    let mut pos = node.start_byte();
    for child in node.children(&mut cursor) {
        out.push_str(&source[pos..child.start_byte()]);
        collect_text(child, source, out);
        pos = child.end_byte();
    }
    out.push_str(&source[pos..node.end_byte()]);
}

/// Optional closing sequence: "## Title ##"
fn strip_closing_sequence(title: &str) -> &str {
    let without = title.trim_end_matches('#');
    if without.len() != title.len() && (without.is_empty() || without.ends_with(char::is_whitespace))
    {
        without.trim_end()
    } else {
        title
    }
}
