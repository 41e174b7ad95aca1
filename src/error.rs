//! Errors raised while loading documents, configuration and snapshots.
//!
//! The view controllers themselves never fail; everything here happens before
//! a page exists or after the viewer exits.

use std::io;
use thiserror::Error;

/// Failures surfaced to the command line.
#[derive(Debug, Error)]
pub enum Error {
    /// A document, config or snapshot file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The config file was read but is not valid.
    #[error("failed to parse config '{path}': {message}")]
    Config {
        /// Path of the offending config file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// The markdown grammar could not be loaded into the parser.
    #[error("failed to load markdown grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A format's heading query does not compile against its grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// tree-sitter returned no syntax tree.
    #[error("could not parse '{0}'")]
    Parse(String),

    /// A snapshot could not be serialised or deserialised.
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Terminal or filesystem failure outside of a specific file read.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
