//! vellum: section and panel navigation for markdown documents.
//!
//! A document is parsed into sections with tree-sitter, laid out as a page of
//! sections or flat panels, and driven by a view controller that keeps exactly
//! one region visible and the navigation controls consistent with it.

#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod lookup;
pub mod navigation;
pub mod page;
pub mod section;
pub mod snapshot;
pub mod structure;
pub mod text;
pub mod ui;

pub use error::{Error, Result};
