//! The terminal host state: which document is open and what the user is pointing at.
//!
//! The view controller owns the page. This layer only tracks things a browser would own for
//! it: the focused nav control, whether the dropdown list is open, the highlighted option, and
//! status messages. Every change to the page itself goes through the [`Navigator`] handlers.

use crate::config::Config;
use crate::error::Result;
use crate::formats::markdown::MarkdownFormat;
use crate::input;
use crate::navigation::{self, Navigator};
use crate::page::NavControl;
use crate::section::Document;
use crate::snapshot::ViewSnapshot;
use std::path::PathBuf;

#[derive(PartialEq, Eq, Debug)]
/// Determines quit behavior based on how many documents were given.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays available documents for multi-file sessions.
    FileList,
    /// Shows the navigation bar and the visible section.
    Page,
    /// The dropdown list is open over the page.
    Dropdown,
}

/// Session state shared by the event loop and the renderer.
pub struct AppState {
    /// Document paths available in multi-file mode.
    pub files: Vec<PathBuf>,
    /// Selected document in the file list view.
    pub current_file_index: usize,
    /// Controls quit behavior and file list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Settings passed to every controller this session creates.
    pub config: Config,
    /// Controller of the open document.
    pub navigator: Option<Box<dyn Navigator>>,
    /// Name of the open document.
    pub document_name: String,
    /// Nav position holding keyboard focus.
    pub focus: usize,
    /// Highlighted option while the dropdown list is open.
    pub dropdown_cursor: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Initialises session state; multi-file sessions start on the file list.
    pub fn new(files: Vec<PathBuf>, config: Config) -> Self {
        let file_mode = if files.len() > 1 {
            FileMode::Multi
        } else {
            FileMode::Single
        };
        let current_view = if file_mode == FileMode::Multi {
            View::FileList
        } else {
            View::Page
        };

        Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            config,
            navigator: None,
            document_name: String::new(),
            focus: 0,
            dropdown_cursor: 0,
            message: None,
        }
    }

    /// Lay out `document` and hand it to a freshly initialised controller.
    pub fn open(&mut self, document: &Document) {
        let navigator = navigation::initialize(document, &self.config);
        self.focus = navigator
            .page()
            .nav
            .active_buttons()
            .first()
            .copied()
            .unwrap_or(0);
        self.navigator = Some(navigator);
        self.document_name.clone_from(&document.name);
        self.dropdown_cursor = 0;
        self.message = None;
        self.current_view = View::Page;
    }

    /// Load and open the document selected in the file list.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn open_selected(&mut self) -> Result<()> {
        let Some(path) = self.files.get(self.current_file_index).cloned() else {
            return Ok(());
        };
        let document = input::load_document(&path, &self.config, &MarkdownFormat)?;
        self.open(&document);
        Ok(())
    }

    /// Leave the open document. Returns `false` when the session should end instead.
    pub fn close(&mut self) -> bool {
        if self.file_mode == FileMode::Multi {
            self.current_view = View::FileList;
            true
        } else {
            false
        }
    }

    fn control_count(&self) -> usize {
        self.navigator
            .as_ref()
            .map_or(0, |nav| nav.page().nav.controls.len())
    }

    /// Move keyboard focus to the next nav control.
    pub fn focus_next(&mut self) {
        if self.focus + 1 < self.control_count() {
            self.focus += 1;
        }
    }

    /// Move keyboard focus to the nav control at `index`.
    ///
    /// Returns `false`, leaving focus where it was, if there is no control at `index`.
    pub fn focus_control(&mut self, index: usize) -> bool {
        if index < self.control_count() {
            self.focus = index;
            true
        } else {
            false
        }
    }

    /// Move keyboard focus to the previous nav control.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Activate the focused control: click a button, or open the dropdown list.
    pub fn activate_focused(&mut self) {
        let is_dropdown = self.navigator.as_ref().is_some_and(|nav| {
            matches!(
                nav.page().nav.controls.get(self.focus),
                Some(NavControl::Dropdown(_))
            )
        });

        if is_dropdown {
            self.open_dropdown();
        } else if let Some(nav) = self.navigator.as_mut() {
            nav.click(self.focus);
        }
    }

    /// Open the dropdown list with its current selection highlighted.
    pub fn open_dropdown(&mut self) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        let Some(selected) = nav.page().nav.dropdown().map(|d| d.selected) else {
            return;
        };
        nav.focus_dropdown(true);
        self.dropdown_cursor = selected.saturating_sub(1);
        self.current_view = View::Dropdown;
    }

    /// Close the dropdown list without choosing.
    pub fn close_dropdown(&mut self) {
        if let Some(nav) = self.navigator.as_mut() {
            nav.focus_dropdown(false);
        }
        self.current_view = View::Page;
    }

    /// Highlight the next dropdown option.
    pub fn dropdown_down(&mut self) {
        let count = self
            .navigator
            .as_ref()
            .and_then(|nav| nav.page().nav.dropdown().map(|d| d.options.len()))
            .unwrap_or(0);
        if self.dropdown_cursor + 1 < count {
            self.dropdown_cursor += 1;
        }
    }

    /// Highlight the previous dropdown option.
    pub fn dropdown_up(&mut self) {
        self.dropdown_cursor = self.dropdown_cursor.saturating_sub(1);
    }

    /// Choose the highlighted option and close the list.
    pub fn choose_dropdown(&mut self) {
        if let Some(nav) = self.navigator.as_mut() {
            nav.select(self.dropdown_cursor);
        }
        self.current_view = View::Page;
    }

    /// Click the visible section's header.
    pub fn toggle_header(&mut self) {
        if let Some(nav) = self.navigator.as_mut() {
            nav.toggle_visible();
        }
    }

    /// Scroll the visible section by `delta` lines.
    pub fn scroll(&mut self, delta: i32) {
        if let Some(nav) = self.navigator.as_mut() {
            nav.scroll_by(delta);
        }
    }

    /// Replay `snapshot` onto the open document.
    pub fn restore(&mut self, snapshot: &ViewSnapshot) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        if snapshot.document != self.document_name {
            self.message = Some(format!(
                "Snapshot is for '{}', not '{}'",
                snapshot.document, self.document_name
            ));
            return;
        }
        snapshot.restore(&mut **nav);
        if let Some(&active) = nav.page().nav.active_buttons().first() {
            self.focus = active;
        } else if let Ok(dropdown) = nav.page().dropdown_index() {
            if nav.page().nav.dropdown().is_some_and(|d| d.selected > 0) {
                self.focus = dropdown;
            }
        }
    }

    #[must_use]
    /// Snapshot of the open document's navigation state.
    pub fn snapshot(&self) -> Option<ViewSnapshot> {
        self.navigator
            .as_deref()
            .map(|nav| ViewSnapshot::capture(nav, &self.document_name))
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
