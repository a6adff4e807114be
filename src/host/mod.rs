//! Host collaborator interfaces.
//!
//! The plugin never touches the filesystem, the clock of the user interface or
//! the view layer directly. Everything it needs from its host is expressed as
//! one of the small traits below, so the terminal host in [`crate::vault`] and
//! the in-memory hosts used in tests are interchangeable.

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily-note configuration as published by the host.
///
/// `folder` may be empty or `/`, meaning the vault root. `template` is carried
/// along for note creation and is not consulted when classifying notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNoteConfig {
    /// Moment-style date format used for file names.
    pub format: String,
    /// Folder daily notes live in, relative to the vault root.
    pub folder: String,
    /// Optional template note used when creating a daily note.
    pub template: Option<String>,
}

impl Default for DailyNoteConfig {
    fn default() -> Self {
        Self {
            format: crate::constants::DEFAULT_DAILY_NOTE_FORMAT.to_string(),
            folder: String::new(),
            template: None,
        }
    }
}

/// A document known to the host, addressed by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRef {
    path: String,
}

impl DocumentRef {
    /// Creates a reference from a path, normalizing it.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: crate::vault_path::normalize(path.as_ref()),
        }
    }

    /// Vault-relative path, forward-slash separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True for markdown documents.
    pub fn is_markdown(&self) -> bool {
        self.path.ends_with(crate::constants::MARKDOWN_EXTENSION)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Opaque handle to an open view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// Presentation mode of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Editable.
    #[default]
    Source,
    /// Read-only reading view.
    Preview,
}

/// State of a view as reported by the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Presentation mode.
    pub mode: ViewMode,
    /// Document shown in the view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Supplies the daily-note configuration. Called on every operation.
pub trait ConfigProvider {
    /// Current configuration.
    fn daily_note_config(&self) -> AppResult<DailyNoteConfig>;
}

/// Read access to the vault's documents, plus creation of new notes.
pub trait DocumentIndex {
    /// All markdown documents, in the host's enumeration order.
    fn markdown_documents(&self) -> AppResult<Vec<DocumentRef>>;

    /// Reads a document's contents.
    fn read_document(&self, path: &str) -> AppResult<String>;

    /// Creates a new document. Fails if it already exists.
    fn create_document(&mut self, path: &str, contents: &str) -> AppResult<DocumentRef>;
}

/// Open views and their presentation state.
pub trait Workspace {
    /// Document shown in the active view, if any.
    fn active_document(&self) -> Option<DocumentRef>;

    /// The active view, if any.
    fn active_view(&self) -> Option<ViewHandle>;

    /// Opens `document` in the active view and returns that view.
    fn open_document(&mut self, document: &DocumentRef) -> AppResult<ViewHandle>;

    /// Reads a view's state.
    fn view_state(&self, view: ViewHandle) -> AppResult<ViewState>;

    /// Replaces a view's state.
    fn set_view_state(&mut self, view: ViewHandle, state: ViewState) -> AppResult<()>;
}

/// Transient user-facing notices. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Opaque persistence for the plugin's settings.
pub trait SettingsStorage {
    /// Previously saved data, or `None` when nothing was saved yet.
    fn load_data(&self) -> AppResult<Option<serde_json::Value>>;

    /// Persists `data`, replacing what was there.
    fn save_data(&self, data: &serde_json::Value) -> AppResult<()>;
}

/// Everything the plugin needs from its host.
pub trait Host: ConfigProvider + DocumentIndex + Workspace + Notifier + SettingsStorage {}

impl<T> Host for T where T: ConfigProvider + DocumentIndex + Workspace + Notifier + SettingsStorage {}
