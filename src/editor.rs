//! External editor used when a note is presented in editing mode.
//!
//! The [`Editor`] trait lets the terminal workspace be exercised in tests
//! without spawning a process.

use crate::errors::{AppResult, EditorError};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens a note for editing.
pub trait Editor {
    /// Opens `path` and returns once the editor has exited.
    fn open(&self, path: &Path) -> AppResult<()>;
}

/// Launches the configured editor command with the note path as its argument.
///
/// ```no_run
/// use daily_notes_tweaks::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor::new("vim");
/// editor.open(Path::new("/tmp/2024-01-06.md")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Editor for SystemEditor {
    /// # Errors
    ///
    /// - `EditorError::CommandNotFound` if the command does not exist
    /// - `EditorError::PermissionDenied` if it cannot be executed
    /// - `EditorError::ExecutionFailed` for other spawn failures
    /// - `EditorError::NonZeroExit` if the editor exits unsuccessfully
    fn open(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor {} for {}", self.command, path.display());

        let status = Command::new(&self.command).arg(path).status().map_err(|e| {
            let command = self.command.clone();
            match e.kind() {
                std::io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
                std::io::ErrorKind::PermissionDenied => {
                    EditorError::PermissionDenied { command, source: e }
                }
                _ => EditorError::ExecutionFailed { command, source: e },
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                command: self.command.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}
