//! Error handling utilities for the daily-notes-tweaks application.
//!
//! This module provides the central error type `AppError`, the convenience alias
//! `AppResult`, and the more specific error enums for editor launches and
//! settings-file locking. Selection outcomes that are not failures (no daily
//! notes, only one daily note) live in [`crate::daily_notes::SelectionError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// # Examples
///
/// ```
/// use daily_notes_tweaks::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Errors raised while taking the settings file lock.
///
/// ```
/// use daily_notes_tweaks::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/vault/.obsidian/plugins/daily-notes-tweaks/data.json"),
/// };
/// assert!(format!("{}", error).contains("being written"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process holds the lock.
    #[error("Settings file is currently being written by another process: {path}")]
    FileBusy {
        /// The path to the file that is locked
        path: PathBuf,
    },

    /// Acquiring the lock failed for a technical reason.
    #[error("Failed to acquire lock for settings file {path}: {source}")]
    AcquisitionFailed {
        /// The path to the file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the application.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// ```
/// use daily_notes_tweaks::errors::AppError;
///
/// let error = AppError::Config("Missing vault directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing vault directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised by the vault host (unknown documents, bad paths, state files).
    #[error("Vault error: {0}")]
    Vault(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors related to file locking.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Settings or configuration JSON that could not be (de)serialized.
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Unknown or duplicate command ids.
    #[error("Command error: {0}")]
    Command(String),

    /// Failures writing to the system clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
