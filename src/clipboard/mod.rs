//! Copy/cut interception and the system clipboard.
//!
//! When copying is disabled the plugin arms a [`ClipboardGuard`] at load time.
//! The guard suppresses every copy, cut and context-menu event it sees and
//! names a notice for the first two. The guard is built from a settings
//! snapshot; changing the setting afterwards has no effect until the plugin is
//! loaded again.

use crate::constants::{NOTICE_COPY_DISABLED, NOTICE_CUT_DISABLED};
use crate::errors::{AppError, AppResult};
use crate::settings::Settings;
use std::process::Command;

/// Document-level events the guard intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardEvent {
    Copy,
    Cut,
    ContextMenu,
}

/// What the host should do with an intercepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the default action and propagation happen.
    Allow,
    /// Prevent the default action and stop propagation.
    Suppress {
        /// Notice to show, if any.
        notice: Option<&'static str>,
    },
}

/// Suppresses clipboard events while armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardGuard {
    _private: (),
}

impl ClipboardGuard {
    /// Arms a guard if `settings` disables copying.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings.disable_copying.then_some(Self { _private: () })
    }

    /// Decides the fate of one event.
    pub fn intercept(&self, event: ClipboardEvent) -> Disposition {
        let notice = match event {
            ClipboardEvent::Copy => Some(NOTICE_COPY_DISABLED),
            ClipboardEvent::Cut => Some(NOTICE_CUT_DISABLED),
            ClipboardEvent::ContextMenu => None,
        };
        Disposition::Suppress { notice }
    }
}

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip or xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> AppResult<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        pipe_to("xclip", &["-selection", "clipboard"], text)
            .or_else(|_| pipe_to("xsel", &["--clipboard", "--input"], text))
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(AppError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(program: &str, args: &[&str], text: &str) -> AppResult<()> {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(AppError::Clipboard(format!("{} exited with error", program)))
    }
}
