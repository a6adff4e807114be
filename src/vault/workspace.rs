use crate::errors::{AppError, AppResult};
use crate::host::{DocumentRef, ViewHandle, ViewState};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A single-view workspace whose state survives between invocations.
///
/// The active view's state is written to disk on every change. Each
/// invocation starts with the view restored under a fresh handle, and opening
/// a document replaces the view with a new one.
#[derive(Debug)]
pub struct TerminalWorkspace {
    state_path: PathBuf,
    active: Option<(ViewHandle, ViewState)>,
    next_view: u64,
    pending: bool,
}

impl TerminalWorkspace {
    /// Restores the workspace saved at `state_path`, if any.
    ///
    /// A state file that cannot be parsed is logged and ignored; the next
    /// change overwrites it.
    pub fn load(state_path: PathBuf) -> AppResult<Self> {
        let saved: Option<ViewState> = match fs::read_to_string(&state_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(
                        "Ignoring unreadable workspace state {}: {}",
                        state_path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let mut workspace = TerminalWorkspace {
            state_path,
            active: None,
            next_view: 0,
            pending: false,
        };
        if let Some(state) = saved.filter(|state| state.file.is_some()) {
            debug!("Restored workspace on {:?}", state.file);
            let view = workspace.new_view();
            workspace.active = Some((view, state));
        }
        Ok(workspace)
    }

    fn new_view(&mut self) -> ViewHandle {
        self.next_view += 1;
        ViewHandle(self.next_view)
    }

    fn save(&self) -> AppResult<()> {
        let Some((_, state)) = &self.active else {
            return Ok(());
        };
        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write then rename, so readers see the old state or the new one.
        let staging = self.state_path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(state)?)?;
        fs::rename(&staging, &self.state_path)?;
        Ok(())
    }

    pub fn active_document(&self) -> Option<DocumentRef> {
        self.active
            .as_ref()
            .and_then(|(_, state)| state.file.as_deref())
            .map(DocumentRef::new)
    }

    pub fn active_view(&self) -> Option<ViewHandle> {
        self.active.as_ref().map(|(view, _)| *view)
    }

    /// Shows `document` in a new view, in editing mode.
    pub fn open_document(&mut self, document: &DocumentRef) -> AppResult<ViewHandle> {
        let view = self.new_view();
        self.active = Some((
            view,
            ViewState {
                file: Some(document.path().to_string()),
                ..ViewState::default()
            },
        ));
        self.pending = true;
        self.save()?;
        debug!("Opened {} in view {:?}", document, view);
        Ok(view)
    }

    pub fn view_state(&self, view: ViewHandle) -> AppResult<ViewState> {
        match &self.active {
            Some((active, state)) if *active == view => Ok(state.clone()),
            _ => Err(AppError::Vault(format!("Unknown view {:?}", view))),
        }
    }

    pub fn set_view_state(&mut self, view: ViewHandle, state: ViewState) -> AppResult<()> {
        match &mut self.active {
            Some((active, current)) if *active == view => {
                *current = state;
            }
            _ => return Err(AppError::Vault(format!("Unknown view {:?}", view))),
        }
        self.pending = true;
        self.save()
    }

    /// The active view's state if it changed since the last call.
    pub fn take_pending(&mut self) -> Option<ViewState> {
        if !std::mem::take(&mut self.pending) {
            return None;
        }
        self.active.as_ref().map(|(_, state)| state.clone())
    }
}
