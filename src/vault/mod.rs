//! A markdown vault on disk, served to the plugin as its host.
//!
//! [`Vault`] reads the daily-note configuration from the vault's `.obsidian`
//! directory, indexes markdown files and stores the plugin's settings.
//! [`TerminalHost`] combines it with a [`TerminalWorkspace`] and prints
//! notices to stderr.

mod workspace;

pub use workspace::TerminalWorkspace;

use crate::constants::{
    APP_CONFIG_FILE, DAILY_NOTES_CONFIG_FILE, DEFAULT_DAILY_NOTE_FORMAT, MARKDOWN_EXTENSION,
    PLUGIN_DATA_DIR, SETTINGS_FILE_NAME, WORKSPACE_FILE_NAME,
};
use crate::editor::Editor;
use crate::errors::{AppError, AppResult, LockError};
use crate::host::{
    ConfigProvider, DailyNoteConfig, DocumentIndex, DocumentRef, Notifier, SettingsStorage,
    ViewHandle, ViewMode, ViewState, Workspace,
};
use crate::preview;
use crate::vault_path;
use fs2::FileExt;
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[cfg(unix)]
use std::fs::Permissions;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Options of the daily-notes core plugin.
#[derive(Debug, Default, Deserialize)]
struct DailyNotesOptions {
    format: Option<String>,
    folder: Option<String>,
    template: Option<String>,
}

/// Daily-note keys of the vault-wide app options.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppOptions {
    daily_note_format: Option<String>,
    daily_note_folder: Option<String>,
    daily_note_template: Option<String>,
}

impl From<AppOptions> for DailyNotesOptions {
    fn from(options: AppOptions) -> Self {
        DailyNotesOptions {
            format: options.daily_note_format,
            folder: options.daily_note_folder,
            template: options.daily_note_template,
        }
    }
}

/// A vault rooted at an absolute directory.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Opens the vault at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Vault` for relative paths and `AppError::Io` if the
    /// directory cannot be created.
    pub fn open(root: &Path) -> AppResult<Self> {
        if !root.is_absolute() {
            return Err(AppError::Vault(format!(
                "Vault path must be absolute: {}",
                root.display()
            )));
        }

        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create vault directory: {}", e),
                ))
            })?;

            #[cfg(unix)]
            fs::set_permissions(root, Permissions::from_mode(0o700))?;

            debug!("Created vault directory {}", root.display());
        }

        Ok(Vault {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a vault-relative path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Vault` if the path tries to leave the vault.
    pub fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let normalized = vault_path::normalize(path);
        if normalized.split('/').any(|segment| segment == "..") {
            return Err(AppError::Vault(format!("Path escapes the vault: {}", path)));
        }
        if vault_path::is_root(&normalized) {
            return Ok(self.root.clone());
        }
        Ok(self.root.join(normalized))
    }

    fn plugin_file(&self, name: &str) -> PathBuf {
        self.root.join(PLUGIN_DATA_DIR).join(name)
    }

    fn workspace_file(&self) -> PathBuf {
        self.plugin_file(WORKSPACE_FILE_NAME)
    }

    fn settings_file(&self) -> PathBuf {
        self.plugin_file(SETTINGS_FILE_NAME)
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> AppResult<Option<T>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

impl ConfigProvider for Vault {
    fn daily_note_config(&self) -> AppResult<DailyNoteConfig> {
        let options = match Self::read_json::<DailyNotesOptions>(
            &self.root.join(DAILY_NOTES_CONFIG_FILE),
        )? {
            Some(options) => options,
            None => Self::read_json::<AppOptions>(&self.root.join(APP_CONFIG_FILE))?
                .map(DailyNotesOptions::from)
                .unwrap_or_default(),
        };

        let format = options
            .format
            .filter(|format| !format.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DAILY_NOTE_FORMAT.to_string());

        Ok(DailyNoteConfig {
            format,
            folder: options.folder.unwrap_or_default(),
            template: options.template.filter(|t| !t.trim().is_empty()),
        })
    }
}

impl DocumentIndex for Vault {
    fn markdown_documents(&self) -> AppResult<Vec<DocumentRef>> {
        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| AppError::Vault(format!("Failed to scan vault: {}", e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(relative) = self.relative_path(entry.path()) {
                if relative.ends_with(MARKDOWN_EXTENSION) {
                    documents.push(DocumentRef::new(relative));
                }
            }
        }

        debug!("Indexed {} markdown documents", documents.len());
        Ok(documents)
    }

    fn read_document(&self, path: &str) -> AppResult<String> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::Vault(format!("No such document: {}", path)),
            _ => AppError::Io(e),
        })
    }

    fn create_document(&mut self, path: &str, contents: &str) -> AppResult<DocumentRef> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    AppError::Vault(format!("Document already exists: {}", path))
                }
                _ => AppError::Io(e),
            })?;
        file.write_all(contents.as_bytes())?;

        Ok(DocumentRef::new(path))
    }
}

impl SettingsStorage for Vault {
    fn load_data(&self) -> AppResult<Option<serde_json::Value>> {
        Self::read_json(&self.settings_file())
    }

    /// Writes the settings under an exclusive lock.
    ///
    /// # Errors
    ///
    /// Returns `LockError::FileBusy` if another process holds the lock.
    fn save_data(&self, data: &serde_json::Value) -> AppResult<()> {
        let path = self.settings_file();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        lock_for_writing(&file, &path)?;

        file.set_len(0)?;
        let json = serde_json::to_string_pretty(data)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

fn lock_for_writing(file: &File, path: &Path) -> AppResult<()> {
    file.try_lock_exclusive().map_err(|e| {
        if e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
            || e.kind() == ErrorKind::WouldBlock
        {
            LockError::FileBusy {
                path: path.to_path_buf(),
            }
        } else {
            LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(())
}

/// The vault plus a terminal workspace.
pub struct TerminalHost {
    vault: Vault,
    workspace: TerminalWorkspace,
}

impl TerminalHost {
    /// Opens the vault at `root` and restores the last workspace state.
    pub fn open(root: &Path) -> AppResult<Self> {
        let vault = Vault::open(root)?;
        let workspace = TerminalWorkspace::load(vault.workspace_file())?;
        Ok(TerminalHost { vault, workspace })
    }

    /// Shows the active note if it was opened or changed mode.
    ///
    /// Reading mode writes the rendered note to `out`; editing mode launches
    /// `editor` on the file.
    pub fn present(
        &mut self,
        editor: &dyn Editor,
        out: &mut dyn Write,
        highlight_as_underline: bool,
        use_color: bool,
    ) -> AppResult<()> {
        let Some(ViewState {
            mode,
            file: Some(file),
        }) = self.workspace.take_pending()
        else {
            return Ok(());
        };

        match mode {
            ViewMode::Preview => {
                let contents = self.vault.read_document(&file)?;
                out.write_all(preview::render(&contents, highlight_as_underline, use_color).as_bytes())?;
                if !contents.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
                Ok(())
            }
            ViewMode::Source => editor.open(&self.vault.resolve(&file)?),
        }
    }
}

impl ConfigProvider for TerminalHost {
    fn daily_note_config(&self) -> AppResult<DailyNoteConfig> {
        self.vault.daily_note_config()
    }
}

impl DocumentIndex for TerminalHost {
    fn markdown_documents(&self) -> AppResult<Vec<DocumentRef>> {
        self.vault.markdown_documents()
    }

    fn read_document(&self, path: &str) -> AppResult<String> {
        self.vault.read_document(path)
    }

    fn create_document(&mut self, path: &str, contents: &str) -> AppResult<DocumentRef> {
        self.vault.create_document(path, contents)
    }
}

impl Workspace for TerminalHost {
    fn active_document(&self) -> Option<DocumentRef> {
        self.workspace.active_document()
    }

    fn active_view(&self) -> Option<ViewHandle> {
        self.workspace.active_view()
    }

    fn open_document(&mut self, document: &DocumentRef) -> AppResult<ViewHandle> {
        let full = self.vault.resolve(document.path())?;
        if !full.is_file() {
            return Err(AppError::Vault(format!("No such document: {}", document)));
        }
        self.workspace.open_document(document)
    }

    fn view_state(&self, view: ViewHandle) -> AppResult<ViewState> {
        self.workspace.view_state(view)
    }

    fn set_view_state(&mut self, view: ViewHandle, state: ViewState) -> AppResult<()> {
        self.workspace.set_view_state(view, state)
    }
}

impl Notifier for TerminalHost {
    fn notify(&self, message: &str) {
        if let Err(e) = writeln!(std::io::stderr(), "{}", message) {
            warn!("Failed to show notice: {}", e);
        }
    }
}

impl SettingsStorage for TerminalHost {
    fn load_data(&self) -> AppResult<Option<serde_json::Value>> {
        self.vault.load_data()
    }

    fn save_data(&self, data: &serde_json::Value) -> AppResult<()> {
        self.vault.save_data(data)
    }
}
