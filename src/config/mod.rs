//! Application configuration.
//!
//! Settings are read from environment variables with sensible defaults:
//!
//! - `TWEAKS_VAULT_DIR`: the vault directory (defaults to `~/Documents/Vault`)
//! - `TWEAKS_EDITOR`: editor used for notes opened in editing mode
//! - `EDITOR`: fallback editor if `TWEAKS_EDITOR` is not set (defaults to `vim`)
//! - `HOME`: used to build the default vault path
//!
//! The vault directory may be overridden from the command line.

use crate::constants::{
    DEFAULT_EDITOR_COMMAND, DEFAULT_VAULT_SUBDIR, EDITOR_FORBIDDEN_CHARS, ENV_VAR_EDITOR,
    ENV_VAR_HOME, ENV_VAR_TWEAKS_EDITOR, ENV_VAR_VAULT_DIR, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one invocation.
///
/// ```
/// use daily_notes_tweaks::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     vault_dir: PathBuf::from("/path/to/vault"),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Editor command for notes opened in editing mode.
    pub editor: String,

    /// Root directory of the vault.
    pub vault_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("vault_dir", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            vault_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Checks that an editor command is a single program name or path.
    ///
    /// Commands with spaces or shell metacharacters are rejected; editors
    /// that need arguments should be wrapped in a script.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = EDITOR_FORBIDDEN_CHARS
            .iter()
            .find(|&&ch| editor_cmd.contains(ch))
        {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the vault path cannot be expanded or is
    /// empty, or if the editor command fails validation.
    pub fn load() -> AppResult<Self> {
        Self::load_with_vault(None)
    }

    /// Loads configuration from the environment, with `vault` taking
    /// precedence over `TWEAKS_VAULT_DIR` when given.
    pub fn load_with_vault(vault: Option<&str>) -> AppResult<Self> {
        let editor_raw = env::var(ENV_VAR_TWEAKS_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());
        let editor = Config::validate_editor_command(&editor_raw)?;

        let vault_raw = match vault {
            Some(path) => path.to_string(),
            None => env::var(ENV_VAR_VAULT_DIR).unwrap_or_else(|_| {
                let home = env::var(ENV_VAR_HOME).unwrap_or_default();
                format!("{}/{}", home, DEFAULT_VAULT_SUBDIR)
            }),
        };
        let vault_dir = Self::expand_path(&vault_raw)?;

        if vault_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Vault directory path is empty".to_string()));
        }

        Ok(Config {
            editor: editor.to_string(),
            vault_dir,
        })
    }

    /// Checks that the configuration is usable: a non-empty editor and an
    /// absolute vault path.
    pub fn validate(&self) -> AppResult<()> {
        if self.vault_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Vault directory path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.vault_dir.is_absolute() {
            return Err(AppError::Config(
                "Vault directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}
