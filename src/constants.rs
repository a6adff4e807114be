//! Constants used throughout the application.
//!
//! Centralized so that paths inside the vault, environment variable names and
//! user-facing notices stay consistent between the library and the binary.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "daily-notes-tweaks";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "Random daily notes and reading-mode tweaks for markdown vaults";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the vault directory.
pub const ENV_VAR_VAULT_DIR: &str = "TWEAKS_VAULT_DIR";
/// Environment variable for specifying the preferred editor.
pub const ENV_VAR_TWEAKS_EDITOR: &str = "TWEAKS_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default vault location within the user's home directory.
pub const DEFAULT_VAULT_SUBDIR: &str = "Documents/Vault";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Vault layout
/// Extension of markdown documents, including the dot.
pub const MARKDOWN_EXTENSION: &str = ".md";
/// Daily-notes core plugin options, relative to the vault root.
pub const DAILY_NOTES_CONFIG_FILE: &str = ".obsidian/daily-notes.json";
/// Vault-wide app options, used as a fallback source of daily-note settings.
pub const APP_CONFIG_FILE: &str = ".obsidian/app.json";
/// This plugin's data directory, relative to the vault root.
pub const PLUGIN_DATA_DIR: &str = ".obsidian/plugins/daily-notes-tweaks";
/// File name of the persisted settings inside the plugin directory.
pub const SETTINGS_FILE_NAME: &str = "data.json";
/// File name of the persisted workspace state inside the plugin directory.
pub const WORKSPACE_FILE_NAME: &str = "workspace.json";

// Daily notes
/// Date format used when the host does not configure one.
pub const DEFAULT_DAILY_NOTE_FORMAT: &str = "YYYY-MM-DD";

// Commands
/// Command id for opening a random past daily note.
pub const COMMAND_OPEN_RANDOM: &str = "open-random-daily-note";
/// Display name for the random daily note command.
pub const COMMAND_OPEN_RANDOM_NAME: &str = "Open random daily note";
/// Command id for opening today's daily note.
pub const COMMAND_OPEN_TODAY: &str = "open-today-daily-note";
/// Display name for the today command.
pub const COMMAND_OPEN_TODAY_NAME: &str = "Open today's daily note";

// Notices
/// Shown when a copy is intercepted.
pub const NOTICE_COPY_DISABLED: &str = "Copying is disabled";
/// Shown when a cut is intercepted.
pub const NOTICE_CUT_DISABLED: &str = "Cutting is disabled";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "daily-notes-tweaks";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
