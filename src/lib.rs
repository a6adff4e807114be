/*!
# daily-notes-tweaks

Small quality-of-life tweaks for daily notes in a markdown vault:

- Open a random daily note other than the one already open
- Switch past daily notes to reading mode when they are opened
- Optionally block copy, cut and the context menu
- Optionally show `==highlights==` underlined instead of marked

## Architecture

- `date_format`: moment-style date tokens, formatting and strict parsing
- `daily_notes`: identifying daily notes and picking one at random
- `plugin`: the plugin itself and the runtime that loads it
- `commands`, `events`: command registry and file-open notifications
- `clipboard`, `settings`, `preview`: copy guard, settings tab, reading view
- `host`: the traits the plugin needs from its host
- `vault`: a host backed by a vault directory and the terminal
- `cli`, `config`, `editor`, `errors`: the command-line shell around it all

## Usage Example

```rust,no_run
use daily_notes_tweaks::constants::COMMAND_OPEN_RANDOM;
use daily_notes_tweaks::plugin::{DailyNotesTweaks, Runtime};
use daily_notes_tweaks::vault::TerminalHost;
use daily_notes_tweaks::Config;

fn main() -> daily_notes_tweaks::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let host = TerminalHost::open(&config.vault_dir)?;
    let mut runtime = Runtime::load(DailyNotesTweaks::new(host))?;
    runtime.execute_command(COMMAND_OPEN_RANDOM)
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Copy/cut interception and the system clipboard
pub mod clipboard;
/// Command registry
pub mod commands;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Daily note identification and random selection
pub mod daily_notes;
/// Moment-style date formats
pub mod date_format;
/// External editor
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// File-open notifications
pub mod events;
/// Host collaborator traits
pub mod host;
/// The plugin and its runtime
pub mod plugin;
/// Reading view rendering
pub mod preview;
/// Plugin settings and the settings tab
pub mod settings;
/// Daily-note templates
pub mod template;
/// Vault-backed host
pub mod vault;
/// Vault-relative path helpers
pub mod vault_path;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use plugin::{DailyNotesTweaks, Runtime};
