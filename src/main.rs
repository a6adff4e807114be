/*!
# daily-notes-tweaks

Command-line host for the daily-notes tweaks: open a random past daily note,
open today's note, open any note (past daily notes open in reading mode),
list daily notes, copy a note unless copying is disabled, and manage the
plugin's settings.

## Usage

```text
daily-notes-tweaks [--vault DIR] [--log-format text|json] [-v] <COMMAND>

Commands:
  random                     Open a random daily note other than the active one
  today                      Open today's daily note, creating it if needed
  open <PATH>                Open a note by its path inside the vault
  list                       List every daily note in the vault
  copy <PATH>                Copy a note's contents to the system clipboard
  commands                   List the registered commands
  settings [set KEY VALUE]   Show or change settings
```

## Configuration

- `TWEAKS_VAULT_DIR`: the vault (defaults to `~/Documents/Vault`)
- `TWEAKS_EDITOR` or `EDITOR`: editor for notes opened in editing mode (defaults to `vim`)
- `RUST_LOG`: log filter (defaults to `info`, or `debug` with `-v`)
*/

use console::Term;
use daily_notes_tweaks::cli::{CliArgs, Command, SettingsAction};
use daily_notes_tweaks::clipboard::{copy_to_clipboard, ClipboardEvent, Disposition};
use daily_notes_tweaks::config::Config;
use daily_notes_tweaks::constants::{
    COMMAND_OPEN_RANDOM, COMMAND_OPEN_TODAY, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON,
    TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use daily_notes_tweaks::editor::SystemEditor;
use daily_notes_tweaks::errors::AppResult;
use daily_notes_tweaks::host::DocumentIndex;
use daily_notes_tweaks::plugin::{DailyNotesTweaks, Runtime};
use daily_notes_tweaks::settings::SettingKey;
use daily_notes_tweaks::vault::TerminalHost;
use std::io;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn init_tracing(log_format: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).with_span_list(true).init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() {
    let args = CliArgs::parse();
    init_tracing(&args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!(error = %e, "Application error");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    let config = Config::load_with_vault(args.vault.as_deref())?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let host = TerminalHost::open(&config.vault_dir)?;
    let mut runtime = Runtime::load(DailyNotesTweaks::new(host))?;

    match args.command {
        Command::Random => runtime.execute_command(COMMAND_OPEN_RANDOM)?,
        Command::Today => runtime.execute_command(COMMAND_OPEN_TODAY)?,
        Command::Open { path } => {
            runtime.open_file(&path)?;
        }
        Command::List => {
            for note in runtime.plugin().daily_notes()? {
                println!("{}", note);
            }
        }
        Command::Copy { path } => copy_note(&runtime, &path)?,
        Command::Commands => {
            for command in runtime.commands() {
                println!("{}\t{}", command.id, command.name);
            }
        }
        Command::Settings { action } => {
            let mut tab = runtime.plugin_mut().settings_tab();
            if let Some(SettingsAction::Set { key, value }) = action {
                tab.set(SettingKey::parse(&key)?, value)?;
                info!("Updated setting {}", key);
            }
            for toggle in tab.display() {
                println!(
                    "{}\t{}\t{}: {}",
                    toggle.key.as_str(),
                    toggle.value,
                    toggle.name,
                    toggle.description
                );
            }
        }
    }

    let highlight_as_underline = runtime.plugin().settings().highlight_as_underline;
    let use_color = Term::stdout().features().colors_supported();
    let editor = SystemEditor::new(config.editor.clone());
    runtime.plugin_mut().host_mut().present(
        &editor,
        &mut io::stdout().lock(),
        highlight_as_underline,
        use_color,
    )?;

    runtime.unload();
    Ok(())
}

fn copy_note(runtime: &Runtime<TerminalHost>, path: &str) -> AppResult<()> {
    match runtime.plugin().intercept_clipboard(ClipboardEvent::Copy) {
        Disposition::Allow => {
            let contents = runtime.plugin().host().read_document(path)?;
            copy_to_clipboard(&contents)?;
            info!("Copied {} to the clipboard", path);
        }
        Disposition::Suppress { .. } => info!("Copy of {} blocked", path),
    }
    Ok(())
}
