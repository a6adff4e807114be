use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use clap::{Parser, Subcommand};

/// Random daily notes and reading-mode tweaks for markdown vaults
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Vault directory (overrides TWEAKS_VAULT_DIR)
    #[clap(long, global = true, value_name = "DIR")]
    pub vault: Option<String>,

    /// Log output format
    #[clap(
        long,
        global = true,
        value_name = "FORMAT",
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open a random daily note other than the active one
    Random,

    /// Open today's daily note, creating it if needed
    Today,

    /// Open a note by its path inside the vault
    Open {
        /// Vault-relative path of the note
        path: String,
    },

    /// List every daily note in the vault
    List,

    /// Copy a note's contents to the system clipboard
    Copy {
        /// Vault-relative path of the note
        path: String,
    },

    /// List the registered commands
    Commands,

    /// Show or change settings
    Settings {
        #[clap(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    /// Change one toggle
    Set {
        /// Setting key, e.g. auto-reading-mode
        key: String,
        /// New value
        #[clap(action = clap::ArgAction::Set)]
        value: bool,
    },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        <CliArgs as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(vec!["daily-notes-tweaks"]).is_err());
    }

    #[test]
    fn test_simple_subcommands() {
        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "random"]);
        assert_eq!(args.command, Command::Random);
        assert_eq!(args.log_format, "text");
        assert!(args.vault.is_none());
        assert!(!args.verbose);

        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "today"]);
        assert_eq!(args.command, Command::Today);

        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "list"]);
        assert_eq!(args.command, Command::List);

        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "commands"]);
        assert_eq!(args.command, Command::Commands);
    }

    #[test]
    fn test_path_subcommands() {
        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "open", "Daily/2024-01-05.md"]);
        assert_eq!(
            args.command,
            Command::Open {
                path: "Daily/2024-01-05.md".to_string()
            }
        );

        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "copy", "note.md"]);
        assert_eq!(
            args.command,
            Command::Copy {
                path: "note.md".to_string()
            }
        );
    }

    #[test]
    fn test_settings_subcommand() {
        let args = CliArgs::parse_from(vec!["daily-notes-tweaks", "settings"]);
        assert_eq!(args.command, Command::Settings { action: None });

        let args = CliArgs::parse_from(vec![
            "daily-notes-tweaks",
            "settings",
            "set",
            "disable-copying",
            "true",
        ]);
        assert_eq!(
            args.command,
            Command::Settings {
                action: Some(SettingsAction::Set {
                    key: "disable-copying".to_string(),
                    value: true
                })
            }
        );

        assert!(CliArgs::try_parse_from(vec![
            "daily-notes-tweaks",
            "settings",
            "set",
            "disable-copying",
            "maybe",
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(vec![
            "daily-notes-tweaks",
            "list",
            "--vault",
            "/tmp/vault",
            "--log-format",
            "json",
            "-v",
        ]);
        assert_eq!(args.vault.as_deref(), Some("/tmp/vault"));
        assert_eq!(args.log_format, "json");
        assert!(args.verbose);

        assert!(CliArgs::try_parse_from(vec![
            "daily-notes-tweaks",
            "--log-format",
            "xml",
            "list"
        ])
        .is_err());
    }
}
