//! Named, user-invocable actions.
//!
//! A [`CommandRegistry`] maps command ids to callbacks that act on a context
//! value (the plugin). The registry owns the callbacks and the caller owns the
//! context, so running a command never needs shared ownership.

use crate::errors::{AppError, AppResult};
use tracing::debug;

type Callback<C> = Box<dyn Fn(&mut C) -> AppResult<()>>;

/// Id and display name of a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub id: String,
    pub name: String,
}

struct Command<C> {
    info: CommandInfo,
    callback: Callback<C>,
}

/// Registered commands, in registration order.
pub struct CommandRegistry<C> {
    commands: Vec<Command<C>>,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
        }
    }
}

impl<C> CommandRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Command` if `id` is already registered.
    pub fn register<F>(&mut self, id: &str, name: &str, callback: F) -> AppResult<()>
    where
        F: Fn(&mut C) -> AppResult<()> + 'static,
    {
        if self.commands.iter().any(|command| command.info.id == id) {
            return Err(AppError::Command(format!(
                "Command '{}' is already registered",
                id
            )));
        }
        debug!("Registered command {}", id);
        self.commands.push(Command {
            info: CommandInfo {
                id: id.to_string(),
                name: name.to_string(),
            },
            callback: Box::new(callback),
        });
        Ok(())
    }

    /// Runs the command registered under `id` against `context`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Command` for unknown ids, or whatever the callback returns.
    pub fn run(&self, id: &str, context: &mut C) -> AppResult<()> {
        let command = self
            .commands
            .iter()
            .find(|command| command.info.id == id)
            .ok_or_else(|| AppError::Command(format!("Unknown command '{}'", id)))?;
        debug!("Running command {}", id);
        (command.callback)(context)
    }

    /// Registered commands, in registration order.
    pub fn list(&self) -> Vec<CommandInfo> {
        self.commands
            .iter()
            .map(|command| command.info.clone())
            .collect()
    }

    /// Removes every command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_run() {
        let mut registry: CommandRegistry<Vec<&'static str>> = CommandRegistry::new();
        registry
            .register("say-hello", "Say hello", |log| {
                log.push("hello");
                Ok(())
            })
            .unwrap();

        let mut log = Vec::new();
        registry.run("say-hello", &mut log).unwrap();
        registry.run("say-hello", &mut log).unwrap();
        assert_eq!(log, vec!["hello", "hello"]);

        assert_eq!(
            registry.list(),
            vec![CommandInfo {
                id: "say-hello".to_string(),
                name: "Say hello".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        registry.register("a", "A", |_| Ok(())).unwrap();
        match registry.register("a", "Again", |_| Ok(())) {
            Err(AppError::Command(msg)) => assert!(msg.contains("already registered")),
            _ => panic!("Expected Command error"),
        }
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let registry: CommandRegistry<()> = CommandRegistry::new();
        match registry.run("missing", &mut ()) {
            Err(AppError::Command(msg)) => assert!(msg.contains("Unknown command 'missing'")),
            _ => panic!("Expected Command error"),
        }
    }

    #[test]
    fn test_callback_errors_propagate() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        registry
            .register("fail", "Fail", |_| Err(AppError::Vault("boom".to_string())))
            .unwrap();
        assert!(matches!(registry.run("fail", &mut ()), Err(AppError::Vault(_))));
    }
}
