//! The daily-notes plugin and the runtime that hosts it.
//!
//! [`DailyNotesTweaks`] holds the behaviour: picking a random past daily note,
//! opening today's note, forcing reading mode on past notes and guarding the
//! clipboard. [`Runtime`] plays the part of the host application's plugin
//! loader: it registers the plugin's commands and subscriptions, runs commands,
//! raises file-open notifications when the active document changes, and tears
//! everything down on unload.

use crate::clipboard::{ClipboardEvent, ClipboardGuard, Disposition};
use crate::commands::{CommandInfo, CommandRegistry};
use crate::constants::{
    COMMAND_OPEN_RANDOM, COMMAND_OPEN_RANDOM_NAME, COMMAND_OPEN_TODAY, COMMAND_OPEN_TODAY_NAME,
    MARKDOWN_EXTENSION,
};
use crate::daily_notes;
use crate::errors::AppResult;
use crate::events::{EventBus, Subscription};
use crate::host::{DailyNoteConfig, DocumentRef, Host, ViewHandle, ViewMode};
use crate::settings::{Settings, SettingsTab};
use crate::template;
use crate::vault_path;
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Source of the current local time.
pub struct Clock(Box<dyn Fn() -> NaiveDateTime>);

impl Clock {
    /// The system clock, in local time.
    pub fn system() -> Self {
        Clock(Box::new(|| Local::now().naive_local()))
    }

    /// A clock stopped at `at`.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Clock(Box::new(move || at))
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.0)()
    }
}

/// The plugin.
pub struct DailyNotesTweaks<H: Host> {
    host: H,
    settings: Settings,
    clock: Clock,
    rng: StdRng,
    clipboard_guard: Option<ClipboardGuard>,
    subscriptions: Vec<Subscription>,
}

impl<H: Host> DailyNotesTweaks<H> {
    /// Creates the plugin with the system clock and an OS-seeded generator.
    pub fn new(host: H) -> Self {
        Self::with_parts(host, Clock::system(), StdRng::from_os_rng())
    }

    /// Creates the plugin with an explicit clock and random generator.
    pub fn with_parts(host: H, clock: Clock, rng: StdRng) -> Self {
        Self {
            host,
            settings: Settings::default(),
            clock,
            rng,
            clipboard_guard: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Defaults overlaid with whatever the host has stored.
    pub fn load_settings(&mut self) -> AppResult<()> {
        self.settings = Settings::load(&self.host)?;
        Ok(())
    }

    /// The settings panel, bound to this plugin's settings and storage.
    pub fn settings_tab(&mut self) -> SettingsTab<'_> {
        SettingsTab::new(&mut self.settings, &self.host)
    }

    /// Current daily-note configuration, re-read from the host every time.
    pub fn daily_note_config(&self) -> AppResult<DailyNoteConfig> {
        self.host.daily_note_config()
    }

    /// Path of today's daily note.
    pub fn today_note_path(&self) -> AppResult<String> {
        let config = self.daily_note_config()?;
        Ok(daily_notes::compute_today_path(&config, self.clock.now()))
    }

    /// Whether `path` is today's daily note.
    pub fn is_current_daily_note(&self, path: &str) -> AppResult<bool> {
        Ok(vault_path::normalize(path) == self.today_note_path()?)
    }

    /// Whether `path` is any daily note.
    pub fn is_daily_note(&self, path: &str) -> AppResult<bool> {
        let config = self.daily_note_config()?;
        Ok(daily_notes::is_daily_note(
            path,
            &config,
            self.clock.now().date(),
        ))
    }

    /// Every daily note in the vault, in index order.
    pub fn daily_notes(&self) -> AppResult<Vec<DocumentRef>> {
        let config = self.daily_note_config()?;
        let documents = self.host.markdown_documents()?;
        Ok(daily_notes::list_daily_notes(
            &documents,
            &config,
            self.clock.now().date(),
        ))
    }

    /// Opens a random daily note other than the active one.
    ///
    /// Returns `Ok(None)` after notifying the user when there is nothing to
    /// pick. When the picked note is not today's and auto reading mode is on,
    /// the view is switched to reading mode once the note is open.
    pub fn open_random_daily_note(&mut self) -> AppResult<Option<DocumentRef>> {
        let config = self.daily_note_config()?;
        let documents = self.host.markdown_documents()?;
        let current = self.host.active_document();
        let now = self.clock.now();

        let picked = match daily_notes::pick_random_daily_note(
            &documents,
            &config,
            current.as_ref().map(DocumentRef::path),
            now.date(),
            &mut self.rng,
        ) {
            Ok(picked) => picked,
            Err(reason) => {
                info!("No random daily note to open: {}", reason);
                self.host.notify(&reason.to_string());
                return Ok(None);
            }
        };

        info!("Opening random daily note {}", picked);
        let view = self.host.open_document(&picked)?;

        let is_today = picked.path() == daily_notes::compute_today_path(&config, now);
        if !is_today && self.settings.enable_auto_reading_mode {
            self.switch_to_reading_mode(view)?;
        }

        Ok(Some(picked))
    }

    /// Opens today's daily note, creating it from the template when missing.
    pub fn open_today_daily_note(&mut self) -> AppResult<DocumentRef> {
        let config = self.daily_note_config()?;
        let now = self.clock.now();
        let path = daily_notes::compute_today_path(&config, now);

        let exists = self
            .host
            .markdown_documents()?
            .iter()
            .any(|doc| doc.path() == path);

        let document = if exists {
            DocumentRef::new(&path)
        } else {
            let contents = self.initial_contents(&config, &path, now);
            info!("Creating daily note {}", path);
            self.host.create_document(&path, &contents)?
        };

        self.host.open_document(&document)?;
        Ok(document)
    }

    fn initial_contents(&self, config: &DailyNoteConfig, path: &str, now: NaiveDateTime) -> String {
        let Some(template_path) = config.template.as_deref().filter(|t| !t.trim().is_empty())
        else {
            return String::new();
        };

        let template_path = if template_path.ends_with(MARKDOWN_EXTENSION) {
            vault_path::normalize(template_path)
        } else {
            vault_path::normalize(&format!("{}{}", template_path, MARKDOWN_EXTENSION))
        };

        match self.host.read_document(&template_path) {
            Ok(contents) => {
                let title = vault_path::strip_extension(vault_path::file_name(path));
                template::render(&contents, title, &config.format, now)
            }
            Err(e) => {
                warn!("Failed to read daily note template {}: {}", template_path, e);
                self.host.notify(&format!(
                    "Failed to read the daily note template '{}'",
                    template_path
                ));
                String::new()
            }
        }
    }

    /// Reacts to a file-open notification.
    ///
    /// Past daily notes are switched to reading mode; today's note, other notes
    /// and non-markdown files are left alone.
    pub fn handle_file_open(&mut self, file: Option<&DocumentRef>) -> AppResult<()> {
        let Some(file) = file else {
            return Ok(());
        };
        if !file.is_markdown() {
            return Ok(());
        }
        if !self.is_daily_note(file.path())? || self.is_current_daily_note(file.path())? {
            return Ok(());
        }

        if let Some(view) = self.host.active_view() {
            self.switch_to_reading_mode(view)?;
        }
        Ok(())
    }

    /// Puts `view` into reading mode unless it already is.
    ///
    /// Returns whether a state change was requested.
    pub fn switch_to_reading_mode(&mut self, view: ViewHandle) -> AppResult<bool> {
        let mut state = self.host.view_state(view)?;
        if state.mode == ViewMode::Preview {
            debug!("View {:?} already in reading mode", view);
            return Ok(false);
        }
        state.mode = ViewMode::Preview;
        self.host.set_view_state(view, state)?;
        debug!("Switched view {:?} to reading mode", view);
        Ok(true)
    }

    /// Routes a clipboard event through the guard armed at load time.
    pub fn intercept_clipboard(&self, event: ClipboardEvent) -> Disposition {
        let Some(guard) = self.clipboard_guard else {
            return Disposition::Allow;
        };
        let disposition = guard.intercept(event);
        if let Disposition::Suppress {
            notice: Some(notice),
        } = disposition
        {
            self.host.notify(notice);
        }
        disposition
    }

    fn on_load(
        &mut self,
        commands: &mut CommandRegistry<Self>,
        events: &mut EventBus<Self>,
    ) -> AppResult<()>
    where
        H: 'static,
    {
        commands.register(COMMAND_OPEN_RANDOM, COMMAND_OPEN_RANDOM_NAME, |plugin: &mut Self| {
            plugin.open_random_daily_note().map(|_| ())
        })?;
        commands.register(COMMAND_OPEN_TODAY, COMMAND_OPEN_TODAY_NAME, |plugin: &mut Self| {
            plugin.open_today_daily_note().map(|_| ())
        })?;

        if self.settings.enable_auto_reading_mode {
            let subscription = events.on_file_open(|plugin: &mut Self, file| plugin.handle_file_open(file));
            self.subscriptions.push(subscription);
        }

        self.clipboard_guard = ClipboardGuard::from_settings(&self.settings);
        if self.clipboard_guard.is_some() {
            debug!("Clipboard guard armed");
        }
        Ok(())
    }

    fn on_unload(&mut self, commands: &mut CommandRegistry<Self>, events: &mut EventBus<Self>) {
        for subscription in self.subscriptions.drain(..) {
            events.unsubscribe(subscription);
        }
        commands.clear();
        self.clipboard_guard = None;
    }
}

/// Loads a plugin and drives it the way a host application would.
pub struct Runtime<H: Host + 'static> {
    plugin: DailyNotesTweaks<H>,
    commands: CommandRegistry<DailyNotesTweaks<H>>,
    events: EventBus<DailyNotesTweaks<H>>,
}

impl<H: Host + 'static> Runtime<H> {
    /// Loads settings, then registers commands and subscriptions.
    pub fn load(mut plugin: DailyNotesTweaks<H>) -> AppResult<Self> {
        plugin.load_settings()?;
        let mut commands = CommandRegistry::new();
        let mut events = EventBus::new();
        plugin.on_load(&mut commands, &mut events)?;
        info!("Plugin loaded with {} commands", commands.list().len());
        Ok(Self {
            plugin,
            commands,
            events,
        })
    }

    pub fn plugin(&self) -> &DailyNotesTweaks<H> {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut DailyNotesTweaks<H> {
        &mut self.plugin
    }

    pub fn commands(&self) -> Vec<CommandInfo> {
        self.commands.list()
    }

    pub fn file_open_subscribers(&self) -> usize {
        self.events.subscriber_count()
    }

    /// Runs a registered command, then raises file-open if it changed the
    /// active document.
    pub fn execute_command(&mut self, id: &str) -> AppResult<()> {
        let before = self.plugin.host.active_document();
        let view_before = self.plugin.host.active_view();
        self.commands.run(id, &mut self.plugin)?;

        let after = self.plugin.host.active_document();
        if after != before || self.plugin.host.active_view() != view_before {
            self.events.emit_file_open(&mut self.plugin, after.as_ref())?;
        }
        Ok(())
    }

    /// Opens `path` in the active view and raises file-open.
    pub fn open_file(&mut self, path: &str) -> AppResult<DocumentRef> {
        let document = DocumentRef::new(path);
        self.plugin.host.open_document(&document)?;
        self.events.emit_file_open(&mut self.plugin, Some(&document))?;
        Ok(document)
    }

    /// Tears down subscriptions and commands and hands the plugin back.
    pub fn unload(mut self) -> DailyNotesTweaks<H> {
        self.plugin.on_unload(&mut self.commands, &mut self.events);
        info!("Plugin unloaded");
        self.plugin
    }
}
