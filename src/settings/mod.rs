//! Plugin settings and the settings tab.
//!
//! Settings are persisted as a camelCase JSON object through the host's
//! [`SettingsStorage`]. Loading starts from [`Settings::default`] and overlays
//! whatever fields were stored; missing fields keep their defaults and unknown
//! fields are ignored.

use crate::errors::{AppError, AppResult};
use crate::host::SettingsStorage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Switch past daily notes to reading mode when they are opened.
    pub enable_auto_reading_mode: bool,
    /// Intercept copy, cut and context-menu events.
    pub disable_copying: bool,
    /// Render `==highlights==` as underlined text.
    pub highlight_as_underline: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_auto_reading_mode: true,
            disable_copying: false,
            highlight_as_underline: false,
        }
    }
}

impl Settings {
    /// Loads settings from `storage`, filling unset fields with defaults.
    ///
    /// A stored `null` counts as nothing stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Settings` when the stored data is not a JSON object
    /// with boolean fields, or whatever error the storage reports.
    pub fn load(storage: &dyn SettingsStorage) -> AppResult<Self> {
        match storage.load_data()? {
            None | Some(serde_json::Value::Null) => {
                debug!("No stored settings, using defaults");
                Ok(Self::default())
            }
            Some(data) => {
                debug!("Loaded stored settings");
                Ok(serde_json::from_value(data)?)
            }
        }
    }

    /// Writes the full settings object back to `storage`.
    pub fn save(&self, storage: &dyn SettingsStorage) -> AppResult<()> {
        storage.save_data(&serde_json::to_value(self)?)
    }

    fn field_mut(&mut self, key: SettingKey) -> &mut bool {
        match key {
            SettingKey::AutoReadingMode => &mut self.enable_auto_reading_mode,
            SettingKey::DisableCopying => &mut self.disable_copying,
            SettingKey::HighlightAsUnderline => &mut self.highlight_as_underline,
        }
    }

    /// Reads one toggle.
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::AutoReadingMode => self.enable_auto_reading_mode,
            SettingKey::DisableCopying => self.disable_copying,
            SettingKey::HighlightAsUnderline => self.highlight_as_underline,
        }
    }
}

/// Identifies one of the toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    AutoReadingMode,
    DisableCopying,
    HighlightAsUnderline,
}

impl SettingKey {
    /// All keys, in display order.
    pub const ALL: [SettingKey; 3] = [
        SettingKey::AutoReadingMode,
        SettingKey::DisableCopying,
        SettingKey::HighlightAsUnderline,
    ];

    /// Short key used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::AutoReadingMode => "auto-reading-mode",
            SettingKey::DisableCopying => "disable-copying",
            SettingKey::HighlightAsUnderline => "highlight-as-underline",
        }
    }

    /// Parses a command-line key.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unknown keys.
    pub fn parse(key: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                AppError::Config(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    key,
                    known.join(", ")
                ))
            })
    }
}

/// A rendered toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub key: SettingKey,
    pub name: &'static str,
    pub description: &'static str,
    pub value: bool,
}

/// The settings panel: three toggles bound to [`Settings`], persisted on change.
pub struct SettingsTab<'a> {
    settings: &'a mut Settings,
    storage: &'a dyn SettingsStorage,
}

impl<'a> SettingsTab<'a> {
    pub fn new(settings: &'a mut Settings, storage: &'a dyn SettingsStorage) -> Self {
        Self { settings, storage }
    }

    /// The toggles with their current values.
    pub fn display(&self) -> Vec<Toggle> {
        SettingKey::ALL
            .into_iter()
            .map(|key| {
                let (name, description) = match key {
                    SettingKey::AutoReadingMode => (
                        "Auto reading mode",
                        "Automatically switch to reading mode when opening past daily notes.",
                    ),
                    SettingKey::DisableCopying => (
                        "Disable copying",
                        "Block copy, cut and the context menu. Takes effect after a reload.",
                    ),
                    SettingKey::HighlightAsUnderline => (
                        "Highlight as underline",
                        "Show highlighted text as underlined instead of marked.",
                    ),
                };
                Toggle {
                    key,
                    name,
                    description,
                    value: self.settings.get(key),
                }
            })
            .collect()
    }

    /// Changes one toggle and persists the settings.
    pub fn set(&mut self, key: SettingKey, value: bool) -> AppResult<()> {
        *self.settings.field_mut(key) = value;
        debug!("Setting {} changed to {}", key.as_str(), value);
        self.settings.save(self.storage)
    }
}
