//! User preference container.
//!
//! A second, independently persisted store next to the UI state container.
//! Every field survives a reload (full whitelist). Theme changes carry a
//! cross-cutting side effect: the presentation mode of the whole interface
//! must be updated in the same call that updates the record, so a read of
//! the container and a look at the screen never disagree.

use crate::app::StateSaveSender;
use crate::persist::Persistable;
use log::*;
use serde::{Deserialize, Serialize};

/// Specifying the two presentation modes.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

fn default_theme() -> ThemeMode {
    ThemeMode::Dark
}

fn default_idle_threshold_minutes() -> u32 {
    15
}

fn default_auto_save_interval_seconds() -> u32 {
    30
}

/// User preference record. Doubles as the persistence snapshot since the
/// whitelist covers every field.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: ThemeMode,
    #[serde(default = "default_idle_threshold_minutes")]
    pub idle_threshold_minutes: u32,
    #[serde(default = "default_auto_save_interval_seconds")]
    pub auto_save_interval_seconds: u32,
    #[serde(default)]
    pub default_board_gid: Option<String>,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            theme: default_theme(),
            idle_threshold_minutes: default_idle_threshold_minutes(),
            auto_save_interval_seconds: default_auto_save_interval_seconds(),
            default_board_gid: None,
        }
    }
}

/// Receiver for the presentation-mode side channel. The settings container
/// is the only component allowed to invoke it.
///
pub trait PresentationSink: Send {
    fn apply(&self, mode: ThemeMode);
}

/// Houses user preferences and owns the presentation-mode side channel.
///
pub struct SettingsState {
    settings: Settings,
    sink: Box<dyn PresentationSink>,
    save_sender: Option<StateSaveSender>,
    version: u64,
}

impl SettingsState {
    /// Return a new instance with defaults, applying the presentation mode
    /// for the default theme so screen and state agree from the first read.
    ///
    pub fn new(sink: Box<dyn PresentationSink>, save_sender: Option<StateSaveSender>) -> Self {
        let settings = Settings::default();
        sink.apply(settings.theme);
        SettingsState {
            settings,
            sink,
            save_sender,
            version: 0,
        }
    }

    /// Bump the observable state version and request a persistence write.
    /// Called exactly once at the end of every action method.
    ///
    fn touch(&mut self) {
        self.version += 1;
        if let Some(sender) = &self.save_sender {
            // Fire-and-forget; a dropped receiver only means no persistence.
            sender.send(()).ok();
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.settings.theme
    }

    pub fn idle_threshold_minutes(&self) -> u32 {
        self.settings.idle_threshold_minutes
    }

    pub fn auto_save_interval_seconds(&self) -> u32 {
        self.settings.auto_save_interval_seconds
    }

    pub fn default_board_gid(&self) -> Option<&str> {
        self.settings.default_board_gid.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the theme, firing the presentation side effect in the same
    /// call. A no-op when the mode is unchanged, so the side effect fires
    /// exactly once per actual change.
    ///
    pub fn set_theme(&mut self, mode: ThemeMode) -> &mut Self {
        if self.settings.theme != mode {
            debug!("Switching theme to {:?}...", mode);
            self.settings.theme = mode;
            self.sink.apply(mode);
            self.touch();
        }
        self
    }

    /// Flips between light and dark.
    ///
    pub fn toggle_theme(&mut self) -> &mut Self {
        let next = match self.settings.theme {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        self.set_theme(next)
    }

    pub fn set_idle_threshold_minutes(&mut self, minutes: u32) -> &mut Self {
        self.settings.idle_threshold_minutes = minutes;
        self.touch();
        self
    }

    pub fn set_auto_save_interval_seconds(&mut self, seconds: u32) -> &mut Self {
        self.settings.auto_save_interval_seconds = seconds;
        self.touch();
        self
    }

    pub fn set_default_board(&mut self, gid: Option<String>) -> &mut Self {
        self.settings.default_board_gid = gid;
        self.touch();
        self
    }
}

impl Persistable for SettingsState {
    type Snapshot = Settings;
    const STORAGE_KEY: &'static str = "settings";

    fn snapshot(&self) -> Settings {
        self.settings.clone()
    }

    /// Re-applies the presentation side effect before any consumer can read
    /// the recovered value.
    ///
    fn restore(&mut self, snapshot: Settings) {
        self.settings = snapshot;
        self.sink.apply(self.settings.theme);
    }
}
