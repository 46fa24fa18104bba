//! Live floor settings.
//!
//! Settings are edited by a manager while stations are running, so they travel on
//! a `watch` channel rather than being read from ambient state. [`SettingsFeed`]
//! is the single subscription boundary; everything downstream receives a plain
//! [`Settings`] value as an argument.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::watch;
use tracing::info;

/// Auto-hide threshold used while the settings collaborator has not answered yet.
pub const DEFAULT_AUTO_HIDE_MINUTES: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "de" | "german" | "deutsch" => Ok(Language::De),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Minutes after which a ticket reads as expired. 0 means never.
    pub auto_hide_minutes: u32,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_hide_minutes: DEFAULT_AUTO_HIDE_MINUTES,
            language: Language::default(),
        }
    }
}

impl Settings {
    /// The settings in force, falling back to defaults when none have loaded.
    pub fn effective(loaded: Option<&Settings>) -> Settings {
        loaded.copied().unwrap_or_default()
    }
}

/// Publisher side of the live settings.
///
/// Holds `None` until the first settings arrive.
#[derive(Debug)]
pub struct SettingsFeed {
    sender: watch::Sender<Option<Settings>>,
}

impl SettingsFeed {
    pub fn new(initial: Option<Settings>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Settings not loaded yet.
    pub fn unloaded() -> Self {
        Self::new(None)
    }

    pub fn publish(&self, settings: Settings) {
        info!(
            auto_hide_minutes = settings.auto_hide_minutes,
            language = ?settings.language,
            "Settings changed"
        );
        self.sender.send_replace(Some(settings));
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Settings>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Settings {
        Settings::effective(self.sender.borrow().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_settings_fall_back_to_defaults() {
        let feed = SettingsFeed::unloaded();
        assert_eq!(feed.current().auto_hide_minutes, DEFAULT_AUTO_HIDE_MINUTES);
        assert_eq!(feed.current().language, Language::En);
    }

    #[test]
    fn subscribers_see_published_settings() {
        let feed = SettingsFeed::unloaded();
        let rx = feed.subscribe();
        feed.publish(Settings {
            auto_hide_minutes: 0,
            language: Language::De,
        });
        assert_eq!(Settings::effective(rx.borrow().as_ref()).auto_hide_minutes, 0);
    }

    #[test]
    fn language_parses_codes_and_names() {
        assert_eq!("DE".parse::<Language>(), Ok(Language::De));
        assert_eq!(" english ".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }
}
