use log::warn;

use crate::storage::Storage;
use crate::types::AppLanguage;

/// storage keys for the global scalar flags, written independently of the
/// entity collections
pub const NOTIFICATIONS_ENABLED_KEY: &str = "notificationsEnabled";
pub const SHOW_AMOUNTS_KEY: &str = "showAmounts";
pub const LANGUAGE_KEY: &str = "appLanguage";

/// global settings held by the store rather than read from ambient
/// process state, so the store stays testable in isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// app-wide gate: no reminder may exist while this is off
    pub notifications_enabled: bool,
    pub show_amounts: bool,
    pub language: AppLanguage,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            show_amounts: true,
            language: AppLanguage::Ja,
        }
    }
}

impl Settings {
    /// read each flag; absent or unreadable values fall back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        let defaults = Settings::default();
        Self {
            notifications_enabled: load_bool(
                storage,
                NOTIFICATIONS_ENABLED_KEY,
                defaults.notifications_enabled,
            ),
            show_amounts: load_bool(storage, SHOW_AMOUNTS_KEY, defaults.show_amounts),
            language: match storage.load(LANGUAGE_KEY) {
                Ok(Some(tag)) => AppLanguage::from_tag(&tag),
                _ => defaults.language,
            },
        }
    }

    /// write each flag; failures are logged, not propagated
    pub fn save(&self, storage: &dyn Storage) {
        save_value(
            storage,
            NOTIFICATIONS_ENABLED_KEY,
            if self.notifications_enabled { "true" } else { "false" },
        );
        save_value(
            storage,
            SHOW_AMOUNTS_KEY,
            if self.show_amounts { "true" } else { "false" },
        );
        save_value(storage, LANGUAGE_KEY, self.language.as_tag());
    }
}

fn load_bool(storage: &dyn Storage, key: &str, default: bool) -> bool {
    match storage.load(key) {
        Ok(Some(value)) => match value.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        Ok(None) => default,
        Err(err) => {
            warn!("load of {key} failed: {err}");
            default
        }
    }
}

fn save_value(storage: &dyn Storage, key: &str, value: &str) {
    if let Err(err) = storage.save(key, value) {
        warn!("save of {key} failed: {err}");
    }
}
