use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// User preferences the controller reads on every query.
///
/// ```toml
/// trigger_character = "@"
/// disabled_categories = ["artist"]
/// debug_output = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub trigger_character: char,
    pub disabled_categories: Vec<String>,
    pub debug_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trigger_character: '@',
            disabled_categories: Vec::new(),
            debug_output: false,
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn is_disabled(&self, category: &str) -> bool {
        self.disabled_categories.iter().any(|c| c == category)
    }
}

/// Live settings shared between the settings surface and every controller.
///
/// Writers replace values in place; readers take a snapshot per query, so a
/// change shows up on the next keystroke.
#[derive(Clone, Debug, Default)]
pub struct SharedSettings(Arc<RwLock<Settings>>);

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self(Arc::new(RwLock::new(settings)))
    }

    pub fn snapshot(&self) -> Settings {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn debug_output(&self) -> bool {
        self.0.read().unwrap_or_else(PoisonError::into_inner).debug_output
    }

    pub fn trigger_character(&self) -> char {
        self.0.read().unwrap_or_else(PoisonError::into_inner).trigger_character
    }

    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        f(&mut self.0.write().unwrap_or_else(PoisonError::into_inner));
    }

    pub fn set_trigger_character(&self, trigger: char) {
        self.update(|s| s.trigger_character = trigger);
    }

    pub fn set_debug_output(&self, on: bool) {
        self.update(|s| s.debug_output = on);
    }

    /// Enabling removes `category` from the disabled set, disabling adds it
    /// once.
    pub fn set_category_enabled(&self, category: &str, enabled: bool) {
        self.update(|s| {
            let pos = s.disabled_categories.iter().position(|c| c == category);
            match (enabled, pos) {
                (true, Some(i)) => {
                    s.disabled_categories.remove(i);
                }
                (false, None) => s.disabled_categories.push(category.to_string()),
                _ => {}
            }
        });
    }
}

/// One row of the settings surface's category list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryToggle {
    pub name: String,
    pub enabled: bool,
}

/// Toggles for `categories`, in descending name order.
pub fn category_toggles(categories: &[String], settings: &Settings) -> Vec<CategoryToggle> {
    let mut names: Vec<&String> = categories.iter().collect();
    names.sort_by(|a, b| b.cmp(a));
    names
        .into_iter()
        .map(|name| CategoryToggle {
            name: name.clone(),
            enabled: !settings.is_disabled(name),
        })
        .collect()
}
