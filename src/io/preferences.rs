use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::Error;
use crate::i18n::Language;
use crate::prelude::*;

const APP_DIR: &str = "pricebook";
const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Small bits of state that outlive a single run.
///
/// Loaded once at startup into `App` and written back only when something
/// changes, so nothing reads the file behind the app's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,

    /// Last home page content the server gave us. Shown when the server can't
    /// be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page_content: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::default(),
            language: Language::from_env(),
            home_page_content: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Uses `config_dir` when given, otherwise the platform config directory.
    pub fn locate(config_dir: Option<&Path>) -> AppResult<Self> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(Error::ConfigDirNotFound)?
                .join(APP_DIR),
        };

        Ok(PreferenceStore {
            path: dir.join(FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing file gives defaults, and so does an unreadable or
    /// corrupt one, with a warning. The next save overwrites it.
    pub fn load(&self) -> Preferences {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preferences yet, using defaults");
                return Preferences::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read preferences, using defaults");
                return Preferences::default();
            }
        };

        match serde_json::from_str::<Preferences>(&content) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                Preferences::default()
            }
        }
    }

    pub fn save(&self, preferences: &Preferences) -> AppResult<()> {
        // Ensure the directory exists.
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }

        let json = serde_json::to_string_pretty(preferences).into_diagnostic()?;

        fs::write(&self.path, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write {}", self.path.display()))?;

        debug!(path = %self.path.display(), "preferences saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::locate(Some(dir.path())).unwrap();

        let preferences = store.load();

        assert_eq!(preferences.theme, Theme::Light);
        assert_eq!(preferences.home_page_content, None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::locate(Some(&dir.path().join("nested"))).unwrap();
        let preferences = Preferences {
            theme: Theme::Dark,
            language: Language::Zh,
            home_page_content: Some("https://example.com/landing".to_owned()),
        };

        store.save(&preferences).unwrap();

        assert_eq!(store.load(), preferences);
    }

    #[test]
    fn corrupt_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::locate(Some(dir.path())).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let preferences = store.load();

        assert_eq!(preferences.theme, Theme::Light);
    }

    #[test]
    fn partial_file_fills_in_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::locate(Some(dir.path())).unwrap();
        fs::write(store.path(), r#"{"theme": "dark", "language": "zh"}"#).unwrap();

        let preferences = store.load();

        assert_eq!(preferences.theme, Theme::Dark);
        assert_eq!(preferences.language, Language::Zh);
        assert_eq!(preferences.home_page_content, None);
    }

    #[test]
    fn config_dir_that_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let store = PreferenceStore::locate(Some(&blocker)).unwrap();

        // Reading degrades to defaults, writing reports the problem.
        assert_eq!(store.load().theme, Theme::Light);
        assert!(store.save(&Preferences::default()).is_err());
    }
}
