use crate::cli::Cli;
use crate::display::Display;
use crate::io::client::ApiClient;
use crate::io::preferences::{PreferenceStore, Preferences};
use crate::prelude::*;

/// Everything a command needs, built once at startup.
pub struct App {
    pub cli: Cli,
    pub display: Display,
    pub client: ApiClient,
    pub store: PreferenceStore,
    pub preferences: Preferences,
}

impl App {
    pub fn new(cli: Cli) -> AppResult<Self> {
        let store = PreferenceStore::locate(cli.config_dir.as_deref())?;
        let preferences = store.load();

        let display = Display::new(cli.no_animate, preferences.theme);
        let client = ApiClient::new(&cli.base_url, cli.access_token.as_deref());

        Ok(App {
            cli,
            display,
            client,
            store,
            preferences,
        })
    }

    /// Writes preferences back, only if they changed.
    pub fn update_preferences(&mut self, updated: Preferences) -> AppResult<()> {
        if updated == self.preferences {
            return Ok(());
        }

        self.store.save(&updated)?;
        self.preferences = updated;

        Ok(())
    }
}
