pub mod browse;
pub mod clear;
pub mod config;
pub mod history;
pub mod prefs;
pub mod progress;
pub mod watch;
pub mod watchlist;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use deyeturn_catalog::TmdbClient;
use deyeturn_config::{Config, CredentialStore, PathManager};
use deyeturn_core::{FileStore, Profile};
use std::path::PathBuf;

/// Paths and configuration of the profile a command runs against.
pub struct Context {
    pub paths: PathManager,
    pub config: Config,
}

impl Context {
    pub fn load(profile_dir: Option<PathBuf>) -> Result<Self> {
        let paths = match profile_dir {
            Some(dir) => PathManager::from_base(dir),
            None => PathManager::default(),
        };
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    pub fn open_profile(&self) -> Result<Profile<FileStore>> {
        Profile::open(&self.paths, &self.config.storage)
            .map_err(|e| eyre!("Failed to open profile storage at {}: {}", self.paths.storage_dir().display(), e))
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        Ok(store)
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let token = self.credentials()?.resolve_tmdb_access_token();
        Ok(TmdbClient::new(&self.config.catalog, token))
    }
}
