use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Prefix of every storage key. Changing it orphans existing records.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_continue_watching_capacity")]
    pub continue_watching_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: u64,
    /// Saved progress at or above this fraction counts as finished and is not resumed.
    #[serde(default = "default_resume_ceiling")]
    pub resume_ceiling: f64,
    #[serde(default = "default_controls_hide_secs")]
    pub controls_hide_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_namespace() -> String {
    "deyeturn".to_string()
}

fn default_history_capacity() -> usize {
    20
}

fn default_continue_watching_capacity() -> usize {
    10
}

/// Upper bound for the playback timers, in seconds.
pub const MAX_PLAYBACK_TIMER_SECS: u64 = 3600;

fn default_save_interval_secs() -> u64 {
    10
}

fn default_resume_ceiling() -> f64 {
    0.9
}

fn default_controls_hide_secs() -> u64 {
    3
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            history_capacity: default_history_capacity(),
            continue_watching_capacity: default_continue_watching_capacity(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            save_interval_secs: default_save_interval_secs(),
            resume_ceiling: default_resume_ceiling(),
            controls_hide_secs: default_controls_hide_secs(),
        }
    }
}

impl PlaybackConfig {
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_secs)
    }

    pub fn controls_hide_after(&self) -> Duration {
        Duration::from_secs(self.controls_hide_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let namespace = &self.storage.namespace;
        if namespace.is_empty() {
            return Err(anyhow::anyhow!("storage.namespace cannot be empty"));
        }
        if !namespace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(anyhow::anyhow!(
                "storage.namespace may only contain ASCII letters, digits, '_' and '-': {}",
                namespace
            ));
        }
        if self.storage.history_capacity == 0 {
            return Err(anyhow::anyhow!("storage.history_capacity must be at least 1"));
        }
        if self.storage.continue_watching_capacity == 0 {
            return Err(anyhow::anyhow!("storage.continue_watching_capacity must be at least 1"));
        }

        let save_interval = self.playback.save_interval_secs;
        if !(1..=MAX_PLAYBACK_TIMER_SECS).contains(&save_interval) {
            return Err(anyhow::anyhow!(
                "playback.save_interval_secs must be between 1 and {}, got {}",
                MAX_PLAYBACK_TIMER_SECS,
                save_interval
            ));
        }
        if self.playback.controls_hide_secs > MAX_PLAYBACK_TIMER_SECS {
            return Err(anyhow::anyhow!(
                "playback.controls_hide_secs must be at most {}, got {}",
                MAX_PLAYBACK_TIMER_SECS,
                self.playback.controls_hide_secs
            ));
        }
        let ceiling = self.playback.resume_ceiling;
        if !(ceiling > 0.0 && ceiling <= 1.0) {
            return Err(anyhow::anyhow!("playback.resume_ceiling must be in (0, 1], got {}", ceiling));
        }

        if self.catalog.base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }

        Ok(())
    }
}
