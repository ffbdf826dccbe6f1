//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use super::model::LensConfig;

pub const CONFIG_FILE_ENV: &str = "LOGLENS_CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/loglens/loglens.toml";

impl LensConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var(CONFIG_FILE_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same as [`LensConfig::load`] with an explicit config path.
    /// A missing file is not an error; [`LensConfig::from_env`] applies.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
            let mut config = Self::from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        } else {
            tracing::info!("Config file not found at {}, using environment", path.display());
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: LensConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `LOGLENS_*` overrides. Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).map(|raw| raw.trim().to_string());

        if let Some(v) = parsed("LOGLENS_STRIP_ANSI").and_then(|s| s.parse().ok()) {
            self.parser.strip_ansi = v;
        }
        if let Some(v) = parsed("LOGLENS_STITCH_DETAILS").and_then(|s| s.parse().ok()) {
            self.parser.stitch_details = v;
        }
        if let Some(v) = parsed("LOGLENS_MAX_DETAIL_LINES").and_then(|s| s.parse().ok()) {
            self.parser.max_detail_lines = Some(v);
        }
        if let Some(v) = parsed("LOGLENS_WINDOW_MONTHS").and_then(|s| s.parse().ok()) {
            self.analyzer.window_months = v;
        }
        if let Some(v) = parsed("LOGLENS_RECENT_ERRORS_LIMIT").and_then(|s| s.parse().ok()) {
            self.analyzer.recent_errors_limit = v;
        }
        if let Some(list) = parsed("LOGLENS_ALLOWED_EXTENSIONS") {
            self.source.allowed_extensions = list
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
    }
}
