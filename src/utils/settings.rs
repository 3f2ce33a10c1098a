use super::{SettingsError, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const BACKEND_URL_ENV: &str = "IMAGEGEN_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend_url: String,
    pub theme: Theme,
    /// Drop settlements of requests superseded by a newer activation.
    pub latest_response_wins: bool,
    pub log_level: String,
    /// Backend URL from the environment. Never written back to disk.
    #[serde(skip)]
    pub backend_url_override: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            theme: Theme::Dark,
            latest_response_wins: false,
            log_level: "info".to_string(),
            backend_url_override: None,
        }
    }
}

impl Settings {
    /// Get the platform-specific settings directory
    pub fn settings_dir() -> Result<PathBuf, SettingsError> {
        let config_dir = if cfg!(any(target_os = "windows", target_os = "macos")) {
            // %APPDATA%\imagegen or ~/Library/Application Support/imagegen
            dirs::config_dir()
                .ok_or(SettingsError::NoConfigDir)?
                .join("imagegen")
        } else {
            // Linux/Unix: $HOME/.imagegen
            dirs::home_dir()
                .ok_or(SettingsError::NoConfigDir)?
                .join(".imagegen")
        };

        Ok(config_dir)
    }

    pub fn settings_path() -> Result<PathBuf, SettingsError> {
        Ok(Self::settings_dir()?.join("settings.toml"))
    }

    /// Load settings from the config file, then apply environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::load_from(&Self::settings_path()?)?;
        settings.apply_env_override(std::env::var(BACKEND_URL_ENV).ok());
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        tracing::debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    fn apply_env_override(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url.filter(|u| !u.trim().is_empty()) {
            self.backend_url_override = Some(url.trim().to_string());
        }
    }

    /// The URL requests go to: the environment override if set, else the saved one.
    pub fn effective_backend_url(&self) -> &str {
        self.backend_url_override
            .as_deref()
            .unwrap_or(&self.backend_url)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
