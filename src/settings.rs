use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Error};
use dirs_next::config_dir;
use once_cell::sync::OnceCell;
use openai_threads::config::DEFAULT_BASE_URL;
use openai_threads::{ClientConfiguration, HttpLoggingLevel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
const OPENAI_MODEL: &str = "OPENAI_MODEL";

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub proxy_host: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<u16>,
    #[serde(default)]
    pub http_logging: Option<HttpLoggingLevel>,
}

const DEFAULT_MODEL: &str = "gpt-4o-mini";

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: None,
            base_url: None,
            model: None,
            proxy_host: None,
            proxy_port: None,
            http_logging: Some(HttpLoggingLevel::None),
        }
    }
}

static SETTINGS: OnceCell<Settings> = OnceCell::new();

fn get_settings_path() -> Option<PathBuf> {
    let mut path = config_dir().or_else(|| env::current_dir().ok())?;
    path.push("openai-threads");
    path.push("openai-threads.toml");
    Some(path)
}

fn load_settings_file() -> Settings {
    let Some(path) = get_settings_path() else {
        return Settings::default();
    };
    debug!("Loading settings from {}", path.display());
    if path.exists() {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read settings file {}: {}", path.display(), e);
                return Settings::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            Settings::default()
        })
    } else {
        let default = Settings::default();
        if let Err(e) = write_settings_file(&path, &default) {
            warn!("Could not write default settings to {}: {}", path.display(), e);
        }
        default
    }
}

/// Writes `settings` to `path`, creating the parent directory. Unset keys are left out
/// so the environment can still fill them.
fn write_settings_file(path: &Path, settings: &Settings) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(settings)?)?;
    Ok(())
}

impl Settings {
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(OPENAI_API_KEY).ok())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| env::var(OPENAI_BASE_URL).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .or_else(|| env::var(OPENAI_MODEL).ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Client configuration from these settings, with command line overrides applied on top.
    pub fn client_configuration(
        &self,
        base_url: Option<&str>,
        http_logging: Option<HttpLoggingLevel>,
    ) -> Result<ClientConfiguration, Error> {
        let api_key = self.api_key().ok_or_else(|| {
            anyhow!("No API key: set api_key in the settings file or {}", OPENAI_API_KEY)
        })?;

        let base_url = base_url.map(str::to_string).unwrap_or_else(|| self.base_url());
        let logging_level = http_logging
            .or(self.http_logging)
            .unwrap_or_default();

        let mut config = ClientConfiguration::new(&api_key)
            .with_base_url(&base_url)
            .with_logging_level(logging_level);

        match (&self.proxy_host, self.proxy_port) {
            (Some(host), Some(port)) => config = config.with_proxy(host, port),
            (Some(host), None) => warn!("proxy_host {} set without proxy_port, ignoring", host),
            _ => {}
        }
        Ok(config)
    }
}

pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(load_settings_file)
}
