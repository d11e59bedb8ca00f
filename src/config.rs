use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, TeamAdminError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV: &str = "TEAM_ADMIN_BASE_URL";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file at {}", config_path.display());
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| TeamAdminError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| TeamAdminError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "team-admin")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(TeamAdminError::NoConfigDir)
    }

    /// Resolve the backend URL: explicit flag, then env var, then config file, then default
    pub fn base_url(&self, explicit: Option<&str>) -> Result<Url> {
        let env = std::env::var(BASE_URL_ENV).ok();
        self.resolve_base_url(explicit, env.as_deref())
    }

    fn resolve_base_url(&self, explicit: Option<&str>, env: Option<&str>) -> Result<Url> {
        let raw = explicit
            .or(env)
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        let url = Url::parse(raw).map_err(|_| TeamAdminError::InvalidUrl(raw.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(TeamAdminError::InvalidUrl(raw.to_string()));
        }
        Ok(url)
    }
}
