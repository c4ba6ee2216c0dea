use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::client::DEFAULT_URL;
use crate::error::Error;
use crate::transport::DEFAULT_TIMEOUT_SECS;

const CONFIG_FILE_NAME: &str = ".uptimerobot.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub url: String,
    pub timeout_secs: u64,
    pub debug: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    url: Option<String>,
    timeout_secs: Option<u64>,
    debug: Option<bool>,
}

impl Config {
    /// Loads `.uptimerobot.toml` from the home directory, falling back to
    /// the working directory. A missing file is not an error.
    pub fn load() -> Result<Config, Error> {
        let path = Self::default_paths().into_iter().find(|p| p.is_file());
        Self::load_from(path.as_deref())
    }

    /// Loads the given file (if any), then fills unset fields from the
    /// environment and finally from defaults.
    pub fn load_from(path: Option<&Path>) -> Result<Config, Error> {
        let file = match path {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                let content = fs::read_to_string(path)?;
                toml::from_str(&content)?
            }
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(file))
    }

    fn resolve(file: ConfigFile) -> Config {
        // if a field is not set in the file, use env with dotenvy
        let api_key = file
            .api_key
            .or_else(|| dotenvy::var("UPTIMEROBOT_API_KEY").ok())
            .unwrap_or_default();
        let url = file
            .url
            .or_else(|| dotenvy::var("UPTIMEROBOT_URL").ok())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let debug = file.debug.unwrap_or_else(|| {
            dotenvy::var("UPTIMEROBOT_DEBUG").is_ok_and(|v| !v.is_empty())
        });

        Config {
            api_key,
            url,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            debug,
        }
    }

    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        paths
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "no API key: set api_key in .uptimerobot.toml, UPTIMEROBOT_API_KEY, or --api-key"
                    .to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
