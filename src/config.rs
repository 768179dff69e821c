//! Client configuration.
//!
//! The dashboard talks to a single fixed RepoHealth origin. The base URL is
//! resolved from, in order: the `REPOHEALTH_URL` environment variable, a
//! config file at `~/.config/repohealth/config.json`, and a localhost
//! default. A missing or malformed file falls back to the default rather
//! than failing startup.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Ok(base_url) = std::env::var("REPOHEALTH_URL") {
            if !base_url.is_empty() {
                return Self { base_url };
            }
        }

        match Self::config_path() {
            Some(path) if path.exists() => match fs::read_to_string(&path) {
                Ok(contents) => Self::parse(&contents),
                Err(err) => {
                    log::warn!("could not read {}: {err}", path.display());
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Parse file contents, falling back to the default on malformed input.
    pub fn parse(contents: &str) -> Self {
        serde_json::from_str(contents).unwrap_or_else(|err| {
            log::warn!("malformed config file, using defaults: {err}");
            Self::default()
        })
    }

    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::var("HOME").ok()?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("repohealth")
                .join("config.json"),
        )
    }
}
