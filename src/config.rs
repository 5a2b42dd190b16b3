//! Client configuration.
//!
//! Defaults target the production AggieTime deployment. Overrides are read
//! from `~/.config/aggietime/config.json` when present, then from the
//! environment (`AGGIETIME_URI`, `AGGIETIME_DOMAIN`, and the `*_EXP_SEC`
//! cache lifetimes); a `.env` file is honored.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for the config directory path
const APP_NAME: &str = "aggietime";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_BASE_URL: &str = "https://aggietime.usu.edu";
const DEFAULT_COOKIE_DOMAIN: &str = "aggietime.usu.edu";

/// User info changes rarely (position assignments); 15 minutes.
const DEFAULT_USER_CACHE_EXP_SECS: i64 = 15 * 60;

/// Shift state changes whenever the user clocks; keep the status line short-lived.
const DEFAULT_OPEN_SHIFT_EXP_SECS: i64 = 60;

/// Weekly totals only move as shifts close; 5 minutes.
const DEFAULT_PAST_WEEK_EXP_SECS: i64 = 5 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Domain the CSRF cookie must belong to.
    pub cookie_domain: String,
    pub user_cache_exp_secs: i64,
    pub open_shift_exp_secs: i64,
    pub past_week_exp_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_domain: DEFAULT_COOKIE_DOMAIN.to_string(),
            user_cache_exp_secs: DEFAULT_USER_CACHE_EXP_SECS,
            open_shift_exp_secs: DEFAULT_OPEN_SHIFT_EXP_SECS,
            past_week_exp_secs: DEFAULT_PAST_WEEK_EXP_SECS,
        }
    }
}

impl Config {
    /// Load the config file if one exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        // Pull a .env file into the process first (silently ignore if absent)
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    fn apply_env(&mut self) {
        if let Ok(uri) = std::env::var("AGGIETIME_URI") {
            self.base_url = uri;
        }
        if let Ok(domain) = std::env::var("AGGIETIME_DOMAIN") {
            self.cookie_domain = domain;
        }
        Self::apply_secs_env("AGGIETIME_USER_CACHE_EXP_SEC", &mut self.user_cache_exp_secs);
        Self::apply_secs_env("AGGIETIME_OPEN_SHIFT_EXP_SEC", &mut self.open_shift_exp_secs);
        Self::apply_secs_env("AGGIETIME_PAST_WEEK_EXP_SEC", &mut self.past_week_exp_secs);
    }

    fn apply_secs_env(var: &str, field: &mut i64) {
        if let Ok(raw) = std::env::var(var) {
            match raw.parse() {
                Ok(secs) => *field = secs,
                Err(_) => warn!(var, value = %raw, "ignoring unparseable cache lifetime"),
            }
        }
    }

    pub(crate) fn user_cache_ttl(&self) -> Duration {
        Duration::seconds(self.user_cache_exp_secs)
    }

    pub(crate) fn open_shift_ttl(&self) -> Duration {
        Duration::seconds(self.open_shift_exp_secs)
    }

    pub(crate) fn past_week_ttl(&self) -> Duration {
        Duration::seconds(self.past_week_exp_secs)
    }
}
