// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file, and the data
//! directory holding the state database and the log.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "bandsite";

const STATE_DATABASE_FILE: &str = "state.db";
const LOG_FILE: &str = "bandsite.log";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,

    /// Directory that track, cover and gallery locators are resolved against.
    pub assets_dir: PathBuf,

    pub submit_endpoint: String,

    pub gallery_interval_secs: u64,

    /// Interval between UI ticks, which drive every timer and animation.
    pub tick_millis: u64,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            assets_dir: PathBuf::from("assets"),
            submit_endpoint: "https://formcarry.com/s/AJYK7wadVOb".to_string(),
            gallery_interval_secs: 5,
            tick_millis: 50,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn gallery_interval(&self) -> Duration {
        Duration::from_secs(self.gallery_interval_secs.max(1))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}

pub fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}

/// Directory for application data, created on demand.
///
/// Falls back to the current directory when the platform has no data
/// directory or it cannot be created.
pub fn data_dir() -> PathBuf {
    let Some(dir) = dirs::data_local_dir().map(|d| d.join(CONFIG_NAME)) else {
        return PathBuf::from(".");
    };

    match std::fs::create_dir_all(&dir) {
        Ok(()) => dir,
        Err(_) => PathBuf::from("."),
    }
}

pub fn state_database_path() -> PathBuf {
    data_dir().join(STATE_DATABASE_FILE)
}

pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"tick_millis": 20}"#).unwrap();
        assert_eq!(config.tick_millis, 20);
        assert_eq!(config.gallery_interval_secs, 5);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn zero_intervals_are_raised() {
        let config = AppConfig {
            gallery_interval_secs: 0,
            tick_millis: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.gallery_interval(), Duration::from_secs(1));
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
