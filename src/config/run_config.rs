use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::SliceRanges;

/// Run configuration persisted beside the executable.
///
/// Only the table-slice label ranges live here today; JSON imports carry
/// their own structure and need no configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Label ranges used to slice table-form (CSV) imports
    #[serde(default)]
    pub slice: SliceRanges,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            slice: SliceRanges::default(),
        }
    }
}

impl RunConfig {
    /// Path of the config file, in the same directory as the executable
    pub fn config_path() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe_path| exe_path.parent().map(|dir| dir.to_path_buf()))
            .map(|dir| dir.join("trip-distribution.json"))
    }

    /// Load the configuration, or fall back to defaults if the file is
    /// missing or cannot be parsed.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str::<RunConfig>(&contents) {
                    Ok(config) => {
                        info!("Loaded run configuration from {:?}", config_path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse config file: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to read config file: {}. Using defaults.", e);
                    }
                }
            }
        } else {
            warn!("Could not determine config directory. Using defaults.");
        }

        Self::default()
    }
}
