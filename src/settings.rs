//! Game settings
//!
//! Read once at startup from an optional JSON file. Nothing is ever written
//! back; a missing or unreadable file just means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Environment variable naming an alternative settings file
pub const CONFIG_ENV: &str = "MAZE_RUNNER_CONFIG";
/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "maze_runner.json";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Directory holding `<sprite>.png` files
    pub asset_dir: PathBuf,
    /// Update/render rate
    pub target_fps: u32,
    /// Show the controls line under the maze
    pub show_controls_hint: bool,
    /// Send log output to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            asset_dir: PathBuf::from("assets/images"),
            target_fps: TARGET_FPS,
            show_controls_hint: true,
            log_file: None,
        }
    }
}

impl Settings {
    /// Settings from `$MAZE_RUNNER_CONFIG`, else `./maze_runner.json`, else defaults
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or spin the frame loop
    fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(1, 240);
        self
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Length of one frame at the target rate
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.target_fps.max(1)
    }
}
