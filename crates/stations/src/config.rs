//! Server configuration. Loaded from config.ron at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Footprint of a placeable prefab, in blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabDef {
    pub id: String,
    pub size: [i32; 3],
}

/// Persistent server settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Height players arrive at when entering a dimension from space.
    #[serde(default = "default_atmosphere_leave")]
    pub atmosphere_leave: i32,
    /// Y of the station prefab's anchor block.
    #[serde(default = "default_station_anchor_height")]
    pub station_anchor_height: i32,
    /// Prefab placed when a station is built.
    #[serde(default = "default_station_prefab")]
    pub station_prefab: String,
    /// No new station within this many chunks (chessboard) of an existing one.
    #[serde(default = "default_station_proximity")]
    pub station_proximity: i32,
    /// Chunks claimed around a new station: a square of side `2 * radius + 1`.
    #[serde(default = "default_claim_radius")]
    pub claim_radius: i32,
    /// Radius of the chunk reservation taken before placement.
    #[serde(default = "default_chunk_ticket_radius")]
    pub chunk_ticket_radius: u32,
    /// Ticks a chunk reservation lives before the runtime releases it.
    #[serde(default = "default_chunk_ticket_ttl")]
    pub chunk_ticket_ttl: u64,
    /// Simulation ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Seed for every dimension's random source.
    #[serde(default)]
    pub world_seed: u64,
    /// Optional RON planet list. Built-in planets are used when unset.
    #[serde(default)]
    pub planets_path: Option<PathBuf>,
    /// Optional RON recipe list. Built-in recipes are used when unset.
    #[serde(default)]
    pub recipes_path: Option<PathBuf>,
    /// Where stations and launch locations are saved between runs.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Prefabs known to the world.
    #[serde(default = "default_prefabs")]
    pub prefabs: Vec<PrefabDef>,
}

fn default_atmosphere_leave() -> i32 {
    600
}
fn default_station_anchor_height() -> i32 {
    100
}
fn default_station_prefab() -> String {
    "space_station".to_string()
}
fn default_station_proximity() -> i32 {
    2
}
fn default_claim_radius() -> i32 {
    1
}
fn default_chunk_ticket_radius() -> u32 {
    1
}
fn default_chunk_ticket_ttl() -> u64 {
    300
}
fn default_tick_rate() -> f64 {
    engine_core::DEFAULT_TICK_RATE
}
fn default_save_path() -> PathBuf {
    PathBuf::from("orbital_save.ron")
}
fn default_prefabs() -> Vec<PrefabDef> {
    vec![PrefabDef {
        id: default_station_prefab(),
        size: [31, 17, 31],
    }]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            atmosphere_leave: default_atmosphere_leave(),
            station_anchor_height: default_station_anchor_height(),
            station_prefab: default_station_prefab(),
            station_proximity: default_station_proximity(),
            claim_radius: default_claim_radius(),
            chunk_ticket_radius: default_chunk_ticket_radius(),
            chunk_ticket_ttl: default_chunk_ticket_ttl(),
            tick_rate: default_tick_rate(),
            world_seed: 0,
            planets_path: None,
            recipes_path: None,
            save_path: default_save_path(),
            prefabs: default_prefabs(),
        }
    }
}

impl ServerConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

/// `config.ron` in the working directory.
pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ServerConfig = ron::from_str("(atmosphere_leave: 450)").unwrap();
        assert_eq!(config.atmosphere_leave, 450);
        assert_eq!(config.station_anchor_height, 100);
        assert_eq!(config.claim_radius, 1);
        assert_eq!(config.prefabs, default_prefabs());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = ServerConfig::load_from(Path::new("/nonexistent/orbital/config.ron"));
        assert_eq!(config.station_proximity, 2);
        assert_eq!(config.station_prefab, "space_station");
    }
}
