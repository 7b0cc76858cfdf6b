//! World save: the station directory and launch origins, persisted between runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::directory::StationDirectory;
use crate::spawn::SpawnLocationTracker;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSave {
    #[serde(default)]
    pub directory: StationDirectory,
    #[serde(default)]
    pub spawns: SpawnLocationTracker,
}

impl WorldSave {
    /// Write to `path` as pretty RON. Logs on error.
    pub fn save(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Failed to write world save {:?}: {}", path, e);
                } else {
                    log::info!("Saved {} station(s) to {:?}", self.directory.len(), path);
                }
            }
            Err(e) => log::warn!("Failed to encode world save: {}", e),
        }
    }

    /// Read a save. `None` when there is none yet or it cannot be parsed.
    pub fn load(path: &Path) -> Option<Self> {
        let s = std::fs::read_to_string(path).ok()?;
        match ron::from_str(&s) {
            Ok(save) => Some(save),
            Err(e) => {
                log::warn!("Ignoring unreadable world save {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SpaceStation;
    use engine_core::{BlockPos, ChunkPos, DimensionId, GlobalPos, Uuid};

    #[test]
    fn save_then_load() {
        let player = Uuid::new_v4();
        let mut save = WorldSave::default();
        save.directory.register(SpaceStation {
            owner: player,
            dimension: DimensionId::new("moon_orbit"),
            position: ChunkPos::new(-4, 9),
            name: Some("Tranquility".into()),
        });
        save.spawns
            .record(player, GlobalPos::new(DimensionId::new("moon"), BlockPos::new(-60, 80, 150)));

        let path = std::env::temp_dir().join(format!("orbital_save_{}.ron", Uuid::new_v4()));
        save.save(&path);
        let loaded = WorldSave::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, Some(save));
    }

    #[test]
    fn missing_or_corrupt_save_is_none() {
        let path = std::env::temp_dir().join(format!("orbital_save_{}.ron", Uuid::new_v4()));
        assert!(WorldSave::load(&path).is_none());

        std::fs::write(&path, "not ron at all (").unwrap();
        assert!(WorldSave::load(&path).is_none());
        let _ = std::fs::remove_file(&path);
    }
}
