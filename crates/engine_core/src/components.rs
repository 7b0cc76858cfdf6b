//! Common ECS components attached to player entities.

use glam::DVec3;

use crate::position::{BlockPos, ChunkPos, DimensionId, GlobalPos};
use crate::PlayerId;

/// Identity of a connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Where an entity currently is: the dimension plus a continuous position.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub dimension: DimensionId,
    pub position: DVec3,
}

impl Location {
    pub fn new(dimension: DimensionId, position: DVec3) -> Self {
        Self {
            dimension,
            position,
        }
    }

    pub fn block_position(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }

    pub fn chunk_position(&self) -> ChunkPos {
        self.block_position().chunk()
    }

    pub fn global_pos(&self) -> GlobalPos {
        GlobalPos::new(self.dimension.clone(), self.block_position())
    }
}

/// A rocket the player is riding. Only rockets can travel between planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rocket {
    pub tier: u32,
}

/// Kind of container UI a player has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// The planet selection screen shown at the top of a launch.
    Planets,
    /// Any other container (chests, machines, ...).
    Other,
}

/// The menu a player currently has open. Absent when no UI is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMenu(pub MenuKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_derives_block_and_chunk() {
        let loc = Location::new(DimensionId::new("earth"), DVec3::new(-20.5, 70.2, 33.0));
        assert_eq!(loc.block_position(), BlockPos::new(-21, 70, 33));
        assert_eq!(loc.chunk_position(), ChunkPos::new(-2, 2));
        assert_eq!(loc.global_pos().dimension, DimensionId::new("earth"));
    }
}
