//! Narrow interfaces between the station logic and the running world.
//!
//! The pipeline never reaches into world state directly. A runtime implements
//! [`WorldPort`] and [`InventoryPort`]; the territory-claim integration
//! implements [`ClaimHook`].

use engine_core::{
    BlockPos, ChunkPos, DVec3, DimensionId, GlobalPos, IVec3, InventoryError, Location, MenuKind,
    PlayerId, Rocket,
};
use planets::{IngredientHolder, ItemMatcher};

use crate::error::ClaimError;

/// Snapshot of the requesting player, read once at the start of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Requester {
    pub id: PlayerId,
    pub location: Location,
    pub rocket: Option<Rocket>,
    pub menu: Option<MenuKind>,
}

impl Requester {
    pub fn dimension(&self) -> &DimensionId {
        &self.location.dimension
    }

    pub fn block_position(&self) -> BlockPos {
        self.location.block_position()
    }

    pub fn chunk(&self) -> ChunkPos {
        self.location.chunk_position()
    }

    pub fn global_pos(&self) -> GlobalPos {
        self.location.global_pos()
    }

    pub fn in_planets_menu(&self) -> bool {
        self.menu == Some(MenuKind::Planets)
    }
}

/// How a prefab is oriented when placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementSettings {
    pub mirrored: bool,
    /// Clockwise quarter turns.
    pub rotation: u8,
}

/// Read and consume a player's items.
pub trait InventoryPort {
    /// Total count of the player's stacks accepted by `matcher`.
    fn count(&self, player: PlayerId, matcher: &ItemMatcher) -> u32;

    /// Remove every listed ingredient, or nothing at all if any line cannot be met.
    fn consume(&mut self, player: PlayerId, cost: &[IngredientHolder]) -> Result<(), InventoryError>;
}

/// The parts of the world a station request reads or changes.
pub trait WorldPort {
    fn requester(&self, player: PlayerId) -> Option<Requester>;

    /// Whether the runtime can provide this dimension right now.
    fn has_dimension(&self, dimension: &DimensionId) -> bool;

    /// Footprint of a loaded prefab.
    fn prefab_size(&self, prefab: &str) -> Option<IVec3>;

    /// Next value from the dimension's world random source.
    fn next_seed(&mut self, dimension: &DimensionId) -> u64;

    /// Keep the chunks around `chunk` loaded until the runtime decides to release them.
    fn reserve_chunk(&mut self, dimension: &DimensionId, chunk: ChunkPos, radius: u32, anchor: BlockPos);

    fn place_prefab(
        &mut self,
        dimension: &DimensionId,
        prefab: &str,
        anchor: BlockPos,
        settings: PlacementSettings,
        seed: u64,
    );

    /// Move the player, changing dimension if needed.
    fn teleport(&mut self, player: PlayerId, dimension: &DimensionId, position: DVec3);

    /// Open `menu` for the player, or close whatever is open when `None`.
    fn set_menu(&mut self, player: PlayerId, menu: Option<MenuKind>);
}

/// Territory-claim integration, notified after a station is built.
pub trait ClaimHook {
    fn claim(&mut self, player: PlayerId, dimension: &DimensionId, chunk: ChunkPos) -> Result<(), ClaimError>;
}
