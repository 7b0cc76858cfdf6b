//! Client-side read model of the planets menu.
//!
//! Built once when the menu opens from the server's [`MenuOpenPayload`] and the
//! player's own inventory. Nothing here mutates shared state; the predicates
//! only decide what to show and whether a request is worth sending.

use engine_core::{BlockPos, ChunkPos, DimensionId, GlobalPos, Inventory, PlayerId};
use planets::{Planet, PlanetCatalog, RecipeBook};

use crate::cost::{CostQuote, IngredientQuote, RecipeCostResolver};
use crate::directory::{SpaceStation, StationDirectory};
use crate::ports::Requester;
use crate::protocol::{MenuOpenPayload, ServerboundMessage};

/// Tier used when the player is not riding a rocket: everything is reachable.
pub const UNRESTRICTED_TIER: u32 = 255;

#[derive(Debug, Clone)]
pub struct PlanetsMenu {
    player: PlayerId,
    dimension: DimensionId,
    block_position: BlockPos,
    riding: bool,
    tier: u32,
    proximity: i32,
    stations: StationDirectory,
    spawn_locations: Vec<GlobalPos>,
    ingredients: CostQuote,
    can_construct: bool,
    planets: Vec<Planet>,
}

impl PlanetsMenu {
    pub fn open(
        requester: &Requester,
        inventory: &Inventory,
        payload: MenuOpenPayload,
        catalog: &PlanetCatalog,
        recipes: &RecipeBook,
        proximity: i32,
    ) -> Self {
        let ingredients = RecipeCostResolver::new(recipes)
            .quote(|matcher| inventory.count_matching(|stack| matcher.test(stack)));
        let can_construct = ingredients.is_feasible(requester.dimension());

        Self {
            player: requester.id,
            dimension: requester.dimension().clone(),
            block_position: requester.block_position(),
            riding: requester.rocket.is_some(),
            tier: requester.rocket.map_or(UNRESTRICTED_TIER, |rocket| rocket.tier),
            proximity,
            stations: payload.stations,
            spawn_locations: payload.spawn_locations,
            ingredients,
            can_construct,
            planets: catalog.sorted().into_iter().cloned().collect(),
        }
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    pub fn can_reach(&self, planet: &Planet) -> bool {
        planet.tier <= self.tier
    }

    /// Display stack and available count per ingredient line, per dimension.
    pub fn ingredients(&self, dimension: &DimensionId) -> &[IngredientQuote] {
        self.ingredients.get(dimension)
    }

    /// Whether the inventory covers the recipe of the dimension the player is in.
    pub fn can_construct(&self) -> bool {
        self.can_construct
    }

    fn chunk(&self) -> ChunkPos {
        self.block_position.chunk()
    }

    /// True iff any station in `dimension` is near the player's chunk.
    pub fn is_in_space_station(&self, dimension: &DimensionId) -> bool {
        self.stations.proximity(dimension, self.chunk(), self.proximity)
    }

    /// The player's stations in `dimension`, nearest first.
    pub fn owned_space_stations(&self, dimension: &DimensionId) -> Vec<&SpaceStation> {
        self.stations.owned_by(dimension, self.player, self.chunk())
    }

    /// Planets by tier, then name.
    pub fn sorted_planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet_name(&self, dimension: &DimensionId) -> String {
        self.planets
            .iter()
            .find(|planet| &planet.dimension == dimension)
            .map(Planet::name)
            .unwrap_or_else(|| format!("planet.{}.{}", dimension.namespace(), dimension.path()))
    }

    /// Message asking to build a station above `dimension`, unless the
    /// inventory already shows it cannot be paid for.
    pub fn construct_request(&self, dimension: &DimensionId, name: &str) -> Option<ServerboundMessage> {
        let orbit = self
            .planets
            .iter()
            .find(|planet| &planet.dimension == dimension)
            .map_or(dimension, Planet::orbit_if_present);
        if !self.ingredients.is_feasible(orbit) {
            return None;
        }
        Some(ServerboundMessage::ConstructStation {
            dimension: dimension.clone(),
            name: name.to_string(),
        })
    }

    /// Where a landing in `dimension` is expected to touch down.
    pub fn landing_pos(&self, dimension: &DimensionId, try_previous_location: bool) -> BlockPos {
        if !(try_previous_location && self.riding) {
            return self.block_position;
        }
        self.spawn_locations
            .iter()
            .find(|origin| &origin.dimension == dimension)
            .map_or(self.block_position, |origin| origin.pos)
    }

    pub fn land_request(&self, dimension: &DimensionId, try_previous_location: bool) -> ServerboundMessage {
        ServerboundMessage::Land {
            dimension: dimension.clone(),
            try_previous_location,
        }
    }

    /// Dimension the player opened the menu in.
    pub fn dimension(&self) -> &DimensionId {
        &self.dimension
    }
}
