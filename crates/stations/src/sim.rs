//! In-memory world runtime.
//!
//! Players are hecs entities carrying [`PlayerProfile`], [`Location`],
//! [`Inventory`] and optionally [`Rocket`] and [`OpenMenu`]. Each dimension has
//! its own seeded random source, chunk reservations and placed prefabs.

use std::collections::{BTreeMap, HashMap};

use engine_core::{
    BlockPos, ChunkPos, DimensionId, Inventory, InventoryError, ItemStack, Location, MenuKind,
    OpenMenu, PlayerId, PlayerProfile, Rocket,
};
use glam::{DVec3, IVec3};
use hecs::{Entity, World};
use planets::{IngredientHolder, ItemMatcher};
use rand::prelude::*;

use crate::config::ServerConfig;
use crate::ports::{InventoryPort, PlacementSettings, Requester, WorldPort};

/// A reservation keeping chunks loaded until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkTicket {
    pub chunk: ChunkPos,
    pub radius: u32,
    pub anchor: BlockPos,
    pub expires_at: u64,
}

/// A prefab written into a dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub prefab: String,
    pub anchor: BlockPos,
    pub size: IVec3,
    pub settings: PlacementSettings,
    pub seed: u64,
}

/// One completed teleport.
#[derive(Debug, Clone, PartialEq)]
pub struct Teleport {
    pub player: PlayerId,
    pub from: DimensionId,
    pub to: DimensionId,
    pub position: DVec3,
}

#[derive(Debug)]
struct Level {
    rng: StdRng,
    tickets: Vec<ChunkTicket>,
    placements: Vec<Placement>,
}

/// Single-threaded world holding players and dimensions.
pub struct SimWorld {
    entities: World,
    players: HashMap<PlayerId, Entity>,
    levels: BTreeMap<DimensionId, Level>,
    prefabs: HashMap<String, IVec3>,
    world_seed: u64,
    ticket_ttl: u64,
    tick: u64,
    teleports: Vec<Teleport>,
}

impl SimWorld {
    pub fn new(world_seed: u64, ticket_ttl: u64) -> Self {
        Self {
            entities: World::new(),
            players: HashMap::new(),
            levels: BTreeMap::new(),
            prefabs: HashMap::new(),
            world_seed,
            ticket_ttl,
            tick: 0,
            teleports: Vec::new(),
        }
    }

    /// World with the configured prefabs and one level per dimension.
    pub fn from_config(config: &ServerConfig, dimensions: impl IntoIterator<Item = DimensionId>) -> Self {
        let mut world = Self::new(config.world_seed, config.chunk_ticket_ttl);
        for prefab in &config.prefabs {
            world.add_prefab(&prefab.id, IVec3::from_array(prefab.size));
        }
        for dimension in dimensions {
            world.add_dimension(dimension);
        }
        world
    }

    pub fn add_prefab(&mut self, id: &str, size: IVec3) {
        self.prefabs.insert(id.to_string(), size);
    }

    /// Create a level. Its random source depends only on the world seed and the id.
    pub fn add_dimension(&mut self, dimension: DimensionId) {
        let seed = self.world_seed ^ fnv1a(dimension.as_str().as_bytes());
        self.levels.entry(dimension).or_insert_with(|| Level {
            rng: StdRng::seed_from_u64(seed),
            tickets: Vec::new(),
            placements: Vec::new(),
        });
    }

    pub fn remove_dimension(&mut self, dimension: &DimensionId) {
        self.levels.remove(dimension);
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &DimensionId> {
        self.levels.keys()
    }

    pub fn spawn_player(&mut self, id: PlayerId, name: &str, location: Location) -> Entity {
        if let Some(old) = self.players.remove(&id) {
            let _ = self.entities.despawn(old);
        }
        let entity = self
            .entities
            .spawn((PlayerProfile::new(id, name), location, Inventory::default()));
        self.players.insert(id, entity);
        entity
    }

    pub fn despawn_player(&mut self, id: PlayerId) {
        if let Some(entity) = self.players.remove(&id) {
            let _ = self.entities.despawn(entity);
        }
    }

    /// Look a player up by display name.
    pub fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.entities
            .query::<&PlayerProfile>()
            .iter()
            .find(|(_, profile)| profile.name == name)
            .map(|(_, profile)| profile.id)
    }

    /// Add items to a player's inventory. Returns the count that did not fit.
    pub fn give(&mut self, player: PlayerId, stack: ItemStack) -> u32 {
        let count = stack.count;
        self.entity(player)
            .and_then(|e| self.entities.get::<&mut Inventory>(e).ok())
            .map_or(count, |mut inventory| inventory.insert(stack))
    }

    pub fn inventory(&self, player: PlayerId) -> Option<Inventory> {
        let entity = self.entity(player)?;
        self.entities.get::<&Inventory>(entity).ok().map(|inv| Inventory::clone(&inv))
    }

    pub fn location(&self, player: PlayerId) -> Option<Location> {
        let entity = self.entity(player)?;
        self.entities.get::<&Location>(entity).ok().map(|loc| Location::clone(&loc))
    }

    pub fn mount_rocket(&mut self, player: PlayerId, tier: u32) {
        if let Some(entity) = self.entity(player) {
            let _ = self.entities.insert_one(entity, Rocket { tier });
        }
    }

    pub fn dismount(&mut self, player: PlayerId) {
        if let Some(entity) = self.entity(player) {
            let _ = self.entities.remove_one::<Rocket>(entity);
        }
    }

    pub fn open_menu(&mut self, player: PlayerId, kind: MenuKind) {
        if let Some(entity) = self.entity(player) {
            let _ = self.entities.insert_one(entity, OpenMenu(kind));
        }
    }

    pub fn close_menu(&mut self, player: PlayerId) {
        if let Some(entity) = self.entity(player) {
            let _ = self.entities.remove_one::<OpenMenu>(entity);
        }
    }

    /// Advance one tick, releasing expired chunk reservations.
    pub fn tick(&mut self) {
        self.tick += 1;
        let now = self.tick;
        for (dimension, level) in self.levels.iter_mut() {
            let before = level.tickets.len();
            level.tickets.retain(|ticket| ticket.expires_at > now);
            let released = before - level.tickets.len();
            if released > 0 {
                log::debug!("Released {} chunk ticket(s) in {}", released, dimension);
            }
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn tickets(&self, dimension: &DimensionId) -> &[ChunkTicket] {
        self.levels.get(dimension).map(|l| l.tickets.as_slice()).unwrap_or(&[])
    }

    pub fn placements(&self, dimension: &DimensionId) -> &[Placement] {
        self.levels.get(dimension).map(|l| l.placements.as_slice()).unwrap_or(&[])
    }

    pub fn teleports(&self) -> &[Teleport] {
        &self.teleports
    }

    fn entity(&self, player: PlayerId) -> Option<Entity> {
        self.players.get(&player).copied()
    }
}

impl WorldPort for SimWorld {
    fn requester(&self, player: PlayerId) -> Option<Requester> {
        let entity = self.entity(player)?;
        let location = Location::clone(&*self.entities.get::<&Location>(entity).ok()?);
        let rocket = self.entities.get::<&Rocket>(entity).ok().map(|r| *r);
        let menu = self.entities.get::<&OpenMenu>(entity).ok().map(|m| m.0);
        Some(Requester {
            id: player,
            location,
            rocket,
            menu,
        })
    }

    fn has_dimension(&self, dimension: &DimensionId) -> bool {
        self.levels.contains_key(dimension)
    }

    fn prefab_size(&self, prefab: &str) -> Option<IVec3> {
        self.prefabs.get(prefab).copied()
    }

    fn next_seed(&mut self, dimension: &DimensionId) -> u64 {
        self.levels.get_mut(dimension).map_or(0, |level| level.rng.gen())
    }

    fn reserve_chunk(&mut self, dimension: &DimensionId, chunk: ChunkPos, radius: u32, anchor: BlockPos) {
        let expires_at = self.tick + self.ticket_ttl;
        if let Some(level) = self.levels.get_mut(dimension) {
            level.tickets.push(ChunkTicket {
                chunk,
                radius,
                anchor,
                expires_at,
            });
        }
    }

    fn place_prefab(
        &mut self,
        dimension: &DimensionId,
        prefab: &str,
        anchor: BlockPos,
        settings: PlacementSettings,
        seed: u64,
    ) {
        let size = self.prefabs.get(prefab).copied().unwrap_or(IVec3::ZERO);
        match self.levels.get_mut(dimension) {
            Some(level) => level.placements.push(Placement {
                prefab: prefab.to_string(),
                anchor,
                size,
                settings,
                seed,
            }),
            None => log::error!("Cannot place {} in missing dimension {}", prefab, dimension),
        }
    }

    fn teleport(&mut self, player: PlayerId, dimension: &DimensionId, position: DVec3) {
        let Some(entity) = self.entity(player) else {
            return;
        };
        let Ok(mut location) = self.entities.get::<&mut Location>(entity) else {
            return;
        };
        let from = std::mem::replace(&mut location.dimension, dimension.clone());
        location.position = position;
        self.teleports.push(Teleport {
            player,
            from,
            to: dimension.clone(),
            position,
        });
    }

    fn set_menu(&mut self, player: PlayerId, menu: Option<MenuKind>) {
        match menu {
            Some(kind) => self.open_menu(player, kind),
            None => self.close_menu(player),
        }
    }
}

impl InventoryPort for SimWorld {
    fn count(&self, player: PlayerId, matcher: &ItemMatcher) -> u32 {
        self.entity(player)
            .and_then(|e| self.entities.get::<&Inventory>(e).ok())
            .map_or(0, |inv| inv.count_matching(|stack| matcher.test(stack)))
    }

    fn consume(&mut self, player: PlayerId, cost: &[IngredientHolder]) -> Result<(), InventoryError> {
        let required: u32 = cost.iter().map(|line| line.count).sum();
        let Some(entity) = self.entity(player) else {
            return Err(InventoryError::Insufficient { required, available: 0 });
        };
        let Ok(mut inventory) = self.entities.get::<&mut Inventory>(entity) else {
            return Err(InventoryError::Insufficient { required, available: 0 });
        };

        // Work on a copy so a failing line leaves the real inventory untouched.
        let mut pending = Inventory::clone(&inventory);
        for line in cost {
            pending.remove_matching(|stack| line.ingredient.test(stack), line.count)?;
        }
        *inventory = pending;
        Ok(())
    }
}

/// 64-bit FNV-1a, stable across runs and platforms.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
