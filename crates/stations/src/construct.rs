//! Space station construction: validate, pay, place, register, launch.
//!
//! Every gate runs before anything is changed, so a request either completes
//! or leaves the world as it found it. The claim hook runs last and is never
//! part of that guarantee.

use engine_core::{BlockPos, DVec3, DimensionId};
use planets::PlanetCatalog;

use crate::config::ServerConfig;
use crate::cost::RecipeCostResolver;
use crate::directory::{SpaceStation, StationDirectory};
use crate::error::ConstructionError;
use crate::ports::{ClaimHook, InventoryPort, PlacementSettings, Requester, WorldPort};
use crate::spawn::SpawnLocationTracker;

/// Result of a construction request that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionOutcome {
    /// A new station was placed and the player moved into orbit.
    Built { station: SpaceStation, anchor: BlockPos },
    /// A station already exists nearby. Nothing changed.
    NearbyStation,
    /// The player cannot pay for the station. Nothing changed.
    MissingIngredients,
}

/// Borrows the services a construction request reads and writes.
pub struct ConstructionPipeline<'a> {
    pub catalog: &'a PlanetCatalog,
    pub resolver: RecipeCostResolver<'a>,
    pub directory: &'a mut StationDirectory,
    pub spawns: &'a mut SpawnLocationTracker,
    pub config: &'a ServerConfig,
}

impl ConstructionPipeline<'_> {
    /// Build a station above `target` for `requester`.
    pub fn construct<W>(
        &mut self,
        world: &mut W,
        claims: Option<&mut dyn ClaimHook>,
        requester: &Requester,
        target: &DimensionId,
        name: &str,
    ) -> Result<ConstructionOutcome, ConstructionError>
    where
        W: WorldPort + InventoryPort + ?Sized,
    {
        let planet = self
            .catalog
            .get(target)
            .ok_or_else(|| ConstructionError::UnknownPlanet(target.clone()))?;

        let orbit = planet.orbit_if_present().clone();
        if !world.has_dimension(&orbit) {
            return Err(ConstructionError::DimensionUnavailable(orbit));
        }
        let prefab = self.config.station_prefab.as_str();
        let size = world
            .prefab_size(prefab)
            .ok_or_else(|| ConstructionError::MissingPrefab(prefab.to_string()))?;

        let origin = requester.chunk();
        // A negative radius would let a second station land on the same chunk.
        if self.directory.proximity(&orbit, origin, self.config.station_proximity.max(0)) {
            log::debug!("{} already has a station near {} in {}", requester.id, origin, orbit);
            return Ok(ConstructionOutcome::NearbyStation);
        }

        let cost = self.resolver.cost(&orbit);
        let affordable = cost
            .iter()
            .all(|line| world.count(requester.id, &line.ingredient) >= line.count);
        if !affordable {
            log::debug!("{} cannot pay for a station in {}", requester.id, orbit);
            return Ok(ConstructionOutcome::MissingIngredients);
        }
        if let Err(e) = world.consume(requester.id, &cost) {
            log::debug!("{} could not pay for a station in {}: {}", requester.id, orbit, e);
            return Ok(ConstructionOutcome::MissingIngredients);
        }

        let anchor = BlockPos::containing(DVec3::new(
            origin.middle_block_x() as f64 - size.x as f64 / 2.0,
            self.config.station_anchor_height as f64,
            origin.middle_block_z() as f64 - size.z as f64 / 2.0,
        ));
        world.reserve_chunk(&orbit, anchor.chunk(), self.config.chunk_ticket_radius, anchor);
        let seed = world.next_seed(&orbit);
        world.place_prefab(&orbit, prefab, anchor, PlacementSettings::default(), seed);

        let name = name.trim();
        let station = SpaceStation {
            owner: requester.id,
            dimension: orbit.clone(),
            position: origin,
            name: (!name.is_empty()).then(|| name.to_string()),
        };
        if !self.directory.register(station.clone()) {
            log::warn!("Station of {} at {} in {} was not registered: chunk taken", requester.id, origin, orbit);
        }

        self.spawns.record(requester.id, requester.global_pos());
        let landing = origin.middle_block_position(self.config.atmosphere_leave);
        world.teleport(
            requester.id,
            &orbit,
            DVec3::new(landing.x as f64 - 0.5, landing.y as f64, landing.z as f64 - 0.5),
        );

        log::info!(
            "{} built a space station in {} at chunk {} (anchor {})",
            requester.id,
            orbit,
            origin,
            anchor
        );

        if let Some(hook) = claims {
            for chunk in origin.square_around(self.config.claim_radius) {
                if let Err(e) = hook.claim(requester.id, &orbit, chunk) {
                    log::warn!("Could not claim chunk {} in {} for {}: {}", chunk, orbit, requester.id, e);
                }
            }
        }

        Ok(ConstructionOutcome::Built { station, anchor })
    }
}
