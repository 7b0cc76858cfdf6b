//! Landing: moving a player from the planets menu down to a dimension.

use engine_core::{DVec3, DimensionId};
use planets::PlanetCatalog;

use crate::config::ServerConfig;
use crate::error::LandingError;
use crate::ports::{Requester, WorldPort};
use crate::spawn::SpawnLocationTracker;

/// Where a landing put the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub dimension: DimensionId,
    pub position: DVec3,
    /// True when the destination came from a recorded launch location.
    pub returned: bool,
}

pub struct LandingTransitionService<'a> {
    pub catalog: &'a PlanetCatalog,
    pub spawns: &'a mut SpawnLocationTracker,
    pub config: &'a ServerConfig,
}

impl LandingTransitionService<'_> {
    /// Send `requester` to `target`.
    ///
    /// With `try_previous_location` set and the player riding a rocket, the
    /// player returns to the spot they last launched from in `target`, if any.
    /// Otherwise they keep their current horizontal position. Either way they
    /// arrive at the atmosphere-leave height.
    pub fn land<W: WorldPort + ?Sized>(
        &mut self,
        world: &mut W,
        requester: &Requester,
        target: &DimensionId,
        try_previous_location: bool,
    ) -> Result<Landing, LandingError> {
        let planet = self
            .catalog
            .get(target)
            .ok_or_else(|| LandingError::UnknownPlanet(target.clone()))?;

        let landing_normally = try_previous_location && requester.rocket.is_some();
        let previous = if landing_normally {
            self.spawns.get(requester.id, &planet.dimension).cloned()
        } else {
            None
        };

        let returned = previous.is_some();
        let (dimension, pos) = match previous {
            Some(origin) => (origin.dimension, origin.pos),
            None => (planet.dimension.clone(), requester.block_position()),
        };
        if !world.has_dimension(&dimension) {
            return Err(LandingError::DimensionUnavailable(dimension));
        }

        self.spawns.record(requester.id, requester.global_pos());
        let position = DVec3::new(pos.x as f64, self.config.atmosphere_leave as f64, pos.z as f64);
        world.teleport(requester.id, &dimension, position);

        log::info!("{} is landing on {} at {:?}", requester.id, dimension, position);
        Ok(Landing {
            dimension,
            position,
            returned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimWorld;
    use engine_core::{BlockPos, GlobalPos, Location, PlayerId, Uuid};

    struct Fixture {
        config: ServerConfig,
        catalog: PlanetCatalog,
        spawns: SpawnLocationTracker,
        world: SimWorld,
        player: PlayerId,
    }

    impl Fixture {
        fn new() -> Self {
            let config = ServerConfig::default();
            let catalog = PlanetCatalog::defaults();
            let mut world = SimWorld::from_config(&config, catalog.dimensions());
            let player = Uuid::new_v4();
            world.spawn_player(
                player,
                "Ada",
                Location::new(DimensionId::new("earth_orbit"), DVec3::new(100.4, 90.0, -33.7)),
            );
            Self {
                config,
                catalog,
                spawns: SpawnLocationTracker::new(),
                world,
                player,
            }
        }

        fn land(&mut self, target: &str, try_previous: bool) -> Result<Landing, LandingError> {
            let requester = self.world.requester(self.player).unwrap();
            let mut service = LandingTransitionService {
                catalog: &self.catalog,
                spawns: &mut self.spawns,
                config: &self.config,
            };
            service.land(&mut self.world, &requester, &DimensionId::new(target), try_previous)
        }
    }

    #[test]
    fn returns_to_recorded_launch_site_in_rocket() {
        let mut fx = Fixture::new();
        fx.world.mount_rocket(fx.player, 1);
        let earth = DimensionId::new("earth");
        fx.spawns.record(fx.player, GlobalPos::new(earth.clone(), BlockPos::new(-200, 64, 512)));

        let landing = fx.land("earth", true).unwrap();

        assert!(landing.returned);
        assert_eq!(landing.dimension, earth);
        assert_eq!(landing.position, DVec3::new(-200.0, 600.0, 512.0));
        assert_eq!(fx.world.location(fx.player).unwrap().position, landing.position);
    }

    #[test]
    fn falls_back_to_current_position_without_record() {
        let mut fx = Fixture::new();
        fx.world.mount_rocket(fx.player, 1);

        let landing = fx.land("earth", true).unwrap();

        assert!(!landing.returned);
        assert_eq!(landing.dimension, DimensionId::new("earth"));
        assert_eq!(landing.position, DVec3::new(100.0, 600.0, -34.0));
    }

    #[test]
    fn ignores_record_when_not_in_rocket() {
        let mut fx = Fixture::new();
        let earth = DimensionId::new("earth");
        fx.spawns.record(fx.player, GlobalPos::new(earth, BlockPos::new(-200, 64, 512)));

        let landing = fx.land("earth", true).unwrap();

        assert!(!landing.returned);
        assert_eq!(landing.position, DVec3::new(100.0, 600.0, -34.0));
    }

    #[test]
    fn ignores_record_when_not_requested() {
        let mut fx = Fixture::new();
        fx.world.mount_rocket(fx.player, 1);
        let earth = DimensionId::new("earth");
        fx.spawns.record(fx.player, GlobalPos::new(earth, BlockPos::new(-200, 64, 512)));

        let landing = fx.land("earth", false).unwrap();

        assert!(!landing.returned);
    }

    #[test]
    fn records_departure_point() {
        let mut fx = Fixture::new();
        fx.land("moon", false).unwrap();

        let origin = fx.spawns.get(fx.player, &DimensionId::new("earth_orbit")).unwrap();
        assert_eq!(origin.pos, BlockPos::new(100, 90, -34));
        assert_eq!(fx.world.teleports().len(), 1);
    }

    #[test]
    fn missing_dimension_fails_without_side_effects() {
        let mut fx = Fixture::new();
        fx.world.remove_dimension(&DimensionId::new("mars"));

        let err = fx.land("mars", false).unwrap_err();

        assert_eq!(err, LandingError::DimensionUnavailable(DimensionId::new("mars")));
        assert!(fx.spawns.get(fx.player, &DimensionId::new("earth_orbit")).is_none());
        assert!(fx.world.teleports().is_empty());
    }

    #[test]
    fn unknown_planet_fails() {
        let mut fx = Fixture::new();
        let err = fx.land("pluto", false).unwrap_err();
        assert_eq!(err, LandingError::UnknownPlanet(DimensionId::new("pluto")));
    }
}
