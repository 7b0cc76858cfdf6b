//! Request dispatch for the planets menu.
//!
//! [`StationServer`] owns the station directory and launch-origin tracker for
//! the lifetime of a loaded world. Requests are handled one at a time on the
//! simulation thread, each to completion before the next.

use engine_core::{MenuKind, PlayerId};
use planets::{PlanetCatalog, RecipeBook};

use crate::config::ServerConfig;
use crate::construct::{ConstructionOutcome, ConstructionPipeline};
use crate::cost::RecipeCostResolver;
use crate::directory::{SpaceStation, StationDirectory};
use crate::error::{ProtocolError, RequestError};
use crate::landing::{Landing, LandingTransitionService};
use crate::ports::{ClaimHook, InventoryPort, WorldPort};
use crate::protocol::{MenuOpenPayload, ServerboundMessage};
use crate::save::WorldSave;
use crate::spawn::SpawnLocationTracker;

/// Why a request was dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownPlayer,
    MenuNotOpen,
    NearbyStation,
    MissingIngredients,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Constructed(SpaceStation),
    Landed(Landing),
    Ignored(IgnoreReason),
    Failed(RequestError),
}

/// Running totals since the world was loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerStats {
    pub constructed: u64,
    pub landed: u64,
    pub ignored: u64,
    /// Requests that failed with an error. Configuration faults are a subset.
    pub failed: u64,
    pub faults: u64,
}

pub struct StationServer {
    config: ServerConfig,
    catalog: PlanetCatalog,
    recipes: RecipeBook,
    directory: StationDirectory,
    spawns: SpawnLocationTracker,
    claims: Option<Box<dyn ClaimHook>>,
    stats: ServerStats,
}

impl StationServer {
    /// Start the services for a world, restoring `save` when given.
    pub fn load(config: ServerConfig, catalog: PlanetCatalog, recipes: RecipeBook, save: Option<WorldSave>) -> Self {
        let WorldSave { directory, spawns } = save.unwrap_or_default();
        log::info!(
            "Station services loaded: {} planets, {} recipes, {} stations, {} players with launch origins",
            catalog.len(),
            recipes.len(),
            directory.len(),
            spawns.player_count()
        );
        Self {
            config,
            catalog,
            recipes,
            directory,
            spawns,
            claims: None,
            stats: ServerStats::default(),
        }
    }

    /// Install the territory-claim integration.
    pub fn with_claims(mut self, hook: Box<dyn ClaimHook>) -> Self {
        self.claims = Some(hook);
        self
    }

    /// Tear the services down, handing back the state worth saving.
    pub fn unload(self) -> WorldSave {
        log::info!(
            "Station services unloaded ({} constructed, {} landed, {} ignored, {} failed)",
            self.stats.constructed,
            self.stats.landed,
            self.stats.ignored,
            self.stats.failed
        );
        WorldSave {
            directory: self.directory,
            spawns: self.spawns,
        }
    }

    pub fn menu_payload(&self, player: PlayerId) -> MenuOpenPayload {
        MenuOpenPayload::build(&self.directory, &self.spawns, player)
    }

    /// Open the planets menu for `player`. `None` if the player is not in the world.
    pub fn open_planets_menu<W: WorldPort + ?Sized>(&self, world: &mut W, player: PlayerId) -> Option<MenuOpenPayload> {
        world.requester(player)?;
        world.set_menu(player, Some(MenuKind::Planets));
        Some(self.menu_payload(player))
    }

    pub fn close_menu<W: WorldPort + ?Sized>(&self, world: &mut W, player: PlayerId) {
        world.set_menu(player, None);
    }

    /// Handle one request from `player`.
    pub fn handle<W>(&mut self, world: &mut W, player: PlayerId, msg: &ServerboundMessage) -> Outcome
    where
        W: WorldPort + InventoryPort + ?Sized,
    {
        let outcome = self.dispatch(world, player, msg);
        match &outcome {
            Outcome::Constructed(_) => self.stats.constructed += 1,
            Outcome::Landed(_) => self.stats.landed += 1,
            Outcome::Ignored(reason) => {
                self.stats.ignored += 1;
                log::debug!("Ignored {} from {}: {:?}", msg.id(), player, reason);
            }
            Outcome::Failed(e) => {
                self.stats.failed += 1;
                if e.is_configuration_fault() {
                    self.stats.faults += 1;
                    log::error!("{} from {} failed: {}", msg.id(), player, e);
                } else {
                    log::warn!("{} from {} rejected: {}", msg.id(), player, e);
                }
            }
        }
        outcome
    }

    /// Decode a RON message and handle it.
    pub fn handle_encoded<W>(&mut self, world: &mut W, player: PlayerId, text: &str) -> Result<Outcome, ProtocolError>
    where
        W: WorldPort + InventoryPort + ?Sized,
    {
        let msg = ServerboundMessage::decode(text)?;
        Ok(self.handle(world, player, &msg))
    }

    fn dispatch<W>(&mut self, world: &mut W, player: PlayerId, msg: &ServerboundMessage) -> Outcome
    where
        W: WorldPort + InventoryPort + ?Sized,
    {
        let Some(requester) = world.requester(player) else {
            return Outcome::Ignored(IgnoreReason::UnknownPlayer);
        };
        if !requester.in_planets_menu() {
            return Outcome::Ignored(IgnoreReason::MenuNotOpen);
        }

        match msg {
            ServerboundMessage::ConstructStation { dimension, name } => {
                let mut pipeline = ConstructionPipeline {
                    catalog: &self.catalog,
                    resolver: RecipeCostResolver::new(&self.recipes),
                    directory: &mut self.directory,
                    spawns: &mut self.spawns,
                    config: &self.config,
                };
                let claims = self.claims.as_deref_mut().map(|hook| hook as &mut dyn ClaimHook);
                match pipeline.construct(world, claims, &requester, dimension, name) {
                    Ok(ConstructionOutcome::Built { station, .. }) => Outcome::Constructed(station),
                    Ok(ConstructionOutcome::NearbyStation) => Outcome::Ignored(IgnoreReason::NearbyStation),
                    Ok(ConstructionOutcome::MissingIngredients) => {
                        Outcome::Ignored(IgnoreReason::MissingIngredients)
                    }
                    Err(e) => Outcome::Failed(e.into()),
                }
            }
            ServerboundMessage::Land {
                dimension,
                try_previous_location,
            } => {
                let mut service = LandingTransitionService {
                    catalog: &self.catalog,
                    spawns: &mut self.spawns,
                    config: &self.config,
                };
                match service.land(world, &requester, dimension, *try_previous_location) {
                    Ok(landing) => Outcome::Landed(landing),
                    Err(e) => Outcome::Failed(e.into()),
                }
            }
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PlanetCatalog {
        &self.catalog
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    pub fn directory(&self) -> &StationDirectory {
        &self.directory
    }

    pub fn spawns(&self) -> &SpawnLocationTracker {
        &self.spawns
    }

    pub fn stats(&self) -> ServerStats {
        self.stats
    }
}
