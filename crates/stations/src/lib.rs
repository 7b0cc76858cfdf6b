//! Space station construction and planet landing, server side.
//!
//! Requests arrive as [`protocol::ServerboundMessage`]s and are handled one at a
//! time by [`server::StationServer`] on the simulation thread. The decision logic
//! only touches the running world through the ports in [`ports`], so it can be
//! driven by the in-memory [`sim::SimWorld`] or by a real game runtime.

pub mod config;
pub mod console;
pub mod construct;
pub mod cost;
pub mod directory;
pub mod error;
pub mod landing;
pub mod menu;
pub mod ports;
pub mod protocol;
pub mod save;
pub mod server;
pub mod sim;
pub mod spawn;

pub use config::ServerConfig;
pub use construct::{ConstructionOutcome, ConstructionPipeline};
pub use cost::{CostQuote, IngredientQuote, RecipeCostResolver};
pub use directory::{SpaceStation, StationDirectory};
pub use error::{ClaimError, ConstructionError, LandingError, ProtocolError, RequestError};
pub use landing::{Landing, LandingTransitionService};
pub use menu::PlanetsMenu;
pub use ports::{ClaimHook, InventoryPort, PlacementSettings, Requester, WorldPort};
pub use protocol::{MenuOpenPayload, ServerboundMessage};
pub use server::{IgnoreReason, Outcome, ServerStats, StationServer};
pub use sim::SimWorld;
pub use spawn::SpawnLocationTracker;
