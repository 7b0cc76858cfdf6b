//! Operator console. Each stdin line is parsed into a [`ConsoleCommand`] and
//! run on the simulation thread between ticks.

use engine_core::{DVec3, DimensionId, ItemStack, Location, PlayerId, Uuid};
use thiserror::Error;

use crate::protocol::ServerboundMessage;
use crate::server::{Outcome, StationServer};
use crate::sim::SimWorld;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// `join <name> [dimension] [x y z]`
    Join { name: String, location: Location },
    /// `give <player> <item> <count>`
    Give { player: String, stack: ItemStack },
    /// `ride <player> <tier>`
    Ride { player: String, tier: u32 },
    Dismount { player: String },
    /// Open the planets menu.
    Open { player: String },
    Close { player: String },
    /// `send <player> <ron message>`
    Send { player: String, message: String },
    /// `construct <player> <planet> [name]`
    Construct { player: String, planet: DimensionId, name: String },
    /// `land <player> <planet> [previous]`
    Land {
        player: String,
        planet: DimensionId,
        try_previous_location: bool,
    },
    Stations,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("no player named {0:?}")]
    UnknownPlayer(String),
}

impl ConsoleCommand {
    /// Parse one console line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let line = line.trim();
        let Some((word, rest)) = split_word(line) else {
            return Ok(None);
        };
        let mut args = rest.split_whitespace();
        let mut arg = |name: &'static str| args.next().ok_or(ConsoleError::MissingArgument(name));

        let command = match word {
            "join" => {
                let name = arg("name")?.to_string();
                let dimension = DimensionId::new(args.next().unwrap_or("earth"));
                let coords: Vec<f64> = args.map(parse_number::<f64>).collect::<Result<_, _>>()?;
                let position = match coords.as_slice() {
                    [] => DVec3::new(0.0, 64.0, 0.0),
                    [x, y, z] => DVec3::new(*x, *y, *z),
                    _ => return Err(ConsoleError::MissingArgument("x y z")),
                };
                Self::Join {
                    name,
                    location: Location::new(dimension, position),
                }
            }
            "give" => {
                let player = arg("player")?.to_string();
                let item = arg("item")?.to_string();
                let count = parse_number(arg("count")?)?;
                Self::Give {
                    player,
                    stack: ItemStack::new(item, count),
                }
            }
            "ride" => {
                let player = arg("player")?.to_string();
                let tier = parse_number(arg("tier")?)?;
                Self::Ride { player, tier }
            }
            "dismount" => Self::Dismount {
                player: arg("player")?.to_string(),
            },
            "open" => Self::Open {
                player: arg("player")?.to_string(),
            },
            "close" => Self::Close {
                player: arg("player")?.to_string(),
            },
            "send" => {
                let (player, message) = split_word(rest).ok_or(ConsoleError::MissingArgument("player"))?;
                if message.is_empty() {
                    return Err(ConsoleError::MissingArgument("message"));
                }
                Self::Send {
                    player: player.to_string(),
                    message: message.to_string(),
                }
            }
            "construct" => {
                let (player, rest) = split_word(rest).ok_or(ConsoleError::MissingArgument("player"))?;
                let (planet, name) = split_word(rest).ok_or(ConsoleError::MissingArgument("planet"))?;
                Self::Construct {
                    player: player.to_string(),
                    planet: DimensionId::new(planet),
                    name: name.to_string(),
                }
            }
            "land" => {
                let player = arg("player")?.to_string();
                let planet = DimensionId::new(arg("planet")?);
                let try_previous_location = args.next() == Some("previous");
                Self::Land {
                    player,
                    planet,
                    try_previous_location,
                }
            }
            "stations" => Self::Stations,
            "quit" | "exit" => Self::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Run against the server and world. Returns false once the server should stop.
    pub fn execute(self, server: &mut StationServer, world: &mut SimWorld) -> Result<bool, ConsoleError> {
        match self {
            Self::Join { name, location } => {
                let id = Uuid::new_v4();
                world.spawn_player(id, &name, location);
                log::info!("{} joined as {}", name, id);
            }
            Self::Give { player, stack } => {
                let id = find(world, &player)?;
                let item = stack.item.clone();
                let left = world.give(id, stack);
                if left > 0 {
                    log::warn!("{}'s inventory is full, {} {} dropped", player, left, item);
                }
            }
            Self::Ride { player, tier } => {
                let id = find(world, &player)?;
                world.mount_rocket(id, tier);
            }
            Self::Dismount { player } => {
                let id = find(world, &player)?;
                world.dismount(id);
            }
            Self::Open { player } => {
                let id = find(world, &player)?;
                if let Some(payload) = server.open_planets_menu(world, id) {
                    match payload.encode() {
                        Ok(text) => log::info!("Planets menu for {}: {}", player, text),
                        Err(e) => log::warn!("Could not encode menu payload: {}", e),
                    }
                }
            }
            Self::Close { player } => {
                let id = find(world, &player)?;
                server.close_menu(world, id);
            }
            Self::Send { player, message } => {
                let id = find(world, &player)?;
                match server.handle_encoded(world, id, &message) {
                    Ok(outcome) => report(&player, &outcome),
                    Err(e) => log::warn!("Dropped message from {}: {}", player, e),
                }
            }
            Self::Construct { player, planet, name } => {
                let id = find(world, &player)?;
                let msg = ServerboundMessage::ConstructStation { dimension: planet, name };
                report(&player, &server.handle(world, id, &msg));
            }
            Self::Land {
                player,
                planet,
                try_previous_location,
            } => {
                let id = find(world, &player)?;
                let msg = ServerboundMessage::Land {
                    dimension: planet,
                    try_previous_location,
                };
                report(&player, &server.handle(world, id, &msg));
            }
            Self::Stations => {
                for station in server.directory().iter() {
                    log::info!(
                        "{} {} owner={} name={}",
                        station.dimension,
                        station.position,
                        station.owner,
                        station.name.as_deref().unwrap_or("-")
                    );
                }
                log::info!("{} station(s)", server.directory().len());
            }
            Self::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn split_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    Some(match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    })
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, ConsoleError> {
    text.parse().map_err(|_| ConsoleError::InvalidNumber(text.to_string()))
}

fn find(world: &SimWorld, name: &str) -> Result<PlayerId, ConsoleError> {
    world
        .find_player(name)
        .ok_or_else(|| ConsoleError::UnknownPlayer(name.to_string()))
}

fn report(player: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Constructed(station) => {
            log::info!("{} now owns a station in {} at {}", player, station.dimension, station.position)
        }
        Outcome::Landed(landing) => log::info!("{} landed in {}", player, landing.dimension),
        Outcome::Ignored(reason) => log::info!("{}'s request was ignored: {:?}", player, reason),
        Outcome::Failed(e) => log::info!("{}'s request failed: {}", player, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use planets::{PlanetCatalog, RecipeBook};

    #[test]
    fn parses_commands() {
        assert_eq!(ConsoleCommand::parse("   ").unwrap(), None);
        assert_eq!(ConsoleCommand::parse("quit").unwrap(), Some(ConsoleCommand::Quit));
        assert_eq!(
            ConsoleCommand::parse("join Ada mars 1 70 -2").unwrap(),
            Some(ConsoleCommand::Join {
                name: "Ada".into(),
                location: Location::new(DimensionId::new("mars"), DVec3::new(1.0, 70.0, -2.0)),
            })
        );
        assert_eq!(
            ConsoleCommand::parse("construct Ada earth  Home Base ").unwrap(),
            Some(ConsoleCommand::Construct {
                player: "Ada".into(),
                planet: DimensionId::new("earth"),
                name: "Home Base".into(),
            })
        );
        assert_eq!(
            ConsoleCommand::parse("land Ada moon previous").unwrap(),
            Some(ConsoleCommand::Land {
                player: "Ada".into(),
                planet: DimensionId::new("moon"),
                try_previous_location: true,
            })
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            ConsoleCommand::parse("fly Ada"),
            Err(ConsoleError::UnknownCommand("fly".into()))
        );
        assert_eq!(
            ConsoleCommand::parse("give Ada steel lots"),
            Err(ConsoleError::InvalidNumber("lots".into()))
        );
        assert_eq!(ConsoleCommand::parse("ride"), Err(ConsoleError::MissingArgument("player")));
        assert_eq!(ConsoleCommand::parse("send Ada"), Err(ConsoleError::MissingArgument("message")));
    }

    #[test]
    fn console_session_builds_a_station() {
        let config = ServerConfig::default();
        let catalog = PlanetCatalog::defaults();
        let mut world = SimWorld::from_config(&config, catalog.dimensions());
        let mut server = StationServer::load(config, catalog, RecipeBook::defaults(), None);

        let lines = [
            "join Ada earth 40 64 -8",
            "give Ada orbital:steel_ingot 32",
            "give Ada orbital:iron_plate 16",
            "open Ada",
            "send Ada ConstructStation(dimension: \"orbital:earth\", name: \"Home\")",
        ];
        for line in lines {
            let command = ConsoleCommand::parse(line).unwrap().unwrap();
            assert!(command.execute(&mut server, &mut world).unwrap());
        }
        assert_eq!(server.directory().len(), 1);

        let unknown = ConsoleCommand::parse("open Bob").unwrap().unwrap();
        assert_eq!(
            unknown.execute(&mut server, &mut world),
            Err(ConsoleError::UnknownPlayer("Bob".into()))
        );
        let quit = ConsoleCommand::parse("quit").unwrap().unwrap();
        assert!(!quit.execute(&mut server, &mut world).unwrap());
    }
}
