//! orbital-server: runs the station services against the in-memory world,
//! driven by console commands on stdin.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use engine_core::TickClock;
use planets::{PlanetCatalog, RecipeBook};
use stations::config::{config_path, ServerConfig};
use stations::console::ConsoleCommand;
use stations::save::WorldSave;
use stations::{SimWorld, StationServer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::load();
    if !config_path().exists() {
        config.save();
    }

    let catalog = match &config.planets_path {
        Some(path) => PlanetCatalog::load(path).with_context(|| format!("loading planets from {:?}", path))?,
        None => PlanetCatalog::defaults(),
    };
    let recipes = match &config.recipes_path {
        Some(path) => RecipeBook::load(path).with_context(|| format!("loading recipes from {:?}", path))?,
        None => RecipeBook::defaults(),
    };

    let mut world = SimWorld::from_config(&config, catalog.dimensions());
    let save_path = config.save_path.clone();
    let mut clock = TickClock::new(config.tick_rate);
    let mut server = StationServer::load(config, catalog, recipes, WorldSave::load(&save_path));

    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("spawning console thread")?;

    log::info!("orbital-server running at {:.0} ticks/s. Type `quit` to stop.", 1.0 / clock.tick_interval().as_secs_f64());

    let mut running = true;
    while running {
        clock.update();
        while clock.should_tick() {
            // Drain every pending command before advancing the world.
            loop {
                let line = match rx.try_recv() {
                    Ok(line) => line,
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        running = false;
                        break;
                    }
                };
                match ConsoleCommand::parse(&line) {
                    Ok(Some(command)) => match command.execute(&mut server, &mut world) {
                        Ok(true) => {}
                        Ok(false) => running = false,
                        Err(e) => log::warn!("{}", e),
                    },
                    Ok(None) => {}
                    Err(e) => log::warn!("{}", e),
                }
                if !running {
                    break;
                }
            }
            world.tick();
            if !running {
                break;
            }
        }
        thread::sleep(clock.until_next_tick());
    }

    server.unload().save(&save_path);
    log::info!("orbital-server stopped after {} ticks", world.current_tick());
    Ok(())
}
