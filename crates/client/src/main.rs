//! Dungeon party binary.
//!
//! Composition root: loads configuration, installs logging, and hands the
//! run to the automatic [`driver`], which plays every floor and prints the
//! final standings.
//!
//! # Environment
//!
//! - `DUNGEON_CONFIG`: TOML file with the game tunables
//! - `DUNGEON_LOG_DIR`: also write logs to `dungeon.log` in this directory
//! - `DUNGEON_EVENTS_JSON`: stream runtime events to stdout as JSON lines
//! - `RUST_LOG`: log filter (default `info`)
//!
//! Runtime variables (`DUNGEON_MAX_FLOORS`, `DUNGEON_SEED`, ...) are read by
//! [`runtime::RuntimeConfig::from_env_with`].

mod driver;
mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use game_content::ConfigLoader;
use game_core::GameConfig;
use runtime::{RuntimeConfig, RuntimeContext};

use crate::driver::Driver;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = logging::setup_logging()?;

    let game = match std::env::var("DUNGEON_CONFIG") {
        Ok(path) => ConfigLoader::load(Path::new(&path))
            .with_context(|| format!("loading game config from {path}"))?,
        Err(_) => GameConfig::default(),
    };
    let config = RuntimeConfig::from_env_with(RuntimeConfig::with_game(game));
    config.validate()?;

    tracing::info!(
        max_floors = config.game.max_floors,
        party_size = config.game.party_size,
        seed = ?config.seed,
        "starting run"
    );

    let stream_events = std::env::var_os("DUNGEON_EVENTS_JSON").is_some_and(|v| v != "0");
    let ctx = RuntimeContext::new(config);
    let summary = Driver::new(ctx, stream_events).run().await?;

    driver::print_summary(&summary);
    tracing::info!(survivors = summary.survivors.len(), "run finished");
    Ok(())
}
