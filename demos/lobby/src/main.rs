//! Scripted walk through a Mapcast game: a few players connect, move
//! between maps, and chat. Every line a player receives is printed.
//!
//! Maps and buffer sizes come from `MAPCAST_MAPS`, `MAPCAST_QUEUE_CAPACITY`
//! and `MAPCAST_INBOX_CAPACITY`, or from a JSON file passed as the first
//! argument. Set `RUST_LOG` to change verbosity.

use std::time::Duration;

use mapcast::prelude::*;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

enum Step {
    Connect(&'static str),
    Switch(&'static str, u64),
    Say(&'static str, &'static str),
}

const SCRIPT: &[Step] = &[
    Step::Connect("alice"),
    Step::Connect("Bob"),
    Step::Connect("carol o'hara"),
    Step::Switch("alice", 1),
    Step::Switch("bob", 1),
    Step::Switch("carol o'hara", 1),
    Step::Say("alice", "hi all"),
    Step::Say("carol o'hara", "hello!"),
    Step::Switch("bob", 2),
    Step::Say("alice", "where did bob go?"),
    Step::Say("bob", "anyone here?"),
    // Rejected on purpose: duplicate name, same map twice.
    Step::Connect("ALICE"),
    Step::Switch("bob", 2),
];

async fn run_step(game: &Game, step: &Step) -> Result<(), GameError> {
    match *step {
        Step::Connect(name) => game.connect_player(name).await.map(|_| ()),
        Step::Switch(name, map) => game.switch_player_map(name, MapId(map)).await,
        Step::Say(name, text) => game.send_message(name, text).await,
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| GameError::InvalidConfig(format!("{path}: {e}")))?;
            GameConfig::from_json(&raw)
        }
        None => {
            let mut config = GameConfig::from_env()?;
            if !config.map_ids.contains(&2) {
                config.map_ids.push(2);
            }
            Ok(config)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mapcast::logging::init(env!("CARGO_PKG_NAME"), "info");

    let game = Game::with_config(load_config()?)?;

    for step in SCRIPT {
        if let Err(e) = run_step(&game, step).await {
            tracing::warn!(error = %e, "step rejected");
        }
        // Give the fan-out workers a moment so output follows the script.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    for name in ["alice", "bob", "carol o'hara"] {
        let player = game.get_player(name).await?;
        for line in player.inbox().drain().await {
            println!("[{}] {}", player.name(), line);
        }
    }

    game.shutdown();
    Ok(())
}
