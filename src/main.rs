//! Lasso Catch - headless entry point
//!
//! Plays an autoplay session in real time, saves it to the leaderboard and
//! prints the standings.
//!
//! Usage: `lasso-catch [seconds] [username]`

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use lasso_catch::{Leaderboard, Settings};
use lasso_catch::audio::{AudioPlayer, SilentAudio};
use lasso_catch::consts::TICK_MS;
use lasso_catch::game::Game;
use lasso_catch::persistence::{JsonFileStore, MemoryStore, PlayerStore};
use lasso_catch::platform::{Clock, SystemClock};
use lasso_catch::sim::GameEvent;

const DEFAULT_SECONDS: u64 = 30;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Lasso Catch (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds = match args.next() {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("Invalid duration {:?}", arg))?,
        None => DEFAULT_SECONDS,
    };

    let settings = match Settings::default_path() {
        Some(path) => Settings::load_from(&path),
        None => {
            log::warn!("Could not determine config directory, using default settings");
            Settings::default()
        }
    };
    let username = args.next().unwrap_or_else(|| settings.username.clone());

    let mut audio = SilentAudio::new();
    audio.set_volume(settings.master_volume);
    audio.set_muted(settings.muted);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut game = Game::new(
        seed,
        settings.tuning.clone(),
        open_store(settings.leaderboard_path.clone()),
        Box::new(audio),
        Box::new(SystemClock::new()),
    );

    game.start(&username);
    game.set_idle_mode(true);

    let clock = SystemClock::new();
    let deadline = seconds * 1000;
    while game.is_running() && clock.now_ms() < deadline {
        for event in game.update() {
            if let GameEvent::BallScored { kind, points, .. } = event {
                log::info!("{} +{}", kind.as_str(), points);
            }
        }
        thread::sleep(Duration::from_millis(TICK_MS));
    }

    let session = game.state().session.clone();
    game.shutdown();
    println!(
        "{}: {} points, {} balls, {} hazards",
        session.username, session.score, session.count, session.hazards
    );

    match game.store().list_players() {
        Ok(players) => print_leaderboard(&Leaderboard { entries: players }, &session.username),
        Err(e) => log::error!("Could not read leaderboard: {:#}", e),
    }

    let snapshot =
        serde_json::to_string_pretty(&game.snapshot()).context("Serializing final snapshot")?;
    println!("\n{}", snapshot);
    Ok(())
}

fn print_leaderboard(board: &Leaderboard, username: &str) {
    if board.is_empty() {
        println!("\nLeaderboard is empty");
        return;
    }

    println!("\nLeaderboard");
    for (rank, player) in board.ranked().iter().enumerate() {
        println!(
            "{:>3}. {:<16} {:>8} {:>5}",
            rank + 1,
            player.username,
            player.score,
            player.count
        );
    }

    if let Some(rank) = board.rank_of(username) {
        println!("\n{} is ranked #{}", username, rank);
    }
    if let Some(top) = board.top_score() {
        println!("Score to beat: {}", top);
    }
}

fn open_store(path: Option<PathBuf>) -> Box<dyn PlayerStore> {
    match path.map(JsonFileStore::new).or_else(JsonFileStore::open_default) {
        Some(store) => {
            log::info!("Leaderboard at {:?}", store.path());
            Box::new(store)
        }
        None => {
            log::warn!("No data directory, leaderboard kept in memory only");
            Box::new(MemoryStore::new())
        }
    }
}
