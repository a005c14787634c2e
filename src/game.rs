//! Session driver
//!
//! Owns the simulation plus its collaborators (store, audio, clock) and runs
//! the fixed-timestep accumulator. Everything outside `sim` that reacts to
//! gameplay goes through here.

use glam::Vec2;

use crate::audio::{AudioPlayer, SoundEffect, Track};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};
use crate::highscores::PlayerRecord;
use crate::persistence::PlayerStore;
use crate::platform::Clock;
use crate::sim::{GameEvent, GameState, Movement, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    store: Box<dyn PlayerStore>,
    audio: Box<dyn AudioPlayer>,
    clock: Box<dyn Clock>,
    tuning: Tuning,
    /// Seed for the next session
    seed: u64,
    input: TickInput,
    accumulator: u64,
    last_ms: u64,
    running: bool,
    /// Current session already handed to the store
    flushed: bool,
}

impl Game {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        store: Box<dyn PlayerStore>,
        mut audio: Box<dyn AudioPlayer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        audio.play_loop(Track::Menu);
        let last_ms = clock.now_ms();
        Self {
            state: GameState::new(seed, tuning.clone()),
            store,
            audio,
            clock,
            tuning,
            seed,
            input: TickInput::default(),
            accumulator: 0,
            last_ms,
            running: false,
            flushed: true,
        }
    }

    /// Begin a fresh session for `username`, ending any running one first
    pub fn start(&mut self, username: &str) {
        if self.running {
            self.stop();
        }

        if let Err(e) = self.store.ping() {
            log::warn!("Player store unavailable, scores may not be saved: {:#}", e);
        }

        let seed = self.seed;
        self.seed = self.seed.wrapping_add(1);
        self.state = GameState::start(seed, self.tuning.clone(), username);
        self.input = TickInput::default();
        self.accumulator = 0;
        self.last_ms = self.clock.now_ms();
        self.running = true;
        self.flushed = false;

        self.audio.play_loop(Track::Battle);
        log::info!("Session started for {} (seed {})", username, seed);
    }

    pub fn set_movement(&mut self, movement: Movement) {
        self.input.movement = movement;
    }

    /// Queue a throw for the next tick
    pub fn throw_at(&mut self, target: Vec2) {
        self.input.throw_at = Some(target);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    /// Run the ticks owed since the last call. Returns the events they produced.
    pub fn update(&mut self) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }

        let now = self.clock.now_ms();
        let dt = now.saturating_sub(self.last_ms).min(MAX_FRAME_MS);
        self.last_ms = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, TICK_MS);
            self.accumulator -= TICK_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.throw_at = None;
        }

        let events = self.state.drain_events();
        for event in &events {
            self.handle_event(event);
        }

        if self.state.is_game_over() {
            self.stop();
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        let effect = match event {
            GameEvent::LassoThrown => SoundEffect::Throw,
            GameEvent::BallCaught { .. } => SoundEffect::Catch,
            GameEvent::BallScored { .. } => SoundEffect::Score,
            GameEvent::HazardDelivered { .. } => SoundEffect::HazardHit,
            GameEvent::GameOver => SoundEffect::GameOver,
            GameEvent::LassoMissed | GameEvent::BallDropped { .. } => return,
        };
        self.audio.play_effect(effect);
    }

    /// End the session and hand its totals to the store. Only the first call
    /// after `start` writes anything. Returns the stored totals on success.
    pub fn stop(&mut self) -> Option<PlayerRecord> {
        if self.running {
            self.running = false;
            self.audio.play_loop(Track::Menu);
        }
        if self.flushed {
            return None;
        }
        self.flushed = true;
        self.flush()
    }

    /// End any session and silence the audio before exit
    pub fn shutdown(&mut self) -> Option<PlayerRecord> {
        let record = self.stop();
        self.audio.stop();
        log::info!("Shutting down");
        record
    }

    fn flush(&mut self) -> Option<PlayerRecord> {
        let session = &self.state.session;
        if !session.has_progress() {
            log::debug!("Nothing to save for {}", session.username);
            return None;
        }
        if session.username.trim().is_empty() {
            log::warn!("Session has no username, discarding {} points", session.score);
            return None;
        }

        match self
            .store
            .upsert_player(&session.username, session.score, session.count)
        {
            Ok(record) => {
                log::info!(
                    "Saved {}: +{} points, +{} balls (total {} / {})",
                    record.username,
                    session.score,
                    session.count,
                    record.score,
                    record.count
                );
                Some(record)
            }
            Err(e) => {
                log::error!("Failed to save session for {}: {:#}", session.username, e);
                None
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn store(&self) -> &dyn PlayerStore {
        self.store.as_ref()
    }
}
