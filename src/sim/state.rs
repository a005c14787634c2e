//! Game state and core simulation types
//!
//! The game state owns every entity. Only `tick` mutates it during play.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallKind};
use super::basket::Basket;
use super::character::Character;
use super::lasso::Lasso;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a session to start
    Ready,
    /// Active gameplay
    Playing,
    /// HP ran out
    GameOver,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LassoThrown,
    BallCaught { id: u32, kind: BallKind },
    /// A throw came back to the hand empty
    LassoMissed,
    BallScored { id: u32, kind: BallKind, points: u64 },
    HazardDelivered { id: u32, hp: u32 },
    BallDropped { id: u32 },
    GameOver,
}

/// Per-session totals handed to the store at the end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub score: u64,
    pub count: u32,
    /// Hazards delivered this session
    pub hazards: u32,
}

impl Session {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Anything worth persisting
    pub fn has_progress(&self) -> bool {
        self.score > 0 || self.count > 0
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Simulation clock
    pub time_ms: u64,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub character: Character,
    pub lasso: Lasso,
    pub basket: Basket,
    /// Live balls, ascending id
    pub balls: Vec<Ball>,
    pub session: Session,
    /// Time of the last successful spawn
    pub last_spawn_ms: u64,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
    /// True from a throw until the lasso is back or has caught something
    pub(crate) throw_pending: bool,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();

        // Character starts centered in the field
        let size = tuning.character_size;
        let start = Vec2::new(
            (tuning.field_width - size) / 2.0,
            (tuning.field_height - size) / 2.0,
        );
        let character = Character::new(start, size, tuning.character_speed, tuning.max_hp);
        let lasso = Lasso::new(
            character.center(),
            tuning.lasso_max_length,
            tuning.lasso_step,
        );
        let basket = Basket::new(
            Vec2::new(
                tuning.field_width - BASKET_RIGHT_INSET,
                tuning.field_height / 2.0 - BASKET_SIZE / 2.0,
            ),
            Vec2::splat(BASKET_SIZE),
        );

        Self {
            seed,
            tuning,
            time_ms: 0,
            time_ticks: 0,
            phase: GamePhase::Ready,
            character,
            lasso,
            basket,
            balls: Vec::new(),
            session: Session::default(),
            last_spawn_ms: 0,
            events: Vec::new(),
            throw_pending: false,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Fresh state already playing for `username`
    pub fn start(seed: u64, tuning: Tuning, username: impl Into<String>) -> Self {
        let mut state = Self::new(seed, tuning);
        state.session = Session::new(username);
        state.phase = GamePhase::Playing;
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ball to the live set
    pub fn push_ball(&mut self, kind: BallKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, kind, pos, vel));
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Character top-left bounds: `[0, w - size] x [0, h - size]`
    pub fn character_bounds(&self) -> Vec2 {
        Vec2::new(
            self.tuning.field_width - self.character.size.x,
            self.tuning.field_height - self.character.size.y,
        )
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
