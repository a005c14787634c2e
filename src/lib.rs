//! Lasso Catch - a lasso-and-black-hole arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, capture/delivery, spawning, tick)
//! - `game`: Fixed-rate driver that owns the collaborators
//! - `platform`: Clock abstraction
//! - `persistence`: Player score store
//! - `audio`: Audio collaborator interface
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{Leaderboard, PlayerRecord};
pub use settings::Settings;
pub use tuning::{DeliveryMode, KindWeights, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame gap the driver will try to catch up on
    pub const MAX_FRAME_MS: u64 = 100;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Character defaults
    pub const CHARACTER_SIZE: f32 = 70.0;
    pub const CHARACTER_SPEED: f32 = 5.0;
    pub const CHARACTER_MAX_HP: u32 = 3;

    /// Lasso defaults
    pub const LASSO_MAX_LENGTH: f32 = 450.0;
    pub const LASSO_STEP: f32 = 25.0;
    /// Catch radius around the lasso tip
    pub const CATCH_RADIUS: f32 = 60.0;
    /// How close to full reach an empty throw counts as missed
    pub const MISS_SLACK: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 75.0;
    pub const RARE_BALL_SIZE: f32 = 210.0;
    /// Free balls further than this outside the field are dropped
    pub const DESPAWN_MARGIN: f32 = 100.0;
    /// Spawn position outside the field edge
    pub const SPAWN_OFFSET: f32 = 50.0;
    pub const SPAWN_SPEED_MIN: u32 = 2;
    pub const SPAWN_SPEED_MAX: u32 = 4;
    pub const MAX_BALLS: usize = 10;
    pub const SPAWN_INTERVAL_MS: u64 = 1500;

    /// Capture sequence
    pub const CAPTURE_DURATION_MS: u64 = 800;
    pub const TETHER_PHASE_END: f32 = 0.2;
    pub const PULL_PHASE_END: f32 = 0.8;
    /// Pull progress after which the ball may be scored
    pub const READY_PULL_PROGRESS: f32 = 0.2;

    /// En-route delivery
    pub const EN_ROUTE_SPEED: f32 = 12.0;
    pub const GUARANTEED_SNAP_DISTANCE: f32 = 5.0;
    pub const GUARANTEED_SLOWDOWN_DISTANCE: f32 = 50.0;
    pub const BALLISTIC_ARRIVAL_DISTANCE: f32 = 40.0;
    pub const GUARANTEED_TIMEOUT_MS: u64 = 500;
    pub const BALLISTIC_TIMEOUT_MS: u64 = 2000;

    /// Basket (black hole), placed near the right edge
    pub const BASKET_SIZE: f32 = 280.0;
    pub const BASKET_RIGHT_INSET: f32 = 300.0;

    /// Sprite-sheet cycles for balls and basket
    pub const SPIN_FRAMES: usize = 50;
    pub const SPIN_FRAME_MS: u64 = 50;
}

/// Point on the ray from `origin` at `angle` (radians), `length` units out
#[inline]
pub fn point_along(origin: Vec2, angle: f32, length: f32) -> Vec2 {
    origin + Vec2::new(angle.cos() * length, angle.sin() * length)
}

/// Cubic ease-out: fast start, gentle arrival
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_along() {
        let p = point_along(Vec2::new(10.0, 10.0), 0.0, 5.0);
        assert!((p.x - 15.0).abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);

        let p = point_along(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 4.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Past the halfway mark already at half progress
        assert!(ease_out_cubic(0.5) > 0.8);
        // Clamped outside [0, 1]
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
