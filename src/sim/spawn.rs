//! Ball spawning
//!
//! Balls enter from one of two mirrored lanes: the upper lane from the right
//! edge drifting left, the lower lane from the left edge drifting right.
//! Fresh balls never drift vertically; the velocity keeps a y component so
//! other trajectories stay expressible.

use glam::Vec2;
use rand::Rng;

use super::state::GameState;
use crate::consts::SPAWN_OFFSET;

/// Entry lane for a new ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnLane {
    /// Right edge, moving left, upper band
    Upper,
    /// Left edge, moving right, lower band
    Lower,
}

impl SpawnLane {
    /// Entry point for a lane given a uniform roll in [0, 1) for the band offset
    pub fn entry(&self, width: f32, height: f32, roll: f32) -> Vec2 {
        let band = height / 6.0;
        let jitter = roll.clamp(0.0, 1.0) * band / 2.0;
        match self {
            SpawnLane::Upper => Vec2::new(width + SPAWN_OFFSET, band / 2.0 + jitter),
            SpawnLane::Lower => Vec2::new(-SPAWN_OFFSET, height - height / 5.0 + jitter),
        }
    }

    /// Unit drift direction
    pub fn heading(&self) -> Vec2 {
        match self {
            SpawnLane::Upper => Vec2::new(-1.0, 0.0),
            SpawnLane::Lower => Vec2::new(1.0, 0.0),
        }
    }
}

/// Spawn a ball if the population and interval gates allow it.
///
/// Returns the new ball's id.
pub fn spawn_ball(state: &mut GameState) -> Option<u32> {
    if state.balls.len() >= state.tuning.max_balls {
        return None;
    }
    if state.time_ms.saturating_sub(state.last_spawn_ms) <= state.tuning.spawn_interval_ms {
        return None;
    }

    let lane = if state.rng.random_bool(0.5) {
        SpawnLane::Upper
    } else {
        SpawnLane::Lower
    };
    let pos = lane.entry(
        state.tuning.field_width,
        state.tuning.field_height,
        state.rng.random::<f32>(),
    );
    let speed = state
        .rng
        .random_range(state.tuning.spawn_speed_min..=state.tuning.spawn_speed_max)
        as f32;
    let kind = state.tuning.weights.pick(state.rng.random::<f32>());

    let id = state.push_ball(kind, pos, lane.heading() * speed);
    state.last_spawn_ms = state.time_ms;
    log::debug!(
        "Spawned ball {} ({}) in {:?} lane at speed {}",
        id,
        kind.as_str(),
        lane,
        speed
    );
    Some(id)
}
