//! Lasso/ball collision resolution
//!
//! The hit test is a plain squared-distance check from the lasso tip to each
//! free ball's center. The first match in iteration order wins, not the
//! nearest, which keeps results stable for a given ball order.

use glam::Vec2;

use super::ball::Ball;
use super::lasso::LassoState;
use super::state::{GameEvent, GameState};
use crate::consts::MISS_SLACK;
use crate::tuning::DeliveryMode;

/// Outcome of one resolver pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchResult {
    /// Lasso idle or nothing in reach
    Nothing,
    /// Ball with this id was caught
    Caught(u32),
    /// Lasso came up empty near full reach and was sent back early
    Retracted,
}

/// Index of the first free ball within `radius_sq` of `tip`
pub fn first_ball_hit(tip: Vec2, balls: &[Ball], radius_sq: f32) -> Option<usize> {
    balls
        .iter()
        .position(|ball| ball.is_free() && tip.distance_squared(ball.pos) < radius_sq)
}

/// Check the lasso against the live balls and apply a catch or a miss
pub fn resolve_lasso(state: &mut GameState) -> CatchResult {
    let lasso_out = matches!(
        state.lasso.state(),
        LassoState::Extending | LassoState::Retracting
    ) && state.lasso.length() > 0.0;

    if lasso_out {
        let radius_sq = state.tuning.catch_radius_sq();
        if let Some(idx) = first_ball_hit(state.lasso.tip(), &state.balls, radius_sq) {
            let target = state.basket.center();
            let now = state.time_ms;
            let speed = state.tuning.en_route_speed;
            let ball = &mut state.balls[idx];
            match state.tuning.delivery {
                DeliveryMode::Cutscene => ball.capture(target, now),
                DeliveryMode::Guaranteed => ball.send_to_basket(target, speed, true, now),
                DeliveryMode::Ballistic => ball.send_to_basket(target, speed, false, now),
            };
            let (id, kind) = (ball.id, ball.kind);

            // Free the lasso immediately for the next throw
            state.lasso.cancel();
            state.throw_pending = false;
            state.events.push(GameEvent::BallCaught { id, kind });
            log::info!("Caught {} ball {}", kind.as_str(), id);
            return CatchResult::Caught(id);
        }
    }

    let at_full_reach = state.lasso.state() == LassoState::Extending
        && state.lasso.length() >= state.lasso.max_length() - MISS_SLACK;
    if at_full_reach && !state.balls.iter().any(Ball::is_captured) {
        state.lasso.begin_retract();
        log::debug!("Lasso empty at full reach, reeling in");
        return CatchResult::Retracted;
    }

    CatchResult::Nothing
}
