//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order within a
//! tick is fixed: intents, character, lasso, basket, balls (advance, score,
//! remove), collision resolver, spawner.

use glam::Vec2;

use super::ball::{Ball, BallKind};
use super::collision::resolve_lasso;
use super::spawn::spawn_ball;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::DESPAWN_MARGIN;

/// Movement intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Movement {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: Movement,
    /// Throw the lasso toward this field position
    pub throw_at: Option<Vec2>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep of `dt_ms`
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    if state.phase == GamePhase::Ready {
        return;
    }

    state.time_ticks += 1;
    state.time_ms += dt_ms;
    let now = state.time_ms;

    // Death state keeps animating until the session is reset
    if state.phase == GamePhase::GameOver {
        state.character.set_idle();
        state.character.update_animation(now);
        state.lasso.set_origin(state.character.center());
        state.basket.update_animation(now);
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    apply_movement(state, input.movement);
    if let Some(target) = input.throw_at
        && state.lasso.throw(target)
    {
        state.throw_pending = true;
        state.events.push(GameEvent::LassoThrown);
    }

    state.character.update_animation(now);

    state.lasso.set_origin(state.character.center());
    state.lasso.advance();
    // Back in hand and nothing caught on the way out or in
    if !state.lasso.is_active() && state.throw_pending {
        state.throw_pending = false;
        state.events.push(GameEvent::LassoMissed);
        log::debug!("Lasso missed");
    }

    state.basket.update_animation(now);

    update_balls(state, now);

    if state.phase != GamePhase::Playing {
        return;
    }

    resolve_lasso(state);
    spawn_ball(state);
}

/// Move the character unless the step would leave the field
fn apply_movement(state: &mut GameState, movement: Movement) {
    let bounds = state.character_bounds();
    let pos = state.character.pos;
    let speed = state.character.speed;

    match movement {
        Movement::None => state.character.set_idle(),
        Movement::Up if pos.y - speed >= 0.0 => state.character.move_up(),
        Movement::Down if pos.y + speed <= bounds.y => state.character.move_down(),
        Movement::Left if pos.x - speed >= 0.0 => state.character.move_left(),
        Movement::Right if pos.x + speed <= bounds.x => state.character.move_right(),
        // Out-of-bounds intents are dropped
        _ => {}
    }
}

/// Advance every ball, settle scores, drop finished or lost balls
fn update_balls(state: &mut GameState, now: u64) {
    let capture_ms = state.tuning.capture_duration_ms;
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    let mut ready: Vec<(u32, BallKind)> = Vec::new();
    let mut dropped: Vec<u32> = Vec::new();

    state.balls.retain_mut(|ball| {
        if let Err(fault) = ball.advance(now, capture_ms) {
            log::warn!("Dropping ball: {}", fault);
            dropped.push(ball.id);
            return false;
        }
        ball.update_animation(now);

        if ball.should_force_delivery(now) {
            ball.force_delivery();
        }

        if ball.take_score() {
            ready.push((ball.id, ball.kind));
        }

        keep_ball(ball, width, height)
    });

    for id in dropped {
        state.events.push(GameEvent::BallDropped { id });
    }
    for (id, kind) in ready {
        apply_score(state, id, kind);
    }
}

fn keep_ball(ball: &Ball, width: f32, height: f32) -> bool {
    if ball.is_delivered() {
        return false;
    }
    !(ball.is_free() && ball.is_off_field(width, height, DESPAWN_MARGIN))
}

/// The scoring arbiter. Called once per ball, guarded by `Ball::take_score`.
fn apply_score(state: &mut GameState, id: u32, kind: BallKind) {
    if kind.is_hazard() {
        state.character.take_damage(kind.damage());
        state.session.hazards += 1;
        let hp = state.character.hp();
        state.events.push(GameEvent::HazardDelivered { id, hp });
        log::info!("Hazard delivered, HP down to {}", hp);

        if !state.character.is_alive() && state.phase == GamePhase::Playing {
            state.phase = GamePhase::GameOver;
            state.lasso.cancel();
            state.throw_pending = false;
            state.events.push(GameEvent::GameOver);
            log::info!(
                "Game over for {} with score {}",
                state.session.username,
                state.session.score
            );
        }
    } else {
        let points = kind.points();
        state.session.score += points;
        state.events.push(GameEvent::BallScored { id, kind, points });
        log::info!(
            "{} delivered: +{} = {}",
            kind.as_str(),
            points,
            state.session.score
        );
    }
    state.session.count += 1;
}

/// Demo AI: chase the nearest scoring ball vertically and lasso it when in reach
fn autopilot(state: &GameState) -> TickInput {
    let center = state.character.center();
    let reach = state.lasso.max_length();

    let target = state
        .balls
        .iter()
        .filter(|b| b.is_free() && !b.kind.is_hazard())
        .filter(|b| b.pos.x >= 0.0 && b.pos.x <= state.tuning.field_width)
        .min_by(|a, b| {
            a.pos
                .distance_squared(center)
                .partial_cmp(&b.pos.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(ball) = target else {
        return TickInput::default();
    };

    let dy = ball.pos.y - center.y;
    let movement = if dy.abs() <= state.character.speed {
        Movement::None
    } else if dy < 0.0 {
        Movement::Up
    } else {
        Movement::Down
    };

    // Lead the target by the lasso's travel time
    let travel_ticks = ball.pos.distance(center) / state.tuning.lasso_step;
    let aim = ball.pos + ball.vel * travel_ticks;
    let throw_at = (!state.lasso.is_active() && aim.distance(center) < reach).then_some(aim);

    TickInput {
        movement,
        throw_at,
        idle_mode: true,
    }
}
