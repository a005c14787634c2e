//! Read-only render view of the game state
//!
//! Renderers never touch `GameState` directly; they get an owned `Snapshot`
//! per frame.

use glam::Vec2;
use serde::Serialize;

use super::ball::BallKind;
use super::character::AnimState;
use super::lasso::LassoState;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct CharacterView {
    pub pos: Vec2,
    pub size: Vec2,
    pub anim: AnimState,
    pub frame: usize,
    pub hp: u32,
    pub max_hp: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LassoView {
    pub state: LassoState,
    pub origin: Vec2,
    pub tip: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub id: u32,
    pub kind: BallKind,
    pub pos: Vec2,
    pub size: f32,
    pub phase: &'static str,
    /// Rope from the basket while the capture tether reaches out
    pub tether: Option<f32>,
    pub frame: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasketView {
    pub pos: Vec2,
    pub size: Vec2,
    pub frame: usize,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub phase: GamePhase,
    pub username: String,
    pub score: u64,
    pub count: u32,
    pub hazards: u32,
    pub character: CharacterView,
    pub lasso: LassoView,
    pub basket: BasketView,
    pub balls: Vec<BallView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let c = &state.character;
        let balls = state
            .balls
            .iter()
            .map(|b| BallView {
                id: b.id,
                kind: b.kind,
                pos: b.pos,
                size: b.kind.size(),
                phase: b.phase.name(),
                tether: match b.phase {
                    super::BallPhase::Captured { tether, .. } if tether > 0.0 => Some(tether),
                    _ => None,
                },
                frame: b.frame(),
            })
            .collect();

        Self {
            time_ms: state.time_ms,
            phase: state.phase,
            username: state.session.username.clone(),
            score: state.session.score,
            count: state.session.count,
            hazards: state.session.hazards,
            character: CharacterView {
                pos: c.pos,
                size: c.size,
                anim: c.anim(),
                frame: c.frame(),
                hp: c.hp(),
                max_hp: c.max_hp(),
            },
            lasso: LassoView {
                state: state.lasso.state(),
                origin: state.lasso.origin(),
                tip: state.lasso.tip(),
            },
            basket: BasketView {
                pos: state.basket.pos,
                size: state.basket.size,
                frame: state.basket.frame(),
            },
            balls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::start(3, Tuning::default(), "viewer");
        state.push_ball(BallKind::Rare, Vec2::new(10.0, 20.0), Vec2::ZERO);
        state.session.score = 200;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.username, "viewer");
        assert_eq!(snap.score, 200);
        assert_eq!(snap.character.hp, 3);
        assert_eq!(snap.lasso.state, LassoState::Idle);
        assert_eq!(snap.balls.len(), 1);
        assert_eq!(snap.balls[0].phase, "free");
        assert_eq!(snap.balls[0].size, crate::consts::RARE_BALL_SIZE);
        assert!(snap.balls[0].tether.is_none());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::start(3, Tuning::default(), "viewer");
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"username\":\"viewer\""));
        assert!(json.contains("\"phase\":\"Playing\""));
    }
}
