//! Skill balls and their capture/delivery state machine
//!
//! ```text
//! Free ──hit──▶ Captured ──(scripted pull)──▶ Delivered
//!   └───hit──▶ EnRoute ──(arrive | stall timeout)──▶ Delivered
//! ```
//!
//! Scoring is decoupled from arrival: `ready_to_score` fires partway through
//! the pull so points land before the animation finishes. `scored` guards
//! against counting a ball twice and never reverts.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ease_out_cubic;

/// Ball catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    /// Earth
    Common,
    /// Ice planet
    Uncommon,
    /// Galaxy
    Rare,
    /// Gas planet - costs a life instead of scoring
    Hazard,
}

impl BallKind {
    pub fn points(&self) -> u64 {
        match self {
            BallKind::Common => 50,
            BallKind::Uncommon => 75,
            BallKind::Rare => 200,
            BallKind::Hazard => 0,
        }
    }

    /// HP lost when delivered
    pub fn damage(&self) -> u32 {
        match self {
            BallKind::Hazard => 1,
            _ => 0,
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, BallKind::Hazard)
    }

    /// Rendered diameter
    pub fn size(&self) -> f32 {
        match self {
            BallKind::Rare => RARE_BALL_SIZE,
            _ => BALL_SIZE,
        }
    }

    /// Sprite name
    pub fn as_str(&self) -> &'static str {
        match self {
            BallKind::Common => "earth",
            BallKind::Uncommon => "ice_planet",
            BallKind::Rare => "galaxy",
            BallKind::Hazard => "gas_planet",
        }
    }
}

/// Lifecycle phase of a ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallPhase {
    /// Drifting across the field
    Free,
    /// Scripted tether-and-pull toward the basket
    Captured {
        started_ms: u64,
        start: Vec2,
        target: Vec2,
        /// Visual rope length while the tether reaches out
        tether: f32,
    },
    /// Flying to the basket under its own velocity
    EnRoute {
        started_ms: u64,
        target: Vec2,
        vel: Vec2,
        guaranteed: bool,
    },
    /// In the basket; removed by the tick
    Delivered,
}

impl BallPhase {
    pub fn name(&self) -> &'static str {
        match self {
            BallPhase::Free => "free",
            BallPhase::Captured { .. } => "captured",
            BallPhase::EnRoute { .. } => "en_route",
            BallPhase::Delivered => "delivered",
        }
    }
}

/// A ball update went wrong; the ball is dropped, the tick goes on
#[derive(Debug, Clone, PartialEq)]
pub enum BallFault {
    /// Position stopped being a finite number
    NonFinitePosition { id: u32, pos: Vec2 },
}

impl fmt::Display for BallFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallFault::NonFinitePosition { id, pos } => {
                write!(f, "ball {} left the number line at {:?}", id, pos)
            }
        }
    }
}

impl std::error::Error for BallFault {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    /// Center
    pub pos: Vec2,
    /// Drift per tick while free
    pub vel: Vec2,
    pub phase: BallPhase,
    ready_to_score: bool,
    scored: bool,
    frame: usize,
    last_frame_ms: u64,
}

impl Ball {
    pub fn new(id: u32, kind: BallKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            phase: BallPhase::Free,
            ready_to_score: false,
            scored: false,
            frame: 0,
            last_frame_ms: 0,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.phase, BallPhase::Free)
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.phase, BallPhase::Captured { .. })
    }

    pub fn is_en_route(&self) -> bool {
        matches!(self.phase, BallPhase::EnRoute { .. })
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self.phase, BallPhase::Delivered)
    }

    pub fn is_ready_to_score(&self) -> bool {
        self.ready_to_score
    }

    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Claim the score for this ball. True exactly once.
    pub fn take_score(&mut self) -> bool {
        if self.ready_to_score && !self.scored {
            self.scored = true;
            true
        } else {
            false
        }
    }

    /// Begin the scripted capture sequence toward `target`
    pub fn capture(&mut self, target: Vec2, now_ms: u64) -> bool {
        if !self.is_free() {
            return false;
        }
        self.phase = BallPhase::Captured {
            started_ms: now_ms,
            start: self.pos,
            target,
            tether: 0.0,
        };
        log::debug!("Ball {} ({}) captured", self.id, self.kind.as_str());
        true
    }

    /// Send the ball flying toward `target` at `speed` units per tick
    pub fn send_to_basket(&mut self, target: Vec2, speed: f32, guaranteed: bool, now_ms: u64) -> bool {
        if !self.is_free() {
            return false;
        }
        let vel = (target - self.pos).normalize_or_zero() * speed;
        self.phase = BallPhase::EnRoute {
            started_ms: now_ms,
            target,
            vel,
            guaranteed,
        };
        log::debug!(
            "Ball {} ({}) en route, guaranteed: {}",
            self.id,
            self.kind.as_str(),
            guaranteed
        );
        true
    }

    /// Advance one tick
    pub fn advance(&mut self, now_ms: u64, capture_duration_ms: u64) -> Result<(), BallFault> {
        match self.phase {
            BallPhase::Free => {
                self.pos += self.vel;
            }
            BallPhase::Captured {
                started_ms,
                start,
                target,
                ref mut tether,
            } => {
                let elapsed = now_ms.saturating_sub(started_ms) as f32;
                let progress = (elapsed / capture_duration_ms.max(1) as f32).min(1.0);

                if progress < TETHER_PHASE_END {
                    *tether = start.distance(target) * (progress / TETHER_PHASE_END);
                } else if progress < PULL_PHASE_END {
                    *tether = 0.0;
                    let pull = (progress - TETHER_PHASE_END) / (PULL_PHASE_END - TETHER_PHASE_END);
                    self.pos = start.lerp(target, ease_out_cubic(pull));
                    if pull > READY_PULL_PROGRESS && !self.ready_to_score {
                        self.ready_to_score = true;
                        log::debug!("Ball {} ready to score", self.id);
                    }
                } else {
                    self.pos = target;
                    self.deliver();
                }
            }
            BallPhase::EnRoute {
                target,
                vel,
                guaranteed,
                ..
            } => {
                let distance = self.pos.distance(target);
                if guaranteed {
                    if distance > GUARANTEED_SNAP_DISTANCE {
                        let factor = (distance / GUARANTEED_SLOWDOWN_DISTANCE).min(1.0);
                        self.pos += (vel * factor).trunc();
                    } else {
                        self.pos = target;
                        self.deliver();
                    }
                } else {
                    self.pos += vel.trunc();
                    if distance < BALLISTIC_ARRIVAL_DISTANCE {
                        self.deliver();
                    }
                }
            }
            BallPhase::Delivered => {}
        }

        if !self.pos.is_finite() {
            return Err(BallFault::NonFinitePosition {
                id: self.id,
                pos: self.pos,
            });
        }
        Ok(())
    }

    /// En-route ball that has been flying too long
    pub fn should_force_delivery(&self, now_ms: u64) -> bool {
        match self.phase {
            BallPhase::EnRoute {
                started_ms,
                guaranteed,
                ..
            } => {
                let timeout = if guaranteed {
                    GUARANTEED_TIMEOUT_MS
                } else {
                    BALLISTIC_TIMEOUT_MS
                };
                now_ms.saturating_sub(started_ms) > timeout
            }
            _ => false,
        }
    }

    /// Snap an en-route ball into the basket
    pub fn force_delivery(&mut self) {
        if let BallPhase::EnRoute { target, .. } = self.phase {
            self.pos = target;
            self.deliver();
            log::debug!("Ball {} forced into the basket", self.id);
        }
    }

    /// Delivery always leaves the ball scoreable, even if the pull phase
    /// was skipped by a long tick.
    fn deliver(&mut self) {
        self.phase = BallPhase::Delivered;
        self.ready_to_score = true;
        log::debug!("Ball {} ({}) entered the basket", self.id, self.kind.as_str());
    }

    /// Free ball beyond `margin` outside the field
    pub fn is_off_field(&self, width: f32, height: f32, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > width + margin
            || self.pos.y < -margin
            || self.pos.y > height + margin
    }

    /// Spin the planet sprite
    pub fn update_animation(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_frame_ms) > SPIN_FRAME_MS {
            self.frame = (self.frame + 1) % SPIN_FRAMES;
            self.last_frame_ms = now_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Vec2 = Vec2::new(1120.0, 360.0);

    fn ball(kind: BallKind) -> Ball {
        Ball::new(1, kind, Vec2::new(400.0, 360.0), Vec2::new(-3.0, 0.0))
    }

    #[test]
    fn test_catalog() {
        assert_eq!(BallKind::Common.points(), 50);
        assert_eq!(BallKind::Uncommon.points(), 75);
        assert_eq!(BallKind::Rare.points(), 200);
        assert_eq!(BallKind::Hazard.points(), 0);
        assert_eq!(BallKind::Hazard.damage(), 1);
        assert_eq!(BallKind::Rare.damage(), 0);
        assert!(BallKind::Rare.size() > BallKind::Common.size());
    }

    #[test]
    fn test_free_drift() {
        let mut b = ball(BallKind::Common);
        b.advance(16, 800).unwrap();
        assert_eq!(b.pos, Vec2::new(397.0, 360.0));
    }

    #[test]
    fn test_capture_phases() {
        let mut b = ball(BallKind::Common);
        assert!(b.capture(TARGET, 0));
        assert!(!b.capture(TARGET, 0), "already captured");

        // Tether phase: rope grows, ball stays put
        b.advance(80, 800).unwrap();
        assert_eq!(b.pos, Vec2::new(400.0, 360.0));
        match b.phase {
            BallPhase::Captured { tether, .. } => assert!((tether - 360.0).abs() < 1e-2),
            other => panic!("unexpected phase {:?}", other),
        }
        assert!(!b.is_ready_to_score());

        // Early pull: moving but not yet scoreable (pull = 0.1)
        b.advance(208, 800).unwrap();
        assert!(b.pos.x > 400.0 && b.pos.x < TARGET.x);
        assert!(!b.is_ready_to_score());

        // Pull beyond 20%: score signal before arrival
        b.advance(300, 800).unwrap();
        assert!(b.is_ready_to_score());
        assert!(b.is_captured());
        assert!(b.pos.x < TARGET.x);

        // Final phase snaps to the basket
        b.advance(640, 800).unwrap();
        assert!(b.is_delivered());
        assert_eq!(b.pos, TARGET);
    }

    #[test]
    fn test_skipped_pull_still_scores() {
        let mut b = ball(BallKind::Rare);
        b.capture(TARGET, 0);
        b.advance(5000, 800).unwrap();
        assert!(b.is_delivered());
        assert!(b.is_ready_to_score());
    }

    #[test]
    fn test_take_score_once() {
        let mut b = ball(BallKind::Uncommon);
        assert!(!b.take_score(), "not ready yet");
        b.capture(TARGET, 0);
        b.advance(900, 800).unwrap();
        assert!(b.take_score());
        assert!(!b.take_score());
        assert!(b.is_scored());
    }

    #[test]
    fn test_guaranteed_delivery_snaps() {
        let mut b = Ball::new(2, BallKind::Common, TARGET - Vec2::new(200.0, 0.0), Vec2::ZERO);
        assert!(b.send_to_basket(TARGET, 12.0, true, 0));
        let mut now = 0;
        while !b.is_delivered() && now < 1000 {
            now += 16;
            b.advance(now, 800).unwrap();
        }
        assert!(b.is_delivered());
        assert_eq!(b.pos, TARGET);
        assert!(b.is_ready_to_score());
    }

    #[test]
    fn test_guaranteed_stall_times_out() {
        // One crawling step, then the timeout decides
        let mut b = Ball::new(3, BallKind::Common, TARGET - Vec2::new(6.0, 0.0), Vec2::ZERO);
        b.send_to_basket(TARGET, 12.0, true, 0);
        b.advance(16, 800).unwrap();
        assert!(b.is_en_route());
        assert!(!b.should_force_delivery(500));
        assert!(b.should_force_delivery(501));
        b.force_delivery();
        assert!(b.is_delivered());
        assert_eq!(b.pos, TARGET);
    }

    #[test]
    fn test_ballistic_arrival_window() {
        let mut b = Ball::new(4, BallKind::Common, TARGET - Vec2::new(100.0, 0.0), Vec2::ZERO);
        b.send_to_basket(TARGET, 12.0, false, 0);
        let mut now = 0;
        while !b.is_delivered() {
            now += 16;
            b.advance(now, 800).unwrap();
            assert!(now < 2000);
        }
        // Accepted inside the loose window, no snap
        assert!(b.pos.distance(TARGET) < BALLISTIC_ARRIVAL_DISTANCE);
        assert!(!b.should_force_delivery(now + 5000));
    }

    #[test]
    fn test_ballistic_stall_times_out() {
        // Already past the target and flying away, it never arrives
        let mut b = Ball::new(6, BallKind::Rare, TARGET + Vec2::new(100.0, 0.0), Vec2::ZERO);
        b.phase = BallPhase::EnRoute {
            started_ms: 0,
            target: TARGET,
            vel: Vec2::new(12.0, 0.0),
            guaranteed: false,
        };

        let mut now = 0;
        while now < 2000 {
            now += 16;
            b.advance(now, 800).unwrap();
        }
        assert!(b.is_en_route());
        assert!(!b.is_ready_to_score());
        assert!(!b.should_force_delivery(2000));
        assert!(b.should_force_delivery(2001));

        b.force_delivery();
        assert!(b.is_delivered());
        assert_eq!(b.pos, TARGET);
        assert!(b.is_ready_to_score());
        assert!(b.take_score());
    }

    #[test]
    fn test_off_field() {
        let mut b = ball(BallKind::Common);
        assert!(!b.is_off_field(1280.0, 720.0, 100.0));
        b.pos.x = -101.0;
        assert!(b.is_off_field(1280.0, 720.0, 100.0));
        b.pos = Vec2::new(640.0, 821.0);
        assert!(b.is_off_field(1280.0, 720.0, 100.0));
    }

    #[test]
    fn test_non_finite_is_fault() {
        let mut b = Ball::new(5, BallKind::Common, Vec2::ZERO, Vec2::new(f32::NAN, 0.0));
        let err = b.advance(16, 800).unwrap_err();
        assert!(matches!(err, BallFault::NonFinitePosition { id: 5, .. }));
    }
}
