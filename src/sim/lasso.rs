//! The retractable lasso
//!
//! A single lasso is reused for every throw. While idle its tip sits on the
//! origin and its length is zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::point_along;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LassoState {
    #[default]
    Idle,
    Extending,
    Retracting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lasso {
    origin: Vec2,
    tip: Vec2,
    /// Throw direction (radians), fixed for the whole throw
    angle: f32,
    length: f32,
    max_length: f32,
    step: f32,
    state: LassoState,
}

impl Lasso {
    pub fn new(origin: Vec2, max_length: f32, step: f32) -> Self {
        Self {
            origin,
            tip: origin,
            angle: 0.0,
            length: 0.0,
            max_length,
            step,
            state: LassoState::Idle,
        }
    }

    /// Throw toward a target. Returns false (and does nothing) unless idle.
    pub fn throw(&mut self, target: Vec2) -> bool {
        if self.state != LassoState::Idle {
            log::debug!("Lasso already out ({:?}), throw ignored", self.state);
            return false;
        }
        let delta = target - self.origin;
        self.angle = delta.y.atan2(delta.x);
        self.length = 0.0;
        self.tip = self.origin;
        self.state = LassoState::Extending;
        log::debug!(
            "Lasso thrown toward ({:.0}, {:.0}) at {:.1}°",
            target.x,
            target.y,
            self.angle.to_degrees()
        );
        true
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        match self.state {
            LassoState::Idle => {}
            LassoState::Extending => {
                self.length = (self.length + self.step).min(self.max_length);
                self.tip = point_along(self.origin, self.angle, self.length);
                // Full extension stays visible for this tick
                if self.length >= self.max_length {
                    self.state = LassoState::Retracting;
                }
            }
            LassoState::Retracting => {
                self.length -= self.step;
                if self.length <= 0.0 {
                    self.reset();
                } else {
                    self.tip = point_along(self.origin, self.angle, self.length);
                }
            }
        }
    }

    /// Drop straight back to idle, skipping the retraction
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Start reeling in early
    pub fn begin_retract(&mut self) {
        if self.state == LassoState::Extending {
            self.state = LassoState::Retracting;
        }
    }

    /// Follow the thrower; the tip only moves on `advance` while active
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
        if self.state == LassoState::Idle {
            self.tip = origin;
        }
    }

    fn reset(&mut self) {
        self.state = LassoState::Idle;
        self.length = 0.0;
        self.tip = self.origin;
    }

    pub fn is_active(&self) -> bool {
        self.state != LassoState::Idle
    }

    pub fn state(&self) -> LassoState {
        self.state
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn tip(&self) -> Vec2 {
        self.tip
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lasso() -> Lasso {
        Lasso::new(Vec2::new(100.0, 100.0), 450.0, 25.0)
    }

    #[test]
    fn test_throw_extends_along_angle() {
        let mut l = lasso();
        assert!(l.throw(Vec2::new(500.0, 100.0)));
        assert_eq!(l.state(), LassoState::Extending);
        assert_eq!(l.length(), 0.0);

        l.advance();
        assert_eq!(l.length(), 25.0);
        assert!((l.tip().x - 125.0).abs() < 1e-3);
        assert!((l.tip().y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_extension_frame_is_observable() {
        let mut l = lasso();
        l.throw(Vec2::new(100.0, 900.0));
        for _ in 0..18 {
            l.advance();
        }
        assert_eq!(l.length(), 450.0);
        assert_eq!(l.state(), LassoState::Retracting);

        l.advance();
        assert_eq!(l.length(), 425.0);
    }

    #[test]
    fn test_retracts_to_idle() {
        let mut l = lasso();
        l.throw(Vec2::new(0.0, 0.0));
        for _ in 0..36 {
            l.advance();
        }
        assert_eq!(l.state(), LassoState::Idle);
        assert_eq!(l.length(), 0.0);
        assert_eq!(l.tip(), l.origin());
    }

    #[test]
    fn test_second_throw_ignored_while_active() {
        let mut l = lasso();
        l.throw(Vec2::new(500.0, 100.0));
        l.advance();
        let angle = l.angle();
        let length = l.length();

        assert!(!l.throw(Vec2::new(100.0, 500.0)));
        assert_eq!(l.state(), LassoState::Extending);
        assert_eq!(l.angle(), angle);
        assert_eq!(l.length(), length);
    }

    #[test]
    fn test_cancel_and_begin_retract() {
        let mut l = lasso();
        l.throw(Vec2::new(500.0, 100.0));
        l.advance();
        l.begin_retract();
        assert_eq!(l.state(), LassoState::Retracting);

        l.cancel();
        assert!(!l.is_active());
        assert_eq!(l.length(), 0.0);
        assert_eq!(l.tip(), l.origin());

        // Retract does nothing while idle
        l.begin_retract();
        assert_eq!(l.state(), LassoState::Idle);
    }

    #[test]
    fn test_idle_tip_follows_origin() {
        let mut l = lasso();
        l.set_origin(Vec2::new(40.0, 60.0));
        assert_eq!(l.tip(), Vec2::new(40.0, 60.0));
    }
}
