//! The black-hole basket balls are delivered into

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SPIN_FRAMES, SPIN_FRAME_MS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    frame: usize,
    last_frame_ms: u64,
}

impl Basket {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            frame: 0,
            last_frame_ms: 0,
        }
    }

    /// Delivery target
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Point inside the basket rectangle (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    pub fn update_animation(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_frame_ms) > SPIN_FRAME_MS {
            self.frame = (self.frame + 1) % SPIN_FRAMES;
            self.last_frame_ms = now_ms;
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_contains() {
        let basket = Basket::new(Vec2::new(980.0, 220.0), Vec2::splat(280.0));
        assert_eq!(basket.center(), Vec2::new(1120.0, 360.0));
        assert!(basket.contains(basket.center()));
        assert!(basket.contains(Vec2::new(980.0, 220.0)));
        assert!(!basket.contains(Vec2::new(979.0, 360.0)));
    }

    #[test]
    fn test_animation_cycles() {
        let mut basket = Basket::new(Vec2::ZERO, Vec2::splat(10.0));
        let mut now = 0;
        for _ in 0..SPIN_FRAMES {
            now += SPIN_FRAME_MS + 1;
            basket.update_animation(now);
        }
        assert_eq!(basket.frame(), 0);

        basket.update_animation(now + 10);
        assert_eq!(basket.frame(), 0);
    }
}
