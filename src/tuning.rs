//! Data-driven game balance
//!
//! Everything the simulation reads that a designer might want to tweak.
//! Missing fields in a JSON file fall back to the built-in constants.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BallKind;

/// How a caught ball travels to the basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Scripted tether-and-pull sequence with an early score signal
    #[default]
    Cutscene,
    /// Decelerating flight with a tight snap, short stall timeout
    Guaranteed,
    /// Constant-velocity flight with a loose arrival window
    Ballistic,
}

/// Relative spawn weights per ball kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub common: f32,
    pub uncommon: f32,
    pub rare: f32,
    pub hazard: f32,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            common: 0.50,
            uncommon: 0.20,
            rare: 0.05,
            hazard: 0.25,
        }
    }
}

impl KindWeights {
    /// Map a uniform roll in [0, 1) to a kind.
    ///
    /// Buckets are laid out rare, hazard, uncommon, common so the default
    /// weights reproduce the classic thresholds 0.05 / 0.30 / 0.50.
    pub fn pick(&self, roll: f32) -> BallKind {
        let buckets = [
            (BallKind::Rare, self.rare),
            (BallKind::Hazard, self.hazard),
            (BallKind::Uncommon, self.uncommon),
            (BallKind::Common, self.common),
        ];
        let total: f32 = buckets.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return BallKind::Common;
        }

        let target = roll.clamp(0.0, 1.0) * total;
        let mut acc = 0.0;
        for (kind, weight) in buckets {
            acc += weight.max(0.0);
            if target < acc {
                return kind;
            }
        }
        BallKind::Common
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Character ===
    pub character_size: f32,
    pub character_speed: f32,
    pub max_hp: u32,

    // === Lasso ===
    pub lasso_max_length: f32,
    pub lasso_step: f32,
    pub catch_radius: f32,

    // === Spawning ===
    pub max_balls: usize,
    pub spawn_interval_ms: u64,
    pub spawn_speed_min: u32,
    pub spawn_speed_max: u32,
    pub weights: KindWeights,

    // === Delivery ===
    pub delivery: DeliveryMode,
    pub capture_duration_ms: u64,
    pub en_route_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            character_size: CHARACTER_SIZE,
            character_speed: CHARACTER_SPEED,
            max_hp: CHARACTER_MAX_HP,

            lasso_max_length: LASSO_MAX_LENGTH,
            lasso_step: LASSO_STEP,
            catch_radius: CATCH_RADIUS,

            max_balls: MAX_BALLS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_speed_min: SPAWN_SPEED_MIN,
            spawn_speed_max: SPAWN_SPEED_MAX,
            weights: KindWeights::default(),

            delivery: DeliveryMode::Cutscene,
            capture_duration_ms: CAPTURE_DURATION_MS,
            en_route_speed: EN_ROUTE_SPEED,
        }
    }
}

impl Tuning {
    /// Squared catch radius used by the hit test
    pub fn catch_radius_sq(&self) -> f32 {
        self.catch_radius * self.catch_radius
    }

    /// Repair values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.character_size.is_finite() && self.character_size > 0.0) {
            log::warn!("Bad character size {}, using default", self.character_size);
            self.character_size = defaults.character_size;
        }
        if !(self.character_speed.is_finite() && self.character_speed > 0.0) {
            log::warn!("Bad character speed {}, using default", self.character_speed);
            self.character_speed = defaults.character_speed;
        }
        if !(self.field_width > self.character_size && self.field_height > self.character_size) {
            log::warn!("Field smaller than character, using default field size");
            self.field_width = defaults.field_width;
            self.field_height = defaults.field_height;
        }
        if self.lasso_step <= 0.0 || self.lasso_max_length <= 0.0 {
            log::warn!("Non-positive lasso reach, using defaults");
            self.lasso_step = defaults.lasso_step;
            self.lasso_max_length = defaults.lasso_max_length;
        }
        if self.spawn_speed_min > self.spawn_speed_max {
            std::mem::swap(&mut self.spawn_speed_min, &mut self.spawn_speed_max);
        }
        // A still ball parks inside the despawn margin forever
        if self.spawn_speed_min == 0 {
            log::warn!("Zero spawn speed, using default minimum");
            self.spawn_speed_min = defaults.spawn_speed_min;
            self.spawn_speed_max = self.spawn_speed_max.max(self.spawn_speed_min);
        }
        if self.capture_duration_ms == 0 {
            self.capture_duration_ms = defaults.capture_duration_ms;
        }
        self.max_hp = self.max_hp.max(1);
        self
    }
}
