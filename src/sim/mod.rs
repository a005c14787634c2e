//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or storage dependencies

pub mod ball;
pub mod basket;
pub mod character;
pub mod collision;
pub mod lasso;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use ball::{Ball, BallFault, BallKind, BallPhase};
pub use basket::Basket;
pub use character::{AnimState, Character};
pub use collision::{CatchResult, first_ball_hit, resolve_lasso};
pub use lasso::{Lasso, LassoState};
pub use spawn::{SpawnLane, spawn_ball};
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{Movement, TickInput, tick};
pub use view::{BallView, BasketView, CharacterView, LassoView, Snapshot};
