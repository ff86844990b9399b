//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Aabb, first_collision, overlaps};
pub use motion::{advance_obstacles, cull_obstacles, scaled_speed, scroll_road};
pub use spawn::{maybe_spawn, spawn_interval};
pub use state::{
    Difficulty, GamePhase, GameState, Hitboxes, Obstacle, ObstacleKind, Player, PLAYER_SIZE,
    TIER_COUNT,
};
pub use tick::{GameEvent, TickInput, tick};
