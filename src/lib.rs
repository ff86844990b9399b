//! Highway Survival - a single-lane arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, game state)
//! - `config`: Tier tuning and variant switches, loadable from JSON
//! - `highscores`: In-memory high score records (single or per tier)
//! - `platform`: Input, render surface, and sprite metadata contracts
//! - `audio`: Sound effect sink (Web Audio on wasm)
//! - `ui`: Per-phase scene drawing
//! - `renderer`: WebGPU render pipeline

pub mod audio;
pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod ui;

pub use config::{GameConfig, Preset};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TARGET_FPS as f32;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Nominal car footprint used to place the player at round start
    pub const CAR_SIZE: f32 = 40.0;
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0 - CAR_SIZE / 2.0;
    pub const PLAYER_Y: f32 = SCREEN_HEIGHT - CAR_SIZE * 2.0;

    /// Horizontal limits of the drivable road
    pub const LEFT_BOUNDARY: f32 = 110.0;
    pub const RIGHT_BOUNDARY: f32 = 300.0;

    /// Obstacle lanes: x = FIRST_LANE_X + i * LANE_SPACING
    pub const LANE_COUNT: u32 = 4;
    pub const FIRST_LANE_X: f32 = 120.0;
    pub const LANE_SPACING: f32 = 50.0;

    /// Spawn interval: max(MIN, BASE - score / SCORE_DIVISOR) frames
    pub const SPAWN_INTERVAL_BASE: u32 = 60;
    pub const SPAWN_INTERVAL_MIN: u32 = 20;
    pub const SPAWN_SCORE_DIVISOR: u32 = 15;

    /// Obstacle speed bonus: score / SPEED_SCORE_DIVISOR pixels per frame
    pub const SPEED_SCORE_DIVISOR: f32 = 50.0;

    /// One survival point every N playing frames
    pub const SCORE_INTERVAL_FRAMES: u64 = 5;

    /// Lives at round start (single hit point)
    pub const STARTING_LIVES: u8 = 1;

    /// Height of one road tile; the scroll offset wraps past it
    pub const ROAD_TILE_HEIGHT: f32 = 120.0;
}

/// X offset of the given lane index
#[inline]
pub fn lane_x(lane: u32) -> f32 {
    consts::FIRST_LANE_X + lane as f32 * consts::LANE_SPACING
}
