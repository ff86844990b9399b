//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`, owned by the frame loop and
//! passed by reference into `tick` and the scene drawing.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;
use crate::highscores::HighScores;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a difficulty pick
    Start,
    /// Active gameplay
    Playing,
    /// Gameplay frozen until the pause key is pressed again
    Paused,
    /// Round ended, waiting for confirm
    GameOver,
}

/// Number of difficulty tiers
pub const TIER_COUNT: usize = 3;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; TIER_COUNT] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// HUD label
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Oncoming vehicle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pickup,
    Bus,
    Police,
    Taxi,
}

impl ObstacleKind {
    /// Full roster, in spawn-table order
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Pickup,
        ObstacleKind::Bus,
        ObstacleKind::Police,
        ObstacleKind::Taxi,
    ];

    pub fn index(&self) -> usize {
        match self {
            ObstacleKind::Pickup => 0,
            ObstacleKind::Bus => 1,
            ObstacleKind::Police => 2,
            ObstacleKind::Taxi => 3,
        }
    }

    /// Sprite size used when the render surface does not report one
    pub fn default_size(&self) -> Vec2 {
        match self {
            ObstacleKind::Pickup => Vec2::new(40.0, 75.0),
            ObstacleKind::Bus => Vec2::new(44.0, 110.0),
            ObstacleKind::Police => Vec2::new(40.0, 72.0),
            ObstacleKind::Taxi => Vec2::new(38.0, 68.0),
        }
    }
}

/// Default player sprite size
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 70.0);

/// Collision extents of every vehicle, taken from sprite metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitboxes {
    pub player: Vec2,
    pub obstacles: [Vec2; 4],
}

impl Default for Hitboxes {
    fn default() -> Self {
        Self {
            player: PLAYER_SIZE,
            obstacles: ObstacleKind::ALL.map(|k| k.default_size()),
        }
    }
}

impl Hitboxes {
    pub fn obstacle(&self, kind: ObstacleKind) -> Vec2 {
        self.obstacles[kind.index()]
    }
}

/// An oncoming vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Top-left corner in screen space (y grows downward)
    pub pos: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(x: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            kind,
        }
    }
}

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner; only x changes during a round
    pub pos: Vec2,
    pub size: Vec2,
    /// Lateral speed for the selected tier (pixels/frame)
    pub speed: f32,
}

impl Player {
    pub fn new(size: Vec2, speed: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_Y),
            size,
            speed,
        }
    }

    /// Largest x the car may occupy
    pub fn max_x(&self) -> f32 {
        RIGHT_BOUNDARY - self.size.x
    }

    /// Shift left/right by one frame of movement, clamped to the road
    pub fn steer(&mut self, left: bool, right: bool) {
        if left && self.pos.x > LEFT_BOUNDARY {
            self.pos.x = (self.pos.x - self.speed).max(LEFT_BOUNDARY);
        }
        if right && self.pos.x < self.max_x() {
            self.pos.x = (self.pos.x + self.speed).min(self.max_x());
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Active tier
    pub difficulty: Difficulty,
    /// Survival score
    pub score: u32,
    /// Remaining lives (0 or 1)
    pub lives: u8,
    /// Playing frames elapsed this round
    pub frame_counter: u64,
    /// Road scroll offset, wraps at `ROAD_TILE_HEIGHT`
    pub road_offset: f32,
    /// Obstacle base speed for the active tier (pixels/frame)
    pub obstacle_speed: f32,
    pub player: Player,
    /// Active obstacles in spawn order (culling may reorder)
    pub obstacles: Vec<Obstacle>,
    pub high_scores: HighScores,
    pub hitboxes: Hitboxes,
}

impl GameState {
    /// Create a new game in the Start phase
    pub fn new(config: &GameConfig, hitboxes: Hitboxes, seed: u64) -> Self {
        let tuning = config.tuning(Difficulty::Easy);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            difficulty: Difficulty::Easy,
            score: 0,
            lives: STARTING_LIVES,
            frame_counter: 0,
            road_offset: 0.0,
            obstacle_speed: tuning.obstacle_speed,
            player: Player::new(hitboxes.player, tuning.player_speed),
            obstacles: Vec::new(),
            high_scores: HighScores::new(config.high_score_mode),
            hitboxes,
        }
    }

    /// Put the round back to its initial values. Tier, speeds and high
    /// scores are kept.
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.frame_counter = 0;
        self.obstacles.clear();
        self.player.pos = Vec2::new(PLAYER_START_X, PLAYER_Y);
        self.road_offset = 0.0;
    }

    /// Select a tier and apply its speeds
    pub fn apply_difficulty(&mut self, config: &GameConfig, difficulty: Difficulty) {
        let tuning = config.tuning(difficulty);
        self.difficulty = difficulty;
        self.player.speed = tuning.player_speed;
        self.obstacle_speed = tuning.obstacle_speed;
    }

    /// High score shown for the active tier
    pub fn high_score(&self) -> u32 {
        self.high_scores.best(self.difficulty)
    }
}
