//! Scripted driver
//!
//! Produces inputs from the game state alone: picks a tier at the start
//! screen, steers toward the column of road with the most clearance, and
//! optionally restarts after a crash. Drives the headless native run.

use super::state::{Difficulty, GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::*;

/// Horizontal spacing between candidate target positions
const CANDIDATE_STEP: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Tier picked at the start screen
    pub difficulty: Difficulty,
    /// Confirm at the game over screen
    pub restart: bool,
}

impl Autopilot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            restart: false,
        }
    }

    /// Input for the next frame
    pub fn next_input(&self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Start => TickInput {
                select: Some(self.difficulty),
                ..Default::default()
            },
            GamePhase::Playing => {
                let target = safest_x(state);
                let x = state.player.pos.x;
                let dead_zone = state.player.speed * 0.5;
                TickInput {
                    left: target < x - dead_zone,
                    right: target > x + dead_zone,
                    ..Default::default()
                }
            }
            GamePhase::Paused => TickInput::default(),
            GamePhase::GameOver => TickInput {
                confirm: self.restart,
                ..Default::default()
            },
        }
    }
}

/// Vertical room between the player's nose and the nearest obstacle that
/// shares the column `[x, x + width)`; infinite when the column is clear
fn clearance(state: &GameState, x: f32) -> f32 {
    let width = state.player.size.x;
    let player_top = state.player.pos.y;
    let player_bottom = player_top + state.player.size.y;

    state
        .obstacles
        .iter()
        .filter(|o| {
            let size = state.hitboxes.obstacle(o.kind);
            o.pos.x < x + width && o.pos.x + size.x > x && o.pos.y <= player_bottom
        })
        .map(|o| player_top - (o.pos.y + state.hitboxes.obstacle(o.kind).y))
        .fold(f32::INFINITY, f32::min)
}

/// Target x with the most clearance, preferring positions near the player
fn safest_x(state: &GameState) -> f32 {
    let here = state.player.pos.x;
    let max_x = state.player.max_x();

    let mut best = here;
    let mut best_clearance = clearance(state, here);
    let mut x = LEFT_BOUNDARY;
    while x <= max_x {
        let c = clearance(state, x);
        let closer = (x - here).abs() < (best - here).abs();
        if c > best_clearance || (c == best_clearance && closer) {
            best = x;
            best_clearance = c;
        }
        x += CANDIDATE_STEP;
    }
    best
}
