//! Per-frame state machine
//!
//! One call advances the game by exactly one frame. Playing frames run
//! spawn -> move -> collide -> cull -> steer -> score, in that order.

use super::collision::first_collision;
use super::motion::{advance_obstacles, cull_obstacles, scaled_speed, scroll_road};
use super::spawn::maybe_spawn;
use super::state::{Difficulty, GamePhase, GameState};
use crate::config::GameConfig;
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Steer left (held)
    pub left: bool,
    /// Steer right (held)
    pub right: bool,
    /// Pause toggle (pressed this frame)
    pub pause: bool,
    /// Confirm/restart (pressed this frame)
    pub confirm: bool,
    /// Difficulty pick (pressed this frame)
    pub select: Option<Difficulty>,
}

/// Side effects produced by a frame, for audio and logging collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    DifficultySelected(Difficulty),
    Paused,
    Resumed,
    Crashed { score: u32, new_high_score: bool },
    Restarted,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Pause is a symmetric toggle, applied before dispatch
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                log::info!("Paused at score {}", state.score);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GamePhase::Start | GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Start => {
            if let Some(difficulty) = input.select {
                state.apply_difficulty(config, difficulty);
                state.reset_round();
                state.phase = GamePhase::Playing;
                events.push(GameEvent::DifficultySelected(difficulty));
                log::info!("Starting {} round", difficulty.as_str());
            }
        }
        GamePhase::Playing => play_frame(state, input, config, &mut events),
        GamePhase::Paused => {}
        GamePhase::GameOver => {
            if input.confirm {
                state.reset_round();
                state.phase = GamePhase::Start;
                events.push(GameEvent::Restarted);
                log::info!("Back to start screen");
            }
        }
    }

    events
}

fn play_frame(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    if state.lives == 0 {
        return;
    }

    state.frame_counter += 1;
    scroll_road(state, config.road_speed);

    let speed = scaled_speed(state.obstacle_speed, state.score);
    maybe_spawn(state, config.roster());
    advance_obstacles(state, speed);

    // Collide on post-move, pre-cull positions
    let hit = first_collision(state).is_some();
    cull_obstacles(state);
    if hit {
        crash(state, events);
        return;
    }

    state.player.steer(input.left, input.right);

    if state.frame_counter % SCORE_INTERVAL_FRAMES == 0 {
        state.score = state.score.saturating_add(1);
    }
}

fn crash(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    state.phase = GamePhase::GameOver;
    let new_high_score = state.high_scores.submit(state.difficulty, state.score);
    events.push(GameEvent::Crashed {
        score: state.score,
        new_high_score,
    });
    log::info!(
        "Crashed on {} after {} frames with score {} (best {})",
        state.difficulty.as_str(),
        state.frame_counter,
        state.score,
        state.high_score()
    );
}
