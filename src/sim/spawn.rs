//! Obstacle spawner
//!
//! Spawns happen on frames that are exact multiples of the spawn interval,
//! which shrinks as the score climbs until it hits a floor.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::lane_x;

/// Frames between spawns at the given score
pub fn spawn_interval(score: u32) -> u32 {
    SPAWN_INTERVAL_BASE
        .saturating_sub(score / SPAWN_SCORE_DIVISOR)
        .max(SPAWN_INTERVAL_MIN)
}

/// Spawn one obstacle if this frame lands on the spawn interval.
/// `roster` is the set of kinds allowed to appear.
pub fn maybe_spawn(state: &mut GameState, roster: &[ObstacleKind]) -> Option<Obstacle> {
    let interval = spawn_interval(state.score) as u64;
    if state.frame_counter % interval != 0 || roster.is_empty() {
        return None;
    }

    let lane = state.rng.random_range(0..LANE_COUNT);
    let kind = roster[state.rng.random_range(0..roster.len())];
    let obstacle = Obstacle::new(lane_x(lane), kind);
    log::trace!(
        "Spawned {:?} in lane {} at frame {} (interval {})",
        kind,
        lane,
        state.frame_counter,
        interval
    );
    state.obstacles.push(obstacle);
    Some(obstacle)
}
