//! Obstacle motion, off-field culling and road scroll

use super::state::GameState;
use crate::consts::*;

/// Obstacle speed after the score bonus (pixels/frame)
pub fn scaled_speed(base_speed: f32, score: u32) -> f32 {
    base_speed + score as f32 / SPEED_SCORE_DIVISOR
}

/// Move every obstacle down by one frame at `speed`
pub fn advance_obstacles(state: &mut GameState, speed: f32) {
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += speed;
    }
}

/// Drop obstacles that have left the bottom of the play field.
/// Returns how many were removed; survivors may be reordered.
pub fn cull_obstacles(state: &mut GameState) -> usize {
    let mut removed = 0;
    let mut i = 0;
    while i < state.obstacles.len() {
        if state.obstacles[i].pos.y > SCREEN_HEIGHT {
            state.obstacles.swap_remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    if removed > 0 {
        log::trace!("Culled {} obstacles, {} remain", removed, state.obstacles.len());
    }
    removed
}

/// Scroll the road, wrapping back to zero past one tile
pub fn scroll_road(state: &mut GameState, road_speed: f32) {
    state.road_offset += road_speed;
    if state.road_offset > ROAD_TILE_HEIGHT {
        state.road_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Hitboxes, Obstacle, ObstacleKind};

    fn state() -> GameState {
        GameState::new(&GameConfig::highway(), Hitboxes::default(), 3)
    }

    #[test]
    fn test_scaled_speed() {
        assert_eq!(scaled_speed(3.0, 0), 3.0);
        assert_eq!(scaled_speed(3.0, 50), 4.0);
        assert_eq!(scaled_speed(5.5, 25), 6.0);
    }

    #[test]
    fn test_ten_frames_at_speed_four() {
        let mut state = state();
        state.obstacles.push(Obstacle::new(120.0, ObstacleKind::Bus));
        for _ in 0..10 {
            advance_obstacles(&mut state, 4.0);
        }
        assert_eq!(state.obstacles[0].pos.y, 40.0);
    }

    #[test]
    fn test_cull_removes_only_past_field_edge() {
        let mut state = state();
        for (x, y) in [(120.0, 599.0), (170.0, 600.0), (220.0, 600.5), (270.0, 10.0)] {
            let mut o = Obstacle::new(x, ObstacleKind::Taxi);
            o.pos.y = y;
            state.obstacles.push(o);
        }

        assert_eq!(cull_obstacles(&mut state), 1);
        assert_eq!(state.obstacles.len(), 3);
        assert!(state.obstacles.iter().all(|o| o.pos.y <= SCREEN_HEIGHT));
    }

    #[test]
    fn test_road_wraps() {
        let mut state = state();
        for _ in 0..30 {
            scroll_road(&mut state, 4.0);
        }
        assert_eq!(state.road_offset, 120.0);
        scroll_road(&mut state, 4.0);
        assert_eq!(state.road_offset, 0.0);
    }
}
