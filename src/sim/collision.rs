//! Collision detection between the player and oncoming traffic
//!
//! Plain axis-aligned boxes. Top/bottom edges count as touching, left/right
//! edges must actually overlap, so cars in neighbouring lanes that merely
//! share an edge do not collide.

use glam::Vec2;

use super::state::{GameState, Obstacle};

/// Axis-aligned box, top-left corner plus size, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Whether an obstacle box overlaps the player box
pub fn overlaps(obstacle: &Aabb, player: &Aabb) -> bool {
    obstacle.max().y >= player.min.y
        && obstacle.min.y <= player.max().y
        && obstacle.min.x < player.max().x
        && obstacle.max().x > player.min.x
}

/// Collision box of an obstacle, sized by its kind
pub fn obstacle_box(state: &GameState, obstacle: &Obstacle) -> Aabb {
    Aabb::new(obstacle.pos, state.hitboxes.obstacle(obstacle.kind))
}

/// Collision box of the player
pub fn player_box(state: &GameState) -> Aabb {
    Aabb::new(state.player.pos, state.player.size)
}

/// Index of the first obstacle (in store order) touching the player
pub fn first_collision(state: &GameState) -> Option<usize> {
    let player = player_box(state);
    state
        .obstacles
        .iter()
        .position(|o| overlaps(&obstacle_box(state, o), &player))
}
