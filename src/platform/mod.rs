//! Platform abstraction layer
//!
//! Contracts the game loop consumes from its host:
//! - Keyboard polling (held / pressed this frame)
//! - A draw surface with sprite metadata and text measurement
//!
//! Audio lives in `crate::audio`.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Difficulty, Hitboxes, ObstacleKind, PLAYER_SIZE, TickInput};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Pause,
    Confirm,
    SelectEasy,
    SelectMedium,
    SelectHard,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Left,
        Key::Right,
        Key::Pause,
        Key::Confirm,
        Key::SelectEasy,
        Key::SelectMedium,
        Key::SelectHard,
    ];

    const fn bit(self) -> u8 {
        match self {
            Key::Left => 1 << 0,
            Key::Right => 1 << 1,
            Key::Pause => 1 << 2,
            Key::Confirm => 1 << 3,
            Key::SelectEasy => 1 << 4,
            Key::SelectMedium => 1 << 5,
            Key::SelectHard => 1 << 6,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "p" | "P" => Some(Key::Pause),
            "Enter" => Some(Key::Confirm),
            "1" => Some(Key::SelectEasy),
            "2" => Some(Key::SelectMedium),
            "3" => Some(Key::SelectHard),
            _ => None,
        }
    }
}

/// Keyboard queries for one frame
pub trait InputSource {
    /// Key is currently held
    fn is_down(&self, key: Key) -> bool;
    /// Key went down since the last frame
    fn was_pressed(&self, key: Key) -> bool;
}

/// Held/pressed key bitsets fed by platform key events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    held: u8,
    pressed: u8,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // Auto-repeat does not count as a fresh press
        if self.held & key.bit() == 0 {
            self.pressed |= key.bit();
        }
        self.held |= key.bit();
    }

    pub fn key_up(&mut self, key: Key) {
        self.held &= !key.bit();
    }

    /// One-shot press with no matching release (auto-pause)
    pub fn tap(&mut self, key: Key) {
        self.pressed |= key.bit();
    }

    /// Forget presses once a frame has consumed them
    pub fn end_frame(&mut self) {
        self.pressed = 0;
    }

    /// Release everything (focus loss)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for KeyState {
    fn is_down(&self, key: Key) -> bool {
        self.held & key.bit() != 0
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }
}

/// Build the frame's `TickInput` from polled keys. When several tiers are
/// pressed in the same frame the hardest one wins.
pub fn poll_input(source: &impl InputSource) -> TickInput {
    let select = [
        (Key::SelectHard, Difficulty::Hard),
        (Key::SelectMedium, Difficulty::Medium),
        (Key::SelectEasy, Difficulty::Easy),
    ]
    .into_iter()
    .find(|(key, _)| source.was_pressed(*key))
    .map(|(_, difficulty)| difficulty);

    TickInput {
        left: source.is_down(Key::Left),
        right: source.is_down(Key::Right),
        pause: source.was_pressed(Key::Pause),
        confirm: source.was_pressed(Key::Confirm),
        select,
    }
}

/// Drawable images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Obstacle(ObstacleKind),
    Road,
    LeftVerge,
    RightVerge,
    TitleBackdrop,
    GameOverBackdrop,
}

/// Built-in sprite dimensions
pub fn default_sprite_size(sprite: Sprite) -> Vec2 {
    match sprite {
        Sprite::Player => PLAYER_SIZE,
        Sprite::Obstacle(kind) => kind.default_size(),
        Sprite::Road => Vec2::new(RIGHT_BOUNDARY - 100.0, ROAD_TILE_HEIGHT),
        Sprite::LeftVerge | Sprite::RightVerge => Vec2::new(100.0, ROAD_TILE_HEIGHT),
        Sprite::TitleBackdrop | Sprite::GameOverBackdrop => {
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
        }
    }
}

/// Draw target for one frame, in play-field coordinates (400x600, y down)
pub trait RenderSurface {
    fn begin_frame(&mut self, clear: Color);
    fn end_frame(&mut self);

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Draw a sprite with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32);
    /// Draw text with its top-left corner at (x, y); `size` is the line height
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);

    /// Width of `text` at `size`
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.55
    }

    fn sprite_size(&self, sprite: Sprite) -> Vec2 {
        default_sprite_size(sprite)
    }
}

/// Collision extents from the surface's sprite metadata
pub fn measure_hitboxes(surface: &impl RenderSurface) -> Hitboxes {
    Hitboxes {
        player: surface.sprite_size(Sprite::Player),
        obstacles: ObstacleKind::ALL.map(|k| surface.sprite_size(Sprite::Obstacle(k))),
    }
}
