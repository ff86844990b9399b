//! Shape generation for 2D primitives and sprite artwork
//!
//! Sprites are built from flat-colored rectangles in play-field space.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::platform::Sprite;
use crate::sim::ObstacleKind;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (x2, y2) = (x + w, y + h);
    [
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a sprite with its top-left corner at `pos`
pub fn sprite(sprite: Sprite, pos: Vec2, size: Vec2) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(64);
    let mut p = Painter::new(&mut out, pos);
    let (w, h) = (size.x, size.y);
    match sprite {
        Sprite::Player => car(&mut p, w, h, colors::PLAYER),
        Sprite::Obstacle(ObstacleKind::Pickup) => pickup(&mut p, w, h),
        Sprite::Obstacle(ObstacleKind::Bus) => bus(&mut p, w, h),
        Sprite::Obstacle(ObstacleKind::Police) => {
            car(&mut p, w, h, colors::POLICE);
            let bar = w * 0.6;
            p.fill((w - bar) / 2.0, h * 0.45, bar, 4.0, colors::POLICE_LIGHT);
        }
        Sprite::Obstacle(ObstacleKind::Taxi) => {
            car(&mut p, w, h, colors::TAXI);
            p.fill(w * 0.3, h * 0.47, w * 0.4, 5.0, colors::TIRE);
        }
        Sprite::Road => road(&mut p, w, h),
        Sprite::LeftVerge => verge(&mut p, w, h, true),
        Sprite::RightVerge => verge(&mut p, w, h, false),
        Sprite::TitleBackdrop => {
            p.fill(0.0, 0.0, w, h * 0.55, colors::BACKDROP_SKY);
            p.fill(0.0, h * 0.55, w, h * 0.45, colors::BACKDROP_GROUND);
        }
        Sprite::GameOverBackdrop => {
            p.fill(0.0, 0.0, w, h, colors::BACKDROP_GROUND);
            p.fill(0.0, h * 0.2, w, h * 0.2, colors::WRECK);
        }
    }
    out
}

/// Appends rectangles positioned relative to a sprite's top-left corner
struct Painter<'a> {
    out: &'a mut Vec<Vertex>,
    origin: Vec2,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<Vertex>, origin: Vec2) -> Self {
        Self { out, origin }
    }

    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let (x, y) = (self.origin.x + x, self.origin.y + y);
        self.out.extend_from_slice(&rect(x, y, w, h, color));
    }
}

/// Top-down car: tires, body, windshield, rear window
fn car(p: &mut Painter, w: f32, h: f32, paint: [f32; 4]) {
    let tire_w = 4.0;
    let tire_h = h * 0.18;
    for ty in [h * 0.12, h * 0.7] {
        p.fill(-1.0, ty, tire_w, tire_h, colors::TIRE);
        p.fill(w - tire_w + 1.0, ty, tire_w, tire_h, colors::TIRE);
    }
    p.fill(2.0, 0.0, w - 4.0, h, paint);
    p.fill(6.0, h * 0.22, w - 12.0, h * 0.16, colors::GLASS);
    p.fill(7.0, h * 0.72, w - 14.0, h * 0.1, colors::GLASS);
}

/// Pickup truck: cab up front, open bed behind
fn pickup(p: &mut Painter, w: f32, h: f32) {
    car(p, w, h, colors::PICKUP);
    p.fill(5.0, h * 0.5, w - 10.0, h * 0.42, colors::TIRE);
}

/// Bus: long body with a row of side windows
fn bus(p: &mut Painter, w: f32, h: f32) {
    p.fill(0.0, 0.0, w, h, colors::BUS);
    p.fill(5.0, 4.0, w - 10.0, 10.0, colors::GLASS);
    let mut y = 22.0;
    while y + 10.0 < h - 6.0 {
        p.fill(3.0, y, 5.0, 10.0, colors::GLASS);
        p.fill(w - 8.0, y, 5.0, 10.0, colors::GLASS);
        y += 16.0;
    }
}

/// Road tile: asphalt, kerbs, dashed lane separators
fn road(p: &mut Painter, w: f32, h: f32) {
    p.fill(0.0, 0.0, w, h, colors::ASPHALT);
    p.fill(0.0, 0.0, 4.0, h, colors::KERB);
    p.fill(w - 4.0, 0.0, 4.0, h, colors::KERB);

    // Separators sit midway between lanes, in play-field x
    let dash = h / 3.0;
    for lane in 1..LANE_COUNT {
        let gap = (LANE_SPACING - CAR_SIZE) / 2.0;
        let x = crate::lane_x(lane) - gap - 1.0 - p.origin.x;
        p.fill(x, dash / 2.0, 2.0, dash, colors::LANE_MARK);
        p.fill(x, dash * 2.0, 2.0, dash / 2.0, colors::LANE_MARK);
    }
}

/// Grass verge with a darker stripe nearest the road
fn verge(p: &mut Painter, w: f32, h: f32, left: bool) {
    p.fill(0.0, 0.0, w, h, colors::GRASS);
    let stripe = w * 0.2;
    let x = if left { w - stripe } else { 0.0 };
    p.fill(x, 0.0, stripe, h, colors::GRASS_DARK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::default_sprite_size;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_covers_corners() {
        let quad = rect(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        let (min, max) = bounds(&quad);
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_every_sprite_is_triangles() {
        let all = [
            Sprite::Player,
            Sprite::Obstacle(ObstacleKind::Pickup),
            Sprite::Obstacle(ObstacleKind::Bus),
            Sprite::Obstacle(ObstacleKind::Police),
            Sprite::Obstacle(ObstacleKind::Taxi),
            Sprite::Road,
            Sprite::LeftVerge,
            Sprite::RightVerge,
            Sprite::TitleBackdrop,
            Sprite::GameOverBackdrop,
        ];
        for s in all {
            let vertices = sprite(s, Vec2::ZERO, default_sprite_size(s));
            assert!(!vertices.is_empty(), "{:?}", s);
            assert_eq!(vertices.len() % 3, 0, "{:?}", s);
        }
    }

    #[test]
    fn test_moving_a_sprite_translates_its_art() {
        let size = ObstacleKind::Police.default_size();
        let kind = Sprite::Obstacle(ObstacleKind::Police);
        let home = sprite(kind, Vec2::ZERO, size);
        let moved = sprite(kind, Vec2::new(160.0, 75.0), size);
        assert_eq!(home.len(), moved.len());
        for (a, b) in home.iter().zip(&moved) {
            let delta = Vec2::from(b.position) - Vec2::from(a.position);
            assert!((delta - Vec2::new(160.0, 75.0)).length() < 1e-4);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_vehicle_art_stays_near_hitbox() {
        for kind in ObstacleKind::ALL {
            let size = kind.default_size();
            let pos = Vec2::new(170.0, 100.0);
            let (min, max) = bounds(&sprite(Sprite::Obstacle(kind), pos, size));
            // Tires may poke out a pixel
            assert!(min.x >= pos.x - 1.0 && min.y >= pos.y, "{:?}", kind);
            assert!(max.x <= pos.x + size.x + 1.0 && max.y <= pos.y + size.y, "{:?}", kind);
        }
    }
}
