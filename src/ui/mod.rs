//! Scene drawing
//!
//! One function per game phase, all drawing through a `RenderSurface`.

use crate::config::{GameConfig, HighScoreMode, TextStyle};
use crate::consts::*;
use crate::platform::{Color, RenderSurface, Sprite};
use crate::sim::{GamePhase, GameState};

/// Colors for screens and text
pub mod colors {
    use crate::platform::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 0.89, 0.19, 1.0];
    pub const YELLOW: Color = [0.99, 0.98, 0.0, 1.0];
    pub const RED: Color = [0.9, 0.16, 0.22, 1.0];
    pub const DARK_GRAY: Color = [0.31, 0.31, 0.31, 1.0];
    pub const DARK_GREEN: Color = [0.0, 0.46, 0.17, 1.0];
}

const TITLE: &str = "Highway Survival";

/// Text sizes in play-field pixels
const HEADING: f32 = 30.0;
const BODY: f32 = 20.0;

/// Draw one complete frame for the current phase
pub fn draw_frame(surface: &mut impl RenderSurface, state: &GameState, config: &GameConfig) {
    let clear = match state.phase {
        GamePhase::Playing => colors::DARK_GREEN,
        _ => colors::DARK_GRAY,
    };
    surface.begin_frame(clear);
    match state.phase {
        GamePhase::Start => draw_start(surface, config),
        GamePhase::Playing => draw_playing(surface, state, config),
        GamePhase::Paused => draw_paused(surface, config),
        GamePhase::GameOver => draw_game_over(surface, state, config),
    }
    surface.end_frame();
}

fn draw_start(surface: &mut impl RenderSurface, config: &GameConfig) {
    surface.draw_sprite(Sprite::TitleBackdrop, 0.0, 0.0);
    let mut pen = Pen::new(surface, config.text_style);
    pen.centered(TITLE, 100.0, HEADING, colors::WHITE);
    pen.centered("Press 1 for EASY", 250.0, BODY, colors::GREEN);
    pen.centered("Press 2 for MEDIUM", 300.0, BODY, colors::YELLOW);
    pen.centered("Press 3 for HARD", 350.0, BODY, colors::RED);
}

fn draw_playing(surface: &mut impl RenderSurface, state: &GameState, config: &GameConfig) {
    draw_road(surface, state.road_offset);

    let player = state.player.pos;
    surface.draw_sprite(Sprite::Player, player.x, player.y);
    for obstacle in &state.obstacles {
        let sprite = Sprite::Obstacle(obstacle.kind);
        surface.draw_sprite(sprite, obstacle.pos.x, obstacle.pos.y);
    }

    let score = format!("Score: {}", state.score);
    let high_score = high_score_line(state, config);
    let mut pen = Pen::new(surface, config.text_style);
    pen.label(&score, 10.0, 10.0, BODY, colors::WHITE);
    pen.label(&high_score, 10.0, 40.0, BODY, colors::YELLOW);
}

fn draw_paused(surface: &mut impl RenderSurface, config: &GameConfig) {
    surface.draw_sprite(Sprite::TitleBackdrop, 0.0, 0.0);
    let (third, mid) = (SCREEN_HEIGHT / 3.0, SCREEN_HEIGHT / 2.0);
    let mut pen = Pen::new(surface, config.text_style);
    pen.centered("GAME PAUSED", third - 15.0, HEADING, colors::GREEN);
    pen.centered("Press P to Resume", mid + 10.0, BODY, colors::YELLOW);
    pen.centered("Press ESC to Quit", mid + 40.0, BODY, colors::WHITE);
}

fn draw_game_over(surface: &mut impl RenderSurface, state: &GameState, config: &GameConfig) {
    surface.draw_sprite(Sprite::GameOverBackdrop, 0.0, 0.0);
    let mid = SCREEN_HEIGHT / 2.0;
    let final_score = format!("Final Score: {}", state.score);
    let high_score = high_score_line(state, config);
    let mut pen = Pen::new(surface, config.text_style);
    pen.centered(&final_score, mid + 40.0, BODY, colors::WHITE);
    pen.centered(&high_score, mid + 70.0, BODY, colors::YELLOW);
    pen.centered("Press ENTER to Restart", mid + 100.0, BODY, colors::GREEN);
}

/// "Highest Score" line; names the tier only when records are per tier
fn high_score_line(state: &GameState, config: &GameConfig) -> String {
    match config.high_score_mode {
        HighScoreMode::PerTier => format!(
            "Highest Score: {} ({})",
            state.high_score(),
            state.difficulty.as_str()
        ),
        HighScoreMode::Single => format!("Highest Score: {}", state.high_score()),
    }
}

/// Scrolling verges and road, tiled vertically
pub fn draw_road(surface: &mut impl RenderSurface, offset: f32) {
    let verge = surface.sprite_size(Sprite::LeftVerge);
    let right = surface.sprite_size(Sprite::RightVerge);
    let road = surface.sprite_size(Sprite::Road);

    let mut y = -verge.y;
    while y < SCREEN_HEIGHT {
        surface.draw_sprite(Sprite::LeftVerge, 0.0, y + offset);
        surface.draw_sprite(Sprite::RightVerge, SCREEN_WIDTH - right.x, y + offset);
        y += verge.y;
    }

    let mut y = -road.y;
    while y < SCREEN_HEIGHT {
        surface.draw_sprite(Sprite::Road, (SCREEN_WIDTH - road.x) / 2.0, y + offset);
        y += road.y;
    }
}

/// Text writer bound to a surface and the configured text style
pub struct Pen<'a, S: RenderSurface> {
    surface: &'a mut S,
    style: TextStyle,
}

impl<'a, S: RenderSurface> Pen<'a, S> {
    pub fn new(surface: &'a mut S, style: TextStyle) -> Self {
        Self { surface, style }
    }

    /// Draw text at `(x, y)`, outlined in black when the style asks for it
    pub fn label(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        if self.style == TextStyle::Bordered {
            for (dx, dy) in [
                (-1.0, 0.0),
                (1.0, 0.0),
                (0.0, -1.0),
                (0.0, 1.0),
                (-1.0, -1.0),
                (1.0, -1.0),
                (-1.0, 1.0),
                (1.0, 1.0),
            ] {
                self.surface
                    .draw_text(text, x + dx, y + dy, size, colors::BLACK);
            }
        }
        self.surface.draw_text(text, x, y, size, color);
    }

    /// Draw text horizontally centred on the play field
    pub fn centered(&mut self, text: &str, y: f32, size: f32, color: Color) {
        let width = self.surface.measure_text(text, size);
        self.label(text, SCREEN_WIDTH / 2.0 - width / 2.0, y, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, Hitboxes, Obstacle, ObstacleKind};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Begin(Color),
        End,
        Sprite(Sprite, f32, f32),
        Text(String, f32, f32, Color),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(t, ..) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn sprites(&self, wanted: Sprite) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Sprite(s, ..) if *s == wanted))
                .count()
        }
    }

    impl RenderSurface for Recorder {
        fn begin_frame(&mut self, clear: Color) {
            self.calls.push(Call::Begin(clear));
        }
        fn end_frame(&mut self) {
            self.calls.push(Call::End);
        }
        fn draw_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {}
        fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) {
            self.calls.push(Call::Sprite(sprite, x, y));
        }
        fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, color: Color) {
            self.calls.push(Call::Text(text.to_string(), x, y, color));
        }
        fn measure_text(&self, text: &str, size: f32) -> f32 {
            text.len() as f32 * size / 2.0
        }
    }

    fn state(config: &GameConfig) -> GameState {
        GameState::new(config, Hitboxes::default(), 1)
    }

    #[test]
    fn test_frame_is_bracketed() {
        let config = GameConfig::highway();
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state(&config), &config);
        assert_eq!(surface.calls.first(), Some(&Call::Begin(colors::DARK_GRAY)));
        assert_eq!(surface.calls.last(), Some(&Call::End));
    }

    #[test]
    fn test_bordered_text_draws_outline_then_fill() {
        let mut surface = Recorder::default();
        let mut pen = Pen::new(&mut surface, TextStyle::Bordered);
        pen.label("Hi", 10.0, 10.0, BODY, colors::RED);
        assert_eq!(surface.calls.len(), 9);
        assert!(
            surface.calls[..8]
                .iter()
                .all(|c| matches!(c, Call::Text(_, _, _, color) if *color == colors::BLACK))
        );
        assert_eq!(
            surface.calls[8],
            Call::Text("Hi".into(), 10.0, 10.0, colors::RED)
        );

        let mut surface = Recorder::default();
        let mut pen = Pen::new(&mut surface, TextStyle::Plain);
        pen.label("Hi", 10.0, 10.0, BODY, colors::RED);
        assert_eq!(surface.calls.len(), 1);
    }

    #[test]
    fn test_start_menu_is_centred() {
        let config = GameConfig::classic();
        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state(&config), &config);

        assert_eq!(
            surface.texts(),
            vec![TITLE, "Press 1 for EASY", "Press 2 for MEDIUM", "Press 3 for HARD"]
        );
        // 16 chars * 30 / 2 = 240 wide
        assert!(surface.calls.contains(&Call::Text(TITLE.into(), 80.0, 100.0, colors::WHITE)));
    }

    #[test]
    fn test_playing_hud_and_vehicles() {
        let config = GameConfig::highway();
        let mut state = state(&config);
        state.phase = GamePhase::Playing;
        state.difficulty = Difficulty::Medium;
        state.score = 42;
        state.high_scores.set(Difficulty::Medium, 99);
        state.obstacles.push(Obstacle::new(170.0, ObstacleKind::Bus));
        state.obstacles.push(Obstacle::new(270.0, ObstacleKind::Taxi));

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, &config);

        assert_eq!(surface.calls[0], Call::Begin(colors::DARK_GREEN));
        assert_eq!(surface.sprites(Sprite::Player), 1);
        assert_eq!(surface.sprites(Sprite::Obstacle(ObstacleKind::Bus)), 1);
        assert_eq!(surface.sprites(Sprite::Obstacle(ObstacleKind::Taxi)), 1);
        assert!(surface.sprites(Sprite::Road) >= 6);

        let texts = surface.texts();
        assert!(texts.contains(&"Score: 42"));
        assert!(texts.contains(&"Highest Score: 99 (MEDIUM)"));
    }

    #[test]
    fn test_single_mode_hides_tier_name() {
        let config = GameConfig::classic();
        let mut state = state(&config);
        state.phase = GamePhase::GameOver;
        state.score = 12;
        state.high_scores.set(Difficulty::Hard, 30);

        let mut surface = Recorder::default();
        draw_frame(&mut surface, &state, &config);
        assert_eq!(
            surface.texts(),
            vec!["Final Score: 12", "Highest Score: 30", "Press ENTER to Restart"]
        );
    }

    #[test]
    fn test_road_scrolls_with_offset() {
        let mut still = Recorder::default();
        draw_road(&mut still, 0.0);
        let mut moved = Recorder::default();
        draw_road(&mut moved, 16.0);

        assert_eq!(still.calls.len(), moved.calls.len());
        for (a, b) in still.calls.iter().zip(&moved.calls) {
            match (a, b) {
                (Call::Sprite(sa, xa, ya), Call::Sprite(sb, xb, yb)) => {
                    assert_eq!(sa, sb);
                    assert_eq!(xa, xb);
                    assert_eq!(*ya + 16.0, *yb);
                }
                _ => panic!("unexpected call"),
            }
        }
    }
}
