//! Game configuration
//!
//! One core serves both game variants: the obstacle roster size, text style
//! and high score partitioning are switches here instead of forked code.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, ObstacleKind};

/// Built-in configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Four obstacle kinds, bordered text, a high score per tier
    #[default]
    Highway,
    /// Three obstacle kinds, plain text, one shared high score
    Classic,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Highway => "Highway",
            Preset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "highway" | "survival" => Some(Preset::Highway),
            "classic" | "simple" => Some(Preset::Classic),
            _ => None,
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Preset::Highway => GameConfig::highway(),
            Preset::Classic => GameConfig::classic(),
        }
    }
}

/// How on-screen text is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextStyle {
    /// Text with a one pixel outline in all eight directions
    #[default]
    Bordered,
    Plain,
}

/// How high scores are partitioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HighScoreMode {
    #[default]
    PerTier,
    Single,
}

/// Speeds applied when a tier is selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTuning {
    /// Player lateral speed (pixels/frame)
    pub player_speed: f32,
    /// Obstacle base speed before the score bonus (pixels/frame)
    pub obstacle_speed: f32,
}

impl TierTuning {
    pub const fn new(player_speed: f32, obstacle_speed: f32) -> Self {
        Self {
            player_speed,
            obstacle_speed,
        }
    }
}

/// Audio mix levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioLevels {
    pub select_volume: f32,
    pub crash_volume: f32,
    pub music_volume: f32,
}

impl Default for AudioLevels {
    fn default() -> Self {
        Self {
            select_volume: 1.0,
            crash_volume: 0.8,
            music_volume: 0.2,
        }
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of obstacle kinds that may spawn (1..=4)
    pub obstacle_kinds: u8,
    pub text_style: TextStyle,
    pub high_score_mode: HighScoreMode,

    // === Tier tuning ===
    pub easy: TierTuning,
    pub medium: TierTuning,
    pub hard: TierTuning,

    /// Road scroll speed (pixels/frame)
    pub road_speed: f32,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    pub audio: AudioLevels,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::highway()
    }
}

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ObstacleKinds(u8),
    Speed { field: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::ObstacleKinds(n) => write!(
                f,
                "obstacle_kinds must be between 1 and {}, got {}",
                ObstacleKind::ALL.len(),
                n
            ),
            ConfigError::Speed { field, value } => {
                write!(f, "{} must be a positive number, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GameConfig {
    /// Bordered text, four obstacle kinds, per-tier high scores
    pub fn highway() -> Self {
        Self {
            obstacle_kinds: 4,
            text_style: TextStyle::Bordered,
            high_score_mode: HighScoreMode::PerTier,
            easy: TierTuning::new(4.0, 3.0),
            medium: TierTuning::new(5.0, 5.5),
            hard: TierTuning::new(6.0, 7.0),
            road_speed: 4.0,
            seed: None,
            audio: AudioLevels::default(),
        }
    }

    /// Plain text, three obstacle kinds, a single high score; the player
    /// keeps the same lateral speed on every tier
    pub fn classic() -> Self {
        Self {
            obstacle_kinds: 3,
            text_style: TextStyle::Plain,
            high_score_mode: HighScoreMode::Single,
            easy: TierTuning::new(6.0, 3.0),
            medium: TierTuning::new(6.0, 5.5),
            hard: TierTuning::new(6.0, 7.0),
            ..Self::highway()
        }
    }

    /// Parse and validate a JSON config. Missing fields take highway defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obstacle_kinds == 0 || self.obstacle_kinds as usize > ObstacleKind::ALL.len() {
            return Err(ConfigError::ObstacleKinds(self.obstacle_kinds));
        }

        let speeds = [
            ("easy.player_speed", self.easy.player_speed),
            ("easy.obstacle_speed", self.easy.obstacle_speed),
            ("medium.player_speed", self.medium.player_speed),
            ("medium.obstacle_speed", self.medium.obstacle_speed),
            ("hard.player_speed", self.hard.player_speed),
            ("hard.obstacle_speed", self.hard.obstacle_speed),
            ("road_speed", self.road_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Speed { field, value });
            }
        }
        Ok(())
    }

    /// Tuning for a difficulty tier
    pub fn tuning(&self, difficulty: Difficulty) -> TierTuning {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// The obstacle kinds that may spawn under this config
    pub fn roster(&self) -> &'static [ObstacleKind] {
        let n = (self.obstacle_kinds as usize).clamp(1, ObstacleKind::ALL.len());
        &ObstacleKind::ALL[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_where_variants_differ() {
        let highway = Preset::Highway.config();
        let classic = Preset::Classic.config();

        assert_eq!(highway.roster().len(), 4);
        assert_eq!(classic.roster().len(), 3);
        assert_eq!(highway.text_style, TextStyle::Bordered);
        assert_eq!(classic.text_style, TextStyle::Plain);
        assert_eq!(highway.high_score_mode, HighScoreMode::PerTier);
        assert_eq!(classic.high_score_mode, HighScoreMode::Single);

        assert_eq!(highway.tuning(Difficulty::Easy).player_speed, 4.0);
        assert_eq!(classic.tuning(Difficulty::Easy).player_speed, 6.0);
        assert_eq!(classic.tuning(Difficulty::Hard).obstacle_speed, 7.0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("Classic"), Some(Preset::Classic));
        assert_eq!(Preset::from_str(" highway "), Some(Preset::Highway));
        assert_eq!(Preset::from_str("arcade"), None);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{ "obstacle_kinds": 2, "seed": 7 }"#).unwrap();
        assert_eq!(config.obstacle_kinds, 2);
        assert_eq!(config.seed, Some(7));
        // Unspecified fields fall back to the highway preset
        assert_eq!(config.medium, TierTuning::new(5.0, 5.5));
        assert_eq!(config.text_style, TextStyle::Bordered);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "obstacle_kinds": 9 }"#),
            Err(ConfigError::ObstacleKinds(9))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "hard": { "player_speed": 0.0, "obstacle_speed": 7.0 } }"#),
            Err(ConfigError::Speed {
                field: "hard.player_speed",
                ..
            })
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let json = serde_json::to_string(&GameConfig::classic()).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), GameConfig::classic());
    }
}
