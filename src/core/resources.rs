//! User-tunable settings
//!
//! [`GameSettings`] is both a Bevy resource and a serde document. Every field
//! has a default, so partial or older settings files still load.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game::collaborators::{Glow, HighlightClass};
use crate::game::executor::AnimationTimings;
use crate::game::SessionConfig;

/// Resource tracking settings persisted between runs
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Master volume (0.0 to 1.0)
    pub master_volume: f32,

    /// Manipulator path, durations and easing
    pub animation: AnimationTimings,

    /// Highlight and hover colours
    pub palette: Palette,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            animation: AnimationTimings::default(),
            palette: Palette::default(),
        }
    }
}

impl GameSettings {
    /// Volume clamped to the valid range
    pub fn volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            timings: self.animation,
            hover_glow: self.palette.hover,
        }
    }
}

/// Square highlight and hover colours, `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub source: u32,
    pub capture: u32,
    pub movable: u32,
    pub highlight_intensity: f32,
    pub hover: Glow,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            source: 0x00ff00,
            capture: 0xff0000,
            movable: 0xffff00,
            highlight_intensity: 0.8,
            hover: Glow {
                color: 0xffd700,
                intensity: 0.3,
            },
        }
    }
}

impl Palette {
    pub fn highlight(&self, class: HighlightClass) -> Glow {
        let color = match class {
            HighlightClass::Source => self.source,
            HighlightClass::Move => self.movable,
            HighlightClass::Capture => self.capture,
        };
        Glow {
            color,
            intensity: self.highlight_intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{ "master_volume": 0.25 }"#).unwrap();
        assert_eq!(settings.master_volume, 0.25);
        assert_eq!(settings.animation, AnimationTimings::default());
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_nested_partial_animation() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "animation": { "travel_ms": 400 } }"#).unwrap();
        assert_eq!(settings.animation.travel_ms, 400);
        assert_eq!(settings.animation.lift_height, 4.0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = GameSettings {
            master_volume: 3.0,
            ..default()
        };
        assert_eq!(settings.volume(), 1.0);
    }

    #[test]
    fn test_palette_classes() {
        let palette = Palette::default();
        assert_eq!(palette.highlight(HighlightClass::Source).color, 0x00ff00);
        assert_eq!(palette.highlight(HighlightClass::Capture).color, 0xff0000);
        assert_eq!(palette.highlight(HighlightClass::Move).color, 0xffff00);
        assert_eq!(palette.highlight(HighlightClass::Move).intensity, 0.8);
    }
}
