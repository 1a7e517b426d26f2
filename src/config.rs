//! Game configuration: the picture, the hidden targets and hold timings.
//! The bundled configuration lives in `assets/game.json`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Size;

const BUNDLED_CONFIG: &str = include_str!("../assets/game.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image size must be positive, got {width}x{height}")]
    ImageSize { width: f64, height: f64 },

    #[error("configuration has no targets")]
    NoTargets,

    #[error("target {index} has non-positive radius {radius}")]
    TargetRadius { index: usize, radius: f64 },

    #[error("target {index} at ({x}, {y}) lies outside the {width}x{height} image")]
    TargetOutOfBounds {
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("timing `{name}` must be greater than zero")]
    Timing { name: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub src: String,
    /// Canonical pixel width of the source image.
    pub width: f64,
    /// Canonical pixel height of the source image.
    pub height: f64,
}

impl ImageSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One hidden object, in original-image pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldTiming {
    pub arm_delay_ms: u32,
    pub hold_duration_ms: u32,
    /// How long a resolved (hit or miss) indicator stays on screen.
    pub flash_ms: u32,
    pub double_tap_ms: u32,
    pub confetti_ms: u32,
}

impl Default for HoldTiming {
    fn default() -> Self {
        Self {
            arm_delay_ms: 200,
            hold_duration_ms: 3000,
            flash_ms: 500,
            double_tap_ms: 300,
            confetti_ms: 4000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub image: ImageSpec,
    /// Plural noun used in status messages ("birds").
    #[serde(default = "default_subject")]
    pub subject: String,
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub timing: HoldTiming,
}

fn default_subject() -> String {
    "objects".to_string()
}

impl GameConfig {
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_CONFIG)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects geometry the interaction core cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.image.size();
        if !size.is_usable() {
            return Err(ConfigError::ImageSize {
                width: size.width,
                height: size.height,
            });
        }
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        for (index, t) in self.targets.iter().enumerate() {
            if !(t.radius.is_finite() && t.radius > 0.0) {
                return Err(ConfigError::TargetRadius {
                    index,
                    radius: t.radius,
                });
            }
            let inside = (0.0..=size.width).contains(&t.x) && (0.0..=size.height).contains(&t.y);
            if !inside {
                return Err(ConfigError::TargetOutOfBounds {
                    index,
                    x: t.x,
                    y: t.y,
                    width: size.width,
                    height: size.height,
                });
            }
        }
        let timing = self.timing;
        for (name, value) in [
            ("arm_delay_ms", timing.arm_delay_ms),
            ("hold_duration_ms", timing.hold_duration_ms),
            ("flash_ms", timing.flash_ms),
            ("double_tap_ms", timing.double_tap_ms),
            ("confetti_ms", timing.confetti_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Timing { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> GameConfig {
    GameConfig {
        image: ImageSpec {
            src: "images/test.jpg".into(),
            width: 3032.0,
            height: 2021.0,
        },
        subject: "birds".into(),
        targets: vec![
            TargetSpec {
                x: 1034.0,
                y: 1358.0,
                radius: 50.0,
                label: Some("First bird".into()),
            },
            TargetSpec {
                x: 2752.0,
                y: 764.0,
                radius: 100.0,
                label: Some("Second bird".into()),
            },
        ],
        timing: HoldTiming::default(),
    }
}
