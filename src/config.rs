use crate::domains::field::{FieldBounds, Position2D};
use crate::domains::path_planning::{DEFAULT_BALL_SPEED, DEFAULT_MAX_LINK_DISTANCE};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `PITCH_PATH__PLANNER__MAX_LINK_DISTANCE=300`.
pub const ENV_PREFIX: &str = "PITCH_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    pub goals: GoalsConfig,
    pub planner: PlannerConfig,
    pub playback: PlaybackConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    /// Distance from the touchlines inside which agents are first placed.
    pub spawn_margin: f64,
    /// Distance from the touchlines that dragged agents are clamped to.
    pub drag_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    pub left: Position2D,
    pub right: Position2D,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_link_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Field units per frame.
    pub speed: f64,
    pub frame_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then `path` if it exists, then `PITCH_PATH__*` environment
    /// variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let layered = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: Config = layered.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.planner.max_link_distance.is_finite() && self.planner.max_link_distance > 0.0) {
            bail!("planner.max_link_distance must be positive, got {}", self.planner.max_link_distance);
        }
        if !(self.playback.speed.is_finite() && self.playback.speed > 0.0) {
            bail!("playback.speed must be positive, got {}", self.playback.speed);
        }
        if self.field.width <= 2.0 * self.field.spawn_margin || self.field.height <= 2.0 * self.field.spawn_margin {
            bail!(
                "field.spawn_margin {} leaves no room on a {}x{} field",
                self.field.spawn_margin,
                self.field.width,
                self.field.height
            );
        }
        Ok(())
    }

    pub fn bounds(&self) -> FieldBounds {
        FieldBounds {
            width: self.field.width,
            height: self.field.height,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            goals: GoalsConfig::default(),
            planner: PlannerConfig::default(),
            playback: PlaybackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        let bounds = FieldBounds::default();
        Self {
            width: bounds.width,
            height: bounds.height,
            spawn_margin: 40.0,
            drag_margin: 20.0,
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            left: Position2D { x: 10.0, y: 250.0 },
            right: Position2D { x: 890.0, y: 250.0 },
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_link_distance: DEFAULT_MAX_LINK_DISTANCE,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_BALL_SPEED,
            frame_interval_ms: 16,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
