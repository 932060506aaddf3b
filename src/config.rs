//! Start-up configuration of the simulator.
//!
//! Values are read from `config/default.toml` if it exists and can be overridden by environment
//! variables prefixed with `ROBOT_SIM_`, e.g. `ROBOT_SIM_FRAME_PERIOD_MS=10`.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::info;

use crate::domain::{DrivetrainType, MismatchPolicy, SettingError, Settings};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "ROBOT_SIM";

/// Declared range of a setting, as `default` within `[min, max]`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RangeConfig {
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    pub frame_period_ms: u64,
    pub strict_wheel_count: bool,
    pub drivetrain: DrivetrainType,
    pub max_velocity: RangeConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        let (default, min, max) = Settings::MAX_VELOCITY;
        Self {
            frame_period_ms: 20,
            strict_wheel_count: false,
            drivetrain: DrivetrainType::Tank,
            max_velocity: RangeConfig { default, min, max },
        }
    }
}

impl SimulatorConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        info!("loading configuration from {path}");

        let config = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;

        config.validated()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.frame_period_ms == 0 {
            return Err(ConfigError::Message(
                "frame_period_ms must be greater than zero".to_string(),
            ));
        }
        self.settings()
            .map_err(|err| ConfigError::Message(err.to_string()))?;
        Ok(self)
    }

    /// Initial settings for the configured drivetrain and max velocity range.
    pub fn settings(&self) -> Result<Settings, SettingError> {
        let RangeConfig { default, min, max } = self.max_velocity;
        Settings::new(self.drivetrain).with_max_velocity_range(default, min, max)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_period_ms)
    }

    pub fn policy(&self) -> MismatchPolicy {
        if self.strict_wheel_count {
            MismatchPolicy::Strict
        } else {
            MismatchPolicy::Lenient
        }
    }
}
