//! Tunable robot parameters with declared bounds and defaults.

use std::time::Duration;

use thiserror::Error;

use super::DrivetrainType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name} declares invalid bounds [{min}, {max}] for default {default}")]
    InvalidBounds {
        name: &'static str,
        default: f64,
        min: f64,
        max: f64,
    },
}

/// A value that can only be set within `[min, max]` and can always return to its default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedValue<T> {
    name: &'static str,
    value: T,
    min: T,
    max: T,
    default: T,
}

impl<T> BoundedValue<T>
where
    T: Copy + PartialOrd + Into<f64>,
{
    pub fn new(name: &'static str, default: T, min: T, max: T) -> Result<Self, SettingError> {
        if !(min <= default && default <= max) {
            return Err(SettingError::InvalidBounds {
                name,
                default: default.into(),
                min: min.into(),
                max: max.into(),
            });
        }
        Ok(Self {
            name,
            value: default,
            min,
            max,
            default,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn validate(&self, value: T) -> Result<T, SettingError> {
        if self.min <= value && value <= self.max {
            Ok(value)
        } else {
            Err(SettingError::OutOfRange {
                name: self.name,
                value: value.into(),
                min: self.min.into(),
                max: self.max.into(),
            })
        }
    }

    /// Stores `value` if it is in range. A rejected value leaves the previous one in place.
    pub fn set(&mut self, value: T) -> Result<(), SettingError> {
        self.value = self.validate(value)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }
}

// The presets below satisfy `min <= default <= max`.
fn preset(name: &'static str, (default, min, max): (f64, f64, f64)) -> BoundedValue<f64> {
    BoundedValue {
        name,
        value: default,
        min,
        max,
        default,
    }
}

/// A ranged setting of [`Settings`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Setting {
    MaxVelocity,
    RobotWidth,
    RobotLength,
}

/// Robot parameters read by the kinematic core on every tick. Ranged settings are only written
/// through [`Settings::set`], so a value outside its bounds never gets in.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    max_velocity: BoundedValue<f64>,
    robot_width: BoundedValue<f64>,
    robot_length: BoundedValue<f64>,
    drivetrain_type: DrivetrainType,
}

impl Settings {
    pub const MAX_VELOCITY: (f64, f64, f64) = (500.0, 0.0, 1000.0);
    pub const ROBOT_WIDTH: (f64, f64, f64) = (100.0, 50.0, 150.0);
    pub const ROBOT_LENGTH: (f64, f64, f64) = (100.0, 50.0, 150.0);

    pub fn new(drivetrain_type: DrivetrainType) -> Self {
        Self {
            max_velocity: preset("max velocity", Self::MAX_VELOCITY),
            robot_width: preset("robot width", Self::ROBOT_WIDTH),
            robot_length: preset("robot length", Self::ROBOT_LENGTH),
            drivetrain_type,
        }
    }

    /// Replaces the declared range of the max velocity. The value starts at the new default.
    pub fn with_max_velocity_range(
        mut self,
        default: f64,
        min: f64,
        max: f64,
    ) -> Result<Self, SettingError> {
        self.max_velocity = BoundedValue::new(self.max_velocity.name, default, min, max)?;
        Ok(self)
    }

    pub fn max_velocity(&self) -> &BoundedValue<f64> {
        &self.max_velocity
    }

    pub fn robot_width(&self) -> &BoundedValue<f64> {
        &self.robot_width
    }

    pub fn robot_length(&self) -> &BoundedValue<f64> {
        &self.robot_length
    }

    pub fn get(&self, setting: Setting) -> &BoundedValue<f64> {
        match setting {
            Setting::MaxVelocity => &self.max_velocity,
            Setting::RobotWidth => &self.robot_width,
            Setting::RobotLength => &self.robot_length,
        }
    }

    /// Stores `value` if it lies within the setting's bounds. A rejected value leaves the previous
    /// one in place.
    pub fn set(&mut self, setting: Setting, value: f64) -> Result<(), SettingError> {
        match setting {
            Setting::MaxVelocity => self.max_velocity.set(value),
            Setting::RobotWidth => self.robot_width.set(value),
            Setting::RobotLength => self.robot_length.set(value),
        }
    }

    pub fn drivetrain_type(&self) -> DrivetrainType {
        self.drivetrain_type
    }

    pub(super) fn set_drivetrain_type(&mut self, drivetrain_type: DrivetrainType) {
        self.drivetrain_type = drivetrain_type;
    }

    /// Resets every ranged setting. The drivetrain type is left alone.
    pub fn reset_ranges(&mut self) {
        self.max_velocity.reset();
        self.robot_width.reset();
        self.robot_length.reset();
    }

    /// Distance a wheel may cover in one tick at full speed.
    pub fn max_velocity_per_frame(&self, frame_period: Duration) -> f64 {
        let frame_period_ms = frame_period.as_secs_f64() * 1000.0;
        self.max_velocity.value() * frame_period_ms / 1000.0
    }

    pub fn half_width(&self) -> f64 {
        self.robot_width.value() / 2.0
    }

    pub fn half_length(&self) -> f64 {
        self.robot_length.value() / 2.0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DrivetrainType::default())
    }
}
