//! Drivetrain strategies turning control input into one velocity vector per wheel.
//!
//! A strategy only computes. Applying the vectors to the wheels and moving the robot is the job of
//! [`Robot`](super::Robot).

use std::{fmt, time::Duration};

use serde::Deserialize;

use super::{Point, RobotState, Settings, Vector, Wheel};

/// Normalized driver input. Every axis lies within `[-1, 1]`; a positive `turn` is
/// counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    forward: f64,
    strafe: f64,
    turn: f64,
}

impl ControlInput {
    pub fn new(forward: f64, strafe: f64, turn: f64) -> Self {
        Self {
            forward: clamp_axis(forward),
            strafe: clamp_axis(strafe),
            turn: clamp_axis(turn),
        }
    }

    pub fn forward(&self) -> f64 {
        self.forward
    }

    pub fn strafe(&self) -> f64 {
        self.strafe
    }

    pub fn turn(&self) -> f64 {
        self.turn
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrivetrainType {
    #[default]
    Tank,
    Swerve,
}

impl DrivetrainType {
    pub fn build(self) -> Box<dyn Drivetrain> {
        match self {
            DrivetrainType::Tank => Box::new(Tank),
            DrivetrainType::Swerve => Box::new(Swerve),
        }
    }
}

impl fmt::Display for DrivetrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrivetrainType::Tank => write!(f, "Tank"),
            DrivetrainType::Swerve => write!(f, "Swerve"),
        }
    }
}

pub trait Drivetrain: fmt::Debug + Send + Sync {
    fn kind(&self) -> DrivetrainType;

    /// Wheels in the order in which [`Drivetrain::compute_wheel_vectors`] reports them.
    fn wheels(&self) -> Vec<Wheel>;

    /// Computes the velocity of every wheel in robot-frame units per tick.
    fn compute_wheel_vectors(
        &self,
        state: &RobotState,
        input: &ControlInput,
        settings: &Settings,
        frame_period: Duration,
    ) -> Vec<Vector>;
}

/// Two wheels, one per side, each driven along the robot's forward axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tank;

impl Tank {
    pub const LEFT: Wheel = Wheel::new(-0.5, 0.0);
    pub const RIGHT: Wheel = Wheel::new(0.5, 0.0);
}

impl Drivetrain for Tank {
    fn kind(&self) -> DrivetrainType {
        DrivetrainType::Tank
    }

    fn wheels(&self) -> Vec<Wheel> {
        vec![Self::LEFT, Self::RIGHT]
    }

    fn compute_wheel_vectors(
        &self,
        _state: &RobotState,
        input: &ControlInput,
        settings: &Settings,
        frame_period: Duration,
    ) -> Vec<Vector> {
        let max_velocity = settings.max_velocity_per_frame(frame_period);
        let forward = input.forward();
        let turn = input.turn();
        let [left, right] = desaturate([forward - turn, forward + turn], 1.0);

        [left, right]
            .into_iter()
            .map(|side| Vector::from_cartesian(0.0, side * max_velocity))
            .collect()
    }
}

/// Four corner wheels, each steered and driven independently. Translation is field oriented.
#[derive(Clone, Copy, Debug, Default)]
pub struct Swerve;

impl Swerve {
    pub const TOP_RIGHT: Wheel = Wheel::new(0.5, 0.5);
    pub const BOTTOM_RIGHT: Wheel = Wheel::new(0.5, -0.5);
    pub const BOTTOM_LEFT: Wheel = Wheel::new(-0.5, -0.5);
    pub const TOP_LEFT: Wheel = Wheel::new(-0.5, 0.5);
}

impl Drivetrain for Swerve {
    fn kind(&self) -> DrivetrainType {
        DrivetrainType::Swerve
    }

    fn wheels(&self) -> Vec<Wheel> {
        vec![
            Self::TOP_RIGHT,
            Self::BOTTOM_RIGHT,
            Self::BOTTOM_LEFT,
            Self::TOP_LEFT,
        ]
    }

    fn compute_wheel_vectors(
        &self,
        state: &RobotState,
        input: &ControlInput,
        settings: &Settings,
        frame_period: Duration,
    ) -> Vec<Vector> {
        let max_velocity = settings.max_velocity_per_frame(frame_period);
        let width = settings.robot_width().value();
        let length = settings.robot_length().value();

        // World up is the robot's front at bearing zero.
        let translation = Point::new(input.strafe(), input.forward())
            .rotate_vector(-state.bearing())
            * max_velocity;

        let mounts = state
            .wheels()
            .iter()
            .map(|wheel| wheel.mount_point(width, length))
            .collect::<Vec<_>>();
        let reach = mounts
            .iter()
            .map(|mount| mount.distance(Point::ORIGIN))
            .fold(0.0, f64::max);
        let omega = if reach > 0.0 {
            input.turn() * max_velocity / reach
        } else {
            0.0
        };

        let velocities = mounts
            .iter()
            .map(|mount| {
                Point::new(
                    translation.x() - omega * mount.y(),
                    translation.y() + omega * mount.x(),
                )
            })
            .collect::<Vec<_>>();

        let fastest = velocities
            .iter()
            .map(|v| v.distance(Point::ORIGIN))
            .fold(0.0, f64::max);
        let factor = if fastest > max_velocity && fastest > 0.0 {
            max_velocity / fastest
        } else {
            1.0
        };

        velocities
            .into_iter()
            .map(|v| Vector::from_cartesian(v.x() * factor, v.y() * factor))
            .collect()
    }
}

/// Scales `values` down uniformly so that none exceeds `max` in magnitude.
fn desaturate<const N: usize>(values: [f64; N], max: f64) -> [f64; N] {
    let largest = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    if largest > max {
        values.map(|v| v * max / largest)
    } else {
        values
    }
}
