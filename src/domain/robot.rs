//! Kinematic core of a wheeled robot.
//!
//! Every tick the active drivetrain computes one velocity vector per wheel. The robot checks that
//! the vectors fit its wheels, stores them, moves itself accordingly and hands a body description
//! to the renderer.

use std::{iter, time::Duration};

use nalgebra::{DMatrix, DVector};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::{
    body::{ARROW_HEAD_LENGTH, ARROW_LENGTH},
    Angle, BodyDescription, Color, ControlInput, Drivetrain, DrivetrainType, Point, Renderer,
    Settings, Vector, Wheel,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RobotError {
    #[error("number of wheels ({expected}) didn't match drivetrain output ({actual})")]
    WheelCountMismatch { expected: usize, actual: usize },
    #[error("robot is faulted and must be reset")]
    Faulted,
}

/// How a tick reacts when the drivetrain reports the wrong number of wheel vectors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MismatchPolicy {
    /// Keep the previous wheel vectors, still render, report the error.
    #[default]
    Lenient,
    /// Stop the robot until it is reset.
    Strict,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    Active,
    Faulted,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Applied,
    Skipped(RobotError),
}

/// Pose and wheels of a robot. The number of wheels is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotState {
    position: Point,
    bearing: Angle,
    wheels: Vec<Wheel>,
}

impl RobotState {
    pub fn new(position: Point, bearing: Angle, wheels: Vec<Wheel>) -> Self {
        Self {
            position,
            bearing: bearing.normalized(),
            wheels,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bearing(&self) -> Angle {
        self.bearing
    }

    pub fn wheels(&self) -> &[Wheel] {
        &self.wheels
    }
}

#[derive(Debug)]
pub struct Robot {
    state: RobotState,
    drivetrain: Box<dyn Drivetrain>,
    status: Status,
}

impl Robot {
    pub fn new(drivetrain: Box<dyn Drivetrain>, position: Point, bearing: Angle) -> Self {
        Self {
            state: RobotState::new(position, bearing, drivetrain.wheels()),
            drivetrain,
            status: Status::Idle,
        }
    }

    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn bearing(&self) -> Angle {
        self.state.bearing
    }

    pub fn wheels(&self) -> &[Wheel] {
        &self.state.wheels
    }

    pub fn number_of_wheels(&self) -> usize {
        self.state.wheels.len()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn drivetrain_type(&self) -> DrivetrainType {
        self.drivetrain.kind()
    }

    /// Runs one simulation step.
    ///
    /// On a wheel count mismatch the lenient policy keeps the previous wheel vectors, renders and
    /// returns [`TickOutcome::Skipped`]. The strict policy faults the robot and renders nothing.
    pub fn tick(
        &mut self,
        input: &ControlInput,
        settings: &Settings,
        frame_period: Duration,
        policy: MismatchPolicy,
        renderer: &mut dyn Renderer,
    ) -> Result<TickOutcome, RobotError> {
        if self.status == Status::Faulted {
            debug!("tick ignored, robot is faulted");
            return Err(RobotError::Faulted);
        }

        let vectors = self
            .drivetrain
            .compute_wheel_vectors(&self.state, input, settings, frame_period);

        let expected = self.number_of_wheels();
        let actual = vectors.len();
        let outcome = match self.apply(vectors) {
            Ok(()) => {
                self.advance(settings);
                TickOutcome::Applied
            }
            Err(err) => match policy {
                MismatchPolicy::Lenient => {
                    warn!(expected, actual, "wheel count mismatch, keeping previous wheel vectors");
                    TickOutcome::Skipped(err)
                }
                MismatchPolicy::Strict => {
                    error!(expected, actual, "wheel count mismatch, robot faulted");
                    self.status = Status::Faulted;
                    return Err(err);
                }
            },
        };

        self.status = Status::Active;
        renderer.render(
            &self.build_body(settings, frame_period),
            self.state.position,
            self.state.bearing,
        );

        Ok(outcome)
    }

    /// Moves the robot back to the origin facing bearing zero and clears a fault.
    pub fn reset(&mut self) {
        self.state.position = Point::ORIGIN;
        self.state.bearing = Angle::default();
        self.status = Status::Idle;
    }

    /// Outline and wheel arrows in the robot frame. Arrow length is relative to the distance a
    /// wheel may cover in one tick.
    pub fn build_body(&self, settings: &Settings, frame_period: Duration) -> BodyDescription {
        let width = settings.robot_width().value();
        let length = settings.robot_length().value();
        let half_width = settings.half_width();
        let half_length = settings.half_length();

        let corners = [
            Point::new(half_width, half_length),   // top right
            Point::new(half_width, -half_length),  // bottom right
            Point::new(-half_width, -half_length), // bottom left
            Point::new(-half_width, half_length),  // top left
        ];

        let mut body = BodyDescription::new();
        for edge in corners.windows(2) {
            body.line(edge[0], edge[1], Color::Black);
        }
        body.line(corners[0], corners[3], Color::Green);

        let max_velocity = settings.max_velocity_per_frame(frame_period);
        let per_max_velocity = if max_velocity > 0.0 {
            max_velocity.recip()
        } else {
            0.0
        };

        for wheel in &self.state.wheels {
            let vector = wheel.vector();
            let magnitude = vector.magnitude() * per_max_velocity;
            body.arrow(
                wheel.mount_point(width, length),
                vector * (ARROW_LENGTH * per_max_velocity),
                ARROW_HEAD_LENGTH * magnitude.abs(),
                if vector.magnitude() > 0.0 {
                    Color::Blue
                } else {
                    Color::Red
                },
            );
        }

        body
    }

    fn apply(&mut self, vectors: Vec<Vector>) -> Result<(), RobotError> {
        if vectors.len() != self.number_of_wheels() {
            return Err(RobotError::WheelCountMismatch {
                expected: self.number_of_wheels(),
                actual: vectors.len(),
            });
        }

        for (wheel, vector) in iter::zip(self.state.wheels.iter_mut(), vectors) {
            wheel.vector = vector;
        }

        Ok(())
    }

    fn advance(&mut self, settings: &Settings) {
        let width = settings.robot_width().value();
        let length = settings.robot_length().value();
        let mounts = self
            .state
            .wheels
            .iter()
            .map(|wheel| wheel.mount_point(width, length))
            .collect::<Vec<_>>();
        let velocities = self
            .state
            .wheels
            .iter()
            .map(Wheel::vector)
            .collect::<Vec<_>>();

        if let Some((translation, rotation)) = chassis_motion(&mounts, &velocities) {
            self.state.position =
                self.state.position + translation.rotate_vector(self.state.bearing);
            self.state.bearing = (self.state.bearing + rotation).normalized();
        }
    }
}

/// Least-squares fit of a rigid chassis motion to the wheel velocities, with every wheel obeying
/// `v = (vx - ω·y, vy + ω·x)`. Returns the robot-frame translation and the rotation per tick.
fn chassis_motion(mounts: &[Point], velocities: &[Vector]) -> Option<(Point, Angle)> {
    let n = mounts.len();
    if n == 0 || n != velocities.len() {
        return None;
    }

    let mut j = DMatrix::<f64>::zeros(2 * n, 3);
    let mut v = DVector::<f64>::zeros(2 * n);
    for (i, (mount, velocity)) in iter::zip(mounts, velocities).enumerate() {
        j[(2 * i, 0)] = 1.0;
        j[(2 * i, 2)] = -mount.y();
        v[2 * i] = velocity.x();
        j[(2 * i + 1, 1)] = 1.0;
        j[(2 * i + 1, 2)] = mount.x();
        v[2 * i + 1] = velocity.y();
    }

    let q = j.svd(true, true).solve(&v, 1e-12).ok()?;
    Some((Point::new(q[0], q[1]), Angle::new(q[2])))
}
