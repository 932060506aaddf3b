//! A simulation session owning the active robot and its settings.

use std::time::Duration;

use tracing::info;

use super::{
    Angle, ControlInput, Drivetrain, DrivetrainType, MismatchPolicy, Point, Renderer, Robot,
    RobotError, Settings, TickOutcome,
};

#[derive(Debug)]
pub struct Session {
    robot: Robot,
    settings: Settings,
    policy: MismatchPolicy,
}

impl Session {
    /// Starts with a robot at the origin using the drivetrain named by `settings`.
    pub fn new(settings: Settings, policy: MismatchPolicy) -> Self {
        Self::with_drivetrain(settings.drivetrain_type().build(), settings, policy)
    }

    pub fn with_drivetrain(
        drivetrain: Box<dyn Drivetrain>,
        mut settings: Settings,
        policy: MismatchPolicy,
    ) -> Self {
        settings.set_drivetrain_type(drivetrain.kind());
        Self {
            robot: Robot::new(drivetrain, Point::ORIGIN, Angle::default()),
            settings,
            policy,
        }
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings written here are seen by the next tick.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn tick(
        &mut self,
        input: &ControlInput,
        frame_period: Duration,
        renderer: &mut dyn Renderer,
    ) -> Result<TickOutcome, RobotError> {
        self.robot
            .tick(input, &self.settings, frame_period, self.policy, renderer)
    }

    /// Replaces the robot with one of the given drivetrain at the same pose. Returns `false` if
    /// that drivetrain is already active.
    pub fn switch_drivetrain(&mut self, drivetrain_type: DrivetrainType) -> bool {
        let current = self.robot.drivetrain_type();
        if current == drivetrain_type {
            return false;
        }

        self.robot = Robot::new(
            drivetrain_type.build(),
            self.robot.position(),
            self.robot.bearing(),
        );
        self.settings.set_drivetrain_type(drivetrain_type);
        info!(from = %current, to = %drivetrain_type, "switched drivetrain");
        true
    }

    /// Returns the robot to the origin and every ranged setting to its default.
    pub fn reset_all(&mut self) {
        self.robot.reset();
        self.settings.reset_ranges();
        info!("reset robot and settings");
    }
}
