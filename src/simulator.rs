//! Periodic simulation of the robot.
//!
//! The robot is ticked on Bevy's fixed timestep, so the configured frame period is both the tick
//! interval and the time base of the kinematics. Systems mutating the session run in `Update` and
//! therefore never interleave with a tick.

use bevy::prelude::*;

use crate::{
    config::SimulatorConfig,
    domain::{RobotError, Session, Settings, TickOutcome},
    resource::{ControlInputRes, FrameRes, SessionRes},
};

pub struct Simulator(pub SimulatorConfig);

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        let config = &self.0;
        info!(
            frame_period_ms = config.frame_period_ms,
            drivetrain = %config.drivetrain,
            policy = ?config.policy(),
            "starting simulator"
        );

        let settings = config.settings().unwrap_or_else(|err| {
            error!(%err, "invalid max velocity range, using defaults");
            Settings::new(config.drivetrain)
        });

        app.insert_resource(Time::<Fixed>::from_duration(config.frame_period()))
            .insert_resource(SessionRes::from(Session::new(settings, config.policy())))
            .init_resource::<ControlInputRes>()
            .init_resource::<FrameRes>()
            .add_systems(FixedUpdate, simulate);
    }
}

fn simulate(
    time: Res<Time<Fixed>>,
    input: Res<ControlInputRes>,
    mut session: ResMut<SessionRes>,
    mut frame: ResMut<FrameRes>,
) {
    let diagnostic = match session.tick(&input, time.timestep(), &mut *frame) {
        Ok(TickOutcome::Applied) => None,
        Ok(TickOutcome::Skipped(err)) => Some(err.to_string()),
        Err(RobotError::Faulted) => return,
        Err(err) => Some(format!("{err}, press R to reset")),
    };
    frame.set_diagnostic(diagnostic);
}
