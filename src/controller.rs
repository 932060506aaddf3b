//! Controller steering the robot.
//!
//! Held keys are sampled into the control input read by the next tick. Single key presses adjust
//! settings, switch the drivetrain or reset the session.

use bevy::prelude::*;

use crate::{
    domain::{ControlInput, DrivetrainType, Setting, Settings},
    resource::{ControlInputRes, SessionRes},
};

const MAX_VELOCITY_STEP: f64 = 50.0;
const DIMENSION_STEP: f64 = 10.0;

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (control, adjust_settings, handle_session_keys));
    }
}

fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f64 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

fn control(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<ControlInputRes>) {
    let forward = axis(&keys, KeyCode::KeyW, KeyCode::KeyS);
    let strafe = axis(&keys, KeyCode::KeyD, KeyCode::KeyA);
    let turn = axis(&keys, KeyCode::KeyQ, KeyCode::KeyE);

    let sampled = ControlInput::new(forward, strafe, turn);
    if **input != sampled {
        *input = sampled.into();
    }
}

fn step(settings: &mut Settings, setting: Setting, delta: f64) {
    let requested = settings.get(setting).value() + delta;
    match settings.set(setting, requested) {
        Ok(()) => info!("{} set to {requested}", settings.get(setting).name()),
        Err(err) => warn!(%err, "setting rejected"),
    }
}

fn adjust_settings(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<SessionRes>) {
    let bindings = [
        (KeyCode::ArrowUp, Setting::MaxVelocity, MAX_VELOCITY_STEP),
        (KeyCode::ArrowDown, Setting::MaxVelocity, -MAX_VELOCITY_STEP),
        (KeyCode::ArrowRight, Setting::RobotWidth, DIMENSION_STEP),
        (KeyCode::ArrowLeft, Setting::RobotWidth, -DIMENSION_STEP),
        (KeyCode::PageUp, Setting::RobotLength, DIMENSION_STEP),
        (KeyCode::PageDown, Setting::RobotLength, -DIMENSION_STEP),
    ];

    for (key, setting, delta) in bindings {
        if keys.just_pressed(key) {
            step(session.settings_mut(), setting, delta);
        }
    }
}

fn handle_session_keys(keys: Res<ButtonInput<KeyCode>>, mut session: ResMut<SessionRes>) {
    if keys.just_pressed(KeyCode::Digit1) {
        session.switch_drivetrain(DrivetrainType::Tank);
    }

    if keys.just_pressed(KeyCode::Digit2) {
        session.switch_drivetrain(DrivetrainType::Swerve);
    }

    if keys.just_pressed(KeyCode::KeyR) {
        session.reset_all();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::{MismatchPolicy, Session};

    fn app(drivetrain_type: DrivetrainType) -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ControlInputRes>()
            .insert_resource(SessionRes::from(Session::new(
                Settings::new(drivetrain_type),
                MismatchPolicy::Lenient,
            )))
            .add_plugins(Controller);
        app
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        let mut input = app.world.resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
        for key in keys {
            input.press(*key);
        }
        app.update();
    }

    #[rstest]
    #[case::idle(&[], ControlInput::new(0.0, 0.0, 0.0))]
    #[case::forward(&[KeyCode::KeyW], ControlInput::new(1.0, 0.0, 0.0))]
    #[case::backward_left(&[KeyCode::KeyS, KeyCode::KeyA], ControlInput::new(-1.0, -1.0, 0.0))]
    #[case::turn_left(&[KeyCode::KeyQ], ControlInput::new(0.0, 0.0, 1.0))]
    #[case::turn_right(&[KeyCode::KeyE], ControlInput::new(0.0, 0.0, -1.0))]
    #[case::opposing(&[KeyCode::KeyW, KeyCode::KeyS], ControlInput::new(0.0, 0.0, 0.0))]
    fn test_control_input(#[case] keys: &[KeyCode], #[case] expected: ControlInput) {
        let mut app = app(DrivetrainType::Tank);
        press(&mut app, keys);
        assert_eq!(**app.world.resource::<ControlInputRes>(), expected);
    }

    #[test]
    fn test_adjust_settings() {
        let mut app = app(DrivetrainType::Tank);
        press(&mut app, &[KeyCode::ArrowUp, KeyCode::ArrowLeft, KeyCode::PageUp]);

        let session = app.world.resource::<SessionRes>();
        assert_abs_diff_eq!(session.settings().max_velocity().value(), 550.0);
        assert_abs_diff_eq!(session.settings().robot_width().value(), 90.0);
        assert_abs_diff_eq!(session.settings().robot_length().value(), 110.0);
    }

    #[test]
    fn test_adjust_settings_stops_at_bound() {
        let mut app = app(DrivetrainType::Tank);
        for _ in 0..8 {
            press(&mut app, &[KeyCode::ArrowRight]);
        }

        let session = app.world.resource::<SessionRes>();
        assert_abs_diff_eq!(session.settings().robot_width().value(), 150.0);
    }

    #[test]
    fn test_switch_and_reset() {
        let mut app = app(DrivetrainType::Tank);
        app.world
            .resource_mut::<SessionRes>()
            .tick(
                &ControlInput::new(1.0, 0.0, 0.0),
                Duration::from_millis(20),
                &mut crate::tests::RecordingRenderer::default(),
            )
            .unwrap();

        press(&mut app, &[KeyCode::Digit2]);
        {
            let session = app.world.resource::<SessionRes>();
            assert_eq!(session.robot().drivetrain_type(), DrivetrainType::Swerve);
            assert_abs_diff_eq!(session.robot().position().y(), 10.0, epsilon = 1e-9);
        }

        press(&mut app, &[KeyCode::KeyR]);
        let session = app.world.resource::<SessionRes>();
        assert_eq!(session.robot().drivetrain_type(), DrivetrainType::Swerve);
        assert_abs_diff_eq!(session.robot().position().y(), 0.0);
    }
}
