//! The domain module encapsulates the kinematic core. It defines the `Robot`, its `Wheel`s and the
//! `Drivetrain` strategies computing wheel velocities, along with the `Settings` they read and the
//! `Session` switching between drivetrains.
//!
//! The module has no dependency on Bevy. Drawing is delegated to a `Renderer` and timing is passed
//! in by the caller.

mod basis;
mod body;
mod drivetrain;
mod robot;
mod session;
mod settings;
mod wheel;

pub use basis::{Angle, Point, Vector, VectorError};
pub use body::{BodyDescription, Color, Primitive, Renderer, ARROW_WIDTH, LINE_WIDTH};
pub use drivetrain::{ControlInput, Drivetrain, DrivetrainType, Swerve, Tank};
pub use robot::{MismatchPolicy, Robot, RobotError, RobotState, Status, TickOutcome};
pub use session::Session;
pub use settings::{BoundedValue, Setting, SettingError, Settings};
pub use wheel::Wheel;
