//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::domain::{self, Angle, BodyDescription, Point, Renderer};

#[derive(Resource)]
pub struct SessionRes(domain::Session);

impl Deref for SessionRes {
    type Target = domain::Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SessionRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Session> for SessionRes {
    fn from(value: domain::Session) -> Self {
        Self(value)
    }
}

/// Operator input sampled by the controller and consumed on the next tick.
#[derive(Resource, Default)]
pub struct ControlInputRes(domain::ControlInput);

impl Deref for ControlInputRes {
    type Target = domain::ControlInput;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ControlInputRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::ControlInput> for ControlInputRes {
    fn from(value: domain::ControlInput) -> Self {
        Self(value)
    }
}

/// Latest frame handed over by the robot, drawn by the visualizer until the next one arrives.
#[derive(Resource, Default)]
pub struct FrameRes {
    body: BodyDescription,
    position: Point,
    bearing: Angle,
    diagnostic: Option<String>,
}

impl FrameRes {
    pub fn body(&self) -> &BodyDescription {
        &self.body
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bearing(&self) -> Angle {
        self.bearing
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub fn set_diagnostic(&mut self, diagnostic: Option<String>) {
        self.diagnostic = diagnostic;
    }
}

impl Renderer for FrameRes {
    fn render(&mut self, body: &BodyDescription, position: Point, bearing: Angle) {
        self.body = body.clone();
        self.position = position;
        self.bearing = bearing;
    }
}
