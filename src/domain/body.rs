//! Render-ready description of the robot body in the robot frame.
//!
//! The kinematic core never draws. It hands a [`BodyDescription`] together with the robot pose to
//! a [`Renderer`].

use std::{f64::consts::PI, fmt};

use super::{Angle, Point, Vector};

pub const LINE_WIDTH: f64 = 2.0;
pub const ARROW_WIDTH: f64 = 5.0;
/// Shaft length of an arrow for a wheel running at full speed.
pub const ARROW_LENGTH: f64 = 60.0;
pub const ARROW_HEAD_LENGTH: f64 = 20.0;
pub const ARROW_HEAD_ANGLE: Angle = Angle::new(45.0 / 360.0 * PI);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Color {
    #[default]
    Black,
    Green,
    Blue,
    Red,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::Green => write!(f, "green"),
            Color::Blue => write!(f, "blue"),
            Color::Red => write!(f, "red"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Line {
        start: Point,
        end: Point,
        width: f64,
        color: Color,
    },
    Arrow {
        start: Point,
        vector: Vector,
        width: f64,
        head_length: f64,
        head_angle: Angle,
        color: Color,
    },
}

impl Primitive {
    pub fn color(&self) -> Color {
        match self {
            Primitive::Line { color, .. } | Primitive::Arrow { color, .. } => *color,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Primitive::Line { width, .. } | Primitive::Arrow { width, .. } => *width,
        }
    }

    /// Straight strokes making up the primitive. An arrow yields its shaft followed by the two
    /// strokes of its head.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        match *self {
            Primitive::Line { start, end, .. } => vec![(start, end)],
            Primitive::Arrow {
                start,
                vector,
                head_length,
                head_angle,
                ..
            } => {
                let tip = start + vector;
                let back = vector.bearing() + Angle::new(PI);
                let mut segments = vec![(start, tip)];
                for side in [head_angle, -head_angle] {
                    let head = Vector::from_polar(head_length.abs(), back + side)
                        .unwrap_or(Vector::ZERO);
                    segments.push((tip, tip + head));
                }
                segments
            }
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Line {
                start, end, color, ..
            } => write!(f, "line {start} -> {end} {color}"),
            Primitive::Arrow {
                start,
                vector,
                head_length,
                color,
                ..
            } => write!(
                f,
                "arrow {start} {:.1} at {:.1} deg, head {head_length:.1} {color}",
                vector.magnitude(),
                vector.bearing().to_deg(),
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyDescription {
    primitives: Vec<Primitive>,
}

impl BodyDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, start: Point, end: Point, color: Color) -> &mut Self {
        self.primitives.push(Primitive::Line {
            start,
            end,
            width: LINE_WIDTH,
            color,
        });
        self
    }

    pub fn arrow(
        &mut self,
        start: Point,
        vector: Vector,
        head_length: f64,
        color: Color,
    ) -> &mut Self {
        self.primitives.push(Primitive::Arrow {
            start,
            vector,
            width: ARROW_WIDTH,
            head_length,
            head_angle: ARROW_HEAD_ANGLE,
            color,
        });
        self
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl fmt::Display for BodyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for primitive in &self.primitives {
            writeln!(f, "{primitive}")?;
        }
        Ok(())
    }
}

/// Output collaborator receiving a body description and the pose it is drawn at.
pub trait Renderer {
    fn render(&mut self, body: &BodyDescription, position: Point, bearing: Angle);
}
