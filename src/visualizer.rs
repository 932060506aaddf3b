//! 2D visualization.
//!
//! The latest frame is drawn with gizmos, transformed from the robot frame into the world frame.
//! One world unit is one pixel and the origin is the window center.

use bevy::{
    gizmos::{
        config::{DefaultGizmoConfigGroup, GizmoConfigGroup, GizmoConfigStore},
        AppGizmoBuilder,
    },
    prelude::*,
};

use crate::{
    domain::{self, Angle, BoundedValue, Point, ARROW_WIDTH, LINE_WIDTH},
    resource::{FrameRes, SessionRes},
};

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<WideGizmos>()
            .add_systems(Startup, set_up)
            .add_systems(Update, (draw_frame, update_text, handle_keyboard_input))
            .insert_resource(ClearColor(Color::WHITE))
            .insert_resource(Scene { show_text: true });
    }
}

#[derive(Resource)]
pub struct Scene {
    show_text: bool,
}

/// Gizmos drawing strokes wider than a body line.
#[derive(Default, Reflect, GizmoConfigGroup)]
struct WideGizmos;

const HELP: &str = "W/S forward  A/D strafe  Q/E turn  Up/Down max velocity  Left/Right width  \
                    PgUp/PgDn length  1 tank  2 swerve  R reset  T text";

fn set_up(mut commands: Commands, mut config_store: ResMut<GizmoConfigStore>) {
    commands.spawn(Camera2dBundle::default());
    create_text(&mut commands);

    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = LINE_WIDTH as f32;
    let (config, _) = config_store.config_mut::<WideGizmos>();
    config.line_width = ARROW_WIDTH as f32;
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 18.0,
        color: Color::BLACK,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

fn to_bevy_color(color: domain::Color) -> Color {
    match color {
        domain::Color::Black => Color::BLACK,
        domain::Color::Green => Color::GREEN,
        domain::Color::Blue => Color::BLUE,
        domain::Color::Red => Color::RED,
    }
}

fn to_bevy_position(position: Point) -> Vec2 {
    Vec2::from(<(f32, f32)>::from(position))
}

struct Stroke {
    start: Vec2,
    end: Vec2,
    width: f64,
    color: domain::Color,
}

/// World-frame strokes of a body drawn at the given pose.
fn world_strokes(body: &domain::BodyDescription, position: Point, bearing: Angle) -> Vec<Stroke> {
    let to_world = |p: Point| to_bevy_position(position + p.rotate_vector(bearing));
    body.primitives()
        .iter()
        .flat_map(|primitive| {
            primitive.segments().into_iter().map(move |(start, end)| Stroke {
                start: to_world(start),
                end: to_world(end),
                width: primitive.width(),
                color: primitive.color(),
            })
        })
        .collect()
}

fn draw_frame(frame: Res<FrameRes>, mut gizmos: Gizmos, mut wide_gizmos: Gizmos<WideGizmos>) {
    for stroke in world_strokes(frame.body(), frame.position(), frame.bearing()) {
        let color = to_bevy_color(stroke.color);
        if stroke.width > LINE_WIDTH {
            wide_gizmos.line_2d(stroke.start, stroke.end, color);
        } else {
            gizmos.line_2d(stroke.start, stroke.end, color);
        }
    }
}

fn describe(value: &BoundedValue<f64>) -> String {
    format!("{:.0} [{:.0}, {:.0}]", value.value(), value.min(), value.max())
}

fn update_text(
    mut text: Query<&mut Text>,
    scene: Res<Scene>,
    session: Res<SessionRes>,
    frame: Res<FrameRes>,
) {
    let Ok(mut text) = text.get_single_mut() else {
        return;
    };
    if !scene.show_text {
        text.sections[0].value = String::new();
        return;
    }

    let settings = session.settings();
    let robot = session.robot();
    let mut value = format!(
        "{}  MAX VEL: {}  WIDTH: {}  LENGTH: {}   POS: {}  BEARING: {:.1} deg  {:?}\n{HELP}",
        robot.drivetrain_type(),
        describe(settings.max_velocity()),
        describe(settings.robot_width()),
        describe(settings.robot_length()),
        robot.position(),
        robot.bearing().to_deg(),
        robot.status(),
    );
    if let Some(diagnostic) = frame.diagnostic() {
        value = format!("{diagnostic}\n{value}");
    }
    text.sections[0].value = value;
}

fn handle_keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut scene: ResMut<Scene>) {
    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }
}
