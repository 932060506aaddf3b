use bevy::prelude::*;

use crate::config::{SimulatorConfig, DEFAULT_CONFIG_PATH};


mod config;
mod controller;
mod domain;
mod resource;
mod simulator;
mod visualizer;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Robot Drive Simulator".into(),
            ..default()
        }),
        ..default()
    }));

    let config = SimulatorConfig::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|err| {
        error!(%err, "failed to load configuration, using defaults");
        SimulatorConfig::default()
    });

    app.add_plugins(controller::Controller)
        .add_plugins(visualizer::Visualizer)
        .add_plugins(simulator::Simulator(config))
        .run();
}
