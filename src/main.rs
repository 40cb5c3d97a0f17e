//! Main binary for running the naming tool standalone.
//!
//! Pass a schema path as the first argument to load it at startup.

use bevy::prelude::*;
use bevy_naming_tool::{NamingPlugin, NamingPluginConfig};
use std::path::PathBuf;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Naming Tool".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(NamingPlugin {
            config: NamingPluginConfig {
                schema_path: std::env::args().nth(1).map(PathBuf::from),
            },
        })
        .run();
}
