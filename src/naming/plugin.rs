use bevy::prelude::*;
use std::path::PathBuf;

use super::rename::NamingRenamePlugin;
use super::state::*;
use crate::export::ExportPlugin;
use crate::settings::SettingsPlugin;

/// Configuration for [`NamingPlugin`]
#[derive(Resource, Clone, Debug, Default)]
pub struct NamingPluginConfig {
    /// Schema loaded at startup
    pub schema_path: Option<PathBuf>,
}

/// Main plugin that bundles naming, renaming and export handling
#[derive(Default)]
pub struct NamingPlugin {
    pub config: NamingPluginConfig,
}

impl NamingPlugin {
    pub fn with_schema(path: impl Into<PathBuf>) -> Self {
        Self {
            config: NamingPluginConfig {
                schema_path: Some(path.into()),
            },
        }
    }
}

impl Plugin for NamingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .add_plugins(SettingsPlugin)
            .add_plugins(NamingStatePlugin)
            .add_plugins(NamingRenamePlugin)
            .add_plugins(ExportPlugin)
            .add_systems(Startup, load_configured_schema);
    }
}

pub struct NamingStatePlugin;

impl Plugin for NamingStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NamingSession>()
            .init_resource::<NamingErrorDialog>()
            .add_message::<LoadSchemaEvent>()
            .add_message::<SchemaLoadedEvent>()
            .add_message::<SetPrefixEvent>()
            .add_systems(Update, (handle_load_schema, handle_set_prefix).chain());
    }
}

/// Queue the schema named in the plugin config
fn load_configured_schema(
    config: Res<NamingPluginConfig>,
    mut events: MessageWriter<LoadSchemaEvent>,
) {
    if let Some(path) = &config.schema_path {
        events.write(LoadSchemaEvent { path: path.clone() });
    }
}

/// Handle load schema events. A failed load keeps the current tree.
fn handle_load_schema(
    mut events: MessageReader<LoadSchemaEvent>,
    mut loaded: MessageWriter<SchemaLoadedEvent>,
    mut session: ResMut<NamingSession>,
    mut error_dialog: ResMut<NamingErrorDialog>,
) {
    for event in events.read() {
        match session.load_schema_file(&event.path) {
            Ok(()) => {
                let leaf_names = session.leaf_names().len();
                info!(
                    "Naming schema loaded from {:?}: {} exportable names, {} grid cells",
                    event.path,
                    leaf_names,
                    session.size_table().len()
                );
                loaded.write(SchemaLoadedEvent {
                    path: event.path.clone(),
                    leaf_names,
                });
            }
            Err(e) => {
                error!("Failed to load naming schema: {}", e);
                error_dialog.show("Failed to load schema", e.to_string());
            }
        }
    }
}

fn handle_set_prefix(mut events: MessageReader<SetPrefixEvent>, mut session: ResMut<NamingSession>) {
    for event in events.read() {
        if !session.set_choice(event.depth, &event.value) && !event.value.is_empty() {
            warn!(
                "'{}' is not available at prefix level {}",
                event.value, event.depth
            );
        }
        info!("Current name: {}", session.composite_name());
    }
}
