use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::naming::NamingErrorDialog;

/// Naming and export settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Engine project directory exports are written into (None until chosen)
    #[serde(default)]
    pub export_root: Option<PathBuf>,
    /// Directory under the project root that holds exported assets
    #[serde(default = "default_asset_subdir")]
    pub asset_subdir: PathBuf,
    /// Folder name holding exported meshes inside an object's directory
    #[serde(default = "default_fbx_folder")]
    pub fbx_folder: String,
    /// Folder name holding placement files inside a collection's directory
    #[serde(default = "default_json_folder")]
    pub json_folder: String,
    /// File name of the grid size table, written directly under the asset directory
    #[serde(default = "default_size_file_name")]
    pub size_file_name: String,
    /// Scene units to engine units factor applied to decoration locations
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f32,
    /// Also renumber unselected objects sharing a base name with the selection
    #[serde(default)]
    pub sync_rename: bool,
}

fn default_asset_subdir() -> PathBuf {
    PathBuf::from("Assets/Art/MapSources/Architecture")
}

fn default_fbx_folder() -> String {
    "Fbx".to_string()
}

fn default_json_folder() -> String {
    "Json".to_string()
}

fn default_size_file_name() -> String {
    "size_table.json".to_string()
}

fn default_unit_scale() -> f32 {
    0.5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_root: None,
            asset_subdir: default_asset_subdir(),
            fbx_folder: default_fbx_folder(),
            json_folder: default_json_folder(),
            size_file_name: default_size_file_name(),
            unit_scale: default_unit_scale(),
            sync_rename: false,
        }
    }
}

/// Failure to persist [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to write settings to {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Location settings are read from at startup and written to on save
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SettingsFile(pub Option<PathBuf>);

impl Default for SettingsFile {
    fn default() -> Self {
        Self(dirs::config_dir().map(|dir| dir.join("bevy_naming_tool").join("settings.ron")))
    }
}

impl Settings {
    /// Read settings from `path`; a missing or unreadable file yields the defaults
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        ron::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings in {:?}: {}", path, e);
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content).map_err(io_error)
    }

    /// Directory exported assets are placed under, once a project root is known
    pub fn asset_root(&self) -> Option<PathBuf> {
        self.export_root
            .as_ref()
            .map(|root| root.join(&self.asset_subdir))
    }
}

/// Event to write the current settings to disk
#[derive(Message)]
pub struct SaveSettingsEvent;

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SettingsFile>();
        // An app that inserted its own settings keeps them
        if !app.world().contains_resource::<Settings>() {
            let settings = match &app.world().resource::<SettingsFile>().0 {
                Some(path) => Settings::load_from(path),
                None => Settings::default(),
            };
            app.insert_resource(settings);
        }
        app.init_resource::<NamingErrorDialog>()
            .add_message::<SaveSettingsEvent>()
            .add_systems(Update, handle_save_settings);
    }
}

fn handle_save_settings(
    mut events: MessageReader<SaveSettingsEvent>,
    settings: Res<Settings>,
    file: Res<SettingsFile>,
    mut error_dialog: ResMut<NamingErrorDialog>,
) {
    if events.read().count() == 0 {
        return;
    }

    let result = match &file.0 {
        Some(path) => settings.save_to(path),
        None => Err(SettingsError::NoConfigDir),
    };
    match result {
        Ok(()) => info!("Settings saved to: {:?}", file.0),
        Err(e) => {
            error!("Failed to save settings: {}", e);
            error_dialog.show("Failed to save settings", e.to_string());
        }
    }
}
