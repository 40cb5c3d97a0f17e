//! Export routing for named objects.
//!
//! Writing mesh files is left to the host app: this module validates names, creates the
//! directory layout, writes the JSON side files and sends an [`FbxExportRequest`] for
//! every mesh that should be written.

mod collection;
mod objects;

pub use collection::*;
pub use objects::*;

use bevy::prelude::*;
use std::path::PathBuf;

/// Event to export every selected object to its derived directory
#[derive(Message, Default)]
pub struct ExportFbxEvent {
    /// Project root to use from now on (keeps the current one if None)
    pub export_root: Option<PathBuf>,
}

/// Event to export a collection: merged main mesh plus decoration and size files
#[derive(Message)]
pub struct ExportJsonEvent {
    pub collection: Entity,
    /// Project root to use from now on (keeps the current one if None)
    pub export_root: Option<PathBuf>,
}

/// Request for the host exporter to write `entities` as one mesh file at `path`
#[derive(Message, Debug, Clone)]
pub struct FbxExportRequest {
    pub entities: Vec<Entity>,
    pub path: PathBuf,
}

/// Outcome of the last export run, for display by the host UI
#[derive(Resource, Default, Debug)]
pub struct ExportReport {
    /// Files requested or written
    pub written: Vec<PathBuf>,
    /// Object names that are not in the naming schema
    pub skipped: Vec<String>,
    /// IO and configuration problems
    pub errors: Vec<String>,
}

impl ExportReport {
    pub fn clear(&mut self) {
        self.written.clear();
        self.skipped.clear();
        self.errors.clear();
    }

    fn fail(&mut self, message: String) {
        error!("{}", message);
        self.errors.push(message);
    }
}

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportReport>()
            .add_message::<ExportFbxEvent>()
            .add_message::<ExportJsonEvent>()
            .add_message::<FbxExportRequest>()
            .add_systems(Update, (handle_export_fbx, handle_export_json));
    }
}
