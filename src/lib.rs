//! # Bevy Naming Tool
//!
//! Schema-driven object naming and export routing for Bevy level editors.
//!
//! ## Quick Start
//!
//! Add the plugin to your Bevy app and point it at a naming schema:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_naming_tool::NamingPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(NamingPlugin::with_schema("naming_schema.json"))
//!         .run();
//! }
//! ```
//!
//! ## Naming Objects
//!
//! Mark entities with `Selected`, choose a prefix per level with `SetPrefixEvent`, then
//! send `RenameSelectedEvent`:
//!
//! ```ignore
//! commands.spawn((Name::new("Cube"), Selected));
//! prefixes.write(SetPrefixEvent { depth: 0, value: "城堡Castle".into() });
//! renames.write(RenameSelectedEvent);
//! ```
//!
//! ## Exporting
//!
//! - `ExportFbxEvent`: one mesh per selected object, under a directory derived from its name
//! - `ExportJsonEvent`: a collection's merged mesh, decoration placements and the grid size table
//!
//! Mesh files are written by whoever reads `FbxExportRequest`.

pub mod export;
pub mod naming;
pub mod settings;

// Re-export the main plugin and configuration
pub use naming::{NamingPlugin, NamingPluginConfig};

// Re-export commonly used types
pub use export::{ExportFbxEvent, ExportJsonEvent, ExportReport, FbxExportRequest};
pub use naming::{
    CreateCollectionEvent, LoadSchemaEvent, NamingCollection, NamingErrorDialog, NamingSession,
    RenameSelectedEvent, SchemaLoadedEvent, Selected, SetPrefixEvent,
};
pub use settings::{SaveSettingsEvent, Settings};
