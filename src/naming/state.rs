use bevy::prelude::*;
use naming_tree::SessionState;
use std::path::PathBuf;

/// The naming session shared by every system and UI panel.
///
/// Systems get exclusive access through `ResMut`, so a schema reload and a prefix
/// change can never interleave.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct NamingSession(pub SessionState);

/// Marker component for objects the naming and export operations act on
#[derive(Component, Default)]
pub struct Selected;

/// Marker component for entities created to group named objects
#[derive(Component, Default)]
pub struct NamingCollection;

/// Resource to store naming errors for display by the host UI
#[derive(Resource, Default)]
pub struct NamingErrorDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
}

impl NamingErrorDialog {
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.open = true;
        self.title = title.into();
        self.message = message.into();
    }
}

/// Event to load a naming schema from a JSON file
#[derive(Message)]
pub struct LoadSchemaEvent {
    pub path: PathBuf,
}

/// Sent after a schema was loaded and installed
#[derive(Message)]
pub struct SchemaLoadedEvent {
    pub path: PathBuf,
    pub leaf_names: usize,
}

/// Event to choose the prefix at one depth of the naming tree
#[derive(Message)]
pub struct SetPrefixEvent {
    pub depth: usize,
    pub value: String,
}

/// Event to give every selected object the current composite name
#[derive(Message)]
pub struct RenameSelectedEvent;

/// Event to group the selected objects under a new collection entity
#[derive(Message)]
pub struct CreateCollectionEvent;
