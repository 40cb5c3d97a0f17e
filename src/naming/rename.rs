use bevy::prelude::*;
use naming_tree::{plan_sync_rename, unique_collection_name, SceneObject};
use std::collections::HashSet;

use super::state::*;
use crate::settings::Settings;

pub struct NamingRenamePlugin;

impl Plugin for NamingRenamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RenameSelectedEvent>()
            .add_message::<CreateCollectionEvent>()
            .add_systems(
                Update,
                (handle_rename_selected, handle_create_collection).chain(),
            );
    }
}

/// Rename selected objects, renumbering same-named objects when sync is enabled
fn handle_rename_selected(
    mut events: MessageReader<RenameSelectedEvent>,
    session: Res<NamingSession>,
    settings: Res<Settings>,
    mut error_dialog: ResMut<NamingErrorDialog>,
    mut names: Query<(Entity, &mut Name, Has<Selected>)>,
) {
    for _ in events.read() {
        let composite = session.composite_name();
        if composite.is_empty() {
            warn!("No name selected");
            continue;
        }

        let objects: Vec<SceneObject<Entity>> = names
            .iter()
            .map(|(entity, name, selected)| SceneObject {
                id: entity,
                name: name.as_str().to_string(),
                selected,
            })
            .collect();
        if !objects.iter().any(|object| object.selected) {
            warn!("No objects selected");
            continue;
        }

        let plan = plan_sync_rename(&objects, &composite, settings.sync_rename);
        for (entity, new_name) in &plan.renames {
            if let Ok((_, mut name, _)) = names.get_mut(*entity) {
                *name = Name::new(new_name.clone());
            }
        }
        info!("Renamed {} objects to {}", plan.renames.len(), composite);

        if let Some((_, e)) = plan.failures.first() {
            error!("{} objects could not be renumbered: {}", plan.failures.len(), e);
            error_dialog.show("Rename incomplete", e.to_string());
        }
    }
}

/// Group selected objects under a new, uniquely named collection entity
fn handle_create_collection(
    mut events: MessageReader<CreateCollectionEvent>,
    mut commands: Commands,
    session: Res<NamingSession>,
    collections: Query<&Name, With<NamingCollection>>,
    selected: Query<Entity, With<Selected>>,
) {
    for _ in events.read() {
        let Some(category) = session.cursor().choice(0) else {
            warn!("No name selected");
            continue;
        };

        let base = format!("{}_{}", category, session.composite_name());
        let existing: HashSet<&str> = collections.iter().map(|name| name.as_str()).collect();
        let collection_name = unique_collection_name(&base, |name| existing.contains(name));

        let collection = commands
            .spawn((
                Name::new(collection_name.clone()),
                NamingCollection,
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        let mut count = 0;
        for entity in &selected {
            commands.entity(entity).insert(ChildOf(collection));
            count += 1;
        }
        info!("Created collection {} with {} objects", collection_name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NamingPlugin;

    const SCHEMA: &str = r#"[{"title": "命名配置表", "topics": [
        {"title": "Castle", "topics": [{"title": "Wall", "topics": [{"title": "01"}]}]}
    ]}]"#;

    fn app(sync_rename: bool) -> App {
        let mut app = App::new();
        app.insert_resource(Settings {
            sync_rename,
            ..default()
        });
        app.add_plugins(NamingPlugin::default());
        {
            let mut session = app.world_mut().resource_mut::<NamingSession>();
            session.load_schema_str(SCHEMA).unwrap();
            session.set_choice(0, "Castle");
            session.set_choice(1, "Wall");
            session.set_choice(2, "01");
        }
        app
    }

    fn name_of(app: &App, entity: Entity) -> String {
        app.world().get::<Name>(entity).unwrap().as_str().to_string()
    }

    #[test]
    fn renames_only_selection_without_sync() {
        let mut app = app(false);
        let selected = app.world_mut().spawn((Name::new("Cube"), Selected)).id();
        let other = app.world_mut().spawn(Name::new("Cube.001")).id();

        app.world_mut().write_message(RenameSelectedEvent);
        app.update();

        assert_eq!(name_of(&app, selected), "Castle_Wall_01");
        assert_eq!(name_of(&app, other), "Cube.001");
    }

    #[test]
    fn sync_renumbers_same_named_objects() {
        let mut app = app(true);
        let selected = app.world_mut().spawn((Name::new("Cube"), Selected)).id();
        let first = app.world_mut().spawn(Name::new("Cube.001")).id();
        let second = app.world_mut().spawn(Name::new("Cube.002")).id();
        let unrelated = app.world_mut().spawn(Name::new("Sphere")).id();

        app.world_mut().write_message(RenameSelectedEvent);
        app.update();

        assert_eq!(name_of(&app, selected), "Castle_Wall_01");
        let mut numbered = vec![name_of(&app, first), name_of(&app, second)];
        numbered.sort();
        assert_eq!(numbered, ["Castle_Wall_02", "Castle_Wall_03"]);
        assert_eq!(name_of(&app, unrelated), "Sphere");
    }

    #[test]
    fn collections_get_unique_names_and_adopt_selection() {
        let mut app = app(false);
        let selected = app.world_mut().spawn((Name::new("Castle_Wall_01"), Selected)).id();

        app.world_mut().write_message(CreateCollectionEvent);
        app.update();
        app.world_mut().write_message(CreateCollectionEvent);
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<(Entity, &Name), With<NamingCollection>>();
        let mut collections: Vec<(Entity, String)> = query
            .iter(app.world())
            .map(|(entity, name)| (entity, name.as_str().to_string()))
            .collect();
        collections.sort_by(|a, b| a.1.cmp(&b.1));

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].1, "Castle_Castle_Wall_01");
        assert_eq!(collections[1].1, "Castle_Castle_Wall_01_V1");

        let parent = app.world().get::<ChildOf>(selected).unwrap().parent();
        assert_eq!(parent, collections[1].0);
    }
}
