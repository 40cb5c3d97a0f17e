use bevy::prelude::*;
use naming_tree::{create_export_dir, strip_extension_suffix};

use super::{ExportFbxEvent, ExportReport, FbxExportRequest};
use crate::naming::{NamingSession, Selected};
use crate::settings::Settings;

/// Validate selected object names and request one mesh file per object.
///
/// Objects with names outside the schema are skipped; the others still export.
pub(super) fn handle_export_fbx(
    mut events: MessageReader<ExportFbxEvent>,
    mut requests: MessageWriter<FbxExportRequest>,
    mut settings: ResMut<Settings>,
    mut report: ResMut<ExportReport>,
    session: Res<NamingSession>,
    selected: Query<(Entity, &Name), With<Selected>>,
) {
    for event in events.read() {
        report.clear();

        if let Some(root) = &event.export_root {
            settings.export_root = Some(root.clone());
        }

        if !session.is_loaded() {
            report.fail("No naming schema loaded".to_string());
            continue;
        }

        let Some(asset_root) = settings.asset_root() else {
            report.fail("No export directory chosen".to_string());
            continue;
        };

        if selected.is_empty() {
            report.fail("No objects selected".to_string());
            continue;
        }

        for (entity, name) in &selected {
            let name = name.as_str();
            if !session.is_valid_export_name(name) {
                error!("Invalid object name: {}", name);
                report.skipped.push(name.to_string());
                continue;
            }

            // Route by the same stem the leaf set matched
            let stem = strip_extension_suffix(name);
            let dir = match create_export_dir(&asset_root, stem, &settings.fbx_folder) {
                Ok(dir) => dir,
                Err(e) => {
                    report.fail(format!("Failed to create export directory for {}: {}", name, e));
                    continue;
                }
            };

            let path = dir.join(format!("{}.fbx", stem));
            requests.write(FbxExportRequest {
                entities: vec![entity],
                path: path.clone(),
            });
            report.written.push(path);
        }

        info!(
            "Objects exported to {:?}: {} written, {} skipped",
            asset_root,
            report.written.len(),
            report.skipped.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NamingPlugin;

    const SCHEMA: &str = r#"[{"title": "命名配置表", "topics": [
        {"title": "Castle", "topics": [{"title": "Gate"}, {"title": "Tower"}]}
    ]}]"#;

    fn app(export_root: Option<std::path::PathBuf>) -> App {
        let mut app = App::new();
        app.insert_resource(Settings {
            export_root,
            ..default()
        });
        app.add_plugins(NamingPlugin::default());
        app.world_mut()
            .resource_mut::<NamingSession>()
            .load_schema_str(SCHEMA)
            .unwrap();
        app
    }

    #[test]
    fn exports_valid_names_and_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(Some(dir.path().to_path_buf()));
        app.world_mut().spawn((Name::new("Castle_Gate.001"), Selected));
        app.world_mut().spawn((Name::new("Castle_Moat"), Selected));
        app.world_mut().spawn(Name::new("Castle_Tower"));

        app.world_mut().write_message(ExportFbxEvent::default());
        app.update();

        let report = app.world().resource::<ExportReport>();
        assert_eq!(report.skipped, ["Castle_Moat"]);
        assert!(report.errors.is_empty());

        let expected = dir
            .path()
            .join("Assets/Art/MapSources/Architecture/Castle/Castle/Fbx");
        assert!(expected.is_dir());
        assert_eq!(report.written, [expected.join("Castle_Gate.fbx")]);
    }

    #[test]
    fn text_after_the_first_dot_never_reaches_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(Some(dir.path().to_path_buf()));
        app.world_mut()
            .spawn((Name::new("Castle_Gate.x/../../../../escaped_b"), Selected));

        app.world_mut().write_message(ExportFbxEvent::default());
        app.update();

        let report = app.world().resource::<ExportReport>();
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        let expected = dir
            .path()
            .join("Assets/Art/MapSources/Architecture/Castle/Castle/Fbx/Castle_Gate.fbx");
        assert_eq!(report.written, [expected]);
        assert!(!dir.path().join("escaped").exists());
        assert!(!dir.path().join("Assets/escaped").exists());
    }

    #[test]
    fn export_root_from_event_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(None);
        app.world_mut().spawn((Name::new("Castle_Tower"), Selected));

        app.world_mut().write_message(ExportFbxEvent::default());
        app.update();
        assert_eq!(app.world().resource::<ExportReport>().errors.len(), 1);

        app.world_mut().write_message(ExportFbxEvent {
            export_root: Some(dir.path().to_path_buf()),
        });
        app.update();
        assert_eq!(
            app.world().resource::<Settings>().export_root.as_deref(),
            Some(dir.path())
        );
        assert_eq!(app.world().resource::<ExportReport>().written.len(), 1);

        app.world_mut().write_message(ExportFbxEvent::default());
        app.update();
        assert_eq!(app.world().resource::<ExportReport>().written.len(), 1);
    }

    #[test]
    fn nothing_exports_without_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new();
        app.insert_resource(Settings {
            export_root: Some(dir.path().to_path_buf()),
            ..default()
        });
        app.add_plugins(NamingPlugin::default());
        app.world_mut().spawn((Name::new("Castle_Gate"), Selected));

        app.world_mut().write_message(ExportFbxEvent::default());
        app.update();

        let report = app.world().resource::<ExportReport>();
        assert!(report.written.is_empty());
        assert_eq!(report.errors, ["No naming schema loaded"]);
    }
}
