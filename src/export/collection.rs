use bevy::math::EulerRot;
use bevy::prelude::*;
use naming_tree::{is_decoration, DecorationDocument, DecorationRecord};
use std::fs;
use std::path::Path;

use super::{ExportJsonEvent, ExportReport, FbxExportRequest};
use crate::naming::NamingSession;
use crate::settings::Settings;

/// Export a collection: request the merged main mesh, and write the decoration
/// placements and the grid size table as JSON.
pub(super) fn handle_export_json(
    mut events: MessageReader<ExportJsonEvent>,
    mut requests: MessageWriter<FbxExportRequest>,
    mut settings: ResMut<Settings>,
    mut report: ResMut<ExportReport>,
    session: Res<NamingSession>,
    names: Query<&Name>,
    children: Query<&Children>,
    members: Query<(&Name, &Transform)>,
) {
    for event in events.read() {
        report.clear();

        if let Some(root) = &event.export_root {
            settings.export_root = Some(root.clone());
        }

        let Some(asset_root) = settings.asset_root() else {
            report.fail("No export directory chosen".to_string());
            continue;
        };

        let Ok(collection_name) = names.get(event.collection) else {
            report.fail(format!("Collection {:?} has no name", event.collection));
            continue;
        };
        let collection_name = collection_name.as_str();

        let dir = asset_root.join(collection_name).join(&settings.json_folder);
        if let Err(e) = fs::create_dir_all(&dir) {
            report.fail(format!("Failed to create {:?}: {}", dir, e));
            continue;
        }

        let mut main_objects = Vec::new();
        let mut decorations = Vec::new();
        let members_in_order: Vec<Entity> = children
            .get(event.collection)
            .map(|children| children.iter().collect())
            .unwrap_or_default();
        for entity in members_in_order {
            let Ok((name, transform)) = members.get(entity) else {
                continue;
            };
            if is_decoration(name.as_str()) {
                let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
                decorations.push(DecorationRecord {
                    name: name.as_str().to_string(),
                    translation: transform.translation.to_array(),
                    euler: [x, y, z],
                    scale: transform.scale.to_array(),
                });
            } else {
                main_objects.push((entity, transform.translation));
            }
        }

        // The merged mesh keeps the origin of the last main object in child order
        let origin = main_objects
            .last()
            .map(|(_, translation)| translation.to_array())
            .unwrap_or_default();

        if main_objects.is_empty() {
            warn!("Collection {} has no main objects", collection_name);
        } else {
            let path = dir.join(format!("{}.fbx", collection_name));
            requests.write(FbxExportRequest {
                entities: main_objects.iter().map(|(entity, _)| *entity).collect(),
                path: path.clone(),
            });
            report.written.push(path);
        }

        let document = DecorationDocument::build(&decorations, origin, settings.unit_scale);
        let placements_path = dir.join(format!("{}.json", collection_name));
        write_json(&placements_path, document.to_json(), &mut report);

        let sizes_path = asset_root.join(&settings.size_file_name);
        write_json(&sizes_path, session.size_document().to_json(), &mut report);

        info!(
            "Collection {} exported to {:?} ({} decorations)",
            collection_name,
            dir,
            decorations.len()
        );
    }
}

fn write_json(path: &Path, json: serde_json::Result<String>, report: &mut ExportReport) {
    let content = match json {
        Ok(content) => content,
        Err(e) => {
            report.fail(format!("Failed to serialize {:?}: {}", path, e));
            return;
        }
    };

    match fs::write(path, content) {
        Ok(()) => report.written.push(path.to_path_buf()),
        Err(e) => report.fail(format!("Failed to write {:?}: {}", path, e)),
    }
}
