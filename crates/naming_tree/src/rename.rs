use std::collections::HashSet;

use crate::error::FormatError;
use crate::export::next_sequence_name;
use crate::sanitize::base_name;

/// An object in the host scene, as seen by the rename planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject<Id> {
    pub id: Id,
    pub name: String,
    pub selected: bool,
}

/// Renames to apply, in order, and the objects that could not be renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan<Id> {
    pub renames: Vec<(Id, String)>,
    pub failures: Vec<(Id, FormatError)>,
}

impl<Id> Default for RenamePlan<Id> {
    fn default() -> Self {
        Self {
            renames: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Plan renaming every selected object to `name`.
///
/// With `sync` on, unselected objects that share a base name with a selected object are
/// renamed too, each one taking the next sequence number after `name`. An object whose
/// number cannot be computed is reported in `failures`; the rest of the plan stands.
pub fn plan_sync_rename<Id: Copy>(
    objects: &[SceneObject<Id>],
    name: &str,
    sync: bool,
) -> RenamePlan<Id> {
    let mut plan = RenamePlan::default();

    if sync {
        let mut visited = HashSet::new();
        for selected in objects.iter().filter(|object| object.selected) {
            let base = base_name(&selected.name);
            if !visited.insert(base) {
                continue;
            }

            let mut current = name.to_string();
            for sibling in objects
                .iter()
                .filter(|object| !object.selected && base_name(&object.name) == base)
            {
                match next_sequence_name(&current) {
                    Ok(next) => {
                        plan.renames.push((sibling.id, next.clone()));
                        current = next;
                    }
                    Err(err) => {
                        tracing::warn!(object = %sibling.name, "{err}");
                        plan.failures.push((sibling.id, err));
                    }
                }
            }
        }
    }

    plan.renames.extend(
        objects
            .iter()
            .filter(|object| object.selected)
            .map(|object| (object.id, name.to_string())),
    );
    plan
}
