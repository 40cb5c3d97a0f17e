//! Export-time checks and path derivation for named objects.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::FormatError;
use crate::sanitize::{export_label, strip_extension_suffix};
use crate::tree::{NamingTree, Node};

/// Names an object may carry to be exported: one per schema leaf, grid cells excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNameSet {
    names: BTreeSet<String>,
}

impl LeafNameSet {
    pub fn from_tree(tree: &NamingTree) -> Self {
        let mut names = BTreeSet::new();
        let mut segments = Vec::new();
        for node in tree.root().children() {
            collect_leaf_names(node, &mut segments, &mut names);
        }
        tracing::debug!(count = names.len(), "collected exportable leaf names");
        Self { names }
    }

    /// Whether `candidate` names a schema leaf. A `.NNN`-style suffix is ignored.
    pub fn is_valid_export_name(&self, candidate: &str) -> bool {
        let name = strip_extension_suffix(candidate);
        !name.is_empty() && self.names.contains(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn collect_leaf_names(node: &Node, segments: &mut Vec<String>, names: &mut BTreeSet<String>) {
    if node.kind().is_grid() {
        return;
    }

    let label = export_label(node.label());
    if node.is_leaf() {
        if !label.is_empty() {
            let mut parts = segments.clone();
            parts.push(label);
            names.insert(parts.join("_"));
        }
        return;
    }

    let pushed = !label.is_empty();
    if pushed {
        segments.push(label);
    }
    for child in node.children() {
        collect_leaf_names(child, segments, names);
    }
    if pushed {
        segments.pop();
    }
}

/// Relative directory an object is exported into.
///
/// `Room_Wall_07` with kind `Fbx` becomes `Room/Wall/Room_Wall/Fbx`: every segment but
/// the last is a directory level, followed by a folder named after those segments.
/// A name without `_` becomes `<name>/<kind>`.
pub fn derive_export_sub_path(name: &str, kind: &str) -> PathBuf {
    let segments: Vec<&str> = name.split('_').collect();
    let mut path = PathBuf::new();
    match segments.split_last() {
        Some((_, parents)) if !parents.is_empty() => {
            path.extend(parents);
            path.push(parents.join("_"));
        }
        _ => path.push(name),
    }
    path.push(kind);
    path
}

/// Create the export directory of `name` under `root` if it does not exist yet.
///
/// Fails with `InvalidInput` when `name` or `kind` would leave `root`, e.g. through
/// `..` or an absolute segment.
pub fn create_export_dir(root: &Path, name: &str, kind: &str) -> io::Result<PathBuf> {
    let sub_path = derive_export_sub_path(name, kind);
    if !sub_path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name:?} does not name a directory under the export root"),
        ));
    }

    let path = root.join(sub_path);
    fs::create_dir_all(&path)?;
    Ok(path)
}

/// Increment the number after the last `_` of `name`, padded to two digits.
///
/// Numbers past 99 keep all their digits: `Wall_99` becomes `Wall_100`.
pub fn next_sequence_name(name: &str) -> Result<String, FormatError> {
    let (prefix, suffix) = match name.rfind('_') {
        Some(index) => name.split_at(index + 1),
        None => ("", name),
    };
    if suffix.is_empty() {
        return Err(FormatError::MissingNumber {
            name: name.to_string(),
        });
    }

    let next = suffix
        .parse::<u64>()
        .ok()
        .and_then(|number| number.checked_add(1))
        .ok_or_else(|| FormatError::NotANumber {
            name: name.to_string(),
            suffix: suffix.to_string(),
        })?;
    Ok(format!("{prefix}{next:02}"))
}

/// `base`, or `base_V1`, `base_V2`, ... whichever is not taken yet.
pub fn unique_collection_name(base: &str, exists: impl Fn(&str) -> bool) -> String {
    if !exists(base) {
        return base.to_string();
    }
    (1u32..)
        .map(|counter| format!("{base}_V{counter}"))
        .find(|candidate| !exists(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"[{"title": "命名配置表", "topics": [
        {"title": "墙体Wall", "topics": [
            {"title": "Brick"},
            {"title": "门Door", "topics": [{"title": "Wood"}, {"title": "铁"}]},
            {"title": "Bound", "topics": [{"title": "LS"}]}
        ]},
        {"title": "Floor"}
    ]}]"#;

    fn names() -> LeafNameSet {
        LeafNameSet::from_tree(&NamingTree::from_json_str(SCHEMA).unwrap())
    }

    #[test]
    fn leaf_names_use_export_labels() {
        let names = names();
        let all: Vec<&str> = names.iter().collect();
        assert_eq!(all, ["Floor", "Wall_Brick", "Wall_Door_Wood"]);
    }

    #[test]
    fn grid_cells_are_not_exportable() {
        let names = names();
        assert!(!names.is_valid_export_name("Wall_A_00"));
        assert!(!names.iter().any(|name| name.contains("_00")));
    }

    #[test]
    fn validation_ignores_host_suffix() {
        let names = names();
        assert!(names.is_valid_export_name("Wall_Brick"));
        assert_eq!(
            names.is_valid_export_name("Wall_Brick.003"),
            names.is_valid_export_name("Wall_Brick")
        );
        assert!(!names.is_valid_export_name("NotInSchema"));
        assert!(!names.is_valid_export_name(""));
        assert!(!names.is_valid_export_name(".001"));
    }

    #[test]
    fn sub_path_for_multi_segment_name() {
        assert_eq!(
            derive_export_sub_path("Foo_Bar_01", "Fbx"),
            Path::new("Foo").join("Bar").join("Foo_Bar").join("Fbx")
        );
        assert_eq!(
            derive_export_sub_path("Room_01", "Json"),
            Path::new("Room").join("Room").join("Json")
        );
    }

    #[test]
    fn sub_path_for_single_segment_name() {
        assert_eq!(
            derive_export_sub_path("Solo", "Fbx"),
            Path::new("Solo").join("Fbx")
        );
    }

    #[test]
    fn create_export_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let first = create_export_dir(root.path(), "Foo_Bar_01", "Fbx").unwrap();
        let second = create_export_dir(root.path(), "Foo_Bar_01", "Fbx").unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(first.ends_with(Path::new("Foo/Bar/Foo_Bar/Fbx")));
    }

    #[test]
    fn create_export_dir_stays_under_root() {
        let project = tempfile::tempdir().unwrap();
        let root = project.path().join("Assets");
        for name in ["Castle_Gate.x/../../escaped_b", "../../escaped_b", "/tmp_x"] {
            let err = create_export_dir(&root, name, "Fbx").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name}");
        }
        assert!(!project.path().join("escaped").exists());
        assert!(create_export_dir(&root, "Castle_Gate", "../Fbx").is_err());
    }

    #[test]
    fn sequence_increments_and_pads() {
        assert_eq!(next_sequence_name("Room_Wall_07").unwrap(), "Room_Wall_08");
        assert_eq!(next_sequence_name("Room_Wall_1").unwrap(), "Room_Wall_02");
        assert_eq!(next_sequence_name("Room_Wall_99").unwrap(), "Room_Wall_100");
        assert_eq!(next_sequence_name("7").unwrap(), "08");
    }

    #[test]
    fn sequence_requires_number() {
        assert_eq!(
            next_sequence_name("Room_Wall"),
            Err(FormatError::NotANumber {
                name: "Room_Wall".into(),
                suffix: "Wall".into()
            })
        );
        assert_eq!(
            next_sequence_name("Room_"),
            Err(FormatError::MissingNumber {
                name: "Room_".into()
            })
        );
        assert!(next_sequence_name("Room_-3").is_err());
    }

    #[test]
    fn collection_names_get_version_suffix() {
        let taken = ["Castle", "Castle_V1"];
        assert_eq!(
            unique_collection_name("Castle", |name| taken.contains(&name)),
            "Castle_V2"
        );
        assert_eq!(unique_collection_name("Village", |_| false), "Village");
    }
}
