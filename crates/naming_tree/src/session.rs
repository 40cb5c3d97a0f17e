use std::fs;
use std::path::Path;

use crate::cursor::SelectionCursor;
use crate::documents::SizeDocument;
use crate::error::SchemaError;
use crate::export::LeafNameSet;
use crate::sizing::SizeClass;
use crate::tree::{NamingTree, SizeTable};

/// Everything a naming session knows: the loaded tree, its exportable names, the grid
/// sizes registered so far and the current selection.
///
/// Loading a schema either replaces the tree and its leaf names together or, on error,
/// leaves the session as it was. Grid sizes accumulate over every successful load.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    tree: Option<NamingTree>,
    leaf_names: LeafNameSet,
    sizes: SizeTable,
    cursor: SelectionCursor,
}

impl SessionState {
    pub fn load_schema_file(&mut self, path: impl AsRef<Path>) -> Result<(), SchemaError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_schema_str(&json)
    }

    pub fn load_schema_str(&mut self, json: &str) -> Result<(), SchemaError> {
        let tree = NamingTree::from_json_str(json)?;
        self.install(tree);
        Ok(())
    }

    /// Make `tree` the active tree and drop selections it does not contain.
    pub fn install(&mut self, tree: NamingTree) {
        self.leaf_names = LeafNameSet::from_tree(&tree);
        self.sizes
            .extend(tree.sizes().iter().map(|(key, size)| (key.clone(), size.clone())));
        self.cursor.revalidate(&tree);
        self.tree = Some(tree);
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> Option<&NamingTree> {
        self.tree.as_ref()
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    /// See [`SelectionCursor::set_choice`]. Nothing can be chosen before a schema is loaded.
    pub fn set_choice(&mut self, depth: usize, value: &str) -> bool {
        let Some(tree) = self.tree.as_ref() else {
            return false;
        };
        self.cursor.set_choice(tree, depth, value)
    }

    pub fn clear_selection(&mut self) {
        self.cursor.clear();
    }

    pub fn valid_children(&self, depth: usize) -> Vec<String> {
        self.tree
            .as_ref()
            .map(|tree| self.cursor.valid_children(tree, depth))
            .unwrap_or_default()
    }

    pub fn default_choice(&self, depth: usize) -> Option<String> {
        self.cursor.default_choice(self.tree.as_ref()?, depth)
    }

    pub fn composite_name(&self) -> String {
        self.cursor.composite_name()
    }

    pub fn leaf_names(&self) -> &LeafNameSet {
        &self.leaf_names
    }

    pub fn is_valid_export_name(&self, candidate: &str) -> bool {
        self.leaf_names.is_valid_export_name(candidate)
    }

    pub fn size_table(&self) -> &SizeTable {
        &self.sizes
    }

    pub fn size_document(&self) -> SizeDocument {
        SizeDocument::from_table(&self.sizes)
    }

    /// Size bucket of the asset exported for grid cell `cell`, given its bounds volume.
    ///
    /// `None` when the cell is unknown or declares letters other than `L`, `M` and `S`.
    pub fn size_class(&self, cell: &str, volume: f32) -> Option<SizeClass> {
        SizeClass::classify(self.sizes.get(cell)?, volume)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CASTLE: &str = r#"[{"title": "命名配置表", "topics": [
        {"title": "Castle", "topics": [
            {"title": "Wall", "topics": [{"title": "Bound", "topics": [{"title": "LM"}]}]},
            {"title": "Gate"}
        ]}
    ]}]"#;

    const VILLAGE: &str = r#"[{"title": "命名配置表", "topics": [
        {"title": "Village", "topics": [
            {"title": "House", "topics": [{"title": "Bound", "topics": [{"title": "S"}]}]}
        ]}
    ]}]"#;

    #[test]
    fn nothing_selectable_before_load() {
        let mut session = SessionState::default();
        assert!(!session.is_loaded());
        assert!(session.valid_children(0).is_empty());
        assert!(!session.set_choice(0, "Castle"));
        assert!(!session.is_valid_export_name("Castle_Gate"));
    }

    #[test]
    fn load_select_and_validate() {
        let mut session = SessionState::default();
        session.load_schema_str(CASTLE).unwrap();
        assert_eq!(session.valid_children(0), ["Castle"]);
        assert!(session.set_choice(0, "Castle"));
        assert!(session.set_choice(1, "Gate"));
        assert_eq!(session.composite_name(), "Castle_Gate");
        assert!(session.is_valid_export_name(&session.composite_name()));
        assert_eq!(session.size_table().len(), 260);
    }

    #[test]
    fn failed_load_keeps_previous_tree() {
        let mut session = SessionState::default();
        session.load_schema_str(CASTLE).unwrap();
        session.set_choice(0, "Castle");

        assert!(matches!(session.load_schema_str("[]"), Err(SchemaError::Empty)));
        assert!(matches!(
            session.load_schema_str(r#"[{"title": "Other"}]"#),
            Err(SchemaError::RootTitle { .. })
        ));

        assert_eq!(session.cursor().path(), ["Castle"]);
        assert!(session.is_valid_export_name("Castle_Gate"));
        assert_eq!(session.valid_children(1), ["Wall", "Gate"]);
    }

    #[test]
    fn reload_replaces_names_and_keeps_sizes() {
        let mut session = SessionState::default();
        session.load_schema_str(CASTLE).unwrap();
        session.set_choice(0, "Castle");
        session.set_choice(1, "Gate");

        session.load_schema_str(VILLAGE).unwrap();
        assert!(session.cursor().path().is_empty());
        assert!(!session.is_valid_export_name("Castle_Gate"));
        assert_eq!(session.default_choice(0).as_deref(), Some("Village"));
        assert_eq!(session.size_table().len(), 520);
        assert_eq!(
            session.size_table().get("Castle_Wall_A_00").map(String::as_str),
            Some("LM")
        );
        assert_eq!(
            session.size_table().get("Village_House_Z_09").map(String::as_str),
            Some("S")
        );
        assert_eq!(session.size_document().items.len(), 520);
    }

    #[test]
    fn size_class_uses_declared_cell_range() {
        let mut session = SessionState::default();
        session.load_schema_str(CASTLE).unwrap();
        assert_eq!(session.size_class("Castle_Wall_B_04", 100.0), Some(SizeClass::L));
        assert_eq!(session.size_class("Castle_Wall_B_04", 5.0), Some(SizeClass::M));
        assert_eq!(session.size_class("Castle_Gate", 5.0), None);
    }

    #[test]
    fn loads_schema_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CASTLE.as_bytes()).unwrap();

        let mut session = SessionState::default();
        session.load_schema_file(file.path()).unwrap();
        assert!(session.is_loaded());

        let err = session
            .load_schema_file(file.path().with_extension("missing"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
