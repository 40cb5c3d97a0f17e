use std::collections::BTreeMap;

use crate::error::SchemaError;
use crate::grid::expand_grid;
use crate::sanitize::alnum_label;
use crate::schema::{parse_document, SchemaTopic};

/// Title the first entry of every schema document must carry.
pub const ROOT_TITLE: &str = "命名配置表";
/// Topic title marking a grid expansion point.
pub const BOUND_TITLE: &str = "Bound";
/// Number of prefix levels a selection can hold.
pub const MAX_DEPTH: usize = 6;

/// Grid cell key to the size metadata declared by its `Bound` topic.
pub type SizeTable = BTreeMap<String, String>;

/// Where a node came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A topic written in the schema
    #[default]
    Topic,
    /// A letter row generated from a `Bound` topic
    GridRow,
    /// A two-digit cell under a grid row
    GridCell,
}

impl NodeKind {
    pub fn is_grid(self) -> bool {
        matches!(self, NodeKind::GridRow | NodeKind::GridCell)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Children in schema order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First child whose label equals `label` exactly.
    pub fn child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.label == label)
    }

    pub(crate) fn push(&mut self, node: Node) -> &mut Node {
        self.children.push(node);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub(crate) fn child_or_insert(&mut self, label: String, kind: NodeKind) -> &mut Node {
        match self
            .children
            .iter()
            .position(|child| child.label == label && child.kind == kind)
        {
            Some(index) => &mut self.children[index],
            None => self.push(Node::new(label, kind)),
        }
    }
}

/// A naming hierarchy built from one schema document.
///
/// The tree is immutable once built; loading another schema builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTree {
    root: Node,
    sizes: SizeTable,
}

impl NamingTree {
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Self::from_document(parse_document(json)?)
    }

    /// Build a tree from an already parsed document.
    ///
    /// Only the first entry is read; its title must be [`ROOT_TITLE`].
    pub fn from_document(document: Vec<SchemaTopic>) -> Result<Self, SchemaError> {
        let Some(table) = document.into_iter().next() else {
            return Err(SchemaError::Empty);
        };
        if table.title != ROOT_TITLE {
            return Err(SchemaError::RootTitle { found: table.title });
        }

        let mut root = Node::new(table.title, NodeKind::Topic);
        let mut sizes = SizeTable::new();
        build_subtree(&mut root, &table.topics, "", &mut sizes)?;

        let tree = Self { root, sizes };
        tracing::info!(
            top_level = tree.root.children.len(),
            leaves = tree.leaf_count(),
            grid_cells = tree.sizes.len(),
            "built naming tree"
        );
        Ok(tree)
    }

    /// The sentinel root; its children are the top-level topics.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Size metadata registered by every `Bound` topic of this schema.
    pub fn sizes(&self) -> &SizeTable {
        &self.sizes
    }

    /// Walk `path` label by label from the root.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        path.iter()
            .try_fold(&self.root, |node, label| node.child(label.as_ref()))
    }

    /// Every leaf path, depth first, in schema order. Paths start at a top-level topic.
    pub fn leaf_paths(&self) -> LeafPaths<'_> {
        LeafPaths {
            stack: self.root.children.iter().rev().map(|node| (node, 0)).collect(),
            path: Vec::new(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_paths().count()
    }

    /// Length of the longest leaf path.
    pub fn depth(&self) -> usize {
        self.leaf_paths().map(|path| path.len()).max().unwrap_or(0)
    }
}

fn build_subtree(
    parent: &mut Node,
    topics: &[SchemaTopic],
    prefix: &str,
    sizes: &mut SizeTable,
) -> Result<(), SchemaError> {
    for topic in topics {
        if topic.title == BOUND_TITLE {
            expand_grid(parent, prefix, topic, sizes)?;
            continue;
        }

        let node = parent.push(Node::new(topic.title.clone(), NodeKind::Topic));
        if !topic.topics.is_empty() {
            let prefix = format!("{prefix}{}_", alnum_label(&topic.title));
            build_subtree(node, &topic.topics, &prefix, sizes)?;
        }
    }
    Ok(())
}

/// Iterator over the leaf paths of a [`NamingTree`], driven by an explicit stack.
pub struct LeafPaths<'a> {
    stack: Vec<(&'a Node, usize)>,
    path: Vec<&'a str>,
}

impl<'a> Iterator for LeafPaths<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            self.path.truncate(depth);
            self.path.push(node.label());
            if node.is_leaf() {
                return Some(self.path.clone());
            }
            self.stack
                .extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        None
    }
}
