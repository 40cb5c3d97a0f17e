use crate::sanitize::alnum_label;
use crate::tree::{MAX_DEPTH, NamingTree, Node};

/// The prefix chosen at each depth of a [`NamingTree`].
///
/// Choices always form an unbroken chain from depth 0: once a depth is unset, every
/// deeper depth is unset too. The cursor does not hold the tree; every operation takes
/// the tree it should be checked against, so a reloaded tree is never shadowed by a
/// cached view of the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    choices: [Option<String>; MAX_DEPTH],
}

impl SelectionCursor {
    /// Choose `value` at `depth` and re-check every deeper choice.
    ///
    /// A value that is not a child of the node selected by the shallower depths is
    /// stored as unset. Returns whether `value` was kept.
    pub fn set_choice(&mut self, tree: &NamingTree, depth: usize, value: &str) -> bool {
        if depth >= MAX_DEPTH {
            tracing::warn!(depth, "selection depth out of range");
            return false;
        }

        let accepted = !value.is_empty()
            && self
                .resolve(tree, depth)
                .is_some_and(|node| node.child(value).is_some());
        self.choices[depth] = accepted.then(|| value.to_string());
        self.revalidate_from(tree, depth + 1);
        accepted
    }

    /// Re-check all choices against `tree`, e.g. after a new schema was loaded.
    pub fn revalidate(&mut self, tree: &NamingTree) {
        self.revalidate_from(tree, 0);
    }

    pub fn clear(&mut self) {
        self.choices = Default::default();
    }

    /// Labels selectable at `depth`, in schema order.
    ///
    /// Empty when `depth` is out of range or a shallower choice is unset.
    pub fn valid_children(&self, tree: &NamingTree, depth: usize) -> Vec<String> {
        if depth >= MAX_DEPTH {
            return Vec::new();
        }
        self.resolve(tree, depth)
            .map(|node| {
                node.children()
                    .iter()
                    .map(|child| child.label().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First selectable label at `depth`, the one a dropdown shows by default.
    pub fn default_choice(&self, tree: &NamingTree, depth: usize) -> Option<String> {
        self.valid_children(tree, depth).into_iter().next()
    }

    pub fn choice(&self, depth: usize) -> Option<&str> {
        self.choices.get(depth)?.as_deref()
    }

    /// The set choices, shallowest first.
    pub fn path(&self) -> Vec<&str> {
        self.choices.iter().map_while(|choice| choice.as_deref()).collect()
    }

    /// Number of depths that currently hold a choice.
    pub fn active_depth(&self) -> usize {
        self.path().len()
    }

    /// Sanitized choices joined with `_`; choices with no ASCII letters or digits are skipped.
    pub fn composite_name(&self) -> String {
        self.path()
            .into_iter()
            .map(alnum_label)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    fn resolve<'t>(&self, tree: &'t NamingTree, depth: usize) -> Option<&'t Node> {
        self.choices[..depth]
            .iter()
            .try_fold(tree.root(), |node, choice| node.child(choice.as_deref()?))
    }

    fn revalidate_from(&mut self, tree: &NamingTree, start: usize) {
        if start >= MAX_DEPTH {
            return;
        }
        let mut node = self.resolve(tree, start);
        for depth in start..MAX_DEPTH {
            node = match (self.choices[depth].as_deref(), node) {
                (Some(value), Some(parent)) => parent.child(value),
                _ => None,
            };
            if node.is_none() {
                if self.choices[depth].is_some() {
                    tracing::debug!(depth, "cleared selection that no longer resolves");
                }
                self.choices[depth..].fill(None);
                return;
            }
        }
    }
}
