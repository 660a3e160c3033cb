use std::cell::Cell;

use crate::{
    core::{context::MeasureCx, id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::Vec2,
    widget::Widget,
};

/// Measures as another widget, so that it takes the same minimal size.
///
/// The target is found by a path of names, looked up below the named
/// ancestor `root` or below the tree root. It is resolved on first measure
/// and cached while it stays in the tree.
#[derive(Debug, Default)]
pub struct MinProxy {
    /// Name of the ancestor to search from.
    root: Option<String>,
    /// Names leading to the target.
    path: Vec<String>,
    /// Resolved target.
    target: Cell<Option<NodeId>>,
}

impl MinProxy {
    /// A proxy for the widget at `path` below the tree root.
    pub fn new<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        Self {
            root: None,
            path: path.into_iter().map(Into::into).collect(),
            target: Cell::new(None),
        }
    }

    /// Search from the named ancestor instead of the tree root.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Find the target node.
    fn resolve(&self, tree: &Tree, me: NodeId) -> Result<NodeId> {
        let start = match &self.root {
            None => tree.root_id(),
            Some(name) => {
                let mut cur = tree.parent_of(me);
                loop {
                    let Some(id) = cur else {
                        return Err(Error::Structure(format!(
                            "min proxy: no ancestor named {name:?}"
                        )));
                    };
                    if tree.node(id).and_then(|n| n.name()) == Some(name.as_str()) {
                        break id;
                    }
                    cur = tree.parent_of(id);
                }
            }
        };
        tree.find_path(start, self.path.as_slice()).ok_or_else(|| {
            Error::Structure(format!("min proxy: no widget at {:?}", self.path))
        })
    }
}

impl Widget for MinProxy {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        if self.path.is_empty() {
            return Ok(Vec2::zero());
        }
        let tree = cx.tree();
        let target = match self.target.get().filter(|t| tree.contains(*t)) {
            Some(t) => t,
            None => {
                let t = self.resolve(tree, cx.node_id())?;
                self.target.set(Some(t));
                t
            }
        };
        cx.measure(target, quotum)
    }
}
