//! Contexts handed to widget and layout hooks.

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::{Rect, Vec2},
    layout::{Lp, Units},
    widget::{Role, Widget},
};

/// Read-only view of the tree used while measuring.
pub struct MeasureCx<'a> {
    /// The tree being measured.
    tree: &'a Tree,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> MeasureCx<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(tree: &'a Tree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Node whose hook is running.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// The underlying tree.
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    /// Display units.
    pub fn units(&self) -> &'a Units {
        self.tree.units()
    }

    /// All children of the current node, in order.
    pub fn children(&self) -> &'a [NodeId] {
        self.tree.children_of(self.node)
    }

    /// Children that take part in layout.
    pub fn visible_children(&self) -> Vec<NodeId> {
        self.tree.visible_children(self.node)
    }

    /// Layout parameters of a node.
    pub fn lp(&self, node: NodeId) -> Result<Lp> {
        self.tree.lp(node)
    }

    /// Capability tag of a node.
    pub fn role(&self, node: NodeId) -> Result<Role> {
        Ok(self.tree.node(node).ok_or(Error::NodeNotFound(node))?.role)
    }

    /// Ask a node for its desired size.
    pub fn measure(&self, node: NodeId, quotum: Vec2) -> Result<Vec2> {
        self.tree.measure(node, quotum)
    }
}

/// Mutable view of the tree used while laying out a container.
pub struct LayoutCx<'a> {
    /// The tree being laid out.
    tree: &'a mut Tree,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> LayoutCx<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(tree: &'a mut Tree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// Node whose hook is running.
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Resolved size of the current node.
    pub fn size(&self) -> Vec2 {
        self.tree
            .node(self.node)
            .map(|n| n.rect.size)
            .unwrap_or_default()
    }

    /// A measuring view over the same tree.
    pub fn measure_cx(&self) -> MeasureCx<'_> {
        MeasureCx::new(&*self.tree, self.node)
    }

    /// The underlying tree.
    pub fn tree(&mut self) -> &mut Tree {
        &mut *self.tree
    }

    /// Display units.
    pub fn units(&self) -> Units {
        *self.tree.units()
    }

    /// All children of the current node, in order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree.children_of(self.node).to_vec()
    }

    /// Children that take part in layout.
    pub fn visible_children(&self) -> Vec<NodeId> {
        self.tree.visible_children(self.node)
    }

    /// Layout parameters of a node.
    pub fn lp(&self, node: NodeId) -> Result<Lp> {
        self.tree.lp(node)
    }

    /// Ask a node for its desired size.
    pub fn measure(&self, node: NodeId, quotum: Vec2) -> Result<Vec2> {
        self.tree.measure(node, quotum)
    }

    /// Set a child's size, laying out its subtree if needed.
    pub fn resize(&mut self, node: NodeId, size: Vec2) -> Result<()> {
        self.tree.resize(node, size)
    }

    /// Set a child's position relative to the current node.
    pub fn move_to(&mut self, node: NodeId, pos: Vec2) -> Result<()> {
        self.tree.move_to(node, pos)
    }

    /// Rect of a node relative to its parent.
    pub fn rect(&self, node: NodeId) -> Result<Rect> {
        self.tree.rect(node)
    }

    /// Lay out a child again without changing its size.
    pub fn relayout(&mut self, node: NodeId) -> Result<()> {
        self.tree.lay_out(node)
    }

    /// Run a closure against a child's concrete widget.
    pub fn with_child<W, R>(&mut self, node: NodeId, f: impl FnOnce(&mut W) -> R) -> Result<R>
    where
        W: Widget,
    {
        self.tree.with_widget(node, |w: &mut W, _| f(w))
    }

    /// Create a child without invalidating the current node's layout.
    pub fn add_child_quiet(&mut self, widget: Box<dyn Widget>, lp: Lp) -> Result<NodeId> {
        let child = self.tree.create_detached_boxed(widget, lp);
        self.tree.attach_inner(self.node, child, false)?;
        Ok(child)
    }

    /// Detach a child and free its subtree without invalidating the current
    /// node's layout. Returns the child's widget.
    pub fn remove_child_quiet(&mut self, child: NodeId) -> Result<Box<dyn Widget>> {
        self.tree.remove_subtree_inner(child, false)
    }

    /// Reorder the current node's children without invalidating its layout.
    /// `order` must be a permutation of the current children.
    pub fn reorder_children(&mut self, order: Vec<NodeId>) -> Result<()> {
        self.tree.reorder_children(self.node, order)
    }
}
