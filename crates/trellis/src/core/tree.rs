use std::{
    any::{Any, type_name},
    collections::HashSet,
};

use slotmap::SlotMap;
use tracing::trace;

use crate::{
    core::{
        context::{LayoutCx, MeasureCx},
        id::{NodeId, TypedId},
        node::Node,
    },
    error::{Error, Result},
    geom::{Rect, Vec2},
    layout::{Lp, Units},
    widget::Widget,
    widgets::Container,
};

/// The widget arena.
///
/// Nodes own their children through the arena; parent links are non-owning
/// handles. The root is a pile container sized to the viewport.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node.
    root: NodeId,
    /// Display metrics used to resolve lengths.
    units: Units,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree with default display units.
    pub fn new() -> Self {
        Self::with_units(Units::default())
    }

    /// Create a tree with the given display units.
    pub fn with_units(units: Units) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(Container::pile()), Lp::fill()));
        Self { nodes, root, units }
    }

    /// The root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Display units.
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Replace the display units and relayout everything.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
        let ids: Vec<NodeId> = self.nodes.keys().collect();
        for id in ids {
            if let Some(n) = self.nodes.get_mut(id) {
                n.layout_dirty = true;
            }
        }
    }

    /// Look up a node.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// Does the node exist?
    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty apart from the root?
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Fetch a node or fail.
    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Fetch a node mutably or fail.
    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Create a node in the arena detached from the tree.
    pub fn create_detached<W>(&mut self, widget: W, lp: Lp) -> TypedId<W>
    where
        W: Widget + 'static,
    {
        TypedId::new(self.create_detached_boxed(Box::new(widget), lp))
    }

    /// Create a node in the arena detached from the tree using a boxed widget.
    pub fn create_detached_boxed(&mut self, widget: Box<dyn Widget>, lp: Lp) -> NodeId {
        self.nodes.insert(Node::new(widget, lp))
    }

    /// Add a widget as the last child of a parent.
    pub fn add_child<W>(&mut self, parent: impl Into<NodeId>, widget: W, lp: Lp) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        Ok(TypedId::new(
            self.add_child_boxed(parent, Box::new(widget), lp)?,
        ))
    }

    /// Add a boxed widget as the last child of a parent.
    pub fn add_child_boxed(
        &mut self,
        parent: impl Into<NodeId>,
        widget: Box<dyn Widget>,
        lp: Lp,
    ) -> Result<NodeId> {
        let parent = parent.into();
        self.get(parent)?;
        let child = self.create_detached_boxed(widget, lp);
        if let Err(e) = self.attach(parent, child) {
            self.nodes.remove(child);
            return Err(e);
        }
        Ok(child)
    }

    /// Attach a detached node as the last child of a parent.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        self.attach_inner(parent.into(), child.into(), true)
    }

    /// Attach a child, checking structure and the parent's accepted role.
    pub(crate) fn attach_inner(
        &mut self,
        parent: NodeId,
        child: NodeId,
        invalidate: bool,
    ) -> Result<()> {
        let accepts = self.get(parent)?.accepts;
        let c = self.get(child)?;
        if c.parent.is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        if let Some(kind) = accepts
            && c.role.kind() != kind
        {
            return Err(Error::Structure(format!(
                "{} does not accept a {} child ({:?} expected, got {:?})",
                self.get(parent)?.kind,
                c.kind,
                kind,
                c.role.kind()
            )));
        }

        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        if invalidate {
            self.invalidate_layout(parent);
        }
        Ok(())
    }

    /// Insert a detached node at a position in a parent's child list.
    pub fn insert(
        &mut self,
        parent: impl Into<NodeId>,
        index: usize,
        child: impl Into<NodeId>,
    ) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        self.attach(parent, child)?;
        let children = &mut self.get_mut(parent)?.children;
        let last = children.pop();
        let at = index.min(children.len());
        if let Some(last) = last {
            children.insert(at, last);
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it in the arena.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        self.detach_inner(child.into(), true)
    }

    /// Detach a node, optionally invalidating the former parent.
    fn detach_inner(&mut self, child: NodeId, invalidate: bool) -> Result<()> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.get_mut(parent)?.children.retain(|id| *id != child);
        self.get_mut(child)?.parent = None;
        if invalidate {
            self.invalidate_layout(parent);
        }
        Ok(())
    }

    /// Remove a node and its descendants from the arena, returning the node's
    /// own widget.
    pub fn remove_subtree(&mut self, id: impl Into<NodeId>) -> Result<Box<dyn Widget>> {
        self.remove_subtree_inner(id.into(), true)
    }

    /// Remove a subtree, optionally invalidating the former parent.
    pub(crate) fn remove_subtree_inner(
        &mut self,
        id: NodeId,
        invalidate: bool,
    ) -> Result<Box<dyn Widget>> {
        if id == self.root {
            return Err(Error::InvalidOperation("cannot remove root".into()));
        }
        self.detach_inner(id, invalidate)?;
        let order = self.subtree_pre_order(id);
        let mut removed = None;
        for n in order {
            if let Some(node) = self.nodes.remove(n)
                && n == id
            {
                removed = node.widget;
            }
        }
        removed.ok_or(Error::ReentrantWidgetBorrow(id))
    }

    /// Replace a parent's children. Former children are detached but stay in
    /// the arena.
    pub fn set_children(&mut self, parent: impl Into<NodeId>, children: Vec<NodeId>) -> Result<()> {
        let parent = parent.into();
        let mut seen = HashSet::with_capacity(children.len());
        for c in &children {
            if !seen.insert(*c) {
                return Err(Error::Structure(format!("duplicate child {c:?}")));
            }
        }
        for c in self.children_of(parent).to_vec() {
            self.detach_inner(c, false)?;
        }
        for c in children {
            self.detach_inner(c, true)?;
            self.attach_inner(parent, c, false)?;
        }
        self.invalidate_layout(parent);
        Ok(())
    }

    /// Reorder a parent's children without invalidating it.
    pub(crate) fn reorder_children(&mut self, parent: NodeId, order: Vec<NodeId>) -> Result<()> {
        let current: HashSet<NodeId> = self.children_of(parent).iter().copied().collect();
        let next: HashSet<NodeId> = order.iter().copied().collect();
        if current != next || next.len() != order.len() {
            return Err(Error::Internal(format!(
                "reorder of {parent:?} is not a permutation of its children"
            )));
        }
        self.get_mut(parent)?.children = order;
        Ok(())
    }

    /// Is `ancestor` a proper ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Collect a subtree in pre-order, including its root.
    pub fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Children of a node. Empty for unknown nodes.
    pub fn children_of(&self, id: impl Into<NodeId>) -> &[NodeId] {
        self.nodes
            .get(id.into())
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Children that take part in layout.
    pub fn visible_children(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        self.children_of(id)
            .iter()
            .copied()
            .filter(|c| self.nodes.get(*c).is_some_and(|n| !n.hidden))
            .collect()
    }

    /// Parent of a node.
    pub fn parent_of(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.nodes.get(id.into()).and_then(|n| n.parent)
    }

    /// Layout parameters of a node.
    pub fn lp(&self, id: impl Into<NodeId>) -> Result<Lp> {
        Ok(self.get(id.into())?.lp)
    }

    /// Change the layout parameters of a node.
    pub fn set_lp(&mut self, id: impl Into<NodeId>, lp: Lp) -> Result<()> {
        let id = id.into();
        self.get_mut(id)?.lp = lp;
        self.invalidate_layout(id);
        Ok(())
    }

    /// Rect of a node relative to its parent.
    pub fn rect(&self, id: impl Into<NodeId>) -> Result<Rect> {
        Ok(self.get(id.into())?.rect)
    }

    /// Rect of a node in root coordinates.
    pub fn absolute_rect(&self, id: impl Into<NodeId>) -> Result<Rect> {
        let id = id.into();
        let mut rect = self.get(id)?.rect;
        let mut cur = self.get(id)?.parent;
        while let Some(p) = cur {
            let node = self.get(p)?;
            rect.pos += node.rect.pos;
            cur = node.parent;
        }
        Ok(rect)
    }

    /// Part of a node visible after clipping by ancestors that clip, in root
    /// coordinates.
    pub fn visible_rect(&self, id: impl Into<NodeId>) -> Result<Rect> {
        let id = id.into();
        let mut visible = self.absolute_rect(id)?;
        let mut cur = self.get(id)?.parent;
        while let Some(p) = cur {
            let node = self.get(p)?;
            if node.widget.as_ref().is_some_and(|w| w.clips()) {
                let pos = visible.pos;
                visible = visible
                    .intersect(&self.absolute_rect(p)?)
                    .unwrap_or(Rect {
                        pos,
                        size: Vec2::zero(),
                    });
            }
            cur = node.parent;
        }
        Ok(visible)
    }

    /// Hide or show a node. Hidden nodes take no part in layout.
    pub fn set_hidden(&mut self, id: impl Into<NodeId>, hidden: bool) -> Result<()> {
        let id = id.into();
        let node = self.get_mut(id)?;
        if node.hidden == hidden {
            return Ok(());
        }
        node.hidden = hidden;
        node.layout_dirty = true;
        if let Some(parent) = node.parent {
            self.invalidate_layout(parent);
        }
        Ok(())
    }

    /// Is the node hidden?
    pub fn is_hidden(&self, id: impl Into<NodeId>) -> Result<bool> {
        Ok(self.get(id.into())?.hidden)
    }

    /// Effective enabled state: a node is enabled only if it and all its
    /// ancestors are.
    pub fn is_enabled(&self, id: impl Into<NodeId>) -> bool {
        let mut cur = Some(id.into());
        while let Some(n) = cur.and_then(|c| self.nodes.get(c)) {
            if !n.enabled {
                return false;
            }
            cur = n.parent;
        }
        true
    }

    /// Set a node's own enabled flag, notifying every node in the subtree
    /// whose effective state changed.
    pub fn set_enabled(&mut self, id: impl Into<NodeId>, enabled: bool) -> Result<()> {
        let id = id.into();
        if self.get(id)?.enabled == enabled {
            return Ok(());
        }
        let subtree = self.subtree_pre_order(id);
        let before: Vec<bool> = subtree.iter().map(|n| self.is_enabled(*n)).collect();
        self.get_mut(id)?.enabled = enabled;
        for (n, was) in subtree.into_iter().zip(before) {
            let now = self.is_enabled(n);
            if now != was {
                self.with_widget_mut(n, |w, _| w.on_enable_change(now))?;
            }
        }
        Ok(())
    }

    /// Name a node for lookups.
    pub fn set_name(&mut self, id: impl Into<NodeId>, name: impl Into<String>) -> Result<()> {
        self.get_mut(id.into())?.name = Some(name.into());
        Ok(())
    }

    /// First node in pre-order below and including `root` with the given name.
    pub fn find(&self, root: impl Into<NodeId>, name: &str) -> Option<NodeId> {
        self.subtree_pre_order(root.into())
            .into_iter()
            .find(|id| self.nodes.get(*id).and_then(|n| n.name.as_deref()) == Some(name))
    }

    /// Resolve a path of names, each looked up below the previous match.
    pub fn find_path(&self, root: impl Into<NodeId>, path: &[impl AsRef<str>]) -> Option<NodeId> {
        let mut cur = root.into();
        for name in path {
            cur = self.find(cur, name.as_ref())?;
        }
        Some(cur)
    }

    /// Mark a node as needing layout, along with its ancestors. Stops at the
    /// first ancestor that is already marked.
    pub fn invalidate_layout(&mut self, id: impl Into<NodeId>) {
        let mut cur = Some(id.into());
        while let Some(id) = cur {
            let Some(node) = self.nodes.get_mut(id) else {
                return;
            };
            if node.layout_dirty {
                return;
            }
            node.layout_dirty = true;
            cur = node.parent;
        }
    }

    /// Mark only this node as needing layout, leaving ancestors untouched.
    pub(crate) fn mark_dirty(&mut self, id: NodeId) {
        if let Some(n) = self.nodes.get_mut(id) {
            n.layout_dirty = true;
        }
    }

    /// Does any node need layout?
    pub fn needs_layout(&self) -> bool {
        self.nodes.get(self.root).is_some_and(|n| n.layout_dirty)
    }

    /// Ask a node for its desired size under a quotum.
    pub fn measure(&self, id: impl Into<NodeId>, quotum: Vec2) -> Result<Vec2> {
        let id = id.into();
        let widget = self
            .get(id)?
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        widget.measure(quotum, &MeasureCx::new(self, id))
    }

    /// Set a node's size. A node that is clean and already this size is left
    /// alone; otherwise it is laid out, after the resize hook if the size
    /// changed.
    pub fn resize(&mut self, id: impl Into<NodeId>, size: Vec2) -> Result<()> {
        let id = id.into();
        let node = self.get_mut(id)?;
        let changed = node.rect.size != size;
        if !changed && !node.layout_dirty {
            return Ok(());
        }
        node.rect.size = size;
        if changed {
            self.with_widget_mut(id, |w, _| w.on_resize(size))?;
        }
        self.lay_out(id)
    }

    /// Move a node within its parent.
    pub fn move_to(&mut self, id: impl Into<NodeId>, pos: Vec2) -> Result<()> {
        self.get_mut(id.into())?.rect.pos = pos;
        Ok(())
    }

    /// Run a node's layout hook with its current size.
    pub fn lay_out(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        self.get_mut(id)?.layout_dirty = false;
        trace!(?id, "lay_out");
        self.with_widget_mut(id, |w, tree| w.lay_out(&mut LayoutCx::new(tree, id)))?
    }

    /// Lay out every node marked dirty, starting at the root.
    pub fn lay_out_dirty(&mut self) -> Result<()> {
        self.lay_out_dirty_from(self.root)
    }

    /// Lay out dirty nodes below and including `id`.
    fn lay_out_dirty_from(&mut self, id: NodeId) -> Result<()> {
        if self.get(id)?.layout_dirty {
            self.lay_out(id)?;
        }
        for c in self.visible_children(id) {
            if self.get(c)?.layout_dirty {
                self.lay_out_dirty_from(c)?;
            }
        }
        Ok(())
    }

    /// Resize the root to the viewport.
    pub fn set_viewport(&mut self, size: Vec2) -> Result<()> {
        self.resize(self.root, size)
    }

    /// Take a widget out of its slot for a call that also needs the tree.
    pub fn with_widget_mut<R>(
        &mut self,
        id: impl Into<NodeId>,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let id = id.into();
        let mut widget = self
            .get_mut(id)?
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = f(widget.as_mut(), self);
        // The hook may have removed its own node.
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Run a closure against a node's concrete widget.
    pub fn with_widget<W, R>(
        &mut self,
        id: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut Self) -> R,
    ) -> Result<R>
    where
        W: Widget,
    {
        let id = id.into();
        self.with_widget_mut(id, |widget, tree| {
            let kind = widget.kind();
            let any = widget as &mut dyn Any;
            match any.downcast_mut::<W>() {
                Some(w) => Ok(f(w, tree)),
                None => Err(Error::Structure(format!(
                    "{id:?} is a {kind}, not a {}",
                    type_name::<W>()
                ))),
            }
        })?
    }

    /// Borrow a node's concrete widget.
    pub fn widget_ref<W: Widget>(&self, id: impl Into<NodeId>) -> Result<&W> {
        let id = id.into();
        let node = self.get(id)?;
        let widget = node
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        (widget as &dyn Any)
            .downcast_ref::<W>()
            .ok_or_else(|| Error::Structure(format!("{id:?} is a {}", node.kind)))
    }

    /// Visible nodes below and including `root`, in paint order, with their
    /// rects in root coordinates.
    pub fn render_order(&self, root: impl Into<NodeId>) -> Result<Vec<(NodeId, Rect)>> {
        let mut out = Vec::new();
        let mut stack = vec![root.into()];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.hidden {
                continue;
            }
            out.push((id, self.visible_rect(id)?));
            stack.extend(node.children.iter().rev());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geom::Axis,
        layout::Dim,
        testing::{Leaf, Probe},
    };

    #[test]
    fn attach_checks() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let a = tree.add_child(root, Container::column(), Lp::fill())?;
        let b = tree.add_child(a, Leaf::new(10.0, 10.0), Lp::min())?;
        assert_eq!(tree.parent_of(b), Some(a.id()));
        assert_eq!(tree.attach(a, b), Err(Error::AlreadyAttached(b.id())));

        tree.detach(a)?;
        assert_eq!(
            tree.attach(b, a),
            Err(Error::WouldCreateCycle {
                parent: b.id(),
                child: a.id()
            })
        );
        tree.attach(root, a)?;
        assert_eq!(tree.children_of(root), &[a.id()]);
        Ok(())
    }

    #[test]
    fn remove_returns_widget() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let col = tree.add_child(root, Container::column(), Lp::fill())?;
        let leaf = tree.add_child(col, Leaf::new(3.0, 4.0), Lp::min())?;
        let w = tree.remove_subtree(col)?;
        assert_eq!(w.kind(), "Container");
        assert!(!tree.contains(leaf));
        assert!(tree.children_of(root).is_empty());
        Ok(())
    }

    #[test]
    fn invalidate_stops_at_dirty() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let col = tree.add_child(root, Container::column(), Lp::fill())?;
        let leaf = tree.add_child(col, Leaf::new(3.0, 4.0), Lp::min())?;
        tree.set_viewport(Vec2::new(100.0, 100.0))?;
        assert!(!tree.needs_layout());
        assert!(!tree.node(leaf).unwrap().layout_dirty());

        tree.set_lp(leaf, Lp::min().dx(Dim::px(20.0)))?;
        assert!(tree.node(col).unwrap().layout_dirty());
        assert!(tree.needs_layout());
        tree.lay_out_dirty()?;
        assert!(!tree.needs_layout());
        assert_eq!(tree.rect(leaf)?.size, Vec2::new(20.0, 4.0));
        Ok(())
    }

    #[test]
    fn resize_is_idempotent() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let (probe, log) = Probe::new();
        let p = tree.add_child(root, probe, Lp::fill())?;
        tree.set_viewport(Vec2::new(50.0, 40.0))?;
        tree.set_viewport(Vec2::new(50.0, 40.0))?;
        assert_eq!(log.borrow().layouts, 1);
        assert_eq!(tree.rect(p)?.size, Vec2::new(50.0, 40.0));
        Ok(())
    }

    #[test]
    fn enable_propagates() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let col = tree.add_child(root, Container::column(), Lp::fill())?;
        let (probe, log) = Probe::new();
        let p = tree.add_child(col, probe, Lp::min())?;
        tree.set_enabled(col, false)?;
        assert!(!tree.is_enabled(p));
        assert_eq!(log.borrow().enabled, vec![false]);
        tree.set_enabled(col, true)?;
        assert!(tree.is_enabled(p));
        assert_eq!(log.borrow().enabled, vec![false, true]);
        Ok(())
    }

    #[test]
    fn find_by_path() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let a = tree.add_child(root, Container::column(), Lp::fill())?;
        tree.set_name(a, "panel")?;
        let b = tree.add_child(a, Leaf::new(1.0, 1.0), Lp::min())?;
        tree.set_name(b, "ok")?;
        assert_eq!(tree.find(root, "ok"), Some(b.id()));
        assert_eq!(tree.find_path(root, &["panel", "ok"]), Some(b.id()));
        assert_eq!(tree.find_path(root, &["ok", "panel"]), None);
        Ok(())
    }

    #[test]
    fn clip_and_hidden() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let clip = tree.add_child(
            root,
            Container::trivial().with_clip(true),
            Lp::px(20.0, 20.0),
        )?;
        let big = tree.add_child(clip, Leaf::new(50.0, 50.0), Lp::min())?;
        tree.set_viewport(Vec2::new(100.0, 100.0))?;
        tree.move_to(big, Vec2::new(10.0, 10.0))?;
        let visible = tree.visible_rect(big)?;
        assert_eq!(visible.size, Vec2::new(10.0, 10.0));

        tree.set_hidden(clip, true)?;
        let order: Vec<NodeId> = tree.render_order(root)?.into_iter().map(|p| p.0).collect();
        assert_eq!(order, vec![root]);
        assert_eq!(tree.rect(clip)?.size[Axis::X], 20.0);
        Ok(())
    }

    #[test]
    fn downcast_mismatch() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let leaf = tree.add_child(root, Leaf::new(1.0, 1.0), Lp::min())?;
        assert!(tree.widget_ref::<Leaf>(leaf).is_ok());
        assert!(matches!(
            tree.with_widget(leaf, |_: &mut Container, _| ()),
            Err(Error::Structure(_))
        ));
        Ok(())
    }
}
