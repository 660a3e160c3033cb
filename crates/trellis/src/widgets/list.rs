//! A scrolling list that only keeps the visible items in the tree.

use std::{collections::HashMap, fmt};

use tracing::debug;

use crate::{
    core::{
        context::{LayoutCx, MeasureCx},
        id::NodeId,
        tree::Tree,
    },
    error::Result,
    geom::{Axis, Vec2},
    layout::{Dim, Lp},
    widget::Widget,
};

/// Source of list items.
pub trait ItemsProvider {
    /// Number of items.
    fn count(&self) -> usize;

    /// Build the widget for an item.
    fn widget(&mut self, index: usize) -> Box<dyn Widget>;

    /// Layout parameters for an item. Along the list axis `max` and `fill`
    /// are treated as `min`.
    fn lp(&self, _index: usize) -> Lp {
        Lp::min()
    }

    /// Take back the widget of an item that scrolled out of view.
    fn recycle(&mut self, _index: usize, _widget: Box<dyn Widget>) {}
}

/// Handler notified with the new item count when the data set changes.
pub type DataSetChangedHandler = Box<dyn FnMut(usize)>;

/// Position of the last screenful of items: the first item that is at least
/// partly visible when scrolled to the end, and how far it is scrolled.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tail {
    /// Index of the first tail item.
    index: usize,
    /// Offset into the first tail item.
    offset: f32,
    /// Extent of the first tail item along the list axis.
    extent: f32,
}

/// A virtualized list along an axis.
///
/// Scrolling state is `(pos_index, pos_offset)`: the first visible item and
/// how many pixels of it are scrolled out of view.
pub struct List {
    /// Long axis.
    axis: Axis,
    /// Item source.
    provider: Option<Box<dyn ItemsProvider>>,
    /// First visible item.
    pos_index: usize,
    /// Pixels of the first visible item scrolled out of view.
    pos_offset: f32,
    /// Extent of the first visible item, from the last layout.
    first_extent: f32,
    /// Scroll factor to apply at the next layout.
    pending_factor: Option<f32>,
    /// Materialized items in child order.
    items: Vec<(usize, NodeId)>,
    /// Cached tail position. `None` means it must be recomputed.
    tail: Option<Tail>,
    /// Drop every materialized item at the next layout.
    reset: bool,
    /// Notified when the data set changes.
    pub data_set_changed: Option<DataSetChangedHandler>,
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("axis", &self.axis)
            .field("pos_index", &self.pos_index)
            .field("pos_offset", &self.pos_offset)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl List {
    /// A list along `axis` with no provider.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            provider: None,
            pos_index: 0,
            pos_offset: 0.0,
            first_extent: 0.0,
            pending_factor: None,
            items: Vec::new(),
            tail: None,
            reset: false,
            data_set_changed: None,
        }
    }

    /// A vertical list.
    pub fn vertical() -> Self {
        Self::new(Axis::Y)
    }

    /// A horizontal list.
    pub fn horizontal() -> Self {
        Self::new(Axis::X)
    }

    /// Builder form of [`List::set_provider`] for a list not yet in a tree.
    pub fn with_provider(mut self, provider: impl ItemsProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Number of items currently in the tree.
    pub fn visible_count(&self) -> usize {
        self.items.len()
    }

    /// Indices of the items currently in the tree, in order.
    pub fn visible_items(&self) -> Vec<usize> {
        self.items.iter().map(|i| i.0).collect()
    }

    /// Current scroll position as `(index, offset)`.
    pub fn position(&self) -> (usize, f32) {
        (self.pos_index, self.pos_offset)
    }

    /// Scroll position as a fraction of the scrollable range, from the last
    /// layout.
    pub fn scroll_factor(&self) -> f32 {
        let Some(tail) = self.tail else {
            return 0.0;
        };
        let end = tail.index as f32 + fraction(tail.offset, tail.extent);
        if end <= 0.0 {
            return 0.0;
        }
        ((self.pos_index as f32 + fraction(self.pos_offset, self.first_extent)) / end).clamp(0.0, 1.0)
    }

    /// Replace the item source. Existing items are dropped without recycling.
    pub fn set_provider(
        tree: &mut Tree,
        list: impl Into<NodeId>,
        provider: impl ItemsProvider + 'static,
    ) -> Result<()> {
        let list = list.into();
        tree.with_widget(list, |l: &mut Self, _| {
            l.provider = Some(Box::new(provider));
            l.pos_index = 0;
            l.pos_offset = 0.0;
        })?;
        Self::notify_data_set_changed(tree, list)
    }

    /// Scroll by `delta` pixels along the list axis.
    pub fn scroll_by(tree: &mut Tree, list: impl Into<NodeId>, delta: f32) -> Result<()> {
        let list = list.into();
        tree.with_widget(list, |l: &mut Self, _| l.pos_offset += delta)?;
        tree.invalidate_layout(list);
        Ok(())
    }

    /// Scroll to a fraction of the scrollable range.
    pub fn set_scroll_factor(tree: &mut Tree, list: impl Into<NodeId>, factor: f32) -> Result<()> {
        let list = list.into();
        tree.with_widget(list, |l: &mut Self, _| {
            l.pending_factor = Some(factor.clamp(0.0, 1.0));
        })?;
        tree.invalidate_layout(list);
        Ok(())
    }

    /// Tell the list its provider's items changed. Every item is rebuilt at
    /// the next layout.
    pub fn notify_data_set_changed(tree: &mut Tree, list: impl Into<NodeId>) -> Result<()> {
        let list = list.into();
        tree.with_widget(list, |l: &mut Self, _| {
            l.reset = true;
            l.tail = None;
            let count = l.provider.as_ref().map_or(0, |p| p.count());
            debug!(count, "list data set changed");
            if let Some(h) = l.data_set_changed.as_mut() {
                h(count);
            }
        })?;
        tree.invalidate_layout(list);
        Ok(())
    }

    /// Node for an item, building it if it is not in the tree.
    fn node_for(
        &mut self,
        cx: &mut LayoutCx<'_>,
        pool: &mut HashMap<usize, NodeId>,
        index: usize,
    ) -> Result<Option<NodeId>> {
        if let Some(n) = pool.get(&index) {
            return Ok(Some(*n));
        }
        let Some(provider) = self.provider.as_mut() else {
            return Ok(None);
        };
        let lp = provider.lp(index);
        let node = cx.add_child_quiet(provider.widget(index), lp)?;
        pool.insert(index, node);
        Ok(Some(node))
    }

    /// Size of an item node within the list.
    fn item_size(&self, cx: &MeasureCx<'_>, node: NodeId, size: Vec2) -> Result<Vec2> {
        let long = self.axis;
        let trans = long.other();
        let lp = cx.lp(node)?;
        let across = match lp.dim(trans) {
            Dim::Max | Dim::Fill => Some(size[trans]),
            Dim::Length(l) => Some(l.to_px(cx.units())),
            Dim::Min => None,
        };
        let along = match lp.dim(long) {
            Dim::Length(l) => Some(l.to_px(cx.units())),
            _ => None,
        };
        let q = Vec2::from_axes(long, along.unwrap_or(-1.0), across.unwrap_or(-1.0));
        let measured = if q.is_positive_or_zero() {
            q
        } else {
            cx.measure(node, q)?
        };
        Ok(Vec2::from_axes(
            long,
            along.unwrap_or(measured[long]),
            across.unwrap_or(measured[trans]),
        ))
    }

    /// Extent of an item along the list axis.
    fn extent(
        &mut self,
        cx: &mut LayoutCx<'_>,
        pool: &mut HashMap<usize, NodeId>,
        index: usize,
    ) -> Result<f32> {
        let size = cx.size();
        match self.node_for(cx, pool, index)? {
            Some(n) => Ok(self.item_size(&cx.measure_cx(), n, size)?[self.axis]),
            None => Ok(0.0),
        }
    }

    /// Find the scroll position that shows the last item flush with the end.
    fn compute_tail(
        &mut self,
        cx: &mut LayoutCx<'_>,
        pool: &mut HashMap<usize, NodeId>,
        count: usize,
    ) -> Result<Tail> {
        let length = cx.size()[self.axis];
        let mut sum = 0.0;
        let mut index = count;
        let mut extent = 0.0;
        while index > 0 {
            index -= 1;
            extent = self.extent(cx, pool, index)?;
            sum += extent;
            if sum >= length {
                return Ok(Tail {
                    index,
                    offset: sum - length,
                    extent,
                });
            }
        }
        Ok(Tail {
            index: 0,
            offset: 0.0,
            extent,
        })
    }

    /// Bring `(pos_index, pos_offset)` into range and apply a pending factor.
    fn normalize(
        &mut self,
        cx: &mut LayoutCx<'_>,
        pool: &mut HashMap<usize, NodeId>,
        count: usize,
        tail: Tail,
    ) -> Result<()> {
        if let Some(factor) = self.pending_factor.take() {
            let target = factor * (tail.index as f32 + fraction(tail.offset, tail.extent));
            self.pos_index = (target.floor() as usize).min(count - 1);
            let e = self.extent(cx, pool, self.pos_index)?;
            self.pos_offset = ((target - self.pos_index as f32) * e).round();
        }
        self.pos_index = self.pos_index.min(count - 1);
        while self.pos_offset < 0.0 && self.pos_index > 0 {
            self.pos_index -= 1;
            self.pos_offset += self.extent(cx, pool, self.pos_index)?;
        }
        if self.pos_offset < 0.0 {
            self.pos_offset = 0.0;
        }
        // An item starting exactly at the edge stays first even if it is
        // empty; empty items inside the scrolled-off part are passed over.
        loop {
            let e = self.extent(cx, pool, self.pos_index)?;
            if self.pos_offset <= 0.0 || self.pos_offset < e || self.pos_index + 1 >= count {
                break;
            }
            self.pos_offset -= e;
            self.pos_index += 1;
        }
        if (self.pos_index, self.pos_offset) > (tail.index, tail.offset) {
            self.pos_index = tail.index;
            self.pos_offset = tail.offset;
        }
        Ok(())
    }
}

/// `part / whole`, or zero for an empty whole.
fn fraction(part: f32, whole: f32) -> f32 {
    if whole > 0.0 { part / whole } else { 0.0 }
}

impl Widget for List {
    fn measure(&self, quotum: Vec2, _cx: &MeasureCx<'_>) -> Result<Vec2> {
        Ok(quotum.clamp_bottom())
    }

    fn on_resize(&mut self, _size: Vec2) {
        self.tail = None;
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let mut pool: HashMap<usize, NodeId> = HashMap::new();
        if self.reset {
            self.reset = false;
            for (_, node) in self.items.drain(..) {
                cx.remove_child_quiet(node)?;
            }
        } else {
            pool.extend(self.items.drain(..));
        }

        let count = self.provider.as_ref().map_or(0, |p| p.count());
        let size = cx.size();
        let long = self.axis;
        let trans = long.other();
        let mut kept = Vec::new();

        if count > 0 {
            let tail = match self.tail {
                Some(t) => t,
                None => {
                    let t = self.compute_tail(cx, &mut pool, count)?;
                    self.tail = Some(t);
                    t
                }
            };
            self.normalize(cx, &mut pool, count, tail)?;

            let mut pos = -self.pos_offset;
            let mut index = self.pos_index;
            while index < count && pos < size[long] {
                let Some(node) = self.node_for(cx, &mut pool, index)? else {
                    break;
                };
                pool.remove(&index);
                let d = self.item_size(&cx.measure_cx(), node, size)?;
                if index == self.pos_index {
                    self.first_extent = d[long];
                }
                let lp = cx.lp(node)?;
                let across = lp.align_on(trans).offset(d[trans], size[trans]).round();
                cx.resize(node, d)?;
                cx.move_to(node, Vec2::from_axes(long, pos.round(), across))?;
                kept.push((index, node));
                pos += d[long];
                index += 1;
            }
        }

        for (index, node) in pool {
            let widget = cx.remove_child_quiet(node)?;
            if let Some(p) = self.provider.as_mut() {
                p.recycle(index, widget);
            }
        }
        cx.reorder_children(kept.iter().map(|k| k.1).collect())?;
        self.items = kept;
        Ok(())
    }

    fn clips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::testing::Leaf;

    /// Items of a fixed height that count recycled widgets.
    struct Rows {
        /// Number of items.
        count: usize,
        /// Height of each item.
        height: f32,
        /// Items handed back so far.
        recycled: Rc<Cell<usize>>,
    }

    impl ItemsProvider for Rows {
        fn count(&self) -> usize {
            self.count
        }

        fn widget(&mut self, _index: usize) -> Box<dyn Widget> {
            Box::new(Leaf::new(10.0, self.height))
        }

        fn lp(&self, _index: usize) -> Lp {
            Lp::min().dx(Dim::Max)
        }

        fn recycle(&mut self, _index: usize, _widget: Box<dyn Widget>) {
            self.recycled.set(self.recycled.get() + 1);
        }
    }

    fn setup(count: usize) -> Result<(Tree, NodeId, Rc<Cell<usize>>)> {
        let recycled = Rc::new(Cell::new(0));
        let mut tree = Tree::new();
        let root = tree.root_id();
        let list = List::vertical().with_provider(Rows {
            count,
            height: 20.0,
            recycled: recycled.clone(),
        });
        let id = tree.add_child(root, list, Lp::fill())?.id();
        tree.set_viewport(Vec2::new(100.0, 50.0))?;
        Ok((tree, id, recycled))
    }

    #[test]
    fn materializes_visible_only() -> Result<()> {
        let (tree, list, _) = setup(100)?;
        let l = tree.widget_ref::<List>(list)?;
        assert_eq!(l.visible_items(), vec![0, 1, 2]);
        assert_eq!(tree.children_of(list).len(), 3);
        let third = tree.children_of(list)[2];
        assert_eq!(tree.rect(third)?.pos, Vec2::new(0.0, 40.0));
        assert_eq!(tree.rect(third)?.size, Vec2::new(100.0, 20.0));
        Ok(())
    }

    #[test]
    fn scrolling_recycles() -> Result<()> {
        let (mut tree, list, recycled) = setup(100)?;
        let before = recycled.get();
        List::scroll_by(&mut tree, list, 45.0)?;
        tree.lay_out_dirty()?;
        let l = tree.widget_ref::<List>(list)?;
        assert_eq!(l.position(), (2, 5.0));
        assert_eq!(l.visible_items(), vec![2, 3, 4]);
        assert_eq!(recycled.get(), before + 2);
        Ok(())
    }

    #[test]
    fn clamps_to_tail() -> Result<()> {
        let (mut tree, list, _) = setup(10)?;
        List::scroll_by(&mut tree, list, 10_000.0)?;
        tree.lay_out_dirty()?;
        let l = tree.widget_ref::<List>(list)?;
        // 10 items of 20px in 50px: the last screenful starts 10px into item 7.
        assert_eq!(l.position(), (7, 10.0));
        assert_eq!(l.scroll_factor(), 1.0);

        List::set_scroll_factor(&mut tree, list, 0.0)?;
        tree.lay_out_dirty()?;
        assert_eq!(tree.widget_ref::<List>(list)?.position(), (0, 0.0));
        Ok(())
    }

    /// Two empty items followed by 20px rows.
    struct Gaps;

    impl ItemsProvider for Gaps {
        fn count(&self) -> usize {
            10
        }

        fn widget(&mut self, index: usize) -> Box<dyn Widget> {
            let h = if index < 2 { 0.0 } else { 20.0 };
            Box::new(Leaf::new(10.0, h))
        }

        fn lp(&self, _index: usize) -> Lp {
            Lp::min().dx(Dim::Max)
        }
    }

    #[test]
    fn empty_items_at_the_edge_stay_first() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let list = tree
            .add_child(root, List::vertical().with_provider(Gaps), Lp::fill())?
            .id();
        tree.set_viewport(Vec2::new(100.0, 50.0))?;
        let l = tree.widget_ref::<List>(list)?;
        assert_eq!(l.position(), (0, 0.0));
        assert_eq!(l.visible_items(), vec![0, 1, 2, 3, 4]);

        List::scroll_by(&mut tree, list, 25.0)?;
        tree.lay_out_dirty()?;
        assert_eq!(tree.widget_ref::<List>(list)?.position(), (3, 5.0));
        Ok(())
    }

    #[test]
    fn data_set_changed_rebuilds() -> Result<()> {
        let (mut tree, list, _) = setup(2)?;
        let seen = Rc::new(Cell::new(None));
        let s = seen.clone();
        tree.with_widget(list, |l: &mut List, _| {
            l.data_set_changed = Some(Box::new(move |n| s.set(Some(n))));
        })?;
        let old = tree.children_of(list).to_vec();
        List::notify_data_set_changed(&mut tree, list)?;
        assert_eq!(seen.get(), Some(2));
        tree.lay_out_dirty()?;
        let new = tree.children_of(list).to_vec();
        assert_eq!(new.len(), 2);
        assert!(old.iter().all(|o| !tree.contains(*o)));
        Ok(())
    }
}
