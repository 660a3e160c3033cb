//! Widget trait and capability tags.

use std::any::{Any, type_name};

use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::{Sides, Vec2},
};

/// Capability tag a widget advertises to its parent.
///
/// Specialized containers accept only children of a given kind; the check
/// happens when the child is inserted rather than when it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Role {
    /// No special capability.
    #[default]
    Plain,
    /// A tab in a tab strip. Adjacent tabs overlap by their shared border.
    Tab {
        /// Nine-patch borders of the tab.
        borders: Sides,
    },
    /// A row of a table.
    TableRow,
}

impl Role {
    /// The tag without payload.
    pub fn kind(&self) -> RoleKind {
        match self {
            Self::Plain => RoleKind::Plain,
            Self::Tab { .. } => RoleKind::Tab,
            Self::TableRow => RoleKind::TableRow,
        }
    }
}

/// Payload-free variant of [`Role`], used to state what a container accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// No special capability.
    Plain,
    /// A tab.
    Tab,
    /// A table row.
    TableRow,
}

/// Widgets are the behavior attached to nodes in the tree arena.
///
/// Geometry, visibility and tree structure live on the node; a widget only
/// supplies the hooks below. Leaves usually implement `measure`; containers
/// implement both `measure` and `lay_out`, normally by delegating to a
/// [`Layout`](crate::layout::Layout) strategy.
pub trait Widget: Any {
    /// Desired size for an available-space hint. A negative quotum component
    /// means the axis is unconstrained.
    ///
    /// The default returns the quotum, with unconstrained axes at zero.
    fn measure(&self, quotum: Vec2, _cx: &MeasureCx<'_>) -> Result<Vec2> {
        Ok(quotum.clamp_bottom())
    }

    /// Size and position children. The node's own size is already resolved.
    fn lay_out(&mut self, _cx: &mut LayoutCx<'_>) -> Result<()> {
        Ok(())
    }

    /// Called when the node's size changes, before `lay_out`.
    fn on_resize(&mut self, _size: Vec2) {}

    /// Called when the widget becomes the visible page of a book.
    fn on_show(&mut self) {}

    /// Called when the widget stops being the visible page of a book.
    fn on_hide(&mut self) {}

    /// Called when the effective enabled state of the node changes.
    fn on_enable_change(&mut self, _enabled: bool) {}

    /// Capability tag advertised to the parent.
    fn role(&self) -> Role {
        Role::Plain
    }

    /// Kind of children this widget accepts. `None` accepts anything.
    fn accepts(&self) -> Option<RoleKind> {
        None
    }

    /// Can the widget take keyboard focus?
    fn focusable(&self) -> bool {
        false
    }

    /// Should rendering of children be clipped to this widget's rect?
    fn clips(&self) -> bool {
        false
    }

    /// Short kind name used in dumps and errors.
    fn kind(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
