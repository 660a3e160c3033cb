use crate::{
    core::id::NodeId,
    geom::Rect,
    layout::Lp,
    widget::{Role, RoleKind, Widget},
};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. `None` while one of the widget's own hooks runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Widget kind, cached for diagnostics.
    pub(crate) kind: &'static str,
    /// Capability tag, cached at creation so parents can check it without
    /// borrowing the widget.
    pub(crate) role: Role,
    /// Child kinds this node accepts, cached at creation.
    pub(crate) accepts: Option<RoleKind>,

    /// Parent in the arena tree. A non-owning handle.
    pub(crate) parent: Option<NodeId>,
    /// Owned children, in order.
    pub(crate) children: Vec<NodeId>,

    /// Layout parameters the parent uses to size this node.
    pub(crate) lp: Lp,
    /// Rect relative to the parent's origin.
    pub(crate) rect: Rect,
    /// Set when this node's layout must be recomputed.
    pub(crate) layout_dirty: bool,

    /// Hidden nodes take no space and are skipped by layout.
    pub(crate) hidden: bool,
    /// Disabled nodes (and their descendants) ignore input.
    pub(crate) enabled: bool,
    /// Optional name used for lookups.
    pub(crate) name: Option<String>,
}

impl Node {
    /// Construct a detached node wrapping a widget.
    pub(crate) fn new(widget: Box<dyn Widget>, lp: Lp) -> Self {
        Self {
            kind: widget.kind(),
            role: widget.role(),
            accepts: widget.accepts(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            lp,
            rect: Rect::zero(),
            layout_dirty: true,
            hidden: false,
            enabled: true,
            name: None,
        }
    }

    /// Return the widget kind.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Return the capability tag.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout parameters.
    pub fn lp(&self) -> Lp {
        self.lp
    }

    /// Return the rect relative to the parent.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Return true if the layout needs recomputing.
    pub fn layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Return true if the node is hidden.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Return the node's own enabled flag.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Return the node's name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
