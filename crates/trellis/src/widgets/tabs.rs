use std::fmt;

use tracing::debug;

use super::NinePatchToggle;
use crate::{
    core::{
        context::{LayoutCx, MeasureCx},
        id::NodeId,
        tree::Tree,
    },
    error::{Error, Result},
    geom::{Sides, Vec2},
    layout::{Layout, TabStripLayout},
    widget::{Role, RoleKind, Widget},
};

/// A tab: a nine-patch toggle that advertises its borders to the tab strip.
#[derive(Debug, Default)]
pub struct Tab {
    /// Press, toggle and look state.
    pub button: NinePatchToggle,
}

impl Tab {
    /// A tab with the given border widths.
    pub fn new(borders: Sides) -> Self {
        Self {
            button: NinePatchToggle::new(borders),
        }
    }

    /// Is this the selected tab?
    pub fn is_checked(&self) -> bool {
        self.button.is_checked()
    }
}

impl Widget for Tab {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        self.button.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        self.button.lay_out(cx)
    }

    fn on_resize(&mut self, size: Vec2) {
        self.button.on_resize(size);
    }

    fn role(&self) -> Role {
        Role::Tab {
            borders: self.button.look.borders(),
        }
    }

    fn focusable(&self) -> bool {
        true
    }
}

/// Handler told which tab a group just checked. It runs with the tree
/// available, after every tab's state is updated.
pub type TabChangeHandler = Box<dyn FnMut(&mut Tree, NodeId) -> Result<()>>;

/// A strip of tabs of which at most one is checked.
#[derive(Default)]
pub struct TabGroup {
    /// The checked tab.
    active: Option<NodeId>,
    /// Called after a tab is checked, by a click or by `activate`.
    pub on_change: Option<TabChangeHandler>,
}

impl fmt::Debug for TabGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabGroup")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl TabGroup {
    /// An empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// The checked tab.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Check `tab` and uncheck every other tab in the group.
    pub fn activate(tree: &mut Tree, group: impl Into<NodeId>, tab: impl Into<NodeId>) -> Result<()> {
        let group = group.into();
        let tab = tab.into();
        if tree.parent_of(tab) != Some(group) {
            return Err(Error::Structure(format!("{tab:?} is not a tab of {group:?}")));
        }
        for c in tree.children_of(group).to_vec() {
            tree.with_widget(c, |t: &mut Tab, _| t.button.toggle.set_checked(c == tab))?;
        }
        let handler = tree.with_widget(group, |g: &mut Self, _| {
            g.active = Some(tab);
            g.on_change.take()
        })?;
        debug!(?group, ?tab, "tab activated");
        let Some(mut handler) = handler else {
            return Ok(());
        };
        let out = handler(tree, tab);
        // The handler may have replaced itself or removed the group.
        if tree.contains(group) {
            tree.with_widget(group, |g: &mut Self, _| {
                g.on_change.get_or_insert(handler);
            })?;
        }
        out
    }

    /// Press and release a tab, as a click would. The group keeps exactly
    /// that tab checked even if it already was.
    pub fn click(tree: &mut Tree, group: impl Into<NodeId>, tab: impl Into<NodeId>) -> Result<()> {
        let tab = tab.into();
        tree.with_widget(tab, |t: &mut Tab, _| t.button.click())?;
        Self::activate(tree, group, tab)
    }

    /// Forget the checked tab if it is `tab`.
    pub(crate) fn forget(tree: &mut Tree, group: NodeId, tab: NodeId) -> Result<()> {
        tree.with_widget(group, |g: &mut Self, _| {
            if g.active == Some(tab) {
                g.active = None;
            }
        })
    }

    /// Tabs in paint order: the checked tab last so it overlaps its
    /// neighbours.
    pub fn paint_order(tree: &Tree, group: impl Into<NodeId>) -> Result<Vec<NodeId>> {
        let group = group.into();
        let active = tree.widget_ref::<Self>(group)?.active;
        let mut out: Vec<NodeId> = tree
            .visible_children(group)
            .into_iter()
            .filter(|c| Some(*c) != active)
            .collect();
        out.extend(active.filter(|a| tree.parent_of(*a) == Some(group)));
        Ok(out)
    }
}

impl Widget for TabGroup {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        TabStripLayout.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        TabStripLayout.lay_out(cx)
    }

    fn accepts(&self) -> Option<RoleKind> {
        Some(RoleKind::Tab)
    }
}
