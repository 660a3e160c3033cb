use tracing::debug;

use super::{Book, Tab, TabGroup};
use crate::{
    core::{
        context::{LayoutCx, MeasureCx},
        id::{NodeId, TypedId},
        tree::Tree,
    },
    error::{Error, Result},
    geom::Vec2,
    layout::{Dim, Layout, LinearLayout, Lp},
    widget::Widget,
};

/// A tab strip above a book, with one tab per page.
#[derive(Debug)]
pub struct TabbedBook {
    /// The tab strip.
    group: NodeId,
    /// The page stack.
    book: NodeId,
    /// Tab and page pairs.
    pairs: Vec<(NodeId, NodeId)>,
}

impl TabbedBook {
    /// Create a tabbed book as the last child of `parent`.
    pub fn create(tree: &mut Tree, parent: impl Into<NodeId>, lp: Lp) -> Result<TypedId<Self>> {
        let group = tree.create_detached(TabGroup::new(), Lp::min().dx(Dim::Max));
        let book = tree.create_detached(Book::new(), Lp::fill());
        let tb = tree.add_child(
            parent,
            Self {
                group: group.id(),
                book: book.id(),
                pairs: Vec::new(),
            },
            lp,
        )?;
        tree.attach(tb, group)?;
        tree.attach(tb, book)?;
        let owner = tb.id();
        tree.with_widget(group, |g: &mut TabGroup, _| {
            g.on_change = Some(Box::new(move |tree: &mut Tree, tab: NodeId| {
                Self::follow_tab(tree, owner, tab)
            }));
        })?;
        Ok(tb)
    }

    /// Show the page paired with a tab the group just checked. Tabs without
    /// a page yet are ignored.
    fn follow_tab(tree: &mut Tree, tb: NodeId, tab: NodeId) -> Result<()> {
        let w = tree.widget_ref::<Self>(tb)?;
        let book = w.book;
        match w.page_for(tab) {
            Some(page) => Book::go_to_page(tree, book, page),
            None => Ok(()),
        }
    }

    /// The tab strip node.
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// The book node.
    pub fn book(&self) -> NodeId {
        self.book
    }

    /// Page belonging to a tab.
    pub fn page_for(&self, tab: NodeId) -> Option<NodeId> {
        self.pairs.iter().find(|p| p.0 == tab).map(|p| p.1)
    }

    /// Tab belonging to a page.
    pub fn tab_for(&self, page: NodeId) -> Option<NodeId> {
        self.pairs.iter().find(|p| p.1 == page).map(|p| p.0)
    }

    /// Add a tab and its detached page, and activate them. If the page can't
    /// be pushed the tab is removed again.
    pub fn add(
        tree: &mut Tree,
        tb: impl Into<NodeId>,
        tab: Tab,
        page: impl Into<NodeId>,
    ) -> Result<NodeId> {
        let tb = tb.into();
        let page = page.into();
        let (group, book) = {
            let w = tree.widget_ref::<Self>(tb)?;
            (w.group, w.book)
        };
        let tab = tree.add_child(group, tab, Lp::min())?.id();
        if let Err(e) = Book::push(tree, book, page) {
            tree.remove_subtree(tab)?;
            return Err(e);
        }
        tree.with_widget(tb, |w: &mut Self, _| w.pairs.push((tab, page)))?;
        TabGroup::activate(tree, group, tab)?;
        Ok(tab)
    }

    /// Check a tab and show its page.
    pub fn activate(tree: &mut Tree, tb: impl Into<NodeId>, tab: impl Into<NodeId>) -> Result<()> {
        let tb = tb.into();
        let tab = tab.into();
        let w = tree.widget_ref::<Self>(tb)?;
        let group = w.group;
        if w.page_for(tab).is_none() {
            return Err(Error::Structure(format!("{tab:?} is not a tab of {tb:?}")));
        }
        TabGroup::activate(tree, group, tab)
    }

    /// Remove a tab and tear out its page, which is returned. The tab of the
    /// page the book shows next becomes the active tab.
    pub fn tear_out(tree: &mut Tree, tb: impl Into<NodeId>, tab: impl Into<NodeId>) -> Result<NodeId> {
        let tb = tb.into();
        let tab = tab.into();
        let w = tree.widget_ref::<Self>(tb)?;
        let (group, book) = (w.group, w.book);
        let page = w
            .page_for(tab)
            .ok_or_else(|| Error::Structure(format!("{tab:?} is not a tab of {tb:?}")))?;

        TabGroup::forget(tree, group, tab)?;
        tree.remove_subtree(tab)?;
        tree.with_widget(tb, |w: &mut Self, _| w.pairs.retain(|p| p.0 != tab))?;
        Book::tear_out(tree, book, page)?;

        let next_tab = Book::active(tree, book)?
            .and_then(|p| tree.widget_ref::<Self>(tb).ok()?.tab_for(p));
        if let Some(next) = next_tab {
            TabGroup::activate(tree, group, next)?;
        }
        debug!(?tab, ?page, ?next_tab, "tab torn out");
        Ok(page)
    }
}

impl Widget for TabbedBook {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        LinearLayout::column().measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        LinearLayout::column().lay_out(cx)
    }
}
