//! A stack of pages of which exactly one is shown.

use std::fmt;

use tracing::debug;

use crate::{
    core::{
        context::{LayoutCx, MeasureCx},
        id::{NodeId, TypedId},
        tree::Tree,
    },
    error::{Error, Result},
    geom::Vec2,
    layout::{Layout, Lp, PileLayout},
    widget::Widget,
};

/// A change in a book's page set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagesChange {
    /// A page was pushed.
    Pushed(NodeId),
    /// A page was torn out.
    TornOut(NodeId),
}

/// Handler notified after every push and tear-out.
pub type PagesChangeHandler = Box<dyn FnMut(&PagesChange)>;

/// A pile of pages. Pages are the book node's children; all but the active
/// one are hidden.
///
/// Page operations are associated functions taking the tree, since they
/// restructure the book's children and call hooks on the pages.
#[derive(Default)]
pub struct Book {
    /// Index of the shown page.
    active: Option<usize>,
    /// Notified after pages are pushed or torn out.
    pub pages_change_handler: Option<PagesChangeHandler>,
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Book {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the shown page.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Fetch the active index of a book node.
    fn active_of(tree: &Tree, book: NodeId) -> Result<Option<usize>> {
        Ok(tree.widget_ref::<Self>(book)?.active)
    }

    /// Set the active index of a book node.
    fn set_active(tree: &mut Tree, book: NodeId, active: Option<usize>) -> Result<()> {
        tree.with_widget(book, |b: &mut Self, _| b.active = active)
    }

    /// Call the pages change handler.
    fn notify(tree: &mut Tree, book: NodeId, change: PagesChange) -> Result<()> {
        tree.with_widget(book, |b: &mut Self, _| {
            if let Some(h) = b.pages_change_handler.as_mut() {
                h(&change);
            }
        })
    }

    /// Hide a page and call its hide hook.
    fn hide(tree: &mut Tree, page: NodeId) -> Result<()> {
        tree.set_hidden(page, true)?;
        tree.with_widget_mut(page, |w, _| w.on_hide())
    }

    /// Show a page and call its show hook.
    fn show(tree: &mut Tree, page: NodeId) -> Result<()> {
        tree.set_hidden(page, false)?;
        tree.with_widget_mut(page, |w, _| w.on_show())
    }

    /// Number of pages.
    pub fn len(tree: &Tree, book: impl Into<NodeId>) -> usize {
        tree.children_of(book).len()
    }

    /// The shown page.
    pub fn active(tree: &Tree, book: impl Into<NodeId>) -> Result<Option<NodeId>> {
        let book = book.into();
        let pages = tree.children_of(book);
        Ok(Self::active_of(tree, book)?.and_then(|i| pages.get(i).copied()))
    }

    /// Position of a page in the book.
    fn index_of(tree: &Tree, book: NodeId, page: NodeId) -> Result<usize> {
        tree.children_of(book)
            .iter()
            .position(|p| *p == page)
            .ok_or_else(|| Error::Structure(format!("{page:?} is not a page of {book:?}")))
    }

    /// Append a detached node as a page and make it the shown page.
    pub fn push(tree: &mut Tree, book: impl Into<NodeId>, page: impl Into<NodeId>) -> Result<()> {
        let book = book.into();
        let page = page.into();
        let previous = Self::active(tree, book)?;
        tree.attach(book, page)?;
        if let Some(prev) = previous {
            Self::hide(tree, prev)?;
        }
        Self::set_active(tree, book, Some(Self::len(tree, book) - 1))?;
        Self::show(tree, page)?;
        debug!(?book, ?page, "page pushed");
        Self::notify(tree, book, PagesChange::Pushed(page))
    }

    /// Create a page widget filling the book and push it.
    pub fn push_widget<W>(tree: &mut Tree, book: impl Into<NodeId>, page: W) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        let id = tree.create_detached(page, Lp::fill());
        Self::push(tree, book, id)?;
        Ok(id)
    }

    /// Show the page at `index`.
    pub fn go_to(tree: &mut Tree, book: impl Into<NodeId>, index: usize) -> Result<()> {
        let book = book.into();
        let pages = tree.children_of(book).to_vec();
        let Some(&next) = pages.get(index) else {
            return Err(Error::PageIndex {
                index,
                len: pages.len(),
            });
        };
        let current = Self::active_of(tree, book)?;
        if current == Some(index) {
            return Ok(());
        }
        if let Some(prev) = current.and_then(|i| pages.get(i).copied()) {
            Self::hide(tree, prev)?;
        }
        Self::set_active(tree, book, Some(index))?;
        Self::show(tree, next)?;
        debug!(?book, index, "page shown");
        Ok(())
    }

    /// Show a specific page.
    pub fn go_to_page(tree: &mut Tree, book: impl Into<NodeId>, page: impl Into<NodeId>) -> Result<()> {
        let book = book.into();
        let index = Self::index_of(tree, book, page.into())?;
        Self::go_to(tree, book, index)
    }

    /// Detach a page from the book and return it.
    ///
    /// If the page was shown, the page before it is shown instead, or the new
    /// first page if it was the first. The torn page's hide hook is not
    /// called.
    pub fn tear_out(tree: &mut Tree, book: impl Into<NodeId>, page: impl Into<NodeId>) -> Result<NodeId> {
        let book = book.into();
        let page = page.into();
        let index = Self::index_of(tree, book, page)?;
        let active = Self::active_of(tree, book)?;
        tree.detach(page)?;
        tree.set_hidden(page, false)?;

        let remaining = Self::len(tree, book);
        let next_active = match active {
            Some(a) if a == index => {
                let replacement = if index > 0 {
                    Some(index - 1)
                } else if remaining > 0 {
                    Some(0)
                } else {
                    None
                };
                Self::set_active(tree, book, replacement)?;
                if let Some(shown) = replacement.and_then(|r| tree.children_of(book).get(r).copied()) {
                    Self::show(tree, shown)?;
                }
                replacement
            }
            Some(a) if a > index => {
                Self::set_active(tree, book, Some(a - 1))?;
                Some(a - 1)
            }
            other => other,
        };
        debug!(?book, ?page, ?next_active, "page torn out");
        Self::notify(tree, book, PagesChange::TornOut(page))?;
        Ok(page)
    }

    /// Tear a page out of whatever book holds it.
    pub fn tear_out_page(tree: &mut Tree, page: impl Into<NodeId>) -> Result<NodeId> {
        let page = page.into();
        let book = tree
            .parent_of(page)
            .ok_or_else(|| Error::Structure(format!("{page:?} is not in a book")))?;
        tree.widget_ref::<Self>(book)?;
        Self::tear_out(tree, book, page)
    }

    /// Tear a page out and destroy it.
    pub fn close(tree: &mut Tree, book: impl Into<NodeId>, page: impl Into<NodeId>) -> Result<()> {
        let page = Self::tear_out(tree, book, page)?;
        tree.remove_subtree(page)?;
        Ok(())
    }
}

impl Widget for Book {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        PileLayout.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        PileLayout.lay_out(cx)
    }
}
