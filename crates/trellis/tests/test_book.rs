//! Integration tests for books, tabbed books and tab groups.

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use trellis::{
        NodeId, Tree, Widget,
        error::{Error, Result},
        geom::{Sides, Vec2},
        layout::Lp,
        widgets::{Book, Blank, PagesChange, Tab, TabGroup, TabbedBook},
    };

    /// Show and hide hook counts.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    struct Hooks {
        /// Number of `on_show` calls.
        shows: usize,
        /// Number of `on_hide` calls.
        hides: usize,
    }

    /// A page that counts its show and hide hooks.
    struct Page(Rc<RefCell<Hooks>>);

    impl Widget for Page {
        fn on_show(&mut self) {
            self.0.borrow_mut().shows += 1;
        }

        fn on_hide(&mut self) {
            self.0.borrow_mut().hides += 1;
        }
    }

    fn page(tree: &mut Tree) -> (NodeId, Rc<RefCell<Hooks>>) {
        let hooks = Rc::new(RefCell::new(Hooks::default()));
        let id = tree.create_detached(Page(hooks.clone()), Lp::fill()).id();
        (id, hooks)
    }

    fn book(tree: &mut Tree) -> Result<NodeId> {
        let root = tree.root_id();
        Ok(tree.add_child(root, Book::new(), Lp::fill())?.id())
    }

    #[test]
    fn push_then_tear_out() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let (p1, h1) = page(&mut tree);
        let (p2, h2) = page(&mut tree);

        Book::push(&mut tree, b, p1)?;
        Book::push(&mut tree, b, p2)?;
        assert_eq!(Book::active(&tree, b)?, Some(p2));
        assert!(tree.is_hidden(p1)?);
        assert_eq!(*h1.borrow(), Hooks { shows: 1, hides: 1 });

        assert_eq!(Book::tear_out(&mut tree, b, p2)?, p2);
        assert_eq!(Book::active(&tree, b)?, Some(p1));
        assert!(!tree.is_hidden(p1)?);
        assert_eq!(*h1.borrow(), Hooks { shows: 2, hides: 1 });
        // The torn page does not get a hide hook and stays alive, detached.
        assert_eq!(*h2.borrow(), Hooks { shows: 1, hides: 0 });
        assert!(tree.contains(p2));
        assert_eq!(tree.parent_of(p2), None);
        Ok(())
    }

    #[test]
    fn tear_out_first_and_inactive_pages() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let pages: Vec<NodeId> = (0..3).map(|_| page(&mut tree).0).collect();
        for p in &pages {
            Book::push(&mut tree, b, *p)?;
        }
        Book::go_to(&mut tree, b, 0)?;
        Book::tear_out(&mut tree, b, pages[0])?;
        // The new first page replaces a torn first page.
        assert_eq!(Book::active(&tree, b)?, Some(pages[1]));

        Book::tear_out(&mut tree, b, pages[2])?;
        assert_eq!(Book::active(&tree, b)?, Some(pages[1]));
        Book::tear_out(&mut tree, b, pages[1])?;
        assert_eq!(Book::active(&tree, b)?, None);
        assert_eq!(Book::len(&tree, b), 0);
        Ok(())
    }

    #[test]
    fn active_index_shifts_down() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let pages: Vec<NodeId> = (0..3).map(|_| page(&mut tree).0).collect();
        for p in &pages {
            Book::push(&mut tree, b, *p)?;
        }
        Book::tear_out(&mut tree, b, pages[0])?;
        assert_eq!(tree.widget_ref::<Book>(b)?.active_index(), Some(1));
        assert_eq!(Book::active(&tree, b)?, Some(pages[2]));
        Ok(())
    }

    #[test]
    fn navigation() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let (p1, h1) = page(&mut tree);
        let (p2, h2) = page(&mut tree);
        Book::push(&mut tree, b, p1)?;
        Book::push(&mut tree, b, p2)?;

        assert_eq!(
            Book::go_to(&mut tree, b, 2),
            Err(Error::PageIndex { index: 2, len: 2 })
        );
        // Going to the shown page changes nothing.
        Book::go_to(&mut tree, b, 1)?;
        assert_eq!(*h2.borrow(), Hooks { shows: 1, hides: 0 });

        Book::go_to_page(&mut tree, b, p1)?;
        assert_eq!(*h1.borrow(), Hooks { shows: 2, hides: 1 });
        assert_eq!(*h2.borrow(), Hooks { shows: 1, hides: 1 });

        let stranger = tree.create_detached(Blank, Lp::min()).id();
        assert!(matches!(
            Book::go_to_page(&mut tree, b, stranger),
            Err(Error::Structure(_))
        ));
        Ok(())
    }

    #[test]
    fn change_notifications_and_close() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        tree.with_widget(b, |book: &mut Book, _| {
            book.pages_change_handler = Some(Box::new(move |c: &PagesChange| s.borrow_mut().push(*c)));
        })?;
        let (p1, _) = page(&mut tree);
        Book::push(&mut tree, b, p1)?;
        Book::close(&mut tree, b, p1)?;
        assert!(!tree.contains(p1));
        assert_eq!(
            *seen.borrow(),
            vec![PagesChange::Pushed(p1), PagesChange::TornOut(p1)]
        );
        Ok(())
    }

    #[test]
    fn page_tears_itself_out() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let p = Book::push_widget(&mut tree, b, Blank)?;
        assert_eq!(Book::tear_out_page(&mut tree, p)?, p.id());
        assert_eq!(Book::len(&tree, b), 0);
        let root = tree.root_id();
        let loose = tree.add_child(root, Blank, Lp::min())?;
        assert!(matches!(
            Book::tear_out_page(&mut tree, loose),
            Err(Error::Structure(_))
        ));
        Ok(())
    }

    #[test]
    fn pages_fill_the_book() -> Result<()> {
        let mut tree = Tree::new();
        let b = book(&mut tree)?;
        let p = Book::push_widget(&mut tree, b, Blank)?;
        tree.set_viewport(Vec2::new(64.0, 48.0))?;
        assert_eq!(tree.rect(p)?.size, Vec2::new(64.0, 48.0));
        let order: Vec<NodeId> = tree.render_order(b)?.into_iter().map(|r| r.0).collect();
        assert_eq!(order, vec![b, p.id()]);
        Ok(())
    }

    #[test]
    fn tab_group_is_exclusive() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let g = tree.add_child(root, TabGroup::new(), Lp::min())?;
        let a = tree.add_child(g, Tab::new(Sides::splat(2.0)), Lp::min())?;
        let c = tree.add_child(g, Tab::new(Sides::splat(2.0)), Lp::min())?;
        TabGroup::click(&mut tree, g, a)?;
        TabGroup::click(&mut tree, g, c)?;
        assert!(!tree.widget_ref::<Tab>(a)?.is_checked());
        assert!(tree.widget_ref::<Tab>(c)?.is_checked());
        // Clicking the checked tab keeps it checked.
        TabGroup::click(&mut tree, g, c)?;
        assert!(tree.widget_ref::<Tab>(c)?.is_checked());
        assert_eq!(TabGroup::paint_order(&tree, g)?, vec![a.id(), c.id()]);
        TabGroup::activate(&mut tree, g, a)?;
        assert_eq!(TabGroup::paint_order(&tree, g)?, vec![c.id(), a.id()]);
        Ok(())
    }

    #[test]
    fn tabbed_book_pairs_tabs_and_pages() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let tb = TabbedBook::create(&mut tree, root, Lp::fill())?;
        let (book, group) = {
            let w = tree.widget_ref::<TabbedBook>(tb)?;
            (w.book(), w.group())
        };
        let (p1, _) = page(&mut tree);
        let (p2, _) = page(&mut tree);
        let t1 = TabbedBook::add(&mut tree, tb, Tab::new(Sides::splat(2.0)), p1)?;
        let t2 = TabbedBook::add(&mut tree, tb, Tab::new(Sides::splat(2.0)), p2)?;
        assert_eq!(Book::active(&tree, book)?, Some(p2));
        assert_eq!(tree.widget_ref::<TabGroup>(group)?.active(), Some(t2));

        TabbedBook::activate(&mut tree, tb, t1)?;
        assert_eq!(Book::active(&tree, book)?, Some(p1));
        assert!(tree.widget_ref::<Tab>(t1)?.is_checked());

        TabbedBook::activate(&mut tree, tb, t2)?;
        assert_eq!(TabbedBook::tear_out(&mut tree, tb, t2)?, p2);
        assert!(!tree.contains(t2));
        assert_eq!(Book::active(&tree, book)?, Some(p1));
        assert_eq!(tree.widget_ref::<TabGroup>(group)?.active(), Some(t1));
        assert_eq!(tree.widget_ref::<TabbedBook>(tb)?.tab_for(p1), Some(t1));

        tree.set_viewport(Vec2::new(200.0, 100.0))?;
        assert_eq!(tree.rect(group)?.size, Vec2::new(200.0, 4.0));
        assert_eq!(tree.rect(book)?.pos.y, 4.0);
        assert_eq!(tree.rect(p1)?.size, Vec2::new(200.0, 96.0));
        Ok(())
    }

    #[test]
    fn clicking_a_tab_shows_its_page() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let tb = TabbedBook::create(&mut tree, root, Lp::fill())?;
        let (book, group) = {
            let w = tree.widget_ref::<TabbedBook>(tb)?;
            (w.book(), w.group())
        };
        let (p1, h1) = page(&mut tree);
        let (p2, _) = page(&mut tree);
        let t1 = TabbedBook::add(&mut tree, tb, Tab::new(Sides::splat(2.0)), p1)?;
        TabbedBook::add(&mut tree, tb, Tab::new(Sides::splat(2.0)), p2)?;
        assert_eq!(Book::active(&tree, book)?, Some(p2));

        TabGroup::click(&mut tree, group, t1)?;
        assert_eq!(tree.widget_ref::<TabGroup>(group)?.active(), Some(t1));
        assert_eq!(Book::active(&tree, book)?, Some(p1));
        assert_eq!(h1.borrow().shows, 2);

        // Clicking the checked tab again leaves the book alone.
        TabGroup::click(&mut tree, group, t1)?;
        assert_eq!(h1.borrow().shows, 2);
        Ok(())
    }

    #[test]
    fn failed_add_leaves_no_tab() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let tb = TabbedBook::create(&mut tree, root, Lp::fill())?;
        let group = tree.widget_ref::<TabbedBook>(tb)?.group();
        let elsewhere = book(&mut tree)?;
        let (p, _) = page(&mut tree);
        Book::push(&mut tree, elsewhere, p)?;

        assert_eq!(
            TabbedBook::add(&mut tree, tb, Tab::new(Sides::splat(2.0)), p),
            Err(Error::AlreadyAttached(p))
        );
        assert!(tree.children_of(group).is_empty());
        assert_eq!(tree.widget_ref::<TabGroup>(group)?.active(), None);
        assert_eq!(tree.parent_of(p), Some(elsewhere));
        Ok(())
    }
}
