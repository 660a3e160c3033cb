use trellis::{
    Inflater, Tree,
    dump::dump_table,
    error::{Error, Result},
    geom::{Sides, Vec2},
    layout::Lp,
    widgets::{Blank, Book, Tab, TabbedBook},
};
use tracing::info;

/// Page chrome around the tabbed book.
const SHELL: &str = r#"{
    "kind": "column",
    "name": "shell",
    "lp": {"dx": "fill", "dy": "fill"},
    "children": [
        {"kind": "blank", "name": "title", "lp": {"dx": "max", "dy": "8mm"}},
        {"kind": "container", "name": "body", "lp": {"dx": "max", "dy": "fill", "weight": 1},
         "props": {"clip": true}}
    ]
}"#;

/// Build a tabbed book with `pages` pages, visit every tab, tear out every
/// other one and return a table of the final tree.
pub fn run(pages: usize, size: Vec2) -> Result<String> {
    let mut tree = Tree::new();
    let root = tree.root_id();
    let shell = Inflater::new().inflate_json(&mut tree, root, SHELL)?;
    let body = tree
        .find(shell, "body")
        .ok_or_else(|| Error::Structure("shell has no body".into()))?;
    let tb = TabbedBook::create(&mut tree, body, Lp::fill())?;

    let mut tabs = Vec::with_capacity(pages);
    for i in 0..pages {
        let page = tree.create_detached(Blank, Lp::fill());
        tree.set_name(page, format!("page{i}"))?;
        tabs.push(TabbedBook::add(&mut tree, tb, Tab::new(Sides::new(4.0, 2.0, 4.0, 0.0)), page)?);
    }
    tree.set_viewport(size)?;

    for tab in &tabs {
        TabbedBook::activate(&mut tree, tb, *tab)?;
        tree.lay_out_dirty()?;
    }
    for tab in tabs.iter().step_by(2) {
        let page = TabbedBook::tear_out(&mut tree, tb, *tab)?;
        tree.remove_subtree(page)?;
    }
    tree.lay_out_dirty()?;

    let book = tree.widget_ref::<TabbedBook>(tb)?.book();
    let active = Book::active(&tree, book)?;
    info!(pages = Book::len(&tree, book), ?active, "book gym done");
    dump_table(&tree, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_odd_pages() -> Result<()> {
        let table = run(5, Vec2::new(320.0, 200.0))?;
        assert!(table.contains("page1"));
        assert!(table.contains("page3"));
        assert!(!table.contains("page0"));
        assert!(!table.contains("page4"));
        Ok(())
    }
}
