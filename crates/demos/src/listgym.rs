use trellis::{
    Tree, Widget,
    error::{Error, Result},
    geom::Vec2,
    layout::{Dim, Lp},
    widgets::{Blank, ItemsProvider, List},
};

/// Rows of alternating heights.
#[derive(Debug, Default)]
pub struct Rows {
    /// Number of rows.
    pub count: usize,
    /// Widgets handed back so far.
    pub recycled: usize,
}

impl ItemsProvider for Rows {
    fn count(&self) -> usize {
        self.count
    }

    fn widget(&mut self, _index: usize) -> Box<dyn Widget> {
        Box::new(Blank)
    }

    fn lp(&self, index: usize) -> Lp {
        let h = if index % 3 == 0 { 24.0 } else { 16.0 };
        Lp::min().dx(Dim::Max).dy(Dim::px(h))
    }

    fn recycle(&mut self, _index: usize, _widget: Box<dyn Widget>) {
        self.recycled += 1;
    }
}

/// One line per scroll step: position, scroll factor and visible items.
pub fn run(items: usize, step: f32, size: Vec2) -> Result<Vec<String>> {
    let mut tree = Tree::new();
    let root = tree.root_id();
    let list = tree.add_child(
        root,
        List::vertical().with_provider(Rows {
            count: items,
            recycled: 0,
        }),
        Lp::fill(),
    )?;
    tree.set_viewport(size)?;

    let mut out = Vec::new();
    let mut last = None;
    loop {
        let l = tree.widget_ref::<List>(list)?;
        let pos = l.position();
        out.push(format!(
            "{:>4} +{:<4} {:>5.2} {:?}",
            pos.0,
            pos.1,
            l.scroll_factor(),
            l.visible_items()
        ));
        if last == Some(pos) {
            break;
        }
        if out.len() > items * 64 {
            return Err(Error::Internal("list never reached its end".into()));
        }
        last = Some(pos);
        List::scroll_by(&mut tree, list, step)?;
        tree.lay_out_dirty()?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolls_to_the_end() -> Result<()> {
        let lines = run(30, 40.0, Vec2::new(100.0, 90.0))?;
        let last = lines.last().ok_or(Error::Internal("no output".into()))?;
        assert!(last.contains("1.00"));
        assert!(last.contains("29]"));
        Ok(())
    }
}
