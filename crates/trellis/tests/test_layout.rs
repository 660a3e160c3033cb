//! Integration tests for layout negotiation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use trellis::{
        MeasureCx, NodeId, Tree, Widget,
        error::{Error, Result},
        geom::{Axis, Rect, Sides, Vec2},
        layout::{Align, Dim, Lp, distribute, round_spans},
        widgets::{Container, Tab, TabGroup, TableRow},
    };

    /// A leaf with a natural size.
    struct Fixed(Vec2);

    impl Widget for Fixed {
        fn measure(&self, quotum: Vec2, _cx: &MeasureCx<'_>) -> Result<Vec2> {
            let mut out = self.0;
            for axis in Axis::ALL {
                if quotum[axis] >= 0.0 {
                    out[axis] = quotum[axis];
                }
            }
            Ok(out)
        }
    }

    fn fixed(w: f32, h: f32) -> Fixed {
        Fixed(Vec2::new(w, h))
    }

    #[test]
    fn row_of_fixed_and_fills() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let row = tree.add_child(root, Container::row(), Lp::fill())?;
        let a = tree.add_child(row, fixed(0.0, 0.0), Lp::min().dx(Dim::px(50.0)))?;
        let b = tree.add_child(row, fixed(0.0, 0.0), Lp::min().dx(Dim::Fill).weight(1.0))?;
        let c = tree.add_child(row, fixed(0.0, 0.0), Lp::min().dx(Dim::Fill).weight(2.0))?;
        tree.set_viewport(Vec2::new(300.0, 10.0))?;

        let spans: Vec<(f32, f32)> = [a.id(), b.id(), c.id()]
            .iter()
            .map(|n| tree.rect(*n).map(|r| (r.pos.x, r.size.x)))
            .collect::<Result<_>>()?;
        assert_eq!(spans, vec![(0.0, 50.0), (50.0, 83.0), (133.0, 167.0)]);
        Ok(())
    }

    #[test]
    fn linear_sums_and_pile_maxes() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let col = tree.add_child(root, Container::column(), Lp::min())?;
        let pile = tree.add_child(root, Container::pile(), Lp::min())?;
        for (w, h) in [(10.0, 5.0), (30.0, 7.0), (20.0, 9.0)] {
            tree.add_child(col, fixed(w, h), Lp::min())?;
            tree.add_child(pile, fixed(w, h), Lp::min())?;
        }
        let free = Vec2::splat(-1.0);
        assert_eq!(tree.measure(col, free)?, Vec2::new(30.0, 21.0));
        assert_eq!(tree.measure(pile, free)?, Vec2::new(30.0, 9.0));
        // Constrained axes report the quotum.
        assert_eq!(tree.measure(col, Vec2::new(100.0, -1.0))?, Vec2::new(100.0, 21.0));
        Ok(())
    }

    #[test]
    fn empty_container_measures_clamped_quotum() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let row = tree.add_child(root, Container::row(), Lp::min())?;
        assert_eq!(tree.measure(row, Vec2::new(-1.0, 12.0))?, Vec2::new(0.0, 12.0));
        Ok(())
    }

    #[test]
    fn max_on_unconstrained_axis_is_minimum() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let row = tree.add_child(root, Container::row(), Lp::min())?;
        tree.add_child(row, fixed(12.0, 4.0), Lp::min().dx(Dim::Max))?;
        assert_eq!(tree.measure(row, Vec2::splat(-1.0))?, Vec2::new(12.0, 4.0));
        Ok(())
    }

    #[test]
    fn cross_axis_alignment() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let row = tree.add_child(root, Container::row(), Lp::fill())?;
        let centered = tree.add_child(row, fixed(10.0, 10.0), Lp::min())?;
        let bottom = tree.add_child(
            row,
            fixed(10.0, 10.0),
            Lp::min().align(Axis::Y, Align::Back),
        )?;
        let stretched = tree.add_child(row, fixed(10.0, 10.0), Lp::min().dy(Dim::Max))?;
        tree.set_viewport(Vec2::new(100.0, 40.0))?;
        assert_eq!(tree.rect(centered)?, Rect::new(0.0, 15.0, 10.0, 10.0));
        assert_eq!(tree.rect(bottom)?, Rect::new(10.0, 30.0, 10.0, 10.0));
        assert_eq!(tree.rect(stretched)?, Rect::new(20.0, 0.0, 10.0, 40.0));
        Ok(())
    }

    #[test]
    fn tab_strip_overlaps_borders() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let group = tree.add_child(root, TabGroup::new(), Lp::min())?;
        let a = tree.add_child(group, Tab::new(Sides::splat(3.0)), Lp::min())?;
        let b = tree.add_child(group, Tab::new(Sides::splat(3.0)), Lp::min())?;
        assert_eq!(tree.measure(group, Vec2::splat(-1.0))?, Vec2::new(9.0, 6.0));
        tree.set_viewport(Vec2::new(100.0, 100.0))?;
        assert_eq!(tree.rect(a)?.pos.x, 0.0);
        assert_eq!(tree.rect(b)?.pos.x, 3.0);
        assert_eq!(tree.rect(b)?.size, Vec2::new(6.0, 6.0));
        Ok(())
    }

    #[test]
    fn tab_strip_rejects_flexible_tabs() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let group = tree.add_child(root, TabGroup::new(), Lp::min())?;
        tree.add_child(group, Tab::new(Sides::splat(1.0)), Lp::min().dx(Dim::Max))?;
        assert!(matches!(
            tree.measure(group, Vec2::splat(-1.0)),
            Err(Error::Layout(_))
        ));
        assert!(matches!(
            tree.add_child(group, fixed(1.0, 1.0), Lp::min()),
            Err(Error::Structure(_))
        ));
        Ok(())
    }

    #[test]
    fn table_shares_columns() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let table = tree.add_child(root, Container::table(), Lp::min())?;
        let r0 = tree.add_child(table, TableRow::new(), Lp::min())?;
        let r1 = tree.add_child(table, TableRow::new(), Lp::min())?;
        tree.add_child(r0, fixed(10.0, 5.0), Lp::min())?;
        tree.add_child(r0, fixed(20.0, 5.0), Lp::min())?;
        tree.add_child(r1, fixed(15.0, 8.0), Lp::min())?;
        let last = tree.add_child(r1, fixed(5.0, 8.0), Lp::min())?;
        assert!(matches!(
            tree.add_child(table, fixed(1.0, 1.0), Lp::min()),
            Err(Error::Structure(_))
        ));

        assert_eq!(tree.measure(table, Vec2::splat(-1.0))?, Vec2::new(35.0, 13.0));
        tree.set_viewport(Vec2::new(100.0, 100.0))?;
        assert_eq!(tree.rect(r1)?.pos, Vec2::new(0.0, 5.0));
        assert_eq!(tree.rect(r1)?.size, Vec2::new(35.0, 8.0));
        assert_eq!(tree.rect(last)?, Rect::new(15.0, 0.0, 20.0, 8.0));
        assert_eq!(
            tree.widget_ref::<TableRow>(r0)?.columns(),
            &[(0.0, 15.0), (15.0, 20.0)]
        );
        Ok(())
    }

    /// Build a random tree of rows, columns and piles under `parent`.
    fn grow(tree: &mut Tree, rng: &mut StdRng, parent: NodeId, depth: usize) -> Result<()> {
        for _ in 0..rng.random_range(1..4) {
            let dim = match rng.random_range(0..4) {
                0 => Dim::Min,
                1 => Dim::Max,
                2 => Dim::Fill,
                _ => Dim::px(rng.random_range(0..40) as f32),
            };
            let lp = Lp::min().dx(dim).weight(rng.random_range(0..3) as f32);
            if depth == 0 || rng.random_bool(0.4) {
                let leaf = fixed(rng.random_range(0..30) as f32, rng.random_range(0..30) as f32);
                tree.add_child(parent, leaf, lp)?;
            } else {
                let c = match rng.random_range(0..3) {
                    0 => Container::row(),
                    1 => Container::column(),
                    _ => Container::pile(),
                };
                let id = tree.add_child(parent, c, lp)?.id();
                grow(tree, rng, id, depth - 1)?;
            }
        }
        Ok(())
    }

    #[test]
    fn relayout_is_idempotent() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x7e11);
        for _ in 0..20 {
            let mut tree = Tree::new();
            let root = tree.root_id();
            grow(&mut tree, &mut rng, root, 3)?;
            tree.set_viewport(Vec2::new(320.0, 240.0))?;

            let nodes = tree.subtree_pre_order(root);
            let before: Vec<Rect> = nodes.iter().map(|n| tree.rect(*n)).collect::<Result<_>>()?;
            for r in &before {
                assert!(r.size.x >= 0.0 && r.size.y >= 0.0);
            }
            for n in &nodes {
                tree.invalidate_layout(*n);
            }
            tree.lay_out_dirty()?;
            let after: Vec<Rect> = nodes.iter().map(|n| tree.rect(*n)).collect::<Result<_>>()?;
            assert_eq!(before, after);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn distribution_is_proportional(
            remaining in -100.0f32..1000.0,
            weights in prop::collection::vec(0.0f32..5.0, 1..8),
        ) {
            let shares = distribute(remaining, &weights);
            prop_assert_eq!(shares.len(), weights.len());
            prop_assert!(shares.iter().all(|s| *s >= 0.0));
            let total: f32 = weights.iter().sum();
            let sum: f32 = shares.iter().sum();
            if remaining > 0.0 && total > 0.0 {
                prop_assert!((sum - remaining).abs() < 0.01 * remaining.max(1.0));
                for (s, w) in shares.iter().zip(&weights) {
                    prop_assert!((s - remaining * w / total).abs() < 0.01);
                }
            } else {
                prop_assert_eq!(sum, 0.0);
            }
        }

        #[test]
        fn spans_are_contiguous(extents in prop::collection::vec(0.0f32..200.0, 0..10)) {
            let spans = round_spans(&extents);
            let mut pos = 0.0;
            for (start, len) in &spans {
                prop_assert_eq!(*start, pos);
                prop_assert!(*len >= 0.0);
                prop_assert_eq!(len.fract(), 0.0);
                pos += len;
            }
            let total: f32 = extents.iter().sum();
            prop_assert_eq!(pos, total.round());
        }
    }
}
