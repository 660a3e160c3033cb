use super::{Dim, Layout, distribute, quotum_for, round_spans};
use crate::{
    core::context::{LayoutCx, MeasureCx},
    core::id::NodeId,
    error::Result,
    geom::{Axis, Vec2},
    widget::RoleKind,
    widgets::TableRow,
};

/// A grid whose children are [`TableRow`]s. Column widths are shared by all
/// rows: each column is as wide as its widest cell, and extra width goes to
/// columns holding weighted cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLayout;

/// Column and row extents gathered in the pre-pass.
#[derive(Debug, Default)]
struct Grid {
    /// Rows in order.
    rows: Vec<NodeId>,
    /// Natural width per column.
    widths: Vec<f32>,
    /// Weight per column: the largest effective weight of its cells.
    col_weights: Vec<f32>,
}

impl TableLayout {
    /// Measure every cell with an unconstrained width.
    fn grid(&self, cx: &MeasureCx<'_>) -> Result<Grid> {
        let mut grid = Grid::default();
        for row in cx.visible_children() {
            for (i, cell) in cx.tree().visible_children(row).into_iter().enumerate() {
                let lp = cx.lp(cell)?;
                let q = Vec2::new(
                    quotum_for(lp.dim(Axis::X), -1.0, cx),
                    quotum_for(lp.dim(Axis::Y), -1.0, cx),
                );
                let w = match lp.dim(Axis::X) {
                    Dim::Length(l) => l.to_px(cx.units()),
                    Dim::Fill => 0.0,
                    Dim::Min | Dim::Max => cx.measure(cell, q)?.x,
                };
                if grid.widths.len() <= i {
                    grid.widths.push(0.0);
                    grid.col_weights.push(0.0);
                }
                grid.widths[i] = grid.widths[i].max(w);
                grid.col_weights[i] = grid.col_weights[i].max(lp.effective_weight(Axis::X));
            }
            grid.rows.push(row);
        }
        Ok(grid)
    }

    /// Height of a row once its column widths are known.
    fn row_height(cx: &MeasureCx<'_>, row: NodeId, widths: &[f32]) -> Result<f32> {
        let mut h = 0.0f32;
        for (cell, w) in cx.tree().visible_children(row).into_iter().zip(widths) {
            let lp = cx.lp(cell)?;
            let cell_h = match lp.dim(Axis::Y) {
                Dim::Length(l) => l.to_px(cx.units()),
                Dim::Fill => 0.0,
                Dim::Min | Dim::Max => cx.measure(cell, Vec2::new(*w, -1.0))?.y,
            };
            h = h.max(cell_h);
        }
        Ok(h)
    }
}

impl Layout for TableLayout {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        let mut ret = quotum.clamp_bottom();
        if quotum.is_positive_or_zero() {
            return Ok(ret);
        }
        let grid = self.grid(cx)?;
        if quotum.x < 0.0 {
            ret.x = grid.widths.iter().sum();
        }
        if quotum.y < 0.0 {
            let mut h = 0.0;
            for row in &grid.rows {
                h += Self::row_height(cx, *row, &grid.widths)?;
            }
            ret.y = h;
        }
        Ok(ret)
    }

    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let size = cx.size();
        let grid = self.grid(&cx.measure_cx())?;

        let natural: f32 = grid.widths.iter().sum();
        let shares = distribute((size.x - natural).max(0.0), &grid.col_weights);
        let widths: Vec<f32> = grid.widths.iter().zip(&shares).map(|(w, s)| w + s).collect();
        let columns = round_spans(&widths);
        let rounded: Vec<f32> = columns.iter().map(|c| c.1).collect();

        let mut heights = Vec::with_capacity(grid.rows.len());
        let mut row_weights = Vec::with_capacity(grid.rows.len());
        for row in &grid.rows {
            heights.push(Self::row_height(&cx.measure_cx(), *row, &rounded)?);
            row_weights.push(cx.lp(*row)?.effective_weight(Axis::Y));
        }
        let fixed: f32 = heights.iter().sum();
        let shares = distribute((size.y - fixed).max(0.0), &row_weights);
        let heights: Vec<f32> = heights.iter().zip(&shares).map(|(h, s)| h + s).collect();

        for (row, (top, h)) in grid.rows.iter().zip(round_spans(&heights)) {
            let cols = columns.clone();
            cx.with_child(*row, |r: &mut TableRow| r.set_columns(cols))?;
            cx.tree().mark_dirty(*row);
            cx.resize(*row, Vec2::new(size.x, h))?;
            cx.move_to(*row, Vec2::new(0.0, top))?;
        }
        Ok(())
    }

    fn accepts(&self) -> Option<RoleKind> {
        Some(RoleKind::TableRow)
    }
}
