use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::{Axis, Vec2},
    layout::{Dim, Layout, LinearLayout},
    widget::{Role, Widget},
};

/// A row of a table container. Each visible child is a cell in the column of
/// the same index.
///
/// Outside a table, or before the table has laid it out, a row behaves like
/// a horizontal linear container.
#[derive(Debug, Default, Clone)]
pub struct TableRow {
    /// `(start, width)` of each column, assigned by the table.
    columns: Vec<(f32, f32)>,
}

impl TableRow {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column spans assigned by the enclosing table.
    pub fn columns(&self) -> &[(f32, f32)] {
        &self.columns
    }

    /// Set the column spans.
    pub(crate) fn set_columns(&mut self, columns: Vec<(f32, f32)>) {
        self.columns = columns;
    }
}

impl Widget for TableRow {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        LinearLayout::row().measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        if self.columns.is_empty() {
            return LinearLayout::row().lay_out(cx);
        }
        let size = cx.size();
        for (i, cell) in cx.visible_children().into_iter().enumerate() {
            // Cells past the last known column get no space.
            let (start, width) = self.columns.get(i).copied().unwrap_or((size.x, 0.0));
            let lp = cx.lp(cell)?;
            let h = match lp.dim(Axis::Y) {
                Dim::Max | Dim::Fill => size.y,
                Dim::Length(l) => l.to_px(&cx.units()),
                Dim::Min => cx.measure(cell, Vec2::new(width, -1.0))?.y,
            };
            let y = lp.align_on(Axis::Y).offset(h, size.y).round();
            cx.resize(cell, Vec2::new(width, h))?;
            cx.move_to(cell, Vec2::new(start, y))?;
        }
        Ok(())
    }

    fn role(&self) -> Role {
        Role::TableRow
    }
}
