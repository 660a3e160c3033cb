use super::{Layout, dims_for_widget, pile::measure_overlapping};
use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::Vec2,
};

/// Sizes children from their layout parameters and leaves their positions to
/// the owner. Only children marked dirty are resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrivialLayout;

impl Layout for TrivialLayout {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        measure_overlapping(quotum, cx)
    }

    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let size = cx.size();
        for c in cx.visible_children() {
            let dirty = cx.tree().node(c).is_some_and(|n| n.layout_dirty());
            if dirty {
                let d = dims_for_widget(&cx.measure_cx(), c, size)?;
                cx.resize(c, d)?;
            }
        }
        Ok(())
    }
}
