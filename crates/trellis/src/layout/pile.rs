use super::{Dim, Layout, dims_for_widget, quotum_for};
use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::{Axis, Vec2},
};

/// Children stacked on top of each other, each sized and aligned
/// independently within the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PileLayout;

/// Measure a set of overlapping children: constrained axes report the
/// quotum, unconstrained axes the largest child.
pub(crate) fn measure_overlapping(quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
    let mut ret = quotum.clamp_bottom();
    if quotum.is_positive_or_zero() {
        return Ok(ret);
    }
    for c in cx.visible_children() {
        let lp = cx.lp(c)?;
        let mut q = Vec2::zero();
        for axis in Axis::ALL {
            q[axis] = quotum_for(lp.dim(axis), quotum[axis], cx);
        }
        let measured = cx.measure(c, q)?;
        for axis in Axis::ALL {
            if quotum[axis] >= 0.0 {
                continue;
            }
            let extent = match lp.dim(axis) {
                Dim::Length(l) => l.to_px(cx.units()),
                Dim::Fill => 0.0,
                Dim::Min | Dim::Max => measured[axis],
            };
            ret[axis] = ret[axis].max(extent);
        }
    }
    Ok(ret)
}

impl Layout for PileLayout {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        measure_overlapping(quotum, cx)
    }

    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let size = cx.size();
        for c in cx.visible_children() {
            let d = dims_for_widget(&cx.measure_cx(), c, size)?;
            let lp = cx.lp(c)?;
            let mut pos = Vec2::zero();
            for axis in Axis::ALL {
                pos[axis] = lp.align_on(axis).offset(d[axis], size[axis]).round();
            }
            cx.resize(c, d)?;
            cx.move_to(c, pos)?;
        }
        Ok(())
    }
}
