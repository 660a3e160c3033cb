use super::{Dim, Layout, quotum_for};
use crate::{
    core::context::{LayoutCx, MeasureCx},
    core::id::NodeId,
    error::Result,
    geom::{Axis, Vec2},
};

/// A child's contribution along the long axis before extra space is shared out.
struct Slot {
    /// Child node.
    id: NodeId,
    /// Fixed or minimum extent along the long axis.
    base: f32,
    /// Share of the remaining space.
    weight: f32,
}

/// Children arranged one after another along an axis: a row for
/// [`Axis::X`], a column for [`Axis::Y`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearLayout {
    /// The long axis.
    pub axis: Axis,
}

impl LinearLayout {
    /// Horizontal arrangement.
    pub fn row() -> Self {
        Self { axis: Axis::X }
    }

    /// Vertical arrangement.
    pub fn column() -> Self {
        Self { axis: Axis::Y }
    }

    /// Extent of a child along `axis` for measuring purposes. `Fill` axes
    /// contribute nothing, explicit lengths are taken as is.
    fn natural(
        &self,
        cx: &MeasureCx<'_>,
        child: NodeId,
        parent_quotum: Vec2,
    ) -> Result<Vec2> {
        let lp = cx.lp(child)?;
        let mut q = Vec2::zero();
        for axis in Axis::ALL {
            let parent = if axis == self.axis {
                -1.0
            } else {
                parent_quotum[axis]
            };
            q[axis] = quotum_for(lp.dim(axis), parent, cx);
        }
        let measured = cx.measure(child, q)?;
        let mut out = Vec2::zero();
        for axis in Axis::ALL {
            let constrained = axis != self.axis && parent_quotum[axis] >= 0.0;
            out[axis] = match lp.dim(axis) {
                Dim::Length(l) => l.to_px(cx.units()),
                Dim::Fill | Dim::Max if constrained => parent_quotum[axis],
                Dim::Fill => 0.0,
                Dim::Max | Dim::Min => measured[axis],
            };
        }
        Ok(out)
    }
}

impl Layout for LinearLayout {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        let mut ret = quotum.clamp_bottom();
        if quotum.is_positive_or_zero() {
            return Ok(ret);
        }
        let long = self.axis;
        let trans = long.other();
        let mut sum = 0.0;
        let mut max = 0.0f32;
        for c in cx.visible_children() {
            let n = self.natural(cx, c, quotum)?;
            sum += n[long];
            max = max.max(n[trans]);
        }
        if quotum[long] < 0.0 {
            ret[long] = sum;
        }
        if quotum[trans] < 0.0 {
            ret[trans] = max;
        }
        Ok(ret)
    }

    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let size = cx.size();
        let long = self.axis;
        let trans = long.other();

        let mut slots = Vec::new();
        for id in cx.visible_children() {
            let lp = cx.lp(id)?;
            let base = match lp.dim(long) {
                Dim::Length(l) => l.to_px(&cx.units()),
                Dim::Fill => 0.0,
                Dim::Min | Dim::Max => self.natural(&cx.measure_cx(), id, size)?[long],
            };
            slots.push(Slot {
                id,
                base,
                weight: lp.effective_weight(long),
            });
        }

        let fixed: f32 = slots.iter().map(|s| s.base).sum();
        let weights: Vec<f32> = slots.iter().map(|s| s.weight).collect();
        let shares = distribute((size[long] - fixed).max(0.0), &weights);
        let extents: Vec<f32> = slots
            .iter()
            .zip(&shares)
            .map(|(s, share)| s.base + share)
            .collect();

        for (slot, (start, len)) in slots.iter().zip(round_spans(&extents)) {
            let lp = cx.lp(slot.id)?;
            let across = match lp.dim(trans) {
                Dim::Max | Dim::Fill => size[trans],
                Dim::Length(l) => l.to_px(&cx.units()),
                Dim::Min => cx.measure(slot.id, Vec2::from_axes(long, len, -1.0))?[trans],
            };
            let offset = lp.align_on(trans).offset(across, size[trans]).round();
            cx.resize(slot.id, Vec2::from_axes(long, len, across))?;
            cx.move_to(slot.id, Vec2::from_axes(long, start, offset))?;
        }
        Ok(())
    }
}

/// Share `remaining` space out in proportion to `weights`. Non-positive
/// weights get nothing; if no weight is positive nothing is shared.
pub fn distribute(remaining: f32, weights: &[f32]) -> Vec<f32> {
    let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
    if remaining <= 0.0 || total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights
        .iter()
        .map(|w| if *w > 0.0 { remaining * w / total } else { 0.0 })
        .collect()
}

/// Lay extents end to end from zero and round each span's edges to whole
/// pixels. Returns `(start, length)` pairs whose lengths sum to the rounded
/// total.
pub fn round_spans(extents: &[f32]) -> Vec<(f32, f32)> {
    let mut pos = 0.0f32;
    extents
        .iter()
        .map(|e| {
            let start = pos.round();
            pos += e;
            let end = pos.round();
            (start, end - start)
        })
        .collect()
}
