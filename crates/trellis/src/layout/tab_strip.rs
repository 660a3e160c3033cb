use super::{Layout, dims_for_widget, quotum_for, reject_flexible};
use crate::{
    core::context::{LayoutCx, MeasureCx},
    core::id::NodeId,
    error::{Error, Result},
    geom::{Axis, Sides, Vec2},
    widget::{Role, RoleKind},
};

/// Tabs in a horizontal strip. Neighbouring tabs overlap by the smaller of
/// the shared borders, and every tab is centered vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabStripLayout;

/// Nine-patch borders of a tab child.
fn borders(cx: &MeasureCx<'_>, child: NodeId) -> Result<Sides> {
    match cx.role(child)? {
        Role::Tab { borders } => Ok(borders),
        other => Err(Error::Structure(format!(
            "tab strip child {child:?} has role {:?}",
            other.kind()
        ))),
    }
}

impl Layout for TabStripLayout {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        let mut ret = quotum.clamp_bottom();
        let mut length = 0.0;
        let mut prev = Sides::default();
        for c in cx.visible_children() {
            reject_flexible(cx, c, "tab strip")?;
            let lp = cx.lp(c)?;
            let mut q = Vec2::zero();
            for axis in Axis::ALL {
                q[axis] = quotum_for(lp.dim(axis), -1.0, cx);
            }
            let d = cx.measure(c, q)?;
            let b = borders(cx, c)?;
            length += d.x - prev.right.min(b.left);
            prev = b;
            if quotum.y < 0.0 {
                ret.y = ret.y.max(d.y);
            }
        }
        if quotum.x < 0.0 {
            ret.x = length;
        }
        Ok(ret)
    }

    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let size = cx.size();
        let mut pos = 0.0;
        let mut prev = Sides::default();
        for c in cx.visible_children() {
            let (d, b) = {
                let mcx = cx.measure_cx();
                reject_flexible(&mcx, c, "tab strip")?;
                (dims_for_widget(&mcx, c, size)?, borders(&mcx, c)?)
            };
            cx.resize(c, d)?;
            pos -= prev.right.min(b.left);
            cx.move_to(c, Vec2::new(pos, ((size.y - d.y) / 2.0).round()))?;
            pos += d.x;
            prev = b;
        }
        Ok(())
    }

    fn accepts(&self) -> Option<RoleKind> {
        Some(RoleKind::Tab)
    }
}
