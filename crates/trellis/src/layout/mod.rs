//! Layout parameters and the measure/arrange negotiation shared by containers.
//!
//! Layout runs in two passes. A parent first asks each child for its desired
//! size with [`Widget::measure`](crate::widget::Widget::measure), passing a
//! per-axis quotum; a negative quotum means "unconstrained, report your
//! content size". Once the parent knows its own size it distributes space and
//! resizes each child, which recursively lays out the child's subtree.

mod linear;
mod pile;
mod tab_strip;
mod table;
mod trivial;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use linear::{LinearLayout, distribute, round_spans};
pub use pile::PileLayout;
pub(crate) use pile::measure_overlapping;
pub use tab_strip::TabStripLayout;
pub use table::TableLayout;
pub use trivial::TrivialLayout;

use crate::{
    core::context::{LayoutCx, MeasureCx},
    core::id::NodeId,
    error::{Error, Result},
    geom::{Axis, Vec2},
    widget::RoleKind,
};

/// Unit of a [`Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Device pixels.
    #[default]
    Px,
    /// Perceptual pixels, scaled by the display density.
    Pp,
    /// Millimetres, converted through the display DPI.
    Mm,
}

/// Display metrics used to resolve lengths to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Units {
    /// Dots per inch of the display.
    pub dots_per_inch: f32,
    /// Device pixels per perceptual pixel.
    pub dots_per_pp: f32,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            dots_per_inch: 96.0,
            dots_per_pp: 1.0,
        }
    }
}

impl Units {
    /// Device pixels per millimetre.
    pub fn dots_per_mm(&self) -> f32 {
        self.dots_per_inch / 25.4
    }
}

/// A non-negative length with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    /// Magnitude in `unit`.
    pub value: f32,
    /// Unit of `value`.
    pub unit: Unit,
}

impl Length {
    /// A length in device pixels.
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// A length in perceptual pixels.
    pub const fn pp(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Pp,
        }
    }

    /// A length in millimetres.
    pub const fn mm(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Mm,
        }
    }

    /// Resolve to device pixels. Scaled units round to whole pixels.
    pub fn to_px(&self, units: &Units) -> f32 {
        match self.unit {
            Unit::Px => self.value,
            Unit::Pp => (self.value * units.dots_per_pp).round(),
            Unit::Mm => (self.value * units.dots_per_mm()).round(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            Unit::Px => "px",
            Unit::Pp => "pp",
            Unit::Mm => "mm",
        };
        write!(f, "{}{unit}", self.value)
    }
}

/// Desired extent of a widget along one axis.
///
/// An axis is either an explicit length or one of the content/space driven
/// policies, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DimRepr", into = "DimRepr")]
pub enum Dim {
    /// Explicit length.
    Length(Length),
    /// Shrink to content.
    #[default]
    Min,
    /// Grow to the available space, never below the content minimum.
    Max,
    /// Grow to the available space; contributes nothing to the parent's
    /// measured size.
    Fill,
}

impl Dim {
    /// Explicit length in device pixels.
    pub const fn px(value: f32) -> Self {
        Self::Length(Length::px(value))
    }

    /// Does this policy take its extent from the parent?
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Max | Self::Fill)
    }
}

impl FromStr for Dim {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "min" => return Ok(Self::Min),
            "max" => return Ok(Self::Max),
            "fill" => return Ok(Self::Fill),
            _ => {}
        }
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());
        let (num, suffix) = s.split_at(split);
        let value: f32 = num
            .parse()
            .map_err(|_| Error::Inflate(format!("invalid dimension {s:?}")))?;
        let unit = match suffix {
            "" | "px" => Unit::Px,
            "pp" => Unit::Pp,
            "mm" => Unit::Mm,
            other => return Err(Error::Inflate(format!("unknown unit {other:?} in {s:?}"))),
        };
        Ok(Self::Length(Length { value, unit }))
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(l) => write!(f, "{l}"),
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
            Self::Fill => write!(f, "fill"),
        }
    }
}

/// Serialized form of a [`Dim`]: a bare number of pixels or a keyword/length string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DimRepr {
    /// Pixels.
    Number(f32),
    /// `min`, `max`, `fill` or a length such as `12mm`.
    Text(String),
}

impl TryFrom<DimRepr> for Dim {
    type Error = Error;

    fn try_from(r: DimRepr) -> Result<Self> {
        match r {
            DimRepr::Number(v) if v >= 0.0 => Ok(Self::px(v)),
            DimRepr::Number(v) => Err(Error::Inflate(format!("negative dimension {v}"))),
            DimRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Dim> for DimRepr {
    fn from(d: Dim) -> Self {
        match d {
            Dim::Length(Length {
                value,
                unit: Unit::Px,
            }) => Self::Number(value),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Alignment of a child within the space its parent gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left or top.
    Front,
    /// Centered.
    #[default]
    Center,
    /// Right or bottom.
    Back,
}

impl Align {
    /// Offset of an extent aligned within the available extent.
    pub fn offset(self, extent: f32, available: f32) -> f32 {
        match self {
            Self::Front => 0.0,
            Self::Center => (available - extent) / 2.0,
            Self::Back => available - extent,
        }
    }
}

/// Layout parameters: how a widget wants its parent to size and place it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lp {
    /// Desired extent per axis, `[x, y]`.
    pub dims: [Dim; 2],
    /// Share of the extra space along a linear container's axis. Negative
    /// values are treated as the default of zero.
    pub weight: f32,
    /// Alignment per axis, `[x, y]`.
    pub align: [Align; 2],
}

impl Lp {
    /// Both axes shrink to content.
    pub fn min() -> Self {
        Self::default()
    }

    /// Both axes fill the parent.
    pub fn fill() -> Self {
        Self::default().dx(Dim::Fill).dy(Dim::Fill)
    }

    /// Explicit pixel size on both axes.
    pub fn px(w: f32, h: f32) -> Self {
        Self::default().dx(Dim::px(w)).dy(Dim::px(h))
    }

    /// Set the horizontal dimension.
    pub fn dx(mut self, d: Dim) -> Self {
        self.dims[0] = d;
        self
    }

    /// Set the vertical dimension.
    pub fn dy(mut self, d: Dim) -> Self {
        self.dims[1] = d;
        self
    }

    /// Set the weight.
    pub fn weight(mut self, w: f32) -> Self {
        self.weight = w;
        self
    }

    /// Set the alignment on one axis.
    pub fn align(mut self, axis: Axis, a: Align) -> Self {
        self.align[axis.index()] = a;
        self
    }

    /// Dimension on an axis.
    pub fn dim(&self, axis: Axis) -> Dim {
        self.dims[axis.index()]
    }

    /// Alignment on an axis.
    pub fn align_on(&self, axis: Axis) -> Align {
        self.align[axis.index()]
    }

    /// Weight used for distributing extra space along `axis`: the explicit
    /// weight when positive, otherwise 1 for `max`/`fill` and 0 for the rest.
    pub fn effective_weight(&self, axis: Axis) -> f32 {
        if self.weight > 0.0 {
            self.weight
        } else if self.dim(axis).is_flexible() {
            1.0
        } else {
            0.0
        }
    }
}

/// A container arrangement strategy implementing the negotiation protocol.
pub trait Layout: fmt::Debug {
    /// Desired size of the container for a quotum.
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2>;

    /// Size and place the container's visible children.
    fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()>;

    /// Kind of children the strategy can arrange. `None` accepts anything.
    fn accepts(&self) -> Option<RoleKind> {
        None
    }
}

/// Quotum passed to a child for one axis when measuring, given the parent's
/// own quotum (or size) on that axis.
pub fn quotum_for(dim: Dim, parent: f32, cx: &MeasureCx<'_>) -> f32 {
    match dim {
        Dim::Length(l) => l.to_px(cx.units()),
        Dim::Min => -1.0,
        Dim::Max => {
            if parent >= 0.0 {
                parent
            } else {
                -1.0
            }
        }
        Dim::Fill => {
            if parent >= 0.0 {
                parent
            } else {
                0.0
            }
        }
    }
}

/// Final size of a child inside a parent of `parent_size`: flexible axes take
/// the parent's extent, explicit lengths are used as is, and `min` axes are
/// measured with the other axis already resolved.
pub fn dims_for_widget(cx: &MeasureCx<'_>, child: NodeId, parent_size: Vec2) -> Result<Vec2> {
    let lp = cx.lp(child)?;
    let mut d = Vec2::zero();
    for axis in Axis::ALL {
        d[axis] = match lp.dim(axis) {
            Dim::Max | Dim::Fill => parent_size[axis],
            Dim::Min => -1.0,
            Dim::Length(l) => l.to_px(cx.units()),
        };
    }
    if !d.is_positive_or_zero() {
        let measured = cx.measure(child, d)?;
        for axis in Axis::ALL {
            if d[axis] < 0.0 {
                d[axis] = measured[axis];
            }
        }
    }
    Ok(d)
}

/// Reject `max`/`fill` for containers that cannot distribute space.
pub fn reject_flexible(cx: &MeasureCx<'_>, child: NodeId, container: &str) -> Result<()> {
    let lp = cx.lp(child)?;
    for axis in Axis::ALL {
        if lp.dim(axis).is_flexible() {
            return Err(Error::Layout(format!(
                "'{}' in layout parameters of a {container} child",
                lp.dim(axis)
            )));
        }
    }
    Ok(())
}
