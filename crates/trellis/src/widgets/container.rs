use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::Vec2,
    layout::{Layout, LinearLayout, PileLayout, TabStripLayout, TableLayout, TrivialLayout},
    widget::{RoleKind, Widget},
};

/// A widget that arranges its children with a layout strategy.
#[derive(Debug)]
pub struct Container {
    /// Arrangement strategy.
    layout: Box<dyn Layout>,
    /// Clip children to the container's rect.
    clip: bool,
}

impl Container {
    /// A container using the given strategy.
    pub fn new(layout: impl Layout + 'static) -> Self {
        Self {
            layout: Box::new(layout),
            clip: false,
        }
    }

    /// Children left to right.
    pub fn row() -> Self {
        Self::new(LinearLayout::row())
    }

    /// Children top to bottom.
    pub fn column() -> Self {
        Self::new(LinearLayout::column())
    }

    /// Children stacked on top of each other.
    pub fn pile() -> Self {
        Self::new(PileLayout)
    }

    /// Children sized but not positioned.
    pub fn trivial() -> Self {
        Self::new(TrivialLayout)
    }

    /// A grid of table rows.
    pub fn table() -> Self {
        Self::new(TableLayout)
    }

    /// A strip of overlapping tabs.
    pub fn tab_strip() -> Self {
        Self::new(TabStripLayout)
    }

    /// Enable or disable clipping of children.
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// The arrangement strategy.
    pub fn layout(&self) -> &dyn Layout {
        self.layout.as_ref()
    }
}

impl Widget for Container {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        self.layout.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        self.layout.lay_out(cx)
    }

    fn accepts(&self) -> Option<RoleKind> {
        self.layout.accepts()
    }

    fn clips(&self) -> bool {
        self.clip
    }
}

/// An empty leaf. Useful as a spacer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blank;

impl Widget for Blank {}
