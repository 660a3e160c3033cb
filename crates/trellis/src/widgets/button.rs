//! Press, toggle and nine-patch behaviour, and the widgets composed from them.
//!
//! Each capability is a plain component with its own state and handler slot.
//! Widgets hold the components they need and forward events to each one in
//! turn.

use std::fmt;

use crate::{
    core::context::{LayoutCx, MeasureCx},
    error::Result,
    geom::{Axis, Frame, Rect, Sides, Vec2},
    layout::{dims_for_widget, measure_overlapping},
    widget::Widget,
};

/// Pressed state with a click handler fired on release.
#[derive(Default)]
pub struct Pressable {
    /// Is the button held down?
    pressed: bool,
    /// Called when the button is released after being pressed.
    pub on_click: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for Pressable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pressable")
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Pressable {
    /// Is the button held down?
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Update the pressed state. Returns true if it changed.
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        if self.pressed == pressed {
            return false;
        }
        self.pressed = pressed;
        if !pressed && let Some(h) = self.on_click.as_mut() {
            h();
        }
        true
    }
}

/// Checked state that flips each time a press is released.
#[derive(Default)]
pub struct Toggleable {
    /// Current state.
    checked: bool,
    /// Called with the new state whenever it changes.
    pub on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl fmt::Debug for Toggleable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggleable")
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

impl Toggleable {
    /// Current state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state, notifying the handler on change.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        if let Some(h) = self.on_toggle.as_mut() {
            h(checked);
        }
    }

    /// Flip the state.
    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }

    /// React to a change of the pressed state.
    pub fn on_pressed_change(&mut self, pressed: bool) {
        if !pressed {
            self.toggle();
        }
    }
}

/// A stretchable bordered look: borders stay fixed, the middle stretches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NinePatch {
    /// Border widths.
    borders: Sides,
    /// Regions for the current size.
    regions: Frame,
    /// Draw the pressed variant of the image.
    pressed_look: bool,
}

impl NinePatch {
    /// A look with the given border widths.
    pub fn new(borders: Sides) -> Self {
        Self {
            borders,
            regions: Frame::zero(),
            pressed_look: false,
        }
    }

    /// Border widths.
    pub fn borders(&self) -> Sides {
        self.borders
    }

    /// Change the border widths.
    pub fn set_borders(&mut self, borders: Sides) {
        self.borders = borders;
    }

    /// Regions for the current size.
    pub fn regions(&self) -> &Frame {
        &self.regions
    }

    /// Is the pressed variant shown?
    pub fn pressed_look(&self) -> bool {
        self.pressed_look
    }

    /// Recompute regions for a new size.
    pub fn resize(&mut self, size: Vec2) {
        self.regions = Frame::new(Rect::new(0.0, 0.0, size.x, size.y), self.borders);
    }

    /// Switch between the pressed and normal variants.
    pub fn on_pressed_change(&mut self, pressed: bool) {
        self.pressed_look = pressed;
    }

    /// Measure content inside the borders.
    pub fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        let b = Vec2::new(self.borders.horizontal(), self.borders.vertical());
        let mut inner = quotum;
        for axis in Axis::ALL {
            if quotum[axis] >= 0.0 {
                inner[axis] = (quotum[axis] - b[axis]).max(0.0);
            }
        }
        let content = measure_overlapping(inner, cx)?;
        let mut ret = quotum.clamp_bottom();
        for axis in Axis::ALL {
            if quotum[axis] < 0.0 {
                ret[axis] = content[axis] + b[axis];
            }
        }
        Ok(ret)
    }

    /// Arrange content within the middle region.
    pub fn lay_out(&self, cx: &mut LayoutCx<'_>) -> Result<()> {
        let middle = Rect::new(0.0, 0.0, cx.size().x, cx.size().y).inset(self.borders);
        for c in cx.visible_children() {
            let d = dims_for_widget(&cx.measure_cx(), c, middle.size)?;
            let lp = cx.lp(c)?;
            let mut pos = middle.pos;
            for axis in Axis::ALL {
                pos[axis] += lp.align_on(axis).offset(d[axis], middle.size[axis]).round();
            }
            cx.resize(c, d)?;
            cx.move_to(c, pos)?;
        }
        Ok(())
    }
}

/// A plain push button with a nine-patch look.
#[derive(Debug, Default)]
pub struct NinePatchButton {
    /// Press state.
    pub press: Pressable,
    /// Look.
    pub look: NinePatch,
}

impl NinePatchButton {
    /// A button with the given border widths.
    pub fn new(borders: Sides) -> Self {
        Self {
            press: Pressable::default(),
            look: NinePatch::new(borders),
        }
    }

    /// Press or release the button.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.press.set_pressed(pressed) {
            self.look.on_pressed_change(pressed);
        }
    }
}

impl Widget for NinePatchButton {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        self.look.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        self.look.lay_out(cx)
    }

    fn on_resize(&mut self, size: Vec2) {
        self.look.resize(size);
    }

    fn focusable(&self) -> bool {
        true
    }
}

/// A toggle button with a nine-patch look.
#[derive(Debug, Default)]
pub struct NinePatchToggle {
    /// Press state.
    pub press: Pressable,
    /// Checked state.
    pub toggle: Toggleable,
    /// Look.
    pub look: NinePatch,
}

impl NinePatchToggle {
    /// A toggle with the given border widths.
    pub fn new(borders: Sides) -> Self {
        Self {
            look: NinePatch::new(borders),
            ..Self::default()
        }
    }

    /// Press or release the button. The look updates first, then the checked
    /// state flips on release.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.press.set_pressed(pressed) {
            self.look.on_pressed_change(pressed);
            self.toggle.on_pressed_change(pressed);
        }
    }

    /// A full press and release.
    pub fn click(&mut self) {
        self.set_pressed(true);
        self.set_pressed(false);
    }

    /// Current checked state.
    pub fn is_checked(&self) -> bool {
        self.toggle.is_checked()
    }
}

impl Widget for NinePatchToggle {
    fn measure(&self, quotum: Vec2, cx: &MeasureCx<'_>) -> Result<Vec2> {
        self.look.measure(quotum, cx)
    }

    fn lay_out(&mut self, cx: &mut LayoutCx<'_>) -> Result<()> {
        self.look.lay_out(cx)
    }

    fn on_resize(&mut self, size: Vec2) {
        self.look.resize(size);
    }

    fn focusable(&self) -> bool {
        true
    }
}
