//! Usable play rectangle and wall bounce
//!
//! The window is `bounds` pixels; `ui_margin` is carved off the right/bottom
//! for the property panel. An entity whose center sits closer than its
//! half-extent (`origin`) to the top/left edge, or past
//! `bounds - origin - ui_margin`, is out of bounds on that axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BOUNDS, DEFAULT_UI_MARGIN};

/// Window rectangle minus the reserved UI margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub bounds: Vec2,
    pub ui_margin: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(
            Vec2::new(DEFAULT_BOUNDS.0, DEFAULT_BOUNDS.1),
            Vec2::new(DEFAULT_UI_MARGIN.0, DEFAULT_UI_MARGIN.1),
        )
    }
}

impl Arena {
    pub fn new(bounds: Vec2, ui_margin: Vec2) -> Self {
        Self { bounds, ui_margin }
    }

    /// Center of the full window (circling pivot)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds * 0.5
    }

    /// Largest usable coordinate on each axis
    #[inline]
    pub fn usable_max(&self) -> Vec2 {
        self.bounds - self.ui_margin
    }

    /// Whether `pos` is off the usable range on one axis
    #[inline]
    pub fn crosses_axis(pos: f32, origin: f32, bound: f32, ui_margin: f32) -> bool {
        pos - origin < 0.0 || pos > bound - origin - ui_margin
    }

    /// Whether `pos` is out of bounds on either axis
    pub fn is_outside(&self, pos: Vec2, origin: Vec2) -> bool {
        Self::crosses_axis(pos.x, origin.x, self.bounds.x, self.ui_margin.x)
            || Self::crosses_axis(pos.y, origin.y, self.bounds.y, self.ui_margin.y)
    }

    /// Invert the axes of `direction` that carry `pos` further out of bounds
    ///
    /// Only an axis that is out of bounds AND still heading outward flips, so
    /// an entity overshooting by more than one frame's travel flips once and
    /// then walks back in instead of jittering on the wall.
    /// Returns true if any axis flipped.
    pub fn bounce(&self, pos: Vec2, origin: Vec2, direction: &mut Vec2) -> bool {
        let mut flipped = false;
        if Self::crosses_axis(pos.x, origin.x, self.bounds.x, self.ui_margin.x)
            && heading_out(pos.x, origin.x, self.bounds.x - self.ui_margin.x, direction.x)
        {
            direction.x = -direction.x;
            flipped = true;
        }
        if Self::crosses_axis(pos.y, origin.y, self.bounds.y, self.ui_margin.y)
            && heading_out(pos.y, origin.y, self.bounds.y - self.ui_margin.y, direction.y)
        {
            direction.y = -direction.y;
            flipped = true;
        }
        flipped
    }
}

/// Direction component points away from the usable range
#[inline]
fn heading_out(pos: f32, origin: f32, usable_max: f32, dir: f32) -> bool {
    if pos - origin < 0.0 {
        dir < 0.0
    } else {
        pos > usable_max - origin && dir > 0.0
    }
}
