//! Axis-aligned bounding-box hit testing.
//!
//! Bullets are circles but are tested as their bounding square
//! (side `2r`, top-left at `centre - r`).  That over-reports hits at the
//! corners; it is the intended approximation.

use crate::entities::{Alien, Bullet, Player};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Anything that can be hit-tested.
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

impl Bounds for Alien {
    fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect {
            x: self.x - self.r,
            y: self.y - self.r,
            w: self.r * 2.0,
            h: self.r * 2.0,
        }
    }
}

/// True when the two boxes overlap.  Touching edges do not count.
pub fn collide(a: &impl Bounds, b: &impl Bounds) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
