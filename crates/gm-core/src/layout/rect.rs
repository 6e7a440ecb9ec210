//! Rectangles stamped onto room frames

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Inclusive rectangle `[lx, hx] x [ly, hy]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub lx: i32,
    /// Bottom y coordinate
    pub ly: i32,
    /// Right x coordinate
    pub hx: i32,
    /// Top y coordinate
    pub hy: i32,
}

impl Rect {
    pub fn new(lx: i32, ly: i32, hx: i32, hy: i32) -> Self {
        Self { lx, ly, hx, hy }
    }

    /// Rectangle of `width` x `height` cells whose bottom-left cell is `origin`
    pub fn from_origin(origin: Point, width: i32, height: i32) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + width - 1,
            origin.y + height - 1,
        )
    }

    /// The whole `size` x `size` frame
    pub fn frame(size: i32) -> Self {
        Self::new(0, 0, size - 1, size - 1)
    }

    pub fn width(&self) -> i32 {
        if self.hx >= self.lx {
            self.hx - self.lx + 1
        } else {
            0
        }
    }

    pub fn height(&self) -> i32 {
        if self.hy >= self.ly {
            self.hy - self.ly + 1
        } else {
            0
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.hx < other.lx || self.lx > other.hx || self.hy < other.ly || self.ly > other.hy)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        Some(Rect {
            lx: self.lx.max(other.lx),
            ly: self.ly.max(other.ly),
            hx: self.hx.min(other.hx),
            hy: self.hy.min(other.hy),
        })
    }

    /// Slide the rectangle so it starts inside `[0, size)` on both axes
    ///
    /// A rectangle wider or taller than the frame is pinned to 0 on that axis
    /// and stays oversized; callers clip with `intersection`.
    pub fn clamped_into(&self, size: i32) -> Rect {
        let origin = Point::new(
            clamp_origin(self.lx, self.width(), size),
            clamp_origin(self.ly, self.height(), size),
        );
        Rect::from_origin(origin, self.width(), self.height())
    }

    /// All positions, column by column
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.lx..=self.hx).flat_map(move |x| (self.ly..=self.hy).map(move |y| Point::new(x, y)))
    }
}

fn clamp_origin(start: i32, extent: i32, size: i32) -> i32 {
    start.min(size - extent).max(0)
}
