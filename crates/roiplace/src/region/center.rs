//! Shape center adapter.

use super::types::{Region, RoiShape};
use crate::geom2::Vec2;

impl Region {
    /// Center as seen by the region's own shape: `(x, y)` for rectangles,
    /// `(cx, cy)` for circles and annuli.
    #[inline]
    pub fn center(&self) -> Vec2 {
        match self.shape() {
            RoiShape::Rectangle => Vec2::new(self.x, self.y),
            RoiShape::Circle | RoiShape::Annulus => Vec2::new(self.cx, self.cy),
        }
    }

    /// Write `p` into both center representations. Size is left alone, so the
    /// derived `left/top` follow the new center.
    #[inline]
    pub fn set_center(&mut self, p: Vec2) {
        self.x = p.x;
        self.y = p.y;
        self.cx = p.x;
        self.cy = p.y;
    }

    /// Left edge of the unrotated bounding box.
    #[inline]
    pub fn left(&self) -> f64 {
        self.center().x - self.extent.bbox_size().0 * 0.5
    }

    /// Top edge of the unrotated bounding box (image y grows downwards).
    #[inline]
    pub fn top(&self) -> f64 {
        self.center().y - self.extent.bbox_size().1 * 0.5
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left() + self.extent.bbox_size().0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top() + self.extent.bbox_size().1
    }
}
