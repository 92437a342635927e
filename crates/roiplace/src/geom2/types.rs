//! Point type and anchor pairs.
//!
//! - `Vec2`: the point/vector type (`nalgebra::Vector2<f64>`); supports `+`,
//!   `-` and scalar `*` out of the box.
//! - `AnchorPair`: the two master anchor points of one image (baseline or
//!   detected), with the pivot lookup used by the anchor resolver.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::placement::AnchorChoice;

/// 2D point in image coordinates (pixels).
pub type Vec2 = Vector2<f64>;

/// The two master anchor points of one image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPair {
    pub m1: Vec2,
    pub m2: Vec2,
}

impl AnchorPair {
    #[inline]
    pub fn new(m1: Vec2, m2: Vec2) -> Self {
        Self { m1, m2 }
    }

    /// Arithmetic midpoint of both anchors.
    #[inline]
    pub fn mid(&self) -> Vec2 {
        (self.m1 + self.m2) * 0.5
    }

    /// Directed anchor vector `m2 - m1`.
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.m2 - self.m1
    }

    /// Euclidean distance between the anchors.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.vector().norm()
    }

    /// Direction of the anchor vector, `atan2(v.y, v.x)`.
    #[inline]
    pub fn direction(&self) -> f64 {
        let v = self.vector();
        v.y.atan2(v.x)
    }

    /// Pivot point selected by `choice`.
    #[inline]
    pub fn pivot(&self, choice: AnchorChoice) -> Vec2 {
        match choice {
            AnchorChoice::Master1 => self.m1,
            AnchorChoice::Master2 => self.m2,
            AnchorChoice::Mid => self.mid(),
        }
    }
}
