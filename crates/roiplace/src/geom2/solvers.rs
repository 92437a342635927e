//! Anchor-pair transform solver.
//!
//! - `solve_anchor_transform`: scale (diagnostic only) and normalized rotation
//!   delta between a baseline and a detected anchor pair.
//! - `normalize_angle_rad`: reduce an angle to `(-π, π]`.
//! - `rotate`, `compute_translation`: the rigid pieces the applier composes.
//!
//! Code cross-refs: `types::AnchorPair`, `placement::AlignmentContext`.
use std::f64::consts::{PI, TAU};

use nalgebra::Rotation2;
use serde::{Deserialize, Serialize};

use super::types::{AnchorPair, Vec2};
use crate::cfg::DEGENERATE_DIST_EPS;

/// Result of solving a baseline pair against a detected pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorTransform {
    /// Distance between the baseline anchors.
    pub dist_base: f64,
    /// Distance between the detected anchors.
    pub dist_det: f64,
    /// `dist_det / dist_base`, or `1.0` for a degenerate baseline pair.
    /// Never applied to region sizes.
    pub scale: f64,
    /// Rotation delta in `(-π, π]`.
    pub angle_delta_rad: f64,
}

impl AnchorTransform {
    /// Rotation delta in degrees.
    #[inline]
    pub fn angle_delta_deg(&self) -> f64 {
        self.angle_delta_rad.to_degrees()
    }
}

/// Solve scale and rotation delta from two corresponding anchor pairs.
///
/// Never fails: a baseline pair closer than `DEGENERATE_DIST_EPS` yields
/// `scale = 1.0`, and the angle delta is still computed from `atan2`, which
/// is defined for the zero vector.
pub fn solve_anchor_transform(base: &AnchorPair, detected: &AnchorPair) -> AnchorTransform {
    let dist_base = base.distance();
    let dist_det = detected.distance();
    let scale = if dist_base < DEGENERATE_DIST_EPS {
        1.0
    } else {
        dist_det / dist_base
    };
    let angle_delta_rad = normalize_angle_rad(detected.direction() - base.direction());
    AnchorTransform {
        dist_base,
        dist_det,
        scale,
        angle_delta_rad,
    }
}

/// Reduce `rad` to the half-open interval `(-π, π]` by modulo arithmetic.
#[inline]
pub fn normalize_angle_rad(rad: f64) -> f64 {
    let r = PI - (PI - rad).rem_euclid(TAU);
    // rem_euclid may round up to TAU for tiny negative inputs.
    if r <= -PI {
        PI
    } else {
        r
    }
}

/// Rotate `v` counterclockwise by `angle_rad` about the origin.
#[inline]
pub fn rotate(v: Vec2, angle_rad: f64) -> Vec2 {
    Rotation2::new(angle_rad) * v
}

/// Translation part of the similarity `z ↦ s·R(θ)·z + t` that maps
/// `pivot_base` onto `pivot_det`: `t = pivot_det - s·R(θ)·pivot_base`.
#[inline]
pub fn compute_translation(pivot_base: Vec2, pivot_det: Vec2, angle_rad: f64, scale: f64) -> Vec2 {
    pivot_det - rotate(pivot_base, angle_rad) * scale
}
