//! 2D geometry for anchor-pair placement.
//!
//! Purpose
//! - Provide the point type (`Vec2`), the anchor pair (`AnchorPair`), and the
//!   small solver that turns a baseline pair and a detected pair into a
//!   rotation delta plus a diagnostic scale (`solve_anchor_transform`).
//! - Keep every operation pure: inputs by value or shared reference, outputs
//!   freshly computed.
//!
//! Code cross-refs: `placement::{place, move_region_to}`, `region::Region`.

mod solvers;
mod types;

pub use solvers::{
    compute_translation, normalize_angle_rad, rotate, solve_anchor_transform, AnchorTransform,
};
pub use types::{AnchorPair, Vec2};
