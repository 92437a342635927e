//! Region-of-interest model and the shape center adapter.
//!
//! - `Region`: one ROI with a stable id, a role, an angle, the dual center
//!   fields `(x, y)` / `(cx, cy)` and a shape-specific `Extent`.
//! - Center adapter (`Region::center`, `Region::set_center`): uniform access
//!   to the center regardless of shape. Writes go to both representations.
//!
//! Placement only ever changes the center fields and `angle_deg`; the
//! `Extent` is carried over untouched.

mod center;
mod types;

pub use types::{Extent, Region, RoiRole, RoiShape};

#[cfg(test)]
mod tests;
