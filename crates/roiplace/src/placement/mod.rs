//! Anchor-pair placement of master and dependent regions.
//!
//! Purpose
//! - Re-derive region placement on a new image from the detected master
//!   anchors, always starting from the immutable baseline so repeated or
//!   alternating placements cannot drift.
//! - `place`: batch placement of every master and dependent region.
//! - `move_region_to`: the same per-region step for one region, driven by a
//!   precomputed `AlignmentContext` so one solved transform can be reused.
//!
//! Mode table
//! - `disable_rotation` set: translate by the chosen anchor's
//!   detected-minus-baseline delta, angle unchanged (`lock_scale` does not
//!   matter; `translate_only` in the trace is `disable_rotation && lock_scale`).
//! - otherwise: rotate the baseline offset from the pivot by the solved
//!   delta and re-attach it to the detected pivot; angle gains the delta.
//!
//! Sizes (`width/height/r/r_inner`) are never touched, whatever the solved
//! scale or the `ScaleMode` input say.
//!
//! Code cross-refs: `geom2::{solve_anchor_transform, AnchorPair}`,
//! `region::Region`, `trace::{PlacementTrace, RegionTrace}`.

mod anchor;
mod batch;
mod mover;
mod types;

pub use anchor::{master_target, resolve_anchor_choice};
pub use batch::place;
pub use mover::{move_region_to, AlignmentContext, MoveOutcome};
pub use types::{AnchorChoice, PlacementInput, PlacementMode, PlacementOutput, ScaleMode};
