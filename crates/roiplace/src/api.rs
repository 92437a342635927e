//! Curated API surface for callers (UNSTABLE).
//!
//! Convenience re-exports grouped by concern. Breaking changes are allowed
//! while the layout file format settles.

// geometry
pub use crate::geom2::{
    compute_translation, normalize_angle_rad, rotate, solve_anchor_transform, AnchorPair,
    AnchorTransform, Vec2,
};
// regions and layouts
pub use crate::layout::{AnalyzeOptions, BaselineLayout, LayoutError};
pub use crate::region::{Extent, Region, RoiRole, RoiShape};
// placement
pub use crate::placement::{
    master_target, move_region_to, place, resolve_anchor_choice, AlignmentContext, AnchorChoice,
    MoveOutcome, PlacementInput, PlacementMode, PlacementOutput, ScaleMode,
};
// diagnostics
pub use crate::trace::{MoveTrace, PlacementTrace, RegionTrace, TraceSink, TracingSink};
