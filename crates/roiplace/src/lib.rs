//! Anchor-pair placement of inspection regions.
//!
//! Given a baseline layout authored against two master anchors and the two
//! anchors detected in a new image, re-derive where every region goes.
//! Everything here is a pure function of its inputs: no I/O, no shared state,
//! no accumulation across calls.
//!
//! Modules
//! - `geom2`: point type, anchor pairs, transform solver.
//! - `region`: ROI model and the shape center adapter.
//! - `placement`: anchor resolution, batch placement, single-region mover.
//! - `trace`: diagnostics records and sinks.
//! - `layout`: baseline layout file model and validation.

pub mod api;
pub mod cfg;
pub mod geom2;
pub mod layout;
pub mod placement;
pub mod region;
pub mod trace;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{AnchorPair, Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{solve_anchor_transform, AnchorPair, AnchorTransform, Vec2};
    pub use crate::layout::{BaselineLayout, LayoutError};
    pub use crate::placement::{
        move_region_to, place, AlignmentContext, AnchorChoice, PlacementInput, PlacementOutput,
    };
    pub use crate::region::{Extent, Region, RoiRole, RoiShape};
    pub use crate::trace::{PlacementTrace, TraceSink, TracingSink};
}
