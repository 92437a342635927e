//! Per-region placement step and the single-region mover.

use serde::{Deserialize, Serialize};

use super::types::{AnchorChoice, PlacementInput, PlacementMode};
use crate::geom2::{compute_translation, rotate, solve_anchor_transform, AnchorPair};
use crate::region::Region;
use crate::trace::{MoveTrace, RegionTrace};

/// A solved anchor transform plus the mode flags, reusable across moves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentContext {
    pub base: AnchorPair,
    pub detected: AnchorPair,
    /// Reported only; sizes and offsets are never scaled.
    pub scale: f64,
    /// Rotation delta in `(-π, π]`.
    pub angle_delta_rad: f64,
    pub lock_scale: bool,
    pub disable_rotation: bool,
}

impl AlignmentContext {
    /// Run the solver once for `base` → `detected`.
    pub fn solve(
        base: AnchorPair,
        detected: AnchorPair,
        lock_scale: bool,
        disable_rotation: bool,
    ) -> Self {
        let t = solve_anchor_transform(&base, &detected);
        Self {
            base,
            detected,
            scale: t.scale,
            angle_delta_rad: t.angle_delta_rad,
            lock_scale,
            disable_rotation,
        }
    }

    pub fn from_input(input: &PlacementInput) -> Self {
        Self::solve(
            input.base,
            input.detected,
            input.lock_scale,
            input.disable_rotation,
        )
    }

    #[inline]
    pub fn mode(&self) -> PlacementMode {
        PlacementMode::from_flags(self.disable_rotation, self.lock_scale)
    }

    /// Rotation the mode actually applies, in radians.
    #[inline]
    pub fn applied_rotation_rad(&self) -> f64 {
        match self.mode() {
            PlacementMode::TranslateOnly => 0.0,
            PlacementMode::RotateTranslate => self.angle_delta_rad,
        }
    }
}

/// A moved copy of the baseline region and what was done to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub region: Region,
    pub trace: MoveTrace,
}

/// Move one baseline region onto the detected anchors.
///
/// Same rule as the dependent step of `place`; the baseline is only read.
pub fn move_region_to(
    baseline: &Region,
    anchor: AnchorChoice,
    ctx: &AlignmentContext,
) -> MoveOutcome {
    let (region, record) = place_dependent(
        baseline,
        anchor,
        &ctx.base,
        &ctx.detected,
        ctx.mode(),
        ctx.angle_delta_rad,
    );
    let pivot_base = ctx.base.pivot(anchor);
    let pivot_det = ctx.detected.pivot(anchor);
    let applied = ctx.applied_rotation_rad();
    let trace = MoveTrace {
        region: record,
        pivot_base,
        pivot_det,
        scale: ctx.scale,
        applied_rotation_deg: applied.to_degrees(),
        translation: compute_translation(pivot_base, pivot_det, applied, 1.0),
    };
    MoveOutcome { region, trace }
}

/// New center and angle for one dependent region.
pub(crate) fn place_dependent(
    baseline: &Region,
    anchor: AnchorChoice,
    base: &AnchorPair,
    detected: &AnchorPair,
    mode: PlacementMode,
    angle_delta_rad: f64,
) -> (Region, RegionTrace) {
    let pivot_base = base.pivot(anchor);
    let pivot_det = detected.pivot(anchor);
    let baseline_center = baseline.center();

    let (new_center, new_angle) = match mode {
        PlacementMode::TranslateOnly => {
            let delta = pivot_det - pivot_base;
            (baseline_center + delta, baseline.angle_deg)
        }
        PlacementMode::RotateTranslate => {
            let v = baseline_center - pivot_base;
            (
                pivot_det + rotate(v, angle_delta_rad),
                baseline.angle_deg + angle_delta_rad.to_degrees(),
            )
        }
    };

    let mut placed = baseline.clone();
    placed.set_center(new_center);
    placed.angle_deg = new_angle;

    let record = RegionTrace {
        region_id: baseline.id.clone(),
        anchor,
        baseline_center,
        new_center,
        delta: new_center - baseline_center,
        extent_before: baseline.extent,
        extent_after: placed.extent,
        angle_before: baseline.angle_deg,
        angle_after: new_angle,
    };
    (placed, record)
}
