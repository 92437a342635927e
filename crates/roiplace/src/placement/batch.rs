//! Batch placement.

use super::anchor::master_target;
use super::mover::place_dependent;
use super::types::{PlacementInput, PlacementOutput};
use crate::geom2::solve_anchor_transform;
use crate::region::Region;
use crate::trace::PlacementTrace;

/// Place every baseline master and dependent region on the detected anchors.
///
/// Pure: the baselines are only read, each output region is a fresh copy,
/// and identical inputs give identical outputs. Empty slices give empty
/// lists.
pub fn place(
    input: &PlacementInput,
    baseline_masters: &[Region],
    baseline_dependents: &[Region],
) -> PlacementOutput {
    let transform = solve_anchor_transform(&input.base, &input.detected);
    let mode = input.mode();

    let placed_masters = baseline_masters
        .iter()
        .map(|baseline| {
            let mut placed = baseline.clone();
            if let Some(target) = master_target(baseline.role, &input.detected) {
                placed.set_center(target);
            }
            placed
        })
        .collect();

    let mut placed_dependents = Vec::with_capacity(baseline_dependents.len());
    let mut regions = Vec::with_capacity(baseline_dependents.len());
    for baseline in baseline_dependents {
        let anchor = input.anchor_for(baseline);
        let (placed, record) = place_dependent(
            baseline,
            anchor,
            &input.base,
            &input.detected,
            mode,
            transform.angle_delta_rad,
        );
        placed_dependents.push(placed);
        regions.push(record);
    }

    let trace = PlacementTrace {
        image_key: input.image_key.clone(),
        disable_rotation: input.disable_rotation,
        lock_scale: input.lock_scale,
        translate_only: input.translate_only(),
        scale_mode: input.scale_mode,
        base: input.base,
        detected: input.detected,
        transform,
        angle_delta_deg: transform.angle_delta_deg(),
        delta_m1: input.detected.m1 - input.base.m1,
        delta_m2: input.detected.m2 - input.base.m2,
        delta_mid: input.detected.mid() - input.base.mid(),
        regions,
    };

    PlacementOutput {
        placed_masters,
        placed_dependents,
        trace,
    }
}
