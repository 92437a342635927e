//! Placement trace records and the sinks that consume them.
//!
//! The placement functions only build these values; whether and how they are
//! logged is up to the caller, through a `TraceSink`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom2::{AnchorPair, AnchorTransform, Vec2};
use crate::placement::{AnchorChoice, ScaleMode};
use crate::region::Extent;

/// What happened to one dependent region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionTrace {
    pub region_id: String,
    pub anchor: AnchorChoice,
    pub baseline_center: Vec2,
    pub new_center: Vec2,
    /// `new_center - baseline_center`.
    pub delta: Vec2,
    pub extent_before: Extent,
    pub extent_after: Extent,
    pub angle_before: f64,
    pub angle_after: f64,
}

/// Diagnostics of one batch placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementTrace {
    pub image_key: Option<String>,
    pub disable_rotation: bool,
    pub lock_scale: bool,
    pub translate_only: bool,
    pub scale_mode: ScaleMode,
    pub base: AnchorPair,
    pub detected: AnchorPair,
    pub transform: AnchorTransform,
    pub angle_delta_deg: f64,
    pub delta_m1: Vec2,
    pub delta_m2: Vec2,
    pub delta_mid: Vec2,
    pub regions: Vec<RegionTrace>,
}

/// Diagnostics of one single-region move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveTrace {
    pub region: RegionTrace,
    pub pivot_base: Vec2,
    pub pivot_det: Vec2,
    /// Solved scale, reported only.
    pub scale: f64,
    /// Rotation actually applied (`0` when rotation is disabled).
    pub applied_rotation_deg: f64,
    /// Translation part of the applied rigid map about the origin.
    pub translation: Vec2,
}

/// Receiver of placement diagnostics.
pub trait TraceSink {
    fn emit(&mut self, trace: &PlacementTrace);

    fn emit_move(&mut self, _trace: &MoveTrace) {}
}

/// Collects batch traces in memory.
impl TraceSink for Vec<PlacementTrace> {
    fn emit(&mut self, trace: &PlacementTrace) {
        self.push(trace.clone());
    }
}

/// Emits traces as `tracing` events at INFO level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&mut self, trace: &PlacementTrace) {
        tracing::info!(
            image_key = trace.image_key.as_deref().unwrap_or("<none>"),
            disable_rotation = trace.disable_rotation,
            lock_scale = trace.lock_scale,
            translate_only = trace.translate_only,
            scale_mode = ?trace.scale_mode,
            base_m1 = %Pt(trace.base.m1),
            base_m2 = %Pt(trace.base.m2),
            det_m1 = %Pt(trace.detected.m1),
            det_m2 = %Pt(trace.detected.m2),
            "place_summary"
        );
        tracing::info!(
            d_m1 = %Pt(trace.delta_m1),
            d_m2 = %Pt(trace.delta_m2),
            d_mid = %Pt(trace.delta_mid),
            angle_delta_deg = trace.angle_delta_deg,
            scale = trace.transform.scale,
            "place_deltas"
        );
        for region in &trace.regions {
            tracing::info!(roi = %region.region_id, "place_roi {region}");
        }
    }

    fn emit_move(&mut self, trace: &MoveTrace) {
        tracing::info!(
            roi = %trace.region.region_id,
            pivot_base = %Pt(trace.pivot_base),
            pivot_det = %Pt(trace.pivot_det),
            rot_deg = trace.applied_rotation_deg,
            scale = trace.scale,
            translation = %Pt(trace.translation),
            "move_roi {}",
            trace.region
        );
    }
}

/// `(x,y)` with three decimals.
struct Pt(Vec2);

impl fmt::Display for Pt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3},{:.3})", self.0.x, self.0.y)
    }
}

struct Size(Extent);

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.0.bbox_size();
        write!(
            f,
            "({:.3},{:.3},{:.3},{:.3})",
            w,
            h,
            self.0.outer_radius(),
            self.0.inner_radius()
        )
    }
}

impl fmt::Display for RegionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} anchor={:?} baseC={} newC={} dxdy={} baseSize={} newSize={} baseAng={:.3} newAng={:.3}",
            self.region_id,
            self.anchor,
            Pt(self.baseline_center),
            Pt(self.new_center),
            Pt(self.delta),
            Size(self.extent_before),
            Size(self.extent_after),
            self.angle_before,
            self.angle_after
        )
    }
}

impl fmt::Display for PlacementTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "imageKey='{}' disableRot={} scaleLock={} translateOnly={} angDeltaDeg={:.3} scale={:.4} rois={}",
            self.image_key.as_deref().unwrap_or("<none>"),
            self.disable_rotation,
            self.lock_scale,
            self.translate_only,
            self.angle_delta_deg,
            self.transform.scale,
            self.regions.len()
        )
    }
}
