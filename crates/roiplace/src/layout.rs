//! Baseline layout file model.
//!
//! A layout is the authored snapshot placement starts from: master regions,
//! dependent regions, the per-region anchor map and the analyze flags.
//! Loading validates it; placement never writes back to it.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom2::AnchorPair;
use crate::placement::{
    place, resolve_anchor_choice, AnchorChoice, PlacementInput, PlacementOutput, ScaleMode,
};
use crate::region::{Extent, Region, RoiRole};

/// Errors raised while loading or querying a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate region id '{id}'")]
    DuplicateId { id: String },

    #[error("region '{id}': inner radius {r_inner} exceeds outer radius {r}")]
    InnerRadiusExceedsOuter { id: String, r: f64, r_inner: f64 },

    #[error("region '{id}': negative size")]
    NegativeSize { id: String },

    #[error("region '{id}': non-finite {field}")]
    NonFinite { id: String, field: &'static str },

    #[error("layout has no {role:?} region")]
    MissingMaster { role: RoiRole },

    #[error("unknown region id '{id}'")]
    UnknownRegion { id: String },
}

/// Placement flags stored with the layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    #[serde(default)]
    pub disable_rot: bool,
    #[serde(default = "default_true")]
    pub scale_lock: bool,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    #[serde(default = "default_true")]
    pub use_mid_anchor_fallback: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            disable_rot: false,
            scale_lock: true,
            scale_mode: ScaleMode::None,
            use_mid_anchor_fallback: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Authored baseline layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineLayout {
    #[serde(default)]
    pub masters: Vec<Region>,
    #[serde(default)]
    pub dependents: Vec<Region>,
    /// Anchor per dependent region id.
    #[serde(default)]
    pub anchors: BTreeMap<String, AnchorChoice>,
    #[serde(default)]
    pub analyze: AnalyzeOptions,
    /// Dependent baselines authored against specific images.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inspection_baselines_by_image: BTreeMap<String, Vec<Region>>,
}

impl BaselineLayout {
    /// Parse and validate.
    pub fn from_json_str(s: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(s)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json_string(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Unique ids across masters and dependents, finite numbers, non-negative
    /// sizes, and `r_inner <= r` for annuli. Per-image lists are checked the
    /// same way, each on its own.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_regions(self.masters.iter().chain(&self.dependents))?;
        for regions in self.inspection_baselines_by_image.values() {
            check_regions(regions.iter())?;
        }
        Ok(())
    }

    /// Centers of the `Master1Pattern` and `Master2Pattern` regions.
    pub fn baseline_anchors(&self) -> Result<AnchorPair, LayoutError> {
        let center_of = |role: RoiRole| {
            self.masters
                .iter()
                .find(|r| r.role == role)
                .map(Region::center)
                .ok_or(LayoutError::MissingMaster { role })
        };
        Ok(AnchorPair::new(
            center_of(RoiRole::Master1Pattern)?,
            center_of(RoiRole::Master2Pattern)?,
        ))
    }

    /// Placement input for `detected` using the layout's anchors and flags.
    pub fn placement_input(&self, detected: AnchorPair) -> Result<PlacementInput, LayoutError> {
        let mut input = PlacementInput::new(self.baseline_anchors()?, detected)
            .with_disable_rotation(self.analyze.disable_rot)
            .with_lock_scale(self.analyze.scale_lock)
            .with_scale_mode(self.analyze.scale_mode)
            .with_fallback_to_midpoint(self.analyze.use_mid_anchor_fallback);
        input.anchor_by_region_id = self.anchors.clone();
        Ok(input)
    }

    /// Dependent baseline for an image: its own list when one was authored
    /// (key compared ASCII case-insensitively), the default list otherwise.
    pub fn dependents_for(&self, image_key: Option<&str>) -> &[Region] {
        image_key
            .and_then(|key| {
                self.inspection_baselines_by_image
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v.as_slice())
            })
            .unwrap_or(&self.dependents)
    }

    /// Batch placement of this layout.
    pub fn place(&self, input: &PlacementInput) -> PlacementOutput {
        place(
            input,
            &self.masters,
            self.dependents_for(input.image_key.as_deref()),
        )
    }

    pub fn find(&self, id: &str) -> Result<&Region, LayoutError> {
        self.masters
            .iter()
            .chain(&self.dependents)
            .find(|r| r.id == id)
            .ok_or_else(|| LayoutError::UnknownRegion { id: id.to_string() })
    }

    /// Anchor the layout assigns to `id`, with the layout's fallback.
    pub fn anchor_for(&self, id: &str) -> AnchorChoice {
        resolve_anchor_choice(&self.anchors, id, self.analyze.use_mid_anchor_fallback)
    }
}

fn check_regions<'a>(regions: impl Iterator<Item = &'a Region>) -> Result<(), LayoutError> {
    let mut seen = HashSet::new();
    for r in regions {
        if !seen.insert(r.id.as_str()) {
            return Err(LayoutError::DuplicateId { id: r.id.clone() });
        }
        check_region(r)?;
    }
    Ok(())
}

fn check_region(r: &Region) -> Result<(), LayoutError> {
    let non_finite = |field| LayoutError::NonFinite {
        id: r.id.clone(),
        field,
    };
    for (field, v) in [("x", r.x), ("y", r.y), ("cx", r.cx), ("cy", r.cy)] {
        if !v.is_finite() {
            return Err(non_finite(field));
        }
    }
    if !r.angle_deg.is_finite() {
        return Err(non_finite("angle_deg"));
    }
    let sizes = match r.extent {
        Extent::Rectangle { width, height } => [width, height],
        Extent::Circle { r } => [r, 0.0],
        Extent::Annulus { r, r_inner } => [r, r_inner],
    };
    if sizes.iter().any(|v| !v.is_finite()) {
        return Err(non_finite("size"));
    }
    if sizes.iter().any(|v| *v < 0.0) {
        return Err(LayoutError::NegativeSize { id: r.id.clone() });
    }
    if let Extent::Annulus { r: outer, r_inner } = r.extent {
        if r_inner > outer {
            return Err(LayoutError::InnerRadiusExceedsOuter {
                id: r.id.clone(),
                r: outer,
                r_inner,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    const LAYOUT: &str = r#"{
        "masters": [
            {"id": "m1", "role": "Master1Pattern", "shape": "Rectangle", "x": 0, "y": 0, "width": 10, "height": 10},
            {"id": "m2", "role": "Master2Pattern", "shape": "Rectangle", "x": 10, "y": 0, "width": 10, "height": 10}
        ],
        "dependents": [
            {"id": "r1", "shape": "Rectangle", "x": 4, "y": 1, "width": 6, "height": 8, "angle_deg": 12},
            {"id": "r2", "shape": "Circle", "cx": 6, "cy": 2, "r": 5, "AngleDeg": -5}
        ],
        "anchors": {"r1": "Master1", "r2": "Master2"},
        "analyze": {"disable_rot": true},
        "inspection_baselines_by_image": {
            "Shot_B.png": [
                {"id": "r1", "shape": "Rectangle", "x": 40, "y": 10, "width": 6, "height": 8}
            ]
        }
    }"#;

    #[test]
    fn loads_and_defaults_missing_flags() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        assert!(layout.analyze.disable_rot);
        assert!(layout.analyze.scale_lock);
        assert!(layout.analyze.use_mid_anchor_fallback);
        assert_eq!(layout.analyze.scale_mode, ScaleMode::None);
        assert_eq!(layout.dependents[1].angle_deg, -5.0);
    }

    #[test]
    fn disable_rot_defaults_to_false_when_missing() {
        let layout = BaselineLayout::from_json_str(r#"{"analyze": {"scale_lock": true}}"#).unwrap();
        assert!(!layout.analyze.disable_rot);
    }

    #[test]
    fn baseline_anchors_come_from_pattern_masters() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        let anchors = layout.baseline_anchors().unwrap();
        assert_eq!(anchors, AnchorPair::new(vector![0.0, 0.0], vector![10.0, 0.0]));

        let empty = BaselineLayout::default();
        assert!(matches!(
            empty.baseline_anchors(),
            Err(LayoutError::MissingMaster {
                role: RoiRole::Master1Pattern
            })
        ));
    }

    #[test]
    fn places_through_layout_flags() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        let detected = AnchorPair::new(vector![5.0, 5.0], vector![15.0, 5.0]);
        let input = layout.placement_input(detected).unwrap();
        assert!(input.disable_rotation);
        let out = layout.place(&input);
        assert_eq!(out.placed_dependents[0].center(), vector![9.0, 6.0]);
        assert_eq!(out.placed_dependents[1].center(), vector![11.0, 7.0]);
        assert_eq!(out.placed_masters[1].center(), vector![15.0, 5.0]);
    }

    #[test]
    fn per_image_baseline_replaces_default_list() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        assert_eq!(layout.dependents_for(Some("shot_b.PNG"))[0].x, 40.0);
        assert_eq!(layout.dependents_for(Some("other.png")).len(), 2);
        assert_eq!(layout.dependents_for(None).len(), 2);

        let detected = AnchorPair::new(vector![5.0, 5.0], vector![15.0, 5.0]);
        let input = layout
            .placement_input(detected)
            .unwrap()
            .with_image_key("SHOT_B.png");
        let out = layout.place(&input);
        assert_eq!(out.placed_dependents.len(), 1);
        assert_eq!(out.placed_dependents[0].center(), vector![45.0, 15.0]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{"dependents": [
            {"id": "a", "shape": "Circle", "r": 1},
            {"id": "a", "shape": "Circle", "r": 2}
        ]}"#;
        let err = BaselineLayout::from_json_str(json).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId { ref id } if id == "a"));
        assert_eq!(err.to_string(), "duplicate region id 'a'");
    }

    #[test]
    fn rejects_inner_radius_above_outer() {
        let json = r#"{"dependents": [{"id": "a", "shape": "Annulus", "r": 2, "r_inner": 3}]}"#;
        assert!(matches!(
            BaselineLayout::from_json_str(json),
            Err(LayoutError::InnerRadiusExceedsOuter { .. })
        ));
    }

    #[test]
    fn rejects_negative_size_and_bad_json() {
        let json = r#"{"dependents": [{"id": "a", "shape": "Rectangle", "width": -1, "height": 3}]}"#;
        assert!(matches!(
            BaselineLayout::from_json_str(json),
            Err(LayoutError::NegativeSize { .. })
        ));
        assert!(matches!(
            BaselineLayout::from_json_str("{"),
            Err(LayoutError::Json(_))
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut layout = BaselineLayout::default();
        layout
            .dependents
            .push(Region::circle("c", vector![f64::NAN, 0.0], 1.0));
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::NonFinite { field: "x", .. })
        ));
    }

    #[test]
    fn find_and_anchor_lookup() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        assert_eq!(layout.find("m2").unwrap().role, RoiRole::Master2Pattern);
        assert!(matches!(
            layout.find("nope"),
            Err(LayoutError::UnknownRegion { .. })
        ));
        assert_eq!(layout.anchor_for("r2"), AnchorChoice::Master2);
        assert_eq!(layout.anchor_for("nope"), AnchorChoice::Mid);
    }

    #[test]
    fn json_round_trip_keeps_layout() {
        let layout = BaselineLayout::from_json_str(LAYOUT).unwrap();
        let json = layout.to_json_string().unwrap();
        assert_eq!(BaselineLayout::from_json_str(&json).unwrap(), layout);
    }
}
