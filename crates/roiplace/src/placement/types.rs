use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom2::AnchorPair;
use crate::region::Region;
use crate::trace::PlacementTrace;

/// Which reference point a dependent region pivots around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnchorChoice {
    Master1,
    Master2,
    Mid,
}

/// Requested size handling.
///
/// Accepted and recorded, never applied: placement keeps sizes as authored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    #[default]
    None,
    OffsetOnly,
}

/// Per-region placement rule derived from the mode flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Rotate the offset from the pivot, then translate onto the detected pivot.
    RotateTranslate,
    /// Translate by the anchor delta only.
    TranslateOnly,
}

impl PlacementMode {
    /// `disable_rotation` alone selects translation; `lock_scale` never
    /// re-enables rotation.
    #[inline]
    pub fn from_flags(disable_rotation: bool, lock_scale: bool) -> Self {
        let translate_only = disable_rotation && lock_scale;
        if translate_only || disable_rotation {
            PlacementMode::TranslateOnly
        } else {
            PlacementMode::RotateTranslate
        }
    }
}

/// Everything `place` needs besides the baseline regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementInput {
    /// Anchor positions the baseline layout was authored against.
    pub base: AnchorPair,
    /// Anchor positions found in the current image.
    pub detected: AnchorPair,
    #[serde(default)]
    pub disable_rotation: bool,
    #[serde(default = "default_true")]
    pub lock_scale: bool,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    /// Anchor used for dependent regions missing from `anchor_by_region_id`:
    /// `Mid` when set, `Master1` otherwise.
    #[serde(default = "default_true")]
    pub fallback_to_midpoint: bool,
    #[serde(default)]
    pub anchor_by_region_id: BTreeMap<String, AnchorChoice>,
    /// Image the detection came from; diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

fn default_true() -> bool {
    true
}

impl PlacementInput {
    /// Rotation enabled, scale locked, midpoint fallback, empty anchor map.
    pub fn new(base: AnchorPair, detected: AnchorPair) -> Self {
        Self {
            base,
            detected,
            disable_rotation: false,
            lock_scale: true,
            scale_mode: ScaleMode::None,
            fallback_to_midpoint: true,
            anchor_by_region_id: BTreeMap::new(),
            image_key: None,
        }
    }

    #[must_use]
    pub fn with_disable_rotation(mut self, disable_rotation: bool) -> Self {
        self.disable_rotation = disable_rotation;
        self
    }

    #[must_use]
    pub fn with_lock_scale(mut self, lock_scale: bool) -> Self {
        self.lock_scale = lock_scale;
        self
    }

    #[must_use]
    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    #[must_use]
    pub fn with_fallback_to_midpoint(mut self, fallback_to_midpoint: bool) -> Self {
        self.fallback_to_midpoint = fallback_to_midpoint;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, region_id: impl Into<String>, choice: AnchorChoice) -> Self {
        self.anchor_by_region_id.insert(region_id.into(), choice);
        self
    }

    #[must_use]
    pub fn with_image_key(mut self, image_key: impl Into<String>) -> Self {
        self.image_key = Some(image_key.into());
        self
    }

    #[inline]
    pub fn mode(&self) -> PlacementMode {
        PlacementMode::from_flags(self.disable_rotation, self.lock_scale)
    }

    /// `disable_rotation && lock_scale`, as reported in the trace.
    #[inline]
    pub fn translate_only(&self) -> bool {
        self.disable_rotation && self.lock_scale
    }
}

/// Result of one batch placement. Every region is a fresh copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutput {
    pub placed_masters: Vec<Region>,
    pub placed_dependents: Vec<Region>,
    pub trace: PlacementTrace,
}
