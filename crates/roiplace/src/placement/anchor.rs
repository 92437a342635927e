//! Anchor resolution for dependent regions and direct targets for masters.

use std::collections::BTreeMap;

use super::types::{AnchorChoice, PlacementInput};
use crate::geom2::{AnchorPair, Vec2};
use crate::region::{Region, RoiRole};

/// Anchor choice for `region_id`: explicit entry first, then the fallback
/// (`Mid` or `Master1`). Blank ids never match an entry.
pub fn resolve_anchor_choice(
    anchor_by_region_id: &BTreeMap<String, AnchorChoice>,
    region_id: &str,
    fallback_to_midpoint: bool,
) -> AnchorChoice {
    if !region_id.trim().is_empty() {
        if let Some(&choice) = anchor_by_region_id.get(region_id) {
            return choice;
        }
    }
    if fallback_to_midpoint {
        AnchorChoice::Mid
    } else {
        AnchorChoice::Master1
    }
}

/// Where a master region lands: pattern regions go to their detected anchor,
/// every other role has no target and stays put.
#[inline]
pub fn master_target(role: RoiRole, detected: &AnchorPair) -> Option<Vec2> {
    match role {
        RoiRole::Master1Pattern => Some(detected.m1),
        RoiRole::Master2Pattern => Some(detected.m2),
        _ => None,
    }
}

impl PlacementInput {
    #[inline]
    pub fn anchor_for(&self, region: &Region) -> AnchorChoice {
        resolve_anchor_choice(
            &self.anchor_by_region_id,
            &region.id,
            self.fallback_to_midpoint,
        )
    }
}
