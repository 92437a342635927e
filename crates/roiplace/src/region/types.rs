use serde::{Deserialize, Serialize};

use crate::geom2::Vec2;

/// Closed set of ROI shape variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoiShape {
    Rectangle,
    Circle,
    Annulus,
}

/// What a region stands for in the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoiRole {
    Master1Pattern,
    Master1Search,
    Master2Pattern,
    Master2Search,
    #[default]
    Inspection,
}

impl RoiRole {
    /// True for the four master roles (pattern and search windows).
    #[inline]
    pub fn is_master(self) -> bool {
        !matches!(self, RoiRole::Inspection)
    }
}

/// Size of a region; the variant is the region's shape.
///
/// Serialized inline with the region, tagged by a `shape` field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum Extent {
    Rectangle {
        width: f64,
        height: f64,
    },
    Circle {
        r: f64,
    },
    Annulus {
        r: f64,
        #[serde(alias = "RInner")]
        r_inner: f64,
    },
}

impl Extent {
    #[inline]
    pub fn shape(&self) -> RoiShape {
        match self {
            Extent::Rectangle { .. } => RoiShape::Rectangle,
            Extent::Circle { .. } => RoiShape::Circle,
            Extent::Annulus { .. } => RoiShape::Annulus,
        }
    }

    /// Axis-aligned bounding size `(width, height)` before rotation.
    #[inline]
    pub fn bbox_size(&self) -> (f64, f64) {
        match *self {
            Extent::Rectangle { width, height } => (width, height),
            Extent::Circle { r } | Extent::Annulus { r, .. } => (2.0 * r, 2.0 * r),
        }
    }

    /// Outer radius; `0.0` for rectangles.
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        match *self {
            Extent::Rectangle { .. } => 0.0,
            Extent::Circle { r } | Extent::Annulus { r, .. } => r,
        }
    }

    /// Inner radius; `0.0` unless annulus.
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        match *self {
            Extent::Annulus { r_inner, .. } => r_inner,
            _ => 0.0,
        }
    }
}

/// One region of interest.
///
/// `(x, y)` is the rectangle-style center and `(cx, cy)` the circle-style
/// center. Both are kept on every region; `center()` reads the one that
/// matches the shape and `set_center()` writes both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub role: RoiRole,
    #[serde(default, alias = "AngleDeg")]
    pub angle_deg: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub cx: f64,
    #[serde(default)]
    pub cy: f64,
    #[serde(flatten)]
    pub extent: Extent,
}

impl Region {
    /// Region with the given extent centered at `center`, role `Inspection`,
    /// angle `0`.
    pub fn new(id: impl Into<String>, center: Vec2, extent: Extent) -> Self {
        let mut region = Self {
            id: id.into(),
            label: None,
            role: RoiRole::Inspection,
            angle_deg: 0.0,
            x: 0.0,
            y: 0.0,
            cx: 0.0,
            cy: 0.0,
            extent,
        };
        region.set_center(center);
        region
    }

    pub fn rectangle(id: impl Into<String>, center: Vec2, width: f64, height: f64) -> Self {
        Self::new(id, center, Extent::Rectangle { width, height })
    }

    pub fn circle(id: impl Into<String>, center: Vec2, r: f64) -> Self {
        Self::new(id, center, Extent::Circle { r })
    }

    pub fn annulus(id: impl Into<String>, center: Vec2, r: f64, r_inner: f64) -> Self {
        Self::new(id, center, Extent::Annulus { r, r_inner })
    }

    #[must_use]
    pub fn with_role(mut self, role: RoiRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_angle_deg(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn shape(&self) -> RoiShape {
        self.extent.shape()
    }
}
