use crate::foundation::core::Vector2;
use crate::foundation::ids::ObjectRef;
use crate::scene::enums::FillRule;
use serde::{Deserialize, Serialize};

/// Trim properties shared by every geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryProps {
    /// Trim end in `[0, 1]`.
    pub trim_end: Option<f32>,
    /// Trim start in `[0, 1]`.
    pub trim_start: Option<f32>,
    /// Trim offset.
    pub trim_offset: Option<f32>,
}

/// Ellipse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EllipseGeometry {
    /// Trim properties.
    #[serde(flatten)]
    pub geometry: GeometryProps,
    /// Center.
    #[serde(default)]
    pub center: Vector2,
    /// Radii.
    pub radius: Vector2,
}

/// Axis-aligned rectangle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleGeometry {
    /// Trim properties.
    #[serde(flatten)]
    pub geometry: GeometryProps,
    /// Top-left offset.
    #[serde(default)]
    pub offset: Option<Vector2>,
    /// Size.
    pub size: Vector2,
}

/// Rectangle with rounded corners.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundedRectangleGeometry {
    /// Trim properties.
    #[serde(flatten)]
    pub geometry: GeometryProps,
    /// Corner radii.
    pub corner_radius: Vector2,
    /// Top-left offset.
    #[serde(default)]
    pub offset: Option<Vector2>,
    /// Size.
    pub size: Vector2,
}

/// Geometry defined by a `Path`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    /// Trim properties.
    #[serde(flatten)]
    pub geometry: GeometryProps,
    /// The `Path` object.
    #[serde(default)]
    pub path: Option<ObjectRef>,
}

/// Composition path wrapping a canvas geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// The `CanvasGeometry` object.
    pub source: ObjectRef,
}

/// Device-independent path description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    /// Fill rule.
    #[serde(default = "default_fill_rule")]
    pub fill_rule: FillRule,
    /// Path data in SVG mini-language, passed through verbatim.
    pub data: String,
}

fn default_fill_rule() -> FillRule {
    FillRule::Alternate
}
