use crate::foundation::core::{Matrix3x2, Matrix4x4, Vector2, Vector3};
use crate::foundation::ids::ObjectRef;
use crate::scene::enums::{BorderMode, StrokeCap, StrokeLineJoin};
use serde::{Deserialize, Serialize};

/// Optional properties shared by every visual.
///
/// `None` means "not set in the source": the emitter writes the unset sentinel, never a zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualProps {
    /// Border mode; `Inherit` is treated as unset.
    pub border_mode: Option<BorderMode>,
    /// Center of rotation and scale.
    pub center_point: Option<Vector3>,
    /// `InsetClip` or `GeometricClip`.
    pub clip: Option<ObjectRef>,
    /// Visibility.
    pub is_visible: Option<bool>,
    /// Offset relative to the parent.
    pub offset: Option<Vector3>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f32>,
    /// Rotation in degrees.
    pub rotation_angle_in_degrees: Option<f32>,
    /// Rotation axis.
    pub rotation_axis: Option<Vector3>,
    /// Scale.
    pub scale: Option<Vector3>,
    /// Size.
    pub size: Option<Vector2>,
    /// Full transform matrix.
    pub transform_matrix: Option<Matrix4x4>,
}

/// Visual holding an ordered list of child visuals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerVisual {
    /// Shared visual properties.
    #[serde(flatten)]
    pub visual: VisualProps,
    /// Children, bottom-most first.
    #[serde(default)]
    pub children: Vec<ObjectRef>,
}

/// Visual hosting a shape tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeVisual {
    /// Shared visual properties.
    #[serde(flatten)]
    pub visual: VisualProps,
    /// Child visuals.
    #[serde(default)]
    pub children: Vec<ObjectRef>,
    /// Shapes, bottom-most first.
    #[serde(default)]
    pub shapes: Vec<ObjectRef>,
}

/// Visual painted by a brush.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteVisual {
    /// Shared visual properties.
    #[serde(flatten)]
    pub visual: VisualProps,
    /// Fill brush.
    #[serde(default)]
    pub brush: Option<ObjectRef>,
    /// Drop shadow.
    #[serde(default)]
    pub shadow: Option<ObjectRef>,
    /// Child visuals.
    #[serde(default)]
    pub children: Vec<ObjectRef>,
}

/// Surface rendering a visual subtree, usable as a brush source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSurface {
    /// Visual to render.
    pub source_visual: Option<ObjectRef>,
    /// Size of the captured area.
    pub source_size: Option<Vector2>,
    /// Offset of the captured area.
    pub source_offset: Option<Vector2>,
}

/// 2D transform properties shared by shapes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeProps {
    /// Center of rotation and scale.
    pub center_point: Option<Vector2>,
    /// Offset.
    pub offset: Option<Vector2>,
    /// Rotation in degrees.
    pub rotation_angle_in_degrees: Option<f32>,
    /// Scale.
    pub scale: Option<Vector2>,
    /// Full transform matrix.
    pub transform_matrix: Option<Matrix3x2>,
}

/// Shape grouping child shapes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerShape {
    /// Shared shape properties.
    #[serde(flatten)]
    pub shape: ShapeProps,
    /// Child shapes.
    #[serde(default)]
    pub shapes: Vec<ObjectRef>,
}

/// Stroke settings of a sprite shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeProps {
    /// Dash pattern; empty means solid.
    pub dash_array: Vec<f32>,
    /// Cap on each dash.
    pub dash_cap: Option<StrokeCap>,
    /// Offset into the dash pattern.
    pub dash_offset: Option<f32>,
    /// Cap at the start of open figures.
    pub start_cap: Option<StrokeCap>,
    /// Cap at the end of open figures.
    pub end_cap: Option<StrokeCap>,
    /// Corner join.
    pub line_join: Option<StrokeLineJoin>,
    /// Miter limit.
    pub miter_limit: Option<f32>,
    /// Thickness.
    pub thickness: Option<f32>,
    /// Stroke ignores the shape's scale.
    pub is_non_scaling: Option<bool>,
}

/// Shape filling and stroking a geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteShape {
    /// Shared shape properties.
    #[serde(flatten)]
    pub shape: ShapeProps,
    /// Geometry to paint.
    #[serde(default)]
    pub geometry: Option<ObjectRef>,
    /// Fill brush.
    #[serde(default)]
    pub fill_brush: Option<ObjectRef>,
    /// Stroke brush.
    #[serde(default)]
    pub stroke_brush: Option<ObjectRef>,
    /// Stroke settings.
    #[serde(default)]
    pub stroke: StrokeProps,
}

/// Rectangular clip inset from the visual's bounds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsetClip {
    /// Bottom inset.
    pub bottom_inset: Option<f32>,
    /// Left inset.
    pub left_inset: Option<f32>,
    /// Right inset.
    pub right_inset: Option<f32>,
    /// Top inset.
    pub top_inset: Option<f32>,
    /// Center of scale.
    pub center_point: Option<Vector2>,
    /// Scale.
    pub scale: Option<Vector2>,
}

/// Clip to a geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometricClip {
    /// Clip geometry.
    pub geometry: Option<ObjectRef>,
}
