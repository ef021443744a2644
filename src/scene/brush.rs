use crate::foundation::core::{Color, Matrix3x2, Vector2, Vector3};
use crate::foundation::ids::ObjectRef;
use crate::scene::enums::{
    ColorSpace, CompositeMode, GradientExtendMode, GradientMappingMode, ShadowSourcePolicy,
};
use serde::{Deserialize, Serialize};

/// Solid color brush.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBrush {
    /// Fill color; unset leaves the runtime default.
    pub color: Option<Color>,
}

/// Properties shared by linear and radial gradient brushes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientProps {
    /// Anchor point.
    pub anchor_point: Option<Vector2>,
    /// Center of rotation and scale.
    pub center_point: Option<Vector2>,
    /// `ColorGradientStop` objects in order.
    pub color_stops: Vec<ObjectRef>,
    /// Extend mode.
    pub extend_mode: Option<GradientExtendMode>,
    /// Interpolation color space.
    pub interpolation_space: Option<ColorSpace>,
    /// Mapping mode.
    pub mapping_mode: Option<GradientMappingMode>,
    /// Offset.
    pub offset: Option<Vector2>,
    /// Rotation in degrees.
    pub rotation_angle_in_degrees: Option<f32>,
    /// Scale.
    pub scale: Option<Vector2>,
    /// Full transform matrix.
    pub transform_matrix: Option<Matrix3x2>,
}

/// Linear gradient brush.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientBrush {
    /// Shared gradient properties.
    #[serde(flatten)]
    pub gradient: GradientProps,
    /// Gradient start.
    #[serde(default)]
    pub start_point: Option<Vector2>,
    /// Gradient end.
    #[serde(default)]
    pub end_point: Option<Vector2>,
}

/// Radial gradient brush.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RadialGradientBrush {
    /// Shared gradient properties.
    #[serde(flatten)]
    pub gradient: GradientProps,
    /// Ellipse center.
    #[serde(default)]
    pub ellipse_center: Option<Vector2>,
    /// Ellipse radius.
    #[serde(default)]
    pub ellipse_radius: Option<Vector2>,
    /// Focal point offset from the center.
    #[serde(default)]
    pub gradient_origin_offset: Option<Vector2>,
}

/// One stop of a gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorGradientStop {
    /// Position along the gradient.
    pub offset: f32,
    /// Stop color.
    pub color: Color,
}

/// Named source bound into an effect brush.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSourceParameter {
    /// Source name; must match a name the effect graph declares. Preserved verbatim.
    pub name: String,
    /// Brush supplying the source.
    pub brush: ObjectRef,
}

/// Brush running an effect graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBrush {
    /// The `EffectFactory` object.
    pub effect: ObjectRef,
    /// Source parameters in declared order.
    #[serde(default)]
    pub sources: Vec<EffectSourceParameter>,
}

/// Brush painting a surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceBrush {
    /// Surface object, usually a `VisualSurface`.
    pub surface: Option<ObjectRef>,
}

/// Effect graph description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphicsEffect {
    /// Blend of named sources.
    Composite {
        /// Blend mode.
        mode: CompositeMode,
        /// Source names, bottom-most first.
        #[serde(default)]
        sources: Vec<String>,
    },
    /// Gaussian blur of one named source.
    GaussianBlur {
        /// Blur amount.
        blur_amount: f32,
        /// Source names; the first one is blurred.
        sources: Vec<String>,
    },
    /// Saturation adjustment. Representable but not emitted by any backend.
    Saturation {
        /// Saturation factor.
        saturation: f32,
        /// Source names.
        #[serde(default)]
        sources: Vec<String>,
    },
}

impl GraphicsEffect {
    /// Short effect name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Composite { .. } => "CompositeEffect",
            Self::GaussianBlur { .. } => "GaussianBlurEffect",
            Self::Saturation { .. } => "SaturationEffect",
        }
    }
}

/// Compiled effect graph shared by effect brushes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectFactory {
    /// The effect.
    pub effect: GraphicsEffect,
}

/// Drop shadow attached to a sprite visual.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropShadow {
    /// Blur radius.
    pub blur_radius: Option<f32>,
    /// Shadow color.
    pub color: Option<Color>,
    /// Mask brush.
    pub mask: Option<ObjectRef>,
    /// Shadow offset.
    pub offset: Option<Vector3>,
    /// Shadow opacity.
    pub opacity: Option<f32>,
    /// What the shadow is cast from.
    pub source_policy: Option<ShadowSourcePolicy>,
}
