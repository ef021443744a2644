use crate::foundation::core::{Color, Vector2, Vector3, Vector4};
use crate::foundation::ids::ObjectRef;
use crate::scene::animation::{
    AnimationBinding, AnimationValueType, BoundAnimation, CubicBezierEasingFunction,
    ExpressionAnimation, KeyFrameAnimation, KeyFrameValue, StepEasingFunction,
};
use crate::scene::brush::{
    ColorBrush, ColorGradientStop, DropShadow, EffectBrush, EffectFactory, LinearGradientBrush,
    RadialGradientBrush, SurfaceBrush,
};
use crate::scene::geometry::{
    CanvasGeometry, EllipseGeometry, Path, PathGeometry, RectangleGeometry,
    RoundedRectangleGeometry,
};
use crate::scene::visual::{
    ContainerShape, ContainerVisual, GeometricClip, InsetClip, ShapeVisual, SpriteShape,
    SpriteVisual, VisualSurface,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Outgoing references of one object, in declared field order.
pub type RefList = SmallVec<[ObjectRef; 4]>;

/// Value in an object's property set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// `float`.
    Scalar(f32),
    /// `float2`.
    Vector2(Vector2),
    /// `float3`.
    Vector3(Vector3),
    /// `float4`.
    Vector4(Vector4),
    /// `Color`.
    Color(Color),
}

/// Closed set of object kinds the generator knows how to construct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ObjectKind {
    ContainerVisual(ContainerVisual),
    ShapeVisual(ShapeVisual),
    SpriteVisual(SpriteVisual),
    VisualSurface(VisualSurface),
    ContainerShape(ContainerShape),
    SpriteShape(SpriteShape),
    ColorBrush(ColorBrush),
    LinearGradientBrush(LinearGradientBrush),
    RadialGradientBrush(RadialGradientBrush),
    ColorGradientStop(ColorGradientStop),
    EffectBrush(EffectBrush),
    SurfaceBrush(SurfaceBrush),
    EffectFactory(EffectFactory),
    DropShadow(DropShadow),
    EllipseGeometry(EllipseGeometry),
    RectangleGeometry(RectangleGeometry),
    RoundedRectangleGeometry(RoundedRectangleGeometry),
    PathGeometry(PathGeometry),
    Path(Path),
    CanvasGeometry(CanvasGeometry),
    InsetClip(InsetClip),
    GeometricClip(GeometricClip),
    KeyFrameAnimation(KeyFrameAnimation),
    ExpressionAnimation(ExpressionAnimation),
    AnimationController,
    LinearEasing,
    StepEasing(StepEasingFunction),
    CubicBezierEasing(CubicBezierEasingFunction),
}

macro_rules! impl_from_kind {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ObjectKind {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_kind! {
    ContainerVisual => ContainerVisual,
    ShapeVisual => ShapeVisual,
    SpriteVisual => SpriteVisual,
    VisualSurface => VisualSurface,
    ContainerShape => ContainerShape,
    SpriteShape => SpriteShape,
    ColorBrush => ColorBrush,
    LinearGradientBrush => LinearGradientBrush,
    RadialGradientBrush => RadialGradientBrush,
    ColorGradientStop => ColorGradientStop,
    EffectBrush => EffectBrush,
    SurfaceBrush => SurfaceBrush,
    EffectFactory => EffectFactory,
    DropShadow => DropShadow,
    EllipseGeometry => EllipseGeometry,
    RectangleGeometry => RectangleGeometry,
    RoundedRectangleGeometry => RoundedRectangleGeometry,
    PathGeometry => PathGeometry,
    Path => Path,
    CanvasGeometry => CanvasGeometry,
    InsetClip => InsetClip,
    GeometricClip => GeometricClip,
    KeyFrameAnimation => KeyFrameAnimation,
    ExpressionAnimation => ExpressionAnimation,
    StepEasing => StepEasingFunction,
    CubicBezierEasing => CubicBezierEasingFunction,
}

/// Runtime base type a reference slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KindFamily {
    /// `Visual`: container, shape and sprite visuals.
    Visual,
    /// `CompositionShape`: container and sprite shapes.
    Shape,
    /// `CompositionBrush`.
    Brush,
    /// `CompositionColorGradientStop`.
    ColorGradientStop,
    /// `CompositionEffectFactory`.
    EffectFactory,
    /// `CompositionShadow`.
    Shadow,
    /// `CompositionGeometry`. Canvas geometries are not part of it.
    Geometry,
    /// `CompositionPath`.
    Path,
    /// Direct2D path data behind a `CompositionPath`.
    CanvasGeometry,
    /// `CompositionClip`.
    Clip,
    /// `ICompositionSurface`.
    Surface,
    /// `CompositionAnimation`.
    Animation,
    /// `CompositionEasingFunction`.
    EasingFunction,
    /// `AnimationController`.
    AnimationController,
}

impl KindFamily {
    /// Runtime type name, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Shape => "CompositionShape",
            Self::Brush => "CompositionBrush",
            Self::ColorGradientStop => "CompositionColorGradientStop",
            Self::EffectFactory => "CompositionEffectFactory",
            Self::Shadow => "CompositionShadow",
            Self::Geometry => "CompositionGeometry",
            Self::Path => "CompositionPath",
            Self::CanvasGeometry => "CanvasGeometry",
            Self::Clip => "CompositionClip",
            Self::Surface => "ICompositionSurface",
            Self::Animation => "CompositionAnimation",
            Self::EasingFunction => "CompositionEasingFunction",
            Self::AnimationController => "AnimationController",
        }
    }
}

impl std::fmt::Display for KindFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ObjectKind {
    /// Runtime type constructed for this kind (routine return type).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ContainerVisual(_) => "ContainerVisual",
            Self::ShapeVisual(_) => "ShapeVisual",
            Self::SpriteVisual(_) => "SpriteVisual",
            Self::VisualSurface(_) => "CompositionVisualSurface",
            Self::ContainerShape(_) => "CompositionContainerShape",
            Self::SpriteShape(_) => "CompositionSpriteShape",
            Self::ColorBrush(_) => "CompositionColorBrush",
            Self::LinearGradientBrush(_) => "CompositionLinearGradientBrush",
            Self::RadialGradientBrush(_) => "CompositionRadialGradientBrush",
            Self::ColorGradientStop(_) => "CompositionColorGradientStop",
            Self::EffectBrush(_) => "CompositionEffectBrush",
            Self::SurfaceBrush(_) => "CompositionSurfaceBrush",
            Self::EffectFactory(_) => "CompositionEffectFactory",
            Self::DropShadow(_) => "DropShadow",
            Self::EllipseGeometry(_) => "CompositionEllipseGeometry",
            Self::RectangleGeometry(_) => "CompositionRectangleGeometry",
            Self::RoundedRectangleGeometry(_) => "CompositionRoundedRectangleGeometry",
            Self::PathGeometry(_) => "CompositionPathGeometry",
            Self::Path(_) => "CompositionPath",
            Self::CanvasGeometry(_) => "CanvasGeometry",
            Self::InsetClip(_) => "InsetClip",
            Self::GeometricClip(_) => "CompositionGeometricClip",
            Self::KeyFrameAnimation(a) => match a.value_type {
                AnimationValueType::Scalar => "ScalarKeyFrameAnimation",
                AnimationValueType::Vector2 => "Vector2KeyFrameAnimation",
                AnimationValueType::Vector3 => "Vector3KeyFrameAnimation",
                AnimationValueType::Vector4 => "Vector4KeyFrameAnimation",
                AnimationValueType::Color => "ColorKeyFrameAnimation",
                AnimationValueType::Boolean => "BooleanKeyFrameAnimation",
                AnimationValueType::Path => "PathKeyFrameAnimation",
            },
            Self::ExpressionAnimation(_) => "ExpressionAnimation",
            Self::AnimationController => "AnimationController",
            Self::LinearEasing => "LinearEasingFunction",
            Self::StepEasing(_) => "StepEasingFunction",
            Self::CubicBezierEasing(_) => "CubicBezierEasingFunction",
        }
    }

    /// Stored-field category. Related kinds share one category so their `FieldId`s share one
    /// dense sequence.
    pub fn storage_category(&self) -> &'static str {
        match self {
            Self::KeyFrameAnimation(_) => "CompositionAnimation",
            Self::LinearEasing | Self::StepEasing(_) | Self::CubicBezierEasing(_) => {
                "CompositionEasingFunction"
            }
            _ => self.type_name(),
        }
    }

    /// Stem used for generated routine names: the type name without the `Composition` prefix.
    pub fn name_stem(&self) -> &'static str {
        let name = self.type_name();
        name.strip_prefix("Composition").unwrap_or(name)
    }

    /// Base type family, used to check a reference against the slot it fills.
    pub fn family(&self) -> KindFamily {
        match self {
            Self::ContainerVisual(_) | Self::ShapeVisual(_) | Self::SpriteVisual(_) => {
                KindFamily::Visual
            }
            Self::ContainerShape(_) | Self::SpriteShape(_) => KindFamily::Shape,
            Self::ColorBrush(_)
            | Self::LinearGradientBrush(_)
            | Self::RadialGradientBrush(_)
            | Self::EffectBrush(_)
            | Self::SurfaceBrush(_) => KindFamily::Brush,
            Self::ColorGradientStop(_) => KindFamily::ColorGradientStop,
            Self::EffectFactory(_) => KindFamily::EffectFactory,
            Self::DropShadow(_) => KindFamily::Shadow,
            Self::EllipseGeometry(_)
            | Self::RectangleGeometry(_)
            | Self::RoundedRectangleGeometry(_)
            | Self::PathGeometry(_) => KindFamily::Geometry,
            Self::Path(_) => KindFamily::Path,
            Self::CanvasGeometry(_) => KindFamily::CanvasGeometry,
            Self::InsetClip(_) | Self::GeometricClip(_) => KindFamily::Clip,
            Self::VisualSurface(_) => KindFamily::Surface,
            Self::KeyFrameAnimation(_) | Self::ExpressionAnimation(_) => KindFamily::Animation,
            Self::LinearEasing | Self::StepEasing(_) | Self::CubicBezierEasing(_) => {
                KindFamily::EasingFunction
            }
            Self::AnimationController => KindFamily::AnimationController,
        }
    }

    /// `true` for the animation controller kind, which is fetched from its target and never
    /// constructed.
    pub fn is_controller(&self) -> bool {
        matches!(self, Self::AnimationController)
    }

    /// Kind-specific references in declared field order.
    pub fn references(&self) -> RefList {
        let mut out = RefList::new();
        match self {
            Self::ContainerVisual(v) => {
                out.extend(v.visual.clip);
                out.extend(v.children.iter().copied());
            }
            Self::ShapeVisual(v) => {
                out.extend(v.visual.clip);
                out.extend(v.children.iter().copied());
                out.extend(v.shapes.iter().copied());
            }
            Self::SpriteVisual(v) => {
                out.extend(v.visual.clip);
                out.extend(v.brush);
                out.extend(v.shadow);
                out.extend(v.children.iter().copied());
            }
            Self::VisualSurface(s) => out.extend(s.source_visual),
            Self::ContainerShape(s) => out.extend(s.shapes.iter().copied()),
            Self::SpriteShape(s) => {
                out.extend(s.geometry);
                out.extend(s.fill_brush);
                out.extend(s.stroke_brush);
            }
            Self::LinearGradientBrush(b) => out.extend(b.gradient.color_stops.iter().copied()),
            Self::RadialGradientBrush(b) => out.extend(b.gradient.color_stops.iter().copied()),
            Self::EffectBrush(b) => {
                out.push(b.effect);
                out.extend(b.sources.iter().map(|s| s.brush));
            }
            Self::SurfaceBrush(b) => out.extend(b.surface),
            Self::DropShadow(s) => out.extend(s.mask),
            Self::PathGeometry(g) => out.extend(g.path),
            Self::Path(p) => out.push(p.source),
            Self::GeometricClip(c) => out.extend(c.geometry),
            Self::KeyFrameAnimation(a) => {
                for kf in &a.key_frames {
                    if let KeyFrameValue::Path(path) = kf.value {
                        out.push(path);
                    }
                    out.extend(kf.easing);
                }
                out.extend(a.reference_parameters.iter().map(|(_, r)| *r));
            }
            Self::ExpressionAnimation(a) => {
                out.extend(a.reference_parameters.iter().map(|(_, r)| *r));
            }
            Self::ColorBrush(_)
            | Self::ColorGradientStop(_)
            | Self::EffectFactory(_)
            | Self::EllipseGeometry(_)
            | Self::RectangleGeometry(_)
            | Self::RoundedRectangleGeometry(_)
            | Self::CanvasGeometry(_)
            | Self::InsetClip(_)
            | Self::AnimationController
            | Self::LinearEasing
            | Self::StepEasing(_)
            | Self::CubicBezierEasing(_) => {}
        }
        out
    }
}

/// Immutable scene-description object as produced upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Kind tag and typed per-kind fields.
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Free-form comment, written into generated code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Property set, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<(String, PropertyValue)>,
    /// Animations bound to this object's properties, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animators: Vec<AnimationBinding>,
}

impl SceneObject {
    /// Object of `kind` with no comment, properties or animators.
    pub fn new(kind: impl Into<ObjectKind>) -> Self {
        Self {
            kind: kind.into(),
            comment: None,
            properties: Vec::new(),
            animators: Vec::new(),
        }
    }

    /// `AnimationController` object.
    pub fn controller() -> Self {
        Self::new(ObjectKind::AnimationController)
    }

    /// `LinearEasingFunction` object.
    pub fn linear_easing() -> Self {
        Self::new(ObjectKind::LinearEasing)
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append a property-set entry.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }

    /// Append an animation binding.
    pub fn with_animator(mut self, binding: AnimationBinding) -> Self {
        self.animators.push(binding);
        self
    }

    /// Construction edges: kind references, then each binding's animation (and expression).
    pub fn construction_edges(&self) -> RefList {
        let mut out = self.kind.references();
        for binding in &self.animators {
            match binding.animation {
                BoundAnimation::Animation(a) => out.push(a),
                BoundAnimation::ProgressBound {
                    animation,
                    expression,
                } => {
                    out.push(animation);
                    out.push(expression);
                }
            }
        }
        out
    }

    /// Deferred edges: controller references, in binding order.
    pub fn deferred_edges(&self) -> RefList {
        self.animators
            .iter()
            .filter_map(|b| b.controller.map(|c| c.controller))
            .collect()
    }

    /// Short human description: kind plus comment when present.
    pub fn describe(&self) -> String {
        match &self.comment {
            Some(c) if !c.trim().is_empty() => format!("{}: {c}", self.kind.name_stem()),
            _ => self.kind.name_stem().to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
