//! `scenegen` turns an animated scene object graph into construction routines for a retained-mode
//! composition runtime.
//!
//! A pass walks the graph from its roots, decides which objects need persistent storage, fixes a
//! dependency-first emission order and then asks a backend to emit one routine per object. The
//! C++/WinRT backend ([`CppWinrtEmitter`] with [`CppWinrtStringifier`]) is built in; other
//! backends plug in through [`FactoryEmitter`] and [`Stringifier`].
//!
//! ```no_run
//! # fn main() -> scenegen::CodegenResult<()> {
//! let graph = scenegen::SceneGraph::from_json_str(&std::fs::read_to_string("scene.json").map_err(anyhow::Error::from)?)?;
//! let generated = scenegen::generate_cppwinrt(&graph, &scenegen::CodegenConfig::default())?;
//! let packaged = generated.package();
//! println!("{}", packaged.source);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod emit;
pub(crate) mod foundation;
pub(crate) mod generate;
pub(crate) mod graph;
pub(crate) mod plan;
pub(crate) mod scene;
pub(crate) mod schedule;
pub(crate) mod stringify;

pub use emit::builder::CodeBuilder;
pub use emit::cppwinrt::CppWinrtEmitter;
pub use emit::factory::{EmitContext, FactoryEmitter, FactoryRef, SourceLayout};
pub use foundation::core::{Color, Matrix3x2, Matrix4x4, TimeSpan, Vector2, Vector3, Vector4};
pub use foundation::error::{CodegenError, CodegenResult, NodeLabel};
pub use foundation::ids::{FieldId, NodeIdx, ObjectRef};
pub use generate::config::CodegenConfig;
pub use generate::output::{
    GeneratedSource, OutputUnit, PackagedSource, SourceFingerprint, UnitKind,
};
pub use generate::{GenerationPass, generate, generate_cppwinrt};
pub use graph::registry::{Node, NodeRegistry};
pub use graph::walker::{GraphWalker, walk};
pub use plan::order::EmissionOrder;
pub use plan::storage::{dump, field_name, plan_storage, requires_storage};
pub use scene::animation::{
    AnimationBinding, AnimationValueType, BoundAnimation, ControllerBinding,
    CubicBezierEasingFunction, ExpressionAnimation, KeyFrame, KeyFrameAnimation, KeyFrameValue,
    StepEasingFunction,
};
pub use scene::brush::{
    ColorBrush, ColorGradientStop, DropShadow, EffectBrush, EffectFactory, EffectSourceParameter,
    GradientProps, GraphicsEffect, LinearGradientBrush, RadialGradientBrush, SurfaceBrush,
};
pub use scene::enums::{
    BorderMode, ColorSpace, CompositeMode, FillRule, GradientExtendMode, GradientMappingMode,
    ShadowSourcePolicy, StrokeCap, StrokeLineJoin,
};
pub use scene::geometry::{
    CanvasGeometry, EllipseGeometry, GeometryProps, Path, PathGeometry, RectangleGeometry,
    RoundedRectangleGeometry,
};
pub use scene::graph::SceneGraph;
pub use scene::object::{KindFamily, ObjectKind, PropertyValue, RefList, SceneObject};
pub use scene::visual::{
    ContainerShape, ContainerVisual, GeometricClip, InsetClip, ShapeProps, ShapeVisual,
    SpriteShape, SpriteVisual, StrokeProps, VisualProps, VisualSurface,
};
pub use schedule::bindings::{AnimationScheduler, ControllerEntry, ControllerTable, StartStep};
pub use schedule::keyframes::{DurationSpec, KeyFrameRow, KeyFrameTable};
pub use stringify::cppwinrt::CppWinrtStringifier;
pub use stringify::{EnumValue, Literal, Stringifier};
