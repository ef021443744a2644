use super::*;
use crate::foundation::core::{Color, Vector2};
use crate::generate::config::CodegenConfig;
use crate::generate::generate_cppwinrt;
use crate::generate::output::{GeneratedSource, UnitKind};
use crate::scene::animation::{
    AnimationBinding, AnimationValueType, CubicBezierEasingFunction, ExpressionAnimation,
    KeyFrame, KeyFrameAnimation, KeyFrameValue,
};
use crate::scene::brush::{ColorBrush, EffectBrush, EffectFactory, GraphicsEffect};
use crate::scene::enums::FillRule;
use crate::scene::geometry::{CanvasGeometry, Path, PathGeometry};
use crate::scene::graph::SceneGraph;
use crate::scene::object::SceneObject;
use crate::scene::visual::{ContainerVisual, ShapeVisual, SpriteShape, SpriteVisual, VisualProps};
use crate::stringify::cppwinrt::CppWinrtStringifier;

fn run(g: &SceneGraph) -> CodegenResult<GeneratedSource> {
    generate_cppwinrt(g, &CodegenConfig::default())
}

fn factory<'a>(out: &'a GeneratedSource, name: &str) -> &'a str {
    &out.factory(name).unwrap().text
}

fn unit(out: &GeneratedSource, kind: UnitKind) -> &str {
    &out.units_of(kind).next().unwrap().text
}

fn scalar_anim(progress: &[f32]) -> SceneObject {
    SceneObject::new(KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        progress
            .iter()
            .enumerate()
            .map(|(i, &p)| KeyFrame::new(p, KeyFrameValue::Scalar(i as f32)))
            .collect(),
    ))
}

fn expression(text: &str) -> SceneObject {
    SceneObject::new(ExpressionAnimation {
        expression: text.to_owned(),
        target: None,
        reference_parameters: Vec::new(),
    })
}

#[test]
fn field_writer_lists_set_flags_and_unset_slots() {
    let mut w = FieldWriter::new("InsetClipProperty", &CppWinrtStringifier);
    w.set("LeftInset", Some("1.0F".into()));
    w.set("TopInset", None);
    assert!(!w.is_empty());

    let mut b = CodeBuilder::new();
    w.write(&mut b, "InsetClipProps clipProps");
    assert_eq!(
        b.finish(),
        "constexpr static const InsetClipProps clipProps =\n\
         {\n\
         \x20   InsetClipProperty::LeftInset,\n\
         \x20   1.0F, // LeftInset\n\
         \x20   { /* unset */ }, // TopInset\n\
         };\n"
    );
}

#[test]
fn field_writer_without_values_writes_none_flag() {
    let mut w = FieldWriter::new("GeometryProperty", &CppWinrtStringifier);
    w.set("TrimEnd", None);
    assert!(w.is_empty());
    let mut b = CodeBuilder::new();
    w.write(&mut b, "GeometryConfig geometryConfig");
    assert!(b.finish().contains("GeometryProperty::None,"));
}

#[test]
fn sprite_visual_routine_uses_property_table() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush {
        color: Some(Color::argb(0xFF, 0x12, 0x34, 0x56)),
    }));
    g.add_root(SceneObject::new(SpriteVisual {
        visual: VisualProps {
            opacity: Some(0.5),
            ..VisualProps::default()
        },
        brush: Some(brush),
        ..SpriteVisual::default()
    }));
    let out = run(&g).unwrap();

    let root = factory(&out, "Root");
    assert!(root.starts_with("// SpriteVisual\nSpriteVisual Root()\n{\n"));
    assert!(root.contains("    &TSelf::ColorBrush_0, // Brush\n"));
    assert!(root.contains("    { /* unset */ }, // Shadow\n"));
    assert!(root.contains("        VisualProperty::Opacity,\n"));
    assert!(root.contains("        0.5F, // Opacity\n"));
    assert!(root.contains("        { /* unset */ }, // BorderMode\n"));
    assert!(root.contains("    auto result = CreateSpriteVisual(props);\n"));
    assert!(root.contains("    ApplyVisualProperties(result, visProps);\n"));
    assert!(root.ends_with("    return result;\n}\n"));

    let brush = factory(&out, "ColorBrush_0");
    assert!(brush.contains("auto result = _c.CreateColorBrush({ 0xFF, 0x12, 0x34, 0x56 });"));
}

#[test]
fn shared_brush_is_referenced_through_its_field() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let child = g.add(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        ..SpriteVisual::default()
    }));
    g.add_root(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        children: vec![child],
        ..SpriteVisual::default()
    }));
    let out = run(&g).unwrap();

    assert_eq!(out.units_of(UnitKind::Factory).count(), 3);
    assert!(factory(&out, "Root").contains("&TSelf::_colorBrush_1, // Brush"));
    assert!(factory(&out, "Root").contains("&TSelf::SpriteVisual_0,"));
    assert!(factory(&out, "SpriteVisual_0").contains("&TSelf::_colorBrush_1, // Brush"));

    let entry = unit(&out, UnitKind::Entry);
    let brush_init = entry.find("_colorBrush_1 = ColorBrush_0();").unwrap();
    let root_init = entry.find("_spriteVisual_1 = Root();").unwrap();
    assert!(brush_init < root_init);
    assert!(entry.contains("SpriteVisual GetRoot() const"));
}

#[test]
fn empty_collections_are_omitted() {
    let mut g = SceneGraph::new();
    let shape = g.add(SceneObject::new(SpriteShape::default()));
    let inner = g.add(SceneObject::new(ShapeVisual {
        shapes: vec![shape],
        ..ShapeVisual::default()
    }));
    g.add_root(SceneObject::new(ContainerVisual {
        children: vec![inner],
        ..ContainerVisual::default()
    }));
    let out = run(&g).unwrap();

    let root = factory(&out, "Root");
    assert!(root.contains("func_or_field<Visual> children[]"));
    assert!(!root.contains("visProps"));

    let inner = factory(&out, "ShapeVisual_0");
    assert!(!inner.contains("children"));
    assert!(inner.contains("func_or_field<CompositionShape> shapes[]"));
    assert!(inner.contains("AddCompositionShapes(result, shapes, _countof(shapes));"));

    let shape = factory(&out, "SpriteShape_0");
    assert!(!shape.contains("dashes"));
    assert!(shape.contains("SpriteShapeProperty::None,"));
}

#[test]
fn keyframes_keep_declared_order() {
    let mut g = SceneGraph::new();
    let anim = g.add(scalar_anim(&[0.0, 0.25, 0.25, 1.0]));
    g.add_root(
        SceneObject::new(ContainerVisual::default())
            .with_animator(AnimationBinding::new("Opacity", anim)),
    );
    let out = run(&g).unwrap();

    let text = factory(&out, "ScalarKeyFrameAnimation_0");
    let rows = [
        "{ 0.0F, 0.0F, nullptr },",
        "{ 0.25F, 1.0F, nullptr },",
        "{ 0.25F, 2.0F, nullptr },",
        "{ 1.0F, 3.0F, nullptr },",
    ];
    let positions: Vec<usize> = rows.iter().map(|r| text.find(r).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("ConfigureAnimationKeyFrames(result, nullptr, steps, _countof(steps));"));

    assert!(
        factory(&out, "Root")
            .contains("result.StartAnimation(L\"Opacity\", ScalarKeyFrameAnimation_0());")
    );
}

#[test]
fn cubic_beziers_are_specialized_in_the_preamble() {
    let mut g = SceneGraph::new();
    let points = CubicBezierEasingFunction {
        control_point1: Vector2::new(0.42, 0.0),
        control_point2: Vector2::new(0.58, 1.0),
    };
    let ease_a = g.add(SceneObject::new(points));
    let ease_b = g.add(SceneObject::new(points));
    let anim = g.add(SceneObject::new(KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        vec![
            KeyFrame::new(0.0, KeyFrameValue::Scalar(0.0)).eased(ease_a),
            KeyFrame::new(1.0, KeyFrameValue::Scalar(1.0)).eased(ease_b),
        ],
    )));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", anim)),
    );
    let out = run(&g).unwrap();

    assert!(
        factory(&out, "CubicBezierEasingFunction_0")
            .contains("auto result = CreateCubicBezierEasingFunction<0>();")
    );
    assert!(
        factory(&out, "CubicBezierEasingFunction_1")
            .contains("auto result = CreateCubicBezierEasingFunction<0>();")
    );

    let preamble = unit(&out, UnitKind::Preamble);
    assert!(preamble.contains("CreateCubicBezierEasingFunction<0>()"));
    assert!(preamble.contains("_c.CreateCubicBezierEasingFunction({ 0.42F, 0.0F }, { 0.58F, 1.0F });"));
    assert!(!preamble.contains("CreateCubicBezierEasingFunction<1>()"));
    assert!(preamble.contains("struct SpriteVisualProps"));
    assert!(preamble.contains("struct KeyFrameStep"));
    assert!(!preamble.contains("GradientBrushConfig"));
}

#[test]
fn progress_bound_binding_uses_dedicated_start() {
    let mut g = SceneGraph::new();
    let anim = g.add(scalar_anim(&[0.0, 1.0]));
    let expr = g.add(expression("_.Progress"));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::progress_bound("Opacity", anim, expr)),
    );
    let out = run(&g).unwrap();

    assert!(factory(&out, "Root").contains(
        "StartProgressBoundAnimation(result, L\"Opacity\", ScalarKeyFrameAnimation_0(), ExpressionAnimation_0());"
    ));
    assert!(!factory(&out, "Root").contains("result.StartAnimation("));
    assert!(unit(&out, UnitKind::Preamble).contains("void StartProgressBoundAnimation("));
}

#[test]
fn paused_controller_is_materialized_once() {
    let mut g = SceneGraph::new();
    let progress = g.add(expression("_.Progress"));
    let controller = g.add(
        SceneObject::controller().with_animator(AnimationBinding::new("Progress", progress)),
    );
    let a = g.add(scalar_anim(&[0.0, 1.0]));
    let b = g.add(scalar_anim(&[0.0, 1.0]));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(controller, true))
            .with_animator(AnimationBinding::new("Opacity", b).with_controller(controller, true)),
    );
    let out = run(&g).unwrap();

    let deferred = unit(&out, UnitKind::DeferredBind);
    assert_eq!(deferred.matches("GetAnimationController(").count(), 1);
    assert!(deferred.contains(
        "auto controller = GetAnimationController(_spriteVisual_1, L\"Opacity\", true);"
    ));
    assert!(deferred.contains("controller.StartAnimation(L\"Progress\", ExpressionAnimation_0());"));

    let root = factory(&out, "Root");
    assert_eq!(root.matches("result.StartAnimation(L\"Opacity\"").count(), 2);
    assert!(unit(&out, UnitKind::Entry).contains("BindAnimationControllers();"));
}

#[test]
fn unsupported_effect_aborts_the_pass() {
    let mut g = SceneGraph::new();
    let factory = g.add(SceneObject::new(EffectFactory {
        effect: GraphicsEffect::Saturation {
            saturation: 0.5,
            sources: vec!["source".into()],
        },
    }));
    let brush = g.add(SceneObject::new(EffectBrush {
        effect: factory,
        sources: Vec::new(),
    }));
    g.add_root(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        ..SpriteVisual::default()
    }));

    let err = run(&g).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
    assert_eq!(err.node().unwrap().name.as_deref(), Some("EffectFactory_0"));
}

#[test]
fn gaussian_blur_needs_one_source() {
    let mut g = SceneGraph::new();
    let factory = g.add(SceneObject::new(EffectFactory {
        effect: GraphicsEffect::GaussianBlur {
            blur_amount: 2.0,
            sources: vec!["a".into(), "b".into()],
        },
    }));
    let brush = g.add(SceneObject::new(EffectBrush {
        effect: factory,
        sources: Vec::new(),
    }));
    g.add_root(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        ..SpriteVisual::default()
    }));

    let err = run(&g).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn path_geometry_builds_from_canvas_geometry() {
    let mut g = SceneGraph::new();
    let canvas = g.add(SceneObject::new(CanvasGeometry {
        fill_rule: FillRule::Winding,
        data: "M0,0 L10,10".into(),
    }));
    let path = g.add(SceneObject::new(Path { source: canvas }));
    let geometry = g.add(SceneObject::new(PathGeometry {
        path: Some(path),
        ..PathGeometry::default()
    }));
    let shape = g.add(SceneObject::new(SpriteShape {
        geometry: Some(geometry),
        ..SpriteShape::default()
    }));
    g.add_root(SceneObject::new(ShapeVisual {
        shapes: vec![shape],
        ..ShapeVisual::default()
    }));
    let out = run(&g).unwrap();

    let canvas = factory(&out, "CanvasGeometry_0");
    assert!(canvas.starts_with("// CanvasGeometry\nwinrt::com_ptr<CanvasGeometry> CanvasGeometry_0()"));
    assert!(canvas.contains(
        "auto result = MakeCanvasGeometry(_c, D2D1_FILL_MODE_WINDING, L\"M0,0 L10,10\");"
    ));
    assert!(factory(&out, "Path_0").contains("auto result = MakeCompositionPath(CanvasGeometry_0());"));
    assert!(factory(&out, "PathGeometry_0").contains("auto result = MakePathGeometry(Path_0());"));
}

#[test]
fn canvas_geometry_rejects_animations() {
    let mut g = SceneGraph::new();
    let anim = g.add(scalar_anim(&[0.0, 1.0]));
    let canvas = g.add(
        SceneObject::new(CanvasGeometry {
            fill_rule: FillRule::Alternate,
            data: "M0,0".into(),
        })
        .with_animator(AnimationBinding::new("Opacity", anim)),
    );
    let path = g.add(SceneObject::new(Path { source: canvas }));
    let geometry = g.add(SceneObject::new(PathGeometry {
        path: Some(path),
        ..PathGeometry::default()
    }));
    let shape = g.add(SceneObject::new(SpriteShape {
        geometry: Some(geometry),
        ..SpriteShape::default()
    }));
    g.add_root(SceneObject::new(ShapeVisual {
        shapes: vec![shape],
        ..ShapeVisual::default()
    }));

    let err = run(&g).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn layout_declares_stored_fields_by_category() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let child = g.add(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        ..SpriteVisual::default()
    }));
    g.add_root(SceneObject::new(ContainerVisual {
        children: vec![child],
        ..ContainerVisual::default()
    }));
    let out = run(&g).unwrap();

    assert_eq!(out.layout.body_depth, 2);
    assert!(out.layout.prologue.contains("        using TSelf = AnimatedVisual;\n"));
    assert!(out.layout.prologue.contains("        ContainerVisual _containerVisual_1{ nullptr };\n"));
    assert!(!out.layout.prologue.contains("_colorBrush_1"));
    assert!(out.layout.header.contains(
        "winrt::Windows::UI::Composition::ContainerVisual CreateAnimatedVisual("
    ));
    assert!(out.layout.epilogue.contains("return AnimatedVisual(compositor).GetRoot();"));
}

fn slot_mismatch(err: CodegenError) -> (Option<String>, String) {
    match err {
        CodegenError::UnsupportedConstruct { node, detail } => (node.name, detail),
        other => panic!("expected an unsupported construct, got {other:?}"),
    }
}

#[test]
fn brush_in_visual_children_is_rejected() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    g.add_root(SceneObject::new(ContainerVisual {
        children: vec![brush],
        ..ContainerVisual::default()
    }));

    let (node, detail) = slot_mismatch(run(&g).unwrap_err());
    assert_eq!(node.as_deref(), Some("Root"));
    assert_eq!(
        detail,
        "children expects a Visual, found CompositionColorBrush (#0)"
    );
}

#[test]
fn brush_as_keyframe_easing_is_rejected() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let anim = g.add(SceneObject::new(KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        vec![KeyFrame::new(1.0, KeyFrameValue::Scalar(1.0)).eased(brush)],
    )));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", anim)),
    );

    let (node, detail) = slot_mismatch(run(&g).unwrap_err());
    assert_eq!(node.as_deref(), Some("ScalarKeyFrameAnimation_0"));
    assert!(detail.starts_with("Easing expects a CompositionEasingFunction"));
}

#[test]
fn visual_as_fill_brush_is_rejected() {
    let mut g = SceneGraph::new();
    let visual = g.add(SceneObject::new(SpriteVisual::default()));
    let shape = g.add(SceneObject::new(SpriteShape {
        fill_brush: Some(visual),
        ..SpriteShape::default()
    }));
    g.add_root(SceneObject::new(ShapeVisual {
        shapes: vec![shape],
        ..ShapeVisual::default()
    }));

    let (node, detail) = slot_mismatch(run(&g).unwrap_err());
    assert_eq!(node.as_deref(), Some("SpriteShape_0"));
    assert_eq!(
        detail,
        "FillBrush expects a CompositionBrush, found SpriteVisual (#0)"
    );
}

#[test]
fn path_source_must_be_canvas_geometry() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let path = g.add(SceneObject::new(Path { source: brush }));
    let geometry = g.add(SceneObject::new(PathGeometry {
        path: Some(path),
        ..PathGeometry::default()
    }));
    let shape = g.add(SceneObject::new(SpriteShape {
        geometry: Some(geometry),
        ..SpriteShape::default()
    }));
    g.add_root(SceneObject::new(ShapeVisual {
        shapes: vec![shape],
        ..ShapeVisual::default()
    }));

    let (node, detail) = slot_mismatch(run(&g).unwrap_err());
    assert_eq!(node.as_deref(), Some("Path_0"));
    assert!(detail.starts_with("Source expects a CanvasGeometry"));
}

#[test]
fn comment_ending_in_backslash_keeps_next_line() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()).with_comment("C:\\fill\\"));
    g.add_root(SceneObject::new(SpriteVisual {
        brush: Some(brush),
        ..SpriteVisual::default()
    }));
    let out = run(&g).unwrap();

    let brush = factory(&out, "ColorBrush_0");
    assert!(brush.contains("\nCompositionColorBrush ColorBrush_0()\n"));
    for unit in out.units_of(UnitKind::Factory) {
        assert!(
            unit.text.lines().all(|l| !l.ends_with('\\')),
            "{} ends a line with a backslash",
            unit.name
        );
    }
    assert!(factory(&out, "Root").contains("&TSelf::ColorBrush_0, // Brush\n"));
}
