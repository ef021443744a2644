use super::helpers::{
    COMPOSITION_SHAPES, CONTAINER_VISUALS, INSET_CLIP, SHAPE_PROPERTIES, SPRITE_SHAPE,
    SPRITE_VISUAL, VISUAL_PROPERTIES, VISUAL_SURFACE,
};
use super::{FieldWriter, Routine};
use crate::foundation::error::CodegenResult;
use crate::scene::object::KindFamily;
use crate::scene::visual::{
    ContainerShape, ContainerVisual, GeometricClip, InsetClip, ShapeProps, ShapeVisual,
    SpriteShape, SpriteVisual, VisualProps, VisualSurface,
};

fn visual_props(r: &Routine<'_, '_>, v: &VisualProps) -> CodegenResult<FieldWriter> {
    let mut w = FieldWriter::new("VisualProperty", r.s());
    w.set("BorderMode", v.border_mode.map(|x| r.lit(x)));
    w.set("CenterPoint", v.center_point.map(|x| r.lit(x)));
    w.set("Clip", r.opt_child("Clip", KindFamily::Clip, v.clip)?);
    w.set("IsVisible", v.is_visible.map(|x| r.lit(x)));
    w.set("Offset", v.offset.map(|x| r.lit(x)));
    w.set("Opacity", v.opacity.map(|x| r.lit(x)));
    w.set("RotationAngleInDegrees", v.rotation_angle_in_degrees.map(|x| r.lit(x)));
    w.set("RotationAxis", v.rotation_axis.map(|x| r.lit(x)));
    w.set("Scale", v.scale.map(|x| r.lit(x)));
    w.set("Size", v.size.map(|x| r.lit(x)));
    w.set("TransformMatrix", v.transform_matrix.map(|x| r.lit(x)));
    Ok(w)
}

fn shape_props(r: &Routine<'_, '_>, s: &ShapeProps) -> FieldWriter {
    let mut w = FieldWriter::new("ShapeProperty", r.s());
    w.set("CenterPoint", s.center_point.map(|x| r.lit(x)));
    w.set("Offset", s.offset.map(|x| r.lit(x)));
    w.set("RotationAngleInDegrees", s.rotation_angle_in_degrees.map(|x| r.lit(x)));
    w.set("Scale", s.scale.map(|x| r.lit(x)));
    w.set("TransformMatrix", s.transform_matrix.map(|x| r.lit(x)));
    w
}

/// Visual property table, construction, then child visuals.
fn finish_visual(
    r: &mut Routine<'_, '_>,
    props: &FieldWriter,
    has_children: bool,
    create: &str,
) {
    r.b.line(format!("auto result = {create};"));
    if !props.is_empty() {
        r.helper(VISUAL_PROPERTIES);
        r.b.line("ApplyVisualProperties(result, visProps);");
    }
    if has_children {
        r.helper(CONTAINER_VISUALS);
        r.b.line("ApplyContainerVisuals(result, children, _countof(children));");
    }
}

pub(super) fn container_visual(r: &mut Routine<'_, '_>, v: &ContainerVisual) -> CodegenResult<()> {
    let props = visual_props(r, &v.visual)?;
    if !props.is_empty() {
        props.write(&mut r.b, "VisualProperties visProps");
    }
    let has_children = r.child_array("Visual", "children", KindFamily::Visual, &v.children)?;
    finish_visual(r, &props, has_children, "_c.CreateContainerVisual()");
    Ok(())
}

pub(super) fn shape_visual(r: &mut Routine<'_, '_>, v: &ShapeVisual) -> CodegenResult<()> {
    let props = visual_props(r, &v.visual)?;
    if !props.is_empty() {
        props.write(&mut r.b, "VisualProperties visProps");
    }
    let has_children = r.child_array("Visual", "children", KindFamily::Visual, &v.children)?;
    let has_shapes = r.child_array("CompositionShape", "shapes", KindFamily::Shape, &v.shapes)?;
    finish_visual(r, &props, has_children, "_c.CreateShapeVisual()");
    if has_shapes {
        r.helper(COMPOSITION_SHAPES);
        r.b.line("AddCompositionShapes(result, shapes, _countof(shapes));");
    }
    Ok(())
}

pub(super) fn sprite_visual(r: &mut Routine<'_, '_>, v: &SpriteVisual) -> CodegenResult<()> {
    r.helper(SPRITE_VISUAL);
    let brush = r.child_or_unset("Brush", KindFamily::Brush, v.brush)?;
    let shadow = r.child_or_unset("Shadow", KindFamily::Shadow, v.shadow)?;
    r.b.line("constexpr static const SpriteVisualProps props =");
    r.b.open_scope();
    if let Some(b) = v.brush {
        r.describe(b);
    }
    r.b.line(format!("{brush}, // Brush"));
    if let Some(s) = v.shadow {
        r.describe(s);
    }
    r.b.line(format!("{shadow}, // Shadow"));
    r.b.close_scope_with_semicolon();

    let props = visual_props(r, &v.visual)?;
    if !props.is_empty() {
        props.write(&mut r.b, "VisualProperties visProps");
    }
    let has_children = r.child_array("Visual", "children", KindFamily::Visual, &v.children)?;
    finish_visual(r, &props, has_children, "CreateSpriteVisual(props)");
    Ok(())
}

pub(super) fn visual_surface(r: &mut Routine<'_, '_>, s: &VisualSurface) -> CodegenResult<()> {
    let mut w = FieldWriter::new("VisualSurfaceProperty", r.s());
    w.set(
        "SourceVisual",
        r.opt_child("SourceVisual", KindFamily::Visual, s.source_visual)?,
    );
    w.set("SourceSize", s.source_size.map(|x| r.lit(x)));
    w.set("SourceOffset", s.source_offset.map(|x| r.lit(x)));
    if !w.is_empty() {
        w.write(&mut r.b, "VisualSurfaceProps surfaceProps");
    }
    r.b.line("auto result = _c.CreateVisualSurface();");
    if !w.is_empty() {
        r.helper(VISUAL_SURFACE);
        r.b.line("ApplyVisualSurfaceProps(result, surfaceProps);");
    }
    Ok(())
}

fn apply_shape_props(r: &mut Routine<'_, '_>, props: &FieldWriter) {
    if !props.is_empty() {
        r.helper(SHAPE_PROPERTIES);
        r.b.line("ApplyShapeProperties(result, shapeProps);");
    }
}

pub(super) fn container_shape(r: &mut Routine<'_, '_>, s: &ContainerShape) -> CodegenResult<()> {
    let props = shape_props(r, &s.shape);
    if !props.is_empty() {
        props.write(&mut r.b, "ShapeProperties shapeProps");
    }
    let has_shapes = r.child_array("CompositionShape", "shapes", KindFamily::Shape, &s.shapes)?;
    r.b.line("auto result = _c.CreateContainerShape();");
    apply_shape_props(r, &props);
    if has_shapes {
        r.helper(COMPOSITION_SHAPES);
        r.b.line("AddCompositionShapes(result, shapes, _countof(shapes));");
    }
    Ok(())
}

pub(super) fn sprite_shape(r: &mut Routine<'_, '_>, s: &SpriteShape) -> CodegenResult<()> {
    r.helper(SPRITE_SHAPE);
    let stroke = &s.stroke;
    if !stroke.dash_array.is_empty() {
        let dashes = stroke
            .dash_array
            .iter()
            .map(|&d| r.lit(d))
            .collect::<Vec<_>>()
            .join(", ");
        r.b.line(format!("constexpr static const float dashes[] = {{ {dashes} }};"));
    }

    let mut w = FieldWriter::new("SpriteShapeProperty", r.s());
    w.set("Geometry", r.opt_child("Geometry", KindFamily::Geometry, s.geometry)?);
    w.set("FillBrush", r.opt_child("FillBrush", KindFamily::Brush, s.fill_brush)?);
    w.set(
        "StrokeBrush",
        r.opt_child("StrokeBrush", KindFamily::Brush, s.stroke_brush)?,
    );
    w.set(
        "StrokeDashArray",
        (!stroke.dash_array.is_empty()).then(|| "{ dashes, _countof(dashes) }".to_owned()),
    );
    w.set("StrokeDashCap", stroke.dash_cap.map(|x| r.lit(x)));
    w.set("StrokeDashOffset", stroke.dash_offset.map(|x| r.lit(x)));
    w.set("StrokeStartCap", stroke.start_cap.map(|x| r.lit(x)));
    w.set("StrokeEndCap", stroke.end_cap.map(|x| r.lit(x)));
    w.set("StrokeLineJoin", stroke.line_join.map(|x| r.lit(x)));
    w.set("StrokeMiterLimit", stroke.miter_limit.map(|x| r.lit(x)));
    w.set("StrokeThickness", stroke.thickness.map(|x| r.lit(x)));
    w.set("IsStrokeNonScaling", stroke.is_non_scaling.map(|x| r.lit(x)));
    w.write(&mut r.b, "SpriteShapeProps props");

    let props = shape_props(r, &s.shape);
    if !props.is_empty() {
        props.write(&mut r.b, "ShapeProperties shapeProps");
    }
    r.b.line("auto result = MakeAndApplyProperties(_c, props);");
    apply_shape_props(r, &props);
    Ok(())
}

pub(super) fn inset_clip(r: &mut Routine<'_, '_>, c: &InsetClip) -> CodegenResult<()> {
    let mut w = FieldWriter::new("InsetClipProperty", r.s());
    w.set("BottomInset", c.bottom_inset.map(|x| r.lit(x)));
    w.set("LeftInset", c.left_inset.map(|x| r.lit(x)));
    w.set("RightInset", c.right_inset.map(|x| r.lit(x)));
    w.set("TopInset", c.top_inset.map(|x| r.lit(x)));
    w.set("CenterPoint", c.center_point.map(|x| r.lit(x)));
    w.set("Scale", c.scale.map(|x| r.lit(x)));
    if !w.is_empty() {
        w.write(&mut r.b, "InsetClipProps clipProps");
    }
    r.b.line("auto result = _c.CreateInsetClip();");
    if !w.is_empty() {
        r.helper(INSET_CLIP);
        r.b.line("ApplyInsetClipProps(result, clipProps);");
    }
    Ok(())
}

pub(super) fn geometric_clip(r: &mut Routine<'_, '_>, c: &GeometricClip) -> CodegenResult<()> {
    r.b.line("auto result = _c.CreateGeometricClip();");
    if let Some(g) = c.geometry {
        let geometry = r.call("Geometry", KindFamily::Geometry, g)?;
        r.describe(g);
        r.b.line(format!("result.Geometry({geometry});"));
    }
    Ok(())
}
