use super::helpers::{DROP_SHADOW, EFFECT_BRUSH, EFFECTS, GRADIENT, SURFACE_BRUSH};
use super::{FieldWriter, Routine};
use crate::foundation::error::CodegenResult;
use crate::scene::object::KindFamily;
use crate::scene::brush::{
    ColorBrush, ColorGradientStop, DropShadow, EffectBrush, EffectFactory, GradientProps,
    GraphicsEffect, LinearGradientBrush, RadialGradientBrush, SurfaceBrush,
};

pub(super) fn color_brush(r: &mut Routine<'_, '_>, b: &ColorBrush) -> CodegenResult<()> {
    match b.color {
        Some(c) => {
            let color = r.lit(c);
            r.b.line(format!("auto result = _c.CreateColorBrush({color});"));
        }
        None => r.b.line("auto result = _c.CreateColorBrush();"),
    }
    Ok(())
}

/// Color stops table and gradient configuration record.
fn gradient_props(r: &mut Routine<'_, '_>, g: &GradientProps) -> CodegenResult<FieldWriter> {
    let has_stops = r.child_array(
        "CompositionColorGradientStop",
        "colorStops",
        KindFamily::ColorGradientStop,
        &g.color_stops,
    )?;
    let mut w = FieldWriter::new("GradientProperty", r.s());
    w.set("AnchorPoint", g.anchor_point.map(|x| r.lit(x)));
    w.set("CenterPoint", g.center_point.map(|x| r.lit(x)));
    w.set(
        "ColorStops",
        has_stops.then(|| "{ colorStops, _countof(colorStops) }".to_owned()),
    );
    w.set("ExtendMode", g.extend_mode.map(|x| r.lit(x)));
    w.set("InterpolationSpace", g.interpolation_space.map(|x| r.lit(x)));
    w.set("MappingMode", g.mapping_mode.map(|x| r.lit(x)));
    w.set("Offset", g.offset.map(|x| r.lit(x)));
    w.set("RotationAngleInDegrees", g.rotation_angle_in_degrees.map(|x| r.lit(x)));
    w.set("Scale", g.scale.map(|x| r.lit(x)));
    w.set("TransformMatrix", g.transform_matrix.map(|x| r.lit(x)));
    if !w.is_empty() {
        w.write(&mut r.b, "GradientBrushConfig gradientConfig");
    }
    Ok(w)
}

fn apply_gradient(r: &mut Routine<'_, '_>, config: &FieldWriter) {
    if !config.is_empty() {
        r.helper(GRADIENT);
        r.b.line("ApplyCompositionGradientProperties(result, gradientConfig);");
    }
}

pub(super) fn linear_gradient_brush(
    r: &mut Routine<'_, '_>,
    b: &LinearGradientBrush,
) -> CodegenResult<()> {
    let config = gradient_props(r, &b.gradient)?;
    r.b.line("auto result = _c.CreateLinearGradientBrush();");
    apply_gradient(r, &config);
    if let Some(p) = b.start_point {
        let v = r.lit(p);
        r.b.line(format!("result.StartPoint({v});"));
    }
    if let Some(p) = b.end_point {
        let v = r.lit(p);
        r.b.line(format!("result.EndPoint({v});"));
    }
    Ok(())
}

pub(super) fn radial_gradient_brush(
    r: &mut Routine<'_, '_>,
    b: &RadialGradientBrush,
) -> CodegenResult<()> {
    let config = gradient_props(r, &b.gradient)?;
    r.b.line("auto result = _c.CreateRadialGradientBrush();");
    apply_gradient(r, &config);
    for (setter, value) in [
        ("EllipseCenter", b.ellipse_center),
        ("EllipseRadius", b.ellipse_radius),
        ("GradientOriginOffset", b.gradient_origin_offset),
    ] {
        if let Some(v) = value {
            let v = r.lit(v);
            r.b.line(format!("result.{setter}({v});"));
        }
    }
    Ok(())
}

pub(super) fn color_gradient_stop(
    r: &mut Routine<'_, '_>,
    s: &ColorGradientStop,
) -> CodegenResult<()> {
    let offset = r.lit(s.offset);
    let color = r.lit(s.color);
    r.b.line(format!(
        "auto result = _c.CreateColorGradientStop({offset}, {color});"
    ));
    Ok(())
}

pub(super) fn effect_brush(r: &mut Routine<'_, '_>, b: &EffectBrush) -> CodegenResult<()> {
    r.helper(EFFECT_BRUSH);
    let factory = r.child("EffectFactory", KindFamily::EffectFactory, b.effect)?;
    if !b.sources.is_empty() {
        let entries = b
            .sources
            .iter()
            .map(|p| {
                let brush = r.child(&p.name, KindFamily::Brush, p.brush)?;
                Ok((r.s().string(&p.name), brush))
            })
            .collect::<CodegenResult<Vec<_>>>()?;
        r.b.line("constexpr static const SourceParameter params[] =");
        r.b.open_scope();
        for (p, (name, brush)) in b.sources.iter().zip(entries) {
            r.describe(p.brush);
            r.b.line(format!("{{ {name}, {brush} }},"));
        }
        r.b.close_scope_with_semicolon();
    }
    let (params, count) = if b.sources.is_empty() {
        (r.s().null(), r.s().int32(0))
    } else {
        ("params".to_owned(), "_countof(params)".to_owned())
    };
    r.b.line("constexpr static const CompositionBrushProps props =");
    r.b.open_scope();
    r.describe(b.effect);
    r.b.line(format!("{factory}, // EffectFactory"));
    r.b.line(format!("{params},"));
    r.b.line(format!("{count},"));
    r.b.close_scope_with_semicolon();
    r.b.line("auto result = MakeEffectBrush(props);");
    Ok(())
}

pub(super) fn surface_brush(r: &mut Routine<'_, '_>, b: &SurfaceBrush) -> CodegenResult<()> {
    let Some(surface) = b.surface else {
        r.b.line("auto result = _c.CreateSurfaceBrush();");
        return Ok(());
    };
    r.helper(SURFACE_BRUSH);
    let source = r.call("Surface", KindFamily::Surface, surface)?;
    let surface_idx = r.ctx.registry.require(surface)?;
    let reachable = r.ctx.registry.is_reachable_from(surface_idx, r.idx);
    let reachable = r.lit(reachable);
    r.describe(surface);
    r.b.line(format!(
        "auto result = MakeSurfaceBrush({source}, {reachable});"
    ));
    Ok(())
}

pub(super) fn effect_factory(r: &mut Routine<'_, '_>, f: &EffectFactory) -> CodegenResult<()> {
    r.helper(EFFECTS);
    match &f.effect {
        GraphicsEffect::Composite { mode, sources } => {
            let mode = r.lit(*mode);
            if sources.is_empty() {
                let null = r.s().null();
                r.b.line(format!(
                    "auto result = CompositeEffect::Make(_c, {mode}, {null}, 0);"
                ));
            } else {
                let names = sources
                    .iter()
                    .map(|s| r.s().string(s))
                    .collect::<Vec<_>>()
                    .join(", ");
                r.b.line(format!(
                    "constexpr static const wchar_t* const sources[] = {{ {names} }};"
                ));
                r.b.line(format!(
                    "auto result = CompositeEffect::Make(_c, {mode}, sources, _countof(sources));"
                ));
            }
        }
        GraphicsEffect::GaussianBlur {
            blur_amount,
            sources,
        } => {
            let [source] = sources.as_slice() else {
                return Err(r.unsupported(format!(
                    "gaussian blur takes exactly one named source, found {}",
                    sources.len()
                )));
            };
            let amount = r.lit(*blur_amount);
            let source = r.s().string(source);
            r.b.line(format!(
                "auto result = GaussianBlurEffect::Make(_c, {amount}, {source});"
            ));
        }
        other => {
            return Err(r.unsupported(format!("{} has no emission rule", other.name())));
        }
    }
    Ok(())
}

pub(super) fn drop_shadow(r: &mut Routine<'_, '_>, s: &DropShadow) -> CodegenResult<()> {
    let mut w = FieldWriter::new("DropShadowProperty", r.s());
    w.set("BlurRadius", s.blur_radius.map(|x| r.lit(x)));
    w.set("Color", s.color.map(|x| r.lit(x)));
    w.set("Mask", r.opt_child("Mask", KindFamily::Brush, s.mask)?);
    w.set("Offset", s.offset.map(|x| r.lit(x)));
    w.set("Opacity", s.opacity.map(|x| r.lit(x)));
    w.set("SourcePolicy", s.source_policy.map(|x| r.lit(x)));
    if !w.is_empty() {
        w.write(&mut r.b, "DropShadowProps shadowProps");
    }
    r.b.line("auto result = _c.CreateDropShadow();");
    if !w.is_empty() {
        r.helper(DROP_SHADOW);
        r.b.line("ApplyDropShadowProps(result, shadowProps);");
    }
    Ok(())
}
