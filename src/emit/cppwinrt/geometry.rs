use super::helpers::{ELLIPSE, GEOMETRY, PATHS};
use super::{FieldWriter, Routine};
use crate::foundation::error::CodegenResult;
use crate::scene::geometry::{
    CanvasGeometry, EllipseGeometry, GeometryProps, Path, PathGeometry, RectangleGeometry,
    RoundedRectangleGeometry,
};
use crate::scene::object::{KindFamily, SceneObject};

fn trim_props(r: &mut Routine<'_, '_>, g: &GeometryProps) -> FieldWriter {
    let mut w = FieldWriter::new("GeometryProperty", r.s());
    w.set("TrimEnd", g.trim_end.map(|x| r.lit(x)));
    w.set("TrimOffset", g.trim_offset.map(|x| r.lit(x)));
    w.set("TrimStart", g.trim_start.map(|x| r.lit(x)));
    if !w.is_empty() {
        w.write(&mut r.b, "GeometryConfig geometryConfig");
    }
    w
}

fn apply_trim(r: &mut Routine<'_, '_>, config: &FieldWriter) {
    if !config.is_empty() {
        r.helper(GEOMETRY);
        r.b.line("ApplyGeometryProps(result, geometryConfig);");
    }
}

pub(super) fn ellipse(r: &mut Routine<'_, '_>, g: &EllipseGeometry) -> CodegenResult<()> {
    r.helper(ELLIPSE);
    let config = trim_props(r, &g.geometry);
    let center = r.lit(g.center);
    let radius = r.lit(g.radius);
    r.b.line(format!(
        "auto result = CreateEllipseGeometry({{ {center}, {radius} }});"
    ));
    apply_trim(r, &config);
    Ok(())
}

pub(super) fn rectangle(r: &mut Routine<'_, '_>, g: &RectangleGeometry) -> CodegenResult<()> {
    let config = trim_props(r, &g.geometry);
    r.b.line("auto result = _c.CreateRectangleGeometry();");
    apply_trim(r, &config);
    if let Some(offset) = g.offset {
        let v = r.lit(offset);
        r.b.line(format!("result.Offset({v});"));
    }
    let size = r.lit(g.size);
    r.b.line(format!("result.Size({size});"));
    Ok(())
}

pub(super) fn rounded_rectangle(
    r: &mut Routine<'_, '_>,
    g: &RoundedRectangleGeometry,
) -> CodegenResult<()> {
    let config = trim_props(r, &g.geometry);
    r.b.line("auto result = _c.CreateRoundedRectangleGeometry();");
    apply_trim(r, &config);
    let corner = r.lit(g.corner_radius);
    r.b.line(format!("result.CornerRadius({corner});"));
    if let Some(offset) = g.offset {
        let v = r.lit(offset);
        r.b.line(format!("result.Offset({v});"));
    }
    let size = r.lit(g.size);
    r.b.line(format!("result.Size({size});"));
    Ok(())
}

pub(super) fn path_geometry(r: &mut Routine<'_, '_>, g: &PathGeometry) -> CodegenResult<()> {
    let config = trim_props(r, &g.geometry);
    match g.path {
        Some(p) => {
            r.helper(PATHS);
            let path = r.call("Path", KindFamily::Path, p)?;
            r.describe(p);
            r.b.line(format!("auto result = MakePathGeometry({path});"));
        }
        None => r.b.line("auto result = _c.CreatePathGeometry();"),
    }
    apply_trim(r, &config);
    Ok(())
}

pub(super) fn path(r: &mut Routine<'_, '_>, p: &Path) -> CodegenResult<()> {
    let geometry = r.call("Source", KindFamily::CanvasGeometry, p.source)?;
    r.helper(PATHS);
    r.b.line(format!("auto result = MakeCompositionPath({geometry});"));
    Ok(())
}

/// Canvas geometries are Direct2D objects: no comment, property set or animations.
pub(super) fn canvas_geometry(
    r: &mut Routine<'_, '_>,
    g: &CanvasGeometry,
    scene: &SceneObject,
) -> CodegenResult<()> {
    if !scene.properties.is_empty() || !scene.animators.is_empty() {
        return Err(r.unsupported(
            "canvas geometries cannot carry a property set or animations",
        ));
    }
    r.helper(PATHS);
    let fill = r.lit(g.fill_rule);
    let data = r.s().string(&g.data);
    r.b.line(format!(
        "auto result = MakeCanvasGeometry(_c, {fill}, {data});"
    ));
    Ok(())
}
