//! C++/WinRT factory emitter.
//!
//! Every node becomes a member routine of one generated class. Children are obtained either as
//! `&TSelf::Name` in constant tables (invoked by the helpers) or as direct `Name()` / `_field`
//! expressions in statements.

mod animations;
mod brushes;
mod geometry;
mod helpers;
mod layout;
mod visuals;

use crate::emit::builder::CodeBuilder;
use crate::emit::factory::{EmitContext, FactoryEmitter, FactoryRef, SourceLayout};
use crate::foundation::error::{CodegenError, CodegenResult, NodeLabel};
use crate::foundation::ids::{NodeIdx, ObjectRef};
use crate::plan::order::EmissionOrder;
use crate::scene::object::{KindFamily, ObjectKind, PropertyValue, SceneObject};
use crate::schedule::bindings::StartStep;
use crate::stringify::{Literal, Stringifier};

/// Emits C++/WinRT member routines.
#[derive(Clone, Copy, Debug, Default)]
pub struct CppWinrtEmitter;

impl FactoryEmitter for CppWinrtEmitter {
    #[tracing::instrument(skip(self, ctx), fields(node = %ctx.node(idx).name))]
    fn emit_factory(&self, ctx: &mut EmitContext<'_>, idx: NodeIdx) -> CodegenResult<String> {
        let node = ctx.node(idx);
        let scene = ctx.scene(idx)?;
        let return_type = ctx.stringifier.field_type_name(node.type_name);

        let mut r = Routine::new(ctx, idx);
        if r.ctx.config.description_comments {
            r.b.comment(&node.description);
        }
        r.b.line(format!("{return_type} {}()", node.name));
        r.b.open_scope();

        match &scene.kind {
            ObjectKind::ContainerVisual(v) => visuals::container_visual(&mut r, v)?,
            ObjectKind::ShapeVisual(v) => visuals::shape_visual(&mut r, v)?,
            ObjectKind::SpriteVisual(v) => visuals::sprite_visual(&mut r, v)?,
            ObjectKind::VisualSurface(s) => visuals::visual_surface(&mut r, s)?,
            ObjectKind::ContainerShape(s) => visuals::container_shape(&mut r, s)?,
            ObjectKind::SpriteShape(s) => visuals::sprite_shape(&mut r, s)?,
            ObjectKind::InsetClip(c) => visuals::inset_clip(&mut r, c)?,
            ObjectKind::GeometricClip(c) => visuals::geometric_clip(&mut r, c)?,
            ObjectKind::ColorBrush(b) => brushes::color_brush(&mut r, b)?,
            ObjectKind::LinearGradientBrush(b) => brushes::linear_gradient_brush(&mut r, b)?,
            ObjectKind::RadialGradientBrush(b) => brushes::radial_gradient_brush(&mut r, b)?,
            ObjectKind::ColorGradientStop(s) => brushes::color_gradient_stop(&mut r, s)?,
            ObjectKind::EffectBrush(b) => brushes::effect_brush(&mut r, b)?,
            ObjectKind::SurfaceBrush(b) => brushes::surface_brush(&mut r, b)?,
            ObjectKind::EffectFactory(f) => brushes::effect_factory(&mut r, f)?,
            ObjectKind::DropShadow(s) => brushes::drop_shadow(&mut r, s)?,
            ObjectKind::EllipseGeometry(g) => geometry::ellipse(&mut r, g)?,
            ObjectKind::RectangleGeometry(g) => geometry::rectangle(&mut r, g)?,
            ObjectKind::RoundedRectangleGeometry(g) => geometry::rounded_rectangle(&mut r, g)?,
            ObjectKind::PathGeometry(g) => geometry::path_geometry(&mut r, g)?,
            ObjectKind::Path(p) => geometry::path(&mut r, p)?,
            ObjectKind::CanvasGeometry(g) => geometry::canvas_geometry(&mut r, g, scene)?,
            ObjectKind::KeyFrameAnimation(a) => animations::key_frame_animation(&mut r, a)?,
            ObjectKind::ExpressionAnimation(a) => animations::expression_animation(&mut r, a)?,
            ObjectKind::LinearEasing => animations::linear_easing(&mut r),
            ObjectKind::StepEasing(e) => animations::step_easing(&mut r, e),
            ObjectKind::CubicBezierEasing(e) => animations::cubic_bezier_easing(&mut r, e),
            ObjectKind::AnimationController => {
                return Err(CodegenError::invariant(
                    node.label(),
                    "controllers are materialized in the deferred bind, not constructed",
                ));
            }
        }

        if !matches!(scene.kind, ObjectKind::CanvasGeometry(_)) {
            r.comment_property(scene);
            r.property_set(scene);
            let steps = r
                .ctx
                .scheduler
                .schedule_node(r.ctx.graph, r.ctx.registry, idx)?;
            r.start_animations("result", &steps)?;
        }

        r.b.line("return result;");
        r.b.close_scope();
        Ok(r.b.finish())
    }

    fn emit_deferred_bind(&self, ctx: &mut EmitContext<'_>) -> CodegenResult<String> {
        layout::deferred_bind(ctx)
    }

    fn emit_entry(&self, ctx: &EmitContext<'_>, order: &EmissionOrder) -> CodegenResult<String> {
        layout::entry(ctx, order)
    }

    fn emit_preamble(&self, ctx: &EmitContext<'_>) -> String {
        helpers::preamble(ctx)
    }

    fn emit_layout(&self, ctx: &EmitContext<'_>) -> CodegenResult<SourceLayout> {
        layout::source_layout(ctx)
    }
}

/// Builder state for one routine.
pub(crate) struct Routine<'c, 'a> {
    pub(crate) ctx: &'c mut EmitContext<'a>,
    pub(crate) idx: NodeIdx,
    pub(crate) b: CodeBuilder,
}

impl<'c, 'a> Routine<'c, 'a> {
    fn new(ctx: &'c mut EmitContext<'a>, idx: NodeIdx) -> Self {
        Self {
            ctx,
            idx,
            b: CodeBuilder::new(),
        }
    }

    pub(crate) fn s(&self) -> &'a dyn Stringifier {
        self.ctx.stringifier
    }

    pub(crate) fn lit(&self, v: impl Into<Literal>) -> String {
        self.ctx.stringifier.literal(&v.into())
    }

    pub(crate) fn label(&self) -> NodeLabel {
        self.ctx.node(self.idx).label()
    }

    pub(crate) fn unsupported(&self, detail: impl Into<String>) -> CodegenError {
        CodegenError::unsupported(self.label(), detail)
    }

    pub(crate) fn helper(&mut self, name: &'static str) {
        self.ctx.use_helper(name);
    }

    /// Child filling `slot` as a table entry: `&TSelf::Name` or `&TSelf::_field`.
    pub(crate) fn child(
        &self,
        slot: &str,
        family: KindFamily,
        callee: ObjectRef,
    ) -> CodegenResult<String> {
        let f = self.ctx.call_factory_for_slot(self.idx, callee, slot, family)?;
        Ok(func_or_field(&f))
    }

    /// Child filling `slot` as an expression: `Name()` or `_field`.
    pub(crate) fn call(
        &self,
        slot: &str,
        family: KindFamily,
        callee: ObjectRef,
    ) -> CodegenResult<String> {
        let f = self.ctx.call_factory_for_slot(self.idx, callee, slot, family)?;
        Ok(direct(&f))
    }

    /// Optional child as a table entry, or the unset sentinel.
    pub(crate) fn child_or_unset(
        &self,
        slot: &str,
        family: KindFamily,
        callee: Option<ObjectRef>,
    ) -> CodegenResult<String> {
        match callee {
            Some(c) => self.child(slot, family, c),
            None => Ok(self.s().unset()),
        }
    }

    /// Optional child as a table entry, `None` when absent.
    pub(crate) fn opt_child(
        &self,
        slot: &str,
        family: KindFamily,
        callee: Option<ObjectRef>,
    ) -> CodegenResult<Option<String>> {
        callee.map(|c| self.child(slot, family, c)).transpose()
    }

    /// Description comment for `callee` when configured.
    pub(crate) fn describe(&mut self, callee: ObjectRef) {
        if !self.ctx.config.description_comments {
            return;
        }
        if let Some(idx) = self.ctx.registry.lookup(callee) {
            let text = self.ctx.node(idx).description.clone();
            self.b.comment(&text);
        }
    }

    /// `constexpr` table of child references. Nothing is written for an empty list.
    pub(crate) fn child_array(
        &mut self,
        element: &str,
        name: &str,
        family: KindFamily,
        refs: &[ObjectRef],
    ) -> CodegenResult<bool> {
        if refs.is_empty() {
            return Ok(false);
        }
        let entries = refs
            .iter()
            .map(|&c| self.child(name, family, c))
            .collect::<CodegenResult<Vec<_>>>()?;
        self.b
            .line(format!("constexpr static const func_or_field<{element}> {name}[] ="));
        self.b.open_scope();
        for (&c, entry) in refs.iter().zip(entries) {
            self.describe(c);
            self.b.line(format!("{entry},"));
        }
        self.b.close_scope_with_semicolon();
        Ok(true)
    }

    fn comment_property(&mut self, scene: &SceneObject) {
        if !self.ctx.config.set_comment_properties {
            return;
        }
        if let Some(c) = scene.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            let text = self.s().string(c);
            self.b.line(format!("result.Comment({text});"));
        }
    }

    fn property_set(&mut self, scene: &SceneObject) {
        if scene.properties.is_empty() {
            return;
        }
        self.helper(helpers::PROPERTY_SET);
        self.b
            .line("constexpr static const propset_value propertySet[] =");
        self.b.open_scope();
        for (name, value) in &scene.properties {
            let v = match *value {
                PropertyValue::Scalar(x) => self.lit(x),
                PropertyValue::Vector2(x) => self.lit(x),
                PropertyValue::Vector3(x) => self.lit(x),
                PropertyValue::Vector4(x) => self.lit(x),
                PropertyValue::Color(x) => self.lit(x),
            };
            let n = self.s().string(name);
            self.b.line(format!("{{ {n}, {v} }},"));
        }
        self.b.close_scope_with_semicolon();
        self.b
            .line("ApplyProperties(result, propertySet, _countof(propertySet));");
    }

    /// Start `steps` on the object named `target`.
    pub(crate) fn start_animations(
        &mut self,
        target: &str,
        steps: &[StartStep],
    ) -> CodegenResult<()> {
        start_animations(self.ctx, self.idx, &mut self.b, target, steps)
    }
}

/// Shared by factory routines and the deferred bind.
pub(crate) fn start_animations(
    ctx: &mut EmitContext<'_>,
    caller: NodeIdx,
    b: &mut CodeBuilder,
    target: &str,
    steps: &[StartStep],
) -> CodegenResult<()> {
    for step in steps {
        match step {
            StartStep::Start {
                property,
                animation,
            } => {
                let anim = ctx.call_factory_from_for(caller, ctx.node(*animation).object)?;
                let prop = ctx.stringifier.string(property);
                b.line(format!("{target}.StartAnimation({prop}, {});", direct(&anim)));
            }
            StartStep::ProgressBound {
                property,
                animation,
                expression,
            } => {
                ctx.use_helper(helpers::PROGRESS_BOUND);
                let anim = ctx.call_factory_from_for(caller, ctx.node(*animation).object)?;
                let expr = ctx.call_factory_from_for(caller, ctx.node(*expression).object)?;
                let prop = ctx.stringifier.string(property);
                b.line(format!(
                    "StartProgressBoundAnimation({target}, {prop}, {}, {});",
                    direct(&anim),
                    direct(&expr)
                ));
            }
        }
    }
    Ok(())
}

pub(crate) fn func_or_field(f: &FactoryRef) -> String {
    format!("&TSelf::{}", f.target())
}

pub(crate) fn direct(f: &FactoryRef) -> String {
    match f {
        FactoryRef::Inline { routine } => format!("{routine}()"),
        FactoryRef::Stored { field, .. } => field.clone(),
    }
}

/// Flags-plus-table configuration record.
///
/// Each slot holds either a value (and contributes its flag) or the unset sentinel; absent values
/// are never written as zero.
pub(crate) struct FieldWriter {
    flag_type: &'static str,
    unset: String,
    rows: Vec<(&'static str, String)>,
    flags: Vec<&'static str>,
}

impl FieldWriter {
    pub(crate) fn new(flag_type: &'static str, s: &dyn Stringifier) -> Self {
        Self {
            flag_type,
            unset: s.unset(),
            rows: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub(crate) fn set(&mut self, name: &'static str, value: Option<String>) {
        match value {
            Some(v) => {
                self.flags.push(name);
                self.rows.push((name, v));
            }
            None => self.rows.push((name, self.unset.clone())),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub(crate) fn write(&self, b: &mut CodeBuilder, decl: &str) {
        b.line(format!("constexpr static const {decl} ="));
        b.open_scope();
        let flags = if self.flags.is_empty() {
            format!("{}::None", self.flag_type)
        } else {
            self.flags
                .iter()
                .map(|f| format!("{}::{f}", self.flag_type))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        b.line(format!("{flags},"));
        for (name, value) in &self.rows {
            b.line(format!("{value}, // {name}"));
        }
        b.close_scope_with_semicolon();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/emit/cppwinrt.rs"]
mod tests;
