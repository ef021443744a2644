use super::Routine;
use super::helpers::{CUBIC_BEZIER, KEY_FRAMES};
use crate::foundation::error::CodegenResult;
use crate::foundation::ids::ObjectRef;
use crate::scene::animation::{
    AnimationValueType, CubicBezierEasingFunction, ExpressionAnimation, KeyFrameAnimation,
    KeyFrameValue, StepEasingFunction,
};
use crate::scene::object::KindFamily;
use crate::schedule::keyframes::{DurationSpec, KeyFrameTable};
use crate::stringify::Literal;

fn step_type(t: AnimationValueType) -> &'static str {
    match t {
        AnimationValueType::Scalar => "float",
        AnimationValueType::Vector2 => "float2",
        AnimationValueType::Vector3 => "float3",
        AnimationValueType::Vector4 => "float4",
        AnimationValueType::Color => "Color",
        AnimationValueType::Boolean => "bool",
        AnimationValueType::Path => "func_or_field<CompositionPath>",
    }
}

fn frame_comment(frame: f64) -> String {
    if frame.fract() == 0.0 {
        format!(" // Frame {frame:.0}")
    } else {
        format!(" // Frame {frame}")
    }
}

pub(super) fn key_frame_animation(
    r: &mut Routine<'_, '_>,
    a: &KeyFrameAnimation,
) -> CodegenResult<()> {
    let table = KeyFrameTable::build(
        a,
        &r.label(),
        r.ctx.config.default_duration,
        r.ctx.config.frame_count,
    )?;
    r.helper(KEY_FRAMES);
    let boolean = table.value_type == AnimationValueType::Boolean;

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let value = match &row.value {
            KeyFrameValue::Scalar(x) => r.lit(*x),
            KeyFrameValue::Vector2(x) => r.lit(*x),
            KeyFrameValue::Vector3(x) => r.lit(*x),
            KeyFrameValue::Vector4(x) => r.lit(*x),
            KeyFrameValue::Color(x) => r.lit(*x),
            KeyFrameValue::Boolean(x) => r.lit(*x),
            KeyFrameValue::Path(p) => r.child("Value", KindFamily::Path, *p)?,
            KeyFrameValue::Expression(e) => format!("Expression{{ {} }}", r.s().string(e)),
        };
        let progress = r.lit(row.progress);
        let mut line = if boolean {
            format!("{{ {progress}, {value} }},")
        } else {
            let easing = match row.easing {
                Some(e) => r.child("Easing", KindFamily::EasingFunction, e)?,
                None => r.s().null(),
            };
            format!("{{ {progress}, {value}, {easing} }},")
        };
        if let Some(frame) = row.frame {
            line.push_str(&frame_comment(frame));
        }
        rows.push(line);
    }

    r.b.line(format!(
        "constexpr static const KeyFrameStep<{}> steps[] =",
        step_type(table.value_type)
    ));
    r.b.open_scope();
    for line in rows {
        r.b.line(line);
    }
    r.b.close_scope_with_semicolon();

    let duration = match table.duration {
        DurationSpec::Explicit(d) => {
            let v = r.s().literal(&Literal::TimeSpan(d));
            r.b.line(format!("constexpr static const TimeSpan duration = {v};"));
            "&duration".to_owned()
        }
        DurationSpec::Default => r.s().null(),
    };

    let type_name = r.ctx.node(r.idx).type_name;
    r.b.line(format!("auto result = _c.Create{type_name}();"));
    r.b.line(format!(
        "ConfigureAnimationKeyFrames(result, {duration}, steps, _countof(steps));"
    ));
    target_and_parameters(r, a.target.as_deref(), &a.reference_parameters)
}

pub(super) fn expression_animation(
    r: &mut Routine<'_, '_>,
    a: &ExpressionAnimation,
) -> CodegenResult<()> {
    let expression = r.s().string(&a.expression);
    r.b.line(format!(
        "auto result = _c.CreateExpressionAnimation({expression});"
    ));
    target_and_parameters(r, a.target.as_deref(), &a.reference_parameters)
}

fn target_and_parameters(
    r: &mut Routine<'_, '_>,
    target: Option<&str>,
    parameters: &[(String, ObjectRef)],
) -> CodegenResult<()> {
    if let Some(t) = target {
        let t = r.s().string(t);
        r.b.line(format!("result.Target({t});"));
    }
    // Reference parameters take any composition object.
    for (name, object) in parameters {
        let value = super::direct(&r.ctx.call_factory_from_for(r.idx, *object)?);
        let name = r.s().string(name);
        r.b.line(format!("result.SetReferenceParameter({name}, {value});"));
    }
    Ok(())
}

pub(super) fn linear_easing(r: &mut Routine<'_, '_>) {
    r.b.line("auto result = _c.CreateLinearEasingFunction();");
}

pub(super) fn step_easing(r: &mut Routine<'_, '_>, e: &StepEasingFunction) {
    r.b.line("auto result = _c.CreateStepEasingFunction();");
    if let Some(n) = e.step_count {
        let n = r.s().int32(n);
        r.b.line(format!("result.StepCount({n});"));
    }
    if e.is_initial_step_single_frame {
        let t = r.lit(true);
        r.b.line(format!("result.IsInitialStepSingleFrame({t});"));
    }
    if e.is_final_step_single_frame {
        let t = r.lit(true);
        r.b.line(format!("result.IsFinalStepSingleFrame({t});"));
    }
}

pub(super) fn cubic_bezier_easing(r: &mut Routine<'_, '_>, e: &CubicBezierEasingFunction) {
    r.helper(CUBIC_BEZIER);
    let id = r.ctx.cubic_bezier_id(e.control_point1, e.control_point2);
    r.b.line(format!(
        "auto result = CreateCubicBezierEasingFunction<{id}>();"
    ));
}
