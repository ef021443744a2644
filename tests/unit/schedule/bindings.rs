use super::*;
use crate::graph::walker::walk;
use crate::plan::storage::plan_storage;
use crate::scene::animation::{
    AnimationBinding, AnimationValueType, ExpressionAnimation, KeyFrame, KeyFrameAnimation,
    KeyFrameValue,
};
use crate::scene::brush::ColorBrush;
use crate::scene::object::SceneObject;
use crate::scene::visual::SpriteVisual;

fn scalar_anim() -> SceneObject {
    SceneObject::new(KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        vec![
            KeyFrame::new(0.0, KeyFrameValue::Scalar(0.0)),
            KeyFrame::new(1.0, KeyFrameValue::Scalar(1.0)),
        ],
    ))
}

fn expression(text: &str) -> SceneObject {
    SceneObject::new(ExpressionAnimation {
        expression: text.to_owned(),
        target: None,
        reference_parameters: Vec::new(),
    })
}

fn planned(g: &SceneGraph) -> NodeRegistry {
    let mut reg = walk(g).unwrap();
    plan_storage(&mut reg);
    reg
}

#[test]
fn plain_bindings_start_in_declaration_order() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let b = g.add(scalar_anim());
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", a))
            .with_animator(AnimationBinding::new("RotationAngleInDegrees", b)),
    );
    let reg = planned(&g);

    let mut s = AnimationScheduler::new();
    let steps = s
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap();
    assert_eq!(
        steps,
        vec![
            StartStep::Start {
                property: "Opacity".into(),
                animation: reg.lookup(a).unwrap(),
            },
            StartStep::Start {
                property: "RotationAngleInDegrees".into(),
                animation: reg.lookup(b).unwrap(),
            },
        ]
    );
    assert!(s.controllers().is_empty());
}

#[test]
fn progress_bound_binding_pairs_keyframes_with_expression() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let e = g.add(expression("_.Progress"));
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::progress_bound("Opacity", a, e)),
    );
    let reg = planned(&g);

    let steps = AnimationScheduler::new()
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap();
    assert_eq!(
        steps,
        vec![StartStep::ProgressBound {
            property: "Opacity".into(),
            animation: reg.lookup(a).unwrap(),
            expression: reg.lookup(e).unwrap(),
        }]
    );
}

#[test]
fn progress_bound_with_swapped_roles_is_unsupported() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let e = g.add(expression("_.Progress"));
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::progress_bound("Opacity", e, a)),
    );
    let reg = planned(&g);

    let err = AnimationScheduler::new()
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn binding_to_a_non_animation_is_unsupported() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", brush)),
    );
    let reg = planned(&g);

    let err = AnimationScheduler::new()
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn controller_bindings_start_and_share_one_entry() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let ctl = g.add(SceneObject::controller());
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(ctl, true))
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(ctl, true)),
    );
    let reg = planned(&g);

    let mut s = AnimationScheduler::new();
    let steps = s
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(s.controllers().len(), 1);
    let entry = &s.controllers().entries()[0];
    assert_eq!(entry.property, "Opacity");
    assert_eq!(entry.controller, reg.lookup(ctl).unwrap());
    assert!(entry.paused);
}

#[test]
fn conflicting_pause_flags_are_inconsistent() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let ctl = g.add(SceneObject::controller());
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(ctl, true))
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(ctl, false)),
    );
    let reg = planned(&g);

    let err = AnimationScheduler::new()
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap_err();
    assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }));
}

#[test]
fn progress_bound_through_controller_is_inconsistent() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let e = g.add(expression("_.Progress"));
    let ctl = g.add(SceneObject::controller());
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default()).with_animator(
            AnimationBinding::progress_bound("Opacity", a, e).with_controller(ctl, false),
        ),
    );
    let reg = planned(&g);

    let err = AnimationScheduler::new()
        .schedule_node(&g, &reg, reg.lookup(root).unwrap())
        .unwrap_err();
    assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }));
}

#[test]
fn controller_own_bindings_are_planned() {
    let mut g = SceneGraph::new();
    let a = g.add(scalar_anim());
    let progress = g.add(scalar_anim());
    let ctl = g.add(SceneObject::controller().with_animator(AnimationBinding::new("Progress", progress)));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", a).with_controller(ctl, false)),
    );
    let reg = planned(&g);

    let steps = AnimationScheduler::new()
        .schedule_controller(&g, &reg, reg.lookup(ctl).unwrap())
        .unwrap();
    assert_eq!(
        steps,
        vec![StartStep::Start {
            property: "Progress".into(),
            animation: reg.lookup(progress).unwrap(),
        }]
    );
}
