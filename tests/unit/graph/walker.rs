use super::*;
use crate::scene::animation::{AnimationBinding, ExpressionAnimation};
use crate::scene::brush::ColorBrush;
use crate::scene::object::SceneObject;
use crate::scene::visual::{ContainerVisual, SpriteVisual};

fn sprite(brush: Option<ObjectRef>, children: Vec<ObjectRef>) -> SceneObject {
    SceneObject::new(SpriteVisual {
        brush,
        children,
        ..SpriteVisual::default()
    })
}

fn expression(params: Vec<(String, ObjectRef)>) -> SceneObject {
    SceneObject::new(ExpressionAnimation {
        expression: "_.Progress".into(),
        target: None,
        reference_parameters: params,
    })
}

#[test]
fn shared_brush_is_registered_once_and_counted_per_edge() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let c1 = g.add(sprite(None, vec![]));
    let c2 = g.add(sprite(Some(brush), vec![]));
    let root = g.add_root(sprite(Some(brush), vec![c1, c2]));

    let reg = walk(&g).unwrap();
    assert_eq!(reg.len(), 4);
    let b = reg.lookup(brush).unwrap();
    assert_eq!(reg.node(b).refs, 2);
    assert_eq!(reg.node(reg.lookup(c1).unwrap()).refs, 1);
    assert!(reg.node(reg.lookup(root).unwrap()).is_root);
    assert_eq!(reg.node(reg.lookup(root).unwrap()).refs, 0);
}

#[test]
fn registration_order_follows_declared_fields() {
    let mut g = SceneGraph::new();
    let brush = g.add(SceneObject::new(ColorBrush::default()));
    let child = g.add(sprite(None, vec![]));
    let root = g.add_root(sprite(Some(brush), vec![child]));

    let reg = walk(&g).unwrap();
    let order: Vec<ObjectRef> = reg.nodes().map(|(_, n)| n.object).collect();
    assert_eq!(order, vec![root, brush, child]);
}

#[test]
fn construction_cycle_is_rejected() {
    let mut g = SceneGraph::new();
    let a = g.add_root(SceneObject::new(ContainerVisual::default()));
    let b = g.add(SceneObject::new(ContainerVisual {
        children: vec![a],
        ..ContainerVisual::default()
    }));
    if let Some(obj) = g.get_mut(a) {
        obj.kind = ContainerVisual {
            children: vec![b],
            ..ContainerVisual::default()
        }
        .into();
    }

    let err = walk(&g).unwrap_err();
    assert!(matches!(err, CodegenError::GraphInvariantViolation { .. }));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn cycle_through_controller_is_deferred_not_rejected() {
    let mut g = SceneGraph::new();
    let root_ref = ObjectRef(3);
    let expr = g.add(expression(vec![("root".into(), root_ref)]));
    let controller = g.add(
        SceneObject::controller().with_animator(AnimationBinding::new("Progress", expr)),
    );
    let anim = g.add(expression(vec![]));
    let root = g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", anim).with_controller(controller, true)),
    );
    assert_eq!(root, root_ref);

    let reg = walk(&g).unwrap();
    let root_node = reg.node(reg.lookup(root).unwrap());
    assert!(root_node.is_controller_target);
    assert_eq!(root_node.deferred_refs, 1);

    let c = reg.lookup(controller).unwrap();
    assert!(reg.node(c).deferred_only);
    assert_eq!(reg.node(c).controller_refs, 1);
    assert!(reg.node(reg.lookup(expr).unwrap()).deferred_only);
    assert!(!reg.node(reg.lookup(anim).unwrap()).deferred_only);
    assert!(reg.is_reachable_from(reg.lookup(root).unwrap(), reg.lookup(expr).unwrap()));
}

#[test]
fn dangling_reference_is_rejected() {
    let mut g = SceneGraph::new();
    g.add_root(sprite(Some(ObjectRef(99)), vec![]));
    let err = walk(&g).unwrap_err();
    assert!(matches!(err, CodegenError::GraphInvariantViolation { .. }));
}

#[test]
fn controller_binding_must_reference_a_controller() {
    let mut g = SceneGraph::new();
    let anim = g.add(expression(vec![]));
    let not_controller = g.add(SceneObject::new(ColorBrush::default()));
    g.add_root(
        SceneObject::new(SpriteVisual::default())
            .with_animator(AnimationBinding::new("Opacity", anim).with_controller(not_controller, false)),
    );
    let err = walk(&g).unwrap_err();
    assert!(matches!(err, CodegenError::GraphInvariantViolation { .. }));
}

#[test]
fn deep_chains_do_not_overflow() {
    let mut g = SceneGraph::new();
    let mut prev = g.add(SceneObject::new(ContainerVisual::default()));
    for _ in 0..20_000 {
        prev = g.add(SceneObject::new(ContainerVisual {
            children: vec![prev],
            ..ContainerVisual::default()
        }));
    }
    g.roots.push(prev);
    let reg = walk(&g).unwrap();
    assert_eq!(reg.len(), 20_001);
}
