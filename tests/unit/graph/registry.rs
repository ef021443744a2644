use super::*;
use crate::scene::brush::ColorBrush;
use crate::scene::visual::SpriteVisual;

#[test]
fn resolve_is_identity_keyed() {
    let brush = SceneObject::new(ColorBrush::default());
    let mut reg = NodeRegistry::new();
    let (a, created_a) = reg.resolve(ObjectRef(0), &brush, false);
    let (b, created_b) = reg.resolve(ObjectRef(0), &brush, false);
    let (c, created_c) = reg.resolve(ObjectRef(1), &brush, false);
    assert!(created_a);
    assert!(!created_b);
    assert!(created_c);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(reg.len(), 2);
}

#[test]
fn names_are_per_stem_ordinals_and_roots_are_root() {
    let brush = SceneObject::new(ColorBrush::default());
    let visual = SceneObject::new(SpriteVisual::default());
    let mut reg = NodeRegistry::new();
    let (r0, _) = reg.resolve(ObjectRef(0), &visual, true);
    let (v0, _) = reg.resolve(ObjectRef(1), &visual, false);
    let (b0, _) = reg.resolve(ObjectRef(2), &brush, false);
    let (b1, _) = reg.resolve(ObjectRef(3), &brush, false);
    let (r1, _) = reg.resolve(ObjectRef(4), &visual, true);
    assert_eq!(reg.node(r0).name, "Root");
    assert_eq!(reg.node(v0).name, "SpriteVisual_0");
    assert_eq!(reg.node(b0).name, "ColorBrush_0");
    assert_eq!(reg.node(b1).name, "ColorBrush_1");
    assert_eq!(reg.node(r1).name, "Root_1");
    assert_eq!(reg.node(b0).category, "CompositionColorBrush");
}

#[test]
fn require_reports_unregistered_objects() {
    let reg = NodeRegistry::new();
    let err = reg.require(ObjectRef(42)).unwrap_err();
    assert!(matches!(err, CodegenError::GraphInvariantViolation { .. }));
}

#[test]
fn reachability_follows_both_edge_kinds() {
    let brush = SceneObject::new(ColorBrush::default());
    let mut reg = NodeRegistry::new();
    let (a, _) = reg.resolve(ObjectRef(0), &brush, false);
    let (b, _) = reg.resolve(ObjectRef(1), &brush, false);
    let (c, _) = reg.resolve(ObjectRef(2), &brush, false);
    let (d, _) = reg.resolve(ObjectRef(3), &brush, false);
    reg.node_mut(a).edges.push(b);
    reg.node_mut(b).deferred_edges.push(c);

    assert!(reg.is_reachable_from(a, b));
    assert!(reg.is_reachable_from(a, c));
    assert!(reg.is_reachable_from(d, d));
    assert!(!reg.is_reachable_from(c, a));
    assert!(!reg.is_reachable_from(a, d));
}

#[test]
fn get_rejects_indices_from_a_larger_registry() {
    let brush = SceneObject::new(ColorBrush::default());
    let mut big = NodeRegistry::new();
    big.resolve(ObjectRef(0), &brush, false);
    let (foreign, _) = big.resolve(ObjectRef(1), &brush, false);

    let mut small = NodeRegistry::new();
    let (own, _) = small.resolve(ObjectRef(0), &brush, false);

    assert!(small.get(foreign).is_none());
    assert_eq!(small.get(own).map(|n| n.object), Some(ObjectRef(0)));
    assert_eq!(foreign.get(), 1);
}
