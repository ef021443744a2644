use super::*;
use crate::scene::brush::EffectSourceParameter;
use crate::scene::animation::{AnimationBinding, KeyFrame};

#[test]
fn deserializes_flattened_kind_with_shared_props() {
    let json = r##"{
        "kind": "sprite_visual",
        "offset": [1, 2, 3],
        "size": { "x": 10, "y": 20 },
        "brush": 4,
        "comment": "card"
    }"##;
    let obj: SceneObject = serde_json::from_str(json).unwrap();
    let ObjectKind::SpriteVisual(v) = &obj.kind else {
        panic!("expected sprite visual, got {:?}", obj.kind);
    };
    assert_eq!(v.visual.offset, Some(Vector3::new(1.0, 2.0, 3.0)));
    assert_eq!(v.visual.size, Some(Vector2::new(10.0, 20.0)));
    assert_eq!(v.visual.opacity, None);
    assert_eq!(v.brush, Some(ObjectRef(4)));
    assert_eq!(obj.comment.as_deref(), Some("card"));
}

#[test]
fn unit_kinds_deserialize_from_tag_only() {
    let obj: SceneObject = serde_json::from_str(r#"{ "kind": "animation_controller" }"#).unwrap();
    assert!(obj.kind.is_controller());
    let obj: SceneObject = serde_json::from_str(r#"{ "kind": "linear_easing" }"#).unwrap();
    assert_eq!(obj.kind, ObjectKind::LinearEasing);
}

#[test]
fn storage_categories_collapse_easings_and_keyframe_animations() {
    let scalar = ObjectKind::from(KeyFrameAnimation::new(AnimationValueType::Scalar, vec![]));
    let color = ObjectKind::from(KeyFrameAnimation::new(AnimationValueType::Color, vec![]));
    assert_eq!(scalar.type_name(), "ScalarKeyFrameAnimation");
    assert_eq!(color.type_name(), "ColorKeyFrameAnimation");
    assert_eq!(scalar.storage_category(), color.storage_category());
    assert_eq!(scalar.storage_category(), "CompositionAnimation");

    assert_eq!(
        ObjectKind::LinearEasing.storage_category(),
        ObjectKind::from(StepEasingFunction {
            step_count: Some(2),
            is_initial_step_single_frame: false,
            is_final_step_single_frame: false,
        })
        .storage_category()
    );

    let brush = ObjectKind::from(ColorBrush::default());
    assert_eq!(brush.storage_category(), "CompositionColorBrush");
    assert_eq!(brush.name_stem(), "ColorBrush");
}

#[test]
fn references_follow_declared_field_order() {
    let mut visual = SpriteVisual::default();
    visual.visual.clip = Some(ObjectRef(9));
    visual.brush = Some(ObjectRef(1));
    visual.shadow = Some(ObjectRef(2));
    visual.children = vec![ObjectRef(3), ObjectRef(4)];
    let refs = ObjectKind::from(visual).references();
    assert_eq!(
        refs.as_slice(),
        &[ObjectRef(9), ObjectRef(1), ObjectRef(2), ObjectRef(3), ObjectRef(4)]
    );

    let brush = EffectBrush {
        effect: ObjectRef(7),
        sources: vec![
            EffectSourceParameter {
                name: "Source".into(),
                brush: ObjectRef(5),
            },
            EffectSourceParameter {
                name: "Mask".into(),
                brush: ObjectRef(6),
            },
        ],
    };
    assert_eq!(
        ObjectKind::from(brush).references().as_slice(),
        &[ObjectRef(7), ObjectRef(5), ObjectRef(6)]
    );
}

#[test]
fn keyframe_animation_references_paths_easings_and_parameters() {
    let mut anim = KeyFrameAnimation::new(
        AnimationValueType::Path,
        vec![
            KeyFrame::new(0.0, KeyFrameValue::Path(ObjectRef(10))),
            KeyFrame::new(1.0, KeyFrameValue::Path(ObjectRef(11))).eased(ObjectRef(12)),
        ],
    );
    anim.reference_parameters.push(("root".into(), ObjectRef(0)));
    assert_eq!(
        ObjectKind::from(anim).references().as_slice(),
        &[ObjectRef(10), ObjectRef(11), ObjectRef(12), ObjectRef(0)]
    );
}

#[test]
fn controller_references_are_deferred_edges() {
    let obj = SceneObject::new(ColorBrush::default())
        .with_animator(AnimationBinding::new("Color", ObjectRef(1)).with_controller(ObjectRef(2), true))
        .with_animator(AnimationBinding::progress_bound("Opacity", ObjectRef(3), ObjectRef(4)));

    assert_eq!(
        obj.construction_edges().as_slice(),
        &[ObjectRef(1), ObjectRef(3), ObjectRef(4)]
    );
    assert_eq!(obj.deferred_edges().as_slice(), &[ObjectRef(2)]);
}

#[test]
fn describe_includes_comment_when_present() {
    let plain = SceneObject::new(ColorBrush::default());
    assert_eq!(plain.describe(), "ColorBrush");
    let commented = SceneObject::new(ColorBrush::default()).with_comment("AlmostBlack");
    assert_eq!(commented.describe(), "ColorBrush: AlmostBlack");
}
