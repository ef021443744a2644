use super::*;
use crate::scene::animation::KeyFrame;

const DEFAULT: TimeSpan = TimeSpan::from_ticks(10_000_000);

fn label() -> NodeLabel {
    NodeLabel::named(ObjectRef(7), "ScalarKeyFrameAnimation_0", "ScalarKeyFrameAnimation")
}

fn scalar(frames: &[(f32, f32)]) -> KeyFrameAnimation {
    KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        frames
            .iter()
            .map(|&(p, v)| KeyFrame::new(p, KeyFrameValue::Scalar(v)))
            .collect(),
    )
}

#[test]
fn rows_keep_declared_order_including_jumps() {
    let anim = scalar(&[(0.0, 0.0), (0.25, 1.0), (0.25, 5.0), (1.0, 2.0)]);
    let t = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap();
    let progress: Vec<f32> = t.rows.iter().map(|r| r.progress).collect();
    assert_eq!(progress, vec![0.0, 0.25, 0.25, 1.0]);
    assert_eq!(t.rows[1].value, KeyFrameValue::Scalar(1.0));
    assert_eq!(t.rows[2].value, KeyFrameValue::Scalar(5.0));
    assert!(t.rows.iter().all(|r| r.frame.is_none()));
}

#[test]
fn empty_keyframes_are_inconsistent() {
    let anim = scalar(&[]);
    let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
    assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }));
    assert_eq!(err.node().unwrap().object, ObjectRef(7));
}

#[test]
fn progress_outside_unit_range_is_rejected() {
    for p in [-0.1, 1.5, f32::NAN] {
        let anim = scalar(&[(p, 0.0)]);
        let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
        assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }), "{p}");
    }
}

#[test]
fn mismatched_value_type_is_rejected() {
    let anim = KeyFrameAnimation::new(
        AnimationValueType::Scalar,
        vec![KeyFrame::new(0.0, KeyFrameValue::Boolean(true))],
    );
    let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
    assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }));
}

#[test]
fn expressions_fit_values_but_not_paths() {
    let anim = KeyFrameAnimation::new(
        AnimationValueType::Vector2,
        vec![KeyFrame::new(0.5, KeyFrameValue::Expression("root.Size".into()))],
    );
    assert!(KeyFrameTable::build(&anim, &label(), DEFAULT, None).is_ok());

    let anim = KeyFrameAnimation::new(
        AnimationValueType::Path,
        vec![KeyFrame::new(0.5, KeyFrameValue::Expression("p".into()))],
    );
    let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn eased_boolean_keyframe_is_unsupported() {
    let anim = KeyFrameAnimation::new(
        AnimationValueType::Boolean,
        vec![KeyFrame::new(0.0, KeyFrameValue::Boolean(true)).eased(ObjectRef(1))],
    );
    let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
    assert!(matches!(err, CodegenError::UnsupportedConstruct { .. }));
}

#[test]
fn duration_is_explicit_only_when_it_differs_from_default() {
    let mut anim = scalar(&[(0.0, 0.0)]);
    let t = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap();
    assert_eq!(t.duration, DurationSpec::Default);

    anim.duration = Some(DEFAULT);
    let t = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap();
    assert_eq!(t.duration, DurationSpec::Default);

    anim.duration = Some(TimeSpan::from_millis(250));
    let t = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap();
    assert_eq!(t.duration, DurationSpec::Explicit(TimeSpan::from_millis(250)));
}

#[test]
fn explicit_duration_with_default_flag_is_inconsistent() {
    let mut anim = scalar(&[(0.0, 0.0)]);
    anim.duration = Some(TimeSpan::from_millis(250));
    anim.use_default_duration = true;
    let err = KeyFrameTable::build(&anim, &label(), DEFAULT, None).unwrap_err();
    assert!(matches!(err, CodegenError::ConfigurationInconsistency { .. }));
}

#[test]
fn frame_numbers_follow_frame_count() {
    let anim = scalar(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]);
    let t = KeyFrameTable::build(&anim, &label(), DEFAULT, Some(60.0)).unwrap();
    let frames: Vec<Option<f64>> = t.rows.iter().map(|r| r.frame).collect();
    assert_eq!(frames, vec![Some(0.0), Some(30.0), Some(60.0)]);
}
