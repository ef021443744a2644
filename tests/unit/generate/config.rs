use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = CodegenConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.default_duration, TimeSpan::from_millis(1000));
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = CodegenConfig::from_reader(
        r#"{ "class_name": "Logo", "frame_count": 60 }"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.class_name, "Logo");
    assert_eq!(cfg.frame_count, Some(60.0));
    assert_eq!(cfg.namespace, CodegenConfig::default().namespace);
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = CodegenConfig::from_reader("{ class_name: ".as_bytes()).unwrap_err();
    assert!(matches!(err, CodegenError::Validation(_)));
}

#[test]
fn rejects_bad_names_and_durations() {
    let bad = [
        CodegenConfig {
            class_name: "9Lives".into(),
            ..CodegenConfig::default()
        },
        CodegenConfig {
            namespace: "A..B".into(),
            ..CodegenConfig::default()
        },
        CodegenConfig {
            default_duration: TimeSpan::from_ticks(0),
            ..CodegenConfig::default()
        },
        CodegenConfig {
            frame_count: Some(-1.0),
            ..CodegenConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(CodegenError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = CodegenConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, CodegenError::Validation(_)));
}
