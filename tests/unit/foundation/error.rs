use super::*;

fn label() -> NodeLabel {
    NodeLabel::named(ObjectRef(7), "SpriteVisual_2", "SpriteVisual")
}

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CodegenError::unsupported(label(), "x")
            .to_string()
            .contains("unsupported construct at")
    );
    assert!(
        CodegenError::invariant(label(), "x")
            .to_string()
            .contains("graph invariant violated at")
    );
    assert!(
        CodegenError::inconsistent(label(), "x")
            .to_string()
            .contains("inconsistent configuration at")
    );
    assert!(
        CodegenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn node_scoped_errors_name_the_node() {
    let err = CodegenError::unsupported(label(), "no rule for saturation effect");
    let text = err.to_string();
    assert!(text.contains("SpriteVisual_2"));
    assert!(text.contains("#7"));
    assert_eq!(err.node().unwrap().object, ObjectRef(7));
    assert!(CodegenError::validation("x").node().is_none());
}

#[test]
fn unnamed_label_falls_back_to_object_ref() {
    let l = NodeLabel::unnamed(ObjectRef(3), "ColorBrush");
    assert_eq!(l.to_string(), "#3 (ColorBrush)");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CodegenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
