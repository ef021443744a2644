use super::*;

fn sample() -> GeneratedSource {
    GeneratedSource {
        class_name: "Demo".into(),
        units: vec![
            OutputUnit {
                kind: UnitKind::Preamble,
                name: "preamble".into(),
                text: "int helper();\n".into(),
            },
            OutputUnit {
                kind: UnitKind::Factory,
                name: "Root".into(),
                text: "Visual Root()\n{\n    return v;\n}\n".into(),
            },
            OutputUnit {
                kind: UnitKind::Entry,
                name: "entry".into(),
                text: "public:\n".into(),
            },
        ],
        layout: SourceLayout {
            header: "#pragma once\n".into(),
            prologue: "class Demo\n{\n".into(),
            epilogue: "};\n".into(),
            body_depth: 1,
        },
    }
}

#[test]
fn concat_separates_units_with_blank_lines() {
    assert_eq!(
        sample().concat(),
        "int helper();\n\nVisual Root()\n{\n    return v;\n}\n\npublic:\n"
    );
}

#[test]
fn package_indents_units_inside_the_layout() {
    let p = sample().package();
    assert_eq!(p.header_name, "Demo.h");
    assert_eq!(p.source_name, "Demo.cpp");
    assert_eq!(p.header, "#pragma once\n");
    assert_eq!(
        p.source,
        "class Demo\n{\n    int helper();\n\n    Visual Root()\n    {\n        return v;\n    }\n\n    public:\n};\n"
    );
}

#[test]
fn units_are_found_by_kind_and_name() {
    let s = sample();
    assert_eq!(s.units_of(UnitKind::Factory).count(), 1);
    assert!(s.factory("Root").is_some());
    assert!(s.factory("Missing").is_none());
    assert_eq!(s.units_of(UnitKind::DeferredBind).count(), 0);
}

#[test]
fn fingerprint_tracks_content() {
    let a = sample();
    assert_eq!(a.fingerprint(), sample().fingerprint());

    let mut b = sample();
    b.units[1].text.push_str("// changed\n");
    assert_ne!(a.fingerprint(), b.fingerprint());

    let mut c = sample();
    c.units[1].kind = UnitKind::DeferredBind;
    assert_ne!(a.fingerprint(), c.fingerprint());
}
