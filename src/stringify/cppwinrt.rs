use crate::foundation::core::{Color, Matrix3x2, Matrix4x4, TimeSpan, Vector2, Vector3, Vector4};
use crate::scene::enums::{
    BorderMode, ColorSpace, CompositeMode, FillRule, GradientExtendMode, GradientMappingMode,
    ShadowSourcePolicy, StrokeCap, StrokeLineJoin,
};
use crate::stringify::{EnumValue, Stringifier};

/// C++/WinRT literal syntax.
#[derive(Clone, Copy, Debug, Default)]
pub struct CppWinrtStringifier;

fn non_finite(v: f64, ty: &str) -> Option<String> {
    if v.is_nan() {
        Some(format!("std::numeric_limits<{ty}>::quiet_NaN()"))
    } else if v.is_infinite() {
        let sign = if v < 0.0 { "-" } else { "" };
        Some(format!("{sign}std::numeric_limits<{ty}>::infinity()"))
    } else {
        None
    }
}

fn hex(b: u8) -> String {
    format!("0x{b:02X}")
}

impl Stringifier for CppWinrtStringifier {
    fn float(&self, v: f32) -> String {
        if let Some(s) = non_finite(f64::from(v), "float") {
            return s;
        }
        if v.floor() == v {
            format!("{v:.1}F")
        } else {
            // Shortest representation that round-trips through f32.
            format!("{v}F")
        }
    }

    fn double(&self, v: f64) -> String {
        if let Some(s) = non_finite(v, "double") {
            return s;
        }
        if v.floor() == v {
            format!("{v:.1}")
        } else {
            format!("{v}")
        }
    }

    fn int32(&self, v: i32) -> String {
        v.to_string()
    }

    fn int64(&self, v: i64) -> String {
        format!("{v}L")
    }

    fn bool(&self, v: bool) -> String {
        if v { "true" } else { "false" }.to_owned()
    }

    fn string(&self, v: &str) -> String {
        let mut out = String::with_capacity(v.len() + 3);
        out.push_str("L\"");
        for c in v.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }

    fn vector2(&self, v: Vector2) -> String {
        if v == Vector2::ZERO {
            "f2_zero_zero".to_owned()
        } else if v == Vector2::ONE {
            "f2_one_one".to_owned()
        } else {
            format!("{{ {}, {} }}", self.float(v.x), self.float(v.y))
        }
    }

    fn vector3(&self, v: Vector3) -> String {
        format!(
            "{{ {}, {}, {} }}",
            self.float(v.x),
            self.float(v.y),
            self.float(v.z)
        )
    }

    fn vector4(&self, v: Vector4) -> String {
        format!(
            "{{ {}, {}, {}, {} }}",
            self.float(v.x),
            self.float(v.y),
            self.float(v.z),
            self.float(v.w)
        )
    }

    fn matrix3x2(&self, m: Matrix3x2) -> String {
        let cells = [m.m11, m.m12, m.m21, m.m22, m.m31, m.m32];
        format!("{{ {} }}", join_floats(self, &cells))
    }

    fn matrix4x4(&self, m: Matrix4x4) -> String {
        let cells: Vec<f32> = m.rows.iter().flatten().copied().collect();
        format!("{{ {} }}", join_floats(self, &cells))
    }

    fn color(&self, c: Color) -> String {
        format!("{{ {}, {}, {}, {} }}", hex(c.a), hex(c.r), hex(c.g), hex(c.b))
    }

    fn time_span(&self, v: TimeSpan) -> String {
        format!("TimeSpan{{ {} }}", self.int64(v.ticks))
    }

    fn enum_value(&self, v: EnumValue) -> String {
        let s = match v {
            EnumValue::BorderMode(m) => match m {
                BorderMode::Inherit => "CompositionBorderMode::Inherit",
                BorderMode::Soft => "CompositionBorderMode::Soft",
                BorderMode::Hard => "CompositionBorderMode::Hard",
            },
            EnumValue::StrokeCap(c) => match c {
                StrokeCap::Flat => "CompositionStrokeCap::Flat",
                StrokeCap::Square => "CompositionStrokeCap::Square",
                StrokeCap::Round => "CompositionStrokeCap::Round",
                StrokeCap::Triangle => "CompositionStrokeCap::Triangle",
            },
            EnumValue::StrokeLineJoin(j) => match j {
                StrokeLineJoin::Miter => "CompositionStrokeLineJoin::Miter",
                StrokeLineJoin::Bevel => "CompositionStrokeLineJoin::Bevel",
                StrokeLineJoin::Round => "CompositionStrokeLineJoin::Round",
                StrokeLineJoin::MiterOrBevel => "CompositionStrokeLineJoin::MiterOrBevel",
            },
            EnumValue::GradientExtendMode(m) => match m {
                GradientExtendMode::Clamp => "CompositionGradientExtendMode::Clamp",
                GradientExtendMode::Wrap => "CompositionGradientExtendMode::Wrap",
                GradientExtendMode::Mirror => "CompositionGradientExtendMode::Mirror",
            },
            EnumValue::GradientMappingMode(m) => match m {
                GradientMappingMode::Absolute => "CompositionMappingMode::Absolute",
                GradientMappingMode::RelativeToBoundingBox => {
                    "CompositionMappingMode::RelativeToBoundingBox"
                }
            },
            EnumValue::ColorSpace(c) => match c {
                ColorSpace::Auto => "CompositionColorSpace::Auto",
                ColorSpace::Rgb => "CompositionColorSpace::Rgb",
                ColorSpace::RgbLinear => "CompositionColorSpace::RgbLinear",
            },
            EnumValue::CompositeMode(m) => match m {
                CompositeMode::SourceOver => "D2D1_COMPOSITE_MODE_SOURCE_OVER",
                CompositeMode::DestinationOver => "D2D1_COMPOSITE_MODE_DESTINATION_OVER",
                CompositeMode::SourceIn => "D2D1_COMPOSITE_MODE_SOURCE_IN",
                CompositeMode::DestinationIn => "D2D1_COMPOSITE_MODE_DESTINATION_IN",
                CompositeMode::SourceOut => "D2D1_COMPOSITE_MODE_SOURCE_OUT",
                CompositeMode::DestinationOut => "D2D1_COMPOSITE_MODE_DESTINATION_OUT",
                CompositeMode::SourceAtop => "D2D1_COMPOSITE_MODE_SOURCE_ATOP",
                CompositeMode::DestinationAtop => "D2D1_COMPOSITE_MODE_DESTINATION_ATOP",
                CompositeMode::Xor => "D2D1_COMPOSITE_MODE_XOR",
                CompositeMode::Add => "D2D1_COMPOSITE_MODE_PLUS",
                CompositeMode::Copy => "D2D1_COMPOSITE_MODE_SOURCE_COPY",
                CompositeMode::BoundedCopy => "D2D1_COMPOSITE_MODE_BOUNDED_SOURCE_COPY",
                CompositeMode::MaskInvert => "D2D1_COMPOSITE_MODE_MASK_INVERT",
            },
            EnumValue::FillRule(r) => match r {
                FillRule::Alternate => "D2D1_FILL_MODE_ALTERNATE",
                FillRule::Winding => "D2D1_FILL_MODE_WINDING",
            },
            EnumValue::ShadowSourcePolicy(p) => match p {
                ShadowSourcePolicy::Default => "CompositionDropShadowSourcePolicy::Default",
                ShadowSourcePolicy::InheritFromVisualContent => {
                    "CompositionDropShadowSourcePolicy::InheritFromVisualContent"
                }
            },
        };
        s.to_owned()
    }

    fn namespace(&self, dotted: &str) -> String {
        dotted.replace('.', "::")
    }

    fn identifier(&self, name: &str) -> String {
        let mut out: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, '_');
        }
        out
    }

    fn null(&self) -> String {
        "nullptr".to_owned()
    }

    fn unset(&self) -> String {
        "{ /* unset */ }".to_owned()
    }

    fn field_type_name(&self, category: &str) -> String {
        match category {
            "CanvasGeometry" => "winrt::com_ptr<CanvasGeometry>".to_owned(),
            other => other.to_owned(),
        }
    }
}

fn join_floats(s: &CppWinrtStringifier, cells: &[f32]) -> String {
    cells
        .iter()
        .map(|c| s.float(*c))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "../../tests/unit/stringify/cppwinrt.rs"]
mod tests;
