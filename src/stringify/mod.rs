//! Target-syntax rendering of literal values.
//!
//! The generator never formats a value itself: every number, vector, color, enum or string that
//! lands in generated code goes through a [`Stringifier`], so a backend can be swapped without
//! touching the walker, planner or scheduler.

pub(crate) mod cppwinrt;

use crate::foundation::core::{Color, Matrix3x2, Matrix4x4, TimeSpan, Vector2, Vector3, Vector4};
use crate::scene::enums::{
    BorderMode, ColorSpace, CompositeMode, FillRule, GradientExtendMode, GradientMappingMode,
    ShadowSourcePolicy, StrokeCap, StrokeLineJoin,
};

/// Any scene enum value, for [`Stringifier::enum_value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum EnumValue {
    BorderMode(BorderMode),
    StrokeCap(StrokeCap),
    StrokeLineJoin(StrokeLineJoin),
    GradientExtendMode(GradientExtendMode),
    GradientMappingMode(GradientMappingMode),
    ColorSpace(ColorSpace),
    CompositeMode(CompositeMode),
    FillRule(FillRule),
    ShadowSourcePolicy(ShadowSourcePolicy),
}

macro_rules! impl_from_enum {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EnumValue {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$variant> for Literal {
                fn from(value: $variant) -> Self {
                    Self::Enum(EnumValue::$variant(value))
                }
            }
        )*
    };
}

impl_from_enum!(
    BorderMode,
    StrokeCap,
    StrokeLineJoin,
    GradientExtendMode,
    GradientMappingMode,
    ColorSpace,
    CompositeMode,
    FillRule,
    ShadowSourcePolicy,
);

/// A typed literal, as written into a configuration table.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Literal {
    Float(f32),
    Double(f64),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    String(String),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Matrix3x2(Matrix3x2),
    Matrix4x4(Matrix4x4),
    Color(Color),
    TimeSpan(TimeSpan),
    Enum(EnumValue),
}

/// Backend-specific literal and syntax rendering. Every method is total and deterministic.
pub trait Stringifier {
    /// `f32` literal.
    fn float(&self, v: f32) -> String;
    /// `f64` literal.
    fn double(&self, v: f64) -> String;
    /// `i32` literal.
    fn int32(&self, v: i32) -> String;
    /// `i64` literal.
    fn int64(&self, v: i64) -> String;
    /// Boolean literal.
    fn bool(&self, v: bool) -> String;
    /// String literal, escaped.
    fn string(&self, v: &str) -> String;
    /// 2D vector.
    fn vector2(&self, v: Vector2) -> String;
    /// 3D vector.
    fn vector3(&self, v: Vector3) -> String;
    /// 4D vector.
    fn vector4(&self, v: Vector4) -> String;
    /// 3x2 matrix.
    fn matrix3x2(&self, v: Matrix3x2) -> String;
    /// 4x4 matrix.
    fn matrix4x4(&self, v: Matrix4x4) -> String;
    /// Color.
    fn color(&self, v: Color) -> String;
    /// Duration.
    fn time_span(&self, v: TimeSpan) -> String;
    /// Enum constant.
    fn enum_value(&self, v: EnumValue) -> String;
    /// Dotted namespace in target syntax.
    fn namespace(&self, dotted: &str) -> String;
    /// Arbitrary text coerced into a valid identifier.
    fn identifier(&self, name: &str) -> String;
    /// The null literal.
    fn null(&self) -> String;
    /// The "not set" sentinel for an optional configuration-table slot.
    fn unset(&self) -> String;
    /// Declared type of a stored field of `category`.
    fn field_type_name(&self, category: &str) -> String;

    /// Render any [`Literal`].
    fn literal(&self, v: &Literal) -> String {
        match v {
            Literal::Float(x) => self.float(*x),
            Literal::Double(x) => self.double(*x),
            Literal::Int32(x) => self.int32(*x),
            Literal::Int64(x) => self.int64(*x),
            Literal::Bool(x) => self.bool(*x),
            Literal::String(x) => self.string(x),
            Literal::Vector2(x) => self.vector2(*x),
            Literal::Vector3(x) => self.vector3(*x),
            Literal::Vector4(x) => self.vector4(*x),
            Literal::Matrix3x2(x) => self.matrix3x2(*x),
            Literal::Matrix4x4(x) => self.matrix4x4(*x),
            Literal::Color(x) => self.color(*x),
            Literal::TimeSpan(x) => self.time_span(*x),
            Literal::Enum(x) => self.enum_value(*x),
        }
    }
}

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vector2> for Literal {
    fn from(v: Vector2) -> Self {
        Self::Vector2(v)
    }
}

impl From<Vector3> for Literal {
    fn from(v: Vector3) -> Self {
        Self::Vector3(v)
    }
}

impl From<Vector4> for Literal {
    fn from(v: Vector4) -> Self {
        Self::Vector4(v)
    }
}

impl From<Matrix3x2> for Literal {
    fn from(v: Matrix3x2) -> Self {
        Self::Matrix3x2(v)
    }
}

impl From<Matrix4x4> for Literal {
    fn from(v: Matrix4x4) -> Self {
        Self::Matrix4x4(v)
    }
}

impl From<Color> for Literal {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

