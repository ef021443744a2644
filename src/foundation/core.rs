use crate::foundation::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};

/// 2D vector (`float2` in the generated code).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vector2 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `(0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `(1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0);
}

impl<'de> Deserialize<'de> for Vector2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f32; 2]),
            Obj { x: f32, y: f32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) | Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// 3D vector (`float3`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl<'de> Deserialize<'de> for Vector3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f32; 3]),
            Obj { x: f32, y: f32, z: f32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, z]) | Repr::Obj { x, y, z } => Ok(Self { x, y, z }),
        }
    }
}

/// 4D vector (`float4`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Vector4 {
    /// Construct from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl<'de> Deserialize<'de> for Vector4 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f32; 4]),
            Obj { x: f32, y: f32, z: f32, w: f32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, z, w]) | Repr::Obj { x, y, z, w } => Ok(Self { x, y, z, w }),
        }
    }
}

/// Row-major 3x2 affine matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x2 {
    /// Row 1, column 1.
    pub m11: f32,
    /// Row 1, column 2.
    pub m12: f32,
    /// Row 2, column 1.
    pub m21: f32,
    /// Row 2, column 2.
    pub m22: f32,
    /// Translation x.
    pub m31: f32,
    /// Translation y.
    pub m32: f32,
}

impl Matrix3x2 {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        m31: 0.0,
        m32: 0.0,
    };
}

/// Row-major 4x4 matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix4x4 {
    /// Rows, outer index first.
    pub rows: [[f32; 4]; 4],
}

impl Matrix4x4 {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };
}

/// Straight-alpha ARGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Alpha.
    pub a: u8,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Construct from ARGB channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(s: &str) -> CodegenResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| CodegenError::validation(format!("color '{s}' must start with '#'")))?;
        let byte = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| CodegenError::validation(format!("color '{s}' is not valid hex")))
        };
        match hex.len() {
            6 => Ok(Self::argb(255, byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(CodegenError::validation(format!(
                "color '{s}' must have 6 or 8 hex digits"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                #[serde(default = "opaque")]
                a: u8,
                r: u8,
                g: u8,
                b: u8,
            },
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { a, r, g, b } => Ok(Self { a, r, g, b }),
        }
    }
}

/// Duration in 100ns ticks, the unit of the target runtime's `TimeSpan`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeSpan {
    /// 100ns ticks.
    pub ticks: i64,
}

impl TimeSpan {
    /// Ticks per second.
    pub const TICKS_PER_SECOND: i64 = 10_000_000;

    /// Construct from raw ticks.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Construct from whole milliseconds.
    pub const fn from_millis(ms: i64) -> Self {
        Self {
            ticks: ms * (Self::TICKS_PER_SECOND / 1000),
        }
    }

    /// Duration in seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.ticks as f64 / Self::TICKS_PER_SECOND as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
