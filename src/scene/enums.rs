use serde::{Deserialize, Serialize};

/// Visual border mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Inherit from the parent (the runtime default).
    Inherit,
    /// Anti-aliased edges.
    Soft,
    /// Aliased edges.
    Hard,
}

/// Stroke end cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    /// No extension past the end point.
    Flat,
    /// Square extension.
    Square,
    /// Semicircular extension.
    Round,
    /// Triangular extension.
    Triangle,
}

/// Stroke corner join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeLineJoin {
    /// Sharp corner.
    Miter,
    /// Cut-off corner.
    Bevel,
    /// Rounded corner.
    Round,
    /// Miter, falling back to bevel past the miter limit.
    MiterOrBevel,
}

/// Gradient behavior outside the [0, 1] stop range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientExtendMode {
    /// Repeat the edge color.
    Clamp,
    /// Tile.
    Wrap,
    /// Tile, mirroring alternate repeats.
    Mirror,
}

/// Coordinate space of gradient points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMappingMode {
    /// Absolute coordinates.
    Absolute,
    /// Relative to the painted bounds.
    RelativeToBoundingBox,
}

/// Color interpolation space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Runtime chooses.
    Auto,
    /// sRGB.
    Rgb,
    /// Linear RGB.
    RgbLinear,
}

/// Composite effect blend mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// Source over destination.
    SourceOver,
    /// Destination over source.
    DestinationOver,
    /// Source where destination exists.
    SourceIn,
    /// Destination where source exists.
    DestinationIn,
    /// Source where destination does not exist.
    SourceOut,
    /// Destination where source does not exist.
    DestinationOut,
    /// Source atop destination.
    SourceAtop,
    /// Destination atop source.
    DestinationAtop,
    /// Exclusive or.
    Xor,
    /// Additive.
    Add,
    /// Copy source.
    Copy,
    /// Copy source within source bounds.
    BoundedCopy,
    /// Invert mask.
    MaskInvert,
}

/// Path fill rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Even-odd.
    Alternate,
    /// Non-zero winding.
    Winding,
}

/// What a drop shadow is cast from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowSourcePolicy {
    /// The visual's brush.
    Default,
    /// The visual's rendered content.
    InheritFromVisualContent,
}
