use crate::emit::builder::CodeBuilder;
use crate::emit::factory::EmitContext;

pub(super) const PROPERTY_SET: &str = "PropertySet";
pub(super) const VISUAL_PROPERTIES: &str = "VisualProperties";
pub(super) const CONTAINER_VISUALS: &str = "ContainerVisuals";
pub(super) const COMPOSITION_SHAPES: &str = "CompositionShapes";
pub(super) const SPRITE_VISUAL: &str = "SpriteVisual";
pub(super) const VISUAL_SURFACE: &str = "VisualSurface";
pub(super) const SHAPE_PROPERTIES: &str = "ShapeProperties";
pub(super) const SPRITE_SHAPE: &str = "SpriteShape";
pub(super) const INSET_CLIP: &str = "InsetClip";
pub(super) const GRADIENT: &str = "Gradient";
pub(super) const EFFECT_BRUSH: &str = "EffectBrush";
pub(super) const EFFECTS: &str = "Effects";
pub(super) const SURFACE_BRUSH: &str = "SurfaceBrush";
pub(super) const DROP_SHADOW: &str = "DropShadow";
pub(super) const GEOMETRY: &str = "Geometry";
pub(super) const ELLIPSE: &str = "Ellipse";
pub(super) const PATHS: &str = "Paths";
pub(super) const KEY_FRAMES: &str = "KeyFrames";
pub(super) const CUBIC_BEZIER: &str = "CubicBezier";
pub(super) const PROGRESS_BOUND: &str = "ProgressBound";
pub(super) const ANIMATION_CONTROLLER: &str = "AnimationController";

const CORE: &str = r#"#define SCENEGEN_FLAGS(E) \
    friend constexpr E operator|(E a, E b) { return static_cast<E>(static_cast<uint32_t>(a) | static_cast<uint32_t>(b)); } \
    friend constexpr bool HasFlag(E flags, E flag) { return (static_cast<uint32_t>(flags) & static_cast<uint32_t>(flag)) != 0; }

template<typename T>
struct func_or_field
{
    T(TSelf::* func)() = nullptr;
    T TSelf::* field = nullptr;

    constexpr func_or_field() = default;
    constexpr func_or_field(std::nullptr_t) {}
    constexpr func_or_field(T(TSelf::* f)()) : func(f) {}
    constexpr func_or_field(T TSelf::* f) : field(f) {}
};

template<typename T>
T invoke_func_or_field(func_or_field<T> const& f)
{
    if (f.func) { return (this->*f.func)(); }
    if (f.field) { return this->*f.field; }
    return nullptr;
}

static constexpr float2 f2_zero_zero{ 0.0F, 0.0F };
static constexpr float2 f2_one_one{ 1.0F, 1.0F };"#;

const HELPERS: &[(&str, &str)] = &[
    (
        PROPERTY_SET,
        r#"struct propset_value
{
    const wchar_t* name;
    std::variant<float, float2, float3, float4, Color> value;
};

void ApplyProperties(CompositionObject const& target, propset_value const* values, size_t count)
{
    auto set = target.Properties();
    for (size_t i = 0; i < count; i++)
    {
        auto const& v = values[i];
        std::visit([&](auto const& x) { InsertProperty(set, v.name, x); }, v.value);
    }
}"#,
    ),
    (
        VISUAL_PROPERTIES,
        r#"enum class VisualProperty : uint32_t
{
    None = 0,
    BorderMode = 1 << 0,
    CenterPoint = 1 << 1,
    Clip = 1 << 2,
    IsVisible = 1 << 3,
    Offset = 1 << 4,
    Opacity = 1 << 5,
    RotationAngleInDegrees = 1 << 6,
    RotationAxis = 1 << 7,
    Scale = 1 << 8,
    Size = 1 << 9,
    TransformMatrix = 1 << 10,
};
SCENEGEN_FLAGS(VisualProperty)

struct VisualProperties
{
    VisualProperty flags;
    CompositionBorderMode borderMode;
    float3 centerPoint;
    func_or_field<CompositionClip> clip;
    bool isVisible;
    float3 offset;
    float opacity;
    float rotationAngleInDegrees;
    float3 rotationAxis;
    float3 scale;
    float2 size;
    float4x4 transformMatrix;
};

void ApplyVisualProperties(Visual const& target, VisualProperties const& p)
{
    if (HasFlag(p.flags, VisualProperty::BorderMode)) { target.BorderMode(p.borderMode); }
    if (HasFlag(p.flags, VisualProperty::CenterPoint)) { target.CenterPoint(p.centerPoint); }
    if (HasFlag(p.flags, VisualProperty::Clip)) { target.Clip(invoke_func_or_field(p.clip)); }
    if (HasFlag(p.flags, VisualProperty::IsVisible)) { target.IsVisible(p.isVisible); }
    if (HasFlag(p.flags, VisualProperty::Offset)) { target.Offset(p.offset); }
    if (HasFlag(p.flags, VisualProperty::Opacity)) { target.Opacity(p.opacity); }
    if (HasFlag(p.flags, VisualProperty::RotationAngleInDegrees)) { target.RotationAngleInDegrees(p.rotationAngleInDegrees); }
    if (HasFlag(p.flags, VisualProperty::RotationAxis)) { target.RotationAxis(p.rotationAxis); }
    if (HasFlag(p.flags, VisualProperty::Scale)) { target.Scale(p.scale); }
    if (HasFlag(p.flags, VisualProperty::Size)) { target.Size(p.size); }
    if (HasFlag(p.flags, VisualProperty::TransformMatrix)) { target.TransformMatrix(p.transformMatrix); }
}"#,
    ),
    (
        CONTAINER_VISUALS,
        r#"void ApplyContainerVisuals(ContainerVisual const& target, func_or_field<Visual> const* visuals, size_t count)
{
    auto children = target.Children();
    for (size_t i = 0; i < count; i++)
    {
        children.InsertAtTop(invoke_func_or_field(visuals[i]));
    }
}"#,
    ),
    (
        COMPOSITION_SHAPES,
        r#"void AddCompositionShapes(CompositionContainerShape const& target, func_or_field<CompositionShape> const* shapes, size_t count)
{
    auto list = target.Shapes();
    for (size_t i = 0; i < count; i++)
    {
        list.Append(invoke_func_or_field(shapes[i]));
    }
}

void AddCompositionShapes(ShapeVisual const& target, func_or_field<CompositionShape> const* shapes, size_t count)
{
    auto list = target.Shapes();
    for (size_t i = 0; i < count; i++)
    {
        list.Append(invoke_func_or_field(shapes[i]));
    }
}"#,
    ),
    (
        SPRITE_VISUAL,
        r#"struct SpriteVisualProps
{
    func_or_field<CompositionBrush> brush;
    func_or_field<CompositionShadow> shadow;
};

SpriteVisual CreateSpriteVisual(SpriteVisualProps const& p)
{
    auto result = _c.CreateSpriteVisual();
    if (p.brush) { result.Brush(invoke_func_or_field(p.brush)); }
    if (p.shadow) { result.Shadow(invoke_func_or_field(p.shadow)); }
    return result;
}"#,
    ),
    (
        VISUAL_SURFACE,
        r#"enum class VisualSurfaceProperty : uint32_t
{
    None = 0,
    SourceVisual = 1 << 0,
    SourceSize = 1 << 1,
    SourceOffset = 1 << 2,
};
SCENEGEN_FLAGS(VisualSurfaceProperty)

struct VisualSurfaceProps
{
    VisualSurfaceProperty flags;
    func_or_field<Visual> sourceVisual;
    float2 sourceSize;
    float2 sourceOffset;
};

void ApplyVisualSurfaceProps(CompositionVisualSurface const& target, VisualSurfaceProps const& p)
{
    if (HasFlag(p.flags, VisualSurfaceProperty::SourceVisual)) { target.SourceVisual(invoke_func_or_field(p.sourceVisual)); }
    if (HasFlag(p.flags, VisualSurfaceProperty::SourceSize)) { target.SourceSize(p.sourceSize); }
    if (HasFlag(p.flags, VisualSurfaceProperty::SourceOffset)) { target.SourceOffset(p.sourceOffset); }
}"#,
    ),
    (
        SHAPE_PROPERTIES,
        r#"enum class ShapeProperty : uint32_t
{
    None = 0,
    CenterPoint = 1 << 0,
    Offset = 1 << 1,
    RotationAngleInDegrees = 1 << 2,
    Scale = 1 << 3,
    TransformMatrix = 1 << 4,
};
SCENEGEN_FLAGS(ShapeProperty)

struct ShapeProperties
{
    ShapeProperty flags;
    float2 centerPoint;
    float2 offset;
    float rotationAngleInDegrees;
    float2 scale;
    float3x2 transformMatrix;
};

void ApplyShapeProperties(CompositionShape const& target, ShapeProperties const& p)
{
    if (HasFlag(p.flags, ShapeProperty::CenterPoint)) { target.CenterPoint(p.centerPoint); }
    if (HasFlag(p.flags, ShapeProperty::Offset)) { target.Offset(p.offset); }
    if (HasFlag(p.flags, ShapeProperty::RotationAngleInDegrees)) { target.RotationAngleInDegrees(p.rotationAngleInDegrees); }
    if (HasFlag(p.flags, ShapeProperty::Scale)) { target.Scale(p.scale); }
    if (HasFlag(p.flags, ShapeProperty::TransformMatrix)) { target.TransformMatrix(p.transformMatrix); }
}"#,
    ),
    (
        SPRITE_SHAPE,
        r#"enum class SpriteShapeProperty : uint32_t
{
    None = 0,
    Geometry = 1 << 0,
    FillBrush = 1 << 1,
    StrokeBrush = 1 << 2,
    StrokeDashArray = 1 << 3,
    StrokeDashCap = 1 << 4,
    StrokeDashOffset = 1 << 5,
    StrokeStartCap = 1 << 6,
    StrokeEndCap = 1 << 7,
    StrokeLineJoin = 1 << 8,
    StrokeMiterLimit = 1 << 9,
    StrokeThickness = 1 << 10,
    IsStrokeNonScaling = 1 << 11,
};
SCENEGEN_FLAGS(SpriteShapeProperty)

struct float_array
{
    float const* values;
    size_t count;
};

struct SpriteShapeProps
{
    SpriteShapeProperty flags;
    func_or_field<CompositionGeometry> geometry;
    func_or_field<CompositionBrush> fillBrush;
    func_or_field<CompositionBrush> strokeBrush;
    float_array strokeDashArray;
    CompositionStrokeCap strokeDashCap;
    float strokeDashOffset;
    CompositionStrokeCap strokeStartCap;
    CompositionStrokeCap strokeEndCap;
    CompositionStrokeLineJoin strokeLineJoin;
    float strokeMiterLimit;
    float strokeThickness;
    bool isStrokeNonScaling;
};

CompositionSpriteShape MakeAndApplyProperties(Compositor const& c, SpriteShapeProps const& p)
{
    auto result = c.CreateSpriteShape();
    if (HasFlag(p.flags, SpriteShapeProperty::Geometry)) { result.Geometry(invoke_func_or_field(p.geometry)); }
    if (HasFlag(p.flags, SpriteShapeProperty::FillBrush)) { result.FillBrush(invoke_func_or_field(p.fillBrush)); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeBrush)) { result.StrokeBrush(invoke_func_or_field(p.strokeBrush)); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeDashArray))
    {
        auto dashes = result.StrokeDashArray();
        for (size_t i = 0; i < p.strokeDashArray.count; i++) { dashes.Append(p.strokeDashArray.values[i]); }
    }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeDashCap)) { result.StrokeDashCap(p.strokeDashCap); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeDashOffset)) { result.StrokeDashOffset(p.strokeDashOffset); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeStartCap)) { result.StrokeStartCap(p.strokeStartCap); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeEndCap)) { result.StrokeEndCap(p.strokeEndCap); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeLineJoin)) { result.StrokeLineJoin(p.strokeLineJoin); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeMiterLimit)) { result.StrokeMiterLimit(p.strokeMiterLimit); }
    if (HasFlag(p.flags, SpriteShapeProperty::StrokeThickness)) { result.StrokeThickness(p.strokeThickness); }
    if (HasFlag(p.flags, SpriteShapeProperty::IsStrokeNonScaling)) { result.IsStrokeNonScaling(p.isStrokeNonScaling); }
    return result;
}"#,
    ),
    (
        INSET_CLIP,
        r#"enum class InsetClipProperty : uint32_t
{
    None = 0,
    BottomInset = 1 << 0,
    LeftInset = 1 << 1,
    RightInset = 1 << 2,
    TopInset = 1 << 3,
    CenterPoint = 1 << 4,
    Scale = 1 << 5,
};
SCENEGEN_FLAGS(InsetClipProperty)

struct InsetClipProps
{
    InsetClipProperty flags;
    float bottomInset;
    float leftInset;
    float rightInset;
    float topInset;
    float2 centerPoint;
    float2 scale;
};

void ApplyInsetClipProps(InsetClip const& target, InsetClipProps const& p)
{
    if (HasFlag(p.flags, InsetClipProperty::BottomInset)) { target.BottomInset(p.bottomInset); }
    if (HasFlag(p.flags, InsetClipProperty::LeftInset)) { target.LeftInset(p.leftInset); }
    if (HasFlag(p.flags, InsetClipProperty::RightInset)) { target.RightInset(p.rightInset); }
    if (HasFlag(p.flags, InsetClipProperty::TopInset)) { target.TopInset(p.topInset); }
    if (HasFlag(p.flags, InsetClipProperty::CenterPoint)) { target.CenterPoint(p.centerPoint); }
    if (HasFlag(p.flags, InsetClipProperty::Scale)) { target.Scale(p.scale); }
}"#,
    ),
    (
        GRADIENT,
        r#"enum class GradientProperty : uint32_t
{
    None = 0,
    AnchorPoint = 1 << 0,
    CenterPoint = 1 << 1,
    ColorStops = 1 << 2,
    ExtendMode = 1 << 3,
    InterpolationSpace = 1 << 4,
    MappingMode = 1 << 5,
    Offset = 1 << 6,
    RotationAngleInDegrees = 1 << 7,
    Scale = 1 << 8,
    TransformMatrix = 1 << 9,
};
SCENEGEN_FLAGS(GradientProperty)

struct color_stop_array
{
    func_or_field<CompositionColorGradientStop> const* stops;
    size_t count;
};

struct GradientBrushConfig
{
    GradientProperty flags;
    float2 anchorPoint;
    float2 centerPoint;
    color_stop_array colorStops;
    CompositionGradientExtendMode extendMode;
    CompositionColorSpace interpolationSpace;
    CompositionMappingMode mappingMode;
    float2 offset;
    float rotationAngleInDegrees;
    float2 scale;
    float3x2 transformMatrix;
};

void ApplyCompositionGradientProperties(CompositionGradientBrush const& target, GradientBrushConfig const& p)
{
    if (HasFlag(p.flags, GradientProperty::AnchorPoint)) { target.AnchorPoint(p.anchorPoint); }
    if (HasFlag(p.flags, GradientProperty::CenterPoint)) { target.CenterPoint(p.centerPoint); }
    if (HasFlag(p.flags, GradientProperty::ColorStops))
    {
        auto stops = target.ColorStops();
        for (size_t i = 0; i < p.colorStops.count; i++) { stops.Append(invoke_func_or_field(p.colorStops.stops[i])); }
    }
    if (HasFlag(p.flags, GradientProperty::ExtendMode)) { target.ExtendMode(p.extendMode); }
    if (HasFlag(p.flags, GradientProperty::InterpolationSpace)) { target.InterpolationSpace(p.interpolationSpace); }
    if (HasFlag(p.flags, GradientProperty::MappingMode)) { target.MappingMode(p.mappingMode); }
    if (HasFlag(p.flags, GradientProperty::Offset)) { target.Offset(p.offset); }
    if (HasFlag(p.flags, GradientProperty::RotationAngleInDegrees)) { target.RotationAngleInDegrees(p.rotationAngleInDegrees); }
    if (HasFlag(p.flags, GradientProperty::Scale)) { target.Scale(p.scale); }
    if (HasFlag(p.flags, GradientProperty::TransformMatrix)) { target.TransformMatrix(p.transformMatrix); }
}"#,
    ),
    (
        EFFECT_BRUSH,
        r#"struct SourceParameter
{
    const wchar_t* name;
    func_or_field<CompositionBrush> brush;
};

struct CompositionBrushProps
{
    func_or_field<CompositionEffectFactory> factory;
    SourceParameter const* params;
    size_t count;
};

CompositionEffectBrush MakeEffectBrush(CompositionBrushProps const& p)
{
    auto result = invoke_func_or_field(p.factory).CreateBrush();
    for (size_t i = 0; i < p.count; i++)
    {
        result.SetSourceParameter(p.params[i].name, invoke_func_or_field(p.params[i].brush));
    }
    return result;
}"#,
    ),
    (
        EFFECTS,
        r#"struct CompositeEffect
{
    static CompositionEffectFactory Make(Compositor const& c, D2D1_COMPOSITE_MODE mode, const wchar_t* const* sources, size_t count)
    {
        auto effect = winrt::make_self<CompositeEffectDescription>();
        effect->SetMode(mode);
        for (size_t i = 0; i < count; i++)
        {
            effect->AddSource(CompositionEffectSourceParameter{ sources[i] });
        }
        return c.CreateEffectFactory(*effect);
    }
};

struct GaussianBlurEffect
{
    static CompositionEffectFactory Make(Compositor const& c, float blurAmount, const wchar_t* source)
    {
        auto effect = winrt::make_self<GaussianBlurEffectDescription>();
        effect->SetBlurAmount(blurAmount);
        effect->SetSource(CompositionEffectSourceParameter{ source });
        return c.CreateEffectFactory(*effect);
    }
};"#,
    ),
    (
        SURFACE_BRUSH,
        r#"CompositionSurfaceBrush MakeSurfaceBrush(ICompositionSurface const& surface, bool isReachable)
{
    auto result = _c.CreateSurfaceBrush();
    if (!isReachable)
    {
        result.Surface(surface);
    }
    return result;
}"#,
    ),
    (
        DROP_SHADOW,
        r#"enum class DropShadowProperty : uint32_t
{
    None = 0,
    BlurRadius = 1 << 0,
    Color = 1 << 1,
    Mask = 1 << 2,
    Offset = 1 << 3,
    Opacity = 1 << 4,
    SourcePolicy = 1 << 5,
};
SCENEGEN_FLAGS(DropShadowProperty)

struct DropShadowProps
{
    DropShadowProperty flags;
    float blurRadius;
    Color color;
    func_or_field<CompositionBrush> mask;
    float3 offset;
    float opacity;
    CompositionDropShadowSourcePolicy sourcePolicy;
};

void ApplyDropShadowProps(DropShadow const& target, DropShadowProps const& p)
{
    if (HasFlag(p.flags, DropShadowProperty::BlurRadius)) { target.BlurRadius(p.blurRadius); }
    if (HasFlag(p.flags, DropShadowProperty::Color)) { target.Color(p.color); }
    if (HasFlag(p.flags, DropShadowProperty::Mask)) { target.Mask(invoke_func_or_field(p.mask)); }
    if (HasFlag(p.flags, DropShadowProperty::Offset)) { target.Offset(p.offset); }
    if (HasFlag(p.flags, DropShadowProperty::Opacity)) { target.Opacity(p.opacity); }
    if (HasFlag(p.flags, DropShadowProperty::SourcePolicy)) { target.SourcePolicy(p.sourcePolicy); }
}"#,
    ),
    (
        GEOMETRY,
        r#"enum class GeometryProperty : uint32_t
{
    None = 0,
    TrimEnd = 1 << 0,
    TrimOffset = 1 << 1,
    TrimStart = 1 << 2,
};
SCENEGEN_FLAGS(GeometryProperty)

struct GeometryConfig
{
    GeometryProperty flags;
    float trimEnd;
    float trimOffset;
    float trimStart;
};

void ApplyGeometryProps(CompositionGeometry const& target, GeometryConfig const& p)
{
    if (HasFlag(p.flags, GeometryProperty::TrimEnd)) { target.TrimEnd(p.trimEnd); }
    if (HasFlag(p.flags, GeometryProperty::TrimOffset)) { target.TrimOffset(p.trimOffset); }
    if (HasFlag(p.flags, GeometryProperty::TrimStart)) { target.TrimStart(p.trimStart); }
}"#,
    ),
    (
        ELLIPSE,
        r#"struct center_radius
{
    float2 center;
    float2 radius;
};

CompositionEllipseGeometry CreateEllipseGeometry(center_radius const& cr)
{
    auto result = _c.CreateEllipseGeometry();
    if (cr.center != float2::zero()) { result.Center(cr.center); }
    result.Radius(cr.radius);
    return result;
}"#,
    ),
    (
        PATHS,
        r#"winrt::com_ptr<CanvasGeometry> MakeCanvasGeometry(Compositor const& c, D2D1_FILL_MODE fillMode, const wchar_t* data)
{
    return CanvasGeometry::FromPathData(c, fillMode, data);
}

CompositionPath MakeCompositionPath(winrt::com_ptr<CanvasGeometry> const& geometry)
{
    return CompositionPath(geometry.as<IGeometrySource2D>());
}

CompositionPathGeometry MakePathGeometry(CompositionPath const& path)
{
    return _c.CreatePathGeometry(path);
}"#,
    ),
    (
        KEY_FRAMES,
        r#"struct Expression
{
    const wchar_t* text;
};

template<typename T>
struct KeyFrameValue
{
    T value{};
    const wchar_t* expression = nullptr;

    constexpr KeyFrameValue(T v) : value(v) {}
    constexpr KeyFrameValue(Expression e) : expression(e.text) {}
};

template<typename T>
struct KeyFrameStep
{
    float progress;
    KeyFrameValue<T> value;
    func_or_field<CompositionEasingFunction> easing;
};

template<typename TAnimation, typename T>
void ConfigureAnimationKeyFrames(TAnimation const& animation, TimeSpan const* duration, KeyFrameStep<T> const* steps, size_t count)
{
    animation.Duration(duration ? *duration : TimeSpan{ c_durationTicks });
    for (size_t i = 0; i < count; i++)
    {
        auto const& s = steps[i];
        auto easing = invoke_func_or_field(s.easing);
        if (s.value.expression)
        {
            easing ? animation.InsertExpressionKeyFrame(s.progress, s.value.expression, easing)
                   : animation.InsertExpressionKeyFrame(s.progress, s.value.expression);
        }
        else
        {
            easing ? animation.InsertKeyFrame(s.progress, s.value.value, easing)
                   : animation.InsertKeyFrame(s.progress, s.value.value);
        }
    }
}"#,
    ),
    (
        PROGRESS_BOUND,
        r#"void StartProgressBoundAnimation(CompositionObject const& target, const wchar_t* property, CompositionAnimation const& animation, ExpressionAnimation const& controllerProgressExpression)
{
    target.StartAnimation(property, animation);
    auto controller = target.TryGetAnimationController(property);
    controller.Pause();
    controller.StartAnimation(L"Progress", controllerProgressExpression);
}"#,
    ),
    (
        ANIMATION_CONTROLLER,
        r#"AnimationController GetAnimationController(CompositionObject const& target, const wchar_t* property, bool paused)
{
    auto result = target.TryGetAnimationController(property);
    if (paused) { result.Pause(); }
    return result;
}"#,
    ),
];

/// Core helpers, every used helper in a fixed order, then the cubic bezier specializations.
pub(super) fn preamble(ctx: &EmitContext<'_>) -> String {
    let mut b = CodeBuilder::new();
    b.line(CORE);
    for (name, text) in HELPERS {
        if ctx.uses_helper(name) {
            b.blank();
            b.line(*text);
        }
    }
    if ctx.uses_helper(CUBIC_BEZIER) {
        b.blank();
        b.line("template<size_t N> CubicBezierEasingFunction CreateCubicBezierEasingFunction();");
        for (id, (p1, p2)) in ctx.cubic_beziers().iter().enumerate() {
            let p1 = ctx.stringifier.vector2(*p1);
            let p2 = ctx.stringifier.vector2(*p2);
            b.blank();
            b.line(format!(
                "template<> CubicBezierEasingFunction CreateCubicBezierEasingFunction<{id}>()"
            ));
            b.open_scope();
            b.line(format!(
                "return _c.CreateCubicBezierEasingFunction({p1}, {p2});"
            ));
            b.close_scope();
        }
    }
    b.finish()
}
