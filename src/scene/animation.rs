use crate::foundation::core::{Color, TimeSpan, Vector2, Vector3, Vector4};
use crate::foundation::ids::ObjectRef;
use serde::{Deserialize, Serialize};

/// Value type animated by a [`KeyFrameAnimation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationValueType {
    /// `float`.
    Scalar,
    /// `float2`.
    Vector2,
    /// `float3`.
    Vector3,
    /// `float4`.
    Vector4,
    /// `Color`.
    Color,
    /// `bool`; steps only, no easing.
    Boolean,
    /// Path morphing; values reference `Path` objects.
    Path,
}

/// Keyframe payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFrameValue {
    /// Scalar value.
    Scalar(f32),
    /// Vector2 value.
    Vector2(Vector2),
    /// Vector3 value.
    Vector3(Vector3),
    /// Vector4 value.
    Vector4(Vector4),
    /// Color value.
    Color(Color),
    /// Boolean value.
    Boolean(bool),
    /// Reference to a `Path` object.
    Path(ObjectRef),
    /// Expression evaluated by the runtime at this keyframe.
    Expression(String),
}

impl KeyFrameValue {
    /// Value type carried by this payload; `None` for expressions, which fit any type but paths.
    pub fn value_type(&self) -> Option<AnimationValueType> {
        match self {
            Self::Scalar(_) => Some(AnimationValueType::Scalar),
            Self::Vector2(_) => Some(AnimationValueType::Vector2),
            Self::Vector3(_) => Some(AnimationValueType::Vector3),
            Self::Vector4(_) => Some(AnimationValueType::Vector4),
            Self::Color(_) => Some(AnimationValueType::Color),
            Self::Boolean(_) => Some(AnimationValueType::Boolean),
            Self::Path(_) => Some(AnimationValueType::Path),
            Self::Expression(_) => None,
        }
    }
}

/// One keyframe. Keyframes stay in declared order; equal progress values are instantaneous jumps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    /// Normalized progress in `[0, 1]`.
    pub progress: f32,
    /// Value or expression at `progress`.
    pub value: KeyFrameValue,
    /// Easing applied from the previous keyframe; `None` uses the runtime's default.
    #[serde(default)]
    pub easing: Option<ObjectRef>,
}

impl KeyFrame {
    /// Keyframe with no easing reference.
    pub fn new(progress: f32, value: KeyFrameValue) -> Self {
        Self {
            progress,
            value,
            easing: None,
        }
    }

    /// Set the easing reference.
    pub fn eased(mut self, easing: ObjectRef) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Keyframe animation of one value type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyFrameAnimation {
    /// Animated value type.
    pub value_type: AnimationValueType,
    /// Keyframes in declared order.
    pub key_frames: Vec<KeyFrame>,
    /// Explicit duration; `None` uses the ambient default.
    #[serde(default)]
    pub duration: Option<TimeSpan>,
    /// Explicitly requests the ambient default duration.
    #[serde(default)]
    pub use_default_duration: bool,
    /// Property path the animation targets, if set on the animation itself.
    #[serde(default)]
    pub target: Option<String>,
    /// Named objects the keyframe expressions refer to.
    #[serde(default)]
    pub reference_parameters: Vec<(String, ObjectRef)>,
}

impl KeyFrameAnimation {
    /// Animation of `value_type` over `key_frames` with the ambient duration.
    pub fn new(value_type: AnimationValueType, key_frames: Vec<KeyFrame>) -> Self {
        Self {
            value_type,
            key_frames,
            duration: None,
            use_default_duration: false,
            target: None,
            reference_parameters: Vec::new(),
        }
    }
}

/// Expression animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionAnimation {
    /// Expression text, passed through verbatim.
    pub expression: String,
    /// Property path the animation targets, if set on the animation itself.
    #[serde(default)]
    pub target: Option<String>,
    /// Named objects the expression refers to.
    #[serde(default)]
    pub reference_parameters: Vec<(String, ObjectRef)>,
}

/// Step easing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepEasingFunction {
    /// Number of steps; the runtime default is 1.
    #[serde(default)]
    pub step_count: Option<i32>,
    /// First step lasts a single frame.
    #[serde(default)]
    pub is_initial_step_single_frame: bool,
    /// Last step lasts a single frame.
    #[serde(default)]
    pub is_final_step_single_frame: bool,
}

/// Cubic bezier easing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierEasingFunction {
    /// First control point.
    pub control_point1: Vector2,
    /// Second control point.
    pub control_point2: Vector2,
}

/// Controller reference on a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerBinding {
    /// The `AnimationController` object whose own bindings run on the materialized controller.
    pub controller: ObjectRef,
    /// Pause the controller once materialized.
    #[serde(default)]
    pub paused: bool,
}

/// What a binding starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundAnimation {
    /// An ordinary animation started on the property.
    Animation(ObjectRef),
    /// A keyframe animation whose progress is driven by an expression animation.
    ProgressBound {
        /// The keyframe animation.
        animation: ObjectRef,
        /// The expression animation driving its progress.
        expression: ObjectRef,
    },
}

/// Animation bound to one property of its owning object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationBinding {
    /// Target property name on the owning object.
    pub property: String,
    /// Animation (or progress-bound pair) to start.
    pub animation: BoundAnimation,
    /// Optional controller mediating the animation.
    #[serde(default)]
    pub controller: Option<ControllerBinding>,
}

impl AnimationBinding {
    /// Bind `animation` to `property` with no controller.
    pub fn new(property: impl Into<String>, animation: ObjectRef) -> Self {
        Self {
            property: property.into(),
            animation: BoundAnimation::Animation(animation),
            controller: None,
        }
    }

    /// Bind a progress-driven (animation, expression) pair to `property`.
    pub fn progress_bound(
        property: impl Into<String>,
        animation: ObjectRef,
        expression: ObjectRef,
    ) -> Self {
        Self {
            property: property.into(),
            animation: BoundAnimation::ProgressBound {
                animation,
                expression,
            },
            controller: None,
        }
    }

    /// Route the animation through `controller`.
    pub fn with_controller(mut self, controller: ObjectRef, paused: bool) -> Self {
        self.controller = Some(ControllerBinding { controller, paused });
        self
    }
}
