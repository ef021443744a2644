use crate::foundation::core::TimeSpan;
use crate::foundation::error::{CodegenError, CodegenResult, NodeLabel};
use crate::foundation::ids::ObjectRef;
use crate::scene::animation::{AnimationValueType, KeyFrameAnimation, KeyFrameValue};

/// Duration written for a keyframe animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationSpec {
    /// Use the ambient default (emitted as the "use default" sentinel).
    Default,
    /// Explicit duration that differs from the ambient default.
    Explicit(TimeSpan),
}

/// One row of a keyframe step table.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFrameRow {
    /// Normalized progress.
    pub progress: f32,
    /// Value or expression.
    pub value: KeyFrameValue,
    /// Easing reference.
    pub easing: Option<ObjectRef>,
    /// Frame number at this progress, when a frame count is configured.
    pub frame: Option<f64>,
}

/// Validated, backend-neutral keyframe table.
///
/// Rows are in declared order: never sorted, never deduplicated. Two rows at the same progress
/// encode an instantaneous jump.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFrameTable {
    /// Animated value type.
    pub value_type: AnimationValueType,
    /// Rows in declared order.
    pub rows: Vec<KeyFrameRow>,
    /// Duration decision.
    pub duration: DurationSpec,
}

impl KeyFrameTable {
    /// Validate `anim` and build its table.
    pub fn build(
        anim: &KeyFrameAnimation,
        node: &NodeLabel,
        default_duration: TimeSpan,
        frame_count: Option<f64>,
    ) -> CodegenResult<Self> {
        if anim.use_default_duration && anim.duration.is_some() {
            return Err(CodegenError::inconsistent(
                node.clone(),
                "animation sets both an explicit duration and use_default_duration",
            ));
        }
        if anim.key_frames.is_empty() {
            return Err(CodegenError::inconsistent(
                node.clone(),
                "keyframe animation has no keyframes",
            ));
        }

        let mut rows = Vec::with_capacity(anim.key_frames.len());
        for (i, kf) in anim.key_frames.iter().enumerate() {
            if !(0.0..=1.0).contains(&kf.progress) {
                return Err(CodegenError::inconsistent(
                    node.clone(),
                    format!("keyframe {i} progress {} is outside [0, 1]", kf.progress),
                ));
            }
            match kf.value.value_type() {
                Some(t) if t != anim.value_type => {
                    return Err(CodegenError::inconsistent(
                        node.clone(),
                        format!(
                            "keyframe {i} holds a {t:?} value in a {:?} animation",
                            anim.value_type
                        ),
                    ));
                }
                None if anim.value_type == AnimationValueType::Path => {
                    return Err(CodegenError::unsupported(
                        node.clone(),
                        format!("keyframe {i}: path keyframes cannot be expressions"),
                    ));
                }
                _ => {}
            }
            if anim.value_type == AnimationValueType::Boolean && kf.easing.is_some() {
                return Err(CodegenError::unsupported(
                    node.clone(),
                    format!("keyframe {i}: boolean keyframes cannot be eased"),
                ));
            }

            rows.push(KeyFrameRow {
                progress: kf.progress,
                value: kf.value.clone(),
                easing: kf.easing,
                frame: frame_count.map(|n| frame_number(kf.progress, n)),
            });
        }

        let duration = match anim.duration {
            Some(d) if d != default_duration => DurationSpec::Explicit(d),
            _ => DurationSpec::Default,
        };

        Ok(Self {
            value_type: anim.value_type,
            rows,
            duration,
        })
    }
}

fn frame_number(progress: f32, frame_count: f64) -> f64 {
    (f64::from(progress) * frame_count * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/keyframes.rs"]
mod tests;
