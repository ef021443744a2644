use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::TimeSpan;
use crate::foundation::error::{CodegenError, CodegenResult};

/// Settings for one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Generated class name; also the stem of the packaged file names.
    pub class_name: String,
    /// Dotted namespace wrapping the generated class.
    pub namespace: String,
    /// Ambient animation duration. Keyframe animations with this duration emit the "use default"
    /// sentinel instead of an explicit value.
    pub default_duration: TimeSpan,
    /// Write each object's comment into the runtime object's `Comment` property.
    pub set_comment_properties: bool,
    /// Precede routines and child references with a short description comment.
    pub description_comments: bool,
    /// Frame count of the source animation, used for keyframe frame-number comments.
    pub frame_count: Option<f64>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            class_name: "AnimatedVisual".to_owned(),
            namespace: "AnimatedVisuals".to_owned(),
            default_duration: TimeSpan::from_ticks(TimeSpan::TICKS_PER_SECOND),
            set_comment_properties: false,
            description_comments: true,
            frame_count: None,
        }
    }
}

impl CodegenConfig {
    /// Load from JSON text read from `reader`.
    pub fn from_reader(reader: impl Read) -> CodegenResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| CodegenError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CodegenError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Check the settings that generated code depends on.
    pub fn validate(&self) -> CodegenResult<()> {
        if !is_identifier(&self.class_name) {
            return Err(CodegenError::validation(format!(
                "class_name '{}' is not a valid identifier",
                self.class_name
            )));
        }
        if self.namespace.is_empty() || !self.namespace.split('.').all(is_identifier) {
            return Err(CodegenError::validation(format!(
                "namespace '{}' is not a dotted identifier path",
                self.namespace
            )));
        }
        if self.default_duration.ticks <= 0 {
            return Err(CodegenError::validation("default_duration must be positive"));
        }
        if let Some(n) = self.frame_count
            && !(n.is_finite() && n > 0.0)
        {
            return Err(CodegenError::validation("frame_count must be positive"));
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;
