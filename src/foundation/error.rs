use crate::foundation::ids::ObjectRef;
use std::fmt;

/// Result alias used throughout the generator.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Identity of the scene node an error is about.
///
/// Walk-time failures happen before a node has been named, so `name` is optional; the object ref
/// is always known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeLabel {
    /// Run-scoped identity of the offending object.
    pub object: ObjectRef,
    /// Generated routine name, once assigned.
    pub name: Option<String>,
    /// Short human description (kind plus comment when present).
    pub description: String,
}

impl NodeLabel {
    /// Label for an object that has not been registered yet.
    pub fn unnamed(object: ObjectRef, description: impl Into<String>) -> Self {
        Self {
            object,
            name: None,
            description: description.into(),
        }
    }

    /// Label for a registered node.
    pub fn named(object: ObjectRef, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            object,
            name: Some(name.into()),
            description: description.into(),
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} (#{}, {})", self.object.0, self.description),
            None => write!(f, "#{} ({})", self.object.0, self.description),
        }
    }
}

/// Fatal generation error. Every variant aborts the whole pass.
#[derive(thiserror::Error, Debug)]
pub enum CodegenError {
    /// A kind/property combination with no emission rule.
    #[error("unsupported construct at {node}: {detail}")]
    UnsupportedConstruct {
        /// Offending node.
        node: NodeLabel,
        /// What could not be emitted.
        detail: String,
    },

    /// The upstream graph broke an invariant the generator relies on.
    #[error("graph invariant violated at {node}: {detail}")]
    GraphInvariantViolation {
        /// Offending node.
        node: NodeLabel,
        /// Which invariant.
        detail: String,
    },

    /// Contradictory settings on one node.
    #[error("inconsistent configuration at {node}: {detail}")]
    ConfigurationInconsistency {
        /// Offending node.
        node: NodeLabel,
        /// Which settings disagree.
        detail: String,
    },

    /// Malformed configuration or input document.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    /// Anything else, with its source preserved.
    Other(#[from] anyhow::Error),
}

impl CodegenError {
    /// Build a [`CodegenError::UnsupportedConstruct`].
    pub fn unsupported(node: NodeLabel, detail: impl Into<String>) -> Self {
        Self::UnsupportedConstruct {
            node,
            detail: detail.into(),
        }
    }

    /// Build a [`CodegenError::GraphInvariantViolation`].
    pub fn invariant(node: NodeLabel, detail: impl Into<String>) -> Self {
        Self::GraphInvariantViolation {
            node,
            detail: detail.into(),
        }
    }

    /// Build a [`CodegenError::ConfigurationInconsistency`].
    pub fn inconsistent(node: NodeLabel, detail: impl Into<String>) -> Self {
        Self::ConfigurationInconsistency {
            node,
            detail: detail.into(),
        }
    }

    /// Build a [`CodegenError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The node this error is about, if it is node-scoped.
    pub fn node(&self) -> Option<&NodeLabel> {
        match self {
            Self::UnsupportedConstruct { node, .. }
            | Self::GraphInvariantViolation { node, .. }
            | Self::ConfigurationInconsistency { node, .. } => Some(node),
            Self::Validation(_) | Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
