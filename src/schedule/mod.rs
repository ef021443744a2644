//! Backend-neutral animation scheduling.
//!
//! Keyframe tables are validated and fixed here, bindings are split into immediate starts and
//! controller entries, and the controller table is collected for the deferred binding unit.

pub(crate) mod bindings;
pub(crate) mod keyframes;
