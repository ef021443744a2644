//! Routine emission.
//!
//! [`factory::EmitContext`] carries per-pass emission state and resolves child references;
//! backends implement [`factory::FactoryEmitter`] and build text with [`builder::CodeBuilder`].

pub(crate) mod builder;
pub(crate) mod cppwinrt;
pub(crate) mod factory;
