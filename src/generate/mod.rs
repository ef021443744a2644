//! Pass orchestration.
//!
//! A [`GenerationPass`] validates its inputs, walks the scene graph, plans storage and fixes the
//! emission order up front; [`GenerationPass::run`] then drives a backend over the annotated
//! registry. Any error aborts the whole pass and no partial output is returned.

pub(crate) mod config;
pub(crate) mod output;

use crate::emit::cppwinrt::CppWinrtEmitter;
use crate::emit::factory::{EmitContext, FactoryEmitter};
use crate::foundation::error::CodegenResult;
use crate::generate::config::CodegenConfig;
use crate::generate::output::{GeneratedSource, OutputUnit, UnitKind};
use crate::graph::registry::NodeRegistry;
use crate::graph::walker;
use crate::plan::order::EmissionOrder;
use crate::plan::storage;
use crate::scene::graph::SceneGraph;
use crate::stringify::Stringifier;
use crate::stringify::cppwinrt::CppWinrtStringifier;

/// One planned generation pass over a scene graph.
///
/// Owns the registry exclusively; independent passes share nothing.
pub struct GenerationPass<'a> {
    graph: &'a SceneGraph,
    config: &'a CodegenConfig,
    registry: NodeRegistry,
    order: EmissionOrder,
}

impl<'a> GenerationPass<'a> {
    /// Validate inputs, walk, plan storage and compute the emission order.
    #[tracing::instrument(skip_all, fields(class = %config.class_name))]
    pub fn new(graph: &'a SceneGraph, config: &'a CodegenConfig) -> CodegenResult<Self> {
        config.validate()?;
        graph.validate()?;
        let mut registry = walker::walk(graph)?;
        let stored = storage::plan_storage(&mut registry);
        let order = EmissionOrder::compute(&registry)?;
        tracing::debug!(
            nodes = registry.len(),
            stored,
            ordered = order.len(),
            "pass planned"
        );
        Ok(Self {
            graph,
            config,
            registry,
            order,
        })
    }

    /// Annotated registry.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Emission order.
    pub fn order(&self) -> &EmissionOrder {
        &self.order
    }

    /// Emit every unit through `emitter`.
    #[tracing::instrument(skip_all, fields(nodes = self.order.len()))]
    pub fn run(
        &self,
        stringifier: &dyn Stringifier,
        emitter: &dyn FactoryEmitter,
    ) -> CodegenResult<GeneratedSource> {
        let mut ctx = EmitContext::new(self.graph, &self.registry, self.config, stringifier);

        let mut factories = Vec::with_capacity(self.order.len());
        for idx in self.order.iter() {
            let text = emitter.emit_factory(&mut ctx, idx)?;
            ctx.mark_emitted(idx);
            factories.push(OutputUnit {
                kind: UnitKind::Factory,
                name: ctx.node(idx).name.clone(),
                text,
            });
        }
        let deferred = emitter.emit_deferred_bind(&mut ctx)?;
        let entry = emitter.emit_entry(&ctx, &self.order)?;
        let preamble = emitter.emit_preamble(&ctx);
        let layout = emitter.emit_layout(&ctx)?;

        let mut units = Vec::with_capacity(factories.len() + 3);
        units.push(OutputUnit {
            kind: UnitKind::Preamble,
            name: "preamble".to_owned(),
            text: preamble,
        });
        units.extend(factories);
        units.push(OutputUnit {
            kind: UnitKind::DeferredBind,
            name: "deferred".to_owned(),
            text: deferred,
        });
        units.push(OutputUnit {
            kind: UnitKind::Entry,
            name: "entry".to_owned(),
            text: entry,
        });
        tracing::debug!(
            units = units.len(),
            controllers = ctx.scheduler.controllers().len(),
            cubic_beziers = ctx.cubic_beziers().len(),
            "pass emitted"
        );

        Ok(GeneratedSource {
            class_name: stringifier.identifier(&self.config.class_name),
            units,
            layout,
        })
    }
}

/// Run one complete pass with the given backend.
pub fn generate(
    graph: &SceneGraph,
    config: &CodegenConfig,
    stringifier: &dyn Stringifier,
    emitter: &dyn FactoryEmitter,
) -> CodegenResult<GeneratedSource> {
    GenerationPass::new(graph, config)?.run(stringifier, emitter)
}

/// Run one complete pass with the C++/WinRT backend.
pub fn generate_cppwinrt(
    graph: &SceneGraph,
    config: &CodegenConfig,
) -> CodegenResult<GeneratedSource> {
    generate(graph, config, &CppWinrtStringifier, &CppWinrtEmitter)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/pass.rs"]
mod tests;
