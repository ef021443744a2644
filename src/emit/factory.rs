use std::collections::BTreeSet;

use crate::foundation::core::Vector2;
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::ids::{FieldId, NodeIdx, ObjectRef};
use crate::generate::config::CodegenConfig;
use crate::graph::registry::{Node, NodeRegistry};
use crate::plan::order::EmissionOrder;
use crate::plan::storage::field_name;
use crate::scene::graph::SceneGraph;
use crate::scene::object::{KindFamily, SceneObject};
use crate::schedule::bindings::AnimationScheduler;
use crate::stringify::Stringifier;

/// How a caller obtains a child object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FactoryRef {
    /// Call the child's routine at the call site.
    Inline {
        /// Routine name.
        routine: String,
    },
    /// Read the child's stored field.
    Stored {
        /// Field name.
        field: String,
        /// Slot within the child's category.
        field_id: FieldId,
    },
}

impl FactoryRef {
    /// Routine or field name, without call syntax.
    pub fn target(&self) -> &str {
        match self {
            Self::Inline { routine } => routine,
            Self::Stored { field, .. } => field,
        }
    }

    /// `true` for a stored-field reference.
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

/// Text wrapped around the concatenated output units when packaging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceLayout {
    /// Complete header artifact.
    pub header: String,
    /// Source text before the units.
    pub prologue: String,
    /// Source text after the units.
    pub epilogue: String,
    /// Indentation depth of the units inside the prologue.
    pub body_depth: usize,
}

/// Shared state of one emission pass.
///
/// Tracks which nodes already have a routine, which backend helpers were used, and the per-pass
/// cubic bezier table. Owned by the orchestrator; emitters only borrow it.
pub struct EmitContext<'a> {
    /// Scene being generated.
    pub graph: &'a SceneGraph,
    /// Walked and planned registry.
    pub registry: &'a NodeRegistry,
    /// Pass settings.
    pub config: &'a CodegenConfig,
    /// Literal syntax.
    pub stringifier: &'a dyn Stringifier,
    /// Binding plans and the controller table.
    pub scheduler: AnimationScheduler,
    emitted: Vec<bool>,
    helpers: BTreeSet<&'static str>,
    cubic_beziers: Vec<(Vector2, Vector2)>,
}

impl<'a> EmitContext<'a> {
    /// Fresh context over a planned registry.
    pub fn new(
        graph: &'a SceneGraph,
        registry: &'a NodeRegistry,
        config: &'a CodegenConfig,
        stringifier: &'a dyn Stringifier,
    ) -> Self {
        Self {
            graph,
            registry,
            config,
            stringifier,
            scheduler: AnimationScheduler::new(),
            emitted: vec![false; registry.len()],
            helpers: BTreeSet::new(),
            cubic_beziers: Vec::new(),
        }
    }

    /// Registry node.
    pub fn node(&self, idx: NodeIdx) -> &'a Node {
        self.registry.node(idx)
    }

    /// Scene object behind `idx`.
    pub fn scene(&self, idx: NodeIdx) -> CodegenResult<&'a SceneObject> {
        self.graph.resolve(self.registry.node(idx).object, None)
    }

    /// Resolve `callee` for use inside `caller`'s routine.
    ///
    /// The callee must be registered, must not be a controller, and must already have its routine
    /// emitted; anything else means the emission order is broken.
    pub fn call_factory_from_for(
        &self,
        caller: NodeIdx,
        callee: ObjectRef,
    ) -> CodegenResult<FactoryRef> {
        let idx = self.registry.lookup(callee).ok_or_else(|| {
            CodegenError::invariant(
                self.node(caller).label(),
                format!("reference to unregistered object #{}", callee.0),
            )
        })?;
        let node = self.node(idx);
        if node.is_controller {
            return Err(CodegenError::invariant(
                self.node(caller).label(),
                format!("{} is a controller and has no factory", node.name),
            ));
        }
        if !self.emitted[idx.index()] {
            return Err(CodegenError::invariant(
                self.node(caller).label(),
                format!("{} is referenced before its construction", node.name),
            ));
        }
        Ok(match node.field_id {
            Some(field_id) => FactoryRef::Stored {
                field: field_name(node.category, field_id),
                field_id,
            },
            None => FactoryRef::Inline {
                routine: node.name.clone(),
            },
        })
    }

    /// [`EmitContext::call_factory_from_for`] for a reference filling `slot` of `caller`, which
    /// only accepts objects of the `expected` family.
    pub fn call_factory_for_slot(
        &self,
        caller: NodeIdx,
        callee: ObjectRef,
        slot: &str,
        expected: KindFamily,
    ) -> CodegenResult<FactoryRef> {
        let object = self.graph.resolve(callee, Some(self.node(caller).object))?;
        let found = object.kind.family();
        if found != expected {
            return Err(CodegenError::unsupported(
                self.node(caller).label(),
                format!(
                    "{slot} expects a {expected}, found {} (#{})",
                    object.kind.type_name(),
                    callee.0
                ),
            ));
        }
        self.call_factory_from_for(caller, callee)
    }

    /// Record that `idx` has its routine.
    pub(crate) fn mark_emitted(&mut self, idx: NodeIdx) {
        self.emitted[idx.index()] = true;
    }

    /// Whether `idx` already has its routine.
    pub fn is_emitted(&self, idx: NodeIdx) -> bool {
        self.emitted[idx.index()]
    }

    /// Record use of a backend helper so the preamble includes it.
    pub fn use_helper(&mut self, name: &'static str) {
        self.helpers.insert(name);
    }

    /// Whether the helper `name` was used.
    pub fn uses_helper(&self, name: &str) -> bool {
        self.helpers.contains(name)
    }

    /// Id of the cubic bezier with these control points, allocated on first use.
    pub fn cubic_bezier_id(&mut self, p1: Vector2, p2: Vector2) -> usize {
        if let Some(i) = self.cubic_beziers.iter().position(|&c| c == (p1, p2)) {
            return i;
        }
        self.cubic_beziers.push((p1, p2));
        self.cubic_beziers.len() - 1
    }

    /// Cubic bezier control points, indexed by id.
    pub fn cubic_beziers(&self) -> &[(Vector2, Vector2)] {
        &self.cubic_beziers
    }
}

/// Backend that turns annotated nodes into routines.
///
/// The orchestrator calls `emit_factory` once per node in emission order, then
/// `emit_deferred_bind` and `emit_entry`, and `emit_preamble` and `emit_layout` last so they see
/// every helper the routines used.
pub trait FactoryEmitter {
    /// Construction routine of `node`.
    fn emit_factory(&self, ctx: &mut EmitContext<'_>, node: NodeIdx) -> CodegenResult<String>;
    /// Routine materializing controllers and starting their animations.
    fn emit_deferred_bind(&self, ctx: &mut EmitContext<'_>) -> CodegenResult<String>;
    /// Entry point: stored-field initialization in emission order, then deferred binding.
    fn emit_entry(&self, ctx: &EmitContext<'_>, order: &EmissionOrder) -> CodegenResult<String>;
    /// Helper definitions used by the routines.
    fn emit_preamble(&self, ctx: &EmitContext<'_>) -> String;
    /// Header and the text around the units.
    fn emit_layout(&self, ctx: &EmitContext<'_>) -> CodegenResult<SourceLayout>;
}

#[cfg(test)]
#[path = "../../tests/unit/emit/factory.rs"]
mod tests;
