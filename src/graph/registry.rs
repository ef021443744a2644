use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;

use crate::foundation::error::{CodegenError, CodegenResult, NodeLabel};
use crate::foundation::ids::{FieldId, NodeIdx, ObjectRef};
use crate::scene::object::SceneObject;

/// Generation-time record of one distinct scene object.
#[derive(Clone, Debug)]
pub struct Node {
    /// Identity of the underlying object.
    pub object: ObjectRef,
    /// Generated routine name (`Root`, `SpriteVisual_0`, ...).
    pub name: String,
    /// Short description for diagnostics and generated comments.
    pub description: String,
    /// Runtime type constructed by this node's routine.
    pub type_name: &'static str,
    /// Stored-field category.
    pub category: &'static str,
    /// Construction-edge occurrences targeting this node.
    pub refs: u32,
    /// Construction-edge occurrences coming from nodes that only the deferred walk reached.
    pub deferred_refs: u32,
    /// Controller-edge occurrences targeting this node.
    pub controller_refs: u32,
    /// Declared as an exported root.
    pub is_root: bool,
    /// This node is an animation controller.
    pub is_controller: bool,
    /// At least one of this node's bindings goes through a controller.
    pub is_controller_target: bool,
    /// Reached only through a controller edge.
    pub deferred_only: bool,
    /// Storage decision; meaningful once the registry is planned.
    pub requires_storage: bool,
    /// Dense slot within `category`, assigned only when `requires_storage`.
    pub field_id: Option<FieldId>,
    /// Construction edges in declared order.
    pub edges: SmallVec<[NodeIdx; 4]>,
    /// Controller edges in binding order.
    pub deferred_edges: SmallVec<[NodeIdx; 2]>,
}

impl Node {
    /// Diagnostic label for errors about this node.
    pub fn label(&self) -> NodeLabel {
        NodeLabel::named(self.object, self.name.clone(), self.description.clone())
    }
}

/// Identity-keyed node table for one generation pass.
///
/// Nodes are numbered densely in registration order; an [`ObjectRef`] maps to at most one node.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    by_object: HashMap<ObjectRef, NodeIdx>,
    stem_counts: HashMap<&'static str, u32>,
    root_count: u32,
    pub(crate) planned: bool,
}

impl NodeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` once storage planning has annotated every node.
    pub fn is_planned(&self) -> bool {
        self.planned
    }

    /// Node by index.
    ///
    /// # Panics
    ///
    /// If `idx` was issued by a larger registry. Use [`NodeRegistry::get`] for indices of unknown
    /// origin.
    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.index()]
    }

    /// Node by index, or `None` when `idx` is out of range for this registry.
    pub fn get(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.index())
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.index()]
    }

    /// All nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIdx(i as u32), n))
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Node registered for `object`, if any.
    pub fn lookup(&self, object: ObjectRef) -> Option<NodeIdx> {
        self.by_object.get(&object).copied()
    }

    /// Node registered for `object`, or a graph invariant violation naming it.
    pub fn require(&self, object: ObjectRef) -> CodegenResult<NodeIdx> {
        self.lookup(object).ok_or_else(|| {
            CodegenError::invariant(
                NodeLabel::unnamed(object, "unregistered object"),
                "referenced object was never registered",
            )
        })
    }

    /// Return the node for `object`, registering it first if this identity is new.
    ///
    /// The flag is `true` when the node was created by this call.
    pub fn resolve(
        &mut self,
        object: ObjectRef,
        scene: &SceneObject,
        is_root: bool,
    ) -> (NodeIdx, bool) {
        if let Some(idx) = self.lookup(object) {
            if is_root {
                self.node_mut(idx).is_root = true;
            }
            return (idx, false);
        }

        let idx = NodeIdx(self.nodes.len() as u32);
        let name = if is_root {
            let n = self.root_count;
            self.root_count += 1;
            if n == 0 {
                "Root".to_owned()
            } else {
                format!("Root_{n}")
            }
        } else {
            let stem = scene.kind.name_stem();
            let counter = self.stem_counts.entry(stem).or_insert(0);
            let n = *counter;
            *counter += 1;
            format!("{stem}_{n}")
        };

        self.nodes.push(Node {
            object,
            name,
            description: scene.describe(),
            type_name: scene.kind.type_name(),
            category: scene.kind.storage_category(),
            refs: 0,
            deferred_refs: 0,
            controller_refs: 0,
            is_root,
            is_controller: scene.kind.is_controller(),
            is_controller_target: scene.animators.iter().any(|b| b.controller.is_some()),
            deferred_only: false,
            requires_storage: false,
            field_id: None,
            edges: SmallVec::new(),
            deferred_edges: SmallVec::new(),
        });
        self.by_object.insert(object, idx);
        (idx, true)
    }

    /// Whether `to` is reachable from `from` over construction and controller edges.
    ///
    /// A node reaches itself.
    pub fn is_reachable_from(&self, from: NodeIdx, to: NodeIdx) -> bool {
        if from == to {
            return true;
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([from]);
        seen[from.index()] = true;
        while let Some(idx) = queue.pop_front() {
            let node = self.node(idx);
            for &next in node.edges.iter().chain(node.deferred_edges.iter()) {
                if next == to {
                    return true;
                }
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Stored nodes of `category`, ordered by `FieldId`.
    pub fn stored_in(&self, category: &str) -> Vec<NodeIdx> {
        let mut out: Vec<(FieldId, NodeIdx)> = self
            .nodes()
            .filter(|(_, n)| n.category == category)
            .filter_map(|(idx, n)| n.field_id.map(|f| (f, idx)))
            .collect();
        out.sort();
        out.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Distinct stored categories in first-discovered order.
    pub fn stored_categories(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for (_, n) in self.nodes() {
            if n.field_id.is_some() && !out.contains(&n.category) {
                out.push(n.category);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/registry.rs"]
mod tests;
