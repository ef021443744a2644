use std::collections::VecDeque;

use crate::foundation::error::{CodegenError, CodegenResult, NodeLabel};
use crate::foundation::ids::{NodeIdx, ObjectRef};
use crate::graph::registry::NodeRegistry;
use crate::scene::graph::SceneGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Colour {
    White,
    Grey,
    Black,
}

struct Frame {
    node: NodeIdx,
    next_edge: usize,
}

/// Registers every object reachable from the graph roots.
///
/// Construction edges are walked depth-first from each root in declared order (registration is
/// pre-order). Controller edges are queued and walked afterwards in discovery order; they never
/// take part in cycle detection, so a controller whose animations refer back to the tree is fine.
pub struct GraphWalker<'g> {
    graph: &'g SceneGraph,
    registry: NodeRegistry,
    colour: Vec<Colour>,
    pending_controllers: VecDeque<(NodeIdx, ObjectRef)>,
}

impl<'g> GraphWalker<'g> {
    /// Walker over `graph`.
    pub fn new(graph: &'g SceneGraph) -> Self {
        Self {
            graph,
            registry: NodeRegistry::new(),
            colour: Vec::new(),
            pending_controllers: VecDeque::new(),
        }
    }

    /// Walk all roots and then all controller edges, returning the populated registry.
    #[tracing::instrument(skip(self), fields(roots = self.graph.roots.len()))]
    pub fn walk(mut self) -> CodegenResult<NodeRegistry> {
        for &root in &self.graph.roots {
            let scene = self.graph.resolve(root, None)?;
            if scene.kind.is_controller() {
                return Err(CodegenError::invariant(
                    NodeLabel::unnamed(root, scene.describe()),
                    "an animation controller cannot be a root",
                ));
            }
            let (idx, created) = self.registry.resolve(root, scene, true);
            if created {
                self.enter_new(idx, false)?;
            }
        }

        while let Some((from, controller)) = self.pending_controllers.pop_front() {
            self.follow_controller(from, controller)?;
        }

        tracing::debug!(
            nodes = self.registry.len(),
            deferred = self.registry.nodes().filter(|(_, n)| n.deferred_only).count(),
            "graph walk complete"
        );
        Ok(self.registry)
    }

    fn follow_controller(&mut self, from: NodeIdx, controller: ObjectRef) -> CodegenResult<()> {
        let scene = self.graph.resolve(controller, Some(self.registry.node(from).object))?;
        if !scene.kind.is_controller() {
            return Err(CodegenError::invariant(
                self.registry.node(from).label(),
                format!(
                    "controller binding references #{} ({}), which is not an animation controller",
                    controller.0,
                    scene.describe()
                ),
            ));
        }

        let (idx, created) = self.registry.resolve(controller, scene, false);
        self.registry.node_mut(from).deferred_edges.push(idx);
        self.registry.node_mut(idx).controller_refs += 1;
        if created {
            self.registry.node_mut(idx).deferred_only = true;
            self.enter_new(idx, true)?;
        }
        Ok(())
    }

    /// Depth-first walk from a freshly registered node. Iterative so deep trees cannot overflow
    /// the stack.
    fn enter_new(&mut self, start: NodeIdx, deferred: bool) -> CodegenResult<()> {
        self.set_colour(start, Colour::Grey);
        self.record_edges(start)?;
        let mut stack = vec![Frame {
            node: start,
            next_edge: 0,
        }];

        while let Some(top) = stack.last_mut() {
            let node = top.node;
            let Some(&target) = self.registry.node(node).edges.get(top.next_edge) else {
                self.set_colour(node, Colour::Black);
                stack.pop();
                continue;
            };
            top.next_edge += 1;

            let colour = self.colour_of(target);
            if colour == Colour::Grey {
                return Err(CodegenError::invariant(
                    self.registry.node(target).label(),
                    format!(
                        "reference cycle through {} back to {}",
                        self.registry.node(node).name,
                        self.registry.node(target).name
                    ),
                ));
            }
            if colour == Colour::White && deferred {
                self.registry.node_mut(target).deferred_only = true;
            }

            let source_deferred = self.registry.node(node).deferred_only;
            let target_node = self.registry.node_mut(target);
            target_node.refs += 1;
            if source_deferred && !target_node.deferred_only {
                target_node.deferred_refs += 1;
            }

            if colour == Colour::White {
                self.set_colour(target, Colour::Grey);
                self.record_edges(target)?;
                stack.push(Frame {
                    node: target,
                    next_edge: 0,
                });
            }
        }
        Ok(())
    }

    /// Resolve (registering new targets) the outgoing edges of `idx` and queue its controllers.
    fn record_edges(&mut self, idx: NodeIdx) -> CodegenResult<()> {
        let object = self.registry.node(idx).object;
        let scene = self.graph.resolve(object, None)?;

        for target in scene.construction_edges() {
            let child = self.graph.resolve(target, Some(object))?;
            if child.kind.is_controller() {
                return Err(CodegenError::invariant(
                    self.registry.node(idx).label(),
                    format!(
                        "animation controller #{} is referenced as a construction dependency",
                        target.0
                    ),
                ));
            }
            let (child_idx, _) = self.registry.resolve(target, child, false);
            self.registry.node_mut(idx).edges.push(child_idx);
        }

        for controller in scene.deferred_edges() {
            self.pending_controllers.push_back((idx, controller));
        }
        Ok(())
    }

    fn colour_of(&self, idx: NodeIdx) -> Colour {
        self.colour.get(idx.index()).copied().unwrap_or(Colour::White)
    }

    fn set_colour(&mut self, idx: NodeIdx, colour: Colour) {
        if self.colour.len() <= idx.index() {
            self.colour.resize(idx.index() + 1, Colour::White);
        }
        self.colour[idx.index()] = colour;
    }
}

/// Walk `graph` from its roots and return the populated registry.
pub fn walk(graph: &SceneGraph) -> CodegenResult<NodeRegistry> {
    GraphWalker::new(graph).walk()
}

#[cfg(test)]
#[path = "../../tests/unit/graph/walker.rs"]
mod tests;
