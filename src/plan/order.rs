use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::ids::NodeIdx;
use crate::graph::registry::NodeRegistry;

/// Deterministic emission order: dependencies before dependents.
///
/// `construction` covers everything reachable from the roots over construction edges;
/// `deferred` covers nodes reached only through controller edges. Controllers appear in neither.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmissionOrder {
    /// Post-order over construction edges from the roots.
    pub construction: Vec<NodeIdx>,
    /// Post-order over the deferred-only nodes, in registration order.
    pub deferred: Vec<NodeIdx>,
}

impl EmissionOrder {
    /// Compute the order for a walked registry.
    pub fn compute(registry: &NodeRegistry) -> CodegenResult<Self> {
        let mut state = vec![Mark::Unvisited; registry.len()];
        let mut out = Self::default();

        for (idx, node) in registry.nodes() {
            if node.deferred_only || node.is_controller {
                continue;
            }
            post_order(registry, idx, &mut state, &mut out.construction)?;
        }
        for (idx, node) in registry.nodes() {
            if !node.deferred_only || node.is_controller {
                continue;
            }
            post_order(registry, idx, &mut state, &mut out.deferred)?;
        }
        Ok(out)
    }

    /// Construction nodes, then deferred nodes.
    pub fn iter(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.construction
            .iter()
            .chain(self.deferred.iter())
            .copied()
    }

    /// Total number of ordered nodes.
    pub fn len(&self) -> usize {
        self.construction.len() + self.deferred.len()
    }

    /// `true` when nothing is ordered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

fn post_order(
    registry: &NodeRegistry,
    start: NodeIdx,
    state: &mut [Mark],
    out: &mut Vec<NodeIdx>,
) -> CodegenResult<()> {
    if state[start.index()] != Mark::Unvisited {
        return Ok(());
    }
    state[start.index()] = Mark::Active;
    let mut stack: Vec<(NodeIdx, usize)> = vec![(start, 0)];

    while let Some((node, next)) = stack.last_mut() {
        let node = *node;
        match registry.node(node).edges.get(*next) {
            Some(&child) => {
                *next += 1;
                match state[child.index()] {
                    Mark::Done => {}
                    Mark::Active => {
                        return Err(CodegenError::invariant(
                            registry.node(child).label(),
                            "emission order hit a reference cycle",
                        ));
                    }
                    Mark::Unvisited => {
                        state[child.index()] = Mark::Active;
                        stack.push((child, 0));
                    }
                }
            }
            None => {
                state[node.index()] = Mark::Done;
                out.push(node);
                stack.pop();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plan/order.rs"]
mod tests;
