use std::collections::HashMap;

use crate::foundation::ids::FieldId;
use crate::graph::registry::{Node, NodeRegistry};

/// Whether `node` needs a persistent field slot instead of inline construction at each call site.
pub fn requires_storage(node: &Node) -> bool {
    if node.is_controller {
        return false;
    }
    node.is_root
        || node.refs > 1
        || node.is_controller_target
        || (node.deferred_refs > 0 && !node.deferred_only)
}

/// Annotate every node with its storage decision and assign `FieldId`s densely per category, in
/// registration order, starting at 1.
///
/// Returns the number of stored nodes. Planning an already planned registry changes nothing.
#[tracing::instrument(skip(registry), fields(nodes = registry.len()))]
pub fn plan_storage(registry: &mut NodeRegistry) -> usize {
    if registry.is_planned() {
        return registry.nodes().filter(|(_, n)| n.requires_storage).count();
    }

    let mut next: HashMap<&'static str, u32> = HashMap::new();
    let mut stored = 0;
    for node in registry.nodes_mut() {
        node.requires_storage = requires_storage(node);
        if node.requires_storage {
            let slot = next.entry(node.category).or_insert(0);
            *slot += 1;
            node.field_id = Some(FieldId(*slot));
            stored += 1;
        }
    }
    registry.planned = true;

    tracing::debug!(stored, categories = next.len(), "storage planned");
    stored
}

/// Generated field name for a stored node: `_{category stem in lowerCamel}_{field id}`.
pub fn field_name(category: &str, field_id: FieldId) -> String {
    let stem = category.strip_prefix("Composition").unwrap_or(category);
    let mut chars = stem.chars();
    let lower = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("_{lower}_{}", field_id.0)
}

/// Deterministic node table: one line per node in registration order.
pub fn dump(registry: &NodeRegistry) -> String {
    let mut s = String::new();
    s.push_str("NodeTable\n");
    s.push_str(&format!("nodes: {}\n", registry.len()));
    for (idx, node) in registry.nodes() {
        let storage = match node.field_id {
            Some(f) => field_name(node.category, f),
            None if node.is_controller => "controller".to_owned(),
            None => "inline".to_owned(),
        };
        let mut flags = Vec::new();
        if node.is_root {
            flags.push("root");
        }
        if node.is_controller_target {
            flags.push("controller-target");
        }
        if node.deferred_only {
            flags.push("deferred");
        }
        s.push_str(&format!(
            "  N{}: {} refs={} deferred_refs={} storage={} flags=[{}] ({})\n",
            idx.0,
            node.name,
            node.refs,
            node.deferred_refs,
            storage,
            flags.join(","),
            node.description
        ));
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/plan/storage.rs"]
mod tests;
