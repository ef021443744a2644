use crate::foundation::error::{CodegenError, CodegenResult, NodeLabel};
use crate::foundation::ids::ObjectRef;
use crate::scene::object::SceneObject;
use serde::{Deserialize, Serialize};

/// Arena of scene objects plus the declared root(s).
///
/// An object's identity is its slot: structurally identical objects added twice are two objects.
/// The graph is read-only to the generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    /// Exported roots, in declaration order.
    pub roots: Vec<ObjectRef>,
    /// Objects, indexed by [`ObjectRef`].
    pub objects: Vec<SceneObject>,
}

impl SceneGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its identity.
    pub fn add(&mut self, object: SceneObject) -> ObjectRef {
        let id = ObjectRef(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    /// Add an object and declare it an exported root.
    pub fn add_root(&mut self, object: SceneObject) -> ObjectRef {
        let id = self.add(object);
        self.roots.push(id);
        id
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectRef) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    /// Mutable access for building graphs incrementally (e.g. to add a binding after its
    /// animation exists).
    pub fn get_mut(&mut self, id: ObjectRef) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0 as usize)
    }

    /// Look up an object referenced from `referrer`, failing with a graph invariant violation when
    /// the reference points outside the arena.
    pub fn resolve(&self, id: ObjectRef, referrer: Option<ObjectRef>) -> CodegenResult<&SceneObject> {
        self.get(id).ok_or_else(|| {
            let detail = match referrer {
                Some(r) => format!("reference from #{} points outside the scene graph", r.0),
                None => "root points outside the scene graph".to_owned(),
            };
            CodegenError::invariant(NodeLabel::unnamed(id, "unknown object"), detail)
        })
    }

    /// Parse a graph from its JSON representation.
    pub fn from_json_str(s: &str) -> CodegenResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CodegenError::validation(format!("scene graph json: {e}")))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> CodegenResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodegenError::Other(e.into()))
    }

    /// Check that the graph has at least one root and every root is in the arena.
    pub fn validate(&self) -> CodegenResult<()> {
        if self.roots.is_empty() {
            return Err(CodegenError::validation("scene graph declares no roots"));
        }
        for &root in &self.roots {
            self.resolve(root, None)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
