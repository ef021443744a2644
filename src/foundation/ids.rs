/// Run-scoped identity of a scene object: its slot in the [`SceneGraph`](crate::SceneGraph) arena.
///
/// Two structurally identical objects added separately get different refs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectRef(pub u32);

/// Dense index of a registered [`Node`](crate::Node), in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) u32);

/// Dense 1-based slot index within one stored-type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl NodeIdx {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Position in registration order.
    pub fn get(self) -> u32 {
        self.0
    }
}
