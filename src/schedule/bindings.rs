use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::ids::{NodeIdx, ObjectRef};
use crate::graph::registry::{Node, NodeRegistry};
use crate::scene::animation::BoundAnimation;
use crate::scene::graph::SceneGraph;
use crate::scene::object::ObjectKind;

/// How one binding is started on its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartStep {
    /// Start `animation` on `property`.
    Start {
        /// Target property.
        property: String,
        /// Animation node.
        animation: NodeIdx,
    },
    /// Start a keyframe animation whose progress follows an expression.
    ProgressBound {
        /// Target property.
        property: String,
        /// Keyframe animation node.
        animation: NodeIdx,
        /// Expression animation node.
        expression: NodeIdx,
    },
}

/// A controller to materialize from `(target, property)` during deferred binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControllerEntry {
    /// Node owning the controlled binding. Always stored.
    pub target: NodeIdx,
    /// Controlled property.
    pub property: String,
    /// The controller object whose own bindings run on the materialized controller.
    pub controller: NodeIdx,
    /// Pause once materialized.
    pub paused: bool,
}

/// Controllers keyed by `(target, property)`, in first-registration order.
#[derive(Clone, Debug, Default)]
pub struct ControllerTable {
    entries: Vec<ControllerEntry>,
}

impl ControllerTable {
    /// Record a controller for `(target, property)`.
    ///
    /// Registering the same key again reuses the entry; a second registration that disagrees on the
    /// controller object or the pause flag is a configuration inconsistency. Returns `true` when a
    /// new entry was created.
    pub fn register(
        &mut self,
        registry: &NodeRegistry,
        entry: ControllerEntry,
    ) -> CodegenResult<bool> {
        let existing = self
            .entries
            .iter()
            .find(|e| e.target == entry.target && e.property == entry.property);
        match existing {
            None => {
                tracing::debug!(
                    target_node = %registry.node(entry.target).name,
                    property = %entry.property,
                    paused = entry.paused,
                    "controller registered"
                );
                self.entries.push(entry);
                Ok(true)
            }
            Some(e) if e.controller == entry.controller && e.paused == entry.paused => Ok(false),
            Some(e) => Err(CodegenError::inconsistent(
                registry.node(entry.target).label(),
                format!(
                    "controller for {:?} already registered as {} (paused={}), now {} (paused={})",
                    entry.property,
                    registry.node(e.controller).name,
                    e.paused,
                    registry.node(entry.controller).name,
                    entry.paused
                ),
            )),
        }
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[ControllerEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no controller is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validates bindings and splits them into immediate starts and deferred controller entries.
#[derive(Clone, Debug, Default)]
pub struct AnimationScheduler {
    controllers: ControllerTable,
}

impl AnimationScheduler {
    /// Scheduler with an empty controller table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controllers registered so far.
    pub fn controllers(&self) -> &ControllerTable {
        &self.controllers
    }

    /// Plan the bindings of `idx`.
    ///
    /// Every binding yields a start step in declaration order. Controller-mediated bindings are
    /// additionally registered for the deferred unit, which fetches the controller from the
    /// started property.
    pub fn schedule_node(
        &mut self,
        graph: &SceneGraph,
        registry: &NodeRegistry,
        idx: NodeIdx,
    ) -> CodegenResult<Vec<StartStep>> {
        let node = registry.node(idx);
        let scene = graph.resolve(node.object, None)?;
        let mut steps = Vec::new();

        for binding in &scene.animators {
            match (binding.controller, binding.animation) {
                (Some(_), BoundAnimation::ProgressBound { .. }) => {
                    return Err(CodegenError::inconsistent(
                        node.label(),
                        format!(
                            "binding for {:?} is both progress-bound and controller-mediated",
                            binding.property
                        ),
                    ));
                }
                (Some(c), bound @ BoundAnimation::Animation(_)) => {
                    let controller = registry.require(c.controller)?;
                    if !node.requires_storage {
                        return Err(CodegenError::invariant(
                            node.label(),
                            "controller target has no stored field",
                        ));
                    }
                    self.controllers.register(
                        registry,
                        ControllerEntry {
                            target: idx,
                            property: binding.property.clone(),
                            controller,
                            paused: c.paused,
                        },
                    )?;
                    steps.push(plan_start(graph, registry, node, &binding.property, bound)?);
                }
                (None, bound) => {
                    steps.push(plan_start(graph, registry, node, &binding.property, bound)?);
                }
            }
        }
        Ok(steps)
    }

    /// Plan the bindings a controller object carries. They start on the materialized controller
    /// and may not route through another controller.
    pub fn schedule_controller(
        &self,
        graph: &SceneGraph,
        registry: &NodeRegistry,
        controller: NodeIdx,
    ) -> CodegenResult<Vec<StartStep>> {
        let node = registry.node(controller);
        let scene = graph.resolve(node.object, None)?;
        scene
            .animators
            .iter()
            .map(|binding| {
                if binding.controller.is_some() {
                    return Err(CodegenError::unsupported(
                        node.label(),
                        "a controller's own binding cannot go through another controller",
                    ));
                }
                plan_start(graph, registry, node, &binding.property, binding.animation)
            })
            .collect()
    }
}

fn plan_start(
    graph: &SceneGraph,
    registry: &NodeRegistry,
    owner: &Node,
    property: &str,
    bound: BoundAnimation,
) -> CodegenResult<StartStep> {
    match bound {
        BoundAnimation::Animation(a) => {
            let animation = animation_node(graph, registry, owner, a, AnimationRole::Any)?;
            Ok(StartStep::Start {
                property: property.to_owned(),
                animation,
            })
        }
        BoundAnimation::ProgressBound {
            animation,
            expression,
        } => Ok(StartStep::ProgressBound {
            property: property.to_owned(),
            animation: animation_node(graph, registry, owner, animation, AnimationRole::KeyFrame)?,
            expression: animation_node(
                graph,
                registry,
                owner,
                expression,
                AnimationRole::Expression,
            )?,
        }),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AnimationRole {
    Any,
    KeyFrame,
    Expression,
}

fn animation_node(
    graph: &SceneGraph,
    registry: &NodeRegistry,
    owner: &Node,
    object: ObjectRef,
    role: AnimationRole,
) -> CodegenResult<NodeIdx> {
    let scene = graph.resolve(object, Some(owner.object))?;
    let fits = match (&scene.kind, role) {
        (ObjectKind::KeyFrameAnimation(_), AnimationRole::Any | AnimationRole::KeyFrame) => true,
        (ObjectKind::ExpressionAnimation(_), AnimationRole::Any | AnimationRole::Expression) => {
            true
        }
        _ => false,
    };
    if !fits {
        let wanted = match role {
            AnimationRole::Any => "an animation",
            AnimationRole::KeyFrame => "a keyframe animation",
            AnimationRole::Expression => "an expression animation",
        };
        return Err(CodegenError::unsupported(
            owner.label(),
            format!(
                "binding references {}, expected {wanted}",
                scene.kind.type_name()
            ),
        ));
    }
    registry.require(object)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/bindings.rs"]
mod tests;
