use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use gripspace_common::{EntityId, Transform};
use gripspace_grip::{
    AnchorFrame, Grabbable, GripScene, Highlightable, Interactable, JointError, JointFactory,
    JointId,
};
use serde::{Deserialize, Serialize};

use crate::components::{HighlightState, InteractableSlot, RigidBody};
use crate::inspect::WorldSummary;

/// An event record produced by every structural mutation to the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Entity was spawned with the given transform.
    Spawned { id: EntityId, transform: Transform },
    /// Entity was despawned.
    Despawned { id: EntityId, transform: Transform },
    /// Entity transform was set from outside the simulation.
    TransformUpdated {
        id: EntityId,
        old: Transform,
        new: Transform,
    },
    /// A joint now holds `target` to a frame parented to `parent`.
    JointCreated {
        joint: JointId,
        parent: EntityId,
        target: EntityId,
    },
    JointDestroyed { joint: JointId, target: EntityId },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// Errors from world operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("entity {0:?} not found")]
    EntityNotFound(EntityId),
}

/// Per-entity data: a transform plus optional components.
#[derive(Debug, Default)]
pub struct EntityData {
    pub name: Option<String>,
    pub transform: Transform,
    pub body: Option<RigidBody>,
    pub highlight: Option<HighlightState>,
    pub grabbable: Option<Grabbable>,
    pub interactable: Option<InteractableSlot>,
}

/// A joint driving a body toward a frame parented to another entity.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicJoint {
    pub frame: AnchorFrame,
    pub target: EntityId,
    /// Body-local point held at the frame origin.
    pub offset: Vec3,
    /// Target rotation relative to the frame, fixed at creation.
    pub relative_rotation: Quat,
}

/// Scene state shared by every grip in it.
///
/// Entities and joints live in BTreeMaps so iteration (and therefore
/// nearest-candidate tie breaks and joint stepping) is deterministic.
#[derive(Debug)]
pub struct World {
    entities: BTreeMap<EntityId, EntityData>,
    joints: BTreeMap<JointId, KinematicJoint>,
    next_joint: u64,
    tick: u64,
    /// Fraction of the remaining gap a joint closes per step, in (0, 1].
    drive_strength: f32,
    /// Append-only event log of all mutations.
    event_log: Vec<WorldEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
            joints: BTreeMap::new(),
            next_joint: 0,
            tick: 0,
            drive_strength: 0.5,
            event_log: Vec::new(),
        }
    }
}

impl World {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world whose joints close `strength` of the gap per step.
    /// Values are clamped into (0, 1]; non-finite values fall back to 1.
    pub fn with_drive_strength(strength: f32) -> Self {
        let drive_strength = if strength.is_finite() {
            strength.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };
        Self {
            drive_strength,
            ..Self::default()
        }
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn drive_strength(&self) -> f32 {
        self.drive_strength
    }

    /// Number of entities in the world.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read-only access to all entities.
    pub fn entities(&self) -> &BTreeMap<EntityId, EntityData> {
        &self.entities
    }

    /// Read-only access to live joints.
    pub fn joints(&self) -> &BTreeMap<JointId, KinematicJoint> {
        &self.joints
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            tick: self.tick,
            entity_count: self.entities.len(),
            joint_count: self.joints.len(),
            highlighted: self
                .entities
                .values()
                .filter(|e| e.highlight.is_some_and(|h| h.is_highlighted()))
                .count(),
            pending_events: self.event_log.len(),
        }
    }

    /// Spawn a new entity with the given transform. Returns its id.
    pub fn spawn(&mut self, transform: Transform) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            EntityData {
                transform,
                ..EntityData::default()
            },
        );
        self.event_log.push(WorldEvent::Spawned { id, transform });
        id
    }

    /// Spawn a grip owner: a kinematic body with no grip capabilities.
    pub fn spawn_hand(&mut self, transform: Transform) -> EntityId {
        let id = self.spawn(transform);
        if let Some(data) = self.entities.get_mut(&id) {
            data.body = Some(RigidBody::kinematic());
        }
        id
    }

    /// Spawn a dynamic body that can be grabbed and highlighted.
    pub fn spawn_grabbable(&mut self, transform: Transform, grabbable: Grabbable) -> EntityId {
        let id = self.spawn(transform);
        if let Some(data) = self.entities.get_mut(&id) {
            data.body = Some(RigidBody::default());
            data.grabbable = Some(grabbable);
            data.highlight = Some(HighlightState::default());
        }
        id
    }

    /// Remove an entity and every joint attached to it.
    pub fn despawn(&mut self, id: EntityId) -> Option<EntityData> {
        let data = self.entities.remove(&id)?;
        let attached: Vec<JointId> = self
            .joints
            .iter()
            .filter(|(_, j)| j.target == id || j.frame.parent == id)
            .map(|(jid, _)| *jid)
            .collect();
        for joint in attached {
            self.destroy_joint(joint);
        }
        self.event_log.push(WorldEvent::Despawned {
            id,
            transform: data.transform,
        });
        Some(data)
    }

    /// Get a reference to entity data.
    pub fn get(&self, id: EntityId) -> Option<&EntityData> {
        self.entities.get(&id)
    }

    fn get_mut(&mut self, id: EntityId) -> Result<&mut EntityData, WorldError> {
        self.entities
            .get_mut(&id)
            .ok_or(WorldError::EntityNotFound(id))
    }

    pub fn set_name(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), WorldError> {
        self.get_mut(id)?.name = Some(name.into());
        Ok(())
    }

    pub fn insert_body(&mut self, id: EntityId, body: RigidBody) -> Result<(), WorldError> {
        self.get_mut(id)?.body = Some(body);
        Ok(())
    }

    /// Make an entity grabbable. Grabbables are always highlightable.
    pub fn insert_grabbable(&mut self, id: EntityId, grabbable: Grabbable) -> Result<(), WorldError> {
        let data = self.get_mut(id)?;
        data.grabbable = Some(grabbable);
        data.highlight.get_or_insert_with(HighlightState::default);
        Ok(())
    }

    pub fn remove_grabbable(&mut self, id: EntityId) -> Result<Option<Grabbable>, WorldError> {
        Ok(self.get_mut(id)?.grabbable.take())
    }

    pub fn insert_highlight(&mut self, id: EntityId) -> Result<(), WorldError> {
        self.get_mut(id)?
            .highlight
            .get_or_insert_with(HighlightState::default);
        Ok(())
    }

    pub fn insert_interactable(
        &mut self,
        id: EntityId,
        receiver: Option<Box<dyn Interactable>>,
    ) -> Result<(), WorldError> {
        self.get_mut(id)?.interactable = Some(InteractableSlot::new(receiver));
        Ok(())
    }

    /// Update an entity's transform from outside the simulation and log it.
    pub fn set_transform(&mut self, id: EntityId, new: Transform) -> bool {
        if let Some(data) = self.entities.get_mut(&id) {
            let old = data.transform;
            data.transform = new;
            self.event_log
                .push(WorldEvent::TransformUpdated { id, old, new });
            true
        } else {
            false
        }
    }

    /// Move an entity, keeping its rotation and scale.
    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.entities.get(&id) {
            Some(data) => {
                let new = Transform {
                    position,
                    ..data.transform
                };
                self.set_transform(id, new)
            }
            None => false,
        }
    }

    /// Advance the simulation by one tick: every joint pulls its body a
    /// `drive_strength` fraction of the way toward its frame.
    pub fn step(&mut self) {
        let _span = tracing::trace_span!("world_step", tick = self.tick + 1).entered();
        self.tick += 1;

        let mut moves = Vec::with_capacity(self.joints.len());
        for (jid, joint) in &self.joints {
            let Some(parent) = self.entities.get(&joint.frame.parent) else {
                continue;
            };
            let Some(target) = self.entities.get(&joint.target) else {
                continue;
            };
            if target.body.is_none_or(|b| b.is_kinematic) {
                continue;
            }
            let frame = joint.frame.world_transform(&parent.transform);
            let follows_rotation = target.grabbable.is_none_or(|g| g.apply_grip_rotation);
            let rotation = if follows_rotation {
                (frame.rotation * joint.relative_rotation).normalize()
            } else {
                target.transform.rotation
            };
            let position = frame.position - rotation * (target.transform.scale * joint.offset);

            let current = target.transform;
            let moved = Transform {
                position: current.position.lerp(position, self.drive_strength),
                rotation: current.rotation.slerp(rotation, self.drive_strength),
                scale: current.scale,
            };
            tracing::trace!(joint = jid.0, gap = current.position.distance(position), "joint drive");
            moves.push((joint.target, moved));
        }
        for (id, transform) in moves {
            if let Some(data) = self.entities.get_mut(&id) {
                data.transform = transform;
            }
        }

        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }
}

impl GripScene for World {
    fn transform(&self, id: EntityId) -> Option<Transform> {
        self.entities.get(&id).map(|d| d.transform)
    }

    fn grabbable(&self, id: EntityId) -> Option<&Grabbable> {
        self.entities.get(&id)?.grabbable.as_ref()
    }

    fn highlightable(&mut self, id: EntityId) -> Option<&mut dyn Highlightable> {
        let highlight = self.entities.get_mut(&id)?.highlight.as_mut()?;
        Some(highlight)
    }

    fn interactable(&mut self, id: EntityId) -> Option<&mut dyn Interactable> {
        let slot = self.entities.get_mut(&id)?.interactable.as_mut()?;
        Some(slot)
    }
}

impl JointFactory for World {
    fn create_joint(
        &mut self,
        frame: &AnchorFrame,
        target: EntityId,
        offset: Vec3,
        orientation: Quat,
    ) -> Result<JointId, JointError> {
        let parent = self
            .entities
            .get(&frame.parent)
            .ok_or(JointError::ParentNotFound(frame.parent))?;
        let body = self
            .entities
            .get(&target)
            .ok_or(JointError::TargetNotFound(target))?;
        if body.body.is_none() {
            return Err(JointError::NoRigidBody(target));
        }

        let frame_rotation = frame.world_transform(&parent.transform).rotation;
        let relative_rotation =
            (frame_rotation.inverse() * orientation * body.transform.rotation).normalize();

        self.next_joint += 1;
        let joint = JointId(self.next_joint);
        self.joints.insert(
            joint,
            KinematicJoint {
                frame: frame.clone(),
                target,
                offset,
                relative_rotation,
            },
        );
        tracing::debug!(joint = joint.0, body = ?target, "joint created");
        self.event_log.push(WorldEvent::JointCreated {
            joint,
            parent: frame.parent,
            target,
        });
        Ok(joint)
    }

    fn destroy_joint(&mut self, joint: JointId) {
        if let Some(removed) = self.joints.remove(&joint) {
            tracing::debug!(joint = joint.0, "joint destroyed");
            self.event_log.push(WorldEvent::JointDestroyed {
                joint,
                target: removed.target,
            });
        }
    }
}
