//! Joint lifecycle: the kinematic anchor frame, the factory seam, and the
//! exclusively owned connection handle.

use glam::{Quat, Vec3};
use gripspace_common::{EntityId, Transform};
use serde::{Deserialize, Serialize};

/// Identifier of a joint inside a [`JointFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointId(pub u64);

/// Errors from joint creation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JointError {
    #[error("target {0:?} not found")]
    TargetNotFound(EntityId),
    #[error("target {0:?} has no rigid body")]
    NoRigidBody(EntityId),
    #[error("anchor frame parent {0:?} not found")]
    ParentNotFound(EntityId),
}

/// Kinematic frame parented to the grip that a joint hangs from.
///
/// Created per grab and owned by the [`Connection`] built on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorFrame {
    /// Grip entity the frame is parented to.
    pub parent: EntityId,
    /// Transform relative to `parent`.
    pub local: Transform,
    pub kinematic: bool,
    pub use_gravity: bool,
}

impl AnchorFrame {
    /// Frame at the parent's origin: zero offset, identity rotation, unit scale,
    /// kinematic, no gravity.
    pub fn at_grip(parent: EntityId) -> Self {
        Self {
            parent,
            local: Transform::default(),
            kinematic: true,
            use_gravity: false,
        }
    }

    /// World transform of the frame given its parent's world transform.
    pub fn world_transform(&self, parent: &Transform) -> Transform {
        parent.compose(&self.local)
    }
}

/// Builds and tears down physical joints.
pub trait JointFactory {
    /// Attach `target`'s rigid body to `frame`, holding it at the body-local
    /// `offset` with the relative `orientation` applied.
    fn create_joint(
        &mut self,
        frame: &AnchorFrame,
        target: EntityId,
        offset: Vec3,
        orientation: Quat,
    ) -> Result<JointId, JointError>;

    /// Remove a joint. Unknown ids are ignored.
    fn destroy_joint(&mut self, joint: JointId);
}

/// A live joint between a grip's anchor frame and a held body.
///
/// Not `Clone`: exactly one owner may destroy it.
#[derive(Debug)]
pub struct Connection {
    joint: JointId,
    connected_body: EntityId,
    frame: AnchorFrame,
}

impl Connection {
    /// Ask `factory` for a joint and wrap it with the frame it hangs from.
    pub fn establish<J: JointFactory + ?Sized>(
        factory: &mut J,
        frame: AnchorFrame,
        target: EntityId,
        offset: Vec3,
        orientation: Quat,
    ) -> Result<Self, JointError> {
        let joint = factory.create_joint(&frame, target, offset, orientation)?;
        Ok(Self {
            joint,
            connected_body: target,
            frame,
        })
    }

    pub fn joint(&self) -> JointId {
        self.joint
    }

    /// The body at the far end of the joint.
    pub fn connected_body(&self) -> EntityId {
        self.connected_body
    }

    pub fn anchor_frame(&self) -> &AnchorFrame {
        &self.frame
    }

    /// Destroy the joint; the anchor frame goes with it.
    pub fn destroy<J: JointFactory + ?Sized>(self, factory: &mut J) {
        factory.destroy_joint(self.joint);
    }
}
