use glam::Vec3;
use gripspace_common::Tint;
use serde::{Deserialize, Serialize};

/// An object that can show it is within reach.
///
/// Both operations must be idempotent: highlighting an already highlighted
/// object, or clearing an unhighlighted one, changes nothing.
pub trait Highlightable {
    fn highlight(&mut self, tint: Tint);
    fn remove_highlighting(&mut self);
}

/// Receiver for interaction notifications.
///
/// Notifications are fire-and-forget. The default bodies do nothing, so an
/// object that carries the capability without caring about one of the
/// notifications simply ignores it.
pub trait Interactable {
    /// The interact action went down this frame.
    fn on_interaction(&mut self, _held: bool) {}
    /// The interact action is down this frame.
    fn on_interaction_held(&mut self, _held: bool) {}
}

/// Which interaction notification was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Pressed,
    Held,
}

/// Grab parameters attached to any object that can be held.
///
/// Read-only from the grip's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grabbable {
    /// Local-space point on the object that the grip attaches to.
    pub anchor: Vec3,
    /// Whether the held object follows the grip's rotation.
    pub apply_grip_rotation: bool,
    /// Whether the object snaps to `local_orientation` when grabbed.
    pub snap_to_orientation: bool,
    /// Euler angles in degrees, applied yaw (Y), pitch (X), roll (Z).
    pub local_orientation: Vec3,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            anchor: Vec3::ZERO,
            apply_grip_rotation: true,
            snap_to_orientation: false,
            local_orientation: Vec3::ZERO,
        }
    }
}

impl Grabbable {
    pub fn with_anchor(anchor: Vec3) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }

    /// Snap to `local_orientation` (degrees) on grab.
    pub fn snapping_to(mut self, local_orientation: Vec3) -> Self {
        self.snap_to_orientation = true;
        self.local_orientation = local_orientation;
        self
    }
}
