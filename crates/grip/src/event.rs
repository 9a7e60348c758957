use gripspace_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::capability::InteractionKind;
use crate::joint::JointId;

/// Where a grip is in its grab cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GripState {
    /// No connection.
    Idle,
    /// Holding, but the object has not yet been drawn inside the hold radius.
    HeldUnanchored,
    /// Holding, and the object has been inside the hold radius at least once.
    HeldAnchored,
}

impl GripState {
    pub fn is_holding(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Why a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseReason {
    /// The grab action fired while holding, or the host released explicitly.
    Manual,
    /// The anchored object was pulled beyond the hold radius.
    Fumbled,
    /// The held object is no longer in the scene.
    TargetLost,
}

/// Record of a grip transition, drained by the host after each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GripEvent {
    Grabbed {
        target: EntityId,
        joint: JointId,
    },
    Anchored {
        target: EntityId,
        distance: f32,
    },
    Released {
        target: EntityId,
        reason: ReleaseReason,
    },
    Interaction {
        target: EntityId,
        kind: InteractionKind,
        held: bool,
    },
}

impl std::fmt::Display for GripEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grabbed { target, joint } => {
                write!(f, "grabbed [{}] joint={}", target.short(), joint.0)
            }
            Self::Anchored { target, distance } => {
                write!(f, "anchored [{}] distance={distance:.3}", target.short())
            }
            Self::Released { target, reason } => {
                write!(f, "released [{}] reason={reason:?}", target.short())
            }
            Self::Interaction { target, kind, held } => {
                write!(f, "interaction [{}] {kind:?} held={held}", target.short())
            }
        }
    }
}
