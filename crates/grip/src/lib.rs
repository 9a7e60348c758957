//! Grip: the per-frame state machine that lets a tracked hand touch,
//! highlight, grab, interact with and drop objects.
//!
//! # Invariants
//! - At most one live joint per grip.
//! - `anchored` is false whenever nothing is held and only rises during a hold.
//! - Only the nearest candidate is ever highlighted, and only while nothing is held.
//! - Within a tick: proximity, highlight, grab, interaction, fumble, in that order.
//! - Absent capabilities and absent input make the affected step a no-op.

pub mod capability;
pub mod config;
pub mod event;
pub mod grip_point;
pub mod joint;
pub mod orientation;
pub mod scene;

#[cfg(test)]
mod testing;

pub use capability::{Grabbable, Highlightable, Interactable, InteractionKind};
pub use config::{ConfigError, GripConfig, TouchVolume};
pub use event::{GripEvent, GripState, ReleaseReason};
pub use grip_point::GripPoint;
pub use joint::{AnchorFrame, Connection, JointError, JointFactory, JointId};
pub use scene::{GripScene, ProximityQuery};
