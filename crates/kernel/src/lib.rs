//! World Kernel: the scene a grip point runs against.
//!
//! # Invariants
//! - Entity and joint iteration order is deterministic (BTreeMap).
//! - All structural mutations produce a `WorldEvent`.
//! - Despawning an entity removes every joint attached to it.

mod components;
mod inspect;
mod proximity;
pub mod world;

pub use components::{HighlightState, InteractableSlot, RigidBody};
pub use inspect::WorldSummary;
pub use proximity::TouchSphere;
pub use world::{EntityData, KinematicJoint, World, WorldError, WorldEvent};
