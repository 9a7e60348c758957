use gripspace_common::Tint;
use gripspace_grip::{Highlightable, Interactable};
use serde::{Deserialize, Serialize};

/// Rigid body. Joints only attach to entities that carry one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub mass: f32,
    /// Kinematic bodies are never moved by joints.
    pub is_kinematic: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            is_kinematic: false,
        }
    }
}

impl RigidBody {
    pub fn kinematic() -> Self {
        Self {
            is_kinematic: true,
            ..Self::default()
        }
    }
}

/// Current highlight of an entity, plus how many times it actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightState {
    pub tint: Option<Tint>,
    pub changes: u32,
}

impl HighlightState {
    pub fn is_highlighted(&self) -> bool {
        self.tint.is_some()
    }
}

impl Highlightable for HighlightState {
    fn highlight(&mut self, tint: Tint) {
        if self.tint != Some(tint) {
            self.tint = Some(tint);
            self.changes += 1;
        }
    }

    fn remove_highlighting(&mut self) {
        if self.tint.take().is_some() {
            self.changes += 1;
        }
    }
}

/// Interaction capability of an entity.
///
/// The receiver is optional: an entity may be interactable with nobody
/// listening, in which case notifications are only counted.
#[derive(Default)]
pub struct InteractableSlot {
    receiver: Option<Box<dyn Interactable>>,
    pub pressed: u32,
    pub held: u32,
    pub last_held_flag: Option<bool>,
}

impl InteractableSlot {
    pub fn new(receiver: Option<Box<dyn Interactable>>) -> Self {
        Self {
            receiver,
            ..Self::default()
        }
    }

    pub fn has_receiver(&self) -> bool {
        self.receiver.is_some()
    }
}

impl std::fmt::Debug for InteractableSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractableSlot")
            .field("has_receiver", &self.has_receiver())
            .field("pressed", &self.pressed)
            .field("held", &self.held)
            .field("last_held_flag", &self.last_held_flag)
            .finish()
    }
}

impl Interactable for InteractableSlot {
    fn on_interaction(&mut self, held: bool) {
        self.pressed += 1;
        self.last_held_flag = Some(held);
        if let Some(receiver) = self.receiver.as_mut() {
            receiver.on_interaction(held);
        }
    }

    fn on_interaction_held(&mut self, held: bool) {
        self.held += 1;
        self.last_held_flag = Some(held);
        if let Some(receiver) = self.receiver.as_mut() {
            receiver.on_interaction_held(held);
        }
    }
}
