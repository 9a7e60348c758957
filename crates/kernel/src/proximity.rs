use gripspace_common::{EntityId, Transform};
use gripspace_grip::ProximityQuery;

use crate::world::{EntityData, World};

/// Sphere around a grip that reports the nearest touchable entity.
///
/// An entity is touchable if it can be highlighted, grabbed, or interacted
/// with. Distance is measured to the entity origin; ties go to the entity that
/// sorts first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSphere {
    radius: f32,
}

impl TouchSphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Default for TouchSphere {
    fn default() -> Self {
        Self::new(0.2)
    }
}

fn touchable(data: &EntityData) -> bool {
    data.highlight.is_some() || data.grabbable.is_some() || data.interactable.is_some()
}

impl ProximityQuery for TouchSphere {
    type Scene = World;

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn nearest(&self, scene: &World, owner: EntityId, origin: &Transform) -> Option<EntityId> {
        scene
            .entities()
            .iter()
            .filter(|(id, data)| **id != owner && touchable(data))
            .map(|(id, data)| (*id, data.transform.position.distance(origin.position)))
            .filter(|(_, distance)| *distance <= self.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
