use gripspace_common::{EntityId, Transform};

use crate::capability::{Grabbable, Highlightable, Interactable};

/// The grip's view of the scene it operates in.
///
/// Capabilities are optional per object. Every lookup returns `None` for an
/// object that lacks the capability or no longer exists; the grip treats both
/// the same way.
pub trait GripScene {
    /// World transform of an object.
    fn transform(&self, id: EntityId) -> Option<Transform>;

    fn grabbable(&self, id: EntityId) -> Option<&Grabbable>;

    fn highlightable(&mut self, id: EntityId) -> Option<&mut dyn Highlightable>;

    fn interactable(&mut self, id: EntityId) -> Option<&mut dyn Interactable>;
}

/// Finds the single nearest eligible object around a grip.
///
/// Implementations own their radius; the grip sets it at construction and
/// whenever its touch radius changes.
pub trait ProximityQuery {
    /// The scene this query searches.
    type Scene: ?Sized;

    fn set_radius(&mut self, radius: f32);

    fn radius(&self) -> f32;

    /// Nearest eligible candidate within the radius of `origin`, never `owner`.
    fn nearest(&self, scene: &Self::Scene, owner: EntityId, origin: &Transform) -> Option<EntityId>;
}
