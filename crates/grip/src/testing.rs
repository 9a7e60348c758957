//! In-memory scene used by the grip unit tests.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use gripspace_common::{EntityId, Tint, Transform};
use gripspace_input::ButtonTracker;

use crate::capability::{Grabbable, Highlightable, Interactable};
use crate::config::GripConfig;
use crate::grip_point::GripPoint;
use crate::joint::{AnchorFrame, JointError, JointFactory, JointId};
use crate::scene::{GripScene, ProximityQuery};

#[derive(Debug, Default)]
pub struct Lamp {
    pub tint: Option<Tint>,
    pub changes: u32,
}

impl Highlightable for Lamp {
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

#[derive(Debug, Default)]
pub struct Recorder {
    pub pressed: Vec<bool>,
    pub held: Vec<bool>,
}

impl Interactable for Recorder {
    fn on_interaction(&mut self, held: bool) {
        self.pressed.push(held);
    }

    fn on_interaction_held(&mut self, held: bool) {
        self.held.push(held);
    }
}

#[derive(Debug, Default)]
pub struct Prop {
    pub transform: Transform,
    pub grabbable: Option<Grabbable>,
    pub lamp: Option<Lamp>,
    pub recorder: Option<Recorder>,
    pub has_body: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FixtureJoint {
    pub target: EntityId,
    pub offset: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Default)]
pub struct FixtureScene {
    pub props: BTreeMap<EntityId, Prop>,
    pub joints: BTreeMap<JointId, FixtureJoint>,
    pub peak_joints: usize,
    next_joint: u64,
}

impl FixtureScene {
    pub fn add(&mut self, prop: Prop) -> EntityId {
        let id = EntityId::new();
        self.props.insert(id, prop);
        id
    }

    pub fn add_hand(&mut self, position: Vec3) -> EntityId {
        self.add(Prop {
            transform: Transform::from_position(position),
            has_body: true,
            ..Prop::default()
        })
    }

    /// Grabbable with highlight and a rigid body.
    pub fn add_grabbable(&mut self, position: Vec3, grabbable: Grabbable) -> EntityId {
        self.add(Prop {
            transform: Transform::from_position(position),
            grabbable: Some(grabbable),
            lamp: Some(Lamp::default()),
            has_body: true,
            ..Prop::default()
        })
    }

    pub fn add_lamp(&mut self, position: Vec3) -> EntityId {
        self.add(Prop {
            transform: Transform::from_position(position),
            lamp: Some(Lamp::default()),
            ..Prop::default()
        })
    }

    pub fn move_to(&mut self, id: EntityId, position: Vec3) {
        if let Some(prop) = self.props.get_mut(&id) {
            prop.transform.position = position;
        }
    }

    pub fn prop(&self, id: EntityId) -> &Prop {
        &self.props[&id]
    }

    pub fn prop_mut(&mut self, id: EntityId) -> &mut Prop {
        self.props.get_mut(&id).unwrap()
    }

    pub fn tint(&self, id: EntityId) -> Option<Tint> {
        self.prop(id).lamp.as_ref().and_then(|l| l.tint)
    }
}

impl GripScene for FixtureScene {
    fn transform(&self, id: EntityId) -> Option<Transform> {
        self.props.get(&id).map(|p| p.transform)
    }

    fn grabbable(&self, id: EntityId) -> Option<&Grabbable> {
        self.props.get(&id)?.grabbable.as_ref()
    }

    fn highlightable(&mut self, id: EntityId) -> Option<&mut dyn Highlightable> {
        let lamp = self.props.get_mut(&id)?.lamp.as_mut()?;
        Some(lamp)
    }

    fn interactable(&mut self, id: EntityId) -> Option<&mut dyn Interactable> {
        let recorder = self.props.get_mut(&id)?.recorder.as_mut()?;
        Some(recorder)
    }
}

impl JointFactory for FixtureScene {
    fn create_joint(
        &mut self,
        frame: &AnchorFrame,
        target: EntityId,
        offset: Vec3,
        orientation: Quat,
    ) -> Result<JointId, JointError> {
        if !self.props.contains_key(&frame.parent) {
            return Err(JointError::ParentNotFound(frame.parent));
        }
        let prop = self
            .props
            .get(&target)
            .ok_or(JointError::TargetNotFound(target))?;
        if !prop.has_body {
            return Err(JointError::NoRigidBody(target));
        }
        self.next_joint += 1;
        let id = JointId(self.next_joint);
        self.joints.insert(
            id,
            FixtureJoint {
                target,
                offset,
                orientation,
            },
        );
        self.peak_joints = self.peak_joints.max(self.joints.len());
        Ok(id)
    }

    fn destroy_joint(&mut self, joint: JointId) {
        self.joints.remove(&joint);
    }
}

#[derive(Debug, Default)]
pub struct FixtureTouch {
    radius: f32,
}

impl ProximityQuery for FixtureTouch {
    type Scene = FixtureScene;

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn nearest(&self, scene: &FixtureScene, owner: EntityId, origin: &Transform) -> Option<EntityId> {
        scene
            .props
            .iter()
            .filter(|(id, _)| **id != owner)
            .filter(|(_, p)| p.lamp.is_some() || p.grabbable.is_some() || p.recorder.is_some())
            .map(|(id, p)| (*id, p.transform.position.distance(origin.position)))
            .filter(|(_, d)| *d <= self.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

/// A hand at the origin with a grip point and a button tracker.
pub struct Rig {
    pub scene: FixtureScene,
    pub grip: GripPoint<FixtureTouch>,
    pub buttons: ButtonTracker,
    pub hand: EntityId,
}

impl Rig {
    pub fn new(config: GripConfig) -> Self {
        let mut scene = FixtureScene::default();
        let hand = scene.add_hand(Vec3::ZERO);
        Self {
            scene,
            grip: GripPoint::new(hand, config, FixtureTouch::default()),
            buttons: ButtonTracker::new(),
            hand,
        }
    }

    pub fn toggle(touch_radius: f32, hold_radius: f32) -> Self {
        Self::new(GripConfig {
            touch_radius,
            hold_radius,
            input_is_toggle: true,
            ..GripConfig::default()
        })
    }

    /// One frame with the given raw button levels.
    pub fn frame(&mut self, grab: bool, interact: bool) {
        self.buttons.set("grab", grab);
        self.buttons.set("interact", interact);
        self.grip.tick(&mut self.scene, Some(&self.buttons));
        self.buttons.end_frame();
    }

    pub fn idle(&mut self) {
        self.frame(false, false);
    }

    pub fn press_grab(&mut self) {
        self.frame(true, false);
    }
}
