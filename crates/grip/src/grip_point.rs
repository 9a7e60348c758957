use gripspace_common::{EntityId, Tint, Transform};
use gripspace_input::{GripAction, InputSource};

use crate::capability::{Grabbable, InteractionKind};
use crate::config::{GripConfig, TouchVolume};
use crate::event::{GripEvent, GripState, ReleaseReason};
use crate::joint::{AnchorFrame, Connection, JointFactory};
use crate::orientation::{anchor_world_position, orientation_change_for};
use crate::scene::{GripScene, ProximityQuery};

/// A hand's grip: touches, highlights, grabs and releases one object at a time.
///
/// Drive it with [`GripPoint::tick`] once per simulation frame. Within a tick
/// the order is fixed: proximity, highlighting, grabbing, interaction, fumble
/// check.
#[derive(Debug)]
pub struct GripPoint<Q> {
    owner: EntityId,
    config: GripConfig,
    touch: Q,
    connection: Option<Connection>,
    anchored: bool,
    last_touched: Option<EntityId>,
    events: Vec<GripEvent>,
}

impl<Q: ProximityQuery> GripPoint<Q> {
    /// Create a grip for the controller entity `owner`. Configures `touch`
    /// with the touch radius.
    pub fn new(owner: EntityId, config: GripConfig, mut touch: Q) -> Self {
        touch.set_radius(config.touch_radius);
        Self {
            owner,
            config,
            touch,
            connection: None,
            anchored: false,
            last_touched: None,
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn config(&self) -> &GripConfig {
        &self.config
    }

    pub fn state(&self) -> GripState {
        match (&self.connection, self.anchored) {
            (None, _) => GripState::Idle,
            (Some(_), false) => GripState::HeldUnanchored,
            (Some(_), true) => GripState::HeldAnchored,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.connection.is_some()
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// The body at the far end of the active joint.
    pub fn held_target(&self) -> Option<EntityId> {
        self.connection.as_ref().map(Connection::connected_body)
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Nearest candidate seen on the last tick.
    pub fn last_touched(&self) -> Option<EntityId> {
        self.last_touched
    }

    pub fn touch_volume(&self) -> TouchVolume {
        TouchVolume::for_config(&self.config)
    }

    pub fn proximity(&self) -> &Q {
        &self.touch
    }

    /// Read-only access to pending events.
    pub fn events(&self) -> &[GripEvent] {
        &self.events
    }

    /// Drain and return pending events.
    pub fn drain_events(&mut self) -> Vec<GripEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_touch_radius(&mut self, radius: f32) {
        self.config.touch_radius = radius;
        self.touch.set_radius(radius);
    }

    pub fn set_hold_radius(&mut self, radius: f32) {
        self.config.hold_radius = radius;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.config.visible = visible;
    }

    pub fn set_input_is_toggle(&mut self, toggle: bool) {
        self.config.input_is_toggle = toggle;
    }

    pub fn set_highlight_tint(&mut self, tint: Tint) {
        self.config.highlight_tint = tint;
    }
}

impl<Q> GripPoint<Q>
where
    Q: ProximityQuery,
    Q::Scene: GripScene + JointFactory,
{
    /// Advance the grip by one frame.
    ///
    /// `input` may be absent, in which case grabbing and interaction never
    /// trigger while highlighting and fumble recovery still run.
    pub fn tick(&mut self, scene: &mut Q::Scene, input: Option<&dyn InputSource>) {
        let _span = tracing::trace_span!("grip_tick", owner = %self.owner.short()).entered();

        let Some(grip) = scene.transform(self.owner) else {
            tracing::warn!(owner = ?self.owner, "grip owner not in scene; dropping grip state");
            self.abandon(scene);
            return;
        };

        let touched = self.touch.nearest(scene, self.owner, &grip);
        self.handle_highlighting(scene, touched);
        self.handle_grabbing(scene, &grip, touched, input);
        self.handle_interaction(scene, touched, input);
        self.handle_fumbling(scene, &grip);
        self.last_touched = touched;
    }

    /// Drop whatever is held. Returns false if nothing was.
    pub fn release(&mut self, scene: &mut Q::Scene) -> bool {
        match self.connection.take() {
            Some(conn) => {
                self.disconnect(scene, conn, ReleaseReason::Manual);
                true
            }
            None => false,
        }
    }

    /// The owner is gone: its anchor frame went with it, so release the held
    /// body and clear the last highlight.
    fn abandon(&mut self, scene: &mut Q::Scene) {
        if let Some(conn) = self.connection.take() {
            self.disconnect(scene, conn, ReleaseReason::TargetLost);
        }
        if let Some(last) = self.last_touched.take() {
            if let Some(h) = scene.highlightable(last) {
                h.remove_highlighting();
            }
        }
    }

    fn handle_highlighting(&mut self, scene: &mut Q::Scene, touched: Option<EntityId>) {
        if let Some(last) = self.last_touched.filter(|last| Some(*last) != touched) {
            if let Some(h) = scene.highlightable(last) {
                h.remove_highlighting();
            }
        }
        if self.is_holding() {
            return;
        }
        if let Some(current) = touched {
            if let Some(h) = scene.highlightable(current) {
                h.highlight(self.config.highlight_tint);
            }
        }
    }

    fn grab_triggered(&self, input: Option<&dyn InputSource>) -> bool {
        let Some(input) = input else {
            return false;
        };
        let grab = GripAction::Grab.name();
        if self.config.input_is_toggle {
            input.pressed(grab)
        } else {
            input.pressed(grab) || input.released(grab)
        }
    }

    fn handle_grabbing(
        &mut self,
        scene: &mut Q::Scene,
        grip: &Transform,
        touched: Option<EntityId>,
        input: Option<&dyn InputSource>,
    ) {
        if !self.grab_triggered(input) {
            return;
        }
        if let Some(conn) = self.connection.take() {
            self.disconnect(scene, conn, ReleaseReason::Manual);
            return;
        }
        let Some(target) = touched else {
            return;
        };
        let Some(grabbable) = scene.grabbable(target).copied() else {
            return;
        };
        if let Some(h) = scene.highlightable(target) {
            h.remove_highlighting();
        }
        self.connect(scene, grip, target, &grabbable);
    }

    fn connect(
        &mut self,
        scene: &mut Q::Scene,
        grip: &Transform,
        target: EntityId,
        grabbable: &Grabbable,
    ) {
        let Some(target_transform) = scene.transform(target) else {
            tracing::warn!(body = ?target, "grab target has no transform; grip stays idle");
            return;
        };
        let frame = AnchorFrame::at_grip(self.owner);
        let orientation = orientation_change_for(grip, &target_transform, grabbable);
        match Connection::establish(scene, frame, target, grabbable.anchor, orientation) {
            Ok(conn) => {
                tracing::debug!(body = ?target, joint = conn.joint().0, "grabbed");
                self.anchored = false;
                self.events.push(GripEvent::Grabbed {
                    target,
                    joint: conn.joint(),
                });
                self.connection = Some(conn);
            }
            Err(err) => {
                tracing::warn!(body = ?target, %err, "joint creation refused; grip stays idle");
            }
        }
    }

    fn handle_interaction(
        &mut self,
        scene: &mut Q::Scene,
        touched: Option<EntityId>,
        input: Option<&dyn InputSource>,
    ) {
        let Some(input) = input else {
            return;
        };
        let Some(touched) = touched else {
            return;
        };
        let held = self.is_holding();
        let target = self.held_target().unwrap_or(touched);
        let interact = GripAction::Interact.name();
        let pressed = input.pressed(interact);
        let holding = input.holding(interact);
        if !pressed && !holding {
            return;
        }
        let Some(receiver) = scene.interactable(target) else {
            return;
        };
        if pressed {
            receiver.on_interaction(held);
            self.events.push(GripEvent::Interaction {
                target,
                kind: InteractionKind::Pressed,
                held,
            });
        }
        if holding {
            receiver.on_interaction_held(held);
            self.events.push(GripEvent::Interaction {
                target,
                kind: InteractionKind::Held,
                held,
            });
        }
    }

    fn handle_fumbling(&mut self, scene: &mut Q::Scene, grip: &Transform) {
        let Some(target) = self.held_target() else {
            return;
        };
        let Some(target_transform) = scene.transform(target) else {
            tracing::warn!(body = ?target, "held body left the scene; releasing");
            if let Some(conn) = self.connection.take() {
                self.disconnect(scene, conn, ReleaseReason::TargetLost);
            }
            return;
        };
        let grabbable = scene.grabbable(target).copied().unwrap_or_default();
        let anchor = anchor_world_position(&target_transform, &grabbable);
        let distance = grip.position.distance(anchor);
        let hold_radius = self.config.hold_radius;

        if !self.anchored && distance < hold_radius {
            tracing::debug!(body = ?target, distance, hold_radius, "anchored");
            self.anchored = true;
            self.events.push(GripEvent::Anchored { target, distance });
        }
        if self.anchored && distance > hold_radius {
            tracing::debug!(body = ?target, distance, hold_radius, "fumbled");
            if let Some(conn) = self.connection.take() {
                self.disconnect(scene, conn, ReleaseReason::Fumbled);
            }
        }
    }

    fn disconnect(&mut self, scene: &mut Q::Scene, conn: Connection, reason: ReleaseReason) {
        let target = conn.connected_body();
        conn.destroy(scene);
        self.anchored = false;
        tracing::debug!(body = ?target, ?reason, "released");
        self.events.push(GripEvent::Released { target, reason });
    }
}
