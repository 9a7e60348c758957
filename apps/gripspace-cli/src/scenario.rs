//! Scripted input for each scenario.

use glam::Vec3;
use gripspace_grip::GripConfig;

use crate::Scenario;

/// One host frame of scripted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    pub grab: bool,
    pub interact: bool,
    /// Teleport the hand here before the frame runs.
    pub hand_at: Option<Vec3>,
}

fn idle() -> Frame {
    Frame::default()
}

fn grab() -> Frame {
    Frame {
        grab: true,
        ..Frame::default()
    }
}

fn interact(grab: bool) -> Frame {
    Frame {
        grab,
        interact: true,
        ..Frame::default()
    }
}

fn yank(to: Vec3) -> Frame {
    Frame {
        hand_at: Some(to),
        ..Frame::default()
    }
}

pub fn config_for(scenario: Scenario) -> GripConfig {
    match scenario {
        Scenario::LongReach | Scenario::Fumble => GripConfig {
            touch_radius: 0.6,
            hold_radius: 0.3,
            input_is_toggle: true,
            ..GripConfig::default()
        },
        Scenario::Toggle | Scenario::Interact => GripConfig {
            input_is_toggle: true,
            ..GripConfig::default()
        },
        Scenario::Hold => GripConfig::default(),
    }
}

pub fn target_position(scenario: Scenario) -> Vec3 {
    match scenario {
        Scenario::LongReach | Scenario::Fumble => Vec3::new(0.5, 0.0, 0.0),
        _ => Vec3::new(0.1, 0.0, 0.0),
    }
}

pub fn script(scenario: Scenario) -> Vec<Frame> {
    match scenario {
        Scenario::LongReach => vec![idle(), grab(), idle(), idle(), idle(), idle()],
        Scenario::Fumble => vec![
            idle(),
            grab(),
            idle(),
            idle(),
            yank(Vec3::new(-1.0, 0.0, 0.0)),
            idle(),
        ],
        Scenario::Toggle => vec![idle(), grab(), idle(), idle(), grab(), idle()],
        Scenario::Hold => vec![idle(), grab(), grab(), grab(), idle(), idle()],
        Scenario::Interact => vec![
            interact(false),
            idle(),
            grab(),
            interact(false),
            interact(false),
            idle(),
            grab(),
        ],
    }
}
