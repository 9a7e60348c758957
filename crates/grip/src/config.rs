use gripspace_common::Tint;
use serde::{Deserialize, Serialize};

/// Errors from grip configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite distance, got {value}")]
    InvalidRadius { field: &'static str, value: f32 },
}

/// Per-grip tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripConfig {
    /// Distance at which objects can be touched.
    pub touch_radius: f32,
    /// Distance beyond which an anchored object is dropped.
    pub hold_radius: f32,
    /// Whether the touch volume is rendered.
    pub visible: bool,
    /// Grab on press only (toggle) instead of on press and release.
    pub input_is_toggle: bool,
    pub highlight_tint: Tint,
}

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            touch_radius: 0.2,
            hold_radius: 0.3,
            visible: false,
            input_is_toggle: false,
            highlight_tint: Tint::default(),
        }
    }
}

impl GripConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius("touch_radius", self.touch_radius)?;
        check_radius("hold_radius", self.hold_radius)?;
        if self.hold_radius <= self.touch_radius {
            tracing::warn!(
                touch_radius = self.touch_radius,
                hold_radius = self.hold_radius,
                "hold radius does not exceed touch radius; anchored grabs may drop at the edge of reach"
            );
        }
        Ok(())
    }
}

fn check_radius(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { field, value })
    }
}

/// What a renderer needs to draw a grip's touch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchVolume {
    pub radius: f32,
    pub visible: bool,
    pub kinematic: bool,
    pub casts_shadows: bool,
    pub receives_shadows: bool,
}

impl TouchVolume {
    pub fn for_config(config: &GripConfig) -> Self {
        Self {
            radius: config.touch_radius,
            visible: config.visible,
            kinematic: true,
            casts_shadows: false,
            receives_shadows: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GripConfig::default();
        assert_eq!(c.touch_radius, 0.2);
        assert_eq!(c.hold_radius, 0.3);
        assert!(!c.visible);
        assert!(!c.input_is_toggle);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_radius() {
        let c = GripConfig {
            touch_radius: 0.0,
            ..GripConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidRadius {
                field: "touch_radius",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan_hold_radius() {
        let c = GripConfig {
            hold_radius: f32::NAN,
            ..GripConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn inverted_radii_are_allowed() {
        let c = GripConfig {
            touch_radius: 0.5,
            hold_radius: 0.3,
            ..GripConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: GripConfig = serde_json::from_str(r#"{"input_is_toggle": true}"#).unwrap();
        assert!(c.input_is_toggle);
        assert_eq!(c.hold_radius, 0.3);
    }

    #[test]
    fn touch_volume_never_casts_shadows() {
        let c = GripConfig {
            visible: true,
            ..GripConfig::default()
        };
        let v = TouchVolume::for_config(&c);
        assert!(v.visible);
        assert_eq!(v.radius, 0.2);
        assert!(!v.casts_shadows);
        assert!(!v.receives_shadows);
    }
}
