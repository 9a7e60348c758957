use glam::{EulerRot, Quat, Vec3};
use gripspace_common::Transform;

use crate::capability::Grabbable;

/// Rotation for Euler angles in degrees: yaw about Y, then pitch about X,
/// then roll about Z.
pub fn euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Rotation the joint applies to the grabbed object.
///
/// Without `snap_to_orientation` this is always identity. With it, the grip's
/// rotation composed with the object's local orientation, relative to the
/// object's current rotation.
pub fn orientation_change_for(grip: &Transform, target: &Transform, grabbable: &Grabbable) -> Quat {
    if !grabbable.snap_to_orientation {
        return Quat::IDENTITY;
    }
    let local_to_grip = grip.rotation * euler_degrees(grabbable.local_orientation);
    (local_to_grip * target.rotation.inverse()).normalize()
}

/// World-space position of the grabbable's anchor point.
pub fn anchor_world_position(target: &Transform, grabbable: &Grabbable) -> Vec3 {
    target.transform_point(grabbable.anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.angle_between(b) < EPS
    }

    #[test]
    fn no_snap_is_identity_for_any_rotation() {
        let g = Grabbable::default();
        for (gr, tr) in [
            (Quat::from_rotation_y(1.0), Quat::from_rotation_x(-2.0)),
            (Quat::from_rotation_z(3.0), Quat::IDENTITY),
            (Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2)),
        ] {
            let grip = Transform::default().with_rotation(gr);
            let target = Transform::default().with_rotation(tr);
            assert_eq!(orientation_change_for(&grip, &target, &g), Quat::IDENTITY);
        }
    }

    #[test]
    fn snap_aligns_object_with_grip() {
        let g = Grabbable::default().snapping_to(Vec3::ZERO);
        let grip = Transform::default().with_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let target = Transform::default().with_rotation(Quat::from_rotation_x(0.7));
        let delta = orientation_change_for(&grip, &target, &g);
        assert!(same_rotation(delta * target.rotation, grip.rotation));
    }

    #[test]
    fn snap_applies_local_orientation_in_grip_space() {
        let g = Grabbable::default().snapping_to(Vec3::new(0.0, 90.0, 0.0));
        let grip = Transform::default();
        let target = Transform::default();
        let delta = orientation_change_for(&grip, &target, &g);
        assert!(same_rotation(delta, Quat::from_rotation_y(FRAC_PI_2)));
    }

    #[test]
    fn euler_order_is_yaw_pitch_roll() {
        let q = euler_degrees(Vec3::new(90.0, 90.0, 0.0));
        let expected = Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2);
        assert!(same_rotation(q, expected));
    }

    #[test]
    fn anchor_position_uses_rotation_and_scale() {
        let g = Grabbable::with_anchor(Vec3::new(0.0, 1.0, 0.0));
        let target = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_rotation_z(FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let p = anchor_world_position(&target, &g);
        assert!((p - Vec3::new(-1.0, 0.0, 0.0)).length() < EPS);
    }
}
