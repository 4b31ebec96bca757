use nalgebra::{Rotation3, Unit, Vector3};

use kinematics::{ARM_COUNT, MechanicalConfig};

/// Fixed per-arm reference axes, one unit vector per arm.
///
/// Each axis is the world Z axis carried through the arm's mount
/// rotation (negated pan about Z, negated tilt about X). It fixes the
/// plane that disambiguates the secondary axis when a link frame is
/// built, so it must never be parallel to a reachable link direction.
pub struct ReferenceAxes {
    axes: [Unit<Vector3<f64>>; ARM_COUNT],
}

impl ReferenceAxes {
    pub fn from_config(config: &MechanicalConfig) -> Self {
        let axes = std::array::from_fn(|arm| {
            let mount = &config.mounts[arm];
            let rotation = Rotation3::from_euler_angles(-mount.base_tilt, 0.0, -mount.base_pan);
            Unit::new_normalize(rotation * Vector3::z())
        });
        Self { axes }
    }

    pub fn get(&self, arm: usize) -> &Unit<Vector3<f64>> {
        &self.axes[arm]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit<Vector3<f64>>> {
        self.axes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematics::ArmMount;

    #[test]
    fn axes_are_unit_length() {
        let axes = ReferenceAxes::from_config(&MechanicalConfig::default());
        for axis in axes.iter() {
            assert!((axis.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let config = MechanicalConfig::default();
        let first = ReferenceAxes::from_config(&config);
        let second = ReferenceAxes::from_config(&config);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.into_inner(), b.into_inner());
        }
    }

    #[test]
    fn zero_mount_angles_give_world_z() {
        let mut config = MechanicalConfig::default();
        config.mounts = [ArmMount {
            base_pan: 0.0,
            base_tilt: 0.0,
        }; ARM_COUNT];
        let axes = ReferenceAxes::from_config(&config);
        for axis in axes.iter() {
            assert!((axis.into_inner() - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn tilt_leans_the_axis_by_the_tilt_angle() {
        let mut config = MechanicalConfig::default();
        config.mounts[0] = ArmMount {
            base_pan: 0.7,
            base_tilt: 0.4,
        };
        let axes = ReferenceAxes::from_config(&config);
        let axis = axes.get(0);
        // The pan rotation cannot change the angle to vertical.
        assert!((axis.z - 0.4f64.cos()).abs() < 1e-12);
    }
}
