use nalgebra::{Point3, Vector3};

use crate::{
    ARM_COUNT, ChainPoints, ChainSolution, KinematicsError, MechanicalConfig, ParallelKinematics,
};

/// Simplified forward-kinematics model of the four-arm mechanism for
/// demonstration and testing.
///
/// Each actuated upper link swings in the vertical plane through its
/// mount; the platform center is taken as the elbow centroid dropped by
/// the lower-link length, with the distal attachments on the platform
/// rim. A full solver would intersect the four lower-link spheres
/// instead, but this model produces well-formed, non-degenerate chain
/// geometry over the whole actuator range.
pub struct QuadArmModel {
    config: MechanicalConfig,
}

impl QuadArmModel {
    pub fn new(config: MechanicalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MechanicalConfig {
        &self.config
    }

    /// Unit vector from the base center toward arm `i`'s mount.
    fn radial(&self, arm: usize) -> Vector3<f64> {
        let pan = self.config.mounts[arm].base_pan;
        Vector3::new(pan.cos(), pan.sin(), 0.0)
    }

    /// Proximal and elbow joints of arm `i` for actuator angle `theta`.
    /// Zero angle holds the upper link horizontal, positive angles swing
    /// it downward.
    fn upper_chain(&self, arm: usize, theta: f64) -> (Point3<f64>, Point3<f64>) {
        let radial = self.radial(arm);
        let proximal = Point3::from(radial * self.config.base_radius);
        let swing = radial * theta.cos() - Vector3::z() * theta.sin();
        let elbow = proximal + swing * self.config.upper_arm_length;
        (proximal, elbow)
    }
}

impl ParallelKinematics for QuadArmModel {
    fn solve(&self, actuators: &[f64; ARM_COUNT]) -> Result<ChainSolution, KinematicsError> {
        for (index, angle) in actuators.iter().enumerate() {
            if !angle.is_finite() {
                return Err(KinematicsError::NonFiniteActuator { index });
            }
            if angle.abs() > self.config.actuator_limit {
                return Err(KinematicsError::ActuatorOutOfRange {
                    index,
                    angle: *angle,
                    limit: self.config.actuator_limit,
                });
            }
        }

        let uppers: [(Point3<f64>, Point3<f64>); ARM_COUNT] =
            std::array::from_fn(|i| self.upper_chain(i, actuators[i]));

        let mut center = Vector3::zeros();
        for (_, elbow) in &uppers {
            center += elbow.coords;
        }
        center /= ARM_COUNT as f64;
        center -= Vector3::z() * self.config.lower_arm_length;

        let arms = std::array::from_fn(|i| ChainPoints {
            proximal: uppers[i].0,
            elbow: uppers[i].1,
            distal: Point3::from(center + self.radial(i) * self.config.platform_radius),
        });

        Ok(ChainSolution {
            pose: [center.x, center.y, center.z, 0.0],
            arms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> QuadArmModel {
        QuadArmModel::new(MechanicalConfig::default())
    }

    #[test]
    fn upper_link_has_configured_length() {
        let model = model();
        let solution = model.solve(&[0.3, -0.2, 0.7, 0.1]).unwrap();
        for chain in &solution.arms {
            let length = (chain.elbow - chain.proximal).norm();
            assert!((length - model.config().upper_arm_length).abs() < 1e-12);
        }
    }

    #[test]
    fn level_actuators_center_the_platform() {
        let model = model();
        let solution = model.solve(&[0.0; ARM_COUNT]).unwrap();
        // Symmetric mounts, equal angles: platform straight below the base.
        assert!(solution.pose[0].abs() < 1e-12);
        assert!(solution.pose[1].abs() < 1e-12);
        assert!((solution.pose[2] + model.config().lower_arm_length).abs() < 1e-12);
        for chain in &solution.arms {
            assert!(chain.elbow.z.abs() < 1e-12);
        }
    }

    #[test]
    fn solve_is_deterministic() {
        let model = model();
        let a = model.solve(&[0.4, 0.5, -0.1, 0.2]).unwrap();
        let b = model.solve(&[0.4, 0.5, -0.1, 0.2]).unwrap();
        assert_eq!(a.pose, b.pose);
        for (x, y) in a.arms.iter().zip(b.arms.iter()) {
            assert_eq!(x.proximal, y.proximal);
            assert_eq!(x.elbow, y.elbow);
            assert_eq!(x.distal, y.distal);
        }
    }

    #[test]
    fn rejects_out_of_range_actuator() {
        let model = model();
        let limit = model.config().actuator_limit;
        let err = model.solve(&[0.0, limit + 0.5, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            KinematicsError::ActuatorOutOfRange { index: 1, .. }
        ));
    }

    #[test]
    fn rejects_non_finite_actuator() {
        let model = model();
        let err = model.solve(&[0.0, 0.0, f64::NAN, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            KinematicsError::NonFiniteActuator { index: 2 }
        ));
    }
}
