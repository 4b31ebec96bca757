use nalgebra::Point3;
use thiserror::Error;

/// Number of actuated arms on the parallel mechanism.
pub const ARM_COUNT: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct JointState {
    pub angle: f64,
    pub velocity: f64,
    pub effort: f64,
}

impl Default for JointState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            velocity: 0.0,
            effort: 0.0,
        }
    }
}

/// The three joint positions of one arm's linkage, proximal to distal,
/// expressed in the robot base frame.
#[derive(Debug, Clone, Copy)]
pub struct ChainPoints {
    pub proximal: Point3<f64>,
    pub elbow: Point3<f64>,
    pub distal: Point3<f64>,
}

/// Result of one forward-kinematics solve: the platform pose
/// (x, y, z, yaw) and the chain points of all four arms.
#[derive(Debug, Clone, Copy)]
pub struct ChainSolution {
    pub pose: [f64; 4],
    pub arms: [ChainPoints; ARM_COUNT],
}

#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("actuator {index} position is not finite")]
    NonFiniteActuator { index: usize },

    #[error("actuator {index} at {angle} rad exceeds limit of ±{limit} rad")]
    ActuatorOutOfRange {
        index: usize,
        angle: f64,
        limit: f64,
    },
}

/// How each arm's actuated joint is mounted on the base plate.
#[derive(Debug, Clone, Copy)]
pub struct ArmMount {
    /// Rotation of the mount about the base vertical axis (rad).
    pub base_pan: f64,
    /// Inclination of the mount away from vertical (rad).
    pub base_tilt: f64,
}

/// Fixed mechanical constants of the robot. Built once and shared by the
/// axis table and the kinematics model.
#[derive(Debug, Clone, Copy)]
pub struct MechanicalConfig {
    pub mounts: [ArmMount; ARM_COUNT],
    /// Distance from the base center to each actuated joint (m).
    pub base_radius: f64,
    /// Distance from the platform center to each distal attachment (m).
    pub platform_radius: f64,
    /// Length of the actuated upper link (m).
    pub upper_arm_length: f64,
    /// Length of the passive lower link (m).
    pub lower_arm_length: f64,
    /// Symmetric actuator travel limit (rad).
    pub actuator_limit: f64,
}

impl Default for MechanicalConfig {
    fn default() -> Self {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

        let mounts = std::array::from_fn(|i| ArmMount {
            base_pan: FRAC_PI_4 + i as f64 * FRAC_PI_2,
            base_tilt: FRAC_PI_6,
        });
        Self {
            mounts,
            base_radius: 0.30,
            platform_radius: 0.12,
            upper_arm_length: 0.30,
            lower_arm_length: 0.55,
            actuator_limit: 2.0,
        }
    }
}

pub mod quad_arm;

pub use quad_arm::QuadArmModel;

/// Forward kinematics of the four-arm parallel mechanism: actuator
/// positions in, platform pose and per-arm chain points out.
pub trait ParallelKinematics {
    fn solve(&self, actuators: &[f64; ARM_COUNT]) -> Result<ChainSolution, KinematicsError>;
}
