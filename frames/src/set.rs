use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};

use kinematics::{ARM_COUNT, ChainPoints};

use crate::axes::ReferenceAxes;
use crate::error::FrameError;
use crate::frame::{PIVOT_OFFSET, arm_link_frames, end_effector_frame};

pub const BASE_FRAME: &str = "base_link";
pub const WORLD_FRAME: &str = "world";

// Link numbering on the published model runs opposite to the internal
// arm index: internal arm 0 drives *_arm_4.
const UPPER_LINKS: [&str; ARM_COUNT] = ["upper_arm_4", "upper_arm_3", "upper_arm_2", "upper_arm_1"];
const LOWER_LINKS: [&str; ARM_COUNT] = ["lower_arm_4", "lower_arm_3", "lower_arm_2", "lower_arm_1"];

/// One entry of a [`FrameSet`]: a rigid transform between two named
/// frames. Names are unprefixed; the publisher prepends the sample's
/// frame prefix to both ends.
#[derive(Debug, Clone)]
pub struct NamedFrame {
    pub parent: &'static str,
    pub child: &'static str,
    pub transform: Isometry3<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSetOptions {
    /// Also emit an identity world → base transform. Off by default.
    pub publish_world: bool,
}

/// All link transforms derived from one joint sample, in publish order.
/// Rebuilt from scratch on every update; nothing carries over.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<NamedFrame>,
}

impl FrameSet {
    pub fn iter(&self) -> impl Iterator<Item = &NamedFrame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, child: &str) -> Option<&NamedFrame> {
        self.frames.iter().find(|frame| frame.child == child)
    }
}

/// Assemble the full frame set for one sample: two link frames per arm,
/// the end-effector frame, the raised secondary base frame, and (when
/// enabled) the world frame.
pub fn build_frame_set(
    arms: &[ChainPoints; ARM_COUNT],
    axes: &ReferenceAxes,
    options: &FrameSetOptions,
) -> Result<FrameSet, FrameError> {
    let mut frames = Vec::with_capacity(2 * ARM_COUNT + 3);

    for (arm, chain) in arms.iter().enumerate() {
        let (upper, lower) = arm_link_frames(chain, axes.get(arm))?;
        frames.push(NamedFrame {
            parent: BASE_FRAME,
            child: UPPER_LINKS[arm],
            transform: upper,
        });
        frames.push(NamedFrame {
            parent: BASE_FRAME,
            child: LOWER_LINKS[arm],
            transform: lower,
        });
    }

    let distal: [Point3<f64>; ARM_COUNT] = std::array::from_fn(|i| arms[i].distal);
    frames.push(NamedFrame {
        parent: BASE_FRAME,
        child: "ee_link",
        transform: end_effector_frame(&distal),
    });

    frames.push(NamedFrame {
        parent: BASE_FRAME,
        child: "base_link2",
        transform: Isometry3::from_parts(
            Translation3::new(0.0, 0.0, PIVOT_OFFSET),
            UnitQuaternion::identity(),
        ),
    });

    if options.publish_world {
        frames.push(NamedFrame {
            parent: WORLD_FRAME,
            child: BASE_FRAME,
            transform: Isometry3::identity(),
        });
    }

    Ok(FrameSet { frames })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinematics::{MechanicalConfig, ParallelKinematics, QuadArmModel};

    fn sample_arms() -> [ChainPoints; ARM_COUNT] {
        let model = QuadArmModel::new(MechanicalConfig::default());
        model.solve(&[0.4, 0.1, -0.2, 0.6]).unwrap().arms
    }

    #[test]
    fn ten_frames_per_update_by_default() {
        let axes = ReferenceAxes::from_config(&MechanicalConfig::default());
        let set = build_frame_set(&sample_arms(), &axes, &FrameSetOptions::default()).unwrap();
        assert_eq!(set.len(), 10);

        let children: Vec<&str> = set.iter().map(|frame| frame.child).collect();
        assert_eq!(
            children,
            vec![
                "upper_arm_4",
                "lower_arm_4",
                "upper_arm_3",
                "lower_arm_3",
                "upper_arm_2",
                "lower_arm_2",
                "upper_arm_1",
                "lower_arm_1",
                "ee_link",
                "base_link2",
            ]
        );
        assert!(set.iter().all(|frame| frame.parent == BASE_FRAME));
    }

    #[test]
    fn world_frame_is_opt_in() {
        let axes = ReferenceAxes::from_config(&MechanicalConfig::default());
        let options = FrameSetOptions {
            publish_world: true,
        };
        let set = build_frame_set(&sample_arms(), &axes, &options).unwrap();
        assert_eq!(set.len(), 11);

        let world = set.get(BASE_FRAME).unwrap();
        assert_eq!(world.parent, WORLD_FRAME);
        assert_eq!(world.transform, Isometry3::identity());
    }

    #[test]
    fn secondary_base_frame_is_raised() {
        let axes = ReferenceAxes::from_config(&MechanicalConfig::default());
        let set = build_frame_set(&sample_arms(), &axes, &FrameSetOptions::default()).unwrap();
        let base2 = set.get("base_link2").unwrap();
        assert_eq!(base2.transform.translation.vector.z, PIVOT_OFFSET);
        assert_eq!(base2.transform.rotation, UnitQuaternion::identity());
    }

    #[test]
    fn all_link_rotations_share_handedness() {
        let axes = ReferenceAxes::from_config(&MechanicalConfig::default());
        for actuators in [
            [0.0, 0.0, 0.0, 0.0],
            [0.5, -0.3, 0.8, 0.2],
            [-0.9, 1.2, 0.1, -0.4],
        ] {
            let model = QuadArmModel::new(MechanicalConfig::default());
            let arms = model.solve(&actuators).unwrap().arms;
            let set = build_frame_set(&arms, &axes, &FrameSetOptions::default()).unwrap();
            for frame in set.iter() {
                let det = frame
                    .transform
                    .rotation
                    .to_rotation_matrix()
                    .matrix()
                    .determinant();
                assert!((det - 1.0).abs() < 1e-9, "{}: det {det}", frame.child);
            }
        }
    }
}
