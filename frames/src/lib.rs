//! Link-frame construction for a four-arm parallel robot.
//!
//! Turns the chain points of one joint sample into a set of named rigid
//! transforms (two link frames per arm, an end-effector frame and the
//! fixed base frames), ready for a transform publisher. The whole crate
//! is a pure function of the sample plus the fixed [`ReferenceAxes`];
//! no state survives between samples.

pub mod axes;
pub mod error;
pub mod frame;
pub mod set;

pub use axes::ReferenceAxes;
pub use error::FrameError;
pub use frame::{arm_link_frames, directed_frame, end_effector_frame, to_frame_coords};
pub use set::{BASE_FRAME, FrameSet, FrameSetOptions, NamedFrame, WORLD_FRAME, build_frame_set};

use kinematics::{ARM_COUNT, ParallelKinematics};

/// Run one joint sample through the solver and frame assembly.
///
/// A solver failure is the expected recoverable path: the sample is
/// skipped with a warning and `Ok(None)`, and the next sample is
/// unaffected. A [`FrameError`] means the solved geometry violated a
/// construction invariant and is returned to the caller instead of
/// emitting a corrupt transform.
pub fn frames_for_sample<K: ParallelKinematics>(
    solver: &K,
    actuators: &[f64; ARM_COUNT],
    axes: &ReferenceAxes,
    options: &FrameSetOptions,
) -> Result<Option<FrameSet>, FrameError> {
    let solution = match solver.solve(actuators) {
        Ok(solution) => solution,
        Err(err) => {
            log::warn!("skipping sample, no forward solution: {err}");
            return Ok(None);
        }
    };
    build_frame_set(&solution.arms, axes, options).map(Some)
}
