use nalgebra::{
    Isometry3, Matrix3, Point3, Rotation3, Translation3, Unit, UnitQuaternion, Vector3,
};

use kinematics::{ARM_COUNT, ChainPoints};

use crate::error::FrameError;

/// Norm below which a vector cannot be safely normalized.
const DEGENERACY_EPS: f64 = 1e-9;

/// Vertical distance between the solver's joint reference points and the
/// physical link pivots (m).
pub const PIVOT_OFFSET: f64 = 0.05;

/// Relabel a solver point into the published frame convention: first two
/// coordinates swapped, vertical coordinate unchanged.
///
/// Every point entering frame construction goes through this one
/// function; call sites must not swap coordinates themselves.
pub fn to_frame_coords(point: &Point3<f64>) -> Point3<f64> {
    Point3::new(point.y, point.x, point.z)
}

/// Build the rigid transform of a link spanning `start` → `stop`.
///
/// The frame's origin is the relabeled `start`, lowered by
/// [`PIVOT_OFFSET`]. The link's long axis `n` points from `start` toward
/// `stop`; the secondary axis is `n × reference`, and the third axis is
/// recomputed as `n × y` so the triad stays orthonormal even when
/// `reference` is not orthogonal to `n`. The rotation columns are laid
/// out `(z, n, y)`, which aligns the link model's middle axis with the
/// physical member.
pub fn directed_frame(
    start: &Point3<f64>,
    stop: &Point3<f64>,
    reference: &Unit<Vector3<f64>>,
) -> Result<Isometry3<f64>, FrameError> {
    let origin = to_frame_coords(start);
    let translation = Translation3::new(origin.x, origin.y, origin.z - PIVOT_OFFSET);

    let segment = to_frame_coords(stop) - origin;
    let n = Unit::try_new(segment, DEGENERACY_EPS)
        .ok_or(FrameError::DegenerateSegment {
            length: segment.norm(),
        })?
        .into_inner();

    let lateral = n.cross(&reference.into_inner());
    let y = Unit::try_new(lateral, DEGENERACY_EPS)
        .ok_or(FrameError::ParallelReferenceAxis {
            alignment: n.dot(&reference.into_inner()),
        })?
        .into_inner();
    let z = n.cross(&y);

    let columns = Matrix3::from_columns(&[z, n, y]);
    let rotation = Rotation3::from_matrix_unchecked(columns);
    Ok(Isometry3::from_parts(
        translation,
        UnitQuaternion::from_rotation_matrix(&rotation),
    ))
}

/// Frames of one arm's two links: proximal→elbow (upper) and
/// elbow→distal (lower), both disambiguated by the arm's reference axis.
pub fn arm_link_frames(
    chain: &ChainPoints,
    reference: &Unit<Vector3<f64>>,
) -> Result<(Isometry3<f64>, Isometry3<f64>), FrameError> {
    let upper = directed_frame(&chain.proximal, &chain.elbow, reference)?;
    let lower = directed_frame(&chain.elbow, &chain.distal, reference)?;
    Ok((upper, lower))
}

/// End-effector frame: translation at the centroid of the four distal
/// points (relabeled and lowered like every link origin), orientation
/// identity. The platform stays parallel to the base plane, so no
/// orientation is derived.
pub fn end_effector_frame(distal: &[Point3<f64>; ARM_COUNT]) -> Isometry3<f64> {
    let mut center = Vector3::zeros();
    for point in distal {
        let p = to_frame_coords(point);
        center += Vector3::new(p.x, p.y, p.z - PIVOT_OFFSET);
    }
    center /= ARM_COUNT as f64;
    Isometry3::from_parts(Translation3::from(center), UnitQuaternion::identity())
}
