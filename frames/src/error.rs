use thiserror::Error;

/// Frame-construction invariant violations.
///
/// Degenerate input geometry is not a recoverable runtime condition:
/// construction stops rather than emit a transform with NaN or
/// non-orthogonal axes.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FrameError {
    #[error("link segment is degenerate (length {length:e})")]
    DegenerateSegment { length: f64 },

    #[error("reference axis is parallel to the link direction (alignment {alignment:.6})")]
    ParallelReferenceAxis { alignment: f64 },
}
