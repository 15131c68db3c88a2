//! Error taxonomy.
//!
//! Only configuration mismatches are errors. A target label that is unknown or has
//! no members is a valid (empty) analysis, not a failure.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The graph returned a neighbor id outside `[0, point_count)`.
    ///
    /// This means the graph snapshot and the configured point count disagree.
    #[error("point {point} has neighbor {neighbor} outside [0, {point_count})")]
    NeighborOutOfRange {
        point: usize,
        neighbor: usize,
        point_count: usize,
    },

    /// Scratch buffers index points with `u32`.
    #[error("graph has {point_count} points, more than the supported {max}", max = u32::MAX)]
    PointCountOverflow { point_count: usize },

    #[error("seed {seed} outside [0, {point_count})")]
    SeedOutOfRange { seed: usize, point_count: usize },

    #[error("failed to read label input: {0}")]
    Io(#[from] std::io::Error),
}
