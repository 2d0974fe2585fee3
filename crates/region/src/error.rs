//! Error types for the boreas-region crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the boreas-region crate.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// Returned when the region file cannot be read.
    #[error("failed to read region file {}: {reason}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Description of the I/O failure.
        reason: String,
    },

    /// Returned when the region file is not valid GeoJSON.
    #[error("invalid GeoJSON in {}: {reason}", path.display())]
    Json {
        /// Path to the offending file.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when a feature has no usable name or geometry.
    #[error("invalid feature {index} in {}: {reason}", path.display())]
    InvalidFeature {
        /// Index of the feature within the collection.
        index: usize,
        /// Path to the offending file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a polygon ring has fewer than three vertices.
    #[error("degenerate ring in region '{name}': {n_vertices} vertices")]
    DegenerateRing {
        /// Name of the region carrying the ring.
        name: String,
        /// Number of vertices found.
        n_vertices: usize,
    },

    /// Returned when the collection contains no features.
    #[error("no regions found in {}", path.display())]
    EmptyCollection {
        /// Path to the offending file.
        path: PathBuf,
    },
}
