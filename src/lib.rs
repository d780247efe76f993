//! # mtpgr: Skeleton Graphs for Pose-Based Gesture Recognition
//!
//! Builds the constant adjacency kernel of a spatial graph convolution over
//! a human skeleton, plus the data preparation around it.
//!
//! ## Design Principles
//!
//! 1. **Build once**: the adjacency depends only on topology and heights, so
//!    it is computed once per skeleton and shared read-only
//! 2. **Clean DTOs**: `JointId`, `Edge`, `Heights`, `AdjacencyTensor` cross all boundaries
//! 3. **Decoders stay outside**: video timing and pose extraction enter through
//!    `VideoProbe` and serde DTOs
//! 4. **Explicit config**: paths come from a `Config` value, never a global
//!
//! ## Quick Start
//!
//! ```rust
//! use mtpgr::{AdjacencyMatrix, Heights, HeightLayer};
//!
//! # fn example() -> mtpgr::Result<()> {
//! // hip and knee at the same level, foot below
//! let heights = Heights::from([(0usize, 1.0), (1usize, 1.0), (2usize, 0.0)]);
//! let adjacency = AdjacencyMatrix::new([(0usize, 1usize), (1, 2)], &heights)?;
//!
//! let a = adjacency.height_config_adjacency();
//! assert_eq!(a.shape(), [3, 3, 3]);
//! assert!(a.get(HeightLayer::Lower, 1, 2) > 0.0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layers
//!
//! | Index | Layer | Neighbor relative to root |
//! |-------|-------|---------------------------|
//! | 0 | `Lower` | below |
//! | 1 | `Same` | same height, and the root itself |
//! | 2 | `Higher` | above |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod adjacency;
pub mod skeleton;
pub mod labels;
pub mod dataset;
pub mod config;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    JointId, Edge, Heights, HeightLayer,
    SquareMatrix, AdjacencyTensor,
};

// ============================================================================
// Re-exports: Builders and pipeline
// ============================================================================

pub use adjacency::AdjacencyMatrix;
pub use skeleton::Skeleton;
pub use labels::{FrameLabel, FrameIndex, VideoProbe, ConstantFrameRate};
pub use dataset::{SingleVideo, Sample, FeatureMatrix};
pub use config::Config;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Label error: {0}")]
    Label(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
