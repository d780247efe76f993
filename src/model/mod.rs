//! # Skeleton Graph Model
//!
//! Plain DTOs shared by the adjacency builder, the skeleton presets and the
//! export helpers.
//!
//! Nothing in here touches files, logs or keeps state between calls.

pub mod joint;
pub mod edge;
pub mod layer;
pub mod matrix;
pub mod tensor;

pub use joint::{JointId, Heights};
pub use edge::Edge;
pub use layer::HeightLayer;
pub use matrix::SquareMatrix;
pub use tensor::AdjacencyTensor;
