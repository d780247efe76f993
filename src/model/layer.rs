//! Height-difference layer labels.

use serde::{Deserialize, Serialize};

/// Where a neighbor sits relative to the root joint.
///
/// The discriminant is the layer's index in the adjacency tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeightLayer {
    /// Neighbor is below the root.
    Lower = 0,
    /// Same height, including the root itself and left/right pairs.
    Same = 1,
    /// Neighbor is above the root.
    Higher = 2,
}

impl HeightLayer {
    pub const COUNT: usize = 3;
    pub const ALL: [HeightLayer; 3] = [HeightLayer::Lower, HeightLayer::Same, HeightLayer::Higher];

    /// Classify by `height[neighbor] - height[root]`.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            HeightLayer::Higher
        } else if delta < 0.0 {
            HeightLayer::Lower
        } else {
            HeightLayer::Same
        }
    }

    pub fn classify(root_height: f64, neighbor_height: f64) -> Self {
        Self::from_delta(neighbor_height - root_height)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl std::fmt::Display for HeightLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightLayer::Lower => write!(f, "LOWER"),
            HeightLayer::Same => write!(f, "SAME"),
            HeightLayer::Higher => write!(f, "HIGHER"),
        }
    }
}
