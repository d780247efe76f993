//! The layered adjacency tensor handed to the graph convolution.

use serde::{Deserialize, Serialize};
use super::{HeightLayer, SquareMatrix};
use crate::Error;

/// Immutable `(3, N, N)` float tensor, row-major as `[layer][row][col]`.
///
/// Constructed once per skeleton and used as a constant kernel for every
/// frame. It carries no mutable API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTensor")]
pub struct AdjacencyTensor {
    num_joints: usize,
    data: Vec<f32>,
}

/// Wire form; checked against the declared shape before use.
#[derive(Deserialize)]
struct RawTensor {
    num_joints: usize,
    data: Vec<f32>,
}

impl TryFrom<RawTensor> for AdjacencyTensor {
    type Error = Error;

    fn try_from(raw: RawTensor) -> Result<Self, Error> {
        let expected = raw
            .num_joints
            .checked_mul(raw.num_joints)
            .and_then(|nn| nn.checked_mul(HeightLayer::COUNT));
        if expected != Some(raw.data.len()) {
            return Err(Error::InvariantViolation(format!(
                "tensor for {} joints cannot hold {} values",
                raw.num_joints,
                raw.data.len()
            )));
        }
        Ok(Self { num_joints: raw.num_joints, data: raw.data })
    }
}

impl AdjacencyTensor {
    /// Stack three N×N layers (LOWER, SAME, HIGHER) into one tensor.
    pub(crate) fn from_layers(layers: &[SquareMatrix; 3]) -> Self {
        let num_joints = layers[0].dim();
        let mut data = Vec::with_capacity(HeightLayer::COUNT * num_joints * num_joints);
        for layer in layers {
            data.extend(layer.as_slice().iter().map(|&v| v as f32));
        }
        Self { num_joints, data }
    }

    pub fn num_joints(&self) -> usize {
        self.num_joints
    }

    pub fn shape(&self) -> [usize; 3] {
        [HeightLayer::COUNT, self.num_joints, self.num_joints]
    }

    #[inline]
    pub fn get(&self, layer: HeightLayer, row: usize, col: usize) -> f32 {
        let n = self.num_joints;
        self.data[layer.index() * n * n + row * n + col]
    }

    /// Flat view for consumers that expect a contiguous buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// One N×N layer, row-major.
    pub fn layer(&self, layer: HeightLayer) -> &[f32] {
        let nn = self.num_joints * self.num_joints;
        &self.data[layer.index() * nn..(layer.index() + 1) * nn]
    }

    pub fn layer_rows(&self, layer: HeightLayer) -> Vec<Vec<f32>> {
        self.layer(layer)
            .chunks(self.num_joints.max(1))
            .map(<[f32]>::to_vec)
            .collect()
    }

    /// Column sum over all rows of all three layers.
    pub fn column_mass(&self, col: usize) -> f32 {
        HeightLayer::ALL
            .iter()
            .map(|&l| (0..self.num_joints).map(|row| self.get(l, row, col)).sum::<f32>())
            .sum()
    }

    /// Nonzero cells in one layer, as `(row, col)` pairs in row-major order.
    pub fn support(&self, layer: HeightLayer) -> Vec<(usize, usize)> {
        let n = self.num_joints;
        self.layer(layer)
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(idx, _)| (idx / n, idx % n))
            .collect()
    }
}
