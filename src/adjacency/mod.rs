//! # Height-Layered Adjacency
//!
//! Builds the `(3, N, N)` kernel for a spatial graph convolution over a
//! skeleton. Each directed pair `(root, j)` of connected joints is filed
//! under one of three layers by the sign of `height[j] - height[root]`:
//!
//! ```text
//! edges + heights
//!   → A₀ = sym(edges) with diag forced to 1
//!   → LOWER / SAME / HIGHER   (LOWER + SAME + HIGHER == A₀)
//!   → each layer · diag(1 / colsum(A₀))
//!   → AdjacencyTensor
//! ```
//!
//! The normalizing weights come from the full A₀, not per layer, so a
//! column summed across all three layers has mass exactly 1. A joint with
//! K neighbors (itself included) passes 1/K of its influence through each.

use std::sync::Arc;

use tracing::debug;

use crate::model::*;
use crate::{Error, Result};

// ============================================================================
// AdjacencyMatrix
// ============================================================================

/// Height-partitioned, degree-normalized adjacency for one skeleton.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    tensor: Arc<AdjacencyTensor>,
}

impl AdjacencyMatrix {
    /// Build the layered adjacency for `edges` over the joints in `heights`.
    ///
    /// N is the number of joints in `heights`; their ids must be exactly
    /// `0..N`. Duplicate edges count once and an explicit `(i, i)` edge is
    /// the same as the implicit self-loop.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTopology`] when `heights` is empty, has gaps or
    /// non-finite values, or an edge references a joint outside `0..N`.
    pub fn new<E>(edges: impl IntoIterator<Item = E>, heights: &Heights) -> Result<Self>
    where
        E: Into<Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().map(Into::into).collect();
        let levels = validate_topology(&edges, heights)?;
        let n = levels.len();

        let undirected = undirected_adjacency(n, &edges);
        let mut layers = partition_by_height(&undirected, &levels);
        check_partition(&undirected, &layers)?;

        let weights = degree_weights(&undirected);
        for layer in &mut layers {
            layer.scale_columns(&weights);
        }

        debug!(
            joints = n,
            edges = edges.len(),
            lower = layers[HeightLayer::Lower.index()].nnz(),
            same = layers[HeightLayer::Same.index()].nnz(),
            higher = layers[HeightLayer::Higher.index()].nnz(),
            "built height-layered adjacency"
        );

        Ok(Self { tensor: Arc::new(AdjacencyTensor::from_layers(&layers)) })
    }

    /// The normalized `(3, N, N)` tensor.
    pub fn height_config_adjacency(&self) -> &AdjacencyTensor {
        &self.tensor
    }

    /// Shared handle for consumers on other threads.
    pub fn shared(&self) -> Arc<AdjacencyTensor> {
        Arc::clone(&self.tensor)
    }

    pub fn num_joints(&self) -> usize {
        self.tensor.num_joints()
    }
}

// ============================================================================
// Build steps
// ============================================================================

/// Check `edges` against `heights` and lay the heights out by joint index.
pub fn validate_topology(edges: &[Edge], heights: &Heights) -> Result<Vec<f64>> {
    if heights.is_empty() {
        return Err(Error::InvalidTopology("height map is empty".into()));
    }
    let n = heights.len();

    let mut levels = Vec::with_capacity(n);
    for (idx, h) in heights.dense().into_iter().enumerate() {
        match h {
            Some(h) if h.is_finite() => levels.push(h),
            Some(h) => {
                return Err(Error::InvalidTopology(format!("joint {idx} has non-finite height {h}")));
            }
            None => {
                return Err(Error::InvalidTopology(format!(
                    "joint {idx} has no height; joint ids must cover 0..{n}"
                )));
            }
        }
    }

    if let Some(edge) = edges.iter().find(|e| e.max_index() >= n) {
        return Err(Error::InvalidTopology(format!(
            "edge ({}, {}) references a joint outside 0..{n}",
            edge.a, edge.b
        )));
    }

    Ok(levels)
}

/// Symmetric 0/1 matrix of `edges` with every diagonal cell set to 1.
///
/// Endpoints must already be checked against `n`.
pub fn undirected_adjacency(n: usize, edges: &[Edge]) -> SquareMatrix {
    let mut a = SquareMatrix::zeros(n);
    for e in edges {
        a.set(e.a.0, e.b.0, 1.0);
        a.set(e.b.0, e.a.0, 1.0);
    }
    for i in 0..n {
        a.set(i, i, 1.0);
    }
    a
}

/// Split `a` into LOWER, SAME and HIGHER by neighbor height minus root height.
///
/// Row is the root, column the neighbor.
pub fn partition_by_height(a: &SquareMatrix, heights: &[f64]) -> [SquareMatrix; 3] {
    let n = a.dim();
    let mut layers = [SquareMatrix::zeros(n), SquareMatrix::zeros(n), SquareMatrix::zeros(n)];
    for root in 0..n {
        for j in 0..n {
            if a.get(root, j) == 1.0 {
                let layer = HeightLayer::classify(heights[root], heights[j]);
                layers[layer.index()].set(root, j, 1.0);
            }
        }
    }
    layers
}

/// The three layers must add back up to `a`, cell for cell.
pub fn check_partition(a: &SquareMatrix, layers: &[SquareMatrix; 3]) -> Result<()> {
    let n = a.dim();
    for i in 0..n {
        for j in 0..n {
            let total: f64 = layers.iter().map(|l| l.get(i, j)).sum();
            if total != a.get(i, j) || total > 1.0 {
                return Err(Error::InvariantViolation(format!(
                    "layers sum to {total} at ({i}, {j}), adjacency has {}",
                    a.get(i, j)
                )));
            }
        }
    }
    Ok(())
}

/// Diagonal of D: `1 / colsum(a)` per column, 0 for an empty column.
pub fn degree_weights(a: &SquareMatrix) -> Vec<f64> {
    a.column_sums()
        .into_iter()
        .map(|d| if d > 0.0 { d.recip() } else { 0.0 })
        .collect()
}

/// `a · D` with D from [`degree_weights`].
pub fn normalize_digraph(a: &SquareMatrix) -> SquareMatrix {
    let mut out = a.clone();
    out.scale_columns(&degree_weights(a));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_heights() -> Heights {
        Heights::from([(0usize, 0.0), (1usize, 0.0), (2usize, 1.0)])
    }

    #[test]
    fn test_undirected_forces_unit_diagonal() {
        let edges = [Edge::new(0usize, 0usize), Edge::new(0usize, 1usize), Edge::new(1usize, 0usize)];
        let a = undirected_adjacency(2, &edges);
        assert_eq!(a.to_rows(), vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_degree_weights_guard_empty_column() {
        let mut a = SquareMatrix::zeros(2);
        a.set(0, 0, 1.0);
        let w = degree_weights(&a);
        assert_eq!(w, vec![1.0, 0.0]);
        assert!(w.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_normalize_digraph_three_way() {
        // joint connected to two others and itself: each contributes 1/3
        let a = undirected_adjacency(3, &[Edge::new(0usize, 1usize), Edge::new(1usize, 2usize)]);
        let d = normalize_digraph(&a);
        for i in 0..3 {
            assert!((d.get(i, 1) - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!((d.get(0, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_partition_chain() {
        let a = undirected_adjacency(3, &[Edge::new(0usize, 1usize), Edge::new(1usize, 2usize)]);
        let layers = partition_by_height(&a, &[0.0, 0.0, 1.0]);
        assert_eq!(layers[2].get(1, 2), 1.0);
        assert_eq!(layers[0].get(2, 1), 1.0);
        assert_eq!(layers[1].nnz(), 5);
        check_partition(&a, &layers).unwrap();
    }

    #[test]
    fn test_check_partition_detects_double_count() {
        let a = SquareMatrix::identity(2);
        let layers = [SquareMatrix::identity(2), SquareMatrix::identity(2), SquareMatrix::zeros(2)];
        assert!(matches!(check_partition(&a, &layers), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_validate_rejects_gap() {
        let heights = Heights::from([(0usize, 0.0), (2usize, 1.0)]);
        let err = validate_topology(&[], &heights).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let heights = Heights::from([(0usize, 0.0), (1usize, f64::NAN)]);
        assert!(matches!(validate_topology(&[], &heights), Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn test_builder_exposes_shared_tensor() {
        let adj = AdjacencyMatrix::new([(0usize, 1usize), (1, 2)], &chain_heights()).unwrap();
        let shared = adj.shared();
        assert_eq!(shared.shape(), [3, 3, 3]);
        assert_eq!(&*shared, adj.height_config_adjacency());
        assert_eq!(adj.num_joints(), 3);
    }
}
