//! # Skeleton Topologies
//!
//! Hand-authored joint graphs: names, bones and reference-pose heights.
//! A [`Skeleton`] is fixed for the lifetime of a model and feeds
//! [`AdjacencyMatrix::new`] exactly once.

pub mod smpl;

use smallvec::SmallVec;

use crate::adjacency::{self, AdjacencyMatrix};
use crate::model::*;
use crate::{Error, Result};

/// Named joint graph with a height per joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    name: String,
    joint_names: Vec<String>,
    edges: Vec<Edge>,
    heights: Heights,
}

impl Skeleton {
    /// Create a skeleton. Joint `i` is named `joint_names[i]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTopology`] if the names, heights and edges disagree
    /// on the joint count.
    pub fn new(
        name: impl Into<String>,
        joint_names: impl IntoIterator<Item = impl Into<String>>,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
        heights: Heights,
    ) -> Result<Self> {
        let joint_names: Vec<String> = joint_names.into_iter().map(Into::into).collect();
        let edges: Vec<Edge> = edges.into_iter().map(Into::into).collect();
        adjacency::validate_topology(&edges, &heights)?;
        if joint_names.len() != heights.len() {
            return Err(Error::InvalidTopology(format!(
                "{} joint names for {} heights",
                joint_names.len(),
                heights.len()
            )));
        }
        Ok(Self { name: name.into(), joint_names, edges, heights })
    }

    /// The 24-joint SMPL body.
    pub fn smpl() -> Self {
        smpl::skeleton()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_joints(&self) -> usize {
        self.joint_names.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn heights(&self) -> &Heights {
        &self.heights
    }

    pub fn joint_name(&self, id: JointId) -> Option<&str> {
        self.joint_names.get(id.0).map(String::as_str)
    }

    pub fn joint_by_name(&self, name: &str) -> Option<JointId> {
        self.joint_names.iter().position(|n| n == name).map(JointId)
    }

    /// Joints sharing a bone with `id`, excluding `id` itself, in edge order.
    pub fn neighbors(&self, id: JointId) -> SmallVec<[JointId; 4]> {
        let mut out = SmallVec::new();
        for other in self.edges.iter().filter_map(|e| e.other_end(id)) {
            if other != id && !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// Layer that `neighbor` falls into when seen from `root`.
    pub fn layer_of(&self, root: JointId, neighbor: JointId) -> Option<HeightLayer> {
        let hr = self.heights.get(root)?;
        let hn = self.heights.get(neighbor)?;
        Some(HeightLayer::classify(hr, hn))
    }

    pub fn adjacency(&self) -> Result<AdjacencyMatrix> {
        AdjacencyMatrix::new(self.edges.iter().copied(), &self.heights)
    }

    /// Keep only `indices`, renumbered in the given order.
    ///
    /// Edges with an endpoint outside the subset are dropped. Used with the
    /// dense joint selection applied to per-frame features.
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        let n = self.num_joints();
        let mut remap = vec![None; n];
        for (new, &old) in indices.iter().enumerate() {
            if old >= n {
                return Err(Error::InvalidTopology(format!("subset index {old} outside 0..{n}")));
            }
            if remap[old].replace(new).is_some() {
                return Err(Error::InvalidTopology(format!("subset index {old} repeated")));
            }
        }

        let mut heights = Heights::new();
        for (new, &old) in indices.iter().enumerate() {
            if let Some(h) = self.heights.get(JointId(old)) {
                heights.insert(new, h);
            }
        }
        let edges = self.edges.iter().filter_map(|e| {
            Some(Edge::new(remap[e.a.0]?, remap[e.b.0]?))
        });
        let names = indices.iter().map(|&i| self.joint_names[i].clone());

        Self::new(format!("{}[{}]", self.name, indices.len()), names, edges, heights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stick() -> Skeleton {
        Skeleton::new(
            "stick",
            ["head", "hip", "foot"],
            [(0usize, 1usize), (1, 2)],
            Heights::from([(0usize, 2.0), (1usize, 1.0), (2usize, 0.0)]),
        )
        .unwrap()
    }

    #[test]
    fn test_name_mismatch_rejected() {
        let err = Skeleton::new("bad", ["a"], Vec::<Edge>::new(), Heights::from([(0usize, 0.0), (1usize, 0.0)]));
        assert!(matches!(err, Err(Error::InvalidTopology(_))));
    }

    #[test]
    fn test_neighbors_and_layers() {
        let s = stick();
        let hip = s.joint_by_name("hip").unwrap();
        assert_eq!(s.neighbors(hip).as_slice(), &[JointId(0), JointId(2)]);
        assert_eq!(s.layer_of(hip, JointId(0)), Some(HeightLayer::Higher));
        assert_eq!(s.layer_of(hip, JointId(2)), Some(HeightLayer::Lower));
        assert_eq!(s.layer_of(hip, JointId(9)), None);
    }

    #[test]
    fn test_subset_renumbers() {
        let s = stick().subset(&[2, 1]).unwrap();
        assert_eq!(s.num_joints(), 2);
        assert_eq!(s.joint_name(JointId(0)), Some("foot"));
        assert_eq!(s.edges(), &[Edge::new(1usize, 0usize)]);
        assert_eq!(s.heights().get(JointId(1)), Some(1.0));
    }

    #[test]
    fn test_subset_rejects_bad_indices() {
        assert!(matches!(stick().subset(&[0, 3]), Err(Error::InvalidTopology(_))));
        assert!(matches!(stick().subset(&[1, 1]), Err(Error::InvalidTopology(_))));
    }
}
