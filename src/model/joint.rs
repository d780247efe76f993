//! Joint identifiers and the per-joint height map.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Index of a skeletal keypoint, dense in `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointId(pub usize);

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for JointId {
    fn from(idx: usize) -> Self {
        JointId(idx)
    }
}

/// Relative vertical position of every joint in a reference pose.
///
/// Units are arbitrary but must be consistent within one skeleton. Only the
/// sign of the difference between two heights is ever used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heights {
    map: HashMap<JointId, f64>,
}

impl Heights {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn with_height(mut self, joint: impl Into<JointId>, height: f64) -> Self {
        self.insert(joint, height);
        self
    }

    /// Set a joint's height, returning the previous value if any.
    pub fn insert(&mut self, joint: impl Into<JointId>, height: f64) -> Option<f64> {
        self.map.insert(joint.into(), height)
    }

    pub fn get(&self, joint: JointId) -> Option<f64> {
        self.map.get(&joint).copied()
    }

    /// Number of distinct joints; this is N for the adjacency tensor.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Heights laid out by joint index, `None` for gaps in `0..N`.
    pub(crate) fn dense(&self) -> Vec<Option<f64>> {
        let n = self.len();
        let mut out = vec![None; n];
        for (&JointId(idx), &h) in &self.map {
            if idx < n {
                out[idx] = Some(h);
            }
        }
        out
    }
}

impl<J: Into<JointId>> FromIterator<(J, f64)> for Heights {
    fn from_iter<I: IntoIterator<Item = (J, f64)>>(iter: I) -> Self {
        let mut heights = Heights::new();
        for (joint, h) in iter {
            heights.insert(joint, h);
        }
        heights
    }
}

impl<J: Into<JointId>, const K: usize> From<[(J, f64); K]> for Heights {
    fn from(pairs: [(J, f64); K]) -> Self {
        pairs.into_iter().collect()
    }
}
