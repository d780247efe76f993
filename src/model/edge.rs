//! Undirected skeletal connection between two joints.

use serde::{Deserialize, Serialize};
use super::JointId;

/// A bone or spatial link. Stored once, read in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub a: JointId,
    pub b: JointId,
}

impl Edge {
    pub fn new(a: impl Into<JointId>, b: impl Into<JointId>) -> Self {
        Self { a: a.into(), b: b.into() }
    }

    /// The "other" end of the edge from the given joint.
    pub fn other_end(&self, from: JointId) -> Option<JointId> {
        if from == self.a { Some(self.b) }
        else if from == self.b { Some(self.a) }
        else { None }
    }

    /// Largest endpoint index; used for range checks against N.
    pub fn max_index(&self) -> usize {
        self.a.0.max(self.b.0)
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Edge::new(a, b)
    }
}

impl From<[usize; 2]> for Edge {
    fn from([a, b]: [usize; 2]) -> Self {
        Edge::new(a, b)
    }
}
