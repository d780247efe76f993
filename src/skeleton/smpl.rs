//! SMPL body: 24 joints, the layout behind the 72 pose parameters VIBE
//! emits per person and frame (24 joints × 3 axis-angle values).

use super::Skeleton;
use crate::model::{Edge, Heights};

pub const NUM_JOINTS: usize = 24;

pub const JOINT_NAMES: [&str; NUM_JOINTS] = [
    "pelvis",
    "left_hip",
    "right_hip",
    "spine1",
    "left_knee",
    "right_knee",
    "spine2",
    "left_ankle",
    "right_ankle",
    "spine3",
    "left_foot",
    "right_foot",
    "neck",
    "left_collar",
    "right_collar",
    "head",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hand",
    "right_hand",
];

/// Kinematic tree as (parent, child).
pub const BONES: [(usize, usize); NUM_JOINTS - 1] = [
    (0, 1), (0, 2), (0, 3),
    (1, 4), (2, 5), (3, 6),
    (4, 7), (5, 8), (6, 9),
    (7, 10), (8, 11), (9, 12),
    (9, 13), (9, 14), (12, 15),
    (13, 16), (14, 17), (16, 18),
    (17, 19), (18, 20), (19, 21),
    (20, 22), (21, 23),
];

/// Height level per joint, standing with arms hanging at the sides.
/// Left/right pairs share a level.
pub const HEIGHT_LEVELS: [f64; NUM_JOINTS] = [
    3.0, // pelvis
    3.0, 3.0, // hips
    4.0, // spine1
    2.0, 2.0, // knees
    5.0, // spine2
    1.0, 1.0, // ankles
    6.0, // spine3
    0.0, 0.0, // feet
    8.0, // neck
    7.0, 7.0, // collars
    9.0, // head
    7.0, 7.0, // shoulders
    6.0, 6.0, // elbows
    5.0, 5.0, // wrists
    4.0, 4.0, // hands
];

pub(super) fn skeleton() -> Skeleton {
    let heights: Heights = HEIGHT_LEVELS.iter().copied().enumerate().collect();
    Skeleton {
        name: "smpl".into(),
        joint_names: JOINT_NAMES.iter().map(|s| s.to_string()).collect(),
        edges: BONES.iter().copied().map(Edge::from).collect(),
        heights,
    }
}
