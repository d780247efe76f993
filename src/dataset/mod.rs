//! # Single-Video Dataset
//!
//! Pairs per-frame VIBE pose parameters with per-frame gesture labels.
//!
//! VIBE drops frames where tracking fails, so the pose sequence is shorter
//! than the label list. Each pose record carries the frame it came from and
//! that frame number indexes the labels; the sample index never does.
//! Samples are time-ordered and must not be shuffled.

use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::labels::{self, FrameLabel};
use crate::{Error, Result};

/// Person id whose track is used.
pub const TRACKED_PERSON: u32 = 1;

/// Rotation components per joint in the pose vector (axis-angle).
pub const CHANNELS: usize = 3;

/// VIBE output for one person in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeParams {
    /// Flattened `(V, 3)` joint rotations; 72 values for SMPL.
    pub pose: Vec<f32>,
    /// Source frame numbers, 0-based. The first entry is used.
    pub frame_ids: Vec<usize>,
}

/// One frame of VIBE output, keyed by person id.
pub type VibeFrame = HashMap<u32, VibeParams>;

/// `(V, C)` feature rows for the graph convolution, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatures")]
pub struct FeatureMatrix {
    channels: usize,
    data: Vec<f32>,
}

#[derive(Deserialize)]
struct RawFeatures {
    channels: usize,
    data: Vec<f32>,
}

impl TryFrom<RawFeatures> for FeatureMatrix {
    type Error = Error;

    fn try_from(raw: RawFeatures) -> Result<Self> {
        if raw.channels == 0 || raw.data.len() % raw.channels != 0 {
            return Err(Error::Dataset(format!(
                "{} values do not form rows of {} channels",
                raw.data.len(),
                raw.channels
            )));
        }
        Ok(Self { channels: raw.channels, data: raw.data })
    }
}

impl FeatureMatrix {
    /// Reshape a flat pose vector into rows of [`CHANNELS`].
    pub fn from_pose(pose: &[f32]) -> Result<Self> {
        if pose.len() % CHANNELS != 0 {
            return Err(Error::Dataset(format!(
                "pose has {} values, not a multiple of {CHANNELS}",
                pose.len()
            )));
        }
        Ok(Self { channels: CHANNELS, data: pose.to_vec() })
    }

    pub fn num_joints(&self) -> usize {
        self.data.len() / self.channels
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.num_joints(), self.channels]
    }

    pub fn row(&self, joint: usize) -> Option<&[f32]> {
        let start = joint.checked_mul(self.channels)?;
        self.data.get(start..start.checked_add(self.channels)?)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Keep rows `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let mut data = Vec::with_capacity(indices.len() * self.channels);
        for &idx in indices {
            let row = self.row(idx).ok_or_else(|| {
                Error::Dataset(format!("dense index {idx} outside 0..{}", self.num_joints()))
            })?;
            data.extend_from_slice(row);
        }
        Ok(Self { channels: self.channels, data })
    }
}

/// Features and label for one tracked frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Source video frame.
    pub frame: usize,
    pub features: FeatureMatrix,
    pub label: FrameLabel,
}

/// Tracked frames of one video with their gesture labels.
#[derive(Debug, Clone)]
pub struct SingleVideo {
    vibe: Vec<VibeFrame>,
    gesture: Vec<FrameLabel>,
    dense_indices: Option<Vec<usize>>,
}

impl SingleVideo {
    pub fn new(vibe: Vec<VibeFrame>, gesture: Vec<FrameLabel>, dense_indices: Option<Vec<usize>>) -> Self {
        Self { vibe, gesture, dense_indices }
    }

    /// Load VIBE output (JSON list of frames) and a JSON5 gesture label list.
    pub fn open(vibe_path: &Path, gesture_label_path: &Path, dense_indices: Option<Vec<usize>>) -> Result<Self> {
        let vibe: Vec<VibeFrame> = serde_json::from_reader(std::io::BufReader::new(
            std::fs::File::open(vibe_path)?,
        ))?;
        let gesture = labels::read_frame_labels(gesture_label_path)?;
        debug!(
            vibe = %vibe_path.display(),
            tracked = vibe.len(),
            labelled = gesture.len(),
            "opened single video"
        );
        Ok(Self::new(vibe, gesture, dense_indices))
    }

    /// Number of tracked frames.
    pub fn len(&self) -> usize {
        self.vibe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vibe.is_empty()
    }

    pub fn dense_indices(&self) -> Option<&[usize]> {
        self.dense_indices.as_deref()
    }

    pub fn get(&self, index: usize) -> Result<Sample> {
        let frame = self.vibe.get(index).ok_or_else(|| {
            Error::Dataset(format!("sample {index} outside 0..{}", self.vibe.len()))
        })?;
        let params = frame.get(&TRACKED_PERSON).ok_or_else(|| {
            Error::Dataset(format!("sample {index} has no track for person {TRACKED_PERSON}"))
        })?;
        let frame_num = *params.frame_ids.first().ok_or_else(|| {
            Error::Dataset(format!("sample {index} has no frame ids"))
        })?;
        let label = self.gesture.get(frame_num).cloned().ok_or_else(|| {
            Error::Dataset(format!("frame {frame_num} has no label ({} labelled)", self.gesture.len()))
        })?;

        let mut features = FeatureMatrix::from_pose(&params.pose)?;
        if let Some(indices) = &self.dense_indices {
            features = features.select(indices)?;
        }
        Ok(Sample { frame: frame_num, features, label })
    }

    /// Samples in time order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Sample>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
