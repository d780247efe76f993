//! Frame lookup boundary.
//!
//! Decoding is not done here. Callers plug in whatever reads their
//! containers through [`VideoProbe`]; [`ConstantFrameRate`] covers the
//! common case where the frame rate and count are already known.

use std::path::Path;

use crate::{Error, Result};

/// Maps timestamps to frame numbers for one video.
pub trait FrameIndex {
    fn frame_count(&self) -> usize;

    /// 0-based frame shown at `seconds`, clamped to `0..=frame_count`.
    fn frame_at(&self, seconds: f64) -> usize;
}

/// Opens a video file and reports its frame timing.
pub trait VideoProbe {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameIndex>>;
}

impl<F> VideoProbe for F
where
    F: Fn(&Path) -> Result<Box<dyn FrameIndex>>,
{
    fn open(&self, path: &Path) -> Result<Box<dyn FrameIndex>> {
        self(path)
    }
}

/// Fixed-fps timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFrameRate {
    fps: f64,
    frame_count: usize,
}

/// Slack for timestamps written a hair before a frame boundary.
const FRAME_EPSILON: f64 = 1e-6;

impl ConstantFrameRate {
    pub fn new(fps: f64, frame_count: usize) -> Result<Self> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(Error::Label(format!("invalid frame rate {fps}")));
        }
        Ok(Self { fps, frame_count })
    }
}

impl FrameIndex for ConstantFrameRate {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn frame_at(&self, seconds: f64) -> usize {
        if seconds.is_nan() || seconds <= 0.0 {
            return 0;
        }
        let frame = (seconds * self.fps + FRAME_EPSILON).floor();
        if frame >= self.frame_count as f64 {
            self.frame_count
        } else {
            frame as usize
        }
    }
}
