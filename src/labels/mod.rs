//! # Orientation Labels
//!
//! Turns LosslessCut projects (`.llc`, JSON5) that cut a video into named
//! orientation segments into one label per video frame.
//!
//! ```text
//! {
//!   version: 1,
//!   mediaFileName: '4K9A0217.m4v',
//!   cutSegments: [
//!     { end: 54.945968, name: 'F' },
//!     { start: 54.945968, end: 107.503396, name: 'L' },
//!     { start: 416.52772, name: 'F' },
//!   ]
//! }
//! ```
//!
//! A segment paints its name from its start frame to the end of the video;
//! later segments paint over earlier ones, so `end` is never consulted.

pub mod video;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::{Error, Result};

pub use video::{ConstantFrameRate, FrameIndex, VideoProbe};

/// Extension of the videos the converter picks up.
pub const VIDEO_EXTENSION: &str = "m4v";

// ============================================================================
// LLC document
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlcProject {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub media_file_name: Option<String>,
    #[serde(default)]
    pub cut_segments: Vec<CutSegment>,
}

/// One cut. The first segment usually has no `start`, the last no `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutSegment {
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub name: String,
}

impl LlcProject {
    pub fn from_json5(text: &str) -> Result<Self> {
        json5::from_str(text).map_err(|e| Error::Label(format!("malformed llc project: {e}")))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json5(&text)
    }
}

// ============================================================================
// Per-frame labels
// ============================================================================

/// Label of one frame: a class index or a segment name.
///
/// Frames no segment covers keep `Index(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameLabel {
    Index(i64),
    Name(String),
}

impl Default for FrameLabel {
    fn default() -> Self {
        FrameLabel::Index(0)
    }
}

impl FrameLabel {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            FrameLabel::Name(s) => Some(s),
            FrameLabel::Index(_) => None,
        }
    }
}

impl From<&str> for FrameLabel {
    fn from(s: &str) -> Self {
        FrameLabel::Name(s.to_string())
    }
}

impl From<i64> for FrameLabel {
    fn from(i: i64) -> Self {
        FrameLabel::Index(i)
    }
}

/// Paint each segment's name from its start frame to the last frame.
pub fn llc_to_frame_labels(project: &LlcProject, frames: &dyn FrameIndex) -> Result<Vec<FrameLabel>> {
    let frame_count = frames.frame_count();
    let mut labels = vec![FrameLabel::default(); frame_count];

    for (i, segment) in project.cut_segments.iter().enumerate() {
        if segment.name.is_empty() {
            return Err(Error::Label(format!("segment {i} has no name")));
        }
        let start_frame = frames.frame_at(segment.start.unwrap_or(0.0)).min(frame_count);
        debug!(segment = i, name = %segment.name, start_frame, "applying cut segment");
        for label in &mut labels[start_frame..] {
            *label = FrameLabel::Name(segment.name.clone());
        }
    }
    Ok(labels)
}

/// Read a label list written by [`write_frame_labels`] or any JSON5 array.
pub fn read_frame_labels(path: &Path) -> Result<Vec<FrameLabel>> {
    let text = std::fs::read_to_string(path)?;
    json5::from_str(&text).map_err(|e| Error::Label(format!("malformed label list {}: {e}", path.display())))
}

/// Convert one video's `.llc` project into a per-frame label file.
pub fn ori_llc_to_frame(video: &Path, llc: &Path, save_path: &Path, probe: &dyn VideoProbe) -> Result<Vec<FrameLabel>> {
    let frames = probe.open(video)?;
    let project = LlcProject::from_path(llc)?;
    let labels = llc_to_frame_labels(&project, frames.as_ref())?;

    let mut out = BufWriter::new(File::create(save_path)?);
    crate::export::write_frame_labels(&labels, &mut out)?;
    out.flush()?;
    Ok(labels)
}

/// Convert every video in the configured video directory.
///
/// For `<video_dir>/<stem>.m4v` the project is `<llc_dir>/<stem>-proj.llc`
/// and the output `<ori_label_dir>/<stem>.json5`. Videos without a project
/// are skipped. Returns the files written, in name order.
pub fn convert_orientation_labels(config: &Config, probe: &dyn VideoProbe) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let target_dir = config.ori_label_dir();
    std::fs::create_dir_all(&target_dir)?;
    let llc_dir = config.llc_dir();

    let videos = list_videos(&config.video_dir())?;
    debug!(video_dir = %config.video_dir().display(), count = videos.len(), "found videos");

    let mut written = Vec::with_capacity(videos.len());
    for video in videos {
        let Some(stem) = video.file_stem().and_then(|s| s.to_str()) else {
            warn!(video = %video.display(), "skipping video with non-UTF-8 name");
            continue;
        };
        let source = llc_dir.join(format!("{stem}-proj.llc"));
        let target = target_dir.join(format!("{stem}.json5"));
        if !source.is_file() {
            warn!(video = %video.display(), llc = %source.display(), "no llc project, skipping");
            continue;
        }

        info!(video = %video.display(), "converting orientation labels");
        ori_llc_to_frame(&video, &source, &target, probe)?;
        info!(target = %target.display(), "per-frame labels saved");
        written.push(target);
    }
    Ok(written)
}

fn list_videos(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut videos = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == VIDEO_EXTENSION) {
            videos.push(path);
        }
    }
    videos.sort();
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
      version: 1,
      mediaFileName: '4K9A0217.m4v',
      cutSegments: [
        { end: 1.0, name: 'F' },
        { start: 1.0, end: 2.0, name: 'L' },
        { start: 2.0, name: 'F' },
      ]
    }"#;

    #[test]
    fn test_parse_json5_project() {
        let p = LlcProject::from_json5(SAMPLE).unwrap();
        assert_eq!(p.version, Some(1));
        assert_eq!(p.media_file_name.as_deref(), Some("4K9A0217.m4v"));
        assert_eq!(p.cut_segments.len(), 3);
        assert_eq!(p.cut_segments[0].start, None);
        assert_eq!(p.cut_segments[2].end, None);
    }

    #[test]
    fn test_segments_paint_forward() {
        let p = LlcProject::from_json5(SAMPLE).unwrap();
        let frames = ConstantFrameRate::new(2.0, 6).unwrap();
        let labels = llc_to_frame_labels(&p, &frames).unwrap();
        let names: Vec<&str> = labels.iter().filter_map(FrameLabel::as_name).collect();
        assert_eq!(names, vec!["F", "F", "L", "L", "F", "F"]);
    }

    #[test]
    fn test_uncovered_frames_stay_zero() {
        let p = LlcProject::from_json5("{cutSegments: [{start: 1.0, name: 'R'}]}").unwrap();
        let frames = ConstantFrameRate::new(2.0, 4).unwrap();
        let labels = llc_to_frame_labels(&p, &frames).unwrap();
        let r = FrameLabel::from("R");
        assert_eq!(labels, vec![FrameLabel::Index(0), FrameLabel::Index(0), r.clone(), r]);
    }

    #[test]
    fn test_start_past_end_is_noop() {
        let p = LlcProject::from_json5("{cutSegments: [{start: 99.0, name: 'R'}]}").unwrap();
        let frames = ConstantFrameRate::new(2.0, 3).unwrap();
        let labels = llc_to_frame_labels(&p, &frames).unwrap();
        assert!(labels.iter().all(|l| *l == FrameLabel::Index(0)));
    }

    #[test]
    fn test_unnamed_segment_rejected() {
        let p = LlcProject::from_json5("{cutSegments: [{start: 0}]}").unwrap();
        let frames = ConstantFrameRate::new(2.0, 3).unwrap();
        assert!(matches!(llc_to_frame_labels(&p, &frames), Err(Error::Label(_))));
    }

    #[test]
    fn test_malformed_project() {
        assert!(matches!(LlcProject::from_json5("{cutSegments: ["), Err(Error::Label(_))));
    }
}
