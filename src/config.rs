//! Data directory layout for the preprocessing steps.
//!
//! Passed explicitly to whatever needs paths; there is no global default
//! instance. Every field has a serde default so a config file only needs to
//! name what differs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root holding every dataset directory.
    pub data_root: PathBuf,
    pub dataset: DatasetConfig,
    pub gendata: GenDataConfig,
}

/// Raw dataset directories, relative to `data_root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub pgds2_dir: PathBuf,
    /// LosslessCut `.llc` orientation projects.
    pub orientation_llc_dir: PathBuf,
    pub video_dir: PathBuf,
}

/// Generated artifacts, relative to the dataset directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenDataConfig {
    pub ori_label_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            dataset: DatasetConfig::default(),
            gendata: GenDataConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            pgds2_dir: PathBuf::from("pgds2"),
            orientation_llc_dir: PathBuf::from("ori_llc"),
            video_dir: PathBuf::from("videos"),
        }
    }
}

impl Default for GenDataConfig {
    fn default() -> Self {
        Self { ori_label_dir: PathBuf::from("ori_label") }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_data_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.data_root = root.into();
        self
    }

    /// `data_root` must exist before any step runs.
    pub fn validate(&self) -> Result<()> {
        if !self.data_root.is_dir() {
            return Err(Error::Config(format!(
                "data root {} is not a directory",
                self.data_root.display()
            )));
        }
        Ok(())
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.data_root.join(&self.dataset.pgds2_dir)
    }

    pub fn video_dir(&self) -> PathBuf {
        self.dataset_dir().join(&self.dataset.video_dir)
    }

    pub fn llc_dir(&self) -> PathBuf {
        self.dataset_dir().join(&self.dataset.orientation_llc_dir)
    }

    pub fn ori_label_dir(&self) -> PathBuf {
        self.dataset_dir().join(&self.gendata.ori_label_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{"data_root": "/srv/mtpgr", "gendata": {"ori_label_dir": "labels"}}"#)
            .unwrap();
        assert_eq!(cfg.data_root, PathBuf::from("/srv/mtpgr"));
        assert_eq!(cfg.dataset, DatasetConfig::default());
        assert_eq!(cfg.ori_label_dir(), PathBuf::from("/srv/mtpgr/pgds2/labels"));
        assert_eq!(cfg.video_dir(), PathBuf::from("/srv/mtpgr/pgds2/videos"));
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(Config::from_json_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_validate_missing_root() {
        let cfg = Config::default().with_data_root("/definitely/not/here/mtpgr");
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }
}
