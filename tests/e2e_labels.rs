//! End-to-end tests for orientation label conversion over a data directory.
//!
//! Lays out `<root>/pgds2/{videos,ori_llc}` in a scratch directory, runs the
//! converter with a fixed-rate probe and reads the per-frame files back.

use std::path::{Path, PathBuf};

use mtpgr::labels::{self, ConstantFrameRate, FrameIndex, FrameLabel};
use mtpgr::{Config, Error};
use pretty_assertions::assert_eq;

/// Fresh scratch directory per test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mtpgr-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn probe_10fps(_: &Path) -> mtpgr::Result<Box<dyn FrameIndex>> {
    Ok(Box::new(ConstantFrameRate::new(10.0, 20)?))
}

fn seed(root: &Path) -> Config {
    let cfg = Config::default().with_data_root(root);
    std::fs::create_dir_all(cfg.video_dir()).unwrap();
    std::fs::create_dir_all(cfg.llc_dir()).unwrap();

    std::fs::write(cfg.video_dir().join("b.m4v"), b"").unwrap();
    std::fs::write(cfg.video_dir().join("a.m4v"), b"").unwrap();
    std::fs::write(cfg.video_dir().join("notes.txt"), b"").unwrap();
    // c has no project and is skipped
    std::fs::write(cfg.video_dir().join("c.m4v"), b"").unwrap();

    std::fs::write(
        cfg.llc_dir().join("a-proj.llc"),
        "{ version: 1, mediaFileName: 'a.m4v', cutSegments: [ { end: 0.5, name: 'F' }, { start: 0.5, name: 'L' } ] }",
    )
    .unwrap();
    std::fs::write(
        cfg.llc_dir().join("b-proj.llc"),
        "{ cutSegments: [ { name: 'B' }, { start: 1.0, end: 1.5, name: 'R' }, { start: 1.5, name: 'B' } ] }",
    )
    .unwrap();
    cfg
}

#[test]
fn test_convert_directory() {
    let root = scratch("convert");
    let cfg = seed(&root);

    let written = labels::convert_orientation_labels(&cfg, &probe_10fps).unwrap();
    assert_eq!(
        written,
        vec![cfg.ori_label_dir().join("a.json5"), cfg.ori_label_dir().join("b.json5")]
    );

    let a = labels::read_frame_labels(&written[0]).unwrap();
    assert_eq!(a.len(), 20);
    assert!(a[..5].iter().all(|l| l.as_name() == Some("F")));
    assert!(a[5..].iter().all(|l| l.as_name() == Some("L")));

    let b = labels::read_frame_labels(&written[1]).unwrap();
    let r: Vec<usize> = b
        .iter()
        .enumerate()
        .filter(|(_, l)| l.as_name() == Some("R"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(r, (10..15).collect::<Vec<_>>());

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_single_conversion_writes_json_array() {
    let root = scratch("single");
    let llc = root.join("x-proj.llc");
    let out = root.join("x.json5");
    std::fs::write(&llc, "{ cutSegments: [ { start: 1.0, name: 'R' } ] }").unwrap();

    let frames = labels::ori_llc_to_frame(&root.join("x.m4v"), &llc, &out, &probe_10fps).unwrap();
    assert_eq!(frames[9], FrameLabel::Index(0));
    assert_eq!(frames[10], FrameLabel::from("R"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("[0,0,0,0,0,0,0,0,0,0,\"R\""));

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_missing_data_root() {
    let cfg = Config::default().with_data_root("/definitely/not/here/mtpgr");
    let err = labels::convert_orientation_labels(&cfg, &probe_10fps).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_probe_errors_propagate() {
    let root = scratch("probe");
    let cfg = seed(&root);
    let failing = |_: &Path| -> mtpgr::Result<Box<dyn FrameIndex>> {
        Err(Error::Label("cannot decode".into()))
    };
    let err = labels::convert_orientation_labels(&cfg, &failing).unwrap_err();
    assert!(matches!(err, Error::Label(_)));

    std::fs::remove_dir_all(&root).unwrap();
}
