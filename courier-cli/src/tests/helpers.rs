//! Test helpers for laying out map and scenario files on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Roads of the seven-city map used across the courier workspace.
pub(super) const REFERENCE_ROADS: &str = "\
A B 4
A C 4
B C 2
C E 1
E F 3
E F 2
D E -3
C D 2
D G 3
F G 7
";

/// Scenario exercising every step kind, including two rejected requests.
pub(super) const REFERENCE_SCENARIO: &str = r#"{
  "steps": [
    { "send": "F,B,500,basic" },
    { "send": "F,Z,500,basic" },
    { "shift": 3 },
    { "query": 101 },
    { "shift": -1 },
    { "query": 999 }
  ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write test file");
}

pub(super) fn utf8_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}
