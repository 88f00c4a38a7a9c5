//! Capability-based file access for map, scenario and event log files.
//!
//! Every path is resolved through `cap-std` from an ambient anchor (the
//! filesystem root, a drive prefix or the current directory) and handled as
//! UTF-8 via `camino`.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// File handle returned by this crate.
pub type Utf8File = fs_utf8::File;

/// Open an existing file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<Utf8File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole UTF-8 file into memory.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Create `path` for writing, truncating any previous contents.
///
/// Missing parent directories are created first.
pub fn create_file(path: &Utf8Path) -> io::Result<Utf8File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let (anchor, relative) = split_anchor(parent);
    let base = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    let dir = if relative.as_str().is_empty() {
        base
    } else {
        base.open_dir(&relative)?
    };
    Ok((dir, name))
}

/// Whether `path` is a regular file.
///
/// Missing paths surface as [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let (anchor, relative) = split_anchor(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into the ambient directory it hangs from and the remainder.
///
/// Absolute paths are anchored at their root (and drive prefix on Windows);
/// relative paths at the current directory.
#[must_use]
pub fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let anchor: Utf8PathBuf = path
        .components()
        .take_while(|component| {
            matches!(
                component,
                Utf8Component::Prefix(_) | Utf8Component::RootDir
            )
        })
        .collect();
    if anchor.as_str().is_empty() {
        return (Utf8PathBuf::from("."), path.to_path_buf());
    }
    let relative = path
        .strip_prefix(&anchor)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_default();
    (anchor, relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir should be UTF-8")
    }

    #[rstest]
    #[case("maps/europe.txt", ".", "maps/europe.txt")]
    #[case("/var/log/courier", "/", "var/log/courier")]
    #[case("/", "/", "")]
    fn anchors_split_paths(#[case] path: &str, #[case] anchor: &str, #[case] rest: &str) {
        let (found_anchor, found_rest) = split_anchor(Utf8Path::new(path));
        assert_eq!(found_anchor, Utf8PathBuf::from(anchor));
        assert_eq!(found_rest, Utf8PathBuf::from(rest));
    }

    #[rstest]
    fn created_files_can_be_read_back() {
        let dir = TempDir::new().expect("create temp dir");
        let path = utf8_root(&dir).join("nested/run/deliveries.log");
        let mut file = create_file(&path).expect("create log file");
        file.write_all(b"first line\n").expect("write");
        drop(file);

        assert!(file_is_file(&path).expect("metadata"));
        assert_eq!(read_to_string(&path).expect("read"), "first line\n");
    }

    #[rstest]
    fn create_truncates_existing_files() {
        let dir = TempDir::new().expect("create temp dir");
        let path = utf8_root(&dir).join("deliveries.log");
        create_file(&path)
            .expect("create")
            .write_all(b"stale")
            .expect("write");
        create_file(&path).expect("recreate");
        assert_eq!(read_to_string(&path).expect("read"), "");
    }

    #[rstest]
    fn missing_paths_report_not_found() {
        let dir = TempDir::new().expect("create temp dir");
        let root = utf8_root(&dir);
        for path in [root.join("absent.txt"), root.join("absent/deeper.txt")] {
            let err = file_is_file(&path).expect_err("path is missing");
            assert_eq!(err.kind(), io::ErrorKind::NotFound);
        }
        assert!(read_to_string(&root.join("absent.txt")).is_err());
    }

    #[rstest]
    fn directories_are_not_files() {
        let dir = TempDir::new().expect("create temp dir");
        let root = utf8_root(&dir);
        std::fs::create_dir(root.join("maps")).expect("create dir");
        assert!(!file_is_file(&root.join("maps")).expect("metadata"));
    }
}
