//! Filesystem helpers shared by snapshot and restore
//!
//! Both operations work on flat directories: only the entries directly inside
//! a directory are considered, never its subdirectories.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// List the files directly inside `dir`, sorted by path
///
/// Symlinks are included unless they resolve to a directory, so a broken
/// link shows up here and fails later at copy time where it gets reported.
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        let is_file = file_type.is_file() || (file_type.is_symlink() && !path.is_dir());
        if is_file {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// List the names of the subdirectories directly inside `dir`
///
/// A missing `dir` yields an empty list. Names that aren't valid UTF-8 are
/// skipped since they can't be snapshot folders.
pub fn list_subdirectories(dir: &Path) -> io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    Ok(names)
}

/// Copy `src` to `dst`, returning the number of bytes copied
///
/// Without `overwrite` an existing `dst` fails with
/// [`io::ErrorKind::AlreadyExists`] and is left untouched.
pub fn copy_file(src: &Path, dst: &Path, overwrite: bool) -> io::Result<u64> {
    if overwrite {
        return fs::copy(src, dst);
    }

    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let copied = io::copy(&mut reader, &mut writer)?;

    // Carry permissions over like fs::copy does
    if let Ok(metadata) = reader.metadata() {
        if let Err(e) = writer.set_permissions(metadata.permissions()) {
            debug!(file = %dst.display(), error = %e, "Failed to copy permissions");
        }
    }

    Ok(copied)
}

/// File name of `path` as a display string
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
