//! Recursive copy and forced delete.
//!
//! Copies preserve file contents, permissions and modification times. Deletes
//! are forced: directories are removed with everything below them, and a path
//! that is already gone is an error.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{FixtureError, Result};

/// Copies `entry` (file or directory) into `dest_dir`, keeping its base name.
///
/// `dest_dir` is created if it does not exist. Returns the path of the copy.
pub fn copy_to_directory(entry: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = entry.file_name().ok_or_else(|| FixtureError::Copy {
        from: entry.to_path_buf(),
        to: dest_dir.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "entry has no file name"),
    })?;
    fs::create_dir_all(dest_dir).map_err(|source| FixtureError::Copy {
        from: entry.to_path_buf(),
        to: dest_dir.to_path_buf(),
        source,
    })?;

    let target = dest_dir.join(name);
    copy_entry(entry, &target, None)?;
    debug!(from = %entry.display(), to = %target.display(), "copied fixture entry");
    Ok(target)
}

/// Copies everything inside `src` into `dst`, merging with and overwriting
/// whatever `dst` already holds.
///
/// If `dst` lives somewhere below `src`, that subtree is skipped so the copy
/// never recurses into its own output.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|source| copy_err(src, dst, source))?;
    let exclude = dst.canonicalize().ok();
    copy_tree(src, dst, exclude.as_deref())
}

/// Removes `path`, recursively if it is a directory.
pub fn force_delete(path: &Path) -> Result<()> {
    let remove_err = |source| FixtureError::Remove {
        path: path.to_path_buf(),
        source,
    };
    let meta = fs::symlink_metadata(path).map_err(remove_err)?;
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(remove_err)?;
    } else {
        fs::remove_file(path).map_err(remove_err)?;
    }
    debug!(path = %path.display(), "removed");
    Ok(())
}

fn copy_entry(from: &Path, to: &Path, exclude: Option<&Path>) -> Result<()> {
    let meta = fs::metadata(from).map_err(|source| copy_err(from, to, source))?;
    if meta.is_dir() {
        copy_tree(from, to, exclude)
    } else {
        copy_file(from, to, &meta)
    }
}

fn copy_tree(src: &Path, dst: &Path, exclude: Option<&Path>) -> Result<()> {
    fs::create_dir_all(dst).map_err(|source| copy_err(src, dst, source))?;
    let entries = fs::read_dir(src).map_err(|source| copy_err(src, dst, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| copy_err(src, dst, source))?;
        let from = entry.path();
        if let Some(exclude) = exclude {
            if from.canonicalize().is_ok_and(|p| p == exclude) {
                continue;
            }
        }
        copy_entry(&from, &dst.join(entry.file_name()), exclude)?;
    }
    Ok(())
}

fn copy_file(from: &Path, to: &Path, meta: &fs::Metadata) -> Result<()> {
    fs::copy(from, to).map_err(|source| copy_err(from, to, source))?;

    // Some platforms refuse to set times through a read-only handle.
    let mtime = meta
        .modified()
        .and_then(|modified| File::open(to)?.set_modified(modified));
    if let Err(e) = mtime {
        trace!(path = %to.display(), error = %e, "could not preserve modification time");
    }
    Ok(())
}

fn copy_err(from: &Path, to: &Path, source: std::io::Error) -> FixtureError {
    FixtureError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}
