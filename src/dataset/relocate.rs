//! Filesystem primitives for relocating sample directories.
//!
//! A sample directory is an opaque blob: the whole tree travels from
//! origin to destination without its contents being inspected.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::utils::error::{FoldError, Result};

/// How sample directories travel from origin to fold output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelocateMode {
    /// Recursive copy; the origin tree is left untouched.
    #[default]
    Copy,
    /// Destructive move: the origin directory is consumed. Not
    /// idempotent, and a failure mid-run leaves origin and destination
    /// both partially populated with no automatic reconciliation.
    Move,
}

impl RelocateMode {
    pub fn is_destructive(self) -> bool {
        matches!(self, RelocateMode::Move)
    }
}

/// Relocates the tree at `src` to `dest`.
///
/// Fails with [`FoldError::DestinationConflict`] if `dest` already
/// exists, before anything is written.
pub fn relocate_tree(src: &Path, dest: &Path, mode: RelocateMode) -> Result<()> {
    if dest.exists() {
        return Err(FoldError::DestinationConflict(dest.to_path_buf()));
    }

    match mode {
        RelocateMode::Copy => copy_tree(src, dest),
        RelocateMode::Move => move_tree(src, dest),
    }
}

/// Recursively copies `src` into a freshly created `dest`.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walked path is under its root");
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn move_tree(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        // rename cannot cross filesystems
        Err(_) => {
            copy_tree(src, dest)?;
            fs::remove_dir_all(src)?;
            Ok(())
        }
    }
}
