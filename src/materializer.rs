//! Applies a materialization plan to disk.
//!
//! Generation is create-only: the project directory must not exist
//! beforehand, and if any entry fails the whole project directory is removed
//! again before the error is returned. Nothing is written outside
//! `destination_root/project_slug`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ConflictKind, Error, Result, ValidationKind};
use crate::ignore::to_slash_path;
use crate::processor::{is_rendered_path_valid, MaterializationPlan, PlanEntry};

/// Removes the project directory when dropped, unless disarmed.
struct CleanupGuard {
    path: PathBuf,
    armed: bool,
}

impl CleanupGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("Removing partially generated project {}", self.path.display());
        if let Err(e) = fs::remove_dir_all(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Could not remove '{}': {}", self.path.display(), e);
            }
        }
    }
}

fn materialization_error(path: &Path, source: io::Error) -> Error {
    Error::Materialization { path: path.to_path_buf(), source }
}

/// Joins a plan path onto the project root after checking it stays inside.
fn resolve_target(project_root: &Path, relative: &Path) -> Result<PathBuf> {
    let safe = to_slash_path(relative).is_some_and(|p| is_rendered_path_valid(&p));
    if !safe {
        return Err(materialization_error(
            &project_root.join(relative),
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path escapes the project directory",
            ),
        ));
    }
    Ok(project_root.join(relative))
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn apply_entry(project_root: &Path, entry: &PlanEntry) -> Result<()> {
    let target = resolve_target(project_root, entry.path())?;
    match entry {
        PlanEntry::Directory { .. } => {
            debug!("Creating directory: {}", target.display());
            fs::create_dir_all(&target).map_err(|e| materialization_error(&target, e))
        }
        PlanEntry::File { content, executable, .. } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| materialization_error(parent, e))?;
            }
            debug!("Writing file: {}", target.display());
            fs::write(&target, content.as_bytes())
                .map_err(|e| materialization_error(&target, e))?;
            if *executable {
                set_executable(&target).map_err(|e| materialization_error(&target, e))?;
            }
            Ok(())
        }
    }
}

/// Writes `plan` below `destination_root` and returns the project root.
///
/// # Errors
/// * `ValidationKind::DestinationNotADirectory` if `destination_root` is missing
/// * `ConflictKind::DestinationExists` if the project directory already exists;
///   nothing is written in that case
/// * `Error::Materialization` if an entry cannot be written; the project
///   directory has been removed by the time this is returned
pub fn apply<P: AsRef<Path>>(plan: MaterializationPlan, destination_root: P) -> Result<PathBuf> {
    let destination_root = destination_root.as_ref();
    if !destination_root.is_dir() {
        return Err(ValidationKind::DestinationNotADirectory {
            path: destination_root.to_path_buf(),
        }
        .into());
    }

    let project_root = resolve_target(destination_root, Path::new(plan.project_slug()))?;
    if project_root.exists() {
        return Err(ConflictKind::DestinationExists { path: project_root }.into());
    }

    // `create_dir` fails if someone created the directory since the check.
    fs::create_dir(&project_root).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => {
            Error::Conflict(ConflictKind::DestinationExists { path: project_root.clone() })
        }
        _ => materialization_error(&project_root, e),
    })?;
    let guard = CleanupGuard::new(project_root.clone());

    for entry in plan.entries() {
        apply_entry(&project_root, entry)?;
    }

    guard.disarm();
    let project_root = project_root.canonicalize().unwrap_or(project_root);
    debug!("Materialized {} entries into {}", plan.len(), project_root.display());
    Ok(project_root)
}
