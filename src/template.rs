//! In-memory snapshot of a template root.
//!
//! Reading the whole tree up front keeps rendering a pure function of its
//! inputs: once a [`TemplateTree`] exists, nothing touches the disk until the
//! materializer runs.

use crate::constants::MANIFEST_FILES;
use crate::error::{Error, RenderErrorKind, Result};
use crate::ignore::to_slash_path;
use crate::manifest::{compile_manifest, load_manifest, TemplateManifest};
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind and payload of one template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File { bytes: Vec<u8>, executable: bool },
}

/// A file or directory of the template, relative to the template root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

impl TemplateEntry {
    pub fn directory<P: Into<PathBuf>>(relative: P) -> Self {
        Self { relative: relative.into(), kind: EntryKind::Directory }
    }

    pub fn file<P: Into<PathBuf>, B: Into<Vec<u8>>>(relative: P, bytes: B) -> Self {
        Self {
            relative: relative.into(),
            kind: EntryKind::File { bytes: bytes.into(), executable: false },
        }
    }

    /// Same entry with the executable bit set.
    pub fn executable(mut self) -> Self {
        if let EntryKind::File { executable, .. } = &mut self.kind {
            *executable = true;
        }
        self
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

/// All entries of a template plus its compiled manifest.
#[derive(Debug, Clone)]
pub struct TemplateTree {
    manifest: TemplateManifest,
    entries: Vec<TemplateEntry>,
}

impl TemplateTree {
    /// Builds a tree from already collected entries.
    ///
    /// Entries are sorted component-wise, which puts every directory before
    /// its children.
    pub fn new(manifest: TemplateManifest, mut entries: Vec<TemplateEntry>) -> Self {
        entries.sort_by(|a, b| a.relative.cmp(&b.relative));
        Self { manifest, entries }
    }

    /// Reads the template at `root`: its manifest and every entry below it.
    ///
    /// # Errors
    /// * `RenderErrorKind::UnsupportedEntry` for symlinks and special files
    /// * `Error::IoError` when the tree cannot be read
    pub fn read<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let manifest = load_manifest(root)?;
        let mut entries = Vec::new();

        for dir_entry in WalkDir::new(root).min_depth(1).follow_links(false).sort_by_file_name() {
            let dir_entry = dir_entry.map_err(std::io::Error::from)?;
            let relative = dir_entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| dir_entry.path().to_path_buf());
            let file_type = dir_entry.file_type();

            let entry = if file_type.is_dir() {
                TemplateEntry::directory(relative)
            } else if file_type.is_file() {
                let bytes = fs::read(dir_entry.path())?;
                let mut entry = TemplateEntry::file(relative, bytes);
                if is_executable(dir_entry.path())? {
                    entry = entry.executable();
                }
                entry
            } else {
                return Err(RenderErrorKind::UnsupportedEntry {
                    path: to_slash_path(&relative)
                        .unwrap_or_else(|| relative.display().to_string()),
                }
                .into());
            };
            entries.push(entry);
        }

        debug!("Read {} template entries from {}", entries.len(), root.display());
        Ok(Self::new(manifest, entries))
    }

    /// Builds a tree from `/` separated file paths and their contents, as
    /// stored in the bundled templates. Directories are implied by the file
    /// paths, and the manifest is picked from the files.
    pub fn from_files<I>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let mut directories = BTreeSet::new();
        let mut entries = Vec::new();

        for (name, bytes) in files {
            let relative: PathBuf = name.split('/').collect();
            let mut parent = relative.parent();
            while let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
                directories.insert(dir.to_path_buf());
                parent = dir.parent();
            }
            entries.push(TemplateEntry::file(relative, bytes));
        }

        let manifest_entry = MANIFEST_FILES.iter().find_map(|file| {
            entries.iter().find(|e| e.relative == Path::new(file)).map(|e| (*file, e))
        });
        let manifest = match manifest_entry {
            Some((file, TemplateEntry { kind: EntryKind::File { bytes, .. }, .. })) => {
                debug!("Loading bundled manifest {file}");
                let content = std::str::from_utf8(bytes).map_err(|e| {
                    Error::ConfigError(format!("manifest '{file}' is not valid UTF-8: {e}"))
                })?;
                compile_manifest(content, file)?
            }
            _ => TemplateManifest::default(),
        };

        entries.extend(directories.into_iter().map(TemplateEntry::directory));
        debug!("Collected {} bundled template entries", entries.len());
        Ok(Self::new(manifest, entries))
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> Result<bool> {
    Ok(false)
}
