//! Turns a template tree and a configuration into a materialization plan.
//!
//! This is a pure transform: paths and contents are computed in memory and
//! nothing is written. The [`crate::materializer`] applies the result.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::config::ScaffoldConfig;
use crate::error::{RenderErrorKind, Result};
use crate::ignore::to_slash_path;
use crate::renderer::{PlaceholderRenderer, TemplateRenderer};
use crate::template::{EntryKind, TemplateTree};

/// Content of a planned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// UTF-8 content with placeholders already substituted
    Text(String),
    /// Anything else, copied byte for byte
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }

    /// Decides once per file whether it is text: valid UTF-8 is text.
    pub fn classify(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(e) => FileContent::Binary(e.into_bytes()),
        }
    }
}

/// One step of a materialization plan. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEntry {
    Directory { path: PathBuf },
    File { path: PathBuf, content: FileContent, executable: bool },
}

impl PlanEntry {
    pub fn directory<P: Into<PathBuf>>(path: P) -> Self {
        PlanEntry::Directory { path: path.into() }
    }

    pub fn file<P: Into<PathBuf>>(path: P, content: FileContent) -> Self {
        PlanEntry::File { path: path.into(), content, executable: false }
    }

    pub fn path(&self) -> &Path {
        match self {
            PlanEntry::Directory { path } | PlanEntry::File { path, .. } => path,
        }
    }
}

/// Ordered list of everything to create for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationPlan {
    project_slug: String,
    entries: Vec<PlanEntry>,
}

impl MaterializationPlan {
    pub fn new<S: Into<String>>(project_slug: S, entries: Vec<PlanEntry>) -> Self {
        Self { project_slug: project_slug.into(), entries }
    }

    /// Name of the project directory the plan is applied under.
    pub fn project_slug(&self) -> &str {
        &self.project_slug
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the plan creates `path` (relative to the project root).
    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries.iter().any(|e| e.path() == path.as_ref())
    }

    /// Looks up the planned file at `path`.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileContent> {
        self.entries.iter().find_map(|e| match e {
            PlanEntry::File { path: p, content, .. } if p == path.as_ref() => Some(content),
            _ => None,
        })
    }

    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }
}

/// Checks that a rendered path component can be used as-is.
pub fn is_rendered_component_valid(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['/', '\\', '\0'])
}

/// Checks that a slash separated rendered path stays inside the project.
pub fn is_rendered_path_valid(path: &str) -> bool {
    !path.is_empty() && path.split('/').all(is_rendered_component_valid)
}

/// Renders each component of `origin` separately so substitution can never
/// introduce a separator.
fn render_path(
    renderer: &dyn TemplateRenderer,
    context: &IndexMap<&'static str, String>,
    origin: &str,
) -> Result<PathBuf> {
    let parts = origin
        .split('/')
        .map(|component| renderer.render(component, context, origin))
        .collect::<Result<Vec<_>>>()?;

    if !parts.iter().all(|p| is_rendered_component_valid(p)) {
        return Err(RenderErrorKind::UnsafePath {
            path: origin.to_string(),
            rendered: parts.join("/"),
        }
        .into());
    }

    Ok(parts.iter().collect())
}

/// Builds the plan for `config` from `tree` using the default placeholder
/// renderer.
pub fn render(tree: &TemplateTree, config: &ScaffoldConfig) -> Result<MaterializationPlan> {
    render_with(&PlaceholderRenderer::new(), tree, config)
}

/// Builds the plan for `config` from `tree`.
///
/// Entries are visited in tree order. Ignored entries and entries whose
/// feature tag is disabled are dropped together with everything below them.
///
/// # Errors
/// * `RenderErrorKind::UnknownPlaceholder` for a token with no value
/// * `RenderErrorKind::UnsafePath` when a rendered path would leave the project
/// * `RenderErrorKind::DuplicatePath` when two entries render to one path
pub fn render_with(
    renderer: &dyn TemplateRenderer,
    tree: &TemplateTree,
    config: &ScaffoldConfig,
) -> Result<MaterializationPlan> {
    let manifest = tree.manifest();
    let context = config.placeholders();
    let mut skipped_dirs: Vec<&Path> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut entries = Vec::new();

    for entry in tree.entries() {
        let relative = entry.relative.as_path();
        if skipped_dirs.iter().any(|dir| relative.starts_with(dir)) {
            continue;
        }

        let origin = to_slash_path(relative).ok_or_else(|| RenderErrorKind::UnsafePath {
            path: relative.display().to_string(),
            rendered: relative.display().to_string(),
        })?;

        let skip_reason = if manifest.is_ignored(&origin) {
            Some("ignored".to_string())
        } else {
            manifest
                .excluding_tag(&origin, config)
                .map(|tag| format!("'{tag}' is disabled"))
        };
        if let Some(reason) = skip_reason {
            debug!("Skipping {origin}: {reason}");
            if entry.is_dir() {
                skipped_dirs.push(relative);
            }
            continue;
        }

        let path = render_path(renderer, &context, &origin)?;
        debug!("Rendered {origin} -> {}", path.display());

        if !seen.insert(path.clone()) {
            return Err(RenderErrorKind::DuplicatePath {
                path: origin,
                rendered: path.display().to_string(),
            }
            .into());
        }

        let planned = match &entry.kind {
            EntryKind::Directory => PlanEntry::Directory { path },
            EntryKind::File { bytes, executable } => {
                let content = match FileContent::classify(bytes.clone()) {
                    FileContent::Text(text) if !manifest.is_verbatim(&origin) => {
                        FileContent::Text(renderer.render(&text, &context, &origin)?)
                    }
                    other => other,
                };
                PlanEntry::File { path, content, executable: *executable }
            }
        };
        entries.push(planned);
    }

    debug!("Planned {} entries for '{}'", entries.len(), config.project_slug());
    Ok(MaterializationPlan::new(config.project_slug(), entries))
}
