//! Template lookup for scaffoldr.
//! Maps a framework to its template, either bundled into the binary or in a
//! templates directory on disk, and loads it into memory.
use crate::config::Framework;
use crate::constants::TEMPLATE_DIR_SUFFIX;
use crate::error::{Error, Result};
use crate::template::TemplateTree;
use log::debug;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};

/// Templates shipped with scaffoldr.
#[derive(RustEmbed)]
#[folder = "templates/"]
struct BundledTemplates;

/// Prefix used when naming bundled templates in messages.
const BUNDLED_PREFIX: &str = "<bundled>";

/// Name of the directory holding a framework's template.
fn template_dir_name(framework: Framework) -> String {
    format!("{}{}", framework.as_str(), TEMPLATE_DIR_SUFFIX)
}

/// Where templates are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    Bundled,
    /// A directory holding `<framework>_template` directories
    Directory(PathBuf),
}

/// Read-only reference to the template of one framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRoot {
    framework: Framework,
    source: TemplateSource,
}

impl TemplateRoot {
    pub fn framework(&self) -> Framework {
        self.framework
    }

    /// Directory of the template on disk; `None` for bundled templates.
    pub fn path(&self) -> Option<PathBuf> {
        match &self.source {
            TemplateSource::Bundled => None,
            TemplateSource::Directory(dir) => Some(dir.join(template_dir_name(self.framework))),
        }
    }

    /// Reads the whole template into memory.
    pub fn load(&self) -> Result<TemplateTree> {
        debug!("Loading {}", self);
        match self.path() {
            Some(path) => TemplateTree::read(path),
            None => {
                let prefix = format!("{}/", template_dir_name(self.framework));
                let files = BundledTemplates::iter().filter_map(|name| {
                    let relative = name.strip_prefix(&prefix)?.to_string();
                    let file = BundledTemplates::get(&name)?;
                    Some((relative, file.data.into_owned()))
                });
                TemplateTree::from_files(files)
            }
        }
    }
}

impl std::fmt::Display for TemplateRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{} template at '{}'", self.framework, path.display()),
            None => write!(f, "bundled {} template", self.framework),
        }
    }
}

/// Static mapping from framework to its template.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    source: TemplateSource,
}

impl TemplateRegistry {
    /// Registry over `<templates_dir>/<framework>_template` directories.
    pub fn new<P: Into<PathBuf>>(templates_dir: P) -> Self {
        Self { source: TemplateSource::Directory(templates_dir.into()) }
    }

    /// Registry over the templates compiled into the binary.
    pub fn bundled() -> Self {
        Self { source: TemplateSource::Bundled }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Location a framework's template is expected at. Existence is not checked.
    pub fn template_path(&self, framework: Framework) -> PathBuf {
        match &self.source {
            TemplateSource::Bundled => {
                Path::new(BUNDLED_PREFIX).join(template_dir_name(framework))
            }
            TemplateSource::Directory(dir) => dir.join(template_dir_name(framework)),
        }
    }

    /// Looks up the template of `framework`.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the template directory does not exist,
    ///   or no bundled template exists for `framework`
    pub fn resolve(&self, framework: Framework) -> Result<TemplateRoot> {
        let path = self.template_path(framework);
        let found = match &self.source {
            TemplateSource::Bundled => {
                let prefix = format!("{}/", template_dir_name(framework));
                BundledTemplates::iter().any(|name| name.starts_with(&prefix))
            }
            TemplateSource::Directory(_) => path.is_dir(),
        };
        if !found {
            return Err(Error::TemplateNotFound { framework: framework.to_string(), path });
        }

        debug!("Using template for {} from {}", framework, path.display());
        Ok(TemplateRoot { framework, source: self.source.clone() })
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        TemplateRegistry::bundled()
    }
}
