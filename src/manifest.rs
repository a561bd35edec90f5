//! Template manifest handling.
//!
//! A template root may carry a `scaffoldr.json`, `scaffoldr.yml` or
//! `scaffoldr.yaml` file that tags entries for conditional inclusion, lists
//! extra ignore patterns, marks files to copy without substitution and
//! declares the post-generation hooks.
//!
//! Patterns see template paths before substitution. Glob syntax treats `{`
//! as alternation, so placeholder directories are matched with wildcards.
//! `*` never crosses a `/`; use `**` for that.
//!
//! The `cloud` tag is off when the cloud type is `none`; `cloud.none` can
//! still select entries for that case.
//!
//! ```yaml
//! conditional:
//!   docker: ["Dockerfile", "docker-compose.yml", ".dockerignore"]
//!   cloud: ["src/*/cloud"]
//!   database.mongodb: ["src/*/db/mongo.py"]
//! ignore: ["**/*.log"]
//! verbatim: ["src/**/templates/*.html"]
//! hooks:
//!   - ["uv", "sync", "--quiet"]
//! ```

use crate::config::{CloudType, DatabaseType, ScaffoldConfig};
use crate::constants::{DEFAULT_HOOKS, MANIFEST_FILES};
use crate::error::{Error, Result};
use crate::hooks::Hook;
use crate::ignore::{build_glob_set, build_ignore_set};
use globset::GlobSet;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Raw manifest as written by template authors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    /// Feature tag -> patterns of entries that depend on it
    #[serde(default)]
    pub conditional: IndexMap<String, Vec<String>>,

    /// Extra patterns of entries that are never copied
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Patterns of text files copied without placeholder substitution
    #[serde(default)]
    pub verbatim: Vec<String>,

    /// Post-generation commands; `None` selects the built-in list
    #[serde(default)]
    pub hooks: Option<Vec<Vec<String>>>,
}

/// Condition a tagged entry depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTag {
    Docker,
    Cloud,
    CloudType(CloudType),
    Database,
    DatabaseType(DatabaseType),
}

impl FeatureTag {
    /// Whether entries carrying this tag belong in a project built from `config`.
    pub fn is_enabled(&self, config: &ScaffoldConfig) -> bool {
        match self {
            FeatureTag::Docker => config.docker(),
            FeatureTag::Cloud => {
                config.cloud_type().is_some_and(|cloud| cloud != CloudType::None)
            }
            FeatureTag::CloudType(wanted) => config.cloud_type() == Some(*wanted),
            FeatureTag::Database => config.database_type().is_some(),
            FeatureTag::DatabaseType(wanted) => config.database_type() == Some(*wanted),
        }
    }
}

impl FromStr for FeatureTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::ConfigError(format!(
                "unknown feature tag '{s}' (expected docker, cloud, cloud.<type>, database or database.<type>)"
            ))
        };
        match s.split_once('.') {
            None => match s {
                "docker" => Ok(FeatureTag::Docker),
                "cloud" => Ok(FeatureTag::Cloud),
                "database" => Ok(FeatureTag::Database),
                _ => Err(invalid()),
            },
            Some(("cloud", value)) => {
                value.parse().map(FeatureTag::CloudType).map_err(|_| invalid())
            }
            Some(("database", value)) => {
                value.parse().map(FeatureTag::DatabaseType).map_err(|_| invalid())
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureTag::Docker => write!(f, "docker"),
            FeatureTag::Cloud => write!(f, "cloud"),
            FeatureTag::CloudType(cloud) => write!(f, "cloud.{cloud}"),
            FeatureTag::Database => write!(f, "database"),
            FeatureTag::DatabaseType(database) => write!(f, "database.{database}"),
        }
    }
}

/// Compiled manifest, ready to be matched against template paths.
#[derive(Debug, Clone)]
pub struct TemplateManifest {
    conditional: Vec<(FeatureTag, GlobSet)>,
    ignore: GlobSet,
    verbatim: GlobSet,
    hooks: Vec<Hook>,
    file_name: Option<String>,
}

impl TemplateManifest {
    /// Compiles a raw manifest. `file_name` is the manifest's own name inside
    /// the template root, which is never copied.
    pub fn compile(raw: ManifestFile, file_name: Option<String>) -> Result<Self> {
        let conditional = raw
            .conditional
            .iter()
            .map(|(tag, patterns)| -> Result<(FeatureTag, GlobSet)> {
                let tag: FeatureTag = tag.parse()?;
                let set = build_glob_set(patterns, &format!("'{tag}' conditional"))?;
                Ok((tag, set))
            })
            .collect::<Result<Vec<_>>>()?;

        let hooks = match raw.hooks {
            Some(hooks) => hooks
                .into_iter()
                .map(Hook::from_argv)
                .collect::<Result<Vec<_>>>()?,
            None => DEFAULT_HOOKS
                .iter()
                .map(|argv| Hook::from_argv(argv.iter().map(|s| s.to_string()).collect()))
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            conditional,
            ignore: build_ignore_set(&raw.ignore)?,
            verbatim: build_glob_set(&raw.verbatim, "verbatim")?,
            hooks,
            file_name,
        })
    }

    /// Whether the entry at `relative` (slash separated) is never copied.
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.file_name.as_deref() == Some(relative) || self.ignore.is_match(relative)
    }

    /// First feature tag whose flag excludes `relative` from `config`, if any.
    pub fn excluding_tag(&self, relative: &str, config: &ScaffoldConfig) -> Option<FeatureTag> {
        self.conditional
            .iter()
            .find(|(tag, set)| set.is_match(relative) && !tag.is_enabled(config))
            .map(|(tag, _)| *tag)
    }

    /// Whether the file at `relative` is copied without substitution.
    pub fn is_verbatim(&self, relative: &str) -> bool {
        self.verbatim.is_match(relative)
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }
}

impl Default for TemplateManifest {
    fn default() -> Self {
        // The defaults are constants that always compile.
        Self::compile(ManifestFile::default(), None).unwrap_or_else(|e| {
            unreachable!("built-in manifest defaults failed to compile: {e}")
        })
    }
}

/// Parses manifest content. JSON is tried first, then YAML.
pub fn parse_manifest(content: &str) -> Result<ManifestFile> {
    match serde_json::from_str(content) {
        Ok(manifest) => Ok(manifest),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid manifest format: {e}"))),
    }
}

/// Parses and compiles the content of the manifest file `file_name`.
pub fn compile_manifest(content: &str, file_name: &str) -> Result<TemplateManifest> {
    let raw = parse_manifest(content)?;
    TemplateManifest::compile(raw, Some(file_name.to_string()))
}

/// Loads and compiles the manifest of `template_root`. A template without a
/// manifest gets the defaults.
pub fn load_manifest<P: AsRef<Path>>(template_root: P) -> Result<TemplateManifest> {
    for file in MANIFEST_FILES {
        let manifest_path = template_root.as_ref().join(file);
        if manifest_path.is_file() {
            debug!("Loading manifest from {}", manifest_path.display());
            let content = std::fs::read_to_string(&manifest_path)?;
            return compile_manifest(&content, file);
        }
    }

    debug!("No manifest found (tried: {})", MANIFEST_FILES.join(", "));
    TemplateManifest::compile(ManifestFile::default(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_tags_parse() {
        assert_eq!("docker".parse::<FeatureTag>().unwrap(), FeatureTag::Docker);
        assert_eq!(
            "cloud.aws".parse::<FeatureTag>().unwrap(),
            FeatureTag::CloudType(CloudType::Aws)
        );
        assert_eq!(
            "database.mongodb".parse::<FeatureTag>().unwrap(),
            FeatureTag::DatabaseType(DatabaseType::MongoDb)
        );
        assert!("cloud.heroku".parse::<FeatureTag>().is_err());
        assert!("kubernetes".parse::<FeatureTag>().is_err());
    }

    #[test]
    fn cloud_type_none_disables_the_cloud_tag() {
        use crate::config::{resolve, RawOptions};
        use crate::prompt::DefaultsPrompter;

        let config = |cloud_type: &str| {
            let raw = RawOptions {
                project_name: Some("Demo".to_string()),
                use_cloud: Some(true),
                cloud_type: Some(cloud_type.to_string()),
                ..Default::default()
            };
            resolve(raw, &DefaultsPrompter::new()).unwrap()
        };

        assert!(FeatureTag::Cloud.is_enabled(&config("aws")));
        assert!(!FeatureTag::Cloud.is_enabled(&config("none")));
        assert!(FeatureTag::CloudType(CloudType::None).is_enabled(&config("none")));
    }

    #[test]
    fn parse_manifest_accepts_json_and_yaml() {
        let json = parse_manifest(r#"{"conditional": {"docker": ["Dockerfile"]}}"#).unwrap();
        assert_eq!(json.conditional["docker"], vec!["Dockerfile".to_string()]);

        let yaml = parse_manifest("ignore:\n  - '*.log'\nhooks: []\n").unwrap();
        assert_eq!(yaml.ignore, vec!["*.log".to_string()]);
        assert_eq!(yaml.hooks, Some(vec![]));
    }

    #[test]
    fn parse_manifest_rejects_unknown_keys() {
        assert!(parse_manifest("templates: []\n").is_err());
    }

    #[test]
    fn default_manifest_uses_default_hooks() {
        let manifest = TemplateManifest::default();
        assert_eq!(manifest.hooks().len(), DEFAULT_HOOKS.len());
        assert_eq!(manifest.hooks()[0].to_string(), "uv sync --quiet");
        assert!(manifest.is_ignored("pkg/__pycache__/mod.cpython-311.pyc"));
    }
}
