//! Configuration resolution for a generation run.
//! Turns raw command line values (plus prompted answers) into a validated,
//! immutable [`ScaffoldConfig`].

use crate::constants::defaults;
use crate::error::{Result, ValidationKind};
use crate::prompt::Prompter;
use indexmap::IndexMap;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of lowercase identifiers with parsing, display and
/// the list of members used in error messages.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $error:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Members joined with `separator`.
            pub fn choices(separator: &str) -> String {
                Self::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(separator)
            }

            /// Members joined for use in error messages.
            pub fn supported() -> String {
                Self::choices(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationKind;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| ValidationKind::$error {
                        value: s.to_string(),
                        supported: Self::supported(),
                    })
            }
        }
    };
}

closed_set!(
    /// Web frameworks a template exists for.
    Framework, UnsupportedFramework, {
        FastApi => "fastapi",
        Litestar => "litestar",
        Flask => "flask",
        Quartz => "quartz",
        Robyn => "robyn",
    }
);

closed_set!(
    /// Cloud providers a project can be prepared for.
    CloudType, UnsupportedCloudType, {
        Aws => "aws",
        Gcp => "gcp",
        Azure => "azure",
        None => "none",
    }
);

closed_set!(
    /// Database layers a project can be prepared for.
    DatabaseType, UnsupportedDatabaseType, {
        SqlAlchemy => "sqlalchemy",
        MongoDb => "mongodb",
    }
);

/// Options as they arrive from the command line. Anything left as `None` is
/// asked for through the [`Prompter`].
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub project_name: Option<String>,
    pub framework: Option<String>,
    pub python_version: Option<String>,
    pub author_email: Option<String>,
    pub author_name: Option<String>,
    pub description: Option<String>,
    pub docker: Option<bool>,
    pub use_cloud: Option<bool>,
    pub cloud_type: Option<String>,
    pub use_database: Option<bool>,
    pub database_type: Option<String>,
}

/// Validated configuration of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    project_name: String,
    project_slug: String,
    framework: Framework,
    cloud_type: Option<CloudType>,
    database_type: Option<DatabaseType>,
    docker: bool,
    python_version: String,
    author_name: String,
    author_email: String,
    description: String,
}

impl ScaffoldConfig {
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_slug(&self) -> &str {
        &self.project_slug
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn cloud_type(&self) -> Option<CloudType> {
        self.cloud_type
    }

    pub fn database_type(&self) -> Option<DatabaseType> {
        self.database_type
    }

    pub fn docker(&self) -> bool {
        self.docker
    }

    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Values available to `{{ name }}` placeholders, in a stable order.
    ///
    /// Absent cloud and database types render as the empty string and
    /// booleans as `true`/`false`.
    pub fn placeholders(&self) -> IndexMap<&'static str, String> {
        let mut map = IndexMap::new();
        map.insert("project_name", self.project_name.clone());
        map.insert("project_slug", self.project_slug.clone());
        map.insert("framework", self.framework.to_string());
        map.insert(
            "cloud_type",
            self.cloud_type.map(|c| c.to_string()).unwrap_or_default(),
        );
        map.insert(
            "database_type",
            self.database_type.map(|d| d.to_string()).unwrap_or_default(),
        );
        map.insert("use_cloud", self.cloud_type.is_some().to_string());
        map.insert("use_database", self.database_type.is_some().to_string());
        map.insert("use_docker", self.docker.to_string());
        map.insert("python_version", self.python_version.clone());
        map.insert("author_name", self.author_name.clone());
        map.insert("author_email", self.author_email.clone());
        map.insert("description", self.description.clone());
        map
    }
}

/// Derives the directory and package name of a project.
///
/// Lowercases the name and turns spaces and hyphens into underscores.
/// Applying it to its own output changes nothing.
pub fn slugify(project_name: &str) -> String {
    project_name
        .trim()
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '-' => '_',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Checks that the slug works as a directory name and as a Python package
/// name: ASCII lowercase letters, digits and `_`, not starting with a digit.
fn validate_slug(project_name: &str, slug: &str) -> Result<()> {
    let reason = match slug.chars().next() {
        None => Some("it is empty".to_string()),
        Some(first) if first.is_ascii_digit() => {
            Some(format!("the package name '{slug}' starts with a digit"))
        }
        Some(_) => slug
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
            .map(|c| format!("'{}' is not allowed in the package name '{slug}'", c.escape_default())),
    };

    match reason {
        Some(reason) => Err(ValidationKind::InvalidProjectName {
            value: project_name.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

fn text_or_prompt(
    value: Option<String>,
    prompter: &dyn Prompter,
    key: &str,
    prompt: &str,
    default: Option<&str>,
) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompter.text(key, prompt, default),
    }
}

fn flag_or_prompt(
    value: Option<bool>,
    prompter: &dyn Prompter,
    key: &str,
    prompt: &str,
    default: bool,
) -> Result<bool> {
    match value {
        Some(value) => Ok(value),
        None => prompter.confirm(key, prompt, default),
    }
}

/// Resolves raw options into a validated configuration.
///
/// Missing values are taken from `prompter`. The cloud and database types are
/// only asked for when the matching support was requested.
///
/// # Errors
/// * `ValidationKind::UnsupportedFramework` for a framework outside [`Framework::ALL`]
/// * `ValidationKind::UnsupportedCloudType` / `UnsupportedDatabaseType` likewise
/// * `ValidationKind::InvalidProjectName` when the slug is not a usable package name
pub fn resolve(raw: RawOptions, prompter: &dyn Prompter) -> Result<ScaffoldConfig> {
    let project_name =
        text_or_prompt(raw.project_name, prompter, "project_name", "Project name", None)?
            .trim()
            .to_string();
    let project_slug = slugify(&project_name);
    validate_slug(&project_name, &project_slug)?;

    let framework = text_or_prompt(
        raw.framework,
        prompter,
        "framework",
        &format!("Framework ({})", Framework::supported()),
        Some(defaults::FRAMEWORK),
    )?;
    let framework: Framework = framework.parse()?;

    let python_version = text_or_prompt(
        raw.python_version,
        prompter,
        "python_version",
        "Python version",
        Some(defaults::PYTHON_VERSION),
    )?;
    let author_email = text_or_prompt(
        raw.author_email,
        prompter,
        "author_email",
        "Author email address",
        Some(defaults::AUTHOR_EMAIL),
    )?;
    let author_name = text_or_prompt(
        raw.author_name,
        prompter,
        "author_name",
        "Author name",
        Some(defaults::AUTHOR_NAME),
    )?;
    let description = text_or_prompt(
        raw.description,
        prompter,
        "description",
        "Project description",
        Some(defaults::DESCRIPTION),
    )?;
    let docker =
        flag_or_prompt(raw.docker, prompter, "docker", "Include Docker support?", defaults::DOCKER)?;

    let use_cloud = flag_or_prompt(
        raw.use_cloud,
        prompter,
        "use_cloud",
        "Add cloud support?",
        defaults::USE_CLOUD,
    )?;
    let cloud_type = if use_cloud {
        let value = text_or_prompt(
            raw.cloud_type,
            prompter,
            "cloud_type",
            &format!("Cloud type: {}", CloudType::choices(" | ")),
            None,
        )?;
        Some(value.parse::<CloudType>()?)
    } else {
        None
    };

    let use_database = flag_or_prompt(
        raw.use_database,
        prompter,
        "use_database",
        "Add database support?",
        defaults::USE_DATABASE,
    )?;
    let database_type = if use_database {
        let value = text_or_prompt(
            raw.database_type,
            prompter,
            "database_type",
            &format!("Database type: {}", DatabaseType::choices(" | ")),
            None,
        )?;
        Some(value.parse::<DatabaseType>()?)
    } else {
        None
    };

    let config = ScaffoldConfig {
        project_name,
        project_slug,
        framework,
        cloud_type,
        database_type,
        docker,
        python_version,
        author_name,
        author_email,
        description,
    };
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}
