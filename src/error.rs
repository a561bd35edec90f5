//! Error handling for the scaffoldr application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for scaffoldr operations.
///
/// Every failure of a generation run is reported through one of these
/// variants. The CLI maps all of them to exit code 1.
#[derive(Error, Debug)]
pub enum Error {
    /// User supplied options failed validation.
    #[error("Validation error: {0}.")]
    Validation(#[from] ValidationKind),

    /// No template directory exists for the requested framework.
    #[error("Template for framework '{framework}' not found (looked in '{}').", .path.display())]
    TemplateNotFound { framework: String, path: PathBuf },

    /// The destination already holds something we refuse to overwrite.
    #[error("Conflict error: {0}.")]
    Conflict(#[from] ConflictKind),

    /// The template could not be turned into a materialization plan.
    #[error("Render error: {0}.")]
    Render(#[from] RenderErrorKind),

    /// Writing the plan to disk failed. The partial project has been removed.
    #[error("Failed to write '{}': {source}.", .path.display())]
    Materialization {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A post-generation command did not exit successfully.
    #[error("Hook execution error: command `{command}` {exit}.")]
    HookExecution { command: String, exit: String },

    /// Represents errors in the template manifest.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during interactive prompting.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Short, stable name of the error category.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation",
            Error::TemplateNotFound { .. } => "template-not-found",
            Error::Conflict(_) => "conflict",
            Error::Render(_) => "render",
            Error::Materialization { .. } => "materialization",
            Error::HookExecution { .. } => "hook",
            Error::ConfigError(_) => "config",
            Error::PromptError(_) => "prompt",
            Error::IoError(_) => "io",
        }
    }
}

/// Reasons a set of options is rejected by the configuration resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    #[error("framework '{value}' is not supported. Supported frameworks: {supported}")]
    UnsupportedFramework { value: String, supported: String },

    #[error("cloud type '{value}' is not supported. Must be one of: {supported}")]
    UnsupportedCloudType { value: String, supported: String },

    #[error("database type '{value}' is not supported. Must be one of: {supported}")]
    UnsupportedDatabaseType { value: String, supported: String },

    #[error("project name '{value}' is invalid: {reason}")]
    InvalidProjectName { value: String, reason: String },

    #[error("no value given for '{field}'")]
    MissingValue { field: String },

    #[error("destination '{}' is not an existing directory", .path.display())]
    DestinationNotADirectory { path: PathBuf },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    #[error("directory '{}' already exists", .path.display())]
    DestinationExists { path: PathBuf },
}

/// Reasons a template tree cannot be rendered into a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderErrorKind {
    #[error("unknown placeholder '{{{{ {token} }}}}' in '{path}'")]
    UnknownPlaceholder { token: String, path: String },

    #[error("'{path}' renders to the unsafe path '{rendered}'")]
    UnsafePath { path: String, rendered: String },

    #[error("'{path}' renders to '{rendered}', which another entry already produces")]
    DuplicatePath { path: String, rendered: String },

    #[error("'{path}' is neither a regular file nor a directory")]
    UnsupportedEntry { path: String },
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    log::debug!("{} error: {:?}", err.category(), err);
    eprintln!("Error: {err}");
    std::process::exit(1);
}
