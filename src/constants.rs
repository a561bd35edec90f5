//! Common constants used throughout the scaffoldr application.

/// Supported template manifest file names, tried in order
pub const MANIFEST_FILES: [&str; 3] = ["scaffoldr.json", "scaffoldr.yml", "scaffoldr.yaml"];

/// Suffix appended to a framework name to form its template directory name
pub const TEMPLATE_DIR_SUFFIX: &str = "_template";

/// Patterns that are never copied into a generated project
pub const DEFAULT_IGNORE_PATTERNS: [&str; 6] = [
    "**/.DS_Store",
    "**/.git",
    "**/.git/**",
    "**/__pycache__",
    "**/__pycache__/**",
    "**/*.pyc",
];

/// Commands run inside a freshly generated project when the template
/// manifest declares no hooks of its own
pub const DEFAULT_HOOKS: [&[&str]; 3] = [
    &["uv", "sync", "--quiet"],
    &["uv", "run", "ruff", "format", ".", "--silent"],
    &["uv", "run", "ruff", "check", ".", "--unsafe-fixes", "--silent"],
];

/// Defaults offered when a value is prompted for
pub mod defaults {
    pub const FRAMEWORK: &str = "fastapi";
    pub const DESTINATION: &str = ".";
    pub const PYTHON_VERSION: &str = "3.11";
    pub const AUTHOR_EMAIL: &str = "example@example.com";
    pub const AUTHOR_NAME: &str = "John Doe";
    pub const DESCRIPTION: &str = "A FastAPI application";
    pub const DOCKER: bool = true;
    pub const USE_CLOUD: bool = false;
    pub const USE_DATABASE: bool = false;
}
