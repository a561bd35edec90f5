//! scaffoldr generates Python web projects from framework templates.
//! It resolves the user's options, renders the framework's template into an
//! in-memory plan, writes the plan to a fresh project directory and runs the
//! post-generation hooks.

/// Startup banner
pub mod banner;

/// Command-line interface module for the scaffoldr application
pub mod cli;

/// Option validation and the resolved scaffold configuration
pub mod config;

/// Common constants and defaults
pub mod constants;

/// Error types and handling for the scaffoldr application
pub mod error;

/// Generation orchestration
pub mod generate;

/// Post-generation hook processing
pub mod hooks;

/// Glob pattern sets for ignored and tagged template entries
pub mod ignore;

/// Framework to template directory lookup
pub mod loader;

/// Template manifest (scaffoldr.json, scaffoldr.yml, scaffoldr.yaml)
pub mod manifest;

/// Writes a materialization plan to disk
pub mod materializer;

/// Builds the materialization plan from a template tree
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Placeholder substitution
pub mod renderer;

/// In-memory template trees
pub mod template;

pub use generate::{generate, GenerateRequest, Generated};
