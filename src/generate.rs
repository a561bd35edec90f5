//! Core generation orchestration.
//! Combines all components: configuration, template lookup, rendering,
//! materialization and post-generation hooks.

use std::path::PathBuf;

use console::style;
use log::debug;

use crate::config::{resolve, RawOptions, ScaffoldConfig};
use crate::constants::defaults;
use crate::error::Result;
use crate::hooks::run_hooks;
use crate::loader::TemplateRegistry;
use crate::materializer::apply;
use crate::processor::{render, PlanEntry};
use crate::prompt::Prompter;

/// Everything a `generate` run needs besides the prompter.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub options: RawOptions,
    /// Directory the project directory is created in; prompted for when `None`
    pub destination: Option<PathBuf>,
    pub registry: TemplateRegistry,
    pub run_hooks: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub config: ScaffoldConfig,
    pub project_root: PathBuf,
    pub directories: usize,
    pub files: usize,
}

/// Generates a project.
///
/// # Flow
/// 1. Resolves and validates the configuration
/// 2. Looks up the framework's template
/// 3. Renders the template into an in-memory plan
/// 4. Materializes the plan below the destination
/// 5. Runs the post-generation hooks, if enabled
///
/// Steps 1 to 3 never touch the destination. A failure in step 4 leaves no
/// project directory behind; a failure in step 5 leaves the generated files.
pub fn generate(request: GenerateRequest, prompter: &dyn Prompter) -> Result<Generated> {
    let config = resolve(request.options, prompter)?;
    let destination = match request.destination {
        Some(destination) => destination,
        None => PathBuf::from(prompter.text(
            "destination",
            "Destination directory (without the project name)",
            Some(defaults::DESTINATION),
        )?),
    };

    let template_root = request.registry.resolve(config.framework())?;
    let tree = template_root.load()?;
    let plan = render(&tree, &config)?;

    let directories =
        plan.entries().iter().filter(|e| matches!(e, PlanEntry::Directory { .. })).count();
    let files = plan.len() - directories;

    println!(
        "{}",
        style(format!(
            "Generating {} with {} framework...",
            config.project_name(),
            config.framework()
        ))
        .green()
    );
    let project_root = apply(plan, &destination)?;
    debug!("Generated {} directories and {} files", directories, files);

    if request.run_hooks {
        run_hooks(tree.manifest().hooks(), &project_root)?;
    } else {
        debug!("Post-generation hooks disabled");
    }

    Ok(Generated { config, project_root, directories, files })
}

/// Prints the success message and next steps of a finished run.
pub fn print_summary(generated: &Generated) {
    let config = &generated.config;
    println!(
        "{}",
        style(format!("Project '{}' generated successfully!", config.project_name()))
            .green()
            .bold()
    );
    println!(
        "{} cd {}",
        style("Change to the project directory:").blue(),
        generated.project_root.display()
    );
    println!("{} uv sync", style("Install dependencies:").blue());
    println!("{} {} dev", style("Run the application:").blue(), config.project_slug());
}
