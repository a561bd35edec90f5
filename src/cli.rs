//! Command-line interface implementation for scaffoldr.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, ArgAction, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::RawOptions;

/// Command-line arguments structure for scaffoldr.
#[derive(Parser, Debug)]
#[command(
    name = "scaffoldr",
    author,
    version,
    about = "Flask/FastAPI Architecture Application Generator",
    long_about = None,
    disable_version_flag = true
)]
pub struct Args {
    /// Show the version and exit
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Disable the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Enable verbose logging output
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new project with the specified framework
    Generate(GenerateArgs),
    /// Show the version and exit
    Version,
}

/// Options of the `generate` command. Values left out are prompted for.
#[derive(ClapArgs, Debug, Default)]
pub struct GenerateArgs {
    /// Name of the project to generate
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Framework to use (fastapi, litestar, flask, quartz, robyn)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Destination directory for the new project, without the project name
    #[arg(long, visible_alias = "dest")]
    pub destination: Option<PathBuf>,

    /// Python version to use
    #[arg(long, visible_alias = "pv")]
    pub python_version: Option<String>,

    /// Author email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Include Docker support
    #[arg(long, overrides_with = "no_docker")]
    pub docker: bool,

    /// Leave out Docker support
    #[arg(long, overrides_with = "docker")]
    pub no_docker: bool,

    /// Add cloud support
    #[arg(long, overrides_with = "no_cloud")]
    pub use_cloud: bool,

    /// Leave out cloud support
    #[arg(long, overrides_with = "use_cloud")]
    pub no_cloud: bool,

    /// Cloud provider (aws, gcp, azure, none); implies --use-cloud
    #[arg(long)]
    pub cloud_type: Option<String>,

    /// Add database support
    #[arg(long, overrides_with = "no_database")]
    pub use_database: bool,

    /// Leave out database support
    #[arg(long, overrides_with = "use_database")]
    pub no_database: bool,

    /// Database layer (sqlalchemy, mongodb); implies --use-database
    #[arg(long)]
    pub database_type: Option<String>,

    /// Directory holding `<framework>_template` directories, used instead of
    /// the bundled templates
    #[arg(long, env = "SCAFFOLDR_TEMPLATES_DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Do not run the post-generation hooks
    #[arg(long)]
    pub no_hooks: bool,

    /// Never prompt; use defaults for values that were not given
    #[arg(long)]
    pub no_input: bool,
}

/// Collapses a `--flag`/`--no-flag` pair; `None` when neither was given.
fn tri_state(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl GenerateArgs {
    pub fn docker_flag(&self) -> Option<bool> {
        tri_state(self.docker, self.no_docker)
    }

    pub fn use_cloud_flag(&self) -> Option<bool> {
        tri_state(self.use_cloud, self.no_cloud).or(self.cloud_type.as_ref().map(|_| true))
    }

    pub fn use_database_flag(&self) -> Option<bool> {
        tri_state(self.use_database, self.no_database)
            .or(self.database_type.as_ref().map(|_| true))
    }

    /// Options for the configuration resolver.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            project_name: self.project_name.clone(),
            framework: self.framework.clone(),
            python_version: self.python_version.clone(),
            author_email: self.email.clone(),
            author_name: self.name.clone(),
            description: self.description.clone(),
            docker: self.docker_flag(),
            use_cloud: self.use_cloud_flag(),
            cloud_type: self.cloud_type.clone(),
            use_database: self.use_database_flag(),
            database_type: self.database_type.clone(),
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Prints the top-level help, used when no command is given.
pub fn print_help() {
    let _ = Args::command().print_help();
    println!();
}
