//! scaffoldr's main application entry point.
//! Handles command-line argument parsing and dispatches to the commands.

use scaffoldr::{
    banner::show_banner,
    cli::{get_args, print_help, Command, GenerateArgs},
    error::{default_error_handler, Result},
    generate::{generate, print_summary, GenerateRequest},
    loader::TemplateRegistry,
    prompt::{DefaultsPrompter, DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if !args.no_banner {
        show_banner();
    }

    let result = match args.command {
        Some(Command::Generate(generate_args)) => run_generate(generate_args),
        Some(Command::Version) => {
            println!("scaffoldr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            print_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        default_error_handler(err);
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let prompter: Box<dyn Prompter> = if args.no_input {
        Box::new(DefaultsPrompter::new())
    } else {
        Box::new(DialoguerPrompter::new())
    };

    let request = GenerateRequest {
        options: args.raw_options(),
        destination: args.destination.clone(),
        registry: args.templates_dir.clone().map(TemplateRegistry::new).unwrap_or_default(),
        run_hooks: !args.no_hooks,
    };

    let generated = generate(request, &*prompter)?;
    print_summary(&generated);
    Ok(())
}
