use clap::error::ErrorKind;
use clap::Parser;
use scaffoldr::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("scaffoldr")];
    res.extend(args.iter().map(OsString::from));
    res
}

fn generate_args(args: &[&str]) -> scaffoldr::cli::GenerateArgs {
    let parsed = Args::try_parse_from(make_args(args)).unwrap();
    match parsed.command {
        Some(Command::Generate(args)) => args,
        other => panic!("Expected generate command, got {other:?}"),
    }
}

#[test]
fn test_basic_generate() {
    let args = generate_args(&["generate", "My App"]);

    assert_eq!(args.project_name.as_deref(), Some("My App"));
    assert_eq!(args.framework, None);
    assert_eq!(args.docker_flag(), None);
    assert!(!args.no_hooks);
    assert!(!args.no_input);
}

#[test]
fn test_all_options() {
    let args = generate_args(&[
        "generate",
        "demo",
        "-f",
        "flask",
        "--destination",
        "./out",
        "--python-version",
        "3.12",
        "-e",
        "jane@example.com",
        "-n",
        "Jane",
        "-d",
        "Demo project",
        "--no-docker",
        "--use-cloud",
        "--cloud-type",
        "aws",
        "--no-database",
        "--no-hooks",
        "--no-input",
    ]);

    assert_eq!(args.framework.as_deref(), Some("flask"));
    assert_eq!(args.destination, Some(PathBuf::from("./out")));
    assert_eq!(args.python_version.as_deref(), Some("3.12"));

    let raw = args.raw_options();
    assert_eq!(raw.author_email.as_deref(), Some("jane@example.com"));
    assert_eq!(raw.author_name.as_deref(), Some("Jane"));
    assert_eq!(raw.description.as_deref(), Some("Demo project"));
    assert_eq!(raw.docker, Some(false));
    assert_eq!(raw.use_cloud, Some(true));
    assert_eq!(raw.cloud_type.as_deref(), Some("aws"));
    assert_eq!(raw.use_database, Some(false));
    assert!(args.no_hooks);
    assert!(args.no_input);
}

#[test]
fn test_aliases() {
    let args = generate_args(&["generate", "demo", "--dest", "/tmp", "--pv", "3.11"]);
    assert_eq!(args.destination, Some(PathBuf::from("/tmp")));
    assert_eq!(args.python_version.as_deref(), Some("3.11"));
}

#[test]
fn test_last_docker_flag_wins() {
    let args = generate_args(&["generate", "demo", "--no-docker", "--docker"]);
    assert_eq!(args.docker_flag(), Some(true));

    let args = generate_args(&["generate", "demo", "--docker", "--no-docker"]);
    assert_eq!(args.docker_flag(), Some(false));
}

#[test]
fn test_database_type_implies_database() {
    let args = generate_args(&["generate", "demo", "--database-type", "mongodb"]);
    assert_eq!(args.use_database_flag(), Some(true));
    assert_eq!(args.use_cloud_flag(), None);
}

#[test]
fn test_global_flags() {
    let parsed =
        Args::try_parse_from(make_args(&["--no-banner", "--verbose", "version"])).unwrap();
    assert!(parsed.no_banner);
    assert!(parsed.verbose);
    assert!(matches!(parsed.command, Some(Command::Version)));

    let parsed = Args::try_parse_from(make_args(&["generate", "demo", "--no-banner"])).unwrap();
    assert!(parsed.no_banner);
}

#[test]
fn test_short_v_shows_the_version() {
    let err = Args::try_parse_from(make_args(&["-v"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);

    let err = Args::try_parse_from(make_args(&["--version"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn test_no_command() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();
    assert!(parsed.command.is_none());
}

#[test]
fn test_unknown_command() {
    assert!(Args::try_parse_from(make_args(&["deploy"])).is_err());
}
