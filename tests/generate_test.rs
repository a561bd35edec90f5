mod common;

use std::fs;
use std::path::Path;

use common::{count_entries, options, write_tree};
use scaffoldr::error::{ConflictKind, Error};
use scaffoldr::loader::TemplateRegistry;
use scaffoldr::prompt::DefaultsPrompter;
use scaffoldr::{generate, GenerateRequest};
use tempfile::TempDir;

/// Lays out `<templates>/fastapi_template` with a docker-tagged Dockerfile.
fn fastapi_template(templates: &Path, manifest: &str) {
    write_tree(
        &templates.join("fastapi_template"),
        &[
            ("scaffoldr.yaml", manifest),
            ("README.md", "# {{project_name}}\n\n{{ description }}\n"),
            ("Dockerfile", "FROM python:{{ python_version }}-slim\n"),
            ("src/{{ project_slug }}/__init__.py", "__version__ = \"0.1.0\"\n"),
            ("pyproject.toml", "[project]\nname = \"{{ project_slug }}\"\n"),
        ],
    );
}

fn request(templates: &Path, destination: &Path, name: &str, docker: bool) -> GenerateRequest {
    GenerateRequest {
        options: options(name, docker),
        destination: Some(destination.to_path_buf()),
        registry: TemplateRegistry::new(templates),
        run_hooks: true,
    }
}

#[test_log::test]
fn test_demo_app_without_docker() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(templates.path(), "conditional:\n  docker: [Dockerfile]\nhooks: []\n");

    let generated = generate(
        request(templates.path(), dest.path(), "Demo App", false),
        &DefaultsPrompter::new(),
    )
    .unwrap();

    let project = dest.path().join("demo_app");
    assert_eq!(generated.project_root, project.canonicalize().unwrap());
    assert_eq!(generated.files, 3);
    assert_eq!(generated.directories, 2);
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.contains("Demo App"));
    assert!(!project.join("Dockerfile").exists());
    assert!(!project.join("scaffoldr.yaml").exists());

    let expected = TempDir::new().unwrap();
    write_tree(
        expected.path(),
        &[
            ("README.md", "# Demo App\n\nA demo service\n"),
            ("src/demo_app/__init__.py", "__version__ = \"0.1.0\"\n"),
            ("pyproject.toml", "[project]\nname = \"demo_app\"\n"),
        ],
    );
    assert!(!dir_diff::is_different(&project, expected.path()).unwrap());
}

#[test]
fn test_demo_app_with_docker() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(templates.path(), "conditional:\n  docker: [Dockerfile]\nhooks: []\n");

    generate(request(templates.path(), dest.path(), "Demo App", true), &DefaultsPrompter::new())
        .unwrap();

    let dockerfile = fs::read_to_string(dest.path().join("demo_app/Dockerfile")).unwrap();
    assert_eq!(dockerfile, "FROM python:3.12-slim\n");
}

#[test]
fn test_second_run_is_a_conflict() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(templates.path(), "hooks: []\n");

    generate(request(templates.path(), dest.path(), "Demo App", true), &DefaultsPrompter::new())
        .unwrap();
    let readme = dest.path().join("demo_app/README.md");
    fs::write(&readme, "edited").unwrap();

    let err = generate(
        request(templates.path(), dest.path(), "Demo App", true),
        &DefaultsPrompter::new(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Conflict(ConflictKind::DestinationExists { .. })));
    assert_eq!(fs::read_to_string(readme).unwrap(), "edited");
}

#[test]
fn test_missing_template_writes_nothing() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let err = generate(
        request(templates.path(), dest.path(), "Demo App", true),
        &DefaultsPrompter::new(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
    assert_eq!(count_entries(dest.path()), 0);
}

#[test]
fn test_render_error_writes_nothing() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(templates.path(), "hooks: []\n");
    write_tree(
        &templates.path().join("fastapi_template"),
        &[("setup.cfg", "name = {{ package_name }}\n")],
    );

    let err = generate(
        request(templates.path(), dest.path(), "Demo App", true),
        &DefaultsPrompter::new(),
    )
    .unwrap_err();

    assert_eq!(err.category(), "render");
    assert_eq!(count_entries(dest.path()), 0);
}

#[cfg(unix)]
#[test]
fn test_hooks_run_in_the_project() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(
        templates.path(),
        "hooks:\n  - [sh, -c, 'ls > listing.txt']\n  - [sh, -c, 'exit 1']\n  - [touch, never]\n",
    );

    let err = generate(
        request(templates.path(), dest.path(), "Demo App", true),
        &DefaultsPrompter::new(),
    )
    .unwrap_err();

    // A failing hook leaves the generated project in place.
    assert!(matches!(err, Error::HookExecution { .. }));
    let project = dest.path().join("demo_app");
    let listing = fs::read_to_string(project.join("listing.txt")).unwrap();
    assert!(listing.contains("README.md"));
    assert!(!project.join("never").exists());
}

#[test]
fn test_hooks_can_be_disabled() {
    let templates = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    fastapi_template(templates.path(), "hooks:\n  - [scaffoldr-no-such-program]\n");

    let mut request = request(templates.path(), dest.path(), "Demo App", true);
    request.run_hooks = false;

    assert!(generate(request, &DefaultsPrompter::new()).is_ok());
}

#[test_log::test]
fn test_default_registry_generates_from_bundled_templates() {
    let dest = TempDir::new().unwrap();
    let request = GenerateRequest {
        options: options("Demo App", false),
        destination: Some(dest.path().to_path_buf()),
        run_hooks: false,
        ..Default::default()
    };

    let generated = generate(request, &DefaultsPrompter::new()).unwrap();

    let project = dest.path().join("demo_app");
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.starts_with("# Demo App\n"));
    assert!(project.join("src/demo_app/main.py").is_file());
    assert!(!project.join("Dockerfile").exists());
    assert!(!project.join("src/demo_app/cloud").exists());
    assert!(generated.files > 0);
}
