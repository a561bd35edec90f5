use scaffoldr::ignore::{build_glob_set, build_ignore_set};

#[test]
fn test_default_ignore_patterns() {
    let glob_set = build_ignore_set::<&str>(&[]).unwrap();
    assert!(glob_set.is_match(".DS_Store"));
    assert!(glob_set.is_match("src/.DS_Store"));
    assert!(glob_set.is_match("src/__pycache__"));
    assert!(glob_set.is_match("src/__pycache__/app.cpython-312.pyc"));
    assert!(glob_set.is_match(".git/HEAD"));
    assert!(!glob_set.is_match(".gitignore"));
    assert!(!glob_set.is_match("src/app.py"));
}

#[test]
fn test_custom_ignore_patterns() {
    let glob_set = build_ignore_set(&["*.log", "build/"]).unwrap();
    assert!(glob_set.is_match("debug.log"));
    assert!(glob_set.is_match("build"));
    assert!(glob_set.is_match("**/.DS_Store"));
}

#[test]
fn test_invalid_pattern() {
    let err = build_glob_set(&["src/{unclosed"], "docker").unwrap_err();
    assert!(err.to_string().contains("docker"));
}

#[test]
fn test_wildcards_do_not_cross_directories() {
    let glob_set = build_glob_set(&["*.log", "templates/*.html"], "verbatim").unwrap();
    assert!(glob_set.is_match("debug.log"));
    assert!(!glob_set.is_match("logs/debug.log"));
    assert!(glob_set.is_match("templates/index.html"));
    assert!(!glob_set.is_match("templates/partials/nav.html"));

    let glob_set = build_glob_set(&["**/*.log"], "ignore").unwrap();
    assert!(glob_set.is_match("logs/debug.log"));
}
