#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use scaffoldr::config::{resolve, RawOptions, ScaffoldConfig};
use scaffoldr::error::{Error, Result};
use scaffoldr::prompt::{DefaultsPrompter, Prompter};

/// Prompter answering from a fixed table and recording what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: HashMap<String, String>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            asked: RefCell::new(Vec::new()),
        }
    }

    fn answer(&self, key: &str) -> Result<String> {
        self.asked.borrow_mut().push(key.to_string());
        self.answers
            .get(key)
            .cloned()
            .ok_or_else(|| Error::PromptError(format!("unexpected question '{key}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, key: &str, _prompt: &str, _default: Option<&str>) -> Result<String> {
        self.answer(key)
    }

    fn confirm(&self, key: &str, _prompt: &str, _default: bool) -> Result<bool> {
        Ok(self.answer(key)? == "y")
    }
}

/// Options with every value given, so nothing is prompted for.
pub fn options(project_name: &str, docker: bool) -> RawOptions {
    RawOptions {
        project_name: Some(project_name.to_string()),
        framework: Some("fastapi".to_string()),
        python_version: Some("3.12".to_string()),
        author_email: Some("jane@example.com".to_string()),
        author_name: Some("Jane Doe".to_string()),
        description: Some("A demo service".to_string()),
        docker: Some(docker),
        use_cloud: Some(false),
        cloud_type: None,
        use_database: Some(false),
        database_type: None,
    }
}

pub fn config(project_name: &str, docker: bool) -> ScaffoldConfig {
    resolve(options(project_name, docker), &DefaultsPrompter::new()).unwrap()
}

/// Writes `files` (relative path, content) below `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Number of entries directly below `dir`.
pub fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}
