//! User input and interaction handling.
//!
//! The configuration resolver never talks to the terminal directly; it asks a
//! [`Prompter`] for every value the command line left out.

use crate::error::{Error, Result, ValidationKind};
use dialoguer::{Confirm, Input};

/// Source of answers for values missing from the command line.
pub trait Prompter {
    /// Asks for a free text value. `key` names the option being asked for.
    fn text(&self, key: &str, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, key: &str, prompt: &str, default: bool) -> Result<bool>;
}

/// Interactive prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, _key: &str, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn confirm(&self, _key: &str, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Prompter for `--no-input` runs: answers every question with its default.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl DefaultsPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DefaultsPrompter {
    fn text(&self, key: &str, _prompt: &str, default: Option<&str>) -> Result<String> {
        default
            .map(str::to_string)
            .ok_or_else(|| ValidationKind::MissingValue { field: key.to_string() }.into())
    }

    fn confirm(&self, _key: &str, _prompt: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompter_uses_defaults() {
        let prompter = DefaultsPrompter::new();
        assert_eq!(prompter.text("framework", "Framework", Some("fastapi")).unwrap(), "fastapi");
        assert!(prompter.confirm("docker", "Docker?", true).unwrap());
        assert!(!prompter.confirm("use_cloud", "Cloud?", false).unwrap());
    }

    #[test]
    fn defaults_prompter_fails_without_default() {
        let err = DefaultsPrompter::new().text("cloud_type", "Cloud type", None).unwrap_err();
        match err {
            Error::Validation(ValidationKind::MissingValue { field }) => {
                assert_eq!(field, "cloud_type")
            }
            other => panic!("Expected MissingValue, got {other:?}"),
        }
    }
}
