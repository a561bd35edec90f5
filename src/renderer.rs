//! Placeholder rendering for template paths and file contents.
//! Substitution is plain key replacement: `{{ name }}` becomes the value of
//! `name`. There are no filters, loops or conditionals.
use crate::error::{RenderErrorKind, Result};
use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Trait for placeholder rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Placeholder values by name
    /// * `origin` - Template path the string comes from, used in errors
    ///
    /// # Errors
    /// * `RenderErrorKind::UnknownPlaceholder` for a name missing from `context`
    fn render(
        &self,
        template: &str,
        context: &IndexMap<&'static str, String>,
        origin: &str,
    ) -> Result<String>;
}

/// Regex-based renderer for `{{ identifier }}` tokens.
///
/// Tokens whose inner text is not a plain identifier (`${{ secrets.TOKEN }}`,
/// `{{ value | upper }}`) are left untouched.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    pattern: Regex,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        let pattern = Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is a valid regex");
        Self { pattern }
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        PlaceholderRenderer::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(
        &self,
        template: &str,
        context: &IndexMap<&'static str, String>,
        origin: &str,
    ) -> Result<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }

        // The first unknown token wins; `replace_all` cannot fail early.
        if let Some(unknown) = self
            .pattern
            .captures_iter(template)
            .map(|caps| caps[1].to_string())
            .find(|name| !context.contains_key(name.as_str()))
        {
            return Err(RenderErrorKind::UnknownPlaceholder {
                token: unknown,
                path: origin.to_string(),
            }
            .into());
        }

        let rendered = self.pattern.replace_all(template, |caps: &Captures| {
            context.get(&caps[1]).cloned().unwrap_or_default()
        });
        Ok(rendered.into_owned())
    }
}
