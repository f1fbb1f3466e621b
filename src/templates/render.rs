//! Template rendering.
//!
//! Scaffold templates are rendered through [`TemplateRenderer`]; the default
//! implementation is Handlebars with HTML escaping turned off, since the
//! output is Kotlin, XML, and Gradle source rather than markup for a browser.

use std::collections::BTreeMap;

use handlebars::Handlebars;

use crate::error::{DroidsyncError, Result};

/// Substitution variables passed to a template.
pub type RenderContext = BTreeMap<String, String>;

/// Renders template text against a context.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template`; `name` identifies it in error messages.
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String>;
}

/// Handlebars-backed renderer with no auto-escaping.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Create a renderer.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, template: &str, context: &RenderContext) -> Result<String> {
        self.registry
            .render_template(template, context)
            .map_err(|e| DroidsyncError::Render {
                template: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_variables() {
        let renderer = HandlebarsRenderer::new();
        let out = renderer
            .render(
                "t",
                "package {{base_package}}\nclass {{last_package_word_capitalized}}App",
                &ctx(&[
                    ("base_package", "com.example.myapp"),
                    ("last_package_word_capitalized", "Myapp"),
                ]),
            )
            .unwrap();
        assert_eq!(out, "package com.example.myapp\nclass MyappApp");
    }

    #[test]
    fn does_not_escape_markup() {
        let renderer = HandlebarsRenderer::new();
        let out = renderer
            .render("t", "{{value}}", &ctx(&[("value", "<tag attr=\"x\">&</tag>")]))
            .unwrap();
        assert_eq!(out, "<tag attr=\"x\">&</tag>");
    }

    #[test]
    fn unknown_keys_render_empty() {
        let renderer = HandlebarsRenderer::new();
        let out = renderer.render("t", "[{{missing}}]", &ctx(&[])).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn syntax_error_names_template() {
        let renderer = HandlebarsRenderer::new();
        let err = renderer
            .render("app/Main.kt.hbs", "{{#if}}", &ctx(&[]))
            .unwrap_err();
        assert!(matches!(err, DroidsyncError::Render { .. }));
        assert!(err.to_string().contains("app/Main.kt.hbs"));
    }
}
