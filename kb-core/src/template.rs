use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::config::Config;
use crate::layout::{Layout, LayoutError, PageContext};

pub const LAYOUT_TEMPLATE: &str = "layout.html";

const DEFAULT_LAYOUT: &str = include_str!("../theme/layout.html");

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    TeraError(#[from] tera::Error),
}

/// Tera-backed default layout.
///
/// Ships with an embedded `layout.html`; any `.html` file in a theme
/// directory overrides the template of the same relative name.
pub struct TemplateRenderer {
    tera: Tera,
    context: Context,
}

impl TemplateRenderer {
    pub fn new(theme_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_template(LAYOUT_TEMPLATE, DEFAULT_LAYOUT)?;

        if let Some(dir) = theme_dir {
            if dir.is_dir() {
                let files: Vec<_> = WalkDir::new(dir)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| {
                        e.path().is_file() && e.path().extension().map(|ext| ext == "html").unwrap_or(false)
                    })
                    .filter_map(|e| {
                        let name = e
                            .path()
                            .strip_prefix(dir)
                            .ok()?
                            .to_string_lossy()
                            .replace('\\', "/");
                        Some((e.path().to_path_buf(), Some(name)))
                    })
                    .collect();
                tracing::debug!(theme = %dir.display(), templates = files.len(), "Loading theme templates");
                tera.add_template_files(files)?;
            } else {
                tracing::warn!(theme = %dir.display(), "Theme directory not found, using built-in layout");
            }
        }

        let mut renderer = Self {
            tera,
            context: Context::new(),
        };
        renderer.set_site_config(&Config::default());
        Ok(renderer)
    }

    pub fn with_default_theme() -> Result<Self, TemplateError> {
        Self::new(None)
    }

    /// Pass the framework-facing settings through to every template.
    pub fn set_site_config(&mut self, config: &Config) {
        self.add_to_context("site", &config.site);
        self.add_to_context("theme", &config.theme);
        self.add_to_context("markdown", &config.markdown);
        self.add_to_context("search", &config.search);
    }

    /// Add a value to the global template context
    pub fn add_to_context<T: Serialize>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }

    /// Render a template with the global context
    pub fn render_template(&self, template: &str) -> Result<String, TemplateError> {
        Ok(self.tera.render(template, &self.context)?)
    }

    /// Render a template with an external context layered over the global one
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String, TemplateError> {
        let mut merged = self.context.clone();
        merged.extend(context.clone());
        Ok(self.tera.render(template, &merged)?)
    }
}

impl Layout for TemplateRenderer {
    fn render(&self, page: &PageContext<'_>) -> Result<String, LayoutError> {
        let mut context = Context::new();
        context.insert("page", page);
        Ok(self.render_with_context(LAYOUT_TEMPLATE, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_global_context_is_available() {
        let mut renderer = TemplateRenderer::with_default_theme().unwrap();
        renderer
            .tera
            .add_raw_template("greet.txt", "{{ greeting }} {{ name }} {{ site.lang }}")
            .unwrap();
        renderer.add_to_context("greeting", &"hi");

        let mut context = Context::new();
        context.insert("name", "kb");
        let out = renderer.render_with_context("greet.txt", &context).unwrap();
        assert_eq!(out, "hi kb en");
    }

    #[test]
    fn test_theme_dir_overrides_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("layout.html"), "<p>{{ site.title }}</p>").unwrap();

        let mut renderer = TemplateRenderer::new(Some(dir.path())).unwrap();
        let mut config = Config::default();
        config.site.title = "Notes".into();
        renderer.set_site_config(&config);

        assert_eq!(renderer.render_template(LAYOUT_TEMPLATE).unwrap(), "<p>Notes</p>");
    }

    #[test]
    fn test_missing_theme_dir_falls_back() {
        let renderer = TemplateRenderer::new(Some(Path::new("/no/such/theme"))).unwrap();
        assert!(renderer.tera.get_template_names().any(|n| n == LAYOUT_TEMPLATE));
    }

    #[test]
    fn test_broken_theme_template_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("layout.html"), "{% if %}").unwrap();

        assert!(matches!(
            TemplateRenderer::new(Some(dir.path())),
            Err(TemplateError::TeraError(_))
        ));
    }
}
