use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::layout::{LayoutError, PageContent, PageDecorator};
use crate::links::{LinkCheckReport, check_links};
use crate::scanner::{ContentScanner, ContentTree, Document, ScanError};
use crate::template::{TemplateError, TemplateRenderer};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Content directory not specified")]
    MissingContentDir,
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Layout error for {}: {source}", .path.display())]
    Layout {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub struct SiteBuilder {
    content_dir: Option<PathBuf>,
    output_dir: PathBuf,
    theme_dir: Option<PathBuf>,
    config: Config,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            content_dir: None,
            output_dir: PathBuf::from("./out"),
            theme_dir: None,
            config: Config::default(),
        }
    }

    // Required configuration
    pub fn content_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.content_dir = Some(path.as_ref().to_path_buf());
        self
    }

    // Optional paths
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn theme_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.theme_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Scan content, freeze the registry and load the layout.
    ///
    /// Registry errors surface here, before any page is rendered.
    pub fn build(self) -> Result<Site, BuildError> {
        let content_dir = self.content_dir.ok_or(BuildError::MissingContentDir)?;

        let registry = self.config.registry()?;
        let tree = ContentScanner::new(&content_dir).scan()?;

        let mut renderer = TemplateRenderer::new(self.theme_dir.as_deref())?;
        renderer.set_site_config(&self.config);

        let decorator =
            PageDecorator::new(registry, renderer).home_label(self.config.breadcrumb.home_label.clone());

        Ok(Site {
            tree,
            decorator,
            output_dir: self.output_dir,
        })
    }
}

pub struct Site {
    tree: ContentTree,
    decorator: PageDecorator<TemplateRenderer>,
    output_dir: PathBuf,
}

impl Site {
    pub fn documents(&self) -> &[Document] {
        self.tree.documents()
    }

    pub fn decorator(&self) -> &PageDecorator<TemplateRenderer> {
        &self.decorator
    }

    pub fn check_links(&self) -> LinkCheckReport {
        check_links(self.decorator.registry(), &self.tree)
    }

    fn render_document(&self, document: &Document) -> Result<(), RenderError> {
        let body = std::fs::read_to_string(&document.source)?;
        let page = self
            .decorator
            .render_page(&document.route.to_string(), &PageContent::from(body))
            .map_err(|source| RenderError::Layout {
                path: document.source.clone(),
                source,
            })?;

        let output_path = self.output_dir.join(document.route.out_path());
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, page.html)?;

        Ok(())
    }

    /// Render every document into `<output>/<route>/index.html`.
    pub fn render_all(&self) -> Result<usize, RenderError> {
        std::fs::create_dir_all(&self.output_dir)?;

        for document in self.tree.documents() {
            self.render_document(document)?;
        }

        tracing::info!(
            pages = self.tree.len(),
            output = %self.output_dir.display(),
            "Site rendered"
        );
        Ok(self.tree.len())
    }
}
