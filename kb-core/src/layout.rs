//! Page layout decoration.
//!
//! [`PageDecorator`] wraps a base [`Layout`] and fills its `doc_before` slot
//! with a breadcrumb strip computed from the page route. Everything else about
//! the page (header, sidebar markup, footer) is the base layout's business.

use serde::Serialize;

use crate::breadcrumb::{BreadcrumbItem, DEFAULT_HOME_LABEL, breadcrumbs, render_breadcrumbs};
use crate::nav::{NavEntry, SidebarGroup};
use crate::registry::SiteRegistry;
use crate::route::{PathError, RoutePath};
use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid page path: {0}")]
    Path(#[from] PathError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Opaque page body, already rendered by whatever produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent(String);

impl PageContent {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PageContent {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PageContent {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Named regions a base layout renders around the document body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutSlots {
    /// Rendered immediately before the document body.
    pub doc_before: String,
}

/// Everything a base layout gets for one page.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub route: &'a RoutePath,
    pub title: Option<&'a str>,
    pub nav: &'a [NavEntry],
    pub active_nav: Option<&'a NavEntry>,
    pub sidebar: &'a [SidebarGroup],
    pub slots: LayoutSlots,
    pub content: &'a str,
}

/// The default page layout being decorated.
pub trait Layout {
    fn render(&self, page: &PageContext<'_>) -> Result<String, LayoutError>;
}

impl<L: Layout + ?Sized> Layout for &L {
    fn render(&self, page: &PageContext<'_>) -> Result<String, LayoutError> {
        (**self).render(page)
    }
}

#[derive(Debug, Serialize)]
pub struct RenderedPage<'a> {
    pub route: RoutePath,
    pub breadcrumbs: Vec<BreadcrumbItem>,
    pub active_nav: Option<&'a NavEntry>,
    pub sidebar: &'a [SidebarGroup],
    #[serde(skip)]
    pub html: String,
}

/// Base layout plus the breadcrumb region.
pub struct PageDecorator<L> {
    registry: SiteRegistry,
    layout: L,
    home_label: String,
}

impl<L: Layout> PageDecorator<L> {
    pub fn new(registry: SiteRegistry, layout: L) -> Self {
        Self {
            registry,
            layout,
            home_label: DEFAULT_HOME_LABEL.to_string(),
        }
    }

    pub fn home_label<S: Into<String>>(mut self, label: S) -> Self {
        self.home_label = label.into();
        self
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Route-derived structure for a page, without rendering it.
    pub fn resolve(&self, current_path: &str) -> Result<RenderedPage<'_>, LayoutError> {
        let route = RoutePath::parse(current_path)?;
        Ok(RenderedPage {
            breadcrumbs: breadcrumbs(&self.registry, &route, &self.home_label),
            active_nav: self.registry.active_nav(&route),
            sidebar: self.registry.resolve_sidebar(&route),
            route,
            html: String::new(),
        })
    }

    pub fn render_page(&self, current_path: &str, content: &PageContent) -> Result<RenderedPage<'_>, LayoutError> {
        let mut page = self.resolve(current_path)?;

        let title = page
            .breadcrumbs
            .last()
            .filter(|crumb| !crumb.target.is_root())
            .map(|crumb| crumb.label.as_str());

        let context = PageContext {
            route: &page.route,
            title,
            nav: self.registry.resolve_nav(),
            active_nav: page.active_nav,
            sidebar: page.sidebar,
            slots: LayoutSlots {
                doc_before: render_breadcrumbs(&page.breadcrumbs),
            },
            content: content.as_str(),
        };

        let html = self.layout.render(&context)?;
        tracing::debug!(route = %page.route, bytes = html.len(), "Rendered page");
        page.html = html;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::SidebarItem;
    use crate::template::TemplateRenderer;

    /// Base layout that only shows where the slot lands.
    struct Skeleton;

    impl Layout for Skeleton {
        fn render(&self, page: &PageContext<'_>) -> Result<String, LayoutError> {
            Ok(format!(
                "<header>{}</header>[{}]<article>{}</article>",
                page.nav.len(),
                page.slots.doc_before,
                page.content
            ))
        }
    }

    fn registry() -> SiteRegistry {
        SiteRegistry::builder()
            .nav_entry(NavEntry::new("IT", "/it/").unwrap())
            .nav_entry(NavEntry::new("Life", "/life/").unwrap())
            .sidebar(
                "/it/base/",
                vec![
                    SidebarGroup::new("Basics")
                        .item(SidebarItem::new("Introduction", "/it/base/01-intro").unwrap()),
                ],
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_breadcrumbs_precede_body() {
        let decorator = PageDecorator::new(registry(), Skeleton);
        let page = decorator
            .render_page("/it/base/01-intro", &PageContent::new("<p>body</p>"))
            .unwrap();

        let crumbs = page.html.find("kb-breadcrumbs").unwrap();
        let body = page.html.find("<p>body</p>").unwrap();
        assert!(crumbs < body);
        assert!(page.html.starts_with("<header>2</header>"));
        assert_eq!(page.sidebar[0].label, "Basics");
        assert_eq!(page.active_nav.unwrap().label, "IT");
    }

    #[test]
    fn test_content_is_passed_through_untouched() {
        let decorator = PageDecorator::new(registry(), Skeleton);
        let body = "<div data-x=\"1\">{{ not a template }} & <b>raw</b></div>";
        let page = decorator.render_page("/life/", &PageContent::new(body)).unwrap();

        assert!(page.html.contains(body));
        assert!(page.sidebar.is_empty());
    }

    #[test]
    fn test_invalid_path_is_rejected() {
        let decorator = PageDecorator::new(registry(), Skeleton);
        assert!(matches!(
            decorator.render_page("it/base", &PageContent::default()),
            Err(LayoutError::Path(_))
        ));
    }

    #[test]
    fn test_home_label_is_configurable() {
        let decorator = PageDecorator::new(registry(), Skeleton).home_label("首页");
        let page = decorator.resolve("/life/").unwrap();
        assert_eq!(page.breadcrumbs[0].label, "首页");
        assert_eq!(page.breadcrumbs[1].label, "Life");
    }

    #[test]
    fn test_default_theme_layout() {
        let decorator = PageDecorator::new(registry(), TemplateRenderer::with_default_theme().unwrap());
        let page = decorator
            .render_page("/it/base/01-intro", &PageContent::new("<h1>Intro</h1>"))
            .unwrap();

        assert!(page.html.contains("<title>Introduction | Knowledge Base</title>"));
        assert!(page.html.contains("class=\"active\">IT</a>"));
        assert!(page.html.contains("<summary>Basics</summary>"));
        assert!(page.html.contains("<h1>Intro</h1>"));
        let crumbs = page.html.find("<nav class=\"kb-breadcrumbs\"").unwrap();
        let body = page.html.find("<div class=\"kb-content\">").unwrap();
        assert!(crumbs < body);
    }

    #[test]
    fn test_default_theme_without_sidebar() {
        let decorator = PageDecorator::new(registry(), TemplateRenderer::with_default_theme().unwrap());
        let page = decorator.render_page("/life/", &PageContent::new("life")).unwrap();

        assert!(!page.html.contains("kb-sidebar"));
        assert!(page.html.contains("class=\"active\">Life</a>"));
        assert!(!page.html.contains("class=\"active\">IT</a>"));
    }

    #[test]
    fn test_decorator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PageDecorator<TemplateRenderer>>();
    }
}
