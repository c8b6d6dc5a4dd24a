pub mod breadcrumb;
pub mod builder;
pub mod config;
pub mod layout;
pub mod links;
pub mod nav;
pub mod registry;
pub mod route;
pub mod scanner;
pub mod template;

// Re-export main types
pub use breadcrumb::{BreadcrumbItem, breadcrumbs, render_breadcrumbs};
pub use builder::{BuildError, RenderError, Site, SiteBuilder};
pub use config::{Config, ConfigError};
pub use layout::{Layout, LayoutError, PageContent, PageContext, PageDecorator, RenderedPage};
pub use links::{LinkCheckReport, LinkError, check_links};
pub use nav::{NavEntry, SidebarGroup, SidebarItem};
pub use registry::{RegistryError, SidebarRegistryBuilder, SidebarSection, SiteRegistry};
pub use route::{PathError, RoutePath, Target};
pub use scanner::{ContentScanner, ContentTree, Document, ScanError};
pub use template::{TemplateError, TemplateRenderer};
