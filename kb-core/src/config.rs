use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breadcrumb::DEFAULT_HOME_LABEL;
use crate::nav::{NavEntry, SidebarGroup};
use crate::registry::{RegistryError, SiteRegistry};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Contents of `kb.toml`.
///
/// Everything except `nav` and `sidebar` is handed to the layout unchanged.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub breadcrumb: BreadcrumbConfig,
    #[serde(default)]
    pub nav: Vec<NavEntry>,
    #[serde(default)]
    pub sidebar: Vec<SidebarConfig>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(data)?;
        Ok(config)
    }

    /// Freeze the declared nav and sidebars into a registry.
    ///
    /// Fails on the first duplicated sidebar prefix.
    pub fn registry(&self) -> Result<SiteRegistry, ConfigError> {
        let mut builder = SiteRegistry::builder().nav(self.nav.clone());
        for sidebar in &self.sidebar {
            builder = builder.sidebar(&sidebar.prefix, sidebar.groups.clone())?;
        }
        Ok(builder.build())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Knowledge Base".into(),
            description: String::new(),
            lang: "en".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    pub brand_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            brand_color: "#3eaf7c".into(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct MarkdownConfig {
    pub line_numbers: bool,
    pub mermaid: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            mermaid: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Local,
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct BreadcrumbConfig {
    pub home_label: String,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            home_label: DEFAULT_HOME_LABEL.into(),
        }
    }
}

/// One `[[sidebar]]` table: the prefix it applies to and its groups.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SidebarConfig {
    pub prefix: String,
    #[serde(default)]
    pub groups: Vec<SidebarGroup>,
}
