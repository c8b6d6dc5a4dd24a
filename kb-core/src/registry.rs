//! Prefix-keyed sidebar registry.
//!
//! Structure is declared through [`SidebarRegistryBuilder`] and frozen into
//! a [`SiteRegistry`], which answers every per-page question (sidebar, nav,
//! active nav entry, labels) without mutation.

use std::collections::HashMap;

use serde::Serialize;

use crate::nav::{NavEntry, SidebarGroup};
use crate::route::{PathError, RoutePath};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("sidebar prefix '{0}' is registered more than once")]
    DuplicatePrefix(RoutePath),
    #[error("invalid sidebar prefix '{prefix}': {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: PathError,
    },
}

/// Sidebar groups registered under one prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    pub prefix: RoutePath,
    pub groups: Vec<SidebarGroup>,
}

#[derive(Debug, Default)]
pub struct SidebarRegistryBuilder {
    nav: Vec<NavEntry>,
    sections: Vec<SidebarSection>,
}

impl SidebarRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nav_entry(mut self, entry: NavEntry) -> Self {
        self.nav.push(entry);
        self
    }

    pub fn nav(mut self, entries: Vec<NavEntry>) -> Self {
        self.nav.extend(entries);
        self
    }

    /// Register the sidebar shown under `prefix`.
    ///
    /// The prefix is normalized and always treated as a directory, so `/ai`,
    /// `/ai/` and `/AI/` name the same key.
    pub fn sidebar(mut self, prefix: &str, groups: Vec<SidebarGroup>) -> Result<Self, RegistryError> {
        let prefix = RoutePath::parse(prefix)
            .map_err(|source| RegistryError::InvalidPrefix {
                prefix: prefix.to_string(),
                source,
            })?
            .as_dir();

        if self.sections.iter().any(|s| s.prefix == prefix) {
            return Err(RegistryError::DuplicatePrefix(prefix));
        }

        tracing::debug!(prefix = %prefix, groups = groups.len(), "Registered sidebar");
        self.sections.push(SidebarSection { prefix, groups });
        Ok(self)
    }

    pub fn build(self) -> SiteRegistry {
        let mut labels = HashMap::new();
        for entry in &self.nav {
            if let Some(route) = entry.target.route() {
                labels.entry(route.clone()).or_insert_with(|| entry.label.clone());
            }
        }
        for section in &self.sections {
            for item in section.groups.iter().flat_map(|g| &g.items) {
                if let Some(route) = item.target.route() {
                    labels.entry(route.clone()).or_insert_with(|| item.label.clone());
                }
            }
        }

        tracing::info!(
            nav_entries = self.nav.len(),
            sidebars = self.sections.len(),
            "Site registry built"
        );

        SiteRegistry {
            nav: self.nav,
            sections: self.sections,
            labels,
        }
    }
}

/// Immutable navigation and sidebar structure of a site.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    nav: Vec<NavEntry>,
    sections: Vec<SidebarSection>,
    labels: HashMap<RoutePath, String>,
}

impl SiteRegistry {
    pub fn builder() -> SidebarRegistryBuilder {
        SidebarRegistryBuilder::new()
    }

    /// Top navigation, in declaration order. Independent of the current page.
    pub fn resolve_nav(&self) -> &[NavEntry] {
        &self.nav
    }

    /// Sidebar groups for `path`.
    ///
    /// The registered prefix with the greatest specificity that covers `path`
    /// wins; on a tie the earlier registration is kept. No match yields an
    /// empty slice.
    pub fn resolve_sidebar(&self, path: &RoutePath) -> &[SidebarGroup] {
        let mut best: Option<&SidebarSection> = None;
        for section in &self.sections {
            if !section.prefix.is_prefix_of(path) {
                continue;
            }
            match best {
                Some(current) if current.prefix.specificity() >= section.prefix.specificity() => {}
                _ => best = Some(section),
            }
        }

        match best {
            Some(section) => {
                tracing::debug!(path = %path, prefix = %section.prefix, "Resolved sidebar");
                &section.groups
            }
            None => {
                tracing::debug!(path = %path, "No sidebar registered for path");
                &[]
            }
        }
    }

    /// Nav entry to highlight for `path`: the internal target that is the
    /// most specific segment prefix of the path.
    pub fn active_nav(&self, path: &RoutePath) -> Option<&NavEntry> {
        let mut best: Option<(&NavEntry, usize)> = None;
        for entry in &self.nav {
            let Some(route) = entry.target.route() else {
                continue;
            };
            // A leaf target only highlights its own page.
            let covers = if route.is_dir() {
                route.is_prefix_of(path)
            } else {
                route.segments() == path.segments()
            };
            if !covers {
                continue;
            }
            let specificity = route.specificity();
            match best {
                Some((_, current)) if current >= specificity => {}
                _ => best = Some((entry, specificity)),
            }
        }
        best.map(|(entry, _)| entry)
    }

    /// Declared label for a route, trying the exact route first and then the
    /// other directory/leaf variant.
    pub fn label_for(&self, route: &RoutePath) -> Option<&str> {
        let alternate = if route.is_dir() {
            route.as_leaf()
        } else {
            route.as_dir()
        };
        self.labels
            .get(route)
            .or_else(|| self.labels.get(&alternate))
            .map(String::as_str)
    }

    pub fn sections(&self) -> &[SidebarSection] {
        &self.sections
    }
}
