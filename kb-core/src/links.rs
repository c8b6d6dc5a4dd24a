//! Dangling-link check over the declared navigation.

use std::fmt;

use serde::Serialize;

use crate::registry::SiteRegistry;
use crate::route::{RoutePath, Target};
use crate::scanner::ContentTree;

/// Where a checked link was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkOrigin {
    Nav,
    Sidebar { prefix: RoutePath, group: String },
}

impl fmt::Display for LinkOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOrigin::Nav => write!(f, "nav"),
            LinkOrigin::Sidebar { prefix, group } => write!(f, "sidebar {} / {}", prefix, group),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("unresolved link '{target}' ({label}) in {origin}")]
pub struct LinkError {
    pub label: String,
    pub target: RoutePath,
    pub origin: LinkOrigin,
}

#[derive(Debug, Default, Serialize)]
pub struct LinkCheckReport {
    pub checked: usize,
    pub external: usize,
    pub unresolved: Vec<LinkError>,
}

impl LinkCheckReport {
    pub fn is_ok(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Check every internal nav and sidebar target against the content tree.
///
/// All failures are collected; external links are counted but not checked.
pub fn check_links(registry: &SiteRegistry, tree: &ContentTree) -> LinkCheckReport {
    let mut report = LinkCheckReport::default();

    let nav = registry
        .resolve_nav()
        .iter()
        .map(|entry| (LinkOrigin::Nav, &entry.label, &entry.target));
    let sidebar = registry.sections().iter().flat_map(|section| {
        section.groups.iter().flat_map(move |group| {
            group.items.iter().map(move |item| {
                let origin = LinkOrigin::Sidebar {
                    prefix: section.prefix.clone(),
                    group: group.label.clone(),
                };
                (origin, &item.label, &item.target)
            })
        })
    });

    for (origin, label, target) in nav.chain(sidebar) {
        let route = match target {
            Target::Internal(route) => route,
            Target::External(_) => {
                report.external += 1;
                continue;
            }
        };

        report.checked += 1;
        if !tree.contains(route) {
            tracing::warn!(link = %route, label = %label, origin = %origin, "Unresolved link");
            report.unresolved.push(LinkError {
                label: label.clone(),
                target: route.clone(),
                origin,
            });
        }
    }

    tracing::info!(
        checked = report.checked,
        external = report.external,
        unresolved = report.unresolved.len(),
        "Link check finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavEntry, SidebarGroup, SidebarItem};
    use crate::scanner::Document;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn route(raw: &str) -> RoutePath {
        RoutePath::parse(raw).unwrap()
    }

    fn tree(routes: &[&str]) -> ContentTree {
        ContentTree::from_documents(
            routes
                .iter()
                .map(|r| Document {
                    route: route(r),
                    source: PathBuf::from(r.trim_start_matches('/')),
                })
                .collect(),
        )
    }

    fn registry() -> SiteRegistry {
        SiteRegistry::builder()
            .nav_entry(NavEntry::new("IT", "/it/").unwrap())
            .nav_entry(NavEntry::new("Life", "/life/").unwrap())
            .nav_entry(NavEntry::new("GitHub", "https://github.com").unwrap())
            .sidebar(
                "/it/",
                vec![
                    SidebarGroup::new("Basics")
                        .item(SidebarItem::new("Intro", "/it/base/01-intro").unwrap())
                        .item(SidebarItem::new("Missing", "/it/base/99-gone").unwrap()),
                ],
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_all_links_resolve() {
        let report = check_links(&registry(), &tree(&["/it/", "/life/", "/it/base/01-intro", "/it/base/99-gone"]));

        assert!(report.is_ok());
        assert_eq!(report.checked, 4);
        assert_eq!(report.external, 1);
    }

    #[test]
    fn test_dangling_links_are_all_reported() {
        let report = check_links(&registry(), &tree(&["/it/", "/it/base/01-intro"]));

        assert!(!report.is_ok());
        assert_eq!(
            report.unresolved,
            vec![
                LinkError {
                    label: "Life".into(),
                    target: route("/life/"),
                    origin: LinkOrigin::Nav,
                },
                LinkError {
                    label: "Missing".into(),
                    target: route("/it/base/99-gone"),
                    origin: LinkOrigin::Sidebar {
                        prefix: route("/it/"),
                        group: "Basics".into(),
                    },
                },
            ]
        );
    }

    #[test]
    fn test_error_message_names_origin() {
        let err = LinkError {
            label: "Missing".into(),
            target: route("/it/base/99-gone"),
            origin: LinkOrigin::Sidebar {
                prefix: route("/it/"),
                group: "Basics".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "unresolved link '/it/base/99-gone' (Missing) in sidebar /it/ / Basics"
        );
    }

    #[test]
    fn test_demo_site_has_no_dangling_links() {
        let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos");
        let registry = crate::config::Config::read(demos.join("kb.toml"))
            .unwrap()
            .registry()
            .unwrap();
        let tree = crate::scanner::ContentScanner::new(demos.join("docs")).scan().unwrap();

        let report = check_links(&registry, &tree);
        assert_eq!(report.unresolved, Vec::<LinkError>::new());
        assert_eq!(report.checked, 10);
    }
}
