use serde::Serialize;

use crate::registry::SiteRegistry;
use crate::route::RoutePath;

pub const DEFAULT_HOME_LABEL: &str = "Home";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub target: RoutePath,
    /// Set on the last crumb, the page being rendered.
    pub current: bool,
}

/// Breadcrumbs for `route`, root first.
///
/// Each cumulative prefix of the route becomes one crumb labeled with the
/// nav or sidebar label declared for it, falling back to the raw segment.
/// Routes are lowercased when parsed, so an unlabeled `/AI/Agents` shows
/// `ai` and `agents`; declare a label to control the displayed casing.
pub fn breadcrumbs(registry: &SiteRegistry, route: &RoutePath, home_label: &str) -> Vec<BreadcrumbItem> {
    let segments = route.segments();
    let mut crumbs = Vec::with_capacity(segments.len() + 1);

    crumbs.push(BreadcrumbItem {
        label: home_label.to_string(),
        target: RoutePath::root(),
        current: segments.is_empty(),
    });

    for (idx, segment) in segments.iter().enumerate() {
        let is_last = idx + 1 == segments.len();
        let target = if is_last {
            route.clone()
        } else {
            route.ancestor(idx + 1)
        };
        let label = registry
            .label_for(&target)
            .map(str::to_string)
            .unwrap_or_else(|| segment.clone());

        crumbs.push(BreadcrumbItem {
            label,
            target,
            current: is_last,
        });
    }

    crumbs
}

/// Breadcrumb strip markup placed before the document body.
pub fn render_breadcrumbs(crumbs: &[BreadcrumbItem]) -> String {
    let mut html = String::from("<nav class=\"kb-breadcrumbs\" aria-label=\"Breadcrumb\"><ol>");
    for crumb in crumbs {
        let label = html_escape::encode_text(&crumb.label);
        if crumb.current {
            html.push_str(&format!("<li aria-current=\"page\">{}</li>", label));
        } else {
            let href = html_escape::encode_double_quoted_attribute(&crumb.target.to_string()).into_owned();
            html.push_str(&format!("<li><a href=\"{}\">{}</a></li>", href, label));
        }
    }
    html.push_str("</ol></nav>");
    html
}
