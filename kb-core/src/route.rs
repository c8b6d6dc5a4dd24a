//! Normalized site routes.
//!
//! Every prefix, link target and incoming page path goes through
//! [`RoutePath::parse`], so the registry only ever compares one shape of
//! path: absolute, lowercase, split into segments.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("route is empty")]
    Empty,
    #[error("route '{0}' is not absolute")]
    Relative(String),
    #[error("route '{0}' contains a parent segment")]
    ParentSegment(String),
}

/// An absolute site route such as `/it/base/` or `/it/base/01-intro`.
///
/// Directory routes end with a slash; leaf routes name a single document.
/// The root route `/` is always a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath {
    segments: Vec<String>,
    dir: bool,
}

impl RoutePath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
            dir: true,
        }
    }

    /// Normalize a raw path.
    ///
    /// Backslashes count as separators, `?query` and `#fragment` suffixes are
    /// dropped, empty and `.` segments vanish, a trailing `.md`/`.html`
    /// extension is stripped, a trailing `index` collapses into its directory
    /// and every segment is lowercased.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let cleaned = raw.replace('\\', "/");
        let cleaned = match cleaned.find(['?', '#']) {
            Some(idx) => &cleaned[..idx],
            None => cleaned.as_str(),
        };

        if !cleaned.starts_with('/') {
            return Err(PathError::Relative(raw.to_string()));
        }

        let mut dir = cleaned.ends_with('/');
        let mut segments = Vec::new();
        for segment in cleaned.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Err(PathError::ParentSegment(raw.to_string())),
                s => segments.push(s.to_lowercase()),
            }
        }

        if !dir {
            if let Some(last) = segments.last_mut() {
                for ext in [".md", ".html"] {
                    if last.len() > ext.len() && last.ends_with(ext) {
                        last.truncate(last.len() - ext.len());
                        break;
                    }
                }
                if last.as_str() == "index" {
                    segments.pop();
                    dir = true;
                }
            }
        }

        if segments.is_empty() {
            dir = true;
        }

        Ok(Self { segments, dir })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_dir(&self) -> bool {
        self.dir
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The same route as a directory (`/it/base` becomes `/it/base/`).
    pub fn as_dir(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            dir: true,
        }
    }

    /// The same route as a leaf document. The root stays a directory.
    pub fn as_leaf(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            dir: self.segments.is_empty(),
        }
    }

    /// Route made of the first `len` segments, as a directory.
    pub fn ancestor(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
            dir: true,
        }
    }

    /// Segment-wise prefix test: `/it/` covers `/it/base/x` but not `/itx/y`.
    pub fn is_prefix_of(&self, other: &RoutePath) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a == b)
    }

    /// Specificity used to rank matching prefixes: the length of the
    /// normalized textual form.
    pub fn specificity(&self) -> usize {
        self.to_string().chars().count()
    }

    /// Relative output location for a rendered page (`it/base/index.html`).
    pub fn out_path(&self) -> PathBuf {
        let mut out = PathBuf::new();
        for segment in &self.segments {
            out.push(segment);
        }
        out.join("index.html")
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if self.dir && !self.segments.is_empty() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for RoutePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoutePath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoutePath> for String {
    fn from(value: RoutePath) -> Self {
        value.to_string()
    }
}

/// Where a nav entry or sidebar item points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Target {
    Internal(RoutePath),
    /// Off-site link, kept verbatim.
    External(String),
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if is_external(raw) {
            return Ok(Target::External(raw.trim().to_string()));
        }
        Ok(Target::Internal(RoutePath::parse(raw)?))
    }

    pub fn route(&self) -> Option<&RoutePath> {
        match self {
            Target::Internal(route) => Some(route),
            Target::External(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Internal(route) => route.fmt(f),
            Target::External(url) => f.write_str(url),
        }
    }
}

impl TryFrom<String> for Target {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Target> for String {
    fn from(value: Target) -> Self {
        value.to_string()
    }
}

// `scheme:` prefix per RFC 3986, e.g. `https:`, `mailto:`.
fn is_external(raw: &str) -> bool {
    let raw = raw.trim();
    let Some((scheme, _)) = raw.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(raw: &str) -> RoutePath {
        RoutePath::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_directory_and_leaf() {
        let dir = route("/it/base/");
        assert!(dir.is_dir());
        assert_eq!(dir.segments(), ["it", "base"]);
        assert_eq!(dir.to_string(), "/it/base/");

        let leaf = route("/it/base/01-intro");
        assert!(!leaf.is_dir());
        assert_eq!(leaf.to_string(), "/it/base/01-intro");
    }

    #[test]
    fn test_parse_lowercases_segments() {
        assert_eq!(route("/AI/Agents/"), route("/ai/agents/"));
    }

    #[test]
    fn test_parse_strips_extensions_and_index() {
        assert_eq!(route("/it/base/01-intro.md"), route("/it/base/01-intro"));
        assert_eq!(route("/it/base/01-intro.html"), route("/it/base/01-intro"));
        assert_eq!(route("/it/base/index.md"), route("/it/base/"));
        assert_eq!(route("/index"), RoutePath::root());
    }

    #[test]
    fn test_parse_collapses_separators() {
        assert_eq!(route("//it/./base//"), route("/it/base/"));
        assert_eq!(route("\\it\\base\\"), route("/it/base/"));
    }

    #[test]
    fn test_parse_drops_query_and_fragment() {
        assert_eq!(route("/it/base/#setup"), route("/it/base/"));
        assert_eq!(route("/it/base/01-intro?x=1"), route("/it/base/01-intro"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(RoutePath::parse("  "), Err(PathError::Empty));
        assert!(matches!(RoutePath::parse("it/base"), Err(PathError::Relative(_))));
        assert!(matches!(
            RoutePath::parse("/it/../etc"),
            Err(PathError::ParentSegment(_))
        ));
    }

    #[test]
    fn test_root() {
        let root = route("/");
        assert!(root.is_root());
        assert!(root.is_dir());
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.out_path(), PathBuf::from("index.html"));
    }

    #[test]
    fn test_prefix_respects_segment_boundaries() {
        assert!(route("/it/").is_prefix_of(&route("/it/base/01-intro")));
        assert!(route("/it/").is_prefix_of(&route("/it/")));
        assert!(!route("/it/").is_prefix_of(&route("/itx/anything")));
        assert!(RoutePath::root().is_prefix_of(&route("/life/")));
    }

    #[test]
    fn test_ancestor_and_variants() {
        let leaf = route("/it/base/01-intro");
        assert_eq!(leaf.ancestor(2), route("/it/base/"));
        assert_eq!(leaf.ancestor(0), RoutePath::root());
        assert_eq!(leaf.as_dir(), route("/it/base/01-intro/"));
        assert_eq!(route("/it/").as_leaf(), route("/it"));
    }

    #[test]
    fn test_out_path() {
        assert_eq!(
            route("/it/base/01-intro").out_path(),
            PathBuf::from("it/base/01-intro/index.html")
        );
    }

    #[test]
    fn test_target_external() {
        assert_eq!(
            Target::parse("https://github.com/x").unwrap(),
            Target::External("https://github.com/x".into())
        );
        assert!(matches!(Target::parse("mailto:me@x.io"), Ok(Target::External(_))));
        assert_eq!(
            Target::parse("/ai/").unwrap().route(),
            Some(&route("/ai/"))
        );
    }
}
