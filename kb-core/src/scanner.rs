use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::route::{PathError, RoutePath};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Invalid route for {}: {source}", .path.display())]
    InvalidRoute {
        path: PathBuf,
        #[source]
        source: PathError,
    },
}

/// A document found in the content tree.
#[derive(Debug, Clone)]
pub struct Document {
    pub route: RoutePath,
    pub source: PathBuf,
}

/// Every document route the site will publish.
#[derive(Debug, Default)]
pub struct ContentTree {
    documents: Vec<Document>,
    routes: HashSet<RoutePath>,
}

impl ContentTree {
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let routes = documents.iter().map(|d| d.route.clone()).collect();
        Self { documents, routes }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Whether `route` names a document. `/guide` and `/guide/` are
    /// interchangeable since either may be backed by `guide.md` or
    /// `guide/index.md`.
    pub fn contains(&self, route: &RoutePath) -> bool {
        self.routes.contains(route)
            || self.routes.contains(&route.as_dir())
            || self.routes.contains(&route.as_leaf())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

pub struct ContentScanner {
    source_dir: PathBuf,
}

impl ContentScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Walk the content directory for `.md` and `.html` documents.
    ///
    /// Hidden entries (such as a framework's `.vitepress` directory) are
    /// skipped. Documents are returned sorted by route.
    pub fn scan(&self) -> Result<ContentTree, ScanError> {
        tracing::info!(source = %self.source_dir.display(), "Scanning content");

        if !self.source_dir.is_dir() {
            return Err(ScanError::InvalidPath(self.source_dir.clone()));
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(&self.source_dir)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_document(path) {
                continue;
            }
            documents.push(self.scan_document(path)?);
        }

        // `guide.md` and `guide/index.md` publish to the same page; the
        // directory index sorts first and is kept.
        documents.sort_by(|a, b| {
            a.route
                .as_dir()
                .cmp(&b.route.as_dir())
                .then(b.route.is_dir().cmp(&a.route.is_dir()))
        });
        documents.dedup_by(|dup, kept| {
            let collides = dup.route.out_path() == kept.route.out_path();
            if collides {
                tracing::warn!(
                    kept = %kept.source.display(),
                    skipped = %dup.source.display(),
                    "Files publish to the same page, skipping one"
                );
            }
            collides
        });

        tracing::debug!(documents = documents.len(), "Content scan completed");
        Ok(ContentTree::from_documents(documents))
    }

    fn scan_document(&self, path: &Path) -> Result<Document, ScanError> {
        let relative = path
            .strip_prefix(&self.source_dir)
            .map_err(|_| ScanError::InvalidPath(path.to_path_buf()))?;

        let raw = format!("/{}", relative.to_string_lossy().replace('\\', "/"));
        let route = RoutePath::parse(&raw).map_err(|source| ScanError::InvalidRoute {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Document {
            route,
            source: path.to_path_buf(),
        })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "md" || ext == "html")
        .unwrap_or(false)
}
