//! Content discovery.
//!
//! Stage 1 of the pipeline. Walks the content root recursively and collects
//! every `.mdx` file at any depth:
//!
//! ```text
//! content/docs/                    # Content root
//! ├── index.mdx                    # → /
//! ├── meta.json                    # ignored (not a markup file)
//! ├── quickstart.mdx               # → /quickstart/
//! └── api/
//!     ├── index.mdx                # → /api/
//!     ├── overview.mdx             # → /api/overview/
//!     └── diagram.png              # ignored
//! ```
//!
//! Traversal order carries no meaning; every later stage sorts by derived URL.
//! Any error while reading a directory aborts the scan. There is no
//! best-effort mode.

use crate::types::ContentFile;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Extension recognized as a documentation page.
pub const MARKUP_EXTENSION: &str = ".mdx";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read content directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Discover all markup files below `root`.
///
/// Fails if `root` is missing, is not a directory, or any directory beneath it
/// cannot be read.
pub fn discover(root: &Path) -> Result<Vec<ContentFile>, ScanError> {
    if !root.is_dir() {
        let source = match std::fs::metadata(root) {
            Err(e) => e,
            Ok(_) => io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        };
        return Err(ScanError::Discovery {
            path: root.to_path_buf(),
            source,
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e.into_io_error().unwrap_or_else(|| {
                io::Error::other("filesystem loop detected while walking content")
            });
            ScanError::Discovery { path, source }
        })?;

        if entry.file_type().is_dir() || !is_markup_file(entry.path()) {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel_path = to_slash_path(rel);
        debug!(file = %rel_path, "discovered page");
        files.push(ContentFile {
            path: entry.path().to_path_buf(),
            rel_path,
        });
    }

    Ok(files)
}

/// A regular file (or a link resolving to one) named `*.mdx`.
fn is_markup_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.len() > MARKUP_EXTENSION.len() && name.ends_with(MARKUP_EXTENSION) && path.is_file()
}

/// Join path components with `/` regardless of platform.
fn to_slash_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
