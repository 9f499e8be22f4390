//! Markdown export of documentation pages.
//!
//! Stage 3 of the pipeline. Each page is rendered as plain Markdown
//! (`# <title>` followed by the processed body) and written below the export
//! directory at its slug path, so the site can serve `llms.mdx/<slug>`
//! statically:
//!
//! ```text
//! content/docs/index.mdx          → public/llms.mdx/index.md
//! content/docs/api/index.mdx      → public/llms.mdx/api.md
//! content/docs/api/overview.mdx   → public/llms.mdx/api/overview.md
//! ```
//!
//! Pages are parsed in full before any file is written; a parse error or a
//! slug collision leaves the export directory untouched.

use crate::page::{self, Page, PageError};
use crate::route;
use crate::scan::{self, ScanError};
use crate::types::{ContentFile, PageSummary};
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("{first} and {second} both export to {slug}.md")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
    #[error("Cannot write export {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A page written by [`export_pages`].
#[derive(Debug, Clone)]
pub struct ExportedPage {
    pub title: String,
    pub source: String,
    /// Path relative to the export directory.
    pub output: PathBuf,
}

/// Parse every file into a [`Page`], sorted by slug path.
pub fn load_pages(files: &[ContentFile]) -> Result<Vec<Page>, ExportError> {
    if let Some(collision) = route::find_export_collision(files) {
        return Err(ExportError::SlugCollision {
            slug: collision.key,
            first: collision.first,
            second: collision.second,
        });
    }

    let mut pages = files
        .par_iter()
        .map(page::parse_page)
        .collect::<Result<Vec<_>, _>>()?;
    pages.sort_by(|a, b| a.slugs.cmp(&b.slugs));
    Ok(pages)
}

/// Write the Markdown export of each page below `export_dir`.
pub fn export_pages(
    pages: &[Page],
    export_dir: &Path,
) -> Result<Vec<ExportedPage>, ExportError> {
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let rel = route::export_rel_path(&page.slugs);
        let path = export_dir.join(&rel);
        crate::fsio::write_atomic(&path, page::render_markdown(page).as_bytes())
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(source = %page.file.rel_path, output = %path.display(), "exported page");
        written.push(ExportedPage {
            title: page.title.clone(),
            source: page.file.rel_path.clone(),
            output: rel,
        });
    }
    info!(pages = written.len(), dir = %export_dir.display(), "markdown export written");
    Ok(written)
}

/// Discover, parse, and export in one pass.
pub fn export(content_root: &Path, export_dir: &Path) -> Result<Vec<ExportedPage>, ExportError> {
    let files = scan::discover(content_root)?;
    let pages = load_pages(&files)?;
    export_pages(&pages, export_dir)
}

/// Manifest rows for already-loaded pages, sorted by URL.
pub fn summaries(pages: &[Page], base_url: &str) -> Vec<PageSummary> {
    let mut rows: Vec<PageSummary> = pages.iter().map(|p| page::summarize(p, base_url)).collect();
    rows.sort_by(|a, b| a.url.cmp(&b.url));
    rows
}

/// Page manifest for the `scan` command, sorted by URL.
pub fn manifest(content_root: &Path, base_url: &str) -> Result<Vec<PageSummary>, ExportError> {
    let files = scan::discover(content_root)?;
    let pages = load_pages(&files)?;
    Ok(summaries(&pages, base_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn exports_root_nested_and_index_pages() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("docs");
        write_page(&content, "index.mdx", "---\ntitle: Welcome\n---\nStart here.");
        write_page(&content, "api/index.mdx", "---\ntitle: API\n---\nAll endpoints.");
        write_page(&content, "api/overview.mdx", "---\ntitle: Overview\n---\nDetails.");
        let out = tmp.path().join("public/llms.mdx");

        let written = export(&content, &out).unwrap();
        assert_eq!(written.len(), 3);

        assert_eq!(
            fs::read_to_string(out.join("index.md")).unwrap(),
            "# Welcome\n\nStart here.\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("api.md")).unwrap(),
            "# API\n\nAll endpoints.\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("api").join("overview.md")).unwrap(),
            "# Overview\n\nDetails.\n"
        );
    }

    #[test]
    fn exported_pages_listed_in_slug_order() {
        let tmp = setup_fixtures();
        let out = TempDir::new().unwrap();

        let written = export(tmp.path(), out.path()).unwrap();
        assert_eq!(written[0].output, PathBuf::from("index.md"));
        let sources: Vec<&str> = written.iter().map(|w| w.source.as_str()).collect();
        assert!(sources.contains(&"api/overview.mdx"));
    }

    #[test]
    fn slug_collision_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("docs");
        write_page(&content, "foo.mdx", "# Foo");
        write_page(&content, "foo/index.mdx", "# Foo too");
        let out = tmp.path().join("export");

        let result = export(&content, &out);
        match result {
            Err(ExportError::SlugCollision { slug, .. }) => assert_eq!(slug, "foo"),
            other => panic!("expected collision, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn nested_index_directory_cannot_replace_root_export() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("docs");
        write_page(&content, "index.mdx", "---\ntitle: Root\n---\nroot body");
        write_page(&content, "index/index.mdx", "---\ntitle: Nested\n---\nnested body");
        let out = tmp.path().join("export");

        match export(&content, &out) {
            Err(ExportError::SlugCollision { slug, first, second }) => {
                assert_eq!(slug, "index");
                assert_eq!(first, "index.mdx");
                assert_eq!(second, "index/index.mdx");
            }
            other => panic!("expected collision, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn bad_frontmatter_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("docs");
        write_page(&content, "good.mdx", "---\ntitle: Good\n---\n");
        write_page(&content, "bad.mdx", "---\ntitle: [oops\n---\n");
        let out = tmp.path().join("export");

        let result = export(&content, &out);
        assert!(matches!(
            result,
            Err(ExportError::Page(PageError::Frontmatter { .. }))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn manifest_sorted_by_url() {
        let tmp = setup_fixtures();

        let rows = manifest(tmp.path(), "https://s.ee/docs").unwrap();
        let urls: Vec<&str> = rows.iter().map(|r| r.url.as_str()).collect();
        let mut sorted = urls.clone();
        sorted.sort();
        assert_eq!(urls, sorted);
        assert_eq!(rows[0].url, "https://s.ee/docs/");
        assert_eq!(rows[0].markdown_url, "https://s.ee/docs/llms.mdx/index");
    }

    #[test]
    fn missing_root_is_scan_error() {
        let tmp = TempDir::new().unwrap();
        let result = export(&tmp.path().join("missing"), tmp.path());
        assert!(matches!(result, Err(ExportError::Scan(_))));
    }
}
