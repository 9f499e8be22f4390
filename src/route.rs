//! Path → URL mapping for documentation pages.
//!
//! A page's route is derived from its path relative to the content root:
//!
//! | Source file | Slugs | URL |
//! |-------------|-------|-----|
//! | `index.mdx` | `[]` | `{base}/` |
//! | `quickstart.mdx` | `["quickstart"]` | `{base}/quickstart/` |
//! | `api/index.mdx` | `["api"]` | `{base}/api/` |
//! | `api/overview.mdx` | `["api", "overview"]` | `{base}/api/overview/` |
//!
//! Every URL ends with exactly one trailing slash, matching the site's
//! `trailingSlash` routing. The only non-injective case is a page next to a
//! same-named directory index (`foo.mdx` and `foo/index.mdx`); callers detect
//! it by comparing slugs and reject the input.

use crate::scan::MARKUP_EXTENSION;
use crate::types::ContentFile;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Final segment collapsed into its parent directory's URL.
const INDEX_SEGMENT: &str = "index";

/// Directory under the site root that serves Markdown exports.
pub const MARKDOWN_ROUTE: &str = "llms.mdx";

#[derive(Error, Debug, PartialEq)]
pub enum RouteError {
    #[error("{} is not inside content root {}", .file.display(), .root.display())]
    OutsideRoot { file: PathBuf, root: PathBuf },
    #[error("{} is not an .mdx file", .0.display())]
    NotMarkup(PathBuf),
}

/// Slugs for a `/`-separated path relative to the content root.
///
/// The markup extension is stripped and a trailing `index` segment removed.
pub fn slugs(rel_path: &str) -> Vec<String> {
    let stem = rel_path.strip_suffix(MARKUP_EXTENSION).unwrap_or(rel_path);
    let mut segments: Vec<String> = stem
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if segments.last().is_some_and(|s| s == INDEX_SEGMENT) {
        segments.pop();
    }
    segments
}

/// Site-relative path for a slug list: `/` for the root, `/a/b/` otherwise.
pub fn url_path(slugs: &[String]) -> String {
    if slugs.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", slugs.join("/"))
    }
}

/// Canonical absolute URL for a slug list.
///
/// A trailing slash on `base_url` is ignored so `https://s.ee/docs` and
/// `https://s.ee/docs/` produce the same URLs.
pub fn canonical_url(base_url: &str, slugs: &[String]) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), url_path(slugs))
}

/// URL of the site root (`{base}/`), the only URL with top priority.
pub fn root_url(base_url: &str) -> String {
    canonical_url(base_url, &[])
}

/// Derive the canonical URL for a file below `content_root`.
///
/// ```
/// use mdx_sitemap::route::derive_url;
/// use std::path::Path;
///
/// let url = derive_url(
///     Path::new("content/docs/api/index.mdx"),
///     Path::new("content/docs"),
///     "https://s.ee/docs",
/// )
/// .unwrap();
/// assert_eq!(url, "https://s.ee/docs/api/");
/// ```
pub fn derive_url(
    file: &Path,
    content_root: &Path,
    base_url: &str,
) -> Result<String, RouteError> {
    let rel = file
        .strip_prefix(content_root)
        .map_err(|_| RouteError::OutsideRoot {
            file: file.to_path_buf(),
            root: content_root.to_path_buf(),
        })?;
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if !rel.ends_with(MARKUP_EXTENSION) {
        return Err(RouteError::NotMarkup(file.to_path_buf()));
    }
    Ok(canonical_url(base_url, &slugs(&rel)))
}

/// Absolute URL of a page's Markdown export (`{base}/llms.mdx/<slugs>`).
///
/// The root page is exported under the literal name `index`.
pub fn markdown_url(base_url: &str, slugs: &[String]) -> String {
    format!(
        "{}/{MARKDOWN_ROUTE}/{}",
        base_url.trim_end_matches('/'),
        export_name(slugs)
    )
}

/// Relative file path of a page's Markdown export: `api/overview.md`, `index.md`.
pub fn export_rel_path(slugs: &[String]) -> PathBuf {
    format!("{}.md", export_name(slugs)).split('/').collect()
}

/// Two source files that resolve to the same key (slugs or export name).
#[derive(Debug, Clone, PartialEq)]
pub struct Collision<K = Vec<String>> {
    pub key: K,
    /// Relative path that sorts first.
    pub first: String,
    pub second: String,
}

/// Find the first pair of files sharing a route, if any.
///
/// Pairs are reported with their relative paths in sorted order so the
/// result does not depend on traversal order.
pub fn find_collision(files: &[ContentFile]) -> Option<Collision> {
    first_collision(files, |file| slugs(&file.rel_path))
}

/// Find the first pair of files sharing a Markdown export name, if any.
///
/// Stricter than [`find_collision`]: `index.mdx` and `index/index.mdx` have
/// distinct routes but both export to `index.md`.
pub fn find_export_collision(files: &[ContentFile]) -> Option<Collision<String>> {
    first_collision(files, |file| export_name(&slugs(&file.rel_path)))
}

fn first_collision<K, F>(files: &[ContentFile], key_of: F) -> Option<Collision<K>>
where
    K: Eq + Hash,
    F: Fn(&ContentFile) -> K,
{
    let mut seen: HashMap<K, &str> = HashMap::with_capacity(files.len());
    let mut collisions = Vec::new();
    for file in files {
        let key = key_of(file);
        if let Some(prev) = seen.get(&key) {
            let (first, second) = if *prev <= file.rel_path.as_str() {
                (prev.to_string(), file.rel_path.clone())
            } else {
                (file.rel_path.clone(), prev.to_string())
            };
            collisions.push(Collision { key, first, second });
        } else {
            seen.insert(key, &file.rel_path);
        }
    }
    collisions
        .into_iter()
        .min_by(|a, b| (&a.first, &a.second).cmp(&(&b.first, &b.second)))
}

fn export_name(slugs: &[String]) -> String {
    if slugs.is_empty() {
        INDEX_SEGMENT.to_string()
    } else {
        slugs.join("/")
    }
}
