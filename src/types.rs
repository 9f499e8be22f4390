//! Shared types used across pipeline stages.
//!
//! A [`ContentFile`] is produced by [`crate::scan`] and consumed by both the
//! sitemap and export stages. [`PageSummary`] is the row type of the JSON page
//! manifest printed by the `scan` command.

use serde::Serialize;
use std::path::PathBuf;

/// One documentation page discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentFile {
    /// Path as found during traversal (content root joined with the relative path).
    pub path: PathBuf,
    /// Path relative to the content root, always `/`-separated
    /// (e.g. `api/overview.mdx`).
    pub rel_path: String,
}

/// Manifest row describing a page and where it is published.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    /// Source file relative to the content root.
    pub source: String,
    /// URL slugs (`[]` for the root page).
    pub slugs: Vec<String>,
    /// Canonical absolute URL.
    pub url: String,
    /// Absolute URL of the Markdown export.
    pub markdown_url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
