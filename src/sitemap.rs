//! Sitemap generation.
//!
//! Stage 2 of the pipeline. Turns the discovered content files into a
//! `sitemap.xml` for search engine crawlers:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://s.ee/docs/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! ## Ordering
//!
//! Entries are sorted by `loc` with plain byte-wise string comparison.
//! Regenerating from an unchanged tree yields byte-identical output, so
//! diff-based change detection only sees entries whose `lastmod` moved.
//!
//! ## Failure policy
//!
//! Every error aborts the run before the output file is touched. A stale but
//! complete sitemap is preferred over a partial one; the final write goes
//! through [`crate::fsio::write_atomic`].

use crate::route;
use crate::scan::{self, ScanError};
use crate::types::ContentFile;
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Change-frequency hint emitted for every entry.
pub const CHANGE_FREQUENCY: &str = "weekly";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Cannot read modification time of {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{first} and {second} both map to {url}")]
    UrlCollision {
        url: String,
        first: String,
        second: String,
    },
    #[error("Cannot write sitemap to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Crawl priority relative to other pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// The site root.
    Root,
    /// Every other page.
    Page,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Root => "1.0",
            Priority::Page => "0.8",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: &'static str,
    pub priority: Priority,
}

/// An ordered set of entries ready to serialize.
#[derive(Debug, Default)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

/// Modification date of a file as a UTC calendar date.
pub fn last_modified(path: &Path) -> Result<NaiveDate, SitemapError> {
    let read_err = |source| SitemapError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mtime = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(read_err)?;
    Ok(DateTime::<Utc>::from(mtime).date_naive())
}

/// Build sorted entries for `files`, rejecting route collisions.
///
/// Timestamp reads run on the rayon pool; the final sort is the only
/// ordering authority so the result matches a sequential run.
pub fn build_entries(
    files: &[ContentFile],
    base_url: &str,
) -> Result<Vec<SitemapEntry>, SitemapError> {
    if let Some(collision) = route::find_collision(files) {
        return Err(SitemapError::UrlCollision {
            url: route::canonical_url(base_url, &collision.key),
            first: collision.first,
            second: collision.second,
        });
    }

    let root = route::root_url(base_url);
    let mut entries = files
        .par_iter()
        .map(|file| -> Result<SitemapEntry, SitemapError> {
            let loc = route::canonical_url(base_url, &route::slugs(&file.rel_path));
            let lastmod = last_modified(&file.path)?;
            let priority = if loc == root {
                Priority::Root
            } else {
                Priority::Page
            };
            Ok(SitemapEntry {
                loc,
                lastmod,
                changefreq: CHANGE_FREQUENCY,
                priority,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| a.loc.cmp(&b.loc));
    Ok(entries)
}

impl Sitemap {
    pub fn build(files: &[ContentFile], base_url: &str) -> Result<Self, SitemapError> {
        Ok(Self {
            entries: build_entries(files, base_url)?,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.entries.len() * 160);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            push_element(&mut xml, "loc", &entry.loc);
            push_element(&mut xml, "lastmod", &entry.lastmod.format(DATE_FORMAT).to_string());
            push_element(&mut xml, "changefreq", entry.changefreq);
            push_element(&mut xml, "priority", entry.priority.as_str());
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Replace `path` with the serialized document.
    pub fn write(&self, path: &Path) -> Result<(), SitemapError> {
        crate::fsio::write_atomic(path, self.to_xml().as_bytes()).map_err(|source| {
            SitemapError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(path = %path.display(), urls = self.len(), "sitemap written");
        Ok(())
    }
}

/// Discover, build, and write the sitemap in one pass.
pub fn generate(
    content_root: &Path,
    base_url: &str,
    output: &Path,
) -> Result<Sitemap, SitemapError> {
    let files = scan::discover(content_root)?;
    debug!(files = files.len(), root = %content_root.display(), "building sitemap");
    let sitemap = Sitemap::build(&files, base_url)?;
    sitemap.write(output)?;
    Ok(sitemap)
}

fn push_element(xml: &mut String, name: &str, text: &str) {
    xml.push_str("    <");
    xml.push_str(name);
    xml.push('>');
    xml.push_str(&escape_xml(text));
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
