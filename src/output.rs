//! CLI output formatting for all commands.
//!
//! Results go to stdout, diagnostics go to stderr through `tracing`. Every
//! page is listed by its identity first (positional index and title) with the
//! source file shown as an indented `Source:` line, so the output reads as a
//! content inventory while staying traceable to files.
//!
//! # Output Format
//!
//! ## Sitemap
//!
//! ```text
//! Generated: public/sitemap.xml with 3 URLs
//! ```
//!
//! ## Export
//!
//! ```text
//! 001 Welcome → index.md
//!     Source: index.mdx
//! 002 API → api.md
//!     Source: api/index.mdx
//!
//! Exported 2 pages to public/llms.mdx
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 https://s.ee/docs/
//!     Source: index.mdx
//! 002 https://s.ee/docs/api/
//!     Source: api/index.mdx
//!
//! 2 pages, no route collisions
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::export::ExportedPage;
use crate::types::PageSummary;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn source_line(source: &str) -> String {
    format!("    Source: {source}")
}

/// `1 page`, `2 pages`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Render a relative path with `/` separators on every platform.
fn slash_path(path: &Path) -> String {
    path.iter()
        .map(|c| c.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// sitemap
// ============================================================================

pub fn format_sitemap_output(path: &Path, urls: usize) -> Vec<String> {
    vec![format!("Generated: {} with {} URLs", path.display(), urls)]
}

pub fn print_sitemap_output(path: &Path, urls: usize) {
    print_lines(format_sitemap_output(path, urls));
}

// ============================================================================
// export
// ============================================================================

pub fn format_export_output(pages: &[ExportedPage], export_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            slash_path(&page.output)
        ));
        lines.push(source_line(&page.source));
    }
    if !pages.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Exported {} to {}",
        plural(pages.len(), "page"),
        export_dir.display()
    ));
    lines
}

pub fn print_export_output(pages: &[ExportedPage], export_dir: &Path) {
    print_lines(format_export_output(pages, export_dir));
}

// ============================================================================
// check
// ============================================================================

/// Route listing for `check`, in the order given (the manifest is URL-sorted).
pub fn format_check_output(pages: &[PageSummary]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.url));
        lines.push(source_line(&page.source));
    }
    if !pages.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("{}, no route collisions", plural(pages.len(), "page")));
    lines
}

pub fn print_check_output(pages: &[PageSummary]) {
    print_lines(format_check_output(pages));
}

// ============================================================================
// scan
// ============================================================================

/// Pretty JSON page manifest.
pub fn format_scan_output(pages: &[PageSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pages)
}

pub fn print_scan_output(pages: &[PageSummary]) -> Result<(), serde_json::Error> {
    println!("{}", format_scan_output(pages)?);
    Ok(())
}
