//! MDX page parsing: frontmatter, processed body, and title resolution.
//!
//! A page file looks like:
//!
//! ```text
//! ---
//! title: Create Short URL
//! description: Shorten a link with the API
//! icon: Link
//! ---
//!
//! import { Callout } from 'fumadocs-ui/components/callout';
//!
//! Send a `POST` request to ...
//! ```
//!
//! The frontmatter block is optional and only `title`, `description` and
//! `icon` are read; other keys are ignored. The processed body is what
//! follows the frontmatter, minus the leading MDX `import`/`export` lines
//! which carry no prose.
//!
//! ## Title resolution (first available wins)
//!
//! 1. frontmatter `title`
//! 2. first `# heading` line of the body
//! 3. last slug with dashes turned into spaces (`getting-started` → "getting started"),
//!    or `Home` for the root page

use crate::route;
use crate::types::{ContentFile, PageSummary};
use serde::Deserialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

const FRONTMATTER_DELIMITER: &str = "---";

const ROOT_TITLE: &str = "Home";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid frontmatter in {}: {source}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Recognized frontmatter keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Icon name used by the site navigation.
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub file: ContentFile,
    pub slugs: Vec<String>,
    pub frontmatter: Frontmatter,
    pub title: String,
    /// Body with frontmatter and leading ESM lines removed, trimmed.
    pub body: String,
}

/// Read and parse a page from disk.
pub fn parse_page(file: &ContentFile) -> Result<Page, PageError> {
    let source = std::fs::read_to_string(&file.path).map_err(|source| PageError::Read {
        path: file.path.clone(),
        source,
    })?;
    parse_source(file, &source).map_err(|source| PageError::Frontmatter {
        path: file.path.clone(),
        source,
    })
}

/// Parse page text already loaded into memory.
pub fn parse_source(file: &ContentFile, source: &str) -> Result<Page, serde_yaml::Error> {
    let (frontmatter, body) = match split_frontmatter(source) {
        Some((yaml, body)) if yaml.trim().is_empty() => (Frontmatter::default(), body),
        Some((yaml, body)) => (serde_yaml::from_str(yaml)?, body),
        None => (Frontmatter::default(), source),
    };

    let body = strip_esm(body).trim().to_string();
    let slugs = route::slugs(&file.rel_path);
    let title = resolve_title(&frontmatter, &body, &slugs);

    Ok(Page {
        file: file.clone(),
        slugs,
        frontmatter,
        title,
        body,
    })
}

/// Split `---`-delimited frontmatter from the rest of the document.
///
/// Returns `None` when the document does not open with a delimiter line or
/// the block is never closed.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let first_break = source.find('\n')?;
    if source[..first_break].trim_end() != FRONTMATTER_DELIMITER {
        return None;
    }

    let rest = &source[first_break + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Drop the blank lines and `import`/`export` statements heading the body.
///
/// A statement may span several lines (`import {\n  Tab,\n} from '...';`);
/// it ends on the first line that closes every open bracket and does not
/// leave the clause dangling on `from`, `,` or `=`.
fn strip_esm(body: &str) -> &str {
    let mut offset = 0;
    let mut in_statement = false;
    let mut depth: i64 = 0;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim();
        if !in_statement {
            if trimmed.is_empty() {
                offset += line.len();
                continue;
            }
            if !is_esm_start(trimmed) {
                break;
            }
            in_statement = true;
            depth = 0;
        }

        depth += bracket_balance(trimmed);
        offset += line.len();
        if depth <= 0 && !continues_statement(trimmed) {
            in_statement = false;
        }
    }
    &body[offset..]
}

fn is_esm_start(line: &str) -> bool {
    ["import ", "import{", "export "]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

fn bracket_balance(line: &str) -> i64 {
    line.chars()
        .map(|c| match c {
            '{' | '(' | '[' => 1,
            '}' | ')' | ']' => -1,
            _ => 0,
        })
        .sum()
}

/// Clause still open at the end of the line: `import Foo from`, `export const x =`.
fn continues_statement(line: &str) -> bool {
    let line = line.trim_end_matches(';').trim_end();
    line.ends_with(" from") || line.ends_with(',') || line.ends_with('=')
}

fn resolve_title(frontmatter: &Frontmatter, body: &str, slugs: &[String]) -> String {
    if let Some(title) = frontmatter
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return title.to_string();
    }
    if let Some(heading) = first_heading(body) {
        return heading.to_string();
    }
    slugs
        .last()
        .map(|s| s.replace('-', " "))
        .unwrap_or_else(|| ROOT_TITLE.to_string())
}

/// First level-one heading outside fenced code blocks.
fn first_heading(body: &str) -> Option<&str> {
    let mut fence: Option<&str> = None;
    for line in body.lines() {
        let trimmed = line.trim_start();
        match fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
            }
            None if trimmed.starts_with("```") => fence = Some("```"),
            None if trimmed.starts_with("~~~") => fence = Some("~~~"),
            None => {
                if let Some(heading) = line.strip_prefix("# ").map(str::trim) {
                    if !heading.is_empty() {
                        return Some(heading);
                    }
                }
            }
        }
    }
    None
}

/// Render the Markdown export: a title heading followed by the body.
///
/// A body that already opens with the same heading is not given a second one.
pub fn render_markdown(page: &Page) -> String {
    let heading = format!("# {}", page.title);
    let starts_with_heading = page
        .body
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == heading);

    if starts_with_heading {
        format!("{}\n", page.body)
    } else if page.body.is_empty() {
        format!("{heading}\n")
    } else {
        format!("{heading}\n\n{}\n", page.body)
    }
}

/// Manifest row for a page.
pub fn summarize(page: &Page, base_url: &str) -> PageSummary {
    PageSummary {
        source: page.file.rel_path.clone(),
        slugs: page.slugs.clone(),
        url: route::canonical_url(base_url, &page.slugs),
        markdown_url: route::markdown_url(base_url, &page.slugs),
        title: page.title.clone(),
        description: page.frontmatter.description.clone(),
    }
}
