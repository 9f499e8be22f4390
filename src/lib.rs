//! # mdx-sitemap
//!
//! Publishing companion for an MDX documentation site. The content directory
//! is the data source: every `.mdx` file below it is one page, and its path
//! decides the page's URL.
//!
//! # Architecture: Discovery, Then Independent Outputs
//!
//! ```text
//! 1. Scan      content/docs/  →  [ContentFile]         (filesystem walk)
//! 2. Sitemap   [ContentFile]  →  public/sitemap.xml    (canonical URLs + lastmod)
//! 3. Export    [ContentFile]  →  public/llms.mdx/*.md  (plain Markdown per page)
//! ```
//!
//! Both outputs are derived from the same discovery pass and share the
//! routing rules in [`route`]. Nothing is cached between runs; every
//! invocation rebuilds its outputs from the tree as it is now.
//!
//! # Routing
//!
//! ```text
//! content/docs/index.mdx            →  https://s.ee/docs/
//! content/docs/api/index.mdx        →  https://s.ee/docs/api/
//! content/docs/api/overview.mdx     →  https://s.ee/docs/api/overview/
//! ```
//!
//! Two files may never share a URL. `foo.mdx` next to `foo/index.mdx` is
//! reported as a collision instead of silently dropping one of them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: recursive discovery of `.mdx` files |
//! | [`route`] | Path → slug → URL mapping, collision detection |
//! | [`sitemap`] | Stage 2: sitemap entries, XML serialization, atomic write |
//! | [`page`] | Frontmatter parsing, body cleanup, title resolution |
//! | [`export`] | Stage 3: Markdown export and the JSON page manifest |
//! | [`config`] | `config.toml` loading, layering, and validation |
//! | [`fsio`] | Atomic file replacement |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`output`] | CLI result formatting |
//! | [`types`] | Types shared between stages |
//!
//! # Failure Policy
//!
//! Every error aborts the run before the affected output is written. An
//! existing `sitemap.xml` is either left untouched or replaced by a complete
//! new document, never truncated.

pub mod config;
pub mod export;
pub mod fsio;
pub mod logging;
pub mod output;
pub mod page;
pub mod route;
pub mod scan;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
