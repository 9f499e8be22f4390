use clap::{Parser, Subcommand};
use mdx_sitemap::{config, export, logging, output, scan, sitemap};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "mdx-sitemap")]
#[command(about = "Sitemap and Markdown export generator for MDX documentation")]
#[command(long_about = "\
Sitemap and Markdown export generator for MDX documentation

Every .mdx file below the content root is a page. Its path relative to the
root decides its URL:

  content/docs/
  ├── index.mdx                    # → https://s.ee/docs/
  ├── meta.json                    # ignored (not .mdx)
  ├── guide/
  │   └── getting-started.mdx      # → https://s.ee/docs/guide/getting-started/
  └── api/
      ├── index.mdx                # → https://s.ee/docs/api/
      └── overview.mdx             # → https://s.ee/docs/api/overview/

Outputs:
  sitemap.xml     one <url> per page, sorted by URL, lastmod from file mtime
  llms.mdx/*.md   plain Markdown per page (frontmatter and imports removed)

A page next to a same-named directory index (foo.mdx and foo/index.mdx) is
an error: both would claim the same URL.

Settings resolve as: stock defaults → config.toml → command-line flags.
Run 'mdx-sitemap gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (optional; missing file means stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Content directory [default: content/docs]
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Absolute URL the content directory is published at [default: https://s.ee/docs]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Sitemap file [default: public/sitemap.xml]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Markdown export directory [default: public/llms.mdx]
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write sitemap.xml for the content directory
    Sitemap,
    /// Write the Markdown export of every page
    Export,
    /// Write both the sitemap and the Markdown export
    Build,
    /// Print the JSON page manifest
    Scan,
    /// Validate content and routes without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config, Some(flag_overrides(&cli)))?;
    init_thread_pool(&site_config.processing);

    let content_root = PathBuf::from(&site_config.content_root);
    let base_url = site_config.base_url.as_str();
    let sitemap_path = PathBuf::from(&site_config.sitemap.output);
    let export_dir = PathBuf::from(&site_config.export.output_dir);

    match cli.command {
        Command::Sitemap => {
            let sitemap = sitemap::generate(&content_root, base_url, &sitemap_path)?;
            output::print_sitemap_output(&sitemap_path, sitemap.len());
        }
        Command::Export => {
            let written = export::export(&content_root, &export_dir)?;
            output::print_export_output(&written, &export_dir);
        }
        Command::Build => {
            info!(root = %content_root.display(), "scanning");
            let files = scan::discover(&content_root)?;
            // Both outputs are validated before either is written.
            let sitemap = sitemap::Sitemap::build(&files, base_url)?;
            let pages = export::load_pages(&files)?;

            sitemap.write(&sitemap_path)?;
            output::print_sitemap_output(&sitemap_path, sitemap.len());
            let written = export::export_pages(&pages, &export_dir)?;
            output::print_export_output(&written, &export_dir);
        }
        Command::Scan => {
            let pages = export::manifest(&content_root, base_url)?;
            output::print_scan_output(&pages)?;
        }
        Command::Check => {
            let files = scan::discover(&content_root)?;
            sitemap::Sitemap::build(&files, base_url)?;
            let pages = export::load_pages(&files)?;
            output::print_check_output(&export::summaries(&pages, base_url));
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Config overlay built from the command-line flags that were given.
fn flag_overrides(cli: &Cli) -> toml::Value {
    let mut table = toml::Table::new();
    if let Some(source) = &cli.source {
        table.insert("content_root".into(), path_value(source));
    }
    if let Some(base_url) = &cli.base_url {
        table.insert("base_url".into(), toml::Value::String(base_url.clone()));
    }
    if let Some(out) = &cli.output {
        table.insert("sitemap".into(), section("output", path_value(out)));
    }
    if let Some(dir) = &cli.export_dir {
        table.insert("export".into(), section("output_dir", path_value(dir)));
    }
    toml::Value::Table(table)
}

fn section(key: &str, value: toml::Value) -> toml::Value {
    let mut table = toml::Table::new();
    table.insert(key.into(), value);
    toml::Value::Table(table)
}

fn path_value(path: &Path) -> toml::Value {
    toml::Value::String(path.to_string_lossy().into_owned())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. User can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
