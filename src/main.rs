use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use notesite::config::{self, SiteConfig};
use notesite::generate::{self, Site};
use notesite::{extract, output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notesite")]
#[command(about = "Publish a directory of notes as a static blog")]
#[command(long_about = "\
Publish a directory of notes as a static blog

Notes are plain markdown-ish text files. Nothing is declared up front: the
metadata of each note is found in its text.

  Title:  first '# heading' line         → file name without extension
  Date:   first YYYY-MM-DD in the text   → file modification time
  Tags:   first 'tags: a, b' line        → none
  Teaser: first 100 characters

Site structure:

  site/
  ├── notesite.json            # Config (optional, see gen-config)
  ├── index.html               # Theme page; teaser region regenerated
  ├── archives/index.html      # Theme page; archive region regenerated
  ├── tags/index.html          # Theme page; tag region regenerated
  ├── atom.xml                 # Feed (generated)
  ├── post/<slug>/index.html   # Article pages (generated)
  └── tag/<slug>/index.html    # Tag pages (generated)

Run 'notesite init' to write empty theme pages into a new site.")]
#[command(version)]
struct Cli {
    /// Site root holding the theme pages and generated output
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Config file [default: <site>/notesite.json]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import every note under a directory and regenerate listings
    Import {
        /// Notes directory, searched recursively
        notes: PathBuf,
    },
    /// Publish a single note and regenerate listings
    New {
        /// Note file
        file: PathBuf,
        /// Title, instead of the note's heading
        #[arg(long)]
        title: Option<String>,
        /// Publish date as YYYY-MM-DD, instead of the date in the note
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Comma-separated tags, instead of the note's tags line
        #[arg(long)]
        tags: Option<String>,
    },
    /// Regenerate listings and feed from the published article pages
    Update,
    /// Scan a notes directory and show what would be imported
    Check {
        /// Notes directory, searched recursively
        notes: PathBuf,
    },
    /// Write empty theme pages where the site has none
    Init,
    /// Print the default notesite.json
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        site: site_root,
        config: config_path,
        verbose,
        command,
    } = Cli::parse();
    init_tracing(verbose);
    let today = Local::now().date_naive();

    match command {
        Command::Import { notes } => {
            let config = load_site_config(&site_root, config_path.as_deref())?;
            let site = Site {
                root: &site_root,
                config: &config,
                today,
            };
            println!("==> Importing {} → {}", notes.display(), site_root.display());
            let (scan, report) = generate::import(&site, &notes)?;
            output::print_scan_output(&scan, &notes);
            println!();
            generate::log_skipped(&report.skipped);
            output::print_generate_output(&report, &site_root);
            println!("==> Site updated: {}", site_root.display());
        }
        Command::New {
            file,
            title,
            date,
            tags,
        } => {
            let config = load_site_config(&site_root, config_path.as_deref())?;
            let site = Site {
                root: &site_root,
                config: &config,
                today,
            };
            let overrides = scan::Overrides {
                title,
                date,
                tags: tags.as_deref().map(extract::split_tags),
            };
            let article = scan::load_article(&file, &overrides)?;
            println!("==> Publishing {} as {}", file.display(), article.path());
            let report = generate::publish(&site, &article)?;
            generate::log_skipped(&report.skipped);
            output::print_generate_output(&report, &site_root);
            println!("==> Site updated: {}", site_root.display());
        }
        Command::Update => {
            let config = load_site_config(&site_root, config_path.as_deref())?;
            let site = Site {
                root: &site_root,
                config: &config,
                today,
            };
            println!("==> Regenerating listings in {}", site_root.display());
            let report = generate::rebuild(&site)?;
            generate::log_skipped(&report.skipped);
            output::print_generate_output(&report, &site_root);
            println!("==> Site updated: {}", site_root.display());
        }
        Command::Check { notes } => {
            println!("==> Checking {}", notes.display());
            let scan = scan::scan_sources(&notes)?;
            output::print_scan_output(&scan, &notes);
            println!(
                "==> {} articles, {} skipped",
                scan.articles.len(),
                scan.skipped.len()
            );
        }
        Command::Init => {
            let config = load_site_config(&site_root, config_path.as_deref())?;
            let site = Site {
                root: &site_root,
                config: &config,
                today,
            };
            let written = generate::scaffold(&site)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
            println!("==> {} files written to {}", written.len(), site_root.display());
        }
        Command::GenConfig => {
            println!("{}", config::stock_config_json());
        }
    }

    Ok(())
}

/// Load `path`, or `<site>/notesite.json` when no path is given.
fn load_site_config(site_root: &Path, path: Option<&Path>) -> Result<SiteConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => config::load_config(&site_root.join(config::CONFIG_FILE)),
    }
}

/// Log to stderr so stdout carries only the inventory.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
