//! swagmark — generate a Swagger 2.0 document from annotated Go sources.
//!
//! Comments tagged `api:meta`, `api:route` or `api:model` on their first line
//! carry YAML fragments of the final document:
//!
//! ```text
//! swagmark ./myproject ./docs            # writes ./docs/swagger.json
//! swagmark ./myproject ./docs --yaml     # writes ./docs/swagger.yaml
//! swagmark ./myproject ./docs -p api     # only files in `package api`
//! ```

mod discover;
mod extract;
mod render;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use render::Format;
use std::fs;
use std::path::{Path, PathBuf};
use swagmark_core::{RawBlock, SourceBlocks};

#[derive(Parser)]
#[command(
    name = "swagmark",
    version,
    about = "Generate a Swagger 2.0 document from api:* comments in Go source files"
)]
struct Cli {
    /// Project directory, scanned recursively for .go files
    project_dir: PathBuf,

    /// Directory that receives swagger.json (or swagger.yaml)
    output_dir: PathBuf,

    /// Write YAML instead of JSON
    #[arg(short = 'y', long)]
    yaml: bool,

    /// Only read files whose package clause matches (case-insensitive)
    #[arg(short = 'p', long)]
    package: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

/// Everything one run needs, independent of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScanConfig {
    project_dir: PathBuf,
    output_dir: PathBuf,
    format: Format,
    package: Option<String>,
}

impl ScanConfig {
    fn from_cli(cli: Cli) -> Result<Self> {
        for dir in [&cli.project_dir, &cli.output_dir] {
            if !dir.is_dir() {
                bail!("{} does not exist", dir.display());
            }
        }
        Ok(ScanConfig {
            project_dir: cli.project_dir,
            output_dir: cli.output_dir,
            format: if cli.yaml { Format::Yaml } else { Format::Json },
            package: cli.package,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = ScanConfig::from_cli(cli)?;
    run(&config)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG is parsed last so it overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Scan, assemble and write the document; returns the written path.
fn run(config: &ScanConfig) -> Result<PathBuf> {
    let files = discover::go_files(&config.project_dir)?;
    log::info!(
        "found {} Go file(s) under {}",
        files.len(),
        config.project_dir.display()
    );

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        if let Some(blocks) = read_blocks(path, config.package.as_deref())? {
            sources.push(SourceBlocks::new(path.clone(), blocks));
        }
    }
    log::info!("assembling from {} file(s)", sources.len());

    let doc = swagmark_core::assemble(sources).context("failed to assemble swagger document")?;

    let renderer = render::create_renderer(config.format);
    let output = renderer.render(&doc)?;
    let out_path = config.output_dir.join(renderer.file_name());
    fs::write(&out_path, output)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    log::info!("wrote {}", out_path.display());
    Ok(out_path)
}

/// Comment blocks of one file, or `None` when the package filter drops it.
fn read_blocks(path: &Path, package: Option<&str>) -> Result<Option<Vec<RawBlock>>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let source = extract::extract_file(path, &content)
        .with_context(|| format!("failed to extract comments from {}", path.display()))?;
    if let Some(wanted) = package {
        if !source.in_package(wanted) {
            log::debug!("{}: not in package {}, skipped", path.display(), wanted);
            return Ok(None);
        }
    }
    Ok(Some(source.into_blocks()))
}
