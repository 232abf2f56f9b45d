//! sitemill is a CLI tool that writes large XML sitemaps from a list of URLs.
//!
//! URLs are read from a file or stdin, split into gzipped sub-sitemaps and
//! referenced from a `sitemap.xml` index written to the output directory.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, info};
use url::Url;

use sitemill::{
    FsSink, InputFormat, SitemapWriter, WriterOptions,
    constants::{DEFAULT_SECTION, GZIP_COMPRESSION_LEVEL, URLS_PER_FILE},
    generate,
};

/// A CLI tool to write large XML sitemaps with a sitemap index
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to write sitemap files to, created when missing
    output_dir: PathBuf,
    /// Root URL prepended to every URL and to sub-sitemap links in the index
    root_url: String,
    /// File to read URLs from (default: stdin)
    #[arg(long, short)]
    input: Option<PathBuf>,
    /// Input format: "lines" (default) or "jsonl"
    #[arg(long, short, default_value = "lines")]
    format: InputFormat,
    /// Section name used in the filenames of the first sub-sitemaps
    #[arg(long, short, default_value = DEFAULT_SECTION)]
    section: String,
    /// Maximum number of URLs per sub-sitemap
    #[arg(long, default_value_t = URLS_PER_FILE)]
    urls_per_file: usize,
    /// Write plain .xml sub-sitemaps instead of gzipped ones
    #[arg(long)]
    plain: bool,
    /// Gzip compression level (0-9)
    #[arg(long, default_value_t = GZIP_COMPRESSION_LEVEL, value_parser = clap::value_parser!(u32).range(0..=9))]
    compression_level: u32,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let root_url =
        Url::parse(&cli.root_url).map_err(|e| anyhow::anyhow!("Invalid root url: {}", e))?;

    fs::create_dir_all(&cli.output_dir).context(format!(
        "Failed to create output directory: {}",
        cli.output_dir.display()
    ))?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).context(format!("Failed to read input file: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let options = WriterOptions {
        urls_per_file: cli.urls_per_file,
        compress: !cli.plain,
    };
    let mut writer = SitemapWriter::with_sink(
        &cli.output_dir,
        root_url.as_str(),
        options,
        FsSink::new(cli.compression_level),
    );
    writer.add_section(&cli.section)?;

    generate(input, cli.format, &mut writer)?;

    info!(
        "Composed {} URLs into {} sub-sitemaps in {}",
        writer.len(),
        writer.sitemaps().len(),
        writer.path().display()
    );
    writer.close()
}
