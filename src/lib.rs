//! The sitemill library writes large XML sitemaps (sitemaps.org protocol) from a
//! stream of URLs: sub-sitemaps are split by URL count, gzipped and referenced
//! from a `sitemap.xml` index file.

pub mod constants;
pub mod entry;
pub mod generate;
pub mod sink;
pub mod validate;
pub mod writer;

/// Enum representing the format URLs are read in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputFormat {
    /// One URL per line
    #[default]
    Lines,
    /// One JSON object per URL, with optional properties and section
    JsonLines,
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "lines" => Ok(InputFormat::Lines),
            "jsonl" => Ok(InputFormat::JsonLines),
            _ => Err(format!("Invalid input format: {}", input)),
        }
    }
}

pub use entry::UrlEntry;
pub use generate::generate;
pub use sink::{FsSink, MemorySink, OutputSink, OutputStream};
pub use writer::{SitemapWriter, WriterOptions};
