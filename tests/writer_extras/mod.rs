#![allow(dead_code)]

use flate2::read::GzDecoder;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use sitemap::structs::Location;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sitemill::SitemapWriter;
use tempfile::TempDir;

pub const DEFAULT_HOST: &str = "http://example.net";

/// Yields `/{prefix}_{idx}.html` for `idx` in `1..=count`.
pub fn urls(count: usize, prefix: &str) -> impl Iterator<Item = String> + '_ {
    (1..=count).map(move |idx| format!("/{prefix}_{idx}.html"))
}

/// A writer operating in a fresh temporary directory.
pub fn test_sitemap() -> (SitemapWriter, TempDir) {
    let directory = tempfile::Builder::new()
        .prefix("sitemap_test_")
        .tempdir()
        .expect("Unable to create temporary directory.");
    let writer = SitemapWriter::new(directory.path(), DEFAULT_HOST);

    (writer, directory)
}

pub fn read_gz(path: impl AsRef<Path>) -> String {
    let file = File::open(path).expect("Unable to open gzipped sitemap.");
    let mut content = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut content)
        .expect("Unable to decompress sitemap.");

    content
}

pub fn read_plain(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path).expect("Unable to read sitemap.")
}

/// Parses `content` and returns `<loc>` values of `<url>` and `<sitemap>` entries, in document order.
pub fn locations(content: &str) -> Vec<String> {
    SiteMapReader::new(content.as_bytes())
        .filter_map(|entity| match entity {
            SiteMapEntity::Url(entry) => location(entry.loc),
            SiteMapEntity::SiteMap(entry) => location(entry.loc),
            SiteMapEntity::Err(_) => None,
        })
        .collect()
}

fn location(loc: Location) -> Option<String> {
    if let Location::Url(url) = loc {
        Some(url.to_string())
    } else {
        None
    }
}

pub fn count_urls(content: &str) -> usize {
    content.matches("<url>").count()
}

/// Generates tests asserting the `<url>` tag written for an entry.
#[macro_export]
macro_rules! assert_url_tags {
    (
        $(
            $test_name:ident : entry => $entry:expr, tag => $tag:expr
        ),+ $(,)?
    ) => {
        $(
            #[test]
            fn $test_name() {
                let sink = sitemill::MemorySink::new();
                let options = sitemill::WriterOptions {
                    compress: false,
                    ..Default::default()
                };
                let mut writer = sitemill::SitemapWriter::with_sink(
                    "/",
                    $crate::writer_extras::DEFAULT_HOST,
                    options,
                    sink.clone(),
                );
                writer.add_url($entry).expect("Expected URL to be added.");
                writer.close().expect("Expected writer to close.");

                let content = sink
                    .file("/sitemap-001-pages.xml")
                    .expect("Expected sub-sitemap to be written.")
                    .content;

                let expected = format!("\t{}", $tag);
                assert_that(&content.lines().nth(2)).is_equal_to(Some(expected.as_str()));
            }
        )+
    }
}
