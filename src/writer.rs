//! The writer module splits a stream of URLs into sub-sitemap files and writes
//! the sitemap index referencing all of them.

use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, error, info};
use quick_xml::escape::partial_escape;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_SECTION, GENERATOR, INDEX_FILE_NAME, SITEMAP_NAMESPACE, URLS_PER_FILE,
    XML_DECLARATION,
};
use crate::entry::UrlEntry;
use crate::sink::{FsSink, OutputSink, OutputStream};

/// Options controlling how sub-sitemaps are produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WriterOptions {
    /// Maximum number of URLs a single sub-sitemap holds.
    pub urls_per_file: usize,
    /// Whether sub-sitemaps are gzipped (`.xml.gz`) or plain (`.xml`).
    /// The index file is always plain.
    pub compress: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            urls_per_file: URLS_PER_FILE,
            compress: true,
        }
    }
}

/// Writes large XML sitemaps as a sitemap index with sub-sitemap files.
///
/// Sub-sitemaps are named `sitemap-{NNN}-{section}.xml.gz`, where `NNN` is a
/// sequence shared by all sections. A sub-sitemap is only created when the first
/// URL for it arrives, so sections left empty produce no file.
///
/// The index is written by [`SitemapWriter::close`]. A writer dropped without
/// being closed is closed from `Drop`, with any error logged.
///
/// ```no_run
/// use sitemill::SitemapWriter;
///
/// # fn main() -> anyhow::Result<()> {
/// let mut writer = SitemapWriter::new("/var/www/sitemaps", "https://example.net");
/// writer.add_url("/about.html")?;
/// writer.add_section("products")?;
/// # let products = vec!["/phone.html".to_owned()];
/// writer.add_urls(&products)?;
/// writer.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SitemapWriter<S: OutputSink = FsSink> {
    path: PathBuf,
    root_url: String,
    options: WriterOptions,
    sink: S,
    sitemaps: Vec<String>,
    section: String,
    total_urls: usize,
    sitemap_urls: usize,
    sitemap_stream: Option<S::Stream>,
    finished: bool,
}

impl SitemapWriter<FsSink> {
    /// Creates a writer storing gzipped sub-sitemaps in the `path` directory.
    ///
    /// `root_url` is prepended to every added URL and used to link sub-sitemaps
    /// from the index. The directory is expected to exist.
    pub fn new(path: impl AsRef<Path>, root_url: &str) -> Self {
        Self::with_sink(path, root_url, WriterOptions::default(), FsSink::default())
    }
}

impl<S: OutputSink> SitemapWriter<S> {
    /// Creates a writer with custom options, writing through the given sink.
    pub fn with_sink(
        path: impl AsRef<Path>,
        root_url: &str,
        options: WriterOptions,
        sink: S,
    ) -> Self {
        Self {
            // collecting components drops trailing separators
            path: path.as_ref().components().collect(),
            root_url: root_url.trim_end_matches('/').to_owned(),
            options: WriterOptions {
                urls_per_file: options.urls_per_file.max(1),
                ..options
            },
            sink,
            sitemaps: Vec::new(),
            section: DEFAULT_SECTION.to_owned(),
            total_urls: 0,
            sitemap_urls: 0,
            sitemap_stream: None,
            finished: false,
        }
    }

    /// Adds a URL with its optional properties to the current section.
    ///
    /// The URL is appended to the root URL, leading slashes are ignored. Invalid
    /// `lastmod`, `priority` or `changefreq` values are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns an error if a sub-sitemap can't be created or written to.
    pub fn add_url<'a>(&mut self, entry: impl Into<UrlEntry<'a>>) -> Result<()> {
        let entry = entry.into();

        if self.sitemap_stream.is_none() {
            self.add_sitemap()?;
        } else if self.sitemap_urls >= self.options.urls_per_file {
            info!(
                "URLs per sitemap counter reached the limit of {}",
                self.options.urls_per_file
            );
            // the full sitemap is closed with its own count
            self.add_sitemap()?;
            self.sitemap_urls = 0;
        }

        self.total_urls += 1;
        self.sitemap_urls += 1;

        let url = format!("{}/{}", self.root_url, entry.loc.trim_start_matches('/'));
        debug!("Adding URL <{url}>");

        let xml = entry.to_xml(&url);
        self.write_to_sitemap(&xml, true)
    }

    /// Adds every URL yielded by `urls`, one at a time.
    ///
    /// The iterator is consumed lazily, so it may yield far more URLs than fit
    /// in memory.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`SitemapWriter::add_url`]; the remaining URLs
    /// are not consumed.
    pub fn add_urls<I>(&mut self, urls: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for url in urls {
            self.add_url(url.as_ref())?;
        }

        Ok(())
    }

    /// Starts a new section named `section`.
    ///
    /// The current sub-sitemap is closed; the next one is created lazily by the
    /// first URL added, with a filename containing the section name.
    ///
    /// # Errors
    ///
    /// Returns an error if the current sub-sitemap can't be closed.
    pub fn add_section(&mut self, section: &str) -> Result<()> {
        self.close_sitemap()?;

        self.section = section.to_owned();
        self.sitemap_urls = 0;

        Ok(())
    }

    /// Closes the current sub-sitemap and writes the `sitemap.xml` index.
    ///
    /// # Errors
    ///
    /// Returns an error if the sub-sitemap can't be closed or the index can't be
    /// written. Neither is attempted again when the writer is dropped.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    /// Number of URLs added so far.
    pub fn len(&self) -> usize {
        self.total_urls
    }

    pub fn is_empty(&self) -> bool {
        self.total_urls == 0
    }

    /// Filenames of the sub-sitemaps created so far, in creation order.
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    fn sitemap_stream(&mut self) -> Result<&mut S::Stream> {
        self.sitemap_stream
            .as_mut()
            .context("add_section() needs to be called before writing to a sitemap")
    }

    fn write_to_sitemap(&mut self, buf: &str, indent: bool) -> Result<()> {
        let stream = self.sitemap_stream()?;
        if indent {
            stream.write_line(&format!("\t{buf}"))
        } else {
            stream.write_line(buf)
        }
    }

    /// Closes the previous sub-sitemap and opens the next one.
    fn add_sitemap(&mut self) -> Result<()> {
        self.close_sitemap()?;

        let extension = if self.options.compress { "xml.gz" } else { "xml" };
        let sitemap_name = format!(
            "sitemap-{:03}-{}.{extension}",
            self.sitemaps.len() + 1,
            self.section
        );
        let sitemap_path = self.path.join(&sitemap_name);

        info!("New sitemap added: {sitemap_name}");
        self.sitemaps.push(sitemap_name);

        let stream = if self.options.compress {
            self.sink.open_compressed(&sitemap_path)?
        } else {
            self.sink.open_plain(&sitemap_path)?
        };
        self.sitemap_stream = Some(stream);
        info!("Will write sitemap XML to {}", sitemap_path.display());

        self.write_to_sitemap(XML_DECLARATION, false)?;
        self.write_to_sitemap(&format!("<urlset xmlns=\"{SITEMAP_NAMESPACE}\">"), false)
    }

    fn close_sitemap(&mut self) -> Result<()> {
        let Some(mut stream) = self.sitemap_stream.take() else {
            return Ok(());
        };

        if let Some(sitemap_name) = self.sitemaps.last() {
            info!("Closing {sitemap_name}");
        }

        stream.write_line("</urlset>")?;
        stream.write_line(&format!("<!-- {} urls in the sitemap -->", self.sitemap_urls))?;
        stream.close()
    }

    fn write_index(&mut self) -> Result<()> {
        let index_path = self.path.join(INDEX_FILE_NAME);
        info!("Will write sitemaps index XML to {}", index_path.display());

        let generated_on = Local::now().format("%Y-%m-%d");
        let mut index = self.sink.open_plain(&index_path)?;

        index.write_line(XML_DECLARATION)?;
        index.write_line(&format!("<sitemapindex xmlns=\"{SITEMAP_NAMESPACE}\">"))?;
        index.write_line(&format!("\t<!-- Generated on {generated_on} by {GENERATOR} -->"))?;
        index.write_line(&format!(
            "\t<!-- {} urls in {} sub-sitemaps -->",
            self.total_urls,
            self.sitemaps.len()
        ))?;

        for sitemap in &self.sitemaps {
            let loc = format!("{}/{sitemap}", self.root_url);
            index.write_line(&format!(
                "\t<sitemap><loc>{}</loc></sitemap>",
                partial_escape(&loc)
            ))?;
        }

        index.write_line("</sitemapindex>")?;
        index.close()
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        self.close_sitemap()?;
        self.write_index()
    }
}

impl<S: OutputSink> Drop for SitemapWriter<S> {
    fn drop(&mut self) {
        if let Err(err) = self.finish() {
            error!("Unable to finish sitemap at {}: {err:#}", self.path.display());
        }
    }
}

impl<S: OutputSink> fmt::Display for SitemapWriter<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "<SitemapWriter at {} ({} URLs)>",
            self.path.display(),
            self.total_urls
        )
    }
}

impl<S: OutputSink> fmt::Debug for SitemapWriter<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SitemapWriter")
            .field("path", &self.path)
            .field("root_url", &self.root_url)
            .field("options", &self.options)
            .field("sitemaps", &self.sitemaps)
            .field("section", &self.section)
            .field("total_urls", &self.total_urls)
            .field("sitemap_urls", &self.sitemap_urls)
            .field("finished", &self.finished)
            .finish()
    }
}
