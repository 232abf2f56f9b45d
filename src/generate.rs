//! The generate module feeds URLs read from a text source into a [`SitemapWriter`].

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::io::BufRead;

use crate::InputFormat;
use crate::entry::UrlEntry;
use crate::sink::OutputSink;
use crate::writer::SitemapWriter;

/// A single URL of the `jsonl` input format.
#[derive(Debug, Deserialize)]
pub struct UrlRecord {
    pub url: String,
    #[serde(default)]
    pub lastmod: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub changefreq: Option<String>,
    /// Starts a new section when it differs from the current one.
    #[serde(default)]
    pub section: Option<String>,
}

/// Priority given either as a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Number(serde_json::Number),
    Text(String),
}

impl Priority {
    fn into_text(self) -> String {
        match self {
            Priority::Number(number) => number.to_string(),
            Priority::Text(text) => text,
        }
    }
}

/// Reads URLs from `input` and adds them to `writer`, returning how many were added.
///
/// Input is read lazily, one URL at a time:
///
/// * `lines` - one URL per line; blank lines and lines starting with `#` are skipped
/// * `jsonl` - a stream of JSON objects, see [`UrlRecord`]
///
/// The writer is left open, so more URLs may be added before closing it.
///
/// # Errors
///
/// Returns an error if:
/// * The input can't be read or contains malformed JSON
/// * Sitemap files can't be written
pub fn generate<R, S>(
    input: R,
    format: InputFormat,
    writer: &mut SitemapWriter<S>,
) -> Result<usize>
where
    R: BufRead,
    S: OutputSink,
{
    let added_before = writer.len();

    match format {
        InputFormat::Lines => {
            for (number, line) in input.lines().enumerate() {
                let line = line.with_context(|| format!("Unable to read line {}", number + 1))?;
                let url = line.trim();
                if url.is_empty() || url.starts_with('#') {
                    continue;
                }

                writer.add_url(url)?;
            }
        }
        InputFormat::JsonLines => {
            let records = serde_json::Deserializer::from_reader(input).into_iter::<UrlRecord>();
            for (number, record) in records.enumerate() {
                let record =
                    record.with_context(|| format!("Invalid URL record #{}", number + 1))?;
                add_record(writer, record)?;
            }
        }
    }

    let added = writer.len() - added_before;
    info!("Added {added} URLs to {writer}");
    Ok(added)
}

fn add_record<S: OutputSink>(writer: &mut SitemapWriter<S>, record: UrlRecord) -> Result<()> {
    if let Some(section) = record.section.as_deref()
        && section != writer.section()
    {
        writer.add_section(section)?;
    }

    let priority = record.priority.map(Priority::into_text);
    let entry = UrlEntry {
        loc: &record.url,
        lastmod: record.lastmod.as_deref(),
        priority: priority.as_deref(),
        changefreq: record.changefreq.as_deref(),
    };

    writer.add_url(entry)
}
