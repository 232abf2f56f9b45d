//! The sink module provides the output streams sitemap files are written to.
//!
//! [`FsSink`] writes real files, gzipped on request. [`MemorySink`] keeps the
//! written text in memory, which is handy for serving sitemaps without touching
//! the disk and for tests.

use anyhow::{Context, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::constants::GZIP_COMPRESSION_LEVEL;

/// Opens writable text streams at a given path.
pub trait OutputSink {
    type Stream: OutputStream;

    /// Opens a stream whose content is compressed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream can't be created.
    fn open_compressed(&mut self, path: &Path) -> Result<Self::Stream>;

    /// Opens a plain text stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream can't be created.
    fn open_plain(&mut self, path: &Path) -> Result<Self::Stream>;
}

/// A writable text stream opened by an [`OutputSink`].
pub trait OutputStream {
    /// Writes `line` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flushes and closes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the pending data can't be flushed.
    fn close(self) -> Result<()>;
}

/// Sink writing files to the local filesystem.
#[derive(Clone, Copy, Debug)]
pub struct FsSink {
    compression: Compression,
}

impl FsSink {
    /// Creates a sink gzipping compressed streams with the given level (0-9).
    pub fn new(compression_level: u32) -> Self {
        Self {
            compression: Compression::new(compression_level.min(9)),
        }
    }

    fn create(path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;

        Ok(BufWriter::new(file))
    }
}

impl Default for FsSink {
    fn default() -> Self {
        Self::new(GZIP_COMPRESSION_LEVEL)
    }
}

impl OutputSink for FsSink {
    type Stream = FileStream;

    fn open_compressed(&mut self, path: &Path) -> Result<FileStream> {
        Ok(FileStream {
            path: path.to_path_buf(),
            writer: FileWriter::Gzip(GzEncoder::new(Self::create(path)?, self.compression)),
        })
    }

    fn open_plain(&mut self, path: &Path) -> Result<FileStream> {
        Ok(FileStream {
            path: path.to_path_buf(),
            writer: FileWriter::Plain(Self::create(path)?),
        })
    }
}

enum FileWriter {
    Gzip(GzEncoder<BufWriter<File>>),
    Plain(BufWriter<File>),
}

/// A file opened by [`FsSink`].
pub struct FileStream {
    path: PathBuf,
    writer: FileWriter,
}

impl OutputStream for FileStream {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let written = match &mut self.writer {
            FileWriter::Gzip(encoder) => writeln!(encoder, "{line}"),
            FileWriter::Plain(writer) => writeln!(writer, "{line}"),
        };

        written.with_context(|| format!("Unable to write to {}", self.path.display()))
    }

    fn close(self) -> Result<()> {
        let flushed = match self.writer {
            FileWriter::Gzip(encoder) => encoder.finish().and_then(|mut writer| writer.flush()),
            FileWriter::Plain(mut writer) => writer.flush(),
        };

        flushed.with_context(|| format!("Unable to close {}", self.path.display()))
    }
}

/// A file kept by [`MemorySink`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MemoryFile {
    pub compressed: bool,
    pub content: String,
}

/// Sink keeping closed streams in memory, keyed by their path.
///
/// Clones share the same storage, so a clone kept by the caller sees the files
/// written through the one handed over to a writer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: Rc<RefCell<BTreeMap<PathBuf, MemoryFile>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the file stored at `path`, if it was closed already.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<MemoryFile> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Returns paths of all closed files in lexicographic order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    fn open(&self, path: &Path, compressed: bool) -> MemoryStream {
        MemoryStream {
            files: Rc::clone(&self.files),
            path: path.to_path_buf(),
            file: MemoryFile {
                compressed,
                content: String::new(),
            },
        }
    }
}

impl OutputSink for MemorySink {
    type Stream = MemoryStream;

    fn open_compressed(&mut self, path: &Path) -> Result<MemoryStream> {
        Ok(self.open(path, true))
    }

    fn open_plain(&mut self, path: &Path) -> Result<MemoryStream> {
        Ok(self.open(path, false))
    }
}

/// A stream opened by [`MemorySink`], stored on close.
pub struct MemoryStream {
    files: Rc<RefCell<BTreeMap<PathBuf, MemoryFile>>>,
    path: PathBuf,
    file: MemoryFile,
}

impl OutputStream for MemoryStream {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.file.content.push_str(line);
        self.file.content.push('\n');
        Ok(())
    }

    fn close(self) -> Result<()> {
        self.files.borrow_mut().insert(self.path, self.file);
        Ok(())
    }
}
