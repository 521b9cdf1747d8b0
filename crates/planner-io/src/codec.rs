//! Factory layout (`.fl`) reader and writer.
//!
//! A layout file is a pretty-printed JSON array with one record per placed
//! building, in layout order:
//!
//! ```text
//! [
//!   {
//!     "type": "Smelter",
//!     "position": { "x": 10, "y": 10 },
//!     "rotation": 0
//!   }
//! ]
//! ```
//!
//! There is no header or version field. Loading replaces the whole document.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

use planner_core::{Catalog, CatalogError, InstanceRecord, Layout, PlacedInstance};

/// File extension used for saved layouts.
pub const LAYOUT_EXTENSION: &str = "fl";

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed layout document: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Unknown building type '{name}' in record {index}")]
    UnknownType { name: String, index: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// ── Reader ────────────────────────────────────────────────────────────

/// Reads a layout document and resolves every type against a catalog.
pub struct LayoutReader<R: Read> {
    reader: R,
}

impl<R: Read> LayoutReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Parse the whole stream. Nothing is returned unless every record resolves.
    pub fn read(&mut self, catalog: &Catalog) -> Result<Layout, CodecError> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        decode(&text, catalog)
    }
}

// ── Writer ────────────────────────────────────────────────────────────

pub struct LayoutWriter<W: Write> {
    writer: W,
}

impl<W: Write> LayoutWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, layout: &Layout) -> Result<(), CodecError> {
        let text = encode(layout)?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

// ── Text helpers ──────────────────────────────────────────────────────

pub fn encode(layout: &Layout) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&layout.records())?)
}

pub fn decode(text: &str, catalog: &Catalog) -> Result<Layout, CodecError> {
    let records: Vec<InstanceRecord> = serde_json::from_str(text)?;
    let mut instances = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let instance = PlacedInstance::from_record(record, catalog).map_err(|e| match e {
            CatalogError::UnknownType(name) => CodecError::UnknownType { name, index },
            other => CodecError::Catalog(other),
        })?;
        instances.push(instance);
    }

    let mut layout = Layout::new();
    layout.replace_with(instances);
    Ok(layout)
}

// ── File helpers ──────────────────────────────────────────────────────

pub fn read_layout(path: &Path, catalog: &Catalog) -> Result<Layout, CodecError> {
    let file = File::open(path)?;
    let layout = LayoutReader::new(BufReader::new(file)).read(catalog)?;
    log::info!("Loaded {} buildings from {}", layout.len(), path.display());
    Ok(layout)
}

/// Save `layout` to `path`.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it, so an interrupted save leaves the previous file intact.
pub fn write_layout(path: &Path, layout: &Layout) -> Result<(), CodecError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    LayoutWriter::new(BufWriter::new(staged.as_file_mut())).write(layout)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    log::info!("Saved {} buildings to {}", layout.len(), path.display());
    Ok(())
}
