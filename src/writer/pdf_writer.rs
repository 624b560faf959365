//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Object numbering is fixed: catalog = 1, page tree = 2, then one
//! (page, content stream) pair per page, then the regular and bold font
//! objects. Objects are appended in ascending id order to an [`ObjectBuffer`]
//! that records where each one starts, so the xref table is built from offsets
//! captured at write time rather than recomputed afterwards.

use super::object_serializer::ObjectSerializer;
use super::{BOLD_FONT, REGULAR_FONT};
use crate::error::Result;
use crate::object::{Dict, PdfObject};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Write;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.4")
    pub version: String,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.4".to_string(),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set the PDF version written in the header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, content streams are compressed using FlateDecode
    /// (zlib/deflate) to reduce file size.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Growing output buffer that remembers where each indirect object starts.
#[derive(Debug, Default)]
pub struct ObjectBuffer {
    bytes: Vec<u8>,
    offsets: BTreeMap<u32, usize>,
}

impl ObjectBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes that are not an indirect object (header, xref, trailer).
    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Append a serialized indirect object, recording its starting offset.
    ///
    /// # Panics
    ///
    /// Panics if `id` is zero or not greater than every id appended before:
    /// out-of-order objects would corrupt the xref table silently.
    pub fn append_object(&mut self, id: u32, chunk: &[u8]) {
        assert!(id > 0, "object id 0 is reserved for the free list head");
        if let Some((&last, _)) = self.offsets.last_key_value() {
            assert!(id > last, "object {} appended after object {}", id, last);
        }
        self.offsets.insert(id, self.bytes.len());
        self.bytes.extend_from_slice(chunk);
    }

    /// Current length of the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Recorded offset of an object.
    pub fn offset(&self, id: u32) -> Option<usize> {
        self.offsets.get(&id).copied()
    }

    /// Highest object id appended so far.
    pub fn max_id(&self) -> u32 {
        self.offsets.keys().next_back().copied().unwrap_or(0)
    }

    /// Cross-reference section covering ids `0..=max_id`.
    ///
    /// Every id gets an entry; ids never appended get a free placeholder so
    /// the entries after them stay aligned with their ids.
    pub fn xref_section(&self) -> std::io::Result<Vec<u8>> {
        let max_id = self.max_id();
        let mut out = Vec::with_capacity(20 * (max_id as usize + 2));
        writeln!(out, "xref")?;
        writeln!(out, "0 {}", max_id + 1)?;
        // Each entry is exactly 20 bytes: 10 + 1 + 5 + 1 + 1 + 2
        writeln!(out, "0000000000 65535 f ")?;
        for id in 1..=max_id {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(out, "{:010} 00000 n ", offset)?,
                None => writeln!(out, "0000000000 00000 f ")?,
            }
        }
        Ok(out)
    }

    /// Take the finished bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Ids assigned to the objects of a document with `page_count` pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLayout {
    page_count: u32,
}

impl ObjectLayout {
    /// Catalog object id.
    pub const CATALOG: u32 = 1;
    /// Page tree root id.
    pub const PAGES: u32 = 2;

    /// Layout for `page_count` pages.
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count: page_count as u32,
        }
    }

    /// Page object id for zero-based page `index`.
    pub fn page(&self, index: usize) -> u32 {
        3 + 2 * index as u32
    }

    /// Content stream id for zero-based page `index`.
    pub fn content(&self, index: usize) -> u32 {
        self.page(index) + 1
    }

    /// Regular font object id.
    pub fn regular_font(&self) -> u32 {
        3 + 2 * self.page_count
    }

    /// Bold font object id.
    pub fn bold_font(&self) -> u32 {
        self.regular_font() + 1
    }

    /// Highest object id.
    pub fn max_id(&self) -> u32 {
        self.bold_font()
    }
}

/// PDF document writer.
///
/// Collects one finished content stream per page and writes the complete
/// document with two shared Helvetica font resources.
#[derive(Debug)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    page_width: f32,
    page_height: f32,
    pages: Vec<Vec<u8>>,
}

impl PdfWriter {
    /// Create a new PDF writer for A4 pages with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            page_width: 595.0,
            page_height: 842.0,
            pages: Vec::new(),
        }
    }

    /// Set the MediaBox used for every page.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Add a page with its content stream.
    pub fn add_page(&mut self, content: Vec<u8>) -> &mut Self {
        self.pages.push(content);
        self
    }

    /// Number of pages added.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn font_object(base_font: &str) -> PdfObject {
        Dict::new()
            .with("Type", PdfObject::name("Font"))
            .with("Subtype", PdfObject::name("Type1"))
            .with("BaseFont", PdfObject::name(base_font))
            .with("Encoding", PdfObject::name("WinAnsiEncoding"))
            .into()
    }

    fn content_object(&self, raw: &[u8]) -> Result<PdfObject> {
        if self.config.compress {
            let dict = Dict::new().with("Filter", PdfObject::name("FlateDecode"));
            Ok(PdfObject::Stream(dict, Bytes::from(compress_data(raw)?)))
        } else {
            Ok(PdfObject::Stream(Dict::new(), Bytes::copy_from_slice(raw)))
        }
    }

    /// Build the complete PDF document.
    ///
    /// # Panics
    ///
    /// Panics if no page was added.
    pub fn finish(self) -> Result<Vec<u8>> {
        assert!(!self.pages.is_empty(), "a PDF document needs at least one page");

        let serializer = ObjectSerializer;
        let layout = ObjectLayout::new(self.pages.len());
        let mut buffer = ObjectBuffer::new();
        let write = |buffer: &mut ObjectBuffer, id: u32, obj: &PdfObject| -> std::io::Result<()> {
            buffer.append_object(id, &serializer.serialize_indirect(id, obj)?);
            Ok(())
        };

        // Header plus binary marker comment
        buffer.append(format!("%PDF-{}\n", self.config.version).as_bytes());
        buffer.append(b"%\xE2\xE3\xCF\xD3\n");

        let catalog = Dict::new()
            .with("Type", PdfObject::name("Catalog"))
            .with("Pages", PdfObject::reference(ObjectLayout::PAGES));
        write(&mut buffer, ObjectLayout::CATALOG, &PdfObject::Dict(catalog))?;

        let kids = (0..self.pages.len())
            .map(|i| PdfObject::reference(layout.page(i)))
            .collect();
        let page_tree = Dict::new()
            .with("Type", PdfObject::name("Pages"))
            .with("Kids", PdfObject::Array(kids))
            .with("Count", self.pages.len() as i64);
        write(&mut buffer, ObjectLayout::PAGES, &PdfObject::Dict(page_tree))?;

        let resources = Dict::new().with(
            "Font",
            Dict::new()
                .with(REGULAR_FONT, PdfObject::reference(layout.regular_font()))
                .with(BOLD_FONT, PdfObject::reference(layout.bold_font())),
        );
        let media_box = PdfObject::rect(0.0, 0.0, self.page_width as f64, self.page_height as f64);

        for (index, raw_content) in self.pages.iter().enumerate() {
            let content_id = layout.content(index);
            let page = Dict::new()
                .with("Type", PdfObject::name("Page"))
                .with("Parent", PdfObject::reference(ObjectLayout::PAGES))
                .with("MediaBox", media_box.clone())
                .with("Resources", resources.clone())
                .with("Contents", PdfObject::reference(content_id));
            write(&mut buffer, layout.page(index), &PdfObject::Dict(page))?;
            write(&mut buffer, content_id, &self.content_object(raw_content)?)?;
        }

        write(&mut buffer, layout.regular_font(), &Self::font_object("Helvetica"))?;
        write(&mut buffer, layout.bold_font(), &Self::font_object("Helvetica-Bold"))?;
        assert_eq!(buffer.max_id(), layout.max_id(), "object numbering drifted");

        let xref_start = buffer.len();
        let xref = buffer.xref_section()?;
        buffer.append(&xref);

        let trailer = Dict::new()
            .with("Root", PdfObject::reference(ObjectLayout::CATALOG))
            .with("Size", layout.max_id() as i64 + 1);
        buffer.append(b"trailer\n");
        buffer.append(&serializer.serialize(&PdfObject::Dict(trailer))?);
        buffer.append(format!("\nstartxref\n{}\n%%EOF\n", xref_start).as_bytes());

        log::debug!(
            "Wrote PDF with {} page(s), {} objects, {} bytes",
            self.pages.len(),
            layout.max_id(),
            buffer.len()
        );
        Ok(buffer.into_bytes())
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
