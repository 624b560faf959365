//! PDF writing for paginated reports.
//!
//! ## Architecture
//!
//! ```text
//! Vec<Page> (from layout::paginate)
//!     ↓
//! [page_renderer] (items → ContentStreamBuilder, charts via [chart])
//!     ↓
//! [PdfWriter] (catalog, page tree, pages, fonts, xref, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use study_report::config::ReportConfig;
//! use study_report::entry::ReportEntry;
//! use study_report::layout::paginate;
//! use study_report::writer::{serialize, PdfWriterConfig};
//!
//! let config = ReportConfig::default();
//! let pages = paginate(&[ReportEntry::heading("Results", 16.0)], config.geometry());
//! let bytes = serialize(&pages, &config, &PdfWriterConfig::default())?;
//! ```

pub mod chart;
pub mod color;
mod content_stream;
mod encoding;
mod object_serializer;
mod page_renderer;
mod pdf_writer;

pub use color::{palette_hex, Color, PALETTE};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use encoding::encode_win_ansi;
pub use object_serializer::ObjectSerializer;
pub use page_renderer::{footer_text, render_page};
pub use pdf_writer::{ObjectBuffer, ObjectLayout, PdfWriter, PdfWriterConfig};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::layout::Page;

/// Resource name of the regular font (Helvetica).
pub const REGULAR_FONT: &str = "F1";
/// Resource name of the bold font (Helvetica-Bold).
pub const BOLD_FONT: &str = "F2";

/// Render paginated items and write them as a complete PDF document.
///
/// Every page gets a "Page N of M" footer. An empty page list still produces
/// a valid one-page document.
pub fn serialize(
    pages: &[Page],
    config: &ReportConfig,
    writer_config: &PdfWriterConfig,
) -> Result<Vec<u8>> {
    let (width, height) = config.page_size.dimensions();
    let mut writer = PdfWriter::with_config(writer_config.clone()).with_page_size(width, height);

    let empty: [Page; 1] = [Vec::new()];
    let pages = if pages.is_empty() { &empty[..] } else { pages };

    let mut replaced = 0;
    for (index, items) in pages.iter().enumerate() {
        let mut builder = render_page(items, index, pages.len(), config);
        replaced += builder.replaced_chars();
        writer.add_page(builder.build()?);
    }
    if replaced > 0 {
        log::warn!("{} character(s) could not be encoded in WinAnsi and were replaced", replaced);
    }

    writer.finish()
}
