//! Pagination of report entries.

use crate::entry::{PieSegment, ReportEntry};
use crate::text::{max_line_length, wrap};

/// Fixed height of one bar row.
pub const BAR_ROW_HEIGHT: f32 = 18.0;

/// Minimum height of a text line.
const MIN_LINE_HEIGHT: f32 = 12.0;

/// Minimum block height reserved for a pie chart.
const MIN_PIE_HEIGHT: f32 = 120.0;

/// Vertical band available for content, in PDF user space (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Cursor position at the top of every page
    pub top_y: f32,
    /// Nothing may extend below this line
    pub bottom_y: f32,
    /// Left edge for unindented content
    pub left_x: f32,
}

/// What a placed item draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// One (possibly wrapped) line of text
    Text {
        /// Line content
        text: String,
        /// Bold font
        bold: bool,
        /// Font size
        size: f32,
        /// Vertical space the line occupies
        line_height: f32,
    },
    /// One bar row
    Bar {
        /// Row label
        label: String,
        /// Absolute count
        count: u64,
        /// Percent of total
        percent: f32,
        /// Fill ratio in `[0, 1]`
        ratio: f32,
    },
    /// A pie chart block
    Pie {
        /// Slices
        segments: Vec<PieSegment>,
        /// Reserved block height
        height: f32,
    },
}

impl ItemKind {
    /// Vertical space this item needs below its `y`.
    pub fn height(&self) -> f32 {
        match self {
            ItemKind::Text { line_height, .. } => *line_height,
            ItemKind::Bar { .. } => BAR_ROW_HEIGHT,
            ItemKind::Pie { height, .. } => *height,
        }
    }
}

/// An entry (or one wrapped line of it) with its page and position.
///
/// `y` is the top of the item's band; the item occupies `[y - height, y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem {
    /// Zero-based page index
    pub page: usize,
    /// Left edge
    pub x: f32,
    /// Top of the item's band
    pub y: f32,
    /// Payload
    pub kind: ItemKind,
}

/// Items placed on one page, top to bottom.
pub type Page = Vec<RenderedItem>;

/// Line height for a font size: `max(12, round(size * 1.35))`.
pub fn line_height(size: f32) -> f32 {
    (size * 1.35).round().max(MIN_LINE_HEIGHT)
}

/// Height reserved for a pie with `segment_count` legend rows.
pub fn pie_height(segment_count: usize) -> f32 {
    (34.0 + segment_count as f32 * 14.0).max(MIN_PIE_HEIGHT)
}

/// Flow-layout cursor over a growing list of pages.
#[derive(Debug)]
pub struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
    // Set by a page break, cleared once something is placed
    fresh: bool,
}

impl Paginator {
    /// Start with one empty page and the cursor at the top.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Vec::new()],
            y: geometry.top_y,
            fresh: false,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> f32 {
        self.y
    }

    /// Lay out one entry.
    pub fn push(&mut self, entry: &ReportEntry) {
        match entry {
            // Spacers never push the first item of a later page below the top
            ReportEntry::Spacer { .. } if self.fresh => {},
            ReportEntry::Spacer { height } => {
                self.y -= height.max(0.0);
                if self.y < self.geometry.bottom_y {
                    self.break_page();
                }
            },
            ReportEntry::TextLine {
                text,
                bold,
                size,
                indent,
                wrap: wrap_requested,
            } => {
                let line_height = line_height(*size);
                let limit = max_line_length(*indent, *wrap_requested);
                for line in wrap(text, limit) {
                    self.place(
                        *indent,
                        ItemKind::Text {
                            text: line,
                            bold: *bold,
                            size: *size,
                            line_height,
                        },
                    );
                }
            },
            ReportEntry::BarRow {
                label,
                count,
                percent,
                ratio,
            } => self.place(
                0.0,
                ItemKind::Bar {
                    label: label.clone(),
                    count: *count,
                    percent: *percent,
                    ratio: ratio.clamp(0.0, 1.0),
                },
            ),
            ReportEntry::PieChart { segments } => self.place(
                0.0,
                ItemKind::Pie {
                    segments: segments.clone(),
                    height: pie_height(segments.len()),
                },
            ),
        }
    }

    /// Finish layout and return the pages. There is always at least one.
    pub fn finish(mut self) -> Vec<Page> {
        // A trailing spacer can open a page that nothing lands on.
        if self.pages.len() > 1 && self.pages.last().map_or(false, Vec::is_empty) {
            self.pages.pop();
        }
        self.pages
    }

    fn place(&mut self, indent: f32, kind: ItemKind) {
        if self.y - kind.height() < self.geometry.bottom_y {
            self.break_page();
        }
        let page = self.pages.len() - 1;
        let item = RenderedItem {
            page,
            x: self.geometry.left_x + indent,
            y: self.y,
            kind,
        };
        self.y -= item.kind.height();
        self.fresh = false;
        self.pages[page].push(item);
    }

    /// Move the cursor to the top of a fresh page. A page with nothing on it
    /// is reused rather than left blank.
    fn break_page(&mut self) {
        let current_is_empty = self.pages.last().map_or(true, Vec::is_empty);
        if !current_is_empty {
            self.pages.push(Vec::new());
        }
        self.y = self.geometry.top_y;
        self.fresh = true;
    }
}

/// Assign a page and position to every entry.
pub fn paginate(entries: &[ReportEntry], geometry: PageGeometry) -> Vec<Page> {
    let mut paginator = Paginator::new(geometry);
    for entry in entries {
        paginator.push(entry);
    }
    let pages = paginator.finish();
    log::debug!("Paginated {} entries onto {} page(s)", entries.len(), pages.len());
    pages
}
