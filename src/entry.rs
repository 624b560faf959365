//! Report entry model.
//!
//! A report is a flat, top-to-bottom list of [`ReportEntry`] values. Entries
//! carry no page or position information; the paginator assigns that later.

use serde::{Deserialize, Serialize};

/// Default body font size in points.
pub const BODY_SIZE: f32 = 10.0;

/// One logical unit of report content before layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportEntry {
    /// A line (or paragraph, when `wrap` is set) of text
    TextLine {
        /// Text content
        text: String,
        /// Whether to use the bold font
        bold: bool,
        /// Font size in points
        size: f32,
        /// Left indent in points
        indent: f32,
        /// Whether long text should be wrapped into several lines
        wrap: bool,
    },
    /// Vertical gap
    Spacer {
        /// Gap height in points
        height: f32,
    },
    /// One horizontal bar of a bar chart
    BarRow {
        /// Row label
        label: String,
        /// Absolute count
        count: u64,
        /// Share of the row set's total, in percent
        percent: f32,
        /// Fill ratio relative to the row set's maximum, in `[0, 1]`
        ratio: f32,
    },
    /// A pie chart with legend
    PieChart {
        /// Slices in legend order
        segments: Vec<PieSegment>,
    },
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    /// Legend label
    pub label: String,
    /// Absolute value
    pub value: u64,
    /// Share of the total, in percent
    pub percent: f32,
    /// Fill colour as `#rgb` or `#rrggbb`
    pub color: String,
}

impl ReportEntry {
    /// A plain body line.
    pub fn text(text: impl Into<String>) -> Self {
        ReportEntry::TextLine {
            text: text.into(),
            bold: false,
            size: BODY_SIZE,
            indent: 0.0,
            wrap: false,
        }
    }

    /// A wrapped body paragraph at the given indent.
    pub fn paragraph(text: impl Into<String>, indent: f32) -> Self {
        ReportEntry::TextLine {
            text: text.into(),
            bold: false,
            size: BODY_SIZE,
            indent,
            wrap: true,
        }
    }

    /// A bold heading line.
    pub fn heading(text: impl Into<String>, size: f32) -> Self {
        ReportEntry::TextLine {
            text: text.into(),
            bold: true,
            size,
            indent: 0.0,
            wrap: true,
        }
    }

    /// A vertical gap.
    pub fn spacer(height: f32) -> Self {
        ReportEntry::Spacer { height }
    }

    /// Return a copy of a text line shifted right by `indent`; other entries
    /// are returned unchanged.
    pub fn indented(self, indent: f32) -> Self {
        match self {
            ReportEntry::TextLine { text, bold, size, wrap, .. } => ReportEntry::TextLine {
                text,
                bold,
                size,
                indent,
                wrap,
            },
            other => other,
        }
    }
}
