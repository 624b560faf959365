//! Configuration for report layout.

use crate::layout::PageGeometry;

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    /// A4 (210mm x 297mm)
    A4,
    /// US Letter (8.5" x 11")
    Letter,
    /// Custom dimensions in points
    Custom(f32, f32),
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Page layout configuration for report rendering.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Page size
    pub page_size: PageSize,
    /// Left margin in points
    pub margin_left: f32,
    /// Top margin in points
    pub margin_top: f32,
    /// Bottom margin in points; nothing but the footer goes below it
    pub margin_bottom: f32,
    /// Baseline of the "Page N of M" footer, from the bottom edge
    pub footer_y: f32,
    /// Footer font size
    pub footer_size: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_left: 50.0,
            margin_top: 50.0,
            margin_bottom: 60.0,
            footer_y: 30.0,
            footer_size: 8.0,
        }
    }
}

impl ReportConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set left, top and bottom margins.
    pub fn with_margins(mut self, left: f32, top: f32, bottom: f32) -> Self {
        self.margin_left = left;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Vertical band the paginator may fill.
    pub fn geometry(&self) -> PageGeometry {
        let (_, height) = self.page_size.dimensions();
        PageGeometry {
            top_y: height - self.margin_top,
            bottom_y: self.margin_bottom,
            left_x: self.margin_left,
        }
    }
}
