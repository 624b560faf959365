//! Turns one page of laid-out items into a content stream.

use super::chart::{render_bar, render_pie};
use super::color::Color;
use super::content_stream::ContentStreamBuilder;
use super::{BOLD_FONT, REGULAR_FONT};
use crate::config::ReportConfig;
use crate::layout::{ItemKind, RenderedItem};

/// Average Helvetica advance as a fraction of the font size; good enough to
/// centre a short footer.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Footer text for a page (1-based numbering).
pub fn footer_text(page_number: usize, page_count: usize) -> String {
    format!("Page {} of {}", page_number, page_count)
}

/// Render the items of one page, followed by the page footer.
///
/// `page_index` is zero-based; the footer reads `Page {index + 1} of {count}`.
pub fn render_page(
    items: &[RenderedItem],
    page_index: usize,
    page_count: usize,
    config: &ReportConfig,
) -> ContentStreamBuilder {
    let mut builder = ContentStreamBuilder::new();

    for item in items {
        match &item.kind {
            ItemKind::Text { text, bold, size, .. } => {
                if text.is_empty() {
                    continue;
                }
                let font = if *bold { BOLD_FONT } else { REGULAR_FONT };
                builder
                    .fill_color(Color::black())
                    .set_font(font, *size)
                    .text(text, item.x, item.y - size);
            },
            ItemKind::Bar {
                label,
                count,
                percent,
                ratio,
            } => render_bar(&mut builder, item.x, item.y, label, *count, *percent, *ratio),
            ItemKind::Pie { segments, .. } => render_pie(&mut builder, item.x, item.y, segments),
        }
    }

    let footer = footer_text(page_index + 1, page_count);
    let (page_width, _) = config.page_size.dimensions();
    let footer_width = footer.chars().count() as f32 * config.footer_size * AVG_CHAR_WIDTH;
    builder
        .fill_color(Color::gray(0.4))
        .set_font(REGULAR_FONT, config.footer_size)
        .text(&footer, (page_width - footer_width) / 2.0, config.footer_y);

    builder
}
