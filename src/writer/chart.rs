//! Vector chart rendering: bar rows and pie charts.
//!
//! Arcs are approximated with straight segments rather than Bézier curves,
//! `max(6, ceil(sweep / 2π * 40))` per slice, so even a sliver renders as a
//! visible wedge.

use super::color::{palette_hex, Color};
use super::content_stream::ContentStreamBuilder;
use super::REGULAR_FONT;
use crate::entry::PieSegment;
use crate::text::truncate_label;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Width of the bar track.
pub const BAR_TRACK_WIDTH: f32 = 230.0;
/// Offset of the bar track from the row's left edge.
const BAR_TRACK_OFFSET: f32 = 170.0;
/// Offset of the "count (percent%)" text from the row's left edge.
const BAR_VALUE_OFFSET: f32 = 410.0;
const BAR_HEIGHT: f32 = 10.0;
const LABEL_SIZE: f32 = 9.0;
const BAR_LABEL_CHARS: usize = 34;

/// Pie radius.
pub const PIE_RADIUS: f32 = 50.0;
const PIE_LEGEND_OFFSET: f32 = 140.0;
const LEGEND_ROW: f32 = 14.0;
const LEGEND_LABEL_CHARS: usize = 48;

/// Arc segments per full circle.
const SEGMENTS_PER_TURN: f32 = 40.0;
/// Minimum arc segments per slice.
const MIN_ARC_SEGMENTS: usize = 6;

/// Shown instead of a chart that has nothing to draw.
pub const NO_DATA: &str = "No data available.";

const TRACK_COLOR: Color = Color::gray(0.9);
const TEXT_COLOR: Color = Color::gray(0.15);

/// Format a percentage: whole numbers without decimals, otherwise one decimal.
pub fn format_percent(percent: f32) -> String {
    let rounded = (percent * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}%", rounded as i64)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Filled width of a bar: proportional to `ratio`, never less than one unit so
/// zero rows remain visible as a hairline.
pub fn bar_fill_width(track_width: f32, ratio: f32) -> f32 {
    (track_width * ratio.clamp(0.0, 1.0)).round().max(1.0)
}

/// Draw one bar row whose band starts at `y` (top) and is 18 units tall.
pub fn render_bar(
    builder: &mut ContentStreamBuilder,
    x: f32,
    y: f32,
    label: &str,
    count: u64,
    percent: f32,
    ratio: f32,
) {
    let baseline = y - 12.5;
    let bar_y = y - 14.0;

    builder
        .fill_color(TEXT_COLOR)
        .set_font(REGULAR_FONT, LABEL_SIZE)
        .text(&truncate_label(label, BAR_LABEL_CHARS), x, baseline);

    let track_x = x + BAR_TRACK_OFFSET;
    builder.fill_rect(track_x, bar_y, BAR_TRACK_WIDTH, BAR_HEIGHT, TRACK_COLOR);
    builder.fill_rect(
        track_x,
        bar_y,
        bar_fill_width(BAR_TRACK_WIDTH, ratio),
        BAR_HEIGHT,
        Color::from_hex(palette_hex(0)),
    );

    builder
        .fill_color(TEXT_COLOR)
        .set_font(REGULAR_FONT, LABEL_SIZE)
        .text(
            &format!("{} ({})", count, format_percent(percent)),
            x + BAR_VALUE_OFFSET,
            baseline,
        );
}

/// Geometry of one drawn pie slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Index of the segment this slice belongs to
    pub segment: usize,
    /// Fill colour
    pub color: Color,
    /// Angular extent in radians
    pub sweep: f32,
    /// Closed polygon: centre followed by the arc points
    pub vertices: Vec<(f32, f32)>,
}

/// Number of straight segments used for an arc covering `fraction` of a turn.
pub fn arc_segments(fraction: f32) -> usize {
    ((fraction * SEGMENTS_PER_TURN).ceil() as usize).max(MIN_ARC_SEGMENTS)
}

/// Whether any segment has a non-zero value.
pub fn has_data(segments: &[PieSegment]) -> bool {
    segments.iter().any(|s| s.value > 0)
}

/// Compute slice polygons for a pie centred at `(cx, cy)`.
///
/// Slices start at twelve o'clock and run clockwise. Zero-value segments
/// produce no slice.
pub fn pie_slices(segments: &[PieSegment], cx: f32, cy: f32, radius: f32) -> Vec<PieSlice> {
    let total = segments.iter().map(|s| s.value as f64).sum::<f64>().max(1.0);
    let mut start = FRAC_PI_2;
    let mut slices = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if segment.value == 0 {
            continue;
        }
        let fraction = (segment.value as f64 / total) as f32;
        let sweep = TAU * fraction;
        let steps = arc_segments(fraction);

        let mut vertices = Vec::with_capacity(steps + 2);
        vertices.push((cx, cy));
        for step in 0..=steps {
            let angle = start - sweep * step as f32 / steps as f32;
            vertices.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
        }

        slices.push(PieSlice {
            segment: index,
            color: Color::from_hex(&segment.color),
            sweep,
            vertices,
        });
        start -= sweep;
    }

    slices
}

/// Draw a pie block whose top edge is at `y`: the pie on the left, a legend
/// with one row per segment on the right.
pub fn render_pie(builder: &mut ContentStreamBuilder, x: f32, y: f32, segments: &[PieSegment]) {
    if !has_data(segments) {
        builder
            .fill_color(TEXT_COLOR)
            .set_font(REGULAR_FONT, LABEL_SIZE)
            .text(NO_DATA, x, y - 12.0);
        return;
    }

    let cx = x + 10.0 + PIE_RADIUS;
    let cy = y - 10.0 - PIE_RADIUS;
    for slice in pie_slices(segments, cx, cy, PIE_RADIUS) {
        builder.fill_polygon(&slice.vertices, slice.color);
    }

    let legend_x = x + PIE_LEGEND_OFFSET;
    for (index, segment) in segments.iter().enumerate() {
        let baseline = y - 20.0 - index as f32 * LEGEND_ROW;
        builder.fill_rect(legend_x, baseline - 1.0, 9.0, 9.0, Color::from_hex(&segment.color));
        builder
            .fill_color(TEXT_COLOR)
            .set_font(REGULAR_FONT, LABEL_SIZE)
            .text(
                &format!(
                    "{}: {} ({})",
                    truncate_label(&segment.label, LEGEND_LABEL_CHARS),
                    segment.value,
                    format_percent(segment.percent)
                ),
                legend_x + 14.0,
                baseline,
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::content_stream::ContentStreamOp;
    use std::f32::consts::PI;

    fn segment(label: &str, value: u64, percent: f32, index: usize) -> PieSegment {
        PieSegment {
            label: label.to_string(),
            value,
            percent,
            color: palette_hex(index).to_string(),
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(75.0), "75%");
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(format_percent(0.0), "0%");
    }

    #[test]
    fn test_bar_fill_width() {
        assert_eq!(bar_fill_width(230.0, 1.0), 230.0);
        assert_eq!(bar_fill_width(230.0, 1.0 / 3.0), 77.0);
        assert_eq!(bar_fill_width(230.0, 0.0), 1.0);
        assert_eq!(bar_fill_width(230.0, 2.0), 230.0);
    }

    #[test]
    fn test_render_bar_ops() {
        let mut builder = ContentStreamBuilder::new();
        render_bar(&mut builder, 50.0, 700.0, "A", 3, 75.0, 1.0);
        let rects: Vec<_> = builder
            .operations()
            .iter()
            .filter_map(|op| match op {
                ContentStreamOp::Rect(x, _, w, _) => Some((*x, *w)),
                _ => None,
            })
            .collect();
        assert_eq!(rects, vec![(220.0, 230.0), (220.0, 230.0)]);

        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert!(content.contains("(A) Tj"));
        assert!(content.contains("(3 \\(75%\\)) Tj"));
    }

    #[test]
    fn test_arc_segments() {
        assert_eq!(arc_segments(1.0), 40);
        assert_eq!(arc_segments(0.5), 20);
        assert_eq!(arc_segments(0.01), 6);
        assert_eq!(arc_segments(0.26), 11);
    }

    #[test]
    fn test_zero_segment_has_no_slice() {
        let segments = vec![segment("none", 0, 0.0, 0), segment("all", 10, 100.0, 1)];
        let slices = pie_slices(&segments, 0.0, 0.0, 50.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].segment, 1);
        assert!((slices[0].sweep - TAU).abs() < 1e-5);
        // centre + 41 arc points
        assert_eq!(slices[0].vertices.len(), 42);
    }

    #[test]
    fn test_huge_values_split_evenly() {
        let segments = vec![segment("a", u64::MAX, 50.0, 0), segment("b", u64::MAX, 50.0, 1)];
        let slices = pie_slices(&segments, 0.0, 0.0, 50.0);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].sweep - PI).abs() < 1e-5);
        assert!((slices[1].sweep - PI).abs() < 1e-5);
    }

    #[test]
    fn test_slices_cover_full_turn() {
        let segments: Vec<_> = (0..5).map(|i| segment("s", (i + 1) as u64, 0.0, i)).collect();
        let slices = pie_slices(&segments, 100.0, 100.0, 50.0);
        let total: f32 = slices.iter().map(|s| s.sweep).sum();
        assert!((total - TAU).abs() < 1e-4);
        for slice in &slices {
            assert_eq!(slice.vertices[0], (100.0, 100.0));
            for &(vx, vy) in &slice.vertices[1..] {
                let distance = ((vx - 100.0).powi(2) + (vy - 100.0).powi(2)).sqrt();
                assert!((distance - 50.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_first_slice_starts_at_top() {
        let slices = pie_slices(&[segment("a", 1, 50.0, 0), segment("b", 1, 50.0, 1)], 0.0, 0.0, 10.0);
        let (x, y) = slices[0].vertices[1];
        assert!(x.abs() < 1e-4);
        assert!((y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_ninth_segment_reuses_first_colour() {
        let segments: Vec<_> = (0..9).map(|i| segment("s", 1, 0.0, i)).collect();
        let slices = pie_slices(&segments, 0.0, 0.0, 10.0);
        assert_eq!(slices[8].color, slices[0].color);
        assert_ne!(slices[1].color, slices[0].color);
    }

    #[test]
    fn test_all_zero_pie_renders_placeholder() {
        let mut builder = ContentStreamBuilder::new();
        render_pie(&mut builder, 50.0, 700.0, &[segment("a", 0, 0.0, 0), segment("b", 0, 0.0, 1)]);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert!(content.contains("(No data available.) Tj"));
        assert!(!content.contains(" m\n"));
    }

    #[test]
    fn test_legend_lists_zero_segment() {
        let mut builder = ContentStreamBuilder::new();
        render_pie(&mut builder, 50.0, 700.0, &[segment("Never", 0, 0.0, 0), segment("Daily", 10, 100.0, 1)]);
        let content = String::from_utf8(builder.build().unwrap()).unwrap();
        assert!(content.contains("(Never: 0 \\(0%\\)) Tj"));
        assert!(content.contains("(Daily: 10 \\(100%\\)) Tj"));
        assert_eq!(content.matches("\nh\n").count(), 1);
    }
}
