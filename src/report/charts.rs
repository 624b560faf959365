//! Distribution → chart entry conversion shared by the report builders.

use super::model::Bucket;
use crate::entry::{PieSegment, ReportEntry};
use crate::writer::chart::NO_DATA;
use crate::writer::palette_hex;

/// Maximum slices per pie chart; one per palette colour.
pub const MAX_PIE_SEGMENTS: usize = 8;

/// Maximum rows per bar chart.
pub const MAX_BAR_ROWS: usize = 20;

/// Placeholder line for an empty section.
pub fn no_data() -> ReportEntry {
    ReportEntry::text(NO_DATA).indented(16.0)
}

/// `part` as a percentage of `total`, rounded; the denominator is floored at 1.
pub fn percent_of(part: u64, total: u64) -> f32 {
    (part as f64 * 100.0 / total.max(1) as f64).round() as f32
}

/// Integer percentages that add up to exactly 100 (largest remainder
/// method). All-zero input yields all zeros.
pub fn whole_percentages(values: &[u64]) -> Vec<f32> {
    // Widened so that counts near u64::MAX cannot overflow
    let scaled: Vec<u128> = values.iter().map(|&v| u128::from(v) * 100).collect();
    let total: u128 = values.iter().map(|&v| u128::from(v)).sum();
    if total == 0 {
        return vec![0.0; values.len()];
    }

    let mut shares: Vec<u128> = scaled.iter().map(|v| v / total).collect();
    let assigned: u128 = shares.iter().sum();

    let mut by_remainder: Vec<usize> = (0..values.len()).collect();
    // Stable sort keeps earlier segments first on ties
    by_remainder.sort_by_key(|&i| std::cmp::Reverse(scaled[i] % total));
    for &i in by_remainder.iter().take((100 - assigned) as usize) {
        shares[i] += 1;
    }

    shares.into_iter().map(|s| s as f32).collect()
}

/// Sum of all bucket counts, saturating at `u64::MAX`.
pub fn total_count(buckets: &[Bucket]) -> u64 {
    buckets.iter().fold(0u64, |acc, b| acc.saturating_add(b.count))
}

fn limited<'a>(buckets: &'a [Bucket], limit: usize, what: &str) -> &'a [Bucket] {
    if buckets.len() > limit {
        log::warn!("Truncating {} from {} to {} entries", what, buckets.len(), limit);
        &buckets[..limit]
    } else {
        buckets
    }
}

/// Bar rows for a distribution, at most `limit` rows.
///
/// Percentages are shares of the whole distribution, including truncated
/// rows; fill ratios are relative to the largest shown count.
pub fn bar_rows(buckets: &[Bucket], limit: usize) -> Vec<ReportEntry> {
    if buckets.is_empty() {
        return vec![no_data()];
    }

    let total = total_count(buckets);
    let shown = limited(buckets, limit, "bar rows");
    let max = shown.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    shown
        .iter()
        .map(|bucket| ReportEntry::BarRow {
            label: bucket.label.clone(),
            count: bucket.count,
            percent: percent_of(bucket.count, total),
            ratio: bucket.count as f32 / max as f32,
        })
        .collect()
}

/// A pie chart for a distribution, at most `limit` segments. Colours are
/// assigned from the palette by position.
pub fn pie_chart(buckets: &[Bucket], limit: usize) -> ReportEntry {
    if buckets.is_empty() {
        return no_data();
    }

    let shown = limited(buckets, limit, "pie segments");
    let values: Vec<u64> = shown.iter().map(|b| b.count).collect();
    let percents = whole_percentages(&values);

    ReportEntry::PieChart {
        segments: shown
            .iter()
            .zip(percents)
            .enumerate()
            .map(|(index, (bucket, percent))| PieSegment {
                label: bucket.label.clone(),
                value: bucket.count,
                percent,
                color: palette_hex(index).to_string(),
            })
            .collect(),
    }
}
